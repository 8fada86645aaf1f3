//! The handful of word problems famous for tempting a fast, wrong,
//! "intuitive" answer (spec §4.4 "CRT word problems" — bat-and-ball,
//! lily-pad doubling, widget-machine, harmonic-mean speed, catch-up time,
//! sock-drawer pigeonhole).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{solver_type, ComputeResult, Solver};

use super::timed;

fn format_value(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

static BAT_AND_BALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)bat\s+and\s+(?:a\s+)?ball\s+(?:cost|costs?)\s+\$?(\d+(?:\.\d+)?).*?bat\s+costs?\s+\$?(\d+(?:\.\d+)?)\s+more").expect("static regex"));
static LILY_PAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)lily\s?pads?.*?doubles?.*?(\d+)\s+days?.*?cover\s+the\s+(?:entire\s+)?lake").expect("static regex"));
static WIDGET_MACHINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s+machines?\s+(?:take|takes)\s+(\d+)\s+minutes?\s+to\s+make\s+(\d+)\s+widgets?.*?(\d+)\s+machines?").expect("static regex"));
static HARMONIC_SPEED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)drives?\s+.*?(\d+(?:\.\d+)?)\s*(?:mph|km/h).*?(?:returns?|back).*?(\d+(?:\.\d+)?)\s*(?:mph|km/h)").expect("static regex"));
static CATCH_UP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:mph|km/h|m/s).*?head\s+start\s+of\s+(\d+(?:\.\d+)?)\s*(?:hours?|hrs?|minutes?).*?(\d+(?:\.\d+)?)\s*(?:mph|km/h|m/s)")
        .expect("static regex")
});
static SOCK_DRAWER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:(\d+)\s+colors?\s+of\s+socks?|socks?\s+in\s+(\d+)\s+colors?).*?(?:guarantee|ensure|be\s+sure).*?matching\s+pair").expect("static regex")
});

fn solve_bat_and_ball(lower: &str) -> Option<ComputeResult> {
    let caps = BAT_AND_BALL.captures(lower)?;
    let total: f64 = caps[1].parse().ok()?;
    let more: f64 = caps[2].parse().ok()?;
    let ball_dollars = (total - more) / 2.0;
    let ball_cents = ball_dollars * 100.0;
    Some(ComputeResult::solved("crt_bat_ball", format_value(ball_cents), 0.9, 0))
}

fn solve_lily_pad(lower: &str) -> Option<ComputeResult> {
    let caps = LILY_PAD.captures(lower)?;
    let full_coverage_day: f64 = caps[1].parse().ok()?;
    // Doubling each day means half-coverage is exactly one day before full.
    Some(ComputeResult::solved("crt_lily_pad", format_value(full_coverage_day - 1.0), 0.9, 0))
}

fn solve_widget_machine(lower: &str) -> Option<ComputeResult> {
    let caps = WIDGET_MACHINE.captures(lower)?;
    let minutes: f64 = caps[2].parse().ok()?;
    // Each machine makes one widget in the same `minutes`, independent of
    // how many machines run in parallel.
    Some(ComputeResult::solved("crt_widget_machine", format_value(minutes), 0.9, 0))
}

fn solve_harmonic_speed(lower: &str) -> Option<ComputeResult> {
    let caps = HARMONIC_SPEED.captures(lower)?;
    let out_speed: f64 = caps[1].parse().ok()?;
    let back_speed: f64 = caps[2].parse().ok()?;
    if out_speed <= 0.0 || back_speed <= 0.0 {
        return None;
    }
    let average = 2.0 * out_speed * back_speed / (out_speed + back_speed);
    Some(ComputeResult::solved("crt_harmonic_speed", format_value(average), 0.85, 0))
}

fn solve_catch_up(lower: &str) -> Option<ComputeResult> {
    let caps = CATCH_UP.captures(lower)?;
    let leader_speed: f64 = caps[1].parse().ok()?;
    let head_start: f64 = caps[2].parse().ok()?;
    let chaser_speed: f64 = caps[3].parse().ok()?;
    if chaser_speed <= leader_speed {
        return None; // never catches up
    }
    let head_start_distance = leader_speed * head_start;
    let time = head_start_distance / (chaser_speed - leader_speed);
    Some(ComputeResult::solved("crt_catch_up", format_value(time), 0.85, 0))
}

fn solve_sock_drawer(lower: &str) -> Option<ComputeResult> {
    let caps = SOCK_DRAWER.captures(lower)?;
    let colors: u64 = caps.get(1).or_else(|| caps.get(2))?.as_str().parse().ok()?;
    Some(ComputeResult::solved("crt_sock_drawer", (colors + 1).to_string(), 0.95, 0))
}

fn solve(text: &str, lower: &str) -> ComputeResult {
    let _ = text;
    timed(|| {
        solve_bat_and_ball(lower)
            .or_else(|| solve_lily_pad(lower))
            .or_else(|| solve_widget_machine(lower))
            .or_else(|| solve_harmonic_speed(lower))
            .or_else(|| solve_catch_up(lower))
            .or_else(|| solve_sock_drawer(lower))
            .unwrap_or_else(ComputeResult::unsolved)
    })
}

/// The registry entry for this solver.
pub const SOLVER: Solver = Solver {
    name: "crt_word_problems",
    description: "Bat-and-ball, lily-pad, widget-machine, harmonic-mean speed, catch-up time, sock-drawer problems",
    types: solver_type::WORD_PROBLEM,
    priority: 25,
    solve,
};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bat_and_ball_is_not_ten_cents() {
        let lower = "a bat and a ball cost $1.10 total. the bat costs $1.00 more than the ball. how much is the ball?";
        let result = solve(lower, lower);
        assert!(result.solved);
        assert_eq!(result.method, Some("crt_bat_ball"));
        assert_eq!(result.result.as_deref(), Some("5"));
    }

    #[test]
    fn lily_pad_half_coverage_is_one_day_before_full() {
        let lower = "a lily pad patch doubles in size every day. it takes 48 days to cover the entire lake. when is it half covered?";
        let result = solve(lower, lower);
        assert!(result.solved);
        assert_eq!(result.result.as_deref(), Some("47"));
    }

    #[test]
    fn widget_machine_time_is_independent_of_machine_count() {
        let lower = "if 5 machines take 5 minutes to make 5 widgets, how long would 100 machines take to make 100 widgets?";
        let result = solve(lower, lower);
        assert!(result.solved);
        assert_eq!(result.result.as_deref(), Some("5"));
    }

    #[test]
    fn sock_drawer_pigeonhole() {
        let lower = "a drawer has socks in 4 colors. how many must you pull out to guarantee a matching pair?";
        let result = solve(lower, lower);
        assert!(result.solved);
        assert_eq!(result.result.as_deref(), Some("5"));
    }

    #[test]
    fn unrelated_text_is_unsolved() {
        let result = solve("what a nice day", "what a nice day");
        assert!(!result.solved);
    }
}
