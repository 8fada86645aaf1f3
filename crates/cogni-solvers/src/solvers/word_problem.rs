//! Age / distance / percent-change / profit word problems via a table of
//! regex+arithmetic closures (spec §4.4 "word-problem").

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{solver_type, ComputeResult, Solver};

use super::timed;

fn format_value(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

static AGE_IN_N_YEARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)is\s+(\d+)\s+years?\s+old.*?in\s+(\d+)\s+years?").expect("static regex"));
static AGE_N_YEARS_AGO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)is\s+(\d+)\s+years?\s+old.*?(\d+)\s+years?\s+ago").expect("static regex"));
static DISTANCE_RATE_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)travels?\s+(?:at\s+)?(\d+(?:\.\d+)?)\s*(?:mph|km/h|m/s)\s+for\s+(\d+(?:\.\d+)?)\s*(?:hours?|hrs?)").expect("static regex"));
static PERCENT_INCREASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*increased?\s+by\s+(\d+(?:\.\d+)?)\s*%").expect("static regex"));
static PERCENT_DECREASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*decreased?\s+by\s+(\d+(?:\.\d+)?)\s*%").expect("static regex"));
static PROFIT_MARGIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:bought|cost)\s+.*?\$(\d+(?:\.\d+)?).*?sold?\s+.*?\$(\d+(?:\.\d+)?)").expect("static regex"));

fn solve(text: &str, lower: &str) -> ComputeResult {
    let _ = text;
    timed(|| {
        if let Some(caps) = AGE_IN_N_YEARS.captures(lower) {
            if let Some(value) = (|| -> Option<f64> { Some(caps[1].parse::<f64>().ok()? + caps[2].parse::<f64>().ok()?) })() {
                return ComputeResult::solved("word_problem", format_value(value), 0.85, 0);
            }
        }
        if let Some(caps) = AGE_N_YEARS_AGO.captures(lower) {
            if let Some(value) = (|| -> Option<f64> { Some(caps[1].parse::<f64>().ok()? - caps[2].parse::<f64>().ok()?) })() {
                return ComputeResult::solved("word_problem", format_value(value), 0.85, 0);
            }
        }
        if let Some(caps) = DISTANCE_RATE_TIME.captures(lower) {
            if let Some(value) = (|| -> Option<f64> { Some(caps[1].parse::<f64>().ok()? * caps[2].parse::<f64>().ok()?) })() {
                return ComputeResult::solved("word_problem", format_value(value), 0.85, 0);
            }
        }
        if let Some(caps) = PERCENT_INCREASE.captures(lower) {
            if let Some(value) = (|| -> Option<f64> {
                let base: f64 = caps[1].parse().ok()?;
                let pct: f64 = caps[2].parse().ok()?;
                Some(base * (1.0 + pct / 100.0))
            })() {
                return ComputeResult::solved("word_problem", format_value(value), 0.85, 0);
            }
        }
        if let Some(caps) = PERCENT_DECREASE.captures(lower) {
            if let Some(value) = (|| -> Option<f64> {
                let base: f64 = caps[1].parse().ok()?;
                let pct: f64 = caps[2].parse().ok()?;
                Some(base * (1.0 - pct / 100.0))
            })() {
                return ComputeResult::solved("word_problem", format_value(value), 0.85, 0);
            }
        }
        if let Some(caps) = PROFIT_MARGIN.captures(lower) {
            if let Some(value) = (|| -> Option<f64> { Some(caps[2].parse::<f64>().ok()? - caps[1].parse::<f64>().ok()?) })() {
                return ComputeResult::solved("word_problem", format_value(value), 0.8, 0);
            }
        }
        ComputeResult::unsolved()
    })
}

/// The registry entry for this solver.
pub const SOLVER: Solver = Solver { name: "word_problem", description: "Age, distance, percent-change, and profit word problems", types: solver_type::WORD_PROBLEM, priority: 30, solve };

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn age_in_n_years() {
        let lower = "sam is 12 years old. how old will sam be in 5 years?";
        let result = solve(lower, lower);
        assert_eq!(result.result.as_deref(), Some("17"));
    }

    #[test]
    fn age_n_years_ago() {
        let lower = "sam is 12 years old. how old was sam 5 years ago?";
        let result = solve(lower, lower);
        assert_eq!(result.result.as_deref(), Some("7"));
    }

    #[test]
    fn distance_rate_time() {
        let lower = "a car travels at 60 mph for 3 hours. how far did it go?";
        let result = solve(lower, lower);
        assert_eq!(result.result.as_deref(), Some("180"));
    }

    #[test]
    fn percent_increase() {
        let lower = "a price of 200 increased by 10%";
        let result = solve(lower, lower);
        assert_eq!(result.result.as_deref(), Some("220"));
    }

    #[test]
    fn percent_decrease() {
        let lower = "a price of 200 decreased by 10%";
        let result = solve(lower, lower);
        assert_eq!(result.result.as_deref(), Some("180"));
    }

    #[test]
    fn profit_from_buy_and_sell() {
        let lower = "she bought a bike for $50 and sold it for $70";
        let result = solve(lower, lower);
        assert_eq!(result.result.as_deref(), Some("20"));
    }

    #[test]
    fn unrelated_text_is_unsolved() {
        let result = solve("what a nice day", "what a nice day");
        assert!(!result.solved);
    }
}
