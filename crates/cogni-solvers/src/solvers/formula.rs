//! Tiered closed-form formula patterns (spec §4.4 "formula", tiers T1-T4).
//! Each tier is tried in order; the first matching pattern within a tier
//! wins. `method` strings are tagged `formula_t{1..4}_{name}` for the
//! downstream domain filter.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{solver_type, ComputeResult, Solver};

use super::timed;

fn format_value(value: f64) -> String {
    if value.is_finite() && value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.6}").trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

fn fibonacci(n: u64) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        (a, b) = (b, a.saturating_add(b));
    }
    a
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

// ---- T1 ----

static PERCENTAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*%\s*of\s+(\d+(?:\.\d+)?)").expect("static regex"));
static FACTORIAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s*!|factorial\s+of\s+(\d+)").expect("static regex"));
static MODULO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(?:mod|%)\s*(\d+)").expect("static regex"));
static PRIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)is\s+(\d+)\s+prime").expect("static regex"));
static FIBONACCI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)(?:st|nd|rd|th)?\s+fibonacci\s+number|fibonacci\((\d+)\)").expect("static regex"));

fn solve_t1(lower: &str) -> Option<ComputeResult> {
    if let Some(caps) = PERCENTAGE_RE.captures(lower) {
        let pct: f64 = caps[1].parse().ok()?;
        let base: f64 = caps[2].parse().ok()?;
        return Some(ComputeResult::solved("formula_t1_percentage", format_value(pct / 100.0 * base), 0.9, 0));
    }
    if let Some(caps) = FACTORIAL_RE.captures(lower) {
        let n: u64 = caps.get(1).or_else(|| caps.get(2))?.as_str().parse().ok()?;
        if n > 20 {
            return None; // overflows u64 before we'd get a useful answer
        }
        let value: u64 = (1..=n.max(1)).product();
        return Some(ComputeResult::solved("formula_t1_factorial", value.to_string(), 0.95, 0));
    }
    if let Some(caps) = MODULO_RE.captures(lower) {
        let a: i64 = caps[1].parse().ok()?;
        let b: i64 = caps[2].parse().ok()?;
        if b == 0 {
            return None;
        }
        return Some(ComputeResult::solved("formula_t1_modulo", (a % b).to_string(), 0.9, 0));
    }
    if let Some(caps) = PRIME_RE.captures(lower) {
        let n: u64 = caps[1].parse().ok()?;
        return Some(ComputeResult::solved("formula_t1_prime", if is_prime(n) { "yes" } else { "no" }, 0.95, 0));
    }
    if let Some(caps) = FIBONACCI_RE.captures(lower) {
        let n: u64 = caps.get(1).or_else(|| caps.get(2))?.as_str().parse().ok()?;
        return Some(ComputeResult::solved("formula_t1_fibonacci", fibonacci(n).to_string(), 0.9, 0));
    }
    None
}

// ---- T2 ----

static SQRT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)sqrt\(\s*(\d+(?:\.\d+)?)\s*\)|square\s+root\s+of\s+(\d+(?:\.\d+)?)").expect("static regex"));
static POWER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*\^\s*(\d+(?:\.\d+)?)|(\d+(?:\.\d+)?)\s+to\s+the\s+power\s+of\s+(\d+(?:\.\d+)?)").expect("static regex"));
static GCD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)gcd\s*\(\s*(\d+)\s*,\s*(\d+)\s*\)|gcd\s+of\s+(\d+)\s+and\s+(\d+)").expect("static regex"));
static LCM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)lcm\s*\(\s*(\d+)\s*,\s*(\d+)\s*\)|lcm\s+of\s+(\d+)\s+and\s+(\d+)").expect("static regex"));

fn solve_t2(lower: &str) -> Option<ComputeResult> {
    if let Some(caps) = SQRT_RE.captures(lower) {
        let n: f64 = caps.get(1).or_else(|| caps.get(2))?.as_str().parse().ok()?;
        if n < 0.0 {
            return None;
        }
        return Some(ComputeResult::solved("formula_t2_sqrt", format_value(n.sqrt()), 0.95, 0));
    }
    if let Some(caps) = POWER_RE.captures(lower) {
        let base: f64 = caps.get(1).or_else(|| caps.get(3))?.as_str().parse().ok()?;
        let exp: f64 = caps.get(2).or_else(|| caps.get(4))?.as_str().parse().ok()?;
        let value = base.powf(exp);
        if !value.is_finite() {
            return None;
        }
        return Some(ComputeResult::solved("formula_t2_power", format_value(value), 0.95, 0));
    }
    if let Some(caps) = GCD_RE.captures(lower) {
        let a: i64 = caps.get(1).or_else(|| caps.get(3))?.as_str().parse().ok()?;
        let b: i64 = caps.get(2).or_else(|| caps.get(4))?.as_str().parse().ok()?;
        return Some(ComputeResult::solved("formula_t2_gcd", gcd(a, b).to_string(), 0.95, 0));
    }
    if let Some(caps) = LCM_RE.captures(lower) {
        let a: i64 = caps.get(1).or_else(|| caps.get(3))?.as_str().parse().ok()?;
        let b: i64 = caps.get(2).or_else(|| caps.get(4))?.as_str().parse().ok()?;
        if a == 0 || b == 0 {
            return None;
        }
        return Some(ComputeResult::solved("formula_t2_lcm", (a / gcd(a, b) * b).abs().to_string(), 0.95, 0));
    }
    None
}

// ---- T3 ----

static LOG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bln\(\s*(\d+(?:\.\d+)?)\s*\)|\blog\(\s*(\d+(?:\.\d+)?)\s*\)").expect("static regex"));
static QUADRATIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)x\^2\s*\+\s*(-?\d+(?:\.\d+)?)\s*x\s*\+\s*(-?\d+(?:\.\d+)?)\s*=\s*0").expect("static regex"));
static COMBINATIONS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)C\(\s*(\d+)\s*,\s*(\d+)\s*\)|(\d+)\s+choose\s+(\d+)").expect("static regex"));
static PERMUTATIONS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)P\(\s*(\d+)\s*,\s*(\d+)\s*\)|permutations\s+of\s+(\d+)\s+taken\s+(\d+)").expect("static regex"));
static LAST_DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)last\s+digit\s+of\s+(\d+)\s*\^\s*(\d+)").expect("static regex"));

fn factorial_u64(n: u64) -> u64 {
    (1..=n.max(1)).product()
}

fn binomial(n: u64, k: u64) -> Option<u64> {
    if k > n {
        return None;
    }
    let k = k.min(n - k);
    let mut result = 1u128;
    for i in 0..k {
        result = result * u128::from(n - i) / u128::from(i + 1);
    }
    u64::try_from(result).ok()
}

fn solve_t3(lower: &str) -> Option<ComputeResult> {
    if let Some(caps) = QUADRATIC_RE.captures(lower) {
        let b: f64 = caps[1].parse().ok()?;
        let c: f64 = caps[2].parse().ok()?;
        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        let (r1, r2) = ((-b + sqrt_d) / 2.0, (-b - sqrt_d) / 2.0);
        let (larger, smaller) = (r1.max(r2), r1.min(r2));
        let answer = if lower.contains("smaller") {
            format_value(smaller)
        } else if lower.contains("larger") || lower.contains("bigger") {
            format_value(larger)
        } else {
            format!("{}, {}", format_value(larger), format_value(smaller))
        };
        return Some(ComputeResult::solved("formula_t3_quadratic", answer, 0.9, 0));
    }
    if let Some(caps) = LOG_RE.captures(lower) {
        if let Some(natural) = caps.get(1) {
            let n: f64 = natural.as_str().parse().ok()?;
            if n <= 0.0 {
                return None;
            }
            return Some(ComputeResult::solved("formula_t3_log", format_value(n.ln()), 0.9, 0));
        }
        let n: f64 = caps.get(2)?.as_str().parse().ok()?;
        if n <= 0.0 {
            return None;
        }
        return Some(ComputeResult::solved("formula_t3_log", format_value(n.log10()), 0.9, 0));
    }
    if let Some(caps) = COMBINATIONS_RE.captures(lower) {
        let n: u64 = caps.get(1).or_else(|| caps.get(3))?.as_str().parse().ok()?;
        let k: u64 = caps.get(2).or_else(|| caps.get(4))?.as_str().parse().ok()?;
        let value = binomial(n, k)?;
        return Some(ComputeResult::solved("formula_t3_combinations", value.to_string(), 0.95, 0));
    }
    if let Some(caps) = PERMUTATIONS_RE.captures(lower) {
        let n: u64 = caps.get(1).or_else(|| caps.get(3))?.as_str().parse().ok()?;
        let k: u64 = caps.get(2).or_else(|| caps.get(4))?.as_str().parse().ok()?;
        if k > n || n > 20 {
            return None;
        }
        let value = factorial_u64(n) / factorial_u64(n - k);
        return Some(ComputeResult::solved("formula_t3_permutations", value.to_string(), 0.95, 0));
    }
    if let Some(caps) = LAST_DIGIT_RE.captures(lower) {
        let base: u64 = caps[1].parse().ok()?;
        let exp: u64 = caps[2].parse().ok()?;
        let last_digit = base % 10;
        let value = if exp == 0 { 1 } else { mod_pow_last_digit(last_digit, exp) };
        return Some(ComputeResult::solved("formula_t3_last_digit_cycling", value.to_string(), 0.9, 0));
    }
    None
}

/// Last digit of `base^exp` using the length-4 cycle every single digit's
/// powers settle into (`2,4,8,6,2,4,8,6,...`), avoiding a literal bignum pow.
fn mod_pow_last_digit(last_digit: u64, exp: u64) -> u64 {
    let cycle: Vec<u64> = (1..=4).map(|p| (last_digit.pow(p)) % 10).collect();
    let index = ((exp - 1) % 4) as usize;
    cycle[index]
}

// ---- T4 ----

static PYTHAGOREAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:hypotenuse|legs?)\s+(?:of\s+)?(?:a\s+)?(?:right\s+triangle\s+)?.*?(\d+(?:\.\d+)?)\s+and\s+(\d+(?:\.\d+)?)").expect("static regex"));
static TRAILING_ZEROS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)trailing\s+zeros?\s+(?:of|in)\s+(\d+)\s*!").expect("static regex"));
static GEOMETRIC_SERIES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)first\s+term\s+(-?\d+(?:\.\d+)?)\s+and\s+(?:common\s+)?ratio\s+(-?\d+(?:\.\d+)?)").expect("static regex"));
static COMPOUND_INTEREST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)principal\s+(?:of\s+)?\$?(\d+(?:\.\d+)?).*?rate\s+(?:of\s+)?(\d+(?:\.\d+)?)\s*%.*?(\d+(?:\.\d+)?)\s+years?(?:.*?compounded\s+(\d+)\s+times)?")
        .expect("static regex")
});

fn trailing_zeros_of_factorial(n: u64) -> u64 {
    let mut count = 0;
    let mut power = 5;
    while power <= n {
        count += n / power;
        power *= 5;
    }
    count
}

fn solve_t4(lower: &str) -> Option<ComputeResult> {
    if let Some(caps) = PYTHAGOREAN_RE.captures(lower) {
        let a: f64 = caps[1].parse().ok()?;
        let b: f64 = caps[2].parse().ok()?;
        return Some(ComputeResult::solved("formula_t4_pythagorean", format_value((a * a + b * b).sqrt()), 0.9, 0));
    }
    if let Some(caps) = TRAILING_ZEROS_RE.captures(lower) {
        let n: u64 = caps[1].parse().ok()?;
        return Some(ComputeResult::solved("formula_t4_trailing_zeros", trailing_zeros_of_factorial(n).to_string(), 0.95, 0));
    }
    if let Some(caps) = GEOMETRIC_SERIES_RE.captures(lower) {
        let a: f64 = caps[1].parse().ok()?;
        let r: f64 = caps[2].parse().ok()?;
        if r.abs() >= 1.0 {
            return None; // diverges
        }
        return Some(ComputeResult::solved("formula_t4_geometric_series", format_value(a / (1.0 - r)), 0.9, 0));
    }
    if let Some(caps) = COMPOUND_INTEREST_RE.captures(lower) {
        let principal: f64 = caps[1].parse().ok()?;
        let rate: f64 = caps[2].parse::<f64>().ok()? / 100.0;
        let years: f64 = caps[3].parse().ok()?;
        let compounds_per_year: f64 = caps.get(4).and_then(|m| m.as_str().parse().ok()).unwrap_or(1.0);
        let value = principal * (1.0 + rate / compounds_per_year).powf(compounds_per_year * years);
        return Some(ComputeResult::solved("formula_t4_compound_interest", format_value(value), 0.85, 0));
    }
    if let Some(value) = solve_determinant(lower) {
        return Some(value);
    }
    None
}

static MATRIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)determinant\s+of\s+(\[\[.*?\]\])").expect("static regex"));

fn parse_matrix(text: &str) -> Option<Vec<Vec<f64>>> {
    let rows_text = text.trim_start_matches('[').trim_end_matches(']');
    rows_text
        .split("],[")
        .map(|row| row.trim_matches(|c| c == '[' || c == ']').split(',').map(|cell| cell.trim().parse::<f64>().ok()).collect())
        .collect()
}

/// Determinant via Gaussian elimination with partial pivoting, `O(n^3)`.
fn determinant(mut matrix: Vec<Vec<f64>>) -> Option<f64> {
    let n = matrix.len();
    if matrix.iter().any(|row| row.len() != n) {
        return None;
    }
    let mut det = 1.0;
    for col in 0..n {
        let pivot_row = (col..n).max_by(|&a, &b| matrix[a][col].abs().total_cmp(&matrix[b][col].abs()))?;
        if matrix[pivot_row][col].abs() < 1e-12 {
            return Some(0.0);
        }
        if pivot_row != col {
            matrix.swap(pivot_row, col);
            det = -det;
        }
        det *= matrix[col][col];
        for row in (col + 1)..n {
            let factor = matrix[row][col] / matrix[col][col];
            for c in col..n {
                matrix[row][c] -= factor * matrix[col][c];
            }
        }
    }
    Some(det)
}

fn solve_determinant(lower: &str) -> Option<ComputeResult> {
    let caps = MATRIX_RE.captures(lower)?;
    let matrix = parse_matrix(&caps[1])?;
    let value = determinant(matrix)?;
    Some(ComputeResult::solved("formula_t4_determinant", format_value(value), 0.9, 0))
}

fn solve(text: &str, lower: &str) -> ComputeResult {
    let _ = text;
    timed(|| solve_t1(lower).or_else(|| solve_t2(lower)).or_else(|| solve_t3(lower)).or_else(|| solve_t4(lower)).unwrap_or_else(ComputeResult::unsolved))
}

/// The registry entry for this solver.
pub const SOLVER: Solver = Solver {
    name: "formula",
    description: "Tiered closed-form formulas: percentages/factorials through matrix determinants",
    types: solver_type::FORMULA_T1 | solver_type::FORMULA_T2 | solver_type::FORMULA_T3 | solver_type::FORMULA_T4,
    priority: 20,
    solve,
};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn computes_a_percentage() {
        let result = solve("what is 20% of 50", "what is 20% of 50");
        assert_eq!(result.result.as_deref(), Some("10"));
    }

    #[test]
    fn computes_a_factorial() {
        let result = solve("5!", "5!");
        assert_eq!(result.result.as_deref(), Some("120"));
    }

    #[test]
    fn computes_a_prime_check() {
        let result = solve("is 17 prime", "is 17 prime");
        assert_eq!(result.result.as_deref(), Some("yes"));
    }

    #[test]
    fn computes_the_nth_fibonacci_number() {
        let result = solve("what is the 10th fibonacci number", "what is the 10th fibonacci number");
        assert_eq!(result.result.as_deref(), Some("55"));
    }

    #[test]
    fn computes_a_square_root() {
        let result = solve("sqrt(144)", "sqrt(144)");
        assert_eq!(result.result.as_deref(), Some("12"));
    }

    #[test]
    fn computes_gcd_and_lcm() {
        assert_eq!(solve("gcd(12, 18)", "gcd(12, 18)").result.as_deref(), Some("6"));
        assert_eq!(solve("lcm(4, 6)", "lcm(4, 6)").result.as_deref(), Some("12"));
    }

    #[test]
    fn computes_combinations_and_permutations() {
        assert_eq!(solve("5 choose 2", "5 choose 2").result.as_deref(), Some("10"));
        assert_eq!(solve("P(5, 2)", "P(5, 2)").result.as_deref(), Some("20"));
    }

    #[test]
    fn solves_a_quadratic_reporting_the_larger_root() {
        let result = solve("solve x^2 + -3x + 2 = 0 for the larger root", "solve x^2 + -3x + 2 = 0 for the larger root");
        assert_eq!(result.result.as_deref(), Some("2"));
    }

    #[test]
    fn computes_last_digit_cycling() {
        let result = solve("last digit of 7^100", "last digit of 7^100");
        assert!(result.solved);
        assert_eq!(result.result.as_deref(), Some("1"));
    }

    #[test]
    fn computes_a_pythagorean_hypotenuse() {
        let result = solve("hypotenuse of legs 3 and 4", "hypotenuse of legs 3 and 4");
        assert_eq!(result.result.as_deref(), Some("5"));
    }

    #[test]
    fn computes_trailing_zeros_of_a_factorial() {
        let result = solve("trailing zeros of 100!", "trailing zeros of 100!");
        assert_eq!(result.result.as_deref(), Some("24"));
    }

    #[test]
    fn computes_an_infinite_geometric_series() {
        let result = solve("sum of an infinite geometric series with first term 2 and ratio 0.5", "sum of an infinite geometric series with first term 2 and ratio 0.5");
        assert_eq!(result.result.as_deref(), Some("4"));
    }

    #[test]
    fn computes_compound_interest() {
        let result = solve(
            "principal of $1000 at a rate of 5% for 2 years compounded 12 times",
            "principal of $1000 at a rate of 5% for 2 years compounded 12 times",
        );
        assert!(result.solved);
    }

    #[test]
    fn computes_a_2x2_determinant() {
        let result = solve("determinant of [[1,2],[3,4]]", "determinant of [[1,2],[3,4]]");
        assert_eq!(result.result.as_deref(), Some("-2"));
    }

    #[test]
    fn unrelated_text_is_unsolved() {
        let result = solve("what a nice day", "what a nice day");
        assert!(!result.solved);
    }
}
