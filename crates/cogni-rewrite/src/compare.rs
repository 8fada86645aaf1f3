//! Algebraic equivalence checking (spec §4.1, invariant #2).

use std::collections::HashMap;
use std::ops::Range;

use cogni_ast::{eval, named_constant, parse_expression, Node};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::registry::simplify;

/// Fixed seeds for the numeric fallback probe. Fixed rather than
/// process-random so `compare` is deterministic across runs, matching the
/// "same input → same result" invariant the rest of the crate holds to.
const PROBE_SEEDS: [u64; 6] = [0x5EED_0001, 0x5EED_0002, 0x5EED_0003, 0x5EED_0004, 0x5EED_0005, 0x5EED_0006];
const PROBE_RANGE: Range<f64> = -9.5..9.5;
const TOLERANCE: f64 = 1e-6;

/// Compare two expression strings for algebraic equivalence.
///
/// 1. Parse both; a parse failure on either side means not-equivalent.
/// 2. Simplify both to canonical form and compare structurally.
/// 3. If structural comparison disagrees, fall back to evaluating both at
///    seeded random assignments over their shared free variables (domain
///    ℝ), skipping assignments that hit a pole (division by zero, `0^0`,
///    any non-finite result) on either side. Agreement within tolerance at
///    every successful probe, with at least one successful probe, counts
///    as equivalent; an all-poles run is inconclusive and treated as
///    not-equivalent rather than silently passing.
#[must_use]
pub fn compare(a: &str, b: &str) -> bool {
    let (Some(parsed_a), Some(parsed_b)) = (parse_expression(a), parse_expression(b)) else {
        return false;
    };
    let simplified_a = simplify(&parsed_a);
    let simplified_b = simplify(&parsed_b);
    if simplified_a == simplified_b {
        return true;
    }
    numeric_probe(&simplified_a, &simplified_b)
}

fn shared_free_variables(a: &Node, b: &Node) -> Vec<String> {
    let mut vars: Vec<String> = a.free_variables();
    vars.extend(b.free_variables());
    vars.sort();
    vars.dedup();
    // Named constants (pi, e, phi) resolve on their own in `eval` when left
    // unbound; randomizing them would just test a different, unrelated
    // expression.
    vars.retain(|name| named_constant(name).is_none());
    vars
}

fn numeric_probe(a: &Node, b: &Node) -> bool {
    let vars = shared_free_variables(a, b);
    let mut successful_probes = 0usize;

    for &seed in &PROBE_SEEDS {
        let mut rng = StdRng::seed_from_u64(seed);
        let bindings: HashMap<String, f64> = vars.iter().cloned().map(|name| (name, rng.gen_range(PROBE_RANGE))).collect();
        match (eval(a, &bindings), eval(b, &bindings)) {
            (Some(va), Some(vb)) => {
                if (va - vb).abs() > TOLERANCE * va.abs().max(vb.abs()).max(1.0) {
                    return false;
                }
                successful_probes += 1;
            }
            // One side hit a pole (unbound name, div by zero, 0^0,
            // non-finite) — inconclusive for this seed, try the next one.
            _ => continue,
        }
        // Constant expressions (no free variables) only need one probe.
        if vars.is_empty() {
            break;
        }
    }
    successful_probes > 0
}
