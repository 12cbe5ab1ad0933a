//! Environment variables and their per-tick drift.

use crate::simulation::program::proteins;
use crate::simulation::state::{Environment, Scalar};

pub const TEMP: &str = "TEMP";
pub const ENERGY: &str = "ENERGY";

/// Ordered levels for `TEMP`, coolest first.
pub const TEMP_LEVELS: [&str; 3] = ["LOW", "NEUTRAL", "HIGH"];
/// Ordered levels for `ENERGY`, lowest first.
pub const ENERGY_LEVELS: [&str; 3] = ["LOW", "MEDIUM", "HIGH"];

const TEMP_REST: usize = 1;

/// Environment every run starts from before overrides and codons apply.
pub fn defaults() -> Environment {
    let mut env = Environment::new();
    env.insert(TEMP.to_string(), Scalar::from(TEMP_LEVELS[TEMP_REST]));
    env.insert(ENERGY.to_string(), Scalar::from(ENERGY_LEVELS[1]));
    env
}

/// Apply one tick of drift given the proteins synthesized during the tick.
///
/// `TEMP` first relaxes one level toward `NEUTRAL`. Each `Synthesis` then
/// spends one level of `ENERGY` and each `Transport` raises `TEMP` one level.
/// Values that are not on a level ladder (user-supplied numbers, say) are
/// left alone.
pub fn drift(env: &mut Environment, produced: &[String]) {
    if let Some(idx) = level_index(env, TEMP, &TEMP_LEVELS) {
        let relaxed = match idx.cmp(&TEMP_REST) {
            std::cmp::Ordering::Less => idx + 1,
            std::cmp::Ordering::Greater => idx - 1,
            std::cmp::Ordering::Equal => idx,
        };
        set_level(env, TEMP, &TEMP_LEVELS, relaxed);
    }

    for protein in produced {
        match protein.as_str() {
            proteins::SYNTHESIS => shift(env, ENERGY, &ENERGY_LEVELS, -1),
            proteins::TRANSPORT => shift(env, TEMP, &TEMP_LEVELS, 1),
            _ => {}
        }
    }
}

fn level_index(env: &Environment, key: &str, ladder: &[&str]) -> Option<usize> {
    let value = env.get(key)?.as_text()?;
    ladder.iter().position(|level| *level == value)
}

fn set_level(env: &mut Environment, key: &str, ladder: &[&str], idx: usize) {
    env.insert(key.to_string(), Scalar::from(ladder[idx]));
}

/// Move `key` along `ladder` by `delta`, clamped to the ends.
fn shift(env: &mut Environment, key: &str, ladder: &[&str], delta: isize) {
    if let Some(idx) = level_index(env, key, ladder) {
        let top = ladder.len() as isize - 1;
        let next = (idx as isize + delta).clamp(0, top) as usize;
        set_level(env, key, ladder, next);
    }
}
