//! Post-processing for individual families.

use rustc_hash::FxHashMap;
use crate::{
    error::{ MissingWeight, PadError },
    pauli::{ Commutation, Pauli, PauliString },
};

/// Real coefficients of the Pauli strings in a Hamiltonian.
pub type WeightMap = FxHashMap<PauliString, f64>;

/// Return the trivial `n`-qubit strings used for padding, most trivial
/// first: the identity, then a single `X` at each qubit, then a single `Y`
/// at each qubit, then a single `Z` at each qubit.
pub fn trivial_candidates(n: usize) -> Vec<PauliString> {
    let singles
        = [Pauli::X, Pauli::Y, Pauli::Z].into_iter()
        .flat_map(|op| (0..n).map(move |k| PauliString::single(n, k, op)));
    std::iter::once(PauliString::identity(n))
        .chain(singles)
        .collect()
}

/// Extend `family` with trivial strings (see [`trivial_candidates`]) until it
/// holds `target` members.
///
/// The qubit count is taken from the first member. A candidate is only added
/// if it is not already present and commutes under `rule` with every member
/// of the family at that point, including candidates added before it. A
/// family that is already at least `target` long is returned as is.
///
/// Fails with [`PadError::Exhausted`] if the candidates run out first; the
/// error holds the family with everything that could be added.
pub fn pad_family(family: &[PauliString], target: usize, rule: Commutation)
    -> Result<Vec<PauliString>, PadError>
{
    let n = family.first().ok_or(PadError::EmptyFamily)?.len();
    let mut padded: Vec<PauliString> = family.to_vec();
    if padded.len() >= target { return Ok(padded); }
    for candidate in trivial_candidates(n) {
        if padded.contains(&candidate) { continue; }
        let fits = padded.iter().all(|member| rule.commutes(&candidate, member));
        if !fits { continue; }
        padded.push(candidate);
        if padded.len() == target { return Ok(padded); }
    }
    let missing = target - padded.len();
    tracing::debug!(
        target,
        missing,
        "ran out of trivial strings while padding a family",
    );
    Err(PadError::Exhausted { family: padded, missing })
}

/// Return the sum of the absolute weights of all members of `family`.
///
/// Fails on the first member missing from `weights`.
pub fn summed_weight(family: &[PauliString], weights: &WeightMap)
    -> Result<f64, MissingWeight>
{
    family.iter()
        .map(|ps| {
            weights.get(ps)
                .map(|w| w.abs())
                .ok_or_else(|| MissingWeight(ps.clone()))
        })
        .sum()
}
