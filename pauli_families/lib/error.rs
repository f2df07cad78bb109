//! Error types for parsing, validation, and family post-processing.

use thiserror::Error;
use crate::pauli::{ Pauli, PauliString };

/// A character outside the Pauli alphabet (`I`/`1`, `X`, `Y`, `Z`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid Pauli symbol {symbol:?} at position {position}")]
pub struct ParsePauliError {
    pub symbol: char,
    pub position: usize,
}

/// Which of the two Jordan-Wigner positional constraints was broken.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum JordanWignerRule {
    /// `X` or `Y` past the first four qubits.
    BeyondLadder,
    /// `X` or `Y` directly following a `Z` within the first four qubits.
    AfterZ,
}

/// A Pauli string that could not have come out of a Jordan-Wigner
/// transformation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error(
    "Pauli string {string} is not valid given the Jordan-Wigner \
    transformation: {symbol} at position {position} ({rule:?})"
)]
pub struct JordanWignerViolation {
    /// Index of the offending string in the input collection.
    pub string: usize,
    pub position: usize,
    pub symbol: Pauli,
    pub rule: JordanWignerRule,
}

/// A family member with no entry in the weight map.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("no weight given for Pauli string {0}")]
pub struct MissingWeight(pub PauliString);

/// Returned by [`pad_family`][crate::family::pad_family].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PadError {
    /// There is no first member to take the qubit count from.
    #[error("cannot pad an empty family")]
    EmptyFamily,

    /// The trivial candidates ran out before the family reached its target
    /// size.
    ///
    /// `family` holds everything that could be added.
    #[error("ran out of trivial strings: {missing} short of the target size")]
    Exhausted { family: Vec<PauliString>, missing: usize },
}
