//! Tools for partitioning the Pauli strings of a qubit Hamiltonian into
//! jointly measurable families.
//!
//! Two strings may share a family if they commute, either qubit-wise (every
//! pair of single-qubit operators commutes) or generally (the strings
//! anticommute on an even number of qubits). Families are found as a greedy
//! clique cover of the corresponding commutation graph.
//!
//! # Example
//! ```
//! use pauli_families::{
//!     cover::partition,
//!     graph::CommutationGraph,
//!     jordan_wigner,
//!     pauli::PauliString,
//! };
//!
//! let strings: Vec<PauliString>
//!     = ["ZZ11", "11ZZ", "XXYY", "YYXX"].iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//! assert!(jordan_wigner::validate(&strings));
//!
//! let families = partition(&CommutationGraph::build_gc(&strings, false));
//! assert!(families.len() <= strings.len());
//! println!("{}", families);
//! ```

pub mod error;
pub mod pauli;
pub mod jordan_wigner;
pub mod graph;
pub mod cover;
pub mod family;
