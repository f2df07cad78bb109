//! Single-qubit Pauli operators and the *n*-qubit strings built from them.
//!
//! Strings are written over the alphabet `I`, `X`, `Y`, `Z`, with `1` accepted
//! as a synonym for the identity:
//! ```
//! use pauli_families::pauli::{ Pauli, PauliString };
//!
//! let a: PauliString = "XXYY".parse().unwrap();
//! let b: PauliString = "YYXX".parse().unwrap();
//! let c: PauliString = "1Z11".parse().unwrap();
//!
//! assert!(a.qwc_commutes(&a));
//! assert!(!a.qwc_commutes(&b)); // X/Y disagree on every qubit...
//! assert!(a.gc_commutes(&b, false)); // ...but four sign flips cancel
//! assert_eq!(c[0], Pauli::I);
//! assert_eq!(format!("{:#}", c), ".Z..");
//! ```

use std::{
    fmt,
    ops::Index,
    str::FromStr,
};
use rand::Rng;
use crate::error::ParsePauliError;

/// A single-qubit Pauli operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pauli {
    /// Identity
    I,
    /// σ<sub>*x*</sub>
    X,
    /// σ<sub>*y*</sub>
    Y,
    /// σ<sub>*z*</sub>
    Z,
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::I => write!(f, "{}", if f.alternate() { "." } else { "I" }),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl TryFrom<char> for Pauli {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'I' | 'i' | '1' => Ok(Self::I),
            'X' | 'x' => Ok(Self::X),
            'Y' | 'y' => Ok(Self::Y),
            'Z' | 'z' => Ok(Self::Z),
            _ => Err(c),
        }
    }
}

impl Pauli {
    /// Return `true` if `self` is the identity.
    pub fn is_i(self) -> bool { matches!(self, Self::I) }

    /// Return `true` if `self` is `X` or `Y`, i.e. the operator carries an
    /// X-component.
    pub fn is_xy(self) -> bool { matches!(self, Self::X | Self::Y) }

    /// Return `true` if `self` and `other` commute as single-qubit operators.
    ///
    /// Identical operators and the identity always commute; any two distinct
    /// non-identity operators anticommute.
    pub fn commutes_with(self, other: Self) -> bool {
        match (self, other) {
            (_, Self::I) => true,
            (Self::I, _) => true,
            (a, b) if a == b => true,
            _ => false,
        }
    }

    pub(crate) fn from_int(u: usize) -> Self {
        match u % 4 {
            0 => Self::I,
            1 => Self::X,
            2 => Self::Y,
            3 => Self::Z,
            _ => unreachable!(),
        }
    }

    /// Sample a single operator uniformly from `I`, `X`, `Y`, `Z`.
    pub fn gen<R>(rng: &mut R) -> Self
    where R: Rng + ?Sized
    {
        Self::from_int(rng.gen_range(0..4))
    }
}

/// An *n*-qubit tensor product of [`Pauli`]s, without a phase.
///
/// Strings are immutable once constructed. Two strings of different lengths
/// are never considered to commute under either rule.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PauliString(Vec<Pauli>);

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|p| fmt::Display::fmt(p, f))
    }
}

impl FromStr for PauliString {
    type Err = ParsePauliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(position, c)| {
                Pauli::try_from(c)
                    .map_err(|symbol| ParsePauliError { symbol, position })
            })
            .collect::<Result<Vec<Pauli>, _>>()
            .map(Self)
    }
}

impl From<Vec<Pauli>> for PauliString {
    fn from(ops: Vec<Pauli>) -> Self { Self(ops) }
}

impl<const N: usize> From<[Pauli; N]> for PauliString {
    fn from(ops: [Pauli; N]) -> Self { Self(ops.into()) }
}

impl AsRef<[Pauli]> for PauliString {
    fn as_ref(&self) -> &[Pauli] { &self.0 }
}

impl Index<usize> for PauliString {
    type Output = Pauli;

    fn index(&self, idx: usize) -> &Self::Output { &self.0[idx] }
}

impl<'a> IntoIterator for &'a PauliString {
    type Item = &'a Pauli;
    type IntoIter = <&'a Vec<Pauli> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

impl PauliString {
    /// The all-identity string on `n` qubits.
    pub fn identity(n: usize) -> Self { Self(vec![Pauli::I; n]) }

    /// The string on `n` qubits that is `op` at `site` and the identity
    /// everywhere else.
    ///
    /// *Panics if `site` is out of bounds.*
    pub fn single(n: usize, site: usize, op: Pauli) -> Self {
        let mut ops = vec![Pauli::I; n];
        ops[site] = op;
        Self(ops)
    }

    /// Sample a string of `n` independent, uniformly random operators.
    pub fn gen<R>(n: usize, rng: &mut R) -> Self
    where R: Rng + ?Sized
    {
        Self((0..n).map(|_| Pauli::gen(rng)).collect())
    }

    /// Return the number of qubits.
    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Return the number of non-identity operators.
    pub fn weight(&self) -> usize {
        self.0.iter().filter(|p| !p.is_i()).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pauli> { self.0.iter() }

    pub fn ops(&self) -> &[Pauli] { &self.0 }

    /// Count the qubits on which `self` and `other` hold anticommuting
    /// operators.
    ///
    /// Returns `None` if the strings have different lengths.
    pub fn anticommuting_count(&self, other: &Self) -> Option<usize> {
        (self.len() == other.len())
            .then(|| {
                self.0.iter().zip(&other.0)
                    .filter(|(a, b)| !a.commutes_with(**b))
                    .count()
            })
    }

    /// Return `true` if `self` and `other` qubit-wise commute, i.e. every
    /// corresponding pair of single-qubit operators commutes.
    pub fn qwc_commutes(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            tracing::debug!(
                left = %self, right = %other,
                "strings are not the same size, sizes are {} and {}",
                self.len(), other.len(),
            );
            return false;
        }
        self.0.iter().zip(&other.0).all(|(a, b)| a.commutes_with(*b))
    }

    /// Return `true` if `self` and `other` commute as whole tensor-product
    /// operators, i.e. they anticommute on an even number of qubits.
    ///
    /// With `exclude_qwc`, pairs that also qubit-wise commute (no
    /// anticommuting qubits at all) are rejected, leaving only the strictly
    /// general commutations.
    pub fn gc_commutes(&self, other: &Self, exclude_qwc: bool) -> bool {
        match self.anticommuting_count(other) {
            None => false,
            Some(0) if exclude_qwc => false,
            Some(k) => k % 2 == 0,
        }
    }
}

/// A rule deciding when two [`PauliString`]s belong in the same family.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Commutation {
    /// Qubit-wise commutation.
    Qwc,
    /// General (symplectic) commutation.
    Gc,
}

impl fmt::Display for Commutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Qwc => write!(f, "QWC"),
            Self::Gc => write!(f, "GC"),
        }
    }
}

impl Commutation {
    /// Return `true` if `a` and `b` commute under this rule.
    pub fn commutes(self, a: &PauliString, b: &PauliString) -> bool {
        match self {
            Self::Qwc => a.qwc_commutes(b),
            Self::Gc => a.gc_commutes(b, false),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    fn ps(s: &str) -> PauliString { s.parse().unwrap() }

    const ALL: [Pauli; 4] = [Pauli::I, Pauli::X, Pauli::Y, Pauli::Z];

    #[test]
    fn single_qubit_table() {
        for a in ALL {
            assert!(a.commutes_with(a));
            assert!(a.commutes_with(Pauli::I));
            for b in ALL {
                assert_eq!(a.commutes_with(b), b.commutes_with(a));
            }
        }
        assert!(!Pauli::X.commutes_with(Pauli::Y));
        assert!(!Pauli::X.commutes_with(Pauli::Z));
        assert!(!Pauli::Y.commutes_with(Pauli::Z));
    }

    #[test]
    fn parse_accepts_one_as_identity() {
        assert_eq!(ps("1111"), ps("IIII"));
        assert_eq!(ps("x1zY").ops(), &[Pauli::X, Pauli::I, Pauli::Z, Pauli::Y]);
        assert_eq!(ps("1X1").to_string(), "IXI");
        assert_eq!(format!("{:#}", ps("1X1")), ".X.");
    }

    #[test]
    fn parse_rejects_foreign_symbols() {
        let err = "XXAZ".parse::<PauliString>().unwrap_err();
        assert_eq!(err, ParsePauliError { symbol: 'A', position: 2 });
        assert!("X Z".parse::<PauliString>().is_err());
    }

    #[test]
    fn two_qubit_examples() {
        assert!(!ps("XX").qwc_commutes(&ps("YY")));
        assert!(ps("XX").qwc_commutes(&ps("II")));
        assert!(ps("XX").gc_commutes(&ps("YY"), false));
        assert!(!ps("XX").gc_commutes(&ps("YI"), false));
        assert!(ps("ZZ").qwc_commutes(&ps("ZI")));
    }

    #[test]
    fn exclude_qwc_drops_trivial_pairs() {
        assert!(!ps("XI").gc_commutes(&ps("XZ"), true));
        assert!(ps("XI").gc_commutes(&ps("XZ"), false));
        assert!(ps("XX").gc_commutes(&ps("ZZ"), true));
    }

    #[test]
    fn length_mismatch_never_commutes() {
        let a = ps("XX");
        let b = ps("XXI");
        assert!(!a.qwc_commutes(&b));
        assert!(!a.gc_commutes(&b, false));
        assert!(!Commutation::Gc.commutes(&a, &b));
        assert_eq!(a.anticommuting_count(&b), None);
    }

    #[test]
    fn single_and_identity() {
        assert_eq!(PauliString::identity(3), ps("III"));
        assert_eq!(PauliString::single(4, 2, Pauli::Y), ps("IIYI"));
        assert_eq!(PauliString::from([Pauli::X, Pauli::I, Pauli::Z]), ps("XIZ"));
        assert_eq!(PauliString::from([Pauli::I; 0]), PauliString::identity(0));
        assert_eq!(ps("XIZY").weight(), 3);
    }

    fn arb_pauli() -> impl Strategy<Value = Pauli> {
        (0..4_usize).prop_map(Pauli::from_int)
    }

    fn arb_pair(max_len: usize)
        -> impl Strategy<Value = (PauliString, PauliString)>
    {
        (0..=max_len).prop_flat_map(|n| {
            (
                prop::collection::vec(arb_pauli(), n),
                prop::collection::vec(arb_pauli(), n),
            )
        })
        .prop_map(|(a, b)| (a.into(), b.into()))
    }

    proptest! {
        #[test]
        fn self_commutation(ops in prop::collection::vec(arb_pauli(), 0..12)) {
            let s: PauliString = ops.into();
            prop_assert!(s.qwc_commutes(&s));
            prop_assert!(s.gc_commutes(&s, false));
            prop_assert!(!s.gc_commutes(&s, true));
        }

        #[test]
        fn qwc_implies_gc((a, b) in arb_pair(10)) {
            if a.qwc_commutes(&b) {
                prop_assert!(a.gc_commutes(&b, false));
            }
            prop_assert_eq!(a.qwc_commutes(&b), b.qwc_commutes(&a));
            prop_assert_eq!(a.gc_commutes(&b, false), b.gc_commutes(&a, false));
        }
    }
}
