//! Structural checks for Pauli strings that are supposed to come out of a
//! Jordan-Wigner transformation.
//!
//! A molecular Hamiltonian contains products of two or four fermionic
//! creation/annihilation operators, each of which is mapped to a term like
//! (*X* ± i*Y*) *Z* ... *Z*. This rules out two kinds of strings:
//! 1. an `X` or `Y` anywhere past the first four qubits
//! 1. an `X` or `Y` within the first four qubits that directly follows a `Z`
//!
//! Alphabet membership is not checked here; that already happens when a
//! [`PauliString`] is parsed.

use crate::{
    error::{ JordanWignerRule, JordanWignerViolation },
    pauli::{ Pauli, PauliString },
};

/// Number of leading qubits allowed to carry an `X` or `Y`.
pub const LADDER_WIDTH: usize = 4;

fn check_one(string: usize, ps: &PauliString)
    -> Result<(), JordanWignerViolation>
{
    for (position, op) in ps.iter().enumerate() {
        if !op.is_xy() { continue; }
        let rule
            = if position >= LADDER_WIDTH {
                JordanWignerRule::BeyondLadder
            } else if position > 0 && ps[position - 1] == Pauli::Z {
                JordanWignerRule::AfterZ
            } else {
                continue;
            };
        return Err(
            JordanWignerViolation { string, position, symbol: *op, rule });
    }
    Ok(())
}

/// Check every string in order, returning the first violation found.
pub fn check<'a, I>(strings: I) -> Result<(), JordanWignerViolation>
where I: IntoIterator<Item = &'a PauliString>
{
    strings.into_iter()
        .enumerate()
        .try_for_each(|(k, ps)| check_one(k, ps))
}

/// Return `true` if every string could have arisen from a Jordan-Wigner
/// transformation.
///
/// The first offending string is reported as a warning; it is up to the
/// caller whether to abort.
pub fn validate<'a, I>(strings: I) -> bool
where I: IntoIterator<Item = &'a PauliString>
{
    match check(strings) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(
                string = err.string,
                position = err.position,
                rule = ?err.rule,
                "the {}th Pauli string is not valid given the Jordan-Wigner \
                transformation",
                err.string,
            );
            false
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn strings(s: &[&str]) -> Vec<PauliString> {
        s.iter().map(|k| k.parse().unwrap()).collect()
    }

    #[test]
    fn accepts_z_ladders() {
        assert!(validate(&strings(&["ZZZZ"])));
        assert!(validate(&strings(&["1111"])));
        assert!(validate(&strings(&["XXYY", "YXXY", "ZZ11", "Z11Z"])));
        assert!(validate(&strings(&["XZZZZZ", "IIIIZ"])));
    }

    #[test]
    fn trivial_lengths() {
        assert!(validate(&strings(&["", "X", "Y", "Z"])));
        assert!(validate(&Vec::<PauliString>::new()));
    }

    #[test]
    fn rejects_xy_beyond_ladder() {
        let input = strings(&["ZZZZ", "XIXII", "IIIIX"]);
        assert!(!validate(&strings(&["IIIIX"])));
        assert_eq!(
            check(&input),
            Err(JordanWignerViolation {
                string: 2,
                position: 4,
                symbol: Pauli::X,
                rule: JordanWignerRule::BeyondLadder,
            }),
        );
        assert!(!validate(&strings(&["IIIIIY"])));
    }

    #[test]
    fn rejects_xy_after_z() {
        let input = strings(&["IIII", "IZYI"]);
        assert!(!validate(&input));
        assert_eq!(
            check(&input),
            Err(JordanWignerViolation {
                string: 1,
                position: 2,
                symbol: Pauli::Y,
                rule: JordanWignerRule::AfterZ,
            }),
        );
        // a Z following an X is fine
        assert!(validate(&strings(&["XZII"])));
    }

    #[test]
    fn only_late_xy_rejected() {
        // X at index 2 follows an identity, so only the trailing X at 4 trips
        let input = strings(&["XIXIX"]);
        let err = check(&input).unwrap_err();
        assert_eq!(err.position, 4);
        assert_eq!(err.rule, JordanWignerRule::BeyondLadder);
        // with only identities past the ladder the same prefix is allowed
        assert!(validate(&strings(&["XIXII"])));
    }
}
