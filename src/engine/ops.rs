// src/engine/ops.rs
// Fixed catalog of arithmetic operations.

use crate::error::CalcError;

/// One of the named operations the service understands. The catalog is
/// static; resolution is case-insensitive via canonicalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Times,
    Divide,
    Pow,
    Abs,
    Fact,
}

impl Op {
    /// Look up an operation by name. Empty or unrecognized names are a
    /// normal `None`, not a fault.
    pub fn resolve(name: &str) -> Option<Op> {
        match canonicalize(name).as_str() {
            "Plus" => Some(Op::Plus),
            "Minus" => Some(Op::Minus),
            "Times" => Some(Op::Times),
            "Divide" => Some(Op::Divide),
            "Pow" => Some(Op::Pow),
            "Abs" => Some(Op::Abs),
            "Fact" => Some(Op::Fact),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Op::Plus => "Plus",
            Op::Minus => "Minus",
            Op::Times => "Times",
            Op::Divide => "Divide",
            Op::Pow => "Pow",
            Op::Abs => "Abs",
            Op::Fact => "Fact",
        }
    }

    /// Number of operands the operation consumes.
    pub fn arity(&self) -> usize {
        match self {
            Op::Abs | Op::Fact => 1,
            _ => 2,
        }
    }

    /// Apply the operation to exactly `arity()` operands, earliest-pushed
    /// (left argument) first.
    pub fn apply(&self, args: &[f64]) -> Result<f64, CalcError> {
        debug_assert_eq!(args.len(), self.arity());
        match self {
            Op::Plus => Ok(args[0] + args[1]),
            Op::Minus => Ok(args[0] - args[1]),
            Op::Times => Ok(args[0] * args[1]),
            Op::Divide => {
                if args[1] == 0.0 {
                    Err(CalcError::DivisionByZero)
                } else {
                    // Integer division semantics: truncate toward zero.
                    Ok((args[0] / args[1]).trunc())
                }
            }
            Op::Pow => Ok(args[0].powf(args[1])),
            Op::Abs => Ok(args[0].abs()),
            Op::Fact => factorial(args[0]),
        }
    }
}

/// Canonical form: first character uppercase, remainder lowercase.
fn canonicalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn factorial(x: f64) -> Result<f64, CalcError> {
    if x < 0.0 || x.fract() != 0.0 {
        return Err(CalcError::factorial_out_of_domain());
    }
    let n = x as u64;
    Ok((2..=n).map(|i| i as f64).product())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_case_insensitive() {
        assert_eq!(Op::resolve("plus"), Some(Op::Plus));
        assert_eq!(Op::resolve("PLUS"), Some(Op::Plus));
        assert_eq!(Op::resolve("pLuS"), Some(Op::Plus));
        assert_eq!(Op::resolve("dIvIdE"), Some(Op::Divide));
    }

    #[test]
    fn resolve_rejects_unknown_and_empty() {
        assert_eq!(Op::resolve(""), None);
        assert_eq!(Op::resolve("sqrt"), None);
        assert_eq!(Op::resolve("plusplus"), None);
    }

    #[test]
    fn divide_truncates_toward_zero() {
        assert_eq!(Op::Divide.apply(&[7.0, 2.0]).unwrap(), 3.0);
        assert_eq!(Op::Divide.apply(&[-7.0, 2.0]).unwrap(), -3.0);
        assert_eq!(Op::Divide.apply(&[7.0, -2.0]).unwrap(), -3.0);
    }

    #[test]
    fn divide_by_zero_fails() {
        assert!(matches!(
            Op::Divide.apply(&[5.0, 0.0]),
            Err(CalcError::DivisionByZero)
        ));
    }

    #[test]
    fn factorial_domain() {
        assert_eq!(Op::Fact.apply(&[0.0]).unwrap(), 1.0);
        assert_eq!(Op::Fact.apply(&[1.0]).unwrap(), 1.0);
        assert_eq!(Op::Fact.apply(&[5.0]).unwrap(), 120.0);
        assert!(Op::Fact.apply(&[-1.0]).is_err());
        assert!(Op::Fact.apply(&[2.5]).is_err());
    }

    #[test]
    fn two_argument_operations() {
        assert_eq!(Op::Plus.apply(&[2.0, 3.0]).unwrap(), 5.0);
        assert_eq!(Op::Minus.apply(&[5.0, 3.0]).unwrap(), 2.0);
        assert_eq!(Op::Times.apply(&[4.0, 2.5]).unwrap(), 10.0);
        assert_eq!(Op::Pow.apply(&[2.0, 10.0]).unwrap(), 1024.0);
        assert_eq!(Op::Abs.apply(&[-3.5]).unwrap(), 3.5);
    }
}
