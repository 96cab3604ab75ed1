//! # Abstractions
//!
//! The operation sets every representation implements. Each trait mirrors
//! one entry of the capability table:
//!
//! | Trait | Operations |
//! |-------|------------|
//! | [`Functor`] | `fmap` |
//! | [`PseudoFunctor`] | `fmap!` (in place) |
//! | [`Applicative`] | `pure`, `fapply` |
//! | [`PseudoApplicative`] | `fapply!` (into a destination) |
//! | [`Monad`] | `join`, `bind` |
//! | [`Foldable`] | `fold`, `foldmap` |
//! | [`Magma`] / [`Monoid`] | `op`, `id` |
//! | [`Curry`] | `arity`, `curry`, `uncurry` |
//!
//! The laws:
//! 1. `fmap(x, identity) = x`
//! 2. `op(x, id) = op(id, x) = x`
//! 3. `op(op(x, y), z) = op(x, op(y, z))`
//!
//! Callables are passed as [`Value`]s so plain and curried functions are
//! interchangeable everywhere.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AlgebraError;
use crate::function::Function;
use crate::value::Value;

/// Most operands any multi-operand form accepts.
pub const MAX_OPERANDS: usize = 4;

/// Reject operand counts outside `1..=MAX_OPERANDS`.
pub fn check_operands(operation: &'static str, got: usize) -> Result<(), AlgebraError> {
    if got == 0 || got > MAX_OPERANDS {
        return Err(AlgebraError::UnsupportedArity {
            operation,
            got,
            max: MAX_OPERANDS,
        });
    }
    Ok(())
}

/// Names of the abstractions, as used by the capability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Abstraction {
    Functor,
    PseudoFunctor,
    Applicative,
    PseudoApplicative,
    Monad,
    Foldable,
    Magma,
    Monoid,
    Curry,
}

impl fmt::Display for Abstraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Abstraction::Functor => "functor",
            Abstraction::PseudoFunctor => "pseudo-functor",
            Abstraction::Applicative => "applicative",
            Abstraction::PseudoApplicative => "pseudo-applicative",
            Abstraction::Monad => "monad",
            Abstraction::Foldable => "foldable",
            Abstraction::Magma => "magma",
            Abstraction::Monoid => "monoid",
            Abstraction::Curry => "curry",
        };
        write!(f, "{}", name)
    }
}

/// Map a function over every value a structure holds, preserving its shape.
pub trait Functor: Sized {
    fn fmap(&self, f: &Value) -> Result<Self, AlgebraError> {
        self.fmap_n(f, &[])
    }

    /// Map positionally across this structure and up to three more.
    fn fmap_n(&self, f: &Value, rest: &[&Self]) -> Result<Self, AlgebraError>;
}

/// `fmap` that overwrites the receiver instead of allocating.
pub trait PseudoFunctor: Functor {
    fn fmap_in_place(&mut self, f: &Value, rest: &[&Self]) -> Result<(), AlgebraError>;
}

/// Lift values into a structure and apply structures of functions.
pub trait Applicative: Functor {
    /// The structure holding the functions `fapply` applies.
    type Fns: ?Sized;

    /// Lift a bare value. The result is not always `Self`: arrays lift
    /// callables into object arrays.
    fn pure(&self, value: Value) -> Result<Value, AlgebraError>;

    /// Apply every function in `fs` to the values this structure holds.
    fn fapply(&self, fs: &Self::Fns) -> Result<Self, AlgebraError> {
        self.fapply_n(fs, &[])
    }

    fn fapply_n(&self, fs: &Self::Fns, rest: &[&Self]) -> Result<Self, AlgebraError>;
}

/// `fapply` written into a caller-supplied destination.
pub trait PseudoApplicative: Applicative {
    fn fapply_into(
        &self,
        fs: &Self::Fns,
        rest: &[&Self],
        dst: &mut Self,
    ) -> Result<(), AlgebraError>;
}

/// Flatten nested structure; map then flatten.
pub trait Monad: Applicative {
    fn join(&self) -> Result<Self, AlgebraError>;

    fn bind(&self, f: &Value) -> Result<Self, AlgebraError>;
}

/// Reduce the held values to one.
pub trait Foldable: Sized {
    /// Combine the held values with their natural operation.
    fn fold(&self) -> Result<Value, AlgebraError>;

    /// Left fold: `acc = f(acc, x)` starting from `init`.
    fn fold_with(&self, f: &Value, init: Value) -> Result<Value, AlgebraError>;

    /// `foldmap_with(g, +, 0)`.
    fn foldmap(&self, g: &Value) -> Result<Value, AlgebraError> {
        self.foldmap_with(g, &Value::Fn(Function::plus()), Value::Int(0), &[])
    }

    /// Left fold of `g` applied positionally across this structure and `rest`.
    fn foldmap_with(
        &self,
        g: &Value,
        f: &Value,
        init: Value,
        rest: &[&Self],
    ) -> Result<Value, AlgebraError>;
}

/// An associative combining operation.
pub trait Magma: Clone {
    fn op(&self, other: &Self) -> Self;

    /// Combine left to right with every operand in `rest`.
    fn op_all(&self, rest: &[&Self]) -> Result<Self, AlgebraError> {
        Ok(rest.iter().fold(self.clone(), |acc, x| acc.op(x)))
    }
}

/// A magma with a neutral element.
pub trait Monoid: Magma {
    fn id() -> Self;
}

/// Arity-aware partial application.
pub trait Curry {
    /// Remaining arguments before the underlying function runs.
    fn arity(&self) -> usize;

    /// Curry with the default arity.
    fn curry(&self) -> Value;

    /// Curry with an explicit arity; `0` leaves the function uncurried.
    fn curry_with(&self, arity: usize) -> Value;

    /// The underlying function without arity bookkeeping.
    fn uncurry(&self) -> Function;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_operands_bounds() {
        assert!(check_operands("fmap", 1).is_ok());
        assert!(check_operands("fmap", 4).is_ok());
        assert_eq!(
            check_operands("fmap", 5),
            Err(AlgebraError::UnsupportedArity {
                operation: "fmap",
                got: 5,
                max: 4
            })
        );
        assert!(check_operands("fmap", 0).is_err());
    }

    #[test]
    fn test_abstraction_names() {
        assert_eq!(Abstraction::PseudoFunctor.to_string(), "pseudo-functor");
        assert_eq!(
            serde_json::to_string(&Abstraction::PseudoApplicative).unwrap(),
            "\"pseudo-applicative\""
        );
    }
}
