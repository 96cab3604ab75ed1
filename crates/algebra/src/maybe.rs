//! # Maybe
//!
//! An optional value: [`Maybe::Just`] holds a value, [`Maybe::Nothing`] holds
//! none. At the [`Value`] level `Just(v)` is [`Value::Just`] and `Nothing` is
//! the canonical absent value [`Value::Nil`].
//!
//! Every multi-operand form short-circuits: if any operand is `Nothing` the
//! result is `Nothing` and no function is invoked.
//!
//! ```rust
//! use compositional_algebra::{Applicative, Function, Maybe, Value};
//!
//! let inc = Maybe::just(Function::unary("inc", |x| x.plus(&Value::Int(1))).into());
//! assert_eq!(Maybe::just(Value::Int(1)).fapply(&inc).unwrap(), Maybe::just(Value::Int(2)));
//! assert_eq!(Maybe::Nothing.fapply(&inc).unwrap(), Maybe::Nothing);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::algebra::{check_operands, Applicative, Foldable, Functor, Monad};
use crate::bridge::check_single_pure;
use crate::capability::{ApplicativeOps, FoldableOps, FunctorOps, MonadOps, OperationSet};
use crate::error::AlgebraError;
use crate::value::Value;

/// A present or absent value.
#[derive(Debug, Clone, PartialEq)]
pub enum Maybe {
    Just(Value),
    Nothing,
}

impl Maybe {
    pub fn just(value: Value) -> Self {
        Maybe::Just(value)
    }

    pub fn is_just(&self) -> bool {
        matches!(self, Maybe::Just(_))
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Maybe::Nothing)
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Maybe::Just(v) => Some(v),
            Maybe::Nothing => None,
        }
    }

    /// Read a [`Value`] as a Maybe: `Nil` is `Nothing`, `Value::Just` is `Just`.
    pub fn from_value(value: &Value) -> Result<Self, AlgebraError> {
        match value {
            Value::Nil => Ok(Maybe::Nothing),
            Value::Just(v) => Ok(Maybe::Just(Value::clone(v))),
            other => Err(AlgebraError::type_mismatch(
                "maybe",
                other.type_tag().to_string(),
            )),
        }
    }

    /// The payloads of `self` and `rest`, or `None` if any is `Nothing`.
    fn present(&self, rest: &[&Maybe]) -> Option<Vec<Value>> {
        let mut values = Vec::with_capacity(1 + rest.len());
        values.push(self.value()?.clone());
        for m in rest {
            values.push(m.value()?.clone());
        }
        Some(values)
    }
}

impl From<Maybe> for Value {
    fn from(m: Maybe) -> Self {
        match m {
            Maybe::Just(v) => Value::Just(Arc::new(v)),
            Maybe::Nothing => Value::Nil,
        }
    }
}

impl fmt::Display for Maybe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Maybe::Just(v) => write!(f, "just[{}]", v),
            Maybe::Nothing => write!(f, "nil"),
        }
    }
}

impl Functor for Maybe {
    fn fmap_n(&self, f: &Value, rest: &[&Self]) -> Result<Self, AlgebraError> {
        check_operands("fmap", 1 + rest.len())?;
        match self.present(rest) {
            Some(values) => Ok(Maybe::Just(f.call(&values)?)),
            None => Ok(Maybe::Nothing),
        }
    }
}

impl Applicative for Maybe {
    type Fns = Maybe;

    fn pure(&self, value: Value) -> Result<Value, AlgebraError> {
        Ok(Maybe::Just(value).into())
    }

    fn fapply_n(&self, fs: &Maybe, rest: &[&Self]) -> Result<Self, AlgebraError> {
        check_operands("fapply", 1 + rest.len())?;
        match (fs, self.present(rest)) {
            (Maybe::Just(f), Some(values)) => Ok(Maybe::Just(f.call(&values)?)),
            _ => Ok(Maybe::Nothing),
        }
    }
}

impl Monad for Maybe {
    fn join(&self) -> Result<Self, AlgebraError> {
        match self {
            Maybe::Just(inner) => Maybe::from_value(inner),
            Maybe::Nothing => Ok(Maybe::Nothing),
        }
    }

    /// The result of `f` must itself be a Maybe.
    fn bind(&self, f: &Value) -> Result<Self, AlgebraError> {
        match self {
            Maybe::Just(v) => Maybe::from_value(&f.call(std::slice::from_ref(v))?),
            Maybe::Nothing => Ok(Maybe::Nothing),
        }
    }
}

impl Foldable for Maybe {
    /// The payload, or `0` for `Nothing`.
    fn fold(&self) -> Result<Value, AlgebraError> {
        Ok(self.value().cloned().unwrap_or(Value::Int(0)))
    }

    fn fold_with(&self, f: &Value, init: Value) -> Result<Value, AlgebraError> {
        match self {
            Maybe::Just(v) => f.call(&[init, v.clone()]),
            Maybe::Nothing => Ok(init),
        }
    }

    fn foldmap_with(
        &self,
        g: &Value,
        f: &Value,
        init: Value,
        rest: &[&Self],
    ) -> Result<Value, AlgebraError> {
        check_operands("foldmap", 1 + rest.len())?;
        match self.present(rest) {
            Some(values) => f.call(&[init, g.call(&values)?]),
            None => Ok(init),
        }
    }
}

// ============================================================================
// Capability table entry
// ============================================================================

fn maybe_all(values: &[Value]) -> Result<Vec<Maybe>, AlgebraError> {
    values.iter().map(Maybe::from_value).collect()
}

/// `Nothing` in any operand position settles the result before the other
/// operands are read, so they need not be `Maybe` values at all.
fn any_nothing(first: &Value, rest: &[Value]) -> bool {
    first.is_nil() || rest.iter().any(Value::is_nil)
}

fn fmap_entry(fa: &Value, f: &Value, rest: &[Value]) -> Result<Value, AlgebraError> {
    check_operands("fmap", 1 + rest.len())?;
    if any_nothing(fa, rest) {
        return Ok(Value::Nil);
    }
    let rest = maybe_all(rest)?;
    let rest: Vec<&Maybe> = rest.iter().collect();
    Ok(Maybe::from_value(fa)?.fmap_n(f, &rest)?.into())
}

fn pure_entry(_template: &Value, value: Value, more: &[Value]) -> Result<Value, AlgebraError> {
    check_single_pure(more)?;
    Ok(Maybe::Just(value).into())
}

fn fapply_entry(fs: &Value, fa: &Value, rest: &[Value]) -> Result<Value, AlgebraError> {
    check_operands("fapply", 1 + rest.len())?;
    if fs.is_nil() || any_nothing(fa, rest) {
        return Ok(Value::Nil);
    }
    let rest = maybe_all(rest)?;
    let rest: Vec<&Maybe> = rest.iter().collect();
    let fs = Maybe::from_value(fs)?;
    Ok(Maybe::from_value(fa)?.fapply_n(&fs, &rest)?.into())
}

fn join_entry(ma: &Value) -> Result<Value, AlgebraError> {
    Ok(Maybe::from_value(ma)?.join()?.into())
}

fn bind_entry(ma: &Value, f: &Value) -> Result<Value, AlgebraError> {
    Ok(Maybe::from_value(ma)?.bind(f)?.into())
}

fn fold_entry(x: &Value) -> Result<Value, AlgebraError> {
    Maybe::from_value(x)?.fold()
}

fn fold_with_entry(x: &Value, f: &Value, init: Value) -> Result<Value, AlgebraError> {
    Maybe::from_value(x)?.fold_with(f, init)
}

fn foldmap_entry(
    x: &Value,
    g: &Value,
    f: &Value,
    init: Value,
    rest: &[Value],
) -> Result<Value, AlgebraError> {
    check_operands("foldmap", 1 + rest.len())?;
    if any_nothing(x, rest) {
        return Ok(init);
    }
    let rest = maybe_all(rest)?;
    let rest: Vec<&Maybe> = rest.iter().collect();
    Maybe::from_value(x)?.foldmap_with(g, f, init, &rest)
}

/// Shared by the `Just` and `Nil` representations.
pub(crate) fn operation_set() -> OperationSet {
    OperationSet {
        functor: Some(FunctorOps { fmap: fmap_entry }),
        applicative: Some(ApplicativeOps {
            pure: pure_entry,
            fapply: fapply_entry,
        }),
        monad: Some(MonadOps {
            join: join_entry,
            bind: bind_entry,
        }),
        foldable: Some(FoldableOps {
            fold: fold_entry,
            fold_with: fold_with_entry,
            foldmap: foldmap_entry,
        }),
        ..OperationSet::default()
    }
}
