//! # Value-level Operations
//!
//! Entry points that accept any [`Value`] and route through the process-wide
//! [`capabilities`] table by the value's [`TypeTag`](crate::TypeTag). A
//! representation without an entry for the requested abstraction fails with
//! [`AlgebraError::MissingCapability`].
//!
//! The typed traits in [`crate::algebra`] are the statically dispatched
//! equivalent; these functions are for callers holding dynamic values.
//!
//! ```rust
//! use compositional_algebra::{dispatch, Function, PrimArray, Value};
//!
//! let xs: Value = PrimArray::from([1i32, 2, 3]).into();
//! let inc: Value = Function::unary("inc", |x| x.plus(&Value::Int(1))).into();
//!
//! let ys = dispatch::fmap(&xs, &inc).unwrap();
//! assert_eq!(dispatch::fold(&ys).unwrap(), Value::Int(9));
//! ```

use tracing::trace;

use crate::algebra::Abstraction;
use crate::capability::{capabilities, OperationSet};
use crate::error::AlgebraError;
use crate::function::Function;
use crate::value::{TypeTag, Value};

fn lookup<T>(
    value: &Value,
    abstraction: Abstraction,
    select: impl FnOnce(&OperationSet) -> Option<T>,
) -> Result<T, AlgebraError> {
    let tag = value.type_tag();
    trace!(%tag, %abstraction, "dispatch");
    capabilities()
        .get(tag)
        .and_then(select)
        .ok_or(AlgebraError::MissingCapability { abstraction, tag })
}

// ============================================================================
// Functor / PseudoFunctor
// ============================================================================

pub fn fmap(fa: &Value, f: &Value) -> Result<Value, AlgebraError> {
    fmap_n(fa, f, &[])
}

/// Map positionally across `fa` and up to three more operands.
pub fn fmap_n(fa: &Value, f: &Value, rest: &[Value]) -> Result<Value, AlgebraError> {
    let ops = lookup(fa, Abstraction::Functor, |s| s.functor)?;
    (ops.fmap)(fa, f, rest)
}

/// `fmap!`: overwrite `fa` with the mapped values.
pub fn fmap_in_place(fa: &mut Value, f: &Value, rest: &[Value]) -> Result<(), AlgebraError> {
    let ops = lookup(fa, Abstraction::PseudoFunctor, |s| s.pseudo_functor)?;
    (ops.fmap_in_place)(fa, f, rest)
}

// ============================================================================
// Applicative / PseudoApplicative
// ============================================================================

/// Lift `value` into the representation of `template`.
pub fn pure(template: &Value, value: Value) -> Result<Value, AlgebraError> {
    pure_all(template, value, &[])
}

pub fn pure_all(template: &Value, value: Value, more: &[Value]) -> Result<Value, AlgebraError> {
    let ops = lookup(template, Abstraction::Applicative, |s| s.applicative)?;
    (ops.pure)(template, value, more)
}

/// Apply the function structure `fs` to `fa`. Dispatches on `fa`.
pub fn fapply(fs: &Value, fa: &Value) -> Result<Value, AlgebraError> {
    fapply_n(fs, fa, &[])
}

pub fn fapply_n(fs: &Value, fa: &Value, rest: &[Value]) -> Result<Value, AlgebraError> {
    let ops = lookup(fa, Abstraction::Applicative, |s| s.applicative)?;
    (ops.fapply)(fs, fa, rest)
}

/// `fapply!`: write the result of `fapply_n` into `dst`.
pub fn fapply_into(
    dst: &mut Value,
    fs: &Value,
    fa: &Value,
    rest: &[Value],
) -> Result<(), AlgebraError> {
    let ops = lookup(fa, Abstraction::PseudoApplicative, |s| s.pseudo_applicative)?;
    (ops.fapply_into)(dst, fs, fa, rest)
}

// ============================================================================
// Monad
// ============================================================================

pub fn join(ma: &Value) -> Result<Value, AlgebraError> {
    let ops = lookup(ma, Abstraction::Monad, |s| s.monad)?;
    (ops.join)(ma)
}

pub fn bind(ma: &Value, f: &Value) -> Result<Value, AlgebraError> {
    let ops = lookup(ma, Abstraction::Monad, |s| s.monad)?;
    (ops.bind)(ma, f)
}

// ============================================================================
// Foldable
// ============================================================================

pub fn fold(x: &Value) -> Result<Value, AlgebraError> {
    let ops = lookup(x, Abstraction::Foldable, |s| s.foldable)?;
    (ops.fold)(x)
}

pub fn fold_with(x: &Value, f: &Value, init: Value) -> Result<Value, AlgebraError> {
    let ops = lookup(x, Abstraction::Foldable, |s| s.foldable)?;
    (ops.fold_with)(x, f, init)
}

/// `foldmap_with(x, g, +, 0)`, where `0` is the zero of an array's width.
pub fn foldmap(x: &Value, g: &Value) -> Result<Value, AlgebraError> {
    let init = match x.type_tag() {
        TypeTag::Array(kind) => kind.zero(),
        _ => Value::Int(0),
    };
    foldmap_with(x, g, &Value::Fn(Function::plus()), init, &[])
}

pub fn foldmap_with(
    x: &Value,
    g: &Value,
    f: &Value,
    init: Value,
    rest: &[Value],
) -> Result<Value, AlgebraError> {
    let ops = lookup(x, Abstraction::Foldable, |s| s.foldable)?;
    (ops.foldmap)(x, g, f, init, rest)
}

// ============================================================================
// Magma / Monoid
// ============================================================================

pub fn op(x: &Value, y: &Value) -> Result<Value, AlgebraError> {
    op_all(x, std::slice::from_ref(y))
}

pub fn op_all(x: &Value, rest: &[Value]) -> Result<Value, AlgebraError> {
    let ops = lookup(x, Abstraction::Magma, |s| s.magma)?;
    (ops.op)(x, rest)
}

/// The neutral element for the representation of `template`.
pub fn id(template: &Value) -> Result<Value, AlgebraError> {
    let ops = lookup(template, Abstraction::Monoid, |s| s.monoid)?;
    Ok((ops.id)(template))
}

// ============================================================================
// Curry
// ============================================================================

pub fn arity(v: &Value) -> Result<usize, AlgebraError> {
    let ops = lookup(v, Abstraction::Curry, |s| s.curry)?;
    Ok((ops.arity)(v))
}

/// Curry with the default arity; curried values are returned unchanged.
pub fn curry(v: &Value) -> Result<Value, AlgebraError> {
    let ops = lookup(v, Abstraction::Curry, |s| s.curry)?;
    Ok((ops.curry)(v, None))
}

pub fn curry_with(v: &Value, arity: usize) -> Result<Value, AlgebraError> {
    let ops = lookup(v, Abstraction::Curry, |s| s.curry)?;
    Ok((ops.curry)(v, Some(arity)))
}

pub fn uncurry(v: &Value) -> Result<Value, AlgebraError> {
    let ops = lookup(v, Abstraction::Curry, |s| s.curry)?;
    Ok((ops.uncurry)(v))
}
