//! # Primitive Array Engine
//!
//! One implementation of every abstraction for arrays, generic over the
//! element width and monomorphized per width: the same code path runs for
//! `bool`, `char`, the six numeric widths and the object fallback, with no
//! boxing of the stored elements between operations.
//!
//! ## Operations
//!
//! | Operation | Result |
//! |-----------|--------|
//! | `map(f, [a, b, ..])` | `r[i] = f(a[i], b[i], ..)` |
//! | `cross_apply([g0, g1, ..], [a, ..])` | `r[g*len + i] = g(a[i], ..)`, one block per function |
//! | `concat([a, b, ..])` | `a ++ b ++ ..` |
//! | `fold_with(a, f, init)` | `f(..f(f(init, a[0]), a[1]).., a[n-1])` |
//! | `foldmap_with(g, f, init, [a, ..])` | `f(..f(init, g(a[0], ..)).., g(a[n-1], ..))` |
//! | `bind(a, g)` | `concat(g(a[0]), g(a[1]), ..)` |
//!
//! Multi-operand forms take 1 to [`MAX_OPERANDS`] arrays. Operand lengths are
//! not validated; iteration stops at the shortest operand.
//!
//! ## Example
//!
//! ```rust
//! use compositional_algebra::{Applicative, Function, PrimArray, Value};
//!
//! let a = PrimArray::from([1i32, 2, 3]);
//! let inc = Value::from(Function::unary("inc", |x| x.plus(&Value::Int(1))));
//! let dbl = Value::from(Function::unary("dbl", |x| x.plus(x)));
//!
//! let r = a.fapply(&[inc, dbl]).unwrap();
//! assert_eq!(r.as_slice(), &[2, 3, 4, 2, 4, 6]);
//! ```

use std::borrow::Cow;

use crate::algebra::{
    check_operands, Applicative, Foldable, Functor, Magma, Monad, Monoid, PseudoApplicative,
    PseudoFunctor, MAX_OPERANDS,
};
use crate::array::{PrimArray, TypedArray};
use crate::capability::{
    ApplicativeOps, FoldableOps, FunctorOps, MagmaOps, MonadOps, MonoidOps, OperationSet,
    PseudoApplicativeOps, PseudoFunctorOps,
};
use crate::element::{Element, Numeric};
use crate::error::AlgebraError;
use crate::function::Function;
use crate::value::Value;

// ============================================================================
// Generic engine
// ============================================================================

fn shortest<E>(operands: &[&[E]]) -> usize {
    operands.iter().map(|a| a.len()).min().unwrap_or(0)
}

/// Call `f` with the boxed elements at position `i` of every operand.
fn apply_at<E: Element>(
    f: &Value,
    operands: &[&[E]],
    i: usize,
    args: &mut Vec<Value>,
) -> Result<Value, AlgebraError> {
    args.clear();
    args.extend(operands.iter().map(|a| a[i].boxed()));
    f.call(args)
}

/// `r[i] = unbox(f(a[i], b[i], ..))` into a new array.
pub fn map<E: Element>(f: &Value, operands: &[&[E]]) -> Result<PrimArray<E>, AlgebraError> {
    check_operands("fmap", operands.len())?;
    let len = shortest(operands);
    let mut out = Vec::with_capacity(len);
    let mut args = Vec::with_capacity(operands.len());
    for i in 0..len {
        out.push(E::unbox(apply_at(f, operands, i, &mut args)?)?);
    }
    Ok(PrimArray::from(out))
}

/// `map` written into `dst`.
pub fn map_into<E: Element>(
    dst: &mut [E],
    f: &Value,
    operands: &[&[E]],
) -> Result<(), AlgebraError> {
    check_operands("fmap!", operands.len())?;
    let len = shortest(operands).min(dst.len());
    let mut args = Vec::with_capacity(operands.len());
    for (i, slot) in dst.iter_mut().enumerate().take(len) {
        *slot = E::unbox(apply_at(f, operands, i, &mut args)?)?;
    }
    Ok(())
}

/// `map` where the destination is also the first operand.
pub fn map_in_place<E: Element>(
    first: &mut [E],
    f: &Value,
    rest: &[&[E]],
) -> Result<(), AlgebraError> {
    check_operands("fmap!", 1 + rest.len())?;
    let len = rest.iter().map(|a| a.len()).fold(first.len(), usize::min);
    let mut args = Vec::with_capacity(1 + rest.len());
    for i in 0..len {
        args.clear();
        args.push(first[i].boxed());
        args.extend(rest.iter().map(|a| a[i].boxed()));
        first[i] = E::unbox(f.call(&args)?)?;
    }
    Ok(())
}

/// Lift one value: callables into an object array, anything else into `E`.
pub fn pure<E: Element>(value: Value) -> Result<TypedArray, AlgebraError> {
    pure_all::<E>(value, &[])
}

/// Lift `value` followed by `more`. The result is an object array when every
/// value is callable.
pub fn pure_all<E: Element>(value: Value, more: &[Value]) -> Result<TypedArray, AlgebraError> {
    if value.is_callable() && more.iter().all(Value::is_callable) {
        let mut all = Vec::with_capacity(1 + more.len());
        all.push(value);
        all.extend_from_slice(more);
        return Ok(TypedArray::Object(PrimArray::from(all)));
    }
    let mut out = Vec::with_capacity(1 + more.len());
    out.push(E::unbox(value)?);
    for v in more {
        out.push(E::unbox(v.clone())?);
    }
    Ok(E::into_typed(PrimArray::from(out)))
}

/// Every function against every position, one contiguous block per function.
pub fn cross_apply<E: Element>(
    fs: &[Value],
    operands: &[&[E]],
) -> Result<PrimArray<E>, AlgebraError> {
    check_operands("fapply", operands.len())?;
    let len = shortest(operands);
    let mut out = Vec::with_capacity(fs.len() * len);
    let mut args = Vec::with_capacity(operands.len());
    for g in fs {
        for i in 0..len {
            out.push(E::unbox(apply_at(g, operands, i, &mut args)?)?);
        }
    }
    Ok(PrimArray::from(out))
}

/// `cross_apply` written into `dst`; stops when `dst` is full.
pub fn cross_apply_into<E: Element>(
    dst: &mut [E],
    fs: &[Value],
    operands: &[&[E]],
) -> Result<(), AlgebraError> {
    check_operands("fapply!", operands.len())?;
    let len = shortest(operands);
    let mut args = Vec::with_capacity(operands.len());
    for (block, g) in fs.iter().enumerate() {
        for i in 0..len {
            let Some(slot) = dst.get_mut(block * len + i) else {
                return Ok(());
            };
            *slot = E::unbox(apply_at(g, operands, i, &mut args)?)?;
        }
    }
    Ok(())
}

/// All operands back to back, in one allocation.
pub fn concat<E: Element>(operands: &[&[E]]) -> PrimArray<E> {
    let total = operands.iter().map(|a| a.len()).sum();
    let mut out = Vec::with_capacity(total);
    for a in operands {
        out.extend_from_slice(a);
    }
    PrimArray::from(out)
}

/// Sum from zero.
pub fn sum<E: Numeric>(a: &[E]) -> E {
    a.iter().fold(E::ZERO, |acc, &x| acc + x)
}

pub fn fold_with<E: Element>(a: &[E], f: &Value, init: Value) -> Result<Value, AlgebraError> {
    a.iter().try_fold(init, |acc, x| f.call(&[acc, x.boxed()]))
}

pub fn foldmap_with<E: Element>(
    g: &Value,
    f: &Value,
    init: Value,
    operands: &[&[E]],
) -> Result<Value, AlgebraError> {
    check_operands("foldmap", operands.len())?;
    let len = shortest(operands);
    let mut args = Vec::with_capacity(operands.len());
    let mut acc = init;
    for i in 0..len {
        let mapped = apply_at(g, operands, i, &mut args)?;
        acc = f.call(&[acc, mapped])?;
    }
    Ok(acc)
}

/// Map `g` over each element and splice the resulting arrays together.
pub fn bind<E: Element>(a: &[E], g: &Value) -> Result<PrimArray<E>, AlgebraError> {
    let mut out = Vec::with_capacity(a.len());
    for x in a {
        E::splice(g.call(&[x.boxed()])?, &mut out)?;
    }
    Ok(PrimArray::from(out))
}

fn all_operands<'a, E>(first: &'a PrimArray<E>, rest: &[&'a PrimArray<E>]) -> Vec<&'a [E]> {
    let mut all = Vec::with_capacity(1 + rest.len());
    all.push(first.as_slice());
    all.extend(rest.iter().map(|a| a.as_slice()));
    all
}

// ============================================================================
// Abstractions for PrimArray
// ============================================================================

impl<E: Element> Functor for PrimArray<E> {
    fn fmap_n(&self, f: &Value, rest: &[&Self]) -> Result<Self, AlgebraError> {
        map(f, &all_operands(self, rest))
    }
}

impl<E: Element> PseudoFunctor for PrimArray<E> {
    fn fmap_in_place(&mut self, f: &Value, rest: &[&Self]) -> Result<(), AlgebraError> {
        let rest: Vec<&[E]> = rest.iter().map(|a| a.as_slice()).collect();
        map_in_place(self.as_mut_slice(), f, &rest)
    }
}

impl<E: Element> Applicative for PrimArray<E> {
    type Fns = [Value];

    fn pure(&self, value: Value) -> Result<Value, AlgebraError> {
        Ok(Value::Array(pure::<E>(value)?))
    }

    fn fapply_n(&self, fs: &[Value], rest: &[&Self]) -> Result<Self, AlgebraError> {
        cross_apply(fs, &all_operands(self, rest))
    }
}

impl<E: Element> PseudoApplicative for PrimArray<E> {
    fn fapply_into(
        &self,
        fs: &[Value],
        rest: &[&Self],
        dst: &mut Self,
    ) -> Result<(), AlgebraError> {
        cross_apply_into(dst.as_mut_slice(), fs, &all_operands(self, rest))
    }
}

impl<E: Element> Monad for PrimArray<E> {
    fn join(&self) -> Result<Self, AlgebraError> {
        Ok(E::join(self))
    }

    fn bind(&self, f: &Value) -> Result<Self, AlgebraError> {
        bind(self, f)
    }
}

impl<E: Numeric> Foldable for PrimArray<E> {
    fn fold(&self) -> Result<Value, AlgebraError> {
        Ok(sum(self).boxed())
    }

    /// Seeded with this width's zero so the sum keeps the width.
    fn foldmap(&self, g: &Value) -> Result<Value, AlgebraError> {
        self.foldmap_with(g, &Value::Fn(Function::plus()), E::ZERO.boxed(), &[])
    }

    fn fold_with(&self, f: &Value, init: Value) -> Result<Value, AlgebraError> {
        fold_with(self, f, init)
    }

    fn foldmap_with(
        &self,
        g: &Value,
        f: &Value,
        init: Value,
        rest: &[&Self],
    ) -> Result<Value, AlgebraError> {
        foldmap_with(g, f, init, &all_operands(self, rest))
    }
}

impl<E: Element> Magma for PrimArray<E> {
    fn op(&self, other: &Self) -> Self {
        concat(&[self.as_slice(), other.as_slice()])
    }

    fn op_all(&self, rest: &[&Self]) -> Result<Self, AlgebraError> {
        Ok(concat(&all_operands(self, rest)))
    }
}

impl<E: Element> Monoid for PrimArray<E> {
    fn id() -> Self {
        PrimArray::empty()
    }
}

impl<E: Element> PrimArray<E> {
    /// `pure` with several values.
    pub fn pure_all(&self, value: Value, more: &[Value]) -> Result<TypedArray, AlgebraError> {
        pure_all::<E>(value, more)
    }
}

// ============================================================================
// Capability table entries
// ============================================================================

fn array<E: Element>(value: &Value) -> Result<&PrimArray<E>, AlgebraError> {
    let array = match value {
        Value::Array(typed) => E::from_typed(typed),
        _ => None,
    };
    array.ok_or_else(|| {
        AlgebraError::type_mismatch(format!("{}-array", E::KIND), value.type_tag().to_string())
    })
}

fn array_mut<E: Element>(value: &mut Value) -> Result<&mut PrimArray<E>, AlgebraError> {
    let got = value.type_tag().to_string();
    let array = match value {
        Value::Array(typed) => E::from_typed_mut(typed),
        _ => None,
    };
    array.ok_or_else(|| AlgebraError::type_mismatch(format!("{}-array", E::KIND), got))
}

fn slices<'a, E: Element>(values: &'a [Value]) -> Result<Vec<&'a [E]>, AlgebraError> {
    if values.len() > MAX_OPERANDS {
        return Err(AlgebraError::UnsupportedArity {
            operation: "array operands",
            got: values.len(),
            max: MAX_OPERANDS,
        });
    }
    values
        .iter()
        .map(|v| array::<E>(v).map(|a| a.as_slice()))
        .collect()
}

fn with_first<'a, E: Element>(
    first: &'a Value,
    rest: &'a [Value],
) -> Result<Vec<&'a [E]>, AlgebraError> {
    check_operands("array operands", 1 + rest.len())?;
    let mut all = vec![array::<E>(first)?.as_slice()];
    all.extend(slices::<E>(rest)?);
    Ok(all)
}

/// The functions a `fapply` applies: one callable, or an array of them.
fn functions(fs: &Value) -> Result<Cow<'_, [Value]>, AlgebraError> {
    match fs {
        Value::Array(TypedArray::Object(a)) => Ok(Cow::Borrowed(a.as_slice())),
        Value::Array(other) => Ok(Cow::Owned(other.to_values())),
        f if f.is_callable() => Ok(Cow::Owned(vec![f.clone()])),
        other => Err(AlgebraError::NotCallable(other.to_string())),
    }
}

fn fmap_entry<E: Element>(fa: &Value, f: &Value, rest: &[Value]) -> Result<Value, AlgebraError> {
    Ok(map(f, &with_first::<E>(fa, rest)?)?.into())
}

fn fmap_in_place_entry<E: Element>(
    fa: &mut Value,
    f: &Value,
    rest: &[Value],
) -> Result<(), AlgebraError> {
    check_operands("fmap!", 1 + rest.len())?;
    let rest = slices::<E>(rest)?;
    map_in_place(array_mut::<E>(fa)?.as_mut_slice(), f, &rest)
}

fn pure_entry<E: Element>(
    template: &Value,
    value: Value,
    more: &[Value],
) -> Result<Value, AlgebraError> {
    array::<E>(template)?;
    Ok(Value::Array(pure_all::<E>(value, more)?))
}

fn fapply_entry<E: Element>(fs: &Value, fa: &Value, rest: &[Value]) -> Result<Value, AlgebraError> {
    Ok(cross_apply(&functions(fs)?, &with_first::<E>(fa, rest)?)?.into())
}

fn fapply_into_entry<E: Element>(
    dst: &mut Value,
    fs: &Value,
    fa: &Value,
    rest: &[Value],
) -> Result<(), AlgebraError> {
    let operands = with_first::<E>(fa, rest)?;
    cross_apply_into(array_mut::<E>(dst)?.as_mut_slice(), &functions(fs)?, &operands)
}

fn join_entry<E: Element>(ma: &Value) -> Result<Value, AlgebraError> {
    Ok(E::join(array::<E>(ma)?).into())
}

fn bind_entry<E: Element>(ma: &Value, f: &Value) -> Result<Value, AlgebraError> {
    Ok(bind(array::<E>(ma)?, f)?.into())
}

fn fold_entry<E: Numeric>(x: &Value) -> Result<Value, AlgebraError> {
    Ok(sum(array::<E>(x)?).boxed())
}

fn fold_with_entry<E: Numeric>(x: &Value, f: &Value, init: Value) -> Result<Value, AlgebraError> {
    fold_with(array::<E>(x)?, f, init)
}

fn foldmap_entry<E: Numeric>(
    x: &Value,
    g: &Value,
    f: &Value,
    init: Value,
    rest: &[Value],
) -> Result<Value, AlgebraError> {
    foldmap_with(g, f, init, &with_first::<E>(x, rest)?)
}

fn op_entry<E: Element>(x: &Value, rest: &[Value]) -> Result<Value, AlgebraError> {
    let mut all = vec![array::<E>(x)?.as_slice()];
    for v in rest {
        all.push(array::<E>(v)?.as_slice());
    }
    Ok(concat(&all).into())
}

fn id_entry<E: Element>(_template: &Value) -> Value {
    PrimArray::<E>::empty().into()
}

/// Array operations for width `E`, without Foldable.
pub(crate) fn operation_set<E: Element>() -> OperationSet {
    OperationSet {
        functor: Some(FunctorOps {
            fmap: fmap_entry::<E>,
        }),
        pseudo_functor: Some(PseudoFunctorOps {
            fmap_in_place: fmap_in_place_entry::<E>,
        }),
        applicative: Some(ApplicativeOps {
            pure: pure_entry::<E>,
            fapply: fapply_entry::<E>,
        }),
        pseudo_applicative: Some(PseudoApplicativeOps {
            fapply_into: fapply_into_entry::<E>,
        }),
        monad: Some(MonadOps {
            join: join_entry::<E>,
            bind: bind_entry::<E>,
        }),
        foldable: None,
        magma: Some(MagmaOps { op: op_entry::<E> }),
        monoid: Some(MonoidOps { id: id_entry::<E> }),
        curry: None,
    }
}

/// Array operations for a numeric width, Foldable included.
pub(crate) fn numeric_operation_set<E: Numeric>() -> OperationSet {
    OperationSet {
        foldable: Some(FoldableOps {
            fold: fold_entry::<E>,
            fold_with: fold_with_entry::<E>,
            foldmap: foldmap_entry::<E>,
        }),
        ..operation_set::<E>()
    }
}
