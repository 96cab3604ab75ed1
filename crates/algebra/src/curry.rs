//! # Curried Functions
//!
//! A [`Curried`] value is an immutable pair `(f, n)`: a [`Function`] and the
//! number of arguments still expected before `f` runs.
//!
//! ## Call protocol
//!
//! Calling `(f, n)` with `k` arguments:
//!
//! - `k < n`: returns `(partial(f, args), n - k)` without invoking `f`
//! - `k >= n`: invokes `f` with every supplied argument
//!
//! ```rust
//! use compositional_algebra::{Curry, Function, Value};
//!
//! let add3 = Function::ternary("add3", |a, b, c| a.plus(b)?.plus(c));
//! let curried = add3.curry_with(3);
//!
//! let step = curried.call(&[Value::Int(1)]).unwrap();
//! assert_eq!(step.call(&[Value::Int(2), Value::Int(3)]).unwrap(), Value::Int(6));
//! ```
//!
//! ## Equality
//!
//! Two curried values are equal when they wrap the *same* function (identity of
//! its body) with the same arity. Two separately built functions with the same
//! behavior are never equal.

use std::fmt;

use crate::algebra::{
    check_operands, Applicative, Curry, Foldable, Functor, Magma, Monad, Monoid,
};
use crate::bridge::{self, check_single_pure};
use crate::capability::{
    ApplicativeOps, CurryOps, FoldableOps, FunctorOps, MagmaOps, MonadOps, MonoidOps,
    OperationSet,
};
use crate::error::AlgebraError;
use crate::function::{Callable, Function, Signature};
use crate::value::Value;

/// Largest arity `curry` picks without an explicit request.
pub const DEFAULT_CURRY_ARITY: usize = 2;

/// A function paired with its remaining arity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Curried {
    f: Function,
    arity: usize,
}

impl Curried {
    pub fn new(f: Function, arity: usize) -> Self {
        Self { f, arity }
    }

    /// The curried identity function: the Monoid neutral element.
    pub fn identity() -> Self {
        Self::new(Function::identity(), 1)
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// The wrapped function.
    pub fn function(&self) -> &Function {
        &self.f
    }

    pub fn is_identity(&self) -> bool {
        self.f.is_identity()
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, AlgebraError> {
        if args.len() >= self.arity {
            return self.f.call(args);
        }
        if args.is_empty() {
            return Ok(self.clone().into());
        }
        let remaining = self.arity - args.len();
        Ok(Curried::new(self.f.partial(args.to_vec()), remaining).into())
    }
}

impl Callable for Curried {
    fn invoke(&self, args: &[Value]) -> Result<Value, AlgebraError> {
        self.call(args)
    }

    fn signature(&self) -> Signature {
        Signature::any()
    }

    fn describe(&self) -> String {
        self.f.name().to_string()
    }
}

impl fmt::Display for Curried {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "curried-function[arity: {}, {}]", self.arity, self.f)
    }
}

// ============================================================================
// Abstractions
// ============================================================================

fn boxed(cs: &[&Curried]) -> Vec<Value> {
    cs.iter().map(|c| Value::Curried((*c).clone())).collect()
}

/// `g` applied to every operand, each operand called with the leading
/// arguments it expects.
fn fan_in(g: Value, operands: Vec<Curried>) -> Curried {
    let arity = operands.iter().map(Curried::arity).max().unwrap_or(0);
    let name = format!("{}∘(..)", g.describe());
    let f = Function::new(name, Signature::any(), move |args| {
        let mut results = Vec::with_capacity(operands.len());
        for c in &operands {
            let take = c.arity.min(args.len());
            results.push(c.call(&args[..take])?);
        }
        g.call(&results)
    });
    Curried::new(f, arity)
}

impl Functor for Curried {
    /// `fmap(cf, g)` composes `g` after `cf`; with more operands `g`
    /// receives one result from each.
    fn fmap_n(&self, f: &Value, rest: &[&Self]) -> Result<Self, AlgebraError> {
        check_operands("fmap", 1 + rest.len())?;
        if rest.is_empty() {
            return Ok(Curried::new(
                bridge::compose(f.clone(), self.clone()),
                self.arity,
            ));
        }
        let mut operands = Vec::with_capacity(1 + rest.len());
        operands.push(self.clone());
        operands.extend(rest.iter().map(|c| (*c).clone()));
        Ok(fan_in(f.clone(), operands))
    }
}

impl Applicative for Curried {
    type Fns = Curried;

    fn pure(&self, value: Value) -> Result<Value, AlgebraError> {
        Ok(Curried::new(bridge::constant(value), 1).into())
    }

    fn fapply_n(&self, fs: &Curried, rest: &[&Self]) -> Result<Self, AlgebraError> {
        check_operands("fapply", 1 + rest.len())?;
        Ok(Curried::new(
            bridge::fapply(fs.clone(), self.clone(), boxed(rest)),
            1,
        ))
    }
}

impl Monad for Curried {
    fn join(&self) -> Result<Self, AlgebraError> {
        Ok(Curried::new(bridge::join(self.clone()), self.arity))
    }

    fn bind(&self, f: &Value) -> Result<Self, AlgebraError> {
        Ok(Curried::new(
            bridge::bind(self.clone(), f.clone()),
            self.arity,
        ))
    }
}

impl Foldable for Curried {
    fn fold(&self) -> Result<Value, AlgebraError> {
        bridge::fold(self)
    }

    fn fold_with(&self, f: &Value, init: Value) -> Result<Value, AlgebraError> {
        bridge::fold_with(self, f, init)
    }

    fn foldmap_with(
        &self,
        g: &Value,
        f: &Value,
        init: Value,
        rest: &[&Self],
    ) -> Result<Value, AlgebraError> {
        bridge::foldmap_with(self, &boxed(rest), g, f, init)
    }
}

impl Magma for Curried {
    /// `x ∘ y` with the arity of `y`. The identity is absorbed on either side.
    fn op(&self, other: &Self) -> Self {
        if self.is_identity() {
            return other.clone();
        }
        if other.is_identity() {
            return self.clone();
        }
        Curried::new(bridge::compose(self.clone(), other.clone()), other.arity)
    }

    fn op_all(&self, rest: &[&Self]) -> Result<Self, AlgebraError> {
        check_operands("op", 1 + rest.len())?;
        Ok(rest.iter().fold(self.clone(), |acc, x| acc.op(x)))
    }
}

impl Monoid for Curried {
    fn id() -> Self {
        Curried::identity()
    }
}

impl Curry for Curried {
    fn arity(&self) -> usize {
        self.arity
    }

    /// Already curried: unchanged.
    fn curry(&self) -> Value {
        self.clone().into()
    }

    fn curry_with(&self, arity: usize) -> Value {
        self.f.curry_with(arity)
    }

    fn uncurry(&self) -> Function {
        self.f.clone()
    }
}

// ============================================================================
// Capability table entry
// ============================================================================

fn curried(value: &Value) -> Result<&Curried, AlgebraError> {
    match value {
        Value::Curried(c) => Ok(c),
        other => Err(AlgebraError::type_mismatch(
            "curried-function",
            other.type_tag().to_string(),
        )),
    }
}

fn callable(value: &Value) -> Result<&Value, AlgebraError> {
    match value {
        Value::Fn(_) | Value::Curried(_) => Ok(value),
        other => Err(AlgebraError::type_mismatch(
            "callable",
            other.type_tag().to_string(),
        )),
    }
}

/// Any callable as a curried value. Plain functions take their default arity.
fn lift(value: &Value) -> Result<Curried, AlgebraError> {
    match callable(value)? {
        Value::Curried(c) => Ok(c.clone()),
        Value::Fn(f) => Ok(Curried::new(f.clone(), bridge::default_arity(f.signature()))),
        other => Err(AlgebraError::NotCallable(other.to_string())),
    }
}

fn fmap_entry(fa: &Value, f: &Value, rest: &[Value]) -> Result<Value, AlgebraError> {
    let rest = rest.iter().map(lift).collect::<Result<Vec<_>, _>>()?;
    let rest: Vec<&Curried> = rest.iter().collect();
    Ok(curried(fa)?.fmap_n(f, &rest)?.into())
}

fn pure_entry(_template: &Value, value: Value, more: &[Value]) -> Result<Value, AlgebraError> {
    check_single_pure(more)?;
    Ok(Curried::new(bridge::constant(value), 1).into())
}

/// `fs` may be any callable; extra operands may be any callable.
fn fapply_entry(fs: &Value, fa: &Value, rest: &[Value]) -> Result<Value, AlgebraError> {
    check_operands("fapply", 1 + rest.len())?;
    let f = bridge::fapply(fs.clone(), curried(fa)?.clone(), rest.to_vec());
    Ok(Curried::new(f, 1).into())
}

fn join_entry(ma: &Value) -> Result<Value, AlgebraError> {
    Ok(curried(ma)?.join()?.into())
}

fn bind_entry(ma: &Value, f: &Value) -> Result<Value, AlgebraError> {
    Ok(curried(ma)?.bind(f)?.into())
}

fn fold_entry(x: &Value) -> Result<Value, AlgebraError> {
    curried(x)?.fold()
}

fn fold_with_entry(x: &Value, f: &Value, init: Value) -> Result<Value, AlgebraError> {
    curried(x)?.fold_with(f, init)
}

fn foldmap_entry(
    x: &Value,
    g: &Value,
    f: &Value,
    init: Value,
    rest: &[Value],
) -> Result<Value, AlgebraError> {
    bridge::foldmap_with(curried(x)?, rest, g, f, init)
}

fn is_identity(value: &Value) -> bool {
    match value {
        Value::Fn(f) => f.is_identity(),
        Value::Curried(c) => c.is_identity(),
        _ => false,
    }
}

/// `x ∘ y` for any pair of plain or curried functions. Two plain functions
/// compose to a plain function; otherwise the result is curried with the
/// arity `y` would curry at.
fn compose_pair(x: Value, y: Value) -> Result<Value, AlgebraError> {
    match (&x, &y) {
        (Value::Fn(f), Value::Fn(g)) => return Ok(f.op(g).into()),
        (Value::Curried(f), Value::Curried(g)) => return Ok(f.op(g).into()),
        _ => {}
    }
    if is_identity(&x) {
        return Ok(y);
    }
    if is_identity(&y) {
        return Ok(x);
    }
    let arity = lift(&y)?.arity;
    Ok(Curried::new(bridge::compose(x, y), arity).into())
}

/// Left-to-right composition `x ∘ rest[0] ∘ ..` over mixed callables.
pub(crate) fn compose_all(x: &Value, rest: &[Value]) -> Result<Value, AlgebraError> {
    check_operands("op", 1 + rest.len())?;
    let mut acc = callable(x)?.clone();
    for y in rest {
        acc = compose_pair(acc, callable(y)?.clone())?;
    }
    Ok(acc)
}

fn op_entry(x: &Value, rest: &[Value]) -> Result<Value, AlgebraError> {
    compose_all(x, rest)
}

fn id_entry(_template: &Value) -> Value {
    Curried::identity().into()
}

fn arity_entry(v: &Value) -> usize {
    match v {
        Value::Curried(c) => c.arity,
        _ => 0,
    }
}

fn curry_entry(v: &Value, arity: Option<usize>) -> Value {
    match (v, arity) {
        (Value::Curried(c), Some(n)) => c.curry_with(n),
        (other, _) => other.clone(),
    }
}

fn uncurry_entry(v: &Value) -> Value {
    match v {
        Value::Curried(c) => c.f.clone().into(),
        other => other.clone(),
    }
}

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
        magma: Some(MagmaOps { op: op_entry }),
        monoid: Some(MonoidOps { id: id_entry }),
        curry: Some(CurryOps {
            arity: arity_entry,
            curry: curry_entry,
            uncurry: uncurry_entry,
        }),
        ..OperationSet::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add3() -> Function {
        Function::ternary("add3", |a, b, c| a.plus(b)?.plus(c))
    }

    fn inc() -> Curried {
        Curried::new(Function::unary("inc", |x| x.plus(&Value::Int(1))), 1)
    }

    fn dbl() -> Curried {
        Curried::new(Function::unary("dbl", |x| x.plus(x)), 1)
    }

    fn as_curried(v: Value) -> Curried {
        match v {
            Value::Curried(c) => c,
            other => panic!("expected curried value, got {}", other),
        }
    }

    #[test]
    fn test_partial_application_protocol() {
        let c = Curried::new(add3(), 3);
        let step = as_curried(c.call(&[Value::Int(1)]).unwrap());
        assert_eq!(step.arity(), 2);
        assert_eq!(
            step.call(&[Value::Int(2), Value::Int(3)]).unwrap(),
            Value::Int(6)
        );
    }

    #[test]
    fn test_one_argument_at_a_time() {
        let c = Curried::new(add3(), 3);
        let a = as_curried(c.call(&[Value::Int(1)]).unwrap());
        let b = as_curried(a.call(&[Value::Int(2)]).unwrap());
        assert_eq!(b.arity(), 1);
        assert_eq!(b.call(&[Value::Int(3)]).unwrap(), Value::Int(6));
    }

    #[test]
    fn test_zero_arguments_returns_equal_value() {
        let c = Curried::new(add3(), 3);
        assert_eq!(c.call(&[]).unwrap(), Value::Curried(c.clone()));
    }

    #[test]
    fn test_excess_arguments_reach_the_function() {
        let c = Curried::new(add3(), 2);
        let err = c.call(&[Value::Int(1), Value::Int(2)]).unwrap_err();
        assert!(matches!(err, AlgebraError::ArityMismatch { got: 2, .. }));
        let ok = c
            .call(&[Value::Int(1), Value::Int(2), Value::Int(3)])
            .unwrap();
        assert_eq!(ok, Value::Int(6));
    }

    #[test]
    fn test_equality_is_identity_of_function() {
        let f = add3();
        assert_eq!(Curried::new(f.clone(), 3), Curried::new(f.clone(), 3));
        assert_ne!(Curried::new(f.clone(), 3), Curried::new(f, 2));
        assert_ne!(Curried::new(add3(), 3), Curried::new(add3(), 3));
    }

    #[test]
    fn test_op_composes_right_to_left() {
        let h = inc().op(&dbl());
        assert_eq!(h.arity(), 1);
        assert_eq!(h.call(&[Value::Int(5)]).unwrap(), Value::Int(11));
    }

    #[test]
    fn test_op_takes_arity_of_right_operand() {
        let h = inc().op(&Curried::new(add3(), 3));
        assert_eq!(h.arity(), 3);
        let r = h
            .call(&[Value::Int(1), Value::Int(2), Value::Int(3)])
            .unwrap();
        assert_eq!(r, Value::Int(7));
    }

    #[test]
    fn test_monoid_identity() {
        let f = inc();
        assert_eq!(f.op(&Curried::id()), f);
        assert_eq!(Curried::id().op(&f), f);
        assert!(matches!(
            f.op_all(&[&f, &f, &f, &f]),
            Err(AlgebraError::UnsupportedArity { .. })
        ));
    }

    #[test]
    fn test_fmap_composes_after() {
        let g = Value::Fn(Function::unary("dbl", |x| x.plus(x)));
        let h = inc().fmap(&g).unwrap();
        assert_eq!(h.call(&[Value::Int(5)]).unwrap(), Value::Int(12));
    }

    #[test]
    fn test_fmap_n_takes_max_arity() {
        let sum = Value::Fn(Function::plus());
        let add2 = Curried::new(Function::binary("add2", |a, b| a.plus(b)), 2);
        let h = inc().fmap_n(&sum, &[&add2]).unwrap();
        assert_eq!(h.arity(), 2);
        // inc(1) + add2(1, 10)
        let r = h.call(&[Value::Int(1), Value::Int(10)]).unwrap();
        assert_eq!(r, Value::Int(13));
    }

    #[test]
    fn test_op_mixes_plain_and_curried() {
        let plain = Value::Fn(Function::unary("dbl", |x| x.plus(x)));

        let h = as_curried(op_entry(&inc().into(), &[plain.clone()]).unwrap());
        assert_eq!(h.arity(), 1);
        assert_eq!(h.call(&[Value::Int(5)]).unwrap(), Value::Int(11));

        let h = as_curried(op_entry(&plain, &[inc().into()]).unwrap());
        assert_eq!(h.arity(), 1);
        assert_eq!(h.call(&[Value::Int(5)]).unwrap(), Value::Int(12));

        let add3 = Value::Fn(add3());
        let h = as_curried(op_entry(&inc().into(), &[add3]).unwrap());
        assert_eq!(h.arity(), 2);
    }

    #[test]
    fn test_op_absorbs_identity_of_either_kind() {
        let plain = Value::Fn(Function::unary("dbl", |x| x.plus(x)));
        let id: Value = Curried::identity().into();
        assert_eq!(op_entry(&id, &[plain.clone()]).unwrap(), plain);
        assert_eq!(
            op_entry(&inc().into(), &[Function::identity().into()]).unwrap(),
            Value::Curried(inc())
        );
        assert!(matches!(
            op_entry(&inc().into(), &[Value::Int(1)]),
            Err(AlgebraError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_fmap_n_accepts_plain_operands() {
        let sum = Value::Fn(Function::plus());
        let plain = Value::Fn(Function::unary("dbl", |x| x.plus(x)));
        let h = as_curried(fmap_entry(&inc().into(), &sum, &[plain]).unwrap());
        assert_eq!(h.arity(), 1);
        // inc(5) + dbl(5)
        assert_eq!(h.call(&[Value::Int(5)]).unwrap(), Value::Int(16));
    }

    #[test]
    fn test_fapply_has_arity_one() {
        let maker = Curried::new(
            Function::unary("adder", |x| {
                let x = x.clone();
                Ok(Function::unary("add-x", move |y| x.plus(y)).into())
            }),
            1,
        );
        let h = dbl().fapply(&maker).unwrap();
        assert_eq!(h.arity(), 1);
        assert_eq!(h.call(&[Value::Int(3)]).unwrap(), Value::Int(9));
    }

    #[test]
    fn test_pure_is_constant_of_arity_one() {
        let k = as_curried(inc().pure(Value::Int(9)).unwrap());
        assert_eq!(k.arity(), 1);
        assert_eq!(k.call(&[Value::Nil]).unwrap(), Value::Int(9));
    }

    #[test]
    fn test_fold_reads_nullary_slot() {
        let k = Curried::new(bridge::constant(Value::Int(4)), 0);
        assert_eq!(k.fold().unwrap(), Value::Int(4));
    }

    #[test]
    fn test_curry_and_uncurry() {
        let c = Curried::new(add3(), 3);
        assert_eq!(c.curry(), Value::Curried(c.clone()));
        assert_eq!(c.uncurry(), *c.function());
        let re = as_curried(c.curry_with(1));
        assert_eq!(re.arity(), 1);
        assert_eq!(re.function(), c.function());
    }

    #[test]
    fn test_display() {
        let c = Curried::new(add3(), 3);
        assert_eq!(c.to_string(), "curried-function[arity: 3, #<fn add3>]");
    }
}
