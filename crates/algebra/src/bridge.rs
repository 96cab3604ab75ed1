//! # Function Bridge
//!
//! The reader-style abstractions over anything [`Callable`], defined once and
//! shared by plain functions and curried values.
//!
//! | Operation | Meaning |
//! |-----------|---------|
//! | `compose(f, g)` | `x -> f(g(x))` (Functor `fmap`) |
//! | `constant(v)` | `_ -> v` (Applicative `pure`) |
//! | `fapply(fs, g)` | `x -> fs(x)(g(x))` |
//! | `join(f)` | `x -> f(x)(x)` |
//! | `bind(f, g)` | `join(compose(g, f))` |
//! | `fold(f)` | `f()`, a function holds one slot |
//!
//! Derived functions take the signature of the function whose arguments they
//! receive, so default currying sees through composition.

use tracing::trace;

use crate::algebra::{
    check_operands, Applicative, Curry, Foldable, Functor, Magma, Monad, Monoid,
};
use crate::capability::{
    ApplicativeOps, CurryOps, FoldableOps, FunctorOps, MagmaOps, MonadOps, MonoidOps,
    OperationSet,
};
use crate::curry::{self, Curried, DEFAULT_CURRY_ARITY};
use crate::error::AlgebraError;
use crate::function::{Callable, Function, Signature};
use crate::value::Value;

// ============================================================================
// Shared semantics
// ============================================================================

/// `outer ∘ inner`: call `inner`, then `outer` with its result.
pub fn compose<A, B>(outer: A, inner: B) -> Function
where
    A: Callable + 'static,
    B: Callable + 'static,
{
    let name = format!("{}∘{}", outer.describe(), inner.describe());
    trace!(%name, "compose");
    Function::new(name, inner.signature(), move |args| {
        outer.invoke(&[inner.invoke(args)?])
    })
}

/// `x -> outer(first(x), rest[0](x), ..)`.
pub fn compose_n<A, B>(outer: A, first: B, rest: Vec<Value>) -> Function
where
    A: Callable + 'static,
    B: Callable + 'static,
{
    if rest.is_empty() {
        return compose(outer, first);
    }
    let name = format!("{}∘({}, ..)", outer.describe(), first.describe());
    Function::new(name, first.signature(), move |args| {
        let mut results = Vec::with_capacity(1 + rest.len());
        results.push(first.invoke(args)?);
        for g in &rest {
            results.push(g.invoke(args)?);
        }
        outer.invoke(&results)
    })
}

/// A function of any arguments that returns `value`.
pub fn constant(value: Value) -> Function {
    Function::new(format!("const {}", value), Signature::any(), move |_| {
        Ok(value.clone())
    })
}

/// `x -> fs(x)(values(x), rest[0](x), ..)`.
pub fn fapply<F, A>(fs: F, values: A, rest: Vec<Value>) -> Function
where
    F: Callable + 'static,
    A: Callable + 'static,
{
    let name = format!("<*> {}", fs.describe());
    Function::new(name, values.signature(), move |args| {
        let g = fs.invoke(args)?;
        let mut xs = Vec::with_capacity(1 + rest.len());
        xs.push(values.invoke(args)?);
        for r in &rest {
            xs.push(r.invoke(args)?);
        }
        g.call(&xs)
    })
}

/// `x -> f(x)(x)`.
pub fn join<F: Callable + 'static>(f: F) -> Function {
    let name = format!("join {}", f.describe());
    Function::new(name, f.signature(), move |args| f.invoke(args)?.call(args))
}

/// `x -> g(f(x))(x)`.
pub fn bind<F: Callable + 'static>(f: F, g: Value) -> Function {
    join(compose(g, f))
}

/// The single slot a function holds: its zero-argument result.
pub fn fold<F: Callable>(f: &F) -> Result<Value, AlgebraError> {
    f.invoke(&[])
}

pub fn fold_with<F: Callable>(f: &F, op: &Value, init: Value) -> Result<Value, AlgebraError> {
    op.call(&[init, fold(f)?])
}

/// `op(init, g(first(), rest[0](), ..))`.
pub fn foldmap_with<F: Callable>(
    first: &F,
    rest: &[Value],
    g: &Value,
    op: &Value,
    init: Value,
) -> Result<Value, AlgebraError> {
    check_operands("foldmap", 1 + rest.len())?;
    let mut slots = Vec::with_capacity(1 + rest.len());
    slots.push(fold(first)?);
    for r in rest {
        slots.push(fold(r)?);
    }
    op.call(&[init, g.call(&slots)?])
}

/// Default currying arity for a signature.
pub(crate) fn default_arity(signature: &Signature) -> usize {
    DEFAULT_CURRY_ARITY.min(signature.max_declared())
}

// ============================================================================
// Abstractions for Function
// ============================================================================

fn boxed(fs: &[&Function]) -> Vec<Value> {
    fs.iter().map(|f| Value::Fn((*f).clone())).collect()
}

impl Functor for Function {
    fn fmap_n(&self, f: &Value, rest: &[&Self]) -> Result<Self, AlgebraError> {
        check_operands("fmap", 1 + rest.len())?;
        Ok(compose_n(f.clone(), self.clone(), boxed(rest)))
    }
}

impl Applicative for Function {
    type Fns = Function;

    fn pure(&self, value: Value) -> Result<Value, AlgebraError> {
        Ok(constant(value).into())
    }

    fn fapply_n(&self, fs: &Function, rest: &[&Self]) -> Result<Self, AlgebraError> {
        check_operands("fapply", 1 + rest.len())?;
        Ok(fapply(fs.clone(), self.clone(), boxed(rest)))
    }
}

impl Monad for Function {
    fn join(&self) -> Result<Self, AlgebraError> {
        Ok(join(self.clone()))
    }

    fn bind(&self, f: &Value) -> Result<Self, AlgebraError> {
        Ok(bind(self.clone(), f.clone()))
    }
}

impl Foldable for Function {
    fn fold(&self) -> Result<Value, AlgebraError> {
        fold(self)
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
        foldmap_with(self, &boxed(rest), g, f, init)
    }
}

impl Magma for Function {
    /// Composition, with the identity function absorbed on either side.
    fn op(&self, other: &Self) -> Self {
        if self.is_identity() {
            return other.clone();
        }
        if other.is_identity() {
            return self.clone();
        }
        compose(self.clone(), other.clone())
    }

    fn op_all(&self, rest: &[&Self]) -> Result<Self, AlgebraError> {
        check_operands("op", 1 + rest.len())?;
        Ok(rest.iter().fold(self.clone(), |acc, x| acc.op(x)))
    }
}

impl Monoid for Function {
    fn id() -> Self {
        Function::identity()
    }
}

impl Curry for Function {
    fn arity(&self) -> usize {
        self.signature().max_declared()
    }

    fn curry(&self) -> Value {
        self.curry_with(default_arity(self.signature()))
    }

    fn curry_with(&self, arity: usize) -> Value {
        if arity == 0 {
            return Value::Fn(self.clone());
        }
        Curried::new(self.clone(), arity).into()
    }

    fn uncurry(&self) -> Function {
        self.clone()
    }
}

// ============================================================================
// Capability table entry
// ============================================================================

fn function(value: &Value) -> Result<&Function, AlgebraError> {
    match value {
        Value::Fn(f) => Ok(f),
        other => Err(AlgebraError::type_mismatch(
            "function",
            other.type_tag().to_string(),
        )),
    }
}

/// `pure` on callables lifts exactly one value.
pub(crate) fn check_single_pure(more: &[Value]) -> Result<(), AlgebraError> {
    if !more.is_empty() {
        return Err(AlgebraError::UnsupportedArity {
            operation: "pure",
            got: 1 + more.len(),
            max: 1,
        });
    }
    Ok(())
}

fn fmap_entry(fa: &Value, f: &Value, rest: &[Value]) -> Result<Value, AlgebraError> {
    check_operands("fmap", 1 + rest.len())?;
    Ok(compose_n(f.clone(), function(fa)?.clone(), rest.to_vec()).into())
}

fn pure_entry(_template: &Value, value: Value, more: &[Value]) -> Result<Value, AlgebraError> {
    check_single_pure(more)?;
    Ok(constant(value).into())
}

fn fapply_entry(fs: &Value, fa: &Value, rest: &[Value]) -> Result<Value, AlgebraError> {
    check_operands("fapply", 1 + rest.len())?;
    Ok(fapply(fs.clone(), function(fa)?.clone(), rest.to_vec()).into())
}

fn join_entry(ma: &Value) -> Result<Value, AlgebraError> {
    Ok(join(function(ma)?.clone()).into())
}

fn bind_entry(ma: &Value, f: &Value) -> Result<Value, AlgebraError> {
    Ok(bind(function(ma)?.clone(), f.clone()).into())
}

fn fold_entry(x: &Value) -> Result<Value, AlgebraError> {
    fold(function(x)?)
}

fn fold_with_entry(x: &Value, f: &Value, init: Value) -> Result<Value, AlgebraError> {
    fold_with(function(x)?, f, init)
}

fn foldmap_entry(
    x: &Value,
    g: &Value,
    f: &Value,
    init: Value,
    rest: &[Value],
) -> Result<Value, AlgebraError> {
    foldmap_with(function(x)?, rest, g, f, init)
}

/// Curried operands may appear anywhere; see [`curry::compose_all`].
fn op_entry(x: &Value, rest: &[Value]) -> Result<Value, AlgebraError> {
    curry::compose_all(x, rest)
}

fn id_entry(_template: &Value) -> Value {
    Function::identity().into()
}

fn arity_entry(v: &Value) -> usize {
    match v {
        Value::Fn(f) => f.arity(),
        _ => 0,
    }
}

fn curry_entry(v: &Value, arity: Option<usize>) -> Value {
    match v {
        Value::Fn(f) => match arity {
            Some(n) => f.curry_with(n),
            None => f.curry(),
        },
        other => other.clone(),
    }
}

fn uncurry_entry(v: &Value) -> Value {
    v.clone()
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

    fn inc() -> Function {
        Function::unary("inc", |x| x.plus(&Value::Int(1)))
    }

    fn dbl() -> Function {
        Function::unary("dbl", |x| x.plus(x))
    }

    fn call1(f: &Function, x: i32) -> Value {
        f.call(&[Value::Int(x)]).unwrap()
    }

    #[test]
    fn test_compose_applies_inner_first() {
        let h = compose(inc(), dbl());
        assert_eq!(call1(&h, 5), Value::Int(11));
        assert_eq!(h.name(), "inc∘dbl");
        assert_eq!(h.signature(), &Signature::exactly(1));
    }

    #[test]
    fn test_fmap_on_function_is_composition() {
        let h = dbl().fmap(&Value::Fn(inc())).unwrap();
        assert_eq!(call1(&h, 5), Value::Int(11));
    }

    #[test]
    fn test_fmap_n_shares_arguments() {
        let sum = Value::Fn(Function::plus());
        let h = inc().fmap_n(&sum, &[&dbl()]).unwrap();
        // (5 + 1) + (5 + 5)
        assert_eq!(call1(&h, 5), Value::Int(16));
    }

    #[test]
    fn test_pure_is_constant() {
        let f = inc();
        let k = f.pure(Value::Int(7)).unwrap();
        assert_eq!(k.call(&[]).unwrap(), Value::Int(7));
        assert_eq!(k.call(&[Value::Int(1), Value::Int(2)]).unwrap(), Value::Int(7));
    }

    #[test]
    fn test_fapply_reader() {
        // fs(x) = (y -> x + y), so fapply(fs, dbl)(x) = x + 2x
        let fs = Function::unary("adder", |x| {
            let x = x.clone();
            Ok(Function::unary("add-x", move |y| x.plus(y)).into())
        });
        let h = dbl().fapply(&fs).unwrap();
        assert_eq!(call1(&h, 4), Value::Int(12));
    }

    #[test]
    fn test_join_calls_twice_with_same_argument() {
        let outer = Function::unary("outer", |x| {
            let x = x.clone();
            Ok(Function::unary("inner", move |y| x.plus(y)).into())
        });
        let j = outer.join().unwrap();
        assert_eq!(call1(&j, 3), Value::Int(6));
    }

    #[test]
    fn test_bind_is_join_after_fmap() {
        // g(y) = (z -> y + z), so bind(inc, g)(x) = (x + 1) + x
        let g = Value::Fn(Function::unary("g", |y| {
            let y = y.clone();
            Ok(Function::unary("add-y", move |z| y.plus(z)).into())
        }));
        let h = inc().bind(&g).unwrap();
        assert_eq!(call1(&h, 2), Value::Int(5));
    }

    #[test]
    fn test_fold_reads_the_single_slot() {
        let k = constant(Value::Int(4));
        assert_eq!(k.fold().unwrap(), Value::Int(4));
        let plus = Value::Fn(Function::plus());
        assert_eq!(k.fold_with(&plus, Value::Int(1)).unwrap(), Value::Int(5));
        assert_eq!(k.foldmap(&Value::Fn(dbl())).unwrap(), Value::Int(8));
    }

    #[test]
    fn test_fold_of_unary_function_fails() {
        assert!(matches!(
            inc().fold(),
            Err(AlgebraError::ArityMismatch { got: 0, .. })
        ));
    }

    #[test]
    fn test_magma_identity_absorbs() {
        let f = inc();
        assert_eq!(f.op(&Function::id()), f);
        assert_eq!(Function::id().op(&f), f);
        let h = f.op(&dbl());
        assert_eq!(call1(&h, 5), Value::Int(11));
    }

    #[test]
    fn test_op_all_limit() {
        let f = inc();
        let h = f.op_all(&[&f, &f, &f]).unwrap();
        assert_eq!(call1(&h, 0), Value::Int(4));
        assert!(matches!(
            f.op_all(&[&f, &f, &f, &f]),
            Err(AlgebraError::UnsupportedArity { got: 5, .. })
        ));
    }

    #[test]
    fn test_default_curry_arity() {
        let add3 = Function::ternary("add3", |a, b, c| a.plus(b)?.plus(c));
        assert_eq!(add3.arity(), 3);
        match add3.curry() {
            Value::Curried(c) => assert_eq!(c.arity(), 2),
            other => panic!("expected curried, got {}", other),
        }
        // one-argument functions curry at arity 1
        assert!(matches!(inc().curry(), Value::Curried(c) if c.arity() == 1));
    }

    #[test]
    fn test_curry_degenerates_for_nullary() {
        let k = Function::new("k", Signature::exactly(0), |_| Ok(Value::Int(1)));
        assert!(matches!(k.curry(), Value::Fn(_)));
        let f = inc();
        assert_eq!(f.curry_with(0), Value::Fn(f.clone()));
    }

    #[test]
    fn test_pure_entry_rejects_extra_values() {
        let err = pure_entry(&Value::Nil, Value::Int(1), &[Value::Int(2)]).unwrap_err();
        assert_eq!(
            err,
            AlgebraError::UnsupportedArity {
                operation: "pure",
                got: 2,
                max: 1
            }
        );
    }
}
