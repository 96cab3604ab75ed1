//! Smoke tests for the algebra crate.
//!
//! These tests verify that every representation is reachable through the
//! value-level operations:
//! - Arrays of every width map, combine and fold
//! - Functions and curried values compose and curry
//! - Maybe values short-circuit

use compositional_algebra::dispatch;
use compositional_algebra::{
    AlgebraError, ElementKind, Function, Maybe, PrimArray, TypeTag, TypedArray, Value,
};

fn inc() -> Value {
    Function::unary("inc", |x| x.plus(&Value::Int(1))).into()
}

fn dbl() -> Value {
    Function::unary("dbl", |x| x.plus(x)).into()
}

fn ints(xs: &[i32]) -> Value {
    PrimArray::from(xs).into()
}

// ============================================================================
// Array Tests
// ============================================================================

#[test]
fn smoke_fmap_every_numeric_width() {
    let arrays: Vec<Value> = vec![
        PrimArray::from([1i8, 2]).into(),
        PrimArray::from([1i16, 2]).into(),
        PrimArray::from([1i32, 2]).into(),
        PrimArray::from([1i64, 2]).into(),
        PrimArray::from([1.0f32, 2.0]).into(),
        PrimArray::from([1.0f64, 2.0]).into(),
    ];
    for a in &arrays {
        let mapped = dispatch::fmap(a, &dbl()).unwrap();
        assert_eq!(mapped.type_tag(), a.type_tag());
        let sum = dispatch::fold(&mapped).unwrap();
        assert_eq!(sum.to_string(), "6");
    }
}

#[test]
fn smoke_boolean_and_char_arrays() {
    let not: Value = Function::unary("not", |x| match x {
        Value::Bool(b) => Ok(Value::Bool(!b)),
        other => Err(AlgebraError::type_mismatch("boolean", other.to_string())),
    })
    .into();
    let bools: Value = PrimArray::from([true, false]).into();
    assert_eq!(
        dispatch::fmap(&bools, &not).unwrap(),
        Value::from(PrimArray::from([false, true]))
    );

    let chars: Value = PrimArray::from(['a', 'b']).into();
    let more: Value = PrimArray::from(['c']).into();
    assert_eq!(dispatch::op(&chars, &more).unwrap().to_string(), "char[a, b, c]");
}

#[test]
fn smoke_cross_apply() {
    let fs: Value = PrimArray::from(vec![inc(), dbl()]).into();
    let r = dispatch::fapply(&fs, &ints(&[1, 2, 3])).unwrap();
    assert_eq!(r, ints(&[2, 3, 4, 2, 4, 6]));
}

#[test]
fn smoke_cross_apply_into() {
    let fs: Value = PrimArray::from(vec![inc(), dbl()]).into();
    let mut dst = ints(&[0; 6]);
    dispatch::fapply_into(&mut dst, &fs, &ints(&[1, 2, 3]), &[]).unwrap();
    assert_eq!(dst, ints(&[2, 3, 4, 2, 4, 6]));
}

#[test]
fn smoke_pure_lifts_callables_into_object_arrays() {
    let template = ints(&[0]);
    let lifted = dispatch::pure(&template, inc()).unwrap();
    assert_eq!(lifted.type_tag(), TypeTag::Array(ElementKind::Object));

    let lifted = dispatch::pure_all(&template, Value::Int(1), &[Value::Int(2)]).unwrap();
    assert_eq!(lifted, ints(&[1, 2]));
}

#[test]
fn smoke_bind_and_join() {
    let twice: Value = Function::unary("twice", |x| {
        Ok(PrimArray::from(vec![x.clone(), x.clone()]).into())
    })
    .into();
    let objs: Value = PrimArray::from(vec![Value::Int(1), Value::Int(2)]).into();
    let bound = dispatch::bind(&objs, &twice).unwrap();
    match bound {
        Value::Array(TypedArray::Object(a)) => assert_eq!(a.len(), 4),
        other => panic!("expected object array, got {}", other),
    }

    let ints_join = dispatch::join(&ints(&[1, 2])).unwrap();
    assert_eq!(ints_join, ints(&[1, 2]));
}

#[test]
fn smoke_foldmap_defaults_to_sum() {
    let r = dispatch::foldmap(&ints(&[1, 2, 3]), &dbl()).unwrap();
    assert_eq!(r, Value::Int(12));
}

// ============================================================================
// Function Tests
// ============================================================================

#[test]
fn smoke_function_fmap_is_composition() {
    let h = dispatch::fmap(&dbl(), &inc()).unwrap();
    assert_eq!(h.call(&[Value::Int(5)]).unwrap(), Value::Int(11));
}

#[test]
fn smoke_function_pure_and_join() {
    let k = dispatch::pure(&inc(), Value::Int(3)).unwrap();
    assert_eq!(k.call(&[Value::Int(100)]).unwrap(), Value::Int(3));

    let adder: Value = Function::unary("adder", |x| {
        let x = x.clone();
        Ok(Function::unary("add-x", move |y| x.plus(y)).into())
    })
    .into();
    let j = dispatch::join(&adder).unwrap();
    assert_eq!(j.call(&[Value::Int(4)]).unwrap(), Value::Int(8));
}

#[test]
fn smoke_function_monoid() {
    let id = dispatch::id(&inc()).unwrap();
    assert_eq!(dispatch::op(&inc(), &id).unwrap().call(&[Value::Int(1)]).unwrap(), Value::Int(2));
}

// ============================================================================
// Curried Tests
// ============================================================================

#[test]
fn smoke_curried_call_protocol() {
    let add3: Value = Function::ternary("add3", |a, b, c| a.plus(b)?.plus(c)).into();
    let c = dispatch::curry_with(&add3, 3).unwrap();
    assert_eq!(dispatch::arity(&c).unwrap(), 3);

    let step = c.call(&[Value::Int(1)]).unwrap();
    assert_eq!(dispatch::arity(&step).unwrap(), 2);
    assert_eq!(
        step.call(&[Value::Int(2), Value::Int(3)]).unwrap(),
        Value::Int(6)
    );
}

#[test]
fn smoke_curried_display() {
    let add3: Value = Function::ternary("add3", |a, b, c| a.plus(b)?.plus(c)).into();
    let c = dispatch::curry_with(&add3, 3).unwrap();
    assert_eq!(c.to_string(), "curried-function[arity: 3, #<fn add3>]");
}

// ============================================================================
// Maybe Tests
// ============================================================================

#[test]
fn smoke_maybe_through_table() {
    let just: Value = Maybe::just(Value::Int(1)).into();
    assert_eq!(
        dispatch::fmap(&just, &inc()).unwrap(),
        Value::from(Maybe::just(Value::Int(2)))
    );
    assert_eq!(dispatch::fmap(&Value::Nil, &inc()).unwrap(), Value::Nil);

    let fs: Value = Maybe::just(inc()).into();
    assert_eq!(dispatch::fapply(&fs, &Value::Nil).unwrap(), Value::Nil);
    assert_eq!(dispatch::pure(&Value::Nil, Value::Int(1)).unwrap(), just);
}

#[test]
fn smoke_maybe_has_no_magma() {
    let just: Value = Maybe::just(Value::Int(1)).into();
    assert!(matches!(
        dispatch::op(&just, &just),
        Err(AlgebraError::MissingCapability { .. })
    ));
}
