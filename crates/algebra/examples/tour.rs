//! A tour of the abstractions over every representation.
//!
//! Run with: cargo run --example tour
//!
//! This example demonstrates:
//! - Mapping, cross application and folding over typed arrays
//! - Functions as functors (composition) and monads
//! - Curried partial application and composition
//! - Maybe short-circuiting
//!
//! Set `RUST_LOG=compositional_algebra=trace` to see dispatch decisions.

use compositional_algebra::dispatch;
use compositional_algebra::{AlgebraError, Function, Maybe, PrimArray, Value};

fn main() -> Result<(), AlgebraError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    println!("=== Compositional Algebra ===\n");

    let inc: Value = Function::unary("inc", |x| x.plus(&Value::Int(1))).into();
    let dbl: Value = Function::unary("dbl", |x| x.plus(x)).into();

    // -------------------------------------------------------------------------
    // Arrays
    // -------------------------------------------------------------------------
    println!("1. Arrays");
    println!("---------");

    let xs: Value = PrimArray::from([1i32, 2, 3]).into();
    println!("  xs                = {}", xs);
    println!("  fmap(xs, inc)     = {}", dispatch::fmap(&xs, &inc)?);

    let fs: Value = PrimArray::from(vec![inc.clone(), dbl.clone()]).into();
    println!("  fapply([inc, dbl]) = {}", dispatch::fapply(&fs, &xs)?);
    println!("  op(xs, xs)        = {}", dispatch::op(&xs, &xs)?);
    println!("  fold(xs)          = {}", dispatch::fold(&xs)?);
    println!("  foldmap(xs, dbl)  = {}", dispatch::foldmap(&xs, &dbl)?);

    let bools: Value = PrimArray::from([true, false]).into();
    match dispatch::fold(&bools) {
        Ok(v) => println!("  fold(bools)       = {}", v),
        Err(e) => println!("  fold(bools)       : {}", e),
    }
    println!();

    // -------------------------------------------------------------------------
    // Functions
    // -------------------------------------------------------------------------
    println!("2. Functions");
    println!("------------");

    let h = dispatch::fmap(&dbl, &inc)?;
    println!("  fmap(dbl, inc)    = {}", h);
    println!("  ... applied to 5  = {}", h.call(&[Value::Int(5)])?);

    let k = dispatch::pure(&inc, Value::Int(42))?;
    println!("  pure(42)(0)       = {}", k.call(&[Value::Int(0)])?);
    println!();

    // -------------------------------------------------------------------------
    // Curried functions
    // -------------------------------------------------------------------------
    println!("3. Curried functions");
    println!("--------------------");

    let add3: Value = Function::ternary("add3", |a, b, c| a.plus(b)?.plus(c)).into();
    let curried = dispatch::curry_with(&add3, 3)?;
    let step = curried.call(&[Value::Int(1)])?;
    println!("  curry(add3, 3)    = {}", curried);
    println!("  ... (1)           = {}", step);
    println!("  ... (1)(2, 3)     = {}", step.call(&[Value::Int(2), Value::Int(3)])?);

    let cinc = dispatch::curry(&inc)?;
    let cdbl = dispatch::curry(&dbl)?;
    let composed = dispatch::op(&cinc, &cdbl)?;
    println!("  op(inc, dbl)(5)   = {}", composed.call(&[Value::Int(5)])?);
    let mixed = dispatch::op(&cinc, &dbl)?;
    println!("  op(inc, plain dbl)(5) = {}", mixed.call(&[Value::Int(5)])?);
    println!();

    // -------------------------------------------------------------------------
    // Maybe
    // -------------------------------------------------------------------------
    println!("4. Maybe");
    println!("--------");

    let just: Value = Maybe::just(Value::Int(1)).into();
    let fs: Value = Maybe::just(inc.clone()).into();
    println!("  fapply(just inc, just 1) = {}", dispatch::fapply(&fs, &just)?);
    println!("  fapply(just inc, nil)    = {}", dispatch::fapply(&fs, &Value::Nil)?);

    Ok(())
}
