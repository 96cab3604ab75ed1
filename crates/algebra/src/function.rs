//! # Functions
//!
//! A [`Function`] is a shared callable body plus a [`Signature`] listing the
//! parameter counts it accepts. The signature is supplied at construction and
//! stands in for runtime arity introspection: default currying reads it to
//! pick an arity.
//!
//! Equality is **identity** of the body. Two functions built from the same
//! closure source are different functions; clones of one function are equal.
//!
//! ```rust
//! use compositional_algebra::{Function, Value};
//!
//! let inc = Function::unary("inc", |x| x.plus(&Value::Int(1)));
//! assert_eq!(inc.call(&[Value::Int(4)]).unwrap(), Value::Int(5));
//! assert!(inc.call(&[]).is_err());
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use crate::error::AlgebraError;
use crate::value::Value;

/// The body of a function.
pub type Body = dyn Fn(&[Value]) -> Result<Value, AlgebraError> + Send + Sync;

/// Parameter counts a callable accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Signature {
    /// Exact counts, sorted and deduplicated.
    fixed: Vec<usize>,
    /// Minimum count of a rest-parameter form.
    variadic: Option<usize>,
}

impl Signature {
    /// Accepts exactly the given counts.
    pub fn fixed(counts: impl IntoIterator<Item = usize>) -> Self {
        let mut fixed: Vec<usize> = counts.into_iter().collect();
        fixed.sort_unstable();
        fixed.dedup();
        Self {
            fixed,
            variadic: None,
        }
    }

    pub fn exactly(count: usize) -> Self {
        Self::fixed([count])
    }

    /// Accepts `min` or more arguments.
    pub fn variadic(min: usize) -> Self {
        Self {
            fixed: Vec::new(),
            variadic: Some(min),
        }
    }

    /// Accepts any number of arguments.
    pub fn any() -> Self {
        Self::variadic(0)
    }

    /// Add a rest-parameter form to a fixed signature.
    pub fn with_variadic(mut self, min: usize) -> Self {
        self.variadic = Some(min);
        self
    }

    pub fn accepts(&self, count: usize) -> bool {
        self.fixed.binary_search(&count).is_ok() || self.variadic.is_some_and(|min| count >= min)
    }

    /// Largest declared parameter count (a rest form counts its minimum).
    pub fn max_declared(&self) -> usize {
        self.fixed
            .last()
            .copied()
            .into_iter()
            .chain(self.variadic)
            .max()
            .unwrap_or(0)
    }

    pub fn fixed_counts(&self) -> &[usize] {
        &self.fixed
    }

    pub fn variadic_min(&self) -> Option<usize> {
        self.variadic
    }

    /// The signature left after binding `bound` leading arguments.
    pub fn after(&self, bound: usize) -> Self {
        Self {
            fixed: self
                .fixed
                .iter()
                .filter(|&&c| c >= bound)
                .map(|c| c - bound)
                .collect(),
            variadic: self.variadic.map(|min| min.saturating_sub(bound)),
        }
    }
}

/// Anything that can be invoked with positional [`Value`] arguments.
pub trait Callable: Send + Sync {
    fn invoke(&self, args: &[Value]) -> Result<Value, AlgebraError>;

    /// Parameter counts this callable accepts.
    fn signature(&self) -> Signature;

    /// Printable description used in names of derived functions.
    fn describe(&self) -> String;
}

/// A plain function value.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    signature: Signature,
    body: Arc<Body>,
}

impl Function {
    pub fn new<F>(name: impl Into<Arc<str>>, signature: Signature, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, AlgebraError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            signature,
            body: Arc::new(body),
        }
    }

    pub fn unary<F>(name: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, AlgebraError> + Send + Sync + 'static,
    {
        Self::new(name, Signature::exactly(1), move |args| f(&args[0]))
    }

    pub fn binary<F>(name: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<Value, AlgebraError> + Send + Sync + 'static,
    {
        Self::new(name, Signature::exactly(2), move |args| f(&args[0], &args[1]))
    }

    pub fn ternary<F>(name: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(&Value, &Value, &Value) -> Result<Value, AlgebraError> + Send + Sync + 'static,
    {
        Self::new(name, Signature::exactly(3), move |args| {
            f(&args[0], &args[1], &args[2])
        })
    }

    /// A function accepting `min` or more arguments.
    pub fn variadic<F>(name: impl Into<Arc<str>>, min: usize, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, AlgebraError> + Send + Sync + 'static,
    {
        Self::new(name, Signature::variadic(min), f)
    }

    /// The process-wide identity function.
    ///
    /// Every call returns a clone of the same function, so identity checks
    /// (and the Monoid laws built on them) hold across call sites.
    pub fn identity() -> Function {
        static IDENTITY: OnceLock<Function> = OnceLock::new();
        IDENTITY
            .get_or_init(|| Function::unary("identity", |x| Ok(x.clone())))
            .clone()
    }

    /// Variadic numeric addition; `+` with no arguments is `0`.
    pub fn plus() -> Function {
        static PLUS: OnceLock<Function> = OnceLock::new();
        PLUS.get_or_init(|| {
            Function::variadic("+", 0, |args| match args.split_first() {
                None => Ok(Value::Int(0)),
                Some((first, rest)) => rest
                    .iter()
                    .try_fold(first.clone(), |acc, x| acc.plus(x)),
            })
        })
        .clone()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Invoke the function. Unaccepted parameter counts fail with
    /// [`AlgebraError::ArityMismatch`] before the body runs.
    pub fn call(&self, args: &[Value]) -> Result<Value, AlgebraError> {
        if !self.signature.accepts(args.len()) {
            return Err(AlgebraError::ArityMismatch {
                name: self.name.to_string(),
                got: args.len(),
            });
        }
        (self.body)(args)
    }

    /// Bind leading arguments, producing a new function.
    pub fn partial(&self, bound: Vec<Value>) -> Function {
        if bound.is_empty() {
            return self.clone();
        }
        let signature = self.signature.after(bound.len());
        let inner = self.clone();
        Function::new(self.name.clone(), signature, move |args| {
            let mut all = Vec::with_capacity(bound.len() + args.len());
            all.extend_from_slice(&bound);
            all.extend_from_slice(args);
            inner.call(&all)
        })
    }

    pub fn is_identity(&self) -> bool {
        *self == Function::identity()
    }

    fn address(&self) -> *const () {
        Arc::as_ptr(&self.body) as *const ()
    }
}

impl Callable for Function {
    fn invoke(&self, args: &[Value]) -> Result<Value, AlgebraError> {
        self.call(args)
    }

    fn signature(&self) -> Signature {
        self.signature.clone()
    }

    fn describe(&self) -> String {
        self.name.to_string()
    }
}

impl Callable for Value {
    fn invoke(&self, args: &[Value]) -> Result<Value, AlgebraError> {
        self.call(args)
    }

    fn signature(&self) -> Signature {
        match self {
            Value::Fn(f) => f.signature.clone(),
            Value::Curried(_) => Signature::any(),
            _ => Signature::default(),
        }
    }

    fn describe(&self) -> String {
        match self {
            Value::Fn(f) => f.name.to_string(),
            Value::Curried(c) => c.function().name().to_string(),
            other => other.to_string(),
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.address(), other.address())
    }
}

impl Eq for Function {}

impl Hash for Function {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<fn {}>", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add3() -> Function {
        Function::ternary("add3", |a, b, c| a.plus(b)?.plus(c))
    }

    #[test]
    fn test_signature_accepts() {
        let sig = Signature::fixed([3, 1]).with_variadic(5);
        assert_eq!(sig.fixed_counts(), &[1, 3]);
        assert!(sig.accepts(1));
        assert!(!sig.accepts(2));
        assert!(sig.accepts(3));
        assert!(!sig.accepts(4));
        assert!(sig.accepts(7));
        assert_eq!(sig.max_declared(), 5);
    }

    #[test]
    fn test_signature_after_binding() {
        let sig = Signature::fixed([1, 3]).after(2);
        assert_eq!(sig.fixed_counts(), &[1]);
        assert_eq!(Signature::variadic(1).after(3).variadic_min(), Some(0));
        assert_eq!(Signature::default().max_declared(), 0);
    }

    #[test]
    fn test_call_checks_arity() {
        let f = add3();
        let sum = f
            .call(&[Value::Int(1), Value::Int(2), Value::Int(3)])
            .unwrap();
        assert_eq!(sum, Value::Int(6));

        let err = f.call(&[Value::Int(1)]).unwrap_err();
        assert_eq!(
            err,
            AlgebraError::ArityMismatch {
                name: "add3".to_string(),
                got: 1
            }
        );
    }

    #[test]
    fn test_partial_binds_leading_arguments() {
        let f = add3().partial(vec![Value::Int(10)]);
        assert_eq!(f.signature().fixed_counts(), &[2]);
        assert_eq!(
            f.call(&[Value::Int(1), Value::Int(2)]).unwrap(),
            Value::Int(13)
        );
    }

    #[test]
    fn test_equality_is_identity() {
        let f = add3();
        let g = add3();
        assert_eq!(f, f.clone());
        assert_ne!(f, g);
        assert!(Function::identity().is_identity());
        assert!(!f.is_identity());
    }

    #[test]
    fn test_plus_is_variadic() {
        let plus = Function::plus();
        assert_eq!(plus.call(&[]).unwrap(), Value::Int(0));
        assert_eq!(
            plus.call(&[Value::Int(1), Value::Int(2), Value::Int(3)])
                .unwrap(),
            Value::Int(6)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(add3().to_string(), "#<fn add3>");
    }
}
