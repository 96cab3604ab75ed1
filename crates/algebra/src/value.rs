//! # Values
//!
//! Every callable in this crate consumes and produces [`Value`]s. A value is
//! either a boxed primitive, a callable (plain [`Function`] or [`Curried`]),
//! a present `Just` payload, the absent value [`Value::Nil`], or a typed array.
//!
//! The capability table keys its operation sets by [`TypeTag`], the runtime
//! representation of a value.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::array::{PrimArray, TypedArray};
use crate::curry::Curried;
use crate::element::{Element, ElementKind};
use crate::error::AlgebraError;
use crate::function::Function;

/// A dynamically typed value.
#[derive(Debug, Clone)]
pub enum Value {
    /// The canonical absent value (`Nothing`).
    Nil,
    Bool(bool),
    Char(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    /// A plain function.
    Fn(Function),
    /// A curried function value.
    Curried(Curried),
    /// A present optional payload.
    Just(Arc<Value>),
    /// An array of one element width.
    Array(TypedArray),
}

/// Runtime representation of a [`Value`], used as the capability table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeTag {
    Nil,
    Scalar(ElementKind),
    Function,
    Curried,
    Just,
    Array(ElementKind),
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Nil => write!(f, "nil"),
            TypeTag::Scalar(kind) => write!(f, "{}", kind),
            TypeTag::Function => write!(f, "function"),
            TypeTag::Curried => write!(f, "curried-function"),
            TypeTag::Just => write!(f, "just"),
            TypeTag::Array(kind) => write!(f, "{}-array", kind),
        }
    }
}

impl Value {
    /// The representation tag of this value.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Nil => TypeTag::Nil,
            Value::Bool(_) => TypeTag::Scalar(ElementKind::Boolean),
            Value::Char(_) => TypeTag::Scalar(ElementKind::Char),
            Value::Byte(_) => TypeTag::Scalar(ElementKind::Byte),
            Value::Short(_) => TypeTag::Scalar(ElementKind::Short),
            Value::Int(_) => TypeTag::Scalar(ElementKind::Int),
            Value::Long(_) => TypeTag::Scalar(ElementKind::Long),
            Value::Float(_) => TypeTag::Scalar(ElementKind::Float),
            Value::Double(_) => TypeTag::Scalar(ElementKind::Double),
            Value::Fn(_) => TypeTag::Function,
            Value::Curried(_) => TypeTag::Curried,
            Value::Just(_) => TypeTag::Just,
            Value::Array(array) => TypeTag::Array(array.kind()),
        }
    }

    /// Whether this value can be invoked.
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Fn(_) | Value::Curried(_))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Invoke this value with positional arguments.
    pub fn call(&self, args: &[Value]) -> Result<Value, AlgebraError> {
        match self {
            Value::Fn(f) => f.call(args),
            Value::Curried(c) => c.call(args),
            other => Err(AlgebraError::NotCallable(other.to_string())),
        }
    }

    /// Numeric addition with width promotion.
    ///
    /// Equal widths stay in that width (integers wrap). Mixed integer widths
    /// widen to `Long`; any floating operand in a mixed pair yields `Double`.
    pub fn plus(&self, other: &Value) -> Result<Value, AlgebraError> {
        use Value::*;
        let sum = match (self, other) {
            (Byte(a), Byte(b)) => Byte(a.wrapping_add(*b)),
            (Short(a), Short(b)) => Short(a.wrapping_add(*b)),
            (Int(a), Int(b)) => Int(a.wrapping_add(*b)),
            (Long(a), Long(b)) => Long(a.wrapping_add(*b)),
            (Float(a), Float(b)) => Float(a + b),
            (Double(a), Double(b)) => Double(a + b),
            (a, b) => match (a.integral(), b.integral()) {
                (Some(x), Some(y)) => Long(x.wrapping_add(y)),
                _ => match (a.floating(), b.floating()) {
                    (Some(x), Some(y)) => Double(x + y),
                    (None, _) => return Err(AlgebraError::type_mismatch("number", a.to_string())),
                    (_, None) => return Err(AlgebraError::type_mismatch("number", b.to_string())),
                },
            },
        };
        Ok(sum)
    }

    fn integral(&self) -> Option<i64> {
        match *self {
            Value::Byte(x) => Some(x as i64),
            Value::Short(x) => Some(x as i64),
            Value::Int(x) => Some(x as i64),
            Value::Long(x) => Some(x),
            _ => None,
        }
    }

    fn floating(&self) -> Option<f64> {
        match *self {
            Value::Float(x) => Some(x as f64),
            Value::Double(x) => Some(x),
            _ => self.integral().map(|x| x as f64),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Nil, Nil) => true,
            (Bool(a), Bool(b)) => a == b,
            (Char(a), Char(b)) => a == b,
            (Byte(a), Byte(b)) => a == b,
            (Short(a), Short(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Long(a), Long(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Double(a), Double(b)) => a == b,
            (Fn(a), Fn(b)) => a == b,
            (Curried(a), Curried(b)) => a == b,
            (Just(a), Just(b)) => a == b,
            (Array(a), Array(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(x) => write!(f, "{}", x),
            Value::Char(x) => write!(f, "{}", x),
            Value::Byte(x) => write!(f, "{}", x),
            Value::Short(x) => write!(f, "{}", x),
            Value::Int(x) => write!(f, "{}", x),
            Value::Long(x) => write!(f, "{}", x),
            Value::Float(x) => write!(f, "{}", x),
            Value::Double(x) => write!(f, "{}", x),
            Value::Fn(func) => write!(f, "{}", func),
            Value::Curried(c) => write!(f, "{}", c),
            Value::Just(v) => write!(f, "just[{}]", v),
            Value::Array(a) => write!(f, "{}", a),
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<bool> for Value {
    fn from(x: bool) -> Self {
        Value::Bool(x)
    }
}

impl From<char> for Value {
    fn from(x: char) -> Self {
        Value::Char(x)
    }
}

impl From<i8> for Value {
    fn from(x: i8) -> Self {
        Value::Byte(x)
    }
}

impl From<i16> for Value {
    fn from(x: i16) -> Self {
        Value::Short(x)
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Value::Int(x)
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Long(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Double(x)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Fn(f)
    }
}

impl From<Curried> for Value {
    fn from(c: Curried) -> Self {
        Value::Curried(c)
    }
}

impl From<TypedArray> for Value {
    fn from(a: TypedArray) -> Self {
        Value::Array(a)
    }
}

impl<E: Element> From<PrimArray<E>> for Value {
    fn from(a: PrimArray<E>) -> Self {
        Value::Array(E::into_typed(a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_same_width_stays() {
        assert_eq!(Value::Int(2).plus(&Value::Int(3)).unwrap(), Value::Int(5));
        assert_eq!(
            Value::Float(1.5).plus(&Value::Float(1.0)).unwrap(),
            Value::Float(2.5)
        );
    }

    #[test]
    fn test_plus_promotes_mixed_widths() {
        assert_eq!(Value::Byte(1).plus(&Value::Int(2)).unwrap(), Value::Long(3));
        assert_eq!(
            Value::Int(1).plus(&Value::Double(0.5)).unwrap(),
            Value::Double(1.5)
        );
    }

    #[test]
    fn test_plus_wraps_integers() {
        assert_eq!(
            Value::Byte(i8::MAX).plus(&Value::Byte(1)).unwrap(),
            Value::Byte(i8::MIN)
        );
    }

    #[test]
    fn test_plus_rejects_non_numbers() {
        let err = Value::Bool(true).plus(&Value::Int(1)).unwrap_err();
        assert!(matches!(err, AlgebraError::TypeMismatch { .. }));
    }

    #[test]
    fn test_call_non_callable() {
        let err = Value::Int(1).call(&[]).unwrap_err();
        assert_eq!(err, AlgebraError::NotCallable("1".to_string()));
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(Value::Nil.type_tag(), TypeTag::Nil);
        assert_eq!(Value::Long(1).type_tag(), TypeTag::Scalar(ElementKind::Long));
        let array: Value = PrimArray::from(vec![1i16, 2]).into();
        assert_eq!(array.type_tag(), TypeTag::Array(ElementKind::Short));
        assert_eq!(array.type_tag().to_string(), "short-array");
    }

    #[test]
    fn test_just_display() {
        let just = Value::Just(Arc::new(Value::Int(3)));
        assert_eq!(just.to_string(), "just[3]");
    }
}
