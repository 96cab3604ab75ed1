//! # Element Widths
//!
//! The array engine is written once, generic over [`Element`], and
//! monomorphized for each width:
//!
//! | Kind | Rust type | Boxed as |
//! |------|-----------|----------|
//! | boolean | `bool` | `Value::Bool` |
//! | char | `char` | `Value::Char` |
//! | byte | `i8` | `Value::Byte` |
//! | short | `i16` | `Value::Short` |
//! | int | `i32` | `Value::Int` |
//! | long | `i64` | `Value::Long` |
//! | float | `f32` | `Value::Float` |
//! | double | `f64` | `Value::Double` |
//! | object | `Value` | itself |
//!
//! Numeric widths unbox any numeric value with a primitive cast (the same
//! narrowing a JVM `intValue()` performs). `bool` and `char` only accept their
//! own variant. The object width accepts anything, which is why callables
//! always land in object arrays.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::array::{PrimArray, TypedArray};
use crate::error::AlgebraError;
use crate::value::Value;

/// The element width of an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Boolean,
    Char,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Object,
}

impl ElementKind {
    /// Every width, primitives first.
    pub const ALL: [ElementKind; 9] = [
        ElementKind::Boolean,
        ElementKind::Char,
        ElementKind::Byte,
        ElementKind::Short,
        ElementKind::Int,
        ElementKind::Long,
        ElementKind::Float,
        ElementKind::Double,
        ElementKind::Object,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Boolean => "boolean",
            ElementKind::Char => "char",
            ElementKind::Byte => "byte",
            ElementKind::Short => "short",
            ElementKind::Int => "int",
            ElementKind::Long => "long",
            ElementKind::Float => "float",
            ElementKind::Double => "double",
            ElementKind::Object => "object",
        }
    }

    /// Whether arrays of this width are foldable.
    pub fn is_numeric(self) -> bool {
        !matches!(
            self,
            ElementKind::Boolean | ElementKind::Char | ElementKind::Object
        )
    }

    /// The additive identity of this width, seeding the default `foldmap`.
    /// Non-numeric widths fall back to the empty sum, `Int(0)`.
    pub fn zero(self) -> Value {
        match self {
            ElementKind::Byte => Value::Byte(0),
            ElementKind::Short => Value::Short(0),
            ElementKind::Long => Value::Long(0),
            ElementKind::Float => Value::Float(0.0),
            ElementKind::Double => Value::Double(0.0),
            _ => Value::Int(0),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An array element width.
pub trait Element: Clone + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    const KIND: ElementKind;

    /// Lift an element into a [`Value`].
    fn boxed(&self) -> Value;

    /// Read a [`Value`] back as an element of this width.
    fn unbox(value: Value) -> Result<Self, AlgebraError>;

    fn into_typed(array: PrimArray<Self>) -> TypedArray;

    fn from_typed(array: &TypedArray) -> Option<&PrimArray<Self>>;

    fn from_typed_mut(array: &mut TypedArray) -> Option<&mut PrimArray<Self>>;

    /// Monad `join`. Primitive arrays have no nested representation.
    fn join(array: &PrimArray<Self>) -> PrimArray<Self> {
        array.clone()
    }

    /// Append one `bind` result to the output buffer.
    fn splice(value: Value, out: &mut Vec<Self>) -> Result<(), AlgebraError> {
        let got = value.type_tag().to_string();
        if let Value::Array(typed) = &value {
            if let Some(array) = Self::from_typed(typed) {
                out.extend_from_slice(array.as_slice());
                return Ok(());
            }
        }
        Err(AlgebraError::type_mismatch(
            format!("{}-array", Self::KIND),
            got,
        ))
    }
}

/// Widths that support folding.
pub trait Numeric: Element + Copy + Add<Output = Self> {
    const ZERO: Self;
}

macro_rules! typed_access {
    ($kind:ident) => {
        fn into_typed(array: PrimArray<Self>) -> TypedArray {
            TypedArray::$kind(array)
        }

        fn from_typed(array: &TypedArray) -> Option<&PrimArray<Self>> {
            match array {
                TypedArray::$kind(a) => Some(a),
                _ => None,
            }
        }

        fn from_typed_mut(array: &mut TypedArray) -> Option<&mut PrimArray<Self>> {
            match array {
                TypedArray::$kind(a) => Some(a),
                _ => None,
            }
        }
    };
}

macro_rules! exact_element {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl Element for $ty {
            const KIND: ElementKind = ElementKind::$kind;

            fn boxed(&self) -> Value {
                Value::$variant(*self)
            }

            fn unbox(value: Value) -> Result<Self, AlgebraError> {
                match value {
                    Value::$variant(x) => Ok(x),
                    other => Err(AlgebraError::type_mismatch(
                        ElementKind::$kind.name(),
                        other.to_string(),
                    )),
                }
            }

            typed_access!($kind);
        }
    };
}

macro_rules! numeric_element {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl Element for $ty {
            const KIND: ElementKind = ElementKind::$kind;

            fn boxed(&self) -> Value {
                Value::$variant(*self)
            }

            fn unbox(value: Value) -> Result<Self, AlgebraError> {
                match value {
                    Value::Byte(x) => Ok(x as $ty),
                    Value::Short(x) => Ok(x as $ty),
                    Value::Int(x) => Ok(x as $ty),
                    Value::Long(x) => Ok(x as $ty),
                    Value::Float(x) => Ok(x as $ty),
                    Value::Double(x) => Ok(x as $ty),
                    other => Err(AlgebraError::type_mismatch(
                        ElementKind::$kind.name(),
                        other.to_string(),
                    )),
                }
            }

            typed_access!($kind);
        }

        impl Numeric for $ty {
            const ZERO: Self = 0 as $ty;
        }
    };
}

exact_element!(bool, Boolean, Bool);
exact_element!(char, Char, Char);
numeric_element!(i8, Byte, Byte);
numeric_element!(i16, Short, Short);
numeric_element!(i32, Int, Int);
numeric_element!(i64, Long, Long);
numeric_element!(f32, Float, Float);
numeric_element!(f64, Double, Double);

/// The object width: the fallback used whenever an element may be callable.
impl Element for Value {
    const KIND: ElementKind = ElementKind::Object;

    fn boxed(&self) -> Value {
        self.clone()
    }

    fn unbox(value: Value) -> Result<Self, AlgebraError> {
        Ok(value)
    }

    typed_access!(Object);

    /// Flattens one level: array elements contribute their boxed elements.
    fn join(array: &PrimArray<Self>) -> PrimArray<Self> {
        let mut out = Vec::with_capacity(array.len());
        for value in array.iter() {
            match value {
                Value::Array(inner) => out.extend(inner.to_values()),
                other => out.push(other.clone()),
            }
        }
        PrimArray::from(out)
    }

    fn splice(value: Value, out: &mut Vec<Self>) -> Result<(), AlgebraError> {
        match value {
            Value::Array(inner) => out.extend(inner.to_values()),
            other => out.push(other),
        }
        Ok(())
    }
}
