//! # Typed Arrays
//!
//! [`PrimArray<E>`] is a contiguous, fixed-length, mutable sequence of one
//! element width. It is never resized: results of the engine are allocated at
//! exactly their computed size. [`TypedArray`] erases the width so arrays can
//! travel inside a [`Value`].

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementKind};
use crate::value::Value;

/// A fixed-length array of one element width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrimArray<E> {
    data: Box<[E]>,
}

impl<E> PrimArray<E> {
    /// The length-0 array.
    pub fn empty() -> Self {
        Self {
            data: Vec::new().into_boxed_slice(),
        }
    }

    pub fn as_slice(&self) -> &[E] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [E] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<E> {
        self.data.into_vec()
    }
}

impl<E: Element> PrimArray<E> {
    /// The element width of this array.
    pub fn kind(&self) -> ElementKind {
        E::KIND
    }
}

impl<E> Deref for PrimArray<E> {
    type Target = [E];

    fn deref(&self) -> &[E] {
        &self.data
    }
}

impl<E> DerefMut for PrimArray<E> {
    fn deref_mut(&mut self) -> &mut [E] {
        &mut self.data
    }
}

impl<E> From<Vec<E>> for PrimArray<E> {
    fn from(data: Vec<E>) -> Self {
        Self {
            data: data.into_boxed_slice(),
        }
    }
}

impl<E, const N: usize> From<[E; N]> for PrimArray<E> {
    fn from(data: [E; N]) -> Self {
        Self::from(Vec::from(data))
    }
}

impl<E: Clone> From<&[E]> for PrimArray<E> {
    fn from(data: &[E]) -> Self {
        Self::from(data.to_vec())
    }
}

impl<E> FromIterator<E> for PrimArray<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<E: Element> fmt::Display for PrimArray<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", E::KIND)?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "]")
    }
}

/// An array of any width.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedArray {
    Boolean(PrimArray<bool>),
    Char(PrimArray<char>),
    Byte(PrimArray<i8>),
    Short(PrimArray<i16>),
    Int(PrimArray<i32>),
    Long(PrimArray<i64>),
    Float(PrimArray<f32>),
    Double(PrimArray<f64>),
    Object(PrimArray<Value>),
}

/// Evaluate `$body` with `$a` bound to the width-specific array.
macro_rules! with_array {
    ($array:expr, $a:ident => $body:expr) => {
        match $array {
            TypedArray::Boolean($a) => $body,
            TypedArray::Char($a) => $body,
            TypedArray::Byte($a) => $body,
            TypedArray::Short($a) => $body,
            TypedArray::Int($a) => $body,
            TypedArray::Long($a) => $body,
            TypedArray::Float($a) => $body,
            TypedArray::Double($a) => $body,
            TypedArray::Object($a) => $body,
        }
    };
}

impl TypedArray {
    pub fn kind(&self) -> ElementKind {
        with_array!(self, a => a.kind())
    }

    pub fn len(&self) -> usize {
        with_array!(self, a => a.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Box every element.
    pub fn to_values(&self) -> Vec<Value> {
        with_array!(self, a => a.iter().map(Element::boxed).collect())
    }
}

impl fmt::Display for TypedArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_array!(self, a => write!(f, "{}", a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_is_fixed_length_but_mutable() {
        let mut a = PrimArray::from([1i32, 2, 3]);
        a[1] = 20;
        assert_eq!(a.len(), 3);
        assert_eq!(a.as_slice(), &[1, 20, 3]);
    }

    #[test]
    fn test_empty_array() {
        let a: PrimArray<f64> = PrimArray::empty();
        assert!(a.is_empty());
        assert_eq!(a.kind(), ElementKind::Double);
    }

    #[test]
    fn test_display() {
        let a = PrimArray::from([1i64, 2]);
        assert_eq!(a.to_string(), "long[1, 2]");
        let b: PrimArray<bool> = PrimArray::empty();
        assert_eq!(b.to_string(), "boolean[]");
    }

    #[test]
    fn test_typed_array_boxes_elements() {
        let typed = TypedArray::Char(PrimArray::from(['a', 'b']));
        assert_eq!(typed.kind(), ElementKind::Char);
        assert_eq!(typed.to_values(), vec![Value::Char('a'), Value::Char('b')]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let a = PrimArray::from([1i32, 2, 3]);
        assert_eq!(serde_json::to_string(&a).unwrap(), "[1,2,3]");
        let back: PrimArray<i32> = serde_json::from_str("[4,5]").unwrap();
        assert_eq!(back.as_slice(), &[4, 5]);
    }
}
