//! # Compositional Algebra
//!
//! Algebraic abstractions over a small set of concrete representations:
//!
//! - **Arrays**: typed primitive arrays of one width, with a per-width engine
//!   for mapping, cross application, concatenation and folding
//! - **Functions**: plain functions as reader-style functors and monads
//! - **Curried functions**: arity-aware partial application and composition
//! - **Maybe**: an optional value that short-circuits on `Nothing`
//!
//! Each representation implements the typed traits in [`algebra`]
//! (Functor, PseudoFunctor, Applicative, PseudoApplicative, Monad, Foldable,
//! Magma, Monoid, Curry) and registers the same operations in the
//! [`capability`] table, so [`dispatch`] can route a dynamic [`Value`] by its
//! representation.
//!
//! ## Design Philosophy
//!
//! Operations are total or fail with an [`AlgebraError`]; nothing retries
//! and nothing is logged above `trace`/`debug`. Results are fresh values:
//! only the explicitly in-place operations mutate, and they take `&mut`.

pub mod algebra;
pub mod array;
pub mod bridge;
pub mod capability;
pub mod curry;
pub mod dispatch;
pub mod element;
pub mod engine;
pub mod error;
pub mod function;
pub mod maybe;
pub mod value;

// Re-export key types at crate root for convenience
pub use algebra::{
    Abstraction, Applicative, Curry, Foldable, Functor, Magma, Monad, Monoid, PseudoApplicative,
    PseudoFunctor, MAX_OPERANDS,
};
pub use array::{PrimArray, TypedArray};
pub use capability::{capabilities, CapabilityTable, OperationSet};
pub use curry::{Curried, DEFAULT_CURRY_ARITY};
pub use element::{Element, ElementKind, Numeric};
pub use error::AlgebraError;
pub use function::{Callable, Function, Signature};
pub use maybe::Maybe;
pub use value::{TypeTag, Value};
