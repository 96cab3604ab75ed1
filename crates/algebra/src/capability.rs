//! # Capability Table
//!
//! Value-level operations are routed through a table keyed by [`TypeTag`]:
//! the representation of the value, not a hardcoded match. Each entry is an
//! [`OperationSet`] with one optional slot per [`Abstraction`].
//!
//! ## Design
//!
//! - Every representation module contributes its own operation set
//!   (`engine` for each array width, `bridge` for functions, `curry` for
//!   curried values, `maybe` for `Just` and `Nil`).
//! - [`CapabilityTable::standard`] assembles all of them.
//! - The process-wide table is built once and is read-only afterwards.
//!   [`install`] may replace the standard table *before* first use;
//!   [`capabilities`] installs the standard table on first access.
//!
//! ```
//! use compositional_algebra::capability::capabilities;
//! use compositional_algebra::{Abstraction, ElementKind, TypeTag};
//!
//! let table = capabilities();
//! assert!(table.can_handle(TypeTag::Array(ElementKind::Int), Abstraction::Foldable));
//! assert!(!table.can_handle(TypeTag::Array(ElementKind::Boolean), Abstraction::Foldable));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use tracing::debug;

use crate::algebra::Abstraction;
use crate::element::ElementKind;
use crate::error::AlgebraError;
use crate::value::{TypeTag, Value};
use crate::{bridge, curry, engine, maybe};

type Fallible<T> = Result<T, AlgebraError>;

// ============================================================================
// Operation Sets
// ============================================================================

#[derive(Clone, Copy)]
pub struct FunctorOps {
    /// `(fa, f, rest)`
    pub fmap: fn(&Value, &Value, &[Value]) -> Fallible<Value>,
}

#[derive(Clone, Copy)]
pub struct PseudoFunctorOps {
    /// `(fa, f, rest)`, writes into `fa`
    pub fmap_in_place: fn(&mut Value, &Value, &[Value]) -> Fallible<()>,
}

#[derive(Clone, Copy)]
pub struct ApplicativeOps {
    /// `(template, value, more)`
    pub pure: fn(&Value, Value, &[Value]) -> Fallible<Value>,
    /// `(fs, fa, rest)`
    pub fapply: fn(&Value, &Value, &[Value]) -> Fallible<Value>,
}

#[derive(Clone, Copy)]
pub struct PseudoApplicativeOps {
    /// `(dst, fs, fa, rest)`
    pub fapply_into: fn(&mut Value, &Value, &Value, &[Value]) -> Fallible<()>,
}

#[derive(Clone, Copy)]
pub struct MonadOps {
    pub join: fn(&Value) -> Fallible<Value>,
    /// `(ma, f)`
    pub bind: fn(&Value, &Value) -> Fallible<Value>,
}

#[derive(Clone, Copy)]
pub struct FoldableOps {
    pub fold: fn(&Value) -> Fallible<Value>,
    /// `(x, f, init)`
    pub fold_with: fn(&Value, &Value, Value) -> Fallible<Value>,
    /// `(x, g, f, init, rest)`
    pub foldmap: fn(&Value, &Value, &Value, Value, &[Value]) -> Fallible<Value>,
}

#[derive(Clone, Copy)]
pub struct MagmaOps {
    /// `(x, rest)`
    pub op: fn(&Value, &[Value]) -> Fallible<Value>,
}

#[derive(Clone, Copy)]
pub struct MonoidOps {
    /// The neutral element for the template's representation.
    pub id: fn(&Value) -> Value,
}

#[derive(Clone, Copy)]
pub struct CurryOps {
    pub arity: fn(&Value) -> usize,
    /// `None` selects the default arity.
    pub curry: fn(&Value, Option<usize>) -> Value,
    pub uncurry: fn(&Value) -> Value,
}

/// The operations one representation supports.
#[derive(Clone, Copy, Default)]
pub struct OperationSet {
    pub functor: Option<FunctorOps>,
    pub pseudo_functor: Option<PseudoFunctorOps>,
    pub applicative: Option<ApplicativeOps>,
    pub pseudo_applicative: Option<PseudoApplicativeOps>,
    pub monad: Option<MonadOps>,
    pub foldable: Option<FoldableOps>,
    pub magma: Option<MagmaOps>,
    pub monoid: Option<MonoidOps>,
    pub curry: Option<CurryOps>,
}

impl OperationSet {
    pub fn supports(&self, abstraction: Abstraction) -> bool {
        match abstraction {
            Abstraction::Functor => self.functor.is_some(),
            Abstraction::PseudoFunctor => self.pseudo_functor.is_some(),
            Abstraction::Applicative => self.applicative.is_some(),
            Abstraction::PseudoApplicative => self.pseudo_applicative.is_some(),
            Abstraction::Monad => self.monad.is_some(),
            Abstraction::Foldable => self.foldable.is_some(),
            Abstraction::Magma => self.magma.is_some(),
            Abstraction::Monoid => self.monoid.is_some(),
            Abstraction::Curry => self.curry.is_some(),
        }
    }

    /// Every abstraction with an entry.
    pub fn abstractions(&self) -> Vec<Abstraction> {
        ALL_ABSTRACTIONS
            .iter()
            .copied()
            .filter(|a| self.supports(*a))
            .collect()
    }
}

const ALL_ABSTRACTIONS: [Abstraction; 9] = [
    Abstraction::Functor,
    Abstraction::PseudoFunctor,
    Abstraction::Applicative,
    Abstraction::PseudoApplicative,
    Abstraction::Monad,
    Abstraction::Foldable,
    Abstraction::Magma,
    Abstraction::Monoid,
    Abstraction::Curry,
];

impl fmt::Debug for OperationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationSet")
            .field("abstractions", &self.abstractions())
            .finish()
    }
}

// ============================================================================
// CapabilityTable
// ============================================================================

/// Operation sets indexed by representation.
#[derive(Clone, Default)]
pub struct CapabilityTable {
    sets: HashMap<TypeTag, OperationSet>,
}

impl CapabilityTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            sets: HashMap::new(),
        }
    }

    /// The table with every built-in representation registered.
    pub fn standard() -> Self {
        let mut table = Self::new();
        table
            .register(TypeTag::Array(ElementKind::Boolean), engine::operation_set::<bool>())
            .register(TypeTag::Array(ElementKind::Char), engine::operation_set::<char>())
            .register(TypeTag::Array(ElementKind::Byte), engine::numeric_operation_set::<i8>())
            .register(TypeTag::Array(ElementKind::Short), engine::numeric_operation_set::<i16>())
            .register(TypeTag::Array(ElementKind::Int), engine::numeric_operation_set::<i32>())
            .register(TypeTag::Array(ElementKind::Long), engine::numeric_operation_set::<i64>())
            .register(TypeTag::Array(ElementKind::Float), engine::numeric_operation_set::<f32>())
            .register(TypeTag::Array(ElementKind::Double), engine::numeric_operation_set::<f64>())
            .register(TypeTag::Array(ElementKind::Object), engine::operation_set::<Value>())
            .register(TypeTag::Function, bridge::operation_set())
            .register(TypeTag::Curried, curry::operation_set())
            .register(TypeTag::Just, maybe::operation_set())
            .register(TypeTag::Nil, maybe::operation_set());
        debug!(representations = table.len(), "built standard capability table");
        table
    }

    /// Register (or replace) the operation set of a representation.
    pub fn register(&mut self, tag: TypeTag, ops: OperationSet) -> &mut Self {
        self.sets.insert(tag, ops);
        self
    }

    pub fn get(&self, tag: TypeTag) -> Option<&OperationSet> {
        self.sets.get(&tag)
    }

    /// Whether `tag` has an entry for `abstraction`.
    pub fn can_handle(&self, tag: TypeTag, abstraction: Abstraction) -> bool {
        self.get(tag).is_some_and(|ops| ops.supports(abstraction))
    }

    /// Merge two tables; `other` wins on conflict.
    pub fn merge(mut self, other: Self) -> Self {
        self.sets.extend(other.sets);
        self
    }

    /// Registered representations.
    pub fn tags(&self) -> Vec<TypeTag> {
        self.sets.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl fmt::Debug for CapabilityTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityTable")
            .field("representations", &self.sets.len())
            .finish()
    }
}

// ============================================================================
// Process-wide table
// ============================================================================

static TABLE: OnceLock<CapabilityTable> = OnceLock::new();

/// Install the process-wide table. Fails (returning the table) once a table
/// is in place, including the standard one installed by [`capabilities`].
pub fn install(table: CapabilityTable) -> Result<(), CapabilityTable> {
    let representations = table.len();
    TABLE.set(table)?;
    debug!(representations, "installed capability table");
    Ok(())
}

/// The process-wide table, installing [`CapabilityTable::standard`] on first use.
pub fn capabilities() -> &'static CapabilityTable {
    TABLE.get_or_init(CapabilityTable::standard)
}
