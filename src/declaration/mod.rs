//! Type declarations and the provider interface the hierarchy walker consumes.
//!
//! The walker never inspects types itself. Everything it needs about a class or interface
//! (declared type parameters, the direct supertype expression and the direct superinterface
//! expressions) comes from a [`DeclarationProvider`]. Member lookups used for rendering fields
//! and method signatures are optional parts of the same trait.
//!
//! # Key Components
//!
//! - [`DeclarationProvider`] - Narrow read-only interface over a set of declarations
//! - [`DeclarationTable`] - Concurrent in-memory provider backed by plain data
//! - [`TypeBuilder`] - Fluent construction of [`TypeDeclaration`]s from text expressions
//!
//! # Examples
//!
//! ```rust
//! use genscope::declaration::{DeclarationProvider, DeclarationTable, TypeBuilder};
//! use genscope::shape::TypeId;
//!
//! let table = DeclarationTable::new();
//! table.insert(
//!     TypeBuilder::new("demo.Entry")
//!         .parameters(["X"])
//!         .implements("java.lang.Comparable<X>")
//!         .build()?,
//! );
//!
//! let entry = TypeId::new("demo.Entry");
//! assert_eq!(table.declared_parameters(&entry)?, vec!["X"]);
//! assert_eq!(table.superinterface_expressions(&entry)?.len(), 1);
//! # Ok::<(), genscope::Error>(())
//! ```

mod builder;
mod table;
mod types;

pub use builder::{MethodBuilder, ShapeSource, TypeBuilder};
pub use table::{DeclarationTable, TypeDeclarationRc};
pub use types::{FieldDeclaration, MethodDeclaration, TypeDeclaration};

use crate::{
    shape::{TypeId, TypeShape},
    Result,
};

/// Read-only source of type declarations
///
/// Implementations must be deterministic: the same type id always yields the same
/// parameters and expressions, and superinterfaces are returned in a stable order.
pub trait DeclarationProvider: Send + Sync {
    /// The declared type parameter names of `type_id`, in order
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if the type is not declared
    fn declared_parameters(&self, type_id: &TypeId) -> Result<Vec<String>>;

    /// The direct supertype expression of `type_id`, `None` if it has none
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if the type is not declared
    fn supertype_expression(&self, type_id: &TypeId) -> Result<Option<TypeShape>>;

    /// The direct superinterface expressions of `type_id`
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeNotFound`] if the type is not declared
    fn superinterface_expressions(&self, type_id: &TypeId) -> Result<Vec<TypeShape>>;

    /// A field declared directly on `type_id`
    fn field(&self, _type_id: &TypeId, _name: &str) -> Option<FieldDeclaration> {
        None
    }

    /// A method declared directly on `type_id`
    fn method(&self, _type_id: &TypeId, _name: &str) -> Option<MethodDeclaration> {
        None
    }
}
