//! Resolution contexts and the registry managing their modules.
//!
//! A [`ResolvingContext`] bundles four replaceable modules with the declarations they work
//! on:
//!
//! - [`crate::hierarchy::HierarchyStorage`] - caches mapped hierarchies
//! - [`crate::render::ResolverStorage`] - the ordered resolver chain
//! - [`crate::render::ResolverPicker`] - selects a resolver per shape
//! - [`crate::hierarchy::VariableMapper`] - walks a root's supertype graph
//!
//! The [`ModuleRegistry`] owns one factory slot per module and hands out the active context.
//! Contexts are never mutated: replacing a module builds a new one, either immediately
//! (auto-refresh) or on the next [`ModuleRegistry::refresh_context`].
//!
//! # Examples
//!
//! ```rust
//! use genscope::prelude::*;
//!
//! let table = DeclarationTable::new();
//! table.insert(TypeBuilder::new("java.lang.Object").build()?);
//! table.insert(
//!     TypeBuilder::new("demo.Box")
//!         .parameters(["T"])
//!         .extends("java.lang.Object")
//!         .field("items", "java.util.List<T>")
//!         .build()?,
//! );
//!
//! let registry = ModuleRegistry::new(table.into_provider());
//! let context = registry.context();
//!
//! let root = TypeShape::parameterized("demo.Box", vec![TypeShape::named("java.lang.Integer")]);
//! let rendered = context
//!     .members()
//!     .field_type(&root, &TypeId::new("demo.Box"), "items")?;
//! assert_eq!(rendered, "java.util.List<java.lang.Integer>");
//! # Ok::<(), genscope::Error>(())
//! ```

mod members;
mod registry;
mod resolving;

pub use members::{MemberResolver, ResolvedMethod};
pub use registry::{
    HierarchyStorageFactory, ModuleKind, ModuleRegistry, ModuleSeed, ResolverPickerFactory,
    ResolverStorageFactory, VariableMapperFactory,
};
pub use resolving::ResolvingContext;
