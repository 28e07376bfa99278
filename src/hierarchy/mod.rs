//! Hierarchy resolution: binding every ancestor's type parameters for a root type.
//!
//! Given a root such as `demo.Pair<java.lang.Integer, java.lang.String>`, the
//! [`HierarchyWalker`] seeds the root's [`VariableTable`] from the explicit arguments and then
//! walks up the supertype graph. Each supertype expression is substituted with the current
//! table, and the resulting arguments seed the ancestor's own table. The outcome is a
//! [`MappedHierarchy`]: one table per visited type, in discovery order.
//!
//! # Rules
//!
//! - An empty argument list is raw usage. Each parameter is bound to a variable referencing
//!   itself, which later renders as the parameter name.
//! - A non-empty argument list must match the declared parameter count.
//! - An ancestor reached through several paths is walked once. Every later path must bind it
//!   to a structurally equal table.
//! - A type reached again while it is still on the walked path is a cycle.
//!
//! Mapped hierarchies are stored by a [`HierarchyStorage`]. The default
//! [`CachedHierarchyStorage`] keeps them for as long as the owning context lives.
//!
//! # Examples
//!
//! ```rust
//! use genscope::declaration::{DeclarationTable, TypeBuilder};
//! use genscope::hierarchy::{HierarchyWalker, VariableMapper};
//! use genscope::shape::{TypeId, TypeShape};
//!
//! let table = DeclarationTable::new();
//! table.insert(TypeBuilder::new("demo.Entry").parameters(["X"]).build()?);
//! table.insert(
//!     TypeBuilder::new("demo.Pair")
//!         .parameters(["A", "B"])
//!         .extends("demo.Entry<B>")
//!         .build()?,
//! );
//!
//! let root = TypeShape::parameterized(
//!     "demo.Pair",
//!     vec![TypeShape::named("java.lang.Integer"), TypeShape::named("java.lang.String")],
//! );
//! let hierarchy = HierarchyWalker::new().map_type_variables(&root, &table)?;
//!
//! let entry = hierarchy.table(&TypeId::new("demo.Entry")).unwrap();
//! assert_eq!(entry.get("X"), Some(&TypeShape::named("java.lang.String")));
//! # Ok::<(), genscope::Error>(())
//! ```

mod storage;
mod table;
mod walker;

pub use storage::{CachedHierarchyStorage, HierarchyStorage};
pub use table::{MappedHierarchy, VariableTable};
pub use walker::{HierarchyWalker, VariableMapper};
