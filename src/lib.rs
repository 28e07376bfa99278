// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![allow(clippy::too_many_arguments)]

//! # genscope
//!
//! Resolution of generic type parameters across a whole inheritance hierarchy, and rendering
//! of the resolved types as text.
//!
//! Given a root type with known type arguments, such as `demo.Pair<Integer, String>`,
//! `genscope` determines for every ancestor class and interface what each of *that
//! ancestor's* declared parameters is bound to. This holds even when subclasses reorder,
//! partially bind or leave parameters free. Field types and method signatures declared
//! anywhere in the hierarchy can then be rendered as seen from the root.
//!
//! ## Features
//!
//! - **Recursive shape model** - named, parameterized, array, variable and wildcard types
//! - **Hierarchy walking** - binding propagation with arity, diamond and cycle checks
//! - **Pluggable rendering** - an ordered chain of resolvers selected by a picker
//! - **Replaceable modules** - swap storage, chain, picker or walker at runtime
//! - **Declarations as data** - a concurrent declaration table with a text front-end
//!
//! ## Architecture
//!
//! - [`shape`] - The [`shape::TypeShape`] value model and its text parser
//! - [`declaration`] - The [`declaration::DeclarationProvider`] trait and an in-memory table
//! - [`hierarchy`] - The walker, per-type binding tables and their storage
//! - [`render`] - Shape resolvers, the picker and the resolver chain
//! - [`context`] - The resolving context, member rendering and the module registry
//!
//! ## Quick Start
//!
//! ```rust
//! use genscope::prelude::*;
//!
//! let table = DeclarationTable::new();
//! table.insert(TypeBuilder::new("java.lang.Object").build()?);
//! table.insert(
//!     TypeBuilder::new("java.lang.Comparable")
//!         .parameters(["T"])
//!         .method("compareTo", |m| m.parameter("T").returns("int"))
//!         .build()?,
//! );
//! table.insert(
//!     TypeBuilder::new("demo.Entry")
//!         .parameters(["X"])
//!         .extends("java.lang.Object")
//!         .implements("java.lang.Comparable<X>")
//!         .build()?,
//! );
//! table.insert(
//!     TypeBuilder::new("demo.Pair")
//!         .parameters(["A", "B"])
//!         .extends("demo.Entry<B>")
//!         .field("values", "java.util.List<A>")
//!         .build()?,
//! );
//!
//! let registry = ModuleRegistry::new(table.into_provider());
//! let context = registry.context();
//!
//! let root = TypeShape::parameterized(
//!     "demo.Pair",
//!     vec![TypeShape::named("java.lang.Integer"), TypeShape::named("java.lang.String")],
//! );
//! let members = context.members();
//!
//! assert_eq!(
//!     members.field_type(&root, &TypeId::new("demo.Pair"), "values")?,
//!     "java.util.List<java.lang.Integer>"
//! );
//! assert_eq!(
//!     members.parameter_types(&root, &TypeId::new("java.lang.Comparable"), "compareTo")?,
//!     vec!["java.lang.String"]
//! );
//! # Ok::<(), genscope::Error>(())
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: module replacements and context refreshes at `info`,
//! module selection and cache misses at `debug`, every bound ancestor at `trace`. No
//! subscriber is installed by the library.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T>`]. See [`Error`] for the possible failures.

#[macro_use]
pub(crate) mod macros;

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use genscope::prelude::*;
///
/// let table = DeclarationTable::new();
/// let registry = ModuleRegistry::new(table.into_provider());
/// assert!(registry.is_auto_refresh());
/// ```
pub mod prelude;

pub mod context;
pub mod declaration;
pub mod hierarchy;
pub mod render;
pub mod shape;

/// `genscope` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always
/// [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `genscope` Error type
///
/// The main error type for all operations in this crate.
///
/// # Example
///
/// ```rust
/// use genscope::{shape::{parse_shape, VariableScope}, Error};
///
/// match parse_shape("java.util.List<", &VariableScope::empty()) {
///     Ok(shape) => println!("Parsed {shape}"),
///     Err(Error::Malformed { message, .. }) => println!("Malformed: {message}"),
///     Err(e) => println!("Error: {e}"),
/// }
/// ```
pub use error::Error;

/// Options shared by all modules of a resolving context.
pub use render::ResolverOptions;
