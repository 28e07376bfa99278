//! Type shapes: the value model exchanged between declarations, the hierarchy walker and the
//! renderer.
//!
//! A [`TypeShape`] describes one occurrence of a type. It is a recursive tagged union:
//!
//! - **Named** - a plain or parameterized reference to a declared type (`java.util.List<T>`)
//! - **Array** - an array of another shape, nested to any depth (`int[][]`)
//! - **Variable** - a type variable, identified by its declaration site *and* name, so two
//!   ancestors that both declare a `T` never collide
//! - **Wildcard** - `?`, `? extends ...` or `? super ...` with generic bound lists
//!
//! Shapes are built either programmatically or from text with the [`ShapeParser`]. The parser
//! needs a [`VariableScope`] to know which identifiers denote type variables.
//!
//! # Examples
//!
//! ```rust
//! use genscope::shape::{parse_shape, TypeShape, VariableScope};
//!
//! let scope = VariableScope::for_type("demo.Model", ["T"]);
//! let shape = parse_shape("java.util.Set<? extends T>", &scope)?;
//!
//! assert!(shape.is_parameterized());
//! assert_eq!(shape.to_string(), "java.util.Set<? extends T>");
//! # Ok::<(), genscope::Error>(())
//! ```

mod parser;
mod types;

pub use parser::{ShapeParser, VariableScope};
pub use types::{TypeId, TypeShape, VariableSite};

use crate::Result;

/// Parse a `TypeShape` from a textual type expression
///
/// ## Arguments
/// * 'text'    - The type expression, e.g. `java.util.Map<K, V[]>`
/// * 'scope'   - The type variables visible to the expression
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if the expression can not be parsed
pub fn parse_shape(text: &str, scope: &VariableScope) -> Result<TypeShape> {
    ShapeParser::new(text, scope).parse()
}
