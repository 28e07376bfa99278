use thiserror::Error;

use crate::shape::TypeId;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every variant is raised synchronously to the caller and none of them is transient: retrying
/// the same call with the same modules yields the same error. Recovery means changing the
/// declarations, the request, or the modules installed in the
/// [`crate::context::ModuleRegistry`].
///
/// # Error Categories
///
/// ## Resolution Errors
/// - [`Error::ArityMismatch`] - Type argument count disagrees with the declared parameters
/// - [`Error::ConflictingDiamondBinding`] - An ancestor reached twice with different bindings
/// - [`Error::CyclicHierarchy`] - A type is its own ancestor
/// - [`Error::TypeNotFound`] - The declaration provider does not know a walked type
///
/// ## Rendering Errors
/// - [`Error::UnsupportedShape`] - No resolver in the chain claims a shape
/// - [`Error::UnresolvableMember`] - Member is not part of the root's hierarchy
///
/// ## Input Errors
/// - [`Error::Malformed`] - Type expression text that does not parse
///
/// # Examples
///
/// ```rust
/// use genscope::{prelude::*, Error};
///
/// let table = DeclarationTable::new();
/// table.insert(TypeBuilder::new("demo.Box").parameters(["T"]).build()?);
///
/// let registry = ModuleRegistry::new(table.into_provider());
/// let context = registry.context();
///
/// let arguments = vec![
///     TypeShape::named("java.lang.Integer"),
///     TypeShape::named("java.lang.Long"),
/// ];
/// match context.resolve_with_arguments(&TypeId::new("demo.Box"), arguments) {
///     Ok(hierarchy) => println!("{} types visited", hierarchy.len()),
///     Err(Error::ArityMismatch { expected, actual, .. }) => {
///         eprintln!("expected {expected} arguments, got {actual}");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// # Ok::<(), genscope::Error>(())
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The number of type arguments does not match the declared type parameters.
    ///
    /// Raised for explicit root arguments as well as for supertype expressions supplied by
    /// the declaration provider. Empty argument lists are raw usage and never trigger it.
    #[error("Type '{type_id}' declares {expected} type parameter(s) but {actual} argument(s) were supplied")]
    ArityMismatch {
        /// The type whose parameters were being bound
        type_id: TypeId,
        /// Number of declared type parameters
        expected: usize,
        /// Number of supplied type arguments
        actual: usize,
    },

    /// The requested member is not declared on the root type's visible hierarchy.
    #[error("Member '{member}' can not be resolved against the hierarchy of '{type_id}'")]
    UnresolvableMember {
        /// The root type the member was requested for
        type_id: TypeId,
        /// Human readable member description
        member: String,
    },

    /// An ancestor reachable through two or more paths received different bindings.
    ///
    /// The two offending binding tables are carried in their rendered debug form.
    #[error("Ancestor '{type_id}' is bound inconsistently: {first} vs {second}")]
    ConflictingDiamondBinding {
        /// The ancestor reached more than once
        type_id: TypeId,
        /// Bindings recorded on the first path
        first: String,
        /// Bindings computed on the conflicting path
        second: String,
    },

    /// No resolver in the chain claims the shape, or the shape is not valid where it is used.
    #[error("Unsupported type shape - {0}")]
    UnsupportedShape(String),

    /// The declaration provider has no declaration for this type.
    #[error("Failed to find type declaration - {0}")]
    TypeNotFound(TypeId),

    /// The declaration graph loops back onto a type that is still being walked.
    #[error("Type '{0}' is part of a cyclic inheritance chain")]
    CyclicHierarchy(TypeId),

    /// A type expression could not be parsed.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },
}
