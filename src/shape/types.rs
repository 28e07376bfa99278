use std::{fmt, sync::Arc};

/// Qualified identifier of a named type, e.g. `java.util.List`
///
/// Cloning is cheap, the name is shared behind an `Arc<str>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(Arc<str>);

impl TypeId {
    /// Create a new `TypeId` from its qualified name
    ///
    /// ## Arguments
    /// * 'name' - The fully qualified name of the type
    pub fn new(name: impl AsRef<str>) -> Self {
        TypeId(Arc::from(name.as_ref()))
    }

    /// The fully qualified name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name without its qualifying path
    ///
    /// Everything up to the last `.` (package separator) or `$` (nested type separator) is
    /// stripped: `java.util.Map$Entry` becomes `Entry`.
    #[must_use]
    pub fn short_name(&self) -> &str {
        match self.0.rfind(['.', '$']) {
            Some(index) => &self.0[index + 1..],
            None => &self.0,
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeId {
    fn from(name: &str) -> Self {
        TypeId::new(name)
    }
}

impl From<String> for TypeId {
    fn from(name: String) -> Self {
        TypeId(Arc::from(name))
    }
}

/// The declaration that introduces a type variable
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VariableSite {
    /// Type parameter of a generic class or interface
    Type(TypeId),
    /// Type parameter of a generic method
    Method {
        /// The type declaring the method
        owner: TypeId,
        /// The method name
        method: String,
    },
}

impl VariableSite {
    /// The type this site belongs to (the declaring type for method sites)
    #[must_use]
    pub fn owner(&self) -> &TypeId {
        match self {
            VariableSite::Type(type_id) => type_id,
            VariableSite::Method { owner, .. } => owner,
        }
    }
}

impl fmt::Display for VariableSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableSite::Type(type_id) => write!(f, "{type_id}"),
            VariableSite::Method { owner, method } => write!(f, "{owner}#{method}"),
        }
    }
}

/// Represents a single type occurrence: a field type, a parameter, a supertype expression or
/// a resolved binding
///
/// Shapes are plain values. Two shapes are equal if their variant and all of their fields
/// match recursively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// A named type, optionally with type arguments
    ///
    /// Empty `type_arguments` mean the type is either not generic or used raw.
    Named {
        /// The referenced type
        type_id: TypeId,
        /// The actual type arguments, in declaration order
        type_arguments: Vec<TypeShape>,
    },
    /// Array of the contained element shape
    Array(Box<TypeShape>),
    /// Reference to a declared type variable
    Variable {
        /// Where the variable is declared
        declared_on: VariableSite,
        /// The declared name
        name: String,
    },
    /// Wildcard type argument
    Wildcard {
        /// `? extends ...` bounds
        upper_bounds: Vec<TypeShape>,
        /// `? super ...` bounds
        lower_bounds: Vec<TypeShape>,
    },
}

impl TypeShape {
    /// A named type without type arguments
    ///
    /// ## Arguments
    /// * 'type_id' - The referenced type
    pub fn named(type_id: impl Into<TypeId>) -> Self {
        TypeShape::Named {
            type_id: type_id.into(),
            type_arguments: Vec::new(),
        }
    }

    /// A named type with type arguments
    ///
    /// ## Arguments
    /// * 'type_id'         - The referenced type
    /// * 'type_arguments'  - The actual arguments, in declaration order
    pub fn parameterized(type_id: impl Into<TypeId>, type_arguments: Vec<TypeShape>) -> Self {
        TypeShape::Named {
            type_id: type_id.into(),
            type_arguments,
        }
    }

    /// An array of `element`
    #[must_use]
    pub fn array(element: TypeShape) -> Self {
        TypeShape::Array(Box::new(element))
    }

    /// A type variable declared on a class or interface
    ///
    /// ## Arguments
    /// * 'declared_on' - The type declaring the variable
    /// * 'name'        - The variable name
    pub fn variable(declared_on: impl Into<TypeId>, name: impl Into<String>) -> Self {
        TypeShape::Variable {
            declared_on: VariableSite::Type(declared_on.into()),
            name: name.into(),
        }
    }

    /// A type variable declared on a generic method
    ///
    /// ## Arguments
    /// * 'owner'   - The type declaring the method
    /// * 'method'  - The method declaring the variable
    /// * 'name'    - The variable name
    pub fn method_variable(
        owner: impl Into<TypeId>,
        method: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        TypeShape::Variable {
            declared_on: VariableSite::Method {
                owner: owner.into(),
                method: method.into(),
            },
            name: name.into(),
        }
    }

    /// A wildcard with explicit bound lists
    #[must_use]
    pub fn wildcard(upper_bounds: Vec<TypeShape>, lower_bounds: Vec<TypeShape>) -> Self {
        TypeShape::Wildcard {
            upper_bounds,
            lower_bounds,
        }
    }

    /// The unbounded wildcard `?`
    #[must_use]
    pub fn unbounded() -> Self {
        TypeShape::wildcard(Vec::new(), Vec::new())
    }

    /// The wildcard `? extends bound`
    #[must_use]
    pub fn extends(bound: TypeShape) -> Self {
        TypeShape::wildcard(vec![bound], Vec::new())
    }

    /// The wildcard `? super bound`
    #[must_use]
    pub fn super_of(bound: TypeShape) -> Self {
        TypeShape::wildcard(Vec::new(), vec![bound])
    }

    /// Returns `true` for array shapes
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, TypeShape::Array(_))
    }

    /// Returns `true` for named shapes carrying at least one type argument
    #[must_use]
    pub fn is_parameterized(&self) -> bool {
        matches!(self, TypeShape::Named { type_arguments, .. } if !type_arguments.is_empty())
    }

    /// Returns `true` for type variable references
    #[must_use]
    pub fn is_variable(&self) -> bool {
        matches!(self, TypeShape::Variable { .. })
    }

    /// Returns `true` for wildcards
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, TypeShape::Wildcard { .. })
    }

    /// Returns `true` for named shapes without type arguments
    #[must_use]
    pub fn is_plain(&self) -> bool {
        matches!(self, TypeShape::Named { type_arguments, .. } if type_arguments.is_empty())
    }

    /// The referenced type of a named shape
    #[must_use]
    pub fn type_id(&self) -> Option<&TypeId> {
        match self {
            TypeShape::Named { type_id, .. } => Some(type_id),
            _ => None,
        }
    }

    /// Short description of the variant, used in error messages
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            TypeShape::Named { type_arguments, .. } if type_arguments.is_empty() => "named",
            TypeShape::Named { .. } => "parameterized",
            TypeShape::Array(_) => "array",
            TypeShape::Variable { .. } => "variable",
            TypeShape::Wildcard { .. } => "wildcard",
        }
    }

    /// Replace variables with their bindings
    ///
    /// `lookup` is asked for every variable occurrence; variables it does not know are kept
    /// as they are. The input shape is never modified.
    ///
    /// ## Arguments
    /// * 'lookup' - Returns the binding of a variable, if any
    #[must_use]
    pub fn substitute<F>(&self, lookup: &F) -> TypeShape
    where
        F: Fn(&VariableSite, &str) -> Option<TypeShape>,
    {
        match self {
            TypeShape::Named {
                type_id,
                type_arguments,
            } => TypeShape::Named {
                type_id: type_id.clone(),
                type_arguments: type_arguments
                    .iter()
                    .map(|argument| argument.substitute(lookup))
                    .collect(),
            },
            TypeShape::Array(element) => TypeShape::Array(Box::new(element.substitute(lookup))),
            TypeShape::Variable { declared_on, name } => {
                lookup(declared_on, name).unwrap_or_else(|| self.clone())
            }
            TypeShape::Wildcard {
                upper_bounds,
                lower_bounds,
            } => TypeShape::Wildcard {
                upper_bounds: upper_bounds.iter().map(|b| b.substitute(lookup)).collect(),
                lower_bounds: lower_bounds.iter().map(|b| b.substitute(lookup)).collect(),
            },
        }
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeShape::Named {
                type_id,
                type_arguments,
            } => {
                write!(f, "{type_id}")?;
                if !type_arguments.is_empty() {
                    f.write_str("<")?;
                    for (index, argument) in type_arguments.iter().enumerate() {
                        if index > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{argument}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeShape::Array(element) => write!(f, "{element}[]"),
            TypeShape::Variable { name, .. } => f.write_str(name),
            TypeShape::Wildcard {
                upper_bounds,
                lower_bounds,
            } => {
                f.write_str("?")?;
                write_bounds(f, " extends ", upper_bounds)?;
                write_bounds(f, " super ", lower_bounds)
            }
        }
    }
}

fn write_bounds(f: &mut fmt::Formatter<'_>, marker: &str, bounds: &[TypeShape]) -> fmt::Result {
    if bounds.is_empty() {
        return Ok(());
    }

    f.write_str(marker)?;
    for (index, bound) in bounds.iter().enumerate() {
        if index > 0 {
            f.write_str(" & ")?;
        }
        write!(f, "{bound}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name() {
        assert_eq!(TypeId::new("java.util.List").short_name(), "List");
        assert_eq!(TypeId::new("java.util.Map$Entry").short_name(), "Entry");
        assert_eq!(TypeId::new("int").short_name(), "int");
    }

    #[test]
    fn test_variable_identity_includes_site() {
        let first = TypeShape::variable("demo.Pair", "T");
        let second = TypeShape::variable("demo.Entry", "T");
        let method = TypeShape::method_variable("demo.Pair", "get", "T");

        assert_ne!(first, second);
        assert_ne!(first, method);
        assert_eq!(first, TypeShape::variable("demo.Pair", "T"));
    }

    #[test]
    fn test_predicates() {
        let list = TypeShape::parameterized("java.util.List", vec![TypeShape::named("int")]);
        assert!(list.is_parameterized());
        assert!(!list.is_plain());
        assert!(TypeShape::named("int").is_plain());
        assert!(TypeShape::array(list.clone()).is_array());
        assert!(TypeShape::unbounded().is_wildcard());
        assert_eq!(TypeShape::array(list).kind(), "array");
    }

    #[test]
    fn test_substitute_leaves_unknown_variables() {
        let shape = TypeShape::parameterized(
            "java.util.Map",
            vec![
                TypeShape::variable("demo.Pair", "A"),
                TypeShape::array(TypeShape::variable("demo.Pair", "B")),
            ],
        );

        let substituted = shape.substitute(&|site: &VariableSite, name: &str| {
            (site == &VariableSite::Type(TypeId::new("demo.Pair")) && name == "A")
                .then(|| TypeShape::named("java.lang.Integer"))
        });

        assert_eq!(
            substituted.to_string(),
            "java.util.Map<java.lang.Integer, B[]>"
        );
        assert_eq!(shape.to_string(), "java.util.Map<A, B[]>");
    }

    #[test]
    fn test_display_wildcards() {
        assert_eq!(TypeShape::unbounded().to_string(), "?");
        assert_eq!(
            TypeShape::extends(TypeShape::named("java.lang.Number")).to_string(),
            "? extends java.lang.Number"
        );
        assert_eq!(
            TypeShape::wildcard(
                vec![TypeShape::named("A"), TypeShape::named("B")],
                vec![TypeShape::named("C")]
            )
            .to_string(),
            "? extends A & B super C"
        );
    }
}
