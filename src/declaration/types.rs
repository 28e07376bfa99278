use crate::shape::{TypeId, TypeShape};

/// A declared field and its raw (unsubstituted) type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    /// The field name
    pub name: String,
    /// The declared type, possibly referencing the owner's type variables
    pub shape: TypeShape,
}

/// A declared method with its raw (unsubstituted) signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    /// The method name
    pub name: String,
    /// The method's own type parameters (`<R> R map(...)`)
    pub type_parameters: Vec<String>,
    /// The parameter types, in declaration order
    pub parameters: Vec<TypeShape>,
    /// The return type
    pub return_type: TypeShape,
    /// The declared thrown exception types
    pub exceptions: Vec<TypeShape>,
}

/// Declaration of a class or interface, as seen by the hierarchy walker
///
/// Supertype and interface expressions may reference the type's own parameters through
/// [`TypeShape::Variable`]s declared on [`TypeDeclaration::id`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    /// The declared type
    pub id: TypeId,
    /// The declared type parameter names, in order
    pub parameters: Vec<String>,
    /// The direct supertype, `None` for the universal root and for interfaces
    pub supertype: Option<TypeShape>,
    /// The direct superinterfaces, in declaration order
    pub interfaces: Vec<TypeShape>,
    /// The declared fields
    pub fields: Vec<FieldDeclaration>,
    /// The declared methods
    pub methods: Vec<MethodDeclaration>,
}

impl TypeDeclaration {
    /// A declaration without parameters, supertypes or members
    pub fn new(id: impl Into<TypeId>) -> Self {
        TypeDeclaration {
            id: id.into(),
            parameters: Vec::new(),
            supertype: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Returns `true` if the type declares at least one type parameter
    #[must_use]
    pub fn is_generic(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// Find a declared field by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDeclaration> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Find a declared method by name (the first declared overload wins)
    #[must_use]
    pub fn method(&self, name: &str) -> Option<&MethodDeclaration> {
        self.methods.iter().find(|method| method.name == name)
    }
}
