//! Builders for type declarations.
//!
//! [`TypeBuilder`] offers a fluent API for describing a class or interface: its type
//! parameters, supertype, interfaces, fields and methods. Type expressions may be given as
//! text, in which case they are parsed with the declaring type's own parameters (and, for
//! methods, the method's type parameters) in scope.
//!
//! # Example
//!
//! ```rust
//! use genscope::declaration::TypeBuilder;
//! use genscope::shape::TypeShape;
//!
//! let pair = TypeBuilder::new("demo.Pair")
//!     .parameters(["A", "B"])
//!     .extends("demo.Entry<B>")
//!     .field("first", "A")
//!     .method("swap", |method| method.returns("demo.Pair<B, A>"))
//!     .build()?;
//!
//! assert_eq!(
//!     pair.supertype,
//!     Some(TypeShape::parameterized(
//!         "demo.Entry",
//!         vec![TypeShape::variable("demo.Pair", "B")]
//!     ))
//! );
//! # Ok::<(), genscope::Error>(())
//! ```

use crate::{
    declaration::{FieldDeclaration, MethodDeclaration, TypeDeclaration},
    shape::{parse_shape, TypeId, TypeShape, VariableScope},
    Result,
};

/// A type expression that is either already a shape or still text
#[derive(Debug, Clone)]
pub enum ShapeSource {
    /// Text, parsed with the declaring scope on build
    Text(String),
    /// A ready shape, taken as is
    Shape(TypeShape),
}

impl ShapeSource {
    fn resolve(self, scope: &VariableScope) -> Result<TypeShape> {
        match self {
            ShapeSource::Text(text) => parse_shape(&text, scope),
            ShapeSource::Shape(shape) => Ok(shape),
        }
    }
}

impl From<&str> for ShapeSource {
    fn from(text: &str) -> Self {
        ShapeSource::Text(text.to_string())
    }
}

impl From<String> for ShapeSource {
    fn from(text: String) -> Self {
        ShapeSource::Text(text)
    }
}

impl From<TypeShape> for ShapeSource {
    fn from(shape: TypeShape) -> Self {
        ShapeSource::Shape(shape)
    }
}

/// Provides a fluent API for building a [`TypeDeclaration`]
pub struct TypeBuilder {
    id: TypeId,
    parameters: Vec<String>,
    supertype: Option<ShapeSource>,
    interfaces: Vec<ShapeSource>,
    fields: Vec<(String, ShapeSource)>,
    methods: Vec<MethodBuilder>,
}

impl TypeBuilder {
    /// Start building the declaration of `id`
    ///
    /// ## Arguments
    /// * 'id' - The qualified name of the declared type
    pub fn new(id: impl Into<TypeId>) -> Self {
        TypeBuilder {
            id: id.into(),
            parameters: Vec::new(),
            supertype: None,
            interfaces: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Set the declared type parameters
    ///
    /// ## Arguments
    /// * 'parameters' - The parameter names, in declaration order
    #[must_use]
    pub fn parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    /// Set the direct supertype
    #[must_use]
    pub fn extends(mut self, supertype: impl Into<ShapeSource>) -> Self {
        self.supertype = Some(supertype.into());
        self
    }

    /// Add a direct superinterface
    #[must_use]
    pub fn implements(mut self, interface: impl Into<ShapeSource>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Add a field
    ///
    /// ## Arguments
    /// * 'name'    - The field name
    /// * 'shape'   - The declared field type
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, shape: impl Into<ShapeSource>) -> Self {
        self.fields.push((name.into(), shape.into()));
        self
    }

    /// Add a method, configured through `configure`
    ///
    /// ## Arguments
    /// * 'name'        - The method name
    /// * 'configure'   - Sets up the method signature
    #[must_use]
    pub fn method<F>(mut self, name: impl Into<String>, configure: F) -> Self
    where
        F: FnOnce(MethodBuilder) -> MethodBuilder,
    {
        self.methods.push(configure(MethodBuilder::new(name)));
        self
    }

    /// Parse all expressions and produce the declaration
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if any textual expression does not parse
    pub fn build(self) -> Result<TypeDeclaration> {
        let scope = VariableScope::for_type(self.id.clone(), self.parameters.iter().cloned());

        let supertype = self
            .supertype
            .map(|source| source.resolve(&scope))
            .transpose()?;
        let interfaces = self
            .interfaces
            .into_iter()
            .map(|source| source.resolve(&scope))
            .collect::<Result<Vec<_>>>()?;
        let fields = self
            .fields
            .into_iter()
            .map(|(name, source)| {
                Ok(FieldDeclaration {
                    name,
                    shape: source.resolve(&scope)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let methods = self
            .methods
            .into_iter()
            .map(|method| method.build(&self.id, &scope))
            .collect::<Result<Vec<_>>>()?;

        Ok(TypeDeclaration {
            id: self.id,
            parameters: self.parameters,
            supertype,
            interfaces,
            fields,
            methods,
        })
    }
}

/// Provides a fluent API for describing a method signature
pub struct MethodBuilder {
    name: String,
    type_parameters: Vec<String>,
    parameters: Vec<ShapeSource>,
    return_type: Option<ShapeSource>,
    exceptions: Vec<ShapeSource>,
}

impl MethodBuilder {
    /// Start describing the method `name`, returning `void` by default
    pub fn new(name: impl Into<String>) -> Self {
        MethodBuilder {
            name: name.into(),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
            exceptions: Vec::new(),
        }
    }

    /// Set the method's own type parameters
    #[must_use]
    pub fn type_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    /// Add a parameter
    #[must_use]
    pub fn parameter(mut self, shape: impl Into<ShapeSource>) -> Self {
        self.parameters.push(shape.into());
        self
    }

    /// Set the return type
    #[must_use]
    pub fn returns(mut self, shape: impl Into<ShapeSource>) -> Self {
        self.return_type = Some(shape.into());
        self
    }

    /// Add a declared exception
    #[must_use]
    pub fn throws(mut self, shape: impl Into<ShapeSource>) -> Self {
        self.exceptions.push(shape.into());
        self
    }

    fn build(self, owner: &TypeId, type_scope: &VariableScope) -> Result<MethodDeclaration> {
        let scope = type_scope.clone().with_method(
            owner.clone(),
            self.name.clone(),
            self.type_parameters.iter().cloned(),
        );

        let parameters = self
            .parameters
            .into_iter()
            .map(|source| source.resolve(&scope))
            .collect::<Result<Vec<_>>>()?;
        let return_type = match self.return_type {
            Some(source) => source.resolve(&scope)?,
            None => TypeShape::named("void"),
        };
        let exceptions = self
            .exceptions
            .into_iter()
            .map(|source| source.resolve(&scope))
            .collect::<Result<Vec<_>>>()?;

        Ok(MethodDeclaration {
            name: self.name,
            type_parameters: self.type_parameters,
            parameters,
            return_type,
            exceptions,
        })
    }
}
