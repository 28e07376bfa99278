use tracing::debug;

use crate::{
    context::{resolving::root_id, ResolvingContext},
    declaration::{FieldDeclaration, MethodDeclaration},
    shape::{TypeId, TypeShape},
    Error::UnresolvableMember,
    Result,
};

/// A method signature rendered for a specific root type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMethod {
    /// The type declaring the method
    pub declaring: TypeId,
    /// The method name
    pub name: String,
    /// Rendered parameter types, in declaration order
    pub parameters: Vec<String>,
    /// Rendered return type
    pub return_type: String,
    /// Rendered exception types
    pub exceptions: Vec<String>,
}

/// Renders field and method signatures of declared members as seen from a root type
///
/// Members are looked up through the context's declaration provider. A member is only
/// resolvable if its declaring type is part of the root's hierarchy.
pub struct MemberResolver<'a> {
    context: &'a ResolvingContext,
}

impl<'a> MemberResolver<'a> {
    /// Create a new `MemberResolver` on top of `context`
    #[must_use]
    pub fn new(context: &'a ResolvingContext) -> Self {
        MemberResolver { context }
    }

    /// Render the type of the field `name` declared on `declaring`
    ///
    /// ## Arguments
    /// * 'root'        - The type the field is accessed through
    /// * 'declaring'   - The type declaring the field
    /// * 'name'        - The field name
    ///
    /// # Errors
    /// Returns [`crate::Error::UnresolvableMember`] if the field is not declared on
    /// `declaring` or `declaring` is not part of the root's hierarchy
    pub fn field_type(&self, root: &TypeShape, declaring: &TypeId, name: &str) -> Result<String> {
        let field = self.declared_field(root, declaring, name)?;
        self.context.render_member(root, declaring, &field.shape)
    }

    /// Render the parameter types of the method `name` declared on `declaring`
    ///
    /// # Errors
    /// See [`MemberResolver::field_type`]
    pub fn parameter_types(
        &self,
        root: &TypeShape,
        declaring: &TypeId,
        name: &str,
    ) -> Result<Vec<String>> {
        let method = self.declared_method(root, declaring, name)?;
        method
            .parameters
            .iter()
            .map(|parameter| self.context.render_member(root, declaring, parameter))
            .collect()
    }

    /// Render the return type of the method `name` declared on `declaring`
    ///
    /// # Errors
    /// See [`MemberResolver::field_type`]
    pub fn return_type(&self, root: &TypeShape, declaring: &TypeId, name: &str) -> Result<String> {
        let method = self.declared_method(root, declaring, name)?;
        self.context
            .render_member(root, declaring, &method.return_type)
    }

    /// Render the declared exception types of the method `name` declared on `declaring`
    ///
    /// # Errors
    /// See [`MemberResolver::field_type`]; exceptions that are not plain named types yield
    /// [`crate::Error::UnsupportedShape`]
    pub fn exception_types(
        &self,
        root: &TypeShape,
        declaring: &TypeId,
        name: &str,
    ) -> Result<Vec<String>> {
        let method = self.declared_method(root, declaring, name)?;
        method
            .exceptions
            .iter()
            .map(|exception| self.context.render_exception(root, declaring, exception))
            .collect()
    }

    /// Find the field `name` anywhere in the hierarchy of `root` and render its type
    ///
    /// Types are searched in discovery order, so a field on the root hides fields of the
    /// same name on its ancestors.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnresolvableMember`] if no type in the hierarchy declares it
    pub fn find_field(&self, root: &TypeShape, name: &str) -> Result<(TypeId, String)> {
        let hierarchy = self.context.resolve_shape(root)?;
        let provider = self.context.provider();

        for type_id in hierarchy.types() {
            if let Some(field) = provider.field(type_id, name) {
                debug!(root = %root, declaring = %type_id, field = name, "found field");
                let rendered = self.context.render(&hierarchy, &field.shape)?;
                return Ok((type_id.clone(), rendered));
            }
        }

        Err(UnresolvableMember {
            type_id: root_id(root),
            member: format!("field {name}"),
        })
    }

    /// Find the method `name` anywhere in the hierarchy of `root` and render its signature
    ///
    /// # Errors
    /// Returns [`crate::Error::UnresolvableMember`] if no type in the hierarchy declares it
    pub fn find_method(&self, root: &TypeShape, name: &str) -> Result<ResolvedMethod> {
        let hierarchy = self.context.resolve_shape(root)?;
        let provider = self.context.provider();

        let Some((declaring, method)) = hierarchy
            .types()
            .find_map(|type_id| provider.method(type_id, name).map(|m| (type_id.clone(), m)))
        else {
            return Err(UnresolvableMember {
                type_id: root_id(root),
                member: format!("method {name}"),
            });
        };

        debug!(root = %root, declaring = %declaring, method = name, "found method");
        Ok(ResolvedMethod {
            parameters: self.parameter_types(root, &declaring, name)?,
            return_type: self
                .context
                .render_member(root, &declaring, &method.return_type)?,
            exceptions: self.exception_types(root, &declaring, name)?,
            declaring,
            name: method.name,
        })
    }

    fn declared_field(
        &self,
        root: &TypeShape,
        declaring: &TypeId,
        name: &str,
    ) -> Result<FieldDeclaration> {
        self.context
            .provider()
            .field(declaring, name)
            .ok_or_else(|| UnresolvableMember {
                type_id: root_id(root),
                member: format!("field {declaring}.{name}"),
            })
    }

    fn declared_method(
        &self,
        root: &TypeShape,
        declaring: &TypeId,
        name: &str,
    ) -> Result<MethodDeclaration> {
        self.context
            .provider()
            .method(declaring, name)
            .ok_or_else(|| UnresolvableMember {
                type_id: root_id(root),
                member: format!("method {declaring}.{name}"),
            })
    }
}
