use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::{
    context::{MemberResolver, ModuleSeed},
    declaration::DeclarationProvider,
    hierarchy::{HierarchyStorage, MappedHierarchy, VariableMapper},
    render::{RenderScope, ResolverOptions, ResolverPicker, ResolverStorage},
    shape::{TypeId, TypeShape},
    Error::{UnresolvableMember, UnsupportedShape},
    Result,
};

/// A consistent set of the four resolution modules plus the declarations they work on
///
/// Contexts are immutable. Replacing a module through the
/// [`crate::context::ModuleRegistry`] builds a new context; holders of the previous one keep
/// using the modules it was built with.
pub struct ResolvingContext {
    provider: Arc<dyn DeclarationProvider>,
    options: ResolverOptions,
    hierarchy_storage: Arc<dyn HierarchyStorage>,
    resolver_storage: Arc<dyn ResolverStorage>,
    resolver_picker: Arc<dyn ResolverPicker>,
    variable_mapper: Arc<dyn VariableMapper>,
}

impl ResolvingContext {
    /// Assemble a context from explicit modules
    ///
    /// ## Arguments
    /// * 'seed'                - Declarations and options
    /// * 'hierarchy_storage'   - Storage for mapped hierarchies
    /// * 'resolver_storage'    - The resolver chain
    /// * 'resolver_picker'     - Selects a resolver per shape
    /// * 'variable_mapper'     - Builds hierarchies
    #[must_use]
    pub fn new(
        seed: &ModuleSeed,
        hierarchy_storage: Arc<dyn HierarchyStorage>,
        resolver_storage: Arc<dyn ResolverStorage>,
        resolver_picker: Arc<dyn ResolverPicker>,
        variable_mapper: Arc<dyn VariableMapper>,
    ) -> Self {
        ResolvingContext {
            provider: seed.provider.clone(),
            options: seed.options,
            hierarchy_storage,
            resolver_storage,
            resolver_picker,
            variable_mapper,
        }
    }

    /// The declarations this context resolves against
    #[must_use]
    pub fn provider(&self) -> &Arc<dyn DeclarationProvider> {
        &self.provider
    }

    /// The options the modules were built with
    #[must_use]
    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    /// The hierarchy storage module
    #[must_use]
    pub fn hierarchy_storage(&self) -> &Arc<dyn HierarchyStorage> {
        &self.hierarchy_storage
    }

    /// The resolver storage module
    #[must_use]
    pub fn resolver_storage(&self) -> &Arc<dyn ResolverStorage> {
        &self.resolver_storage
    }

    /// The resolver picker module
    #[must_use]
    pub fn resolver_picker(&self) -> &Arc<dyn ResolverPicker> {
        &self.resolver_picker
    }

    /// The variable mapper module
    #[must_use]
    pub fn variable_mapper(&self) -> &Arc<dyn VariableMapper> {
        &self.variable_mapper
    }

    /// Resolve the hierarchy of a type used raw
    ///
    /// # Errors
    /// See [`ResolvingContext::resolve_shape`]
    pub fn resolve_type(&self, type_id: &TypeId) -> Result<Arc<MappedHierarchy>> {
        self.resolve_shape(&TypeShape::named(type_id.clone()))
    }

    /// Resolve the hierarchy of a type with explicit type arguments
    ///
    /// ## Arguments
    /// * 'type_id'     - The root type
    /// * 'arguments'   - The actual arguments, an empty list means raw usage
    ///
    /// # Errors
    /// See [`ResolvingContext::resolve_shape`]
    pub fn resolve_with_arguments(
        &self,
        type_id: &TypeId,
        arguments: Vec<TypeShape>,
    ) -> Result<Arc<MappedHierarchy>> {
        self.resolve_shape(&TypeShape::parameterized(type_id.clone(), arguments))
    }

    /// Resolve the hierarchy of `root`, served from the hierarchy storage when possible
    ///
    /// # Errors
    /// Returns [`crate::Error::ArityMismatch`], [`crate::Error::ConflictingDiamondBinding`],
    /// [`crate::Error::CyclicHierarchy`], [`crate::Error::TypeNotFound`] or
    /// [`crate::Error::UnsupportedShape`] as raised by the variable mapper
    pub fn resolve_shape(&self, root: &TypeShape) -> Result<Arc<MappedHierarchy>> {
        self.hierarchy_storage.get_or_map(
            root,
            self.variable_mapper.as_ref(),
            self.provider.as_ref(),
        )
    }

    /// Resolve many roots in parallel, warming the hierarchy storage
    ///
    /// # Errors
    /// Returns the error of one failing root; the remaining roots may or may not have been
    /// resolved
    pub fn preload(&self, roots: &[TypeShape]) -> Result<()> {
        debug!(count = roots.len(), "preloading hierarchies");
        roots
            .par_iter()
            .try_for_each(|root| self.resolve_shape(root).map(|_| ()))
    }

    /// Render `shape` with the bindings of `hierarchy`
    ///
    /// # Errors
    /// Returns [`crate::Error::UnsupportedShape`] if the chain can not render the shape
    pub fn render(&self, hierarchy: &MappedHierarchy, shape: &TypeShape) -> Result<String> {
        RenderScope::new(
            hierarchy,
            self.resolver_picker.as_ref(),
            self.resolver_storage.as_ref(),
        )
        .render(shape)
    }

    /// Render the type of a member declared on `declaring`, as seen from `root`
    ///
    /// Used for field types, parameter types and return types.
    ///
    /// ## Arguments
    /// * 'root'        - The type the member is accessed through
    /// * 'declaring'   - The type declaring the member, `root` or one of its ancestors
    /// * 'shape'       - The declared, unsubstituted member type
    ///
    /// # Errors
    /// Returns [`crate::Error::UnresolvableMember`] if `declaring` is not part of the
    /// hierarchy of `root`, or any error raised while resolving or rendering
    pub fn render_member(
        &self,
        root: &TypeShape,
        declaring: &TypeId,
        shape: &TypeShape,
    ) -> Result<String> {
        let hierarchy = self.resolve_shape(root)?;
        if !hierarchy.contains(declaring) {
            return Err(UnresolvableMember {
                type_id: root_id(root),
                member: format!("{shape} declared on {declaring}"),
            });
        }

        self.render(&hierarchy, shape)
    }

    /// Render a declared exception type
    ///
    /// Exceptions can not be generic, so only plain named shapes are accepted.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnsupportedShape`] for any other shape, otherwise see
    /// [`ResolvingContext::render_member`]
    pub fn render_exception(
        &self,
        root: &TypeShape,
        declaring: &TypeId,
        shape: &TypeShape,
    ) -> Result<String> {
        if !shape.is_plain() {
            return Err(UnsupportedShape(format!(
                "{} '{}' can not be an exception type",
                shape.kind(),
                shape
            )));
        }

        self.render_member(root, declaring, shape)
    }

    /// Member lookups and signature rendering on top of this context
    #[must_use]
    pub fn members(&self) -> MemberResolver<'_> {
        MemberResolver::new(self)
    }
}

/// The identity reported for a root in member errors
pub(crate) fn root_id(root: &TypeShape) -> TypeId {
    match root.type_id() {
        Some(type_id) => type_id.clone(),
        None => TypeId::new(root.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        context::ModuleRegistry,
        test::{fixtures, shapes},
        Error,
    };

    fn context() -> Arc<ResolvingContext> {
        ModuleRegistry::new(fixtures::collections_table().into_provider()).context()
    }

    #[test]
    fn test_resolve_is_cached() {
        let context = context();
        let first = context.resolve_type(&TypeId::new("java.util.ArrayList")).unwrap();
        let second = context
            .resolve_shape(&TypeShape::named("java.util.ArrayList"))
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(context.hierarchy_storage().len(), 1);
    }

    #[test]
    fn test_render_member_outside_hierarchy() {
        let context = context();
        let root = TypeShape::parameterized("java.util.ArrayList", vec![shapes::integer()]);

        let result = context.render_member(
            &root,
            &TypeId::new("java.util.HashMap"),
            &TypeShape::variable("java.util.HashMap", "K"),
        );
        assert!(matches!(
            result,
            Err(Error::UnresolvableMember { type_id, .. }) if type_id == TypeId::new("java.util.ArrayList")
        ));
    }

    #[test]
    fn test_render_exception_accepts_plain_only() {
        let context = context();
        let root = TypeShape::named("java.util.ArrayList");
        let declaring = TypeId::new("java.util.ArrayList");

        assert_eq!(
            context
                .render_exception(&root, &declaring, &TypeShape::named("java.io.IOException"))
                .unwrap(),
            "java.io.IOException"
        );
        assert!(matches!(
            context.render_exception(
                &root,
                &declaring,
                &TypeShape::variable("java.util.ArrayList", "E")
            ),
            Err(Error::UnsupportedShape(_))
        ));
        assert!(matches!(
            context.render_exception(
                &root,
                &declaring,
                &TypeShape::array(TypeShape::named("java.io.IOException"))
            ),
            Err(Error::UnsupportedShape(_))
        ));
    }

    #[test]
    fn test_preload_fills_storage() {
        let context = context();
        let roots = vec![
            TypeShape::named("java.util.ArrayList"),
            TypeShape::parameterized("java.util.ArrayList", vec![shapes::string()]),
            TypeShape::parameterized("java.util.HashMap", vec![shapes::string(), shapes::integer()]),
        ];
        context.preload(&roots).unwrap();
        assert_eq!(context.hierarchy_storage().len(), 3);

        let failing = vec![TypeShape::named("java.util.Missing")];
        assert!(context.preload(&failing).is_err());
    }
}
