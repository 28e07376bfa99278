use tracing::trace;

use crate::{
    render::ShapeResolver,
    shape::TypeShape,
    Error::UnsupportedShape,
    Result,
};

/// Selects the resolver rendering a shape, the replaceable "resolver picker" module
pub trait ResolverPicker: Send + Sync {
    /// Pick a resolver for `shape` out of `resolvers`
    ///
    /// # Errors
    /// Returns [`crate::Error::UnsupportedShape`] if no resolver claims the shape
    fn pick<'r>(
        &self,
        shape: &TypeShape,
        resolvers: &'r [Box<dyn ShapeResolver>],
    ) -> Result<&'r dyn ShapeResolver>;

    /// Name of the implementation, used in log output
    fn module_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Default [`ResolverPicker`]: the first resolver in chain order that claims the shape
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstMatchPicker;

impl ResolverPicker for FirstMatchPicker {
    fn pick<'r>(
        &self,
        shape: &TypeShape,
        resolvers: &'r [Box<dyn ShapeResolver>],
    ) -> Result<&'r dyn ShapeResolver> {
        let Some((index, resolver)) = resolvers
            .iter()
            .enumerate()
            .find(|(_, resolver)| resolver.can_resolve(shape))
        else {
            return Err(UnsupportedShape(format!(
                "no resolver claims {} '{}'",
                shape.kind(),
                shape
            )));
        };

        trace!(shape = %shape, index, "picked resolver");
        Ok(resolver.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        hierarchy::MappedHierarchy,
        render::{ArrayResolver, PlainResolver, RenderScope, StandardResolverStorage},
    };

    struct Claims(&'static str);

    impl ShapeResolver for Claims {
        fn can_resolve(&self, _shape: &TypeShape) -> bool {
            true
        }

        fn resolve(&self, _shape: &TypeShape, _scope: &RenderScope<'_>) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_first_match_wins() {
        let resolvers: Vec<Box<dyn ShapeResolver>> = vec![
            Box::new(ArrayResolver),
            Box::new(Claims("first")),
            Box::new(Claims("second")),
        ];

        let shape = TypeShape::named("int");
        let picked = FirstMatchPicker.pick(&shape, &resolvers).unwrap();

        let hierarchy = MappedHierarchy::new();
        let storage = StandardResolverStorage::from_resolvers(Vec::new());
        let scope = RenderScope::new(&hierarchy, &FirstMatchPicker, &storage);
        assert_eq!(picked.resolve(&shape, &scope).unwrap(), "first");
    }

    #[test]
    fn test_no_match() {
        let resolvers: Vec<Box<dyn ShapeResolver>> = vec![Box::new(PlainResolver::new())];
        let result = FirstMatchPicker.pick(&TypeShape::unbounded(), &resolvers);
        assert!(matches!(result, Err(crate::Error::UnsupportedShape(_))));

        let empty: Vec<Box<dyn ShapeResolver>> = Vec::new();
        assert!(FirstMatchPicker.pick(&TypeShape::named("int"), &empty).is_err());
    }
}
