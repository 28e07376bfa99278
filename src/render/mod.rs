//! Shape rendering through an ordered chain of resolvers.
//!
//! Rendering turns a [`TypeShape`] into text, substituting type variables with the bindings
//! of a [`MappedHierarchy`]. Each [`ShapeResolver`] handles one kind of shape and recurses into
//! nested shapes through [`RenderScope::render`], which asks the [`ResolverPicker`] for the
//! next resolver. The default chain tries, in order:
//!
//! 1. [`ArrayResolver`] - `render(element) + "[]"`
//! 2. [`ParameterizedResolver`] - `render(base) + "<" + arguments + ">"`
//! 3. [`VariableResolver`] - the bound shape, or the variable's name if it is free
//! 4. [`WildcardResolver`] - `?`, `? extends A & B`, `? super L`
//! 5. [`PlainResolver`] - the type name, qualified or short
//!
//! # Examples
//!
//! ```rust
//! use genscope::hierarchy::MappedHierarchy;
//! use genscope::render::{FirstMatchPicker, RenderScope, StandardResolverStorage};
//! use genscope::shape::TypeShape;
//! use genscope::ResolverOptions;
//!
//! let hierarchy = MappedHierarchy::new();
//! let storage = StandardResolverStorage::new(ResolverOptions::default());
//! let scope = RenderScope::new(&hierarchy, &FirstMatchPicker, &storage);
//!
//! let shape = TypeShape::parameterized(
//!     "java.util.Set",
//!     vec![TypeShape::extends(TypeShape::named("java.lang.Number"))],
//! );
//! assert_eq!(scope.render(&shape)?, "java.util.Set<? extends java.lang.Number>");
//! # Ok::<(), genscope::Error>(())
//! ```

mod config;
mod picker;
mod resolvers;
mod storage;

pub use config::ResolverOptions;
pub use picker::{FirstMatchPicker, ResolverPicker};
pub use resolvers::{
    ArrayResolver, ParameterizedResolver, PlainResolver, ShapeResolver, VariableResolver,
    WildcardResolver,
};
pub use storage::{ResolverStorage, StandardResolverStorage};

use crate::{
    hierarchy::MappedHierarchy,
    shape::{TypeShape, VariableSite},
    Error::UnsupportedShape,
    Result,
};

/// Everything a resolver needs to render a shape
///
/// A scope borrows the hierarchy and the modules for the duration of one rendering call.
#[derive(Clone, Copy)]
pub struct RenderScope<'a> {
    hierarchy: &'a MappedHierarchy,
    picker: &'a dyn ResolverPicker,
    storage: &'a dyn ResolverStorage,
    expanding: Option<&'a Expansion<'a>>,
}

/// A variable whose binding is being rendered, linked to the enclosing expansion
struct Expansion<'a> {
    site: &'a VariableSite,
    name: &'a str,
    parent: Option<&'a Expansion<'a>>,
}

impl<'a> RenderScope<'a> {
    /// Create a new `RenderScope`
    ///
    /// ## Arguments
    /// * 'hierarchy'   - Bindings used to substitute type variables
    /// * 'picker'      - Selects the resolver for every shape
    /// * 'storage'     - Provides the resolver chain
    #[must_use]
    pub fn new(
        hierarchy: &'a MappedHierarchy,
        picker: &'a dyn ResolverPicker,
        storage: &'a dyn ResolverStorage,
    ) -> Self {
        RenderScope {
            hierarchy,
            picker,
            storage,
            expanding: None,
        }
    }

    /// The bindings of this scope
    #[must_use]
    pub fn hierarchy(&self) -> &'a MappedHierarchy {
        self.hierarchy
    }

    /// Render `shape`
    ///
    /// # Errors
    /// Returns [`crate::Error::UnsupportedShape`] if no resolver claims the shape or one of
    /// its nested shapes
    pub fn render(&self, shape: &TypeShape) -> Result<String> {
        let resolver = self.picker.pick(shape, self.storage.resolvers())?;
        resolver.resolve(shape, self)
    }

    /// Render `bound`, the binding of the variable `name` declared on `site`
    ///
    /// # Errors
    /// Returns [`crate::Error::UnsupportedShape`] if `bound` leads back to the same variable,
    /// as in `Box<List<T>>` binding `T` to `List<T>`
    pub fn render_binding(
        &self,
        site: &VariableSite,
        name: &str,
        bound: &TypeShape,
    ) -> Result<String> {
        let mut current = self.expanding;
        while let Some(expansion) = current {
            if expansion.site == site && expansion.name == name {
                return Err(UnsupportedShape(format!(
                    "type variable '{}' of '{}' is bound to a shape containing itself",
                    name,
                    site.owner()
                )));
            }
            current = expansion.parent;
        }

        let expansion = Expansion {
            site,
            name,
            parent: self.expanding,
        };
        let nested = RenderScope {
            hierarchy: self.hierarchy,
            picker: self.picker,
            storage: self.storage,
            expanding: Some(&expansion),
        };
        nested.render(bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        hierarchy::{HierarchyWalker, VariableMapper},
        test::{fixtures, shapes},
    };

    #[test]
    fn test_render_is_compositional() {
        let hierarchy = MappedHierarchy::new();
        let storage = StandardResolverStorage::default();
        let scope = RenderScope::new(&hierarchy, &FirstMatchPicker, &storage);

        let element = TypeShape::parameterized(
            "java.util.Map",
            vec![shapes::string(), TypeShape::array(shapes::integer())],
        );
        let rendered = scope.render(&element).unwrap();
        assert_eq!(
            rendered,
            format!(
                "{}<{}, {}>",
                scope.render(&TypeShape::named("java.util.Map")).unwrap(),
                scope.render(&shapes::string()).unwrap(),
                scope.render(&TypeShape::array(shapes::integer())).unwrap()
            )
        );
        assert_eq!(
            scope.render(&TypeShape::array(element)).unwrap(),
            format!("{rendered}[]")
        );
    }

    #[test]
    fn test_render_substitutes_bindings() {
        let table = fixtures::pair_table();
        let root = TypeShape::parameterized("demo.Pair", vec![shapes::integer(), shapes::string()]);
        let hierarchy = HierarchyWalker::new()
            .map_type_variables(&root, &table)
            .unwrap();
        let storage = StandardResolverStorage::default();
        let scope = RenderScope::new(&hierarchy, &FirstMatchPicker, &storage);

        let shape = TypeShape::parameterized(
            "java.util.List",
            vec![TypeShape::array(TypeShape::variable("demo.Entry", "X"))],
        );
        assert_eq!(
            scope.render(&shape).unwrap(),
            "java.util.List<java.lang.String[]>"
        );
    }

    #[test]
    fn test_empty_chain_is_unsupported() {
        let hierarchy = MappedHierarchy::new();
        let storage = StandardResolverStorage::from_resolvers(Vec::new());
        let scope = RenderScope::new(&hierarchy, &FirstMatchPicker, &storage);

        assert!(matches!(
            scope.render(&TypeShape::named("int")),
            Err(crate::Error::UnsupportedShape(_))
        ));
    }

    #[test]
    fn test_self_referential_bindings_are_rejected() {
        let table = fixtures::pair_table();
        let storage = StandardResolverStorage::default();
        let walker = HierarchyWalker::new();
        let list_of = |shape: TypeShape| TypeShape::parameterized("java.util.List", vec![shape]);

        // Container.T bound to List<Container.T>
        let direct = walker
            .map_type_variables(
                &TypeShape::parameterized(
                    "demo.Container",
                    vec![list_of(TypeShape::variable("demo.Container", "T"))],
                ),
                &table,
            )
            .unwrap();
        let scope = RenderScope::new(&direct, &FirstMatchPicker, &storage);
        assert!(matches!(
            scope.render(&TypeShape::variable("demo.Container", "T")),
            Err(crate::Error::UnsupportedShape(_))
        ));

        // Entry.X and Container.T bound to lists of each other
        let crossed = walker
            .map_type_variables(
                &TypeShape::parameterized(
                    "demo.Pair",
                    vec![
                        list_of(TypeShape::variable("demo.Entry", "X")),
                        list_of(TypeShape::variable("demo.Container", "T")),
                    ],
                ),
                &table,
            )
            .unwrap();
        let scope = RenderScope::new(&crossed, &FirstMatchPicker, &storage);
        assert!(matches!(
            scope.render(&TypeShape::variable("demo.Entry", "X")),
            Err(crate::Error::UnsupportedShape(_))
        ));

        // The same variable twice side by side is not a cycle
        let bound = walker
            .map_type_variables(
                &TypeShape::parameterized("demo.Pair", vec![shapes::integer(), shapes::string()]),
                &table,
            )
            .unwrap();
        let scope = RenderScope::new(&bound, &FirstMatchPicker, &storage);
        let map = TypeShape::parameterized(
            "java.util.Map",
            vec![
                TypeShape::variable("demo.Pair", "A"),
                list_of(TypeShape::variable("demo.Pair", "A")),
            ],
        );
        assert_eq!(
            scope.render(&map).unwrap(),
            "java.util.Map<java.lang.Integer, java.util.List<java.lang.Integer>>"
        );
    }
}
