use crate::render::{
    ArrayResolver, ParameterizedResolver, PlainResolver, ResolverOptions, ShapeResolver,
    VariableResolver, WildcardResolver,
};

/// Holds the ordered resolver chain, the replaceable "resolver storage" module
pub trait ResolverStorage: Send + Sync {
    /// The resolvers, in the order the picker should try them
    fn resolvers(&self) -> &[Box<dyn ShapeResolver>];

    /// Name of the implementation, used in log output
    fn module_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Default [`ResolverStorage`]
///
/// The chain order is array, parameterized, variable, wildcard, plain. With
/// [`ResolverOptions::short_names`] the plain resolver strips qualifying paths, which also
/// applies to the base of parameterized types.
pub struct StandardResolverStorage {
    resolvers: Vec<Box<dyn ShapeResolver>>,
}

impl StandardResolverStorage {
    /// Build the standard chain
    ///
    /// ## Arguments
    /// * 'options' - Selects the naming policy of the plain resolver
    #[must_use]
    pub fn new(options: ResolverOptions) -> Self {
        let plain = if options.short_names {
            PlainResolver::short()
        } else {
            PlainResolver::new()
        };

        StandardResolverStorage {
            resolvers: vec![
                Box::new(ArrayResolver),
                Box::new(ParameterizedResolver),
                Box::new(VariableResolver),
                Box::new(WildcardResolver),
                Box::new(plain),
            ],
        }
    }

    /// Build a chain from custom resolvers, tried in the given order
    #[must_use]
    pub fn from_resolvers(resolvers: Vec<Box<dyn ShapeResolver>>) -> Self {
        StandardResolverStorage { resolvers }
    }
}

impl Default for StandardResolverStorage {
    fn default() -> Self {
        StandardResolverStorage::new(ResolverOptions::default())
    }
}

impl ResolverStorage for StandardResolverStorage {
    fn resolvers(&self) -> &[Box<dyn ShapeResolver>] {
        &self.resolvers
    }
}
