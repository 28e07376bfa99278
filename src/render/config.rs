/// Options shared by every module of a resolving context
///
/// Options are fixed when a context is built. Changing them means building a new registry
/// with [`crate::context::ModuleRegistry::with_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ResolverOptions {
    /// Render type names without their package or enclosing type prefix
    pub short_names: bool,
}

impl ResolverOptions {
    /// Options rendering fully qualified names
    #[must_use]
    pub fn new() -> Self {
        ResolverOptions::default()
    }

    /// Toggle short type names (`List` instead of `java.util.List`)
    #[must_use]
    pub fn with_short_names(mut self, short_names: bool) -> Self {
        self.short_names = short_names;
        self
    }
}
