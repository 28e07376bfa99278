use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, RwLock,
};

use strum::{Display, EnumIter};
use tracing::{debug, info};

use crate::{
    context::ResolvingContext,
    declaration::DeclarationProvider,
    hierarchy::{CachedHierarchyStorage, HierarchyStorage, HierarchyWalker, VariableMapper},
    render::{
        FirstMatchPicker, ResolverOptions, ResolverPicker, ResolverStorage,
        StandardResolverStorage,
    },
};

/// What every module factory receives to wire its module
#[derive(Clone)]
pub struct ModuleSeed {
    /// The declarations the context resolves against
    pub provider: Arc<dyn DeclarationProvider>,
    /// The registry's options
    pub options: ResolverOptions,
}

/// Factory for the hierarchy storage module; `None` falls back to the default
pub type HierarchyStorageFactory =
    Arc<dyn Fn(&ModuleSeed) -> Option<Arc<dyn HierarchyStorage>> + Send + Sync>;
/// Factory for the resolver storage module; `None` falls back to the default
pub type ResolverStorageFactory =
    Arc<dyn Fn(&ModuleSeed) -> Option<Arc<dyn ResolverStorage>> + Send + Sync>;
/// Factory for the resolver picker module; `None` falls back to the default
pub type ResolverPickerFactory =
    Arc<dyn Fn(&ModuleSeed) -> Option<Arc<dyn ResolverPicker>> + Send + Sync>;
/// Factory for the variable mapper module; `None` falls back to the default
pub type VariableMapperFactory =
    Arc<dyn Fn(&ModuleSeed) -> Option<Arc<dyn VariableMapper>> + Send + Sync>;

/// The four replaceable modules of a [`ResolvingContext`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ModuleKind {
    /// Storage for mapped hierarchies
    HierarchyStorage,
    /// The resolver chain
    ResolverStorage,
    /// Picks a resolver per shape
    ResolverPicker,
    /// Builds hierarchies
    VariableMapper,
}

/// Owns the module factories and hands out the active [`ResolvingContext`]
///
/// Each module slot sits behind its own lock, so replacing one module never blocks readers
/// of another. The active context is built on first use.
///
/// With auto-refresh enabled (the default) every replacement immediately builds a new
/// context. With auto-refresh disabled, replacements are only staged and the active
/// context stays the same until [`ModuleRegistry::refresh_context`] is called.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use genscope::prelude::*;
///
/// let table = DeclarationTable::new();
/// let registry = ModuleRegistry::new(table.into_provider());
///
/// let before = registry.context();
/// let factory: ResolverStorageFactory = Arc::new(|seed: &ModuleSeed| {
///     let options = seed.options.with_short_names(true);
///     Some(Arc::new(StandardResolverStorage::new(options)) as Arc<dyn ResolverStorage>)
/// });
/// registry.replace_resolver_storage(Some(factory));
///
/// assert!(!Arc::ptr_eq(&before, &registry.context()));
/// ```
pub struct ModuleRegistry {
    seed: ModuleSeed,
    hierarchy_storage: RwLock<Option<HierarchyStorageFactory>>,
    resolver_storage: RwLock<Option<ResolverStorageFactory>>,
    resolver_picker: RwLock<Option<ResolverPickerFactory>>,
    variable_mapper: RwLock<Option<VariableMapperFactory>>,
    auto_refresh: AtomicBool,
    context: RwLock<Option<Arc<ResolvingContext>>>,
}

impl ModuleRegistry {
    /// Create a registry with default options
    ///
    /// ## Arguments
    /// * 'provider' - The declarations every context resolves against
    #[must_use]
    pub fn new(provider: Arc<dyn DeclarationProvider>) -> Self {
        ModuleRegistry::with_options(provider, ResolverOptions::default())
    }

    /// Create a registry with explicit options
    ///
    /// ## Arguments
    /// * 'provider'    - The declarations every context resolves against
    /// * 'options'     - Options handed to every module factory
    #[must_use]
    pub fn with_options(provider: Arc<dyn DeclarationProvider>, options: ResolverOptions) -> Self {
        ModuleRegistry {
            seed: ModuleSeed { provider, options },
            hierarchy_storage: RwLock::new(None),
            resolver_storage: RwLock::new(None),
            resolver_picker: RwLock::new(None),
            variable_mapper: RwLock::new(None),
            auto_refresh: AtomicBool::new(true),
            context: RwLock::new(None),
        }
    }

    /// The options handed to module factories
    #[must_use]
    pub fn options(&self) -> ResolverOptions {
        self.seed.options
    }

    /// The installed hierarchy storage factory, `None` for the default
    #[must_use]
    pub fn hierarchy_storage(&self) -> Option<HierarchyStorageFactory> {
        read_lock!(self.hierarchy_storage).clone()
    }

    /// The installed resolver storage factory, `None` for the default
    #[must_use]
    pub fn resolver_storage(&self) -> Option<ResolverStorageFactory> {
        read_lock!(self.resolver_storage).clone()
    }

    /// The installed resolver picker factory, `None` for the default
    #[must_use]
    pub fn resolver_picker(&self) -> Option<ResolverPickerFactory> {
        read_lock!(self.resolver_picker).clone()
    }

    /// The installed variable mapper factory, `None` for the default
    #[must_use]
    pub fn variable_mapper(&self) -> Option<VariableMapperFactory> {
        read_lock!(self.variable_mapper).clone()
    }

    /// Install a hierarchy storage factory, `None` restores the default
    pub fn replace_hierarchy_storage(&self, factory: Option<HierarchyStorageFactory>) {
        let custom = factory.is_some();
        *write_lock!(self.hierarchy_storage) = factory;
        self.replaced(ModuleKind::HierarchyStorage, custom);
    }

    /// Install a resolver storage factory, `None` restores the default
    pub fn replace_resolver_storage(&self, factory: Option<ResolverStorageFactory>) {
        let custom = factory.is_some();
        *write_lock!(self.resolver_storage) = factory;
        self.replaced(ModuleKind::ResolverStorage, custom);
    }

    /// Install a resolver picker factory, `None` restores the default
    pub fn replace_resolver_picker(&self, factory: Option<ResolverPickerFactory>) {
        let custom = factory.is_some();
        *write_lock!(self.resolver_picker) = factory;
        self.replaced(ModuleKind::ResolverPicker, custom);
    }

    /// Install a variable mapper factory, `None` restores the default
    pub fn replace_variable_mapper(&self, factory: Option<VariableMapperFactory>) {
        let custom = factory.is_some();
        *write_lock!(self.variable_mapper) = factory;
        self.replaced(ModuleKind::VariableMapper, custom);
    }

    /// Restore the default of one module
    pub fn reset(&self, kind: ModuleKind) {
        match kind {
            ModuleKind::HierarchyStorage => self.replace_hierarchy_storage(None),
            ModuleKind::ResolverStorage => self.replace_resolver_storage(None),
            ModuleKind::ResolverPicker => self.replace_resolver_picker(None),
            ModuleKind::VariableMapper => self.replace_variable_mapper(None),
        }
    }

    /// Rebuild the context on every module replacement
    pub fn enable_auto_refresh(&self) {
        self.auto_refresh.store(true, Ordering::SeqCst);
    }

    /// Stage module replacements until [`ModuleRegistry::refresh_context`] is called
    pub fn disable_auto_refresh(&self) {
        self.auto_refresh.store(false, Ordering::SeqCst);
    }

    /// Returns `true` if replacements rebuild the context immediately
    #[must_use]
    pub fn is_auto_refresh(&self) -> bool {
        self.auto_refresh.load(Ordering::SeqCst)
    }

    /// The active context, built from the installed factories on first use
    #[must_use]
    pub fn context(&self) -> Arc<ResolvingContext> {
        if let Some(context) = read_lock!(self.context).as_ref() {
            return context.clone();
        }

        // Factories may re-enter the registry
        let built = Arc::new(self.build_context());
        let mut slot = write_lock!(self.context);
        match slot.as_ref() {
            Some(context) => context.clone(),
            None => {
                *slot = Some(built.clone());
                built
            }
        }
    }

    /// Build a new context from the installed factories and make it the active one
    ///
    /// The previous context is dropped from the registry but stays valid for its holders.
    pub fn refresh_context(&self) -> Arc<ResolvingContext> {
        let context = Arc::new(self.build_context());
        *write_lock!(self.context) = Some(context.clone());
        info!("refreshed resolving context");
        context
    }

    fn replaced(&self, kind: ModuleKind, custom: bool) {
        info!(module = %kind, custom, "replaced module");
        if self.is_auto_refresh() {
            self.refresh_context();
        }
    }

    fn build_context(&self) -> ResolvingContext {
        let seed = &self.seed;

        let hierarchy_storage = self
            .hierarchy_storage()
            .and_then(|factory| factory(seed))
            .unwrap_or_else(|| Arc::new(CachedHierarchyStorage::new()));
        let resolver_storage = self
            .resolver_storage()
            .and_then(|factory| factory(seed))
            .unwrap_or_else(|| Arc::new(StandardResolverStorage::new(seed.options)));
        let resolver_picker = self
            .resolver_picker()
            .and_then(|factory| factory(seed))
            .unwrap_or_else(|| Arc::new(FirstMatchPicker));
        let variable_mapper = self
            .variable_mapper()
            .and_then(|factory| factory(seed))
            .unwrap_or_else(|| Arc::new(HierarchyWalker::new()));

        debug!(
            hierarchy_storage = hierarchy_storage.module_name(),
            resolver_storage = resolver_storage.module_name(),
            resolver_picker = resolver_picker.module_name(),
            variable_mapper = variable_mapper.module_name(),
            "building resolving context"
        );

        ResolvingContext::new(
            seed,
            hierarchy_storage,
            resolver_storage,
            resolver_picker,
            variable_mapper,
        )
    }
}
