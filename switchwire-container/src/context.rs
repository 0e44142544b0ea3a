//! Component context: a factory with batteries included.
//!
//! A [`ComponentContext`] builds a factory, registers a [`ModuleResolver`]
//! so records can name their base by module path, registers every
//! component it was given and initializes the factory in one step.
//!
//! # Examples
//! ```rust
//! use switchwire_container::prelude::*;
//!
//! struct MemoryDataSource;
//!
//! let records: Vec<ComponentConfig> = serde_json::from_str(
//!     r#"[{ "name": "MemoryDataSource", "module": "data/memory" }]"#,
//! )
//! .unwrap();
//!
//! let context = ComponentContext::builder()
//!     .module("data/memory", Base::constructor(|_| Ok(MemoryDataSource)))
//!     .config(records)
//!     .build()
//!     .unwrap();
//!
//! assert!(context.get::<MemoryDataSource>("MemoryDataSource").is_ok());
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::ComponentConfig;
use crate::descriptor::{Base, ComponentDescriptor, Instance};
use crate::error::{Result, SwitchwireError};
use crate::factory::{ComponentFactory, FactorySettings};
use crate::provider::{Provider, ProviderRegistry};
use crate::resolver::ModuleResolver;

/// An initialized factory plus its place in a context tree.
pub struct ComponentContext {
    factory: Arc<ComponentFactory>,
    parent: Option<Arc<ComponentContext>>,
}

impl ComponentContext {
    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    /// See [`ComponentFactory::get_component`].
    pub fn get_component(&self, name_or_alias: &str) -> Result<Instance> {
        self.factory.get_component(name_or_alias)
    }

    /// See [`ComponentFactory::get`].
    pub fn get<T: Any + Send + Sync>(&self, name_or_alias: &str) -> Result<Arc<T>> {
        self.factory.get::<T>(name_or_alias)
    }

    /// See [`ComponentFactory::has_component`].
    pub fn has_component(&self, name_or_alias: &str, check_parent: bool) -> bool {
        self.factory.has_component(name_or_alias, check_parent)
    }

    pub fn factory(&self) -> &Arc<ComponentFactory> {
        &self.factory
    }

    pub fn parent(&self) -> Option<&Arc<ComponentContext>> {
        self.parent.as_ref()
    }

    /// Destroys the underlying factory. See [`ComponentFactory::destroy`].
    pub fn destroy(&self) {
        self.factory.destroy();
    }
}

impl fmt::Debug for ComponentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentContext")
            .field("factory", &self.factory)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

/// Builds a [`ComponentContext`].
///
/// Registration errors raised by providers are kept and returned from
/// [`build`](ContextBuilder::build).
pub struct ContextBuilder {
    settings: FactorySettings,
    modules: ModuleResolver,
    descriptors: Vec<ComponentDescriptor>,
    parent: Option<Arc<ComponentContext>>,
    error: Option<SwitchwireError>,
}

impl ContextBuilder {
    fn new() -> Self {
        Self {
            settings: FactorySettings::default(),
            modules: ModuleResolver::new(),
            descriptors: Vec::new(),
            parent: None,
            error: None,
        }
    }

    pub fn settings(mut self, settings: FactorySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replaces the module table of the default resolver.
    pub fn modules(mut self, modules: ModuleResolver) -> Self {
        self.modules = modules;
        self
    }

    /// Adds one module to the default resolver.
    pub fn module(self, path: impl Into<String>, base: Base) -> Self {
        self.modules.register_module(path, base);
        self
    }

    pub fn component(mut self, descriptor: impl Into<ComponentDescriptor>) -> Self {
        self.descriptors.push(descriptor.into());
        self
    }

    /// Adds declarative component records.
    pub fn config(mut self, records: impl IntoIterator<Item = ComponentConfig>) -> Self {
        for record in records {
            if let Err(error) = ProviderRegistry::register_config(&mut self, record) {
                self.error.get_or_insert(error);
            }
        }
        self
    }

    /// Adds everything a provider module registers.
    pub fn provider(mut self, provider: &dyn Provider) -> Self {
        debug!(provider = provider.name(), "Adding provider");
        if let Err(error) = provider.register(&mut self) {
            self.error.get_or_insert(error);
        }
        self
    }

    /// Context whose factory is consulted for unknown names.
    pub fn parent(mut self, parent: &Arc<ComponentContext>) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    /// Registers everything and initializes the factory.
    ///
    /// The default module resolver is only registered when no component
    /// named `"ModuleResolver"` was given.
    pub fn build(self) -> Result<Arc<ComponentContext>> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let mut builder = ComponentFactory::builder().settings(self.settings);
        if let Some(parent) = &self.parent {
            builder = builder.parent(Arc::clone(&parent.factory));
        }
        let factory = builder.build()?;

        for descriptor in self.descriptors {
            factory.register_component(descriptor)?;
        }
        if !factory.has_component(ModuleResolver::COMPONENT_NAME, false) {
            factory.register_component(self.modules.into_descriptor())?;
        }

        factory.init_components()?;
        info!("Component context ready ✓");

        Ok(Arc::new(ComponentContext {
            factory,
            parent: self.parent,
        }))
    }
}

impl ProviderRegistry for ContextBuilder {
    fn register_component(&mut self, descriptor: ComponentDescriptor) -> Result<()> {
        self.descriptors.push(descriptor);
        Ok(())
    }
}

impl fmt::Debug for ContextBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextBuilder")
            .field("components", &self.descriptors.len())
            .field("modules", &self.modules)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Attribute, OrderedArg};

    struct DataSource;

    struct PersonDao {
        source: Arc<DataSource>,
    }

    fn records(json: &str) -> Vec<ComponentConfig> {
        serde_json::from_str(json).unwrap()
    }

    fn person_dao_base() -> Base {
        Base::constructor(|args| {
            Ok(PersonDao {
                source: args.get::<DataSource>(0)?,
            })
        })
    }

    #[test]
    fn records_resolve_through_modules() {
        let context = ComponentContext::builder()
            .module("data/memory", Base::constructor(|_| Ok(DataSource)))
            .module("dao/person", person_dao_base())
            .config(records(
                r#"[
                    { "name": "MemoryDataSource", "module": "data/memory" },
                    { "name": "PersonDAO", "requireBase": "dao/", "requirePath": "person",
                      "constructorArgs": [{ "ref": "MemoryDataSource" }] }
                ]"#,
            ))
            .build()
            .unwrap();

        let dao = context.get::<PersonDao>("PersonDAO").unwrap();
        let source = context.get::<DataSource>("MemoryDataSource").unwrap();
        assert!(Arc::ptr_eq(&dao.source, &source));
        assert!(context.has_component(ModuleResolver::COMPONENT_NAME, false));
    }

    #[test]
    fn missing_module_fails_build() {
        let result = ComponentContext::builder()
            .config(records(r#"[{ "name": "Ghost", "module": "nowhere" }]"#))
            .build();
        assert!(matches!(result, Err(SwitchwireError::UnresolvableComponent { .. })));
    }

    #[test]
    fn invalid_record_fails_build() {
        let result = ComponentContext::builder()
            .config(records(r#"[{ "name": "A", "initMethod": "init" }]"#))
            .build();
        assert!(matches!(result, Err(SwitchwireError::InvalidDescriptor { .. })));
    }

    #[test]
    fn own_module_resolver_replaces_default() {
        let custom = ModuleResolver::new().with_module("x", Base::value(5u8));
        let context = ComponentContext::builder()
            .component(custom.into_descriptor())
            .component(ComponentDescriptor::builder("X").module("x"))
            .build()
            .unwrap();

        assert_eq!(*context.get::<u8>("X").unwrap(), 5);
    }

    #[test]
    fn child_context_reads_parent() {
        let parent = ComponentContext::builder()
            .component(ComponentDescriptor::builder("MemoryDataSource").constructor(|_| Ok(DataSource)))
            .build()
            .unwrap();
        let child = ComponentContext::builder()
            .parent(&parent)
            .component(
                ComponentDescriptor::builder("PersonDAO")
                    .base(person_dao_base())
                    .constructor_arg(OrderedArg::reference("MemoryDataSource")),
            )
            .build()
            .unwrap();

        assert!(child.get::<PersonDao>("PersonDAO").is_ok());
        assert!(child.has_component("MemoryDataSource", true));
        assert!(!child.has_component("MemoryDataSource", false));
        assert!(child.parent().is_some());
    }

    struct Persistence;

    impl Provider for Persistence {
        fn register(&self, registry: &mut dyn ProviderRegistry) -> Result<()> {
            registry.register_component(
                ComponentDescriptor::builder("dao.Tagged")
                    .value(1u8)
                    .attr(Attribute::Tag("audited".into()))
                    .build(),
            )
        }
    }

    #[test]
    fn provider_components_are_registered() {
        let context = ComponentContext::builder().provider(&Persistence).build().unwrap();
        assert_eq!(context.factory().components_in_namespace("dao"), ["dao.Tagged"]);

        context.destroy();
        assert!(matches!(
            context.get_component("dao.Tagged"),
            Err(SwitchwireError::FactoryDestroyed)
        ));
    }
}
