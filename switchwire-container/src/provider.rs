//! Provider trait: a module of related component registrations.
//!
//! Providers group the descriptors of one area of an application, so the
//! wiring of persistence, messaging or auth lives next to that code.
//!
//! # Examples
//! ```rust
//! use switchwire_container::prelude::*;
//!
//! struct PersonDao;
//! struct PersistenceProvider;
//!
//! impl Provider for PersistenceProvider {
//!     fn register(&self, registry: &mut dyn ProviderRegistry) -> Result<()> {
//!         registry.register_component(
//!             ComponentDescriptor::builder("dao.PersonDAO")
//!                 .constructor(|_| Ok(PersonDao))
//!                 .build(),
//!         )
//!     }
//! }
//!
//! let factory = ComponentFactory::new();
//! factory.add_provider(&PersistenceProvider).unwrap();
//! assert!(factory.has_component("dao.PersonDAO", false));
//! ```

use crate::config::ComponentConfig;
use crate::descriptor::ComponentDescriptor;
use crate::error::Result;

/// A module that registers related components.
///
/// # Design Philosophy
/// Instead of one giant registration block, split components by domain:
///
/// ```rust,ignore
/// factory.add_provider(&PersistenceProvider)?;
/// factory.add_provider(&MessagingProvider)?;
/// ```
pub trait Provider: Send + Sync {
    /// Registers this module's components.
    ///
    /// Called once, before the factory is initialized.
    fn register(&self, registry: &mut dyn ProviderRegistry) -> Result<()>;

    /// Optional: human-readable name for logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// What providers register into.
///
/// Implemented by the factory and by the context builder, so a provider
/// can be tested against a mock.
pub trait ProviderRegistry {
    /// Registers a descriptor.
    fn register_component(&mut self, descriptor: ComponentDescriptor) -> Result<()>;

    /// Registers a declarative component record.
    fn register_config(&mut self, config: ComponentConfig) -> Result<()> {
        let descriptor = config.into_descriptor()?;
        self.register_component(descriptor)
    }
}
