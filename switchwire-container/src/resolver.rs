//! Module-path base resolution.
//!
//! Descriptors that name a `module` instead of carrying a base are resolved
//! against a table of bases the application registers up front. The lookup
//! key is `module_base + module`, so a group of records can share a prefix:
//!
//! ```rust
//! use switchwire_container::prelude::*;
//!
//! struct PersonDao;
//!
//! let modules = ModuleResolver::new().with_module("dao/person", Base::constructor(|_| Ok(PersonDao)));
//! let descriptor = ComponentDescriptor::builder("PersonDAO")
//!     .module_base("dao/")
//!     .module("person")
//!     .build();
//!
//! assert!(modules.can_resolve(&descriptor));
//! assert!(modules.resolve(&descriptor).is_ok());
//! ```

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::descriptor::{Attribute, Base, ComponentDescriptor};
use crate::error::{Result, SwitchwireError};
use crate::processor::BaseResolver;

/// Resolves bases from an in-memory module table.
#[derive(Default)]
pub struct ModuleResolver {
    modules: RwLock<HashMap<String, Base>>,
}

impl ModuleResolver {
    /// Name the component context registers this resolver under.
    pub const COMPONENT_NAME: &'static str = "ModuleResolver";

    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a module, builder style.
    pub fn with_module(self, path: impl Into<String>, base: Base) -> Self {
        self.register_module(path, base);
        self
    }

    /// Adds or replaces a module.
    pub fn register_module(&self, path: impl Into<String>, base: Base) {
        let path = path.into();
        debug!(module = %path, kind = base.kind(), "Registered module");
        self.modules.write().insert(path, base);
    }

    pub fn has_module(&self, path: &str) -> bool {
        self.modules.read().contains_key(path)
    }

    /// A resolver-tagged descriptor serving this resolver.
    pub fn into_descriptor(self) -> ComponentDescriptor {
        ComponentDescriptor::builder(Self::COMPONENT_NAME)
            .value(self)
            .attr(Attribute::resolver::<ModuleResolver>())
            .build()
    }

    fn path(descriptor: &ComponentDescriptor) -> Option<String> {
        descriptor
            .module()
            .map(|module| format!("{}{module}", descriptor.module_base().unwrap_or_default()))
    }
}

impl BaseResolver for ModuleResolver {
    fn can_resolve(&self, descriptor: &ComponentDescriptor) -> bool {
        descriptor.module().is_some()
    }

    fn resolve(&self, descriptor: &ComponentDescriptor) -> Result<Base> {
        let path = Self::path(descriptor).unwrap_or_default();
        trace!(component = %descriptor.name(), module = %path, "Resolving module");

        self.modules
            .read()
            .get(&path)
            .cloned()
            .ok_or_else(|| SwitchwireError::UnresolvableComponent {
                component: descriptor.name().to_owned(),
                reason: Some(format!("no module registered at \"{path}\"")),
            })
    }
}

impl std::fmt::Debug for ModuleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut paths: Vec<String> = self.modules.read().keys().cloned().collect();
        paths.sort();
        f.debug_struct("ModuleResolver").field("modules", &paths).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(module: Option<&str>, base: Option<&str>) -> ComponentDescriptor {
        let mut builder = ComponentDescriptor::builder("Dao");
        if let Some(module) = module {
            builder = builder.module(module);
        }
        if let Some(base) = base {
            builder = builder.module_base(base);
        }
        builder.build()
    }

    #[test]
    fn claims_only_descriptors_with_module() {
        let resolver = ModuleResolver::new();
        assert!(resolver.can_resolve(&descriptor(Some("dao/person"), None)));
        assert!(!resolver.can_resolve(&descriptor(None, Some("dao/"))));
    }

    #[test]
    fn joins_base_and_module() {
        let resolver = ModuleResolver::new().with_module("dao/person", Base::value(7u8));
        assert!(resolver.has_module("dao/person"));

        let base = resolver.resolve(&descriptor(Some("person"), Some("dao/"))).unwrap();
        assert!(matches!(base, Base::Value(_)));
    }

    #[test]
    fn unknown_module_is_unresolvable() {
        let resolver = ModuleResolver::new();
        match resolver.resolve(&descriptor(Some("missing"), None)).unwrap_err() {
            SwitchwireError::UnresolvableComponent { component, reason } => {
                assert_eq!(component, "Dao");
                assert!(reason.unwrap().contains("\"missing\""));
            }
            other => panic!("Expected UnresolvableComponent, got: {other:?}"),
        }
    }

    #[test]
    fn descriptor_is_tagged_as_resolver() {
        let descriptor = ModuleResolver::new().into_descriptor();
        assert_eq!(descriptor.name(), ModuleResolver::COMPONENT_NAME);
        assert!(matches!(descriptor.attrs(), [Attribute::Resolver(_)]));
    }
}
