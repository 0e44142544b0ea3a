//! Component registry. Stores all descriptors of one factory.
//!
//! The registry maps component names and aliases to descriptors. Names may
//! use dotted namespaces (`dao.PersonDAO`); a namespace is just a prefix.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::descriptor::ComponentDescriptor;
use crate::error::{DuplicateComponentError, Result, SwitchwireError};

/// Stores all component registrations.
///
/// The registry is append-only while the factory is registering and
/// read-only once it is locked.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    /// Registration order. Overridden entries are replaced in place.
    descriptors: Vec<Arc<ComponentDescriptor>>,
    /// Name or alias → position in `descriptors`.
    keys: HashMap<String, usize>,
}

impl ComponentRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor under its name and every alias.
    ///
    /// # Errors
    /// Returns [`SwitchwireError::DuplicateComponent`] if the name or an
    /// alias is already taken and `allow_override` is false. With
    /// `allow_override` the previous owner of the name is replaced and
    /// loses all its keys; colliding aliases of other components move over.
    /// An alias may never take another component's name, even with
    /// `allow_override`.
    pub fn register(
        &mut self,
        descriptor: ComponentDescriptor,
        allow_override: bool,
    ) -> Result<Arc<ComponentDescriptor>> {
        descriptor.validate()?;

        let name = descriptor.name().to_owned();
        let keys: Vec<&str> = std::iter::once(descriptor.name())
            .chain(descriptor.aliases().iter().map(String::as_str))
            .collect();

        for key in &keys {
            let Some(existing) = self.owner_of(key) else {
                continue;
            };
            let shadows_name = *key != name && existing == *key;
            if !allow_override || shadows_name {
                return Err(SwitchwireError::DuplicateComponent(DuplicateComponentError {
                    key: (*key).to_owned(),
                    existing: existing.to_owned(),
                    component: name,
                }));
            }
        }

        let keys: Vec<String> = keys.into_iter().map(str::to_owned).collect();
        let descriptor = Arc::new(descriptor);

        let position = match self.keys.get(&name).copied() {
            Some(position) if self.descriptors[position].name() == name => {
                debug!(component = %name, "Overriding component registration");
                self.keys.retain(|_, p| *p != position);
                self.descriptors[position] = Arc::clone(&descriptor);
                position
            }
            _ => {
                self.descriptors.push(Arc::clone(&descriptor));
                self.descriptors.len() - 1
            }
        };

        for key in keys {
            self.keys.insert(key, position);
        }

        debug!(
            component = %name,
            aliases = ?descriptor.aliases(),
            scope = descriptor.scope(),
            priority = ?descriptor.priority(),
            "Registered component"
        );
        Ok(descriptor)
    }

    /// Looks up a descriptor by name or alias.
    pub fn get(&self, name_or_alias: &str) -> Option<Arc<ComponentDescriptor>> {
        let position = *self.keys.get(name_or_alias)?;
        let descriptor = &self.descriptors[position];
        if descriptor.name() != name_or_alias {
            trace!(from = %name_or_alias, to = %descriptor.name(), "Following alias");
        }
        Some(Arc::clone(descriptor))
    }

    /// Returns `true` if the name or alias is registered.
    pub fn has(&self, name_or_alias: &str) -> bool {
        self.keys.contains_key(name_or_alias)
    }

    /// Returns the canonical name for a name or alias.
    pub fn normalize(&self, name_or_alias: &str) -> Option<&str> {
        self.keys
            .get(name_or_alias)
            .map(|&position| self.descriptors[position].name())
    }

    /// Iterates descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ComponentDescriptor>> {
        self.descriptors.iter()
    }

    /// Canonical names registered under a dotted namespace.
    ///
    /// `in_namespace("dao")` matches `dao.PersonDAO` and `dao.sql.Pool`
    /// but not `daos.Other`.
    pub fn in_namespace(&self, namespace: &str) -> Vec<&str> {
        let prefix = format!("{}.", namespace.trim_end_matches('.'));
        self.descriptors
            .iter()
            .map(|d| d.name())
            .filter(|name| name.starts_with(&prefix))
            .collect()
    }

    /// Canonical names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.name()).collect()
    }

    /// Every registered name and alias, for diagnostics.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys = self.names();
        keys.extend(
            self.descriptors
                .iter()
                .flat_map(|d| d.aliases().iter().map(String::as_str))
                .filter(|alias| self.keys.contains_key(*alias)),
        );
        keys
    }

    /// Returns the number of registered components.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if no components are registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    fn owner_of(&self, key: &str) -> Option<&str> {
        self.normalize(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dao;

    fn descriptor(name: &str, aliases: &[&str]) -> ComponentDescriptor {
        ComponentDescriptor::builder(name)
            .value(Dao)
            .aliases(aliases.iter().copied())
            .build()
    }

    #[test]
    fn register_and_get() {
        let mut reg = ComponentRegistry::new();
        reg.register(descriptor("PersonDAO", &[]), false).unwrap();
        assert!(reg.get("PersonDAO").is_some());
        assert!(reg.has("PersonDAO"));
        assert!(!reg.has("Other"));
    }

    #[test]
    fn alias_normalizes_to_name() {
        let mut reg = ComponentRegistry::new();
        reg.register(descriptor("Foo", &["F", "Fu"]), false).unwrap();

        assert_eq!(reg.normalize("F"), Some("Foo"));
        assert_eq!(reg.normalize("Foo"), Some("Foo"));
        assert_eq!(reg.normalize("Bar"), None);
        assert_eq!(reg.get("Fu").unwrap().name(), "Foo");
    }

    #[test]
    fn duplicate_name_fails() {
        let mut reg = ComponentRegistry::new();
        reg.register(descriptor("Foo", &[]), false).unwrap();
        let err = reg.register(descriptor("Foo", &[]), false).unwrap_err();
        assert!(matches!(err, SwitchwireError::DuplicateComponent(_)));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn alias_colliding_with_name_fails() {
        let mut reg = ComponentRegistry::new();
        reg.register(descriptor("Foo", &["F"]), false).unwrap();

        match reg.register(descriptor("Bar", &["Foo"]), false).unwrap_err() {
            SwitchwireError::DuplicateComponent(e) => {
                assert_eq!(e.key, "Foo");
                assert_eq!(e.existing, "Foo");
                assert_eq!(e.component, "Bar");
            }
            other => panic!("Expected DuplicateComponent, got: {other:?}"),
        }
        assert!(reg.register(descriptor("F", &[]), false).is_err());
    }

    #[test]
    fn override_replaces_in_place() {
        let mut reg = ComponentRegistry::new();
        reg.register(descriptor("A", &[]), false).unwrap();
        reg.register(descriptor("Foo", &["F"]), false).unwrap();
        reg.register(descriptor("Foo", &["G"]), true).unwrap();

        assert_eq!(reg.len(), 2);
        assert!(!reg.has("F"));
        assert_eq!(reg.normalize("G"), Some("Foo"));
        let order: Vec<_> = reg.iter().map(|d| d.name().to_owned()).collect();
        assert_eq!(order, ["A", "Foo"]);
    }

    #[test]
    fn override_moves_colliding_alias() {
        let mut reg = ComponentRegistry::new();
        reg.register(descriptor("Foo", &["F"]), false).unwrap();
        reg.register(descriptor("Bar", &["F"]), true).unwrap();

        assert_eq!(reg.normalize("F"), Some("Bar"));
        assert_eq!(reg.normalize("Foo"), Some("Foo"));
    }

    #[test]
    fn override_never_lets_alias_take_a_name() {
        let mut reg = ComponentRegistry::new();
        reg.register(descriptor("Foo", &[]), false).unwrap();

        match reg.register(descriptor("Bar", &["Foo"]), true).unwrap_err() {
            SwitchwireError::DuplicateComponent(e) => {
                assert_eq!(e.key, "Foo");
                assert_eq!(e.existing, "Foo");
                assert_eq!(e.component, "Bar");
            }
            other => panic!("Expected DuplicateComponent, got: {other:?}"),
        }
        assert_eq!(reg.names(), ["Foo"]);
        assert_eq!(reg.get("Foo").unwrap().name(), "Foo");
        assert!(!reg.has("Bar"));
    }

    #[test]
    fn namespace_lists_dotted_names() {
        let mut reg = ComponentRegistry::new();
        reg.register(descriptor("dao.PersonDAO", &[]), false).unwrap();
        reg.register(descriptor("dao.sql.Pool", &[]), false).unwrap();
        reg.register(descriptor("daos.Other", &[]), false).unwrap();

        assert_eq!(reg.in_namespace("dao"), ["dao.PersonDAO", "dao.sql.Pool"]);
        assert_eq!(reg.in_namespace("dao.sql."), ["dao.sql.Pool"]);
    }

    #[test]
    fn invalid_descriptor_is_rejected() {
        let mut reg = ComponentRegistry::new();
        assert!(reg.register(descriptor("", &[]), false).is_err());
        assert!(reg.is_empty());
    }
}
