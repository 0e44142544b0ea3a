//! Instance lifetime scopes.
//!
//! A scope decides whether a component is built once or on every request,
//! and whether its destroy hook runs when the factory is torn down:
//! - [`SingletonScope`]: one instance per name, destroyed with the factory
//! - [`PrototypeScope`]: a new instance per request, never tracked
//!
//! Scopes are registered on the factory by name. Custom strategies only
//! need to implement [`ScopeStrategy`].

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::Result;
use crate::instance::InstanceWrapper;

/// Name of the built-in singleton scope, the default for descriptors.
pub const SINGLETON: &str = "singleton";
/// Name of the built-in prototype scope.
pub const PROTOTYPE: &str = "prototype";

/// Storage policy for the instances of one scope.
pub trait ScopeStrategy: Send + Sync {
    /// Returns the instance for `name`, calling `create` when the scope has
    /// none to give.
    fn get_or_create(
        &self,
        name: &str,
        create: &mut dyn FnMut() -> Result<InstanceWrapper>,
    ) -> Result<Arc<InstanceWrapper>>;

    /// Tears down every instance the scope manages.
    fn destroy_all(&self);
}

// ═══════════════════════════════════════════
// Singleton
// ═══════════════════════════════════════════

/// One instance per component name.
///
/// Creation runs at most once per name, even when several threads ask at
/// the same time. A failed creation caches nothing.
#[derive(Default)]
pub struct SingletonScope {
    cells: DashMap<String, Arc<OnceCell<Arc<InstanceWrapper>>>>,
    order: Mutex<Vec<String>>,
}

impl SingletonScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if an instance for `name` is cached.
    pub fn contains(&self, name: &str) -> bool {
        self.cells.get(name).is_some_and(|cell| cell.get().is_some())
    }

    /// Number of cached instances.
    pub fn len(&self) -> usize {
        self.order.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ScopeStrategy for SingletonScope {
    fn get_or_create(
        &self,
        name: &str,
        create: &mut dyn FnMut() -> Result<InstanceWrapper>,
    ) -> Result<Arc<InstanceWrapper>> {
        // Clone the cell out so no map shard is locked while `create` runs
        // and resolves other singletons.
        let cell = Arc::clone(&self.cells.entry(name.to_owned()).or_default());

        let mut created = false;
        let result = cell.get_or_try_init(|| {
            created = true;
            create().map(Arc::new)
        });

        match result {
            Ok(wrapper) => {
                if created {
                    debug!(component = %name, "Cached singleton");
                    self.order.lock().push(name.to_owned());
                } else {
                    trace!(component = %name, "Singleton cache hit");
                }
                Ok(Arc::clone(wrapper))
            }
            Err(error) => {
                self.cells.remove_if(name, |_, cell| cell.get().is_none());
                Err(error)
            }
        }
    }

    /// Destroys cached instances in reverse creation order, so a component
    /// is torn down before the ones it was built from.
    fn destroy_all(&self) {
        let order = std::mem::take(&mut *self.order.lock());
        debug!(count = order.len(), "Destroying singletons");

        for name in order.iter().rev() {
            if let Some((_, cell)) = self.cells.remove(name) {
                if let Some(wrapper) = cell.get() {
                    wrapper.destroy();
                }
            }
        }
        self.cells.clear();
    }
}

impl fmt::Debug for SingletonScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonScope")
            .field("cached", &self.len())
            .finish()
    }
}

// ═══════════════════════════════════════════
// Prototype
// ═══════════════════════════════════════════

/// A new instance on every request. Instances belong to the caller and are
/// never destroyed by the factory.
#[derive(Debug, Default)]
pub struct PrototypeScope;

impl PrototypeScope {
    pub fn new() -> Self {
        Self
    }
}

impl ScopeStrategy for PrototypeScope {
    fn get_or_create(
        &self,
        name: &str,
        create: &mut dyn FnMut() -> Result<InstanceWrapper>,
    ) -> Result<Arc<InstanceWrapper>> {
        trace!(component = %name, "Creating prototype");
        create().map(Arc::new)
    }

    fn destroy_all(&self) {}
}
