//! Pairs a created instance with its descriptor.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::descriptor::{ComponentDescriptor, Instance};

struct Slot {
    instance: Instance,
    /// What lifecycle hooks run against. Differs from `instance` when a
    /// post-processor replaced it.
    target: Instance,
    descriptor: Arc<ComponentDescriptor>,
}

/// Owns one created instance so its destroy hook can run generically.
///
/// Scopes store wrappers; the factory only hands out the inner instance.
pub struct InstanceWrapper {
    slot: Mutex<Option<Slot>>,
}

impl InstanceWrapper {
    pub fn new(instance: Instance, descriptor: Arc<ComponentDescriptor>) -> Self {
        Self::proxied(Arc::clone(&instance), instance, descriptor)
    }

    /// Wraps a replacement handed out in place of `target`, the instance
    /// the descriptor built. The destroy hook still runs against `target`.
    pub fn proxied(instance: Instance, target: Instance, descriptor: Arc<ComponentDescriptor>) -> Self {
        Self {
            slot: Mutex::new(Some(Slot {
                instance,
                target,
                descriptor,
            })),
        }
    }

    /// The wrapped instance, `None` once destroyed.
    pub fn instance(&self) -> Option<Instance> {
        self.slot.lock().as_ref().map(|slot| Arc::clone(&slot.instance))
    }

    /// The descriptor the instance was built from, `None` once destroyed.
    pub fn descriptor(&self) -> Option<Arc<ComponentDescriptor>> {
        self.slot.lock().as_ref().map(|slot| Arc::clone(&slot.descriptor))
    }

    pub fn is_destroyed(&self) -> bool {
        self.slot.lock().is_none()
    }

    /// Runs the destroy hook, then releases the instance and descriptor.
    ///
    /// Hook failures are logged and swallowed so the rest of a teardown
    /// still runs. Calling this twice is a no-op.
    pub fn destroy(&self) {
        let taken = self.slot.lock().take();
        let Some(slot) = taken else {
            return;
        };

        let name = slot.descriptor.name();
        if let Some(hook) = slot.descriptor.destroy_method() {
            debug!(component = %name, hook = hook.name(), "Running destroy hook");
            if let Err(error) = hook.invoke(name, &slot.target) {
                warn!(component = %name, hook = hook.name(), %error, "Destroy hook failed");
            }
        }
    }
}

impl fmt::Debug for InstanceWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let component = self.descriptor().map(|d| d.name().to_owned());
        f.debug_struct("InstanceWrapper")
            .field("component", &component)
            .field("destroyed", &component.is_none())
            .finish()
    }
}
