//! Capabilities the factory calls components through.
//!
//! Resolvers, post-processors and factory-aware components are ordinary
//! components tagged with an [`Attribute`](crate::descriptor::Attribute).
//! The attribute carries a [`Capability`] view that turns the erased
//! instance back into the trait object the factory needs.

use std::fmt;
use std::sync::{Arc, Weak};

use crate::descriptor::{Base, ComponentDescriptor, Instance};
use crate::error::Result;
use crate::factory::ComponentFactory;

/// Derives a base for descriptors registered without one.
///
/// Resolvers are asked in the order they became active; the first whose
/// [`can_resolve`](BaseResolver::can_resolve) returns `true` wins.
pub trait BaseResolver: Send + Sync {
    /// Whether this resolver knows how to produce a base for `descriptor`.
    fn can_resolve(&self, descriptor: &ComponentDescriptor) -> bool;

    /// Produces the base. Only called after `can_resolve` returned `true`.
    fn resolve(&self, descriptor: &ComponentDescriptor) -> Result<Base>;
}

/// Intercepts every component created after this one became active.
///
/// # Examples
/// ```rust
/// use switchwire_container::descriptor::{ComponentDescriptor, Instance};
/// use switchwire_container::error::Result;
/// use switchwire_container::processor::ComponentPostProcessor;
///
/// struct Audit;
///
/// impl ComponentPostProcessor for Audit {
///     fn pre_init(&self, _instance: &Instance, descriptor: &ComponentDescriptor) -> Result<()> {
///         println!("creating {}", descriptor.name());
///         Ok(())
///     }
/// }
/// ```
pub trait ComponentPostProcessor: Send + Sync {
    /// Runs before the init hook. Side effects only.
    fn pre_init(&self, _instance: &Instance, _descriptor: &ComponentDescriptor) -> Result<()> {
        Ok(())
    }

    /// Runs after the init hook. Returning `Some` replaces the instance
    /// for every later processor and for the caller.
    fn post_init(&self, _instance: &Instance, _descriptor: &ComponentDescriptor) -> Result<Option<Instance>> {
        Ok(None)
    }
}

/// Target of [`FactoryMethod::Default`](crate::descriptor::FactoryMethod::Default).
pub trait ComponentSource: Send + Sync {
    /// Builds the component.
    fn get_component(&self) -> Result<Instance>;
}

/// Receives a back-reference to the factory that created it.
///
/// The reference is weak: singletons are owned by the factory and a strong
/// reference back would keep both alive forever.
pub trait FactoryAware: Send + Sync {
    fn set_component_factory(&self, factory: Weak<ComponentFactory>);
}

type ViewFn<C> = dyn Fn(&Instance) -> Option<Arc<C>> + Send + Sync;

/// Turns an erased instance into `Arc<C>`, if it provides `C`.
pub struct Capability<C: ?Sized> {
    view: Arc<ViewFn<C>>,
}

impl<C: ?Sized + 'static> Capability<C> {
    /// A view from a function.
    pub fn new<F>(view: F) -> Self
    where
        F: Fn(&Instance) -> Option<Arc<C>> + Send + Sync + 'static,
    {
        Self { view: Arc::new(view) }
    }

    /// A view for instances stored as `Arc<C>` (an `Arc` of the trait
    /// object itself, boxed once more into the instance).
    pub fn erased() -> Self {
        Self::new(|instance: &Instance| instance.downcast_ref::<Arc<C>>().cloned())
    }

    /// Applies the view.
    pub fn view(&self, instance: &Instance) -> Option<Arc<C>> {
        (self.view)(instance)
    }
}

impl<C: ?Sized> Clone for Capability<C> {
    fn clone(&self) -> Self {
        Self {
            view: Arc::clone(&self.view),
        }
    }
}

impl<C: ?Sized> fmt::Debug for Capability<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Capability")
    }
}
