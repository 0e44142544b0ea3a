//! # The component factory
//!
//! Registers component descriptors, then builds and wires the instances
//! they describe.
//!
//! # Lifecycle
//! ```text
//! FactoryBuilder ──build()──> ComponentFactory (registering)
//!                                   │
//!                          register_component()*
//!                                   │
//!                            init_components()      eager singletons,
//!                                   │                 by priority
//!                                   ▼
//!                        ComponentFactory (locked) ──get_component()──> Instance
//!                                   │
//!                               destroy()
//!                                   ▼
//!                        ComponentFactory (destroyed)
//! ```
//!
//! # Examples
//! ```rust
//! use switchwire_container::prelude::*;
//! use std::sync::Arc;
//!
//! struct PersonDao;
//! struct HouseholdDao {
//!     persons: Arc<PersonDao>,
//! }
//!
//! let factory = ComponentFactory::new();
//! factory
//!     .register_component(ComponentDescriptor::builder("PersonDAO").constructor(|_| Ok(PersonDao)))
//!     .unwrap();
//! factory
//!     .register_component(
//!         ComponentDescriptor::builder("HouseholdDAO")
//!             .constructor(|args| Ok(HouseholdDao { persons: args.get::<PersonDao>(0)? }))
//!             .constructor_arg(OrderedArg::reference("PersonDAO")),
//!     )
//!     .unwrap();
//! factory.init_components().unwrap();
//!
//! let household = factory.get::<HouseholdDao>("HouseholdDAO").unwrap();
//! let persons = factory.get::<PersonDao>("PersonDAO").unwrap();
//! assert!(Arc::ptr_eq(&household.persons, &persons));
//! ```

use std::any::{Any, type_name};
use std::cell::RefCell;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex, RwLock};
use serde::Deserialize;
use switchwire_support::rendering::{shorten_type_name, suggest_similar};
use tracing::{debug, info, instrument, trace, warn};

use crate::descriptor::{
    Attribute, Base, ComponentDescriptor, ConstructorArgs, DEFAULT_PRIORITY, Instance, OrderedArg, ordered,
};
use crate::error::{CircularDependencyError, ComponentNotFoundError, Result, SwitchwireError};
use crate::graph::GraphValidator;
use crate::instance::InstanceWrapper;
use crate::processor::{BaseResolver, ComponentPostProcessor};
use crate::provider::{Provider, ProviderRegistry};
use crate::registry::ComponentRegistry;
use crate::scope::{PROTOTYPE, PrototypeScope, SINGLETON, ScopeStrategy, SingletonScope};

// ═══════════════════════════════════════════
// Settings & builder
// ═══════════════════════════════════════════

/// Factory-wide settings.
///
/// Deserializable so applications can keep them next to their component
/// records:
/// ```json
/// { "allowOverride": true, "defaultPriority": 20000 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FactorySettings {
    /// Replace registrations whose name or alias is already taken instead
    /// of failing with [`SwitchwireError::DuplicateComponent`].
    pub allow_override: bool,
    /// Priority of components with neither an explicit priority nor a
    /// role attribute.
    pub default_priority: i64,
}

impl Default for FactorySettings {
    fn default() -> Self {
        Self {
            allow_override: false,
            default_priority: DEFAULT_PRIORITY,
        }
    }
}

/// Builds a [`ComponentFactory`].
///
/// # Examples
/// ```rust,ignore
/// let factory = ComponentFactory::builder()
///     .allow_override(true)
///     .parent(app_factory)
///     .scope("request", RequestScope::default())
///     .build()?;
/// ```
pub struct FactoryBuilder {
    settings: FactorySettings,
    parent: Option<Arc<ComponentFactory>>,
    scopes: Vec<(String, Arc<dyn ScopeStrategy>)>,
}

impl FactoryBuilder {
    fn new() -> Self {
        Self {
            settings: FactorySettings::default(),
            parent: None,
            scopes: Vec::new(),
        }
    }

    /// Allow replacing previously registered components.
    pub fn allow_override(mut self, allow: bool) -> Self {
        self.settings.allow_override = allow;
        self
    }

    /// Baseline priority for ordinary components.
    pub fn default_priority(mut self, priority: i64) -> Self {
        self.settings.default_priority = priority;
        self
    }

    /// Replaces all settings at once.
    pub fn settings(mut self, settings: FactorySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Factory consulted for names this one does not know.
    pub fn parent(mut self, parent: Arc<ComponentFactory>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Registers a custom scope strategy.
    pub fn scope(mut self, name: impl Into<String>, strategy: impl ScopeStrategy + 'static) -> Self {
        self.scopes.push((name.into(), Arc::new(strategy)));
        self
    }

    /// Builds the factory.
    ///
    /// # Errors
    /// [`SwitchwireError::DuplicateScope`] if a custom scope reuses a name.
    pub fn build(self) -> Result<Arc<ComponentFactory>> {
        let factory = ComponentFactory::with_settings(self.settings);
        if let Some(parent) = self.parent {
            factory.set_parent_factory(parent);
        }
        for (name, strategy) in self.scopes {
            factory.register_scope(name, strategy)?;
        }
        Ok(factory)
    }
}

impl fmt::Debug for FactoryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryBuilder")
            .field("settings", &self.settings)
            .field("has_parent", &self.parent.is_some())
            .field("scopes", &self.scopes.iter().map(|(name, _)| name).collect::<Vec<_>>())
            .finish()
    }
}

// ═══════════════════════════════════════════
// ComponentFactory
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FactoryState {
    Registering,
    Locked,
    Destroyed,
}

/// A component whose role became active when it was created.
struct ActiveRole<C: ?Sized> {
    component: String,
    role: Arc<C>,
}

impl<C: ?Sized> Clone for ActiveRole<C> {
    fn clone(&self) -> Self {
        Self {
            component: self.component.clone(),
            role: Arc::clone(&self.role),
        }
    }
}

/// Registers component descriptors and resolves them into instances.
///
/// The factory is shared as `Arc<ComponentFactory>` and is `Send + Sync`.
/// Resolution is serialized per factory: one root [`get_component`] call
/// and everything it builds run under a re-entrant lock, so concurrent
/// callers never interleave their creation stacks.
///
/// [`get_component`]: ComponentFactory::get_component
pub struct ComponentFactory {
    me: Weak<ComponentFactory>,
    registry: RwLock<ComponentRegistry>,
    scopes: RwLock<Vec<(String, Arc<dyn ScopeStrategy>)>>,
    post_processors: Mutex<Vec<ActiveRole<dyn ComponentPostProcessor>>>,
    resolvers: Mutex<Vec<ActiveRole<dyn BaseResolver>>>,
    /// Names currently being created by the thread holding the lock.
    creation: ReentrantMutex<RefCell<Vec<String>>>,
    state: Mutex<FactoryState>,
    parent: RwLock<Option<Arc<ComponentFactory>>>,
    settings: FactorySettings,
}

impl ComponentFactory {
    /// A factory with default settings and the built-in scopes.
    pub fn new() -> Arc<Self> {
        Self::with_settings(FactorySettings::default())
    }

    /// Creates a new builder.
    pub fn builder() -> FactoryBuilder {
        FactoryBuilder::new()
    }

    fn with_settings(settings: FactorySettings) -> Arc<Self> {
        let builtin: Vec<(String, Arc<dyn ScopeStrategy>)> = vec![
            (SINGLETON.to_owned(), Arc::new(SingletonScope::new())),
            (PROTOTYPE.to_owned(), Arc::new(PrototypeScope::new())),
        ];

        Arc::new_cyclic(|me| ComponentFactory {
            me: me.clone(),
            registry: RwLock::new(ComponentRegistry::new()),
            scopes: RwLock::new(builtin),
            post_processors: Mutex::new(Vec::new()),
            resolvers: Mutex::new(Vec::new()),
            creation: ReentrantMutex::new(RefCell::new(Vec::new())),
            state: Mutex::new(FactoryState::Registering),
            parent: RwLock::new(None),
            settings,
        })
    }

    pub fn settings(&self) -> &FactorySettings {
        &self.settings
    }

    // ── Registration ──

    /// Registers a descriptor and computes its priority.
    ///
    /// # Errors
    /// - [`SwitchwireError::FactoryLocked`] after [`init_components`](Self::init_components)
    /// - [`SwitchwireError::InvalidDescriptor`] for malformed descriptors
    /// - [`SwitchwireError::DuplicateComponent`] on a name or alias collision
    pub fn register_component(&self, descriptor: impl Into<ComponentDescriptor>) -> Result<Arc<ComponentDescriptor>> {
        let descriptor = descriptor.into();
        let state = self.state.lock();
        Self::ensure_registering(*state, || format!("component \"{}\"", descriptor.name()))?;

        let priority = descriptor.compute_priority(self.settings.default_priority);
        self.registry
            .write()
            .register(descriptor.with_priority(priority), self.settings.allow_override)
    }

    /// Registers a scope strategy under `name`.
    ///
    /// # Errors
    /// [`SwitchwireError::FactoryLocked`] once locked,
    /// [`SwitchwireError::DuplicateScope`] if the name is taken.
    pub fn register_scope(&self, name: impl Into<String>, strategy: Arc<dyn ScopeStrategy>) -> Result<()> {
        let name = name.into();
        let state = self.state.lock();
        Self::ensure_registering(*state, || format!("scope \"{name}\""))?;

        let mut scopes = self.scopes.write();
        if scopes.iter().any(|(existing, _)| *existing == name) {
            return Err(SwitchwireError::DuplicateScope { scope: name });
        }
        debug!(scope = %name, "Registered scope");
        scopes.push((name, strategy));
        Ok(())
    }

    /// Registers everything a [`Provider`] module contributes.
    pub fn add_provider(&self, provider: &dyn Provider) -> Result<()> {
        debug!(provider = provider.name(), "Adding provider");
        provider.register(&mut FactoryRegistrar { factory: self })
    }

    /// Sets the factory consulted for names this one does not know.
    pub fn set_parent_factory(&self, parent: Arc<ComponentFactory>) {
        *self.parent.write() = Some(parent);
    }

    pub fn parent_factory(&self) -> Option<Arc<ComponentFactory>> {
        self.parent.read().clone()
    }

    // ── Initialization ──

    /// Locks the factory and eagerly creates every non-lazy singleton in
    /// ascending priority order (ties keep registration order).
    ///
    /// Fail-fast: the first creation error is returned and the factory
    /// stays locked with whatever was created so far.
    #[instrument(skip(self), name = "init_components")]
    pub fn init_components(&self) -> Result<()> {
        {
            let mut state = self.state.lock();
            match *state {
                FactoryState::Registering => *state = FactoryState::Locked,
                FactoryState::Locked => return Err(SwitchwireError::AlreadyLocked),
                FactoryState::Destroyed => return Err(SwitchwireError::FactoryDestroyed),
            }
        }

        let mut eager: Vec<Arc<ComponentDescriptor>> = self.registry.read().iter().cloned().collect();
        eager.sort_by_key(|d| d.priority().unwrap_or(self.settings.default_priority));
        eager.retain(|d| d.scope() == SINGLETON && !d.is_lazy());

        info!(registered = self.registry.read().len(), eager = eager.len(), "Initializing components");

        for descriptor in &eager {
            self.resolve(descriptor.name())?;
        }

        info!("Components initialized ✓");
        Ok(())
    }

    // ── Lookup ──

    /// Returns the instance for a name or alias, creating it if its scope
    /// has none.
    ///
    /// Unknown names are delegated to the parent factory.
    pub fn get_component(&self, name_or_alias: &str) -> Result<Instance> {
        match *self.state.lock() {
            FactoryState::Registering => return Err(SwitchwireError::NotInitialized),
            FactoryState::Destroyed => return Err(SwitchwireError::FactoryDestroyed),
            FactoryState::Locked => {}
        }
        trace!(component = %name_or_alias, "Getting component");
        self.resolve(name_or_alias)
    }

    /// Typed [`get_component`](Self::get_component).
    ///
    /// ```rust,ignore
    /// let dao: Arc<PersonDao> = factory.get("PersonDAO")?;
    /// ```
    pub fn get<T: Any + Send + Sync>(&self, name_or_alias: &str) -> Result<Arc<T>> {
        self.get_component(name_or_alias)?
            .downcast::<T>()
            .map_err(|_| SwitchwireError::TypeMismatch {
                component: name_or_alias.to_owned(),
                expected: shorten_type_name(type_name::<T>()),
            })
    }

    /// Whether this factory (or, with `check_parent`, any ancestor) knows
    /// the name or alias.
    pub fn has_component(&self, name_or_alias: &str, check_parent: bool) -> bool {
        if self.registry.read().has(name_or_alias) {
            return true;
        }
        check_parent
            && self
                .parent_factory()
                .is_some_and(|parent| parent.has_component(name_or_alias, true))
    }

    /// Canonical name for a name or alias registered here.
    pub fn normalize_component_name(&self, name_or_alias: &str) -> Option<String> {
        self.registry.read().normalize(name_or_alias).map(str::to_owned)
    }

    /// Descriptor registered here under a name or alias.
    pub fn descriptor(&self, name_or_alias: &str) -> Option<Arc<ComponentDescriptor>> {
        self.registry.read().get(name_or_alias)
    }

    /// Canonical names under a dotted namespace.
    pub fn components_in_namespace(&self, namespace: &str) -> Vec<String> {
        self.registry
            .read()
            .in_namespace(namespace)
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    /// Scope strategy registered under `name`.
    pub fn scope(&self, name: &str) -> Option<Arc<dyn ScopeStrategy>> {
        self.scopes
            .read()
            .iter()
            .find(|(scope, _)| scope == name)
            .map(|(_, strategy)| Arc::clone(strategy))
    }

    /// `true` once [`init_components`](Self::init_components) ran.
    pub fn is_locked(&self) -> bool {
        *self.state.lock() != FactoryState::Registering
    }

    pub fn is_destroyed(&self) -> bool {
        *self.state.lock() == FactoryState::Destroyed
    }

    /// Checks the reference graph for cycles and dangling references
    /// without creating anything.
    ///
    /// References satisfied by the parent factory are accepted. Lazy and
    /// prototype cycles only fail when requested, so this check is never
    /// run implicitly.
    #[instrument(skip(self), name = "validate_components")]
    pub fn validate(&self) -> Result<()> {
        let parent = self.parent_factory();
        let registry = self.registry.read();
        GraphValidator::new(&registry, |name: &str| {
            parent.as_ref().is_some_and(|p| p.has_component(name, true))
        })
        .validate()
    }

    // ── Teardown ──

    /// Destroys every scope, running the destroy hooks of managed
    /// instances, and detaches the parent.
    ///
    /// Calling it again is a no-op; every other operation afterwards fails
    /// with [`SwitchwireError::FactoryDestroyed`].
    pub fn destroy(&self) {
        let _resolution = self.creation.lock();
        {
            let mut state = self.state.lock();
            if *state == FactoryState::Destroyed {
                return;
            }
            *state = FactoryState::Destroyed;
        }

        info!("Destroying component factory");
        self.parent.write().take();

        let scopes = std::mem::take(&mut *self.scopes.write());
        for (name, scope) in scopes {
            debug!(scope = %name, "Destroying scope");
            scope.destroy_all();
        }

        self.post_processors.lock().clear();
        self.resolvers.lock().clear();
        info!("Component factory destroyed ✓");
    }

    // ── Resolution (internal) ──

    fn ensure_registering(state: FactoryState, what: impl FnOnce() -> String) -> Result<()> {
        match state {
            FactoryState::Registering => Ok(()),
            FactoryState::Locked => Err(SwitchwireError::FactoryLocked { what: what() }),
            FactoryState::Destroyed => Err(SwitchwireError::FactoryDestroyed),
        }
    }

    fn resolve(&self, requested: &str) -> Result<Instance> {
        let descriptor = self.registry.read().get(requested);
        let Some(descriptor) = descriptor else {
            if let Some(parent) = self.parent_factory() {
                trace!(component = %requested, "Delegating to parent factory");
                return parent.get_component(requested);
            }
            return Err(self.not_found(requested));
        };
        let name = descriptor.name();

        let creation = self.creation.lock();
        let _entry = CreationEntry::enter(&creation, name, requested)?;

        let scope = self.scope(descriptor.scope()).ok_or_else(|| SwitchwireError::UnknownScope {
            component: name.to_owned(),
            scope: descriptor.scope().to_owned(),
        })?;

        let wrapper = scope.get_or_create(name, &mut || self.create_component(&descriptor))?;
        wrapper.instance().ok_or(SwitchwireError::FactoryDestroyed)
    }

    fn not_found(&self, requested: &str) -> SwitchwireError {
        let required_by = self.creation.lock().borrow().last().cloned();
        let registry = self.registry.read();
        SwitchwireError::ComponentNotFound(ComponentNotFoundError {
            requested: requested.to_owned(),
            required_by,
            suggestions: suggest_similar(requested, &registry.keys(), 3),
        })
    }

    fn create_component(&self, descriptor: &Arc<ComponentDescriptor>) -> Result<InstanceWrapper> {
        let name = descriptor.name();
        debug!(component = %name, scope = descriptor.scope(), "Creating component");

        let mut instance = match descriptor.factory_method() {
            Some(method) => {
                let target = match descriptor.factory_component() {
                    Some(factory_component) => self.resolve(factory_component)?,
                    None => match self.component_base(descriptor)? {
                        Base::Value(target) => target,
                        Base::Constructor(_) => {
                            return Err(SwitchwireError::invalid_descriptor(
                                name,
                                "the factory method target resolved to a constructor, not a value",
                            ));
                        }
                    },
                };
                trace!(component = %name, method = method.name(), "Calling factory method");
                method.invoke(name, &target)?
            }
            None => match self.component_base(descriptor)? {
                Base::Value(value) => value,
                Base::Constructor(constructor) => {
                    let args = self.constructor_args(descriptor)?;
                    constructor(ConstructorArgs::new(name, args))?
                }
            },
        };

        self.inject_properties(descriptor, &instance)?;

        let processors = self.post_processors.lock().clone();
        for processor in &processors {
            trace!(component = %name, processor = %processor.component, "Pre-init");
            processor.role.pre_init(&instance, descriptor)?;
        }

        if let Some(hook) = descriptor.init_method() {
            trace!(component = %name, hook = hook.name(), "Running init hook");
            hook.invoke(name, &instance)?;
        }

        let constructed = Arc::clone(&instance);
        for processor in &processors {
            if let Some(replacement) = processor.role.post_init(&instance, descriptor)? {
                debug!(component = %name, processor = %processor.component, "Instance replaced by post-processor");
                instance = replacement;
            }
        }

        self.apply_attributes(descriptor, &instance)?;
        Ok(InstanceWrapper::proxied(instance, constructed, Arc::clone(descriptor)))
    }

    fn component_base(&self, descriptor: &ComponentDescriptor) -> Result<Base> {
        if let Some(base) = descriptor.base() {
            return Ok(base.clone());
        }

        let resolvers = self.resolvers.lock().clone();
        match resolvers.iter().find(|r| r.role.can_resolve(descriptor)) {
            Some(resolver) => {
                debug!(component = %descriptor.name(), resolver = %resolver.component, "Resolving base");
                resolver.role.resolve(descriptor)
            }
            None => Err(SwitchwireError::UnresolvableComponent {
                component: descriptor.name().to_owned(),
                reason: None,
            }),
        }
    }

    fn constructor_args(&self, descriptor: &ComponentDescriptor) -> Result<Vec<Instance>> {
        ordered(descriptor.constructor_args(), |arg| arg.index)
            .into_iter()
            .enumerate()
            .map(|(position, arg)| {
                self.argument(descriptor, arg, "constructor argument", arg.index.unwrap_or(position))
            })
            .collect()
    }

    fn inject_properties(&self, descriptor: &ComponentDescriptor, instance: &Instance) -> Result<()> {
        for (position, property) in ordered(descriptor.properties(), |p| p.arg().index)
            .into_iter()
            .enumerate()
        {
            let arg = property.arg();
            let value = self.argument(descriptor, arg, "property", arg.index.unwrap_or(position))?;
            trace!(component = %descriptor.name(), property = property.name(), "Injecting property");
            property.inject(descriptor.name(), instance, value)?;
        }
        Ok(())
    }

    fn argument(
        &self,
        descriptor: &ComponentDescriptor,
        arg: &OrderedArg,
        kind: &'static str,
        position: usize,
    ) -> Result<Instance> {
        if let Some(reference) = &arg.reference {
            return self.resolve(reference);
        }
        arg.value.clone().ok_or_else(|| SwitchwireError::InvalidArgument {
            component: descriptor.name().to_owned(),
            kind,
            position,
        })
    }

    fn apply_attributes(&self, descriptor: &ComponentDescriptor, instance: &Instance) -> Result<()> {
        let name = descriptor.name();
        for attr in descriptor.attrs() {
            match attr {
                Attribute::PostProcessor(capability) => {
                    let role = Self::view(name, attr, capability.view(instance))?;
                    activate(&self.post_processors, name, role);
                }
                Attribute::Resolver(capability) => {
                    let role = Self::view(name, attr, capability.view(instance))?;
                    activate(&self.resolvers, name, role);
                }
                Attribute::FactoryAware(capability) => {
                    let role = Self::view(name, attr, capability.view(instance))?;
                    role.set_component_factory(self.me.clone());
                }
                Attribute::Tag(_) => {}
            }
        }
        Ok(())
    }

    fn view<C: ?Sized>(component: &str, attr: &Attribute, role: Option<Arc<C>>) -> Result<Arc<C>> {
        role.ok_or_else(|| {
            let capability = match attr {
                Attribute::Resolver(_) => Attribute::RESOLVER,
                Attribute::PostProcessor(_) => Attribute::POST_PROCESSOR,
                _ => Attribute::FACTORY_AWARE,
            };
            warn!(component = %component, capability, "Instance does not provide its tagged role");
            SwitchwireError::MissingCapability {
                component: component.to_owned(),
                capability,
            }
        })
    }
}

fn activate<C: ?Sized>(roles: &Mutex<Vec<ActiveRole<C>>>, component: &str, role: Arc<C>) {
    let mut roles = roles.lock();
    if roles.iter().any(|active| active.component == component) {
        return;
    }
    debug!(component = %component, "Role activated");
    roles.push(ActiveRole {
        component: component.to_owned(),
        role,
    });
}

impl Drop for ComponentFactory {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl fmt::Debug for ComponentFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentFactory")
            .field("registered", &self.registry.read().len())
            .field("state", &*self.state.lock())
            .field("has_parent", &self.parent.read().is_some())
            .finish()
    }
}

// ═══════════════════════════════════════════
// Creation stack entry
// ═══════════════════════════════════════════

/// Marks a name as being created; popped on drop, so every exit path
/// (including panics) leaves the stack as it found it.
struct CreationEntry<'a> {
    stack: &'a RefCell<Vec<String>>,
}

impl<'a> CreationEntry<'a> {
    fn enter(stack: &'a RefCell<Vec<String>>, name: &str, requested: &str) -> Result<Self> {
        let mut entries = stack.borrow_mut();
        if entries.iter().any(|entry| entry == name) {
            let mut chain = entries.clone();
            chain.push(name.to_owned());
            warn!(component = %name, chain = ?chain, "Circular dependency detected");
            return Err(SwitchwireError::CircularDependency(CircularDependencyError {
                requested: requested.to_owned(),
                chain,
            }));
        }
        entries.push(name.to_owned());
        Ok(Self { stack })
    }
}

impl Drop for CreationEntry<'_> {
    fn drop(&mut self) {
        self.stack.borrow_mut().pop();
    }
}

// ═══════════════════════════════════════════
// FactoryRegistrar (internal bridge)
// ═══════════════════════════════════════════

/// Lets providers register into a shared factory.
struct FactoryRegistrar<'a> {
    factory: &'a ComponentFactory,
}

impl ProviderRegistry for FactoryRegistrar<'_> {
    fn register_component(&mut self, descriptor: ComponentDescriptor) -> Result<()> {
        self.factory.register_component(descriptor).map(drop)
    }
}

// ═══════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════

pub mod prelude {
    pub use super::{ComponentFactory, FactoryBuilder, FactorySettings};
    pub use crate::config::ComponentConfig;
    pub use crate::context::ComponentContext;
    pub use crate::descriptor::{
        Attribute, Base, ComponentDescriptor, ConstructorArgs, FactoryMethod, Instance, LifecycleHook, OrderedArg,
        PropertyArg, instance,
    };
    pub use crate::error::{Result, SwitchwireError};
    pub use crate::processor::{BaseResolver, ComponentPostProcessor, ComponentSource, FactoryAware};
    pub use crate::provider::{Provider, ProviderRegistry};
    pub use crate::resolver::ModuleResolver;
    pub use crate::scope::{PROTOTYPE, SINGLETON, ScopeStrategy};
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════
