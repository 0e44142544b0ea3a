//! Component descriptors, the data contract the factory consumes.
//!
//! A [`ComponentDescriptor`] says how to build one component: what its
//! [`Base`] is (a ready value or a constructor), whether a factory method
//! is called instead, which arguments and properties to inject, which
//! lifecycle hooks to run, and which container roles it plays.
//!
//! Lifecycle hooks and factory methods are bound to concrete functions when
//! the descriptor is built, so nothing is looked up by name at creation time.
//!
//! # Examples
//! ```rust
//! use switchwire_container::descriptor::{ComponentDescriptor, OrderedArg};
//!
//! struct PersonDao;
//! struct HouseholdDao { persons: std::sync::Arc<PersonDao> }
//!
//! let person = ComponentDescriptor::builder("PersonDAO")
//!     .constructor(|_| Ok(PersonDao))
//!     .build();
//!
//! let household = ComponentDescriptor::builder("HouseholdDAO")
//!     .constructor(|args| Ok(HouseholdDao { persons: args.get::<PersonDao>(0)? }))
//!     .constructor_arg(OrderedArg::reference("PersonDAO"))
//!     .destroy_method("destroy", |_: &HouseholdDao| Ok(()))
//!     .build();
//!
//! assert_eq!(household.constructor_args().len(), 1);
//! assert!(person.base().is_some());
//! ```

use std::any::{Any, type_name};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use switchwire_support::rendering::shorten_type_name;

use crate::error::{Result, SwitchwireError};
use crate::processor::{BaseResolver, Capability, ComponentPostProcessor, ComponentSource, FactoryAware};
use crate::scope::{PROTOTYPE, SINGLETON};

/// A type-erased component instance.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Erases a value into an [`Instance`].
pub fn instance<T: Any + Send + Sync>(value: T) -> Instance {
    Arc::new(value)
}

/// Baseline priority for components without a role attribute.
pub const DEFAULT_PRIORITY: i64 = 10_000;
/// Priority of components tagged as base resolvers.
pub const RESOLVER_PRIORITY: i64 = 1_000;
/// Priority of components tagged as post-processors.
pub const POST_PROCESSOR_PRIORITY: i64 = 5_000;

type ConstructorFn = dyn Fn(ConstructorArgs) -> Result<Instance> + Send + Sync;
type MethodFn = dyn Fn(&str, &Instance) -> Result<Instance> + Send + Sync;
type HookFn = dyn Fn(&str, &Instance) -> Result<()> + Send + Sync;
type SetterFn = dyn Fn(&str, &Instance, Instance) -> Result<()> + Send + Sync;

/// Downcasts `instance` to `T`, naming `component` and `role` on failure.
pub(crate) fn downcast_ref<'a, T: Any>(component: &str, instance: &'a Instance, role: &str) -> Result<&'a T> {
    instance
        .downcast_ref::<T>()
        .ok_or_else(|| SwitchwireError::TypeMismatch {
            component: component.to_owned(),
            expected: format!("{role} of type {}", shorten_type_name(type_name::<T>())),
        })
}

// ═══════════════════════════════════════════
// Base
// ═══════════════════════════════════════════

/// What a component is built from.
///
/// The variant is the explicit kind flag: a value is used as-is, a
/// constructor is called with the resolved constructor arguments.
#[derive(Clone)]
pub enum Base {
    /// An object used directly as the instance.
    Value(Instance),
    /// A function building a new instance from ordered arguments.
    Constructor(Arc<ConstructorFn>),
}

impl Base {
    /// A value used directly as the component instance.
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Base::Value(instance(value))
    }

    /// An already shared value. The factory hands out clones of this `Arc`.
    pub fn shared<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Base::Value(value)
    }

    /// A value exposing the [`ComponentSource`] capability, the target of
    /// [`FactoryMethod::Default`].
    pub fn source<S: ComponentSource + 'static>(source: S) -> Self {
        Base::Value(instance(Arc::new(source) as Arc<dyn ComponentSource>))
    }

    /// A typed constructor.
    pub fn constructor<T, F>(constructor: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(ConstructorArgs) -> Result<T> + Send + Sync + 'static,
    {
        Base::Constructor(Arc::new(move |args: ConstructorArgs| -> Result<Instance> {
            Ok(instance(constructor(args)?))
        }))
    }

    /// Human-readable kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Base::Value(_) => "value",
            Base::Constructor(_) => "constructor",
        }
    }
}

impl fmt::Debug for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Base::{}", self.kind())
    }
}

/// Resolved constructor arguments, in positional order.
pub struct ConstructorArgs {
    component: String,
    values: Vec<Instance>,
}

impl ConstructorArgs {
    pub(crate) fn new(component: impl Into<String>, values: Vec<Instance>) -> Self {
        Self {
            component: component.into(),
            values,
        }
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the constructor received no arguments.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The component being constructed.
    pub fn component(&self) -> &str {
        &self.component
    }

    /// Typed access to argument `index`.
    ///
    /// # Errors
    /// [`SwitchwireError::InvalidDescriptor`] if there is no such argument,
    /// [`SwitchwireError::TypeMismatch`] if it has another type.
    pub fn get<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>> {
        let value = self.raw(index)?.clone();
        value.downcast::<T>().map_err(|_| SwitchwireError::TypeMismatch {
            component: self.component.clone(),
            expected: format!(
                "constructor argument {index} of type {}",
                shorten_type_name(type_name::<T>())
            ),
        })
    }

    /// Untyped access to argument `index`.
    pub fn raw(&self, index: usize) -> Result<&Instance> {
        self.values.get(index).ok_or_else(|| {
            SwitchwireError::invalid_descriptor(
                &self.component,
                format!(
                    "constructor expects argument {index} but only {} were configured",
                    self.values.len()
                ),
            )
        })
    }

    /// All arguments.
    pub fn into_vec(self) -> Vec<Instance> {
        self.values
    }
}

// ═══════════════════════════════════════════
// Factory methods & hooks
// ═══════════════════════════════════════════

/// How a component is obtained from a factory target instead of being
/// constructed directly.
#[derive(Clone)]
pub enum FactoryMethod {
    /// Calls [`ComponentSource::get_component`] on the target.
    Default,
    /// Calls a function bound when the descriptor was built.
    Bound { name: String, call: Arc<MethodFn> },
}

impl FactoryMethod {
    /// Name reported for [`FactoryMethod::Default`].
    pub const DEFAULT_NAME: &'static str = "get_component";

    /// Binds a typed method: `target` is downcast to `T`.
    pub fn bound<T, R, F>(name: impl Into<String>, method: F) -> Self
    where
        T: Any + Send + Sync,
        R: Any + Send + Sync,
        F: Fn(&T) -> Result<R> + Send + Sync + 'static,
    {
        FactoryMethod::Bound {
            name: name.into(),
            call: Arc::new(move |component: &str, target: &Instance| -> Result<Instance> {
                let target = downcast_ref::<T>(component, target, "factory target")?;
                Ok(instance(method(target)?))
            }),
        }
    }

    /// The method name, for logs.
    pub fn name(&self) -> &str {
        match self {
            FactoryMethod::Default => Self::DEFAULT_NAME,
            FactoryMethod::Bound { name, .. } => name,
        }
    }

    pub(crate) fn invoke(&self, component: &str, target: &Instance) -> Result<Instance> {
        match self {
            FactoryMethod::Default => {
                let source = target.downcast_ref::<Arc<dyn ComponentSource>>().ok_or_else(|| {
                    SwitchwireError::MissingCapability {
                        component: component.to_owned(),
                        capability: "ComponentSource",
                    }
                })?;
                source.get_component()
            }
            FactoryMethod::Bound { call, .. } => call(component, target),
        }
    }
}

impl fmt::Debug for FactoryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FactoryMethod({})", self.name())
    }
}

/// An init or destroy hook bound to a function.
#[derive(Clone)]
pub struct LifecycleHook {
    name: String,
    call: Arc<HookFn>,
}

impl LifecycleHook {
    /// Binds a typed hook: the instance is downcast to `T`.
    pub fn new<T, F>(name: impl Into<String>, hook: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&T) -> Result<()> + Send + Sync + 'static,
    {
        let name = name.into();
        let role = format!("receiver of {name}()");
        Self {
            name,
            call: Arc::new(move |component: &str, instance: &Instance| -> Result<()> {
                hook(downcast_ref::<T>(component, instance, &role)?)
            }),
        }
    }

    /// Binds a hook over the erased instance.
    pub fn erased<F>(name: impl Into<String>, hook: F) -> Self
    where
        F: Fn(&Instance) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            call: Arc::new(move |_: &str, instance: &Instance| hook(instance)),
        }
    }

    /// The hook name, for logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn invoke(&self, component: &str, instance: &Instance) -> Result<()> {
        (self.call)(component, instance)
    }
}

impl fmt::Debug for LifecycleHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LifecycleHook({})", self.name)
    }
}

// ═══════════════════════════════════════════
// Arguments
// ═══════════════════════════════════════════

/// A constructor argument or property source: a reference to another
/// component, or a literal value.
#[derive(Clone, Default)]
pub struct OrderedArg {
    /// Explicit position. Either every arg of a list has one or none does.
    pub index: Option<usize>,
    /// Literal value.
    pub value: Option<Instance>,
    /// Name or alias of another component. Wins over `value`.
    pub reference: Option<String>,
}

impl OrderedArg {
    /// A reference to another component.
    pub fn reference(name: impl Into<String>) -> Self {
        Self {
            reference: Some(name.into()),
            ..Self::default()
        }
    }

    /// A literal value.
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Some(instance(value)),
            ..Self::default()
        }
    }

    /// Sets the explicit position.
    pub fn at(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl fmt::Debug for OrderedArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedArg")
            .field("index", &self.index)
            .field("value", &self.value.as_ref().map(|_| "<value>"))
            .field("reference", &self.reference)
            .finish()
    }
}

/// A property injected after construction through a bound setter.
#[derive(Clone)]
pub struct PropertyArg {
    name: String,
    arg: OrderedArg,
    setter: Arc<SetterFn>,
}

impl PropertyArg {
    /// Binds a typed setter: the target is downcast to `T`, the resolved
    /// value to `V`.
    pub fn new<T, V, F>(name: impl Into<String>, arg: OrderedArg, setter: F) -> Self
    where
        T: Any + Send + Sync,
        V: Any + Send + Sync,
        F: Fn(&T, Arc<V>) -> Result<()> + Send + Sync + 'static,
    {
        let name = name.into();
        let property = name.clone();
        Self {
            name,
            arg,
            setter: Arc::new(move |component: &str, target: &Instance, value: Instance| -> Result<()> {
                let target = downcast_ref::<T>(component, target, "property target")?;
                let value = value.downcast::<V>().map_err(|_| SwitchwireError::TypeMismatch {
                    component: component.to_owned(),
                    expected: format!(
                        "property \"{property}\" of type {}",
                        shorten_type_name(type_name::<V>())
                    ),
                })?;
                setter(target, value)
            }),
        }
    }

    /// Property name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the value comes from.
    pub fn arg(&self) -> &OrderedArg {
        &self.arg
    }

    pub(crate) fn inject(&self, component: &str, target: &Instance, value: Instance) -> Result<()> {
        (self.setter)(component, target, value)
    }
}

impl fmt::Debug for PropertyArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyArg")
            .field("name", &self.name)
            .field("arg", &self.arg)
            .finish()
    }
}

/// Orders args by explicit index when present, else keeps declaration order.
pub(crate) fn ordered<'a, A>(args: &'a [A], index_of: impl Fn(&A) -> Option<usize>) -> Vec<&'a A> {
    let mut ordered: Vec<&A> = args.iter().collect();
    if args.iter().any(|a| index_of(a).is_some()) {
        ordered.sort_by_key(|a| index_of(*a));
    }
    ordered
}

fn check_indices(component: &str, kind: &str, indices: &[Option<usize>]) -> Result<()> {
    let explicit = indices.iter().filter(|i| i.is_some()).count();
    if explicit == 0 {
        return Ok(());
    }
    if explicit != indices.len() {
        return Err(SwitchwireError::invalid_descriptor(
            component,
            format!("{kind}s must either all specify an index or none may"),
        ));
    }
    let mut seen = HashSet::new();
    for index in indices.iter().flatten() {
        if !seen.insert(index) {
            return Err(SwitchwireError::invalid_descriptor(
                component,
                format!("{kind} index {index} is used twice"),
            ));
        }
    }
    Ok(())
}

// ═══════════════════════════════════════════
// Attributes
// ═══════════════════════════════════════════

/// A container-recognized role or an arbitrary tag.
#[derive(Clone)]
pub enum Attribute {
    /// The component resolves bases for other descriptors.
    Resolver(Capability<dyn BaseResolver>),
    /// The component intercepts every later creation.
    PostProcessor(Capability<dyn ComponentPostProcessor>),
    /// The component receives a back-reference to its factory.
    FactoryAware(Capability<dyn FactoryAware>),
    /// Any other tag. Carries no behavior.
    Tag(String),
}

impl Attribute {
    pub const RESOLVER: &'static str = "ComponentResolver";
    pub const POST_PROCESSOR: &'static str = "ComponentPostProcessor";
    pub const FACTORY_AWARE: &'static str = "ComponentFactoryAware";

    /// Resolver role for a component whose instance is a `T`.
    pub fn resolver<T: BaseResolver + 'static>() -> Self {
        Attribute::Resolver(Capability::new(|instance: &Instance| {
            instance
                .clone()
                .downcast::<T>()
                .ok()
                .map(|r| r as Arc<dyn BaseResolver>)
        }))
    }

    /// Post-processor role for a component whose instance is a `T`.
    pub fn post_processor<T: ComponentPostProcessor + 'static>() -> Self {
        Attribute::PostProcessor(Capability::new(|instance: &Instance| {
            instance
                .clone()
                .downcast::<T>()
                .ok()
                .map(|p| p as Arc<dyn ComponentPostProcessor>)
        }))
    }

    /// Factory-aware role for a component whose instance is a `T`.
    pub fn factory_aware<T: FactoryAware + 'static>() -> Self {
        Attribute::FactoryAware(Capability::new(|instance: &Instance| {
            instance
                .clone()
                .downcast::<T>()
                .ok()
                .map(|a| a as Arc<dyn FactoryAware>)
        }))
    }

    /// Builds an attribute from its type tag.
    ///
    /// Role tags (matched case-insensitively) expect the instance to be an
    /// `Arc<dyn Role>`; anything else becomes a [`Attribute::Tag`].
    pub fn from_type(kind: &str) -> Self {
        if kind.eq_ignore_ascii_case(Self::RESOLVER) {
            Attribute::Resolver(Capability::erased())
        } else if kind.eq_ignore_ascii_case(Self::POST_PROCESSOR) {
            Attribute::PostProcessor(Capability::erased())
        } else if kind.eq_ignore_ascii_case(Self::FACTORY_AWARE) {
            Attribute::FactoryAware(Capability::erased())
        } else {
            Attribute::Tag(kind.to_owned())
        }
    }

    /// The attribute's type tag.
    pub fn kind(&self) -> &str {
        match self {
            Attribute::Resolver(_) => Self::RESOLVER,
            Attribute::PostProcessor(_) => Self::POST_PROCESSOR,
            Attribute::FactoryAware(_) => Self::FACTORY_AWARE,
            Attribute::Tag(tag) => tag,
        }
    }

    /// Startup priority implied by this attribute.
    ///
    /// Factory-aware components start right before ordinary ones.
    pub fn priority(&self, baseline: i64) -> i64 {
        match self {
            Attribute::Resolver(_) => RESOLVER_PRIORITY,
            Attribute::PostProcessor(_) => POST_PROCESSOR_PRIORITY,
            Attribute::FactoryAware(_) => baseline - 1,
            Attribute::Tag(_) => baseline,
        }
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Attribute({})", self.kind())
    }
}

// ═══════════════════════════════════════════
// ComponentDescriptor
// ═══════════════════════════════════════════

/// Declarative description of one buildable component.
///
/// Built with [`ComponentDescriptor::builder`]; immutable once registered.
#[derive(Clone, Debug)]
pub struct ComponentDescriptor {
    name: String,
    aliases: Vec<String>,
    base: Option<Base>,
    factory_method: Option<FactoryMethod>,
    factory_component: Option<String>,
    scope: String,
    lazy: bool,
    init_method: Option<LifecycleHook>,
    destroy_method: Option<LifecycleHook>,
    constructor_args: Vec<OrderedArg>,
    properties: Vec<PropertyArg>,
    attrs: Vec<Attribute>,
    priority: Option<i64>,
    module: Option<String>,
    module_base: Option<String>,
}

impl ComponentDescriptor {
    /// Starts a descriptor for `name`.
    pub fn builder(name: impl Into<String>) -> DescriptorBuilder {
        DescriptorBuilder {
            descriptor: ComponentDescriptor {
                name: name.into(),
                aliases: Vec::new(),
                base: None,
                factory_method: None,
                factory_component: None,
                scope: SINGLETON.to_owned(),
                lazy: false,
                init_method: None,
                destroy_method: None,
                constructor_args: Vec::new(),
                properties: Vec::new(),
                attrs: Vec::new(),
                priority: None,
                module: None,
                module_base: None,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn base(&self) -> Option<&Base> {
        self.base.as_ref()
    }

    pub fn factory_method(&self) -> Option<&FactoryMethod> {
        self.factory_method.as_ref()
    }

    pub fn factory_component(&self) -> Option<&str> {
        self.factory_component.as_deref()
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Lazy only applies to singletons.
    pub fn is_lazy(&self) -> bool {
        self.lazy
    }

    pub fn init_method(&self) -> Option<&LifecycleHook> {
        self.init_method.as_ref()
    }

    pub fn destroy_method(&self) -> Option<&LifecycleHook> {
        self.destroy_method.as_ref()
    }

    pub fn constructor_args(&self) -> &[OrderedArg] {
        &self.constructor_args
    }

    pub fn properties(&self) -> &[PropertyArg] {
        &self.properties
    }

    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    /// Explicit priority before registration, computed priority after.
    pub fn priority(&self) -> Option<i64> {
        self.priority
    }

    /// Module path for the module resolver.
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Prefix joined in front of [`module`](Self::module).
    pub fn module_base(&self) -> Option<&str> {
        self.module_base.as_deref()
    }

    /// Every component name this descriptor refers to.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.factory_component
            .as_deref()
            .into_iter()
            .chain(self.constructor_args.iter().filter_map(|a| a.reference.as_deref()))
            .chain(self.properties.iter().filter_map(|p| p.arg.reference.as_deref()))
    }

    /// The priority this descriptor gets when registered.
    pub fn compute_priority(&self, baseline: i64) -> i64 {
        if let Some(priority) = self.priority {
            return priority;
        }

        self.attrs
            .iter()
            .map(|attr| attr.priority(baseline))
            .chain(std::iter::once(baseline))
            .min()
            .unwrap_or(baseline)
    }

    pub(crate) fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Checks the structural invariants enforced at registration.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SwitchwireError::invalid_descriptor(&self.name, "name must not be empty"));
        }

        if self.aliases.iter().any(|a| a.trim().is_empty()) {
            return Err(SwitchwireError::invalid_descriptor(&self.name, "aliases must not be empty"));
        }

        let arg_indices: Vec<_> = self.constructor_args.iter().map(|a| a.index).collect();
        check_indices(&self.name, "constructor argument", &arg_indices)?;

        let property_indices: Vec<_> = self.properties.iter().map(|p| p.arg.index).collect();
        check_indices(&self.name, "property", &property_indices)?;

        if self.factory_component.is_some() && self.factory_method.is_none() {
            return Err(SwitchwireError::invalid_descriptor(
                &self.name,
                "factory_component requires a factory_method",
            ));
        }

        if self.factory_method.is_some()
            && self.factory_component.is_none()
            && matches!(self.base, Some(Base::Constructor(_)))
        {
            return Err(SwitchwireError::invalid_descriptor(
                &self.name,
                "a factory method needs an object to call: give a value base or a factory_component",
            ));
        }

        Ok(())
    }
}

/// Builder for [`ComponentDescriptor`].
#[derive(Debug)]
pub struct DescriptorBuilder {
    descriptor: ComponentDescriptor,
}

impl DescriptorBuilder {
    /// Adds an alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        if alias != self.descriptor.name && !self.descriptor.aliases.contains(&alias) {
            self.descriptor.aliases.push(alias);
        }
        self
    }

    /// Adds several aliases.
    pub fn aliases<I, S>(self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        aliases.into_iter().fold(self, |builder, alias| builder.alias(alias))
    }

    /// Sets the base.
    pub fn base(mut self, base: Base) -> Self {
        self.descriptor.base = Some(base);
        self
    }

    /// Uses `value` directly as the instance.
    pub fn value<T: Any + Send + Sync>(self, value: T) -> Self {
        self.base(Base::value(value))
    }

    /// Builds the instance with a typed constructor.
    pub fn constructor<T, F>(self, constructor: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(ConstructorArgs) -> Result<T> + Send + Sync + 'static,
    {
        self.base(Base::constructor(constructor))
    }

    /// Obtains the instance from a factory method.
    pub fn factory_method(mut self, method: FactoryMethod) -> Self {
        self.descriptor.factory_method = Some(method);
        self
    }

    /// Binds a typed factory method on the target.
    pub fn factory_method_fn<T, R, F>(self, name: impl Into<String>, method: F) -> Self
    where
        T: Any + Send + Sync,
        R: Any + Send + Sync,
        F: Fn(&T) -> Result<R> + Send + Sync + 'static,
    {
        self.factory_method(FactoryMethod::bound(name, method))
    }

    /// Component supplying the factory-method target.
    pub fn factory_component(mut self, name: impl Into<String>) -> Self {
        self.descriptor.factory_component = Some(name.into());
        self
    }

    /// Sets the scope name.
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.descriptor.scope = scope.into();
        self
    }

    /// Shorthand for the prototype scope.
    pub fn prototype(self) -> Self {
        self.scope(PROTOTYPE)
    }

    /// Defers singleton creation to first request.
    pub fn lazy(mut self, lazy: bool) -> Self {
        self.descriptor.lazy = lazy;
        self
    }

    /// Binds the init hook.
    pub fn init_method<T, F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&T) -> Result<()> + Send + Sync + 'static,
    {
        self.descriptor.init_method = Some(LifecycleHook::new(name, hook));
        self
    }

    /// Binds the destroy hook. Only lifecycle-managing scopes run it.
    pub fn destroy_method<T, F>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&T) -> Result<()> + Send + Sync + 'static,
    {
        self.descriptor.destroy_method = Some(LifecycleHook::new(name, hook));
        self
    }

    /// Sets an already built init hook.
    pub fn init_hook(mut self, hook: LifecycleHook) -> Self {
        self.descriptor.init_method = Some(hook);
        self
    }

    /// Sets an already built destroy hook.
    pub fn destroy_hook(mut self, hook: LifecycleHook) -> Self {
        self.descriptor.destroy_method = Some(hook);
        self
    }

    /// Appends a constructor argument.
    pub fn constructor_arg(mut self, arg: OrderedArg) -> Self {
        self.descriptor.constructor_args.push(arg);
        self
    }

    /// Appends a property.
    pub fn property(mut self, property: PropertyArg) -> Self {
        self.descriptor.properties.push(property);
        self
    }

    /// Appends an attribute.
    pub fn attr(mut self, attr: Attribute) -> Self {
        self.descriptor.attrs.push(attr);
        self
    }

    /// Sets an explicit priority.
    pub fn priority(mut self, priority: i64) -> Self {
        self.descriptor.priority = Some(priority);
        self
    }

    /// Sets the module path.
    pub fn module(mut self, path: impl Into<String>) -> Self {
        self.descriptor.module = Some(path.into());
        self
    }

    /// Sets the module path prefix.
    pub fn module_base(mut self, base: impl Into<String>) -> Self {
        self.descriptor.module_base = Some(base.into());
        self
    }

    pub fn build(self) -> ComponentDescriptor {
        self.descriptor
    }
}

impl From<DescriptorBuilder> for ComponentDescriptor {
    fn from(builder: DescriptorBuilder) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dao;

    #[test]
    fn defaults_to_eager_singleton() {
        let d = ComponentDescriptor::builder("Dao").value(Dao).build();
        assert_eq!(d.scope(), SINGLETON);
        assert!(!d.is_lazy());
        assert!(d.priority().is_none());
        assert!(matches!(d.base(), Some(Base::Value(_))));
    }

    #[test]
    fn alias_equal_to_name_is_dropped() {
        let d = ComponentDescriptor::builder("Foo")
            .aliases(["Foo", "F", "F"])
            .build();
        assert_eq!(d.aliases(), ["F".to_string()]);
    }

    #[test]
    fn explicit_priority_wins() {
        let d = ComponentDescriptor::builder("A")
            .attr(Attribute::from_type(Attribute::RESOLVER))
            .priority(42)
            .build();
        assert_eq!(d.compute_priority(DEFAULT_PRIORITY), 42);
    }

    #[test]
    fn attribute_priorities_take_minimum() {
        let d = ComponentDescriptor::builder("A")
            .attr(Attribute::Tag("audited".into()))
            .attr(Attribute::from_type(Attribute::POST_PROCESSOR))
            .attr(Attribute::from_type(Attribute::RESOLVER))
            .build();
        assert_eq!(d.compute_priority(DEFAULT_PRIORITY), RESOLVER_PRIORITY);

        let aware = ComponentDescriptor::builder("B")
            .attr(Attribute::from_type("componentfactoryaware"))
            .build();
        assert_eq!(aware.compute_priority(DEFAULT_PRIORITY), DEFAULT_PRIORITY - 1);

        let plain = ComponentDescriptor::builder("C").attr(Attribute::Tag("x".into())).build();
        assert_eq!(plain.compute_priority(DEFAULT_PRIORITY), DEFAULT_PRIORITY);
    }

    #[test]
    fn mixed_indices_are_invalid() {
        let d = ComponentDescriptor::builder("A")
            .constructor(|_| Ok(Dao))
            .constructor_arg(OrderedArg::value(1i64).at(0))
            .constructor_arg(OrderedArg::value(2i64))
            .build();
        assert!(matches!(d.validate(), Err(SwitchwireError::InvalidDescriptor { .. })));
    }

    #[test]
    fn repeated_index_is_invalid() {
        let d = ComponentDescriptor::builder("A")
            .constructor(|_| Ok(Dao))
            .constructor_arg(OrderedArg::value(1i64).at(0))
            .constructor_arg(OrderedArg::value(2i64).at(0))
            .build();
        assert!(d.validate().is_err());
    }

    #[test]
    fn factory_method_on_constructor_base_is_invalid() {
        let d = ComponentDescriptor::builder("A")
            .constructor(|_| Ok(Dao))
            .factory_method(FactoryMethod::Default)
            .build();
        assert!(d.validate().is_err());

        let orphan = ComponentDescriptor::builder("B").factory_component("Factory").build();
        assert!(orphan.validate().is_err());
    }

    #[test]
    fn ordered_sorts_by_index_only_when_present() {
        let args = vec![
            OrderedArg::reference("b").at(1),
            OrderedArg::reference("a").at(0),
        ];
        let refs: Vec<_> = ordered(&args, |a| a.index)
            .into_iter()
            .filter_map(|a| a.reference.as_deref())
            .collect();
        assert_eq!(refs, ["a", "b"]);

        let args = vec![OrderedArg::reference("b"), OrderedArg::reference("a")];
        let refs: Vec<_> = ordered(&args, |a| a.index)
            .into_iter()
            .filter_map(|a| a.reference.as_deref())
            .collect();
        assert_eq!(refs, ["b", "a"]);
    }

    #[test]
    fn constructor_args_report_mismatches() {
        let args = ConstructorArgs::new("Dao", vec![instance(5i64)]);
        assert_eq!(*args.get::<i64>(0).unwrap(), 5);
        assert!(matches!(args.get::<String>(0), Err(SwitchwireError::TypeMismatch { .. })));
        assert!(matches!(args.get::<i64>(1), Err(SwitchwireError::InvalidDescriptor { .. })));
    }

    #[test]
    fn references_cover_args_properties_and_factory() {
        struct Target;
        let d = ComponentDescriptor::builder("A")
            .value(Target)
            .factory_method_fn("make", |_: &Target| Ok(Dao))
            .factory_component("Factory")
            .constructor_arg(OrderedArg::reference("B"))
            .property(PropertyArg::new(
                "c",
                OrderedArg::reference("C"),
                |_: &Target, _: Arc<Dao>| Ok(()),
            ))
            .build();
        let refs: Vec<_> = d.references().collect();
        assert_eq!(refs, ["Factory", "B", "C"]);
    }

    #[test]
    fn bound_hook_rejects_foreign_instance() {
        let hook = LifecycleHook::new("init", |_: &Dao| Ok(()));
        assert!(hook.invoke("Dao", &instance(Dao)).is_ok());
        assert!(matches!(
            hook.invoke("Dao", &instance(1u8)),
            Err(SwitchwireError::TypeMismatch { .. })
        ));
    }
}
