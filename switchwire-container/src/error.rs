//! Error types for Switchwire factory operations.
//!
//! Every failure names the component involved and, where it helps, the
//! creation chain that led there.

use std::fmt;

use switchwire_support::rendering::{render_chain, render_list};

/// Main error type for all Switchwire operations.
#[derive(Debug, thiserror::Error)]
pub enum SwitchwireError {
    /// A descriptor or scope was registered after `init_components()`.
    #[error("Cannot register {what}: the factory is locked. Register components before calling .init_components()")]
    FactoryLocked { what: String },

    /// `init_components()` was called twice.
    #[error("The factory is already initialized; init_components() can only be called once")]
    AlreadyLocked,

    /// A component was requested before `init_components()`.
    #[error("Cannot retrieve a component until configuration is complete. Call .init_components() first")]
    NotInitialized,

    /// The factory was destroyed.
    #[error("The factory has been destroyed")]
    FactoryDestroyed,

    /// Requested name or alias is unknown here and in every parent.
    #[error("{}", .0)]
    ComponentNotFound(ComponentNotFoundError),

    /// A component is needed while it is still being created.
    #[error("{}", .0)]
    CircularDependency(CircularDependencyError),

    /// Name or alias collides with an existing registration.
    #[error("{}", .0)]
    DuplicateComponent(DuplicateComponentError),

    /// The descriptor names a scope with no registered strategy.
    #[error("Invalid component scope: \"{scope}\" defined for component \"{component}\"")]
    UnknownScope { component: String, scope: String },

    /// A scope strategy is already registered under this name.
    #[error("Scope already registered: \"{scope}\"")]
    DuplicateScope { scope: String },

    /// No base was given and no resolver claimed the descriptor.
    #[error("Component \"{component}\" has no base and no registered resolver can resolve it{}", reason_suffix(.reason))]
    UnresolvableComponent {
        component: String,
        reason: Option<String>,
    },

    /// An argument carries neither a reference nor a value.
    #[error("Invalid {kind} {position} for component \"{component}\": an argument needs either a ref or a value")]
    InvalidArgument {
        component: String,
        kind: &'static str,
        position: usize,
    },

    /// The descriptor is malformed.
    #[error("Invalid descriptor for component \"{component}\": {reason}")]
    InvalidDescriptor { component: String, reason: String },

    /// A component was fetched as a type it is not.
    #[error("Type mismatch for component \"{component}\": expected {expected}")]
    TypeMismatch {
        component: String,
        expected: String,
    },

    /// A component tagged with a role does not implement it.
    #[error("Component \"{component}\" is tagged as {capability} but its instance does not provide it")]
    MissingCapability {
        component: String,
        capability: &'static str,
    },

    /// A constructor, factory method or hook failed.
    #[error("Failed to construct \"{component}\": {source}")]
    ConstructionFailed {
        component: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl SwitchwireError {
    /// Wraps a foreign error raised while building `component`.
    pub fn construction(
        component: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ConstructionFailed {
            component: component.into(),
            source: source.into(),
        }
    }

    /// Shorthand for [`SwitchwireError::InvalidDescriptor`].
    pub fn invalid_descriptor(component: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            component: component.into(),
            reason: reason.into(),
        }
    }
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason.as_deref().map(|r| format!(": {r}")).unwrap_or_default()
}

/// Error when a component name or alias is unknown.
#[derive(Debug)]
pub struct ComponentNotFoundError {
    /// The name or alias that was requested
    pub requested: String,
    /// The component whose creation asked for it (if any)
    pub required_by: Option<String>,
    /// Registered names that look alike
    pub suggestions: Vec<String>,
}

impl fmt::Display for ComponentNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unable to find component by name: \"{}\"", self.requested)?;

        if let Some(ref parent) = self.required_by {
            write!(f, "\n  Required by: {parent}")?;
        }

        if !self.suggestions.is_empty() {
            write!(f, "\n  Did you mean one of:\n{}", render_list(&self.suggestions, "    "))?;
        }

        Ok(())
    }
}

/// Error when a component is requested while it is being created.
///
/// The chain is the creation stack at the time of the request followed by
/// the repeated name, e.g. `["A", "B", "A"]`.
#[derive(Debug)]
pub struct CircularDependencyError {
    /// The name as it was requested (may be an alias)
    pub requested: String,
    /// Creation stack plus the repeated, normalized name
    pub chain: Vec<String>,
}

impl fmt::Display for CircularDependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Circular dependency detected: \"{}\" is already being created\n  {}",
            self.requested,
            render_chain(&self.chain)
        )?;
        write!(
            f,
            "\n  Hint: mark one side lazy and resolve it on demand, or restructure the references"
        )
    }
}

/// Error when a name or alias is registered twice.
#[derive(Debug)]
pub struct DuplicateComponentError {
    /// The colliding name or alias
    pub key: String,
    /// The component that already owns it
    pub existing: String,
    /// The component being registered
    pub component: String,
}

impl fmt::Display for DuplicateComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key == self.existing {
            write!(f, "Component already registered: \"{}\"", self.key)?;
        } else {
            write!(
                f,
                "Name \"{}\" of component \"{}\" is already an alias of \"{}\"",
                self.key, self.component, self.existing
            )?;
        }
        write!(
            f,
            "\n  Hint: build the factory with .allow_override(true) to replace registrations"
        )
    }
}

/// Convenient Result type for Switchwire operations.
pub type Result<T> = std::result::Result<T, SwitchwireError>;
