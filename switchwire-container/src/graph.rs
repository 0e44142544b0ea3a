//! Reference graph validation.
//!
//! Walks the references between registered components without creating
//! anything:
//! - Detects circular references
//! - Checks that every reference is registered (here or in a parent)
//!
//! Run on demand through [`ComponentFactory::validate()`]. A cycle through
//! lazy or prototype components is legal until one of them is requested,
//! so the factory never runs this implicitly.
//!
//! [`ComponentFactory::validate()`]: crate::factory::ComponentFactory::validate

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{CircularDependencyError, ComponentNotFoundError, Result, SwitchwireError};
use crate::registry::ComponentRegistry;

/// Validates the reference graph of one registry.
///
/// # Algorithm
/// Depth-first search in registration order, keeping the current path to
/// report cycles.
pub(crate) struct GraphValidator<'a, F> {
    registry: &'a ComponentRegistry,
    /// Whether a name unknown to the registry is satisfied elsewhere.
    external: F,
    /// Currently being visited (for cycle detection)
    visiting: HashSet<String>,
    /// Already validated (cache)
    validated: HashSet<String>,
    /// Current DFS path (for error reporting)
    path: Vec<String>,
}

impl<'a, F: Fn(&str) -> bool> GraphValidator<'a, F> {
    pub fn new(registry: &'a ComponentRegistry, external: F) -> Self {
        Self {
            registry,
            external,
            visiting: HashSet::new(),
            validated: HashSet::new(),
            path: Vec::new(),
        }
    }

    /// Validates every registered component.
    ///
    /// # Errors
    /// - [`SwitchwireError::CircularDependency`]: cycle detected
    /// - [`SwitchwireError::ComponentNotFound`]: dangling reference
    pub fn validate(mut self) -> Result<()> {
        let names: Vec<String> = self.registry.names().into_iter().map(str::to_owned).collect();
        debug!(component_count = names.len(), "Starting reference graph validation");

        for name in &names {
            self.visit(name)?;
        }

        debug!("Reference graph validation passed ✓");
        Ok(())
    }

    fn visit(&mut self, requested: &str) -> Result<()> {
        let Some(descriptor) = self.registry.get(requested) else {
            if (self.external)(requested) {
                return Ok(());
            }
            return Err(SwitchwireError::ComponentNotFound(ComponentNotFoundError {
                requested: requested.to_owned(),
                required_by: self.path.last().cloned(),
                suggestions: self.find_similar(requested),
            }));
        };
        let name = descriptor.name();

        if self.validated.contains(name) {
            return Ok(());
        }

        if self.visiting.contains(name) {
            let cycle_start = self.path.iter().position(|n| n == name).unwrap_or(0);
            let mut chain = self.path[cycle_start..].to_vec();
            chain.push(name.to_owned());

            warn!(cycle = ?chain, "Circular reference detected");
            return Err(SwitchwireError::CircularDependency(CircularDependencyError {
                requested: requested.to_owned(),
                chain,
            }));
        }

        self.visiting.insert(name.to_owned());
        self.path.push(name.to_owned());

        for reference in descriptor.references() {
            self.visit(reference)?;
        }

        self.path.pop();
        self.visiting.remove(name);
        self.validated.insert(name.to_owned());
        Ok(())
    }

    /// Registered names close to `target`, for "did you mean?" hints.
    fn find_similar(&self, target: &str) -> Vec<String> {
        let target = target.to_lowercase();
        self.registry
            .keys()
            .into_iter()
            .filter(|key| {
                let name = key.to_lowercase();
                name.contains(&target) || target.contains(&name) || levenshtein_close(&target, &name)
            })
            .map(str::to_owned)
            .collect()
    }
}

/// Simple check if two strings are "close enough".
///
/// Not a full Levenshtein, just a quick heuristic for suggestions.
fn levenshtein_close(a: &str, b: &str) -> bool {
    let len_diff = a.len().abs_diff(b.len());
    if len_diff > 3 {
        return false;
    }

    let common = a.chars().zip(b.chars()).filter(|(ca, cb)| ca == cb).count();

    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return true;
    }

    // At least 60% of characters match
    common * 100 / max_len >= 60
}
