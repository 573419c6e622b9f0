//! Repository selector: explicit registry of hierarchies

use super::{error::LoggerError, error::Result, hierarchy::Hierarchy};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Name of the repository handed out when callers don't pick one
pub const DEFAULT_REPOSITORY: &str = "default";

/// Maps repository names to hierarchies.
///
/// The selector is an explicit object passed to whatever needs it; nothing
/// in the crate keeps process-global state. Separate selectors are fully
/// independent, which is what makes hierarchies isolatable per test, per
/// tenant, or per plugin.
pub struct RepositorySelector {
    repositories: RwLock<HashMap<String, Arc<Hierarchy>>>,
}

impl RepositorySelector {
    pub fn new() -> Self {
        Self {
            repositories: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a repository, creating it on first use.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn get_repository(&self, name: &str) -> Arc<Hierarchy> {
        assert!(!name.is_empty(), "repository name must not be empty");

        if let Some(existing) = self.repositories.read().get(name) {
            return Arc::clone(existing);
        }

        let mut repositories = self.repositories.write();
        if let Some(existing) = repositories.get(name) {
            return Arc::clone(existing);
        }
        let hierarchy = Arc::new(Hierarchy::new(name));
        repositories.insert(name.to_string(), Arc::clone(&hierarchy));
        hierarchy
    }

    /// Create a repository, failing if the name is already registered
    pub fn create_repository(&self, name: &str) -> Result<Arc<Hierarchy>> {
        assert!(!name.is_empty(), "repository name must not be empty");

        let mut repositories = self.repositories.write();
        if repositories.contains_key(name) {
            return Err(LoggerError::repository_exists(name));
        }
        let hierarchy = Arc::new(Hierarchy::new(name));
        repositories.insert(name.to_string(), Arc::clone(&hierarchy));
        Ok(hierarchy)
    }

    /// Look up a repository without creating it
    pub fn repository(&self, name: &str) -> Option<Arc<Hierarchy>> {
        self.repositories.read().get(name).cloned()
    }

    pub fn all_repositories(&self) -> Vec<Arc<Hierarchy>> {
        self.repositories.read().values().cloned().collect()
    }

    /// Convenience access to the [`DEFAULT_REPOSITORY`] hierarchy
    pub fn default_repository(&self) -> Arc<Hierarchy> {
        self.get_repository(DEFAULT_REPOSITORY)
    }

    /// Reset a repository's configuration. Returns false if the name is not
    /// registered.
    pub fn reset_repository(&self, name: &str) -> bool {
        match self.repository(name) {
            Some(hierarchy) => {
                hierarchy.reset_configuration();
                true
            }
            None => false,
        }
    }

    /// Shut a repository down and remove it from the registry, freeing the
    /// name for re-creation. Returns false if the name is not registered.
    pub fn shutdown_repository(&self, name: &str) -> bool {
        let removed = self.repositories.write().remove(name);
        match removed {
            Some(hierarchy) => {
                hierarchy.shutdown();
                true
            }
            None => false,
        }
    }

    /// Shut down every repository and clear the registry
    pub fn shutdown(&self) {
        let drained: Vec<Arc<Hierarchy>> = {
            let mut repositories = self.repositories.write();
            repositories.drain().map(|(_, h)| h).collect()
        };
        for hierarchy in drained {
            hierarchy.shutdown();
        }
    }
}

impl Default for RepositorySelector {
    fn default() -> Self {
        Self::new()
    }
}
