//! Registry implementation.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::liveness::{AggregateFailure, LivenessCheck};

/// Concurrency-safe set of liveness checks keyed by name.
///
/// Structural changes take the write side of the lock. An aggregate pass copies
/// the entries under the read side and probes them after releasing it, so it
/// never sees a half-applied add or remove and a slow check never blocks
/// writers. Individual checks synchronize their own deadlines.
#[derive(Default)]
pub struct Registry {
    entries: RwLock<HashMap<String, Arc<dyn LivenessCheck>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the check, replacing any previous one with the same name.
    pub fn add<C>(&self, check: C)
    where
        C: LivenessCheck + 'static,
    {
        self.add_shared(Arc::new(check));
    }

    /// Same as [`Registry::add`] for an already shared check.
    pub fn add_shared(&self, check: Arc<dyn LivenessCheck>) {
        let name = check.name().to_string();
        let replaced = self.entries.write().insert(name.clone(), check).is_some();

        if replaced {
            debug!(component = "registry", event = "check_replaced", check = %name, "liveness check replaced");
        } else {
            debug!(component = "registry", event = "check_added", check = %name, "liveness check added");
        }
    }

    /// Removes the check if present. Unknown names are ignored.
    pub fn remove(&self, name: &str) {
        if self.entries.write().remove(name).is_some() {
            debug!(component = "registry", event = "check_removed", check = %name, "liveness check removed");
        }
    }

    /// Resets the named check. Returns false if no such check is registered.
    pub fn whack(&self, name: &str) -> bool {
        let check = self.entries.read().get(name).cloned();
        match check {
            Some(check) => {
                check.reset();
                true
            }
            None => false,
        }
    }

    /// One aggregate pass over every registered check.
    ///
    /// May block on the checks themselves (file checks read metadata); async
    /// callers should run it off the runtime, as [`crate::Supervisor::watch`] does.
    pub fn check_all(&self) -> Result<(), AggregateFailure> {
        let expired: Vec<String> = self
            .snapshot()
            .into_iter()
            .filter(|(_, check)| check.expired())
            .map(|(name, _)| name)
            .collect();

        if expired.is_empty() {
            Ok(())
        } else {
            Err(AggregateFailure::new(expired))
        }
    }

    fn snapshot(&self) -> Vec<(String, Arc<dyn LivenessCheck>)> {
        self.entries
            .read()
            .iter()
            .map(|(name, check)| (name.clone(), Arc::clone(check)))
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Registered names, ascending.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
