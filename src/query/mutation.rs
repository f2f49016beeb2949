use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::error::{Error, Result};

/// Tracks which mutations are being submitted so a repeated submit of the
/// same action is refused until the first one settles.
#[derive(Debug, Clone, Default)]
pub(crate) struct MutationGuard {
    inflight: Arc<Mutex<HashSet<String>>>,
}

impl MutationGuard {
    pub(crate) fn begin(&self, name: &str) -> Result<InFlight> {
        let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        if !inflight.insert(name.to_string()) {
            debug!(name, "rejecting duplicate submit");
            return Err(Error::MutationInFlight(name.to_string()));
        }
        Ok(InFlight {
            name: name.to_string(),
            inflight: Arc::clone(&self.inflight),
        })
    }
}

/// Marks a mutation as running until dropped.
#[derive(Debug)]
pub(crate) struct InFlight {
    name: String,
    inflight: Arc<Mutex<HashSet<String>>>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.inflight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.name);
    }
}
