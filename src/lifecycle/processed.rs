use std::collections::HashSet;

use crate::inventory::InstanceId;

/// Instance IDs already handled in the current run.
///
/// Grows monotonically; there is deliberately no way to remove an entry.
#[derive(Debug, Default, Clone)]
pub struct ProcessedSet {
    ids: HashSet<InstanceId>,
}

impl ProcessedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the ID was already present
    pub fn insert(&mut self, id: InstanceId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: &InstanceId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
