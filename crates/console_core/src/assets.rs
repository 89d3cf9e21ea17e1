use std::collections::HashSet;

use shared::domain::ResultId;

/// Thumbnail load state. Ids outside the current result set are never
/// admitted.
#[derive(Debug, Default)]
pub struct AssetLedger {
    known: HashSet<ResultId>,
    loaded: HashSet<ResultId>,
}

impl AssetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self, ids: impl IntoIterator<Item = ResultId>) {
        self.known = ids.into_iter().collect();
        self.loaded.clear();
    }

    /// True only when this call changed state.
    pub fn mark_loaded(&mut self, id: ResultId) -> bool {
        if !self.known.contains(&id) {
            return false;
        }
        self.loaded.insert(id)
    }

    pub fn is_loaded(&self, id: ResultId) -> bool {
        self.loaded.contains(&id)
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn clear(&mut self) {
        self.known.clear();
        self.loaded.clear();
    }
}

#[cfg(test)]
#[path = "tests/assets_tests.rs"]
mod tests;
