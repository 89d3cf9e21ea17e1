use std::collections::HashMap;

use shared::{
    domain::ResultId,
    protocol::{ActionOutcome, SearchResult},
};

use crate::assets::AssetLedger;

/// Search result panel state. The generation tag changes whenever the
/// result set's identity changes, so a response that outlives its result
/// set folds to nothing.
#[derive(Debug, Default)]
pub struct ResultPanel {
    open: bool,
    generation: u64,
    results: Vec<SearchResult>,
    outcomes: HashMap<ResultId, ActionOutcome>,
    assets: AssetLedger,
}

impl ResultPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn contains(&self, id: ResultId) -> bool {
        self.results.iter().any(|result| result.id == id)
    }

    pub fn outcome_for(&self, result: &SearchResult) -> Option<ActionOutcome> {
        self.outcomes
            .get(&result.id)
            .cloned()
            .or_else(|| result.outcome.clone())
    }

    pub fn is_loaded(&self, id: ResultId) -> bool {
        self.assets.is_loaded(id)
    }

    pub fn open(&mut self) {
        self.open = true;
        self.generation += 1;
        self.results.clear();
        self.outcomes.clear();
        self.assets.clear();
    }

    pub fn close(&mut self) {
        self.open = false;
        self.generation += 1;
        self.results.clear();
        self.outcomes.clear();
        self.assets.clear();
    }

    /// An older in-flight search is stale the instant a newer one is issued.
    pub fn issue_search(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Read at dispatch time; dispatching does not invalidate the set.
    pub fn current_generation(&self) -> u64 {
        self.generation
    }

    pub fn apply_results(&mut self, generation: u64, items: Vec<SearchResult>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.assets.reset(items.iter().map(|item| item.id));
        self.outcomes.clear();
        self.results = items;
        true
    }

    /// A failed search leaves the set empty; no partial contents survive.
    pub fn apply_search_failure(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.assets.clear();
        self.outcomes.clear();
        self.results.clear();
        true
    }

    /// Arrival order wins; a later arrival for the same id overwrites.
    pub fn attach_outcome(&mut self, generation: u64, id: ResultId, outcome: ActionOutcome) -> bool {
        if generation != self.generation || !self.contains(id) {
            return false;
        }
        self.outcomes.insert(id, outcome);
        true
    }

    pub fn mark_loaded(&mut self, id: ResultId) -> bool {
        self.assets.mark_loaded(id)
    }
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
