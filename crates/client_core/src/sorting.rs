use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::Serialize;
use shared::domain::{BinCategory, ItemId, SortableItem};
use tracing::{debug, info};

use crate::error::SortingError;

pub const DEFAULT_ROUND_SIZE: usize = 5;
pub const WIN_MESSAGE: &str = "Congratulations! You have correctly sorted all of the items!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    InProgress,
    Won,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Correct {
        item: SortableItem,
        remaining: usize,
        won: bool,
    },
    Incorrect {
        item: SortableItem,
        target: BinCategory,
    },
}

impl DropOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, DropOutcome::Correct { .. })
    }
}

pub struct SortingSession<R = StdRng> {
    catalog: Vec<SortableItem>,
    round_size: usize,
    active: Vec<SortableItem>,
    score: u32,
    feedback: Option<String>,
    state: SessionState,
    rng: R,
}

impl SortingSession<StdRng> {
    pub fn new(catalog: Vec<SortableItem>, round_size: usize) -> Result<Self, SortingError> {
        Self::with_rng(catalog, round_size, StdRng::from_entropy())
    }
}

impl<R: Rng> SortingSession<R> {
    pub fn with_rng(
        catalog: Vec<SortableItem>,
        round_size: usize,
        rng: R,
    ) -> Result<Self, SortingError> {
        if catalog.is_empty() {
            return Err(SortingError::EmptyCatalog);
        }
        if round_size == 0 {
            return Err(SortingError::ZeroRoundSize);
        }

        Ok(Self {
            catalog,
            round_size,
            active: Vec::new(),
            score: 0,
            feedback: None,
            state: SessionState::NotStarted,
            rng,
        })
    }

    /// Deals a fresh round from the catalog. Valid from any state.
    pub fn start(&mut self) {
        let count = self.round_size.min(self.catalog.len());
        let mut pool = self.catalog.clone();
        let (picked, _) = pool.partial_shuffle(&mut self.rng, count);

        self.active = picked.to_vec();
        self.score = 0;
        self.feedback = None;
        self.state = SessionState::InProgress;
        info!(items = self.active.len(), "sorting round started");
    }

    pub fn drop_item(
        &mut self,
        item_id: ItemId,
        target: BinCategory,
    ) -> Result<DropOutcome, SortingError> {
        if self.state != SessionState::InProgress {
            return Err(SortingError::NotInProgress(self.state));
        }
        let index = self
            .active
            .iter()
            .position(|item| item.item_id == item_id)
            .ok_or(SortingError::UnknownItem(item_id))?;

        if self.active[index].category != target {
            let item = self.active[index].clone();
            self.feedback = Some(format!(
                "Oops! {} doesn't go in {target}.",
                item.description
            ));
            debug!(item_id = %item_id, %target, "incorrect drop");
            return Ok(DropOutcome::Incorrect { item, target });
        }

        let item = self.active.remove(index);
        self.score += 1;
        self.feedback = Some(format!(
            "Great job! {} belongs in {target}.",
            item.description
        ));
        debug!(item_id = %item_id, %target, score = self.score, "correct drop");

        let won = self.active.is_empty();
        if won {
            self.state = SessionState::Won;
            info!(score = self.score, "sorting round won");
        }

        Ok(DropOutcome::Correct {
            item,
            remaining: self.active.len(),
            won,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.state == SessionState::Won
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Items still waiting to be sorted in this round.
    pub fn active_items(&self) -> &[SortableItem] {
        &self.active
    }

    pub fn round_size(&self) -> usize {
        self.round_size
    }
}

#[cfg(test)]
#[path = "tests/sorting_tests.rs"]
mod tests;
