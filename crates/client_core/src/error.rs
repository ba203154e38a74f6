use shared::domain::ItemId;
use thiserror::Error;

use crate::sorting::SessionState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortingError {
    #[error("the item catalog is empty")]
    EmptyCatalog,
    #[error("round size must be at least 1")]
    ZeroRoundSize,
    #[error("no round in progress (state: {0:?})")]
    NotInProgress(SessionState),
    #[error("item {0} is not in the current round")]
    UnknownItem(ItemId),
}
