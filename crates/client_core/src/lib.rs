pub mod chat;
pub mod error;
pub mod responder;
pub mod sorting;

pub use chat::{ChatOptions, ChatSession};
pub use error::SortingError;
pub use responder::{LookupResponder, FALLBACK_REPLY};
pub use sorting::{DropOutcome, SessionState, SortingSession};
