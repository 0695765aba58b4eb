//! Application state and pure state transitions.

pub mod app_state;
pub mod search;
pub mod search_input_handler;

pub use app_state::{ActionOutcome, AppState};
pub use search::SearchState;
