//! Domain model types (pure).
//!
//! All types in this module are plain data with smart constructors.

pub mod entry;
pub mod error;
pub mod key_action;

// Re-export for convenience
pub use entry::{CatalogResponse, Entry, EntryId};
pub use error::{AppError, InputError, ParseError};
pub use key_action::KeyAction;
