//! seqcat
//!
//! Terminal viewer for integer-sequence catalog search results.
//!
//! The crate follows a Pure Core / Impure Shell split: `model`, `parser`,
//! `search` and `program` are pure and never touch the terminal; `source`,
//! `config`, `logging` and `view` form the shell around them.

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod program;
pub mod search;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;
