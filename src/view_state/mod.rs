//! Presentation state that sits between the pure core and the widgets.

pub mod cards;
pub mod highlighter;

pub use cards::{CardExpansion, CardListState, DetailSection, SectionStates};
pub use highlighter::SyntaxHighlighter;
