//! Layout dimension constants for TUI rendering.

/// Height of the header bar in lines.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of the search input widget in lines.
///
/// Includes border and text input area.
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Width of the selection gutter left of every card line.
pub const GUTTER_WIDTH: u16 = 2;

/// Indent of section bodies relative to section titles.
pub const SECTION_INDENT: usize = 2;

/// Expander glyph of a collapsed card.
pub const EXPAND_GLYPH: &str = "▾";

/// Expander glyph of an expanded card.
pub const COLLAPSE_GLYPH: &str = "▴";

/// Title glyph of an open detail section.
pub const SECTION_OPEN_GLYPH: &str = "▾";

/// Title glyph of a closed detail section.
pub const SECTION_CLOSED_GLYPH: &str = "▸";
