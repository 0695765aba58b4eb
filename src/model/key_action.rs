//! Domain-level keyboard actions independent of key bindings.

/// User intent, decoupled from concrete keys.
///
/// The mapping from `crossterm::event::KeyEvent` to `KeyAction` lives in
/// `KeyBindings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Card selection
    /// Select the next card. Default: j/↓
    NextCard,
    /// Select the previous card. Default: k/↑
    PrevCard,
    /// Jump to the first card. Default: g/Home
    FirstCard,
    /// Jump to the last card. Default: G/End
    LastCard,
    /// Move selection one viewport down. Default: Ctrl+d/Page Down
    PageDown,
    /// Move selection one viewport up. Default: Ctrl+u/Page Up
    PageUp,

    // Expansion
    /// Toggle the selected card between collapsed and expanded. Default: Enter/Space
    ToggleExpand,
    /// Expand every card. Default: e
    ExpandAll,
    /// Collapse every card. Default: c
    CollapseAll,

    // Detail sections
    /// Focus the next section of the selected card. Default: Tab
    NextSection,
    /// Focus the previous section of the selected card. Default: Shift+Tab
    PrevSection,
    /// Open or close the focused section. Default: o
    ToggleSection,

    // Search
    /// Open the query bar. Default: /
    StartSearch,
    /// Clear the query and its highlighting. Default: Esc
    CancelSearch,

    // Application
    /// Quit. Default: q
    Quit,
}
