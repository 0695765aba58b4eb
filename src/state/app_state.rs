//! Top-level application state.

use crate::model::{Entry, KeyAction};
use crate::parser::Catalog;
use crate::search::SequenceQuery;
use crate::state::{search_input_handler, SearchState};
use crate::view_state::{CardExpansion, CardListState, DetailSection};
use tracing::{debug, info};

/// Everything the TUI renders from.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Entries in catalog order.
    pub entries: Vec<Entry>,
    /// Per-card expansion, selection and scroll.
    pub cards: CardListState,
    /// Total hit count reported by the catalog, if any.
    pub catalog_total: Option<u64>,
    /// Position of the first entry within the catalog's full hit list.
    pub catalog_start: u64,
    /// Number of records that failed to decode.
    pub malformed_count: usize,
    /// Where the catalog was read from.
    pub source_label: String,
    search: SearchState,
    highlight: Option<SequenceQuery>,
}

/// Outcome of applying an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Keep running.
    Continue,
    /// Leave the application.
    Quit,
}

impl AppState {
    /// Build state from a decoded catalog.
    ///
    /// `query_override` (e.g. from `--query`) wins over the catalog's own
    /// query.
    pub fn new(
        catalog: Catalog,
        initial_expansion: CardExpansion,
        query_override: Option<&str>,
    ) -> Self {
        let search = SearchState::from_initial(query_override.or(catalog.query.as_deref()));
        let highlight = search.highlight_query();
        info!(
            entries = catalog.entries.len(),
            malformed = catalog.malformed.len(),
            highlight = ?highlight.as_ref().map(SequenceQuery::as_str),
            "Initialized application state"
        );

        Self {
            cards: CardListState::new(catalog.entries.len(), initial_expansion),
            catalog_total: catalog.total,
            catalog_start: catalog.start.unwrap_or(0),
            malformed_count: catalog.malformed.len(),
            source_label: String::new(),
            entries: catalog.entries,
            search,
            highlight,
        }
    }

    /// Attach a source description for the status bar.
    pub fn with_source_label(mut self, label: impl Into<String>) -> Self {
        self.source_label = label.into();
        self
    }

    /// Current query bar state.
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    /// Query currently used for emphasis.
    pub fn highlight_query(&self) -> Option<&SequenceQuery> {
        self.highlight.as_ref()
    }

    /// Replace the query bar state and refresh the emphasis query.
    pub fn set_search(&mut self, search: SearchState) {
        if search != self.search {
            self.highlight = search.highlight_query();
            debug!(
                highlight = ?self.highlight.as_ref().map(SequenceQuery::tokens),
                "Search state changed"
            );
            self.search = search;
        }
    }

    /// Apply a transition function to the query bar state.
    pub fn update_search(&mut self, transition: impl FnOnce(SearchState) -> SearchState) {
        let next = transition(self.search.clone());
        self.set_search(next);
    }

    /// Detail sections of the selected entry, in display order.
    fn selected_sections(&self) -> Vec<DetailSection> {
        self.entries
            .get(self.cards.selected())
            .map(DetailSection::present_in)
            .unwrap_or_default()
    }

    /// Apply a navigation, expansion or search action.
    ///
    /// `heights` are the rendered card heights and `viewport_height` the
    /// visible line count; both are needed for paging and scrolling.
    pub fn apply_action(
        &mut self,
        action: KeyAction,
        heights: &[usize],
        viewport_height: usize,
    ) -> ActionOutcome {
        match action {
            KeyAction::Quit => return ActionOutcome::Quit,
            KeyAction::NextCard => self.cards.select_next(),
            KeyAction::PrevCard => self.cards.select_prev(),
            KeyAction::FirstCard => self.cards.select_first(),
            KeyAction::LastCard => self.cards.select_last(),
            KeyAction::PageDown => {
                let index = self.cards.index_one_page_down(heights, viewport_height);
                self.cards.select(index);
            }
            KeyAction::PageUp => {
                let index = self.cards.index_one_page_up(heights, viewport_height);
                self.cards.select(index);
            }
            KeyAction::ToggleExpand => self.cards.toggle_selected(),
            KeyAction::ExpandAll => self.cards.expand_all(),
            KeyAction::CollapseAll => self.cards.collapse_all(),
            KeyAction::NextSection => {
                let present = self.selected_sections();
                self.cards.focus_next_section(&present);
            }
            KeyAction::PrevSection => {
                let present = self.selected_sections();
                self.cards.focus_prev_section(&present);
            }
            KeyAction::ToggleSection => self.cards.toggle_focused_section(),
            KeyAction::StartSearch => {
                self.update_search(search_input_handler::activate_search_input)
            }
            KeyAction::CancelSearch => self.update_search(search_input_handler::cancel_search),
        }
        ActionOutcome::Continue
    }
}
