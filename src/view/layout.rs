//! Screen layout: header, card list, query bar and status bar.

use crate::search::SequenceQuery;
use crate::state::{AppState, SearchState};
use crate::view::constants::{HEADER_HEIGHT, SEARCH_INPUT_HEIGHT, STATUS_BAR_HEIGHT};
use crate::view::search_input::SearchInput;
use crate::view::styles::CardStyles;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    /// Title line.
    pub header: Rect,
    /// Card list.
    pub cards: Rect,
    /// Query bar, present unless the search is inactive.
    pub search: Option<Rect>,
    /// Key hints.
    pub status: Rect,
}

/// Split the frame. The query bar sits between the cards and the status bar.
pub fn split_areas(area: Rect, search_visible: bool) -> ScreenAreas {
    let search_height = if search_visible { SEARCH_INPUT_HEIGHT } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(search_height),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);

    ScreenAreas {
        header: chunks[0],
        cards: chunks[1],
        search: search_visible.then_some(chunks[2]),
        status: chunks[3],
    }
}

/// Header text: entry counts, skipped records and the highlight query.
///
/// A partial page shows its position in the full hit list, e.g.
/// `11-20 of 57 entries`.
pub fn header_text(state: &AppState) -> String {
    let noun = |count: u64| if count == 1 { "entry" } else { "entries" };
    let shown = state.entries.len() as u64;
    let mut text = match state.catalog_total {
        Some(total) if total != shown => {
            let first = state.catalog_start + 1;
            let last = state.catalog_start + shown;
            let range = match shown {
                0 => "0".to_string(),
                1 => first.to_string(),
                _ => format!("{first}-{last}"),
            };
            format!("seqcat · {range} of {total} {}", noun(total))
        }
        _ => format!("seqcat · {shown} {}", noun(shown)),
    };
    if state.malformed_count > 0 {
        text.push_str(&format!(" · {} skipped", state.malformed_count));
    }
    if let Some(query) = state.highlight_query() {
        text.push_str(&format!(" · matching {}", query.tokens().join(", ")));
    }
    text
}

/// Key hints for the status bar.
pub fn keyboard_hints(search: &SearchState) -> &'static str {
    if search.is_typing() {
        "Enter: apply | Esc: clear | ←/→: move cursor"
    } else {
        "j/k: select | Enter: expand | e/c: expand/collapse all | Tab/o: sections | /: search | q: quit"
    }
}

/// Render one frame from pre-rendered card lines.
pub fn render_layout(
    frame: &mut Frame,
    areas: &ScreenAreas,
    state: &AppState,
    cards: &[Vec<Line<'static>>],
    styles: &CardStyles,
) {
    frame.render_widget(
        Paragraph::new(Line::from(header_text(state))).style(styles.id),
        areas.header,
    );

    render_cards(frame, areas.cards, state, cards, styles);

    if let Some(search_area) = areas.search {
        frame.render_widget(SearchInput::new(state.search()), search_area);
    }

    let status = if state.source_label.is_empty() {
        keyboard_hints(state.search()).to_string()
    } else {
        format!("{} | {}", keyboard_hints(state.search()), state.source_label)
    };
    frame.render_widget(
        Paragraph::new(Line::from(status)).style(styles.muted),
        areas.status,
    );
}

fn render_cards(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    cards: &[Vec<Line<'static>>],
    styles: &CardStyles,
) {
    if cards.is_empty() {
        let message = empty_message(state.highlight_query());
        frame.render_widget(
            Paragraph::new(Line::from(message))
                .alignment(Alignment::Center)
                .style(styles.muted),
            area,
        );
        return;
    }

    let visible: Vec<Line<'static>> = cards
        .iter()
        .flatten()
        .skip(state.cards.scroll_offset())
        .take(usize::from(area.height))
        .cloned()
        .collect();
    frame.render_widget(Paragraph::new(visible), area);
}

fn empty_message(query: Option<&SequenceQuery>) -> String {
    match query {
        Some(query) => format!("No entries for {}", query.as_str()),
        None => "No entries".to_string(),
    }
}

// ===== Tests =====
