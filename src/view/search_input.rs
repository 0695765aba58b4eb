//! Search input widget for rendering the query bar.

use crate::state::SearchState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search input widget.
/// Renders the query bar while typing or when a query is active.
pub struct SearchInput<'a> {
    search_state: &'a SearchState,
}

impl<'a> SearchInput<'a> {
    /// Create new SearchInput widget.
    pub fn new(search_state: &'a SearchState) -> Self {
        Self { search_state }
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.search_state {
            SearchState::Typing { query, cursor } => {
                let before: String = query.chars().take(*cursor).collect();
                let mut after = query.chars().skip(*cursor);
                let cursor_char = after
                    .next()
                    .map(String::from)
                    .unwrap_or_else(|| " ".to_string());
                let after_text: String = after.collect();

                let line = Line::from(vec![
                    Span::raw(before),
                    Span::styled(
                        cursor_char,
                        Style::default()
                            .bg(Color::White)
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(after_text),
                ]);
                Paragraph::new(line)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title("Search terms"),
                    )
                    .render(area, buf);
            }
            SearchState::Active { query } => {
                Paragraph::new(Line::from(query.tokens().join(", ")))
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title("Search terms (active)"),
                    )
                    .render(area, buf);
            }
            SearchState::Inactive => {}
        }
    }
}
