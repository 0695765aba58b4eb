//! TUI rendering and terminal management (impure shell)

pub mod card;
pub mod constants;
pub mod layout;
mod search_input;
pub mod styles;

pub use card::{render_card, wrap_data_values, wrap_styled_line, wrap_text, CardContext};
pub use layout::{render_layout, split_areas, ScreenAreas};
pub use search_input::SearchInput;
pub use styles::{CardStyles, ColorConfig};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::AppError;
use crate::parser::parse_catalog;
use crate::program::ProgramParser;
use crate::source::InputSource;
use crate::state::{search_input_handler, ActionOutcome, AppState, SearchState};
use crate::view_state::{CardExpansion, SyntaxHighlighter};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, text::Line, Terminal};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] crate::model::InputError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Presentation options resolved from configuration and CLI flags.
///
/// ```rust
/// use seqcat::config::ResolvedConfig;
/// use seqcat::view::{ColorConfig, ViewOptions};
///
/// let options = ViewOptions::from_config(&ResolvedConfig::default(), ColorConfig::enabled())
///     .with_query(Some("1 2 3".to_string()));
/// assert_eq!(options.query.as_deref(), Some("1 2 3"));
/// ```
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// Syntax highlighting theme.
    pub theme: String,
    /// Whether colors are used.
    pub colors: ColorConfig,
    /// Expansion every card starts in.
    pub initial_expansion: CardExpansion,
    /// Highlight query overriding the catalog's own.
    pub query: Option<String>,
    /// Program marker rules and language table.
    pub parser: ProgramParser,
}

impl ViewOptions {
    /// Options from a resolved configuration.
    pub fn from_config(config: &ResolvedConfig, colors: ColorConfig) -> Self {
        Self {
            theme: config.theme.clone(),
            colors,
            initial_expansion: if config.expand_all {
                CardExpansion::Expanded
            } else {
                CardExpansion::Collapsed
            },
            query: None,
            parser: ProgramParser::new(config.marker_syntax.clone(), config.languages.clone()),
        }
    }

    /// Set the highlight query override.
    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query;
        self
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from_config(&ResolvedConfig::default(), ColorConfig::enabled())
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    parser: ProgramParser,
    highlighter: SyntaxHighlighter,
    styles: CardStyles,
    /// Card heights from the last draw, used for paging.
    card_heights: Vec<usize>,
    /// Card list height from the last draw.
    viewport_height: usize,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(app_state: AppState, options: ViewOptions) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(terminal, app_state, options))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Redraws only after input or a
    /// resize.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                    self.draw()?;
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "Terminal resized");
                    self.draw()?;
                }
                _ => {}
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create an application on an existing terminal (e.g. a `TestBackend`).
    pub fn with_terminal(terminal: Terminal<B>, app_state: AppState, options: ViewOptions) -> Self {
        Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            parser: options.parser,
            highlighter: SyntaxHighlighter::new(&options.theme),
            styles: CardStyles::with_color_config(options.colors),
            card_heights: Vec::new(),
            viewport_height: 0,
        }
    }

    /// Current application state.
    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Underlying terminal, for buffer inspection.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even while typing
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        if self.app_state.search().is_typing() && self.handle_typing_key(key) {
            return false;
        }

        let Some(action) = self.key_bindings.get(KeyEvent::new(key.code, key.modifiers)) else {
            return false;
        };
        debug!(?action, "Key action");

        let outcome = self
            .app_state
            .apply_action(action, &self.card_heights, self.viewport_height);
        outcome == ActionOutcome::Quit
    }

    /// Query bar editing keys. Returns true if the key was consumed.
    fn handle_typing_key(&mut self, key: KeyEvent) -> bool {
        let current = self.app_state.search().clone();
        let next = match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                search_input_handler::handle_char_input(current, ch)
            }
            KeyCode::Backspace => search_input_handler::handle_backspace(current),
            KeyCode::Left => search_input_handler::handle_cursor_left(current),
            KeyCode::Right => search_input_handler::handle_cursor_right(current),
            KeyCode::Enter => search_input_handler::submit_search(current),
            _ => return false,
        };
        self.app_state.set_search(next);
        true
    }

    fn render_cards(&self, width: u16) -> Vec<Vec<Line<'static>>> {
        let state = &self.app_state;
        let query = state.highlight_query();
        let selected = state.cards.selected();

        state
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let ctx = CardContext {
                    query,
                    expansion: state.cards.expansion(index),
                    sections: state.cards.sections(index),
                    focused_section: (index == selected)
                        .then(|| state.cards.focused_section())
                        .flatten(),
                    selected: index == selected,
                    width,
                    parser: &self.parser,
                    highlighter: &self.highlighter,
                    styles: &self.styles,
                };
                render_card(entry, &ctx)
            })
            .collect()
    }

    /// Render a frame.
    ///
    /// Cards are rendered first so the scroll offset can be adjusted to
    /// keep the selected card on screen.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let frame_area = Rect::new(0, 0, size.width.max(1), size.height);
        let search_visible = *self.app_state.search() != SearchState::Inactive;
        let areas = split_areas(frame_area, search_visible);

        let cards = self.render_cards(areas.cards.width);
        self.card_heights = cards.iter().map(Vec::len).collect();
        self.viewport_height = usize::from(areas.cards.height);
        self.app_state
            .cards
            .ensure_visible(&self.card_heights, self.viewport_height);

        let state = &self.app_state;
        let styles = &self.styles;
        self.terminal.draw(|frame| {
            render_layout(frame, &areas, state, &cards, styles);
        })?;

        Ok(())
    }
}

/// Read the catalog from `input_source` and run the TUI until the user quits.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(input_source: &InputSource, options: ViewOptions) -> Result<(), TuiError> {
    let text = input_source.read_to_string()?;
    let catalog = parse_catalog(&text).map_err(AppError::from)?;
    info!(
        source = %input_source.describe(),
        entries = catalog.entries.len(),
        "Catalog loaded"
    );

    let app_state = AppState::new(
        catalog,
        options.initial_expansion,
        options.query.as_deref(),
    )
    .with_source_label(input_source.describe());

    let mut app = TuiApp::new(app_state, options)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
