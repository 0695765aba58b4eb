//! Tests for the TUI shell, driven through a `TestBackend`.

use super::*;
use crate::model::Entry;
use crate::parser::Catalog;
use crate::view_state::DetailSection;
use ratatui::backend::TestBackend;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn entries() -> Vec<Entry> {
    let mut fib = Entry::new(45, "Fibonacci numbers", "0,1,1,2,3,5,8,13,21");
    fib.example = Some(vec!["a(4) = 3".to_string()]);
    fib.program = Some(vec!["(Python) print(1)".to_string()]);
    vec![
        fib,
        Entry::new(27, "The positive integers", "1,2,3,4,5,6,7"),
        Entry::new(79, "Powers of 2", "1,2,4,8,16,32,64"),
    ]
}

fn create_test_app(width: u16, height: u16) -> TuiApp<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    let catalog = Catalog {
        entries: entries(),
        ..Catalog::default()
    };
    let state = AppState::new(catalog, CardExpansion::Collapsed, None);
    let options = ViewOptions {
        colors: ColorConfig::from_env_and_args(true),
        ..ViewOptions::default()
    };
    let mut app = TuiApp::with_terminal(terminal, state, options);
    app.draw().unwrap();
    app
}

fn screen(app: &TuiApp<TestBackend>) -> String {
    let buffer = app.terminal().backend().buffer();
    let area = buffer.area();
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn press(app: &mut TuiApp<TestBackend>, code: KeyCode) -> bool {
    let quit = app.handle_key(key(code));
    app.draw().unwrap();
    quit
}

#[test]
fn tui_error_from_io_error() {
    let io_err = io::Error::other("test error");
    let tui_err: TuiError = io_err.into();
    assert!(matches!(tui_err, TuiError::Io(_)));
}

#[test]
fn handle_key_q_returns_true() {
    let mut app = create_test_app(60, 20);
    assert!(app.handle_key(key(KeyCode::Char('q'))), "'q' should trigger quit");
}

#[test]
fn handle_key_ctrl_c_returns_true() {
    let mut app = create_test_app(60, 20);
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(app.handle_key(ctrl_c), "Ctrl+C should trigger quit");
}

#[test]
fn handle_key_other_returns_false() {
    let mut app = create_test_app(60, 20);
    assert!(!app.handle_key(key(KeyCode::Char('z'))));
}

#[test]
fn draw_shows_every_card_header() {
    let app = create_test_app(60, 20);
    let text = screen(&app);
    assert!(text.contains("A000045"));
    assert!(text.contains("A000027"));
    assert!(text.contains("A000079"));
    assert!(text.contains("seqcat · 3 entries"));
}

#[test]
fn j_and_k_move_selection() {
    let mut app = create_test_app(60, 20);
    press(&mut app, KeyCode::Char('j'));
    assert_eq!(app.app_state().cards.selected(), 1);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    assert_eq!(app.app_state().cards.selected(), 2);
    press(&mut app, KeyCode::Char('k'));
    assert_eq!(app.app_state().cards.selected(), 1);
}

#[test]
fn enter_expands_selected_card() {
    let mut app = create_test_app(60, 30);
    assert!(!screen(&app).contains("Example"));
    press(&mut app, KeyCode::Enter);
    let text = screen(&app);
    assert!(text.contains("▾ Example"));
    assert!(text.contains("a(4) = 3"));
    assert!(text.contains("▸ Programs"));
    assert!(!text.contains("print(1)"));
}

#[test]
fn tab_and_o_open_a_closed_section() {
    let mut app = create_test_app(60, 30);
    press(&mut app, KeyCode::Tab);
    assert!(app.app_state().cards.expansion(0).is_expanded());
    press(&mut app, KeyCode::Tab);
    assert_eq!(
        app.app_state().cards.focused_section(),
        Some(DetailSection::Programs)
    );

    press(&mut app, KeyCode::Char('o'));
    let text = screen(&app);
    assert!(text.contains("▾ Programs"));
    assert!(text.contains("print(1)"));

    press(&mut app, KeyCode::Char('o'));
    assert!(!screen(&app).contains("print(1)"));
}

#[test]
fn e_and_c_expand_and_collapse_all() {
    let mut app = create_test_app(60, 30);
    press(&mut app, KeyCode::Char('e'));
    assert!((0..3).all(|i| app.app_state().cards.expansion(i).is_expanded()));
    press(&mut app, KeyCode::Char('c'));
    assert!((0..3).all(|i| !app.app_state().cards.expansion(i).is_expanded()));
}

#[test]
fn typing_a_query_highlights_live_and_submits() {
    let mut app = create_test_app(60, 20);
    press(&mut app, KeyCode::Char('/'));
    assert!(app.app_state().search().is_typing());

    for ch in "2 3".chars() {
        press(&mut app, KeyCode::Char(ch));
    }
    assert_eq!(
        app.app_state().highlight_query().map(|q| q.tokens().to_vec()),
        Some(vec!["2".to_string(), "3".to_string()])
    );
    assert!(screen(&app).contains("Search terms"));

    press(&mut app, KeyCode::Enter);
    assert!(matches!(app.app_state().search(), SearchState::Active { .. }));
    assert!(screen(&app).contains("matching 2, 3"));
}

#[test]
fn q_while_typing_is_text_not_quit() {
    let mut app = create_test_app(60, 20);
    press(&mut app, KeyCode::Char('/'));
    assert!(!press(&mut app, KeyCode::Char('q')));
    assert_eq!(
        app.app_state().search(),
        &SearchState::Typing {
            query: "q".to_string(),
            cursor: 1
        }
    );
}

#[test]
fn escape_clears_query() {
    let mut app = create_test_app(60, 20);
    press(&mut app, KeyCode::Char('/'));
    press(&mut app, KeyCode::Char('5'));
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.app_state().search(), &SearchState::Inactive);
    assert!(!screen(&app).contains("Search terms"));
}

#[test]
fn selection_stays_visible_in_small_viewport() {
    // 8 rows: header, 6 card lines, status bar; each collapsed card is 5 lines
    let mut app = create_test_app(60, 8);
    press(&mut app, KeyCode::End);
    assert_eq!(app.app_state().cards.selected(), 2);
    assert!(screen(&app).contains("A000079"));
    assert!(!screen(&app).contains("A000045"));
}

#[test]
fn empty_catalog_renders_placeholder() {
    let terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
    let state = AppState::new(Catalog::default(), CardExpansion::Collapsed, None);
    let mut app = TuiApp::with_terminal(terminal, state, ViewOptions::default());
    app.draw().unwrap();
    assert!(screen(&app).contains("No entries"));
    assert!(!app.handle_key(key(KeyCode::Enter)));
}
