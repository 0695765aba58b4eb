//! Keyboard bindings configuration.

use crate::model::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings.insert(KeyEvent::new(code, modifiers), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        let none = KeyModifiers::NONE;

        // Card selection
        keys.bind(KeyCode::Char('j'), none, KeyAction::NextCard);
        keys.bind(KeyCode::Down, none, KeyAction::NextCard);
        keys.bind(KeyCode::Char('k'), none, KeyAction::PrevCard);
        keys.bind(KeyCode::Up, none, KeyAction::PrevCard);
        keys.bind(KeyCode::Char('g'), none, KeyAction::FirstCard);
        keys.bind(KeyCode::Home, none, KeyAction::FirstCard);
        keys.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::LastCard);
        keys.bind(KeyCode::End, none, KeyAction::LastCard);

        // Paging
        keys.bind(KeyCode::Char('d'), KeyModifiers::CONTROL, KeyAction::PageDown);
        keys.bind(KeyCode::PageDown, none, KeyAction::PageDown);
        keys.bind(KeyCode::Char('u'), KeyModifiers::CONTROL, KeyAction::PageUp);
        keys.bind(KeyCode::PageUp, none, KeyAction::PageUp);

        // Expansion
        keys.bind(KeyCode::Enter, none, KeyAction::ToggleExpand);
        keys.bind(KeyCode::Char(' '), none, KeyAction::ToggleExpand);
        keys.bind(KeyCode::Char('e'), none, KeyAction::ExpandAll);
        keys.bind(KeyCode::Char('c'), none, KeyAction::CollapseAll);

        // Detail sections
        keys.bind(KeyCode::Tab, none, KeyAction::NextSection);
        keys.bind(KeyCode::BackTab, none, KeyAction::PrevSection);
        keys.bind(KeyCode::BackTab, KeyModifiers::SHIFT, KeyAction::PrevSection);
        keys.bind(KeyCode::Char('o'), none, KeyAction::ToggleSection);

        // Search
        keys.bind(KeyCode::Char('/'), none, KeyAction::StartSearch);
        keys.bind(KeyCode::Char('f'), KeyModifiers::CONTROL, KeyAction::StartSearch);
        keys.bind(KeyCode::Esc, none, KeyAction::CancelSearch);

        keys.bind(KeyCode::Char('q'), none, KeyAction::Quit);

        keys
    }
}
