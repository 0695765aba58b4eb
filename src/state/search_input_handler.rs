//! Query bar editing (pure state transitions).
//!
//! All functions take the current `SearchState` by value and return the next
//! one. Calls that do not apply to the current state return it unchanged.

use crate::search::SequenceQuery;
use crate::state::SearchState;

/// Byte offset of the `char_index`-th character (or the end of the string).
fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// Insert `ch` at the cursor and advance it.
pub fn handle_char_input(state: SearchState, ch: char) -> SearchState {
    match state {
        SearchState::Typing { mut query, cursor } => {
            query.insert(byte_offset(&query, cursor), ch);
            SearchState::Typing {
                query,
                cursor: cursor + 1,
            }
        }
        other => other,
    }
}

/// Delete the character before the cursor.
pub fn handle_backspace(state: SearchState) -> SearchState {
    match state {
        SearchState::Typing { mut query, cursor } if cursor > 0 => {
            query.remove(byte_offset(&query, cursor - 1));
            SearchState::Typing {
                query,
                cursor: cursor - 1,
            }
        }
        other => other,
    }
}

/// Move the cursor one character left, saturating at 0.
pub fn handle_cursor_left(state: SearchState) -> SearchState {
    match state {
        SearchState::Typing { query, cursor } => SearchState::Typing {
            query,
            cursor: cursor.saturating_sub(1),
        },
        other => other,
    }
}

/// Move the cursor one character right, saturating at the end.
pub fn handle_cursor_right(state: SearchState) -> SearchState {
    match state {
        SearchState::Typing { query, cursor } => {
            let max_cursor = query.chars().count();
            SearchState::Typing {
                query,
                cursor: (cursor + 1).min(max_cursor),
            }
        }
        other => other,
    }
}

/// Open the query bar.
///
/// From `Active`, the submitted text is loaded for editing.
pub fn activate_search_input(state: SearchState) -> SearchState {
    match state {
        SearchState::Inactive => SearchState::Typing {
            query: String::new(),
            cursor: 0,
        },
        SearchState::Active { query } => {
            let text = query.as_str().to_string();
            let cursor = text.chars().count();
            SearchState::Typing {
                query: text,
                cursor,
            }
        }
        typing => typing,
    }
}

/// Clear the query.
pub fn cancel_search(_state: SearchState) -> SearchState {
    SearchState::Inactive
}

/// Submit the typed text.
///
/// Becomes `Active` when it tokenizes to at least one number, `Inactive`
/// otherwise.
pub fn submit_search(state: SearchState) -> SearchState {
    match state {
        SearchState::Typing { query, .. } => match SequenceQuery::parse(&query) {
            Some(query) => SearchState::Active { query },
            None => SearchState::Inactive,
        },
        other => other,
    }
}

#[cfg(test)]
#[path = "search_input_handler_tests.rs"]
mod tests;
