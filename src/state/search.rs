//! Query bar state machine.
//!
//! SearchState is a sum type over the three states of the query bar:
//! - Inactive: no query, nothing emphasized
//! - Typing: the user is editing; matches update live
//! - Active: a submitted query that tokenized to at least one number

use crate::search::SequenceQuery;

/// Query bar state.
/// Sum type enforces exactly one state at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    /// No active query.
    #[default]
    Inactive,
    /// User is typing. `cursor` counts characters, not bytes.
    Typing {
        /// Text typed so far.
        query: String,
        /// Cursor position in characters.
        cursor: usize,
    },
    /// Submitted query.
    Active {
        /// Tokenized query.
        query: SequenceQuery,
    },
}

impl SearchState {
    /// Start in `Active` if `initial` tokenizes, `Inactive` otherwise.
    pub fn from_initial(initial: Option<&str>) -> Self {
        match initial.and_then(SequenceQuery::parse) {
            Some(query) => SearchState::Active { query },
            None => SearchState::Inactive,
        }
    }

    /// Query used for emphasis right now.
    ///
    /// While typing, the partial text is tokenized on the fly.
    pub fn highlight_query(&self) -> Option<SequenceQuery> {
        match self {
            SearchState::Inactive => None,
            SearchState::Typing { query, .. } => SequenceQuery::parse(query),
            SearchState::Active { query } => Some(query.clone()),
        }
    }

    /// True while the query bar has keyboard focus.
    pub fn is_typing(&self) -> bool {
        matches!(self, SearchState::Typing { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_numeric_query_is_active() {
        let state = SearchState::from_initial(Some("1 2 3"));
        assert!(matches!(state, SearchState::Active { .. }));
        assert_eq!(
            state.highlight_query().unwrap().tokens(),
            &["1", "2", "3"]
        );
    }

    #[test]
    fn initial_non_numeric_query_is_inactive() {
        assert_eq!(SearchState::from_initial(Some("fibonacci")), SearchState::Inactive);
        assert_eq!(SearchState::from_initial(None), SearchState::Inactive);
    }

    #[test]
    fn typing_highlights_partial_query() {
        let state = SearchState::Typing {
            query: "5 8 1".to_string(),
            cursor: 5,
        };
        assert_eq!(state.highlight_query().unwrap().tokens(), &["5", "8", "1"]);
        assert!(state.is_typing());
    }

    #[test]
    fn inactive_highlights_nothing() {
        assert!(SearchState::Inactive.highlight_query().is_none());
    }
}
