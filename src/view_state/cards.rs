//! Card list view state: expansion flags, section flags, selection and
//! scroll position.
//!
//! This is presentation state. The matcher and the program parser never see
//! it.

use crate::model::Entry;

/// Whether a card shows its detail sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardExpansion {
    /// Header, name and data only.
    #[default]
    Collapsed,
    /// Detail sections visible.
    Expanded,
}

impl CardExpansion {
    /// The other state.
    pub fn toggled(self) -> Self {
        match self {
            CardExpansion::Collapsed => CardExpansion::Expanded,
            CardExpansion::Expanded => CardExpansion::Collapsed,
        }
    }

    /// True for `Expanded`.
    pub fn is_expanded(self) -> bool {
        self == CardExpansion::Expanded
    }
}

// ===== Detail sections =====

const SECTION_COUNT: usize = 7;

/// Collapsible section of an expanded card, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DetailSection {
    /// Worked examples.
    Example,
    /// Comments.
    Comment,
    /// Literature references.
    References,
    /// Formulas.
    Formula,
    /// Program listings.
    Programs,
    /// Cross references.
    Crossrefs,
    /// Extensions.
    Extensions,
}

impl DetailSection {
    /// Every section in display order.
    pub const ALL: [DetailSection; SECTION_COUNT] = [
        DetailSection::Example,
        DetailSection::Comment,
        DetailSection::References,
        DetailSection::Formula,
        DetailSection::Programs,
        DetailSection::Crossrefs,
        DetailSection::Extensions,
    ];

    /// Only examples start open.
    pub fn open_by_default(self) -> bool {
        self == DetailSection::Example
    }

    /// Whether `entry` has this section.
    ///
    /// Programs need at least one listing line; the other sections only need
    /// the field to be present.
    pub fn is_present(self, entry: &Entry) -> bool {
        match self {
            DetailSection::Example => entry.example.is_some(),
            DetailSection::Comment => entry.comment.is_some(),
            DetailSection::References => entry.reference.is_some(),
            DetailSection::Formula => entry.formula.is_some(),
            DetailSection::Programs => entry.has_program_code(),
            DetailSection::Crossrefs => entry.xref.is_some(),
            DetailSection::Extensions => entry.ext.is_some(),
        }
    }

    /// Sections `entry` has, in display order.
    pub fn present_in(entry: &Entry) -> Vec<DetailSection> {
        Self::ALL
            .into_iter()
            .filter(|section| section.is_present(entry))
            .collect()
    }
}

/// Open/closed flag of every detail section of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionStates {
    open: [bool; SECTION_COUNT],
}

impl SectionStates {
    /// Every section open.
    pub fn all_open() -> Self {
        Self {
            open: [true; SECTION_COUNT],
        }
    }

    /// Whether `section` shows its body.
    pub fn is_open(&self, section: DetailSection) -> bool {
        self.open[section as usize]
    }

    /// Flip `section`.
    pub fn toggle(&mut self, section: DetailSection) {
        let flag = &mut self.open[section as usize];
        *flag = !*flag;
    }
}

impl Default for SectionStates {
    fn default() -> Self {
        Self {
            open: DetailSection::ALL.map(DetailSection::open_by_default),
        }
    }
}

// ===== CardListState =====

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CardView {
    expansion: CardExpansion,
    sections: SectionStates,
}

/// View state for a list of cards.
///
/// Invariants: `selected < len` whenever `len > 0`; a focused section only
/// exists on the selected card while it is expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardListState {
    cards: Vec<CardView>,
    selected: usize,
    scroll_offset: usize,
    focused_section: Option<DetailSection>,
}

impl CardListState {
    /// State for `len` cards, all in the given expansion.
    pub fn new(len: usize, initial: CardExpansion) -> Self {
        Self {
            cards: vec![
                CardView {
                    expansion: initial,
                    sections: SectionStates::default(),
                };
                len
            ],
            selected: 0,
            scroll_offset: 0,
            focused_section: None,
        }
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True when there are no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Index of the selected card (0 when empty).
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// First visible line of the rendered list.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Expansion of card `index`; out-of-range cards read as collapsed.
    pub fn expansion(&self, index: usize) -> CardExpansion {
        self.cards
            .get(index)
            .map(|card| card.expansion)
            .unwrap_or_default()
    }

    /// Section flags of card `index`; out-of-range cards read as defaults.
    pub fn sections(&self, index: usize) -> SectionStates {
        self.cards
            .get(index)
            .map(|card| card.sections)
            .unwrap_or_default()
    }

    /// Focused section of the selected card.
    pub fn focused_section(&self) -> Option<DetailSection> {
        self.focused_section
    }

    /// Toggle the selected card.
    pub fn toggle_selected(&mut self) {
        if let Some(card) = self.cards.get_mut(self.selected) {
            card.expansion = card.expansion.toggled();
            if !card.expansion.is_expanded() {
                self.focused_section = None;
            }
        }
    }

    /// Expand every card.
    pub fn expand_all(&mut self) {
        for card in &mut self.cards {
            card.expansion = CardExpansion::Expanded;
        }
    }

    /// Collapse every card.
    pub fn collapse_all(&mut self) {
        for card in &mut self.cards {
            card.expansion = CardExpansion::Collapsed;
        }
        self.focused_section = None;
    }

    /// Focus the section after the focused one, wrapping to the first.
    ///
    /// `present` lists the selected card's sections in display order. A
    /// collapsed card is expanded first.
    pub fn focus_next_section(&mut self, present: &[DetailSection]) {
        let next = match self.focused_section {
            Some(current) => present
                .iter()
                .find(|section| **section > current)
                .or(present.first()),
            None => present.first(),
        };
        self.focus_section(next.copied());
    }

    /// Focus the section before the focused one, wrapping to the last.
    pub fn focus_prev_section(&mut self, present: &[DetailSection]) {
        let prev = match self.focused_section {
            Some(current) => present
                .iter()
                .rev()
                .find(|section| **section < current)
                .or(present.last()),
            None => present.last(),
        };
        self.focus_section(prev.copied());
    }

    fn focus_section(&mut self, section: Option<DetailSection>) {
        let Some(section) = section else {
            return;
        };
        if let Some(card) = self.cards.get_mut(self.selected) {
            card.expansion = CardExpansion::Expanded;
            self.focused_section = Some(section);
        }
    }

    /// Open or close the focused section of the selected card.
    pub fn toggle_focused_section(&mut self) {
        let Some(section) = self.focused_section else {
            return;
        };
        if let Some(card) = self.cards.get_mut(self.selected) {
            card.sections.toggle(section);
        }
    }

    /// Select the next card, stopping at the last.
    pub fn select_next(&mut self) {
        self.select(self.selected.saturating_add(1));
    }

    /// Select the previous card, stopping at the first.
    pub fn select_prev(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    /// Select the first card.
    pub fn select_first(&mut self) {
        self.select(0);
    }

    /// Select the last card.
    pub fn select_last(&mut self) {
        self.select(self.len().saturating_sub(1));
    }

    /// Select `index`, clamped to the list. Moving to another card drops the
    /// section focus.
    pub fn select(&mut self, index: usize) {
        let index = index.min(self.len().saturating_sub(1));
        if index != self.selected {
            self.focused_section = None;
        }
        self.selected = index;
    }

    /// Adjust the scroll offset so the selected card is on screen.
    ///
    /// `heights[i]` is the rendered height of card `i` in lines. A card taller
    /// than the viewport is aligned to its top.
    pub fn ensure_visible(&mut self, heights: &[usize], viewport_height: usize) {
        let Some(&height) = heights.get(self.selected) else {
            self.scroll_offset = 0;
            return;
        };

        let top: usize = heights[..self.selected].iter().sum();
        let bottom = top + height;
        let total: usize = heights.iter().sum();

        if top < self.scroll_offset || height >= viewport_height {
            self.scroll_offset = top;
        } else if bottom > self.scroll_offset + viewport_height {
            self.scroll_offset = bottom - viewport_height;
        }

        let max_offset = total.saturating_sub(viewport_height);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    /// Index of the card `viewport_height` lines below the selected card's top.
    pub fn index_one_page_down(&self, heights: &[usize], viewport_height: usize) -> usize {
        let mut remaining = viewport_height;
        let mut index = self.selected;
        while index + 1 < heights.len() && remaining >= heights[index] {
            remaining -= heights[index];
            index += 1;
        }
        index.max((self.selected + 1).min(self.len().saturating_sub(1)))
    }

    /// Index of the card `viewport_height` lines above the selected card.
    pub fn index_one_page_up(&self, heights: &[usize], viewport_height: usize) -> usize {
        let mut remaining = viewport_height;
        let mut index = self.selected;
        while index > 0 && remaining >= heights.get(index - 1).copied().unwrap_or(0) {
            remaining -= heights.get(index - 1).copied().unwrap_or(0);
            index -= 1;
        }
        index.min(self.selected.saturating_sub(1))
    }
}
