//! Card rendering.
//!
//! A card is rendered to a flat list of pre-wrapped lines so its height is
//! known before drawing; the card list uses those heights for scrolling and
//! paging.

use crate::model::Entry;
use crate::program::{ProgramBlock, ProgramParser};
use crate::search::{emphasize_values, DataValue, SequenceQuery};
use crate::view::constants::{
    COLLAPSE_GLYPH, EXPAND_GLYPH, GUTTER_WIDTH, SECTION_CLOSED_GLYPH, SECTION_INDENT,
    SECTION_OPEN_GLYPH,
};
use crate::view::styles::CardStyles;
use crate::view_state::{CardExpansion, DetailSection, SectionStates, SyntaxHighlighter};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Everything needed to render one card besides the entry itself.
#[derive(Clone, Copy)]
pub struct CardContext<'a> {
    /// Query whose matches are emphasized.
    pub query: Option<&'a SequenceQuery>,
    /// Whether detail sections are shown.
    pub expansion: CardExpansion,
    /// Which detail sections show their bodies.
    pub sections: SectionStates,
    /// Section whose title is highlighted.
    pub focused_section: Option<DetailSection>,
    /// Whether this is the selected card.
    pub selected: bool,
    /// Total width available, gutter included.
    pub width: u16,
    /// Splits the entry's program listings into blocks.
    pub parser: &'a ProgramParser,
    /// Highlights program blocks.
    pub highlighter: &'a SyntaxHighlighter,
    /// Colours.
    pub styles: &'a CardStyles,
}

impl CardContext<'_> {
    fn content_width(&self) -> usize {
        usize::from(self.width.saturating_sub(GUTTER_WIDTH)).max(1)
    }
}

/// Render `entry` as a card.
///
/// Every line starts with the selection gutter; the card ends with one blank
/// separator line.
pub fn render_card(entry: &Entry, ctx: &CardContext<'_>) -> Vec<Line<'static>> {
    let width = ctx.content_width();
    let styles = ctx.styles;

    let mut body = vec![header_line(entry, width, styles)];
    body.extend(
        wrap_text(&entry.name, width)
            .into_iter()
            .map(|line| Line::from(Span::styled(line, styles.name))),
    );

    let spans = ctx
        .query
        .map(|query| query.locate(&entry.data))
        .unwrap_or_default();
    body.extend(wrap_data_values(
        &emphasize_values(&entry.data, &spans),
        width,
        styles,
    ));

    if ctx.expansion.is_expanded() {
        body.extend(detail_sections(entry, ctx, width));
    }

    body.push(expander_line(ctx.expansion, width, styles));

    let gutter = if ctx.selected {
        Span::styled("▌ ", styles.selected)
    } else {
        Span::raw("  ")
    };

    let mut lines: Vec<Line<'static>> = body
        .into_iter()
        .map(|mut line| {
            line.spans.insert(0, gutter.clone());
            line
        })
        .collect();
    lines.push(Line::default());
    lines
}

// ===== Header and expander =====

fn header_line(entry: &Entry, width: usize, styles: &CardStyles) -> Line<'static> {
    let id = entry.id().to_string();
    let badges: Vec<&str> = [
        (entry.program.is_some(), "prog"),
        (entry.maple.is_some(), "maple"),
        (entry.mathematica.is_some(), "mma"),
    ]
    .into_iter()
    .filter_map(|(present, badge)| present.then_some(badge))
    .collect();

    let mut spans = vec![Span::styled(id.clone(), styles.id)];
    if !badges.is_empty() {
        let badge_text = badges.join(" ");
        let padding = width
            .saturating_sub(id.width() + badge_text.width())
            .max(1);
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(badge_text, styles.badge));
    }
    Line::from(spans)
}

fn expander_line(expansion: CardExpansion, width: usize, styles: &CardStyles) -> Line<'static> {
    let glyph = if expansion.is_expanded() {
        COLLAPSE_GLYPH
    } else {
        EXPAND_GLYPH
    };
    Line::from(vec![
        Span::raw(" ".repeat(width.saturating_sub(1) / 2)),
        Span::styled(glyph, styles.muted),
    ])
}

// ===== Data values =====

/// Lay out data values as `a, b, c`, breaking lines only between values.
///
/// The comma stays with the value before it. A value wider than `width`
/// gets a line of its own.
pub fn wrap_data_values(
    values: &[DataValue<'_>],
    width: usize,
    styles: &CardStyles,
) -> Vec<Line<'static>> {
    let width = width.max(1);
    let last = values.len().saturating_sub(1);
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut line_width = 0;

    for (index, value) in values.iter().enumerate() {
        let separator = if index < last { "," } else { "" };
        let token_width = value.text.width() + separator.len();

        if line_width > 0 && line_width + 1 + token_width > width {
            lines.push(Line::from(std::mem::take(&mut spans)));
            line_width = 0;
        }
        if line_width > 0 {
            spans.push(Span::styled(" ", styles.data));
            line_width += 1;
        }

        let style = if value.emphasized {
            styles.emphasis
        } else {
            styles.data
        };
        spans.push(Span::styled(value.text.to_string(), style));
        if !separator.is_empty() {
            spans.push(Span::styled(separator, styles.data));
        }
        line_width += token_width;
    }

    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }
    lines
}

// ===== Text wrapping =====

/// Word-wrap prose to `width` columns. Words wider than a line are split.
///
/// Always returns at least one line.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if current_width > 0 && current_width + 1 + word_width > width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width > width {
            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if current_width > 0 && current_width + ch_width > width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
            continue;
        }

        if current_width > 0 {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Hard-wrap a styled line to `width` columns, keeping every span's style.
///
/// Always returns at least one line.
pub fn wrap_styled_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    let width = width.max(1);
    let line_style = line.style;
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut line_width = 0;

    for span in line.spans {
        let mut piece = String::new();
        for ch in span.content.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if line_width > 0 && line_width + ch_width > width {
                if !piece.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut piece), span.style));
                }
                lines.push(Line::from(std::mem::take(&mut spans)).style(line_style));
                line_width = 0;
            }
            piece.push(ch);
            line_width += ch_width;
        }
        if !piece.is_empty() {
            spans.push(Span::styled(piece, span.style));
        }
    }

    lines.push(Line::from(spans).style(line_style));
    lines
}

/// Hard-wrap monospace text to `width` columns, keeping its spacing.
///
/// Always returns at least one line.
pub fn wrap_monospace(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width > 0 && current_width + ch_width > width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += ch_width;
    }

    lines.push(current);
    lines
}

// ===== Detail sections =====

fn section_title(
    name: String,
    open: bool,
    focused: bool,
    styles: &CardStyles,
) -> Line<'static> {
    let glyph = if open {
        SECTION_OPEN_GLYPH
    } else {
        SECTION_CLOSED_GLYPH
    };
    let style = if focused {
        styles.focused_section
    } else {
        styles.section_title
    };
    Line::from(Span::styled(format!("{glyph} {name}"), style))
}

fn section_name(entry: &Entry, section: DetailSection) -> String {
    match section {
        DetailSection::Example => "Example".to_string(),
        DetailSection::Comment => "Comment".to_string(),
        DetailSection::References => format!("References ({})", entry.references),
        DetailSection::Formula => "Formula".to_string(),
        DetailSection::Programs => "Programs".to_string(),
        DetailSection::Crossrefs => "Crossrefs".to_string(),
        DetailSection::Extensions => "Extensions".to_string(),
    }
}

fn indented(text: String, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::raw(" ".repeat(SECTION_INDENT)),
        Span::styled(text, style),
    ])
}

fn lines_of(field: &Option<Vec<String>>) -> &[String] {
    field.as_deref().unwrap_or_default()
}

fn monospace_body(body: &[String], width: usize, styles: &CardStyles) -> Vec<Line<'static>> {
    let body_width = width.saturating_sub(SECTION_INDENT);
    body.iter()
        .flat_map(|text| wrap_monospace(text, body_width))
        .map(|line| indented(line, styles.monospace))
        .collect()
}

fn prose_body(body: &[String], width: usize) -> Vec<Line<'static>> {
    let body_width = width.saturating_sub(SECTION_INDENT);
    body.iter()
        .flat_map(|text| wrap_text(text, body_width))
        .map(|line| indented(line, Style::default()))
        .collect()
}

fn programs_body(
    blocks: &[ProgramBlock],
    ctx: &CardContext<'_>,
    width: usize,
) -> Vec<Line<'static>> {
    let styles = ctx.styles;
    let code_indent = SECTION_INDENT * 2;
    let label_width = width.saturating_sub(SECTION_INDENT);
    let code_width = width.saturating_sub(code_indent);

    let mut lines = Vec::new();
    for block in blocks {
        lines.extend(
            wrap_monospace(&block.label, label_width)
                .into_iter()
                .map(|label| indented(label, styles.block_title)),
        );
        let mode = ctx.parser.highlight_mode(block);
        for code_line in ctx.highlighter.highlight_block(block, &mode) {
            for mut piece in wrap_styled_line(code_line, code_width) {
                piece.spans.insert(0, Span::raw(" ".repeat(code_indent)));
                lines.push(piece);
            }
        }
    }
    lines
}

fn section_body(
    entry: &Entry,
    section: DetailSection,
    ctx: &CardContext<'_>,
    width: usize,
) -> Vec<Line<'static>> {
    let styles = ctx.styles;
    match section {
        DetailSection::Example => monospace_body(lines_of(&entry.example), width, styles),
        DetailSection::Comment => monospace_body(lines_of(&entry.comment), width, styles),
        DetailSection::References => prose_body(lines_of(&entry.reference), width),
        DetailSection::Formula => monospace_body(lines_of(&entry.formula), width, styles),
        DetailSection::Programs => programs_body(&ctx.parser.parse_entry(entry), ctx, width),
        DetailSection::Crossrefs => prose_body(lines_of(&entry.xref), width),
        DetailSection::Extensions => prose_body(lines_of(&entry.ext), width),
    }
}

fn footer_line(entry: &Entry, width: usize, styles: &CardStyles) -> Vec<Line<'static>> {
    let mut parts = Vec::new();
    if !entry.author.is_empty() {
        parts.push(entry.author.clone());
    }
    let keywords = entry.keywords();
    if !keywords.is_empty() {
        parts.push(format!("keywords: {}", keywords.join(", ")));
    }
    if let Some(revised) = entry.last_revised() {
        parts.push(format!("revised {}", revised.format("%Y-%m-%d")));
    }

    if parts.is_empty() {
        return Vec::new();
    }
    wrap_text(&parts.join(" · "), width)
        .into_iter()
        .map(|line| Line::from(Span::styled(line, styles.muted)))
        .collect()
}

/// Sections the entry has, each as a title line followed by its body when
/// open, then the footer.
fn detail_sections(entry: &Entry, ctx: &CardContext<'_>, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for section in DetailSection::present_in(entry) {
        let open = ctx.sections.is_open(section);
        let focused = ctx.focused_section == Some(section);
        lines.push(section_title(
            section_name(entry, section),
            open,
            focused,
            ctx.styles,
        ));
        if open {
            lines.extend(section_body(entry, section, ctx, width));
        }
    }

    lines.extend(footer_line(entry, width, ctx.styles));
    lines
}

// ===== Tests =====

#[cfg(test)]
#[path = "card_tests.rs"]
mod tests;
