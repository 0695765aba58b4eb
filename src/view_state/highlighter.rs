//! Syntax highlighting for program blocks using syntect + two-face.
//!
//! The syntax is chosen from a block's [`HighlightMode`]; a token with no
//! matching syntax definition falls back to plain text, so every block
//! renders.

use crate::program::{HighlightMode, ProgramBlock};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::sync::LazyLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::FontStyle;
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tracing::trace;
use two_face::theme::{EmbeddedLazyThemeSet, EmbeddedThemeName};

/// Default theme name.
pub const DEFAULT_THEME: &str = "base16-ocean-dark";

/// Theme names accepted in configuration and on the command line.
const THEMES: &[(&str, EmbeddedThemeName)] = &[
    ("ansi", EmbeddedThemeName::Ansi),
    ("base16", EmbeddedThemeName::Base16),
    ("base16-256", EmbeddedThemeName::Base16_256),
    ("base16-eighties-dark", EmbeddedThemeName::Base16EightiesDark),
    ("base16-mocha-dark", EmbeddedThemeName::Base16MochaDark),
    ("base16-ocean-dark", EmbeddedThemeName::Base16OceanDark),
    ("base16-ocean-light", EmbeddedThemeName::Base16OceanLight),
    ("coldark-cold", EmbeddedThemeName::ColdarkCold),
    ("coldark-dark", EmbeddedThemeName::ColdarkDark),
    ("dark-neon", EmbeddedThemeName::DarkNeon),
    ("dracula", EmbeddedThemeName::Dracula),
    ("github", EmbeddedThemeName::Github),
    ("gruvbox-dark", EmbeddedThemeName::GruvboxDark),
    ("gruvbox-light", EmbeddedThemeName::GruvboxLight),
    ("inspired-github", EmbeddedThemeName::InspiredGithub),
    ("leet", EmbeddedThemeName::Leet),
    ("monokai", EmbeddedThemeName::MonokaiExtended),
    ("monokai-bright", EmbeddedThemeName::MonokaiExtendedBright),
    ("monokai-light", EmbeddedThemeName::MonokaiExtendedLight),
    ("nord", EmbeddedThemeName::Nord),
    ("one-half-dark", EmbeddedThemeName::OneHalfDark),
    ("one-half-light", EmbeddedThemeName::OneHalfLight),
    ("solarized-dark", EmbeddedThemeName::SolarizedDark),
    ("solarized-light", EmbeddedThemeName::SolarizedLight),
    ("sublime-snazzy", EmbeddedThemeName::SublimeSnazzy),
    ("two-dark", EmbeddedThemeName::TwoDark),
    ("visual-studio-dark-plus", EmbeddedThemeName::VisualStudioDarkPlus),
    ("zenburn", EmbeddedThemeName::Zenburn),
];

static THEME_SET: LazyLock<EmbeddedLazyThemeSet> = LazyLock::new(two_face::theme::extra);

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(two_face::syntax::extra_newlines);

fn embedded_theme(name: &str) -> Option<EmbeddedThemeName> {
    THEMES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, theme)| *theme)
}

/// All valid theme names.
pub fn theme_names() -> impl Iterator<Item = &'static str> {
    THEMES.iter().map(|(name, _)| *name)
}

/// Check if a theme name is valid.
pub fn is_valid_theme(name: &str) -> bool {
    embedded_theme(name).is_some()
}

/// Syntax highlighter with a fixed theme.
#[derive(Clone, Copy)]
pub struct SyntaxHighlighter {
    theme: EmbeddedThemeName,
}

impl SyntaxHighlighter {
    /// Create a highlighter; unknown theme names use [`DEFAULT_THEME`].
    pub fn new(theme_name: &str) -> Self {
        Self {
            theme: embedded_theme(theme_name).unwrap_or(EmbeddedThemeName::Base16OceanDark),
        }
    }

    fn syntax_for(mode: &HighlightMode) -> &'static SyntaxReference {
        match mode {
            HighlightMode::Syntax(token) => SYNTAX_SET
                .find_syntax_by_token(token)
                .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text()),
            HighlightMode::PlainText => SYNTAX_SET.find_syntax_plain_text(),
        }
    }

    /// Highlight source text, one output line per input line.
    pub fn highlight_code(&self, code: &str, mode: &HighlightMode) -> Vec<Line<'static>> {
        let syntax = Self::syntax_for(mode);
        let theme = THEME_SET.get(self.theme);
        let mut highlighter = HighlightLines::new(syntax, theme);

        LinesWithEndings::from(code)
            .map(|line| match highlighter.highlight_line(line, &SYNTAX_SET) {
                Ok(regions) => Line::from(
                    regions
                        .into_iter()
                        .map(|(style, text)| {
                            Span::styled(
                                text.trim_end_matches(['\n', '\r']).to_string(),
                                syntect_style_to_ratatui(style),
                            )
                        })
                        .filter(|span| !span.content.is_empty())
                        .collect::<Vec<_>>(),
                ),
                Err(_) => Line::from(line.trim_end_matches(['\n', '\r']).to_string()),
            })
            .collect()
    }

    /// Highlight a program block.
    ///
    /// Code lines are joined with newlines first; an empty block yields no
    /// lines.
    pub fn highlight_block(&self, block: &ProgramBlock, mode: &HighlightMode) -> Vec<Line<'static>> {
        trace!(language = %block.language, lines = block.code.len(), "Highlighting block");
        if block.code.is_empty() {
            return Vec::new();
        }
        let mut lines = self.highlight_code(&block.source(), mode);
        // A trailing empty code line has no LinesWithEndings counterpart.
        lines.resize_with(block.code.len(), Line::default);
        lines
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

/// Convert syntect highlighting style to ratatui style.
fn syntect_style_to_ratatui(style: syntect::highlighting::Style) -> Style {
    let fg = Color::Rgb(style.foreground.r, style.foreground.g, style.foreground.b);
    let mut ratatui_style = Style::default().fg(fg);

    if style.font_style.contains(FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        ratatui_style = ratatui_style.add_modifier(Modifier::UNDERLINED);
    }

    ratatui_style
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn every_listed_theme_is_valid() {
        for theme in theme_names() {
            assert!(is_valid_theme(theme), "Theme '{}' should be valid", theme);
        }
        assert!(is_valid_theme(DEFAULT_THEME));
    }

    #[test]
    fn invalid_theme_is_rejected() {
        assert!(!is_valid_theme("not-a-real-theme"));
    }

    #[test]
    fn highlighter_uses_default_for_invalid_theme() {
        let highlighter = SyntaxHighlighter::new("invalid-theme");
        let lines = highlighter.highlight_code("x = 1", &HighlightMode::Syntax("py".into()));
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn python_is_highlighted_with_colors() {
        let highlighter = SyntaxHighlighter::new("gruvbox-dark");
        let lines = highlighter.highlight_code("def f(n): return n", &HighlightMode::Syntax("py".into()));
        assert!(lines[0].spans.iter().any(|s| s.style.fg.is_some()));
        assert!(lines[0].spans.len() > 1, "Python should be split into tokens");
    }

    #[test]
    fn unresolvable_token_falls_back_to_plain_text() {
        let mode = HighlightMode::Syntax("no-such-language".into());
        let lines = SyntaxHighlighter::default().highlight_code("some text", &mode);
        assert_eq!(text_of(&lines[0]), "some text");
    }

    #[test]
    fn block_yields_one_line_per_code_line() {
        let block = ProgramBlock {
            language: "python".into(),
            label: "Python".into(),
            code: vec!["a = 1".into(), "".into(), "b = 2".into(), "".into()],
        };
        let lines =
            SyntaxHighlighter::default().highlight_block(&block, &HighlightMode::Syntax("py".into()));
        assert_eq!(lines.len(), 4);
        assert_eq!(text_of(&lines[0]), "a = 1");
        assert_eq!(text_of(&lines[2]), "b = 2");
    }

    #[test]
    fn empty_block_yields_no_lines() {
        let block = ProgramBlock::new("python", "Python");
        let lines = SyntaxHighlighter::default().highlight_block(&block, &HighlightMode::PlainText);
        assert!(lines.is_empty());
    }

    #[test]
    fn plain_text_keeps_whitespace() {
        let lines = SyntaxHighlighter::default().highlight_code("    indented  ", &HighlightMode::PlainText);
        assert_eq!(text_of(&lines[0]), "    indented  ");
    }
}
