//! Card styling configuration.
//!
//! One place for every colour the card list uses, with a monochrome variant
//! for `--no-color` / `NO_COLOR`.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors on, regardless of environment.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== CardStyles =====

/// Styles for the parts of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStyles {
    /// Catalog number in the card header.
    pub id: Style,
    /// Program badges (`prog`, `maple`, `mma`).
    pub badge: Style,
    /// Entry name.
    pub name: Style,
    /// Plain data values.
    pub data: Style,
    /// Data values inside a match.
    pub emphasis: Style,
    /// Section titles.
    pub section_title: Style,
    /// Title of the focused section.
    pub focused_section: Style,
    /// Monospace section bodies (examples, formulas).
    pub monospace: Style,
    /// Footer and expander.
    pub muted: Style,
    /// Gutter marker of the selected card.
    pub selected: Style,
    /// Program block titles.
    pub block_title: Style,
}

impl CardStyles {
    /// Create styles with the specified color configuration.
    ///
    /// If colors are disabled, only modifiers (bold, dim, reversed) remain.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        if config.colors_enabled() {
            Self {
                id: Style::default().fg(Color::Cyan),
                badge: Style::default().fg(Color::Yellow),
                name: bold,
                data: Style::default().fg(Color::Gray),
                emphasis: bold.fg(Color::Rgb(0x50, 0x49, 0xf2)),
                section_title: bold.fg(Color::Magenta),
                focused_section: bold.fg(Color::Black).bg(Color::Magenta),
                monospace: Style::default(),
                muted: Style::default().fg(Color::DarkGray),
                selected: Style::default().fg(Color::Cyan),
                block_title: Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::ITALIC),
            }
        } else {
            Self {
                id: Style::default(),
                badge: Style::default(),
                name: bold,
                data: Style::default(),
                emphasis: bold.add_modifier(Modifier::UNDERLINED),
                section_title: bold,
                focused_section: bold.add_modifier(Modifier::REVERSED),
                monospace: Style::default(),
                muted: Style::default().add_modifier(Modifier::DIM),
                selected: Style::default().add_modifier(Modifier::REVERSED),
                block_title: Style::default().add_modifier(Modifier::ITALIC),
            }
        }
    }
}

impl Default for CardStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn color_config_respects_no_color_flag() {
        let config = ColorConfig::from_env_and_args(true);
        assert!(
            !config.colors_enabled(),
            "--no-color flag should disable colors"
        );
    }

    #[test]
    #[serial(no_color_env)]
    fn color_config_respects_no_color_env_var() {
        std::env::set_var("NO_COLOR", "1");
        let config = ColorConfig::from_env_and_args(false);
        std::env::remove_var("NO_COLOR");
        assert!(
            !config.colors_enabled(),
            "NO_COLOR env var should disable colors"
        );
    }

    #[test]
    #[serial(no_color_env)]
    fn color_config_defaults_to_enabled() {
        std::env::remove_var("NO_COLOR");
        assert!(ColorConfig::from_env_and_args(false).colors_enabled());
    }

    #[test]
    fn emphasis_is_bold_with_and_without_color() {
        for config in [ColorConfig::enabled(), ColorConfig::from_env_and_args(true)] {
            let styles = CardStyles::with_color_config(config);
            assert!(styles.emphasis.add_modifier.contains(Modifier::BOLD));
        }
    }

    #[test]
    fn focused_section_title_stands_out() {
        for config in [ColorConfig::enabled(), ColorConfig::from_env_and_args(true)] {
            let styles = CardStyles::with_color_config(config);
            assert_ne!(styles.focused_section, styles.section_title);
        }
    }

    #[test]
    fn monochrome_styles_have_no_foreground() {
        let styles = CardStyles::with_color_config(ColorConfig::from_env_and_args(true));
        assert_eq!(styles.id.fg, None);
        assert_eq!(styles.emphasis.fg, None);
        assert_eq!(styles.section_title.fg, None);
    }
}
