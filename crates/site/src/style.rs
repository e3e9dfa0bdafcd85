//! Terminal colouring of badges and headings.

use owo_colors::{AnsiColors, OwoColorize, Style as Ansi};
use supports_color::Stream;

use sao_catalog::presentation::{Badge, Tone};
use sao_prefs::{Notice, NoticeLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    color: bool,
}

impl Style {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn ansi() -> Self {
        Self { color: true }
    }

    /// Colour only when stdout supports it and `--no-color` is not set.
    pub fn detect(no_color: bool) -> Self {
        if !no_color && supports_color::on(Stream::Stdout).is_some() {
            Self::ansi()
        } else {
            Self::plain()
        }
    }

    fn apply(&self, style: Ansi, text: &str) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_owned()
        }
    }

    pub fn paint(&self, tone: Tone, text: &str) -> String {
        self.apply(Ansi::new().color(tone_color(tone)), text)
    }

    pub fn badge(&self, badge: Badge) -> String {
        self.paint(badge.tone, &format!("[{}]", badge.text()))
    }

    pub fn bold(&self, text: &str) -> String {
        self.apply(Ansi::new().bold(), text)
    }

    pub fn dim(&self, text: &str) -> String {
        self.apply(Ansi::new().dimmed(), text)
    }

    pub fn notice(&self, notice: &Notice) -> String {
        let (tone, mark) = match notice.level {
            NoticeLevel::Success => (Tone::Green, "✓"),
            NoticeLevel::Info => (Tone::Blue, "•"),
            NoticeLevel::Error => (Tone::Red, "✗"),
        };
        self.paint(tone, &format!("{mark} {}", notice.message))
    }
}

fn tone_color(tone: Tone) -> AnsiColors {
    match tone {
        Tone::Primary => AnsiColors::Default,
        Tone::Blue => AnsiColors::Blue,
        Tone::Green => AnsiColors::Green,
        Tone::Orange => AnsiColors::Yellow,
        Tone::Purple => AnsiColors::Magenta,
        Tone::Red => AnsiColors::Red,
        Tone::Indigo => AnsiColors::BrightBlue,
        Tone::Chart2 => AnsiColors::Cyan,
        Tone::Chart3 => AnsiColors::BrightCyan,
        Tone::Chart4 => AnsiColors::BrightMagenta,
        Tone::Chart5 => AnsiColors::BrightYellow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sao_catalog::presentation::Presentable;
    use sao_features::FeatureCategory;

    #[test]
    fn plain_style_adds_no_escapes() {
        let style = Style::plain();
        assert_eq!(style.badge(FeatureCategory::Core.badge()), "[⭐ CORE]");
        assert_eq!(style.bold("x"), "x");
        assert_eq!(Style::detect(true), style);
    }

    #[test]
    fn ansi_style_colours_by_tone() {
        let style = Style::ansi();
        let red = style.paint(Tone::Red, "P1");
        assert!(red.contains("\x1b[31m"));
        assert!(red.contains("P1"));

        let failed = style.notice(&Notice::error("Failed"));
        assert!(failed.contains("\x1b[31m"));
        assert!(failed.contains("✗ Failed"));
        assert!(style.paint(Tone::Green, "ok").contains("\x1b[32m"));
    }
}
