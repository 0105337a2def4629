use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute, Color, SetAttribute, SetBackgroundColor, SetForegroundColor};
use runpick_core::config::Locale;

const SELECTED_BACKGROUND: Color = Color::AnsiValue(237);
const SELECTED_FOREGROUND: Color = Color::AnsiValue(231);
const HIGHLIGHT_FOREGROUND: Color = Color::AnsiValue(214);

/// Visual role of a piece of the picker frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Dim,
    PromptPath,
    Selected,
    Highlight { selected: bool },
    Detail { selected: bool },
    NoMatches,
}

/// Turns tones into terminal styling, or into nothing when colors are off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub color: bool,
}

impl Theme {
    /// Queues the style commands for `tone`, starting from a reset state.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn apply<W: Write>(&self, out: &mut W, tone: Tone) -> io::Result<()> {
        if !self.color {
            return Ok(());
        }

        queue!(out, SetAttribute(Attribute::Reset))?;

        match tone {
            Tone::Plain => {}
            Tone::Dim | Tone::NoMatches => queue!(out, SetAttribute(Attribute::Dim))?,
            Tone::PromptPath => queue!(out, SetForegroundColor(Color::Cyan))?,
            Tone::Selected => queue!(
                out,
                SetBackgroundColor(SELECTED_BACKGROUND),
                SetForegroundColor(SELECTED_FOREGROUND)
            )?,
            Tone::Highlight { selected } => {
                if selected {
                    queue!(out, SetBackgroundColor(SELECTED_BACKGROUND))?;
                }
                queue!(
                    out,
                    SetAttribute(Attribute::Bold),
                    SetForegroundColor(HIGHLIGHT_FOREGROUND)
                )?;
            }
            Tone::Detail { selected } => {
                if selected {
                    queue!(
                        out,
                        SetBackgroundColor(SELECTED_BACKGROUND),
                        SetForegroundColor(SELECTED_FOREGROUND)
                    )?;
                }
                queue!(out, SetAttribute(Attribute::Dim))?;
            }
        }

        Ok(())
    }

    /// Queues a full reset, when colors are on.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn reset<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.color {
            queue!(out, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

/// Fixed texts of the picker in the user's language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub default_prompt: &'static str,
    pub help: &'static str,
    pub no_matches: &'static str,
    pub cancelled: &'static str,
}

impl Labels {
    #[must_use]
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::English => Self {
                default_prompt: "Select",
                help: "↑/↓ Move ←/→ Cursor Enter select Esc cancel",
                no_matches: "(no matches)",
                cancelled: "Cancelled...",
            },
            Locale::Chinese => Self {
                default_prompt: "请选择一个选项",
                help: "上/下选择 左/右移动 Enter确认 Esc取消",
                no_matches: "(无匹配)",
                cancelled: "已取消...",
            },
        }
    }
}
