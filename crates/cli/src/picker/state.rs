//! Picker session state and its key-driven transitions.
//!
//! Everything here is pure: keys go in, a [`Transition`] comes out, and the
//! caller decides what to draw or whether to finish.

use runpick_core::ranking::{rank, RankedEntry};

use super::keys::{is_printable, Key};

/// The viewport never shows fewer rows than this.
pub const MIN_VISIBLE_ROWS: usize = 4;
/// Rows taken by the prompt, input, blank and footer lines plus one spare.
const RESERVED_ROWS: usize = 5;

/// How a finished session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Selected(String),
    Cancelled,
}

/// What the caller should do after a key was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Redraw,
    Ignore,
    Bell,
    Finish(Outcome),
}

/// Terminal dimensions, never smaller than one row and one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub columns: u16,
    pub rows: u16,
}

impl TerminalSize {
    #[must_use]
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }
}

/// Number of item rows shown for a configured maximum and terminal height.
#[must_use]
pub fn max_visible_rows(configured_max: usize, terminal_rows: u16) -> usize {
    let available = usize::from(terminal_rows).saturating_sub(RESERVED_ROWS);
    configured_max.min(available).max(MIN_VISIBLE_ROWS)
}

#[derive(Debug, Clone)]
pub struct PickerState {
    items: Vec<String>,
    query: String,
    /// Cursor position in the query, in characters.
    input_cursor: usize,
    ranked: Vec<RankedEntry>,
    selected_index: usize,
    viewport_offset: usize,
    configured_max: usize,
    max_visible: usize,
    size: TerminalSize,
}

impl PickerState {
    #[must_use]
    pub fn new(items: Vec<String>, configured_max: usize, size: TerminalSize) -> Self {
        let ranked = rank(&items, "");
        Self {
            items,
            query: String::new(),
            input_cursor: 0,
            ranked,
            selected_index: 0,
            viewport_offset: 0,
            configured_max,
            max_visible: max_visible_rows(configured_max, size.rows),
            size,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn input_cursor(&self) -> usize {
        self.input_cursor
    }

    #[must_use]
    pub fn ranked(&self) -> &[RankedEntry] {
        &self.ranked
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    #[must_use]
    pub fn selected(&self) -> Option<&RankedEntry> {
        self.ranked.get(self.selected_index)
    }

    #[must_use]
    pub fn viewport_offset(&self) -> usize {
        self.viewport_offset
    }

    #[must_use]
    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    #[must_use]
    pub fn size(&self) -> TerminalSize {
        self.size
    }

    /// The ranked entries inside the viewport, with their ranked index.
    pub fn visible_entries(&self) -> impl Iterator<Item = (usize, &RankedEntry)> {
        self.ranked
            .iter()
            .enumerate()
            .skip(self.viewport_offset)
            .take(self.max_visible)
    }

    /// Query split at the input cursor.
    #[must_use]
    pub fn query_around_cursor(&self) -> (&str, &str) {
        self.query.split_at(self.byte_offset(self.input_cursor))
    }

    fn query_len(&self) -> usize {
        self.query.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_index)
            .map_or(self.query.len(), |(i, _)| i)
    }

    /// Applies one key press.
    pub fn apply(&mut self, key: Key) -> Transition {
        match key {
            Key::Printable(c) => self.insert_str(c.encode_utf8(&mut [0; 4])),
            Key::Backspace => self.delete_before_cursor(),
            Key::Delete => self.delete_at_cursor(),
            Key::ArrowUp => self.cycle_selection(false),
            Key::ArrowDown => self.cycle_selection(true),
            Key::ArrowLeft => self.move_cursor_to(self.input_cursor.saturating_sub(1)),
            Key::ArrowRight => self.move_cursor_to(self.input_cursor + 1),
            Key::PageUp => self.jump_selection(false),
            Key::PageDown => self.jump_selection(true),
            Key::Escape if self.query.is_empty() => Transition::Finish(Outcome::Cancelled),
            Key::Escape => {
                self.query.clear();
                self.input_cursor = 0;
                self.rerank();
                Transition::Redraw
            }
            Key::Enter => match self.selected() {
                Some(entry) => Transition::Finish(Outcome::Selected(entry.item.clone())),
                None => Transition::Bell,
            },
            Key::CtrlC | Key::CtrlD => Transition::Finish(Outcome::Cancelled),
            Key::Unknown => Transition::Ignore,
        }
    }

    /// Inserts the printable characters of `text` at the input cursor.
    pub fn insert_str(&mut self, text: &str) -> Transition {
        let printable: String = text.chars().filter(|c| is_printable(*c)).collect();
        if printable.is_empty() {
            return Transition::Ignore;
        }

        let at = self.byte_offset(self.input_cursor);
        self.query.insert_str(at, &printable);
        self.input_cursor += printable.chars().count();
        self.rerank();
        Transition::Redraw
    }

    fn delete_before_cursor(&mut self) -> Transition {
        if self.input_cursor == 0 {
            return Transition::Ignore;
        }

        self.input_cursor -= 1;
        self.query.remove(self.byte_offset(self.input_cursor));
        self.rerank();
        Transition::Redraw
    }

    fn delete_at_cursor(&mut self) -> Transition {
        if self.input_cursor >= self.query_len() {
            return Transition::Ignore;
        }

        self.query.remove(self.byte_offset(self.input_cursor));
        self.rerank();
        Transition::Redraw
    }

    fn move_cursor_to(&mut self, position: usize) -> Transition {
        self.input_cursor = position.min(self.query_len());
        Transition::Redraw
    }

    fn cycle_selection(&mut self, forward: bool) -> Transition {
        let len = self.ranked.len();
        if len == 0 {
            return Transition::Ignore;
        }

        self.selected_index = match (forward, self.selected_index) {
            (true, i) => (i + 1) % len,
            (false, 0) => len - 1,
            (false, i) => i - 1,
        };
        self.scroll_into_view();
        Transition::Redraw
    }

    fn jump_selection(&mut self, forward: bool) -> Transition {
        let len = self.ranked.len();
        if len == 0 {
            return Transition::Ignore;
        }

        self.selected_index = if forward {
            (self.selected_index + self.max_visible).min(len - 1)
        } else {
            self.selected_index.saturating_sub(self.max_visible)
        };
        self.scroll_into_view();
        Transition::Redraw
    }

    /// Recomputes the ranking after a query edit. The previous selection
    /// means nothing in the new ranking, so it goes back to the top.
    fn rerank(&mut self) {
        self.ranked = rank(&self.items, &self.query);
        self.selected_index = 0;
        self.input_cursor = self.input_cursor.min(self.query_len());
        self.scroll_into_view();
    }

    /// Adapts the viewport to a new terminal size.
    pub fn resize(&mut self, size: TerminalSize) {
        self.size = size;
        self.max_visible = max_visible_rows(self.configured_max, size.rows);
        self.scroll_into_view();
    }

    fn scroll_into_view(&mut self) {
        let last_full_offset = self.ranked.len().saturating_sub(self.max_visible);
        self.viewport_offset = self.viewport_offset.min(last_full_offset);

        if self.selected_index < self.viewport_offset {
            self.viewport_offset = self.selected_index;
        } else if self.selected_index >= self.viewport_offset + self.max_visible {
            self.viewport_offset = self.selected_index + 1 - self.max_visible;
        }
    }
}
