//! Drawing the picker frame below the cursor and erasing it again.
//!
//! The frame is drawn inline (no alternate screen). Before every paint the
//! previous frame is erased row by row, counting rows the terminal wrapped.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveToColumn, MoveUp, Show};
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use crossterm::queue;
use runpick_core::display::{format_item, str_width, truncate_line, CellRole};
use runpick_core::ranking::RankedEntry;

use super::state::PickerState;
use super::theme::{Labels, Theme, Tone};

const BELL: &str = "\u{7}";
const CURSOR_MARK: char = '|';
const SELECTED_PREFIX: &str = "> ";
const UNSELECTED_PREFIX: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
}

impl Span {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// One frame line as styled spans.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    fn single(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            spans: vec![Span::new(text, tone)],
        }
    }

    /// Appends `text`, merging it into the last span when the tone matches.
    /// Highlighted characters always get a span of their own.
    fn push(&mut self, text: &str, tone: Tone) {
        if !matches!(tone, Tone::Highlight { .. }) {
            if let Some(last) = self.spans.last_mut().filter(|last| last.tone == tone) {
                last.text.push_str(text);
                return;
            }
        }
        self.spans.push(Span::new(text, tone));
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.spans.iter().map(|s| str_width(&s.text)).sum()
    }
}

/// Shape of the last painted frame, kept only to erase it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub line_widths: Vec<usize>,
}

impl Frame {
    /// Physical terminal rows the frame occupies at `columns` columns.
    #[must_use]
    pub fn physical_rows(&self, columns: u16) -> usize {
        let columns = usize::from(columns.max(1));
        self.line_widths
            .iter()
            .map(|width| width.div_ceil(columns).max(1))
            .sum()
    }
}

/// Prompt texts shown on the first line of the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub label: String,
    pub path: Option<String>,
}

pub struct Renderer<W: Write> {
    out: W,
    theme: Theme,
    labels: Labels,
    prompt: Prompt,
    previous: Option<Frame>,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, theme: Theme, labels: Labels, prompt: Prompt) -> Self {
        Self {
            out,
            theme,
            labels,
            prompt,
            previous: None,
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    #[must_use]
    pub fn previous_frame(&self) -> Option<&Frame> {
        self.previous.as_ref()
    }

    pub fn hide_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Hide)?;
        self.out.flush()
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Show)?;
        self.out.flush()
    }

    pub fn bell(&mut self) -> io::Result<()> {
        queue!(self.out, Print(BELL))?;
        self.out.flush()
    }

    /// Erases the previous frame, assuming the terminal is `columns` wide.
    pub fn clear(&mut self, columns: u16) -> io::Result<()> {
        let Some(frame) = self.previous.take() else {
            return Ok(());
        };

        queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        for _ in 1..frame.physical_rows(columns) {
            queue!(self.out, MoveUp(1), Clear(ClearType::CurrentLine))?;
        }

        self.out.flush()
    }

    /// Erases the previous frame and paints `state`.
    pub fn render(&mut self, state: &PickerState) -> io::Result<()> {
        let columns = state.size().columns;
        self.clear(columns)?;

        let lines = self.compose(state);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                queue!(self.out, Print("\r\n"))?;
            }
            for span in &line.spans {
                self.theme.apply(&mut self.out, span.tone)?;
                queue!(self.out, Print(&span.text))?;
            }
            self.theme.reset(&mut self.out)?;
        }
        self.out.flush()?;

        self.previous = Some(Frame {
            line_widths: lines.iter().map(Line::width).collect(),
        });
        Ok(())
    }

    /// Builds the frame lines for `state`, each fitting the terminal width.
    #[must_use]
    pub fn compose(&self, state: &PickerState) -> Vec<Line> {
        let columns = usize::from(state.size().columns);
        let mut lines = vec![self.prompt_line(columns), input_line(state, columns)];

        if state.ranked().is_empty() {
            lines.push(Line::single(
                truncate_line(&format!("  {}", self.labels.no_matches), columns),
                Tone::NoMatches,
            ));
        } else {
            lines.extend(state.visible_entries().map(|(index, entry)| {
                entry_line(entry, index == state.selected_index(), columns)
            }));
        }

        lines.push(Line::default());
        lines.push(self.footer_line(state, columns));
        lines
    }

    fn prompt_line(&self, columns: usize) -> Line {
        let head = truncate_line(&format!("? {}", self.prompt.label), columns);
        let remaining = columns.saturating_sub(str_width(&head));
        let mut line = Line::single(head, Tone::Dim);

        if let Some(path) = &self.prompt.path {
            let annotation = truncate_line(&format!(" ({path})"), remaining);
            if !annotation.is_empty() {
                line.push(&annotation, Tone::PromptPath);
            }
        }

        line
    }

    fn footer_line(&self, state: &PickerState, columns: usize) -> Line {
        let total = state.ranked().len();
        let counter = if total == 0 {
            String::new()
        } else {
            format!("({}/{total})", state.selected_index() + 1)
        };

        let footer = format!("  {} {counter}", self.labels.help);
        Line::single(truncate_line(footer.trim_end(), columns), Tone::Dim)
    }
}

fn input_line(state: &PickerState, columns: usize) -> Line {
    let (before, after) = state.query_around_cursor();
    Line::single(
        truncate_line(&format!("  > {before}{CURSOR_MARK}{after}"), columns),
        Tone::Plain,
    )
}

fn entry_line(entry: &RankedEntry, selected: bool, columns: usize) -> Line {
    let (prefix, base) = if selected {
        (SELECTED_PREFIX, Tone::Selected)
    } else {
        (UNSELECTED_PREFIX, Tone::Plain)
    };

    let mut line = Line::single(truncate_line(prefix, columns), base);
    let formatted = format_item(&entry.item, columns.saturating_sub(str_width(prefix)));

    let mut buffer = [0; 4];
    for cell in &formatted.cells {
        let tone = if cell.is_matched(&entry.matched_positions) {
            Tone::Highlight { selected }
        } else if matches!(cell.role, CellRole::Detail) {
            Tone::Detail { selected }
        } else {
            base
        };
        line.push(cell.ch.encode_utf8(&mut buffer), tone);
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::keys::Key;
    use crate::picker::state::{Outcome, TerminalSize, Transition};
    use runpick_core::config::Locale;

    fn renderer(color: bool) -> Renderer<Vec<u8>> {
        Renderer::new(
            Vec::new(),
            Theme { color },
            Labels::for_locale(Locale::English),
            Prompt {
                label: "Select a script".to_string(),
                path: Some("packages/web".to_string()),
            },
        )
    }

    fn state(items: &[&str], columns: u16, rows: u16) -> PickerState {
        PickerState::new(
            items.iter().map(ToString::to_string).collect(),
            10,
            TerminalSize::new(columns, rows),
        )
    }

    fn texts(lines: &[Line]) -> Vec<String> {
        lines.iter().map(Line::text).collect()
    }

    #[test]
    fn test_compose_initial_frame() {
        let state = state(&["dev: vite", "build: vite build"], 80, 24);
        let lines = renderer(true).compose(&state);

        assert_eq!(
            texts(&lines),
            vec![
                "? Select a script (packages/web)",
                "  > |",
                "> dev: vite",
                "  build: vite build",
                "",
                "  ↑/↓ Move ←/→ Cursor Enter select Esc cancel (1/2)",
            ]
        );
        assert_eq!(lines[0].spans[1].tone, Tone::PromptPath);
    }

    #[test]
    fn test_compose_without_matches() {
        let mut state = state(&["dev"], 80, 24);
        state.apply(Key::Printable('x'));
        let lines = texts(&renderer(false).compose(&state));

        assert_eq!(lines[1], "  > x|");
        assert_eq!(lines[2], "  (no matches)");
        assert_eq!(lines[4], "  ↑/↓ Move ←/→ Cursor Enter select Esc cancel");
    }

    #[test]
    fn test_cursor_marker_follows_input_cursor() {
        let mut state = state(&["dev"], 80, 24);
        state.apply(Key::Printable('d'));
        state.apply(Key::Printable('v'));
        state.apply(Key::ArrowLeft);
        assert_eq!(renderer(false).compose(&state)[1].text(), "  > d|v");
    }

    #[test]
    fn test_highlighted_characters_get_their_own_spans() {
        let mut state = state(&["build: vite build"], 80, 24);
        state.apply(Key::Printable('b'));
        state.apply(Key::Printable('u'));
        let lines = renderer(true).compose(&state);
        let row = &lines[2];

        assert_eq!(row.spans[0], Span::new("> ", Tone::Selected));
        assert_eq!(row.spans[1], Span::new("b", Tone::Highlight { selected: true }));
        assert_eq!(row.spans[2], Span::new("u", Tone::Highlight { selected: true }));
        assert_eq!(row.spans[3], Span::new("ild: ", Tone::Selected));
        assert_eq!(row.spans[4], Span::new("vite build", Tone::Detail { selected: true }));
    }

    #[test]
    fn test_lines_fit_the_terminal_width() {
        let items = [
            "a-really-long-script-name: with an even longer command line attached",
            "web  -  packages/frontend/apps/web",
            "构建构建构建构建构建构建构建构建",
        ];
        for columns in 1..40 {
            let mut state = state(&items, columns, 24);
            state.apply(Key::Printable('a'));
            for line in renderer(true).compose(&state) {
                assert!(line.width() <= usize::from(columns));
            }
        }
    }

    #[test]
    fn test_viewport_window_is_rendered() {
        let items: Vec<String> = (0..30).map(|i| format!("item-{i}")).collect();
        let mut state = PickerState::new(items, 5, TerminalSize::new(80, 24));
        for _ in 0..7 {
            state.apply(Key::ArrowDown);
        }

        let lines = texts(&renderer(false).compose(&state));
        assert_eq!(lines.len(), 2 + 5 + 2);
        assert_eq!(lines[2], "  item-3");
        assert_eq!(lines[6], "> item-7");
        assert!(lines[8].ends_with("(8/30)"));
    }

    #[test]
    fn test_frame_physical_rows_count_wrapped_lines() {
        let frame = Frame {
            line_widths: vec![0, 10, 80, 81, 200],
        };
        assert_eq!(frame.physical_rows(80), 1 + 1 + 1 + 2 + 3);
        assert_eq!(frame.physical_rows(40), 1 + 1 + 2 + 3 + 5);
        assert_eq!(frame.physical_rows(0), 1 + 10 + 80 + 81 + 200);
    }

    #[test]
    fn test_render_records_frame_and_clears_it_next_time() {
        let state = state(&["dev", "build"], 80, 24);
        let mut renderer = renderer(false);

        renderer.render(&state).unwrap();
        let frame = renderer.previous_frame().unwrap().clone();
        assert_eq!(frame.line_widths.len(), 6);

        let first_len = renderer.writer().len();
        renderer.render(&state).unwrap();
        let second = String::from_utf8(renderer.writer()[first_len..].to_vec()).unwrap();

        // one clear for the current row plus one per row above it
        assert_eq!(second.matches("\u{1b}[2K").count(), 6);
        assert_eq!(second.matches("\u{1b}[1A").count(), 5);
    }

    #[test]
    fn test_multiline_items_render_on_one_row() {
        let items = ["build: cargo build\ncargo test\n", "dev: vite"];
        let mut state = state(&items, 80, 24);
        let mut renderer = renderer(false);
        renderer.render(&state).unwrap();

        let output = String::from_utf8(renderer.writer().clone()).unwrap();
        assert_eq!(output.matches('\n').count(), output.matches("\r\n").count());
        assert_eq!(output.matches("\r\n").count(), 5);
        assert!(output.contains("> build: cargo build cargo test"));

        let frame = renderer.previous_frame().unwrap();
        assert_eq!(frame.physical_rows(80), 6);

        state.apply(Key::Printable('c'));
        assert_eq!(
            state.apply(Key::Enter),
            Transition::Finish(Outcome::Selected(items[0].to_string()))
        );
    }

    #[test]
    fn test_control_characters_in_prompt_are_replaced() {
        let mut renderer = Renderer::new(
            Vec::new(),
            Theme { color: false },
            Labels::for_locale(Locale::English),
            Prompt {
                label: "Pick\none".to_string(),
                path: Some("apps/\u{1b}[2Jweb".to_string()),
            },
        );
        renderer.render(&state(&["dev"], 80, 24)).unwrap();

        let output = String::from_utf8(renderer.writer().clone()).unwrap();
        assert!(output.starts_with("? Pick one (apps/ [2Jweb)\r\n"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_clear_without_frame_writes_nothing() {
        let mut renderer = renderer(true);
        renderer.clear(80).unwrap();
        assert!(renderer.writer().is_empty());
    }

    #[test]
    fn test_plain_output_has_no_styles() {
        let state = state(&["dev"], 80, 24);
        let mut renderer = renderer(false);
        renderer.render(&state).unwrap();
        let output = String::from_utf8(renderer.writer().clone()).unwrap();

        assert!(!output.contains("\u{1b}["));
        assert!(output.contains("> dev"));
    }

    #[test]
    fn test_bell() {
        let mut renderer = renderer(false);
        renderer.bell().unwrap();
        assert_eq!(renderer.writer().as_slice(), b"\x07");
    }
}
