use std::io::{self, stdin, stdout, IsTerminal, Stdout, Write};

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use log::{debug, trace, warn};
use runpick_core::config::{self, Locale, CANCEL_STATUS, DEFAULT_MAX_ITEMS};
use runpick_core::error::Result;

use super::keys::Key;
use super::render::{Prompt, Renderer};
use super::state::{Outcome, PickerState, TerminalSize, Transition};
use super::theme::{Labels, Theme};

/// Caller options of [`pick`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickOptions {
    pub placeholder: Option<String>,
    pub max_items: Option<usize>,
    pub prompt_path: Option<String>,
}

/// Outcome of a pick as an exit status and the chosen item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickResult {
    pub status: i32,
    pub result: String,
}

impl PickResult {
    #[must_use]
    pub fn selected(item: String) -> Self {
        Self {
            status: 0,
            result: item,
        }
    }

    #[must_use]
    pub fn cancelled() -> Self {
        Self {
            status: CANCEL_STATUS,
            result: String::new(),
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.status == CANCEL_STATUS
    }
}

impl From<Outcome> for PickResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Selected(item) => Self::selected(item),
            Outcome::Cancelled => Self::cancelled(),
        }
    }
}

/// Keeps the terminal in raw mode with bracketed paste until released.
struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = Self { active: true };
        execute!(stdout(), EnableBracketedPaste)?;
        Ok(guard)
    }

    /// Restores the terminal. Only the first call does anything.
    fn release(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let paste = execute!(stdout(), DisableBracketedPaste);
        disable_raw_mode()?;
        paste
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

/// One interactive pick: owns the state, the renderer and the terminal mode.
pub struct Session<W: Write> {
    state: PickerState,
    renderer: Renderer<W>,
    guard: Option<RawModeGuard>,
    resolved: bool,
}

impl<W: Write> Session<W> {
    pub fn new(state: PickerState, renderer: Renderer<W>) -> Self {
        Self {
            state,
            renderer,
            guard: None,
            resolved: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> &PickerState {
        &self.state
    }

    #[must_use]
    pub fn renderer(&self) -> &Renderer<W> {
        &self.renderer
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Switches the real terminal to raw mode for the rest of the session.
    fn attach_terminal(&mut self) -> io::Result<()> {
        self.guard = Some(RawModeGuard::enable()?);
        Ok(())
    }

    /// Hides the cursor and paints the first frame.
    pub fn start(&mut self) -> io::Result<()> {
        self.renderer.hide_cursor()?;
        self.renderer.render(&self.state)
    }

    /// Reacts to one terminal event. Returns the result once the session
    /// finishes; events after that are ignored.
    pub fn handle_event(&mut self, event: Event) -> io::Result<Option<PickResult>> {
        if self.resolved {
            return Ok(None);
        }

        match event {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Release => Ok(None),
            Event::Key(key_event) => self.handle_key(Key::from(key_event)),
            Event::Paste(text) => {
                let transition = self.state.insert_str(&text);
                self.handle_transition(transition)
            }
            Event::Resize(columns, rows) => {
                self.handle_resize(TerminalSize::new(columns, rows))?;
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    pub fn handle_key(&mut self, key: Key) -> io::Result<Option<PickResult>> {
        if self.resolved {
            return Ok(None);
        }

        trace!("Key: {key:?}");
        let transition = self.state.apply(key);
        self.handle_transition(transition)
    }

    /// Re-lays out the frame for a new terminal size. The old frame is erased
    /// using the new width, since that is how the terminal now wraps it.
    pub fn handle_resize(&mut self, size: TerminalSize) -> io::Result<()> {
        if self.resolved {
            return Ok(());
        }

        debug!("Terminal resized to {}x{}", size.columns, size.rows);
        self.state.resize(size);
        self.renderer.render(&self.state)
    }

    fn handle_transition(&mut self, transition: Transition) -> io::Result<Option<PickResult>> {
        match transition {
            Transition::Redraw => {
                self.renderer.render(&self.state)?;
                Ok(None)
            }
            Transition::Ignore => Ok(None),
            Transition::Bell => {
                self.renderer.bell()?;
                Ok(None)
            }
            Transition::Finish(outcome) => Ok(self.finish(outcome)),
        }
    }

    /// Ends the session: restores the terminal mode, erases the frame and
    /// shows the cursor. Cleanup failures are logged, never returned, and
    /// only the first call has any effect.
    pub fn finish(&mut self, outcome: Outcome) -> Option<PickResult> {
        if self.resolved {
            return None;
        }
        self.resolved = true;

        if let Some(mut guard) = self.guard.take() {
            if let Err(e) = guard.release() {
                warn!("Could not restore terminal mode: {e}");
            }
        }

        if let Err(e) = self.renderer.clear(self.state.size().columns) {
            warn!("Could not clear picker frame: {e}");
        }

        if let Err(e) = self.renderer.show_cursor() {
            warn!("Could not show cursor: {e}");
        }

        debug!("Picker finished: {outcome:?}");
        Some(outcome.into())
    }

    /// Starts the session and feeds it events until it finishes. On an event
    /// error the session is cancelled before the error is returned.
    pub fn run(
        &mut self,
        mut next_event: impl FnMut() -> io::Result<Event>,
    ) -> io::Result<PickResult> {
        let result = self.start().and_then(|()| loop {
            if let Some(result) = self.handle_event(next_event()?)? {
                break Ok(result);
            }
        });

        if result.is_err() {
            self.finish(Outcome::Cancelled);
        }

        result
    }
}

fn interactive_session<S: AsRef<str>>(
    items: &[S],
    options: &PickOptions,
) -> io::Result<Session<Stdout>> {
    let (columns, rows) = terminal::size()?;
    let labels = Labels::for_locale(Locale::from_env());
    let prompt = Prompt {
        label: options
            .placeholder
            .clone()
            .unwrap_or_else(|| labels.default_prompt.to_string()),
        path: options.prompt_path.clone(),
    };

    let state = PickerState::new(
        items.iter().map(|item| item.as_ref().to_string()).collect(),
        options.max_items.unwrap_or(DEFAULT_MAX_ITEMS),
        TerminalSize::new(columns, rows),
    );
    let theme = Theme {
        color: config::color_enabled(),
    };

    Ok(Session::new(state, Renderer::new(stdout(), theme, labels, prompt)))
}

fn pick_when<S: AsRef<str>>(
    interactive: bool,
    items: &[S],
    options: &PickOptions,
) -> Result<PickResult> {
    if !interactive {
        debug!("stdin or stdout is not a terminal, skipping the picker");
        return Ok(PickResult::cancelled());
    }

    let mut session = interactive_session(items, options)?;
    session.attach_terminal()?;
    Ok(session.run(event::read)?)
}

/// Lets the user pick one of `items` in the terminal.
///
/// Returns status 0 with the chosen item, or status 130 with an empty result
/// when the user cancels or stdin/stdout is not a terminal.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read from or written to.
pub fn pick<S: AsRef<str>>(items: &[S], options: &PickOptions) -> Result<PickResult> {
    let interactive = stdin().is_terminal() && stdout().is_terminal();
    pick_when(interactive, items, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn session(items: &[&str]) -> Session<Vec<u8>> {
        let state = PickerState::new(
            items.iter().map(ToString::to_string).collect(),
            10,
            TerminalSize::new(80, 24),
        );
        let renderer = Renderer::new(
            Vec::new(),
            Theme { color: false },
            Labels::for_locale(Locale::English),
            Prompt {
                label: "Select".to_string(),
                path: None,
            },
        );
        Session::new(state, renderer)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn output(session: &Session<Vec<u8>>) -> String {
        String::from_utf8(session.renderer().writer().clone()).unwrap()
    }

    fn scripted(events: Vec<Event>) -> impl FnMut() -> io::Result<Event> {
        let mut events = events.into_iter();
        move || {
            events
                .next()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more events"))
        }
    }

    #[test]
    fn test_non_interactive_pick_is_cancelled() {
        let result = pick_when(false, &["dev", "build"], &PickOptions::default()).unwrap();
        assert_eq!(result, PickResult::cancelled());
        assert_eq!(result.status, 130);
        assert_eq!(result.result, "");
    }

    #[test]
    fn test_run_selects_typed_match() {
        let mut session = session(&["dev", "build", "test"]);
        let events = vec![
            key(KeyCode::Char('b')),
            key(KeyCode::Char('u')),
            key(KeyCode::Enter),
        ];

        let result = session.run(scripted(events)).unwrap();
        assert_eq!(result, PickResult::selected("build".to_string()));
        assert!(session.is_resolved());

        let output = output(&session);
        assert!(output.starts_with("\u{1b}[?25l"));
        assert!(output.ends_with("\u{1b}[?25h"));
    }

    #[test]
    fn test_finish_is_single_fire() {
        let mut session = session(&["dev"]);
        session.start().unwrap();

        assert_eq!(
            session.finish(Outcome::Cancelled),
            Some(PickResult::cancelled())
        );
        let after_first = output(&session);

        assert_eq!(session.finish(Outcome::Cancelled), None);
        assert_eq!(session.handle_key(Key::Enter).unwrap(), None);
        assert_eq!(output(&session), after_first);
    }

    #[test]
    fn test_enter_on_empty_list_rings_bell_and_keeps_running() {
        let mut session = session(&[]);
        session.start().unwrap();
        let before = output(&session).len();

        assert_eq!(session.handle_key(Key::Enter).unwrap(), None);
        assert!(!session.is_resolved());
        assert_eq!(&output(&session)[before..], "\u{7}");
    }

    #[test]
    fn test_escape_with_query_keeps_session_open() {
        let mut session = session(&["dev", "build", "test"]);
        session.start().unwrap();
        for c in "xyz".chars() {
            session.handle_key(Key::Printable(c)).unwrap();
        }
        assert!(session.state().ranked().is_empty());

        assert_eq!(session.handle_event(key(KeyCode::Esc)).unwrap(), None);
        assert!(!session.is_resolved());
        assert_eq!(session.state().query(), "");
        assert_eq!(session.state().ranked()[0].item, "dev");

        assert_eq!(
            session.handle_event(key(KeyCode::Esc)).unwrap(),
            Some(PickResult::cancelled())
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut session = session(&["dev"]);
        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('d'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(session.handle_event(release).unwrap(), None);
        assert_eq!(session.state().query(), "");
    }

    #[test]
    fn test_paste_inserts_printable_text() {
        let mut session = session(&["build", "dev"]);
        session.start().unwrap();
        session
            .handle_event(Event::Paste("bu\nild".to_string()))
            .unwrap();
        assert_eq!(session.state().query(), "build");
        assert_eq!(session.state().input_cursor(), 5);
    }

    #[test]
    fn test_resize_updates_viewport() {
        let items: Vec<String> = (0..30).map(|i| format!("item-{i}")).collect();
        let item_refs: Vec<&str> = items.iter().map(String::as_str).collect();
        let mut session = session(&item_refs);
        session.start().unwrap();

        session.handle_event(Event::Resize(40, 9)).unwrap();
        assert_eq!(session.state().size(), TerminalSize::new(40, 9));
        assert_eq!(session.state().max_visible(), 4);
        assert_eq!(
            session.renderer().previous_frame().unwrap().line_widths.len(),
            2 + 4 + 2
        );
    }

    #[test]
    fn test_event_error_cancels_before_returning() {
        let mut session = session(&["dev"]);
        let error = session.run(scripted(vec![key(KeyCode::Char('d'))]));

        assert!(error.is_err());
        assert!(session.is_resolved());
        assert!(output(&session).ends_with("\u{1b}[?25h"));
    }

    #[test]
    fn test_ctrl_c_cancels() {
        let mut session = session(&["dev"]);
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let result = session.run(scripted(vec![ctrl_c])).unwrap();
        assert!(result.is_cancelled());
    }
}
