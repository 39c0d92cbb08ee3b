//! Ratatui host for a dynform page.
//!
//! Owns the terminal and the event loop; everything else lives in [`Page`].

use std::io::{self, Stdout};
use std::time::Instant;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dynform::{FieldList, FormConfig, FormError, KeyValueStore, Submission, SubmissionSink};
use ratatui::{Frame, Terminal, prelude::CrosstermBackend, style::Color};
use thiserror::Error;

use crate::Page;
use crate::draw::draw_page;

/// Error type for the terminal host.
#[derive(Debug, Error)]
pub enum RatatuiFormError {
    /// User cancelled the form (e.g., pressed Esc).
    #[error("Form cancelled by user")]
    Cancelled,

    /// Readiness failed and the user left the error page.
    #[error("{0}")]
    Unavailable(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The form could not be built or a handler failed.
    #[error(transparent)]
    Form(#[from] FormError),
}

/// Color theme for the TUI form.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    /// Group legends.
    pub secondary: Color,
    pub text: Color,
    pub highlight: Color,
    /// Error borders, inline error messages and the readiness failure message.
    pub error: Color,
    pub success: Color,
    pub border: Color,
    pub selected_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Blue,
            text: Color::White,
            highlight: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            border: Color::Gray,
            selected_bg: Color::DarkGray,
        }
    }
}

/// Terminal host that shows every field of a form at once.
#[derive(Debug, Clone)]
pub struct RatatuiForm {
    /// Title shown at the top of the page.
    title: String,
    /// Color theme for the UI.
    theme: Theme,
    config: FormConfig,
}

impl Default for RatatuiForm {
    fn default() -> Self {
        Self::new()
    }
}

impl RatatuiForm {
    /// Create a host with default settings.
    pub fn new() -> Self {
        Self {
            title: "Form".to_string(),
            theme: Theme::default(),
            config: FormConfig::default(),
        }
    }

    /// Set the title shown at the top of the page.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the readiness delay and failure probability.
    pub fn with_config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Create the page this host would run, starting at `now`.
    pub fn page<S, K>(&self, fields: FieldList, store: S, sink: K, now: Instant) -> Page<S, K>
    where
        S: KeyValueStore,
        K: SubmissionSink,
    {
        Page::new(fields, store, sink, &self.config, now)
    }

    /// Draw `page` into `frame`.
    pub fn draw<S, K>(&self, frame: &mut Frame, page: &mut Page<S, K>) {
        draw_page(frame, page, &self.title, &self.theme);
    }

    /// Run the page in the terminal until the form is submitted.
    ///
    /// Returns the submission; leaving the page early is an error
    /// ([`RatatuiFormError::Cancelled`] or [`RatatuiFormError::Unavailable`]).
    pub fn run<S, K>(&self, fields: FieldList, store: S, sink: K) -> Result<Submission, RatatuiFormError>
    where
        S: KeyValueStore,
        K: SubmissionSink,
    {
        let mut page = self.page(fields, store, sink, Instant::now());
        let mut terminal = self.setup_terminal()?;
        let result = self.event_loop(&mut terminal, &mut page);
        self.restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop<S, K>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        page: &mut Page<S, K>,
    ) -> Result<Submission, RatatuiFormError>
    where
        S: KeyValueStore,
        K: SubmissionSink,
    {
        let mut rng = rand::thread_rng();
        loop {
            page.tick(Instant::now(), &mut rng)?;
            terminal.draw(|frame| self.draw(frame, page))?;

            if !event::poll(page.poll_timeout(Instant::now()))? {
                continue;
            }
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && let Some(submission) = page.handle_key(key)?
            {
                return Ok(submission);
            }
        }
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>, RatatuiFormError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), RatatuiFormError> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_creation() {
        let host = RatatuiForm::new()
            .with_title("Test")
            .with_theme(Theme::default())
            .with_config(FormConfig::new().with_mount_id("signup"));
        assert_eq!(host.config().mount_id, "signup");
    }

    #[test]
    fn error_types() {
        let err = RatatuiFormError::Cancelled;
        assert_eq!(err.to_string(), "Form cancelled by user");

        let err = RatatuiFormError::Unavailable("Failed to load".to_string());
        assert_eq!(err.to_string(), "Failed to load");

        let err = RatatuiFormError::from(FormError::UnknownField("x".to_string()));
        assert_eq!(err.to_string(), "Unknown field: x");
    }

    #[test]
    fn theme_default() {
        let theme = Theme::default();
        assert_eq!(theme.primary, Color::Cyan);
        assert_eq!(theme.error, Color::Red);
    }
}
