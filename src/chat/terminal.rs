//! [`ChatView`] rendered on the terminal.

use chrono::Local;
use inquire::Confirm;
use std::sync::{Mutex, PoisonError};

use super::ui;
use crate::output;
use crate::session::{ChatView, Message, READY_STATUS, Sender, StatusKind, Theme, ViewState};
use crate::ui::{Spinner, Style};

/// Prints the transcript to stdout and status notices to stderr.
///
/// Text handed over with `set_input` is kept until the REPL collects it
/// with [`TerminalView::take_input`] and pre-fills the next prompt.
#[derive(Default)]
pub struct TerminalView {
    spinner: Mutex<Option<Spinner>>,
    pending_input: Mutex<Option<String>>,
    theme: Mutex<Theme>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the pending input, leaving the slot empty.
    pub fn take_input(&self) -> Option<String> {
        self.pending_input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub fn theme(&self) -> Theme {
        *self.theme.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_loading(&self) -> bool {
        self.spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

/// Formats one transcript line.
pub fn format_message(message: &Message, show_emotion: bool) -> String {
    let speaker = match message.sender {
        Sender::User => Style::user("You"),
        Sender::Assistant => Style::assistant("SXUDO"),
    };

    let mut line = speaker;
    if show_emotion {
        line.push(' ');
        line.push_str(&message.emotion);
    }
    line.push_str("  ");
    line.push_str(&message.text);

    if let Some(image) = &message.image {
        let label = format!("[image: {}]", image.file_name);
        line.push_str(&format!("  {}", Style::secondary(label)));
    }
    if show_emotion {
        let time = message.timestamp.with_timezone(&Local).format("%H:%M");
        line.push_str(&format!("  {}", Style::secondary(time)));
    }

    line
}

impl ChatView for TerminalView {
    fn append_message(&self, message: &Message, show_emotion: bool) {
        println!("{}", format_message(message, show_emotion));
        if message.sender == Sender::Assistant {
            println!();
        }
    }

    fn clear_messages(&self) {
        // The scrollback stays; mark the cut instead.
        if !output::is_quiet() {
            println!("{}", Style::secondary("─── conversation cleared ───"));
        }
    }

    fn set_input(&self, text: &str) {
        *self
            .pending_input
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(text.to_string());
    }

    fn clear_input(&self) {
        self.pending_input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    fn set_status(&self, status: &str) {
        if let Some(spinner) = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            spinner.set_message(status);
            return;
        }

        if status != READY_STATUS {
            crate::status!("{}", Style::hint(status));
        }
    }

    fn set_loading(&self, loading: bool) {
        let mut spinner = self.spinner.lock().unwrap_or_else(PoisonError::into_inner);
        if loading {
            if spinner.is_none() && !output::is_quiet() {
                *spinner = Some(Spinner::new(""));
            }
        } else if let Some(spinner) = spinner.take() {
            spinner.stop();
        }
    }

    fn show_alert(&self, message: &str) {
        ui::print_error(message);
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.is_loading() {
            return false;
        }
        Confirm::new(prompt)
            .with_default(false)
            .prompt()
            .unwrap_or(false)
    }

    fn apply_theme(&self, theme: Theme) {
        *self.theme.lock().unwrap_or_else(PoisonError::into_inner) = theme;
    }

    fn show_view(&self, state: ViewState) {
        if state == ViewState::Profile {
            crate::status!(
                "{}",
                Style::hint("No profile yet. Set your name with /set username <name>")
            );
        }
    }

    fn show_connection_status(&self, message: &str, kind: StatusKind) {
        for line in message.lines() {
            match kind {
                StatusKind::Info => crate::status!("{}", Style::hint(line)),
                StatusKind::Success => println!("{} {line}", Style::success("✓")),
                StatusKind::Error => eprintln!("{} {line}", Style::error("✗")),
            }
        }
    }
}
