use super::message::Message;
use super::preferences::{Theme, ViewState};

/// Tone of a connection status notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// The rendering surface the controller drives.
///
/// Each method updates one named slot of the view. Implementations use
/// interior mutability; the controller only holds a shared reference.
pub trait ChatView: Send + Sync {
    /// Appends one transcript entry. `show_emotion` says whether to show
    /// the emotion tag and timestamp next to it.
    fn append_message(&self, message: &Message, show_emotion: bool);

    /// Removes every rendered transcript entry.
    fn clear_messages(&self);

    /// Replaces the pending input text.
    fn set_input(&self, text: &str);

    fn clear_input(&self);

    /// Updates the one-line status indicator.
    fn set_status(&self, status: &str);

    /// Shows or hides the "waiting for reply" indicator.
    fn set_loading(&self, loading: bool);

    /// Shows a blocking notice, e.g. a rejected upload.
    fn show_alert(&self, message: &str);

    /// Asks the user a yes/no question.
    fn confirm(&self, prompt: &str) -> bool;

    fn apply_theme(&self, theme: Theme);

    /// Switches between the profile and chat screens.
    fn show_view(&self, state: ViewState);

    /// Shows the result of a remote-model handshake. Lines are separated
    /// by `\n`.
    fn show_connection_status(&self, message: &str, kind: StatusKind);
}
