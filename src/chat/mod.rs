//! Interactive conversation mode.
//!
//! Provides a REPL-style interface with slash commands on top of the
//! session controller.

/// Slash command parsing and autocomplete.
pub mod command;
mod session;
mod terminal;
mod ui;

pub use session::ChatSession;
pub use terminal::{TerminalView, format_message};
pub use ui::{SessionInfo, print_health};
