//! Chat mode UI components.

use super::command::SET_KEYS;
use crate::api::{HealthStatus, OllamaConnection};
use crate::session::Preferences;
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where the session is connected and stored, for `/config`.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub endpoint: String,
    /// `None` when preferences live in memory only.
    pub store_path: Option<String>,
}

pub fn print_header() {
    println!(
        "{} {} - Conversation Mode",
        Style::header("sxudo"),
        Style::version(format!("v{VERSION}"))
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

pub fn print_config(
    prefs: &Preferences,
    info: &SessionInfo,
    connection: Option<&OllamaConnection>,
) {
    let unset = || Style::secondary("(not set)");
    let or_unset = |v: Option<&String>| v.map_or_else(unset, Style::value);

    println!("{}", Style::header("Preferences"));
    println!(
        "  {}     {}",
        Style::label("username"),
        or_unset(prefs.username.as_ref())
    );
    println!(
        "  {}  {}",
        Style::label("personality"),
        or_unset(prefs.personality.as_ref())
    );
    println!(
        "  {}         {}",
        Style::label("mood"),
        or_unset(prefs.mood.as_ref())
    );
    println!(
        "  {}        {}",
        Style::label("speed"),
        Style::value(format!("{:.1}x", prefs.voice_speed))
    );
    println!(
        "  {}    {}",
        Style::label("autospeak"),
        Style::value(on_off(prefs.auto_speak))
    );
    println!(
        "  {}     {}",
        Style::label("emotions"),
        Style::value(on_off(prefs.show_emotions))
    );
    println!(
        "  {}   {}",
        Style::label("autosubmit"),
        Style::value(on_off(prefs.auto_submit_voice))
    );
    println!(
        "  {}        {}",
        Style::label("theme"),
        Style::value(prefs.theme)
    );
    println!();
    println!("{}", Style::header("Session"));
    println!(
        "  {}     {}",
        Style::label("endpoint"),
        Style::secondary(&info.endpoint)
    );
    println!(
        "  {}      {}",
        Style::label("storage"),
        info.store_path
            .as_ref()
            .map_or_else(|| Style::secondary("in memory"), Style::secondary)
    );
    if let Some(connection) = connection {
        println!(
            "  {}       {}",
            Style::label("ollama"),
            Style::secondary(format!("{}:{}", connection.host, connection.port))
        );
    }
    println!();
}

pub fn print_health(health: &HealthStatus) {
    if health.ollama_available {
        println!(
            "{} AI mode active, connected to Ollama",
            Style::success("✓")
        );
    } else {
        println!(
            "{} Demo mode, AI not connected",
            Style::warning("!")
        );
        if let Some(error) = &health.error {
            println!("  {}", Style::secondary(error));
        }
    }
}

pub fn print_help() {
    const COMMANDS: &[(&str, &str)] = &[
        ("/image <path> [caption]", "Send an image for analysis"),
        ("/imagine <description>", "Generate an image"),
        ("/voice", "Dictate a message (Ctrl+C stops)"),
        ("/speak", "Read the last reply aloud"),
        ("/clear", "Clear the conversation history"),
        ("/health", "Check the AI backend"),
        ("/connect <host> [port]", "Connect a remote Ollama server"),
        ("/set <key> <value>", "Change a preference"),
        ("/config", "Show current preferences"),
        ("/reset", "Forget all preferences"),
        ("/help", "Show this help"),
        ("/quit", "Exit chat mode"),
    ];

    println!("{}", Style::header("Available commands"));
    for (command, description) in COMMANDS {
        println!(
            "  {}  {}",
            Style::command(format!("{command:<24}")),
            Style::secondary(description)
        );
    }
    println!();
    println!(
        "  {}",
        Style::hint(format!("Keys for /set: {}", SET_KEYS.join(", ")))
    );
    println!();
}

pub fn print_success(message: &str) {
    println!("{} {message}", Style::success("✓"));
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}
