use inquire::autocompletion::{Autocomplete, Replacement};

// Available slash commands: (command, description)
const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/image", "Send an image: /image <path> [caption]"),
    ("/imagine", "Generate an image: /imagine <description>"),
    ("/voice", "Dictate a message"),
    ("/speak", "Read the last reply aloud"),
    ("/clear", "Clear the conversation history"),
    ("/health", "Check whether the AI backend is connected"),
    ("/connect", "Connect a model server: /connect <host> [port]"),
    ("/set", "Change a preference: /set <key> <value>"),
    ("/config", "Show current preferences"),
    ("/reset", "Forget all preferences"),
    ("/help", "Show available commands"),
    ("/quit", "Exit chat mode"),
];

/// Keys accepted by `/set`.
pub const SET_KEYS: &[&str] = &[
    "username",
    "personality",
    "mood",
    "speed",
    "autospeak",
    "theme",
    "emotions",
    "autosubmit",
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') || input.contains(' ') {
            return Ok(vec![]);
        }

        let suggestions: Vec<String> = SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement =
            highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string());
        Ok(replacement)
    }
}

/// Slash command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Image {
        path: Option<String>,
        caption: Option<String>,
    },
    Imagine(String),
    Voice,
    Speak,
    Clear,
    Health,
    Connect {
        host: Option<String>,
        port: Option<String>,
    },
    Set {
        key: String,
        value: Option<String>,
    },
    Config,
    Reset,
    Help,
    Quit,
    Unknown(String),
}

/// Input types
#[derive(Debug)]
pub enum Input {
    Text(String),
    Command(SlashCommand),
    Empty,
}

pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }

    input
        .strip_prefix('/')
        .map_or_else(|| Input::Text(input.to_string()), parse_slash_command)
}

/// Splits off the first whitespace-separated word; the remainder keeps its
/// inner spacing.
fn split_word(s: &str) -> (&str, Option<&str>) {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => {
            let rest = rest.trim();
            (word, (!rest.is_empty()).then_some(rest))
        }
        None => (s, None),
    }
}

fn parse_slash_command(cmd: &str) -> Input {
    let (name, rest) = split_word(cmd);

    let command = match name {
        "image" | "img" => {
            let (path, caption) = rest.map_or((None, None), |r| {
                let (path, caption) = split_word(r);
                (Some(path.to_string()), caption.map(str::to_string))
            });
            SlashCommand::Image { path, caption }
        }
        "imagine" | "generate" => SlashCommand::Imagine(rest.unwrap_or_default().to_string()),
        "voice" | "mic" => SlashCommand::Voice,
        "speak" => SlashCommand::Speak,
        "clear" => SlashCommand::Clear,
        "health" | "status" => SlashCommand::Health,
        "connect" => {
            let (host, port) = rest.map_or((None, None), |r| {
                let (host, port) = split_word(r);
                (Some(host.to_string()), port.map(str::to_string))
            });
            SlashCommand::Connect { host, port }
        }
        "set" => {
            let (key, value) = rest.map_or(("", None), split_word);
            SlashCommand::Set {
                key: key.to_string(),
                value: value.map(str::to_string),
            }
        }
        "config" => SlashCommand::Config,
        "reset" => SlashCommand::Reset,
        "help" => SlashCommand::Help,
        "quit" | "exit" | "q" => SlashCommand::Quit,
        _ => SlashCommand::Unknown(cmd.split_whitespace().collect::<Vec<_>>().join(" ")),
    };

    Input::Command(command)
}

/// Parses an on/off style flag.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn command(input: &str) -> SlashCommand {
        match parse_input(input) {
            Input::Command(cmd) => cmd,
            other => panic!("Expected Input::Command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(parse_input(""), Input::Empty));
        assert!(matches!(parse_input("   "), Input::Empty));
    }

    #[test]
    fn test_parse_text_input() {
        match parse_input("  Hello, SXUDO!  ") {
            Input::Text(text) => assert_eq!(text, "Hello, SXUDO!"),
            _ => panic!("Expected Input::Text"),
        }
    }

    #[test]
    fn test_parse_image_command() {
        assert_eq!(
            command("/image ./cat.png what breed is   this?"),
            SlashCommand::Image {
                path: Some("./cat.png".to_string()),
                caption: Some("what breed is   this?".to_string()),
            }
        );
        assert_eq!(
            command("/image ./cat.png"),
            SlashCommand::Image {
                path: Some("./cat.png".to_string()),
                caption: None,
            }
        );
        assert_eq!(
            command("/image"),
            SlashCommand::Image {
                path: None,
                caption: None,
            }
        );
    }

    #[test]
    fn test_parse_imagine_command() {
        assert_eq!(
            command("/imagine a red fox in snow"),
            SlashCommand::Imagine("a red fox in snow".to_string())
        );
        assert_eq!(command("/imagine"), SlashCommand::Imagine(String::new()));
    }

    #[test]
    fn test_parse_connect_command() {
        assert_eq!(
            command("/connect 192.168.1.50 11434"),
            SlashCommand::Connect {
                host: Some("192.168.1.50".to_string()),
                port: Some("11434".to_string()),
            }
        );
        assert_eq!(
            command("/connect"),
            SlashCommand::Connect {
                host: None,
                port: None,
            }
        );
    }

    #[test]
    fn test_parse_set_command() {
        assert_eq!(
            command("/set mood a bit sleepy"),
            SlashCommand::Set {
                key: "mood".to_string(),
                value: Some("a bit sleepy".to_string()),
            }
        );
        assert_eq!(
            command("/set personality"),
            SlashCommand::Set {
                key: "personality".to_string(),
                value: None,
            }
        );
        assert_eq!(
            command("/set"),
            SlashCommand::Set {
                key: String::new(),
                value: None,
            }
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(command("/voice"), SlashCommand::Voice);
        assert_eq!(command("/speak"), SlashCommand::Speak);
        assert_eq!(command("/clear"), SlashCommand::Clear);
        assert_eq!(command("/health"), SlashCommand::Health);
        assert_eq!(command("/config"), SlashCommand::Config);
        assert_eq!(command("/reset"), SlashCommand::Reset);
        assert_eq!(command("/help"), SlashCommand::Help);
    }

    #[test]
    fn test_parse_quit_commands() {
        assert_eq!(command("/quit"), SlashCommand::Quit);
        assert_eq!(command("/exit"), SlashCommand::Quit);
        assert_eq!(command("/q"), SlashCommand::Quit);
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            command("/unknown  thing"),
            SlashCommand::Unknown("unknown thing".to_string())
        );
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("on"), Some(true));
        assert_eq!(parse_flag("FALSE"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    // SlashCommandCompleter tests

    #[test]
    fn test_completer_no_suggestions_for_regular_text() {
        let mut completer = SlashCommandCompleter;
        let suggestions = completer.get_suggestions("hello").unwrap();
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_completer_suggestions_for_slash() {
        let mut completer = SlashCommandCompleter;
        let suggestions = completer.get_suggestions("/").unwrap();
        assert_eq!(suggestions.len(), SLASH_COMMANDS.len());
    }

    #[test]
    fn test_completer_suggestions_filter_by_prefix() {
        let mut completer = SlashCommandCompleter;

        let suggestions = completer.get_suggestions("/im").unwrap();
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions[0].starts_with("/image"));
        assert!(suggestions[1].starts_with("/imagine"));

        let suggestions = completer.get_suggestions("/q").unwrap();
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].starts_with("/quit"));
    }

    #[test]
    fn test_completer_stops_after_arguments_start() {
        let mut completer = SlashCommandCompleter;
        let suggestions = completer.get_suggestions("/set mood").unwrap();
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_completer_completion() {
        let mut completer = SlashCommandCompleter;
        let suggestion = "/config  Show current preferences".to_string();
        let completion = completer.get_completion("/c", Some(suggestion)).unwrap();
        assert_eq!(completion, Some("/config".to_string()));
    }

    #[test]
    fn test_completer_completion_none() {
        let mut completer = SlashCommandCompleter;
        let completion = completer.get_completion("/x", None).unwrap();
        assert!(completion.is_none());
    }
}
