use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sxudo")]
#[command(about = "Terminal client for the SXUDO conversational assistant")]
#[command(version)]
pub struct Args {
    /// SXUDO server URL (default: http://127.0.0.1:8000)
    #[arg(short = 'e', long, global = true)]
    pub endpoint: Option<String>,

    /// Username to chat as when none is stored yet
    #[arg(short = 'u', long, global = true)]
    pub username: Option<String>,

    /// Keep preferences and history in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Suppress status messages
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start an interactive conversation (default)
    Chat,
    /// Check whether the backend is reachable and AI mode is active
    Health,
    /// Point the backend at a remote Ollama server
    Connect {
        /// Host name or IP address of the Ollama server
        host: String,

        /// Ollama port
        #[arg(short = 'p', long, default_value_t = 11434)]
        port: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_defaults_to_chat() {
        let Ok(args) = Args::try_parse_from(["sxudo"]) else {
            panic!("expected defaults to parse");
        };
        assert!(args.command.is_none());
        assert!(!args.ephemeral);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let Ok(args) = Args::try_parse_from([
            "sxudo",
            "chat",
            "--endpoint",
            "http://10.0.0.2:8000",
            "-vv",
            "--ephemeral",
        ]) else {
            panic!("expected flags to parse");
        };
        assert!(matches!(args.command, Some(Command::Chat)));
        assert_eq!(args.endpoint.as_deref(), Some("http://10.0.0.2:8000"));
        assert_eq!(args.verbose, 2);
        assert!(args.ephemeral);
    }

    #[test]
    fn test_parse_connect() {
        let Ok(args) = Args::try_parse_from(["sxudo", "connect", "192.168.1.50"]) else {
            panic!("expected connect to parse");
        };
        match args.command {
            Some(Command::Connect { host, port }) => {
                assert_eq!(host, "192.168.1.50");
                assert_eq!(port, 11434);
            }
            other => panic!("expected connect, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_connect_rejects_bad_port() {
        assert!(Args::try_parse_from(["sxudo", "connect", "h", "--port", "70000"]).is_err());
    }
}
