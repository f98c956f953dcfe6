//! Command-line interface definitions and handlers.

/// CLI argument parsing with clap.
pub mod args;

/// Subcommand implementations.
pub mod commands;

pub use args::{Args, Command};

/// Failures that map to a specific process exit code.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The configuration could not be loaded or is invalid.
    #[error("{0:#}")]
    Config(anyhow::Error),
    /// The SXUDO server or the model server could not be reached.
    #[error("{0}")]
    Unavailable(String),
}

impl CliError {
    pub const fn exit_code(&self) -> exitcode::ExitCode {
        match self {
            Self::Config(_) => exitcode::CONFIG,
            Self::Unavailable(_) => exitcode::UNAVAILABLE,
        }
    }
}

/// Exit code for an error returned by a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> exitcode::ExitCode {
    err.downcast_ref::<CliError>()
        .map_or(exitcode::SOFTWARE, CliError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_for() {
        let config = anyhow::Error::new(CliError::Config(anyhow::anyhow!("bad endpoint")));
        assert_eq!(exit_code_for(&config), exitcode::CONFIG);

        let unavailable = anyhow::Error::new(CliError::Unavailable("down".to_string()));
        assert_eq!(exit_code_for(&unavailable), exitcode::UNAVAILABLE);

        assert_eq!(
            exit_code_for(&anyhow::anyhow!("something else")),
            exitcode::SOFTWARE
        );
    }
}
