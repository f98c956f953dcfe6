//! Global output configuration and diagnostics setup.
//!
//! - Conversation output and prompts go to stdout
//! - Status messages and logs go to stderr
//! - Quiet mode suppresses non-essential output
//! - Colors can be disabled via the `NO_COLOR` environment variable

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

/// Global output configuration.
static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Output configuration settings.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Disable colored output.
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            // https://no-color.org/
            no_color: std::env::var("NO_COLOR").is_ok(),
        }
    }
}

/// Initialize the global output configuration.
///
/// Subsequent calls are ignored.
pub fn init(config: OutputConfig) {
    let _ = OUTPUT_CONFIG.set(config);
}

/// Get the current output configuration.
pub fn config() -> &'static OutputConfig {
    OUTPUT_CONFIG.get_or_init(OutputConfig::default)
}

/// Check if quiet mode is enabled.
pub fn is_quiet() -> bool {
    config().quiet
}

/// Check if colors are disabled.
pub fn is_no_color() -> bool {
    config().no_color
}

/// Builds the log filter: `RUST_LOG` wins, otherwise the verbosity count
/// raises the crate's own level.
pub fn log_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = match verbosity {
            0 => "warn",
            1 => "warn,sxudo_cli=debug",
            _ => "warn,sxudo_cli=trace",
        };
        EnvFilter::new(directive)
    })
}

/// Installs the stderr `tracing` subscriber.
///
/// Safe to call more than once; only the first call takes effect.
pub fn init_logging(verbosity: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Print a status message to stderr (respects quiet mode).
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_config_default_not_quiet() {
        let config = OutputConfig::default();
        assert!(!config.quiet);
    }

    #[test]
    fn test_log_filter_levels() {
        // RUST_LOG may be set in CI; only check when it is absent.
        if std::env::var("RUST_LOG").is_err() {
            assert!(log_filter(0).to_string().contains("warn"));
            assert!(log_filter(1).to_string().contains("sxudo_cli=debug"));
            assert!(log_filter(5).to_string().contains("sxudo_cli=trace"));
        }
    }
}
