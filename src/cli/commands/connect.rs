use anyhow::Result;

use super::{GlobalOptions, open_session};
use crate::cli::CliError;
use crate::session::ConnectOutcome;

/// Runs the remote model handshake once. The outcome is reported through
/// the terminal view; only the exit status is decided here.
pub async fn run_connect(options: &GlobalOptions, host: &str, port: u16) -> Result<()> {
    let handle = open_session(options)?;

    match handle.controller.connect_backend(host, Some(port)).await {
        ConnectOutcome::Connected(_) => Ok(()),
        ConnectOutcome::Invalid(e) => Err(CliError::Config(e.into()).into()),
        ConnectOutcome::Refused(reason) => Err(CliError::Unavailable(reason).into()),
        ConnectOutcome::Failed(e) => Err(CliError::Unavailable(e.to_string()).into()),
    }
}
