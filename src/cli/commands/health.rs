use anyhow::Result;

use super::{GlobalOptions, build_backend, load_config};
use crate::api::ChatBackend;
use crate::chat::print_health;
use crate::cli::CliError;

/// Probes the backend once and prints whether AI mode is active.
///
/// Fails with [`CliError::Unavailable`] when the server cannot be reached.
/// A reachable server in demo mode still succeeds.
pub async fn run_health(options: &GlobalOptions) -> Result<()> {
    let config = load_config(options)?;
    let backend = build_backend(&config);

    match backend.health().await {
        Ok(health) => {
            print_health(&health);
            Ok(())
        }
        Err(e) => Err(CliError::Unavailable(format!(
            "Cannot reach SXUDO at {}: {e}",
            config.endpoint
        ))
        .into()),
    }
}
