//! Subcommand implementations.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

use super::CliError;
use crate::api::HttpBackend;
use crate::chat::{SessionInfo, TerminalView};
use crate::config::{ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};
use crate::paths;
use crate::session::{SessionController, SessionParts};
use crate::store::{KeyValueStore, MemoryStore, SqliteStore};
use crate::voice::{CommandRecognizer, CommandSynthesizer};

/// Chat mode command handler.
pub mod chat;

/// Remote model server handshake.
pub mod connect;

/// Backend health probe.
pub mod health;

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub endpoint: Option<String>,
    pub username: Option<String>,
    pub ephemeral: bool,
}

/// A controller wired to the terminal, the HTTP backend and storage.
pub struct SessionHandle {
    pub controller: SessionController,
    pub view: Arc<TerminalView>,
    pub info: SessionInfo,
}

/// Loads and resolves configuration, tagging failures as config errors.
pub fn load_config(options: &GlobalOptions) -> Result<ResolvedConfig> {
    let manager = ConfigManager::new().map_err(CliError::Config)?;
    let file_config = manager.load_or_default().map_err(CliError::Config)?;

    let resolve_options = ResolveOptions {
        endpoint: options.endpoint.clone(),
        username: options.username.clone(),
    };
    let config = resolve_config(&resolve_options, &file_config).map_err(CliError::Config)?;
    debug!(
        endpoint = %config.endpoint,
        path = %manager.config_path().display(),
        "configuration resolved"
    );
    Ok(config)
}

pub fn build_backend(config: &ResolvedConfig) -> HttpBackend {
    HttpBackend::new(&config.endpoint)
        .with_request_timeout(config.request_timeout)
        .with_image_timeout(config.image_timeout)
}

/// Builds a session from configuration.
pub fn open_session(options: &GlobalOptions) -> Result<SessionHandle> {
    let config = load_config(options)?;

    let (store, store_path): (Arc<dyn KeyValueStore>, Option<String>) = if options.ephemeral {
        (Arc::new(MemoryStore::new()), None)
    } else {
        let db_path = paths::data_dir()?.join("session.db");
        let store = SqliteStore::open(&db_path)
            .with_context(|| format!("Failed to open session store: {}", db_path.display()))?;
        (Arc::new(store), Some(db_path.display().to_string()))
    };

    let view = Arc::new(TerminalView::new());
    let parts = SessionParts::new(Arc::new(build_backend(&config)), store, view.clone())
        .with_synthesizer(Arc::new(CommandSynthesizer::new(config.synthesizer.clone())))
        .with_recognizer(Arc::new(CommandRecognizer::new(config.recognizer.clone())));
    let controller = SessionController::new(parts);

    if let Some(username) = &config.username {
        controller.seed_username(username);
    }

    Ok(SessionHandle {
        controller,
        view,
        info: SessionInfo {
            endpoint: config.endpoint,
            store_path,
        },
    })
}
