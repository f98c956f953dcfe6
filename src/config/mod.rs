//! Configuration file management.

mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DEFAULT_ENDPOINT, ResolveOptions, ResolvedConfig, SxudoConfig,
    VoiceConfig, resolve_config,
};
