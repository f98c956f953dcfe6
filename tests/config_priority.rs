//! Config priority contract tests.
//!
//! These tests verify that CLI options take priority over config file settings.
//! Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Config file defaults
//! 3. Built-in defaults

#![allow(clippy::unwrap_used)]

use std::time::Duration;
use sxudo_cli::api::DEFAULT_IMAGE_TIMEOUT;
use sxudo_cli::config::{
    ConfigFile, DEFAULT_ENDPOINT, ResolveOptions, SxudoConfig, VoiceConfig, resolve_config,
};

fn make_config_with_defaults() -> ConfigFile {
    ConfigFile {
        sxudo: SxudoConfig {
            endpoint: Some("http://config.local:8000".to_string()),
            username: Some("config_user".to_string()),
            request_timeout_secs: Some(90),
            image_timeout_secs: None,
        },
        voice: VoiceConfig {
            synthesizer: vec!["say".to_string(), "{text}".to_string()],
            recognizer: vec!["dictate".to_string()],
        },
    }
}

#[test]
fn test_cli_endpoint_overrides_config() {
    let options = ResolveOptions {
        endpoint: Some("http://cli.local:9000".to_string()),
        username: None,
    };

    let resolved = resolve_config(&options, &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.endpoint, "http://cli.local:9000");
    assert_eq!(resolved.username.as_deref(), Some("config_user"));
}

#[test]
fn test_cli_username_overrides_config() {
    let options = ResolveOptions {
        endpoint: None,
        username: Some("cli_user".to_string()),
    };

    let resolved = resolve_config(&options, &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.endpoint, "http://config.local:8000");
    assert_eq!(resolved.username.as_deref(), Some("cli_user"));
}

#[test]
fn test_config_values_used_without_cli() {
    let resolved =
        resolve_config(&ResolveOptions::default(), &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.request_timeout, Some(Duration::from_secs(90)));
    assert_eq!(resolved.image_timeout, DEFAULT_IMAGE_TIMEOUT);
    assert_eq!(resolved.synthesizer, vec!["say", "{text}"]);
    assert_eq!(resolved.recognizer, vec!["dictate"]);
}

#[test]
fn test_builtin_defaults_without_config() {
    let resolved = resolve_config(&ResolveOptions::default(), &ConfigFile::default()).unwrap();

    assert_eq!(resolved.endpoint, DEFAULT_ENDPOINT);
    assert!(resolved.username.is_none());
    assert!(resolved.request_timeout.is_none());
    assert_eq!(resolved.image_timeout, Duration::from_secs(30));
    assert!(resolved.synthesizer.is_empty());
}

#[test]
fn test_invalid_cli_endpoint_fails_even_with_valid_config() {
    let options = ResolveOptions {
        endpoint: Some("localhost:8000".to_string()),
        username: None,
    };

    assert!(resolve_config(&options, &make_config_with_defaults()).is_err());
}
