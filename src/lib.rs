//! # sxudo - Conversational Assistant Client
//!
//! `sxudo` is a terminal client for the SXUDO conversational assistant.
//! It keeps one user's identity, preferences and transcript locally and
//! exchanges messages, images and voice with a SXUDO server.
//!
//! ## Features
//!
//! - **Chat with emotion tags**: Replies carry an emoji emotion
//! - **Image analysis and generation**: Upload pictures or describe new ones
//! - **Voice**: Dictation and read-aloud through external speech programs
//! - **Persistent history**: Up to 100 messages per user in `SQLite`
//! - **Remote models**: Point the server at an Ollama instance on your network
//!
//! ## Quick Start
//!
//! ```bash
//! # Start chatting
//! sxudo --username alice
//!
//! # Check whether AI mode is active
//! sxudo health
//!
//! # Use Ollama running on another machine
//! sxudo connect 192.168.1.50 --port 11434
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/sxudo/config.toml`:
//!
//! ```toml
//! [sxudo]
//! endpoint = "http://127.0.0.1:8000"
//! username = "alice"
//! image_timeout_secs = 30
//!
//! [voice]
//! synthesizer = ["espeak", "-s", "{wpm}", "{text}"]
//! ```

/// HTTP client for the SXUDO server API.
pub mod api;

/// Interactive conversation mode.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management.
pub mod config;

/// File system utilities.
pub mod fs;

/// Image file reading for uploads.
pub mod input;

/// Global output configuration (quiet mode, colors, logging).
pub mod output;

/// XDG-style path utilities for configuration and session data.
pub mod paths;

/// Conversation session controller and its state.
pub mod session;

/// Key-value persistence for preferences and history.
pub mod store;

/// Terminal UI components (spinner, colors).
pub mod ui;

/// Speech recognition and synthesis services.
pub mod voice;
