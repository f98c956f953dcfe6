use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::store::{KeyValueStore, StoreError};

pub const KEY_USERNAME: &str = "sxudo_username";
pub const KEY_PERSONALITY: &str = "sxudo_personality";
pub const KEY_MOOD: &str = "sxudo_mood";
pub const KEY_VOICE_SPEED: &str = "sxudo_voice_speed";
pub const KEY_AUTO_SPEAK: &str = "sxudo_auto_speak";
pub const KEY_THEME: &str = "sxudo_theme";
pub const KEY_SHOW_EMOTIONS: &str = "sxudo_show_emotions";
pub const KEY_AUTO_SUBMIT_VOICE: &str = "sxudo_auto_submit_voice";

const ALL_KEYS: &[&str] = &[
    KEY_USERNAME,
    KEY_PERSONALITY,
    KEY_MOOD,
    KEY_VOICE_SPEED,
    KEY_AUTO_SPEAK,
    KEY_THEME,
    KEY_SHOW_EMOTIONS,
    KEY_AUTO_SUBMIT_VOICE,
];

pub const MIN_VOICE_SPEED: f32 = 0.5;
pub const MAX_VOICE_SPEED: f32 = 2.0;
pub const DEFAULT_VOICE_SPEED: f32 = 1.0;

/// Colour scheme of the rendering surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
    #[default]
    Auto,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            "auto" => Ok(Self::Auto),
            other => Err(format!("Unknown theme '{other}' (expected dark, light or auto)")),
        }
    }
}

/// Which screen the client shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// No username yet: ask the user to create a profile.
    Profile,
    Chat,
}

/// Per-client settings, each falling back to a default when unset.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub username: Option<String>,
    pub personality: Option<String>,
    pub mood: Option<String>,
    pub voice_speed: f32,
    pub auto_speak: bool,
    pub theme: Theme,
    pub show_emotions: bool,
    pub auto_submit_voice: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            username: None,
            personality: None,
            mood: None,
            voice_speed: DEFAULT_VOICE_SPEED,
            auto_speak: true,
            theme: Theme::Auto,
            show_emotions: true,
            auto_submit_voice: false,
        }
    }
}

impl Preferences {
    /// Reads every preference from the store. Missing or unparsable
    /// values keep their defaults.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, StoreError> {
        let defaults = Self::default();
        Ok(Self {
            username: non_empty(store.get(KEY_USERNAME)?),
            personality: non_empty(store.get(KEY_PERSONALITY)?),
            mood: non_empty(store.get(KEY_MOOD)?),
            voice_speed: store
                .get(KEY_VOICE_SPEED)?
                .and_then(|v| v.parse::<f32>().ok())
                .filter(|v| v.is_finite())
                .map_or(defaults.voice_speed, clamp_voice_speed),
            auto_speak: parse_or(store.get(KEY_AUTO_SPEAK)?, defaults.auto_speak),
            theme: parse_or(store.get(KEY_THEME)?, defaults.theme),
            show_emotions: parse_or(store.get(KEY_SHOW_EMOTIONS)?, defaults.show_emotions),
            auto_submit_voice: parse_or(
                store.get(KEY_AUTO_SUBMIT_VOICE)?,
                defaults.auto_submit_voice,
            ),
        })
    }

    /// Removes every preference key, returning the store to defaults.
    pub fn reset(store: &dyn KeyValueStore) -> Result<(), StoreError> {
        for key in ALL_KEYS {
            store.remove(key)?;
        }
        Ok(())
    }

    pub const fn view_state(&self) -> ViewState {
        if self.username.is_some() {
            ViewState::Chat
        } else {
            ViewState::Profile
        }
    }
}

/// Keeps a voice speed inside the supported range.
pub fn clamp_voice_speed(speed: f32) -> f32 {
    speed.clamp(MIN_VOICE_SPEED, MAX_VOICE_SPEED)
}

/// Trims a user-supplied tag, treating blank input as unset.
pub fn normalize_tag(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.as_deref().and_then(normalize_tag)
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}
