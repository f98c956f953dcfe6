//! The conversation session: identity, preferences, transcript and the
//! controller that drives exchanges with the backend.
//!
//! All collaborators are injected (`ChatBackend`, `KeyValueStore`,
//! `ChatView` and the speech services), so the controller runs the same
//! against the terminal, the HTTP backend and SQLite as it does against
//! in-memory fakes.

mod controller;
mod error;
mod history;
mod message;
mod preferences;
mod state;
mod view;

pub use controller::{
    APOLOGY_TEXT, ClearOutcome, ConnectOutcome, DEFAULT_IMAGE_PROMPT, DEFAULT_OLLAMA_PORT,
    GENERATION_APOLOGY_TEXT, IMAGE_APOLOGY_TEXT, KEY_OLLAMA_HOST, KEY_OLLAMA_PORT,
    MAX_IMAGE_BYTES, READY_STATUS, SessionController, SessionParts, Submission, VoiceOutcome,
    validate_image,
};
pub use error::SessionError;
pub use history::{HistoryStore, MAX_HISTORY, history_key, prune};
pub use message::{
    DEFAULT_EMOTION, ERROR_EMOTION, GENERATION_EMOTION, IMAGE_EMOTION, ImageRef, Message, Sender,
    detect_emotion,
};
pub use preferences::{
    DEFAULT_VOICE_SPEED, MAX_VOICE_SPEED, MIN_VOICE_SPEED, Preferences, Theme, ViewState,
    clamp_voice_speed, normalize_tag,
};
pub use state::{SendState, StateCell, StateGuard, VoiceState};
pub use view::{ChatView, StatusKind};
