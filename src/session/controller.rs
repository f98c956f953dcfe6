use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

use super::error::SessionError;
use super::history::HistoryStore;
use super::message::{
    DEFAULT_EMOTION, ERROR_EMOTION, GENERATION_EMOTION, IMAGE_EMOTION, ImageRef, Message,
    detect_emotion,
};
use super::preferences::{
    KEY_AUTO_SPEAK, KEY_AUTO_SUBMIT_VOICE, KEY_MOOD, KEY_PERSONALITY, KEY_SHOW_EMOTIONS,
    KEY_THEME, KEY_USERNAME, KEY_VOICE_SPEED, Preferences, Theme, ViewState, clamp_voice_speed,
    normalize_tag,
};
use super::state::{SendState, StateCell, VoiceState};
use super::view::{ChatView, StatusKind};
use crate::api::{
    ApiError, ChatBackend, ChatRequest, GenerateImageRequest, HealthStatus, ImageChatRequest,
    ImageUpload, MemoryEntry, OllamaConnection,
};
use crate::store::KeyValueStore;
use crate::voice::{SpeechRecognizer, SpeechSynthesizer, Unavailable, VoiceError};

pub const APOLOGY_TEXT: &str = "Sorry, I encountered an error. Please try again.";
pub const IMAGE_APOLOGY_TEXT: &str = "Sorry, I encountered an error analyzing the image.";
pub const GENERATION_APOLOGY_TEXT: &str = "Sorry, I encountered an error generating the image.";

pub const READY_STATUS: &str = "Ready to chat";
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_IMAGE_PROMPT: &str = "Please analyze this image";
pub const DEFAULT_OLLAMA_PORT: u16 = 11434;

pub const KEY_OLLAMA_HOST: &str = "sxudo_ollama_host";
pub const KEY_OLLAMA_PORT: &str = "sxudo_ollama_port";

const CLEAR_CONFIRMATION: &str = "Are you sure you want to clear the chat history?";
const CONNECT_SUGGESTION: &str = "Make sure Ollama is running and accessible";
const REMOTE_HISTORY_TURNS: usize = 5;

/// Result of a text, image or generation submission.
#[derive(Debug)]
pub enum Submission {
    /// Blank input; nothing happened.
    Ignored,
    /// Refused before any request was sent.
    Rejected(SessionError),
    /// The reply was rendered.
    Replied(Message),
    /// The request failed and an apology was rendered instead.
    Failed(SessionError),
}

impl Submission {
    pub const fn reply(&self) -> Option<&Message> {
        match self {
            Self::Replied(message) => Some(message),
            _ => None,
        }
    }

    pub const fn sent_request(&self) -> bool {
        matches!(self, Self::Replied(_) | Self::Failed(_))
    }
}

/// Result of toggling voice capture.
#[derive(Debug)]
pub enum VoiceOutcome {
    Unavailable,
    /// A running capture was stopped, or capture ended without a transcript.
    Stopped,
    /// The transcript was placed in the input slot.
    Transcribed(String),
    /// The transcript was submitted right away.
    Submitted(Submission),
    Failed(VoiceError),
}

/// Result of [`SessionController::clear_history`].
#[derive(Debug)]
pub enum ClearOutcome {
    NoProfile,
    Cancelled,
    Cleared,
    /// Local history is gone but the server kept its copy.
    ClearedLocally(ApiError),
}

/// Result of [`SessionController::connect_backend`].
#[derive(Debug)]
pub enum ConnectOutcome {
    Invalid(SessionError),
    /// Handshake succeeded; carries the models the server found.
    Connected(Vec<String>),
    /// The server answered but declined the connection.
    Refused(String),
    Failed(ApiError),
}

/// The collaborators a [`SessionController`] is built from.
pub struct SessionParts {
    pub backend: Arc<dyn ChatBackend>,
    pub store: Arc<dyn KeyValueStore>,
    pub view: Arc<dyn ChatView>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub recognizer: Arc<dyn SpeechRecognizer>,
}

impl SessionParts {
    /// Parts without speech services.
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        store: Arc<dyn KeyValueStore>,
        view: Arc<dyn ChatView>,
    ) -> Self {
        Self {
            backend,
            store,
            view,
            synthesizer: Arc::new(Unavailable),
            recognizer: Arc::new(Unavailable),
        }
    }

    #[must_use]
    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    #[must_use]
    pub fn with_recognizer(mut self, recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        self.recognizer = recognizer;
        self
    }
}

/// Owns one client's identity, preferences and transcript, and turns user
/// intent into single request/reply exchanges with the backend.
///
/// Every failure is recovered here: operations report through outcome
/// values and the view, never through `Err`.
pub struct SessionController {
    backend: Arc<dyn ChatBackend>,
    store: Arc<dyn KeyValueStore>,
    history: HistoryStore,
    view: Arc<dyn ChatView>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    recognizer: Arc<dyn SpeechRecognizer>,
    preferences: Mutex<Preferences>,
    last_reply: Mutex<Option<String>>,
    send_state: StateCell<SendState>,
    voice_state: StateCell<VoiceState>,
}

impl SessionController {
    pub fn new(parts: SessionParts) -> Self {
        let preferences = Preferences::load(parts.store.as_ref()).unwrap_or_else(|e| {
            warn!(error = %e, "failed to load preferences, using defaults");
            Preferences::default()
        });

        Self {
            history: HistoryStore::new(Arc::clone(&parts.store)),
            backend: parts.backend,
            store: parts.store,
            view: parts.view,
            synthesizer: parts.synthesizer,
            recognizer: parts.recognizer,
            preferences: Mutex::new(preferences),
            last_reply: Mutex::new(None),
            send_state: StateCell::new(),
            voice_state: StateCell::new(),
        }
    }

    /// Renders the initial view: theme, screen, history and backend status.
    pub async fn start(&self) {
        let prefs = self.preferences();
        self.view.apply_theme(prefs.theme);
        self.view.show_view(prefs.view_state());
        self.view.set_status(READY_STATUS);
        self.restore_history().await;
        self.check_backend_health().await;
    }

    /// A snapshot of the current preferences.
    pub fn preferences(&self) -> Preferences {
        self.preferences
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn view_state(&self) -> ViewState {
        self.preferences().view_state()
    }

    pub fn send_state(&self) -> SendState {
        self.send_state.get()
    }

    pub fn voice_state(&self) -> VoiceState {
        self.voice_state.get()
    }

    pub fn voice_available(&self) -> bool {
        self.recognizer.is_available()
    }

    pub fn speech_available(&self) -> bool {
        self.synthesizer.is_available()
    }

    // ---- submissions -----------------------------------------------------

    /// Sends one chat message and renders the reply.
    pub async fn submit_text(&self, text: &str) -> Submission {
        let text = text.trim();
        if text.is_empty() {
            return Submission::Ignored;
        }

        let prefs = self.preferences();
        let Some(username) = prefs.username.clone() else {
            return self.reject(SessionError::NoProfile);
        };
        let Some(_sending) = self.send_state.try_enter(SendState::AwaitingReply) else {
            return self.reject(SessionError::Busy);
        };

        let emotion = detect_emotion(text);
        let request = ChatRequest {
            message: text.to_string(),
            username: username.clone(),
            personality: prefs.personality.clone(),
            mood: prefs.mood.clone(),
            emotion: emotion.to_string(),
        };

        self.post_user_message(&username, Message::user(text, emotion), &prefs);
        debug!(%username, "sending chat message");

        let result = self
            .await_reply("SXUDO is thinking...", self.backend.chat(&request))
            .await
            .map(|reply| (reply.reply, reply.emotion));

        self.finish_exchange(&username, &prefs, result, DEFAULT_EMOTION, APOLOGY_TEXT, true)
    }

    /// Uploads an image with an optional caption and renders the analysis.
    ///
    /// Anything that is not `image/*`, or is over [`MAX_IMAGE_BYTES`], is
    /// refused with an alert and never sent.
    pub async fn submit_image(&self, upload: ImageUpload, caption: Option<&str>) -> Submission {
        if let Err(err) = validate_image(&upload) {
            self.view.show_alert(&err.to_string());
            return Submission::Rejected(err);
        }

        let prefs = self.preferences();
        let Some(username) = prefs.username.clone() else {
            return self.reject(SessionError::NoProfile);
        };
        let Some(_sending) = self.send_state.try_enter(SendState::AwaitingReply) else {
            return self.reject(SessionError::Busy);
        };

        let message = caption
            .and_then(normalize_tag)
            .unwrap_or_else(|| DEFAULT_IMAGE_PROMPT.to_string());
        let user_message = Message::user(&message, detect_emotion(&message)).with_image(ImageRef {
            file_name: upload.file_name.clone(),
            mime_type: upload.mime_type.clone(),
        });
        self.post_user_message(&username, user_message, &prefs);
        debug!(%username, bytes = upload.size(), "uploading image");

        let request = ImageChatRequest {
            image: upload,
            message,
            username: username.clone(),
        };
        let result = self
            .await_reply("Analyzing image...", self.backend.image_chat(&request))
            .await
            .map(|reply| (reply.reply, reply.emotion));

        self.finish_exchange(
            &username,
            &prefs,
            result,
            IMAGE_EMOTION,
            IMAGE_APOLOGY_TEXT,
            true,
        )
    }

    /// Asks the backend to generate an image from a description.
    pub async fn submit_generation_prompt(&self, prompt: &str) -> Submission {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            self.view
                .set_status("Please enter a description for the image");
            return Submission::Ignored;
        }

        let prefs = self.preferences();
        let Some(username) = prefs.username.clone() else {
            return self.reject(SessionError::NoProfile);
        };
        let Some(_sending) = self.send_state.try_enter(SendState::AwaitingReply) else {
            return self.reject(SessionError::Busy);
        };

        self.post_user_message(
            &username,
            Message::user(format!("Generate image: {prompt}"), GENERATION_EMOTION),
            &prefs,
        );

        let request = GenerateImageRequest {
            prompt: prompt.to_string(),
            username: username.clone(),
        };
        let result = self
            .await_reply("Generating image...", self.backend.generate_image(&request))
            .await
            .map(|reply| (reply.reply, None));

        self.finish_exchange(
            &username,
            &prefs,
            result,
            GENERATION_EMOTION,
            GENERATION_APOLOGY_TEXT,
            false,
        )
    }

    fn reject(&self, err: SessionError) -> Submission {
        self.view.set_status(&err.to_string());
        Submission::Rejected(err)
    }

    fn post_user_message(&self, username: &str, message: Message, prefs: &Preferences) {
        self.record(username, &message, prefs);
        self.view.clear_input();
    }

    async fn await_reply<T>(
        &self,
        status: &str,
        reply: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        self.view.set_loading(true);
        self.view.set_status(status);
        let result = reply.await;
        self.view.set_loading(false);
        result
    }

    fn finish_exchange(
        &self,
        username: &str,
        prefs: &Preferences,
        result: Result<(String, Option<String>), ApiError>,
        default_emotion: &str,
        apology: &str,
        speak_reply: bool,
    ) -> Submission {
        match result {
            Ok((reply, emotion)) => {
                let emotion = emotion
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| default_emotion.to_string());
                let message = Message::assistant(reply, emotion);
                self.record(username, &message, prefs);
                self.view.set_status(READY_STATUS);
                if speak_reply && prefs.auto_speak {
                    self.speak(&message.text);
                }
                Submission::Replied(message)
            }
            Err(err) => {
                warn!(%username, error = %err, "exchange with backend failed");
                self.record(username, &Message::assistant(apology, ERROR_EMOTION), prefs);
                self.view.set_status(failure_status(&err));
                Submission::Failed(SessionError::Api(err))
            }
        }
    }

    /// Renders a message and appends it to the user's stored history.
    fn record(&self, username: &str, message: &Message, prefs: &Preferences) {
        self.render(message, prefs);
        if let Err(e) = self.history.append(username, message) {
            warn!(%username, error = %e, "failed to persist message");
        }
    }

    fn render(&self, message: &Message, prefs: &Preferences) {
        self.view
            .append_message(message, prefs.show_emotions || message.is_assistant());
        if message.is_assistant() {
            *self.last_reply.lock().unwrap_or_else(PoisonError::into_inner) =
                Some(message.text.clone());
        }
    }

    // ---- voice -----------------------------------------------------------

    /// Starts a recognition session, or stops the one already running.
    pub async fn capture_voice(&self) -> VoiceOutcome {
        if !self.recognizer.is_available() {
            self.view.set_status("Voice input not supported");
            return VoiceOutcome::Unavailable;
        }

        let Some(listening) = self.voice_state.try_enter(VoiceState::Listening) else {
            self.recognizer.stop();
            return VoiceOutcome::Stopped;
        };

        self.view.set_status("Listening...");
        let result = self.recognizer.listen().await;
        drop(listening);

        match result {
            Ok(transcript) => {
                self.view.set_input(&transcript);
                if self.preferences().auto_submit_voice {
                    VoiceOutcome::Submitted(self.submit_text(&transcript).await)
                } else {
                    self.view.set_status(READY_STATUS);
                    VoiceOutcome::Transcribed(transcript)
                }
            }
            Err(VoiceError::Stopped | VoiceError::NoSpeech) => {
                self.view.set_status(READY_STATUS);
                VoiceOutcome::Stopped
            }
            Err(e) => {
                warn!(error = %e, "speech recognition failed");
                self.view.set_status("Voice input error");
                VoiceOutcome::Failed(e)
            }
        }
    }

    /// Stops a running recognition session. Unlike [`Self::capture_voice`]
    /// this never starts one; returns whether anything was listening.
    pub fn stop_voice(&self) -> bool {
        if self.voice_state.get() != VoiceState::Listening {
            return false;
        }
        self.recognizer.stop();
        true
    }

    /// Speaks `text`, cutting off whatever was playing. Returns whether an
    /// utterance started.
    pub fn speak(&self, text: &str) -> bool {
        if !self.synthesizer.is_available() || text.trim().is_empty() {
            return false;
        }

        self.synthesizer.cancel();
        match self.synthesizer.speak(text, self.preferences().voice_speed) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "speech synthesis failed");
                self.view.set_status("Speech output error");
                false
            }
        }
    }

    /// Speaks the most recent assistant message, if there is one.
    pub fn speak_last_message(&self) -> bool {
        let last = self
            .last_reply
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        last.is_some_and(|text| self.speak(&text))
    }

    // ---- history ---------------------------------------------------------

    /// Clears the current user's transcript after confirmation.
    pub async fn clear_history(&self) -> ClearOutcome {
        let Some(username) = self.preferences().username else {
            self.view.set_status(&SessionError::NoProfile.to_string());
            return ClearOutcome::NoProfile;
        };

        if !self.view.confirm(CLEAR_CONFIRMATION) {
            return ClearOutcome::Cancelled;
        }

        if let Err(e) = self.history.clear(&username) {
            warn!(%username, error = %e, "failed to clear stored history");
        }
        self.view.clear_messages();
        *self.last_reply.lock().unwrap_or_else(PoisonError::into_inner) = None;

        match self.backend.clear_memory(&username).await {
            Ok(()) => {
                info!(%username, "history cleared");
                self.view.set_status("Chat cleared");
                ClearOutcome::Cleared
            }
            Err(e) => {
                warn!(%username, error = %e, "server kept its history");
                self.view
                    .set_status("Chat cleared locally; server history could not be cleared");
                ClearOutcome::ClearedLocally(e)
            }
        }
    }

    /// Renders the user's stored transcript, falling back to the last few
    /// turns the server remembers. Returns how many messages were shown.
    pub async fn restore_history(&self) -> usize {
        let prefs = self.preferences();
        let Some(username) = prefs.username.clone() else {
            return 0;
        };

        let shown = self.render_local_history(&username, &prefs);
        if shown > 0 {
            return shown;
        }

        match self.backend.load_memory(&username).await {
            Ok(entries) => {
                let messages = remote_turns(&entries);
                for message in &messages {
                    self.render(message, &prefs);
                }
                if let Err(e) = self.history.extend(&username, &messages) {
                    warn!(%username, error = %e, "failed to persist restored history");
                }
                messages.len()
            }
            Err(e) => {
                warn!(%username, error = %e, "could not load server history");
                0
            }
        }
    }

    fn render_local_history(&self, username: &str, prefs: &Preferences) -> usize {
        let messages = self.history.load(username).unwrap_or_else(|e| {
            warn!(%username, error = %e, "failed to load stored history");
            Vec::new()
        });
        for message in &messages {
            self.render(message, prefs);
        }
        messages.len()
    }

    // ---- backend ---------------------------------------------------------

    /// Probes backend availability. Failures are only logged.
    pub async fn check_backend_health(&self) -> Option<HealthStatus> {
        match self.backend.health().await {
            Ok(health) => {
                if health.ollama_available {
                    self.view.set_status("AI Mode Active - Connected to Ollama");
                } else {
                    if let Some(error) = &health.error {
                        warn!(%error, "model server unavailable");
                    }
                    self.view.set_status("Demo Mode - AI not connected");
                }
                Some(health)
            }
            Err(e) => {
                warn!(error = %e, "health check failed");
                None
            }
        }
    }

    /// Points the backend at a remote model server after a handshake.
    pub async fn connect_backend(&self, host: &str, port: Option<u16>) -> ConnectOutcome {
        let host = host.trim();
        if host.is_empty() {
            return self.invalid_connection("Please enter your computer's IP address");
        }
        let port = port.unwrap_or(DEFAULT_OLLAMA_PORT);
        if port == 0 {
            return self.invalid_connection("Port must be between 1 and 65535");
        }

        self.view
            .show_connection_status("Connecting...", StatusKind::Info);

        let connection = OllamaConnection {
            host: host.to_string(),
            port,
        };
        match self.backend.configure_ollama(&connection).await {
            Ok(reply) if reply.success => {
                self.persist(KEY_OLLAMA_HOST, Some(host));
                self.persist(KEY_OLLAMA_PORT, Some(&port.to_string()));
                self.view.show_connection_status(
                    &format!("Connected! Found models: {}", reply.models.join(", ")),
                    StatusKind::Success,
                );
                self.check_backend_health().await;
                ConnectOutcome::Connected(reply.models)
            }
            Ok(reply) => {
                let error = reply
                    .error
                    .unwrap_or_else(|| "Connection refused by server".to_string());
                self.view.show_connection_status(&error, StatusKind::Error);
                ConnectOutcome::Refused(error)
            }
            Err(err) => {
                warn!(%host, port, error = %err, "model server handshake failed");
                self.view
                    .show_connection_status(&connect_failure(&err, host, port), StatusKind::Error);
                ConnectOutcome::Failed(err)
            }
        }
    }

    fn invalid_connection(&self, reason: &str) -> ConnectOutcome {
        self.view.show_connection_status(reason, StatusKind::Error);
        ConnectOutcome::Invalid(SessionError::InvalidConnection(reason.to_string()))
    }

    /// The last model server a handshake succeeded with.
    pub fn saved_connection(&self) -> Option<OllamaConnection> {
        let host = self.store.get(KEY_OLLAMA_HOST).ok().flatten()?;
        let port = self
            .store
            .get(KEY_OLLAMA_PORT)
            .ok()
            .flatten()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_OLLAMA_PORT);
        Some(OllamaConnection { host, port })
    }

    // ---- preferences -----------------------------------------------------

    /// Sets or (with blank input) clears the username, switching screens
    /// and transcripts accordingly.
    pub fn set_username(&self, name: &str) -> ViewState {
        let username = normalize_tag(name);
        self.persist(KEY_USERNAME, username.as_deref());
        let prefs = self.update_preferences(|p| p.username = username);

        let state = prefs.view_state();
        self.view.show_view(state);
        self.view.clear_messages();
        *self.last_reply.lock().unwrap_or_else(PoisonError::into_inner) = None;
        if let Some(username) = &prefs.username {
            self.render_local_history(username, &prefs);
        }
        state
    }

    /// Sets the username only when none is stored, without touching the
    /// view. Used to seed the profile from configuration.
    pub fn seed_username(&self, name: &str) -> bool {
        if self.preferences().username.is_some() {
            return false;
        }
        let Some(username) = normalize_tag(name) else {
            return false;
        };
        self.persist(KEY_USERNAME, Some(&username));
        self.update_preferences(|p| p.username = Some(username));
        true
    }

    pub fn set_personality(&self, personality: &str) {
        let value = normalize_tag(personality);
        self.persist(KEY_PERSONALITY, value.as_deref());
        self.update_preferences(|p| p.personality = value);
    }

    pub fn set_mood(&self, mood: &str) {
        let value = normalize_tag(mood);
        self.persist(KEY_MOOD, value.as_deref());
        self.update_preferences(|p| p.mood = value);
    }

    /// Stores a voice speed, clamped to the supported range. Returns the
    /// value actually stored.
    pub fn set_voice_speed(&self, speed: f32) -> f32 {
        let speed = if speed.is_finite() {
            clamp_voice_speed(speed)
        } else {
            self.preferences().voice_speed
        };
        self.persist(KEY_VOICE_SPEED, Some(&speed.to_string()));
        self.update_preferences(|p| p.voice_speed = speed);
        speed
    }

    pub fn set_auto_speak(&self, enabled: bool) {
        self.persist(KEY_AUTO_SPEAK, Some(&enabled.to_string()));
        self.update_preferences(|p| p.auto_speak = enabled);
    }

    pub fn set_show_emotions(&self, enabled: bool) {
        self.persist(KEY_SHOW_EMOTIONS, Some(&enabled.to_string()));
        self.update_preferences(|p| p.show_emotions = enabled);
    }

    pub fn set_auto_submit_voice(&self, enabled: bool) {
        self.persist(KEY_AUTO_SUBMIT_VOICE, Some(&enabled.to_string()));
        self.update_preferences(|p| p.auto_submit_voice = enabled);
    }

    pub fn set_theme(&self, theme: Theme) {
        self.persist(KEY_THEME, Some(theme.as_str()));
        self.update_preferences(|p| p.theme = theme);
        self.view.apply_theme(theme);
    }

    /// Forgets every preference and the saved model server connection.
    /// Stored transcripts are kept.
    pub fn reset_preferences(&self) {
        if let Err(e) = Preferences::reset(self.store.as_ref()) {
            warn!(error = %e, "failed to reset stored preferences");
        }
        self.persist(KEY_OLLAMA_HOST, None);
        self.persist(KEY_OLLAMA_PORT, None);
        let prefs = self.update_preferences(|p| *p = Preferences::default());
        self.view.apply_theme(prefs.theme);
        self.view.clear_messages();
        self.view.show_view(prefs.view_state());
    }

    fn update_preferences(&self, f: impl FnOnce(&mut Preferences)) -> Preferences {
        let mut prefs = self
            .preferences
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut prefs);
        prefs.clone()
    }

    fn persist(&self, key: &str, value: Option<&str>) {
        let result = match value {
            Some(v) => self.store.set(key, v),
            None => self.store.remove(key),
        };
        if let Err(e) = result {
            warn!(%key, error = %e, "failed to persist setting");
        }
    }
}

/// Checks an upload against the type and size limits.
pub fn validate_image(upload: &ImageUpload) -> Result<(), SessionError> {
    if !upload.mime_type.to_ascii_lowercase().starts_with("image/") {
        return Err(SessionError::UnsupportedImageType(upload.mime_type.clone()));
    }
    if upload.size() > MAX_IMAGE_BYTES {
        return Err(SessionError::ImageTooLarge {
            size: upload.size(),
            limit: MAX_IMAGE_BYTES,
        });
    }
    Ok(())
}

/// Expands the last few remembered turns into transcript messages.
fn remote_turns(entries: &[MemoryEntry]) -> Vec<Message> {
    let start = entries.len().saturating_sub(REMOTE_HISTORY_TURNS);
    entries[start..]
        .iter()
        .flat_map(|entry| {
            let emotion = entry.emotion.as_deref().unwrap_or(DEFAULT_EMOTION);
            [
                Message::user(&entry.user, emotion),
                Message::assistant(&entry.assistant, emotion),
            ]
        })
        .collect()
}

const fn failure_status(err: &ApiError) -> &'static str {
    match err {
        ApiError::Timeout(_) => "Request timed out",
        ApiError::Network(_) => "Cannot reach the SXUDO server",
        ApiError::Status { .. } | ApiError::Malformed(_) => "The SXUDO server returned an error",
    }
}

fn connect_failure(err: &ApiError, host: &str, port: u16) -> String {
    match err {
        ApiError::Status {
            status: 400,
            message,
            suggestion,
        } => format!(
            "{message}\n{}",
            suggestion.as_deref().unwrap_or(CONNECT_SUGGESTION)
        ),
        ApiError::Network(_) | ApiError::Timeout(_) => format!(
            "Network error: Cannot reach {host}:{port}\n\
             Check if the IP address is correct and Ollama is running"
        ),
        other => format!("Connection failed: {other}"),
    }
}
