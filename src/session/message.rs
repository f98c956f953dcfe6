use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_EMOTION: &str = "😊";
pub const ERROR_EMOTION: &str = "😕";
pub const IMAGE_EMOTION: &str = "📸";
pub const GENERATION_EMOTION: &str = "🎨";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// The image a user message was sent with. Only the reference is kept;
/// the bytes are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub file_name: String,
    pub mime_type: String,
}

/// One entry of the conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub emotion: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

impl Message {
    pub fn user(text: impl Into<String>, emotion: impl Into<String>) -> Self {
        Self::new(Sender::User, text, emotion)
    }

    pub fn assistant(text: impl Into<String>, emotion: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text, emotion)
    }

    fn new(sender: Sender, text: impl Into<String>, emotion: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            emotion: emotion.into(),
            timestamp: Utc::now(),
            image: None,
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.image = Some(image);
        self
    }

    pub fn is_assistant(&self) -> bool {
        self.sender == Sender::Assistant
    }
}

// Checked in order; the first group with a matching keyword wins.
const EMOTION_KEYWORDS: &[(&[&str], &str)] = &[
    (&["happy", "great", "awesome"], "😊"),
    (&["sad", "upset", "disappointed"], "😢"),
    (&["angry", "mad", "frustrated"], "😠"),
    (&["worried", "nervous", "anxious"], "😰"),
    (&["confused", "lost"], "😕"),
];

/// Guesses the emotion of typed text from a few keywords.
pub fn detect_emotion(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    EMOTION_KEYWORDS
        .iter()
        .find(|(words, _)| words.iter().any(|w| lower.contains(w)))
        .map_or(DEFAULT_EMOTION, |(_, emoji)| *emoji)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_emotion_keywords() {
        assert_eq!(detect_emotion("I feel GREAT today"), "😊");
        assert_eq!(detect_emotion("so upset about this"), "😢");
        assert_eq!(detect_emotion("so frustrated right now"), "😠");
        assert_eq!(detect_emotion("a bit nervous"), "😰");
        assert_eq!(detect_emotion("I'm lost"), "😕");
    }

    #[test]
    fn test_detect_emotion_default() {
        assert_eq!(detect_emotion("what time is it"), DEFAULT_EMOTION);
        assert_eq!(detect_emotion(""), DEFAULT_EMOTION);
    }

    #[test]
    fn test_detect_emotion_first_group_wins() {
        assert_eq!(detect_emotion("happy but sad"), "😊");
    }

    #[test]
    fn test_message_serde_keeps_image_ref() {
        let message = Message::user("look", DEFAULT_EMOTION).with_image(ImageRef {
            file_name: "cat.png".to_string(),
            mime_type: "image/png".to_string(),
        });

        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"sender\":\"user\""));

        let restored: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, message);
    }

    #[test]
    fn test_message_without_image_omits_field() {
        let json = serde_json::to_string(&Message::assistant("hi", "😊")).unwrap();
        assert!(!json.contains("image"));
    }
}
