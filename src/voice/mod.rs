//! Speech capture and synthesis services.
//!
//! The controller only depends on [`SpeechRecognizer`] and
//! [`SpeechSynthesizer`]. The terminal client backs them with external
//! programs ([`CommandRecognizer`], [`CommandSynthesizer`]) or with the
//! disabled [`Unavailable`] fallback when nothing is configured.

mod command;

pub use command::{CommandRecognizer, CommandSynthesizer};

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoiceError {
    #[error("speech service not available")]
    Unavailable,
    #[error("listening was stopped")]
    Stopped,
    #[error("no speech detected")]
    NoSpeech,
    #[error("speech recognition failed: {0}")]
    Recognition(String),
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
}

/// Turns spoken input into text.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    fn is_available(&self) -> bool;

    /// Listens until a final transcript is ready or [`stop`] is called.
    ///
    /// [`stop`]: SpeechRecognizer::stop
    async fn listen(&self) -> Result<String, VoiceError>;

    /// Ends an in-progress [`listen`](SpeechRecognizer::listen) with
    /// [`VoiceError::Stopped`].
    fn stop(&self);
}

/// Speaks text aloud. At most one utterance plays at a time.
pub trait SpeechSynthesizer: Send + Sync {
    fn is_available(&self) -> bool;

    /// Silences the current utterance, if any.
    fn cancel(&self);

    /// Starts speaking without waiting for the utterance to finish.
    /// `rate` is relative, 1.0 being normal speed.
    fn speak(&self, text: &str, rate: f32) -> Result<(), VoiceError>;
}

/// Stand-in for a speech service the host does not have.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

#[async_trait]
impl SpeechRecognizer for Unavailable {
    fn is_available(&self) -> bool {
        false
    }

    async fn listen(&self) -> Result<String, VoiceError> {
        Err(VoiceError::Unavailable)
    }

    fn stop(&self) {}
}

impl SpeechSynthesizer for Unavailable {
    fn is_available(&self) -> bool {
        false
    }

    fn cancel(&self) {}

    fn speak(&self, _text: &str, _rate: f32) -> Result<(), VoiceError> {
        Err(VoiceError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_recognizer() {
        let recognizer = Unavailable;
        assert!(!SpeechRecognizer::is_available(&recognizer));
        assert_eq!(recognizer.listen().await, Err(VoiceError::Unavailable));
    }

    #[test]
    fn test_unavailable_synthesizer() {
        let synthesizer = Unavailable;
        assert!(!SpeechSynthesizer::is_available(&synthesizer));
        assert_eq!(synthesizer.speak("hi", 1.0), Err(VoiceError::Unavailable));
    }
}
