use async_trait::async_trait;
use std::process::Stdio;
use std::sync::{Mutex, PoisonError};
use tokio::process::{Child, Command};
use tokio::sync::Notify;
use tracing::debug;

use super::{SpeechRecognizer, SpeechSynthesizer, VoiceError};

/// espeak's default speaking rate in words per minute.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

/// Expands `{text}` and `{wpm}` in a command template.
fn render_args(template: &[String], text: &str, rate: f32) -> Vec<String> {
    let wpm = (BASE_WORDS_PER_MINUTE * rate).round().to_string();
    template
        .iter()
        .map(|arg| arg.replace("{wpm}", &wpm).replace("{text}", text))
        .collect()
}

/// Speaks by running an external program such as `espeak` or `say`.
///
/// The template is a program followed by its arguments; `{text}` and
/// `{wpm}` are substituted per utterance. Starting a new utterance kills
/// the previous process.
pub struct CommandSynthesizer {
    template: Vec<String>,
    current: Mutex<Option<Child>>,
}

impl CommandSynthesizer {
    pub fn new(template: Vec<String>) -> Self {
        Self {
            template,
            current: Mutex::new(None),
        }
    }
}

impl SpeechSynthesizer for CommandSynthesizer {
    fn is_available(&self) -> bool {
        !self.template.is_empty()
    }

    fn cancel(&self) {
        let previous = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(mut child) = previous {
            // Already exited is fine.
            let _ = child.start_kill();
        }
    }

    fn speak(&self, text: &str, rate: f32) -> Result<(), VoiceError> {
        let args = render_args(&self.template, text, rate);
        let Some((program, rest)) = args.split_first() else {
            return Err(VoiceError::Unavailable);
        };

        let child = Command::new(program)
            .args(rest)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| VoiceError::Synthesis(format!("{program}: {e}")))?;

        debug!(%program, rate, "utterance started");
        let previous = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(child);
        drop(previous);
        Ok(())
    }
}

/// Recognizes speech by running an external program that records and
/// prints the transcript on stdout.
pub struct CommandRecognizer {
    template: Vec<String>,
    stop: Notify,
}

impl CommandRecognizer {
    pub fn new(template: Vec<String>) -> Self {
        Self {
            template,
            stop: Notify::new(),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for CommandRecognizer {
    fn is_available(&self) -> bool {
        !self.template.is_empty()
    }

    async fn listen(&self) -> Result<String, VoiceError> {
        let Some((program, args)) = self.template.split_first() else {
            return Err(VoiceError::Unavailable);
        };

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| VoiceError::Recognition(format!("{program}: {e}")))?;

        // Dropping the output future kills the child.
        let output = tokio::select! {
            output = child.wait_with_output() => {
                output.map_err(|e| VoiceError::Recognition(e.to_string()))?
            }
            () = self.stop.notified() => return Err(VoiceError::Stopped),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VoiceError::Recognition(format!(
                "{program} exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if transcript.is_empty() {
            Err(VoiceError::NoSpeech)
        } else {
            Ok(transcript)
        }
    }

    fn stop(&self) {
        self.stop.notify_waiters();
    }
}
