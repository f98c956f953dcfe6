use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use std::path::Path;
use std::sync::Arc;

use super::command::{
    Input, SET_KEYS, SlashCommand, SlashCommandCompleter, parse_flag, parse_input,
};
use super::terminal::TerminalView;
use super::ui::{self, SessionInfo};
use crate::input::ImageReader;
use crate::session::{ConnectOutcome, SessionController, Theme, ViewState, VoiceOutcome};
use crate::ui::{Style, is_prompt_cancelled};

/// An interactive conversation on the terminal.
///
/// Plain lines are sent as chat messages; slash commands drive everything
/// else through the [`SessionController`].
pub struct ChatSession {
    controller: SessionController,
    view: Arc<TerminalView>,
    info: SessionInfo,
}

impl ChatSession {
    pub const fn new(
        controller: SessionController,
        view: Arc<TerminalView>,
        info: SessionInfo,
    ) -> Self {
        Self {
            controller,
            view,
            info,
        }
    }

    pub async fn run(&self) -> Result<()> {
        ui::print_header();
        self.controller.start().await;

        if self.controller.view_state() == ViewState::Profile && !self.ask_username()? {
            ui::print_goodbye();
            return Ok(());
        }

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);

        // Non-highlighted suggestions: gray
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        // Highlighted suggestion: purple
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let pending = self.view.take_input();
            let mut prompt = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Type a message, /help for commands, Ctrl+C to quit");
            if let Some(pending) = pending.as_deref() {
                prompt = prompt.with_initial_value(pending);
            }

            match prompt.prompt() {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(cmd) => {
                        if !self.handle_command(cmd).await? {
                            break;
                        }
                    }
                    Input::Text(text) => {
                        self.controller.submit_text(&text).await;
                    }
                },
                Err(e) if is_prompt_cancelled(&e) => {
                    println!(); // Clear line before goodbye message
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    /// Asks for a name until one is given. Returns `false` if the user
    /// cancels.
    fn ask_username(&self) -> Result<bool> {
        loop {
            match Text::new("What should SXUDO call you?").prompt() {
                Ok(name) => {
                    if self.controller.set_username(&name) == ViewState::Chat {
                        ui::print_success(&format!(
                            "Welcome, {}!",
                            Style::value(name.trim())
                        ));
                        return Ok(true);
                    }
                }
                Err(e) if is_prompt_cancelled(&e) => {
                    println!();
                    return Ok(false);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Runs one slash command. Returns `false` when the session should end.
    async fn handle_command(&self, cmd: SlashCommand) -> Result<bool> {
        match cmd {
            SlashCommand::Image { path, caption } => {
                self.send_image(path.as_deref(), caption.as_deref()).await;
            }
            SlashCommand::Imagine(prompt) => {
                self.controller.submit_generation_prompt(&prompt).await;
            }
            SlashCommand::Voice => self.capture_voice().await,
            SlashCommand::Speak => {
                if !self.controller.speech_available() {
                    ui::print_error("Speech output is not configured");
                } else if !self.controller.speak_last_message() {
                    ui::print_error("Nothing to read aloud yet");
                }
            }
            SlashCommand::Clear => {
                self.controller.clear_history().await;
            }
            SlashCommand::Health => {
                if let Some(health) = self.controller.check_backend_health().await {
                    ui::print_health(&health);
                } else {
                    ui::print_error(&format!("Cannot reach SXUDO at {}", self.info.endpoint));
                }
            }
            SlashCommand::Connect { host, port } => {
                self.connect(host.as_deref(), port.as_deref()).await;
            }
            SlashCommand::Set { key, value } => {
                return self.handle_set(&key, value.as_deref());
            }
            SlashCommand::Config => {
                ui::print_config(
                    &self.controller.preferences(),
                    &self.info,
                    self.controller.saved_connection().as_ref(),
                );
            }
            SlashCommand::Reset => {
                self.controller.reset_preferences();
                ui::print_success("Preferences reset");
                return self.ask_username();
            }
            SlashCommand::Help => ui::print_help(),
            SlashCommand::Quit => return Ok(false),
            SlashCommand::Unknown(cmd) => {
                ui::print_error(&format!("Unknown command: /{cmd}"));
            }
        }
        Ok(true)
    }

    async fn send_image(&self, path: Option<&str>, caption: Option<&str>) {
        let Some(path) = path else {
            ui::print_error("Usage: /image <path> [caption]");
            return;
        };

        // The reader refuses oversized files before reading them; the
        // controller still checks the MIME type and size of what it gets.
        match ImageReader::read(Path::new(path)) {
            Ok(upload) => {
                self.controller.submit_image(upload, caption).await;
            }
            Err(e) => ui::print_error(&format!("{e:#}")),
        }
    }

    /// Listens until the recognizer finishes. Ctrl+C stops the capture
    /// without leaving the session.
    async fn capture_voice(&self) {
        if !self.controller.voice_available() {
            ui::print_error("Voice input is not configured");
            return;
        }

        let capture = self.controller.capture_voice();
        tokio::pin!(capture);

        let outcome = tokio::select! {
            outcome = &mut capture => outcome,
            _ = tokio::signal::ctrl_c() => {
                self.controller.stop_voice();
                capture.await
            }
        };

        if let VoiceOutcome::Transcribed(_) = outcome {
            crate::status!(
                "{}",
                Style::hint("Transcript ready; edit it and press Enter to send")
            );
        }
    }

    async fn connect(&self, host: Option<&str>, port: Option<&str>) {
        let port = match port.map(str::parse::<u16>) {
            None => None,
            Some(Ok(port)) => Some(port),
            Some(Err(_)) => {
                ui::print_error("Port must be a number between 1 and 65535");
                return;
            }
        };

        if let ConnectOutcome::Connected(models) =
            self.controller.connect_backend(host.unwrap_or_default(), port).await
            && models.is_empty()
        {
            crate::status!("{}", Style::hint("The server has no models installed yet"));
        }
    }

    fn handle_set(&self, key: &str, value: Option<&str>) -> Result<bool> {
        let value_or_empty = value.unwrap_or_default();
        match key {
            "username" => {
                if self.controller.set_username(value_or_empty) == ViewState::Profile {
                    return self.ask_username();
                }
                ui::print_success(&format!("Username set to {}", Style::value(value_or_empty)));
            }
            "personality" => {
                self.controller.set_personality(value_or_empty);
                print_cleared_or_set("Personality", value);
            }
            "mood" => {
                self.controller.set_mood(value_or_empty);
                print_cleared_or_set("Mood", value);
            }
            "speed" => match value.map(str::parse::<f32>) {
                Some(Ok(speed)) => {
                    let stored = self.controller.set_voice_speed(speed);
                    ui::print_success(&format!(
                        "Voice speed set to {}",
                        Style::value(format!("{stored:.1}x"))
                    ));
                }
                _ => ui::print_error("Usage: /set speed <0.5-2.0>"),
            },
            "autospeak" | "emotions" | "autosubmit" => {
                let Some(enabled) = value.and_then(parse_flag) else {
                    ui::print_error(&format!("Usage: /set {key} <on|off>"));
                    return Ok(true);
                };
                match key {
                    "autospeak" => self.controller.set_auto_speak(enabled),
                    "emotions" => self.controller.set_show_emotions(enabled),
                    _ => self.controller.set_auto_submit_voice(enabled),
                }
                ui::print_success(&format!(
                    "{key} {}",
                    Style::value(if enabled { "on" } else { "off" })
                ));
            }
            "theme" => match value_or_empty.parse::<Theme>() {
                Ok(theme) => {
                    self.controller.set_theme(theme);
                    ui::print_success(&format!("Theme set to {}", Style::value(theme)));
                }
                Err(e) => ui::print_error(&e),
            },
            "" => {
                println!("Usage: /set <key> <value>");
                println!("Keys: {}", SET_KEYS.join(", "));
            }
            _ => {
                ui::print_error(&format!("Unknown setting: {key}"));
                println!("Available: {}", SET_KEYS.join(", "));
            }
        }
        Ok(true)
    }
}

fn print_cleared_or_set(what: &str, value: Option<&str>) {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => ui::print_success(&format!("{what} set to {}", Style::value(v))),
        None => ui::print_success(&format!("{what} cleared")),
    }
}
