use crate::config::VoiceConfig;
use crate::error::{RainwatchError, Result};
use std::process::{Command, Stdio};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Text-to-speech output. Implementations may block until playback ends.
pub trait Speaker: Send + Sync {
    fn speak(&self, text: &str) -> Result<()>;
}

/// Speaks through an external program such as `espeak` or `say`, passing the
/// text as the last argument.
pub struct CommandSpeaker {
    command: String,
    args: Vec<String>,
}

impl CommandSpeaker {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, text: &str) -> Result<()> {
        let status = Command::new(&self.command)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| RainwatchError::Voice(format!("{}: {}", self.command, e)))?;

        if !status.success() {
            return Err(RainwatchError::Voice(format!(
                "{} exited with {}",
                self.command, status
            )));
        }
        Ok(())
    }
}

/// Used when voice output is disabled.
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&self, text: &str) -> Result<()> {
        tracing::debug!("Voice disabled, not speaking: {}", text);
        Ok(())
    }
}

pub fn speaker_from_config(config: &VoiceConfig) -> Arc<dyn Speaker> {
    if config.enabled {
        Arc::new(CommandSpeaker::new(config.command.clone(), config.args.clone()))
    } else {
        Arc::new(SilentSpeaker)
    }
}

/// Speak on the blocking pool; failures are logged and otherwise ignored.
pub fn speak_in_background(speaker: Arc<dyn Speaker>, text: String) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        if let Err(e) = speaker.speak(&text) {
            tracing::warn!("Voice playback failed: {}", e);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_command_is_voice_error() {
        let speaker = CommandSpeaker::new("rainwatch-no-such-tts-binary", vec![]);
        assert!(matches!(
            speaker.speak("hello"),
            Err(RainwatchError::Voice(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn command_receives_text_as_last_argument() {
        // `test -n <text>` succeeds only when the text is non-empty
        let speaker = CommandSpeaker::new("test", vec!["-n".into()]);
        assert!(speaker.speak("In Paris, there is rain.").is_ok());
        assert!(speaker.speak("").is_err());
    }

    #[test]
    fn silent_speaker_never_fails() {
        assert!(SilentSpeaker.speak("anything").is_ok());
    }

    #[test]
    fn disabled_config_is_silent() {
        let config = VoiceConfig {
            enabled: false,
            command: String::new(),
            args: vec![],
        };
        assert!(speaker_from_config(&config).speak("quiet").is_ok());
    }
}
