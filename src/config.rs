use crate::error::{RainwatchError, Result};
use dialoguer::{Confirm, Input, Password};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const API_KEY_ENV: &str = "OPENWEATHERMAP_API_KEY";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub openweathermap: OpenWeatherMapConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl OpenWeatherMapConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UiConfig {
    /// Text art drawn behind the results panel
    #[serde(default)]
    pub backdrop: Option<PathBuf>,
}

impl UiConfig {
    /// Backdrop contents, or `None` when unset or unreadable.
    pub fn load_backdrop(&self) -> Option<String> {
        let path = self.backdrop.as_ref()?;
        match std::fs::read_to_string(expand_home(path)) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!("Backdrop {:?} not loaded: {}", path, e);
                None
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VoiceConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_voice_command")]
    pub command: String,
    #[serde(default = "default_voice_args")]
    pub args: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

fn default_voice_command() -> String {
    if cfg!(target_os = "macos") {
        "say".into()
    } else {
        "espeak".into()
    }
}

fn default_voice_args() -> Vec<String> {
    if cfg!(target_os = "macos") {
        vec!["-r".into(), "150".into()]
    } else {
        vec!["-s".into(), "150".into()]
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            command: default_voice_command(),
            args: default_voice_args(),
        }
    }
}

impl Config {
    /// Load config from `config_override`, the standard locations, or, when no
    /// file exists, from the `OPENWEATHERMAP_API_KEY` environment variable.
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p.clone(),
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            if config_override.is_none() {
                if let Some(config) = Self::from_env() {
                    tracing::info!("No config file found, using {} from environment", API_KEY_ENV);
                    return Ok(config);
                }
            }
            return Err(RainwatchError::Config(format!(
                "Config file not found at {:?}. Run `rainwatch init` to set up.",
                config_path
            )));
        }

        Self::from_file(&config_path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| RainwatchError::Config(format!("Failed to read config: {}", e)))?;

        Self::parse(&config_str)
    }

    pub fn parse(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| RainwatchError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn from_env() -> Option<Self> {
        let api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())?;
        Some(Self {
            openweathermap: OpenWeatherMapConfig::new(api_key),
            ..Self::default()
        })
    }

    pub fn validate(&self) -> Result<()> {
        let owm = &self.openweathermap;
        if owm.api_key.trim().is_empty() || owm.api_key.starts_with("${") {
            return Err(RainwatchError::Config(format!(
                "openweathermap.api_key is empty - set it in config.yaml or export {}",
                API_KEY_ENV
            )));
        }
        if owm.timeout_secs == 0 {
            return Err(RainwatchError::Config(
                "openweathermap.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.voice.enabled && self.voice.command.trim().is_empty() {
            return Err(RainwatchError::Config(
                "voice.command is empty - set one or disable voice".into(),
            ));
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let default_path = Self::default_config_path()?;
        Ok(default_path)
    }

    /// Default path for writing new config files (~/.config/rainwatch/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RainwatchError::Config("Cannot determine config directory".into()))?
            .join("rainwatch");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up rainwatch!");
        println!();

        println!("OpenWeatherMap");
        let api_key: String = Password::new()
            .with_prompt("  API key")
            .interact()
            .map_err(|e| RainwatchError::Config(format!("Input error: {}", e)))?;

        let timeout_secs: u64 = Input::new()
            .with_prompt("  Request timeout (seconds)")
            .default(default_timeout_secs())
            .interact_text()
            .map_err(|e| RainwatchError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Display (leave blank to skip)");
        let backdrop: String = Input::new()
            .with_prompt("  Backdrop text file")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| RainwatchError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Voice");
        let voice_enabled = Confirm::new()
            .with_prompt("  Enable spoken summaries?")
            .default(true)
            .interact()
            .map_err(|e| RainwatchError::Config(format!("Input error: {}", e)))?;

        let mut voice = VoiceConfig {
            enabled: voice_enabled,
            ..VoiceConfig::default()
        };
        if voice_enabled {
            voice.command = Input::new()
                .with_prompt("  Text-to-speech command")
                .default(voice.command)
                .interact_text()
                .map_err(|e| RainwatchError::Config(format!("Input error: {}", e)))?;
        }

        println!();

        let config = Config {
            openweathermap: OpenWeatherMapConfig {
                timeout_secs,
                ..OpenWeatherMapConfig::new(api_key)
            },
            ui: UiConfig {
                backdrop: (!backdrop.is_empty()).then(|| PathBuf::from(backdrop)),
            },
            voice,
        };
        config.validate()?;

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| RainwatchError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# rainwatch configuration\n# Generated by `rainwatch init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("RAINWATCH_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| RainwatchError::Config("Cannot determine data directory".into()))?
            .join("rainwatch");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("rainwatch.log"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openweathermap: OpenWeatherMapConfig::new(""),
            ui: UiConfig::default(),
            voice: VoiceConfig::default(),
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}
