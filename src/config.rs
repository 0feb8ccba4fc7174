//! Configuration management

use crate::{AssistError, Result};
use ini::Ini;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Default welcome message spoken while the splash screen is visible
pub const DEFAULT_GREETING: &str = "Welcome to my application: Blind Assistance";

/// Default spoken language (BCP 47 prefix)
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default splash delay in milliseconds before the main menu appears
pub const DEFAULT_DELAY_MS: u64 = 5000;

/// Application configuration for the launcher
///
/// Manages persistent settings: the spoken greeting, language, speech
/// parameters, and how long the splash screen stays up.
pub struct Config {
    /// INI configuration storage
    ini: Ini,

    /// Config file path (~/.blindassist.cfg)
    path: PathBuf,
}

impl Config {
    /// Load configuration from disk or create default
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from an explicit path
    ///
    /// Creates the file with defaults if it does not exist yet.
    pub fn load_from(path: PathBuf) -> Result<Self> {
        debug!("Loading config from {:?}", path);

        let ini = if path.exists() {
            Ini::load_from_file(&path)
                .map_err(|e| AssistError::IniParse(format!("Failed to load config: {}", e)))?
        } else {
            info!("Config file not found, creating default");
            let default = Self::default_config();
            default
                .write_to_file(&path)
                .map_err(|e| AssistError::IniParse(format!("Failed to write config: {}", e)))?;
            default
        };

        Ok(Self { ini, path })
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        debug!("Saving config to {:?}", self.path);
        self.ini
            .write_to_file(&self.path)
            .map_err(|e| AssistError::Config(format!("Failed to save config: {}", e)))
    }

    /// Get config file path (~/.blindassist.cfg)
    fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".blindassist.cfg")
    }

    /// Expose the config file path for display
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create default configuration
    fn default_config() -> Ini {
        let mut ini = Ini::new();

        ini.with_section(Some("speech"))
            .set("greeting", DEFAULT_GREETING)
            .set("language", DEFAULT_LANGUAGE);

        // The original application scheduled 5000ms even though its comment
        // said three seconds; 5000 is the shipped value, tunable here.
        ini.with_section(Some("splash"))
            .set("delay_ms", DEFAULT_DELAY_MS.to_string());

        ini
    }

    /// Get a string value from config
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.ini
            .get_from(Some(section), key)
            .unwrap_or(default)
            .to_string()
    }

    /// Get an integer value from config
    pub fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.ini
            .get_from(Some(section), key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Set a value in config
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.ini.with_section(Some(section)).set(key, value);
    }

    // Launcher-specific configuration getters

    /// Welcome message spoken over the splash screen
    pub fn greeting(&self) -> String {
        self.get_string("speech", "greeting", DEFAULT_GREETING)
    }

    /// Spoken language for the speech engine
    pub fn language(&self) -> String {
        self.get_string("speech", "language", DEFAULT_LANGUAGE)
    }

    /// Speech rate (0-100), if set
    pub fn rate(&self) -> Option<u8> {
        self.get_int("speech", "rate", -1)
            .try_into()
            .ok()
            .filter(|&r: &u8| r <= 100)
    }

    /// Speech volume (0-100), if set
    pub fn volume(&self) -> Option<u8> {
        self.get_int("speech", "volume", -1)
            .try_into()
            .ok()
            .filter(|&v: &u8| v <= 100)
    }

    /// How long the splash screen stays up before the main menu
    pub fn splash_delay(&self) -> std::time::Duration {
        let ms = self.get_int("splash", "delay_ms", DEFAULT_DELAY_MS as i64);
        let ms = u64::try_from(ms).unwrap_or(DEFAULT_DELAY_MS);
        std::time::Duration::from_millis(ms)
    }
}
