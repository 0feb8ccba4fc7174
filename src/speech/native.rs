//! Native TTS backend using the tts crate
//!
//! The `tts` crate provides a unified interface to Speech Dispatcher on
//! Linux (via native bindings) and AVFoundation on macOS/iOS.

use crate::speech::{QueueMode, SpeechEngine};
use crate::{AssistError, Result};
use log::{debug, error, warn};
use tts::Tts as TtsCrate;

/// Native TTS backend
pub struct NativeEngine {
    /// The tts crate's TTS instance
    tts: TtsCrate,

    /// Cached language setting
    language: Option<String>,

    /// Cached rate setting (0-100)
    rate: Option<u8>,

    /// Cached volume setting (0-100)
    volume: Option<u8>,
}

impl NativeEngine {
    /// Create a new native TTS engine
    pub fn new() -> Result<Self> {
        debug!("Creating native TTS backend");

        let tts = TtsCrate::default()
            .map_err(|e| AssistError::Speech(format!("Failed to initialize TTS: {}", e)))?;

        debug!("Native TTS backend created successfully");

        Ok(Self {
            tts,
            language: None,
            rate: None,
            volume: None,
        })
    }

    /// Convert launcher volume (0-100) to tts crate volume (0.0-1.0)
    fn convert_volume(&self, volume: u8) -> f32 {
        volume as f32 / 100.0
    }
}

impl SpeechEngine for NativeEngine {
    fn set_language(&mut self, lang: &str) -> Result<()> {
        debug!("Setting language to {}", lang);
        self.language = Some(lang.to_string());

        let features = self.tts.supported_features();
        if !features.voice {
            warn!("Voice selection not supported on this platform");
            return Ok(());
        }

        let voices = self
            .tts
            .voices()
            .map_err(|e| AssistError::Speech(format!("Failed to get voices: {}", e)))?;

        // Match on language-tag prefix so "en" accepts "en-US", "en-GB", etc.
        let wanted = lang.to_ascii_lowercase();
        match voices
            .iter()
            .find(|v| v.language().to_string().to_ascii_lowercase().starts_with(&wanted))
        {
            Some(voice) => {
                debug!("Selecting voice: {:?}", voice);
                self.tts
                    .set_voice(voice)
                    .map_err(|e| AssistError::Speech(format!("Failed to set voice: {}", e)))?;
            }
            None => {
                warn!("No voice found for language '{}', keeping default", lang);
            }
        }

        Ok(())
    }

    fn set_rate(&mut self, rate: u8) -> Result<()> {
        debug!("Setting rate to {}", rate);
        self.rate = Some(rate);

        let features = self.tts.supported_features();
        if !features.rate {
            warn!("Rate control not supported on this platform");
            return Ok(());
        }

        self.tts
            .set_rate(rate as f32)
            .map_err(|e| AssistError::Speech(format!("Failed to set rate: {}", e)))?;

        Ok(())
    }

    fn set_volume(&mut self, volume: u8) -> Result<()> {
        debug!("Setting volume to {}", volume);
        self.volume = Some(volume);

        let features = self.tts.supported_features();
        if !features.volume {
            warn!("Volume control not supported on this platform");
            return Ok(());
        }

        let converted = self.convert_volume(volume);
        self.tts
            .set_volume(converted)
            .map_err(|e| AssistError::Speech(format!("Failed to set volume: {}", e)))?;

        Ok(())
    }

    fn speak(&mut self, text: &str, mode: QueueMode) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        let interrupt = mode == QueueMode::Flush;
        debug!("Speaking (flush={}): {}", interrupt, text);
        self.tts.speak(text, interrupt).map_err(|e| {
            error!("Failed to speak: {}", e);
            AssistError::Speech(format!("Speak failed: {}", e))
        })?;

        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        debug!("Stopping speech");
        self.tts.stop().map_err(|e| {
            error!("Failed to stop speech: {}", e);
            AssistError::Speech(format!("Stop failed: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_engine() {
        // This may fail if the system doesn't have speech-dispatcher (Linux)
        // or if running in CI without audio
        let result = NativeEngine::new();

        match result {
            Ok(_) => println!("✓ Native TTS backend initialized successfully"),
            Err(e) => println!("⚠ TTS initialization failed (may be expected in CI): {}", e),
        }
    }

    #[test]
    fn test_volume_conversion() {
        if let Ok(engine) = NativeEngine::new() {
            assert_eq!(engine.convert_volume(0), 0.0);
            assert_eq!(engine.convert_volume(50), 0.5);
            assert_eq!(engine.convert_volume(100), 1.0);
        }
    }
}
