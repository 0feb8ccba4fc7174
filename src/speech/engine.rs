//! Speech engine abstraction
//!
//! Provides a unified interface for text-to-speech. The launcher uses this
//! to speak the welcome message and screen announcements to the user.

use crate::Result;
use log::info;

/// Outcome of an asynchronous engine initialization request
///
/// Delivered exactly once through the completion callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStatus {
    /// Engine is ready to speak
    Success,
    /// Engine could not be created; speech is silently unavailable
    Failure,
}

/// Queueing behavior for an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueMode {
    /// Discard any pending utterances and speak this one next
    Flush,
    /// Speak after any pending utterances finish
    Append,
}

/// Speech engine trait
///
/// All backends implement this to provide text-to-speech.
/// Releasing the engine is dropping it; `stop` only silences it.
pub trait SpeechEngine {
    /// Select the spoken language (BCP 47 tag or prefix, e.g. "en")
    fn set_language(&mut self, lang: &str) -> Result<()>;

    /// Set speech rate (0-100, where 50 is normal)
    fn set_rate(&mut self, rate: u8) -> Result<()>;

    /// Set speech volume (0-100)
    fn set_volume(&mut self, volume: u8) -> Result<()>;

    /// Enqueue an utterance with the given queue mode
    fn speak(&mut self, text: &str, mode: QueueMode) -> Result<()>;

    /// Halt any in-progress utterance
    fn stop(&mut self) -> Result<()>;
}

/// Factory producing a speech engine, injected so tests can substitute a mock
pub type EngineFactory = Box<dyn FnOnce() -> Result<Box<dyn SpeechEngine>>>;

/// Create the platform speech engine
///
/// Uses the `tts` crate, which binds Speech Dispatcher on Linux and
/// AVFoundation on macOS. Failure here is reported as a status to the
/// caller's completion callback, never as a crash.
pub fn create_engine() -> Result<Box<dyn SpeechEngine>> {
    info!(
        "Creating speech engine for platform: {}",
        std::env::consts::OS
    );

    let engine = super::native::NativeEngine::new()?;
    info!("Speech engine initialized");
    Ok(Box::new(engine))
}
