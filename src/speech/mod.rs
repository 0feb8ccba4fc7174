//! Speech synthesis system

pub mod engine;
pub mod native;

pub use engine::{create_engine, EngineFactory, InitStatus, QueueMode, SpeechEngine};
