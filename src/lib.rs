//! Blind Assistance console launcher
//!
//! Shows a splash screen, speaks a welcome message through the platform
//! speech synthesizer, then hands off to the main feature menu after a
//! fixed delay. Everything runs on a single cooperative event loop.

pub mod config;
pub mod error;
pub mod launch;
pub mod sched;
pub mod screen;
pub mod speech;
pub mod term;

pub use error::{AssistError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "blindassist";
