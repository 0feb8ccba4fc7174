//! Screens and navigation
//!
//! The launcher is a small screen stack: the splash, then the main feature
//! menu. Feature screens themselves (camera, detection, OCR) live outside
//! this crate; the menu announces them and that is where its job ends.

use crate::config::Config;
use crate::sched::Scheduler;
use crate::speech::{EngineFactory, QueueMode, SpeechEngine};
use crate::Result;
use log::{debug, info};
use std::io::Write;
use std::time::{Duration, Instant};

/// Identifier for a screen the launcher can display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    Splash,
    Main,
    ObjectDetection,
    Navigation,
    DocumentReader,
}

impl ScreenId {
    /// Human-readable name, used for announcements
    pub fn title(&self) -> &'static str {
        match self {
            ScreenId::Splash => "Splash",
            ScreenId::Main => "Main menu",
            ScreenId::ObjectDetection => "Object Detection",
            ScreenId::Navigation => "Navigation",
            ScreenId::DocumentReader => "Document Reader",
        }
    }
}

/// What the event loop should do after a key was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    /// Keep running the current screen
    Stay,
    /// Exit the application
    Quit,
}

/// Spoken shortly after the main menu appears
const MAIN_INSTRUCTIONS: &str = "Blind Assistance. Object Detection, Navigation, Document Reader. \
     Press 1, 2 or 3 to choose a feature, or q to quit.";

/// Delay before the instructions are spoken, giving the menu time to settle
const INSTRUCTIONS_DELAY: Duration = Duration::from_millis(1000);

/// Render the splash banner
pub fn draw_splash(out: &mut dyn Write) -> Result<()> {
    // \r\n because the terminal is in raw mode
    write!(
        out,
        "\x1b[2J\x1b[H\r\n\
         \x20   ____  _ _           _\r\n\
         \x20  | __ )| (_)_ __   __| |\r\n\
         \x20  |  _ \\| | | '_ \\ / _` |\r\n\
         \x20  | |_) | | | | | | (_| |\r\n\
         \x20  |____/|_|_|_| |_|\\__,_|\r\n\
         \x20        Assistance\r\n\
         \r\n"
    )?;
    out.flush()?;
    Ok(())
}

/// The main feature menu
///
/// Owns its own speech engine, independent of the one the splash used;
/// the splash releases its engine before this screen is entered.
pub struct MainScreen {
    engine: Option<Box<dyn SpeechEngine>>,
    sched: Scheduler<MainScreen>,
}

impl MainScreen {
    /// Create the main menu, initializing speech through the factory
    ///
    /// A failed engine is logged and ignored; the menu still works silently.
    pub fn new(config: &Config, factory: EngineFactory) -> Self {
        let engine = match factory() {
            Ok(mut engine) => {
                if let Err(e) = engine.set_language(&config.language()) {
                    debug!("Could not set menu speech language: {}", e);
                }
                Some(engine)
            }
            Err(e) => {
                debug!("Main menu speech unavailable: {}", e);
                None
            }
        };

        Self {
            engine,
            sched: Scheduler::new(),
        }
    }

    /// Display the menu and schedule the spoken instructions
    pub fn enter(&mut self, out: &mut dyn Write) -> Result<()> {
        info!("Entering main menu");
        write!(
            out,
            "\x1b[2J\x1b[H\r\n\
             \x20 Blind Assistance\r\n\
             \r\n\
             \x20   1. Object Detection\r\n\
             \x20   2. Navigation\r\n\
             \x20   3. Document Reader\r\n\
             \r\n\
             \x20   q. Quit\r\n\
             \r\n"
        )?;
        out.flush()?;

        self.sched.schedule(INSTRUCTIONS_DELAY, |menu| {
            menu.speak(MAIN_INSTRUCTIONS, QueueMode::Flush)
        });

        Ok(())
    }

    /// Handle a single key press
    pub fn handle_key(&mut self, key: u8, out: &mut dyn Write) -> Result<ScreenAction> {
        let target = match key {
            b'1' => ScreenId::ObjectDetection,
            b'2' => ScreenId::Navigation,
            b'3' => ScreenId::DocumentReader,
            b'q' | 0x03 => return Ok(ScreenAction::Quit),
            _ => return Ok(ScreenAction::Stay),
        };

        info!("Feature selected: {}", target.title());
        self.speak(&format!("Starting {}", target.title()), QueueMode::Flush)?;
        write!(
            out,
            "\x20 {} is handled by the device services, not this launcher.\r\n",
            target.title()
        )?;
        out.flush()?;

        Ok(ScreenAction::Stay)
    }

    /// Run any deferred actions that are ready
    pub fn run_due(&mut self) -> Result<()> {
        for action in self.sched.take_due(Instant::now()) {
            action(self)?;
        }
        Ok(())
    }

    /// Time until the next deferred action, for the poll timeout
    pub fn time_until_next(&self) -> Option<Duration> {
        self.sched.time_until_next()
    }

    /// Speak through the menu's engine, silently skipped without one
    fn speak(&mut self, text: &str, mode: QueueMode) -> Result<()> {
        if let Some(engine) = self.engine.as_mut() {
            engine.speak(text, mode)?;
        }
        Ok(())
    }

    /// Stop speech and release the engine
    pub fn teardown(&mut self) -> Result<()> {
        self.sched.clear();
        if let Some(mut engine) = self.engine.take() {
            engine.stop()?;
            info!("Main menu speech engine released");
        }
        Ok(())
    }
}
