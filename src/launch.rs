//! Splash launch sequencing
//!
//! The launch sequencer owns the application's startup: it shows the splash
//! banner, asks for a speech engine, speaks the welcome message once the
//! engine reports ready, and hands off to the main menu after a fixed delay.
//! Speech readiness and the handoff timer are independent; navigation never
//! waits for speech.

use crate::config::Config;
use crate::sched::Scheduler;
use crate::screen::{self, ScreenId};
use crate::speech::{EngineFactory, InitStatus, QueueMode, SpeechEngine};
use crate::Result;
use log::{debug, info};
use std::io::Write;
use std::time::{Duration, Instant};

/// Lifecycle phase of the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Splash visible, handoff timer armed
    Started,
    /// Handoff requested; sequencer is done with the display
    Navigated,
    /// Resources released; nothing may act on the sequencer anymore
    TornDown,
}

/// Speech initialization branch, independent of the navigation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeechPhase {
    /// Engine requested, completion callback not yet delivered
    Pending,
    /// Engine initialized and greeting queued
    Ready,
    /// Engine could not be created; launcher stays silent
    Failed,
}

/// Orchestrates splash display, spoken greeting, and main-screen handoff
pub struct LaunchSequencer {
    /// Welcome message spoken while the splash is up
    greeting: String,

    /// Spoken language applied before the greeting
    language: String,

    /// Optional speech rate from config
    rate: Option<u8>,

    /// Optional speech volume from config
    volume: Option<u8>,

    /// How long the splash stays up before navigating
    delay: Duration,

    /// Exclusively owned speech engine handle
    /// None until initialization completes, and again after teardown
    engine: Option<Box<dyn SpeechEngine>>,

    /// Deferred engine constructor, consumed by the init completion action
    factory: Option<EngineFactory>,

    /// Navigation request produced by the handoff timer
    /// The event loop collects this with `take_navigation`
    pending_nav: Option<ScreenId>,

    phase: Phase,
    speech: SpeechPhase,

    /// Deferred actions bound to this sequencer's lifecycle
    /// Cleared on teardown so a late timer cannot act on a dead sequencer
    sched: Scheduler<LaunchSequencer>,
}

impl LaunchSequencer {
    /// Create a sequencer from config, with an injected engine factory
    pub fn new(config: &Config, factory: EngineFactory) -> Self {
        Self {
            greeting: config.greeting(),
            language: config.language(),
            rate: config.rate(),
            volume: config.volume(),
            delay: config.splash_delay(),
            engine: None,
            factory: Some(factory),
            pending_nav: None,
            phase: Phase::Started,
            speech: SpeechPhase::Pending,
            sched: Scheduler::new(),
        }
    }

    /// Start the launch sequence
    ///
    /// Renders the splash, requests speech-engine initialization (completion
    /// delivered on the event loop), and independently arms the one-shot
    /// handoff timer. Neither waits for the other.
    pub fn start(&mut self, out: &mut dyn Write) -> Result<()> {
        info!("Launch sequence starting, delay {:?}", self.delay);
        screen::draw_splash(out)?;

        // Engine creation completes on the next loop tick
        self.sched
            .schedule(Duration::ZERO, LaunchSequencer::complete_init);

        self.sched
            .schedule(self.delay, LaunchSequencer::navigate_and_finish);

        Ok(())
    }

    /// Init completion action: build the engine and deliver the status
    fn complete_init(&mut self) -> Result<()> {
        let status = match self.factory.take() {
            Some(factory) => match factory() {
                Ok(engine) => {
                    self.engine = Some(engine);
                    InitStatus::Success
                }
                Err(e) => {
                    debug!("Speech engine initialization failed: {}", e);
                    InitStatus::Failure
                }
            },
            // Already consumed or torn down; nothing to deliver
            None => return Ok(()),
        };

        self.on_speech_init(status)
    }

    /// Completion callback for speech-engine initialization
    ///
    /// On success, sets the language and queues the greeting with flush
    /// semantics. Failure is non-fatal and invisible to the user; the splash
    /// and the handoff proceed on schedule either way.
    fn on_speech_init(&mut self, status: InitStatus) -> Result<()> {
        match status {
            InitStatus::Success => {
                self.speech = SpeechPhase::Ready;
                if let Some(engine) = self.engine.as_mut() {
                    engine.set_language(&self.language)?;
                    if let Some(rate) = self.rate {
                        engine.set_rate(rate)?;
                    }
                    if let Some(volume) = self.volume {
                        engine.set_volume(volume)?;
                    }
                    engine.speak(&self.greeting, QueueMode::Flush)?;
                }
                info!("Greeting queued");
            }
            InitStatus::Failure => {
                self.speech = SpeechPhase::Failed;
                debug!("Continuing without speech");
            }
        }
        Ok(())
    }

    /// Handoff timer action: request the main screen and finish
    ///
    /// Guarded against a sequencer that was already torn down (the user may
    /// have quit during the splash).
    fn navigate_and_finish(&mut self) -> Result<()> {
        if self.phase == Phase::TornDown {
            debug!("Navigation timer fired after teardown, ignoring");
            return Ok(());
        }

        info!("Splash delay elapsed, navigating to main screen");
        self.phase = Phase::Navigated;
        self.pending_nav = Some(ScreenId::Main);
        Ok(())
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

    /// Collect a pending navigation request, if the timer has fired
    pub fn take_navigation(&mut self) -> Option<ScreenId> {
        self.pending_nav.take()
    }

    /// Release the speech engine and cancel anything still scheduled
    ///
    /// Safe to call with a never-initialized handle and safe to call more
    /// than once; the engine is stopped and released exactly once.
    pub fn teardown(&mut self) -> Result<()> {
        self.sched.clear();
        self.factory = None;
        self.phase = Phase::TornDown;

        if let Some(mut engine) = self.engine.take() {
            engine.stop()?;
            info!("Speech engine released");
        }

        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn speech_phase(&self) -> SpeechPhase {
        self.speech
    }
}
