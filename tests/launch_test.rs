//! Launch sequencer integration tests
//!
//! Exercises the splash sequence against a recording speech engine:
//! greeting queued exactly once with flush semantics, navigation on
//! schedule regardless of speech, and idempotent teardown.

use blindassist::config::Config;
use blindassist::launch::{LaunchSequencer, Phase, SpeechPhase};
use blindassist::screen::ScreenId;
use blindassist::speech::{EngineFactory, QueueMode, SpeechEngine};
use std::cell::RefCell;
use std::rc::Rc;
use std::thread::sleep;
use std::time::Duration;

/// Everything the mock engine saw, shared with the test body
#[derive(Default)]
struct Recorded {
    utterances: Vec<(String, QueueMode)>,
    languages: Vec<String>,
    stops: u32,
    released: u32,
    factory_calls: u32,
}

struct MockEngine {
    log: Rc<RefCell<Recorded>>,
}

impl SpeechEngine for MockEngine {
    fn set_language(&mut self, lang: &str) -> blindassist::Result<()> {
        self.log.borrow_mut().languages.push(lang.to_string());
        Ok(())
    }

    fn set_rate(&mut self, _rate: u8) -> blindassist::Result<()> {
        Ok(())
    }

    fn set_volume(&mut self, _volume: u8) -> blindassist::Result<()> {
        Ok(())
    }

    fn speak(&mut self, text: &str, mode: QueueMode) -> blindassist::Result<()> {
        self.log
            .borrow_mut()
            .utterances
            .push((text.to_string(), mode));
        Ok(())
    }

    fn stop(&mut self) -> blindassist::Result<()> {
        self.log.borrow_mut().stops += 1;
        Ok(())
    }
}

impl Drop for MockEngine {
    fn drop(&mut self) {
        self.log.borrow_mut().released += 1;
    }
}

fn mock_factory(log: &Rc<RefCell<Recorded>>) -> EngineFactory {
    let log = log.clone();
    Box::new(move || {
        log.borrow_mut().factory_calls += 1;
        Ok(Box::new(MockEngine { log }) as Box<dyn SpeechEngine>)
    })
}

fn failing_factory(log: &Rc<RefCell<Recorded>>) -> EngineFactory {
    let log = log.clone();
    Box::new(move || {
        log.borrow_mut().factory_calls += 1;
        Err("no speech service".into())
    })
}

/// Config with a short splash delay so tests stay fast
///
/// The tempdir is returned so it outlives the config file.
fn test_config(delay_ms: u64) -> (Config, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config =
        Config::load_from(dir.path().join("blindassist.cfg")).expect("Failed to load config");
    config.set("splash", "delay_ms", &delay_ms.to_string());
    (config, dir)
}

#[test]
fn test_greeting_spoken_once_with_flush() {
    let log = Rc::new(RefCell::new(Recorded::default()));
    let (config, _dir) = test_config(40);
    let mut seq = LaunchSequencer::new(&config, mock_factory(&log));

    let mut out: Vec<u8> = Vec::new();
    seq.start(&mut out).unwrap();
    assert!(!out.is_empty(), "Splash banner should be rendered");

    // Init completion is due immediately; the handoff timer is not
    seq.run_due().unwrap();
    assert_eq!(seq.speech_phase(), SpeechPhase::Ready);
    assert_eq!(seq.phase(), Phase::Started);
    assert!(seq.take_navigation().is_none());

    {
        let rec = log.borrow();
        assert_eq!(rec.utterances.len(), 1, "Exactly one utterance");
        let (text, mode) = &rec.utterances[0];
        assert_eq!(text, "Welcome to my application: Blind Assistance");
        assert_eq!(*mode, QueueMode::Flush);
        assert_eq!(rec.languages, vec!["en".to_string()]);
    }

    // Navigation fires after the delay
    sleep(Duration::from_millis(60));
    seq.run_due().unwrap();
    assert_eq!(seq.take_navigation(), Some(ScreenId::Main));
    assert_eq!(seq.phase(), Phase::Navigated);

    // Teardown stops and releases exactly once, even when called twice
    seq.teardown().unwrap();
    seq.teardown().unwrap();
    assert_eq!(seq.phase(), Phase::TornDown);
    let rec = log.borrow();
    assert_eq!(rec.stops, 1);
    assert_eq!(rec.released, 1);
}

#[test]
fn test_navigation_fires_despite_init_failure() {
    let log = Rc::new(RefCell::new(Recorded::default()));
    let (config, _dir) = test_config(40);
    let mut seq = LaunchSequencer::new(&config, failing_factory(&log));

    seq.start(&mut Vec::<u8>::new()).unwrap();
    seq.run_due().unwrap();

    // Failure is silent: no utterance, no error surfaced
    assert_eq!(seq.speech_phase(), SpeechPhase::Failed);
    assert_eq!(log.borrow().utterances.len(), 0);

    sleep(Duration::from_millis(60));
    seq.run_due().unwrap();
    assert_eq!(seq.take_navigation(), Some(ScreenId::Main));

    // Teardown with a handle that never existed must not fail
    seq.teardown().unwrap();
    assert_eq!(log.borrow().stops, 0);
}

#[test]
fn test_teardown_before_timer_suppresses_navigation() {
    let log = Rc::new(RefCell::new(Recorded::default()));
    let (config, _dir) = test_config(30);
    let mut seq = LaunchSequencer::new(&config, mock_factory(&log));

    seq.start(&mut Vec::<u8>::new()).unwrap();

    // User quits during the splash, before anything ran
    seq.teardown().unwrap();
    assert_eq!(seq.phase(), Phase::TornDown);

    // Timer deadline passes, but the schedule was cleared with the lifecycle
    sleep(Duration::from_millis(50));
    seq.run_due().unwrap();
    assert!(seq.take_navigation().is_none());

    // Engine creation was never attempted
    assert_eq!(log.borrow().factory_calls, 0);
    assert_eq!(log.borrow().released, 0);
}

#[test]
fn test_teardown_with_pending_init_is_safe() {
    let log = Rc::new(RefCell::new(Recorded::default()));
    let (config, _dir) = test_config(5000);
    let mut seq = LaunchSequencer::new(&config, mock_factory(&log));

    seq.start(&mut Vec::<u8>::new()).unwrap();
    assert_eq!(seq.speech_phase(), SpeechPhase::Pending);

    seq.teardown().unwrap();
    assert_eq!(log.borrow().stops, 0);
    assert_eq!(log.borrow().released, 0);
}

#[test]
fn test_custom_greeting_and_language() {
    let log = Rc::new(RefCell::new(Recorded::default()));
    let (mut config, _dir) = test_config(40);
    config.set("speech", "greeting", "Hello there");
    config.set("speech", "language", "fr");

    let mut seq = LaunchSequencer::new(&config, mock_factory(&log));
    seq.start(&mut Vec::<u8>::new()).unwrap();
    seq.run_due().unwrap();

    let rec = log.borrow();
    assert_eq!(rec.utterances[0].0, "Hello there");
    assert_eq!(rec.languages, vec!["fr".to_string()]);
}
