//! Launcher entry point
//!
//! The event loop monitors two sources:
//! 1. stdin (user keyboard input)
//! 2. the deferred-action scheduler (splash handoff timer, spoken menu
//!    instructions)
//!
//! Everything runs on this one thread; speech readiness and the splash
//! timer are just two actions racing on the same loop.

use blindassist::config::Config;
use blindassist::launch::LaunchSequencer;
use blindassist::screen::{MainScreen, ScreenAction};
use blindassist::speech::create_engine;
use blindassist::term::{set_raw_mode, TermiosGuard};
use blindassist::Result;
use log::{debug, error, info};
use mio::{Events, Interest, Poll, Token};
use nix::libc;
use std::io::{self, Read, Write};
use std::os::unix::io::AsRawFd;
use std::process;
use std::time::Duration;

/// Token for stdin in mio poll
const STDIN: Token = Token(0);

fn main() {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    // Initialize logger
    if debug_mode {
        // Debug mode: write to blindassist.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("blindassist.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!(
                    "Warning: Failed to open blindassist.log for debug logging: {}",
                    e
                );
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "Blind Assistance launcher version {} starting (debug mode)",
            blindassist::VERSION
        );
    } else {
        // Normal mode: minimal logging to stderr, only errors
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }

    // Run the application
    if let Err(e) = run() {
        error!("Fatal error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    debug!("Initializing launcher");

    // The launcher requires interactive terminal access
    let stdin_fd = io::stdin().as_raw_fd();
    if unsafe { libc::isatty(stdin_fd) } == 0 {
        eprintln!("Error: blindassist requires an interactive terminal (stdin is not a TTY)");
        eprintln!("Usage: run blindassist directly in a terminal, not through pipes or redirects");
        process::exit(1);
    }

    // Raw mode lets the menu react to single keypresses
    let original_termios = set_raw_mode(stdin_fd)?;

    // Ensure we restore terminal on exit
    let _guard = TermiosGuard {
        fd: stdin_fd,
        termios: original_termios,
    };

    let config = Config::load()?;
    info!("Configuration loaded from {:?}", config.path());

    // Set up the event loop
    let mut poll = Poll::new()?;
    let mut stdin_source = mio::unix::SourceFd(&stdin_fd);
    poll.registry()
        .register(&mut stdin_source, STDIN, Interest::READABLE)?;
    let mut events = Events::with_capacity(16);

    let mut stdout = io::stdout();

    // Splash: show the banner, queue the greeting, arm the handoff timer
    let mut sequencer = LaunchSequencer::new(&config, Box::new(create_engine));
    sequencer.start(&mut stdout)?;
    info!("Launch sequencer started");

    let entered_main = run_splash(&mut poll, &mut events, &mut sequencer)?;
    if !entered_main {
        return Ok(());
    }

    // Main menu takes over with its own speech engine
    let mut menu = MainScreen::new(&config, Box::new(create_engine));
    menu.enter(&mut stdout)?;
    run_menu(&mut poll, &mut events, &mut menu, &mut stdout)?;

    menu.teardown()?;
    writeln!(stdout, "\r")?;
    Ok(())
}

/// Drive the splash until the handoff timer fires or the user quits
///
/// Returns true if the launcher should continue to the main menu.
fn run_splash(
    poll: &mut Poll,
    events: &mut Events,
    sequencer: &mut LaunchSequencer,
) -> Result<bool> {
    loop {
        if let Err(e) = sequencer.run_due() {
            error!("Error running scheduled action: {}", e);
        }

        // Handoff: the timer fired, the sequencer is done
        if let Some(target) = sequencer.take_navigation() {
            debug!("Navigation requested: {:?}", target);
            sequencer.teardown()?;
            return Ok(true);
        }

        let timeout = sequencer
            .time_until_next()
            .map(|d| d.min(Duration::from_millis(100)))
            .or(Some(Duration::from_millis(100)));

        poll.poll(events, timeout)?;

        for event in events.iter() {
            if event.token() == STDIN {
                let mut buf = [0u8; 64];
                let n = io::stdin().read(&mut buf)?;
                if buf[..n].iter().any(|&b| b == b'q' || b == 0x03) {
                    info!("Quit during splash");
                    sequencer.teardown()?;
                    return Ok(false);
                }
            }
        }
    }
}

/// Drive the main menu until the user quits
fn run_menu(
    poll: &mut Poll,
    events: &mut Events,
    menu: &mut MainScreen,
    stdout: &mut io::Stdout,
) -> Result<()> {
    loop {
        if let Err(e) = menu.run_due() {
            error!("Error running scheduled action: {}", e);
        }

        let timeout = menu
            .time_until_next()
            .map(|d| d.min(Duration::from_millis(100)))
            .or(Some(Duration::from_millis(100)));

        poll.poll(events, timeout)?;

        for event in events.iter() {
            if event.token() == STDIN {
                let mut buf = [0u8; 64];
                let n = io::stdin().read(&mut buf)?;
                for &key in &buf[..n] {
                    if menu.handle_key(key, stdout)? == ScreenAction::Quit {
                        info!("Quit from main menu");
                        return Ok(());
                    }
                }
            }
        }
    }
}
