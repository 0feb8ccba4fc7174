//! Terminal utilities

use crate::Result;
use log::debug;
use nix::libc;
use std::os::unix::io::RawFd;

/// Set raw mode on a terminal file descriptor
///
/// Raw mode delivers keypresses immediately, so the menu reacts to a single
/// key instead of waiting for a newline.
pub fn set_raw_mode(fd: RawFd) -> Result<libc::termios> {
    let original_termios = unsafe {
        let mut termios: libc::termios = std::mem::zeroed();
        libc::tcgetattr(fd, &mut termios);
        termios
    };

    let mut raw_termios = original_termios;

    unsafe {
        libc::cfmakeraw(&mut raw_termios);
        libc::tcsetattr(fd, libc::TCSANOW, &raw_termios);
    }

    Ok(original_termios)
}

/// Restore terminal attributes
pub fn restore_termios(fd: RawFd, termios: &libc::termios) {
    unsafe {
        libc::tcsetattr(fd, libc::TCSANOW, termios);
    }
}

/// RAII guard to restore terminal on exit
///
/// Ensures the terminal returns to normal mode even if the launcher errors.
pub struct TermiosGuard {
    pub fd: RawFd,
    pub termios: libc::termios,
}

impl Drop for TermiosGuard {
    fn drop(&mut self) {
        restore_termios(self.fd, &self.termios);
        debug!("Terminal attributes restored");
    }
}
