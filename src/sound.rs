use crossterm::{execute, style::Print};
use log::{debug, warn};
use std::io::{self, Stdout, Write};

/// Fire-and-forget game event notifications.
pub trait SoundSink {
    fn on_eat(&mut self);
    fn on_session_start(&mut self);
    fn on_game_over(&mut self);
}

/// Rings the terminal bell on every game event.
#[derive(Debug)]
pub struct TerminalBell<W: Write = Stdout> {
    out: W,
}

impl TerminalBell {
    pub fn stdout() -> Self {
        TerminalBell { out: io::stdout() }
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        TerminalBell { out }
    }

    fn ring(&mut self) {
        if let Err(e) = execute!(self.out, Print('\x07')) {
            warn!("Could not ring terminal bell: {}", e);
        }
    }
}

impl<W: Write> SoundSink for TerminalBell<W> {
    fn on_eat(&mut self) {
        debug!("sound: eat");
        self.ring();
    }

    fn on_session_start(&mut self) {
        debug!("sound: session start");
        self.ring();
    }

    fn on_game_over(&mut self) {
        debug!("sound: game over");
        self.ring();
    }
}

#[derive(Debug, Default)]
pub struct Silent;

impl SoundSink for Silent {
    fn on_eat(&mut self) {}
    fn on_session_start(&mut self) {}
    fn on_game_over(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_rings_for_every_event() {
        let mut bell = TerminalBell::new(Vec::new());

        bell.on_session_start();
        assert_eq!(bell.out, b"\x07");

        bell.on_eat();
        bell.on_game_over();
        assert_eq!(bell.out, b"\x07\x07\x07");
    }
}
