use std::io::{Stdout, Write, stdout};

use crate::game::GameEvent;

/// Sound cue kinds the game asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Move,
    Eat,
    Start,
    GameOver,
}

impl Cue {
    /// Cue associated with an engine event, if any
    pub fn for_event(event: &GameEvent) -> Option<Cue> {
        match event {
            GameEvent::DirectionChanged(_) => Some(Cue::Move),
            GameEvent::FoodEaten { .. } => Some(Cue::Eat),
            GameEvent::Started => Some(Cue::Start),
            GameEvent::GameOver { .. } => Some(Cue::GameOver),
            GameEvent::Paused
            | GameEvent::Resumed
            | GameEvent::Reset
            | GameEvent::SpeedChanged { .. } => None,
        }
    }
}

/// Fire-and-forget sound output
pub trait AudioCue {
    fn play(&mut self, cue: Cue);
}

/// Plays nothing
#[derive(Debug, Default)]
pub struct Silent;

impl AudioCue for Silent {
    fn play(&mut self, _cue: Cue) {}
}

/// Rings the terminal bell when food is eaten and when the game ends
pub struct TerminalBell<W: Write = Stdout> {
    out: W,
}

impl TerminalBell<Stdout> {
    pub fn new() -> Self {
        Self { out: stdout() }
    }
}

impl Default for TerminalBell<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioCue for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        if !matches!(cue, Cue::Eat | Cue::GameOver) {
            return;
        }
        // Best effort, a missing bell is not worth interrupting the game
        if let Err(e) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            log::debug!("terminal bell failed: {}", e);
        }
    }
}
