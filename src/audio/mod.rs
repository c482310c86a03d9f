pub mod cue;

pub use cue::{AudioCue, Cue, Silent, TerminalBell};
