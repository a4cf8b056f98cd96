//! Sound cue playback.
//!
//! Playback is fire-and-forget: a failing sink is logged by the session
//! and never affects the game.

use crate::games::tictactoe::Cue;
use derive_more::{Display, Error};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing::instrument;

/// Plays sound cues.
pub trait AudioSink: Send {
    /// Starts playing `cue` without waiting for it to finish.
    fn play(&mut self, cue: Cue) -> Result<(), AudioError>;
}

/// Audio playback error.
#[derive(Debug, Clone, Display, Error)]
#[display("Audio error: {} at {}:{}", message, file, line)]
pub struct AudioError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl AudioError {
    /// Creates a new audio error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Rings the terminal bell: once per move, twice for a win.
#[derive(Debug)]
pub struct TerminalBell<W> {
    out: W,
}

impl TerminalBell<std::io::Stdout> {
    /// Bell on standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> TerminalBell<W> {
    /// Bell on an arbitrary writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> AudioSink for TerminalBell<W> {
    #[instrument(skip(self))]
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        let bells: &[u8] = match cue {
            Cue::Move => b"\x07",
            Cue::Win => b"\x07\x07",
        };
        self.out
            .write_all(bells)
            .and_then(|()| self.out.flush())
            .map_err(|e| AudioError::new(format!("Failed to ring bell: {}", e)))
    }
}

/// Discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct Muted;

impl AudioSink for Muted {
    fn play(&mut self, _cue: Cue) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Keeps every cue it is asked to play; clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    played: Arc<Mutex<Vec<Cue>>>,
}

impl RecordingAudio {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues played so far.
    pub fn played(&self) -> Vec<Cue> {
        self.played.lock().map(|cues| cues.clone()).unwrap_or_default()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        self.played
            .lock()
            .map_err(|_| AudioError::new("Recorder lock poisoned"))?
            .push(cue);
        Ok(())
    }
}

impl AudioSink for Box<dyn AudioSink> {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        (**self).play(cue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_rings_twice_for_win() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play(Cue::Move).unwrap();
        bell.play(Cue::Win).unwrap();
        assert_eq!(bell.out, b"\x07\x07\x07");
    }

    #[test]
    fn test_recording_clones_share_log() {
        let recorder = RecordingAudio::new();
        let mut sink = recorder.clone();
        sink.play(Cue::Move).unwrap();
        sink.play(Cue::Win).unwrap();
        assert_eq!(recorder.played(), vec![Cue::Move, Cue::Win]);
    }
}
