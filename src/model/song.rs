use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    NoteStart,
    NoteEnd,
}

/// A single note message pulled out of the decoded MIDI stream, in seconds since the start.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RawEvent {
    pub time: f64,
    pub pitch: u8,
    pub velocity: u8,
    pub kind: EventKind,
}

impl RawEvent {
    pub fn start(time: f64, pitch: u8, velocity: u8) -> Self {
        Self {
            time,
            pitch,
            velocity,
            kind: EventKind::NoteStart,
        }
    }

    pub fn end(time: f64, pitch: u8) -> Self {
        Self {
            time,
            pitch,
            velocity: 0,
            kind: EventKind::NoteEnd,
        }
    }
}

/// A sounded note. `duration` is always strictly positive.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct NoteInterval {
    pub pitch: u8,
    pub start: f64,
    pub duration: f64,
    pub velocity: u8,
}

impl NoteInterval {
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Metadata {
    pub title: Option<String>,
    pub tempo_bpm: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Song {
    pub metadata: Metadata,
    pub notes: Vec<NoteInterval>,
}
