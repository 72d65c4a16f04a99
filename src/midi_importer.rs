use crate::error::{Error, Result};
use crate::model::song::*;
use log::{debug, warn};
use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const DEFAULT_MPQN: u32 = 500_000;
const MICROSECONDS_PER_MINUTE: f64 = 60_000_000.0;
const MICROSECONDS_PER_SECOND: f64 = 1_000_000.0;

#[derive(Debug, Clone)]
struct TempoSegment {
    pub mpqn: u32,
    pub start_tick: u64,
    pub secs_at_start: f64,
}

/// A note message tagged with its absolute tick, before the tempo map is applied.
#[derive(Debug, Clone, Copy)]
struct TickedEvent {
    tick: u64,
    track: usize,
    order: usize,
    pitch: u8,
    velocity: u8,
    kind: EventKind,
}

/// Converts absolute ticks to seconds since the start of the stream.
enum Clock {
    Metrical {
        ticks_per_quarter: f64,
        segments: Vec<TempoSegment>,
    },
    Timecode {
        secs_per_tick: f64,
    },
}

impl Clock {
    fn metrical(ticks_per_quarter: u64, mut tempo_changes: Vec<(u64, u32)>) -> Self {
        let ticks_per_quarter = ticks_per_quarter.max(1) as f64;
        let mut last_tick: u64 = 0;
        let mut secs_accum: f64 = 0.0;
        let mut last_mpqn: u32 = DEFAULT_MPQN;
        let mut segments: Vec<TempoSegment> = Vec::new();

        tempo_changes.sort_by_key(|(tick, _)| *tick);

        for (tick, mpqn) in tempo_changes.into_iter() {
            if tick > last_tick {
                let delta_ticks = (tick - last_tick) as f64;
                secs_accum +=
                    delta_ticks * (last_mpqn as f64) / ticks_per_quarter / MICROSECONDS_PER_SECOND;
            }

            segments.push(TempoSegment {
                start_tick: tick,
                mpqn,
                secs_at_start: secs_accum,
            });

            last_tick = tick;
            last_mpqn = mpqn;
        }

        Clock::Metrical {
            ticks_per_quarter,
            segments,
        }
    }

    fn seconds(&self, tick: u64) -> f64 {
        match self {
            Clock::Timecode { secs_per_tick } => tick as f64 * secs_per_tick,
            Clock::Metrical {
                ticks_per_quarter,
                segments,
            } => {
                let Some(segment) = segments.iter().rfind(|seg| seg.start_tick <= tick) else {
                    return (tick as f64) * DEFAULT_MPQN as f64
                        / ticks_per_quarter
                        / MICROSECONDS_PER_SECOND;
                };

                let delta_ticks = (tick - segment.start_tick) as f64;
                let secs_per_tick =
                    (segment.mpqn as f64) / ticks_per_quarter / MICROSECONDS_PER_SECOND;
                segment.secs_at_start + delta_ticks * secs_per_tick
            }
        }
    }
}

pub fn import_midi_file<P: AsRef<Path>>(path: P) -> Result<Song> {
    let bytes = fs::read(path.as_ref()).map_err(|source| Error::InputRead {
        path: path.as_ref().to_path_buf(),
        source,
    })?;

    midi_bytes_to_song(&bytes, path.as_ref())
}

pub fn midi_bytes_to_song(bytes: &[u8], source_path: &Path) -> Result<Song> {
    let smf = Smf::parse(bytes)?;

    debug!(
        "MIDI format: {:?}, tracks: {}, timing: {:?}",
        smf.header.format,
        smf.tracks.len(),
        smf.header.timing
    );

    let mut tempo_changes: Vec<(u64, u32)> = vec![(0, DEFAULT_MPQN)];
    let mut explicit_tempo: Option<u32> = None;
    let mut ticked: Vec<TickedEvent> = Vec::new();

    for (track_idx, track) in smf.tracks.iter().enumerate() {
        let mut abs_tick: u64 = 0;
        for (order, event) in track.iter().enumerate() {
            abs_tick = abs_tick.saturating_add(event.delta.as_int() as u64);

            match &event.kind {
                TrackEventKind::Meta(MetaMessage::Tempo(micro)) => {
                    let mpqn: u32 = micro.as_int();
                    tempo_changes.push((abs_tick, mpqn));
                    explicit_tempo.get_or_insert(mpqn);
                    debug!(
                        "Tempo change at tick {} -> {} us/qn (track {})",
                        abs_tick, mpqn, track_idx
                    );
                }
                TrackEventKind::Midi { message, .. } => {
                    let (pitch, velocity, kind) = match message {
                        MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => {
                            (key.as_int(), vel.as_int(), EventKind::NoteStart)
                        }
                        MidiMessage::NoteOn { key, .. } | MidiMessage::NoteOff { key, .. } => {
                            (key.as_int(), 0, EventKind::NoteEnd)
                        }
                        _ => continue,
                    };

                    ticked.push(TickedEvent {
                        tick: abs_tick,
                        track: track_idx,
                        order,
                        pitch,
                        velocity,
                        kind,
                    });
                }
                _ => {}
            }
        }
    }

    let clock = match smf.header.timing {
        Timing::Metrical(t) => Clock::metrical(t.as_int() as u64, tempo_changes),
        Timing::Timecode(fps, subframe) => Clock::Timecode {
            secs_per_tick: 1.0 / (fps.as_f32() as f64 * subframe.max(1) as f64),
        },
    };

    ticked.sort_by_key(|e| (e.tick, e.track, e.order));

    let events: Vec<RawEvent> = ticked
        .into_iter()
        .map(|e| RawEvent {
            time: clock.seconds(e.tick),
            pitch: e.pitch,
            velocity: e.velocity,
            kind: e.kind,
        })
        .collect();

    debug!("Decoded {} note messages..!", events.len());

    let notes = build_intervals(&events);

    Ok(Song {
        metadata: Metadata {
            title: source_path
                .file_name()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string()),
            tempo_bpm: Some(
                MICROSECONDS_PER_MINUTE / explicit_tempo.unwrap_or(DEFAULT_MPQN) as f64,
            ),
        },
        notes,
    })
}

/// Pairs note starts with the next note end of the same pitch.
///
/// A second start for a pitch that is already sounding replaces the pending one, and ends
/// without a pending start are ignored. Pairs with no elapsed time produce nothing.
pub fn build_intervals(events: &[RawEvent]) -> Vec<NoteInterval> {
    let mut pending: HashMap<u8, (f64, u8)> = HashMap::new();
    let mut notes: Vec<NoteInterval> = Vec::new();

    for event in events {
        match event.kind {
            EventKind::NoteStart => {
                let previous = pending.insert(event.pitch, (event.time, event.velocity));
                if let Some((prev_start, _)) = previous {
                    debug!(
                        "Restrike of pitch {} at {:.3}s replaces start at {:.3}s..!",
                        event.pitch, event.time, prev_start
                    );
                }
            }
            EventKind::NoteEnd => {
                let Some((start, velocity)) = pending.remove(&event.pitch) else {
                    debug!("Orphaned note end for {} at {:.3}s..!", event.pitch, event.time);
                    continue;
                };

                let duration = event.time - start;
                if duration > 0.0 {
                    notes.push(NoteInterval {
                        pitch: event.pitch,
                        start,
                        duration,
                        velocity,
                    });
                } else {
                    debug!(
                        "Skipping zero duration note {} at {:.3}s..!",
                        event.pitch, start
                    );
                }
            }
        }
    }

    for (pitch, (start, _)) in pending {
        warn!(
            "Unclosed note start for {} at {:.3}s, dropping it..!",
            pitch, start
        );
    }

    notes
}
