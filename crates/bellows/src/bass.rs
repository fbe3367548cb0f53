//! Bass (left-hand) mapping.
//!
//! Two strategies, picked by the layout's system. Free-bass boards are
//! chromatic, so every pitch maps independently through the note index with
//! no ergonomic optimization. Stradella boards resolve recognized chords
//! through the chord index — with one enharmonic respelling retry — and
//! restrict single notes to an exact match on the root-bass row.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::pitch::PitchName;
use crate::types::{
    BassEvent, ChordKey, ChordType, ChordUsage, Layout, MappedBassEvent, MappedNote, Position,
    SystemType,
};

/// Row index of the root-bass row on a Stradella board.
const ROOT_BASS_ROW: u32 = 1;

/// Maps bass events to button positions on a free-bass or Stradella layout.
pub struct BassMapper<'a> {
    layout: &'a Layout,
}

impl<'a> BassMapper<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        info!(system = %layout.system, "bass mapper initialized");
        BassMapper { layout }
    }

    /// All candidate positions for a bass pitch, in generation order.
    pub fn map_single_note(&self, midi: u8) -> &'a [Position] {
        let positions = self.layout.positions_for(midi);
        if positions.is_empty() {
            warn!(midi, "bass midi not found in layout");
        }
        positions
    }

    /// Resolve a chord to its Stradella chord button.
    ///
    /// On a miss the root is respelled through the sharp/flat enharmonic
    /// pair and the lookup retried once. A second miss is a definitive
    /// failure — there is no further fallback.
    pub fn map_chord_stradella(
        &self,
        root: PitchName,
        chord_type: ChordType,
    ) -> Option<Position> {
        if self.layout.system != SystemType::Stradella {
            warn!(system = %self.layout.system, "chord lookup on non-stradella system");
            return None;
        }
        let index = self.layout.chord_index.as_ref()?;

        let key = ChordKey::new(root, chord_type);
        if let Some(&position) = index.get(&key) {
            debug!(%key, ?position, "chord mapped");
            return Some(position);
        }

        if let Some(alt) = key.enharmonic() {
            if let Some(&position) = index.get(&alt) {
                debug!(%key, via = %alt, ?position, "chord mapped via enharmonic");
                return Some(position);
            }
        }

        warn!(%key, "chord not found in stradella layout");
        None
    }

    /// Map one free-bass event: every pitch resolves independently, always
    /// taking the first candidate. Complete only if every pitch resolved.
    fn map_freebass_event(&self, event: &BassEvent) -> MappedBassEvent {
        let midis = event.midis();
        let mut mapped_notes = Vec::with_capacity(midis.len());

        for &midi in midis {
            let positions = self.map_single_note(midi);
            match positions.first() {
                Some(&selected) => mapped_notes.push(MappedNote {
                    midi,
                    positions: positions.to_vec(),
                    selected,
                }),
                None => warn!(midi, "free-bass midi out of range"),
            }
        }

        let mapping_complete = mapped_notes.len() == midis.len();
        MappedBassEvent {
            event: event.clone(),
            mapped_notes,
            button_position: None,
            mapping_complete,
            error: None,
        }
    }

    /// Map one Stradella event: chords go through the chord index, single
    /// notes must match a root-bass row button exactly.
    fn map_stradella_event(&self, event: &BassEvent) -> MappedBassEvent {
        match event {
            BassEvent::Chord(chord) => {
                match self.map_chord_stradella(chord.root, chord.chord_type) {
                    Some(position) => MappedBassEvent {
                        event: event.clone(),
                        mapped_notes: Vec::new(),
                        button_position: Some(position),
                        mapping_complete: true,
                        error: None,
                    },
                    None => MappedBassEvent {
                        event: event.clone(),
                        mapped_notes: Vec::new(),
                        button_position: None,
                        mapping_complete: false,
                        error: Some(format!(
                            "chord {} {} not available",
                            chord.root, chord.chord_type
                        )),
                    },
                }
            }
            BassEvent::SingleNote(notes) => {
                let Some(&midi) = notes.midi.first() else {
                    return MappedBassEvent {
                        event: event.clone(),
                        mapped_notes: Vec::new(),
                        button_position: None,
                        mapping_complete: false,
                        error: Some("single-note event has no pitches".to_string()),
                    };
                };

                // Exact midi match on the root-bass row; no nearest match,
                // no enharmonic fallback for single notes.
                let position = self
                    .layout
                    .buttons
                    .iter()
                    .find(|b| b.row == ROOT_BASS_ROW && b.midi == midi)
                    .map(|b| Position::new(b.row, b.column));

                match position {
                    Some(position) => MappedBassEvent {
                        event: event.clone(),
                        mapped_notes: Vec::new(),
                        button_position: Some(position),
                        mapping_complete: true,
                        error: None,
                    },
                    None => {
                        warn!(midi, "stradella single note not in root-bass row");
                        MappedBassEvent {
                            event: event.clone(),
                            mapped_notes: Vec::new(),
                            button_position: None,
                            mapping_complete: false,
                            error: Some(format!("midi {midi} not in root-bass row")),
                        }
                    }
                }
            }
        }
    }

    /// Map an ordered bass-event sequence. Misses stay in the output with
    /// `mapping_complete = false`; processing never halts on one.
    pub fn map_events(&self, events: &[BassEvent]) -> Vec<MappedBassEvent> {
        let mapped: Vec<_> = events
            .iter()
            .map(|event| match self.layout.system {
                SystemType::Stradella => self.map_stradella_event(event),
                _ => self.map_freebass_event(event),
            })
            .collect();

        let successful = mapped.iter().filter(|e| e.mapping_complete).count();
        info!(
            mapped = successful,
            total = events.len(),
            "bass mapping finished"
        );
        mapped
    }

    /// Chord-button usage over a mapped Stradella sequence. Reporting only;
    /// empty for non-Stradella layouts.
    pub fn analyze_chord_usage(&self, mapped: &[MappedBassEvent]) -> ChordUsage {
        if self.layout.system != SystemType::Stradella {
            return ChordUsage::default();
        }

        let mut chord_counts: BTreeMap<ChordKey, usize> = BTreeMap::new();
        let mut total_chords = 0;

        for event in mapped {
            if !event.mapping_complete {
                continue;
            }
            if let BassEvent::Chord(chord) = &event.event {
                *chord_counts
                    .entry(ChordKey::new(chord.root, chord.chord_type))
                    .or_default() += 1;
                total_chords += 1;
            }
        }

        let mut most_common: Vec<(ChordKey, usize)> =
            chord_counts.iter().map(|(&k, &v)| (k, v)).collect();
        most_common.sort_by(|a, b| b.1.cmp(&a.1));
        most_common.truncate(10);

        ChordUsage {
            total_chords,
            unique_chords: chord_counts.len(),
            most_common,
            chord_counts,
        }
    }
}
