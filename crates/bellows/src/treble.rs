//! Treble (right-hand) mapping.
//!
//! Maps an ordered note-event sequence onto a chromatic board. Where a
//! pitch is reachable at several positions the selector applies a greedy
//! one-step-lookahead heuristic: it minimizes hand movement from the
//! previous button, nudged toward whichever candidate also sits close to
//! the next note's candidates. This is a known design limitation, not a
//! defect — it is bounded lookahead, not a shortest path over the piece.

use tracing::{debug, info, warn};

use crate::types::{Layout, MappedNote, MappedNoteEvent, NoteEvent, Position};

/// Weight of the lookahead term relative to the distance from the previous
/// position.
const LOOKAHEAD_WEIGHT: f64 = 0.5;

/// Maps treble note events to button positions on a chromatic layout.
pub struct TrebleMapper<'a> {
    layout: &'a Layout,
}

impl<'a> TrebleMapper<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        info!(system = %layout.system, "treble mapper initialized");
        TrebleMapper { layout }
    }

    /// All candidate positions for a midi note, in generation order.
    pub fn map_note(&self, midi: u8) -> &'a [Position] {
        let positions = self.layout.positions_for(midi);
        if positions.is_empty() {
            warn!(midi, "midi not found in layout");
        } else {
            debug!(midi, candidates = positions.len(), "note lookup");
        }
        positions
    }

    /// Pick the ergonomically best candidate.
    ///
    /// Policy, in order: a single candidate wins outright; with no previous
    /// selection the row closest to the middle of the board wins; otherwise
    /// the candidate minimizing Euclidean distance from the previous
    /// position wins, blended with the mean distance to the next note's
    /// candidates when lookahead is available. Ties keep generation order.
    ///
    /// Returns `None` only for an empty candidate list.
    pub fn select_optimal_position(
        &self,
        candidates: &[Position],
        previous: Option<Position>,
        next_midi: Option<u8>,
    ) -> Option<Position> {
        let (&first, rest) = candidates.split_first()?;
        if rest.is_empty() {
            return Some(first);
        }

        let previous = match previous {
            Some(p) => p,
            None => {
                // Cold start: prefer the middle rows
                let middle = self.layout.rows / 2;
                return candidates
                    .iter()
                    .min_by_key(|p| (p.row as i64 - middle as i64).unsigned_abs())
                    .copied();
            }
        };

        let next_candidates = next_midi
            .map(|midi| self.layout.positions_for(midi))
            .filter(|c| !c.is_empty());

        let score = |pos: &Position| -> f64 {
            let current = previous.distance_to(*pos);
            match next_candidates {
                Some(next) => {
                    let mean: f64 = next.iter().map(|n| pos.distance_to(*n)).sum::<f64>()
                        / next.len() as f64;
                    current + LOOKAHEAD_WEIGHT * mean
                }
                None => current,
            }
        };

        candidates
            .iter()
            .min_by(|a, b| score(a).total_cmp(&score(b)))
            .copied()
    }

    /// Map an ordered event sequence, threading the previously selected
    /// position through the run. Events whose pitch is off the board are
    /// dropped from the output with a warning; out of range is expected,
    /// not fatal.
    pub fn map_events(&self, events: &[NoteEvent]) -> Vec<MappedNoteEvent> {
        let mut mapped = Vec::with_capacity(events.len());
        let mut previous: Option<Position> = None;

        for (i, event) in events.iter().enumerate() {
            let positions = self.map_note(event.midi);
            if positions.is_empty() {
                warn!(
                    midi = event.midi,
                    measure = event.measure,
                    "cannot map note, out of accordion range"
                );
                continue;
            }

            let next_midi = events.get(i + 1).map(|e| e.midi);
            let selected = self
                .select_optimal_position(positions, previous, next_midi)
                .expect("candidates checked non-empty");

            mapped.push(MappedNoteEvent {
                event: *event,
                button_positions: positions.to_vec(),
                selected_position: selected,
            });
            previous = Some(selected);
        }

        info!(
            mapped = mapped.len(),
            total = events.len(),
            "treble mapping finished"
        );
        mapped
    }

    /// Map a set of simultaneous pitches. Each note takes its first
    /// candidate; unreachable notes are skipped with a warning.
    pub fn map_chord(&self, midis: &[u8]) -> Vec<MappedNote> {
        let mut notes = Vec::with_capacity(midis.len());
        for &midi in midis {
            let positions = self.map_note(midi);
            match positions.first() {
                Some(&selected) => notes.push(MappedNote {
                    midi,
                    positions: positions.to_vec(),
                    selected,
                }),
                None => warn!(midi, "chord note not in range"),
            }
        }
        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::generate_chromatic_system;
    use crate::types::SystemType;
    use pretty_assertions::assert_eq;

    fn layout() -> Layout {
        generate_chromatic_system(SystemType::CSystem, 5, 12, 48).unwrap()
    }

    fn event(midi: u8) -> NoteEvent {
        NoteEvent {
            measure: 1,
            beat: 1.0,
            duration: 1.0,
            midi,
        }
    }

    #[test]
    fn single_candidate_returned_directly() {
        let layout = layout();
        let mapper = TrebleMapper::new(&layout);
        let only = [Position::new(3, 7)];
        assert_eq!(
            mapper.select_optimal_position(&only, Some(Position::new(0, 0)), None),
            Some(Position::new(3, 7))
        );
    }

    #[test]
    fn empty_candidates_select_nothing() {
        let layout = layout();
        let mapper = TrebleMapper::new(&layout);
        assert_eq!(mapper.select_optimal_position(&[], None, None), None);
    }

    #[test]
    fn cold_start_prefers_middle_rows() {
        let layout = layout();
        let mapper = TrebleMapper::new(&layout);
        let candidates = [Position::new(0, 3), Position::new(2, 2), Position::new(4, 1)];
        // rows = 5, middle row = 2
        assert_eq!(
            mapper.select_optimal_position(&candidates, None, None),
            Some(Position::new(2, 2))
        );
    }

    #[test]
    fn zero_distance_always_wins() {
        let layout = layout();
        let mapper = TrebleMapper::new(&layout);
        let candidates = [Position::new(2, 3), Position::new(4, 10)];
        assert_eq!(
            mapper.select_optimal_position(&candidates, Some(Position::new(2, 3)), None),
            Some(Position::new(2, 3))
        );
    }

    #[test]
    fn ties_keep_generation_order() {
        let layout = layout();
        let mapper = TrebleMapper::new(&layout);
        // Equidistant from the previous position
        let candidates = [Position::new(1, 2), Position::new(3, 2)];
        assert_eq!(
            mapper.select_optimal_position(&candidates, Some(Position::new(2, 2)), None),
            Some(Position::new(1, 2))
        );
    }

    #[test]
    fn lookahead_pulls_selection_toward_next_note() {
        let layout = layout();
        let mapper = TrebleMapper::new(&layout);
        // Both candidates are one column from the previous position. Without
        // lookahead the tie keeps candidate order; with midi 56 coming next
        // (candidates up the columns), the higher-column candidate wins.
        let candidates = [Position::new(0, 0), Position::new(0, 2)];
        let previous = Position::new(0, 1);
        assert_eq!(
            mapper.select_optimal_position(&candidates, Some(previous), None),
            Some(Position::new(0, 0))
        );
        assert_eq!(
            mapper.select_optimal_position(&candidates, Some(previous), Some(56)),
            Some(Position::new(0, 2))
        );
    }

    #[test]
    fn map_events_threads_previous_position() {
        let layout = layout();
        let mapper = TrebleMapper::new(&layout);
        let events = vec![event(48), event(50), event(52)];
        let mapped = mapper.map_events(&events);
        assert_eq!(mapped.len(), 3);
        assert_eq!(mapped[0].selected_position, Position::new(0, 0));
        // From (0,0), the (0,1) spelling of midi 50 is the near candidate
        assert_eq!(mapped[1].selected_position, Position::new(0, 1));
    }

    #[test]
    fn out_of_range_events_dropped_with_remaining_sequence_mapped() {
        let layout = layout();
        let mapper = TrebleMapper::new(&layout);
        let events = vec![event(48), event(20), event(52)];
        let mapped = mapper.map_events(&events);
        assert_eq!(mapped.len(), 2);
        assert_eq!(mapped[0].event.midi, 48);
        assert_eq!(mapped[1].event.midi, 52);
    }

    #[test]
    fn chord_mapping_uses_first_candidates() {
        let layout = layout();
        let mapper = TrebleMapper::new(&layout);
        let chord = mapper.map_chord(&[48, 52, 55]);
        assert_eq!(chord.len(), 3);
        for note in &chord {
            assert_eq!(note.selected, note.positions[0]);
        }
    }

    #[test]
    fn chord_mapping_skips_unreachable_notes() {
        let layout = layout();
        let mapper = TrebleMapper::new(&layout);
        let chord = mapper.map_chord(&[48, 10]);
        assert_eq!(chord.len(), 1);
        assert_eq!(chord[0].midi, 48);
    }
}
