//! Layout generation.
//!
//! Chromatic boards are a pure grid function: `midi = startMidi +
//! rowOffset[row] + columnOffset(column)`. With semitone row steps and
//! whole-tone column steps the mapping is deliberately not injective — the
//! same pitch appears at several positions, and the note index keeps every
//! one of them in row-major generation order.
//!
//! Stradella boards are six fixed rows (counter-bass, root, and the four
//! chord qualities) walking the circle of fifths across the columns.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::ConfigError;
use crate::pitch::{
    color_for, enharmonic_spelling, fifth_root_midi, midi_to_note_name, note_base,
    CIRCLE_OF_FIFTHS,
};
use crate::types::{
    Button, ButtonKind, ChordKey, ChordType, Geometry, Layout, LayoutRequest, Position,
    SystemType,
};

/// Circle-of-fifths index Stradella boards start at by default (C).
pub const DEFAULT_FIFTH_START: usize = 4;

const STRADELLA_ROWS: u32 = 6;

/// Semitones between a Stradella root and its counter-bass (a major third).
const COUNTER_BASS_INTERVAL: u8 = 4;

const TREBLE_GEOMETRY: Geometry = Geometry {
    button_radius: 8,
    row_spacing: 15,
    column_spacing: 18,
    staggered: true,
    stagger_offset: Some(9),
};

const FREE_BASS_GEOMETRY: Geometry = Geometry {
    button_radius: 7,
    row_spacing: 14,
    column_spacing: 16,
    staggered: true,
    stagger_offset: Some(8),
};

const STRADELLA_GEOMETRY: Geometry = Geometry {
    button_radius: 6,
    row_spacing: 12,
    column_spacing: 14,
    staggered: false,
    stagger_offset: None,
};

/// Generate a layout from an external request, validating required
/// parameters up front. Never returns a partial layout.
pub fn generate(request: &LayoutRequest) -> Result<Layout, ConfigError> {
    match request.system_type {
        SystemType::Stradella => {
            let columns = request
                .columns
                .ok_or(ConfigError::MissingStradellaColumns)?;
            generate_stradella(
                columns,
                request.start_fifth_index.unwrap_or(DEFAULT_FIFTH_START),
            )
        }
        system => {
            let (rows, columns, start_midi) =
                match (request.rows, request.columns, request.start_midi) {
                    (Some(r), Some(c), Some(m)) => (r, c, m),
                    _ => return Err(ConfigError::MissingChromaticParams { system }),
                };
            generate_chromatic_system(system, rows, columns, start_midi)
        }
    }
}

/// Generate a standard chromatic board: one semitone per row, one whole
/// tone per column. Free-bass systems reuse the treble interval logic in a
/// lower register with tighter geometry.
pub fn generate_chromatic_system(
    system: SystemType,
    rows: u32,
    columns: u32,
    start_midi: u8,
) -> Result<Layout, ConfigError> {
    let row_offsets: Vec<i32> = (0..rows as i32).collect();
    let geometry = if system.is_free_bass() {
        FREE_BASS_GEOMETRY
    } else {
        TREBLE_GEOMETRY
    };
    generate_chromatic(
        system,
        rows,
        columns,
        start_midi,
        &row_offsets,
        |column| column as i32 * 2,
        geometry,
    )
}

/// Generate a chromatic board from explicit interval parameters.
///
/// `row_offsets` gives the semitone offset of each row; `column_offset`
/// gives the semitone offset of each column. Every generated midi must land
/// in 0..=127 or the whole generation fails.
pub fn generate_chromatic(
    system: SystemType,
    rows: u32,
    columns: u32,
    start_midi: u8,
    row_offsets: &[i32],
    column_offset: impl Fn(u32) -> i32,
    geometry: Geometry,
) -> Result<Layout, ConfigError> {
    if rows == 0 || columns == 0 {
        return Err(ConfigError::EmptyGrid);
    }
    if row_offsets.len() != rows as usize {
        return Err(ConfigError::RowOffsetMismatch {
            rows,
            got: row_offsets.len(),
        });
    }

    let mut buttons = Vec::with_capacity((rows * columns) as usize);
    let mut note_index: BTreeMap<u8, Vec<Position>> = BTreeMap::new();

    for row in 0..rows {
        for column in 0..columns {
            let raw = start_midi as i32 + row_offsets[row as usize] + column_offset(column);
            let midi = u8::try_from(raw)
                .ok()
                .filter(|m| *m <= 127)
                .ok_or(ConfigError::MidiOutOfRange {
                    row,
                    column,
                    midi: raw,
                })?;

            let note = midi_to_note_name(midi);
            let base = note_base(&note);
            let octave = &note[base.len()..];
            let enharmonic = enharmonic_spelling(base)
                .map(|alt| format!("{alt}{octave}"))
                .into_iter()
                .collect();

            buttons.push(Button {
                row,
                column,
                midi,
                enharmonic,
                color: color_for(base),
                kind: ButtonKind::Note,
                label: None,
                note,
            });
            note_index
                .entry(midi)
                .or_default()
                .push(Position::new(row, column));
        }
    }

    info!(
        system = %system,
        rows,
        columns,
        buttons = buttons.len(),
        "generated chromatic layout"
    );

    Ok(Layout {
        system,
        rows,
        columns,
        start_midi: Some(start_midi),
        buttons,
        note_index,
        chord_index: None,
        geometry,
        circle_of_fifths: None,
    })
}

/// Generate a Stradella bass board.
///
/// Rows, top to bottom: counter-bass (major third above root), root bass,
/// then major / minor / seventh / diminished chord rows. Column roots walk
/// the circle of fifths from `start_fifth_index`, cycling past the end.
///
/// The chord index covers the four chord rows only, and insertion is
/// first-write-wins: on boards wide enough to revisit a spelling, the
/// leftmost column keeps the slot.
pub fn generate_stradella(
    columns: u32,
    start_fifth_index: usize,
) -> Result<Layout, ConfigError> {
    if columns == 0 {
        return Err(ConfigError::EmptyGrid);
    }
    let start = start_fifth_index % CIRCLE_OF_FIFTHS.len();

    let mut buttons = Vec::with_capacity((STRADELLA_ROWS * columns) as usize);
    let mut note_index: BTreeMap<u8, Vec<Position>> = BTreeMap::new();
    let mut chord_index: BTreeMap<ChordKey, Position> = BTreeMap::new();

    fn push(buttons: &mut Vec<Button>, note_index: &mut BTreeMap<u8, Vec<Position>>, b: Button) {
        note_index
            .entry(b.midi)
            .or_default()
            .push(Position::new(b.row, b.column));
        buttons.push(b);
    }

    for column in 0..columns {
        let root = CIRCLE_OF_FIFTHS[(start + column as usize) % CIRCLE_OF_FIFTHS.len()];
        let root_midi = fifth_root_midi(root);
        let color = color_for(root.as_str());

        let counter_midi = root_midi + COUNTER_BASS_INTERVAL;
        push(
            &mut buttons,
            &mut note_index,
            Button {
                row: 0,
                column,
                note: midi_to_note_name(counter_midi),
                midi: counter_midi,
                enharmonic: Vec::new(),
                color,
                kind: ButtonKind::CounterBass,
                label: Some(root.to_string()),
            },
        );

        push(
            &mut buttons,
            &mut note_index,
            Button {
                row: 1,
                column,
                note: root.to_string(),
                midi: root_midi,
                enharmonic: Vec::new(),
                color,
                kind: ButtonKind::Root,
                label: Some(root.to_string()),
            },
        );

        for (offset, chord_type) in ChordType::ALL.into_iter().enumerate() {
            let row = 2 + offset as u32;
            push(
                &mut buttons,
                &mut note_index,
                Button {
                    row,
                    column,
                    note: root.to_string(),
                    midi: root_midi,
                    enharmonic: Vec::new(),
                    color,
                    kind: chord_type.button_kind(),
                    label: Some(format!("{}{}", root, chord_type.suffix())),
                },
            );

            let key = ChordKey::new(root, chord_type);
            // First write wins: a respelled root further along the circle
            // must not steal the slot from the leftmost column.
            if let std::collections::btree_map::Entry::Vacant(slot) = chord_index.entry(key) {
                slot.insert(Position::new(row, column));
            } else {
                debug!(%key, column, "chord key already indexed, keeping first column");
            }
        }
    }

    let mut circle: Vec<_> = CIRCLE_OF_FIFTHS[start..].to_vec();
    circle.extend_from_slice(&CIRCLE_OF_FIFTHS[..start]);

    info!(
        columns,
        buttons = buttons.len(),
        chords = chord_index.len(),
        "generated stradella layout"
    );

    Ok(Layout {
        system: SystemType::Stradella,
        rows: STRADELLA_ROWS,
        columns,
        start_midi: None,
        buttons,
        note_index,
        chord_index: Some(chord_index),
        geometry: STRADELLA_GEOMETRY,
        circle_of_fifths: Some(circle),
    })
}
