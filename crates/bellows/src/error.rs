//! Configuration errors.
//!
//! These are the only fatal errors in the crate: they fire before any layout
//! is constructed, and a failed generation never returns a partial layout.
//! Lookup misses during mapping are recorded per event, never raised.

use thiserror::Error;

use crate::types::SystemType;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Chromatic systems need all three of rows, columns, and startMidi.
    #[error("{system} layout requires rows, columns, and startMidi")]
    MissingChromaticParams { system: SystemType },

    /// Stradella only needs a column count.
    #[error("stradella layout requires columns")]
    MissingStradellaColumns,

    #[error("rows and columns must be positive")]
    EmptyGrid,

    /// Row offsets must cover every row of the grid.
    #[error("expected {rows} row offsets, got {got}")]
    RowOffsetMismatch { rows: u32, got: usize },

    /// The configuration pushes a button outside the MIDI range.
    #[error("button at row {row}, column {column} would have midi {midi}, outside 0..=127")]
    MidiOutOfRange { row: u32, column: u32, midi: i32 },

    #[error("unknown preset: {0}")]
    UnknownPreset(String),
}
