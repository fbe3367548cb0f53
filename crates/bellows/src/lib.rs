//! Accordion keyboard layout synthesis and note/chord-to-button mapping.
//!
//! This crate turns a layout configuration into an immutable button grid
//! with lookup indices, then maps parsed note/chord event sequences onto it:
//! treble events through a greedy ergonomic selector, bass events through a
//! free-bass or Stradella strategy. Everything is synchronous and pure —
//! each job owns its layout and its events, so concurrent use needs no
//! locking.
//!
//! # Example
//!
//! ```
//! use bellows::{generate_chromatic_system, validate_mapping, NoteEvent, SystemType, TrebleMapper};
//!
//! let layout = generate_chromatic_system(SystemType::CSystem, 5, 12, 48)?;
//! let events = vec![
//!     NoteEvent { measure: 1, beat: 1.0, duration: 1.0, midi: 48 },
//!     NoteEvent { measure: 1, beat: 2.0, duration: 1.0, midi: 52 },
//! ];
//!
//! let mapper = TrebleMapper::new(&layout);
//! let mapped = mapper.map_events(&events);
//! let report = validate_mapping(&mapped);
//! assert!(report.valid);
//! # Ok::<(), bellows::ConfigError>(())
//! ```

pub mod bass;
pub mod error;
pub mod layout;
pub mod pitch;
pub mod presets;
pub mod treble;
pub mod types;
pub mod validate;

pub use bass::BassMapper;
pub use error::ConfigError;
pub use layout::{generate, generate_chromatic_system, generate_stradella, DEFAULT_FIFTH_START};
pub use pitch::{midi_to_note_name, PitchName, CIRCLE_OF_FIFTHS};
pub use presets::{preset, preset_layout, preset_names};
pub use treble::TrebleMapper;
pub use types::{
    BassChord, BassEvent, BassNotes, Button, ButtonKind, ChordKey, ChordType, ChordUsage, Color,
    Geometry, Layout, LayoutRequest, MappedBassEvent, MappedNote, MappedNoteEvent, MappingReport,
    NoteEvent, Position, SystemType,
};
pub use validate::{validate_mapping, Mapped};
