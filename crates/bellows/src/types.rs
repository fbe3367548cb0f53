//! Core data model: layouts, buttons, events, and mapped records.
//!
//! Wire shapes follow the layout JSON the frontend consumes: camelCase
//! fields, string-keyed indices, and an `eventType` discriminant on bass
//! events. Everything is immutable once constructed; mappers only ever read
//! positions out of the indices.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::pitch::PitchName;

/// Accordion keyboard system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemType {
    CSystem,
    BSystem,
    FreebassC,
    FreebassB,
    Stradella,
}

impl SystemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SystemType::CSystem => "c-system",
            SystemType::BSystem => "b-system",
            SystemType::FreebassC => "freebass-c",
            SystemType::FreebassB => "freebass-b",
            SystemType::Stradella => "stradella",
        }
    }

    pub fn is_free_bass(&self) -> bool {
        matches!(self, SystemType::FreebassC | SystemType::FreebassB)
    }
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SystemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "c-system" => SystemType::CSystem,
            "b-system" => SystemType::BSystem,
            "freebass-c" => SystemType::FreebassC,
            "freebass-b" => SystemType::FreebassB,
            "stradella" => SystemType::Stradella,
            other => return Err(format!("unknown system type: {other}")),
        })
    }
}

/// Stradella chord quality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordType {
    #[default]
    Major,
    Minor,
    Seventh,
    Diminished,
}

impl ChordType {
    pub const ALL: [ChordType; 4] = [
        ChordType::Major,
        ChordType::Minor,
        ChordType::Seventh,
        ChordType::Diminished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChordType::Major => "major",
            ChordType::Minor => "minor",
            ChordType::Seventh => "seventh",
            ChordType::Diminished => "diminished",
        }
    }

    /// Suffix for button labels: `C`, `Cm`, `C7`, `Cdim`.
    pub fn suffix(&self) -> &'static str {
        match self {
            ChordType::Major => "",
            ChordType::Minor => "m",
            ChordType::Seventh => "7",
            ChordType::Diminished => "dim",
        }
    }

    pub fn button_kind(&self) -> ButtonKind {
        match self {
            ChordType::Major => ButtonKind::Major,
            ChordType::Minor => ButtonKind::Minor,
            ChordType::Seventh => ButtonKind::Seventh,
            ChordType::Diminished => ButtonKind::Diminished,
        }
    }
}

impl fmt::Display for ChordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "major" => ChordType::Major,
            "minor" => ChordType::Minor,
            "seventh" => ChordType::Seventh,
            "diminished" => ChordType::Diminished,
            other => return Err(format!("unknown chord type: {other}")),
        })
    }
}

/// What a button does on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonKind {
    Note,
    Root,
    CounterBass,
    Major,
    Minor,
    Seventh,
    Diminished,
}

/// Button color, derived from pitch class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Dark,
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
    Gray,
    Purple,
    Teal,
}

/// A (row, column) grid coordinate. Plain value, never a reference into a
/// button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u32,
    pub column: u32,
}

impl Position {
    pub fn new(row: u32, column: u32) -> Self {
        Position { row, column }
    }

    /// Euclidean distance in (row, column) space.
    pub fn distance_to(&self, other: Position) -> f64 {
        let dr = self.row as f64 - other.row as f64;
        let dc = self.column as f64 - other.column as f64;
        (dr * dr + dc * dc).sqrt()
    }
}

/// One physical button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub row: u32,
    pub column: u32,
    /// Primary spelling: name + octave on chromatic boards (`C4`), bare root
    /// on Stradella chord rows (`Ab`).
    pub note: String,
    pub midi: u8,
    pub enharmonic: Vec<String>,
    pub color: Color,
    #[serde(rename = "type")]
    pub kind: ButtonKind,
    /// Display label on Stradella buttons (`C`, `Cm`, `C7`, `Cdim`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Compound chord-index key: spelled root plus quality. Serializes as the
/// composite string `root_type` (`C#_major`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChordKey {
    pub root: PitchName,
    pub chord_type: ChordType,
}

impl ChordKey {
    pub fn new(root: PitchName, chord_type: ChordType) -> Self {
        ChordKey { root, chord_type }
    }

    /// The same key spelled with the enharmonic root, when one exists.
    pub fn enharmonic(&self) -> Option<ChordKey> {
        self.root.enharmonic().map(|root| ChordKey {
            root,
            chord_type: self.chord_type,
        })
    }
}

impl fmt::Display for ChordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.root, self.chord_type)
    }
}

impl FromStr for ChordKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (root, chord_type) = s
            .split_once('_')
            .ok_or_else(|| format!("chord key must be root_type: {s}"))?;
        Ok(ChordKey {
            root: root.parse()?,
            chord_type: chord_type.parse()?,
        })
    }
}

impl Serialize for ChordKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ChordKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Rendering geometry for a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geometry {
    pub button_radius: u32,
    pub row_spacing: u32,
    pub column_spacing: u32,
    pub staggered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stagger_offset: Option<u32>,
}

/// A fully generated keyboard: buttons plus the read-only lookup indices.
///
/// Generation is a pure function of the request; a layout is never mutated
/// after it is returned, so it is safe to share across threads and jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub system: SystemType,
    pub rows: u32,
    pub columns: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_midi: Option<u8>,
    /// Row-major generation order.
    pub buttons: Vec<Button>,
    /// midi → candidate positions, preserving generation order. Chromatic
    /// boards intentionally index the same midi at several positions.
    pub note_index: BTreeMap<u8, Vec<Position>>,
    /// `(root, quality)` → chord-row position. Stradella only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chord_index: Option<BTreeMap<ChordKey, Position>>,
    pub geometry: Geometry,
    /// Column roots in board order. Stradella only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circle_of_fifths: Option<Vec<PitchName>>,
}

impl Layout {
    /// All candidate positions for a midi note, in generation order.
    /// Empty when the note is off the board.
    pub fn positions_for(&self, midi: u8) -> &[Position] {
        self.note_index.get(&midi).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// A layout request as it arrives from the outside: chromatic systems need
/// rows/columns/startMidi, Stradella needs columns (fifth start optional).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    pub system_type: SystemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_midi: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_fifth_index: Option<usize>,
}

/// One sounding treble pitch. Chords arrive pre-expanded, one event per
/// pitch, time-ordered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteEvent {
    pub measure: u32,
    pub beat: f64,
    pub duration: f64,
    pub midi: u8,
}

/// Simultaneous bass pitches without chord identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BassNotes {
    pub measure: u32,
    pub beat: f64,
    pub duration: f64,
    pub midi: Vec<u8>,
}

/// A recognized chord with root and quality resolved by the notation parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BassChord {
    pub measure: u32,
    pub beat: f64,
    pub duration: f64,
    #[serde(default)]
    pub midi: Vec<u8>,
    pub root: PitchName,
    #[serde(default)]
    pub chord_type: ChordType,
}

/// A left-hand event, discriminated at the boundary rather than deep inside
/// the mapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "eventType", rename_all = "snake_case")]
pub enum BassEvent {
    SingleNote(BassNotes),
    Chord(BassChord),
}

impl BassEvent {
    pub fn midis(&self) -> &[u8] {
        match self {
            BassEvent::SingleNote(n) => &n.midi,
            BassEvent::Chord(c) => &c.midi,
        }
    }
}

/// A treble event with its candidates and the ergonomic pick. Only emitted
/// for events that resolved; out-of-range events are dropped with a warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedNoteEvent {
    #[serde(flatten)]
    pub event: NoteEvent,
    pub button_positions: Vec<Position>,
    pub selected_position: Position,
}

/// One resolved pitch inside a multi-note mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedNote {
    pub midi: u8,
    pub positions: Vec<Position>,
    pub selected: Position,
}

/// A bass event with its mapping outcome. Free-bass fills `mapped_notes`;
/// Stradella fills `button_position`. A miss is data, not an error value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedBassEvent {
    #[serde(flatten)]
    pub event: BassEvent,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mapped_notes: Vec<MappedNote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_position: Option<Position>,
    pub mapping_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Completeness statistics over a mapped sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingReport {
    pub total_events: usize,
    pub mapped_events: usize,
    pub unmapped_events: usize,
    /// Percentage 0–100. Zero for an empty sequence.
    pub success_rate: f64,
    pub valid: bool,
}

/// Stradella chord-button usage statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordUsage {
    pub total_chords: usize,
    pub unique_chords: usize,
    /// Top ten `(chord, count)` pairs by descending frequency.
    pub most_common: Vec<(ChordKey, usize)>,
    pub chord_counts: BTreeMap<ChordKey, usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn system_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&SystemType::FreebassC).unwrap(),
            "\"freebass-c\""
        );
        assert_eq!(
            serde_json::from_str::<SystemType>("\"b-system\"").unwrap(),
            SystemType::BSystem
        );
    }

    #[test]
    fn chord_key_composite_string() {
        let key = ChordKey::new(PitchName::CSharp, ChordType::Minor);
        assert_eq!(key.to_string(), "C#_minor");
        assert_eq!("C#_minor".parse::<ChordKey>().unwrap(), key);
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"C#_minor\"");
    }

    #[test]
    fn bass_event_tagged_round_trip() {
        let json = r#"{"eventType":"chord","measure":2,"beat":1.0,"duration":2.0,"root":"Bb","chordType":"seventh"}"#;
        let event: BassEvent = serde_json::from_str(json).unwrap();
        match &event {
            BassEvent::Chord(c) => {
                assert_eq!(c.root, PitchName::BFlat);
                assert_eq!(c.chord_type, ChordType::Seventh);
                assert!(c.midi.is_empty());
            }
            other => panic!("expected chord, got {other:?}"),
        }
        let back = serde_json::to_string(&event).unwrap();
        assert!(back.contains("\"eventType\":\"chord\""));
    }

    #[test]
    fn chord_type_defaults_to_major() {
        let json = r#"{"eventType":"chord","measure":1,"beat":1.0,"duration":1.0,"root":"C"}"#;
        let event: BassEvent = serde_json::from_str(json).unwrap();
        match event {
            BassEvent::Chord(c) => assert_eq!(c.chord_type, ChordType::Major),
            other => panic!("expected chord, got {other:?}"),
        }
    }

    #[test]
    fn chord_event_missing_root_rejected_at_boundary() {
        let json = r#"{"eventType":"chord","measure":1,"beat":1.0,"duration":1.0}"#;
        assert!(serde_json::from_str::<BassEvent>(json).is_err());
    }

    #[test]
    fn position_distance() {
        let a = Position::new(2, 3);
        let b = Position::new(5, 7);
        assert_eq!(a.distance_to(b), 5.0);
        assert_eq!(a.distance_to(a), 0.0);
    }
}
