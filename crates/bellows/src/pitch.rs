//! Pitch spelling, colors, and the fixed reference tables.
//!
//! Everything here is a process-wide constant table or a pure function over
//! one: sharp-spelled note names, the sharp/flat enharmonic spellings, the
//! pitch-class color wheel, and the 15-entry circle-of-fifths sequence that
//! Stradella boards follow.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Color;

/// Sharp-spelled note names indexed by pitch class (C = 0).
pub const NOTE_NAMES_SHARP: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Button color per pitch class (C = 0). Naturals get distinct hues,
/// accidentals share the dark shade.
const PITCH_CLASS_COLORS: [Color; 12] = [
    Color::White,  // C
    Color::Dark,   // C#/Db
    Color::Blue,   // D
    Color::Dark,   // D#/Eb
    Color::Green,  // E
    Color::Yellow, // F
    Color::Orange, // F#/Gb
    Color::Red,    // G
    Color::Gray,   // G#/Ab
    Color::Purple, // A
    Color::Purple, // A#/Bb
    Color::Teal,   // B
];

/// Alternate spellings for button enharmonic lists. The first five pairs are
/// the sharp/flat swaps; the rest are the theoretical spellings (Fb, Cb, B#,
/// E#) that only ever appear as alternates, never as primary names.
const ENHARMONIC_SPELLINGS: [(&str, &str); 9] = [
    ("C#", "Db"),
    ("D#", "Eb"),
    ("F#", "Gb"),
    ("G#", "Ab"),
    ("A#", "Bb"),
    ("E", "Fb"),
    ("B", "Cb"),
    ("C", "B#"),
    ("F", "E#"),
];

/// A spelled pitch name: the 7 naturals plus the 5 sharp and 5 flat
/// spellings the reference tables use. Closed, so chord keys are exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PitchName {
    C,
    #[serde(rename = "C#")]
    CSharp,
    #[serde(rename = "Db")]
    DFlat,
    D,
    #[serde(rename = "D#")]
    DSharp,
    #[serde(rename = "Eb")]
    EFlat,
    E,
    F,
    #[serde(rename = "F#")]
    FSharp,
    #[serde(rename = "Gb")]
    GFlat,
    G,
    #[serde(rename = "G#")]
    GSharp,
    #[serde(rename = "Ab")]
    AFlat,
    A,
    #[serde(rename = "A#")]
    ASharp,
    #[serde(rename = "Bb")]
    BFlat,
    B,
}

impl PitchName {
    pub fn as_str(&self) -> &'static str {
        match self {
            PitchName::C => "C",
            PitchName::CSharp => "C#",
            PitchName::DFlat => "Db",
            PitchName::D => "D",
            PitchName::DSharp => "D#",
            PitchName::EFlat => "Eb",
            PitchName::E => "E",
            PitchName::F => "F",
            PitchName::FSharp => "F#",
            PitchName::GFlat => "Gb",
            PitchName::G => "G",
            PitchName::GSharp => "G#",
            PitchName::AFlat => "Ab",
            PitchName::A => "A",
            PitchName::ASharp => "A#",
            PitchName::BFlat => "Bb",
            PitchName::B => "B",
        }
    }

    /// Pitch class 0–11 (C = 0). Enharmonic spellings share a class.
    pub fn pitch_class(&self) -> u8 {
        match self {
            PitchName::C => 0,
            PitchName::CSharp | PitchName::DFlat => 1,
            PitchName::D => 2,
            PitchName::DSharp | PitchName::EFlat => 3,
            PitchName::E => 4,
            PitchName::F => 5,
            PitchName::FSharp | PitchName::GFlat => 6,
            PitchName::G => 7,
            PitchName::GSharp | PitchName::AFlat => 8,
            PitchName::A => 9,
            PitchName::ASharp | PitchName::BFlat => 10,
            PitchName::B => 11,
        }
    }

    /// The sharp/flat swap for the five accidental pairs
    /// (C#/Db, D#/Eb, F#/Gb, G#/Ab, A#/Bb). Naturals have no swap.
    pub fn enharmonic(&self) -> Option<PitchName> {
        match self {
            PitchName::CSharp => Some(PitchName::DFlat),
            PitchName::DFlat => Some(PitchName::CSharp),
            PitchName::DSharp => Some(PitchName::EFlat),
            PitchName::EFlat => Some(PitchName::DSharp),
            PitchName::FSharp => Some(PitchName::GFlat),
            PitchName::GFlat => Some(PitchName::FSharp),
            PitchName::GSharp => Some(PitchName::AFlat),
            PitchName::AFlat => Some(PitchName::GSharp),
            PitchName::ASharp => Some(PitchName::BFlat),
            PitchName::BFlat => Some(PitchName::ASharp),
            _ => None,
        }
    }
}

impl fmt::Display for PitchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PitchName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use PitchName::*;
        Ok(match s {
            "C" => C,
            "C#" => CSharp,
            "Db" => DFlat,
            "D" => D,
            "D#" => DSharp,
            "Eb" => EFlat,
            "E" => E,
            "F" => F,
            "F#" => FSharp,
            "Gb" => GFlat,
            "G" => G,
            "G#" => GSharp,
            "Ab" => AFlat,
            "A" => A,
            "A#" => ASharp,
            "Bb" => BFlat,
            "B" => B,
            other => return Err(format!("unknown pitch name: {other}")),
        })
    }
}

/// Circle of fifths as spelled on a Stradella board, ascending by perfect
/// fifth from Ab. 15 entries: the top of the sequence respells the bottom
/// (G# = Ab, D# = Eb, A# = Bb).
pub const CIRCLE_OF_FIFTHS: [PitchName; 15] = [
    PitchName::AFlat,
    PitchName::EFlat,
    PitchName::BFlat,
    PitchName::F,
    PitchName::C,
    PitchName::G,
    PitchName::D,
    PitchName::A,
    PitchName::E,
    PitchName::B,
    PitchName::FSharp,
    PitchName::CSharp,
    PitchName::GSharp,
    PitchName::DSharp,
    PitchName::ASharp,
];

/// Root bass midi for a circle-of-fifths entry, anchored in octave 2
/// (C2 = 36). Enharmonic spellings alias to the same midi.
pub fn fifth_root_midi(root: PitchName) -> u8 {
    36 + root.pitch_class()
}

/// Format a midi note as a sharp-spelled name with octave, e.g. `C4`, `F#3`.
pub fn midi_to_note_name(midi: u8) -> String {
    let octave = (midi / 12) as i8 - 1;
    let name = NOTE_NAMES_SHARP[(midi % 12) as usize];
    format!("{name}{octave}")
}

/// Strip the octave suffix from a note name: `F#3` → `F#`, `C-1` → `C`.
pub fn note_base(name: &str) -> &str {
    name.trim_end_matches(|c: char| c.is_ascii_digit() || c == '-')
}

/// Alternate spelling for a base note name, if the reference table has one.
pub fn enharmonic_spelling(base: &str) -> Option<&'static str> {
    ENHARMONIC_SPELLINGS
        .iter()
        .find(|(primary, _)| *primary == base)
        .map(|(_, alt)| *alt)
}

/// Pitch class for a base note name, resolving alternate spellings through
/// the enharmonic table. `None` if the name is not recognized.
fn pitch_class_of_base(base: &str) -> Option<u8> {
    if let Some(idx) = NOTE_NAMES_SHARP.iter().position(|n| *n == base) {
        return Some(idx as u8);
    }
    ENHARMONIC_SPELLINGS
        .iter()
        .find(|(_, alt)| *alt == base)
        .and_then(|(primary, _)| NOTE_NAMES_SHARP.iter().position(|n| n == primary))
        .map(|idx| idx as u8)
}

/// Button color for a base note name. Unrecognized names fall back to white.
pub fn color_for(base: &str) -> Color {
    match pitch_class_of_base(base) {
        Some(pc) => PITCH_CLASS_COLORS[pc as usize],
        None => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn note_name_formatting() {
        assert_eq!(midi_to_note_name(60), "C4");
        assert_eq!(midi_to_note_name(48), "C3");
        assert_eq!(midi_to_note_name(66), "F#4");
        assert_eq!(midi_to_note_name(0), "C-1");
    }

    #[test]
    fn note_base_strips_octave() {
        assert_eq!(note_base("F#3"), "F#");
        assert_eq!(note_base("C-1"), "C");
        assert_eq!(note_base("Bb2"), "Bb");
    }

    #[test]
    fn enharmonic_pairs_swap_both_ways() {
        assert_eq!(PitchName::CSharp.enharmonic(), Some(PitchName::DFlat));
        assert_eq!(PitchName::DFlat.enharmonic(), Some(PitchName::CSharp));
        assert_eq!(PitchName::C.enharmonic(), None);
    }

    #[test]
    fn flat_spellings_resolve_to_sharp_pitch_class() {
        assert_eq!(pitch_class_of_base("Db"), Some(1));
        assert_eq!(pitch_class_of_base("Bb"), Some(10));
        assert_eq!(pitch_class_of_base("Fb"), Some(4));
        assert_eq!(pitch_class_of_base("H"), None);
    }

    #[test]
    fn colors_follow_pitch_class() {
        assert_eq!(color_for("C"), Color::White);
        assert_eq!(color_for("C#"), Color::Dark);
        assert_eq!(color_for("Db"), Color::Dark);
        assert_eq!(color_for("G"), Color::Red);
        // Unknown spelling falls back to white
        assert_eq!(color_for("X"), Color::White);
    }

    #[test]
    fn circle_of_fifths_ascends_by_fifths() {
        for pair in CIRCLE_OF_FIFTHS.windows(2) {
            let step = (pair[1].pitch_class() + 12 - pair[0].pitch_class()) % 12;
            assert_eq!(step, 7, "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn fifth_roots_live_in_octave_two() {
        assert_eq!(fifth_root_midi(PitchName::C), 36);
        assert_eq!(fifth_root_midi(PitchName::B), 47);
        // Enharmonic spellings alias to the same midi
        assert_eq!(
            fifth_root_midi(PitchName::GSharp),
            fifth_root_midi(PitchName::AFlat)
        );
    }

    #[test]
    fn pitch_name_round_trips_through_strings() {
        for name in CIRCLE_OF_FIFTHS {
            assert_eq!(name.as_str().parse::<PitchName>(), Ok(name));
        }
    }
}
