//! Named preset configurations for common accordions.

use crate::error::ConfigError;
use crate::layout;
use crate::types::{Layout, LayoutRequest, SystemType};

const fn chromatic(system_type: SystemType, rows: u32, columns: u32, start_midi: u8) -> LayoutRequest {
    LayoutRequest {
        system_type,
        rows: Some(rows),
        columns: Some(columns),
        start_midi: Some(start_midi),
        start_fifth_index: None,
    }
}

const fn stradella(columns: u32) -> LayoutRequest {
    LayoutRequest {
        system_type: SystemType::Stradella,
        rows: None,
        columns: Some(columns),
        start_midi: None,
        start_fifth_index: Some(layout::DEFAULT_FIFTH_START),
    }
}

/// Preset table. Stradella presets are named for the full bass count of the
/// instrument (120-bass = 20 columns of 6).
static PRESETS: &[(&str, LayoutRequest)] = &[
    ("c_system_5row", chromatic(SystemType::CSystem, 5, 12, 48)),
    ("c_system_4row", chromatic(SystemType::CSystem, 4, 12, 48)),
    ("c_system_3row", chromatic(SystemType::CSystem, 3, 11, 48)),
    ("b_system_5row", chromatic(SystemType::BSystem, 5, 12, 47)),
    ("b_system_4row", chromatic(SystemType::BSystem, 4, 12, 47)),
    ("b_system_3row", chromatic(SystemType::BSystem, 3, 11, 47)),
    ("freebass_c_5row", chromatic(SystemType::FreebassC, 5, 12, 36)),
    ("freebass_b_5row", chromatic(SystemType::FreebassB, 5, 12, 35)),
    ("stradella_120", stradella(20)),
    ("stradella_96", stradella(16)),
    ("stradella_72", stradella(12)),
    ("stradella_48", stradella(8)),
];

/// Look up a preset request by name.
pub fn preset(name: &str) -> Result<&'static LayoutRequest, ConfigError> {
    PRESETS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, request)| request)
        .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))
}

/// Generate a layout from a preset name.
pub fn preset_layout(name: &str) -> Result<Layout, ConfigError> {
    layout::generate(preset(name)?)
}

/// All preset names, in table order.
pub fn preset_names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_preset_generates() {
        for name in preset_names() {
            let layout = preset_layout(name).unwrap_or_else(|e| panic!("{name}: {e}"));
            assert!(!layout.buttons.is_empty(), "{name}");
        }
    }

    #[test]
    fn preset_shapes() {
        let treble = preset_layout("c_system_5row").unwrap();
        assert_eq!(treble.system, SystemType::CSystem);
        assert_eq!((treble.rows, treble.columns), (5, 12));
        assert_eq!(treble.start_midi, Some(48));

        let bass = preset_layout("stradella_120").unwrap();
        assert_eq!(bass.system, SystemType::Stradella);
        assert_eq!(bass.columns, 20);
        assert_eq!(bass.buttons.len(), 120);
    }

    #[test]
    fn unknown_preset_rejected() {
        assert_eq!(
            preset_layout("piano_88"),
            Err(ConfigError::UnknownPreset("piano_88".to_string()))
        );
    }
}
