//! Mapping completeness statistics, shared by both mappers.

use tracing::warn;

use crate::types::{MappedBassEvent, MappedNoteEvent, MappingReport};

/// A record that knows whether its mapping resolved.
pub trait Mapped {
    fn is_complete(&self) -> bool;
}

impl Mapped for MappedNoteEvent {
    // Treble mapping drops unresolvable events instead of emitting them,
    // so every emitted record carries a selected position.
    fn is_complete(&self) -> bool {
        true
    }
}

impl Mapped for MappedBassEvent {
    fn is_complete(&self) -> bool {
        self.mapping_complete
    }
}

/// Summarize a mapped sequence. An empty sequence reports a zero success
/// rate and is not considered valid.
pub fn validate_mapping<T: Mapped>(mapped: &[T]) -> MappingReport {
    let total_events = mapped.len();
    let mapped_events = mapped.iter().filter(|e| e.is_complete()).count();
    let success_rate = if total_events > 0 {
        mapped_events as f64 / total_events as f64 * 100.0
    } else {
        0.0
    };
    let valid = total_events > 0 && mapped_events == total_events;

    if !valid {
        warn!(
            mapped = mapped_events,
            total = total_events,
            success_rate,
            "mapping incomplete"
        );
    }

    MappingReport {
        total_events,
        mapped_events,
        unmapped_events: total_events - mapped_events,
        success_rate,
        valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Fake(bool);

    impl Mapped for Fake {
        fn is_complete(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn empty_sequence_is_invalid_without_division_error() {
        let report = validate_mapping::<Fake>(&[]);
        assert_eq!(report.total_events, 0);
        assert_eq!(report.success_rate, 0.0);
        assert!(!report.valid);
    }

    #[test]
    fn all_unmapped() {
        let report = validate_mapping(&[Fake(false), Fake(false)]);
        assert_eq!(report.success_rate, 0.0);
        assert_eq!(report.unmapped_events, 2);
        assert!(!report.valid);
    }

    #[test]
    fn all_mapped() {
        let report = validate_mapping(&[Fake(true), Fake(true), Fake(true)]);
        assert_eq!(report.success_rate, 100.0);
        assert_eq!(report.unmapped_events, 0);
        assert!(report.valid);
    }

    #[test]
    fn partial_mapping_rate() {
        let report = validate_mapping(&[Fake(true), Fake(false), Fake(true), Fake(true)]);
        assert_eq!(report.mapped_events, 3);
        assert_eq!(report.success_rate, 75.0);
        assert!(!report.valid);
    }
}
