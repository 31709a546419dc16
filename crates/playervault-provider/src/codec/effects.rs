//! Status effect conversions.
//!
//! Durations persist as integer nanoseconds. A zero duration is an instant
//! effect and stays instant on decode. A non-zero duration on an effect type
//! that cannot last is dropped rather than coerced.

use std::time::Duration;

use playervault_types::EffectRecord;

use super::DecodeIssue;
use crate::catalog::Catalog;
use crate::live::Effect;

/// Convert a live effect to its record.
pub fn effect_to_record(effect: &Effect) -> EffectRecord {
    EffectRecord {
        id: effect.kind.id,
        amplifier: effect.amplifier,
        duration: i64::try_from(effect.duration.as_nanos()).unwrap_or(i64::MAX),
        ambient: effect.ambient,
        show_particles: effect.show_particles,
    }
}

/// Decode an effect record, or `None` if it cannot be restored.
pub fn effect_from_record(
    record: &EffectRecord,
    catalog: &dyn Catalog,
    issues: &mut Vec<DecodeIssue>,
) -> Option<Effect> {
    let Some(kind) = catalog.effect(record.id) else {
        issues.push(DecodeIssue::UnknownEffect { id: record.id });
        return None;
    };

    // Negative durations only come from hand-edited files; treat them as instant.
    let nanos = u64::try_from(record.duration).unwrap_or(0);
    let effect = if nanos == 0 {
        Effect::instant(kind, record.amplifier)
    } else if kind.lasting {
        Effect::lasting(kind, record.amplifier, Duration::from_nanos(nanos))
    } else {
        issues.push(DecodeIssue::NonLastingEffect { id: record.id });
        return None;
    };

    Some(Effect {
        ambient: record.ambient,
        show_particles: record.show_particles,
        ..effect
    })
}

/// Convert effects to records, preserving order.
pub fn effects_to_records(effects: &[Effect]) -> Vec<EffectRecord> {
    effects.iter().map(effect_to_record).collect()
}

/// Decode effect records, skipping any that cannot be restored.
pub fn effects_from_records(
    records: &[EffectRecord],
    catalog: &dyn Catalog,
    issues: &mut Vec<DecodeIssue>,
) -> Vec<Effect> {
    records
        .iter()
        .filter_map(|r| effect_from_record(r, catalog, issues))
        .collect()
}
