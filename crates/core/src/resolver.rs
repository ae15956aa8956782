//! Strength resolution: payload text in, label → strength mapping out.

use std::collections::HashMap;

use crate::payload::{coerce_strength, Discovery, Payload, StrengthSource};

/// Label → strength mapping. Labels without an entry take the default.
pub type StrengthMap = HashMap<String, f64>;

/// Strength used when a label has no usable value.
pub const DEFAULT_STRENGTH: f64 = 1.0;

/// A strength resolved for one discovered label.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStrength {
    pub label: String,
    pub value: f64,
    pub source: StrengthSource,
}

/// Everything the resolver learned from a payload.
///
/// `labels` is advisory: output order always comes from the prompt text.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Which shape produced `labels`; `None` when the payload was unusable.
    pub discovery: Option<Discovery>,
    pub labels: Vec<String>,
    pub strengths: StrengthMap,
    /// Per-label detail, in discovered order.
    pub resolved: Vec<ResolvedStrength>,
    /// `value` fields carried by `__order__` descriptors.
    pub descriptor_values: HashMap<String, f64>,
    pub source_id: Option<i64>,
}

impl Resolution {
    /// `true` when the payload was empty, malformed, or not an object.
    pub fn is_unusable(&self) -> bool {
        self.discovery.is_none()
    }

    /// How `label`'s strength was found, if it was discovered at all.
    pub fn source_of(&self, label: &str) -> Option<StrengthSource> {
        self.resolved
            .iter()
            .rev()
            .find(|r| r.label == label)
            .map(|r| r.source)
    }
}

/// Resolve a raw strength payload. Never fails; unusable input yields an
/// empty resolution.
pub fn resolve(raw: &str) -> Resolution {
    resolve_with_default(raw, DEFAULT_STRENGTH)
}

/// [`resolve`] with a caller-chosen strength for uncoercible values.
pub fn resolve_with_default(raw: &str, default: f64) -> Resolution {
    let Some(payload) = Payload::parse(raw) else {
        return Resolution::default();
    };

    let (discovery, labels) = payload.discover();
    tracing::debug!(strategy = %discovery, labels = labels.len(), "Discovered payload labels");

    let mut strengths = StrengthMap::with_capacity(labels.len());
    let mut resolved = Vec::with_capacity(labels.len());
    for (index, label) in labels.iter().enumerate() {
        let (value, source) = match payload.raw_strength(label, index) {
            Some((raw_value, source)) => match coerce_strength(raw_value) {
                Some(value) => (value, source),
                None => (default, StrengthSource::Default),
            },
            None => (default, StrengthSource::Default),
        };
        tracing::trace!(label = %label, index, value, ?source, "Resolved strength");

        // A label listed twice keeps its last value.
        strengths.insert(label.clone(), value);
        resolved.push(ResolvedStrength {
            label: label.clone(),
            value,
            source,
        });
    }

    Resolution {
        discovery: Some(discovery),
        labels,
        strengths,
        resolved,
        descriptor_values: payload.descriptor_values().into_iter().collect(),
        source_id: payload.source_id(),
    }
}
