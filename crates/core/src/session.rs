//! Slider sessions: the editable state behind a strength panel.
//!
//! A session is loaded from prompt text plus the previously stored payload,
//! edited one label at a time, and encoded back into the payload shape the
//! resolver reads.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::formatter::format_pair;
use crate::payload::{StrengthSource, ORDER_KEY, PROMPTS_KEY, SOURCE_ID_KEY};
use crate::policy::StrengthPolicy;
use crate::resolver::{resolve_with_default, Resolution};
use crate::tokenizer::tokenize;

/// Labels longer than this are shortened for display.
pub const DEFAULT_MAX_LABEL_CHARS: usize = 14;

/// One slider: a label and its current strength.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderEntry {
    pub label: String,
    pub display_label: String,
    pub value: f64,
}

/// Descriptor written into `__order__`.
#[derive(Debug, Serialize)]
struct OrderDescriptor<'a> {
    id: &'a str,
    label: &'a str,
    #[serde(rename = "displayLabel")]
    display_label: &'a str,
    value: f64,
}

/// Editable slider state for one prompt list.
#[derive(Debug, Clone)]
pub struct Session {
    policy: StrengthPolicy,
    max_label_chars: usize,
    entries: Vec<SliderEntry>,
    source_id: Option<i64>,
}

impl Session {
    /// An empty session.
    pub fn new(policy: StrengthPolicy, max_label_chars: usize) -> Self {
        Self {
            policy,
            max_label_chars,
            entries: Vec::new(),
            source_id: None,
        }
    }

    /// Load sliders for `prompts`, seeding values from a stored payload.
    ///
    /// Labels come from the prompt text. When the text has none, the
    /// payload's own discovered labels are used instead.
    pub fn load(
        prompts: &str,
        strengths_json: &str,
        policy: StrengthPolicy,
        max_label_chars: usize,
    ) -> Self {
        let resolution = resolve_with_default(strengths_json, policy.default);
        let mut labels = tokenize(prompts);
        if labels.is_empty() && !resolution.labels.is_empty() {
            tracing::debug!(
                count = resolution.labels.len(),
                "No prompt text, restoring labels from payload"
            );
            labels = dedup(resolution.labels.clone());
        }

        let entries = labels
            .into_iter()
            .map(|label| {
                let value = initial_value(&resolution, &label, &policy);
                SliderEntry {
                    display_label: display_label(&label, max_label_chars),
                    label,
                    value,
                }
            })
            .collect();

        Self {
            policy,
            max_label_chars,
            entries,
            source_id: resolution.source_id,
        }
    }

    pub fn entries(&self) -> &[SliderEntry] {
        &self.entries
    }

    pub fn policy(&self) -> &StrengthPolicy {
        &self.policy
    }

    pub fn max_label_chars(&self) -> usize {
        self.max_label_chars
    }

    pub fn source_id(&self) -> Option<i64> {
        self.source_id
    }

    pub fn set_source_id(&mut self, source_id: Option<i64>) {
        self.source_id = source_id;
    }

    /// Set one label's strength. The stored value is quantized to the
    /// policy step and returned.
    pub fn set(&mut self, label: &str, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(Error::InvalidStrength {
                label: label.to_owned(),
                value,
            });
        }
        let policy = self.policy;
        let entry = self
            .entries
            .iter_mut()
            .find(|entry| entry.label == label)
            .ok_or_else(|| Error::UnknownLabel(label.to_owned()))?;
        entry.value = policy.quantize(value);
        Ok(entry.value)
    }

    /// Put every slider back to the default strength.
    pub fn reset(&mut self) {
        let default = self.policy.default;
        for entry in &mut self.entries {
            entry.value = default;
        }
    }

    /// Render the current sliders as a `(label:value)` list.
    pub fn format(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format_pair(&entry.label, entry.value, &self.policy))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Encode the sliders as a strength payload.
    ///
    /// Each value is written under both its label and its position, with
    /// `__order__` descriptors and a `__prompts__` list alongside.
    pub fn encode(&self) -> Result<String> {
        let mut payload = Map::new();
        let mut descriptors = Vec::with_capacity(self.entries.len());
        let mut prompts = Vec::with_capacity(self.entries.len());

        for (index, entry) in self.entries.iter().enumerate() {
            let value = self.policy.quantize(entry.value);
            if !value.is_finite() {
                return Err(Error::InvalidStrength {
                    label: entry.label.clone(),
                    value,
                });
            }
            payload.insert(index.to_string(), Value::from(value));
            payload.insert(entry.label.clone(), Value::from(value));
            descriptors.push(OrderDescriptor {
                id: &entry.label,
                label: &entry.label,
                display_label: &entry.display_label,
                value,
            });
            prompts.push(entry.label.as_str());
        }

        payload.insert(ORDER_KEY.into(), serde_json::to_value(&descriptors)?);
        payload.insert(PROMPTS_KEY.into(), serde_json::to_value(&prompts)?);
        if let Some(source_id) = self.source_id {
            payload.insert(SOURCE_ID_KEY.into(), Value::from(source_id));
        }

        Ok(serde_json::to_string(&Value::Object(payload))?)
    }
}

/// Shorten `label` to at most `max_chars` characters, ending in `…`.
pub fn display_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_owned();
    }
    let mut short: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    short.push('…');
    short
}

/// A `label=value` strength assignment, as typed on a command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub label: String,
    pub value: f64,
}

impl std::str::FromStr for Assignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (label, value) = s
            .rsplit_once('=')
            .ok_or_else(|| Error::InvalidAssignment(s.to_owned()))?;
        let label = label.trim();
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| Error::InvalidAssignment(s.to_owned()))?;
        if label.is_empty() {
            return Err(Error::InvalidAssignment(s.to_owned()));
        }
        Ok(Self {
            label: label.to_owned(),
            value,
        })
    }
}

/// Stored value for a label: its resolved strength, else the value its
/// `__order__` descriptor carries, else the default.
fn initial_value(resolution: &Resolution, label: &str, policy: &StrengthPolicy) -> f64 {
    let stored = match resolution.source_of(label) {
        Some(StrengthSource::Direct | StrengthSource::Positional) => {
            resolution.strengths.get(label).copied()
        }
        _ => None,
    };
    let value = stored
        .or_else(|| resolution.descriptor_values.get(label).copied())
        .unwrap_or(policy.default);
    policy.clamp(value)
}

fn dedup(labels: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        if !out.contains(&label) {
            out.push(label);
        }
    }
    out
}
