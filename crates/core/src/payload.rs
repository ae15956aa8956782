//! Strength payload parsing and label discovery.
//!
//! The payload is an ad hoc JSON object written by slider UIs. It can carry
//! strengths in several overlapping shapes:
//!
//! ```text
//! {
//!   "__prompts__": ["cat", "dog"],                    // explicit order
//!   "__order__": [{"id": "cat", "label": "cat", ...}],  // descriptor order
//!   "__source_id__": 12,                               // originating node
//!   "cat": 1.5,                                        // direct strength
//!   "0": 1.5                                           // positional strength
//! }
//! ```
//!
//! Discovery tries `__prompts__`, then `__order__`, then falls back to the
//! sorted non-reserved, non-numeric keys.

use serde_json::{Map, Number, Value};

/// Key holding the explicit label list.
pub const PROMPTS_KEY: &str = "__prompts__";
/// Key holding the list of label descriptors.
pub const ORDER_KEY: &str = "__order__";
/// Key holding the id of the node the prompts came from.
pub const SOURCE_ID_KEY: &str = "__source_id__";
/// Prefix shared by every reserved key.
pub const RESERVED_PREFIX: &str = "__";

/// Descriptor fields tried in order when naming an `__order__` entry.
const DESCRIPTOR_NAME_FIELDS: [&str; 3] = ["id", "label", "displayLabel"];

/// Which payload shape produced the discovered label list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discovery {
    /// `__prompts__` list.
    Prompts,
    /// `__order__` descriptor list.
    Order,
    /// Sorted top-level keys.
    Keys,
}

impl Discovery {
    pub fn as_str(&self) -> &'static str {
        match self {
            Discovery::Prompts => "prompts",
            Discovery::Order => "order",
            Discovery::Keys => "keys",
        }
    }
}

impl std::fmt::Display for Discovery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed strength payload (always a JSON object).
#[derive(Debug, Clone, Default)]
pub struct Payload {
    fields: Map<String, Value>,
}

impl Payload {
    /// Parse a payload. Returns `None` for empty, malformed, or non-object
    /// input; callers treat that as "no strengths available".
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(fields)) => Some(Self { fields }),
            Ok(other) => {
                tracing::debug!(kind = json_kind(&other), "Strength payload is not an object, ignoring");
                None
            }
            Err(e) => {
                tracing::debug!(error = %e, "Strength payload is not valid JSON, ignoring");
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Discover the payload's own label order.
    ///
    /// Metadata (`__prompts__`, else `__order__`) wins when it yields at
    /// least one label; otherwise the sorted key fallback is used.
    pub fn discover(&self) -> (Discovery, Vec<String>) {
        let from_metadata = if let Some(items) = self.get(PROMPTS_KEY).and_then(Value::as_array) {
            Some((Discovery::Prompts, prompt_labels(items)))
        } else {
            self.get(ORDER_KEY)
                .and_then(Value::as_array)
                .map(|items| (Discovery::Order, descriptor_labels(items)))
        };

        match from_metadata {
            Some((discovery, labels)) if !labels.is_empty() => (discovery, labels),
            _ => (Discovery::Keys, self.key_labels()),
        }
    }

    /// Non-reserved, non-positional keys in lexicographic order.
    fn key_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .fields
            .keys()
            .filter(|key| !key.starts_with(RESERVED_PREFIX) && !is_positional(key))
            .cloned()
            .collect();
        labels.sort();
        labels
    }

    /// Look up the raw strength for `label`, falling back to the
    /// positional key `index` when the label key is absent or null.
    pub fn raw_strength(&self, label: &str, index: usize) -> Option<(&Value, StrengthSource)> {
        match self.get(label) {
            Some(value) if !value.is_null() => Some((value, StrengthSource::Direct)),
            _ => self
                .get(&index.to_string())
                .filter(|value| !value.is_null())
                .map(|value| (value, StrengthSource::Positional)),
        }
    }

    /// Numeric `value` fields carried by `__order__` descriptors, by name.
    pub fn descriptor_values(&self) -> Vec<(String, f64)> {
        let Some(items) = self.get(ORDER_KEY).and_then(Value::as_array) else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(Value::as_object)
            .filter_map(|entry| {
                let name = descriptor_name(entry)?;
                let value = entry.get("value").and_then(Value::as_f64)?;
                Some((name, value))
            })
            .collect()
    }

    /// The originating node id, when present as a finite number.
    pub fn source_id(&self) -> Option<i64> {
        let value = self.get(SOURCE_ID_KEY)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
    }
}

/// Where a resolved strength was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthSource {
    /// The label's own key.
    Direct,
    /// The positional key matching the label's index.
    Positional,
    /// Nothing usable was found; the default applies.
    Default,
}

/// Coerce a JSON value to a strength. Numbers pass through, booleans map
/// to `1.0`/`0.0`, and strings are parsed after trimming.
///
/// Literals beyond `f64` range (`1e400`) come back infinite rather than
/// failing, so they clamp like any other out-of-range value.
pub fn coerce_strength(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => number_value(n),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// `Number::as_f64` refuses non-finite results, so fall back to the
/// literal's own text for `1e400` and friends.
fn number_value(n: &Number) -> Option<f64> {
    n.as_f64().or_else(|| n.to_string().parse::<f64>().ok())
}

/// `true` for non-empty, all-digit keys such as `"0"` or `"12"`.
///
/// Only ASCII digits count: keys like `"٣"` or `"²"` are treated as labels,
/// never as positions.
pub fn is_positional(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_digit())
}

fn prompt_labels(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .map(value_text)
        .map(|text| text.trim().to_owned())
        .filter(|label| !label.is_empty())
        .collect()
}

fn descriptor_labels(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(descriptor_name)
        .collect()
}

/// First truthy name field of a descriptor, trimmed; `None` if blank.
fn descriptor_name(entry: &Map<String, Value>) -> Option<String> {
    let name = DESCRIPTOR_NAME_FIELDS
        .iter()
        .filter_map(|field| entry.get(*field))
        .find(|value| is_truthy(value))?;
    let label = value_text(name).trim().to_owned();
    (!label.is_empty()).then_some(label)
}

/// Text form of a JSON value. Strings are taken verbatim; `null` and
/// booleans spell out as `None`/`True`/`False` so every list element keeps
/// its position.
fn value_text(value: &Value) -> String {
    match value {
        Value::Null => "None".to_owned(),
        Value::Bool(true) => "True".to_owned(),
        Value::Bool(false) => "False".to_owned(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => number_value(n).is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        Payload::parse(&value.to_string()).unwrap()
    }

    #[test]
    fn unusable_inputs_parse_to_none() {
        assert!(Payload::parse("").is_none());
        assert!(Payload::parse("{bad").is_none());
        assert!(Payload::parse("[1, 2]").is_none());
        assert!(Payload::parse("null").is_none());
        assert!(Payload::parse("\"text\"").is_none());
    }

    #[test]
    fn prompts_list_takes_precedence() {
        let p = payload(json!({
            "__prompts__": [" b ", "a", ""],
            "__order__": [{"id": "z"}],
            "c": 1.0
        }));
        let (discovery, labels) = p.discover();
        assert_eq!(discovery, Discovery::Prompts);
        assert_eq!(labels, vec!["b", "a"]);
    }

    #[test]
    fn prompts_list_coerces_scalars() {
        let p = payload(json!({"__prompts__": [3, null, true, false, "x"]}));
        assert_eq!(p.discover().1, vec!["3", "None", "True", "False", "x"]);
    }

    #[test]
    fn non_list_prompts_falls_through_to_order() {
        for prompts in [json!("x"), json!({}), json!(null)] {
            let p = payload(json!({
                "__prompts__": prompts,
                "__order__": [{"id": "p0"}, {"label": "p1"}],
                "zeta": 1.0
            }));
            let (discovery, labels) = p.discover();
            assert_eq!(discovery, Discovery::Order);
            assert_eq!(labels, vec!["p0", "p1"]);
        }
    }

    #[test]
    fn non_list_order_falls_through_to_keys() {
        for order in [json!("p0,p1"), json!({"id": "p0"}), json!(7)] {
            let p = payload(json!({"__order__": order, "b": 0.2, "a": 0.1, "0": 1.0}));
            let (discovery, labels) = p.discover();
            assert_eq!(discovery, Discovery::Keys);
            assert_eq!(labels, vec!["a", "b"]);
        }
    }

    #[test]
    fn unicode_digit_keys_are_labels() {
        let p = payload(json!({"٣": 0.5, "²": 0.7, "3": 1.2}));
        assert_eq!(p.discover().1, vec!["²", "٣"]);
    }

    #[test]
    fn order_descriptors_use_first_truthy_name() {
        let p = payload(json!({
            "__order__": [
                {"id": "p0", "label": "ignored"},
                {"id": "", "label": "p1"},
                {"displayLabel": " p2 "},
                {"id": null, "label": false},
                "not an object"
            ]
        }));
        let (discovery, labels) = p.discover();
        assert_eq!(discovery, Discovery::Order);
        assert_eq!(labels, vec!["p0", "p1", "p2"]);
    }

    #[test]
    fn empty_prompts_list_falls_back_to_keys_not_order() {
        let p = payload(json!({
            "__prompts__": [],
            "__order__": [{"id": "z"}],
            "b": 1.0,
            "a": 0.5
        }));
        let (discovery, labels) = p.discover();
        assert_eq!(discovery, Discovery::Keys);
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[test]
    fn key_fallback_skips_reserved_and_positional_keys() {
        let p = payload(json!({
            "zeta": 1,
            "__source_id__": 4,
            "0": 1.2,
            "12": 0.3,
            "1a": 0.9,
            "Alpha": 2
        }));
        let (discovery, labels) = p.discover();
        assert_eq!(discovery, Discovery::Keys);
        assert_eq!(labels, vec!["1a", "Alpha", "zeta"]);
    }

    #[test]
    fn raw_strength_prefers_direct_key() {
        let p = payload(json!({"a": 0.5, "0": 1.5, "b": null, "1": 0.2}));
        assert_eq!(
            p.raw_strength("a", 0),
            Some((&json!(0.5), StrengthSource::Direct))
        );
        assert_eq!(
            p.raw_strength("b", 1),
            Some((&json!(0.2), StrengthSource::Positional))
        );
        assert_eq!(p.raw_strength("c", 7), None);
    }

    #[test]
    fn coercion_handles_numbers_strings_and_bools() {
        assert_eq!(coerce_strength(&json!(1.5)), Some(1.5));
        assert_eq!(coerce_strength(&json!(2)), Some(2.0));
        assert_eq!(coerce_strength(&json!(" 0.4 ")), Some(0.4));
        assert_eq!(coerce_strength(&json!(true)), Some(1.0));
        assert_eq!(coerce_strength(&json!("heavy")), None);
        assert_eq!(coerce_strength(&json!([1])), None);
        assert_eq!(coerce_strength(&json!({"v": 1})), None);
    }

    #[test]
    fn overflowing_literals_parse_as_infinite() {
        let p = Payload::parse(r#"{"a": 1e400, "b": -1e400}"#).unwrap();
        assert_eq!(coerce_strength(p.get("a").unwrap()), Some(f64::INFINITY));
        assert_eq!(coerce_strength(p.get("b").unwrap()), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn overflowing_descriptor_id_is_truthy() {
        let p = Payload::parse(r#"{"__order__": [{"id": 1e400, "label": "fallback"}]}"#).unwrap();
        assert_eq!(p.discover().1, vec!["1e400"]);
    }

    #[test]
    fn positional_keys() {
        assert!(is_positional("0"));
        assert!(is_positional("42"));
        assert!(!is_positional(""));
        assert!(!is_positional("-1"));
        assert!(!is_positional("1.5"));
    }

    #[test]
    fn source_id_and_descriptor_values() {
        let p = payload(json!({
            "__source_id__": 17,
            "__order__": [{"id": "a", "value": 1.4}, {"id": "b", "value": "x"}]
        }));
        assert_eq!(p.source_id(), Some(17));
        assert_eq!(p.descriptor_values(), vec![("a".to_string(), 1.4)]);
    }
}
