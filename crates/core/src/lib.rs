//! # promptslider core
//!
//! Turns a comma/newline separated prompt list plus an optional strength
//! payload into a weighted prompt string:
//!
//! ```text
//! prompts:        "cat, dog"
//! strengths_json: {"cat": 1.5, "dog": 7}
//! output:         (cat:1.5),(dog:2.0)
//! ```
//!
//! The pipeline is pure and total. Unusable payloads and unparseable
//! values degrade to the default strength instead of failing, so
//! [`apply_strengths`] always returns a string.

pub mod error;
pub mod formatter;
pub mod payload;
pub mod policy;
pub mod resolver;
pub mod session;
pub mod tokenizer;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use formatter::{format_pair, format_strengths};
pub use payload::{Discovery, Payload, StrengthSource};
pub use policy::{StrengthPolicy, MAX_PRECISION};
pub use resolver::{
    resolve, resolve_with_default, Resolution, ResolvedStrength, StrengthMap, DEFAULT_STRENGTH,
};
pub use session::{display_label, Assignment, Session, SliderEntry, DEFAULT_MAX_LABEL_CHARS};
pub use tokenizer::tokenize;

/// Annotate every label in `prompts` with its strength from
/// `strengths_json`, using the default policy.
///
/// Output order and label set come from `prompts`; the payload only
/// supplies values.
pub fn apply_strengths(prompts: &str, strengths_json: &str) -> String {
    apply_strengths_with(&StrengthPolicy::default(), prompts, strengths_json)
}

/// [`apply_strengths`] under a custom [`StrengthPolicy`].
pub fn apply_strengths_with(policy: &StrengthPolicy, prompts: &str, strengths_json: &str) -> String {
    let labels = tokenize(prompts);
    let resolution = resolve_with_default(strengths_json, policy.default);
    if resolution.is_unusable() && !strengths_json.is_empty() {
        tracing::debug!("Strength payload unusable, all prompts use the default strength");
    }
    format_strengths(&labels, &resolution.strengths, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_strengths_without_payload() {
        assert_eq!(apply_strengths("x,y", ""), "(x:1.0),(y:1.0)");
    }

    #[test]
    fn both_inputs_empty_yields_empty_string() {
        assert_eq!(apply_strengths("", ""), "");
    }

    #[test]
    fn clamps_payload_values() {
        let payload = json!({"x": 5, "y": -3}).to_string();
        assert_eq!(apply_strengths("x,y", &payload), "(x:2.0),(y:0.0)");
    }

    #[test]
    fn prompt_text_order_wins_over_payload_order() {
        let payload = json!({"__prompts__": ["b", "a"], "a": 1.5, "b": 0.2}).to_string();
        assert_eq!(apply_strengths("a,b", &payload), "(a:1.5),(b:0.2)");
    }

    #[test]
    fn malformed_payload_behaves_like_empty() {
        assert_eq!(
            apply_strengths("a, b", "{bad"),
            apply_strengths("a, b", "")
        );
    }

    #[test]
    fn payload_only_labels_are_not_emitted() {
        let payload = json!({"ghost": 0.3, "a": 1.2}).to_string();
        assert_eq!(apply_strengths("a", &payload), "(a:1.2)");
    }

    #[test]
    fn positional_values_reach_output_through_discovered_labels() {
        let payload = json!({
            "__order__": [{"id": "p0"}, {"id": "p1"}],
            "0": 1.2,
            "1": 0.4
        })
        .to_string();
        assert_eq!(apply_strengths("p1\np0", &payload), "(p1:0.4),(p0:1.2)");
    }

    #[test]
    fn null_prompt_entries_keep_positions_aligned() {
        let payload = r#"{"__prompts__": [null, "b"], "0": 0.3, "1": 0.7}"#;
        assert_eq!(apply_strengths("b", payload), "(b:0.7)");
    }

    #[test]
    fn out_of_range_literals_clamp_instead_of_discarding_payload() {
        let payload = r#"{"a": 1e400, "b": 0.3, "c": -1e400}"#;
        assert_eq!(apply_strengths("a,b,c", payload), "(a:2.0),(b:0.3),(c:0.0)");
    }

    #[test]
    fn oversized_precision_does_not_panic() {
        let policy = StrengthPolicy {
            precision: 70_000,
            ..StrengthPolicy::default()
        };
        let out = apply_strengths_with(&policy, "a", "");
        assert!(out.starts_with("(a:1.0"));
        assert!(out.ends_with(')'));
    }

    #[test]
    fn duplicate_prompts_render_once() {
        assert_eq!(apply_strengths("a, a, b,a", ""), "(a:1.0),(b:1.0)");
    }

    #[test]
    fn custom_policy_is_honoured() {
        let policy = StrengthPolicy {
            max: 1.5,
            default: 0.5,
            precision: 2,
            ..StrengthPolicy::default()
        };
        let payload = json!({"a": 3, "b": "??"}).to_string();
        assert_eq!(
            apply_strengths_with(&policy, "a,b,c", &payload),
            "(a:1.50),(b:0.50),(c:0.50)"
        );
    }
}
