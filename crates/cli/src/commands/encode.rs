//! `promptslider encode` — Build the strength payload for a prompt list.

use std::path::Path;

use promptslider_config::SliderConfig;
use promptslider_core::{Assignment, Session};

use super::{load_config, read_arg};

/// Arguments for `encode`.
pub struct EncodeArgs {
    pub prompts: String,
    pub strengths: String,
    pub assignments: Vec<Assignment>,
    pub source_id: Option<i64>,
    pub reset: bool,
}

pub fn run(config_path: Option<&Path>, args: EncodeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let prompts = read_arg(&args.prompts)?;
    let args = EncodeArgs { prompts, ..args };
    let (payload, formatted) = build(&config, &args)?;
    tracing::info!(output = %formatted, "Encoded strengths");
    println!("{payload}");
    Ok(())
}

/// Load, edit, and encode a session. Returns the payload and the
/// formatted prompt string it corresponds to.
pub fn build(config: &SliderConfig, args: &EncodeArgs) -> promptslider_core::Result<(String, String)> {
    let mut session = Session::load(
        &args.prompts,
        &args.strengths,
        config.policy(),
        config.display.max_label_chars,
    );
    if args.reset {
        session.reset();
    }
    for assignment in &args.assignments {
        session.set(&assignment.label, assignment.value)?;
    }
    if args.source_id.is_some() {
        session.set_source_id(args.source_id);
    }
    Ok((session.encode()?, session.format()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptslider_core::Error;

    fn args(prompts: &str, strengths: &str, sets: &[&str]) -> EncodeArgs {
        EncodeArgs {
            prompts: prompts.into(),
            strengths: strengths.into(),
            assignments: sets.iter().map(|s| s.parse().unwrap()).collect(),
            source_id: None,
            reset: false,
        }
    }

    #[test]
    fn assignments_are_quantized_into_the_payload() {
        let (payload, formatted) =
            build(&SliderConfig::default(), &args("cat,dog", "", &["dog=0.46"])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["dog"], serde_json::json!(0.5));
        assert_eq!(formatted, "(cat:1.0),(dog:0.5)");
    }

    #[test]
    fn unknown_label_is_an_error() {
        let err = build(&SliderConfig::default(), &args("cat", "", &["bird=1.0"])).unwrap_err();
        assert!(matches!(err, Error::UnknownLabel(_)));
    }

    #[test]
    fn reset_then_set() {
        let stored = r#"{"cat": 0.2, "dog": 0.3}"#;
        let mut a = args("cat,dog", stored, &["cat=1.9"]);
        a.reset = true;
        let (_, formatted) = build(&SliderConfig::default(), &a).unwrap();
        assert_eq!(formatted, "(cat:1.9),(dog:1.0)");
    }

    #[test]
    fn stored_source_id_survives_unless_overridden() {
        let stored = r#"{"__source_id__": 5, "cat": 1.0}"#;
        let (payload, _) = build(&SliderConfig::default(), &args("cat", stored, &[])).unwrap();
        assert!(payload.contains(r#""__source_id__":5"#));

        let mut a = args("cat", stored, &[]);
        a.source_id = Some(8);
        let (payload, _) = build(&SliderConfig::default(), &a).unwrap();
        assert!(payload.contains(r#""__source_id__":8"#));
    }
}
