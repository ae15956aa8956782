//! `promptslider inspect` — Show how a strength payload is interpreted.

use std::path::Path;

use promptslider_core::{resolve_with_default, Resolution, StrengthPolicy, StrengthSource};

use super::{load_config, read_arg};

pub fn run(config_path: Option<&Path>, strengths: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let policy = config.policy();
    let raw = read_arg(strengths)?;
    let resolution = resolve_with_default(raw.trim_end(), policy.default);
    print!("{}", render(&resolution, &policy));
    Ok(())
}

/// Human-readable report of a resolution.
pub fn render(resolution: &Resolution, policy: &StrengthPolicy) -> String {
    let Some(discovery) = resolution.discovery else {
        return format!(
            "Payload unusable: every prompt gets the default strength ({})\n",
            policy.format(policy.default)
        );
    };

    let mut out = format!("Strategy:  {discovery}\n");
    if let Some(source_id) = resolution.source_id {
        out.push_str(&format!("Source id: {source_id}\n"));
    }
    out.push_str(&format!("Labels:    {}\n", resolution.labels.len()));
    for resolved in &resolution.resolved {
        let source = match resolved.source {
            StrengthSource::Direct => "direct",
            StrengthSource::Positional => "positional",
            StrengthSource::Default => "default",
        };
        out.push_str(&format!(
            "  {:<20} {:>5}  ({source})\n",
            resolved.label,
            policy.format(resolved.value)
        ));
    }
    out
}
