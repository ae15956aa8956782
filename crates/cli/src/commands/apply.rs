//! `promptslider apply` — Annotate prompts with their strengths.

use std::path::Path;

use promptslider_core::apply_strengths_with;

use super::{load_config, read_arg};

pub fn run(
    config_path: Option<&Path>,
    prompts: &str,
    strengths: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let prompts = read_arg(prompts)?;
    println!("{}", apply_strengths_with(&config.policy(), &prompts, strengths));
    Ok(())
}
