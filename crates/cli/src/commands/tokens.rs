//! `promptslider tokens` — List the labels parsed from prompt text.

use promptslider_core::tokenize;

use super::read_arg;

pub fn run(prompts: &str) -> Result<(), Box<dyn std::error::Error>> {
    let prompts = read_arg(prompts)?;
    let labels = tokenize(&prompts);
    tracing::debug!(count = labels.len(), "Parsed prompt labels");
    for label in labels {
        println!("{label}");
    }
    Ok(())
}
