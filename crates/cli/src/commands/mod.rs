//! Subcommand implementations.

use std::io::Read;
use std::path::Path;

use promptslider_config::{ConfigError, SliderConfig};

pub mod apply;
pub mod config_cmd;
pub mod encode;
pub mod inspect;
pub mod tokens;

/// Load config from `path` if given, else from the default location.
pub fn load_config(path: Option<&Path>) -> Result<SliderConfig, ConfigError> {
    match path {
        Some(path) => SliderConfig::load_with_overrides(path),
        None => SliderConfig::load(),
    }
}

/// Resolve a text argument; `-` means read all of stdin.
pub fn read_arg(arg: &str) -> std::io::Result<String> {
    if arg != "-" {
        return Ok(arg.to_owned());
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
