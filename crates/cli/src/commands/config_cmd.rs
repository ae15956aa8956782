//! `promptslider config` — Configuration management commands.

use std::path::{Path, PathBuf};

use promptslider_config::SliderConfig;

use super::load_config;

pub fn validate(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match load_config(config_path) {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let policy = config.policy();
            if policy.step > policy.max - policy.min {
                println!("   ⚠️  Step is larger than the whole strength range");
            }
            if policy.precision == 0 {
                println!("   ⚠️  Precision 0 prints strengths as whole numbers");
            }

            println!();
            println!("   Range:     {} – {}", policy.min, policy.max);
            println!("   Default:   {}", policy.format(policy.default));
            println!("   Precision: {}", policy.precision);
            println!("   Step:      {}", policy.step);
            println!("   Labels:    up to {} chars", config.display.max_label_chars);
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub fn show(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path).map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub fn path(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", resolved_path(config_path).display());
    Ok(())
}

fn resolved_path(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(SliderConfig::config_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_is_valid() {
        let path = resolved_path(None);
        assert!(path.to_str().unwrap().contains("config.toml"));
    }

    #[test]
    fn explicit_path_wins() {
        let path = resolved_path(Some(Path::new("/etc/slider.toml")));
        assert_eq!(path, PathBuf::from("/etc/slider.toml"));
    }
}
