//! Configuration commands.
//!
//! - `config set`: Set a configuration value
//! - `config show`: Display current configuration

use owo_colors::OwoColorize;
use serde_json::{Map, Value};

use crate::config::Config;
use crate::error::Result;

use super::print_json;

/// Show current configuration, with the access token masked
pub fn cmd_config_show(json: bool) -> Result<()> {
    let config = Config::load()?;
    let lines = config.display_lines();

    if json {
        let map: Map<String, Value> = lines
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        return print_json(&map);
    }

    println!("{}", "Configuration:".bold());
    for (key, value) in lines {
        println!("  {}: {}", key.cyan(), value);
    }
    println!();
    println!("{} {}", "Config file:".dimmed(), Config::config_path().display());
    Ok(())
}

pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    if key == "auth.access_token" {
        println!("Set {}", key.cyan());
    } else {
        println!("Set {} = {}", key.cyan(), value);
    }
    Ok(())
}
