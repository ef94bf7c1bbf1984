//! Config command - inspect and edit the roster configuration file.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use roster_core::RosterConfig;

use super::{config_path, load_config};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "extraction.lone_fields")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value (JSON, or a bare string)
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, explicit: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(explicit),
        ConfigCommand::Init(init_args) => init_config(init_args, explicit),
        ConfigCommand::Get { key } => get_config(&key, explicit),
        ConfigCommand::Set { key, value } => set_config(&key, &value, explicit),
        ConfigCommand::Path => show_path(explicit),
    }
}

fn show_config(explicit: Option<&str>) -> anyhow::Result<()> {
    if !config_path(explicit).exists() {
        println!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }

    let config = load_config(explicit)?;
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, explicit: Option<&str>) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| config_path(explicit));

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    RosterConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

/// Follow a dotted key through nested JSON objects.
fn lookup<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |current, part| current.get(part))
}

fn get_config(key: &str, explicit: Option<&str>) -> anyhow::Result<()> {
    let json = serde_json::to_value(load_config(explicit)?)?;
    let value = lookup(&json, key)
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;

    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

fn set_config(key: &str, value: &str, explicit: Option<&str>) -> anyhow::Result<()> {
    let path = config_path(explicit);
    let config = if path.exists() {
        RosterConfig::from_file(&path)?
    } else {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        RosterConfig::default()
    };

    let parsed: Value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));

    let mut json = serde_json::to_value(&config)?;
    let (parent_key, field) = match key.rsplit_once('.') {
        Some((parent_key, field)) => (Some(parent_key), field),
        None => (None, key),
    };

    let mut target = &mut json;
    if let Some(parent_key) = parent_key {
        for part in parent_key.split('.') {
            target = target
                .get_mut(part)
                .ok_or_else(|| anyhow::anyhow!("Configuration path not found: {}", key))?;
        }
    }

    let object = target
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Cannot set value at non-object path"))?;
    if !object.contains_key(field) {
        anyhow::bail!("Configuration key not found: {}", key);
    }
    object.insert(field.to_string(), parsed.clone());

    // Round-trip through the typed config so bad values are rejected.
    let config: RosterConfig = serde_json::from_value(json)?;
    config.save(&path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed)?
    );

    Ok(())
}

fn show_path(explicit: Option<&str>) -> anyhow::Result<()> {
    let path = config_path(explicit);

    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'roster config init' to create a configuration file.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lookup_nested_key() {
        let json = serde_json::to_value(RosterConfig::default()).unwrap();
        assert_eq!(lookup(&json, "extraction.lone_fields"), Some(&Value::from("drop")));
        assert_eq!(lookup(&json, "extraction.header_lines"), Some(&Value::from(7)));
        assert!(lookup(&json, "extraction.nope").is_none());
    }
}
