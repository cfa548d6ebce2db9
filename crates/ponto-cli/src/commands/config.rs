//! Config command - inspect and edit the JSON configuration file.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;

use ponto_core::PontoConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with the defaults
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one value (e.g. "extraction.strategy")
    Get {
        /// Dotted key
        key: String,
    },

    /// Change one value (JSON, or a bare string)
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },

    /// Show the configuration file path
    Path,
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ponto")
        .join("config.json")
}

/// The configuration file the command operates on.
struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    fn new(config_path: Option<&str>) -> Self {
        let path = config_path
            .map(PathBuf::from)
            .unwrap_or_else(default_config_path);
        Self { path }
    }

    fn load_or_default(&self) -> anyhow::Result<PontoConfig> {
        if self.path.exists() {
            Ok(PontoConfig::from_file(&self.path)?)
        } else {
            Ok(PontoConfig::default())
        }
    }

    fn save(&self, config: &PontoConfig) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        config.save(&self.path)?;
        Ok(())
    }
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let file = ConfigFile::new(config_path);

    match args.command {
        ConfigCommand::Show => show_config(&file),
        ConfigCommand::Init { force } => init_config(&file, force),
        ConfigCommand::Get { key } => get_config(&file, &key),
        ConfigCommand::Set { key, value } => set_config(&file, &key, &value),
        ConfigCommand::Path => show_path(&file),
    }
}

fn show_config(file: &ConfigFile) -> anyhow::Result<()> {
    if !file.path.exists() {
        eprintln!(
            "{} No config file at {}, showing defaults.",
            style("ℹ").blue(),
            file.path.display()
        );
    }

    let config = file.load_or_default()?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init_config(file: &ConfigFile, force: bool) -> anyhow::Result<()> {
    if file.path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            file.path.display()
        );
    }

    file.save(&PontoConfig::default())?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        file.path.display()
    );
    Ok(())
}

fn lookup<'a>(root: &'a Value, key: &str) -> anyhow::Result<&'a Value> {
    key.split('.').try_fold(root, |node, part| {
        node.get(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
    })
}

fn get_config(file: &ConfigFile, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(file.load_or_default()?)?;
    println!("{}", serde_json::to_string_pretty(lookup(&json, key)?)?);
    Ok(())
}

fn set_config(file: &ConfigFile, key: &str, value: &str) -> anyhow::Result<()> {
    let parsed: Value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));

    let mut json = serde_json::to_value(file.load_or_default()?)?;

    // Only existing keys can be set; unknown ones would be dropped on load
    let slot = key.split('.').try_fold(&mut json, |node, part| {
        node.get_mut(part)
            .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))
    })?;
    *slot = parsed.clone();

    let config: PontoConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;
    config.validate()?;
    file.save(&config)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&parsed)?
    );
    Ok(())
}

fn show_path(file: &ConfigFile) -> anyhow::Result<()> {
    println!("Configuration file: {}", file.path.display());

    if file.path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'ponto config init' to create a configuration file.");
    }
    Ok(())
}
