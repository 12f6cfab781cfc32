use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use clap::ValueEnum;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{get_config_path, ColorMode, Config};
use crate::scoring::ScoreVariant;
use crate::tui::Theme;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Prompt until the answer names one of `T`'s variants.
fn prompt_choice<T: ValueEnum>(message: &str, default: T) -> Result<T> {
    let names: Vec<String> = T::value_variants()
        .iter()
        .filter_map(|v| v.to_possible_value())
        .map(|p| p.get_name().to_string())
        .collect();
    let default_name = default
        .to_possible_value()
        .map(|p| p.get_name().to_string())
        .unwrap_or_default();

    loop {
        let input = prompt_with_default(
            &format!("{} ({})", message, names.join("/")),
            &default_name,
        )?;
        match T::from_str(&input, true) {
            Ok(value) => return Ok(value),
            Err(_) => println!("  Invalid: expected one of {}. Try again.", names.join(", ")),
        }
    }
}

/// Serialize `config` as YAML and write it atomically, creating parent
/// directories as needed.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

/// Run the interactive init wizard to create a config file.
///
/// With `accept_defaults`, no questions are asked and the defaults are
/// written out explicitly to `default_path` (or the standard location). An
/// existing file is never overwritten in that mode.
pub fn run_init_wizard(default_path: Option<PathBuf>, accept_defaults: bool) -> Result<()> {
    let default_config_path = match default_path {
        Some(path) => path,
        None => get_config_path()?,
    };

    if accept_defaults {
        if default_config_path.exists() {
            anyhow::bail!(
                "Config already exists at {}. Remove it or run init without --defaults.",
                default_config_path.display()
            );
        }
        let config = Config {
            variant: Some(ScoreVariant::default()),
            color: Some(ColorMode::default()),
            theme: Some(Theme::default()),
        };
        write_config(&default_config_path, &config)?;
        println!("Config written to {}", default_config_path.display());
        return Ok(());
    }

    println!();
    println!("ICH Risk Calculator Configuration");
    println!("=================================");
    println!();

    println!("Two published point tables exist:");
    println!("  revised   -- AKI = 2 points, low-risk band 0.53% (default)");
    println!("  original  -- AKI = 1 point, low-risk band 0.52%");
    let variant = prompt_choice("Point table", ScoreVariant::default())?;

    println!();
    let color = prompt_choice("Colored output", ColorMode::default())?;

    println!();
    println!("The interactive view can follow your terminal background or use a fixed palette.");
    let theme = prompt_choice("Theme", Theme::default())?;

    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = Config {
        variant: Some(variant),
        color: Some(color),
        theme: Some(theme),
    };
    write_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `ich-risk` to get started.");

    Ok(())
}
