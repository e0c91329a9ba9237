//! `facecourses config`: show, validate and initialize configuration.

use anyhow::Result;
use std::path::{Path, PathBuf};

use facecourses::config::{CONFIG_FILE_NAME, Config, FaceCoursesToml};

use super::super::ConfigCommands;

fn print_toml(toml: &FaceCoursesToml) {
    println!("[ai]");
    if let Some(model) = &toml.ai.model {
        println!("  model = \"{}\"", model);
    }
    println!("  base_url = \"{}\"", toml.ai.base_url);
    println!("  api_key_env = \"{}\"", toml.ai.api_key_env);
    println!("  timeout_secs = {}", toml.ai.timeout_secs);
    println!();
    println!("[onboarding]");
    println!("  mode = \"{}\"", toml.onboarding.mode);
    println!("  language = \"{}\"", toml.onboarding.language);
    println!();
    println!("[design]");
    println!("  primary_color = \"{}\"", toml.design.primary_color);
    println!("  font = \"{}\"", toml.design.font);
    println!();
}

pub fn cmd_config(path: Option<&Path>, command: Option<ConfigCommands>) -> Result<()> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    match command {
        None | Some(ConfigCommands::Show) => {
            println!();
            println!("FaceCourses Configuration");
            println!("=========================");
            println!();

            if config_path.exists() {
                println!("Config file: {}", config_path.display());
            } else {
                println!("No facecourses.toml found at {}", config_path.display());
                println!("Using default configuration:");
            }
            println!();

            let config = Config::load(Some(config_path.clone()), None, false)?;
            print_toml(config.toml());

            // Effective values include environment overrides
            println!("Effective values (with env overrides):");
            println!("  model = \"{}\"", config.model());
            println!(
                "  api_key = {}",
                if config.api_key().is_some() {
                    "set"
                } else {
                    "not set (offline fallbacks)"
                }
            );
            println!();

            if !config_path.exists() {
                println!("Run 'facecourses config init' to create a facecourses.toml file.");
                println!();
            }
        }
        Some(ConfigCommands::Validate) => {
            println!();
            println!("Validating configuration...");
            println!();

            if !config_path.exists() {
                println!("No facecourses.toml found. Using defaults (valid).");
                return Ok(());
            }

            let toml = FaceCoursesToml::load(&config_path)?;
            let warnings = toml.validate();

            if warnings.is_empty() {
                println!("Configuration is valid.");
            } else {
                println!("Configuration warnings:");
                for warning in warnings {
                    println!("  - {}", warning);
                }
            }
            println!();
        }
        Some(ConfigCommands::Init) => {
            if config_path.exists() {
                println!("facecourses.toml already exists at {}", config_path.display());
                println!("Delete it first if you want to recreate it.");
                return Ok(());
            }

            if let Some(parent) = config_path.parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                std::fs::create_dir_all(parent)?;
            }

            FaceCoursesToml::default().save(&config_path)?;

            println!("Created facecourses.toml at {}", config_path.display());
            println!();
            println!("You can now customize:");
            println!("  - [ai] model, base_url, api_key_env, timeout_secs");
            println!("  - [onboarding] mode, language");
            println!("  - [design] primary_color, font");
            println!();
        }
    }

    Ok(())
}
