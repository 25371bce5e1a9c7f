use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pcgw_engines_wiki::{Settings, config_path};

use crate::error::CliError;

/// Print the effective settings.
pub(crate) fn run_config_show(settings: &Settings) -> Result<(), CliError> {
    match config_path() {
        Some(path) if path.exists() => log::info!(
            "Config file: {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
        ),
        Some(path) => log::info!(
            "Config file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not present, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        ),
        None => log::info!("Config file: (no config directory on this system)"),
    }
    log::info!("");
    log::info!("{}", settings.to_toml()?.trim_end());
    Ok(())
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    let path =
        config_path().ok_or_else(|| CliError::config("Could not determine config directory"))?;
    log::info!("{}", path.display());
    Ok(())
}
