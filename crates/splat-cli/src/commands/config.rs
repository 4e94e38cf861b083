//! `splat config`: show the settings a run would use.

use serde_json::Value;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::{Console, Tone},
};

pub fn execute(cmd: ConfigCommands, config: &AppConfig, console: &Console) -> CliResult<()> {
    let text = match cmd {
        ConfigCommands::Get { key } => lookup(config, &key)?,
        ConfigCommands::List => toml::to_string_pretty(config)
            .map_err(|e| CliError::config(format!("Could not render the configuration: {e}")))?,
        ConfigCommands::Path => AppConfig::config_path().display().to_string(),
    };

    console
        .say(Tone::Plain, text.trim_end())
        .map_err(CliError::io("write to stdout"))
}

/// Value at a dotted key such as `manifest.precedence`. Unset optional
/// values print as an empty string.
fn lookup(config: &AppConfig, key: &str) -> CliResult<String> {
    let tree = serde_json::to_value(config)
        .map_err(|e| CliError::config(format!("Could not render the configuration: {e}")))?;

    let pointer = format!("/{}", key.replace('.', "/"));
    match tree.pointer(&pointer) {
        Some(Value::Object(_)) | None => Err(CliError::config(format!(
            "Unknown config key '{key}'"
        ))),
        Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
    }
}
