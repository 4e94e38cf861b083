//! `splat init`: write the default settings to the platform config file.

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::{Console, Tone},
};

pub fn execute(args: InitArgs, console: &Console) -> CliResult<()> {
    let path = AppConfig::config_path();

    if path.exists() && !args.force {
        return console
            .say(
                Tone::Warn,
                &format!("{} already exists, pass --force to replace it", path.display()),
            )
            .map_err(CliError::io("write to stdout"));
    }

    let text = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| CliError::config(format!("Could not render the default config: {e}")))?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(CliError::io(format!("create {}", dir.display())))?;
    }
    std::fs::write(&path, text).map_err(CliError::io(format!("write {}", path.display())))?;

    console
        .say(Tone::Done, &format!("Wrote {}", path.display()))
        .map_err(CliError::io("write to stdout"))
}
