//! `splat list`: the templates under the resolved root.

use crate::{
    cli::{GlobalArgs, ListArgs, ListFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::{Console, Tone},
};

pub fn execute(
    args: ListArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    console: &Console,
) -> CliResult<()> {
    let catalog = super::catalog(global, config);
    let templates = catalog.list()?;

    // `list` and `json` are for scripts and ignore --quiet.
    let text = match args.format {
        ListFormat::Table if templates.is_empty() => {
            let msg = format!("No templates found in {}", catalog.root().display());
            return console.say(Tone::Warn, &msg).map_err(CliError::io("write to stdout"));
        }
        ListFormat::Table => {
            let mut lines = vec![format!("Templates in {}:", catalog.root().display())];
            lines.extend(templates.iter().map(|name| {
                let marker = if *name == config.templates.default {
                    " (default)"
                } else {
                    ""
                };
                format!("  {name}{marker}")
            }));
            return console
                .say(Tone::Plain, &lines.join("\n"))
                .map_err(CliError::io("write to stdout"));
        }
        ListFormat::List => templates.join("\n"),
        ListFormat::Json => serde_json::to_string_pretty(&templates)
            .map_err(|e| CliError::io("render the template list")(e.into()))?,
    };

    if !text.is_empty() {
        println!("{text}");
    }
    Ok(())
}
