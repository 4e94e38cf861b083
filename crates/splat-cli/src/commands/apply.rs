//! The default action: apply a template to a destination directory.
//!
//! Responsibility: resolve the template and destination, wire the adapters
//! into the core `SplatService`, and print the final line.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use splat_adapters::LocalFilesystem;
use splat_core::application::{SplatConfig, SplatService, ports::Prompt};

use crate::{
    cli::{ApplyArgs, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::{Console, Tone},
    prompt::{AssumeYes, TerminalPrompt},
    reporter::ConsoleReporter,
};

/// Execute the default (apply) action.
///
/// Sequence:
/// 1. Resolve the template through the catalog
/// 2. Resolve the destination against the working directory
/// 3. Run the core service on a single-threaded runtime
/// 4. Print whether anything changed
#[instrument(skip_all)]
pub fn execute(
    args: ApplyArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    console: Console,
) -> CliResult<()> {
    let template_name = args
        .from
        .clone()
        .unwrap_or_else(|| config.templates.default.clone());
    let template_path = super::catalog(global, config).resolve(&template_name)?;

    let cwd = std::env::current_dir().map_err(CliError::io("read the working directory"))?;
    let output_dir = resolve_destination(&cwd, args.dest.as_deref())?;

    let precedence = args
        .prefer
        .map(Into::into)
        .unwrap_or(config.manifest.precedence);

    let splat_config = SplatConfig::new(&template_name, template_path, &output_dir)
        .with_manifest_name(config.manifest.file_name.clone())
        .with_precedence(precedence);

    debug!(
        template = %template_name,
        output_dir = %output_dir.display(),
        precedence = %precedence,
        "Run configured"
    );

    let prompt: Box<dyn Prompt> = if args.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalPrompt::new())
    };
    let service = SplatService::new(
        Box::new(LocalFilesystem::new()),
        prompt,
        Box::new(ConsoleReporter::new(console.clone())),
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::io("start the async runtime"))?;

    let summary = runtime.block_on(service.run(&splat_config))?;
    info!(changes = summary.changes(), "Apply finished");

    let written = if summary.changed() {
        console.say(Tone::Done, "Done splatting!")
    } else {
        console.say(Tone::Note, "Destination matches template, no changes performed")
    };
    written.map_err(CliError::io("write to stdout"))
}

/// Destination relative to `cwd`; an absolute `dest` replaces it. An
/// existing non-directory is rejected before anything is written.
pub fn resolve_destination(cwd: &Path, dest: Option<&Path>) -> CliResult<PathBuf> {
    let path = cwd.join(dest.unwrap_or(Path::new(".")));
    if path.exists() && !path.is_dir() {
        return Err(CliError::DestinationNotADirectory { path });
    }
    Ok(path)
}
