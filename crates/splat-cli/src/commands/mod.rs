//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into core calls and render results;
//! no business logic lives here.

use splat_adapters::TemplateCatalog;

use crate::{cli::GlobalArgs, config::AppConfig};

pub mod apply;
pub mod completions;
pub mod config;
pub mod init;
pub mod list;

/// `--templates-dir` (or `SPLAT_TEMPLATES_DIR`), then `templates.root`
/// from the config, then the platform data directory.
pub fn catalog(global: &GlobalArgs, config: &AppConfig) -> TemplateCatalog {
    match global.templates_dir.as_ref().or(config.templates.root.as_ref()) {
        Some(root) => TemplateCatalog::new(root),
        None => TemplateCatalog::from_default_root(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;

    #[test]
    fn flag_beats_config_for_templates_root() {
        let mut config = AppConfig::default();
        config.templates.root = Some(PathBuf::from("/from/config"));
        let mut global = GlobalArgs::default();

        assert_eq!(catalog(&global, &config).root(), Path::new("/from/config"));

        global.templates_dir = Some(PathBuf::from("/from/flag"));
        assert_eq!(catalog(&global, &config).root(), Path::new("/from/flag"));
    }
}
