use std::path::PathBuf;

use crate::cli::commands::Cli;
use crate::io::{config_io, logging};
use crate::model::Config;

/// Resolved startup settings
#[derive(Debug)]
pub struct Launch {
    pub config: Config,
    pub data_dir: PathBuf,
}

/// Resolve config and data paths from flags, falling back to XDG defaults.
pub fn resolve(cli: &Cli) -> Result<Launch, config_io::ConfigError> {
    let config_path = cli.config.clone().unwrap_or_else(config_io::config_path);
    let mut config = config_io::read_config(&config_path)?;
    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
    let data_dir = cli.data_dir.clone().unwrap_or_else(config_io::data_dir);
    Ok(Launch { config, data_dir })
}

/// Start logging, then run the TUI until the user quits.
pub fn launch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let Launch { config, data_dir } = resolve(&cli)?;
    logging::init_logging(&config.log.level, &data_dir.join("logs"))?;
    log::info!(
        "event=startup version={} data_dir={}",
        env!("CARGO_PKG_VERSION"),
        data_dir.display()
    );
    crate::tui::run(&config, &data_dir)
}
