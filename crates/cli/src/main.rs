use std::process::ExitCode;

use rigquote_core::config::{AppConfig, LoadOptions};

fn init_logging(config: &AppConfig) {
    use rigquote_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    // Logs go to stderr so rendered documents on stdout stay clean.
    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .compact()
                .init();
        }
        Pretty => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .pretty()
                .init();
        }
        Json => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
    }
}

fn main() -> ExitCode {
    // Commands surface their own configuration failures; logging falls back
    // to defaults when the config does not load.
    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => init_logging(&config),
        Err(_) => init_logging(&AppConfig::default()),
    }

    rigquote_cli::run()
}
