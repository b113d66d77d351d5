#![allow(non_snake_case)]

use std::env;

use jadwalApp::cli;
use jadwalApp::config::{AppConfig, Settings};
use jadwalApp::telemetry::init_tracing;
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_error) = match env::var("CONFIG_FILE") {
        Ok(path) => match AppConfig::from_file(&path) {
            Ok(config) => (config, None),
            Err(err) => (AppConfig::default(), Some(err)),
        },
        Err(_) => (AppConfig::default(), None),
    };

    let settings = Settings::load(&config, |key| env::var(key).ok())?;
    init_tracing(settings.log_format, settings.log_level);
    if let Some(err) = config_error {
        warn!(error = %err, "falling back to default configuration");
    }

    cli::cli(settings).await
}
