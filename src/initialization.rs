use std::env;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::config::{Config, load_config};
use crate::errors::ConfigError;
use crate::models::station::{self, Station};

/// Log line layout shared by all appenders
const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

/// Initializes configuration and logging and resolves the forecast station
///
/// The configuration path is taken from the ANALOGCAST_CONFIG environment
/// variable, falling back to analogcast.toml in the working directory.
pub fn init() -> Result<(Config, Station), ConfigError> {
    let config_path = env::var("ANALOGCAST_CONFIG")
        .unwrap_or("analogcast.toml".to_string());
    let config = load_config(&config_path)?;

    init_logging(&config)?;

    let station = station::lookup(&config.forecast.location)
        .ok_or(ConfigError(format!(
            "unknown location '{}', pick one of: {}",
            config.forecast.location,
            station::station_names().join(", ")
        )))?;

    Ok((config, station))
}

/// Sets up log4rs appenders according to the general configuration section
///
/// # Arguments
///
/// * 'config' - the loaded configuration
fn init_logging(config: &Config) -> Result<(), ConfigError> {
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&config.general.log_path)
        .map_err(|e| ConfigError(e.to_string()))?;

    let mut builder = LogConfig::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root = Root::builder().appender("file");

    if config.general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    let log_config = builder
        .build(root.build(config.general.log_level))
        .map_err(|e| ConfigError(e.to_string()))?;
    log4rs::init_config(log_config)
        .map_err(|e| ConfigError(e.to_string()))?;

    Ok(())
}
