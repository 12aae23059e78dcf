use clap::ValueEnum;
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Debug)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    pub level: Level,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LoggerFormat {
    #[default]
    Pretty,
    Json,
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for shares and secrets.
pub fn init_logger(config: LoggerConfig) {
    let builder = SubscriberBuilder::default()
        .with_writer(std::io::stderr)
        .with_max_level(config.level);

    match config.format {
        LoggerFormat::Pretty => builder.pretty().init(),
        LoggerFormat::Json => builder.json().init(),
    }
}
