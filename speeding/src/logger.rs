use std::fmt;

use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

use crate::Error;

/// Logging levels accepted on the command line and through the environment.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Level::Off => write!(f, "off"),
            Level::Error => write!(f, "error"),
            Level::Warn => write!(f, "warn"),
            Level::Info => write!(f, "info"),
            Level::Debug => write!(f, "debug"),
            Level::Trace => write!(f, "trace"),
        }
    }
}

impl From<&Level> for LevelFilter {
    fn from(level: &Level) -> Self {
        match level {
            Level::Off => LevelFilter::Off,
            Level::Error => LevelFilter::Error,
            Level::Warn => LevelFilter::Warn,
            Level::Info => LevelFilter::Info,
            Level::Debug => LevelFilter::Debug,
            Level::Trace => LevelFilter::Trace,
        }
    }
}

/// Install the global logger writing to stdout.
///
/// The Lambda runtime forwards stdout to the log service, so this is the
/// only sink. Can only succeed once per process.
pub fn init(level: &Level) -> Result<(), Error> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} {:<5} [{}] {}",
                chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level.into())
        // the AWS SDK is chatty below warn
        .level_for("aws_config", LevelFilter::Warn)
        .level_for("aws_smithy_runtime", LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()?;

    Ok(())
}
