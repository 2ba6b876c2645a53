use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    SetLogger(#[from] log::SetLoggerError),
    #[error("Invalid module log config '{0}', expected <module>=<level>")]
    InvalidModuleConfig(String),
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for LogLevel {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "off" => Self::Off,
            "error" => Self::Error,
            "warn" => Self::Warn,
            "info" => Self::Info,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => return Err(LoggingError::InvalidModuleConfig(s.to_string())),
        })
    }
}

/// Log level override for a single module, written `<module>=<level>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub module: String,
    pub level: LogLevel,
}

impl FromStr for ModuleConfig {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (module, level) = s
            .split_once('=')
            .ok_or_else(|| LoggingError::InvalidModuleConfig(s.to_string()))?;
        if module.is_empty() {
            return Err(LoggingError::InvalidModuleConfig(s.to_string()));
        }
        Ok(Self {
            module: module.to_string(),
            level: level
                .parse()
                .map_err(|_| LoggingError::InvalidModuleConfig(s.to_string()))?,
        })
    }
}

pub fn default_logs_datetime_format() -> String {
    "[%Y-%m-%d] (%H:%M:%S%.3f)".to_string()
}

/// Install the global logger
///
/// Terminal output is coloured unless `disable_colors` is set.
/// File output goes to `logs_path`, one file per day unless
/// `disable_file_log_date_based` is set.
pub fn setup_logger(
    level: LogLevel,
    file_level: LogLevel,
    disable_file_logging: bool,
    disable_file_log_date_based: bool,
    disable_colors: bool,
    filename_log: &str,
    logs_path: &str,
    module_logs: &[ModuleConfig],
    datetime_format: &str,
) -> Result<(), LoggingError> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Magenta)
        .trace(Color::Cyan);

    let mut base = fern::Dispatch::new().level(LevelFilter::Trace);
    for module in module_logs {
        base = base.level_for(module.module.clone(), module.level.into());
    }

    let stdout_datetime = datetime_format.to_string();
    let stdout = fern::Dispatch::new()
        .format(move |out, message, record| {
            let level = if disable_colors {
                record.level().to_string()
            } else {
                colors.color(record.level()).to_string()
            };
            out.finish(format_args!(
                "{} {} [{}] {}",
                chrono::Local::now().format(&stdout_datetime),
                level,
                record.target(),
                message
            ))
        })
        .level(level.into())
        .chain(std::io::stdout());
    base = base.chain(stdout);

    if !disable_file_logging {
        std::fs::create_dir_all(logs_path)?;
        let file_datetime = datetime_format.to_string();
        let file = fern::Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "{} {} [{}] {}",
                    chrono::Local::now().format(&file_datetime),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(file_level.into());

        let file = if disable_file_log_date_based {
            file.chain(fern::log_file(format!("{}{}", logs_path, filename_log))?)
        } else {
            file.chain(fern::DateBased::new(
                logs_path,
                format!("%Y-%m-%d.{}", filename_log),
            ))
        };
        base = base.chain(file);
    }

    base.apply()?;
    Ok(())
}
