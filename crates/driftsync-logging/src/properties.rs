//! Parser for `logging.properties`.
//!
//! ```text
//! # comment            ! also a comment
//! .level = info        root level
//! my_crate.level = debug
//! handlers = stderr, file:/var/log/app.log
//! handlers.level = warn
//! ```
//!
//! Keys may contain `::`, so only `=` separates key and value. Unknown
//! keys are ignored.

use std::path::PathBuf;

use tracing::level_filters::LevelFilter;

use crate::error::{LoggingError, Result};
use crate::handler::Handler;

const ROOT_LEVEL_KEY: &str = ".level";
const HANDLERS_KEY: &str = "handlers";
const HANDLERS_LEVEL_KEY: &str = "handlers.level";
const LEVEL_SUFFIX: &str = ".level";

/// Where a configured handler writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerSpec {
    Stderr,
    Stdout,
    File(PathBuf),
}

impl HandlerSpec {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "stderr" | "console" => Ok(Self::Stderr),
            "stdout" => Ok(Self::Stdout),
            _ => match s.strip_prefix("file:") {
                Some(path) if !path.is_empty() => Ok(Self::File(PathBuf::from(path))),
                _ => Err(LoggingError::InvalidHandler(s.to_string())),
            },
        }
    }

    /// Open the handler.
    pub fn build(&self) -> Result<Handler> {
        match self {
            Self::Stderr => Ok(Handler::stderr()),
            Self::Stdout => Ok(Handler::stdout()),
            Self::File(path) => Handler::file(path),
        }
    }
}

/// A parsed logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogProperties {
    pub root_level: Option<LevelFilter>,
    /// Per-target levels, in file order.
    pub logger_levels: Vec<(String, LevelFilter)>,
    pub handlers: Vec<HandlerSpec>,
    pub handler_level: Option<LevelFilter>,
}

impl LogProperties {
    pub fn parse(text: &str) -> Result<Self> {
        let mut props = Self::default();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let (key, value) = line
                .split_once('=')
                .map(|(k, v)| (k.trim(), v.trim()))
                .ok_or_else(|| LoggingError::Malformed {
                    line: idx + 1,
                    content: line.to_string(),
                })?;

            match key {
                ROOT_LEVEL_KEY => props.root_level = Some(parse_level(value)?),
                HANDLERS_KEY => {
                    props.handlers = value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(HandlerSpec::parse)
                        .collect::<Result<_>>()?;
                }
                HANDLERS_LEVEL_KEY => props.handler_level = Some(parse_level(value)?),
                _ => {
                    if let Some(target) = key.strip_suffix(LEVEL_SUFFIX) {
                        props.logger_levels.push((target.to_string(), parse_level(value)?));
                    }
                }
            }
        }

        Ok(props)
    }

    /// Open every configured handler at the configured handler level.
    pub fn build_handlers(&self) -> Result<Vec<Handler>> {
        let level = self.handler_level.unwrap_or(LevelFilter::TRACE);
        self.handlers
            .iter()
            .map(|spec| spec.build().map(|h| h.with_level(level)))
            .collect()
    }
}

/// Parse a level name, case-insensitively. `all` means `trace`.
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    if level.is_empty() {
        return Err(LoggingError::InvalidLevel(level.to_string()));
    }
    if level.eq_ignore_ascii_case("all") {
        return Ok(LevelFilter::TRACE);
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| LoggingError::InvalidLevel(level.to_string()))
}
