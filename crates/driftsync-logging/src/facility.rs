//! The seam between the bootstrap and the logging backend.

use std::collections::{BTreeMap, BTreeSet};

use tracing::level_filters::LevelFilter;
use tracing::{Level, Subscriber};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use crate::error::Result;
use crate::handler::Handler;
use crate::properties::LogProperties;

/// Root level after a reset, and before any configuration is read.
pub const DEFAULT_ROOT_LEVEL: LevelFilter = LevelFilter::INFO;

/// A process-wide logging backend: named loggers with levels, and a root
/// logger with attachable handlers.
///
/// Logger names are `tracing` targets. A target without its own level
/// takes the level of the most specific configured target it starts
/// with, then the root level.
pub trait LoggingFacility: Send + Sync {
    /// Every logger name the facility knows about.
    fn logger_names(&self) -> Vec<String>;

    /// The level set on `name` itself, if any.
    fn logger_level(&self, name: &str) -> Option<LevelFilter>;

    fn set_logger_level(&self, name: &str, level: LevelFilter);

    fn root_level(&self) -> LevelFilter;

    fn set_root_level(&self, level: LevelFilter);

    /// Number of handlers attached to the root logger.
    fn handler_count(&self) -> usize;

    /// Set the level of every root handler.
    fn set_handler_levels(&self, level: LevelFilter);

    /// Attach a handler to the root logger. No deduplication.
    fn add_handler(&self, handler: Handler);

    /// Detach and return the first root handler.
    fn remove_first_handler(&self) -> Option<Handler>;

    /// Replace the current configuration with the one in `source`.
    fn read_configuration(&self, source: &str) -> Result<()>;

    /// Drop all configuration: per-logger levels, handlers, root level.
    fn reset(&self);

    /// Mute `target` and everything below it. Survives [`reset`](Self::reset).
    fn silence_target(&self, target: &str);
}

/// Logger and handler state shared by the facilities in this crate.
#[derive(Debug)]
pub(crate) struct LoggerTable {
    pub(crate) root: LevelFilter,
    pub(crate) loggers: BTreeMap<String, Option<LevelFilter>>,
    pub(crate) silenced: BTreeSet<String>,
    pub(crate) handlers: Vec<Handler>,
}

impl Default for LoggerTable {
    fn default() -> Self {
        Self {
            root: DEFAULT_ROOT_LEVEL,
            loggers: BTreeMap::new(),
            silenced: BTreeSet::new(),
            handlers: Vec::new(),
        }
    }
}

impl LoggerTable {
    /// Make `name` known without giving it a level.
    pub(crate) fn register(&mut self, name: &str) {
        if !self.loggers.contains_key(name) {
            self.loggers.insert(name.to_string(), None);
        }
    }

    pub(crate) fn set_level(&mut self, name: &str, level: LevelFilter) {
        self.loggers.insert(name.to_string(), Some(level));
    }

    pub(crate) fn set_handler_levels(&mut self, level: LevelFilter) {
        for handler in &mut self.handlers {
            handler.set_level(level);
        }
    }

    pub(crate) fn remove_first_handler(&mut self) -> Option<Handler> {
        if self.handlers.is_empty() {
            None
        } else {
            Some(self.handlers.remove(0))
        }
    }

    /// Clear levels and handlers. Logger names and silenced targets stay.
    pub(crate) fn reset(&mut self) {
        for level in self.loggers.values_mut() {
            *level = None;
        }
        self.root = DEFAULT_ROOT_LEVEL;
        self.handlers.clear();
    }

    /// Reset, then apply `props` with already opened `handlers`.
    pub(crate) fn apply(&mut self, props: &LogProperties, handlers: Vec<Handler>) {
        self.reset();
        if let Some(level) = props.root_level {
            self.root = level;
        }
        for (name, level) in &props.logger_levels {
            self.set_level(name, *level);
        }
        self.handlers.extend(handlers);
    }

    /// The per-target filter for the current levels.
    ///
    /// Silenced targets are `OFF`, and a level set on a logger below a
    /// silenced target is dropped, so silencing always wins.
    pub(crate) fn targets(&self) -> Targets {
        let silenced = Targets::new()
            .with_default(LevelFilter::TRACE)
            .with_targets(self.silenced.iter().map(|t| (t.as_str(), LevelFilter::OFF)));

        let levels = self
            .loggers
            .iter()
            .filter_map(|(name, level)| level.map(|l| (name.as_str(), l)))
            .filter(|(name, _)| silenced.would_enable(name, &Level::ERROR));

        Targets::new()
            .with_default(self.root)
            .with_targets(levels)
            .with_targets(self.silenced.iter().map(|t| (t.as_str(), LevelFilter::OFF)))
    }

    /// One `fmt` layer per handler that is not switched off.
    pub(crate) fn handler_layers<S>(&self) -> Vec<Box<dyn Layer<S> + Send + Sync>>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        self.handlers.iter().filter_map(|h| h.layer()).collect()
    }
}
