//! In-memory [`LoggingFacility`] for tests.
//!
//! Keeps the same logger table as the real facility but never installs a
//! subscriber, and counts the calls the bootstrap is expected to make once.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::level_filters::LevelFilter;

use crate::error::Result;
use crate::facility::{LoggerTable, LoggingFacility};
use crate::handler::Handler;
use crate::properties::LogProperties;

/// A logging facility that only records what is done to it.
#[derive(Default)]
pub struct MemoryFacility {
    table: Mutex<LoggerTable>,
    configurations: Mutex<Vec<String>>,
    reads: AtomicUsize,
    silences: AtomicUsize,
    handlers_added: AtomicUsize,
    resets: AtomicUsize,
}

impl MemoryFacility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a logger name known, as if some code had logged under it.
    pub fn register_logger(&self, name: &str) {
        self.table().register(name);
    }

    /// Number of `read_configuration` calls, successful or not.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn silence_count(&self) -> usize {
        self.silences.load(Ordering::SeqCst)
    }

    /// Handlers attached so far, by configuration or by `add_handler`.
    pub fn handlers_added(&self) -> usize {
        self.handlers_added.load(Ordering::SeqCst)
    }

    pub fn reset_count(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }

    /// Every configuration text passed to `read_configuration`, in order.
    pub fn configurations(&self) -> Vec<String> {
        self.configurations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn silenced_targets(&self) -> Vec<String> {
        self.table().silenced.iter().cloned().collect()
    }

    /// Names of the attached handlers, in order.
    pub fn handler_names(&self) -> Vec<String> {
        self.table().handlers.iter().map(|h| h.name().to_string()).collect()
    }

    /// Levels of the attached handlers, in order.
    pub fn handler_levels(&self) -> Vec<LevelFilter> {
        self.table().handlers.iter().map(Handler::level).collect()
    }

    fn table(&self) -> MutexGuard<'_, LoggerTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LoggingFacility for MemoryFacility {
    fn logger_names(&self) -> Vec<String> {
        self.table().loggers.keys().cloned().collect()
    }

    fn logger_level(&self, name: &str) -> Option<LevelFilter> {
        self.table().loggers.get(name).copied().flatten()
    }

    fn set_logger_level(&self, name: &str, level: LevelFilter) {
        self.table().set_level(name, level);
    }

    fn root_level(&self) -> LevelFilter {
        self.table().root
    }

    fn set_root_level(&self, level: LevelFilter) {
        self.table().root = level;
    }

    fn handler_count(&self) -> usize {
        self.table().handlers.len()
    }

    fn set_handler_levels(&self, level: LevelFilter) {
        self.table().set_handler_levels(level);
    }

    fn add_handler(&self, handler: Handler) {
        self.handlers_added.fetch_add(1, Ordering::SeqCst);
        self.table().handlers.push(handler);
    }

    fn remove_first_handler(&self) -> Option<Handler> {
        self.table().remove_first_handler()
    }

    /// Parses like the real facility, but configured handlers discard
    /// their output instead of opening stderr or files.
    fn read_configuration(&self, source: &str) -> Result<()> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.configurations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(source.to_string());

        let props = LogProperties::parse(source)?;
        let level = props.handler_level.unwrap_or(LevelFilter::TRACE);
        let handlers: Vec<Handler> = props
            .handlers
            .iter()
            .map(|spec| Handler::new(format!("{spec:?}"), std::io::sink).with_level(level))
            .collect();

        self.handlers_added.fetch_add(handlers.len(), Ordering::SeqCst);
        self.table().apply(&props, handlers);
        Ok(())
    }

    fn reset(&self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
        self.table().reset();
    }

    fn silence_target(&self, target: &str) {
        self.silences.fetch_add(1, Ordering::SeqCst);
        self.table().silenced.insert(target.to_string());
    }
}
