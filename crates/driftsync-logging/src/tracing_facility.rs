//! [`LoggingFacility`] backed by a `tracing-subscriber` registry.
//!
//! Every subscriber built here stacks a reloadable [`Targets`] filter for
//! the logger levels and a reloadable set of `fmt` layers, one per handler.
//! Each change to the logger table rebuilds both and swaps them into every
//! subscriber that is still alive, so levels and handlers can change at any
//! time after installation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::level_filters::LevelFilter;
use tracing::subscriber::Interest;
use tracing::{Metadata, Subscriber};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::{Layered, SubscriberExt};
use tracing_subscriber::{reload, Layer, Registry};

use crate::error::{LoggingError, Result};
use crate::facility::{LoggerTable, LoggingFacility};
use crate::handler::Handler;
use crate::properties::LogProperties;

type SharedTable = Arc<RwLock<LoggerTable>>;

/// Registry plus the level filter; the handler layers sit on top of this.
type Filtered = Layered<reload::Layer<Targets, Registry>, Registry>;

type HandlerLayers = Vec<Box<dyn Layer<Filtered> + Send + Sync>>;

fn read(table: &SharedTable) -> RwLockReadGuard<'_, LoggerTable> {
    table.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(table: &SharedTable) -> RwLockWriteGuard<'_, LoggerTable> {
    table.write().unwrap_or_else(PoisonError::into_inner)
}

/// Reload handles into one subscriber built by [`TracingFacility::subscriber`].
struct Reloaders {
    filter: reload::Handle<Targets, Registry>,
    handlers: reload::Handle<HandlerLayers, Filtered>,
}

/// The production logging facility.
#[derive(Default)]
pub struct TracingFacility {
    table: SharedTable,
    reloaders: Mutex<Vec<Reloaders>>,
    installed: AtomicBool,
}

impl TracingFacility {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry routed through this facility's levels and handlers.
    ///
    /// [`read_configuration`](LoggingFacility::read_configuration) installs
    /// one globally; tests can scope one with
    /// `tracing::subscriber::with_default` instead.
    pub fn subscriber(&self) -> impl Subscriber + Send + Sync {
        let mut reloaders = self.reloaders();
        let (targets, layers) = self.snapshot();

        let (filter, filter_handle) = reload::Layer::new(targets);
        let (handlers, handlers_handle) = reload::Layer::new(layers);
        reloaders.push(Reloaders {
            filter: filter_handle,
            handlers: handlers_handle,
        });

        Registry::default()
            .with(filter)
            .with(handlers)
            .with(CallsiteRecorder {
                table: Arc::clone(&self.table),
            })
    }

    /// Install [`subscriber`](Self::subscriber) as the global default.
    /// Does nothing after the first successful call.
    pub fn install(&self) -> Result<()> {
        if self.installed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        tracing::subscriber::set_global_default(self.subscriber()).map_err(|e| {
            self.installed.store(false, Ordering::Release);
            LoggingError::Install(e.to_string())
        })
    }

    pub fn is_installed(&self) -> bool {
        self.installed.load(Ordering::Acquire)
    }

    fn reloaders(&self) -> MutexGuard<'_, Vec<Reloaders>> {
        self.reloaders.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self) -> (Targets, HandlerLayers) {
        let table = read(&self.table);
        (table.targets(), table.handler_layers())
    }

    /// Push the current table into every live subscriber and forget the
    /// ones that have been dropped.
    ///
    /// Reloading re-registers callsites, which takes the table's write
    /// lock; callers must not hold it.
    fn refresh(&self) {
        let mut reloaders = self.reloaders();
        reloaders.retain(|r| {
            let (targets, layers) = self.snapshot();
            r.filter.reload(targets).is_ok() && r.handlers.reload(layers).is_ok()
        });
    }
}

impl LoggingFacility for TracingFacility {
    fn logger_names(&self) -> Vec<String> {
        read(&self.table).loggers.keys().cloned().collect()
    }

    fn logger_level(&self, name: &str) -> Option<LevelFilter> {
        read(&self.table).loggers.get(name).copied().flatten()
    }

    fn set_logger_level(&self, name: &str, level: LevelFilter) {
        write(&self.table).set_level(name, level);
        self.refresh();
    }

    fn root_level(&self) -> LevelFilter {
        read(&self.table).root
    }

    fn set_root_level(&self, level: LevelFilter) {
        write(&self.table).root = level;
        self.refresh();
    }

    fn handler_count(&self) -> usize {
        read(&self.table).handlers.len()
    }

    fn set_handler_levels(&self, level: LevelFilter) {
        write(&self.table).set_handler_levels(level);
        self.refresh();
    }

    fn add_handler(&self, handler: Handler) {
        write(&self.table).handlers.push(handler);
        self.refresh();
    }

    fn remove_first_handler(&self) -> Option<Handler> {
        let removed = write(&self.table).remove_first_handler();
        self.refresh();
        removed
    }

    fn read_configuration(&self, source: &str) -> Result<()> {
        let props = LogProperties::parse(source)?;
        let handlers = props.build_handlers()?;

        write(&self.table).apply(&props, handlers);
        self.refresh();
        self.install()
    }

    fn reset(&self) {
        write(&self.table).reset();
        self.refresh();
    }

    fn silence_target(&self, target: &str) {
        write(&self.table).silenced.insert(target.to_string());
        self.refresh();
    }
}

/// Records every target tracing registers a callsite for as a logger name.
struct CallsiteRecorder {
    table: SharedTable,
}

impl<S: Subscriber> Layer<S> for CallsiteRecorder {
    fn register_callsite(&self, metadata: &'static Metadata<'static>) -> Interest {
        write(&self.table).register(metadata.target());
        // No opinion; the filter and handler layers decide.
        Interest::always()
    }
}
