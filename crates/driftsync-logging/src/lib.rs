//! # DriftSync Logging
//!
//! Once-only logging bootstrap for every driftsync entry point.
//!
//! Configuration comes from a `logging.properties` file in the working
//! directory when one exists, otherwise from the copy bundled into the
//! binary:
//!
//! ```text
//! .level = info
//! driftsync_config.level = debug
//! handlers = stderr, file:/var/log/driftsync.log
//! handlers.level = trace
//! ```
//!
//! The process-wide functions ([`init`], [`set_global_level`],
//! [`add_global_handler`], [`disable_logging`]) drive a single
//! [`LoggingBootstrap`] over a [`TracingFacility`]. Tests build their own
//! bootstrap over a [`MemoryFacility`] instead.

pub mod bootstrap;
pub mod error;
pub mod facility;
pub mod handler;
pub mod memory;
pub mod properties;
pub mod tracing_facility;

use std::sync::OnceLock;

pub use bootstrap::{
    ConfigOrigin, LoggingBootstrap, LoggingOptions, BUNDLED_PROPERTIES, LOCAL_PROPERTIES_FILE,
    NOISY_TARGETS,
};
pub use error::{LoggingError, Result};
pub use facility::{LoggingFacility, DEFAULT_ROOT_LEVEL};
pub use handler::Handler;
pub use memory::MemoryFacility;
pub use properties::{parse_level, HandlerSpec, LogProperties};
pub use tracing::level_filters::LevelFilter;
pub use tracing_facility::TracingFacility;

static GLOBAL: OnceLock<LoggingBootstrap<TracingFacility>> = OnceLock::new();

/// The process-wide bootstrap.
pub fn global() -> &'static LoggingBootstrap<TracingFacility> {
    GLOBAL.get_or_init(|| LoggingBootstrap::new(TracingFacility::new()))
}

/// Configure process-wide logging. Only the first call does anything.
pub fn init() {
    global().init();
}

/// See [`LoggingBootstrap::set_global_level`].
pub fn set_global_level(level: LevelFilter) {
    global().set_global_level(level);
}

/// See [`LoggingBootstrap::add_global_handler`].
pub fn add_global_handler(handler: Handler) {
    global().add_global_handler(handler);
}

/// See [`LoggingBootstrap::disable_logging`].
pub fn disable_logging() {
    global().disable_logging();
}
