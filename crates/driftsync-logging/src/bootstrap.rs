//! Once-only logging initialisation and process-wide level control.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::level_filters::LevelFilter;

use crate::error::{LoggingError, Result};
use crate::facility::LoggingFacility;
use crate::handler::Handler;

/// Name of the local override file, looked up in the working directory.
pub const LOCAL_PROPERTIES_FILE: &str = "logging.properties";

/// Configuration compiled into the binary.
pub const BUNDLED_PROPERTIES: &str = include_str!("../resources/logging.properties");

/// Third-party targets that log far more than they are worth at info.
pub const NOISY_TARGETS: &[&str] = &["reqwest", "hyper", "h2"];

/// Where the bootstrap looks for its configuration.
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Local override file. Relative paths resolve against the working
    /// directory at `init` time.
    pub local_file: PathBuf,

    /// Fallback when the local file is absent or unreadable. `None` leaves
    /// no fallback.
    pub bundled: Option<&'static str>,

    /// Mute [`noisy_targets`](Self::noisy_targets) before configuring.
    pub suppress_noisy_targets: bool,

    pub noisy_targets: Vec<String>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            local_file: PathBuf::from(LOCAL_PROPERTIES_FILE),
            bundled: Some(BUNDLED_PROPERTIES),
            suppress_noisy_targets: true,
            noisy_targets: NOISY_TARGETS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Which configuration `init` ended up using.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    Local(PathBuf),
    Bundled,
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => write!(f, "{}", path.display()),
            Self::Bundled => f.write_str("bundled resource"),
        }
    }
}

/// Initialises a [`LoggingFacility`] at most once and mutates it afterwards.
///
/// `init` may be called from any number of threads and entry points; the
/// first caller does the work and every other caller returns immediately.
/// The initialised flag is never cleared, not even by
/// [`disable_logging`](Self::disable_logging).
pub struct LoggingBootstrap<F> {
    facility: F,
    options: LoggingOptions,
    initialized: AtomicBool,
}

impl<F: LoggingFacility> LoggingBootstrap<F> {
    pub fn new(facility: F) -> Self {
        Self::with_options(facility, LoggingOptions::default())
    }

    pub fn with_options(facility: F, options: LoggingOptions) -> Self {
        Self {
            facility,
            options,
            initialized: AtomicBool::new(false),
        }
    }

    pub fn facility(&self) -> &F {
        &self.facility
    }

    pub fn options(&self) -> &LoggingOptions {
        &self.options
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Configure logging, once.
    ///
    /// Never fails: if no configuration can be read or applied, a
    /// diagnostic is printed to stderr and logging stays as it was. A
    /// failed attempt still counts as the one initialisation.
    pub fn init(&self) {
        if self
            .initialized
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        match self.configure() {
            Ok(origin) => tracing::debug!(source = %origin, "logging configured"),
            Err(e) => {
                eprintln!("SEVERE: could not load logging configuration: {e}");
                tracing::error!(error = %e, "could not load logging configuration");
            }
        }
    }

    fn configure(&self) -> Result<ConfigOrigin> {
        if self.options.suppress_noisy_targets {
            self.suppress_noisy_targets();
        }

        let (origin, text) = self.read_source()?;
        self.facility.read_configuration(&text)?;
        Ok(origin)
    }

    fn suppress_noisy_targets(&self) {
        for target in &self.options.noisy_targets {
            self.facility.silence_target(target);
        }
    }

    /// Local file if present and readable, else the bundled text.
    fn read_source(&self) -> Result<(ConfigOrigin, Cow<'static, str>)> {
        let local = &self.options.local_file;
        let mut local_err = None;

        if local.is_file() {
            match fs::read_to_string(local) {
                Ok(text) => return Ok((ConfigOrigin::Local(local.clone()), Cow::Owned(text))),
                Err(source) => local_err = Some(source),
            }
        }

        match (self.options.bundled, local_err) {
            (Some(text), _) => Ok((ConfigOrigin::Bundled, Cow::Borrowed(text))),
            (None, Some(source)) => Err(LoggingError::Read {
                path: local.clone(),
                source,
            }),
            (None, None) => Err(LoggingError::NoSource),
        }
    }

    /// Set every known logger, every root handler and the root itself to
    /// `level`.
    pub fn set_global_level(&self, level: LevelFilter) {
        for name in self.facility.logger_names() {
            self.facility.set_logger_level(&name, level);
        }
        self.facility.set_handler_levels(level);
        self.facility.set_root_level(level);
    }

    /// Attach `handler` to the root logger. Adding the same handler twice
    /// attaches it twice.
    pub fn add_global_handler(&self, handler: Handler) {
        self.facility.add_handler(handler);
    }

    /// Reset the facility, turn every level off and detach all root
    /// handlers. `init` stays a no-op afterwards.
    pub fn disable_logging(&self) {
        self.facility.reset();
        self.set_global_level(LevelFilter::OFF);

        while self.facility.remove_first_handler().is_some() {}
    }
}
