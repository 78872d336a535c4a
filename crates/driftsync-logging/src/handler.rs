//! Output handlers attached to the root logger.

use std::fmt;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing::{Metadata, Subscriber};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use crate::error::{LoggingError, Result};

/// A named output with its own level.
///
/// Cloning a handler shares the underlying writer.
#[derive(Clone)]
pub struct Handler {
    name: String,
    level: LevelFilter,
    writer: SharedWriter,
}

impl Handler {
    /// A handler writing through `make_writer`, accepting every level.
    pub fn new<M>(name: impl Into<String>, make_writer: M) -> Self
    where
        M: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            level: LevelFilter::TRACE,
            writer: SharedWriter(Arc::new(BoxMakeWriter::new(make_writer))),
        }
    }

    pub fn stderr() -> Self {
        Self::new("stderr", std::io::stderr)
    }

    pub fn stdout() -> Self {
        Self::new("stdout", std::io::stdout)
    }

    /// A handler appending to `path`, created if missing.
    pub fn file(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LoggingError::OpenHandler {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(format!("file:{}", path.display()), Mutex::new(file)))
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn set_level(&mut self, level: LevelFilter) {
        self.level = level;
    }

    /// A plain-text `fmt` layer writing to this handler, capped at its
    /// level. `None` when the level is `OFF`.
    pub fn layer<S>(&self) -> Option<Box<dyn Layer<S> + Send + Sync>>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let level = self.level.into_level()?;
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .without_time()
            .with_writer(self.writer.clone().with_max_level(level));
        Some(layer.boxed())
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("name", &self.name)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}

/// A `BoxMakeWriter` that every clone of a handler writes through.
#[derive(Clone)]
struct SharedWriter(Arc<BoxMakeWriter>);

impl<'a> MakeWriter<'a> for SharedWriter {
    type Writer = <BoxMakeWriter as MakeWriter<'a>>::Writer;

    fn make_writer(&'a self) -> Self::Writer {
        self.0.make_writer()
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        self.0.make_writer_for(meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    fn log_through(handlers: &[Handler], f: impl FnOnce()) {
        let layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> =
            handlers.iter().filter_map(|h| h.layer()).collect();
        tracing::subscriber::with_default(Registry::default().with(layers), f);
    }

    #[test]
    fn test_file_handler_appends() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("app.log");
        let handler = Handler::file(&path).unwrap();

        log_through(&[handler.clone(), handler.clone()], || {
            tracing::info!(target: "file_test", "first");
        });
        log_through(&[handler.clone()], || {
            tracing::warn!(target: "file_test", "second");
        });

        let out = std::fs::read_to_string(&path).unwrap();
        assert_eq!(out.matches("first").count(), 2);
        assert_eq!(out.matches("second").count(), 1);
        assert!(out.lines().all(|l| l.contains("file_test")));
        assert_eq!(handler.name(), format!("file:{}", path.display()));
    }

    #[test]
    fn test_handler_level_caps_output() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("warn.log");
        let handler = Handler::file(&path).unwrap().with_level(LevelFilter::WARN);

        log_through(&[handler], || {
            tracing::info!(target: "cap_test", "chatter");
            tracing::error!(target: "cap_test", "failure");
        });

        let out = std::fs::read_to_string(&path).unwrap();
        assert!(out.contains("ERROR"));
        assert!(out.contains("failure"));
        assert!(!out.contains("chatter"));
    }

    #[test]
    fn test_off_handler_has_no_layer() {
        let handler = Handler::stderr().with_level(LevelFilter::OFF);
        assert!(handler.layer::<Registry>().is_none());
    }

    #[test]
    fn test_file_handler_bad_path() {
        let tmp = TempDir::new().unwrap();
        let err = Handler::file(&tmp.path().join("missing").join("app.log")).unwrap_err();
        assert!(matches!(err, LoggingError::OpenHandler { .. }));
        assert!(err.to_string().starts_with("cannot open log file"));
    }

    #[test]
    fn test_level_defaults_to_trace() {
        let mut handler = Handler::stderr();
        assert_eq!(handler.level(), LevelFilter::TRACE);
        handler.set_level(LevelFilter::WARN);
        assert_eq!(handler.with_level(LevelFilter::OFF).level(), LevelFilter::OFF);
    }
}
