//! # TelQr Logger
//!
//! Installs the global `tracing` subscriber for the TelQr binaries and the
//! browser bundle.
//!
//! * Native builds write compact lines to stderr (stdout stays free for
//!   command output) and can add a rolling, non-blocking file sink, plain or
//!   JSON.
//! * `wasm32` builds forward every event to the browser console, using the
//!   console method that matches the event level. Timestamps are omitted
//!   there: the console adds its own and the wall clock is not available to
//!   the formatter.
//! * Use [`LoggerBuilder::env_filter`] to set module-directed filters
//!   (e.g., `"telqr=debug"`). Natively `RUST_LOG` is honoured when no
//!   explicit filter is given.
//!
//! ## Example
//!
//! ```rust
//! # use telqr_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("telqr")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

#[cfg(target_arch = "wasm32")]
mod console;
mod error;

#[cfg(target_arch = "wasm32")]
pub use crate::console::{ConsoleMakeWriter, ConsoleWriter};
pub use crate::error::LoggerError;
pub use tracing::level_filters::LevelFilter;
#[cfg(not(target_arch = "wasm32"))]
pub use tracing_appender::rolling::Rotation;

use private::Sealed;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;
use tracing::Subscriber;
#[cfg(not(target_arch = "wasm32"))]
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_MAX_FILES: usize = 7;
#[cfg(not(target_arch = "wasm32"))]
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

#[derive(Debug)]
pub struct LoggerConfig {
    console: bool,
    level: LevelFilter,
    env_filter: Option<String>,
    #[cfg(not(target_arch = "wasm32"))]
    file: Option<FileSink>,
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
struct FileSink {
    path: PathBuf,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            level: LevelFilter::INFO,
            env_filter: None,
            #[cfg(not(target_arch = "wasm32"))]
            file: None,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);
#[derive(Debug)]
pub struct NoFile;
#[derive(Debug)]
pub struct WithFile;

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}
impl Sealed for NoFile {}
impl Sealed for WithFile {}

/// A builder for configuring and installing the global subscriber.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName, F: Sealed = NoFile> {
    config: LoggerConfig,
    name: N,
    file_state: std::marker::PhantomData<F>,
}

impl<F: Sealed> LoggerBuilder<NoName, F> {
    /// Sets the name of the logger. Also the file prefix when a file sink is added.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName, F> {
        LoggerBuilder {
            name: WithName(name.into()),
            config: self.config,
            file_state: std::marker::PhantomData,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl LoggerBuilder<WithName, WithFile> {
    /// Configures maximum number of log files to keep.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn max_files(mut self, max: usize) -> Self {
        if let Some(file) = self.config.file.as_mut() {
            file.max_files = max;
        }
        self
    }

    /// Configures the log file rotation strategy.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        if let Some(file) = self.config.file.as_mut() {
            file.rotation = rotation;
        }
        self
    }

    /// Writes the file sink as JSON lines.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn json(mut self) -> Self {
        if let Some(file) = self.config.file.as_mut() {
            file.json = true;
        }
        self
    }
}

impl<F: Sealed> LoggerBuilder<WithName, F> {
    /// Configures the minimum log level to be emitted.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Adds an explicit env filter (e.g., `telqr=debug,telqr_web=trace`).
    ///
    /// Invalid filters will cause [`LoggerBuilder::init`] to return an error.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    /// Enables the console sink (stderr natively, the browser console on wasm).
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Adds a daily-rotated file sink under `path`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn path(self, path: impl Into<PathBuf>) -> LoggerBuilder<WithName, WithFile> {
        let mut config = self.config;
        config.file = Some(FileSink {
            path: path.into(),
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
        });
        LoggerBuilder { config, name: self.name, file_state: std::marker::PhantomData }
    }

    /// Consumes the builder and installs the global subscriber.
    ///
    /// # Returns
    /// A [`Logger`] handle. Natively it owns the [`WorkerGuard`] of the file
    /// sink; keep it alive for the duration of the program so buffered lines
    /// are flushed.
    ///
    /// # Errors
    /// Returns [`LoggerError::Subscriber`] if a global subscriber has already been set.
    /// Returns [`LoggerError::InvalidConfiguration`] for invalid builder settings.
    pub fn init(self) -> Result<Logger, LoggerError> {
        validate_config(&self.config, &self.name.0)?;

        let env_filter = build_env_filter(&self.config)?;

        let mut layers = Vec::new();
        if self.config.console {
            layers.push(console_layer());
        }

        #[cfg(not(target_arch = "wasm32"))]
        let guard = match &self.config.file {
            Some(sink) => {
                let (file_layer, guard) = file_layer(sink, &self.name.0)?;
                layers.push(file_layer);
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::invalid(
                "No logging layers enabled. Enable console or file output.",
            ));
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger {
            #[cfg(not(target_arch = "wasm32"))]
            guard,
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn console_layer<S>() -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    layer().compact().with_writer(std::io::stderr).with_ansi(true).boxed()
}

#[cfg(target_arch = "wasm32")]
fn console_layer<S>() -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    layer().compact().with_writer(ConsoleMakeWriter).with_ansi(false).without_time().boxed()
}

#[cfg(not(target_arch = "wasm32"))]
fn file_layer<S>(sink: &FileSink, name: &str) -> Result<(BoxedLayer<S>, WorkerGuard), LoggerError>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    use tracing_appender::rolling::RollingFileAppender;

    std::fs::create_dir_all(&sink.path).map_err(|e| LoggerError::Internal {
        message: e.to_string().into(),
        context: Some(format!("Failed to create path: {}", sink.path.display()).into()),
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(sink.rotation.clone())
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(sink.max_files)
        .build(&sink.path)?;

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file_layer = layer().with_writer(writer).with_ansi(false);
    let boxed = if sink.json { file_layer.json().boxed() } else { file_layer.boxed() };

    Ok((boxed, guard))
}

/// A handle to the installed logging system.
///
/// Natively this holds the file sink's background worker guard; drop it only
/// when the application is shutting down.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    #[cfg(not(target_arch = "wasm32"))]
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`] to configure the global subscriber.
    ///
    /// # Example
    ///
    /// ```rust
    /// use telqr_logger::{LevelFilter, Logger};
    ///
    /// let _logger = Logger::builder()
    ///     .name("telqr")
    ///     .level(LevelFilter::DEBUG)
    ///     .init()
    ///     .unwrap();
    /// ```
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder {
            config: LoggerConfig::default(),
            name: NoName,
            file_state: std::marker::PhantomData,
        }
    }

    /// Returns a reference to the file sink's worker guard, if present.
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

#[cfg_attr(target_arch = "wasm32", allow(unused_variables))]
fn validate_config(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::invalid("Logger name cannot be empty"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    if config.file.as_ref().is_some_and(|file| file.max_files == 0) {
        return Err(LoggerError::invalid("max_files must be greater than zero"));
    }

    Ok(())
}

fn build_env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    config.env_filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder
                .parse(filter)
                .map_err(|e| LoggerError::invalid(format!("Invalid env filter '{filter}': {e}")))
        },
    )
}
