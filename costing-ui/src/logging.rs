//! Log output for the `costing` binary.
//!
//! Events go to stderr so that `costing report` can write the statement to
//! stdout untouched. A log file can be attached after startup, and the level
//! can be changed once the server config has been read.

use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};

use chrono::Local;
use thiserror::Error;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Registry,
    filter::ParseError,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("logging has not been initialized")]
    NotInitialized,

    #[error("invalid log level '{directive}': {source}")]
    InvalidDirective {
        directive: String,
        #[source]
        source: ParseError,
    },

    #[error("failed to apply log level: {0}")]
    Reload(#[from] reload::Error),

    #[error("cannot open log file '{}': {source}", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

// ─── event format ────────────────────────────────────────────────────────────

/// `<time> <LEVEL> <target> <fields>`
struct CostingFormat;

impl<S, N> FormatEvent<S, N> for CostingFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let level = meta.level();
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let target = short_target(meta.target());

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "\x1b[2m{timestamp}\x1b[0m {}{level:>5}\x1b[0m \x1b[36m{target}\x1b[0m ",
                level_color(level)
            )?;
        } else {
            write!(writer, "{timestamp} {level:>5} {target} ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

/// Drops the `costing_` crate prefix: `costing_server::error` -> `server::error`.
fn short_target(target: &str) -> &str {
    target.strip_prefix("costing_").unwrap_or(target)
}

// ─── log file ────────────────────────────────────────────────────────────────

type SharedFile = Arc<Mutex<Option<File>>>;

/// Writer target that discards output until a file is attached.
#[derive(Clone, Default)]
struct LogFileSlot(SharedFile);

impl LogFileSlot {
    fn attach(
        &self,
        file: File,
    ) {
        *self.lock() = Some(file);
    }

    fn lock(&self) -> MutexGuard<'_, Option<File>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct LogFileWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for LogFileWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        self.0.as_mut().map_or(Ok(buf.len()), |file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.as_mut().map_or(Ok(()), File::flush)
    }
}

impl<'a> MakeWriter<'a> for LogFileSlot {
    type Writer = LogFileWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter(self.lock())
    }
}

// ─── global state ────────────────────────────────────────────────────────────

static FILTER: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();
static LOG_FILE: OnceLock<LogFileSlot> = OnceLock::new();

/// True when `RUST_LOG` is set. Its directives take precedence over
/// configured levels.
pub fn env_filter_is_set() -> bool {
    std::env::var_os(EnvFilter::DEFAULT_ENV).is_some()
}

/// Replaces the active filter. Accepts a bare level such as `debug` or any
/// `EnvFilter` directive such as `costing_server=debug,info`.
pub fn set_log_level(directive: &str) -> Result<(), LoggingError> {
    let handle = FILTER.get().ok_or(LoggingError::NotInitialized)?;
    let filter =
        EnvFilter::try_new(directive).map_err(|source| LoggingError::InvalidDirective {
            directive: directive.to_string(),
            source,
        })?;
    handle.reload(filter)?;
    Ok(())
}

/// Appends all further events to `path`, replacing any file set earlier.
pub fn enable_file_logging(path: &Path) -> Result<(), LoggingError> {
    let slot = LOG_FILE.get().ok_or(LoggingError::NotInitialized)?;
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.to_path_buf(),
            source,
        })?;
    slot.attach(file);
    Ok(())
}

/// Installs the global subscriber. `default_directive` applies unless
/// `RUST_LOG` is set. Later calls are ignored.
pub fn init_logging(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let (filter, handle) = reload::Layer::new(filter);
    let file_slot = LogFileSlot::default();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(CostingFormat)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal());
    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(CostingFormat)
        .with_writer(file_slot.clone())
        .with_ansi(false);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    if installed.is_ok() {
        let _ = FILTER.set(handle);
        let _ = LOG_FILE.set(file_slot);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn short_target_strips_crate_prefix() {
        assert_eq!(short_target("costing_server::error"), "server::error");
        assert_eq!(short_target("costing_ui::app"), "ui::app");
        assert_eq!(short_target("tower_http::trace"), "tower_http::trace");
    }

    #[test]
    fn empty_slot_discards_writes() {
        let slot = LogFileSlot::default();
        let mut writer = slot.make_writer();

        assert_eq!(writer.write(b"dropped").unwrap(), 7);
        assert!(writer.flush().is_ok());
    }

    #[test]
    fn attached_slot_writes_to_file() {
        let path = std::env::temp_dir().join(format!("costing-log-{}.log", std::process::id()));
        let file = File::create(&path).unwrap();
        let slot = LogFileSlot::default();
        slot.attach(file);

        slot.make_writer().write_all(b"hello\n").unwrap();

        let mut contents = String::new();
        File::open(&path).unwrap().read_to_string(&mut contents).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(contents, "hello\n");
    }

    #[test]
    fn set_log_level_requires_init() {
        assert!(matches!(
            set_log_level("debug"),
            Err(LoggingError::NotInitialized)
        ));
    }
}
