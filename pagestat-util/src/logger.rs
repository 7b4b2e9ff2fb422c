//! Logger
//!
//! Logs to stderr, filtered by `RUST_LOG`, and optionally to a file,
//! filtered by `RUST_LOG_FILE`.

// Imports
use {
	std::{fs, io, path::Path, sync::Mutex},
	tracing::Level,
	tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter},
};

/// Logging before [`init`] is called.
///
/// Messages are buffered and emitted once the logger is initialized.
pub mod pre_init {
	// Imports
	use {
		std::{
			mem,
			sync::{Mutex, PoisonError},
		},
		tracing::Level,
	};

	/// Buffered messages
	static MESSAGES: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());

	/// Buffers a message with level `level`
	pub fn log(level: Level, msg: impl Into<String>) {
		MESSAGES
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.push((level, msg.into()));
	}

	/// Buffers a debug message
	pub fn debug(msg: impl Into<String>) {
		self::log(Level::DEBUG, msg);
	}

	/// Buffers a warning message
	pub fn warn(msg: impl Into<String>) {
		self::log(Level::WARN, msg);
	}

	/// Takes all buffered messages
	pub(super) fn take() -> Vec<(Level, String)> {
		mem::take(&mut *MESSAGES.lock().unwrap_or_else(PoisonError::into_inner))
	}
}

/// Initializes the global logger.
///
/// If `log_file` is passed, verbose logs will also be written there,
/// appending if `log_file_append` is set.
///
/// # Panics
/// Panics if a global logger was already set.
pub fn init(log_file: Option<&Path>, log_file_append: bool) {
	let stderr_layer = tracing_subscriber::fmt::layer()
		.with_writer(io::stderr)
		.with_filter(self::env_filter("RUST_LOG", LevelFilter::INFO));

	// Note: If we can't open the log file, we still want to log to stderr, so
	//       we just emit a warning after initializing.
	let log_file = log_file.and_then(|path| match self::open_log_file(path, log_file_append) {
		Ok(file) => Some(file),
		Err(err) => {
			pre_init::warn(format!("Unable to open log file {path:?}: {err}"));
			None
		},
	});
	let file_layer = log_file.map(|file| {
		tracing_subscriber::fmt::layer()
			.with_ansi(false)
			.with_writer(Mutex::new(file))
			.with_filter(self::env_filter("RUST_LOG_FILE", LevelFilter::DEBUG))
	});

	tracing_subscriber::registry().with(stderr_layer).with(file_layer).init();

	// Then emit everything logged before we existed
	for (level, msg) in pre_init::take() {
		match level {
			Level::ERROR => tracing::error!("{msg}"),
			Level::WARN => tracing::warn!("{msg}"),
			Level::INFO => tracing::info!("{msg}"),
			Level::DEBUG => tracing::debug!("{msg}"),
			Level::TRACE => tracing::trace!("{msg}"),
		}
	}
}

/// Creates an env filter from `var`, defaulting to `default`
fn env_filter(var: &str, default: LevelFilter) -> EnvFilter {
	EnvFilter::builder()
		.with_default_directive(default.into())
		.with_env_var(var)
		.from_env_lossy()
}

/// Opens the log file
fn open_log_file(path: &Path, append: bool) -> Result<fs::File, io::Error> {
	fs::OpenOptions::new()
		.create(true)
		.write(true)
		.append(append)
		.truncate(!append)
		.open(path)
}
