//! Arguments

// Imports
use std::path::PathBuf;

/// Usage message, printed when the markers are missing
pub const USAGE: &str =
	"Usage: valgrind --tool=lackey --trace-mem=yes <prog> | pagestat <marker_start> <marker_end>";

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
pub struct Args {
	/// Log file
	///
	/// Specifies a file to perform verbose logging to.
	/// You can use `RUST_LOG_FILE` to set filtering options
	#[clap(long = "log-file")]
	pub log_file: Option<PathBuf>,

	/// Whether to append to the log file
	#[clap(long = "log-file-append")]
	pub log_file_append: bool,

	/// Config file
	#[clap(long = "config")]
	pub config_file: Option<PathBuf>,

	/// Output file
	///
	/// Writes the report as json to this file, in addition to stdout.
	#[clap(long = "output")]
	pub output_file: Option<PathBuf>,

	/// Trace files, followed by the start and end markers.
	///
	/// The markers are hexadecimal addresses. If no trace files are given,
	/// or a trace file is `-`, the trace is read from stdin.
	#[clap(value_name = "[TRACE_FILE]... MARKER_START MARKER_END")]
	pub positional: Vec<String>,
}

impl Args {
	/// Splits the positional arguments into the trace files and both markers.
	///
	/// Returns `None` if there aren't enough arguments for the markers.
	pub fn split_positional(&self) -> Option<(&[String], &str, &str)> {
		match self.positional.as_slice() {
			[trace_files @ .., marker_start, marker_end] => Some((trace_files, marker_start.as_str(), marker_end.as_str())),
			_ => None,
		}
	}
}
