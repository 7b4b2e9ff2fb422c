//! Errors

// Imports
use std::{io, num::ParseIntError};

/// A line matched the trace pattern, but its address wasn't hexadecimal
#[derive(thiserror::Error, Debug)]
#[error("Malformed trace address {address:?}")]
pub struct MalformedTraceError {
	/// Address token, as found in the line
	pub address: String,

	/// Underlying error
	#[source]
	pub source: ParseIntError,
}

/// A marker wasn't a hexadecimal address
#[derive(thiserror::Error, Debug)]
#[error("Malformed marker {marker:?}, expected a hexadecimal address")]
pub struct MalformedMarkerError {
	/// Marker, as passed
	pub marker: String,

	/// Underlying error
	#[source]
	pub source: ParseIntError,
}

/// Error while reading trace events
#[derive(thiserror::Error, Debug)]
pub enum TraceError {
	/// Unable to read a line
	#[error("Unable to read trace line {line_number}")]
	Read {
		line_number: usize,
		#[source]
		source:      io::Error,
	},

	/// Line had a malformed address
	#[error("Malformed trace line {line_number}")]
	Malformed {
		line_number: usize,
		#[source]
		source:      MalformedTraceError,
	},
}
