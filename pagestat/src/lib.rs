//! Page statistics for `lackey` memory traces (`pagestat`)
//!
//! Counts the unique pages touched by each access kind, and the accesses
//! before, between and after a pair of marker addresses.

// Modules
pub mod aggregator;
pub mod analyzer;
pub mod error;
pub mod phase;
pub mod report;
pub mod trace;

// Exports
pub use self::{
	aggregator::Aggregator,
	analyzer::{Analyzer, Classifier},
	error::{MalformedMarkerError, MalformedTraceError, TraceError},
	phase::{Markers, Phase},
	report::Report,
	trace::{AccessKind, BufReadTraceEvents, TraceEvent},
};
