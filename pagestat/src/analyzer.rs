//! Analyzer

// Imports
use {
	crate::{error::TraceError, trace::TraceEvent},
	std::{
		fmt,
		time::{Duration, Instant},
	},
};

/// Analyzer.
///
/// Feeds trace events to a classifier, in order.
#[derive(Debug)]
pub struct Analyzer {
	/// Debug output period
	///
	/// Interval in which to output debug output for the classifier
	debug_output_period: Duration,

	/// Last time we emitted debug output
	last_debug_time: Option<Instant>,

	/// Total events handled, across all runs
	total_events: u64,
}

impl Analyzer {
	/// Creates a new analyzer
	pub fn new(debug_output_period: Duration) -> Self {
		Self {
			debug_output_period,
			last_debug_time: None,
			total_events: 0,
		}
	}

	/// Runs the analyzer on all events from `events` with classifier `classifier`.
	///
	/// May be called multiple times with the same classifier, in which case
	/// the events are treated as a continuation of the previous run's.
	///
	/// # Errors
	/// Stops at the first error in `events`, returning it.
	pub fn run<C: Classifier>(
		&mut self,
		events: impl IntoIterator<Item = Result<TraceEvent, TraceError>>,
		classifier: &mut C,
	) -> Result<RunOutput, TraceError> {
		itertools::process_results(events, |events| {
			let mut run_events = 0;
			for event in events {
				classifier.handle_event(event);
				run_events += 1;
				self.total_events += 1;

				// Then show debug output, if it's been long enough
				let cur_time = Instant::now();
				let should_output = self
					.last_debug_time
					.map_or(true, |last_debug_time| cur_time.duration_since(last_debug_time) >= self.debug_output_period);
				if should_output {
					tracing::debug!(
						"[{} events] Debug: {}",
						self.total_events,
						pagestat_util::DisplayWrapper::new(|f| classifier.fmt_debug(f))
					);
					self.last_debug_time = Some(cur_time);
				}
			}

			RunOutput { events: run_events }
		})
	}

	/// Returns the total events handled, across all runs
	pub fn total_events(&self) -> u64 {
		self.total_events
	}
}

/// Output for [`Analyzer::run`]
#[derive(Clone, Copy, Debug)]
pub struct RunOutput {
	/// Events handled during the run
	pub events: u64,
}

/// Classifier
pub trait Classifier {
	/// Handles an event
	fn handle_event(&mut self, event: TraceEvent);

	/// Formats debug output to `f`.
	fn fmt_debug(&mut self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error>;
}
