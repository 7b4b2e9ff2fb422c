//! Phases relative to the markers

// Imports
use crate::{error::MalformedMarkerError, trace};

/// Markers.
///
/// Addresses that delimit the region of interest in a trace.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Markers {
	/// Start address
	pub start: u64,

	/// End address
	pub end: u64,
}

impl Markers {
	/// Creates new markers
	pub fn new(start: u64, end: u64) -> Self {
		Self { start, end }
	}

	/// Parses markers from hexadecimal strings
	pub fn parse(start: &str, end: &str) -> Result<Self, MalformedMarkerError> {
		let parse = |marker: &str| {
			trace::parse_address(marker).map_err(|source| MalformedMarkerError {
				marker: marker.to_owned(),
				source,
			})
		};

		Ok(Self {
			start: parse(start)?,
			end:   parse(end)?,
		})
	}
}

/// Phase
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Phase {
	/// Before the start marker
	Before,

	/// Between the markers
	Between,

	/// After the end marker
	After,
}

impl Phase {
	/// Advances this phase with an access to `address`.
	///
	/// Returns the next phase, along with the phase the access should be
	/// counted in, if any.
	///
	/// The access that hits the start marker isn't counted anywhere, while
	/// the access that hits the end marker is counted as [`Phase::Between`].
	#[must_use]
	pub fn advance(self, address: u64, markers: &Markers) -> (Self, Option<Self>) {
		match self {
			Self::Before if address == markers.start => (Self::Between, None),
			Self::Before => (Self::Before, Some(Self::Before)),
			Self::Between if address == markers.end => (Self::After, Some(Self::Between)),
			Self::Between => (Self::Between, Some(Self::Between)),
			Self::After => (Self::After, Some(Self::After)),
		}
	}
}

/// Access counters for each phase
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub struct PhaseCounters {
	pub before:  u64,
	pub between: u64,
	pub after:   u64,
}

impl PhaseCounters {
	/// Increments the counter of `phase`
	pub fn increment(&mut self, phase: Phase) {
		*self.get_mut(phase) += 1;
	}

	/// Returns the counter of `phase` mutably
	fn get_mut(&mut self, phase: Phase) -> &mut u64 {
		match phase {
			Phase::Before => &mut self.before,
			Phase::Between => &mut self.between,
			Phase::After => &mut self.after,
		}
	}

	/// Returns the accesses outside of the markers
	pub fn outside(&self) -> u64 {
		self.before + self.after
	}

	/// Returns the total counted accesses
	pub fn total(&self) -> u64 {
		self.before + self.between + self.after
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const MARKERS: Markers = Markers { start: 0x10, end: 0x20 };

	#[test]
	fn before_waits_for_start() {
		assert_eq!(Phase::Before.advance(0x20, &MARKERS), (Phase::Before, Some(Phase::Before)));
		assert_eq!(Phase::Before.advance(0x10, &MARKERS), (Phase::Between, None));
	}

	#[test]
	fn between_counts_end_marker() {
		assert_eq!(
			Phase::Between.advance(0x10, &MARKERS),
			(Phase::Between, Some(Phase::Between))
		);
		assert_eq!(Phase::Between.advance(0x20, &MARKERS), (Phase::After, Some(Phase::Between)));
	}

	#[test]
	fn after_is_final() {
		for address in [0x10, 0x20, 0x30] {
			assert_eq!(Phase::After.advance(address, &MARKERS), (Phase::After, Some(Phase::After)));
		}
	}

	#[test]
	fn equal_markers() {
		let markers = Markers::new(0x10, 0x10);
		let (phase, counted) = Phase::Before.advance(0x10, &markers);
		assert_eq!((phase, counted), (Phase::Between, None));

		let (phase, counted) = phase.advance(0x10, &markers);
		assert_eq!((phase, counted), (Phase::After, Some(Phase::Between)));
	}

	#[test]
	fn parse_markers() {
		assert_eq!(Markers::parse("400000", "0x1EFFF8").expect("Markers should be valid"), Markers {
			start: 0x40_0000,
			end:   0x1e_fff8,
		});

		let err = Markers::parse("400000", "main").expect_err("Marker should be malformed");
		assert_eq!(err.marker, "main");
	}

	#[test]
	fn counters() {
		let mut counters = PhaseCounters::default();
		counters.increment(Phase::Before);
		counters.increment(Phase::Between);
		counters.increment(Phase::Between);
		counters.increment(Phase::After);

		assert_eq!(counters.between, 2);
		assert_eq!(counters.outside(), 2);
		assert_eq!(counters.total(), 4);
	}
}
