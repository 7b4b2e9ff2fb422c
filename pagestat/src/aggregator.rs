//! Aggregator

// Imports
use {
	crate::{
		analyzer::Classifier,
		phase::{Markers, Phase, PhaseCounters},
		report::Report,
		trace::{AccessKind, Page, TraceEvent},
	},
	std::{collections::HashSet, fmt},
};

/// Unique pages accessed, by access kind
#[derive(Clone, Default, Debug)]
pub struct PageSetsByKind {
	instruction: HashSet<Page>,
	store:       HashSet<Page>,
	load:        HashSet<Page>,
	modify:      HashSet<Page>,
}

impl PageSetsByKind {
	/// Creates empty page sets
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the page set of `kind`
	pub fn get(&self, kind: AccessKind) -> &HashSet<Page> {
		match kind {
			AccessKind::Instruction => &self.instruction,
			AccessKind::Store => &self.store,
			AccessKind::Load => &self.load,
			AccessKind::Modify => &self.modify,
		}
	}

	/// Inserts a page accessed by `kind`.
	///
	/// Returns whether the page was new for this kind.
	pub fn insert(&mut self, kind: AccessKind, page: Page) -> bool {
		let pages = match kind {
			AccessKind::Instruction => &mut self.instruction,
			AccessKind::Store => &mut self.store,
			AccessKind::Load => &mut self.load,
			AccessKind::Modify => &mut self.modify,
		};

		pages.insert(page)
	}

	/// Returns the number of unique pages accessed by `kind`
	pub fn len(&self, kind: AccessKind) -> usize {
		self.get(kind).len()
	}

	/// Returns the number of unique data pages.
	///
	/// This is the sum of each data kind's unique pages, so a page both
	/// loaded and stored is counted twice.
	pub fn data_len(&self) -> usize {
		AccessKind::ALL
			.into_iter()
			.filter(|kind| kind.is_data())
			.map(|kind| self.len(kind))
			.sum()
	}
}

/// Trace aggregator.
///
/// Collects the unique pages of each access kind and counts accesses
/// before, between and after the markers.
#[derive(Clone, Debug)]
pub struct Aggregator {
	/// Markers
	markers: Markers,

	/// Pages
	pages: PageSetsByKind,

	/// Current phase
	phase: Phase,

	/// Counters
	counters: PhaseCounters,

	/// Events consumed
	events: u64,
}

impl Aggregator {
	/// Creates a new aggregator
	pub fn new(markers: Markers) -> Self {
		Self {
			markers,
			pages: PageSetsByKind::new(),
			phase: Phase::Before,
			counters: PhaseCounters::default(),
			events: 0,
		}
	}

	/// Consumes an event
	pub fn consume(&mut self, event: TraceEvent) {
		self.events += 1;
		self.pages.insert(event.kind, event.page());

		let (next_phase, counted_phase) = self.phase.advance(event.address, &self.markers);
		if let Some(counted_phase) = counted_phase {
			self.counters.increment(counted_phase);
		}

		if next_phase != self.phase {
			tracing::debug!(
				prev_phase = ?self.phase,
				?next_phase,
				address = format_args!("{:#x}", event.address),
				event_idx = self.events - 1,
				"Phase transition"
			);
			self.phase = next_phase;
		}
	}

	/// Returns the unique pages accessed
	pub fn pages(&self) -> &PageSetsByKind {
		&self.pages
	}

	/// Returns the current phase
	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// Returns the phase counters
	pub fn counters(&self) -> &PhaseCounters {
		&self.counters
	}

	/// Returns the number of events consumed
	pub fn events(&self) -> u64 {
		self.events
	}

	/// Creates a report of everything consumed so far
	pub fn report(&self) -> Report {
		Report {
			code_pages:   self.pages.len(AccessKind::Instruction),
			data_pages:   self.pages.data_len(),
			store_pages:  self.pages.len(AccessKind::Store),
			load_pages:   self.pages.len(AccessKind::Load),
			modify_pages: self.pages.len(AccessKind::Modify),
			before:       self.counters.before,
			between:      self.counters.between,
			after:        self.counters.after,
			outside:      self.counters.outside(),
			phase:        self.phase,
		}
	}
}

impl Classifier for Aggregator {
	fn handle_event(&mut self, event: TraceEvent) {
		self.consume(event);
	}

	fn fmt_debug(&mut self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
		write!(f, "Phase: {:?}, Pages:", self.phase)?;
		for kind in AccessKind::ALL {
			write!(f, " {}={}", kind.letter(), self.pages.len(kind))?;
		}

		let PhaseCounters { before, between, after } = self.counters;
		write!(f, ", Accesses: {before} / {between} / {after}")
	}
}
