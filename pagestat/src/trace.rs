//! Lackey trace parsing.
//!
//! Parses the output of `valgrind --tool=lackey --trace-mem=yes`, which
//! looks like the following:
//!
//! ```text
//! ==4242== Lackey, an example Valgrind tool
//! I  04000000,3
//!  S 1ffefffd78,8
//!  L 1ffefffd70,8
//!  M 0421e5c0,4
//! ```
//!
//! Any line that isn't an access record is ignored.

// Imports
use {
	crate::error::{MalformedTraceError, TraceError},
	once_cell::sync::Lazy,
	regex::Regex,
	std::{fmt, io, num::ParseIntError},
};

/// Access record pattern.
///
/// Captures the kind letter and the address token (everything up to the comma).
static LINE_PATTERN: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^\s*([ISLM])\s{1,2}([^,]*),").expect("Access record pattern should be valid"));

/// Access kind
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Debug)]
pub enum AccessKind {
	/// Instruction fetch (`I`)
	Instruction,

	/// Store (`S`)
	Store,

	/// Load (`L`)
	Load,

	/// Modify (`M`)
	Modify,
}

impl AccessKind {
	/// All access kinds
	pub const ALL: [Self; 4] = [Self::Instruction, Self::Store, Self::Load, Self::Modify];

	/// Parses an access kind from its trace letter
	pub fn from_letter(letter: &str) -> Option<Self> {
		match letter {
			"I" => Some(Self::Instruction),
			"S" => Some(Self::Store),
			"L" => Some(Self::Load),
			"M" => Some(Self::Modify),
			_ => None,
		}
	}

	/// Returns the trace letter of this kind
	pub fn letter(self) -> char {
		match self {
			Self::Instruction => 'I',
			Self::Store => 'S',
			Self::Load => 'L',
			Self::Modify => 'M',
		}
	}

	/// Returns if this kind accesses data (i.e. isn't an instruction fetch)
	pub fn is_data(self) -> bool {
		!matches!(self, Self::Instruction)
	}
}

/// Page.
///
/// The index of a `4KiB` page, *not* its address.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Page(u64);

impl fmt::Debug for Page {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Page").field(&format_args!("{:#x}", self.0)).finish()
	}
}

impl Page {
	/// Page shift
	pub const SHIFT: u32 = 12;

	/// Returns the page containing `address`
	pub fn containing(address: u64) -> Self {
		Self(address >> Self::SHIFT)
	}
}

/// Trace event
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct TraceEvent {
	/// Access kind
	pub kind: AccessKind,

	/// Byte address
	pub address: u64,
}

impl TraceEvent {
	/// Returns the page this event accessed
	pub fn page(&self) -> Page {
		Page::containing(self.address)
	}
}

/// Parses a single trace line.
///
/// Returns `Ok(None)` if the line isn't an access record.
///
/// # Errors
/// Returns an error if the line is an access record, but the address
/// isn't hexadecimal.
pub fn parse_line(line: &str) -> Result<Option<TraceEvent>, MalformedTraceError> {
	let Some(captures) = LINE_PATTERN.captures(line) else {
		return Ok(None);
	};

	// Note: The pattern only matches valid letters, so this should never be `None`
	let Some(kind) = AccessKind::from_letter(&captures[1]) else {
		return Ok(None);
	};

	let address = &captures[2];
	let address = self::parse_address(address).map_err(|source| MalformedTraceError {
		address: address.to_owned(),
		source,
	})?;

	Ok(Some(TraceEvent { kind, address }))
}

/// Parses a hexadecimal address, with an optional `0x` prefix.
pub fn parse_address(address: &str) -> Result<u64, ParseIntError> {
	let address = address.trim();
	let address = address
		.strip_prefix("0x")
		.or_else(|| address.strip_prefix("0X"))
		.unwrap_or(address);

	u64::from_str_radix(address, 16)
}

/// Iterator over all trace events of a reader.
///
/// Lines are read one at a time, so the trace is never fully in memory.
/// After the first error, no more events are returned.
#[derive(Debug)]
pub struct TraceEvents<R> {
	/// Reader
	reader: R,

	/// Line buffer
	line: Vec<u8>,

	/// Current line number (1-based)
	line_number: usize,

	/// Whether we've finished
	finished: bool,
}

impl<R: io::BufRead> TraceEvents<R> {
	/// Creates a new iterator over the events of `reader`
	pub fn new(reader: R) -> Self {
		Self {
			reader,
			line: Vec::new(),
			line_number: 0,
			finished: false,
		}
	}

	/// Reads the next event, if any
	fn read_next(&mut self) -> Result<Option<TraceEvent>, TraceError> {
		loop {
			self.line.clear();
			let bytes_read = self
				.reader
				.read_until(b'\n', &mut self.line)
				.map_err(|source| TraceError::Read {
					line_number: self.line_number + 1,
					source,
				})?;
			if bytes_read == 0 {
				return Ok(None);
			}
			self.line_number += 1;

			let line = String::from_utf8_lossy(&self.line);
			let line = line.trim_end_matches(['\n', '\r']);
			match self::parse_line(line) {
				Ok(Some(event)) => return Ok(Some(event)),
				Ok(None) => tracing::trace!(line_number = self.line_number, ?line, "Skipping line"),
				Err(source) => {
					return Err(TraceError::Malformed {
						line_number: self.line_number,
						source,
					})
				},
			}
		}
	}
}

impl<R: io::BufRead> Iterator for TraceEvents<R> {
	type Item = Result<TraceEvent, TraceError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let res = self.read_next().transpose();
		if !matches!(res, Some(Ok(_))) {
			self.finished = true;
		}

		res
	}
}

/// Extension trait for `R: io::BufRead` types to iterate over trace events
#[extend::ext(name = BufReadTraceEvents, supertraits = Sized)]
pub impl<R: io::BufRead> R {
	/// Returns an iterator over all trace events in this reader
	fn trace_events(self) -> TraceEvents<Self> {
		TraceEvents::new(self)
	}
}
