//! Report

// Imports
use {crate::phase::Phase, std::fmt};

/// Report.
///
/// Displays as the classic `analyze_trace` summary, with each value
/// right-aligned on a 20-character column.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Report {
	/// Unique instruction pages
	pub code_pages: usize,

	/// Unique data pages (`store_pages + load_pages + modify_pages`)
	pub data_pages: usize,

	pub store_pages:  usize,
	pub load_pages:   usize,
	pub modify_pages: usize,

	/// Accesses before the start marker
	pub before: u64,

	/// Accesses between the markers, including the end marker
	pub between: u64,

	/// Accesses after the end marker
	pub after: u64,

	/// Accesses outside of the markers (`before + after`)
	pub outside: u64,

	/// Phase the trace ended in
	pub phase: Phase,
}

impl fmt::Display for Report {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Unique code pages (I):       : {:>20}", self.code_pages)?;
		writeln!(f, "Unique data pages (S + L + M): {:>20}", self.data_pages)?;
		writeln!(f, "                            S: {:>20}", self.store_pages)?;
		writeln!(f, "                            L: {:>20}", self.load_pages)?;
		writeln!(f, "                            M: {:>20}", self.modify_pages)?;
		writeln!(f, "Memory accesses before")?;
		writeln!(f, "and after the markers:         {:>20}", self.outside)?;
		writeln!(f, "Memory accesses")?;
		writeln!(f, "in algorithm component:        {:>20}", self.between)?;

		Ok(())
	}
}
