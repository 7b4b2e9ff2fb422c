//! Configuration

/// Configuration
#[derive(Debug)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Config {
	/// Debug output period (in seconds)
	pub debug_output_period_secs: f64,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			debug_output_period_secs: 1.0,
		}
	}
}
