//! Page statistics for `lackey` memory traces (`pagestat`)

// Modules
mod args;
mod config;

// Imports
use {
	self::{
		args::{Args, USAGE},
		config::Config,
	},
	anyhow::Context,
	clap::Parser,
	pagestat::{analyzer::RunOutput, Aggregator, Analyzer, BufReadTraceEvents, Markers},
	pagestat_util::logger,
	std::{
		fs,
		io::{self, BufReader, Write},
		process,
		time::Duration,
	},
};

fn main() -> Result<(), anyhow::Error> {
	// Get arguments
	let args = Args::parse();
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Note: Without both markers we don't do anything else, not even logging.
	let Some((trace_files, marker_start, marker_end)) = args.split_positional() else {
		println!("{USAGE}");
		process::exit(1);
	};

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	// Parse the markers
	let markers = Markers::parse(marker_start, marker_end).context("Unable to parse markers")?;
	tracing::debug!(?markers, "Parsed markers");

	// Read the config file
	let config = match &args.config_file {
		Some(config_path) => {
			let config_file = fs::File::open(config_path).context("Unable to open config file")?;
			serde_json::from_reader::<_, Config>(config_file).context("Unable to parse config file")?
		},
		None => Config::default(),
	};
	tracing::debug!(?config, "Using config");
	let debug_output_period =
		Duration::try_from_secs_f64(config.debug_output_period_secs).context("Invalid debug output period")?;

	// Then analyze all inputs, in order, as a single trace
	let inputs = match trace_files {
		[] => vec!["-"],
		trace_files => trace_files.iter().map(String::as_str).collect(),
	};
	let mut analyzer = Analyzer::new(debug_output_period);
	let mut aggregator = Aggregator::new(markers);
	for input in inputs {
		let output = self::analyze_input(&mut analyzer, &mut aggregator, input)
			.with_context(|| format!("Unable to analyze trace {input:?}"))?;
		tracing::debug!(?input, events = output.events, "Analyzed trace");
	}

	let report = aggregator.report();
	tracing::debug!(events = analyzer.total_events(), ?report, "Finished analyzing");

	// Print the report
	{
		let mut stdout = io::stdout().lock();
		write!(stdout, "{report}").context("Unable to write report")?;
		stdout.flush().context("Unable to flush stdout")?;
	}

	if let Some(output_path) = &args.output_file {
		let output_file = fs::File::create(output_path).context("Unable to create output file")?;
		serde_json::to_writer_pretty(output_file, &report).context("Unable to write to output file")?;
	}

	Ok(())
}

/// Analyzes a single input, where `-` is stdin
fn analyze_input(analyzer: &mut Analyzer, aggregator: &mut Aggregator, input: &str) -> Result<RunOutput, anyhow::Error> {
	let output = match input {
		"-" => analyzer.run(io::stdin().lock().trace_events(), aggregator),
		trace_path => {
			let trace_file = fs::File::open(trace_path).context("Unable to open trace file")?;
			analyzer.run(BufReader::new(trace_file).trace_events(), aggregator)
		},
	};

	output.context("Unable to read trace events")
}
