//! Command line behavior of the `pagestat` binary

// Imports
use {
	pagestat::{Phase, Report},
	pretty_assertions::assert_eq,
	std::{
		fs,
		io::Write,
		process::{Command, Output, Stdio},
	},
};

const TRACE: &str = "\
==4242== Lackey, an example Valgrind tool
==4242== Command: ./simpleloop
I  400000,4
I  400004,4
 L 1effff8,8
 S 1effff0,8
 M 600010,4
I  400008,4
==4242==
";

/// Runs `pagestat` with `args`, feeding `stdin` to it
fn run(args: &[&str], stdin: &str) -> Output {
	let mut command = Command::new(env!("CARGO_BIN_EXE_pagestat"));
	command.args(args).env("RUST_LOG", "off");
	self::run_command(command, stdin)
}

/// Runs `command`, feeding `stdin` to it
fn run_command(mut command: Command, stdin: &str) -> Output {
	let mut child = command
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.expect("Unable to spawn pagestat");

	// Note: The child may exit without reading stdin, so ignore write errors
	if let Some(mut child_stdin) = child.stdin.take() {
		let _ = child_stdin.write_all(stdin.as_bytes());
	}

	child.wait_with_output().expect("Unable to wait for pagestat")
}

#[test]
fn usage_without_markers() {
	for args in [&[][..], &["400000"][..]] {
		let output = run(args, TRACE);

		assert!(!output.status.success());
		let stdout = String::from_utf8(output.stdout).expect("Stdout should be utf-8");
		assert_eq!(stdout.lines().count(), 1);
		assert!(stdout.starts_with("Usage:"), "Stdout: {stdout:?}");
	}
}

#[test]
fn report_from_stdin() {
	let output = run(&["400004", "600010"], TRACE);
	assert!(output.status.success(), "Output: {output:?}");

	let expected = "\
Unique code pages (I):       :                    1
Unique data pages (S + L + M):                    3
                            S:                    1
                            L:                    1
                            M:                    1
Memory accesses before
and after the markers:                            2
Memory accesses
in algorithm component:                           3
";
	assert_eq!(String::from_utf8(output.stdout).expect("Stdout should be utf-8"), expected);
}

#[test]
fn report_from_files() {
	let dir = tempfile::tempdir().expect("Unable to create temp dir");
	let (first, rest) = TRACE.split_at(TRACE.find(" L").expect("Trace should have a load"));
	let first_path = dir.path().join("first.trace");
	let rest_path = dir.path().join("rest.trace");
	fs::write(&first_path, first).expect("Unable to write trace");
	fs::write(&rest_path, rest).expect("Unable to write trace");

	let split = run(
		&[
			first_path.to_str().expect("Path should be utf-8"),
			rest_path.to_str().expect("Path should be utf-8"),
			"400004",
			"600010",
		],
		"",
	);
	let whole = run(&["400004", "600010"], TRACE);

	assert!(split.status.success(), "Output: {split:?}");
	assert_eq!(split.stdout, whole.stdout);
}

#[test]
fn report_from_files_and_stdin() {
	let dir = tempfile::tempdir().expect("Unable to create temp dir");
	let (first, rest) = TRACE.split_at(TRACE.find(" L").expect("Trace should have a load"));
	let first_path = dir.path().join("first.trace");
	fs::write(&first_path, first).expect("Unable to write trace");

	let mixed = run(
		&[first_path.to_str().expect("Path should be utf-8"), "-", "400004", "600010"],
		rest,
	);
	let whole = run(&["400004", "600010"], TRACE);

	assert!(mixed.status.success(), "Output: {mixed:?}");
	assert_eq!(mixed.stdout, whole.stdout);
}

#[test]
fn stderr_is_quiet_by_default() {
	let mut command = Command::new(env!("CARGO_BIN_EXE_pagestat"));
	command.args(["400004", "600010"]).env_remove("RUST_LOG");
	let output = self::run_command(command, TRACE);

	assert!(output.status.success(), "Output: {output:?}");
	assert!(output.stderr.is_empty(), "Stderr: {:?}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn json_output() {
	let dir = tempfile::tempdir().expect("Unable to create temp dir");
	let output_path = dir.path().join("report.json");

	let output = run(
		&["--output", output_path.to_str().expect("Path should be utf-8"), "0x400000", "1EFFFF8"],
		TRACE,
	);
	assert!(output.status.success(), "Output: {output:?}");

	let report = fs::read_to_string(&output_path).expect("Unable to read output");
	let report = serde_json::from_str::<Report>(&report).expect("Output should be a report");
	assert_eq!(report, Report {
		code_pages:   1,
		data_pages:   3,
		store_pages:  1,
		load_pages:   1,
		modify_pages: 1,
		before:       0,
		between:      2,
		after:        3,
		outside:      3,
		phase:        Phase::After,
	});
}

#[test]
fn malformed_marker_fails() {
	let output = run(&["400000", "not-hex"], TRACE);

	assert!(!output.status.success());
	assert!(output.stdout.is_empty());
}

#[test]
fn malformed_trace_fails_without_report() {
	let output = run(&["400000", "1effff8"], "I  400000,4\n S 1effzz0,8\n");

	assert!(!output.status.success());
	assert!(output.stdout.is_empty());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("1effzz0"), "Stderr: {stderr:?}");
}

#[test]
fn missing_trace_file_fails() {
	let dir = tempfile::tempdir().expect("Unable to create temp dir");
	let missing = dir.path().join("missing.trace");

	let output = run(&[missing.to_str().expect("Path should be utf-8"), "0", "0"], "");
	assert!(!output.status.success());
	assert!(output.stdout.is_empty());
}
