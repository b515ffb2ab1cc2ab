use circuit_board::core::{ConnectivityMode, Diagnostic};
use circuit_board::utils::validation::Validate;
use circuit_board::{BoardConfig, EditingSession, ScriptRunner};
use std::io::Write;
use tempfile::NamedTempFile;

const SERIES_SCRIPT: &str = r#"
# battery, two wires and a resistor on one row
tool battery
click 0 4
tool wire
click 1 4
click 3 4
tool resistor
click 4 4
set resistance 4 4 18
analyze
"#;

fn run_with(config: &BoardConfig, script: &str) -> (circuit_board::ScriptSummary, String) {
    let session = EditingSession::with_settings(config).unwrap();
    let mut runner = ScriptRunner::new(session, false);
    let mut out = Vec::new();
    let summary = runner.run(script.as_bytes(), &mut out).unwrap();
    (summary, String::from_utf8(out).unwrap())
}

#[test]
fn test_any_wire_mode_measures_gapped_row() {
    let (summary, out) = run_with(&BoardConfig::default(), SERIES_SCRIPT);
    assert_eq!(summary.failed, 0);
    assert!(out.contains("Total Voltage: 9.00 V"));
    assert!(out.contains("Total Resistance: 18.00 Ω"));
    assert!(out.contains("Calculated Current: 0.50 A"));
}

#[test]
fn test_trace_mode_needs_continuous_wiring() {
    let mut config = BoardConfig::default();
    config.analysis.connectivity = ConnectivityMode::Trace;

    let (summary, out) = run_with(&config, SERIES_SCRIPT);
    assert_eq!(
        summary.last_outcome.and_then(|o| o.diagnostic()),
        Some(Diagnostic::NotConnected)
    );
    assert!(out.contains("Components are not connected"));

    let patched = format!("{}tool wire\nclick 2 4\nanalyze\n", SERIES_SCRIPT);
    let (summary, out) = run_with(&config, &patched);
    assert!(summary.last_outcome.unwrap().measurement().is_some());
    assert!(out.contains("Calculated Current: 0.50 A"));
}

#[test]
fn test_clear_and_resize_through_script() {
    let script = "tool battery\nclick 7 7\nresize 6\nclick 7 7\nclick 5 5\nclear\nshow\n";
    let (summary, out) = run_with(&BoardConfig::default(), script);
    assert_eq!(summary.failed, 1);
    assert!(out.contains("❌ line 4"));
    assert!(out.contains("Grid resized to 6x6"));
    assert!(out.contains("\"components\": []"));
}

#[test]
fn test_config_file_drives_session() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"
[grid]
size = 5

[defaults]
resistance = 3.0
voltage = 1.5

[analysis]
connectivity = "any-wire"
"#,
    )
    .unwrap();

    let config = BoardConfig::from_file(file.path()).unwrap();
    config.validate().unwrap();

    let (summary, out) = run_with(
        &config,
        "tool battery\nclick 0 0\ntool resistor\nclick 4 4\ntool wire\nclick 2 2\nanalyze\n",
    );
    assert_eq!(summary.failed, 0);
    assert!(out.contains("Calculated Current: 0.50 A"));
}

#[test]
fn test_zero_resistance_cannot_be_entered() {
    let script = "tool battery\nclick 0 0\ntool resistor\nclick 1 0\nset resistance 1 0 0\ntool wire\nclick 2 0\nanalyze\n";
    let (summary, out) = run_with(&BoardConfig::default(), script);
    assert_eq!(summary.failed, 1);
    assert!(out.contains("❌ line 5"));
    assert!(out.contains("Calculated Current: 0.90 A"));
}
