use crate::core::{AnalysisOutcome, Measurement, Snapshot};
use crate::utils::error::Result;

/// 三行量測結果，數值取兩位小數，單位依序為 `V`、`Ω`（U+03A9）、`A`
///
/// 輸出為 UTF-8；腳本化的使用者若只要 ASCII，請改用 `--json`
pub fn format_measurement(m: &Measurement) -> String {
    [
        format!("Total Voltage: {:.2} V", m.total_voltage),
        format!("Total Resistance: {:.2} Ω", m.total_resistance),
        format!("Calculated Current: {:.2} A", m.current),
    ]
    .join("\n")
}

/// 轉成給使用者看的文字；診斷結果只輸出訊息
pub fn format_outcome(outcome: &AnalysisOutcome) -> String {
    match outcome {
        AnalysisOutcome::Measurement(m) => format_measurement(m),
        AnalysisOutcome::Diagnostic { diagnostic } => diagnostic.message().to_string(),
    }
}

pub fn outcome_to_json(outcome: &AnalysisOutcome) -> Result<String> {
    Ok(serde_json::to_string(outcome)?)
}

pub fn snapshot_to_json(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Diagnostic;

    #[test]
    fn test_measurement_uses_two_decimals() {
        let m = Measurement {
            total_voltage: 9.0,
            total_resistance: 10.0,
            current: 0.9,
        };
        let text = format_measurement(&m);
        assert!(text.contains("Total Voltage: 9.00 V"));
        assert!(text.contains("Total Resistance: 10.00 Ω"));
        assert!(text.contains("Calculated Current: 0.90 A"));
    }

    #[test]
    fn test_diagnostic_formats_message() {
        let outcome: AnalysisOutcome = Diagnostic::NoBattery.into();
        assert!(format_outcome(&outcome).starts_with("No batteries in the circuit"));
    }

    #[test]
    fn test_outcome_json_is_tagged() {
        let outcome: AnalysisOutcome = Diagnostic::NotConnected.into();
        let json: serde_json::Value =
            serde_json::from_str(&outcome_to_json(&outcome).unwrap()).unwrap();
        assert_eq!(json["outcome"], "diagnostic");
        assert_eq!(json["diagnostic"], "not-connected");

        let outcome = AnalysisOutcome::Measurement(Measurement {
            total_voltage: 10.0,
            total_resistance: 10.0,
            current: 1.0,
        });
        let json: serde_json::Value =
            serde_json::from_str(&outcome_to_json(&outcome).unwrap()).unwrap();
        assert_eq!(json["outcome"], "measurement");
        assert_eq!(json["current"], 1.0);
    }

    #[test]
    fn test_omega_is_only_non_ascii_glyph() {
        let text = format_measurement(&Measurement {
            total_voltage: 1.5,
            total_resistance: 3.0,
            current: 0.5,
        });
        let non_ascii: Vec<char> = text.chars().filter(|c| !c.is_ascii()).collect();
        assert_eq!(non_ascii, vec!['\u{03A9}']);
    }
}
