use crate::core::connectivity::{self, AnyWire};
use crate::core::{
    AnalysisOutcome, ComponentValue, ConnectivityCheck, ConnectivityMode, Diagnostic, Measurement,
    Snapshot,
};
use crate::utils::error::{CircuitError, Result};

/// 整體電路估算：加總所有電池電壓與電阻，再算出單一電流
///
/// 除了連通檢查之外不考慮拓撲
pub struct CircuitAnalyzer {
    connectivity: Box<dyn ConnectivityCheck>,
}

impl Default for CircuitAnalyzer {
    fn default() -> Self {
        Self {
            connectivity: Box::new(AnyWire),
        }
    }
}

impl CircuitAnalyzer {
    pub fn new(connectivity: Box<dyn ConnectivityCheck>) -> Self {
        Self { connectivity }
    }

    pub fn for_mode(mode: ConnectivityMode) -> Self {
        Self::new(connectivity::for_mode(mode))
    }

    pub fn analyze(&self, snapshot: &Snapshot) -> Result<AnalysisOutcome> {
        let mut voltages = Vec::new();
        let mut resistances = Vec::new();
        for component in &snapshot.components {
            match component.value {
                ComponentValue::Battery { voltage } => voltages.push(voltage),
                ComponentValue::Resistor { resistance } => resistances.push(resistance),
            }
        }

        if voltages.is_empty() {
            return Ok(Diagnostic::NoBattery.into());
        }
        if resistances.is_empty() {
            return Ok(Diagnostic::NoResistor.into());
        }
        if !self.connectivity.is_connected(snapshot) {
            return Ok(Diagnostic::NotConnected.into());
        }

        let total_voltage: f64 = voltages.iter().sum();
        let total_resistance: f64 = resistances.iter().sum();
        if total_resistance == 0.0 {
            tracing::warn!("Analysis aborted: total resistance is zero");
            return Err(CircuitError::DivisionByZero);
        }

        let current = total_voltage / total_resistance;
        for (quantity, value) in [
            ("total voltage", total_voltage),
            ("total resistance", total_resistance),
            ("current", current),
        ] {
            if !value.is_finite() {
                tracing::warn!("Analysis aborted: {} is {}", quantity, value);
                return Err(CircuitError::NonFiniteResult {
                    quantity: quantity.to_string(),
                });
            }
        }

        let measurement = Measurement {
            total_voltage,
            total_resistance,
            current,
        };
        tracing::debug!(
            "Analyzed {} batteries and {} resistors",
            voltages.len(),
            resistances.len()
        );
        Ok(AnalysisOutcome::Measurement(measurement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::connectivity::GraphTrace;
    use crate::core::{Component, Coord, Orientation, Wire};

    fn wire(x: usize, y: usize) -> Wire {
        Wire {
            at: Coord::new(x, y),
            orientation: Orientation::Horizontal,
        }
    }

    #[test]
    fn test_empty_snapshot_reports_no_battery() {
        let outcome = CircuitAnalyzer::default()
            .analyze(&Snapshot::new(10, vec![], vec![]))
            .unwrap();
        assert_eq!(outcome.diagnostic(), Some(Diagnostic::NoBattery));
    }

    #[test]
    fn test_resistors_without_battery_report_no_battery() {
        let snapshot = Snapshot::new(
            10,
            vec![wire(0, 0)],
            vec![Component::resistor(Coord::new(1, 1), 10.0)],
        );
        let outcome = CircuitAnalyzer::default().analyze(&snapshot).unwrap();
        assert_eq!(outcome.diagnostic(), Some(Diagnostic::NoBattery));
    }

    #[test]
    fn test_zero_total_resistance_fails() {
        let snapshot = Snapshot::new(
            10,
            vec![wire(0, 0)],
            vec![
                Component::battery(Coord::new(1, 1), 9.0),
                Component::resistor(Coord::new(2, 2), 0.0),
            ],
        );
        let result = CircuitAnalyzer::default().analyze(&snapshot);
        assert!(matches!(result, Err(CircuitError::DivisionByZero)));
    }

    #[test]
    fn test_overflowing_sums_are_rejected() {
        let huge_voltage = Snapshot::new(
            10,
            vec![wire(0, 0)],
            vec![
                Component::battery(Coord::new(1, 1), 1.7e308),
                Component::battery(Coord::new(2, 1), 1.7e308),
                Component::resistor(Coord::new(3, 1), 10.0),
            ],
        );
        let result = CircuitAnalyzer::default().analyze(&huge_voltage);
        assert!(matches!(
            result,
            Err(CircuitError::NonFiniteResult { ref quantity }) if quantity == "total voltage"
        ));

        let huge_resistance = Snapshot::new(
            10,
            vec![wire(0, 0)],
            vec![
                Component::battery(Coord::new(1, 1), 9.0),
                Component::resistor(Coord::new(2, 1), 1.7e308),
                Component::resistor(Coord::new(3, 1), 1.7e308),
            ],
        );
        let result = CircuitAnalyzer::default().analyze(&huge_resistance);
        assert!(matches!(
            result,
            Err(CircuitError::NonFiniteResult { ref quantity }) if quantity == "total resistance"
        ));
    }

    #[test]
    fn test_negative_voltage_sums_through() {
        let snapshot = Snapshot::new(
            10,
            vec![wire(0, 0)],
            vec![
                Component::battery(Coord::new(1, 1), 9.0),
                Component::battery(Coord::new(2, 1), -3.0),
                Component::resistor(Coord::new(3, 1), 12.0),
            ],
        );
        let outcome = CircuitAnalyzer::default().analyze(&snapshot).unwrap();
        let m = outcome.measurement().unwrap();
        assert_eq!(m.total_voltage, 6.0);
        assert_eq!(m.current, 0.5);
    }

    #[test]
    fn test_trace_mode_rejects_disjoint_layout() {
        let snapshot = Snapshot::new(
            10,
            vec![wire(9, 9)],
            vec![
                Component::battery(Coord::new(0, 0), 9.0),
                Component::resistor(Coord::new(5, 5), 10.0),
            ],
        );
        let loose = CircuitAnalyzer::default().analyze(&snapshot).unwrap();
        assert!(loose.measurement().is_some());

        let strict = CircuitAnalyzer::new(Box::new(GraphTrace))
            .analyze(&snapshot)
            .unwrap();
        assert_eq!(strict.diagnostic(), Some(Diagnostic::NotConnected));
    }
}
