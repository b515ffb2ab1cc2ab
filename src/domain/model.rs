use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_GRID_SIZE: usize = 5;
pub const MAX_GRID_SIZE: usize = 20;
pub const DEFAULT_GRID_SIZE: usize = 10;
pub const DEFAULT_RESISTANCE: f64 = 10.0;
pub const DEFAULT_VOLTAGE: f64 = 9.0;

/// 格子座標，x 為欄、y 為列
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wire {
    pub at: Coord,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Resistor,
    Battery,
}

impl ComponentKind {
    /// 屬性欄位名稱，用在錯誤訊息與指令解析
    pub fn property_name(&self) -> &'static str {
        match self {
            ComponentKind::Resistor => "resistance",
            ComponentKind::Battery => "voltage",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Resistor => write!(f, "resistor"),
            ComponentKind::Battery => write!(f, "battery"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ComponentValue {
    Resistor { resistance: f64 },
    Battery { voltage: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub at: Coord,
    #[serde(flatten)]
    pub value: ComponentValue,
}

impl Component {
    pub fn resistor(at: Coord, resistance: f64) -> Self {
        Self {
            at,
            value: ComponentValue::Resistor { resistance },
        }
    }

    pub fn battery(at: Coord, voltage: f64) -> Self {
        Self {
            at,
            value: ComponentValue::Battery { voltage },
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self.value {
            ComponentValue::Resistor { .. } => ComponentKind::Resistor,
            ComponentValue::Battery { .. } => ComponentKind::Battery,
        }
    }
}

/// 分析用的唯讀快照，順序沒有意義
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: usize,
    pub wires: Vec<Wire>,
    pub components: Vec<Component>,
}

impl Snapshot {
    pub fn new(size: usize, wires: Vec<Wire>, components: Vec<Component>) -> Self {
        Self {
            size,
            wires,
            components,
        }
    }

    pub fn component_at(&self, at: Coord) -> Option<&Component> {
        self.components.iter().find(|c| c.at == at)
    }

    pub fn wire_at(&self, at: Coord) -> Option<&Wire> {
        self.wires.iter().find(|w| w.at == at)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Diagnostic {
    NoBattery,
    NoResistor,
    NotConnected,
}

impl Diagnostic {
    pub fn code(&self) -> &'static str {
        match self {
            Diagnostic::NoBattery => "no-battery",
            Diagnostic::NoResistor => "no-resistor",
            Diagnostic::NotConnected => "not-connected",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Diagnostic::NoBattery => "No batteries in the circuit. Add at least one battery.",
            Diagnostic::NoResistor => "No resistors in the circuit. Add at least one resistor.",
            Diagnostic::NotConnected => {
                "Components are not connected. Add wires to connect the components."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub total_voltage: f64,
    pub total_resistance: f64,
    pub current: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum AnalysisOutcome {
    Diagnostic { diagnostic: Diagnostic },
    Measurement(Measurement),
}

impl AnalysisOutcome {
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        match self {
            AnalysisOutcome::Diagnostic { diagnostic } => Some(*diagnostic),
            AnalysisOutcome::Measurement(_) => None,
        }
    }

    pub fn measurement(&self) -> Option<&Measurement> {
        match self {
            AnalysisOutcome::Measurement(m) => Some(m),
            AnalysisOutcome::Diagnostic { .. } => None,
        }
    }
}

impl From<Diagnostic> for AnalysisOutcome {
    fn from(diagnostic: Diagnostic) -> Self {
        AnalysisOutcome::Diagnostic { diagnostic }
    }
}
