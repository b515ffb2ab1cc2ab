use crate::core::analyzer::CircuitAnalyzer;
use crate::core::grid::{ComponentDefaults, GridModel, Removed};
use crate::core::{AnalysisOutcome, BoardSettings, Component, ComponentKind, Snapshot};
use crate::utils::error::{CircuitError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 目前選用的編輯工具
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Wire,
    Resistor,
    Battery,
    Delete,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tool::Wire => "wire",
            Tool::Resistor => "resistor",
            Tool::Battery => "battery",
            Tool::Delete => "delete",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Tool {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "wire" => Ok(Tool::Wire),
            "resistor" => Ok(Tool::Resistor),
            "battery" => Ok(Tool::Battery),
            "delete" => Ok(Tool::Delete),
            other => Err(CircuitError::CommandParseError {
                line: s.to_string(),
                reason: format!("unknown tool '{}'", other),
            }),
        }
    }
}

/// 對格子套用目前工具的結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditOutcome {
    WireToggled { present: bool },
    /// 新放置的元件，呼叫端可據此開啟屬性編輯
    Placed(Component),
    Deleted(Removed),
}

/// 編輯 session，持有目前工具、網格與分析器
///
/// 開新 session 等同重設
pub struct EditingSession {
    tool: Tool,
    grid: GridModel,
    analyzer: CircuitAnalyzer,
}

impl Default for EditingSession {
    fn default() -> Self {
        Self {
            tool: Tool::default(),
            grid: GridModel::default(),
            analyzer: CircuitAnalyzer::default(),
        }
    }
}

impl EditingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings<S: BoardSettings + ?Sized>(settings: &S) -> Result<Self> {
        let defaults = ComponentDefaults {
            resistance: settings.default_resistance(),
            voltage: settings.default_voltage(),
        };
        let grid = GridModel::with_defaults(settings.grid_size(), defaults)?;
        tracing::debug!(
            "New session: {}x{} grid, connectivity {:?}",
            grid.size(),
            grid.size(),
            settings.connectivity()
        );
        Ok(Self {
            tool: Tool::default(),
            grid,
            analyzer: CircuitAnalyzer::for_mode(settings.connectivity()),
        })
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn select_tool(&mut self, tool: Tool) {
        tracing::debug!("Tool selected: {}", tool);
        self.tool = tool;
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn apply_at(&mut self, x: usize, y: usize) -> Result<EditOutcome> {
        match self.tool {
            Tool::Wire => Ok(EditOutcome::WireToggled {
                present: self.grid.toggle_wire(x, y)?,
            }),
            Tool::Resistor => Ok(EditOutcome::Placed(
                self.grid.place_component(ComponentKind::Resistor, x, y)?,
            )),
            Tool::Battery => Ok(EditOutcome::Placed(
                self.grid.place_component(ComponentKind::Battery, x, y)?,
            )),
            Tool::Delete => Ok(EditOutcome::Deleted(self.grid.delete_at(x, y)?)),
        }
    }

    pub fn set_property(&mut self, kind: ComponentKind, x: usize, y: usize, value: f64) -> Result<()> {
        match kind {
            ComponentKind::Resistor => self.grid.set_resistance(x, y, value),
            ComponentKind::Battery => self.grid.set_voltage(x, y, value),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.grid.snapshot()
    }

    pub fn analyze(&self) -> Result<AnalysisOutcome> {
        let outcome = self.analyzer.analyze(&self.grid.snapshot())?;
        match &outcome {
            AnalysisOutcome::Measurement(m) => {
                tracing::info!("⚡ Measured current {:.2} A", m.current)
            }
            AnalysisOutcome::Diagnostic { diagnostic } => {
                tracing::info!("Analysis diagnostic: {}", diagnostic.code())
            }
        }
        Ok(outcome)
    }

    pub fn resize(&mut self, size: usize) -> Result<()> {
        self.grid.reset(size)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.grid.reset(self.grid.size())
    }
}
