use crate::core::{Component, ComponentKind, ComponentValue, Coord, Orientation, Snapshot, Wire};
use crate::domain::model::{
    DEFAULT_GRID_SIZE, DEFAULT_RESISTANCE, DEFAULT_VOLTAGE, MAX_GRID_SIZE, MIN_GRID_SIZE,
};
use crate::utils::error::{CircuitError, Result};
use crate::utils::validation::{validate_finite_value, validate_positive_value};
use std::collections::BTreeMap;

/// 新放置元件時使用的預設值
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentDefaults {
    pub resistance: f64,
    pub voltage: f64,
}

impl Default for ComponentDefaults {
    fn default() -> Self {
        Self {
            resistance: DEFAULT_RESISTANCE,
            voltage: DEFAULT_VOLTAGE,
        }
    }
}

/// `delete_at` 從格子移除的內容
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Removed {
    pub wire: Option<Wire>,
    pub component: Option<Component>,
}

impl Removed {
    pub fn is_empty(&self) -> bool {
        self.wire.is_none() && self.component.is_none()
    }
}

/// 正方形網格，每格最多一條導線與一個元件
///
/// 導線與元件各自以座標為鍵存放，同一格可以同時有兩者；尺寸只能透過 [`GridModel::reset`] 改變
#[derive(Debug, Clone)]
pub struct GridModel {
    size: usize,
    wires: BTreeMap<Coord, Wire>,
    components: BTreeMap<Coord, Component>,
    defaults: ComponentDefaults,
}

impl Default for GridModel {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            wires: BTreeMap::new(),
            components: BTreeMap::new(),
            defaults: ComponentDefaults::default(),
        }
    }
}

impl GridModel {
    pub fn new(size: usize) -> Result<Self> {
        Self::with_defaults(size, ComponentDefaults::default())
    }

    pub fn with_defaults(size: usize, defaults: ComponentDefaults) -> Result<Self> {
        validate_positive_value("defaults.resistance", defaults.resistance)?;
        validate_finite_value("defaults.voltage", defaults.voltage)?;
        let mut grid = Self {
            defaults,
            ..Self::default()
        };
        grid.reset(size)?;
        Ok(grid)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// 重設為空白網格；尺寸超出範圍時拒絕並保留原本狀態
    pub fn reset(&mut self, size: usize) -> Result<()> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            tracing::warn!("Rejected grid size {}", size);
            return Err(CircuitError::InvalidGridSize {
                size,
                min: MIN_GRID_SIZE,
                max: MAX_GRID_SIZE,
            });
        }

        self.size = size;
        self.wires.clear();
        self.components.clear();
        tracing::info!("Grid reset to {}x{}", size, size);
        Ok(())
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<Coord> {
        if x >= self.size || y >= self.size {
            return Err(CircuitError::OutOfBounds {
                x,
                y,
                size: self.size,
            });
        }
        Ok(Coord::new(x, y))
    }

    /// 回傳切換後該格是否有導線
    pub fn toggle_wire(&mut self, x: usize, y: usize) -> Result<bool> {
        let at = self.check_bounds(x, y)?;
        if self.wires.remove(&at).is_some() {
            tracing::debug!("Removed wire at {}", at);
            return Ok(false);
        }

        self.wires.insert(
            at,
            Wire {
                at,
                orientation: Orientation::Horizontal,
            },
        );
        tracing::debug!("Added wire at {}", at);
        Ok(true)
    }

    pub fn place_component(&mut self, kind: ComponentKind, x: usize, y: usize) -> Result<Component> {
        let at = self.check_bounds(x, y)?;
        if let Some(old) = self.components.remove(&at) {
            tracing::debug!("Replacing {} at {}", old.kind(), at);
        }

        let component = match kind {
            ComponentKind::Resistor => Component::resistor(at, self.defaults.resistance),
            ComponentKind::Battery => Component::battery(at, self.defaults.voltage),
        };
        self.components.insert(at, component);
        tracing::debug!("Placed {} at {}", kind, at);
        Ok(component)
    }

    pub fn delete_at(&mut self, x: usize, y: usize) -> Result<Removed> {
        let at = self.check_bounds(x, y)?;
        let removed = Removed {
            wire: self.wires.remove(&at),
            component: self.components.remove(&at),
        };
        if !removed.is_empty() {
            tracing::debug!("Cleared cell {}", at);
        }
        Ok(removed)
    }

    pub fn set_resistance(&mut self, x: usize, y: usize, value: f64) -> Result<()> {
        let at = self.check_bounds(x, y)?;
        match self.components.get_mut(&at).map(|c| &mut c.value) {
            Some(ComponentValue::Resistor { resistance }) => {
                validate_positive_value("resistance", value)?;
                *resistance = value;
                tracing::debug!("Resistance at {} set to {}", at, value);
                Ok(())
            }
            _ => Err(CircuitError::NotFound {
                kind: ComponentKind::Resistor.to_string(),
                x,
                y,
            }),
        }
    }

    pub fn set_voltage(&mut self, x: usize, y: usize, value: f64) -> Result<()> {
        let at = self.check_bounds(x, y)?;
        match self.components.get_mut(&at).map(|c| &mut c.value) {
            Some(ComponentValue::Battery { voltage }) => {
                validate_finite_value("voltage", value)?;
                *voltage = value;
                tracing::debug!("Voltage at {} set to {}", at, value);
                Ok(())
            }
            _ => Err(CircuitError::NotFound {
                kind: ComponentKind::Battery.to_string(),
                x,
                y,
            }),
        }
    }

    pub fn wire_at(&self, x: usize, y: usize) -> Result<Option<&Wire>> {
        let at = self.check_bounds(x, y)?;
        Ok(self.wires.get(&at))
    }

    pub fn component_at(&self, x: usize, y: usize) -> Result<Option<&Component>> {
        let at = self.check_bounds(x, y)?;
        Ok(self.components.get(&at))
    }

    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wires.is_empty() && self.components.is_empty()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.size,
            self.wires.values().copied().collect(),
            self.components.values().copied().collect(),
        )
    }
}
