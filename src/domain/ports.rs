use crate::domain::model::{Snapshot, DEFAULT_GRID_SIZE, DEFAULT_RESISTANCE, DEFAULT_VOLTAGE};
use serde::{Deserialize, Serialize};

/// 判斷快照中的元件是否構成可分析的電路
pub trait ConnectivityCheck: Send + Sync {
    fn is_connected(&self, snapshot: &Snapshot) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ConnectivityMode {
    #[default]
    AnyWire,
    Trace,
}

pub trait BoardSettings: Send + Sync {
    fn grid_size(&self) -> usize {
        DEFAULT_GRID_SIZE
    }

    fn default_resistance(&self) -> f64 {
        DEFAULT_RESISTANCE
    }

    fn default_voltage(&self) -> f64 {
        DEFAULT_VOLTAGE
    }

    fn connectivity(&self) -> ConnectivityMode {
        ConnectivityMode::AnyWire
    }
}
