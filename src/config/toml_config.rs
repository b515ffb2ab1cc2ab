use crate::core::{BoardSettings, ConnectivityMode};
use crate::domain::model::{
    DEFAULT_GRID_SIZE, DEFAULT_RESISTANCE, DEFAULT_VOLTAGE, MAX_GRID_SIZE, MIN_GRID_SIZE,
};
use crate::utils::error::{CircuitError, Result};
use crate::utils::validation::{
    validate_finite_value, validate_positive_value, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub grid: GridConfig,
    pub defaults: DefaultsConfig,
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub size: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub resistance: f64,
    pub voltage: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            resistance: DEFAULT_RESISTANCE,
            voltage: DEFAULT_VOLTAGE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub connectivity: ConnectivityMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl BoardConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CircuitError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GRID_SIZE})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }
}

impl Validate for BoardConfig {
    fn validate(&self) -> Result<()> {
        validate_range("grid.size", self.grid.size, MIN_GRID_SIZE, MAX_GRID_SIZE)?;
        validate_positive_value("defaults.resistance", self.defaults.resistance)?;
        validate_finite_value("defaults.voltage", self.defaults.voltage)?;
        Ok(())
    }
}

impl BoardSettings for BoardConfig {
    fn grid_size(&self) -> usize {
        self.grid.size
    }

    fn default_resistance(&self) -> f64 {
        self.defaults.resistance
    }

    fn default_voltage(&self) -> f64 {
        self.defaults.voltage
    }

    fn connectivity(&self) -> ConnectivityMode {
        self.analysis.connectivity
    }
}
