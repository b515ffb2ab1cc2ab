use crate::config::toml_config::BoardConfig;
use crate::core::ConnectivityMode;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "circuit-board")]
#[command(about = "Place wires, resistors and batteries on a grid and estimate the current")]
pub struct CliConfig {
    /// Command script to run; reads stdin when omitted
    pub script: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the grid size from the config
    #[arg(long)]
    pub size: Option<usize>,

    /// Override the connectivity check from the config
    #[arg(long, value_enum)]
    pub connectivity: Option<ConnectivityMode>,

    /// Print analysis results and snapshots as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 載入設定檔並套用命令列覆蓋設定
    pub fn resolve(&self) -> Result<BoardConfig> {
        let mut config = match &self.config {
            Some(path) => BoardConfig::from_file(path)?,
            None => BoardConfig::default(),
        };

        if let Some(size) = self.size {
            config.grid.size = size;
        }
        if let Some(mode) = self.connectivity {
            config.analysis.connectivity = mode;
        }

        config.validate()?;
        Ok(config)
    }
}
