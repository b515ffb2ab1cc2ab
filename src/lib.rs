pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::script::{ScriptRunner, ScriptSummary};
pub use config::BoardConfig;
pub use self::core::{analyzer::CircuitAnalyzer, grid::GridModel, session::EditingSession};
pub use utils::error::{CircuitError, Result};
