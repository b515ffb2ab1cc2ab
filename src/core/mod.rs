pub mod analyzer;
pub mod command;
pub mod connectivity;
pub mod grid;
pub mod report;
pub mod session;
pub mod shared;

pub use crate::domain::model::{
    AnalysisOutcome, Component, ComponentKind, ComponentValue, Coord, Diagnostic, Measurement,
    Orientation, Snapshot, Wire,
};
pub use crate::domain::ports::{BoardSettings, ConnectivityCheck, ConnectivityMode};
pub use crate::utils::error::Result;
pub use session::{EditOutcome, Tool};
