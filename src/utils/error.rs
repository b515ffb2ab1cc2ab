use thiserror::Error;

#[derive(Error, Debug)]
pub enum CircuitError {
    #[error("Coordinate ({x}, {y}) is outside the {size}x{size} grid")]
    OutOfBounds { x: usize, y: usize, size: usize },

    #[error("No {kind} at ({x}, {y})")]
    NotFound { kind: String, x: usize, y: usize },

    #[error("Total resistance is zero, current cannot be computed")]
    DivisionByZero,

    #[error("Analysis produced a non-finite {quantity}")]
    NonFiniteResult { quantity: String },

    #[error("Grid size {size} is outside the allowed range {min}..={max}")]
    InvalidGridSize { size: usize, min: usize, max: usize },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Cannot parse command '{line}': {reason}")]
    CommandParseError { line: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Editing,
    Analysis,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CircuitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CircuitError::OutOfBounds { .. }
            | CircuitError::NotFound { .. }
            | CircuitError::InvalidGridSize { .. }
            | CircuitError::InvalidValue { .. } => ErrorCategory::Editing,
            CircuitError::DivisionByZero | CircuitError::NonFiniteResult { .. } => {
                ErrorCategory::Analysis
            }
            CircuitError::InvalidConfigValueError { .. }
            | CircuitError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            CircuitError::CommandParseError { .. } => ErrorCategory::Input,
            CircuitError::IoError(_) | CircuitError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    /// 編輯類錯誤不影響整體流程，只有系統錯誤才是致命的
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Editing | ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Analysis => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CircuitError::OutOfBounds { x, y, .. } => {
                format!("Cell ({}, {}) is not on the board", x, y)
            }
            CircuitError::NotFound { kind, x, y } => {
                format!("There is no {} at ({}, {}) to edit", kind, x, y)
            }
            CircuitError::DivisionByZero => {
                "The circuit has zero total resistance".to_string()
            }
            CircuitError::NonFiniteResult { quantity } => {
                format!("The {} is too large to represent", quantity)
            }
            CircuitError::InvalidGridSize { min, max, .. } => {
                format!("Grid size must be between {} and {}", min, max)
            }
            CircuitError::InvalidValue { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            CircuitError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            CircuitError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            CircuitError::CommandParseError { line, reason } => {
                format!("Unrecognised command '{}': {}", line, reason)
            }
            CircuitError::IoError(e) => format!("File system error: {}", e),
            CircuitError::SerializationError(e) => format!("Output encoding failed: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CircuitError::OutOfBounds { .. } => "Pick a cell inside the grid or resize the board",
            CircuitError::NotFound { .. } => {
                "Place a component of the matching kind before editing its value"
            }
            CircuitError::DivisionByZero => "Give at least one resistor a positive resistance",
            CircuitError::NonFiniteResult { .. } => "Use smaller voltage and resistance values",
            CircuitError::InvalidGridSize { .. } => "Choose a size between 5 and 20",
            CircuitError::InvalidValue { .. } => {
                "Resistance must be a positive number and voltage must be finite"
            }
            CircuitError::InvalidConfigValueError { .. }
            | CircuitError::ConfigValidationError { .. } => {
                "Check the configuration file against the documented sections"
            }
            CircuitError::CommandParseError { .. } => {
                "Use tool, click, set, analyze, resize, clear or show"
            }
            CircuitError::IoError(_) => "Make sure the file exists and is readable",
            CircuitError::SerializationError(_) => "Retry without --json",
        }
    }
}

pub type Result<T> = std::result::Result<T, CircuitError>;
