/// Error types for controls and configuration
use crate::controls::ControlId;
use thiserror::Error;

/// A rejected control change. The control state is left untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControlError {
    /// No control is registered under this key
    #[error("Unknown control: {0}")]
    Unknown(String),

    /// The value has the wrong shape for the control
    #[error("Control {id} expects {expected}")]
    WrongKind {
        id: ControlId,
        expected: &'static str,
    },

    /// The value is not part of the control's domain
    #[error("Value {value} is outside the domain of {id}")]
    OutOfDomain { id: ControlId, value: String },
}

/// Invalid dashboard configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration is not valid JSON for the expected shape
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the dashboard cannot use
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
