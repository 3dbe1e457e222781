/// Error types for chart rendering
use thiserror::Error;

/// A render that could not produce a chart.
///
/// Non-fatal: the affected output slot shows a placeholder while the rest of
/// the dashboard keeps working.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Filtering left nothing to plot
    #[error("No observations for {scope} in {years}")]
    NoData { scope: String, years: String },

    /// The selection cannot be plotted at all
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
}

/// Type alias for Results using RenderError
pub type Result<T> = std::result::Result<T, RenderError>;
