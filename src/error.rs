//! Error types for u-timetable.
//!
//! The sweep itself never fails; errors come from configuration and from
//! parsing caller-supplied settings.

use thiserror::Error;

/// Configuration and settings error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Sweep resolution must divide an hour evenly, got {0} minutes")]
    InvalidResolution(u32),

    #[error("{layout} layout: {px_per_hour} px/hour gives no pixel step at {resolution_min} min resolution")]
    EmptyPixelStep {
        layout: &'static str,
        px_per_hour: u32,
        resolution_min: u32,
    },

    #[error("{layout} layout: minimum block height must be positive")]
    ZeroMinimumHeight { layout: &'static str },

    #[error("Invalid day bound '{value}': expected H:MM")]
    InvalidDayBound { value: String },

    #[error("Day starts at {start}:00 but ends at {end}:00")]
    InvertedDayBounds { start: u32, end: u32 },

    #[error("Unknown layout: {0}")]
    UnknownLayout(String),
}

/// Result alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
