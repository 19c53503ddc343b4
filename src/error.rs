//! Setup errors
//!
//! The simulation itself never fails: bad positions are clamped and dying is a
//! game phase. Only loading configuration and room layouts can go wrong.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid room layout: {0}")]
    InvalidLayout(String),

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
}
