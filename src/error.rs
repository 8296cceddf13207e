//! Errors raised at the data boundaries (score file, tuning file)
//!
//! The simulation itself never fails; these only surface from I/O and are
//! recovered by the callers with defaults.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}
