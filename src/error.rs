//! Session construction errors
//!
//! Per-frame updates never fail; only building a session can.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("invalid window dimensions {width}x{height}")]
    InvalidWindow { width: f32, height: f32 },

    #[error("brick layout is empty ({rows} rows x {cols} columns)")]
    EmptyLayout { rows: u32, cols: u32 },

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
}
