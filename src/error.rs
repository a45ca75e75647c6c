//! Error types for cost propagation.
//!
//! Every variant is a configuration problem detected before propagation
//! starts. Per-cell numeric conditions (no-data costs, out-of-grid
//! neighbors) are absorbed by the engine and never surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("inappropriate maximum cost: {0:?}")]
    InvalidMaxCost(String),

    #[error("inappropriate maximum cost: {0}")]
    NegativeMaxCost(i64),

    #[error("invalid grid resolution: ns_res={ns_res}, ew_res={ew_res}")]
    InvalidResolution { ns_res: f64, ew_res: f64 },

    #[error("invalid crossover bridge weight: {0}")]
    InvalidBridgeWeight(f64),

    #[error("grid must have at least one row and one column")]
    EmptyGrid,

    #[error("{what} has {actual} cells, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("start point ({row}, {col}) is outside the grid")]
    SeedOutOfBounds { row: u32, col: u32 },

    #[error("no start points")]
    NoStartPoints,

    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T, E = PropagationError> = std::result::Result<T, E>;
