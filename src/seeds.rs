//! Start points for propagation.

use glam::UVec2;
use serde::Deserialize;

use crate::coord::GridCoord;
use crate::error::{PropagationError, Result};

/// How a start raster's cell values turn into initial costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedCost {
    /// Every start point begins at cost zero.
    #[default]
    Zero,
    /// Every start point begins at its own raster value.
    Raster,
}

/// A start coordinate and the accumulated cost it begins with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seed {
    pub coord: GridCoord,
    pub cost: f64,
}

impl Seed {
    pub fn new(coord: GridCoord, cost: f64) -> Self {
        Self { coord, cost }
    }

    /// A zero-cost seed.
    pub fn at(coord: GridCoord) -> Self {
        Self::new(coord, 0.0)
    }
}

/// Extract base-layer seeds from a row-major start raster of `size`
/// (`x = ncols, y = nrows`). NaN cells are not start points.
///
/// Fails with [PropagationError::NoStartPoints] when every cell is NaN.
pub fn from_start_raster(values: &[f64], size: UVec2, mode: SeedCost) -> Result<Vec<Seed>> {
    let expected = size.x as usize * size.y as usize;
    if values.len() != expected {
        return Err(PropagationError::DimensionMismatch {
            what: "start raster",
            expected,
            actual: values.len(),
        });
    }

    let ncols = size.x as usize;
    let seeds: Vec<Seed> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .map(|(i, &v)| {
            let coord = GridCoord::base((i / ncols) as u32, (i % ncols) as u32);
            let cost = match mode {
                SeedCost::Zero => 0.0,
                SeedCost::Raster => v,
            };
            Seed::new(coord, cost)
        })
        .collect();

    if seeds.is_empty() {
        return Err(PropagationError::NoStartPoints);
    }
    Ok(seeds)
}
