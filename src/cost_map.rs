use ahash::AHashSet;
use glam::UVec2;

use crate::config::Resolution;
use crate::coord::{Direction, GridCoord, Layer};
use crate::error::{PropagationError, Result};

/// A trait for a map that defines movement costs across a two-layer grid.
pub trait CostMap {
    /// Grid size as `x = ncols, y = nrows`.
    fn size(&self) -> UVec2;
    /// Per-cell movement cost. NaN marks a no-data cell.
    fn cost(&self, coord: GridCoord) -> f64;
    /// Whether the cell at `(row, col)` bridges the two layers.
    fn is_crossover(&self, row: u32, col: u32) -> bool;
}

/// A dense two-layer cost map with a sparse set of crossover cells.
///
/// # Example
/// ```rust
/// use multicost::*;
///
/// let mut map = CostMap2d::new(4, 4);
/// map.set_cost(GridCoord::second(1, 2), 0.5);
/// map.add_crossover(1, 1);
///
/// assert!(map.is_crossover(1, 1));
/// assert_eq!(0.5, map.cost(GridCoord::second(1, 2)));
/// ```
#[derive(Debug, Clone)]
pub struct CostMap2d {
    size: UVec2,
    layers: [Vec<f64>; 2],
    crossovers: AHashSet<UVec2>,
}

impl CostMap2d {
    /// Create a map where every cell on both layers costs `1.0` and no cell
    /// is a crossover.
    pub fn new(nrows: u32, ncols: u32) -> Self {
        Self::filled(nrows, ncols, 1.0)
    }

    pub fn filled(nrows: u32, ncols: u32, cost: f64) -> Self {
        let len = nrows as usize * ncols as usize;
        Self {
            size: UVec2::new(ncols, nrows),
            layers: [vec![cost; len], vec![cost; len]],
            crossovers: AHashSet::new(),
        }
    }

    /// Build from two row-major cost layers.
    pub fn from_layers(nrows: u32, ncols: u32, base: Vec<f64>, second: Vec<f64>) -> Result<Self> {
        if nrows == 0 || ncols == 0 {
            return Err(PropagationError::EmptyGrid);
        }
        let expected = nrows as usize * ncols as usize;
        for (what, layer) in [("base cost layer", &base), ("second cost layer", &second)] {
            if layer.len() != expected {
                return Err(PropagationError::DimensionMismatch {
                    what,
                    expected,
                    actual: layer.len(),
                });
            }
        }
        Ok(Self {
            size: UVec2::new(ncols, nrows),
            layers: [base, second],
            crossovers: AHashSet::new(),
        })
    }

    /// Mark crossover cells from a row-major raster. A cell is a crossover
    /// when its value is exactly `1`.
    pub fn with_crossover_raster(mut self, values: &[f64]) -> Result<Self> {
        let expected = self.len();
        if values.len() != expected {
            return Err(PropagationError::DimensionMismatch {
                what: "crossover raster",
                expected,
                actual: values.len(),
            });
        }
        let ncols = self.ncols() as usize;
        self.crossovers = values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 1.0)
            .map(|(i, _)| UVec2::new((i % ncols) as u32, (i / ncols) as u32))
            .collect();
        Ok(self)
    }

    pub fn nrows(&self) -> u32 {
        self.size.y
    }

    pub fn ncols(&self) -> u32 {
        self.size.x
    }

    /// Cells per layer.
    pub fn len(&self) -> usize {
        self.size.x as usize * self.size.y as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn to_index(&self, row: u32, col: u32) -> usize {
        row as usize * self.size.x as usize + col as usize
    }

    pub fn set_cost(&mut self, coord: GridCoord, cost: f64) {
        let i = self.to_index(coord.row, coord.col);
        self.layers[coord.layer.index()][i] = cost;
    }

    pub fn add_crossover(&mut self, row: u32, col: u32) {
        self.crossovers.insert(UVec2::new(col, row));
    }

    pub fn remove_crossover(&mut self, row: u32, col: u32) {
        self.crossovers.remove(&UVec2::new(col, row));
    }

    /// Number of crossover cells.
    pub fn crossover_count(&self) -> usize {
        self.crossovers.len()
    }

    /// The row-major cost values of one layer.
    pub fn layer(&self, layer: Layer) -> &[f64] {
        &self.layers[layer.index()]
    }

    pub fn layer_mut(&mut self, layer: Layer) -> &mut [f64] {
        &mut self.layers[layer.index()]
    }
}

impl CostMap for CostMap2d {
    fn size(&self) -> UVec2 {
        self.size
    }

    #[inline]
    fn cost(&self, coord: GridCoord) -> f64 {
        self.layers[coord.layer.index()][self.to_index(coord.row, coord.col)]
    }

    #[inline]
    fn is_crossover(&self, row: u32, col: u32) -> bool {
        self.crossovers.contains(&UVec2::new(col, row))
    }
}

/// Step weights derived from the grid resolution.
///
/// East/west steps weigh `1`, north/south steps weigh `ns_res / ew_res`, and
/// diagonals weigh the hypotenuse of the two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionWeights {
    pub horizontal: f64,
    pub vertical: f64,
    pub diagonal: f64,
    /// Weight of the crossover step between layers.
    pub bridge: f64,
}

impl DirectionWeights {
    pub fn new(resolution: Resolution, bridge: f64) -> Self {
        let horizontal = 1.0;
        let vertical = resolution.ns_res / resolution.ew_res;
        Self {
            horizontal,
            vertical,
            diagonal: (vertical * vertical + horizontal * horizontal).sqrt(),
            bridge,
        }
    }

    #[inline]
    pub fn weight(&self, dir: Direction) -> f64 {
        if dir.is_horizontal() {
            self.horizontal
        } else if dir.is_vertical() {
            self.vertical
        } else {
            self.diagonal
        }
    }
}

impl Default for DirectionWeights {
    fn default() -> Self {
        Self::new(Resolution::default(), 1.0)
    }
}

/// Cost of a step between two cells: the mean of their per-cell costs scaled
/// by the step weight. NaN if either cell has no data.
#[inline]
pub fn step_cost(from: f64, to: f64, weight: f64) -> f64 {
    (from + to) / 2.0 * weight
}
