//! The accumulated cost surface produced by propagation.

use glam::UVec2;

use crate::coord::{GridCoord, Layer};

/// Marker stored in cells that were never reached.
pub const NO_DATA: f64 = f64::NAN;

/// Best known accumulated cost for every cell of both layers.
///
/// Unreached cells hold [NO_DATA]. Values only ever decrease once set, so
/// the surface can be read back as the final result of a run or audited
/// mid-run through [crate::Propagator::run_observed].
#[derive(Debug, Clone, PartialEq)]
pub struct CostSurface {
    size: UVec2,
    layers: [Vec<f64>; 2],
}

impl CostSurface {
    pub fn new(nrows: u32, ncols: u32) -> Self {
        Self::with_size(UVec2::new(ncols, nrows))
    }

    /// Create an all-unset surface of `size` (`x = ncols, y = nrows`).
    pub fn with_size(size: UVec2) -> Self {
        let len = size.x as usize * size.y as usize;
        Self {
            size,
            layers: [vec![NO_DATA; len], vec![NO_DATA; len]],
        }
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn nrows(&self) -> u32 {
        self.size.y
    }

    pub fn ncols(&self) -> u32 {
        self.size.x
    }

    #[inline]
    fn to_index(&self, coord: GridCoord) -> usize {
        coord.row as usize * self.size.x as usize + coord.col as usize
    }

    /// The best known cost of `coord`, or `None` if it was never reached.
    #[inline]
    pub fn get(&self, coord: GridCoord) -> Option<f64> {
        let v = self.layers[coord.layer.index()][self.to_index(coord)];
        (!v.is_nan()).then_some(v)
    }

    pub fn is_set(&self, coord: GridCoord) -> bool {
        self.get(coord).is_some()
    }

    /// Record `cost` for `coord` if the cell is unset or `cost` is strictly
    /// lower than what it holds. Returns whether the cell changed.
    #[inline]
    pub fn improve(&mut self, coord: GridCoord, cost: f64) -> bool {
        let i = self.to_index(coord);
        let slot = &mut self.layers[coord.layer.index()][i];
        if slot.is_nan() || cost < *slot {
            *slot = cost;
            true
        } else {
            false
        }
    }

    /// Reset every cell to [NO_DATA].
    pub fn clear(&mut self) {
        for layer in self.layers.iter_mut() {
            layer.fill(NO_DATA);
        }
    }

    /// Row-major values for one layer, [NO_DATA] where unreached.
    pub fn layer(&self, layer: Layer) -> &[f64] {
        &self.layers[layer.index()]
    }

    /// A single row of one layer.
    pub fn row(&self, layer: Layer, row: u32) -> &[f64] {
        let w = self.size.x as usize;
        let start = row as usize * w;
        &self.layers[layer.index()][start..start + w]
    }

    /// Largest finite cost on either layer. Starts from zero, so a surface
    /// with nothing above zero reports `0.0`.
    pub fn peak_cost(&self) -> f64 {
        Layer::ALL
            .into_iter()
            .map(|l| self.peak_cost_in(l))
            .fold(0.0, f64::max)
    }

    /// Largest finite cost on one layer, with the same zero floor as
    /// [CostSurface::peak_cost].
    pub fn peak_cost_in(&self, layer: Layer) -> f64 {
        self.layers[layer.index()]
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }

    /// Number of reached cells across both layers.
    pub fn reached(&self) -> usize {
        self.layers
            .iter()
            .map(|l| l.iter().filter(|v| !v.is_nan()).count())
            .sum()
    }

    /// An iterator over every reached cell and its cost.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, f64)> + '_ {
        let w = self.size.x as usize;
        Layer::ALL.into_iter().flat_map(move |layer| {
            self.layers[layer.index()]
                .iter()
                .enumerate()
                .filter(|(_, v)| !v.is_nan())
                .map(move |(i, &v)| (GridCoord::new((i / w) as u32, (i % w) as u32, layer), v))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unset() {
        let surface = CostSurface::new(2, 3);
        assert_eq!(0, surface.reached());
        assert_eq!(None, surface.get(GridCoord::second(1, 2)));
        assert_eq!(0.0, surface.peak_cost());
    }

    #[test]
    fn improve_only_decreases() {
        let mut surface = CostSurface::new(2, 2);
        let c = GridCoord::base(1, 0);
        assert!(surface.improve(c, 5.0));
        assert!(!surface.improve(c, 5.0));
        assert!(!surface.improve(c, 6.0));
        assert!(surface.improve(c, 4.5));
        assert_eq!(Some(4.5), surface.get(c));
    }

    #[test]
    fn rows_and_layers() {
        let mut surface = CostSurface::new(2, 3);
        surface.improve(GridCoord::base(1, 2), 3.0);
        surface.improve(GridCoord::second(0, 0), 8.0);

        let row = surface.row(Layer::Base, 1);
        assert_eq!(3, row.len());
        assert!(row[0].is_nan());
        assert_eq!(3.0, row[2]);
        assert_eq!(8.0, surface.layer(Layer::Second)[0]);
    }

    #[test]
    fn peak_cost_per_layer() {
        let mut surface = CostSurface::new(2, 2);
        surface.improve(GridCoord::base(0, 0), 2.0);
        surface.improve(GridCoord::second(1, 1), 7.0);
        assert_eq!(7.0, surface.peak_cost());
        assert_eq!(2.0, surface.peak_cost_in(Layer::Base));
    }

    #[test]
    fn iter_visits_reached_cells() {
        let mut surface = CostSurface::new(2, 2);
        surface.improve(GridCoord::base(0, 1), 1.0);
        surface.improve(GridCoord::second(1, 0), 2.0);
        let cells: Vec<_> = surface.iter().collect();
        assert_eq!(
            vec![(GridCoord::base(0, 1), 1.0), (GridCoord::second(1, 0), 2.0)],
            cells
        );
    }
}
