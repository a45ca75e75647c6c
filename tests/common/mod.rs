//! Shared helpers for the integration tests.

#![allow(dead_code)]

use multicost::cost_map::step_cost;
use multicost::*;

/// A grid scenario small enough to solve by brute force.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub nrows: u32,
    pub ncols: u32,
    pub base: Vec<f64>,
    pub second: Vec<f64>,
    pub crossovers: Vec<bool>,
    pub seeds: Vec<Seed>,
}

impl Scenario {
    pub fn map(&self) -> CostMap2d {
        let flags: Vec<f64> = self
            .crossovers
            .iter()
            .map(|&x| if x { 1.0 } else { 0.0 })
            .collect();
        CostMap2d::from_layers(self.nrows, self.ncols, self.base.clone(), self.second.clone())
            .unwrap()
            .with_crossover_raster(&flags)
            .unwrap()
    }

    fn node(&self, c: GridCoord) -> usize {
        let per_layer = (self.nrows * self.ncols) as usize;
        c.layer.index() * per_layer + (c.row * self.ncols + c.col) as usize
    }

    fn coord(&self, node: usize) -> GridCoord {
        let per_layer = (self.nrows * self.ncols) as usize;
        let layer = if node < per_layer { Layer::Base } else { Layer::Second };
        let i = (node % per_layer) as u32;
        GridCoord::new(i / self.ncols, i % self.ncols, layer)
    }

    /// The explicit graph: for every node, its outgoing `(node, weight)`
    /// edges. Edges touching a no-data cell are left out.
    pub fn edges(&self, config: &PropagationConfig) -> Vec<Vec<(usize, f64)>> {
        let map = self.map();
        let weights = DirectionWeights::new(config.resolution, config.bridge_weight);
        let size = map.size();
        let count = 2 * (self.nrows * self.ncols) as usize;

        (0..count)
            .map(|node| {
                let here = self.coord(node);
                let mut out = Vec::new();
                for dir in Direction::ALL {
                    if let Some(next) = here.step(dir, size) {
                        let w = step_cost(map.cost(here), map.cost(next), weights.weight(dir));
                        if w.is_finite() {
                            out.push((self.node(next), w));
                        }
                    }
                }
                if map.is_crossover(here.row, here.col) {
                    let paired = here.paired();
                    let w = step_cost(map.cost(here), map.cost(paired), weights.bridge);
                    if w.is_finite() {
                        out.push((self.node(paired), w));
                    }
                }
                out
            })
            .collect()
    }

    /// Textbook O(V^2) Dijkstra over [Scenario::edges].
    pub fn brute_force(&self, config: &PropagationConfig) -> Vec<Option<f64>> {
        let edges = self.edges(config);
        let mut dist: Vec<Option<f64>> = vec![None; edges.len()];
        let mut done = vec![false; edges.len()];

        for seed in &self.seeds {
            let n = self.node(seed.coord);
            if dist[n].map_or(true, |d| seed.cost < d) {
                dist[n] = Some(seed.cost);
            }
        }

        loop {
            let next = (0..edges.len())
                .filter(|&n| !done[n])
                .filter_map(|n| dist[n].map(|d| (n, d)))
                .min_by(|a, b| a.1.total_cmp(&b.1));
            let Some((n, d)) = next else {
                break;
            };
            done[n] = true;
            for &(m, w) in &edges[n] {
                let candidate = d + w;
                if dist[m].map_or(true, |old| candidate < old) {
                    dist[m] = Some(candidate);
                }
            }
        }
        dist
    }

    /// The brute-force answer for `coord`.
    pub fn expected(&self, dist: &[Option<f64>], coord: GridCoord) -> Option<f64> {
        dist[self.node(coord)]
    }

    pub fn coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        (0..2 * (self.nrows * self.ncols) as usize).map(|n| self.coord(n))
    }
}

pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}
