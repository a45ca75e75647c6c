//! Cumulative cost surfaces over raster grids.
//!
//! Starting from one or more seed cells, a [Propagator] spreads the minimum
//! accumulated cost to every reachable cell using 8-way movement, where the
//! cost of a step is the mean of the two cells' costs scaled by a direction
//! weight derived from the grid resolution.
//!
//! A [CostMap] carries two independently costed layers. Cells flagged as
//! crossovers bridge the layers, so a search can switch planes there, much
//! like two transport networks joined at interchanges.
//!
//! # Example
//!
//! ```rust
//! use multicost::*;
//!
//! // Layer 1 is a fast corridor reachable only through the crossover at (0, 0).
//! let mut map = CostMap2d::new(1, 6);
//! for col in 0..6 {
//!     map.set_cost(GridCoord::second(0, col), 0.1);
//! }
//! map.add_crossover(0, 0);
//!
//! let mut propagator = Propagator::new();
//! let surface = propagator
//!     .run(&map, &[Seed::at(GridCoord::base(0, 0))], &PropagationConfig::default())
//!     .unwrap();
//!
//! assert_eq!(Some(5.0), surface.get(GridCoord::base(0, 5)));
//! assert!(surface.get(GridCoord::second(0, 5)).unwrap() < 1.1);
//! ```
pub mod config;
pub mod coord;
pub mod cost_map;
pub mod cost_surface;
pub mod error;
pub mod frontier;
pub mod propagator;
pub mod seeds;

pub use config::{MaxCost, PropagationConfig, Resolution};
pub use coord::{Direction, GridCoord, Layer};
pub use cost_map::{CostMap, CostMap2d, DirectionWeights};
pub use cost_surface::{CostSurface, NO_DATA};
pub use error::PropagationError;
pub use frontier::{CostCell, EntryHandle, Frontier};
pub use propagator::{PropagationStats, Propagator};
pub use seeds::{from_start_raster, Seed, SeedCost};
