//! Sampled evaluation of two range-constrained functions of `(x1, x2)`.
//!
//! A square grid is laid over a fixed interval, both functions are evaluated on every grid point
//! and the points where each value lies inside its target range form the intersection set. The
//! share of that set falling into a reference rectangle is reported as a percentage. Drawing the
//! result is left to the caller, see [`analysis::PlotData`].
//!
//! ```
//! use grid_intersect::{GridIntersectionAnalyzer, Parameters};
//!
//! let parameters = Parameters::from_scalars(
//!     1., 2., 2., 3., 5., 15., 0.5, 1., 2., 2., 10., 1., 2., 1., 2.,
//! );
//! let analyzer = GridIntersectionAnalyzer::new(parameters);
//! let percentage = analyzer.compute_percentage_area().unwrap();
//! assert!((percentage - 19.56).abs() < 1e-9);
//! ```

pub mod analysis;
pub mod config;
pub mod domain;
pub mod error;
pub mod functions;

use ndarray::{Array2, Zip};

use crate::domain::grid::Grid;

pub use crate::analysis::{GridIntersectionAnalyzer, IntersectionAnalysis, Parameters, PlotData};
pub use crate::config::AnalyzerConfig;
pub use crate::domain::grid::Sampling;
pub use crate::domain::{Point, Rectangle, TargetRange};
pub use crate::error::{AnalysisError, Result};
pub use crate::functions::{Constraint, PowerProduct, PowerSum};

/// A real valued function of the two grid coordinates.
pub trait ScalarField: Sync {
    /// Value of the field at the point `(x1, x2)`.
    fn evaluate(&self, x1: f64, x2: f64) -> f64;

    /// Evaluate the field on every grid point. The output has the grid's shape.
    ///
    /// Points are independent, so with the `parallel` feature the work is spread over the rayon
    /// pool. Either path produces identical values.
    fn evaluate_grid(&self, grid: &Grid) -> Array2<f64> {
        let zip = Zip::from(grid.x1()).and(grid.x2());
        #[cfg(feature = "parallel")]
        let values = zip.par_map_collect(|&x1, &x2| self.evaluate(x1, x2));
        #[cfg(not(feature = "parallel"))]
        let values = zip.map_collect(|&x1, &x2| self.evaluate(x1, x2));
        values
    }
}
