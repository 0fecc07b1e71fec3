use ndarray::{Array1, Array2};
use ndarray_stats::QuantileExt;
use serde::{Deserialize, Serialize};

use crate::domain::{Point, Rectangle};
use crate::error::{AnalysisError, Result};

/// Uniform sampling of the closed interval `[lo, hi]` with `samples` points, applied to both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSampling")]
pub struct Sampling {
    samples: usize,
    lo: f64,
    hi: f64,
}

#[derive(Deserialize)]
struct RawSampling {
    samples: usize,
    lo: f64,
    hi: f64,
}

impl TryFrom<RawSampling> for Sampling {
    type Error = AnalysisError;

    fn try_from(raw: RawSampling) -> Result<Self> {
        Sampling::new(raw.samples, raw.lo, raw.hi)
    }
}

impl Sampling {
    pub const DEFAULT_SAMPLES: usize = 1000;
    pub const DEFAULT_LO: f64 = 0.;
    pub const DEFAULT_HI: f64 = 10.;

    pub fn new(samples: usize, lo: f64, hi: f64) -> Result<Self> {
        let invalid = |reason| AnalysisError::InvalidSampling {
            samples,
            lo,
            hi,
            reason,
        };
        if samples < 2 {
            return Err(invalid("need at least two samples per axis"));
        }
        if !lo.is_finite() || !hi.is_finite() {
            return Err(invalid("interval bounds must be finite"));
        }
        if lo >= hi {
            return Err(invalid("lower bound must be below upper bound"));
        }
        Ok(Self { samples, lo, hi })
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// The sampled axis values `lo + i * (hi - lo) / (samples - 1)`, the last one pinned to `hi`.
    pub fn axis(&self) -> Array1<f64> {
        let mut axis = Array1::linspace(self.lo, self.hi, self.samples);
        // `lo + i * step` can overshoot `hi` by an ulp
        axis[self.samples - 1] = self.hi;
        axis
    }
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            samples: Self::DEFAULT_SAMPLES,
            lo: Self::DEFAULT_LO,
            hi: Self::DEFAULT_HI,
        }
    }
}

/// The `N x N` coordinate matrices of a sampled plane.
///
/// Rows follow `x2` and columns follow `x1`, so a row major scan visits `x1` fastest.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    x1: Array2<f64>,
    x2: Array2<f64>,
}

impl Grid {
    pub fn new(sampling: &Sampling) -> Self {
        let axis = sampling.axis();
        let n = axis.len();
        Self {
            x1: Array2::from_shape_fn((n, n), |(_, j)| axis[j]),
            x2: Array2::from_shape_fn((n, n), |(i, _)| axis[i]),
        }
    }

    pub fn x1(&self) -> &Array2<f64> {
        &self.x1
    }

    pub fn x2(&self) -> &Array2<f64> {
        &self.x2
    }

    pub fn shape(&self) -> (usize, usize) {
        self.x1.dim()
    }

    /// Coordinates of every grid point in row major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.x1
            .iter()
            .zip(self.x2.iter())
            .map(|(&x1, &x2)| Point(x1, x2))
    }

    /// The extent actually covered by the samples.
    pub fn bounds(&self) -> Option<Rectangle> {
        Some(Rectangle::new(
            *self.x1.min().ok()?,
            *self.x1.max().ok()?,
            *self.x2.min().ok()?,
            *self.x2.max().ok()?,
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sampling_rejects_bad_input() {
        assert!(Sampling::new(1, 0., 10.).is_err());
        assert!(Sampling::new(10, 10., 0.).is_err());
        assert!(Sampling::new(10, 5., 5.).is_err());
        assert!(Sampling::new(10, 0., f64::INFINITY).is_err());
        assert!(Sampling::new(10, f64::NAN, 1.).is_err());
        assert!(Sampling::new(2, 0., 1.).is_ok());
    }

    #[test]
    fn default_sampling() {
        let sampling = Sampling::default();
        assert_eq!(sampling.samples(), 1000);
        assert_eq!(sampling.lo(), 0.);
        assert_eq!(sampling.hi(), 10.);
    }

    #[test]
    fn axis_is_uniform() {
        let axis = Sampling::new(11, 0., 10.).unwrap().axis();
        assert_eq!(axis.len(), 11);
        for (i, x) in axis.iter().enumerate() {
            assert!((x - i as f64).abs() < 1e-12);
        }

        let axis = Sampling::default().axis();
        let step = axis[1] - axis[0];
        for w in axis.windows(2) {
            assert!(((w[1] - w[0]) - step).abs() < 1e-12);
        }
        assert_eq!(axis[0], 0.);
        assert!((axis[999] - 10.).abs() < 1e-12);
    }

    #[test]
    fn axis_ends_exactly_on_interval_bounds() {
        for (samples, lo, hi) in [
            (148, 0., 10.),
            (78, 0., 10.),
            (50, -2., 2.),
            (1000, 0., 10.),
            (2, 0.1, 0.3),
        ] {
            let axis = Sampling::new(samples, lo, hi).unwrap().axis();
            assert_eq!(axis[0], lo);
            assert_eq!(axis[samples - 1], hi);
            assert!(axis.iter().all(|&x| lo <= x && x <= hi));
        }

        let grid = Grid::new(&Sampling::new(148, 0., 10.).unwrap());
        let bounds = grid.bounds().unwrap();
        assert_eq!(bounds, Rectangle::new(0., 10., 0., 10.));
        assert!(grid.points().all(|p| bounds.contains(p)));
    }

    #[test]
    fn grid_layout_matches_meshgrid() {
        let grid = Grid::new(&Sampling::new(3, 0., 2.).unwrap());
        assert_eq!(grid.shape(), (3, 3));
        // columns vary x1, rows vary x2
        assert_eq!(grid.x1()[[0, 2]], 2.);
        assert_eq!(grid.x1()[[2, 0]], 0.);
        assert_eq!(grid.x2()[[0, 2]], 0.);
        assert_eq!(grid.x2()[[2, 0]], 2.);

        let points: Vec<Point> = grid.points().collect();
        assert_eq!(points.len(), 9);
        assert_eq!(points[0], Point(0., 0.));
        assert_eq!(points[1], Point(1., 0.));
        assert_eq!(points[3], Point(0., 1.));
        assert_eq!(points[8], Point(2., 2.));
    }

    #[test]
    fn grid_bounds() {
        let grid = Grid::new(&Sampling::new(5, -1., 3.).unwrap());
        let bounds = grid.bounds().unwrap();
        assert_eq!(bounds.lower_left(), Point(-1., -1.));
        assert!((bounds.upper_right().x1() - 3.).abs() < 1e-12);
        assert!((bounds.area() - 16.).abs() < 1e-9);
    }

    #[test]
    fn sampling_from_json_is_validated() {
        let ok: Sampling =
            serde_json::from_str(r#"{"samples": 4, "lo": 0.0, "hi": 1.0}"#).unwrap();
        assert_eq!(ok.samples(), 4);
        let too_few = r#"{"samples": 1, "lo": 0.0, "hi": 1.0}"#;
        assert!(serde_json::from_str::<Sampling>(too_few).is_err());
    }
}
