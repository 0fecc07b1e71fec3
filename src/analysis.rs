use ndarray::{Array1, Array2, Zip};
use ndarray_stats::QuantileExt;
use serde::{Deserialize, Serialize};

use crate::domain::grid::{Grid, Sampling};
use crate::domain::{Point, Rectangle, TargetRange};
use crate::error::{AnalysisError, Result};
use crate::functions::{Constraint, PowerProduct, PowerSum};
use crate::ScalarField;

/// Normalisation constant of the percentage denominator `area * DENSITY_SCALE * samples`.
///
/// The result is not a true geometric share of the rectangle and may exceed 100.
pub const DENSITY_SCALE: f64 = 10.;

/// Everything that defines one analysis: both constrained fields and the reference rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub y1: Constraint<PowerSum>,
    pub y2: Constraint<PowerProduct>,
    pub rectangle: Rectangle,
}

impl Parameters {
    /// Build parameters from the 15 plain scalars. No validation takes place.
    #[allow(clippy::too_many_arguments)]
    pub fn from_scalars(
        a: f64,
        b: f64,
        exp_a: f64,
        exp_b: f64,
        y1_min: f64,
        y1_max: f64,
        c: f64,
        exp_y: f64,
        exp_g: f64,
        y2_min: f64,
        y2_max: f64,
        x1_min: f64,
        x1_max: f64,
        x2_min: f64,
        x2_max: f64,
    ) -> Self {
        Self {
            y1: Constraint::new(
                PowerSum::new(a, b, exp_a, exp_b),
                TargetRange::new(y1_min, y1_max),
            ),
            y2: Constraint::new(
                PowerProduct::new(c, exp_y, exp_g),
                TargetRange::new(y2_min, y2_max),
            ),
            rectangle: Rectangle::new(x1_min, x1_max, x2_min, x2_max),
        }
    }
}

/// Elementwise `y1 in range1 && y2 in range2`.
pub fn intersection_mask(
    y1: &Array2<f64>,
    y2: &Array2<f64>,
    range1: TargetRange,
    range2: TargetRange,
) -> Array2<bool> {
    let zip = Zip::from(y1).and(y2);
    #[cfg(feature = "parallel")]
    let mask = zip.par_map_collect(|&v1, &v2| range1.contains(v1) && range2.contains(v2));
    #[cfg(not(feature = "parallel"))]
    let mask = zip.map_collect(|&v1, &v2| range1.contains(v1) && range2.contains(v2));
    mask
}

/// The immutable outcome of sampling both fields on a grid.
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionAnalysis {
    grid: Grid,
    y1: Array2<f64>,
    y2: Array2<f64>,
    mask: Array2<bool>,
    x1_intersection: Array1<f64>,
    x2_intersection: Array1<f64>,
}

impl IntersectionAnalysis {
    pub fn compute(parameters: &Parameters, sampling: &Sampling) -> Self {
        let grid = Grid::new(sampling);
        let y1 = parameters.y1.field.evaluate_grid(&grid);
        let y2 = parameters.y2.field.evaluate_grid(&grid);
        let mask = intersection_mask(&y1, &y2, parameters.y1.range, parameters.y2.range);

        // row major scan keeps both coordinate vectors aligned with the grid order
        let (x1_intersection, x2_intersection): (Vec<f64>, Vec<f64>) = grid
            .points()
            .zip(mask.iter())
            .filter(|(_, &inside)| inside)
            .map(|(p, _)| (p.x1(), p.x2()))
            .unzip();

        tracing::debug!(
            samples = sampling.samples(),
            intersection = x1_intersection.len(),
            "sampled grid"
        );

        Self {
            grid,
            y1,
            y2,
            mask,
            x1_intersection: Array1::from_vec(x1_intersection),
            x2_intersection: Array1::from_vec(x2_intersection),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn y1(&self) -> &Array2<f64> {
        &self.y1
    }

    pub fn y2(&self) -> &Array2<f64> {
        &self.y2
    }

    pub fn mask(&self) -> &Array2<bool> {
        &self.mask
    }

    pub fn x1_intersection(&self) -> &Array1<f64> {
        &self.x1_intersection
    }

    pub fn x2_intersection(&self) -> &Array1<f64> {
        &self.x2_intersection
    }

    pub fn intersection_len(&self) -> usize {
        self.x1_intersection.len()
    }

    /// Intersection points in row major order.
    pub fn intersection_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.x1_intersection
            .iter()
            .zip(self.x2_intersection.iter())
            .map(|(&x1, &x2)| Point(x1, x2))
    }

    /// Number of intersection points lying in `rectangle`, edges included.
    pub fn points_inside(&self, rectangle: &Rectangle) -> usize {
        self.intersection_points()
            .filter(|p| rectangle.contains(*p))
            .count()
    }

    /// `100 * inside / (area * DENSITY_SCALE * samples)`.
    ///
    /// Fails with [`AnalysisError::DegenerateRectangle`] when the denominator is exactly zero.
    /// An inverted rectangle contains nothing and yields zero.
    pub fn percentage_area(&self, rectangle: &Rectangle) -> Result<f64> {
        let samples = self.grid.shape().0;
        let denominator = rectangle.area() * DENSITY_SCALE * samples as f64;
        if denominator == 0. {
            tracing::warn!(?rectangle, "percentage requested for a degenerate rectangle");
            return Err(AnalysisError::DegenerateRectangle {
                width: rectangle.width(),
                height: rectangle.height(),
            });
        }
        let inside = self.points_inside(rectangle);
        let percentage = inside as f64 / denominator * 100.;
        tracing::debug!(inside, denominator, percentage, "computed percentage area");
        Ok(percentage)
    }

    /// Smallest and largest `y1` value, ignoring NaN. `None` if all are NaN.
    pub fn y1_extent(&self) -> Option<(f64, f64)> {
        extent(&self.y1)
    }

    /// Smallest and largest `y2` value, ignoring NaN. `None` if all are NaN.
    pub fn y2_extent(&self) -> Option<(f64, f64)> {
        extent(&self.y2)
    }
}

fn extent(values: &Array2<f64>) -> Option<(f64, f64)> {
    let min = *values.min_skipnan();
    let max = *values.max_skipnan();
    if min.is_nan() || max.is_nan() {
        None
    } else {
        Some((min, max))
    }
}

/// What a plotting collaborator needs to draw contours, the rectangle overlay and the
/// intersection area.
#[derive(Debug, Clone, Copy)]
pub struct PlotData<'a> {
    pub x1: &'a Array2<f64>,
    pub x2: &'a Array2<f64>,
    pub y1: &'a Array2<f64>,
    pub y2: &'a Array2<f64>,
    pub x1_intersection: &'a Array1<f64>,
    pub x2_intersection: &'a Array1<f64>,
    pub percentage: f64,
    pub y1_range: TargetRange,
    pub y2_range: TargetRange,
    pub rectangle: Rectangle,
}

/// Holds the parameters of an analysis together with its most recent result.
///
/// The result is computed on construction and only replaced by [`generate_grid`] or
/// [`set_parameters`].
///
/// [`generate_grid`]: GridIntersectionAnalyzer::generate_grid
/// [`set_parameters`]: GridIntersectionAnalyzer::set_parameters
#[derive(Clone, Debug)]
pub struct GridIntersectionAnalyzer {
    parameters: Parameters,
    sampling: Sampling,
    analysis: IntersectionAnalysis,
}

impl GridIntersectionAnalyzer {
    /// Analyse on the default `1000 x 1000` grid over `[0, 10]`.
    pub fn new(parameters: Parameters) -> Self {
        Self::with_sampling(parameters, Sampling::default())
    }

    pub fn with_sampling(parameters: Parameters, sampling: Sampling) -> Self {
        let analysis = IntersectionAnalysis::compute(&parameters, &sampling);
        Self {
            parameters,
            sampling,
            analysis,
        }
    }

    /// Rebuild grid, field values and intersection from the current parameters.
    pub fn generate_grid(&mut self) {
        self.analysis = IntersectionAnalysis::compute(&self.parameters, &self.sampling);
    }

    pub fn set_parameters(&mut self, parameters: Parameters) {
        self.parameters = parameters;
        self.generate_grid();
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn sampling(&self) -> &Sampling {
        &self.sampling
    }

    pub fn analysis(&self) -> &IntersectionAnalysis {
        &self.analysis
    }

    pub fn into_analysis(self) -> IntersectionAnalysis {
        self.analysis
    }

    pub fn evaluate_y1(&self) -> Array2<f64> {
        self.parameters.y1.field.evaluate_grid(self.analysis.grid())
    }

    pub fn evaluate_y2(&self) -> Array2<f64> {
        self.parameters.y2.field.evaluate_grid(self.analysis.grid())
    }

    pub fn compute_intersection_mask(&self) -> Array2<bool> {
        intersection_mask(
            self.analysis.y1(),
            self.analysis.y2(),
            self.parameters.y1.range,
            self.parameters.y2.range,
        )
    }

    pub fn compute_percentage_area(&self) -> Result<f64> {
        self.analysis.percentage_area(&self.parameters.rectangle)
    }

    pub fn plot_data(&self) -> Result<PlotData<'_>> {
        Ok(PlotData {
            x1: self.analysis.grid().x1(),
            x2: self.analysis.grid().x2(),
            y1: self.analysis.y1(),
            y2: self.analysis.y2(),
            x1_intersection: self.analysis.x1_intersection(),
            x2_intersection: self.analysis.x2_intersection(),
            percentage: self.compute_percentage_area()?,
            y1_range: self.parameters.y1.range,
            y2_range: self.parameters.y2.range,
            rectangle: self.parameters.rectangle,
        })
    }
}
