//! The two parametric fields and the ranges they are constrained to.
//!
//! Powers are taken with [`f64::powf`] and its result is kept as is: a negative base with a
//! fractional exponent gives NaN, `0^p` with `p < 0` gives infinity. Neither lies inside any
//! [`TargetRange`], so such points simply drop out of the intersection.

use serde::{Deserialize, Serialize};

use crate::domain::TargetRange;
use crate::ScalarField;

/// `y1 = a * x1^exp_x1 + b * x2^exp_x2`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerSum {
    pub a: f64,
    pub b: f64,
    pub exp_x1: f64,
    pub exp_x2: f64,
}

impl PowerSum {
    pub fn new(a: f64, b: f64, exp_x1: f64, exp_x2: f64) -> Self {
        Self {
            a,
            b,
            exp_x1,
            exp_x2,
        }
    }
}

impl ScalarField for PowerSum {
    fn evaluate(&self, x1: f64, x2: f64) -> f64 {
        self.a * x1.powf(self.exp_x1) + self.b * x2.powf(self.exp_x2)
    }
}

/// `y2 = c * x1^exp_x1 * x2^exp_x2`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerProduct {
    pub c: f64,
    pub exp_x1: f64,
    pub exp_x2: f64,
}

impl PowerProduct {
    pub fn new(c: f64, exp_x1: f64, exp_x2: f64) -> Self {
        Self { c, exp_x1, exp_x2 }
    }
}

impl ScalarField for PowerProduct {
    fn evaluate(&self, x1: f64, x2: f64) -> f64 {
        self.c * x1.powf(self.exp_x1) * x2.powf(self.exp_x2)
    }
}

/// A field together with the closed range its values have to fall into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraint<F> {
    pub field: F,
    pub range: TargetRange,
}

impl<F: ScalarField> Constraint<F> {
    pub fn new(field: F, range: TargetRange) -> Self {
        Self { field, range }
    }

    pub fn satisfied_by(&self, x1: f64, x2: f64) -> bool {
        self.range.contains(self.field.evaluate(x1, x2))
    }
}
