pub mod grid;

use serde::{Deserialize, Serialize};

/// A location in the `(x1, x2)` parameter plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point(pub f64, pub f64);

impl Point {
    pub fn x1(&self) -> f64 {
        self.0
    }
    pub fn x2(&self) -> f64 {
        self.1
    }
}

/// Axis aligned box spanned by its lower left and upper right corner.
///
/// Nothing forces the corners to be ordered. An inverted rectangle has a negative width or height
/// and contains no point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub lower_left: Point,
    pub upper_right: Point,
}

impl Rectangle {
    pub fn new(x1_min: f64, x1_max: f64, x2_min: f64, x2_max: f64) -> Self {
        Self {
            lower_left: Point(x1_min, x2_min),
            upper_right: Point(x1_max, x2_max),
        }
    }

    pub fn lower_left(&self) -> Point {
        self.lower_left
    }

    pub fn upper_right(&self) -> Point {
        self.upper_right
    }

    pub fn width(&self) -> f64 {
        self.upper_right().x1() - self.lower_left().x1()
    }

    pub fn height(&self) -> f64 {
        self.upper_right().x2() - self.lower_left().x2()
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, p: Point) -> bool {
        self.lower_left.x1() <= p.x1()
            && p.x1() <= self.upper_right.x1()
            && self.lower_left.x2() <= p.x2()
            && p.x2() <= self.upper_right.x2()
    }
}

/// Closed interval `[min, max]` a function value has to fall into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetRange {
    pub min: f64,
    pub max: f64,
}

impl TargetRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive on both ends. NaN is never contained and an inverted range contains nothing.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rectangle_dimensions() {
        let rect = Rectangle::new(1., 3., -1., 3.);
        assert_eq!(rect.width(), 2.);
        assert_eq!(rect.height(), 4.);
        assert_eq!(rect.area(), 8.);
        assert_eq!(rect.lower_left(), Point(1., -1.));
        assert_eq!(rect.upper_right(), Point(3., 3.));
    }

    #[test]
    fn rectangle_edges_are_inclusive() {
        let rect = Rectangle::new(1., 2., 1., 2.);
        assert!(rect.contains(Point(1., 1.)));
        assert!(rect.contains(Point(2., 2.)));
        assert!(rect.contains(Point(1.5, 2.)));
        assert!(!rect.contains(Point(2.0000001, 1.5)));
        assert!(!rect.contains(Point(1.5, f64::NAN)));
    }

    #[test]
    fn inverted_rectangle_is_empty() {
        let rect = Rectangle::new(2., 1., 1., 2.);
        assert!(rect.width() < 0.);
        assert!(!rect.contains(Point(1.5, 1.5)));
        assert!(!rect.contains(Point(1., 1.)));
    }

    #[test]
    fn target_range_bounds() {
        let range = TargetRange::new(5., 15.);
        assert!(range.contains(5.));
        assert!(range.contains(15.));
        assert!(!range.contains(4.999));
        assert!(!range.contains(f64::NAN));
        assert!(!range.contains(f64::INFINITY));

        let inverted = TargetRange::new(15., 5.);
        assert!(!inverted.contains(10.));
        assert!(!inverted.contains(5.));
    }
}
