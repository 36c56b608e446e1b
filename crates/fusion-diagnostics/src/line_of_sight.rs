//! Lines of sight through a camera pinhole.
//!
//! A line is kept in slope-intercept form `y = m·x + b`. A line through two
//! points with the same x has no such form and is kept as `x = c`.

use fusion_types::error::{FusionError, FusionResult};

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineOfSight {
    /// `y = slope·x + intercept`
    Sloped { slope: f64, intercept: f64 },
    /// `x = x`
    Vertical { x: f64 },
}

impl LineOfSight {
    pub fn from_slope_intercept(slope: f64, intercept: f64) -> Self {
        LineOfSight::Sloped { slope, intercept }
    }

    /// Line through `pinhole` and `point`. `None` if the points coincide.
    pub fn through(pinhole: Point, point: Point) -> Option<Self> {
        let (px, py) = pinhole;
        let dx = point.0 - px;
        let dy = point.1 - py;
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        let slope = dy / dx;
        if !slope.is_finite() {
            return Some(LineOfSight::Vertical { x: px });
        }
        Some(LineOfSight::Sloped {
            slope,
            intercept: py - slope * px,
        })
    }

    /// Slope, infinite for a vertical line.
    pub fn slope(&self) -> f64 {
        match *self {
            LineOfSight::Sloped { slope, .. } => slope,
            LineOfSight::Vertical { .. } => f64::INFINITY,
        }
    }

    /// y at `x`, `None` for a vertical line.
    pub fn y_at(&self, x: f64) -> Option<f64> {
        match *self {
            LineOfSight::Sloped { slope, intercept } => Some(slope * x + intercept),
            LineOfSight::Vertical { .. } => None,
        }
    }

    /// Perpendicular distance from `p` to the line.
    pub fn distance_to(&self, p: Point) -> f64 {
        match *self {
            LineOfSight::Sloped { slope, intercept } => {
                (slope * p.0 - p.1 + intercept).abs() / (slope * slope + 1.0).sqrt()
            }
            LineOfSight::Vertical { x } => (p.0 - x).abs(),
        }
    }

    /// Intersection with `other`: `x = (b₂ - b₁) / (m₁ - m₂)`, `y = m₂·x + b₂`.
    pub fn intersect(&self, other: &LineOfSight) -> FusionResult<Point> {
        let (x, y) = match (*self, *other) {
            (
                LineOfSight::Sloped {
                    slope: m1,
                    intercept: b1,
                },
                LineOfSight::Sloped {
                    slope: m2,
                    intercept: b2,
                },
            ) => {
                let denom = m1 - m2;
                if denom == 0.0 {
                    return Err(FusionError::ParallelLines { slope: m1 });
                }
                let x = (b2 - b1) / denom;
                (x, m2 * x + b2)
            }
            (LineOfSight::Vertical { x }, LineOfSight::Sloped { slope, intercept })
            | (LineOfSight::Sloped { slope, intercept }, LineOfSight::Vertical { x }) => {
                (x, slope * x + intercept)
            }
            (LineOfSight::Vertical { .. }, LineOfSight::Vertical { .. }) => {
                return Err(FusionError::ParallelLines {
                    slope: f64::INFINITY,
                });
            }
        };

        if !x.is_finite() || !y.is_finite() {
            return Err(FusionError::ParallelLines {
                slope: self.slope(),
            });
        }
        Ok((x, y))
    }
}
