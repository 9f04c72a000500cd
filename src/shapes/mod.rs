// src/shapes/mod.rs

//! Generatrix curves for the supported solids of revolution.
//!
//! Each generator is a lazy iterator yielding the ideal (real-valued) stitch
//! count of one row at a time, innermost row first. The values are not yet
//! usable as stitch counts; they are meant to be fed through
//! [`crate::quantize`] before synthesis.

use log::debug;
use std::f64::consts::PI;
use std::fmt;

use crate::error::{PatternError, Result};

/// Circumference of a cone's apex row, in stitches.
pub const DEFAULT_CONE_MINIMUM: u32 = 6;

// Defaults used by the command line when a parameter is omitted.
pub const DEFAULT_ROWS: u32 = 16;
pub const DEFAULT_HOLE_CIRCUMFERENCE: u32 = 18;
pub const DEFAULT_BASE_CIRCUMFERENCE: u32 = 60;

/// Stitch counts for a sphere worked from pole to pole.
#[derive(Debug, Clone)]
pub struct Sphere {
    rows: u32,
    radius: f64,
    row_angle: f64,
    next_row: u32,
}

impl Sphere {
    /// Creates the curve for a sphere of `rows` rows.
    ///
    /// The circumference at the equator is roughly twice the row count.
    pub fn new(rows: u32) -> Result<Self> {
        if rows == 0 {
            return Err(PatternError::InvalidRowCount {
                shape: "Sphere",
                rows,
                min: 1,
            });
        }
        let radius = (f64::from(rows) + 1.0) / PI;
        let row_angle = PI / (f64::from(rows) + 1.0);
        debug!(
            "Sphere - radius: {:.2}, row-angle: {:.2} rads",
            radius, row_angle
        );
        Ok(Sphere {
            rows,
            radius,
            row_angle,
            next_row: 0,
        })
    }
}

impl Iterator for Sphere {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next_row >= self.rows {
            return None;
        }
        let row = self.next_row;
        self.next_row += 1;
        let row_radius = self.radius * (f64::from(row + 1) * self.row_angle).sin();
        let stitches = 2.0 * PI * row_radius;
        debug!("Sphere row {}: circumference {:.2}", row + 1, stitches);
        Some(stitches)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.rows - self.next_row) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Sphere {}

/// Stitch counts for a torus, starting at the hole and working once around
/// the tube's cross-section.
#[derive(Debug, Clone)]
pub struct Torus {
    rows: u32,
    hole_radius: f64,
    cross_radius: f64,
    row_angle: f64,
    initial_angle: f64,
    next_row: u32,
}

impl Torus {
    /// Creates the curve for a torus whose hole measures `hole` stitches
    /// around, with `rows` rows around the tube.
    pub fn new(hole: u32, rows: u32) -> Result<Self> {
        Self::with_initial_angle(hole, rows, 0.0)
    }

    /// Like [`Torus::new`], but starts the first row `initial_angle`
    /// radians around the cross-section instead of at the hole.
    pub fn with_initial_angle(hole: u32, rows: u32, initial_angle: f64) -> Result<Self> {
        if rows == 0 {
            return Err(PatternError::InvalidRowCount {
                shape: "Torus",
                rows,
                min: 1,
            });
        }
        if !initial_angle.is_finite() {
            return Err(PatternError::InvalidParameter {
                name: "initial_angle",
                reason: format!("{} is not a finite angle", initial_angle),
            });
        }
        let hole_radius = f64::from(hole) / (2.0 * PI);
        let cross_radius = f64::from(rows) / (2.0 * PI);
        let row_angle = 2.0 * PI / f64::from(rows);
        debug!(
            "Torus - hole radius: {:.2}, cross-section radius: {:.2}, row-angle: {:.2} rads",
            hole_radius, cross_radius, row_angle
        );
        Ok(Torus {
            rows,
            hole_radius,
            cross_radius,
            row_angle,
            initial_angle,
            next_row: 0,
        })
    }
}

impl Iterator for Torus {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next_row >= self.rows {
            return None;
        }
        let row = self.next_row;
        self.next_row += 1;
        let angle = f64::from(row) * self.row_angle + self.initial_angle;
        let radius = self.hole_radius + self.cross_radius * (1.0 - angle.cos());
        let stitches = 2.0 * PI * radius;
        debug!("Torus row {}: circumference {:.2}", row + 1, stitches);
        Some(stitches)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.rows - self.next_row) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Torus {}

/// Stitch counts for a cone: a fixed apex row, a linear ramp, then the base.
#[derive(Debug, Clone)]
pub struct Cone {
    rows: u32,
    base: u32,
    minimum: u32,
    next_row: u32,
}

impl Cone {
    /// Creates the curve for a cone of `rows` rows whose base measures
    /// `base` stitches around. The apex row has [`DEFAULT_CONE_MINIMUM`]
    /// stitches.
    pub fn new(rows: u32, base: u32) -> Result<Self> {
        Self::with_minimum(rows, base, DEFAULT_CONE_MINIMUM)
    }

    /// Like [`Cone::new`] with an explicit apex circumference.
    pub fn with_minimum(rows: u32, base: u32, minimum: u32) -> Result<Self> {
        if rows < 2 {
            return Err(PatternError::InvalidRowCount {
                shape: "Cone",
                rows,
                min: 2,
            });
        }
        debug!(
            "Cone - rows: {}, apex: {}, base: {}",
            rows, minimum, base
        );
        Ok(Cone {
            rows,
            base,
            minimum,
            next_row: 0,
        })
    }
}

impl Iterator for Cone {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next_row >= self.rows {
            return None;
        }
        let row = self.next_row;
        self.next_row += 1;

        if row == 0 {
            return Some(f64::from(self.minimum));
        }
        if row == self.rows - 1 {
            return Some(f64::from(self.base));
        }
        // The ramp starts again at the apex value: row 1 repeats the minimum.
        let step = f64::from(row - 1) / f64::from(self.rows - 2);
        let span = f64::from(self.base) - f64::from(self.minimum);
        let stitches = step * span + f64::from(self.minimum);
        debug!("Cone row {}: stitches {:.2}", row + 1, stitches);
        Some(stitches)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.rows - self.next_row) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Cone {}

/// Selects a solid and carries its parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere {
        rows: u32,
    },
    Torus {
        hole: u32,
        rows: u32,
        initial_angle: f64,
    },
    Cone {
        rows: u32,
        base: u32,
    },
}

impl Shape {
    /// Builds the generator for this shape, validating its parameters.
    pub fn curve(&self) -> Result<Curve> {
        Ok(match *self {
            Shape::Sphere { rows } => Curve::Sphere(Sphere::new(rows)?),
            Shape::Torus {
                hole,
                rows,
                initial_angle,
            } => Curve::Torus(Torus::with_initial_angle(hole, rows, initial_angle)?),
            Shape::Cone { rows, base } => Curve::Cone(Cone::new(rows, base)?),
        })
    }

    /// Smallest stitch count a quantized row of this shape may have.
    ///
    /// Spheres and cones start from a six-stitch ring; a torus starts from a
    /// chain around its hole and takes whatever the rounding yields.
    pub fn min_stitches(&self) -> u32 {
        match self {
            Shape::Sphere { .. } | Shape::Cone { .. } => 6,
            Shape::Torus { .. } => 0,
        }
    }

    pub fn rows(&self) -> u32 {
        match *self {
            Shape::Sphere { rows } | Shape::Torus { rows, .. } | Shape::Cone { rows, .. } => rows,
        }
    }
}

impl fmt::Display for Shape {
    /// The pattern's title line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Sphere { rows } => write!(f, "Ball ({} rows)", rows),
            Shape::Torus { hole, rows, .. } => {
                write!(f, "Donut (inner-radius: {}, {} rows)", hole, rows)
            }
            Shape::Cone { rows, base } => {
                write!(f, "Cone ({} rows, {} max-circumference)", rows, base)
            }
        }
    }
}

/// Any of the three generators, as one iterator type.
#[derive(Debug, Clone)]
pub enum Curve {
    Sphere(Sphere),
    Torus(Torus),
    Cone(Cone),
}

impl Iterator for Curve {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        match self {
            Curve::Sphere(curve) => curve.next(),
            Curve::Torus(curve) => curve.next(),
            Curve::Cone(curve) => curve.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Curve::Sphere(curve) => curve.size_hint(),
            Curve::Torus(curve) => curve.size_hint(),
            Curve::Cone(curve) => curve.size_hint(),
        }
    }
}

impl ExactSizeIterator for Curve {}

#[cfg(test)]
mod tests;
