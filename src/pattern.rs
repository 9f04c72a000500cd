// src/pattern.rs

//! The full pipeline for one shape: curve, quantization, rendering.

use log::{info, warn};

use crate::config::PatternConfig;
use crate::error::{PatternError, Result};
use crate::phrasebook::Phrasebook;
use crate::quantize::{Quantizer, RoundToNearest};
use crate::render::{row_count_lines, PatternLines};
use crate::shapes::{Curve, Shape};

/// A shape together with the settings used to write its pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub shape: Shape,
    pub config: PatternConfig,
}

impl Pattern {
    pub fn new(shape: Shape, config: PatternConfig) -> Self {
        Pattern { shape, config }
    }

    /// The quantized stitch count of every row, lazily.
    pub fn stitch_counts(&self) -> Result<RoundToNearest<Curve>> {
        let quantizer = Quantizer::new(self.config.margin(), self.shape.min_stitches())?;
        info!(
            "{}: rounding to multiples of {} (minimum {})",
            self.shape,
            quantizer.margin(),
            quantizer.min_val()
        );
        Ok(quantizer.quantize(self.shape.curve()?))
    }

    /// Every output line of the pattern, in row order.
    ///
    /// With `rows_only` set these are the bare row counts; otherwise one
    /// instruction line per row. Fails on the first row that cannot be
    /// written, without returning any lines.
    pub fn lines(&self, phrasebook: &Phrasebook) -> Result<Vec<String>> {
        let counts = self.stitch_counts()?;
        if self.config.rows_only {
            return Ok(row_count_lines(counts).collect());
        }
        PatternLines::new(counts, phrasebook)
            .format(self.config.format)
            .stitch(self.config.stitch)
            .collect::<Result<Vec<_>>>()
            .map_err(|err| {
                // Exact counts near a pole can jump by more than double.
                if let PatternError::UnreachableTransition { prev, count } = err {
                    if self.config.accurate {
                        warn!(
                            "{}: {} -> {} stitches is too steep for exact counts; \
                             use fewer rows or drop accurate mode",
                            self.shape, prev, count
                        );
                    }
                }
                err
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phrasebook::DEFAULT_PHRASEBOOK;
    use test_log::test;

    #[test]
    fn sphere_counts_are_practical_multiples() {
        let pattern = Pattern::new(Shape::Sphere { rows: 16 }, PatternConfig::default());
        let counts: Vec<u32> = pattern.stitch_counts().unwrap().collect();
        assert_eq!(
            counts,
            vec![6, 12, 18, 24, 30, 30, 30, 36, 36, 30, 30, 30, 24, 18, 12, 6]
        );
    }

    #[test]
    fn accurate_sphere_counts() {
        let config = PatternConfig {
            accurate: true,
            ..Default::default()
        };
        let pattern = Pattern::new(Shape::Sphere { rows: 16 }, config);
        let counts: Vec<u32> = pattern.stitch_counts().unwrap().collect();
        assert_eq!(
            counts,
            vec![6, 12, 18, 23, 27, 30, 33, 34, 34, 33, 30, 27, 23, 18, 12, 6]
        );
    }

    #[test]
    fn rows_only_skips_instructions() {
        let config = PatternConfig {
            rows_only: true,
            ..Default::default()
        };
        let pattern = Pattern::new(Shape::Cone { rows: 4, base: 18 }, config);
        let lines = pattern.lines(&DEFAULT_PHRASEBOOK).unwrap();
        assert_eq!(lines, vec!["6", "6", "12", "18"]);
    }

    #[test]
    fn invalid_shape_fails_before_output() {
        let pattern = Pattern::new(Shape::Cone { rows: 1, base: 18 }, PatternConfig::default());
        assert!(matches!(
            pattern.lines(&DEFAULT_PHRASEBOOK),
            Err(PatternError::InvalidRowCount { .. })
        ));
    }

    #[test]
    fn accurate_ball_with_many_rows_is_too_steep() {
        let config = PatternConfig {
            accurate: true,
            ..Default::default()
        };
        let ok = Pattern::new(Shape::Sphere { rows: 34 }, config.clone());
        assert_eq!(ok.lines(&DEFAULT_PHRASEBOOK).unwrap().len(), 34);

        for rows in [35, 40, 60] {
            let pattern = Pattern::new(Shape::Sphere { rows }, config.clone());
            assert!(matches!(
                pattern.lines(&DEFAULT_PHRASEBOOK),
                Err(PatternError::UnreachableTransition { prev: 6, count: 13 })
            ));
        }

        let practical = Pattern::new(Shape::Sphere { rows: 60 }, PatternConfig::default());
        assert!(practical.lines(&DEFAULT_PHRASEBOOK).is_ok());
    }

    #[test]
    fn unworkable_pattern_fails_as_a_whole() {
        // A tiny hole rounds to zero stitches at practical margins.
        let pattern = Pattern::new(
            Shape::Torus {
                hole: 2,
                rows: 16,
                initial_angle: 0.0,
            },
            PatternConfig::default(),
        );
        assert!(matches!(
            pattern.lines(&DEFAULT_PHRASEBOOK),
            Err(PatternError::InvalidStitchCount { prev: None, count: 0 })
        ));
    }
}
