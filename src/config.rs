// src/config.rs

//! Pattern-generation settings.
//!
//! `PatternConfig` collects the switches the presentation layer hands the
//! core: exact vs. practical rounding, whether to print instructions or just
//! row counts, the line markup and the stitch to work. It can be built in
//! code or deserialized from JSON; missing fields take their defaults.

// Serde lets a config be read from (or written back to) JSON.
use serde::{Deserialize, Serialize};

use crate::instruction::Stitch; // Working stitch for every row
use crate::quantize::{EXACT_MARGIN, PRACTICAL_MARGIN};
use crate::render::LineFormat; // Text or HTML lines

// --- Pattern Configuration ---

/// Settings for one pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)] // Any field missing from the JSON takes its default.
pub struct PatternConfig {
    /// Round every row to the nearest stitch instead of the nearest six.
    /// Exact patterns follow the curve closely but give less regular rows.
    pub accurate: bool,
    /// Print only the stitch count of each row.
    pub rows_only: bool,
    /// Markup for instruction lines. Ignored when `rows_only` is set.
    pub format: LineFormat,
    /// Stitch used for every row.
    pub stitch: Stitch, // Chains and slip stitches are rejected when rows are planned
}

impl PatternConfig {
    /// Quantization margin implied by `accurate`.
    pub fn margin(&self) -> u32 {
        if self.accurate {
            EXACT_MARGIN
        } else {
            PRACTICAL_MARGIN
        }
    }
}
