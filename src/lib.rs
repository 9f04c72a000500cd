// src/lib.rs

//! Crochet pattern generation for simple solids of revolution.
//!
//! Data flows leaf to root: a [`shapes`] curve yields the ideal stitch count
//! of each row, [`quantize`] snaps those onto practical counts, [`synth`]
//! works out how to get from one row to the next, and [`render`] writes the
//! lines. [`instruction`] is the structured, mergeable form of a row and
//! [`phrasebook`] holds all of the wording.

pub mod config;
pub mod error;
pub mod instruction;
pub mod pattern;
pub mod phrasebook;
pub mod quantize;
pub mod render;
pub mod shapes;
pub mod synth;

pub use config::PatternConfig;
pub use error::{PatternError, Result};
pub use instruction::{Fragment, Group, Stitch};
pub use pattern::Pattern;
pub use phrasebook::Phrasebook;
pub use quantize::{round_to_nearest, round_to_nearest_iter, Quantizer};
pub use render::{instruction_html, instruction_line, row_count_lines, LineFormat, PatternLines};
pub use shapes::{Cone, Shape, Sphere, Torus};
pub use synth::{instruction, plan_row, RowPlan};
