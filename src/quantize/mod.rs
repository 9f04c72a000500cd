// src/quantize/mod.rs

//! Snaps ideal, real-valued row sizes onto practical stitch counts.
//!
//! Circular patterns read best when every row is a multiple of some margin
//! (six for the classic "practical" pattern, one for an exact pattern). The
//! rounding is half-away-from-zero, so 20.5 becomes 21 rather than 20.

use crate::error::{PatternError, Result};

/// Margin used for patterns that favour round, easy-to-count rows.
pub const PRACTICAL_MARGIN: u32 = 6;
/// Margin used when an exact pattern is requested.
pub const EXACT_MARGIN: u32 = 1;

/// Rounds values to the nearest multiple of a margin, never going below a
/// floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantizer {
    margin: u32,
    min_val: u32,
}

impl Quantizer {
    /// Fails with [`PatternError::InvalidMargin`] if `margin` is zero.
    pub fn new(margin: u32, min_val: u32) -> Result<Self> {
        if margin == 0 {
            return Err(PatternError::InvalidMargin);
        }
        Ok(Quantizer { margin, min_val })
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    pub fn min_val(&self) -> u32 {
        self.min_val
    }

    /// Rounds `value` to the nearest multiple of the margin and clamps the
    /// result up to the floor.
    ///
    /// The result is always a multiple of the margin unless the floor itself
    /// is not one and the value rounded below it.
    pub fn round(&self, value: f64) -> u32 {
        let margin = f64::from(self.margin);
        let quotient = (value / margin).floor();
        let fraction = value - quotient * margin;
        // f64::round breaks ties away from zero.
        let adjusted = (quotient + (fraction / margin).round()) * margin;
        let floor = f64::from(self.min_val);
        if adjusted.is_nan() || adjusted < floor {
            return self.min_val;
        }
        // Saturating float-to-int cast.
        adjusted as u32
    }

    /// Applies this quantizer lazily to every value of `values`.
    pub fn quantize<I>(self, values: I) -> RoundToNearest<I::IntoIter>
    where
        I: IntoIterator<Item = f64>,
    {
        RoundToNearest {
            inner: values.into_iter(),
            quantizer: self,
        }
    }
}

/// Returns `value` rounded to the nearest multiple of `margin`, at least
/// `min_val`.
pub fn round_to_nearest(value: f64, margin: u32, min_val: u32) -> Result<u32> {
    Ok(Quantizer::new(margin, min_val)?.round(value))
}

/// Returns an iterator that rounds each item of `values` to the nearest
/// multiple of `margin`, at least `min_val`.
///
/// Nothing is buffered, so unbounded inputs are fine.
pub fn round_to_nearest_iter<I>(
    values: I,
    margin: u32,
    min_val: u32,
) -> Result<RoundToNearest<I::IntoIter>>
where
    I: IntoIterator<Item = f64>,
{
    Ok(Quantizer::new(margin, min_val)?.quantize(values))
}

/// Iterator adapter returned by [`round_to_nearest_iter`].
#[derive(Debug, Clone)]
pub struct RoundToNearest<I> {
    inner: I,
    quantizer: Quantizer,
}

impl<I> Iterator for RoundToNearest<I>
where
    I: Iterator<Item = f64>,
{
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        self.inner.next().map(|value| self.quantizer.round(value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I> ExactSizeIterator for RoundToNearest<I> where I: ExactSizeIterator<Item = f64> {}

#[cfg(test)]
mod tests;
