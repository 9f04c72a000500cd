// src/synth/mod.rs

//! Row-transition synthesis.
//!
//! Given the stitch count of the previous row and of the row being worked,
//! [`plan_row`] decides how to get from one to the other:
//!
//! - the first row starts from a ring (six stitches or fewer) or from a
//!   foundation chain;
//! - an unchanged count is worked straight;
//! - otherwise the row is split into `repeats` identical groups, each holding
//!   one or more single increases (2 in 1) or decreases (2 together) with the
//!   plain stitches spread between them as evenly as possible. Stitches that
//!   do not fit a whole group are worked plain at the end of the row.
//!
//! `repeats` is `gcd(count, prev)`, except that a gcd of 1 falls back to one
//! group per stitch of change: 34 -> 37 is worked as three groups of
//! 11 -> 12 followed by one plain stitch.

use log::trace;
use std::fmt;
use std::num::NonZeroU32;

use crate::error::{PatternError, Result};
use crate::instruction::{Fragment, Group, Stitch};
use crate::phrasebook::{fill, Phrasebook, DEFAULT_PHRASEBOOK};

/// Stitches worked into a starting ring.
pub const RING_STITCHES: u32 = 6;
/// Stitches worked into one stitch by an increase.
pub const INCREASE_MULTIPLE: u32 = 2;
/// Stitches worked together by a decrease.
pub const DECREASE_TOGETHER: u32 = 2;

/// Greatest common divisor, by Euclid's algorithm.
pub fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Direction of the shaping stitch in a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shaping {
    Increase,
    Decrease,
}

/// One increase or decrease followed by its share of plain stitches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub shaping: Shaping,
    pub plain: u32,
}

impl Slot {
    fn shaping_fragment(&self, stitch: Stitch) -> Fragment {
        match self.shaping {
            Shaping::Increase => Fragment::Multiple {
                stitch,
                count: 1,
                multiple: INCREASE_MULTIPLE,
            },
            Shaping::Decrease => Fragment::Together {
                stitch,
                count: 1,
                together: DECREASE_TOGETHER,
            },
        }
    }
}

/// A row whose stitch count differs from the previous row's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedRow {
    pub stitch: Stitch,
    pub prev: u32,
    pub count: u32,
    /// Number of times the slots are worked around the row.
    pub repeats: NonZeroU32,
    pub slots: Vec<Slot>,
    /// Plain stitches worked after the last repeat.
    pub remainder: u32,
}

impl ShapedRow {
    fn plan(stitch: Stitch, prev: u32, count: u32) -> Result<Self> {
        let change = count.abs_diff(prev);
        let mut repeats = gcd(count, prev);
        if repeats == 1 {
            repeats = change;
        }
        let prev_per_group = prev / repeats;
        let count_per_group = count / repeats;
        let remainder = count % repeats;

        let shaping = if count_per_group > prev_per_group {
            Shaping::Increase
        } else {
            Shaping::Decrease
        };
        let shapings = count_per_group.abs_diff(prev_per_group);
        let plain_total = prev_per_group
            .min(count_per_group)
            .checked_sub(shapings)
            .ok_or(PatternError::UnreachableTransition { prev, count })?;
        let plain_per_slot = plain_total / shapings;
        let plain_extra = plain_total % shapings;

        trace!(
            "{} -> {}: {} repeats of {} -> {}, {} {:?} with {} plain, {} left over",
            prev,
            count,
            repeats,
            prev_per_group,
            count_per_group,
            shapings,
            shaping,
            plain_total,
            remainder
        );

        let slots = (0..shapings)
            .map(|slot| Slot {
                shaping,
                plain: if slot + 1 == shapings {
                    plain_per_slot + plain_extra
                } else {
                    plain_per_slot
                },
            })
            .collect();

        Ok(ShapedRow {
            stitch,
            prev,
            count,
            repeats: NonZeroU32::new(repeats)
                .ok_or(PatternError::InvalidStitchCount {
                    prev: Some(prev),
                    count,
                })?,
            slots,
            remainder,
        })
    }

    fn render(&self, phrasebook: &Phrasebook) -> String {
        let phrases = &phrasebook.row;
        let stitch = phrasebook.stitch_name(self.stitch);
        let repeated = self.repeats.get() > 1;
        let plain_run = |count: u32| fill(&phrases.plain_run, &[("count", &count), ("stitch", &stitch)]);

        let mut parts = Vec::with_capacity(self.slots.len() * 2 + 3);
        if repeated {
            parts.push(phrases.repeat_start.clone());
        }
        for slot in &self.slots {
            parts.push(match slot.shaping {
                Shaping::Increase => fill(
                    &phrases.increase,
                    &[("multiple", &INCREASE_MULTIPLE), ("stitch", &stitch)],
                ),
                Shaping::Decrease => fill(
                    &phrases.decrease,
                    &[("together", &DECREASE_TOGETHER), ("stitch", &stitch)],
                ),
            });
            if slot.plain > 0 {
                parts.push(plain_run(slot.plain));
            }
        }
        if repeated {
            parts.push(fill(&phrases.repeat_end, &[("repeats", &self.repeats)]));
        }
        if self.remainder > 0 {
            parts.push(plain_run(self.remainder));
        }
        parts.join(&phrases.separator)
    }

    fn to_group(&self) -> Group {
        let mut repeat = Group::new();
        for slot in &self.slots {
            repeat.append(slot.shaping_fragment(self.stitch));
            if slot.plain > 0 {
                repeat.append(Fragment::Plain {
                    stitch: self.stitch,
                    count: slot.plain,
                });
            }
        }

        let mut row = Group::new();
        if self.repeats.get() > 1 {
            row.append(repeat.times(self.repeats).into());
        } else {
            row.extend(repeat.children().iter().cloned());
        }
        if self.remainder > 0 {
            row.append(Fragment::Plain {
                stitch: self.stitch,
                count: self.remainder,
            });
        }
        row
    }
}

/// How one row is worked from the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowPlan {
    /// First row, worked into a starting ring.
    MagicRing { stitch: Stitch, count: u32 },
    /// First row, worked along a foundation chain.
    FoundationChain { stitch: Stitch, count: u32 },
    /// Same count as the previous row.
    Unchanged { stitch: Stitch, count: u32 },
    Shaped(ShapedRow),
}

/// Plans a single-crochet row of `count` stitches on top of a row of `prev`
/// stitches (`None` for the first row).
pub fn plan_row(prev: Option<u32>, count: u32) -> Result<RowPlan> {
    plan_row_with(Stitch::SingleCrochet, prev, count)
}

/// Like [`plan_row`], worked in `stitch`.
///
/// Fails if either count is zero, if `stitch` cannot be worked as a row
/// (chain, slip stitch), or if the change is more than single increases or
/// decreases can make in one row (more than doubling or halving).
pub fn plan_row_with(stitch: Stitch, prev: Option<u32>, count: u32) -> Result<RowPlan> {
    if !stitch.works_rows() {
        return Err(PatternError::InvalidParameter {
            name: "stitch",
            reason: format!("rows cannot be worked in '{}'", stitch),
        });
    }
    if count == 0 || prev == Some(0) {
        return Err(PatternError::InvalidStitchCount { prev, count });
    }
    let plan = match prev {
        None if count <= RING_STITCHES => RowPlan::MagicRing { stitch, count },
        None => RowPlan::FoundationChain { stitch, count },
        Some(prev) if prev == count => RowPlan::Unchanged { stitch, count },
        Some(prev) => RowPlan::Shaped(ShapedRow::plan(stitch, prev, count)?),
    };
    Ok(plan)
}

/// Returns the English instruction for a row of `count` stitches worked on
/// a row of `prev` stitches.
pub fn instruction(prev: Option<u32>, count: u32) -> Result<String> {
    Ok(plan_row(prev, count)?.to_string())
}

impl RowPlan {
    /// Stitch count of the planned row.
    pub fn count(&self) -> u32 {
        match self {
            RowPlan::MagicRing { count, .. }
            | RowPlan::FoundationChain { count, .. }
            | RowPlan::Unchanged { count, .. } => *count,
            RowPlan::Shaped(row) => row.count,
        }
    }

    /// Renders the instruction with the phrases from `phrasebook`.
    pub fn render(&self, phrasebook: &Phrasebook) -> String {
        let phrases = &phrasebook.row;
        match self {
            RowPlan::MagicRing { stitch, .. } => fill(
                &phrases.magic_ring,
                &[
                    ("count", &RING_STITCHES),
                    ("stitch", &phrasebook.stitch_name(*stitch)),
                ],
            ),
            RowPlan::FoundationChain { stitch, count } => fill(
                &phrases.foundation_chain,
                &[("count", count), ("stitch", &phrasebook.stitch_name(*stitch))],
            ),
            RowPlan::Unchanged { stitch, .. } => fill(
                &phrases.unchanged,
                &[("stitch", &phrasebook.stitch_name(*stitch))],
            ),
            RowPlan::Shaped(row) => row.render(phrasebook),
        }
    }

    /// The row as a run-length encoded instruction group.
    pub fn to_group(&self) -> Group {
        let mut group = Group::new();
        match self {
            RowPlan::MagicRing { stitch, .. } => group.append(Fragment::Plain {
                stitch: *stitch,
                count: RING_STITCHES,
            }),
            RowPlan::FoundationChain { count, .. } => group.append(Fragment::Plain {
                stitch: Stitch::Chain,
                count: *count,
            }),
            RowPlan::Unchanged { stitch, count } => group.append(Fragment::Plain {
                stitch: *stitch,
                count: *count,
            }),
            RowPlan::Shaped(row) => return row.to_group(),
        }
        group
    }
}

impl fmt::Display for RowPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&DEFAULT_PHRASEBOOK))
    }
}
