// src/instruction/mod.rs

//! Mergeable instruction fragments.
//!
//! A row is described as a sequence of [`Fragment`]s. Adjacent fragments of
//! the same kind collapse into one (three "1sc" become "3sc"), and a
//! [`Group`] bundles fragments that are worked several times around the row.
//! Fragments are plain values; the only mutation is the in-place growth of a
//! fragment's count during [`Fragment::merge`] and [`Group::append`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use crate::error::{PatternError, Result};
use crate::phrasebook::{fill, Phrasebook, DEFAULT_PHRASEBOOK};

/// A basic stitch operation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Stitch {
    #[default]
    SingleCrochet,
    HalfDoubleCrochet,
    DoubleCrochet,
    TrebleCrochet,
    SlipStitch,
    Chain,
}

impl Stitch {
    /// Standard (US) pattern abbreviation.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Stitch::SingleCrochet => "sc",
            Stitch::HalfDoubleCrochet => "hdc",
            Stitch::DoubleCrochet => "dc",
            Stitch::TrebleCrochet => "tr",
            Stitch::SlipStitch => "sl st",
            Stitch::Chain => "ch",
        }
    }

    /// Whether whole rows can be worked in this stitch. Chains and slip
    /// stitches only join or start rows.
    pub fn works_rows(&self) -> bool {
        !matches!(self, Stitch::SlipStitch | Stitch::Chain)
    }

    /// Parses a stitch that whole rows can be worked in.
    pub fn parse_row_stitch(s: &str) -> Result<Self> {
        let stitch: Stitch = s.parse()?;
        if !stitch.works_rows() {
            return Err(PatternError::InvalidParameter {
                name: "stitch",
                reason: format!("rows cannot be worked in '{}' (use sc, hdc, dc or tr)", stitch),
            });
        }
        Ok(stitch)
    }
}

impl FromStr for Stitch {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sc" | "single" | "single-crochet" | "single_crochet" => Ok(Stitch::SingleCrochet),
            "hdc" | "half-double" | "half-double-crochet" | "half_double_crochet" => {
                Ok(Stitch::HalfDoubleCrochet)
            }
            "dc" | "double" | "double-crochet" | "double_crochet" => Ok(Stitch::DoubleCrochet),
            "tr" | "treble" | "treble-crochet" | "treble_crochet" => Ok(Stitch::TrebleCrochet),
            "sl st" | "slst" | "slip" | "slip-stitch" | "slip_stitch" => Ok(Stitch::SlipStitch),
            "ch" | "chain" => Ok(Stitch::Chain),
            other => Err(PatternError::InvalidParameter {
                name: "stitch",
                reason: format!("unknown stitch '{}'", other),
            }),
        }
    }
}

impl fmt::Display for Stitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// One run of identical stitch operations, or a repeated group of runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// `count` stitches, one into each of the next `count` stitches.
    Plain { stitch: Stitch, count: u32 },
    /// Decrease: `together` stitches worked into one, `count` times.
    Together {
        stitch: Stitch,
        count: u32,
        together: u32,
    },
    /// Increase: `multiple` stitches worked into each of the next `count`.
    Multiple {
        stitch: Stitch,
        count: u32,
        multiple: u32,
    },
    Group(Group),
}

impl Fragment {
    pub fn plain(count: u32) -> Self {
        Fragment::Plain {
            stitch: Stitch::SingleCrochet,
            count,
        }
    }

    /// A single two-together decrease.
    pub fn decrease() -> Self {
        Fragment::Together {
            stitch: Stitch::SingleCrochet,
            count: 1,
            together: 2,
        }
    }

    /// A single two-in-one increase.
    pub fn increase() -> Self {
        Fragment::Multiple {
            stitch: Stitch::SingleCrochet,
            count: 1,
            multiple: 2,
        }
    }

    /// Stitches this fragment adds to the row being worked.
    pub fn stitches(&self) -> u32 {
        match self {
            Fragment::Plain { count, .. } | Fragment::Together { count, .. } => *count,
            Fragment::Multiple {
                count, multiple, ..
            } => count * multiple,
            Fragment::Group(group) => group.stitches(),
        }
    }

    /// Stitches this fragment consumes from the previous row.
    pub fn stitches_into(&self) -> u32 {
        match self {
            Fragment::Plain { count, .. } | Fragment::Multiple { count, .. } => *count,
            Fragment::Together {
                count, together, ..
            } => count * together,
            Fragment::Group(group) => group.stitches_into(),
        }
    }

    /// Folds `other` into `self` if both describe the same operation.
    ///
    /// Returns `true` when the merge happened, in which case the caller
    /// should drop `other`. Groups never merge.
    pub fn merge(&mut self, other: &Fragment) -> bool {
        match (self, other) {
            (
                Fragment::Plain { stitch, count },
                Fragment::Plain {
                    stitch: other_stitch,
                    count: other_count,
                },
            ) if *stitch == *other_stitch => {
                *count += other_count;
                true
            }
            (
                Fragment::Together {
                    stitch,
                    count,
                    together,
                },
                Fragment::Together {
                    stitch: other_stitch,
                    count: other_count,
                    together: other_together,
                },
            ) if *stitch == *other_stitch && *together == *other_together => {
                *count += other_count;
                true
            }
            (
                Fragment::Multiple {
                    stitch,
                    count,
                    multiple,
                },
                Fragment::Multiple {
                    stitch: other_stitch,
                    count: other_count,
                    multiple: other_multiple,
                },
            ) if *stitch == *other_stitch && *multiple == *other_multiple => {
                *count += other_count;
                true
            }
            _ => false,
        }
    }

    /// Renders this fragment with the phrases from `phrasebook`.
    pub fn render(&self, phrasebook: &Phrasebook) -> String {
        let phrases = &phrasebook.fragment;
        match self {
            Fragment::Plain { stitch, count } => {
                let template = if *count == 1 {
                    &phrases.plain_one
                } else {
                    &phrases.plain_many
                };
                fill(
                    template,
                    &[("stitch", &phrasebook.stitch_name(*stitch)), ("count", count)],
                )
            }
            Fragment::Together {
                stitch,
                count,
                together,
            } => {
                let template = if *count == 1 {
                    &phrases.together_one
                } else {
                    &phrases.together_many
                };
                fill(
                    template,
                    &[
                        ("stitch", &phrasebook.stitch_name(*stitch)),
                        ("count", count),
                        ("together", together),
                    ],
                )
            }
            Fragment::Multiple {
                stitch,
                count,
                multiple,
            } => {
                let template = if *count == 1 {
                    &phrases.multiple_one
                } else {
                    &phrases.multiple_many
                };
                fill(
                    template,
                    &[
                        ("stitch", &phrasebook.stitch_name(*stitch)),
                        ("count", count),
                        ("multiple", multiple),
                    ],
                )
            }
            Fragment::Group(group) => group.render(phrasebook),
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&DEFAULT_PHRASEBOOK))
    }
}

/// An ordered run of fragments worked `repeats` times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    children: Vec<Fragment>,
    repeats: u32,
}

impl Default for Group {
    fn default() -> Self {
        Group::new()
    }
}

impl Group {
    /// An empty group worked once.
    pub fn new() -> Self {
        Group {
            children: Vec::new(),
            repeats: 1,
        }
    }

    /// A group worked `repeats` times, holding `children` as given (no
    /// merging is applied).
    pub fn repeated(children: Vec<Fragment>, repeats: u32) -> Result<Self> {
        let repeats = NonZeroU32::new(repeats).ok_or(PatternError::InvalidRepeatCount)?;
        Ok(Group {
            children,
            repeats: 1,
        }
        .times(repeats))
    }

    /// Sets how many times the group is worked.
    pub fn times(mut self, repeats: NonZeroU32) -> Self {
        self.repeats = repeats.get();
        self
    }

    pub fn children(&self) -> &[Fragment] {
        &self.children
    }

    pub fn repeats(&self) -> u32 {
        self.repeats
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Adds `fragment` to the end of the group, merging it into the last
    /// child when possible so the group stays run-length encoded.
    pub fn append(&mut self, fragment: Fragment) {
        if let Some(last) = self.children.last_mut() {
            if last.merge(&fragment) {
                return;
            }
        }
        self.children.push(fragment);
    }

    pub fn stitches(&self) -> u32 {
        self.children.iter().map(Fragment::stitches).sum::<u32>() * self.repeats
    }

    pub fn stitches_into(&self) -> u32 {
        self.children.iter().map(Fragment::stitches_into).sum::<u32>() * self.repeats
    }

    /// Renders the children joined by the fragment separator, bracketed with
    /// the repeat count when the group is worked more than once.
    pub fn render(&self, phrasebook: &Phrasebook) -> String {
        if self.children.is_empty() {
            return String::new();
        }
        let body = self
            .children
            .iter()
            .map(|child| child.render(phrasebook))
            .collect::<Vec<_>>()
            .join(&phrasebook.fragment.separator);
        if self.repeats > 1 {
            fill(
                &phrasebook.fragment.repeated_group,
                &[("body", &body), ("repeats", &self.repeats)],
            )
        } else {
            body
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&DEFAULT_PHRASEBOOK))
    }
}

impl From<Group> for Fragment {
    fn from(group: Group) -> Self {
        Fragment::Group(group)
    }
}

impl Extend<Fragment> for Group {
    /// Appends each fragment in turn, merging as [`Group::append`] does.
    fn extend<T: IntoIterator<Item = Fragment>>(&mut self, iter: T) {
        for fragment in iter {
            self.append(fragment);
        }
    }
}
