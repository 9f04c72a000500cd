// src/render/mod.rs

//! Turns stitch counts into output lines.
//!
//! [`PatternLines`] walks a sequence of quantized row counts, pairing each
//! count with the previous one, and yields one `Row N: ... (count)` line per
//! row. [`row_count_lines`] is the fast path that skips synthesis and prints
//! the bare counts.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::instruction::Stitch;
use crate::phrasebook::{fill, Phrasebook, DEFAULT_PHRASEBOOK};
use crate::synth::plan_row_with;

/// Markup used for instruction lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineFormat {
    #[default]
    Text,
    Html,
}

/// Formats one row with the given phrasebook.
pub fn render_line(
    phrasebook: &Phrasebook,
    format: LineFormat,
    stitch: Stitch,
    row: u32,
    prev: Option<u32>,
    count: u32,
) -> Result<String> {
    let instruction = plan_row_with(stitch, prev, count)?.render(phrasebook);
    let template = match format {
        LineFormat::Text => &phrasebook.row.text_line,
        LineFormat::Html => &phrasebook.row.html_line,
    };
    Ok(fill(
        template,
        &[
            ("row", &row),
            ("instruction", &instruction),
            ("count", &count),
        ],
    ))
}

/// `Row {row}: {instruction} ({count})` in English.
pub fn instruction_line(row: u32, prev: Option<u32>, count: u32) -> Result<String> {
    render_line(
        &DEFAULT_PHRASEBOOK,
        LineFormat::Text,
        Stitch::SingleCrochet,
        row,
        prev,
        count,
    )
}

/// The HTML version of [`instruction_line`].
pub fn instruction_html(row: u32, prev: Option<u32>, count: u32) -> Result<String> {
    render_line(
        &DEFAULT_PHRASEBOOK,
        LineFormat::Html,
        Stitch::SingleCrochet,
        row,
        prev,
        count,
    )
}

/// Lazily renders one line per row count, numbering rows from 1.
///
/// The iterator stops after the first error, so a pattern is either complete
/// or ends at the row that could not be worked.
#[derive(Debug)]
pub struct PatternLines<'a, I> {
    counts: I,
    phrasebook: &'a Phrasebook,
    format: LineFormat,
    stitch: Stitch,
    prev: Option<u32>,
    row: u32,
    failed: bool,
}

impl<'a, I> PatternLines<'a, I>
where
    I: Iterator<Item = u32>,
{
    pub fn new<C>(counts: C, phrasebook: &'a Phrasebook) -> Self
    where
        C: IntoIterator<IntoIter = I>,
    {
        PatternLines {
            counts: counts.into_iter(),
            phrasebook,
            format: LineFormat::Text,
            stitch: Stitch::SingleCrochet,
            prev: None,
            row: 0,
            failed: false,
        }
    }

    pub fn format(mut self, format: LineFormat) -> Self {
        self.format = format;
        self
    }

    pub fn stitch(mut self, stitch: Stitch) -> Self {
        self.stitch = stitch;
        self
    }
}

impl<I> Iterator for PatternLines<'_, I>
where
    I: Iterator<Item = u32>,
{
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let count = self.counts.next()?;
        self.row += 1;
        let line = render_line(
            self.phrasebook,
            self.format,
            self.stitch,
            self.row,
            self.prev,
            count,
        );
        match line {
            Ok(_) => self.prev = Some(count),
            Err(_) => self.failed = true,
        }
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, self.counts.size_hint().1)
        }
    }
}

/// Renders every row count as a bare integer.
pub fn row_count_lines<I>(counts: I) -> impl Iterator<Item = String>
where
    I: IntoIterator<Item = u32>,
{
    counts.into_iter().map(|count| count.to_string())
}
