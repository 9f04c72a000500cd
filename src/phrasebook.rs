// src/phrasebook.rs

//! Phrase templates used to turn structured instructions into text.
//!
//! The synthesizer and the instruction model never hard-code wording; they
//! describe a row structurally and hand a [`Phrasebook`] the values to put
//! into each template. A phrasebook can be loaded from JSON to translate or
//! restyle the output. Any key left out of the file keeps its English
//! default.
//!
//! Templates use `{name}` placeholders. Unknown placeholders are left in the
//! output untouched.

use log::debug;
use once_cell::sync::Lazy; // For the shared default phrasebook
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap; // Keyed by stitch, in declaration order
use std::fmt::{self, Write as _}; // write! into a String
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::instruction::Stitch;

/// English phrasebook shared by the `Display` impls.
pub static DEFAULT_PHRASEBOOK: Lazy<Phrasebook> = Lazy::new(Phrasebook::default);

/// The complete set of phrase templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Phrasebook {
    /// Phrases for row-transition instructions and output lines.
    pub row: RowPhrases,
    /// Phrases for instruction-model fragments.
    pub fragment: FragmentPhrases,
    /// Overrides for stitch abbreviations, e.g. `{"single_crochet": "fm"}`.
    pub stitches: BTreeMap<Stitch, String>,
}

// --- Row Phrases ---

/// Templates for whole-row instructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowPhrases {
    /// First row of a piece started from a ring. Placeholders: `count`, `stitch`.
    pub magic_ring: String,
    /// First row of a piece started from a chain. Placeholders: `count`, `stitch`.
    pub foundation_chain: String,
    /// Row with the same count as the previous one. Placeholder: `stitch`.
    pub unchanged: String,
    /// One increase. Placeholders: `multiple`, `stitch`.
    pub increase: String,
    /// One decrease. Placeholders: `together`, `stitch`.
    pub decrease: String,
    /// A run of plain stitches. Placeholders: `count`, `stitch`.
    pub plain_run: String,
    pub repeat_start: String, // Marks where a repeat begins
    /// Placeholder: `repeats`.
    pub repeat_end: String,
    pub separator: String, // Between every part of a row
    /// A plain-text output line. Placeholders: `row`, `instruction`, `count`.
    pub text_line: String,
    /// An HTML output line. Placeholders: `row`, `instruction`, `count`.
    pub html_line: String,
}

impl Default for RowPhrases {
    fn default() -> Self {
        RowPhrases {
            magic_ring: "Make a magic circle, {count}{stitch} into centre.".to_string(),
            foundation_chain: "ch {count}, {stitch} in each chain".to_string(),
            unchanged: "{stitch} in each {stitch}".to_string(),
            increase: "{multiple}{stitch} in next".to_string(),
            decrease: "{together}{stitch}tog".to_string(),
            plain_run: "{count}{stitch}".to_string(),
            repeat_start: "*".to_string(),
            repeat_end: "repeat from * {repeats} times".to_string(),
            separator: ", ".to_string(),
            text_line: "Row {row}: {instruction} ({count})".to_string(),
            html_line: "<div class=\"instruction\">Row {row}: {instruction} \
                        <em class=\"stitch-count\">({count})</em></div>"
                .to_string(),
        }
    }
}

// --- Fragment Phrases ---

/// Templates for instruction-model fragments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FragmentPhrases {
    pub plain_one: String, // The `_one` templates are used when count is 1
    pub plain_many: String,
    pub together_one: String,
    pub together_many: String, // Both `together_*` also get `together`
    pub multiple_one: String,
    pub multiple_many: String, // Both `multiple_*` also get `multiple`
    /// A group worked more than once. Placeholders: `body`, `repeats`.
    pub repeated_group: String,
    pub separator: String,
}

impl Default for FragmentPhrases {
    fn default() -> Self {
        FragmentPhrases {
            // Single shaping stitches read the same as in row instructions.
            plain_one: "{count}{stitch}".to_string(),
            plain_many: "{count}{stitch}".to_string(),
            together_one: "{together}{stitch}tog".to_string(),
            together_many: "{together}{stitch}tog in next {count}".to_string(),
            multiple_one: "{multiple}{stitch} in next".to_string(),
            multiple_many: "{multiple}{stitch} in each in next {count}".to_string(),
            repeated_group: "[{body}] x{repeats}".to_string(),
            separator: ", ".to_string(),
        }
    }
}

impl Phrasebook {
    /// Reads a phrasebook from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading phrasebook from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The name to print for `stitch`.
    pub fn stitch_name(&self, stitch: Stitch) -> &str {
        self.stitches
            .get(&stitch)
            .map(String::as_str)
            .unwrap_or_else(|| stitch.abbreviation())
    }
}

/// Substitutes `{name}` placeholders in `template` with the matching values
/// from `args`.
///
/// Substituted text is never rescanned, so values may safely contain braces.
pub fn fill(template: &str, args: &[(&str, &dyn fmt::Display)]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('}') else {
            // Unterminated: copy the remainder verbatim.
            out.push_str(&rest[open..]);
            return out;
        };
        let name = &after_open[..close];
        match args.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => {
                // Writing into a String cannot fail.
                let _ = write!(out, "{}", value);
            }
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after_open[close + 1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn fill_substitutes_named_values() {
        let text = fill("{count}{stitch} in next {count}", &[("count", &3), ("stitch", &"sc")]);
        assert_eq!(text, "3sc in next 3");
    }

    #[test]
    fn fill_leaves_unknown_and_unterminated_placeholders() {
        assert_eq!(fill("{what} {count}", &[("count", &1)]), "{what} 1");
        assert_eq!(fill("row {row", &[("row", &1)]), "row {row");
        assert_eq!(fill("no placeholders", &[]), "no placeholders");
    }

    #[test]
    fn fill_does_not_rescan_values() {
        assert_eq!(fill("{body}", &[("body", &"{body}"), ("x", &1)]), "{body}");
    }

    #[test]
    fn stitch_names_can_be_overridden() {
        let mut phrasebook = Phrasebook::default();
        assert_eq!(phrasebook.stitch_name(Stitch::SingleCrochet), "sc");
        phrasebook
            .stitches
            .insert(Stitch::SingleCrochet, "fm".to_string());
        assert_eq!(phrasebook.stitch_name(Stitch::SingleCrochet), "fm");
        assert_eq!(phrasebook.stitch_name(Stitch::Chain), "ch");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{
            "row": { "unchanged": "1 {stitch} in jede M" },
            "stitches": { "single_crochet": "fM" }
        }"#;
        let phrasebook = Phrasebook::from_json(json).unwrap();
        assert_eq!(phrasebook.row.unchanged, "1 {stitch} in jede M");
        assert_eq!(phrasebook.row.separator, ", ");
        assert_eq!(phrasebook.fragment, FragmentPhrases::default());
        assert_eq!(phrasebook.stitch_name(Stitch::SingleCrochet), "fM");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Phrasebook::from_json("{ not json"),
            Err(crate::error::PatternError::Phrasebook(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join(format!(
            "crochet-cad-phrasebook-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{"row": {"repeat_start": "("}}"#).unwrap();
        let phrasebook = Phrasebook::load(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(phrasebook.row.repeat_start, "(");

        assert!(matches!(
            Phrasebook::load(&path),
            Err(crate::error::PatternError::Io(_))
        ));
    }

    #[test]
    fn default_round_trips_through_json() {
        let json = serde_json::to_string(&*DEFAULT_PHRASEBOOK).unwrap();
        assert_eq!(Phrasebook::from_json(&json).unwrap(), *DEFAULT_PHRASEBOOK);
    }
}
