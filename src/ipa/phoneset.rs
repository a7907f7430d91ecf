//! Phone inventory and capability checking.
//!
//! Character legality (the validator's whitelist) and coverage are separate:
//! a symbol may be perfectly valid IPA yet unknown to the audio backend.
//! Coverage gaps are advisory and never block synthesis.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::segment::Segment;

#[derive(thiserror::Error, Debug)]
pub enum InventoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse inventory JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid inventory: {0}")]
    Config(String),
}

/// Base phones the backend can render.
const DEFAULT_BASES: &[char] = &[
    // Vowels
    'i', 'e', 'a', 'o', 'u', 'ɪ', 'ʊ', 'ɛ', 'ɔ', 'ə', 'æ', 'ɑ', 'ɒ', 'y', 'ø', 'œ', 'ɨ', 'ɯ', 'ɤ',
    // Consonants
    'p', 'b', 't', 'd', 'k', 'g', 'm', 'n', 'ŋ', 'f', 'v', 's', 'z', 'ʃ', 'ʒ', 'h', 'x', 'ç', 'ʝ',
    'l', 'r', 'ɾ', 'ʀ', 'j', 'w', 'θ', 'ð', 'ʈ', 'ɖ', 'ɟ', 'ɡ', 'q', 'ɢ', 'ɣ', 'ɬ', 'ɮ',
];

/// Diacritics the backend can render.
const DEFAULT_DIACRITICS: &[char] = &[
    '\u{0325}', // voiceless
    '\u{032C}', // voiced
    'ʰ',        // aspirated
    '\u{0339}', // more rounded
    '\u{031C}', // less rounded
    '\u{031F}', // advanced
    '\u{0320}', // retracted
    '\u{0308}', // centralized
    '\u{033D}', // mid-centralized
    '\u{0329}', // syllabic
    '\u{032F}', // non-syllabic
    '˞',        // rhoticity
    'ʷ',        // labialized
    'ʲ',        // palatalized
    'ˠ',        // velarized
    'ˤ',        // pharyngealized
    '\u{0334}', // velarized or pharyngealized
    '\u{031D}', // raised
    '\u{031E}', // lowered
    '\u{0318}', // advanced tongue root
    '\u{0319}', // retracted tongue root
    '\u{032A}', // dental
    '\u{033A}', // apical
    '\u{033B}', // laminal
    '\u{0303}', // nasalized
    '\u{031A}', // no audible release
    '\u{030A}', // voiceless (above)
    '\u{0361}', // tie bar above
    '\u{035C}', // tie bar below
    '\u{0324}', // breathy voiced
    '\u{0330}', // creaky voiced
    // tone diacritics
    '\u{0301}', '\u{0300}', '\u{0304}', '\u{030C}', '\u{0302}', '\u{030B}', '\u{030F}',
];

/// Spacing modifier letters accepted as segment bases even though they act
/// like diacritics.
const DEFAULT_SPACING_MODIFIERS: &[char] = &[
    'ʰ', 'ʷ', 'ʲ', 'ˠ', 'ˤ', 'ː', 'ˑ', '˞', // aspiration .. rhoticity
    '˥', '˦', '˧', '˨', '˩', // Chao tone letters
];

static BUILTIN: Lazy<PhoneInventory> = Lazy::new(PhoneInventory::default);

/// Supported phone and diacritic sets. Read-only once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneInventory {
    bases: HashSet<char>,
    diacritics: HashSet<char>,
    spacing_modifiers: HashSet<char>,
}

impl Default for PhoneInventory {
    fn default() -> Self {
        Self {
            bases: DEFAULT_BASES.iter().copied().collect(),
            diacritics: DEFAULT_DIACRITICS.iter().copied().collect(),
            spacing_modifiers: DEFAULT_SPACING_MODIFIERS.iter().copied().collect(),
        }
    }
}

/// On-disk inventory layout. Each entry must be exactly one code point.
#[derive(Debug, Deserialize)]
struct InventoryFile {
    bases: Vec<String>,
    diacritics: Vec<String>,
    #[serde(default)]
    spacing_modifiers: Option<Vec<String>>,
}

impl PhoneInventory {
    /// Shared built-in inventory, initialised on first use.
    pub fn builtin() -> &'static PhoneInventory {
        &BUILTIN
    }

    pub fn new(
        bases: impl IntoIterator<Item = char>,
        diacritics: impl IntoIterator<Item = char>,
        spacing_modifiers: impl IntoIterator<Item = char>,
    ) -> Self {
        Self {
            bases: bases.into_iter().collect(),
            diacritics: diacritics.into_iter().collect(),
            spacing_modifiers: spacing_modifiers.into_iter().collect(),
        }
    }

    /// Load an inventory from a JSON file of the form
    /// `{"bases": [...], "diacritics": [...], "spacing_modifiers": [...]}`.
    ///
    /// `spacing_modifiers` may be omitted, in which case the built-in set is used.
    pub fn load(path: &Path) -> Result<Self, InventoryError> {
        let content = std::fs::read_to_string(path)?;
        let inventory = Self::from_json(&content)?;
        log::info!(
            "Loaded phone inventory from {} ({} bases, {} diacritics)",
            path.display(),
            inventory.bases.len(),
            inventory.diacritics.len()
        );
        Ok(inventory)
    }

    pub fn from_json(content: &str) -> Result<Self, InventoryError> {
        let file: InventoryFile = serde_json::from_str(content)?;

        let spacing_modifiers = match file.spacing_modifiers {
            Some(list) => parse_symbols("spacing_modifiers", &list)?,
            None => DEFAULT_SPACING_MODIFIERS.iter().copied().collect(),
        };

        Ok(Self {
            bases: parse_symbols("bases", &file.bases)?,
            diacritics: parse_symbols("diacritics", &file.diacritics)?,
            spacing_modifiers,
        })
    }

    /// Load from `path` if given and present, otherwise use the built-in set.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, InventoryError> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                log::warn!(
                    "{} not found, using built-in phone inventory",
                    path.display()
                );
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn supports_base(&self, ch: char) -> bool {
        self.bases.contains(&ch) || self.spacing_modifiers.contains(&ch)
    }

    pub fn supports_diacritic(&self, ch: char) -> bool {
        self.diacritics.contains(&ch)
    }

    /// Report every base and diacritic in `segments` that this inventory
    /// cannot render. Boundary segments are skipped.
    pub fn check(&self, segments: &[Segment]) -> CapabilityReport {
        let mut unsupported = Vec::new();

        for (index, seg) in segments.iter().enumerate() {
            if seg.is_boundary() || seg.base.is_whitespace() {
                continue;
            }
            if !self.supports_base(seg.base) {
                unsupported.push(CapabilityItem {
                    index,
                    symbol: seg.base,
                    kind: SymbolKind::Base,
                });
            }
            for &d in &seg.diacritics {
                if !self.supports_diacritic(d) {
                    unsupported.push(CapabilityItem {
                        index,
                        symbol: d,
                        kind: SymbolKind::Diacritic,
                    });
                }
            }
        }

        log::debug!(
            "capability check: {} segment(s), {} unsupported symbol(s)",
            segments.len(),
            unsupported.len()
        );
        CapabilityReport { unsupported }
    }
}

fn parse_symbols(field: &str, entries: &[String]) -> Result<HashSet<char>, InventoryError> {
    entries
        .iter()
        .map(|entry| {
            let mut chars = entry.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Ok(ch),
                _ => Err(InventoryError::Config(format!(
                    "'{field}' entries must be single code points, got {entry:?}"
                ))),
            }
        })
        .collect()
}

/// Check `segments` against the built-in inventory.
pub fn check_capabilities(segments: &[Segment]) -> CapabilityReport {
    PhoneInventory::builtin().check(segments)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Base,
    Diacritic,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Base => "base",
            Self::Diacritic => "diacritic",
        })
    }
}

/// A symbol the inventory cannot render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityItem {
    /// Segment index.
    pub index: usize,
    pub symbol: char,
    pub kind: SymbolKind,
}

impl fmt::Display for CapabilityItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unsupported {} \"{}\" at segment {}",
            self.kind, self.symbol, self.index
        )
    }
}

/// Coverage gaps, ordered by segment index, base before diacritics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapabilityReport {
    pub unsupported: Vec<CapabilityItem>,
}

impl CapabilityReport {
    pub fn is_empty(&self) -> bool {
        self.unsupported.is_empty()
    }

    /// Advisory notes, one per unsupported symbol.
    pub fn notes(&self) -> Vec<String> {
        self.unsupported.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipa::segment::segment;

    #[test]
    fn glottal_stop_is_an_unsupported_base() {
        let report = check_capabilities(&segment("ʔa"));
        assert_eq!(
            report.unsupported,
            vec![CapabilityItem {
                index: 0,
                symbol: 'ʔ',
                kind: SymbolKind::Base,
            }]
        );
        assert_eq!(report.notes(), vec!["Unsupported base \"ʔ\" at segment 0"]);
    }

    #[test]
    fn supported_word_has_no_gaps() {
        assert!(check_capabilities(&segment("kæt pʰaː")).is_empty());
    }

    #[test]
    fn stress_marks_are_not_in_the_starter_inventory() {
        let report = check_capabilities(&segment("ˈkæt"));
        assert_eq!(report.notes(), vec!["Unsupported base \"ˈ\" at segment 0"]);
    }

    #[test]
    fn spacing_modifiers_are_accepted_as_bases() {
        assert!(check_capabilities(&segment("aː ma˥˩ kʷ")).is_empty());
    }

    #[test]
    fn boundaries_and_whitespace_are_skipped() {
        assert!(check_capabilities(&segment("[a.b]/ |‖ a\u{2003}b")).is_empty());
    }

    #[test]
    fn unsupported_diacritics_follow_their_base() {
        // U+0348 (strong articulation) and U+0353 (frictionalized) are not in the inventory.
        let segs = segment("ʔ\u{0348}a\u{0303}\u{0353}");
        let report = check_capabilities(&segs);
        assert_eq!(
            report.unsupported,
            vec![
                CapabilityItem { index: 0, symbol: 'ʔ', kind: SymbolKind::Base },
                CapabilityItem { index: 0, symbol: '\u{0348}', kind: SymbolKind::Diacritic },
                CapabilityItem { index: 1, symbol: '\u{0353}', kind: SymbolKind::Diacritic },
            ]
        );
    }

    #[test]
    fn inventory_from_json() {
        let inv = PhoneInventory::from_json(r#"{"bases": ["a", "ʔ"], "diacritics": ["\u0303"]}"#)
            .expect("valid inventory");
        assert!(inv.supports_base('ʔ'));
        assert!(!inv.supports_base('k'));
        assert!(inv.supports_base('ː'), "default spacing modifiers apply");
        assert!(inv.supports_diacritic('\u{0303}'));
        assert!(inv.check(&segment("ʔã")).is_empty());
    }

    #[test]
    fn inventory_rejects_multi_char_entries() {
        let err = PhoneInventory::from_json(r#"{"bases": ["ts"], "diacritics": []}"#).unwrap_err();
        assert!(matches!(err, InventoryError::Config(_)), "got {err:?}");

        let err = PhoneInventory::from_json(r#"{"bases": [""], "diacritics": []}"#).unwrap_err();
        assert!(matches!(err, InventoryError::Config(_)), "got {err:?}");

        let err = PhoneInventory::from_json("{not json").unwrap_err();
        assert!(matches!(err, InventoryError::Json(_)), "got {err:?}");
    }

    #[test]
    fn inventory_load_round_trip_and_fallback() {
        let path = std::env::temp_dir().join(format!("ipa-inventory-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"bases": ["ʔ"], "diacritics": [], "spacing_modifiers": []}"#)
            .unwrap();

        let inv = PhoneInventory::load_or_default(Some(&path)).unwrap();
        assert!(inv.supports_base('ʔ'));
        assert!(!inv.supports_base('ː'));
        std::fs::remove_file(&path).unwrap();

        let fallback = PhoneInventory::load_or_default(Some(&path)).unwrap();
        assert_eq!(fallback, PhoneInventory::default());
    }
}
