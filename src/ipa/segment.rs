//! Segmentation of decomposed IPA into base + diacritic units.
//!
//! Segmentation is total and lossless: malformed input still produces
//! segments, and concatenating them reproduces the decomposed input exactly.

use std::fmt;

use serde::Serialize;

use super::charset::{is_boundary, is_combining_mark};
use super::normalize::to_decomposed;

/// One base symbol and the combining marks attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub base: char,
    /// Combining marks, in canonical (NFD) order.
    pub diacritics: Vec<char>,
}

impl Segment {
    pub fn new(base: char) -> Self {
        Self {
            base,
            diacritics: Vec::new(),
        }
    }

    pub fn with_diacritics(base: char, diacritics: impl IntoIterator<Item = char>) -> Self {
        Self {
            base,
            diacritics: diacritics.into_iter().collect(),
        }
    }

    pub fn is_boundary(&self) -> bool {
        is_boundary(self.base)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        for d in &self.diacritics {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// Split `input` into segments.
///
/// The input is decomposed first (a no-op for text that already went through
/// the validator). Decomposition puts stacked marks in canonical order, so
/// `diacritics` follow that order rather than the order they were typed.
/// Boundary characters always stand alone and stop diacritics from attaching
/// across them. A combining mark with nothing to attach to starts its own
/// segment so no data is lost.
///
/// Spacing modifier letters (`ʰ`, `ː`, `˥`, ...) are not combining marks and
/// therefore form their own segments.
pub fn segment(input: &str) -> Vec<Segment> {
    let nfd = to_decomposed(input);
    let mut out: Vec<Segment> = Vec::new();
    // Whether the last pushed segment may still take diacritics.
    let mut open = false;

    for ch in nfd.chars() {
        if is_boundary(ch) {
            out.push(Segment::new(ch));
            open = false;
            continue;
        }

        if open && is_combining_mark(ch) {
            if let Some(current) = out.last_mut() {
                current.diacritics.push(ch);
                continue;
            }
        }

        out.push(Segment::new(ch));
        open = true;
    }

    log::debug!("segmented {} code points into {} segment(s)", nfd.char_len(), out.len());
    out
}

/// Concatenate segments back into a string.
pub fn reconstruct(segments: &[Segment]) -> String {
    segments.iter().map(ToString::to_string).collect()
}
