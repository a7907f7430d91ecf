//! Read-only code-point tables shared by the validator, segmenter and
//! capability checker.
//!
//! All tables are compile-time constants except the combining-mark class,
//! which is a lazily compiled `\p{M}` regex. Nothing here is ever mutated.

use once_cell::sync::Lazy;
use regex::Regex;

/// Primary stress `ˈ`.
pub const STRESS_PRIMARY: char = '\u{02C8}';
/// Secondary stress `ˌ`.
pub const STRESS_SECONDARY: char = '\u{02CC}';
/// Long `ː`.
pub const LENGTH_LONG: char = '\u{02D0}';
/// Half-long `ˑ`.
pub const LENGTH_HALF: char = '\u{02D1}';
/// Combining double inverted breve (tie bar above).
pub const TIE_BAR_ABOVE: char = '\u{0361}';
/// Combining double breve below (tie bar below).
pub const TIE_BAR_BELOW: char = '\u{035C}';
/// Double vertical line `‖` (major prosodic break).
pub const MAJOR_BREAK: char = '\u{2016}';

/// An inclusive block of allowed code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowedRange {
    pub start: char,
    pub end: char,
}

impl AllowedRange {
    const fn new(start: char, end: char) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, ch: char) -> bool {
        (self.start..=self.end).contains(&ch)
    }
}

/// Unicode blocks accepted in an IPA transcription.
///
/// General Punctuation is allowed wholesale here; positional rules in the
/// validator restrict where punctuation may actually appear.
pub const ALLOWED_RANGES: &[AllowedRange] = &[
    AllowedRange::new('\u{0020}', '\u{007E}'), // Basic Latin
    AllowedRange::new('\u{00A0}', '\u{024F}'), // Latin-1 Supplement, Latin Extended-A/B
    AllowedRange::new('\u{0250}', '\u{02AF}'), // IPA Extensions
    AllowedRange::new('\u{02B0}', '\u{02FF}'), // Spacing Modifier Letters
    AllowedRange::new('\u{0300}', '\u{036F}'), // Combining Diacritical Marks
    AllowedRange::new('\u{1AB0}', '\u{1AFF}'), // Combining Diacritical Marks Extended
    AllowedRange::new('\u{1DC0}', '\u{1DFF}'), // Combining Diacritical Marks Supplement
    AllowedRange::new('\u{1D00}', '\u{1D7F}'), // Phonetic Extensions
    AllowedRange::new('\u{1D80}', '\u{1DBF}'), // Phonetic Extensions Supplement
    AllowedRange::new('\u{1E00}', '\u{1EFF}'), // Latin Extended Additional
    AllowedRange::new('\u{2000}', '\u{206F}'), // General Punctuation
    AllowedRange::new('\u{02E5}', '\u{02E9}'), // Chao tone letters
    AllowedRange::new('\u{A700}', '\u{A71F}'), // Modifier Tone Letters
    AllowedRange::new(TIE_BAR_ABOVE, TIE_BAR_ABOVE),
    AllowedRange::new(TIE_BAR_BELOW, TIE_BAR_BELOW),
    AllowedRange::new(MAJOR_BREAK, MAJOR_BREAK),
];

/// Spacing and punctuation the validator treats as a break for context rules.
pub const PUNCTUATION: &[char] = &[' ', '.', ',', '\'', '-', '|', MAJOR_BREAK];

/// Characters that always form their own segment and never carry diacritics.
pub const BOUNDARIES: &[char] = &[' ', '.', ',', '\'', '-', '|', MAJOR_BREAK, '/', '[', ']'];

/// Vowels recognised by the tone-letter context rule.
pub const VOWELS: &[char] = &[
    'i', 'y', 'ɨ', 'ʉ', 'ɯ', 'u', 'ɪ', 'ʏ', 'ʊ', //
    'e', 'ø', 'ɘ', 'ɵ', 'ɤ', 'o', 'ə', //
    'ɛ', 'œ', 'ɜ', 'ɞ', 'ʌ', 'ɔ', //
    'æ', 'ɐ', 'a', 'ɶ', 'ɑ', 'ɒ',
];

static RE_COMBINING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{M}$").unwrap());

/// Whether `ch` falls inside one of the [`ALLOWED_RANGES`].
pub fn is_allowed(ch: char) -> bool {
    ALLOWED_RANGES.iter().any(|range| range.contains(ch))
}

/// Unicode general category `M` (nonspacing, spacing or enclosing mark).
pub fn is_combining_mark(ch: char) -> bool {
    let mut buf = [0u8; 4];
    RE_COMBINING.is_match(ch.encode_utf8(&mut buf))
}

pub fn is_stress_mark(ch: char) -> bool {
    ch == STRESS_PRIMARY || ch == STRESS_SECONDARY
}

pub fn is_length_mark(ch: char) -> bool {
    ch == LENGTH_LONG || ch == LENGTH_HALF
}

/// Chao tone letters `˥ ˦ ˧ ˨ ˩`.
pub fn is_tone_letter(ch: char) -> bool {
    ('\u{02E5}'..='\u{02E9}').contains(&ch)
}

pub fn is_punctuation(ch: char) -> bool {
    PUNCTUATION.contains(&ch)
}

pub fn is_boundary(ch: char) -> bool {
    BOUNDARIES.contains(&ch)
}

pub fn is_vowel(ch: char) -> bool {
    VOWELS.contains(&ch)
}
