//! Character and context validation of IPA transcriptions.
//!
//! The validator never stops at the first problem: every rule is evaluated
//! over the whole decomposed string and all issues are returned, sorted by
//! code-point index (ties keep rule evaluation order).
//!
//! The start-of-string checks and the general context scan are independent,
//! so a defect at position 0 or 1 may be reported by both. For example
//! `ˈˈtest` yields two "Consecutive stress marks" issues at index 1.

use std::fmt;

use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use super::charset::{
    is_allowed, is_combining_mark, is_length_mark, is_punctuation, is_stress_mark,
    is_tone_letter, is_vowel,
};
use super::normalize::{to_composed, to_decomposed, NormalizedString};

/// Validation rule that produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IssueKind {
    /// Nothing left after decomposition and trimming.
    EmptyInput,
    /// Code point outside every allowed Unicode block.
    UnsupportedCharacter,
    /// First code point is a combining mark.
    IllegalCombiningStart,
    /// Combining mark at position 0 or right after punctuation.
    DetachedDiacritic,
    /// Leading stress mark with nothing after it.
    StressMarkAtEnd,
    /// Leading stress mark followed by space or punctuation.
    StressMarkBeforeBoundary,
    /// Stress mark directly after another stress mark.
    ConsecutiveStressMarks,
    /// String opens with a length mark.
    LeadingLengthMark,
    /// Length mark at position 0, after a combining mark, or after punctuation.
    MisplacedLengthMark,
    /// Chao tone letter not preceded by a vowel or combining mark.
    ToneLetterContext,
}

impl IssueKind {
    /// Human-readable rule description.
    pub fn message(self) -> &'static str {
        match self {
            Self::EmptyInput => "Empty input",
            Self::UnsupportedCharacter => "Unsupported character (not IPA or related mark)",
            Self::IllegalCombiningStart => "Cannot start with a combining diacritic",
            Self::DetachedDiacritic => "Diacritic must attach to a preceding base symbol",
            Self::StressMarkAtEnd => "Stress mark cannot be the only/last character",
            Self::StressMarkBeforeBoundary => {
                "Stress mark cannot be followed by space or punctuation"
            }
            Self::ConsecutiveStressMarks => "Consecutive stress marks are not allowed",
            Self::LeadingLengthMark => "Length mark must follow a symbol",
            Self::MisplacedLengthMark => "Length mark must follow a base symbol",
            Self::ToneLetterContext => "Tone letter should follow a vowel segment",
        }
    }
}

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Code-point offset into the decomposed, trimmed input.
    pub index: usize,
    /// Offending code point, `None` for whole-string issues.
    pub ch: Option<char>,
    pub kind: IssueKind,
}

impl ValidationIssue {
    fn new(index: usize, ch: char, kind: IssueKind) -> Self {
        Self {
            index,
            ch: Some(ch),
            kind,
        }
    }

    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

/// Formats as `<index>:"<char>" <message>`, or `<index>:<message>` when
/// there is no offending character.
impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ch {
            Some(ch) => write!(f, "{}:\"{}\" {}", self.index, ch, self.message()),
            None => write!(f, "{}:{}", self.index, self.message()),
        }
    }
}

/// Serializes as `{"index", "char", "message", "kind"}`; `char` is an empty
/// string for whole-string issues.
impl Serialize for ValidationIssue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut buf = [0u8; 4];
        let ch: &str = match self.ch {
            Some(ch) => ch.encode_utf8(&mut buf),
            None => "",
        };
        let mut state = serializer.serialize_struct("ValidationIssue", 4)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field("char", ch)?;
        state.serialize_field("message", self.message())?;
        state.serialize_field("kind", &self.kind)?;
        state.end()
    }
}

/// Outcome of [`validate`].
///
/// `cleaned` is always populated so callers can display issues against it,
/// even when validation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
    pub cleaned: NormalizedString,
}

impl ValidationResult {
    /// `true` exactly when no issue was found.
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    /// The cleaned text in composed form, for display.
    pub fn display_text(&self) -> NormalizedString {
        to_composed(&self.cleaned)
    }

    /// Issues rendered with their [`Display`](fmt::Display) format.
    pub fn formatted_issues(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }

    pub fn into_result(self) -> Result<NormalizedString, Vec<ValidationIssue>> {
        if self.issues.is_empty() {
            Ok(self.cleaned)
        } else {
            Err(self.issues)
        }
    }
}

/// Serializes as `{"ok", "issues", "cleaned"}`.
impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 3)?;
        state.serialize_field("ok", &self.is_ok())?;
        state.serialize_field("issues", &self.issues)?;
        state.serialize_field("cleaned", &self.cleaned)?;
        state.end()
    }
}

/// Validate a raw IPA string.
///
/// The input is decomposed (NFD) and trimmed of whitespace and byte-order
/// marks first; all indices refer to that cleaned form.
pub fn validate(raw: &str) -> ValidationResult {
    let cleaned = to_decomposed(raw).trimmed();
    let chars: Vec<char> = cleaned.chars().collect();

    let Some(&first) = chars.first() else {
        return ValidationResult {
            issues: vec![ValidationIssue {
                index: 0,
                ch: None,
                kind: IssueKind::EmptyInput,
            }],
            cleaned,
        };
    };

    let mut issues = Vec::new();
    check_whitelist(&chars, &mut issues);
    check_start(first, chars.get(1).copied(), &mut issues);
    check_context(&chars, &mut issues);

    // Stable: rule evaluation order is kept among issues at the same index.
    issues.sort_by_key(|issue| issue.index);

    log::debug!(
        "validated {} code points, {} issue(s)",
        chars.len(),
        issues.len()
    );

    ValidationResult { issues, cleaned }
}

fn check_whitelist(chars: &[char], issues: &mut Vec<ValidationIssue>) {
    for (i, &ch) in chars.iter().enumerate() {
        if !is_allowed(ch) {
            issues.push(ValidationIssue::new(i, ch, IssueKind::UnsupportedCharacter));
        }
    }
}

fn check_start(first: char, second: Option<char>, issues: &mut Vec<ValidationIssue>) {
    if is_combining_mark(first) {
        issues.push(ValidationIssue::new(0, first, IssueKind::IllegalCombiningStart));
    }

    // A leading stress mark must be followed by the start of a syllable.
    if is_stress_mark(first) {
        match second {
            None => issues.push(ValidationIssue::new(0, first, IssueKind::StressMarkAtEnd)),
            Some(next) if is_punctuation(next) => issues.push(ValidationIssue::new(
                0,
                first,
                IssueKind::StressMarkBeforeBoundary,
            )),
            Some(next) if is_stress_mark(next) => issues.push(ValidationIssue::new(
                1,
                next,
                IssueKind::ConsecutiveStressMarks,
            )),
            Some(_) => {}
        }
    }

    if is_length_mark(first) {
        issues.push(ValidationIssue::new(0, first, IssueKind::LeadingLengthMark));
    }
}

fn check_context(chars: &[char], issues: &mut Vec<ValidationIssue>) {
    for (i, &ch) in chars.iter().enumerate() {
        let prev = if i > 0 { Some(chars[i - 1]) } else { None };
        let after_punctuation = prev.is_some_and(is_punctuation);

        if is_combining_mark(ch) && (prev.is_none() || after_punctuation) {
            issues.push(ValidationIssue::new(i, ch, IssueKind::DetachedDiacritic));
        }

        if is_length_mark(ch)
            && (prev.is_none() || after_punctuation || prev.is_some_and(is_combining_mark))
        {
            issues.push(ValidationIssue::new(i, ch, IssueKind::MisplacedLengthMark));
        }

        if is_stress_mark(ch) && prev.is_some_and(is_stress_mark) {
            issues.push(ValidationIssue::new(i, ch, IssueKind::ConsecutiveStressMarks));
        }

        // Loose heuristic: a combining mark stands in for "still on a vowel".
        if is_tone_letter(ch) && !prev.is_some_and(|p| is_vowel(p) || is_combining_mark(p)) {
            issues.push(ValidationIssue::new(i, ch, IssueKind::ToneLetterContext));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(result: &ValidationResult) -> Vec<(usize, IssueKind)> {
        result.issues.iter().map(|i| (i.index, i.kind)).collect()
    }

    #[test]
    fn empty_and_whitespace_input_is_rejected() {
        for input in ["", "   ", "\u{2003}\t "] {
            let result = validate(input);
            assert!(!result.is_ok(), "input {input:?}");
            assert_eq!(result.issues.len(), 1);
            assert_eq!(result.issues[0].kind, IssueKind::EmptyInput);
            assert_eq!(result.issues[0].ch, None);
            assert_eq!(result.issues[0].to_string(), "0:Empty input");
            assert!(result.cleaned.is_empty());
        }
    }

    #[test]
    fn leading_stress_before_letter_is_legal() {
        let result = validate("ˈkæt");
        assert!(result.is_ok(), "issues: {:?}", result.issues);
        assert_eq!(result.cleaned, "ˈkæt");
    }

    #[test]
    fn double_leading_stress_reported_by_both_passes() {
        let result = validate("ˈˈtest");
        assert!(!result.is_ok());
        assert_eq!(
            kinds(&result),
            vec![
                (1, IssueKind::ConsecutiveStressMarks),
                (1, IssueKind::ConsecutiveStressMarks),
            ]
        );
        assert_eq!(
            result.issues[0].to_string(),
            "1:\"ˈ\" Consecutive stress marks are not allowed"
        );
    }

    #[test]
    fn consecutive_stress_inside_word() {
        let result = validate("aˌˈb");
        assert_eq!(kinds(&result), vec![(2, IssueKind::ConsecutiveStressMarks)]);
    }

    #[test]
    fn lone_stress_mark() {
        let result = validate("ˈ");
        assert_eq!(kinds(&result), vec![(0, IssueKind::StressMarkAtEnd)]);
        assert_eq!(
            result.issues[0].message(),
            "Stress mark cannot be the only/last character"
        );
    }

    #[test]
    fn stress_followed_by_space() {
        let result = validate("ˈ ka");
        assert_eq!(kinds(&result), vec![(0, IssueKind::StressMarkBeforeBoundary)]);
    }

    #[test]
    fn unsupported_characters_are_all_reported() {
        let result = validate("kα中t");
        assert_eq!(
            kinds(&result),
            vec![
                (1, IssueKind::UnsupportedCharacter),
                (2, IssueKind::UnsupportedCharacter),
            ]
        );
        assert_eq!(result.issues[1].ch, Some('中'));
    }

    #[test]
    fn combining_start_is_reported_by_both_passes() {
        let result = validate("\u{0303}a");
        assert_eq!(
            kinds(&result),
            vec![
                (0, IssueKind::IllegalCombiningStart),
                (0, IssueKind::DetachedDiacritic),
            ]
        );
    }

    #[test]
    fn diacritic_after_space_is_detached() {
        let result = validate("a \u{0325}b");
        assert_eq!(kinds(&result), vec![(2, IssueKind::DetachedDiacritic)]);
    }

    #[test]
    fn leading_length_mark() {
        let result = validate("ːa");
        assert_eq!(
            kinds(&result),
            vec![
                (0, IssueKind::LeadingLengthMark),
                (0, IssueKind::MisplacedLengthMark),
            ]
        );
    }

    #[test]
    fn length_mark_after_diacritic_or_punctuation() {
        // "ã" decomposes to a + U+0303, putting the length mark after a combining mark.
        let result = validate("ãː");
        assert_eq!(kinds(&result), vec![(2, IssueKind::MisplacedLengthMark)]);

        let result = validate("a.ːb");
        assert_eq!(kinds(&result), vec![(2, IssueKind::MisplacedLengthMark)]);

        assert!(validate("aːb").is_ok());
    }

    #[test]
    fn tone_letters_follow_vowels() {
        assert!(validate("ma˥").is_ok());
        let result = validate("k˥");
        assert_eq!(kinds(&result), vec![(1, IssueKind::ToneLetterContext)]);

        // A combining mark counts as still attached to the vowel.
        assert!(validate("ã˧").is_ok());

        // Contours are flagged: the second letter follows a tone letter, not a vowel.
        let result = validate("ma˥˩");
        assert_eq!(kinds(&result), vec![(3, IssueKind::ToneLetterContext)]);
    }

    #[test]
    fn issues_are_sorted_by_index() {
        let result = validate("\u{0303}ˈˈ中");
        let indices: Vec<usize> = result.issues.iter().map(|i| i.index).collect();
        let mut sorted = indices.clone();
        sorted.sort();
        assert_eq!(indices, sorted);
        assert_eq!(result.issues[0].kind, IssueKind::IllegalCombiningStart);
    }

    #[test]
    fn cleaned_is_trimmed_decomposition() {
        for input in ["  ã  ", "ˈkæt", "pʰə̃", " 中 ", "ˈˈ"] {
            let result = validate(input);
            assert_eq!(result.cleaned, to_decomposed(input).trim(), "input {input:?}");
        }
    }

    #[test]
    fn ok_matches_issue_list() {
        for input in ["ˈkæt", "ˈˈtest", "", "ʔa", "k˥"] {
            let result = validate(input);
            assert_eq!(result.is_ok(), result.issues.is_empty());
            assert_eq!(result.clone().into_result().is_ok(), result.is_ok());
        }
    }

    #[test]
    fn glottal_stop_passes_whitelist() {
        assert!(validate("ʔa").is_ok());
    }

    #[test]
    fn display_text_is_composed() {
        let result = validate("ã");
        assert_eq!(result.cleaned.char_len(), 2);
        assert_eq!(result.display_text(), "ã");
    }

    #[test]
    fn leading_byte_order_mark_is_trimmed() {
        let result = validate("\u{FEFF}ka");
        assert!(result.is_ok(), "issues: {:?}", result.issues);
        assert_eq!(result.cleaned, "ka");
    }

    #[test]
    fn json_carries_ok_and_messages() {
        let json = serde_json::to_value(validate("ˈˈtest")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ok": false,
                "issues": [
                    {
                        "index": 1,
                        "char": "ˈ",
                        "message": "Consecutive stress marks are not allowed",
                        "kind": "ConsecutiveStressMarks"
                    },
                    {
                        "index": 1,
                        "char": "ˈ",
                        "message": "Consecutive stress marks are not allowed",
                        "kind": "ConsecutiveStressMarks"
                    }
                ],
                "cleaned": "ˈˈtest"
            })
        );

        let json = serde_json::to_value(validate("ˈkæt")).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["issues"], serde_json::json!([]));
    }

    #[test]
    fn json_uses_empty_char_for_whole_string_issues() {
        let json = serde_json::to_string(&validate("")).unwrap();
        assert_eq!(
            json,
            r#"{"ok":false,"issues":[{"index":0,"char":"","message":"Empty input","kind":"EmptyInput"}],"cleaned":""}"#
        );
    }
}
