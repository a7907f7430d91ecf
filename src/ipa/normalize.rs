use std::fmt;
use std::ops::Deref;

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

/// Unicode composition form a [`NormalizedString`] is guaranteed to be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalForm {
    /// Canonical decomposition (NFD). Used for validation and segmentation.
    Decomposed,
    /// Canonical composition (NFC). Used for display only.
    Composed,
}

/// A string in a known normalization form. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedString {
    text: String,
    form: NormalForm,
}

impl NormalizedString {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn form(&self) -> NormalForm {
        self.form
    }

    /// Number of code points. Issue and segment indices count in these units.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Trim surrounding whitespace and byte-order marks. Trimming never
    /// breaks either form.
    pub(crate) fn trimmed(self) -> Self {
        let trimmed = self.text.trim_matches(is_trimmable);
        if trimmed.len() == self.text.len() {
            return self;
        }
        Self {
            text: trimmed.to_string(),
            form: self.form,
        }
    }
}

impl Deref for NormalizedString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

impl Serialize for NormalizedString {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl AsRef<str> for NormalizedString {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for NormalizedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq<str> for NormalizedString {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for NormalizedString {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

/// Whitespace, plus U+FEFF which pasted text often carries at its start.
fn is_trimmable(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{FEFF}'
}

/// Decompose to NFD so that every diacritic becomes its own code point.
///
/// Total: any input, including the empty string, produces a value.
pub fn to_decomposed(input: &str) -> NormalizedString {
    NormalizedString {
        text: input.nfd().collect(),
        form: NormalForm::Decomposed,
    }
}

/// Compose to NFC for display.
pub fn to_composed(input: &str) -> NormalizedString {
    NormalizedString {
        text: input.nfc().collect(),
        form: NormalForm::Composed,
    }
}
