//! # ipa-phonotype
//!
//! A Rust library that checks International Phonetic Alphabet transcriptions
//! before handing them to a speech backend.
//!
//! ## Pipeline
//!
//! 1. **Normalization**: input is decomposed (NFD) so every diacritic is a
//!    separate code point.
//! 2. **Validation**: every code point is checked against a whitelist of
//!    IPA-related Unicode blocks, then positional rules (stress, length, tone,
//!    detached diacritics) are applied. All issues are collected.
//! 3. **Segmentation**: the text is grouped into base + combining-diacritic units.
//! 4. **Capability check**: segments are compared against the supported phone
//!    inventory. Gaps are reported as advisory notes, never as failures.
//! 5. **Synthesis**: the cleaned text is passed to a [`SynthesisEngine`].
//!
//! ## Quick Start
//!
//! ```rust
//! use ipa_phonotype::synthesize_ipa;
//!
//! let out = synthesize_ipa("kæt")?;
//! assert!(out.notes.is_none());
//! assert_eq!(&out.audio[0..4], b"RIFF");
//!
//! // Valid IPA the backend cannot render yet still synthesizes, with notes.
//! let out = synthesize_ipa("ʔa")?;
//! assert_eq!(out.notes.unwrap(), ["Unsupported base \"ʔ\" at segment 0"]);
//! # Ok::<(), ipa_phonotype::SynthesisError>(())
//! ```
//!
//! Validation can also be used on its own:
//!
//! ```rust
//! use ipa_phonotype::ipa::validate;
//!
//! let result = validate("ˈˈtest");
//! assert!(!result.is_ok());
//! for issue in &result.issues {
//!     println!("{issue}");
//! }
//! ```
//!
//! All issue and segment indices are code-point offsets into the *decomposed*
//! form of the input, which may be longer than what the user typed.

pub mod engines;
pub mod ipa;
pub mod synthesis;

pub use synthesis::{synthesize_ipa, Synthesized, SynthesisError, Synthesizer};

use std::io::Cursor;
use std::path::Path;

/// Error type returned by synthesis engines.
pub type EngineError = Box<dyn std::error::Error + Send + Sync>;

/// Audio produced by a synthesis engine.
///
/// Contains 16-bit mono PCM samples and the sample rate of the output audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// Raw audio samples as signed 16-bit values
    pub samples: Vec<i16>,
    /// Sample rate of the audio (16000 for the silence engine)
    pub sample_rate: u32,
}

impl AudioClip {
    fn wav_spec(&self) -> hound::WavSpec {
        hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        }
    }

    /// Encode the clip as an in-memory RIFF/WAVE file (44-byte header, PCM data).
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, hound::Error> {
        let mut cursor = Cursor::new(Vec::with_capacity(44 + self.samples.len() * 2));
        {
            let mut writer = hound::WavWriter::new(&mut cursor, self.wav_spec())?;
            for &sample in &self.samples {
                writer.write_sample(sample)?;
            }
            writer.finalize()?;
        }
        Ok(cursor.into_inner())
    }

    /// Write the audio to a 16-bit PCM WAV file.
    pub fn write_wav(&self, path: &Path) -> Result<(), hound::Error> {
        let mut writer = hound::WavWriter::create(path, self.wav_spec())?;
        for &sample in &self.samples {
            writer.write_sample(sample)?;
        }
        writer.finalize()?;
        Ok(())
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Common interface for audio backends.
///
/// The orchestrator only ever hands an engine text that has already passed
/// validation. How an engine blocks, times out or retries is its own concern.
pub trait SynthesisEngine {
    /// Parameters for configuring inference behavior (duration, voice, etc.)
    type SynthesisParams;

    /// Synthesize audio for validated IPA text.
    fn synthesize(
        &mut self,
        text: &str,
        params: Option<Self::SynthesisParams>,
    ) -> Result<AudioClip, EngineError>;

    /// Synthesize audio for the given text and write it to a WAV file.
    ///
    /// Default implementation calls `synthesize()` then `AudioClip::write_wav()`.
    fn synthesize_to_file(
        &mut self,
        text: &str,
        wav_path: &Path,
        params: Option<Self::SynthesisParams>,
    ) -> Result<(), EngineError> {
        self.synthesize(text, params)?.write_wav(wav_path)?;
        Ok(())
    }
}
