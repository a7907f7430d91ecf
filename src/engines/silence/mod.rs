//! Stub audio backend that renders every request as silence.
//!
//! The engine accepts validated IPA text and returns a short clip of
//! zero-valued 16-bit mono PCM samples. It lets callers exercise the full
//! pipeline, including WAV encoding and playback, without a real voice.
//!
//! # Examples
//!
//! ```rust
//! use ipa_phonotype::{SynthesisEngine, engines::silence::{SilenceEngine, SilenceParamsBuilder}};
//!
//! let mut engine = SilenceEngine::new();
//! let params = SilenceParamsBuilder::default()
//!     .duration_secs(0.5)
//!     .sample_rate(8_000)
//!     .build()?;
//!
//! let clip = engine.synthesize("ˈkæt", Some(params))?;
//! assert_eq!(clip.samples.len(), 4_000);
//! # Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
//! ```

pub mod engine;

pub use engine::{
    SilenceEngine, SilenceError, SilenceParams, SilenceParamsBuilder, DEFAULT_DURATION_SECS,
    DEFAULT_SAMPLE_RATE,
};
