use derive_builder::Builder;

use crate::{AudioClip, EngineError, SynthesisEngine};

/// Default clip length in seconds.
pub const DEFAULT_DURATION_SECS: f64 = 0.2;

/// Default output sample rate.
pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;

#[derive(thiserror::Error, Debug)]
pub enum SilenceError {
    #[error("Invalid silence parameters: {0}")]
    InvalidParams(String),
}

/// Parameters for a silence synthesis request.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct SilenceParams {
    /// Clip length in seconds. Must be finite and positive.
    #[builder(default = "DEFAULT_DURATION_SECS")]
    pub duration_secs: f64,
    /// Output sample rate in Hz. Must be non-zero.
    #[builder(default = "DEFAULT_SAMPLE_RATE")]
    pub sample_rate: u32,
}

impl Default for SilenceParams {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl SilenceParams {
    fn check(duration_secs: f64, sample_rate: u32) -> Result<(), String> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(format!("duration must be positive, got {duration_secs}"));
        }
        if sample_rate == 0 {
            return Err("sample rate must be non-zero".to_string());
        }
        Ok(())
    }

    /// Number of samples in the clip; never less than one.
    pub fn sample_count(&self) -> usize {
        ((self.duration_secs * self.sample_rate as f64).floor() as usize).max(1)
    }
}

impl SilenceParamsBuilder {
    fn validate(&self) -> Result<(), String> {
        SilenceParams::check(
            self.duration_secs.unwrap_or(DEFAULT_DURATION_SECS),
            self.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE),
        )
    }
}

/// Stub engine producing zero-valued 16-bit mono PCM.
///
/// # Quick Start
///
/// ```rust
/// use ipa_phonotype::{SynthesisEngine, engines::silence::SilenceEngine};
///
/// let mut engine = SilenceEngine::new();
/// let clip = engine.synthesize("ˈkæt", None)?;
/// assert_eq!(clip.sample_rate, 16_000);
/// assert_eq!(clip.samples.len(), 3_200);
/// # Ok::<(), Box<dyn std::error::Error + Send + Sync>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SilenceEngine {
    defaults: SilenceParams,
}

impl SilenceEngine {
    /// Create an engine using 0.2 s at 16 kHz for requests without parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with different defaults for requests without parameters.
    pub fn with_defaults(defaults: SilenceParams) -> Self {
        Self { defaults }
    }
}

impl SynthesisEngine for SilenceEngine {
    type SynthesisParams = SilenceParams;

    fn synthesize(
        &mut self,
        text: &str,
        params: Option<Self::SynthesisParams>,
    ) -> Result<AudioClip, EngineError> {
        let p = params.unwrap_or_else(|| self.defaults.clone());
        SilenceParams::check(p.duration_secs, p.sample_rate).map_err(SilenceError::InvalidParams)?;

        let samples = vec![0i16; p.sample_count()];
        log::debug!(
            "Rendering {} silent samples at {}Hz for {} code point(s)",
            samples.len(),
            p.sample_rate,
            text.chars().count()
        );

        Ok(AudioClip {
            samples,
            sample_rate: p.sample_rate,
        })
    }
}
