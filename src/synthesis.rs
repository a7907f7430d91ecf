//! Orchestration: validate, segment, check coverage, then call the backend.

use serde::Serialize;

use crate::engines::silence::SilenceEngine;
use crate::ipa::{segment, validate, PhoneInventory};
use crate::{EngineError, SynthesisEngine};

/// Successful synthesis: encoded WAV audio plus advisory notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Synthesized {
    /// RIFF/WAVE bytes.
    #[serde(skip)]
    pub audio: Vec<u8>,
    /// Coverage gaps, `None` when every symbol is supported.
    pub notes: Option<Vec<String>>,
}

/// Why synthesis did not produce audio.
///
/// Validation failures mean "fix your input"; backend failures mean the
/// input was fine and the request may be retried.
#[derive(thiserror::Error, Debug)]
pub enum SynthesisError {
    #[error("Validation failed")]
    Validation { issues: Vec<String> },
    #[error("Audio backend failed: {0}")]
    Backend(#[source] EngineError),
}

impl SynthesisError {
    /// Formatted validation issues, `None` for backend failures.
    pub fn issues(&self) -> Option<&[String]> {
        match self {
            Self::Validation { issues } => Some(issues),
            Self::Backend(_) => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Runs the IPA pipeline in front of a [`SynthesisEngine`].
///
/// The inventory is read-only; the synthesizer keeps no per-request state.
pub struct Synthesizer<E: SynthesisEngine> {
    engine: E,
    inventory: PhoneInventory,
}

impl<E: SynthesisEngine> Synthesizer<E> {
    /// Use `engine` with the built-in phone inventory.
    pub fn new(engine: E) -> Self {
        Self::with_inventory(engine, PhoneInventory::builtin().clone())
    }

    pub fn with_inventory(engine: E, inventory: PhoneInventory) -> Self {
        Self { engine, inventory }
    }

    pub fn inventory(&self) -> &PhoneInventory {
        &self.inventory
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Synthesize with the engine's default parameters.
    pub fn synthesize(&mut self, input: &str) -> Result<Synthesized, SynthesisError> {
        self.synthesize_with_params(input, None)
    }

    /// Validate `input` and, if it is well formed, hand the cleaned text to
    /// the engine. Coverage gaps become notes and never block synthesis.
    pub fn synthesize_with_params(
        &mut self,
        input: &str,
        params: Option<E::SynthesisParams>,
    ) -> Result<Synthesized, SynthesisError> {
        let validation = validate(input);
        if !validation.is_ok() {
            log::debug!("Rejected input with {} issue(s)", validation.issues.len());
            return Err(SynthesisError::Validation {
                issues: validation.formatted_issues(),
            });
        }

        let cleaned = validation.cleaned;
        let segments = segment(&cleaned);
        let report = self.inventory.check(&segments);
        let notes = if report.is_empty() {
            None
        } else {
            Some(report.notes())
        };

        let clip = self
            .engine
            .synthesize(&cleaned, params)
            .map_err(|e| {
                log::warn!("Audio backend failed: {e}");
                SynthesisError::Backend(e)
            })?;
        let audio = clip
            .to_wav_bytes()
            .map_err(|e| SynthesisError::Backend(Box::new(e)))?;

        log::info!(
            "Synthesized {} segment(s) into {} bytes of audio ({} note(s))",
            segments.len(),
            audio.len(),
            notes.as_ref().map_or(0, Vec::len)
        );
        Ok(Synthesized { audio, notes })
    }
}

/// Run the full pipeline with the silence engine and the built-in inventory.
pub fn synthesize_ipa(input: &str) -> Result<Synthesized, SynthesisError> {
    Synthesizer::new(SilenceEngine::new()).synthesize(input)
}
