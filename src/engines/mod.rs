//! Audio backends.
//!
//! This module contains implementations of [`SynthesisEngine`](crate::SynthesisEngine).
//!
//! # Available Engines
//!
//! - `silence` - stub backend returning fixed-duration silent PCM audio

pub mod silence;
