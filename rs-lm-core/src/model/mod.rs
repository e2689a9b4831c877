//! Top-level module for the sliding-window model.
//!
//! This module contains the full model pipeline:
//! - Per-window character distributions (`Distribution`, `CharStat`)
//! - The window index, trainer and generator (`LanguageModel`)

/// Sliding-window character language model.
///
/// Exposes construction (seeded or entropy-seeded), one-pass training
/// from a character corpus, text generation, read accessors over the
/// trained index, and a textual dump for debugging.
pub mod language_model;

/// Ordered per-window character distribution.
///
/// Accumulates observation counts in first-observed order, converts them
/// to cumulative probabilities at the end of training, and resolves a
/// uniform random draw to a character.
pub mod distribution;
