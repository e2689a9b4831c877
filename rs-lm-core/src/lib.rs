//! Sliding-window character language model.
//!
//! This crate learns, from a plain character corpus, which characters
//! follow each fixed-length window of text, and generates new text by
//! weighted random sampling over those observations. It provides:
//! - A window index mapping each observed window to its successor
//!   distribution, in first-observed order
//! - One-pass training from any character source
//! - Reproducible generation through a per-model seeded random source
//! - A textual dump of the trained index for debugging
//!
//! The model is single-threaded by design: each instance owns its index
//! and random source exclusively. Callers that share a model across
//! threads wrap whole operations in one exclusive lock, as the server
//! crate does.

/// Core model: window index, training, generation, sampling.
pub mod model;

/// Error types shared across the crate.
pub mod error;

/// Corpus helpers for callers (file loading, directory listing).
///
/// The model itself never touches the filesystem; it consumes any
/// character iterator. These helpers exist for the server and demo
/// crates that do read corpora from disk.
pub mod io;
