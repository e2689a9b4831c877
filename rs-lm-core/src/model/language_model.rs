use std::collections::HashMap;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::distribution::Distribution;
use crate::error::{ModelError, Result};

/// Sliding-window character language model.
///
/// The model maps every window (fixed-length character sequence) observed
/// in a corpus to the distribution of characters seen to follow it, and
/// generates new text by repeatedly sampling from the distribution of the
/// current window.
///
/// # Responsibilities
/// - Build the window index from a character corpus
/// - Accumulate per-window observation counts during training
/// - Convert counts to cumulative distributions once training completes
/// - Extend an initial text by weighted random sampling
///
/// # Invariants
/// - Every key in `index` is exactly `window_length` characters long
/// - Every stored distribution is non-empty after training
/// - Windows are matched by exact, case-sensitive string equality; no
///   normalization happens anywhere in the model
/// - All draws come from the model's own random source, so two models
///   never share a stream and one model's stream continues across calls
#[derive(Clone, Debug)]
pub struct LanguageModel {
	/// The window length used by this model.
	window_length: usize,

	/// Mapping from a window to the distribution of its successors.
	index: HashMap<String, Distribution>,

	/// The random number generator used by this model.
	rng: StdRng,
}

impl LanguageModel {
	/// Creates a model with the given window length, seeded from OS
	/// entropy. Generating texts from this model multiple times produces
	/// different random texts. Good for production.
	pub fn new(window_length: usize) -> Self {
		Self {
			window_length,
			index: HashMap::new(),
			rng: StdRng::from_os_rng(),
		}
	}

	/// Creates a model with the given window length and seed. Two models
	/// built with the same seed and trained on the same corpus generate
	/// identical texts for identical calls. Good for debugging and tests.
	pub fn with_seed(window_length: usize, seed: u64) -> Self {
		Self {
			window_length,
			index: HashMap::new(),
			rng: StdRng::seed_from_u64(seed),
		}
	}

	/// Returns the window length used by this model.
	pub fn window_length(&self) -> usize {
		self.window_length
	}

	/// Number of distinct windows in the trained index.
	pub fn len(&self) -> usize {
		self.index.len()
	}

	/// Returns `true` if the index holds no windows, either because the
	/// model is untrained or because the corpus was exactly one window
	/// long (no character follows the only window).
	pub fn is_empty(&self) -> bool {
		self.index.is_empty()
	}

	/// Returns the successor distribution for a window, if that exact
	/// window was observed during training.
	pub fn get(&self, window: &str) -> Option<&Distribution> {
		self.index.get(window)
	}

	/// Iterates over all `(window, distribution)` pairs, in no particular
	/// window order.
	pub fn contexts(&self) -> impl Iterator<Item = (&str, &Distribution)> {
		self.index
			.iter()
			.map(|(window, distribution)| (window.as_str(), distribution))
	}

	/// Builds the model from a corpus of characters.
	///
	/// The first `window_length` characters form the initial window. Every
	/// following character is recorded under the current window, which
	/// then slides one character forward (drop the first, append the new
	/// one). Once the corpus is consumed, every window's distribution is
	/// finalized into probabilities and cumulative probabilities.
	///
	/// # Errors
	/// Returns [`ModelError::InsufficientCorpus`] if the corpus ends
	/// before a single window can be formed. A corpus of exactly
	/// `window_length` characters trains successfully into an empty index:
	/// no character follows the only window.
	///
	/// # Notes
	/// - The corpus source only has to yield characters; opening and
	///   closing whatever backs it is the caller's concern.
	/// - Intended to be called once per model. A second call accumulates
	///   further counts and re-finalizes, it does not reset the index.
	pub fn train<I>(&mut self, corpus: I) -> Result<()>
	where
		I: IntoIterator<Item = char>,
	{
		let mut corpus = corpus.into_iter();

		// Form the initial window
		let mut window = String::new();
		for read in 0..self.window_length {
			match corpus.next() {
				Some(chr) => window.push(chr),
				None => {
					return Err(ModelError::InsufficientCorpus {
						needed: self.window_length,
						got: read,
					});
				}
			}
		}

		// Count every window -> successor observation
		for chr in corpus {
			self.index
				.entry(window.clone())
				.or_insert_with(Distribution::new)
				.record(chr);
			window = Self::slide(&window, chr, self.window_length);
		}

		// One finalization pass over every window
		for distribution in self.index.values_mut() {
			distribution.finalize()?;
		}

		Ok(())
	}

	/// Generates text from the trained model.
	///
	/// Starts from `initial_text` and repeatedly samples a successor for
	/// the current window (the last `window_length` characters of the text
	/// so far), appending it and sliding the window, until the text minus
	/// the trailing window reaches `target_length` characters.
	///
	/// Two situations return early, by design rather than as errors:
	/// - `window_length > initial_text` (no window can be formed) or
	///   `initial_text` already at `target_length`: the initial text comes
	///   back unchanged and the random source is not consulted.
	/// - The current window was never observed in the corpus: the text
	///   accumulated so far comes back, possibly shorter than requested.
	///   Running out of model is a normal termination, never a failure.
	pub fn generate(&mut self, initial_text: &str, target_length: usize) -> String {
		let initial_length = initial_text.chars().count();
		if self.window_length > initial_length || initial_length >= target_length {
			return initial_text.to_owned();
		}

		let mut text = initial_text.to_owned();
		let mut length = initial_length;
		let mut window = Self::last_chars(initial_text, self.window_length);

		while length - self.window_length < target_length {
			let distribution = match self.index.get(&window) {
				Some(distribution) => distribution,
				// No successor was ever observed for this window
				None => return text,
			};

			// The draw happens only after the window is known to be
			// indexed; early exits never consume from the stream
			let r: f64 = self.rng.random();
			match distribution.pick(r) {
				Some(chr) => {
					text.push(chr);
					length += 1;
					window = Self::slide(&window, chr, self.window_length);
				}
				// Unreachable for a trained index, finish gracefully
				None => return text,
			}
		}

		text
	}

	/// Returns the last `n` characters of a string.
	///
	/// If `n` is greater than the number of characters in `s`, the entire
	/// string is returned. Handles multibyte characters correctly.
	fn last_chars(s: &str, n: usize) -> String {
		if n > s.chars().count() {
			return s.to_owned();
		}
		s.chars()
			.rev()
			.take(n)
			.collect::<Vec<_>>()
			.into_iter()
			.rev()
			.collect()
	}

	/// Advances a window by one character: append `chr`, keep the last
	/// `length` characters. Total for every window length, including 0.
	fn slide(window: &str, chr: char, length: usize) -> String {
		let mut advanced = window.to_owned();
		advanced.push(chr);
		Self::last_chars(&advanced, length)
	}
}

impl fmt::Display for LanguageModel {
	/// Textual dump of the trained index: one `"window" : entries` line
	/// per window. Windows are sorted so dumps are reproducible; the entry
	/// order inside each line is the load-bearing first-observed order.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut windows: Vec<&String> = self.index.keys().collect();
		windows.sort();
		for window in windows {
			writeln!(f, "{:?} : {}", window, self.index[window])?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_last_chars() {
		assert_eq!(LanguageModel::last_chars("window", 3), "dow");
		assert_eq!(LanguageModel::last_chars("ab", 5), "ab");
		assert_eq!(LanguageModel::last_chars("ab", 0), "");
		assert_eq!(LanguageModel::last_chars("héllo", 4), "éllo");
	}

	#[test]
	fn test_slide_drops_first_and_appends() {
		assert_eq!(LanguageModel::slide("abc", 'd', 3), "bcd");
		assert_eq!(LanguageModel::slide("é", 'x', 1), "x");
	}

	#[test]
	fn test_slide_zero_length_window() {
		// An order-0 model keys everything on the empty window
		assert_eq!(LanguageModel::slide("", 'x', 0), "");
	}
}
