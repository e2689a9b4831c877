use std::fmt;

use crate::error::{ModelError, Result};

/// Observation record for one character within one window's distribution.
///
/// `count` is accumulated during training; `p` and `cp` stay `0.0` until
/// the owning [`Distribution`] is finalized.
#[derive(Clone, Debug)]
pub struct CharStat {
	/// The observed character.
	pub chr: char,
	/// How many times `chr` followed the owning window in the corpus.
	pub count: u64,
	/// Probability of `chr` within the owning window (`count / total`).
	pub p: f64,
	/// Cumulative probability up to and including this entry.
	pub cp: f64,
}

impl CharStat {
	fn new(chr: char) -> Self {
		Self { chr, count: 1, p: 0.0, cp: 0.0 }
	}
}

impl fmt::Display for CharStat {
	/// Renders `('c' count p cp)` with four decimal places.
	///
	/// The character is Debug-escaped so newlines and tabs from the
	/// corpus stay on one dump line.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "({:?} {} {:.4} {:.4})", self.chr, self.count, self.p, self.cp)
	}
}

/// Ordered character distribution for a single window.
///
/// A `Distribution` stores every character observed to follow one fixed
/// window, in *first-observed order*. That order is a contract, not an
/// accident: sampling scans the list front to back, so reordering entries
/// would change which character wins when a draw lands on a boundary.
///
/// ## Responsibilities
/// - Accumulate observation counts during training
/// - Convert counts to probabilities and cumulative probabilities once
///   training is complete
/// - Select a character for a uniform random draw in `[0, 1)`
///
/// ## Invariants (after finalization)
/// - Every entry has `count >= 1`
/// - `cp` is non-decreasing in list order
/// - The last entry's `cp` is exactly `1.0`, absorbing floating-point
///   rounding so a scan for `cp >= r` always terminates
#[derive(Clone, Debug)]
pub struct Distribution {
	stats: Vec<CharStat>,
}

impl Distribution {
	/// Creates an empty distribution.
	pub(crate) fn new() -> Self {
		Self { stats: Vec::new() }
	}

	/// Records one observation of `chr` following the owning window.
	///
	/// - If `chr` was seen before, its count is incremented in place.
	/// - Otherwise a new entry with count 1 is appended, preserving
	///   first-observed order.
	pub(crate) fn record(&mut self, chr: char) {
		match self.stats.iter_mut().find(|stat| stat.chr == chr) {
			Some(stat) => stat.count += 1,
			None => self.stats.push(CharStat::new(chr)),
		}
	}

	/// Computes `p` and `cp` for every entry from the accumulated counts.
	///
	/// After the pass the last entry's `cp` is forced to exactly `1.0`
	/// regardless of accumulated floating error.
	///
	/// # Errors
	/// Returns [`ModelError::EmptyDistribution`] if the distribution has no
	/// entries or no observation mass. Training never produces either, but
	/// the guard keeps a division by zero out of reach.
	pub(crate) fn finalize(&mut self) -> Result<()> {
		if self.stats.is_empty() {
			return Err(ModelError::EmptyDistribution);
		}

		let total: u64 = self.stats.iter().map(|stat| stat.count).sum();
		if total == 0 {
			// Should not happen, every entry starts at count 1
			return Err(ModelError::EmptyDistribution);
		}

		let mut cumulative = 0.0;
		for stat in &mut self.stats {
			stat.p = stat.count as f64 / total as f64;
			cumulative += stat.p;
			stat.cp = cumulative;
		}

		// The final entry absorbs accumulated rounding
		if let Some(last) = self.stats.last_mut() {
			last.cp = 1.0;
		}

		Ok(())
	}

	/// Selects the character for a uniform random draw `r` in `[0, 1)`.
	///
	/// Scans the entries in stored order and returns the first one whose
	/// `cp >= r`. If none qualifies the last entry is returned; with the
	/// final `cp` forced to `1.0` that branch only covers out-of-range
	/// draws. A linear scan is intentional: window distributions are small,
	/// and the "first entry at a tie" semantics must hold.
	///
	/// Returns `None` only for an empty distribution, which a trained
	/// index never contains.
	pub fn pick(&self, r: f64) -> Option<char> {
		for stat in &self.stats {
			if stat.cp >= r {
				return Some(stat.chr);
			}
		}
		// Fallback: should not happen, but kept for safety
		self.stats.last().map(|stat| stat.chr)
	}

	/// Returns the entries in first-observed order.
	pub fn stats(&self) -> &[CharStat] {
		&self.stats
	}

	/// Number of distinct characters observed for the owning window.
	pub fn len(&self) -> usize {
		self.stats.len()
	}

	/// Returns `true` if no character was ever recorded.
	pub fn is_empty(&self) -> bool {
		self.stats.is_empty()
	}
}

impl fmt::Display for Distribution {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for stat in &self.stats {
			write!(f, "{stat}")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn finalized(chars: &str) -> Distribution {
		let mut dist = Distribution::new();
		for chr in chars.chars() {
			dist.record(chr);
		}
		dist.finalize().unwrap();
		dist
	}

	#[test]
	fn test_record_keeps_first_observed_order() {
		let mut dist = Distribution::new();
		for chr in "baab".chars() {
			dist.record(chr);
		}

		let stats = dist.stats();
		assert_eq!(stats.len(), 2);
		assert_eq!(stats[0].chr, 'b');
		assert_eq!(stats[0].count, 2);
		assert_eq!(stats[1].chr, 'a');
		assert_eq!(stats[1].count, 2);
	}

	#[test]
	fn test_finalize_computes_p_and_cp_in_order() {
		let dist = finalized("aab");

		let stats = dist.stats();
		assert!((stats[0].p - 2.0 / 3.0).abs() < 1e-12);
		assert!((stats[1].p - 1.0 / 3.0).abs() < 1e-12);
		assert!((stats[0].cp - 2.0 / 3.0).abs() < 1e-12);
		// Forced exactly, not approximately
		assert_eq!(stats[1].cp, 1.0);
	}

	#[test]
	fn test_finalize_single_entry() {
		let dist = finalized("z");

		assert_eq!(dist.len(), 1);
		assert_eq!(dist.stats()[0].p, 1.0);
		assert_eq!(dist.stats()[0].cp, 1.0);
	}

	#[test]
	fn test_finalize_empty_is_an_error() {
		let mut dist = Distribution::new();
		assert!(matches!(dist.finalize(), Err(ModelError::EmptyDistribution)));
	}

	#[test]
	fn test_pick_scans_in_stored_order() {
		let dist = finalized("aab");

		// cp('a') = 2/3, cp('b') = 1.0
		assert_eq!(dist.pick(0.0), Some('a'));
		assert_eq!(dist.pick(0.1), Some('a'));
		assert_eq!(dist.pick(0.7), Some('b'));
		assert_eq!(dist.pick(0.999_999), Some('b'));
	}

	#[test]
	fn test_pick_boundary_draw_takes_first_qualifying_entry() {
		let dist = finalized("aab");

		// r landing exactly on cp('a') still selects 'a'
		assert_eq!(dist.pick(2.0 / 3.0), Some('a'));
	}

	#[test]
	fn test_pick_falls_back_to_last_entry() {
		// Unfinalized entries all have cp == 0.0, so no entry qualifies
		// for a positive draw and the fallback path must answer.
		let mut dist = Distribution::new();
		dist.record('a');
		dist.record('b');

		assert_eq!(dist.pick(0.5), Some('b'));
	}

	#[test]
	fn test_pick_on_empty_distribution() {
		let dist = Distribution::new();
		assert_eq!(dist.pick(0.5), None);
	}

	#[test]
	fn test_display_format() {
		let dist = finalized("aab");
		assert_eq!(format!("{dist}"), "('a' 2 0.6667 0.6667)('b' 1 0.3333 1.0000)");
	}

	#[test]
	fn test_display_escapes_control_characters() {
		let dist = finalized("\n");
		assert_eq!(format!("{dist}"), "('\\n' 1 1.0000 1.0000)");
	}
}
