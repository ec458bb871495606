use std::cmp::Reverse;

use indexmap::IndexMap;
use tracing::debug;

use crate::tokenize::{tokenize_with, Policy};

/// Words paired with their counts, most frequent first.
pub type Ranked = Vec<(String, usize)>;

/// Where a word was first seen: line index, then word index within that line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
	pub line: usize,
	pub word: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Tally {
	count: usize,
	first: Position,
}

/// Word counts, iterated in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
	entries: IndexMap<String, Tally>,
	total: usize,
}

impl FrequencyTable {
	#[inline]
	pub fn new() -> Self {
		Self::default()
	}

	/// Counts `word` as the next word of a single flat stream.
	#[inline]
	pub fn add(&mut self, word: String) {
		let at = Position { line: 0, word: self.total };
		self.record(word, at);
	}

	/// Counts `word`, seen at `at`. The earliest position wins.
	pub fn record(&mut self, word: String, at: Position) {
		self.entries
			.entry(word)
			.and_modify(|tally| {
				tally.count += 1;
				tally.first = tally.first.min(at);
			})
			.or_insert(Tally { count: 1, first: at });
		self.total += 1;
	}

	/// Adds `other`'s counts to this table, keeping the earliest first-seen position.
	///
	/// Words new to this table are appended, so [`iter`](Self::iter) follows merge
	/// order afterwards. [`ranked`](Self::ranked) still breaks ties by first sighting.
	pub fn merge(&mut self, other: FrequencyTable) {
		for (word, theirs) in other.entries {
			self.entries
				.entry(word)
				.and_modify(|ours| {
					ours.count += theirs.count;
					ours.first = ours.first.min(theirs.first);
				})
				.or_insert(theirs);
		}

		self.total += other.total;
	}

	#[inline]
	pub fn get(&self, word: &str) -> Option<usize> {
		self.entries.get(word).map(|tally| tally.count)
	}

	#[inline]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Number of words counted, duplicates included.
	#[inline]
	pub fn total(&self) -> usize {
		self.total
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
		self.entries.iter().map(|(word, tally)| (word.as_str(), tally.count))
	}

	/// Sorts by count, descending. Equal counts keep first-seen order.
	pub fn ranked(self) -> Ranked {
		let mut entries = Vec::from_iter(self.entries);
		entries.sort_by_key(|(_, tally)| (Reverse(tally.count), tally.first));
		entries.into_iter().map(|(word, tally)| (word, tally.count)).collect()
	}
}

impl<S: Into<String>> FromIterator<S> for FrequencyTable {
	fn from_iter<T: IntoIterator<Item = S>>(words: T) -> Self {
		let mut table = Self::new();

		for word in words {
			table.add(word.into());
		}

		table
	}
}

#[inline]
pub fn count_words<I>(words: I) -> FrequencyTable
where
	I: IntoIterator,
	I::Item: Into<String>,
{
	words.into_iter().collect()
}

/// Tokenizes `lines`, counts the words and ranks them, most frequent first.
///
/// Words with equal counts appear in the order they were first seen.
#[inline]
pub fn rank<I>(lines: I) -> Ranked
where
	I: IntoIterator,
	I::Item: AsRef<str>,
{
	rank_with(lines, Policy::default())
}

pub fn rank_with<I>(lines: I, policy: Policy) -> Ranked
where
	I: IntoIterator,
	I::Item: AsRef<str>,
{
	let table = count_words(tokenize_with(lines, policy));
	debug!(words = table.total(), distinct = table.len(), ?policy, "counted words");
	table.ranked()
}
