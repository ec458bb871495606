use std::sync::{mpsc, Mutex, PoisonError};
use std::thread;

use tracing::{debug, trace};

use crate::rank::{FrequencyTable, Position, Ranked};
use crate::tokenize::{tokenize_with, Policy};

pub struct Config<'a> {
	pub thread_count: usize,
	pub chunk_size: usize,
	pub policy: Policy,
	#[cfg(feature = "progression")]
	pub bar_step: usize,
	#[cfg(feature = "progression")]
	pub progress_bar: bool,
	#[cfg(feature = "progression")]
	pub bar_config: progression::Config<'a>,
	#[cfg(not(feature = "progression"))]
	pub _phantom: std::marker::PhantomData<&'a ()>,
}

impl Default for Config<'_> {
	#[inline]
	fn default() -> Self {
		Self {
			thread_count: num_cpus::get(),
			chunk_size: 100,
			policy: Policy::default(),
			#[cfg(feature = "progression")]
			bar_step: 10,
			#[cfg(feature = "progression")]
			progress_bar: true,
			#[cfg(feature = "progression")]
			bar_config: progression::Config::default(),
			#[cfg(not(feature = "progression"))]
			_phantom: std::marker::PhantomData,
		}
	}
}

/// Fans chunks of a slice out to scoped worker threads.
pub struct Chunker<'a> {
	config: Config<'a>,
}

impl<'a> Chunker<'a> {
	#[inline]
	pub fn new(config: Config<'a>) -> Self {
		Self { config }
	}

	#[inline]
	pub fn config(&self) -> &Config<'a> {
		&self.config
	}

	/// Folds every item into a per-thread accumulator built by `init`; `work` also
	/// receives the item's index in `items`. `gather` drains the accumulators.
	pub fn run<T, I, R, W, G>(&mut self, items: &[T], init: fn() -> I, work: W, mut gather: G) -> R
	where
		T: Sync,
		I: Send,
		R: Send,
		W: Fn(&mut I, usize, &T) + Sync,
		G: FnMut(mpsc::Receiver<I>) -> R,
	{
		let thread_count = self.config.thread_count.max(1);
		let chunk_size = self.config.chunk_size.max(1).min(items.len() / thread_count + 1);
		#[cfg(feature = "progression")]
		let bar = self.config.progress_bar.then(|| progression::Bar::new(items.len() as u64, self.config.bar_config.clone()));
		#[cfg(feature = "progression")]
		let bar_step = if self.config.progress_bar { self.config.bar_step.max(1) } else { chunk_size };
		#[cfg(not(feature = "progression"))]
		let bar_step = chunk_size;
		let chunks = Mutex::new(items.chunks(chunk_size).enumerate());

		thread::scope(|scope| {
			let (sender, receiver) = mpsc::channel();

			for id in 0..thread_count {
				let sender = sender.clone();
				let chunks = &chunks;
				let work = &work;
				#[cfg(feature = "progression")]
				let bar = &bar;

				scope.spawn(move || {
					let mut thread_result = init();
					let mut done = 0;

					while let Some((n, chunk)) = next_chunk(chunks) {
						let mut index = n * chunk_size;

						for bar_chunk in chunk.chunks(bar_step) {
							for item in bar_chunk {
								work(&mut thread_result, index, item);
								index += 1;
							}

							done += bar_chunk.len();
							#[cfg(feature = "progression")]
							if let Some(bar) = bar {
								bar.inc(bar_chunk.len() as u64);
							}
						}
					}

					trace!(thread = id, items = done, "worker finished");
					if sender.send(thread_result).is_err() {
						trace!(thread = id, "gather finished early, dropping worker result");
					}
				});
			}

			drop(sender);
			gather(receiver)
		})
	}
}

fn next_chunk<C: Iterator>(chunks: &Mutex<C>) -> Option<C::Item> {
	chunks.lock().unwrap_or_else(PoisonError::into_inner).next()
}

impl Default for Chunker<'_> {
	#[inline]
	fn default() -> Self {
		Chunker::new(Config::default())
	}
}

/// Ranks `lines` on several threads. The result is identical to [`crate::rank_with`]
/// using the same policy, tie-break included.
pub fn rank<S>(lines: &[S], config: Config) -> Ranked
where
	S: AsRef<str> + Sync,
{
	let policy = config.policy;
	let mut chunker = Chunker::new(config);
	let threads = chunker.config().thread_count.max(1);

	let table = chunker.run(
		lines,
		FrequencyTable::new,
		|table, line, text| {
			for (at, word) in tokenize_with([text], policy).enumerate() {
				table.record(word, Position { line, word: at });
			}
		},
		|rx| rx.into_iter().fold(FrequencyTable::new(), |mut total, table| {
			total.merge(table);
			total
		}),
	);

	debug!(lines = lines.len(), threads, words = table.total(), distinct = table.len(), "counted words in parallel");
	table.ranked()
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn quiet(thread_count: usize, chunk_size: usize) -> Config<'static> {
		Config {
			thread_count,
			chunk_size,
			#[cfg(feature = "progression")]
			progress_bar: false,
			..Default::default()
		}
	}

	#[test]
	fn it_should_visit_every_item_once() {
		let items: Vec<u64> = (1..=1000).collect();
		let mut chunker = Chunker::new(quiet(4, 7));

		let (sum, indices) = chunker.run(
			&items,
			|| (0, 0),
			|(sum, indices), index, item| {
				*sum += item;
				*indices += index as u64;
			},
			|rx| rx.iter().fold((0, 0), |(a, b), (c, d)| (a + c, b + d)),
		);

		assert_eq!(sum, 500_500);
		assert_eq!(indices, 499_500);
	}

	#[test]
	fn it_should_pass_matching_indices() {
		let items: Vec<usize> = (0..257).collect();

		let mismatches = Chunker::new(quiet(3, 10)).run(
			&items,
			|| 0usize,
			|bad, index, item| *bad += usize::from(index != *item),
			|rx| rx.iter().sum::<usize>(),
		);

		assert_eq!(mismatches, 0);
	}

	#[test]
	fn it_should_survive_an_early_gather() {
		let items: Vec<u32> = (0..64).collect();

		let first = Chunker::new(quiet(4, 1)).run(
			&items,
			|| 0u32,
			|count, _, _| *count += 1,
			|rx| rx.recv().ok(),
		);

		assert!(first.is_some_and(|count| count <= 64));
	}

	#[test]
	fn it_should_rank_like_the_sequential_path() {
		let lines = ["My name is, my name is, my name is... Skinny Shadowy!", "Shadowy name", "", "is it?"];
		assert_eq!(rank(&lines, quiet(4, 1)), crate::rank(lines));
	}

	#[test]
	fn it_should_handle_empty_input_and_zero_threads() {
		let lines: [&str; 0] = [];
		assert!(rank(&lines, quiet(0, 0)).is_empty());
		assert_eq!(rank(&["a b a"], quiet(0, 0)), [("a".to_string(), 2), ("b".to_string(), 1)]);
	}

	proptest! {
		#[test]
		fn parallel_matches_sequential(
			lines in prop::collection::vec("[a-cA-C ,.0-9]{0,20}", 0..60),
			thread_count in 1usize..6,
			chunk_size in 1usize..8,
		) {
			prop_assert_eq!(rank(&lines, quiet(thread_count, chunk_size)), crate::rank(&lines));
		}
	}
}
