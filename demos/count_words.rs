use std::io::{stdin, stdout, BufWriter, Read};

use wordrank::render::{write_ranked, Options};

fn main() -> anyhow::Result<()> {
	let mut text = String::new();
	stdin().read_to_string(&mut text)?;
	let lines: Vec<_> = text.lines().collect();

	let ranked = wordrank::parallel::rank(
		&lines,
		wordrank::parallel::Config { chunk_size: 10_000, ..Default::default() },
	);

	write_ranked(BufWriter::new(stdout().lock()), &ranked, &Options { top: Some(50), min_count: 0 })?;
	Ok(())
}
