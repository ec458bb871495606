use std::io::{self, Write};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Options {
	pub top: Option<usize>,
	pub min_count: usize,
}

/// Writes one `<word>: <count>` line per pair, in the given order.
pub fn write_ranked<W: Write>(mut writer: W, ranked: &[(String, usize)], options: &Options) -> io::Result<()> {
	let shown = ranked
		.iter()
		.filter(|(_, count)| *count >= options.min_count)
		.take(options.top.unwrap_or(usize::MAX));

	for (word, count) in shown {
		writeln!(writer, "{word}: {count}")?;
	}

	writer.flush()
}
