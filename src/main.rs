use std::io::{self, BufRead, BufWriter};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, error, trace};
use tracing_subscriber::EnvFilter;

use wordrank::render::{self, Options};
use wordrank::{parallel, source, Policy, Ranked};

/// Count the words in a text and list them by frequency
#[derive(Parser, Debug)]
#[command(name = "wordrank", version)]
#[command(about = "Count the words in a text and list them by frequency, most frequent first", long_about = None)]
struct Cli {
	/// Text file to read, or `-` for stdin (default: stdin)
	file: Option<PathBuf>,

	/// Show only the N most frequent words
	#[arg(short = 'n', long, value_name = "N")]
	top: Option<usize>,

	/// Hide words seen fewer than N times
	#[arg(short = 'm', long, value_name = "N", default_value_t = 0)]
	min_count: usize,

	/// Split lines with the regex tokenizer instead of the character scanner
	#[arg(long)]
	regex: bool,

	/// Count on N threads (0 = one per CPU); sequential when omitted
	#[arg(short = 'j', long, value_name = "N")]
	jobs: Option<usize>,

	/// Show a progress bar while counting in parallel
	#[arg(long, requires = "jobs")]
	progress: bool,

	/// Enable verbose output (-v for debug, -vv for trace)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

fn main() {
	let cli = Cli::parse();

	let log_level = match cli.verbose {
		0 => "warn",
		1 => "wordrank=debug",
		_ => "trace",
	};

	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
		.with_writer(io::stderr)
		.with_target(cli.verbose >= 2)
		.init();

	trace!(?cli, "parsed arguments");

	if let Err(e) = run(&cli) {
		error!("Fatal error: {e:#}");
		eprintln!("Error: {e:#}");
		std::process::exit(1);
	}
}

fn run(cli: &Cli) -> anyhow::Result<()> {
	let policy = if cli.regex { Policy::Regex } else { Policy::Scan };
	let input = open_input(cli.file.as_ref())?;

	let ranked = match cli.jobs {
		Some(jobs) => rank_parallel(input, policy, jobs, cli.progress)?,
		None => source::rank_reader(input, policy)?,
	};

	debug!(distinct = ranked.len(), "writing results");
	let options = Options { top: cli.top, min_count: cli.min_count };
	let stdout = BufWriter::new(io::stdout().lock());
	render::write_ranked(stdout, &ranked, &options).context("failed to write results")
}

fn open_input(file: Option<&PathBuf>) -> anyhow::Result<Box<dyn BufRead>> {
	match file {
		Some(path) if path.as_os_str() != "-" => Ok(Box::new(source::open(path)?)),
		_ => {
			debug!("reading stdin");
			Ok(Box::new(io::stdin().lock()))
		}
	}
}

fn rank_parallel(input: impl BufRead, policy: Policy, jobs: usize, progress: bool) -> anyhow::Result<Ranked> {
	let lines = source::read_lines(input)?;
	let mut config = parallel::Config { policy, ..Default::default() };

	if jobs > 0 {
		config.thread_count = jobs;
	}

	#[cfg(feature = "progression")]
	{
		config.progress_bar = progress;
	}
	#[cfg(not(feature = "progression"))]
	if progress {
		tracing::warn!("built without the `progression` feature, no progress bar");
	}

	Ok(parallel::rank(&lines, config))
}
