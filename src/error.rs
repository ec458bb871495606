use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
	#[error("failed to open {}", path.display())]
	Open {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("failed to read input")]
	Read(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
