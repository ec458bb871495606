use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::rank::{rank_with, Ranked};
use crate::tokenize::Policy;

/// Ranks the words of every line in `reader`. Lines are pulled one at a time.
pub fn rank_reader<R: BufRead>(reader: R, policy: Policy) -> Result<Ranked> {
	let mut failure: Option<io::Error> = None;
	let lines = reader.lines().map_while(|line| line.map_err(|e| failure = Some(e)).ok());
	let ranked = rank_with(lines, policy);

	match failure {
		Some(e) => Err(Error::Read(e)),
		None => Ok(ranked),
	}
}

pub fn rank_file<P: AsRef<Path>>(path: P, policy: Policy) -> Result<Ranked> {
	let reader = open(path.as_ref())?;
	rank_reader(reader, policy)
}

/// Reads every line up front, for callers that need random access.
pub fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
	let lines = reader.lines().collect::<io::Result<Vec<_>>>().map_err(Error::Read)?;
	debug!(lines = lines.len(), "read input");
	Ok(lines)
}

pub fn open(path: &Path) -> Result<BufReader<File>> {
	debug!(path = %path.display(), "opening input");
	File::open(path)
		.map(BufReader::new)
		.map_err(|source| Error::Open { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::{Cursor, Write};

	#[test]
	fn it_should_rank_a_reader() {
		let input = Cursor::new("Mango, Mango,\nBanana, Mango,\r\nBanana, Apple\n");
		let ranked = rank_reader(input, Policy::Scan).unwrap();
		assert_eq!(ranked, [("Mango".to_string(), 3), ("Banana".to_string(), 2), ("Apple".to_string(), 1)]);
	}

	#[test]
	fn it_should_rank_a_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "There can be only one!").unwrap();
		writeln!(file, "one").unwrap();

		let ranked = rank_file(file.path(), Policy::Regex).unwrap();
		assert_eq!(ranked[0], ("one".to_string(), 2));
		assert_eq!(ranked.len(), 5);
	}

	#[test]
	fn it_should_report_missing_files() {
		let dir = tempfile::tempdir().unwrap();
		let missing = dir.path().join("nope.txt");

		match rank_file(&missing, Policy::Scan) {
			Err(Error::Open { path, source }) => {
				assert_eq!(path, missing);
				assert_eq!(source.kind(), io::ErrorKind::NotFound);
			}
			other => panic!("expected an open error, got {other:?}"),
		}
	}

	#[test]
	fn it_should_report_invalid_utf8() {
		let input = Cursor::new(b"fine line\n\xff\xfe broken\nnever read\n".to_vec());
		assert!(matches!(rank_reader(input, Policy::Scan), Err(Error::Read(_))));
		assert!(matches!(read_lines(Cursor::new(b"\xc3".to_vec())), Err(Error::Read(_))));
	}

	#[test]
	fn it_should_read_all_lines() {
		let lines = read_lines(Cursor::new("a\n\nb")).unwrap();
		assert_eq!(lines, ["a", "", "b"]);
	}
}
