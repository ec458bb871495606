use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\P{L}+").unwrap());
static LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{L}$").unwrap());

/// Letters only (general category `L`): combining marks, letter numbers like `Ⅻ` and
/// symbols like `Ⓐ` are separators.
pub fn is_letter(c: char) -> bool {
	if c.is_ascii() {
		return c.is_ascii_alphabetic();
	}

	let mut buf = [0; 4];
	LETTER.is_match(c.encode_utf8(&mut buf))
}

/// How a line is cut into words. Both policies yield the same words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Policy {
	/// Walk the line char by char, collecting runs of letters.
	#[default]
	Scan,
	/// Split the line on runs of non-letters.
	Regex,
}

/// Lazy word iterator over a sequence of lines, see [`tokenize`].
pub struct Words<I: Iterator> {
	lines: I,
	line: Option<I::Item>,
	pos: usize,
	policy: Policy,
}

/// Splits `lines` into words: maximal runs of letters, case preserved.
///
/// Every other character is a separator and is dropped, so `"don't"` yields
/// `"don"` and `"t"`. Words never span lines.
#[inline]
pub fn tokenize<I>(lines: I) -> Words<I::IntoIter>
where
	I: IntoIterator,
	I::Item: AsRef<str>,
{
	tokenize_with(lines, Policy::default())
}

pub fn tokenize_with<I>(lines: I, policy: Policy) -> Words<I::IntoIter>
where
	I: IntoIterator,
	I::Item: AsRef<str>,
{
	Words {
		lines: lines.into_iter(),
		line: None,
		pos: 0,
		policy,
	}
}

fn scan(line: &str, pos: &mut usize) -> Option<String> {
	let rest = &line[*pos..];
	let Some(start) = rest.find(is_letter) else {
		*pos = line.len();
		return None;
	};
	let end = rest[start..].find(|c: char| !is_letter(c)).map_or(rest.len(), |i| start + i);
	*pos += end;
	Some(rest[start..end].to_owned())
}

fn split(line: &str, pos: &mut usize) -> Option<String> {
	while *pos < line.len() {
		let start = *pos;
		let end = match SEPARATOR.find_at(line, start) {
			Some(sep) => {
				*pos = sep.end();
				sep.start()
			}
			None => {
				*pos = line.len();
				line.len()
			}
		};

		if end > start {
			return Some(line[start..end].to_owned());
		}
	}

	None
}

impl<I> Iterator for Words<I>
where
	I: Iterator,
	I::Item: AsRef<str>,
{
	type Item = String;

	fn next(&mut self) -> Option<String> {
		loop {
			if let Some(line) = &self.line {
				let line = line.as_ref();
				let word = match self.policy {
					Policy::Scan => scan(line, &mut self.pos),
					Policy::Regex => split(line, &mut self.pos),
				};

				if word.is_some() {
					return word;
				}
			}

			self.line = Some(self.lines.next()?);
			self.pos = 0;
		}
	}
}
