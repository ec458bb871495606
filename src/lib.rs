//! Word frequency ranking.
//!
//! Lines go in, words (maximal runs of alphabetic characters, case preserved) are
//! counted, and `(word, count)` pairs come out, most frequent first. Words with the
//! same count keep the order in which they were first seen.
//!
//! ```
//! let ranked = wordrank::rank(["Mango, Mango, Banana, Mango, Banana, Apple"]);
//! assert_eq!(ranked[0], ("Mango".to_string(), 3));
//! ```

pub mod error;
pub mod parallel;
pub mod rank;
pub mod render;
pub mod source;
pub mod tokenize;

pub use error::{Error, Result};
pub use rank::{count_words, rank, rank_with, FrequencyTable, Position, Ranked};
pub use tokenize::{is_letter, tokenize, tokenize_with, Policy, Words};
