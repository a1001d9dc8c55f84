//! A minimal backtracking regular-expression engine over bytes.
//!
//! Patterns compile to a flat token program which a backtracking matcher
//! interprets against a byte string. The dialect is small and consistent:
//! literals, `\x` escapes with the usual predicate letters
//! (`\s \S \d \D \w \W \R \b \B`), anchors `^` and `$`, `.`, character
//! classes with ranges, and quantifiers `? * + {m} {m,} {m,n}` with lazy
//! (`?`) and atomic (`+`) markers. No alternation, groups, captures, or
//! lookaround; input is treated as 8-bit code units, not Unicode.
//!
//! ```
//! use minregex::Regex;
//!
//! let re = Regex::new(b"[A-Fa-f0-9]+").unwrap();
//! let m = re.find(b"  deadBEEF!").unwrap();
//! assert_eq!((m.start(), m.len()), (2, 8));
//! assert_eq!(m.as_bytes(), b"deadBEEF");
//! ```
//!
//! Atomic quantifiers commit to what they consumed and never give
//! characters back, so possessive matching is available without atomic
//! group syntax: `a++a` can never match.

mod backtrack;
mod compile;
mod cursor;
mod errors;
mod predicate;
mod program;
mod regex;

pub use crate::{
    errors::{Error, ErrorKind},
    program::Regex,
    regex::{Builder, Match, Matches},
};

/// Upper bound on repetition counts; `*`, `+`, and `{m,}` repeat at most
/// this many times.
pub const MAX_REPS: u16 = 1024;

#[cfg(test)]
mod tests;
