use std::ops::Range;

use log::trace;

use crate::compile::Compiler;
use crate::cursor::Text;
use crate::errors::Error;
use crate::program::Regex;

/// Configures compilation limits.
///
/// The defaults reproduce the fixed-capacity behavior of the original
/// engine: a pattern whose program or class buffer would exceed a limit
/// fails with an overflow error. Setting a limit to 0 disables it, which
/// removes that overflow error entirely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Builder {
    max_tokens: usize,
    max_class_chars: usize,
}

impl Builder {
    /// Default limit on the number of tokens in a program.
    pub const DEFAULT_MAX_TOKENS: usize = 64;
    /// Default limit on the total number of class members in a program.
    pub const DEFAULT_MAX_CLASS_CHARS: usize = 64;

    pub fn new() -> Self {
        Builder {
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            max_class_chars: Self::DEFAULT_MAX_CLASS_CHARS,
        }
    }

    /// Caps the compiled program size; 0 for unlimited.
    pub fn max_tokens(mut self, n: usize) -> Self {
        self.max_tokens = n;
        self
    }

    /// Caps the class buffer size; 0 for unlimited.
    pub fn max_class_chars(mut self, n: usize) -> Self {
        self.max_class_chars = n;
        self
    }

    pub fn build(&self, pattern: &[u8]) -> Result<Regex, Error> {
        let compiled = Compiler::new(pattern, self.max_tokens, self.max_class_chars).compile();
        if let Err(err) = &compiled {
            trace!("pattern rejected: {err}");
        }
        compiled
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Regex {
    /// Compiles a pattern with the default limits.
    ///
    /// The dialect: literal bytes; `\x` escaping any byte, where
    /// `s S d D w W R b B` name predicates; anchors `^` and `$`; `.` for
    /// any non-terminator byte; classes `[...]` and `[^...]` with ranges
    /// `a-z` (a trailing dash is literal, and predicates may be members
    /// but not range endpoints); quantifiers `?`, `*`, `+`, `{m}`,
    /// `{m,}`, `{m,n}`, each optionally followed by `?` (lazy) and `+`
    /// (atomic). There is no alternation, grouping, lookaround, or
    /// backreference. `[]` is an empty class matching nothing.
    ///
    /// Text and pattern are byte strings; the end of the slice (or an
    /// embedded NUL byte) terminates the text.
    pub fn new(pattern: &[u8]) -> Result<Regex, Error> {
        Builder::new().build(pattern)
    }

    /// Returns the first match at or after the start of `text`.
    pub fn find<'t>(&self, text: &'t [u8]) -> Option<Match<'t>> {
        self.find_from(text, 0)
    }

    pub fn is_match(&self, text: &[u8]) -> bool {
        self.find(text).is_some()
    }

    /// Iterates over all non-overlapping matches, left to right. An empty
    /// match still advances the search by one byte, so iteration always
    /// terminates.
    pub fn find_iter<'r, 't>(&'r self, text: &'t [u8]) -> Matches<'r, 't> {
        Matches {
            re: self,
            text,
            at: 0,
        }
    }

    /// Counts all non-overlapping matches.
    pub fn match_all(&self, text: &[u8]) -> usize {
        self.find_iter(text).count()
    }

    fn find_from<'t>(&self, text: &'t [u8], from: usize) -> Option<Match<'t>> {
        let t = Text::new(text);
        let end = t.terminator();
        let mut i = from;
        while i <= end {
            if let Some(c) = self.prefix {
                // Every match starts with this byte; skip ahead to it.
                i += memchr::memchr(c, &text[i..end])?;
            }
            if let Some(len) = self.match_at(text, i) {
                return Some(Match {
                    text,
                    start: i,
                    end: i + len,
                });
            }
            i += 1;
        }
        None
    }
}

/// A single match: the subject text and the byte range that matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match<'t> {
    text: &'t [u8],
    start: usize,
    end: usize,
}

impl<'t> Match<'t> {
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The matched bytes.
    #[inline]
    pub fn as_bytes(&self) -> &'t [u8] {
        &self.text[self.start..self.end]
    }
}

/// Iterator over non-overlapping matches, returned by
/// [`Regex::find_iter`].
#[derive(Debug)]
pub struct Matches<'r, 't> {
    re: &'r Regex,
    text: &'t [u8],
    at: usize,
}

impl<'t> Iterator for Matches<'_, 't> {
    type Item = Match<'t>;

    fn next(&mut self) -> Option<Match<'t>> {
        let m = self.re.find_from(self.text, self.at)?;
        // Guarantee progress past an empty match.
        self.at = m.end().max(m.start() + 1);
        Some(m)
    }
}
