//! The match procedure: a two-phase recursive descent over the token
//! program. Fixed-count and atomic tokens are consumed iteratively; the
//! first flexible non-atomic token owns the backtracking for the rest of
//! the program. Recursion depth is therefore bounded by the number of
//! flexible non-atomic tokens, at most the token limit.

use crate::cursor::Text;
use crate::program::{ClassChar, ClassRef, Regex, Token, TokenKind};

impl Regex {
    /// Returns the number of bytes matched starting at `at`, or `None`.
    /// A zero-length match is a success.
    pub fn match_at(&self, text: &[u8], at: usize) -> Option<usize> {
        self.run(0, Text::new(text), at).map(|end| end - at)
    }

    /// Matches tokens `t..` against the text from `i`, returning the end
    /// position of the whole remainder.
    fn run(&self, mut t: usize, text: Text<'_>, mut i: usize) -> Option<usize> {
        loop {
            let Some(&tok) = self.prog.get(t) else {
                return Some(i);
            };
            if tok.min == tok.max || tok.atomic {
                i = self.run_committed(tok, text, i)?;
                t += 1;
            } else if tok.greedy {
                return self.run_greedy(tok, t, text, i);
            } else {
                return self.run_lazy(tok, t, text, i);
            }
        }
    }

    /// Fixed-count and atomic tokens never give back repetitions: consume
    /// up to the target count and commit. Atomic lazy tokens stop at the
    /// minimum, like any lazy token that is denied backtracking.
    fn run_committed(&self, tok: Token, text: Text<'_>, mut i: usize) -> Option<usize> {
        let target = if tok.greedy { tok.max } else { tok.min };
        let mut n = 0;
        while n < target {
            match self.match_one(tok.kind, text, i) {
                // A zero-width atom repeats in place.
                Some(0) => {
                    n = target;
                    break;
                }
                Some(w) => {
                    i += w;
                    n += 1;
                }
                None => break,
            }
        }
        (n >= tok.min).then_some(i)
    }

    /// Longest repetition first, giving back one at a time on remainder
    /// failure.
    fn run_greedy(&self, tok: Token, t: usize, text: Text<'_>, i: usize) -> Option<usize> {
        // ends[n] is the input position after n repetitions.
        let mut ends = vec![i];
        while ends.len() <= tok.max as usize {
            let j = *ends.last().unwrap();
            match self.match_one(tok.kind, text, j) {
                Some(0) => {
                    // Zero-width: every further repetition stays at `j`.
                    while ends.len() <= tok.max as usize {
                        ends.push(j);
                    }
                }
                Some(w) => ends.push(j + w),
                None => break,
            }
        }
        let mut n = ends.len() - 1;
        if n < tok.min as usize {
            return None;
        }
        loop {
            if let Some(end) = self.run(t + 1, text, ends[n]) {
                return Some(end);
            }
            if n == tok.min as usize {
                return None;
            }
            n -= 1;
        }
    }

    /// Shortest repetition first, extending one at a time on remainder
    /// failure.
    fn run_lazy(&self, tok: Token, t: usize, text: Text<'_>, i: usize) -> Option<usize> {
        let mut n = 0;
        let mut j = i;
        while n < tok.min as usize {
            let w = self.match_one(tok.kind, text, j)?;
            if w == 0 {
                break;
            }
            j += w;
            n += 1;
        }
        loop {
            if let Some(end) = self.run(t + 1, text, j) {
                return Some(end);
            }
            if n >= tok.max as usize {
                return None;
            }
            let w = self.match_one(tok.kind, text, j)?;
            if w == 0 {
                // Extending a zero-width atom cannot change the remainder.
                return None;
            }
            j += w;
            n += 1;
        }
    }

    /// Matches a single repetition of an atom, returning the bytes
    /// consumed.
    fn match_one(&self, kind: TokenKind, text: Text<'_>, i: usize) -> Option<usize> {
        match kind {
            TokenKind::Literal(c) => (text.byte(i) == c).then_some(1),
            TokenKind::Predicate(p) | TokenKind::Metachar(p) => p.matches(text, i),
            TokenKind::Class(r) => {
                (!text.at_end(i) && self.class_matches(r, text, i)).then_some(1)
            }
            TokenKind::InvClass(r) => {
                (!text.at_end(i) && !self.class_matches(r, text, i)).then_some(1)
            }
        }
    }

    fn class_matches(&self, r: ClassRef, text: Text<'_>, i: usize) -> bool {
        self.class(r).iter().any(|&cc| match cc {
            ClassChar::Predicate(p) => p.matches(text, i).is_some(),
            ClassChar::Range { first, last } => {
                let c = text.byte(i);
                first <= c && c <= last
            }
        })
    }
}
