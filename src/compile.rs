use log::debug;

use crate::cursor::Scanner;
use crate::errors::{Error, ErrorKind};
use crate::predicate;
use crate::program::{ClassChar, ClassRef, Regex, Token, TokenKind};
use crate::MAX_REPS;

/// Compiles a pattern into a token program.
///
/// Each iteration of [`compile`](Compiler::compile) emits one token through
/// four steps: atom, quantifier, laziness marker, atomic marker. The
/// program and class buffers grow one slot at a time against the
/// configured limits, so overflow is reported at the first slot that would
/// exceed them.
#[derive(Debug)]
pub(crate) struct Compiler<'p> {
    source: Scanner<'p>,
    prog: Vec<Token>,
    classes: Vec<ClassChar>,
    max_tokens: usize,
    max_class_chars: usize,
}

impl<'p> Compiler<'p> {
    /// A limit of 0 disables that limit.
    pub(crate) fn new(pattern: &'p [u8], max_tokens: usize, max_class_chars: usize) -> Self {
        Compiler {
            source: Scanner::new(pattern),
            prog: Vec::new(),
            classes: Vec::new(),
            max_tokens,
            max_class_chars,
        }
    }

    pub(crate) fn compile(mut self) -> Result<Regex, Error> {
        while self.source.peek() != b'\0' {
            let kind = self.atom()?;
            let mut tok = Token::new(kind);
            self.quantifier(&mut tok)?;
            self.lazy(&mut tok);
            self.atomic(&mut tok);
            self.push(tok)?;
        }
        let prefix = match self.prog.first() {
            Some(tok) if tok.min >= 1 => match tok.kind {
                TokenKind::Literal(c) => Some(c),
                _ => None,
            },
            _ => None,
        };
        debug!(
            "compiled pattern: {} tokens, {} class chars",
            self.prog.len(),
            self.classes.len()
        );
        Ok(Regex {
            prog: self.prog,
            classes: self.classes,
            prefix,
        })
    }

    fn atom(&mut self) -> Result<TokenKind, Error> {
        let c = self.source.bump();
        match c {
            b'\\' => {
                let e = self.source.bump();
                if e == b'\0' {
                    return Err(self.err(ErrorKind::TrailingEscape));
                }
                Ok(match predicate::escape(e) {
                    Some(p) => TokenKind::Predicate(p),
                    None => TokenKind::Literal(e),
                })
            }
            b'[' => self.class(),
            c => Ok(match predicate::metachar(c) {
                Some(p) => TokenKind::Metachar(p),
                None => TokenKind::Literal(c),
            }),
        }
    }

    /// Compiles the body of a class after its `[`. An immediate `]` closes
    /// an empty class, which matches nothing (inverted: any non-NUL byte).
    fn class(&mut self) -> Result<TokenKind, Error> {
        let negated = self.source.peek() == b'^';
        if negated {
            self.source.bump();
        }
        let start = self.classes.len();
        loop {
            match self.source.peek() {
                b'\0' => return Err(self.err(ErrorKind::UnterminatedClass)),
                b']' => {
                    self.source.bump();
                    break;
                }
                _ => {
                    let cc = self.class_char()?;
                    let cc = self.range(cc)?;
                    self.push_class_char(cc)?;
                }
            }
        }
        let r = ClassRef {
            start,
            len: self.classes.len() - start,
        };
        Ok(if negated {
            TokenKind::InvClass(r)
        } else {
            TokenKind::Class(r)
        })
    }

    fn class_char(&mut self) -> Result<ClassChar, Error> {
        let c = self.source.bump();
        if c == b'\\' {
            let e = self.source.bump();
            if e == b'\0' {
                return Err(self.err(ErrorKind::UnterminatedClass));
            }
            return Ok(match predicate::escape(e) {
                Some(p) => ClassChar::Predicate(p),
                None => ClassChar::Range { first: e, last: e },
            });
        }
        Ok(ClassChar::Range { first: c, last: c })
    }

    /// Resolves a trailing `-` after a class char. The dash before `]` is a
    /// literal and is left for the next member; a predicate on either side
    /// of the dash cannot bound a range.
    fn range(&mut self, cc: ClassChar) -> Result<ClassChar, Error> {
        if self.source.peek() != b'-' {
            return Ok(cc);
        }
        let first = match cc {
            ClassChar::Predicate(_) => {
                self.source.bump();
                return Err(self.err(ErrorKind::PredicateRange));
            }
            ClassChar::Range { first, .. } => first,
        };
        match self.source.peek_ahead(1) {
            b']' => Ok(cc),
            b'\0' => {
                self.source.bump();
                Err(self.err(ErrorKind::UnterminatedClass))
            }
            b'\\' => {
                self.source.bump();
                self.source.bump();
                let e = self.source.bump();
                if e == b'\0' {
                    return Err(self.err(ErrorKind::UnterminatedClass));
                }
                if predicate::escape(e).is_some() {
                    return Err(self.err(ErrorKind::PredicateRange));
                }
                Ok(ClassChar::Range { first, last: e })
            }
            last => {
                self.source.bump();
                self.source.bump();
                Ok(ClassChar::Range { first, last })
            }
        }
    }

    fn quantifier(&mut self, tok: &mut Token) -> Result<(), Error> {
        match self.source.peek() {
            b'?' => {
                self.source.bump();
                tok.min = 0;
                tok.max = 1;
            }
            b'*' => {
                self.source.bump();
                tok.min = 0;
                tok.max = MAX_REPS;
            }
            b'+' => {
                self.source.bump();
                tok.max = MAX_REPS;
            }
            b'{' => return self.counted(tok),
            _ => {}
        }
        Ok(())
    }

    /// Parses `{m}`, `{m,}`, or `{m,n}`. Anything else in braces consumes
    /// nothing, leaving the `{` to compile as a literal atom.
    fn counted(&mut self, tok: &mut Token) -> Result<(), Error> {
        let saved = self.source.offset();
        self.source.bump();
        let Some(min) = self.count() else {
            self.source.set_offset(saved);
            return Ok(());
        };
        let max = match self.source.peek() {
            b'}' => {
                self.source.bump();
                min
            }
            b',' => {
                self.source.bump();
                if self.source.peek() == b'}' {
                    self.source.bump();
                    u32::from(MAX_REPS)
                } else {
                    match self.count() {
                        Some(n) if self.source.peek() == b'}' => {
                            self.source.bump();
                            n
                        }
                        _ => {
                            self.source.set_offset(saved);
                            return Ok(());
                        }
                    }
                }
            }
            _ => {
                self.source.set_offset(saved);
                return Ok(());
            }
        };
        if min > u32::from(MAX_REPS) || max > u32::from(MAX_REPS) {
            return Err(self.err(ErrorKind::RepetitionTooLarge));
        }
        if min > max {
            return Err(self.err(ErrorKind::ReversedRepetition));
        }
        tok.min = min as u16;
        tok.max = max as u16;
        Ok(())
    }

    fn count(&mut self) -> Option<u32> {
        let mut n: u32 = 0;
        let mut any = false;
        while self.source.peek().is_ascii_digit() {
            n = n
                .saturating_mul(10)
                .saturating_add(u32::from(self.source.bump() - b'0'));
            any = true;
        }
        any.then_some(n)
    }

    fn lazy(&mut self, tok: &mut Token) {
        if self.source.peek() == b'?' {
            self.source.bump();
            tok.greedy = false;
        }
    }

    fn atomic(&mut self, tok: &mut Token) {
        if self.source.peek() == b'+' {
            self.source.bump();
            tok.atomic = true;
        }
    }

    fn push(&mut self, tok: Token) -> Result<(), Error> {
        if self.max_tokens != 0 && self.prog.len() >= self.max_tokens {
            return Err(self.err(ErrorKind::TooManyTokens));
        }
        self.prog.push(tok);
        Ok(())
    }

    fn push_class_char(&mut self, cc: ClassChar) -> Result<(), Error> {
        if self.max_class_chars != 0 && self.classes.len() >= self.max_class_chars {
            return Err(self.err(ErrorKind::ClassTooLarge));
        }
        self.classes.push(cc);
        Ok(())
    }

    fn err(&self, kind: ErrorKind) -> Error {
        Error {
            kind,
            offset: self.source.offset(),
        }
    }
}
