use crate::cursor::Text;

/// A named test over a position in the text. Tokens and class chars hold
/// the tag, never a function pointer, so the program stays trivially
/// copyable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Predicate {
    /// `\s` Whitespace
    Whitespace,
    /// `\S` Non-whitespace
    NotWhitespace,
    /// `\d` ASCII digit
    Digit,
    /// `\D` Non-digit
    NotDigit,
    /// `\w` Word character (alphanumeric or `_`)
    Word,
    /// `\W` Non-word character
    NotWord,
    /// `\R` Line break: CRLF or LF
    Newline,
    /// `\b` Word boundary (zero-width)
    WordBoundary,
    /// `\B` Non-word-boundary (zero-width)
    NotWordBoundary,
    /// `^` Start of input (zero-width)
    Start,
    /// `$` End of input (zero-width)
    End,
    /// `.` Any byte except the terminator
    Any,
}

/// Predicates reachable through `\x` escapes.
const ESCAPES: &[(u8, Predicate)] = &[
    (b's', Predicate::Whitespace),
    (b'S', Predicate::NotWhitespace),
    (b'd', Predicate::Digit),
    (b'D', Predicate::NotDigit),
    (b'w', Predicate::Word),
    (b'W', Predicate::NotWord),
    (b'R', Predicate::Newline),
    (b'b', Predicate::WordBoundary),
    (b'B', Predicate::NotWordBoundary),
];

/// Predicates spelled as bare metacharacters.
const METACHARS: &[(u8, Predicate)] = &[
    (b'^', Predicate::Start),
    (b'$', Predicate::End),
    (b'.', Predicate::Any),
];

/// Looks up the predicate named by the escape letter in `\x`.
pub(crate) fn escape(c: u8) -> Option<Predicate> {
    lookup(ESCAPES, c)
}

/// Looks up the predicate spelled by an unescaped metacharacter.
pub(crate) fn metachar(c: u8) -> Option<Predicate> {
    lookup(METACHARS, c)
}

fn lookup(table: &[(u8, Predicate)], c: u8) -> Option<Predicate> {
    table.iter().find(|&&(name, _)| name == c).map(|&(_, p)| p)
}

impl Predicate {
    /// Tests the text at `at`. Returns the number of bytes consumed: 0 for
    /// the zero-width predicates, 2 for `\R` on CRLF, otherwise 1.
    ///
    /// Consuming predicates require a real byte, so the negated tests never
    /// match the terminator and walk past the end of the text.
    pub(crate) fn matches(self, text: Text<'_>, at: usize) -> Option<usize> {
        let c = text.byte(at);
        let hit = match self {
            Predicate::Whitespace => is_space(c),
            Predicate::NotWhitespace => c != b'\0' && !is_space(c),
            Predicate::Digit => c.is_ascii_digit(),
            Predicate::NotDigit => c != b'\0' && !c.is_ascii_digit(),
            Predicate::Word => is_word(c),
            Predicate::NotWord => c != b'\0' && !is_word(c),
            Predicate::Newline => {
                if c == b'\r' && text.byte(at + 1) == b'\n' {
                    return Some(2);
                }
                c == b'\n'
            }
            Predicate::WordBoundary => return boundary(text, at).then_some(0),
            Predicate::NotWordBoundary => return (!boundary(text, at)).then_some(0),
            Predicate::Start => return (at == 0).then_some(0),
            Predicate::End => return text.at_end(at).then_some(0),
            Predicate::Any => c != b'\0',
        };
        hit.then_some(1)
    }

    /// The pattern spelling, for reconstructing a compiled program.
    pub(crate) fn spelling(self) -> &'static [u8] {
        match self {
            Predicate::Whitespace => b"\\s",
            Predicate::NotWhitespace => b"\\S",
            Predicate::Digit => b"\\d",
            Predicate::NotDigit => b"\\D",
            Predicate::Word => b"\\w",
            Predicate::NotWord => b"\\W",
            Predicate::Newline => b"\\R",
            Predicate::WordBoundary => b"\\b",
            Predicate::NotWordBoundary => b"\\B",
            Predicate::Start => b"^",
            Predicate::End => b"$",
            Predicate::Any => b".",
        }
    }
}

/// Word-ness differs across `at`. The terminator counts as non-word, so at
/// the start of text this reduces to "the first byte is a word character"
/// and symmetrically at the end.
fn boundary(text: Text<'_>, at: usize) -> bool {
    let before = at > 0 && is_word(text.byte(at - 1));
    before != is_word(text.byte(at))
}

/// C `isspace`: space, tab, newline, vertical tab, form feed, carriage
/// return.
fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn is_word(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}
