use thiserror::Error;

/// The reason a pattern failed to compile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    /// `\` at the end of the pattern escapes nothing.
    #[error("trailing backslash")]
    TrailingEscape,
    /// `[` without a matching `]`.
    #[error("unterminated character class")]
    UnterminatedClass,
    /// A predicate such as `\d` on either side of a range dash.
    #[error("predicate cannot bound a range")]
    PredicateRange,
    /// `{m,n}` with `m > n`.
    #[error("repetition bounds out of order")]
    ReversedRepetition,
    /// A repetition count above [`MAX_REPS`](crate::MAX_REPS).
    #[error("repetition count too large")]
    RepetitionTooLarge,
    /// The program would exceed the token limit.
    #[error("too many tokens")]
    TooManyTokens,
    /// The class buffer would exceed the class-char limit.
    #[error("character class too large")]
    ClassTooLarge,
}

/// An error from compiling a pattern.
///
/// `offset` is the number of pattern bytes consumed when the error was
/// detected, so it points just past the offending construct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
#[error("{kind} at byte {offset}")]
pub struct Error {
    pub kind: ErrorKind,
    pub offset: usize,
}

impl Error {
    /// Whether this is a resource-limit overflow rather than a malformed
    /// pattern. Overflows go away with larger limits (see
    /// [`Builder`](crate::Builder)); malformed patterns do not.
    pub fn is_overflow(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::TooManyTokens | ErrorKind::ClassTooLarge
        )
    }
}
