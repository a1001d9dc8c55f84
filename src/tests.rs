use pretty_assertions::assert_eq;

use crate::errors::ErrorKind;
use crate::predicate::Predicate;
use crate::program::{ClassChar, ClassRef, Token, TokenKind};
use crate::{Builder, Regex, MAX_REPS};

fn lit(c: u8) -> Token {
    Token::new(TokenKind::Literal(c))
}

fn pred(p: Predicate) -> Token {
    Token::new(TokenKind::Predicate(p))
}

fn meta(p: Predicate) -> Token {
    Token::new(TokenKind::Metachar(p))
}

fn class(start: usize, len: usize) -> Token {
    Token::new(TokenKind::Class(ClassRef { start, len }))
}

fn invclass(start: usize, len: usize) -> Token {
    Token::new(TokenKind::InvClass(ClassRef { start, len }))
}

fn rep(mut tok: Token, min: u16, max: u16) -> Token {
    tok.min = min;
    tok.max = max;
    tok
}

fn lazy(mut tok: Token) -> Token {
    tok.greedy = false;
    tok
}

fn atomic(mut tok: Token) -> Token {
    tok.atomic = true;
    tok
}

fn range(first: u8, last: u8) -> ClassChar {
    ClassChar::Range { first, last }
}

macro_rules! compiles(($pattern:expr => $prog:expr, $classes:expr) => {
    let re = Regex::new($pattern).unwrap();
    assert_eq!(re.prog, $prog, "program for {:?}", $pattern.escape_ascii().to_string());
    assert_eq!(re.classes, $classes, "classes for {:?}", $pattern.escape_ascii().to_string());
});

macro_rules! fails(($pattern:expr => $kind:expr) => {
    let err = Regex::new($pattern).unwrap_err();
    assert_eq!(err.kind, $kind, "error for {:?}", $pattern.escape_ascii().to_string());
});

#[test]
fn literals_and_escapes() {
    compiles!(b"ab" => vec![lit(b'a'), lit(b'b')], vec![]);
    compiles!(br"a\.b" => vec![lit(b'a'), lit(b'.'), lit(b'b')], vec![]);
    compiles!(br"\\" => vec![lit(b'\\')], vec![]);
    // An escaped predicate letter compiles to the predicate, anything else
    // to the literal byte.
    compiles!(br"\d\Dx" => vec![pred(Predicate::Digit), pred(Predicate::NotDigit), lit(b'x')], vec![]);
    compiles!(br"\q" => vec![lit(b'q')], vec![]);
}

#[test]
fn metachars() {
    compiles!(b"^a.$" => vec![
        meta(Predicate::Start),
        lit(b'a'),
        meta(Predicate::Any),
        meta(Predicate::End),
    ], vec![]);
    // Off anchor position they still compile as metachars; matching decides
    // whether they can succeed.
    compiles!(b"a^" => vec![lit(b'a'), meta(Predicate::Start)], vec![]);
}

#[test]
fn quantifiers() {
    compiles!(b"a?b*c+" => vec![
        rep(lit(b'a'), 0, 1),
        rep(lit(b'b'), 0, MAX_REPS),
        rep(lit(b'c'), 1, MAX_REPS),
    ], vec![]);
    compiles!(b"a{3}b{2,}c{2,5}" => vec![
        rep(lit(b'a'), 3, 3),
        rep(lit(b'b'), 2, MAX_REPS),
        rep(lit(b'c'), 2, 5),
    ], vec![]);
    compiles!(b"a{0}" => vec![rep(lit(b'a'), 0, 0)], vec![]);
}

#[test]
fn lazy_and_atomic_markers() {
    compiles!(b"a+?" => vec![lazy(rep(lit(b'a'), 1, MAX_REPS))], vec![]);
    compiles!(b"a++" => vec![atomic(rep(lit(b'a'), 1, MAX_REPS))], vec![]);
    compiles!(b"a*?+" => vec![atomic(lazy(rep(lit(b'a'), 0, MAX_REPS)))], vec![]);
    compiles!(b"a{2,3}?" => vec![lazy(rep(lit(b'a'), 2, 3))], vec![]);
}

#[test]
fn malformed_braces_are_literals() {
    // A brace expression that is not a quantifier consumes nothing; the
    // brace itself becomes a literal on the next iteration.
    compiles!(b"a{2,x}" => vec![
        lit(b'a'),
        lit(b'{'),
        lit(b'2'),
        lit(b','),
        lit(b'x'),
        lit(b'}'),
    ], vec![]);
    compiles!(b"a{" => vec![lit(b'a'), lit(b'{')], vec![]);
    compiles!(b"a{,3}" => vec![
        lit(b'a'),
        lit(b'{'),
        lit(b','),
        lit(b'3'),
        lit(b'}'),
    ], vec![]);
}

#[test]
fn classes() {
    compiles!(br"[a-c\dx]" => vec![class(0, 3)], vec![
        range(b'a', b'c'),
        ClassChar::Predicate(Predicate::Digit),
        range(b'x', b'x'),
    ]);
    compiles!(b"[^ab]" => vec![invclass(0, 2)], vec![range(b'a', b'a'), range(b'b', b'b')]);
    // Dash before the closing bracket is a literal member.
    compiles!(b"[a-]" => vec![class(0, 2)], vec![range(b'a', b'a'), range(b'-', b'-')]);
    // Empty classes are permitted; they match nothing (inverted: any byte).
    compiles!(b"[]" => vec![class(0, 0)], vec![]);
    compiles!(b"[^]" => vec![invclass(0, 0)], vec![]);
    // A reversed range is not an error, it just matches nothing.
    compiles!(b"[z-a]" => vec![class(0, 1)], vec![range(b'z', b'a')]);
}

#[test]
fn class_range_with_escaped_endpoint() {
    // The escape consumes exactly `-`, `\`, and the endpoint.
    compiles!(br"[a-\]x]" => vec![class(0, 2)], vec![range(b'a', b']'), range(b'x', b'x')]);
    compiles!(br"[\--z]" => vec![class(0, 1)], vec![range(b'-', b'z')]);
}

#[test]
fn consecutive_classes_share_the_buffer() {
    compiles!(b"[ab][cd]" => vec![class(0, 2), class(2, 2)], vec![
        range(b'a', b'a'),
        range(b'b', b'b'),
        range(b'c', b'c'),
        range(b'd', b'd'),
    ]);
}

#[test]
fn pattern_errors() {
    fails!(br"\" => ErrorKind::TrailingEscape);
    fails!(b"[a" => ErrorKind::UnterminatedClass);
    fails!(br"[\" => ErrorKind::UnterminatedClass);
    fails!(b"[a-" => ErrorKind::UnterminatedClass);
    fails!(br"[a-\" => ErrorKind::UnterminatedClass);
    fails!(br"[\d-x]" => ErrorKind::PredicateRange);
    fails!(br"[a-\d]" => ErrorKind::PredicateRange);
    // The dash disqualifies a predicate even where it would be literal.
    fails!(br"[\d-]" => ErrorKind::PredicateRange);
    fails!(b"a{3,2}" => ErrorKind::ReversedRepetition);
    fails!(b"a{2000}" => ErrorKind::RepetitionTooLarge);
    fails!(b"a{0,99999999999}" => ErrorKind::RepetitionTooLarge);
}

#[test]
fn limits() {
    let err = Builder::new().max_tokens(2).build(b"abc").unwrap_err();
    assert_eq!(err.kind, ErrorKind::TooManyTokens);
    assert!(err.is_overflow());

    let err = Builder::new().max_class_chars(1).build(b"[abc]").unwrap_err();
    assert_eq!(err.kind, ErrorKind::ClassTooLarge);
    assert!(err.is_overflow());

    let long = vec![b'x'; Builder::DEFAULT_MAX_TOKENS + 1];
    assert_eq!(Regex::new(&long).unwrap_err().kind, ErrorKind::TooManyTokens);

    // A limit of 0 lifts the cap.
    let re = Builder::new().max_tokens(0).build(&long).unwrap();
    assert_eq!(re.prog.len(), long.len());

    let err = Regex::new(br"\").unwrap_err();
    assert!(!err.is_overflow());
}

#[test]
fn empty_pattern() {
    compiles!(b"" => vec![], vec![]);
    let re = Regex::new(b"").unwrap();
    assert_eq!(re.match_at(b"anything", 0), Some(0));
    let m = re.find(b"anything").unwrap();
    assert_eq!((m.start(), m.len()), (0, 0));
}

#[test]
fn prefix_byte() {
    assert_eq!(Regex::new(b"ab").unwrap().prefix, Some(b'a'));
    assert_eq!(Regex::new(b"a+b").unwrap().prefix, Some(b'a'));
    assert_eq!(Regex::new(b"a*b").unwrap().prefix, None);
    assert_eq!(Regex::new(b"^ab").unwrap().prefix, None);
    assert_eq!(Regex::new(br"\db").unwrap().prefix, None);
    assert_eq!(Regex::new(b"").unwrap().prefix, None);
}

#[test]
fn error_offsets() {
    // Offsets point just past the consumed bytes.
    assert_eq!(Regex::new(br"\").unwrap_err().offset, 1);
    assert_eq!(Regex::new(b"ab[cd").unwrap_err().offset, 5);
    assert_eq!(Regex::new(br"[\d-x]").unwrap_err().offset, 4);
}
