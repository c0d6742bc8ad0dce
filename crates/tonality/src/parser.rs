//! Token grammars for note names, chord roots, and roman numerals.
//!
//! Every accepted spelling is enumerated here. The ASCII and Unicode
//! accidental glyph sets are part of the public contract, so additions
//! belong in this file and nowhere else.

use winnow::combinator::{alt, opt};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use crate::note::Note;
use crate::pitch::Letter;

type PResult<T> = winnow::ModalResult<T>;

/// Run `parser` over the whole of `text`; `None` on failure or leftover input.
pub fn parse_all<'s, O>(
    mut parser: impl Parser<&'s str, O, ErrMode<ContextError>>,
    text: &'s str,
) -> Option<O> {
    let mut input = text;
    let value = parser.parse_next(&mut input).ok()?;
    input.is_empty().then_some(value)
}

/// A note letter, either case.
pub fn letter(input: &mut &str) -> PResult<Letter> {
    one_of(('A'..='G', 'a'..='g'))
        .try_map(Letter::from_char)
        .parse_next(input)
}

/// A note accidental. Absent, `♮`, and the empty string all mean 0.
pub fn accidental(input: &mut &str) -> PResult<i8> {
    opt(alt((
        "bb".value(-2),
        "𝄫".value(-2),
        "b".value(-1),
        "♭".value(-1),
        "##".value(2),
        "x".value(2),
        "𝄪".value(2),
        "#".value(1),
        "♯".value(1),
        "♮".value(0),
    )))
    .map(|a| a.unwrap_or(0))
    .parse_next(input)
}

/// A letter followed by an optional accidental, e.g. `C#`, `Bb`, `F𝄪`.
pub fn note_name(input: &mut &str) -> PResult<Note> {
    let letter = letter.parse_next(input)?;
    let accidental = accidental.parse_next(input)?;
    Ok(Note::new(letter, accidental))
}

/// The accidental allowed in front of a roman numeral.
pub fn roman_accidental(input: &mut &str) -> PResult<i8> {
    opt(alt((
        "#".value(1),
        "♯".value(1),
        "b".value(-1),
        "♭".value(-1),
    )))
    .map(|a| a.unwrap_or(0))
    .parse_next(input)
}

/// One to three of `I V i v`.
pub fn roman_letters<'s>(input: &mut &'s str) -> PResult<&'s str> {
    take_while(1..=3, ['I', 'V', 'i', 'v']).parse_next(input)
}

/// `+6` with an optional `It`, `Fr`, or `Ger` prefix.
pub fn augmented_sixth(input: &mut &str) -> PResult<()> {
    (opt(alt(("It", "Fr", "Ger"))), "+6")
        .void()
        .parse_next(input)
}
