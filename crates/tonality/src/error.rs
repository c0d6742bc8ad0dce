use thiserror::Error;

/// Errors raised when text cannot be read as a note, degree, or key.
///
/// "No match" outcomes (an unknown chord suffix, a chord that fits no key)
/// are ordinary values elsewhere in the crate and never show up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    #[error("invalid letter '{0}', expected A-G")]
    InvalidLetter(char),

    #[error("unrecognized accidental '{0}'")]
    InvalidAccidental(String),

    #[error("invalid note name '{0}'")]
    InvalidNote(String),

    #[error("unknown degree '{0}', expected I-VII")]
    UnknownDegree(String),

    #[error("could not parse degree '{0}'")]
    UnparseableDegree(String),

    #[error("accidental {0} is out of range")]
    AccidentalOutOfRange(i32),

    #[error("roman numeral '{0}' nests too deeply")]
    RomanTooDeep(String),

    #[error("cannot alter the tonic of a key")]
    AlterTonic,

    #[error("invalid key '{0}'")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, TheoryError>;
