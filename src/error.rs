//! Error types.

use std::error;
use std::fmt;

use cssparser::{BasicParseError, BasicParseErrorKind};
use thiserror::Error;

/// A short-lived error from `cssparser`.
///
/// The lifetime of the error is the same as the `cssparser::ParserInput` that
/// was used to create a `cssparser::Parser`, that is, the lifetime of the string
/// data that is being parsed.  Use [`MatrixError::from_parse_error`] to turn it
/// into a long-lived value.
pub type ParseError<'i> = cssparser::ParseError<'i, ValueErrorKind>;

/// A simple error which refers to a value inside a transform list or an option.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueErrorKind {
    /// The value could not be parsed
    Parse(String),

    // The value could be parsed, but is invalid
    Value(String),
}

impl ValueErrorKind {
    pub fn parse_error(s: &str) -> ValueErrorKind {
        ValueErrorKind::Parse(s.to_string())
    }

    pub fn value_error(s: &str) -> ValueErrorKind {
        ValueErrorKind::Value(s.to_string())
    }
}

impl fmt::Display for ValueErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ValueErrorKind::Parse(ref s) => write!(f, "parse error: {s}"),

            ValueErrorKind::Value(ref s) => write!(f, "invalid value: {s}"),
        }
    }
}

impl<'a> From<BasicParseError<'a>> for ValueErrorKind {
    fn from(e: BasicParseError<'_>) -> ValueErrorKind {
        let BasicParseError { kind, .. } = e;

        let msg = match kind {
            BasicParseErrorKind::UnexpectedToken(_) => "unexpected token",
            BasicParseErrorKind::EndOfInput => "unexpected end of input",
            BasicParseErrorKind::AtRuleInvalid(_) => "invalid @-rule",
            BasicParseErrorKind::AtRuleBodyInvalid => "invalid @-rule body",
            BasicParseErrorKind::QualifiedRuleInvalid => "invalid qualified rule",
        };

        ValueErrorKind::parse_error(msg)
    }
}

/// What went wrong while scanning path data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrammarErrorKind {
    /// A character that is not one of `MmZzLlHhVvCcSsQqTtAa` where a command was expected.
    UnexpectedCommand(char),

    /// Path data must start with a moveto command.
    MissingMoveTo,

    /// A character that cannot start a number where a number was expected.
    NotANumber(char),

    /// A number with a leading zero followed by another digit, like `09`.
    IllegalNumber,

    /// An exponent marker that is not followed by digits, or that follows a bare dot.
    InvalidExponent,

    /// An arc flag that is not `0` or `1`.
    InvalidFlag(char),

    /// The data ended while a command still needed parameters.
    MissingParameter,
}

/// Error from the path data parser, with the character index where it happened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrammarError {
    pub index: usize,
    pub kind: GrammarErrorKind,
}

impl GrammarError {
    pub(crate) fn new(index: usize, kind: GrammarErrorKind) -> GrammarError {
        GrammarError { index, kind }
    }
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use GrammarErrorKind::*;

        write!(f, "invalid path data at index {}: ", self.index)?;

        match self.kind {
            UnexpectedCommand(c) => write!(f, "{c:?} is not a path command"),
            MissingMoveTo => write!(f, "path data must start with a moveto"),
            NotANumber(c) => write!(f, "{c:?} is not a number"),
            IllegalNumber => write!(f, "illegal number"),
            InvalidExponent => write!(f, "invalid float exponent"),
            InvalidFlag(c) => write!(f, "invalid arc flag {c:?}, expecting 0 or 1"),
            MissingParameter => write!(f, "missing parameter"),
        }
    }
}

impl error::Error for GrammarError {}

/// Errors from constructing a [`crate::Matrix`] out of external data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// A coefficient list that has neither 6 nor 16 elements.
    #[error("expected 6 or 16 matrix coefficients, got {0}")]
    InvalidLength(usize),

    /// A coefficient list with an infinity or NaN.
    #[error("matrix coefficient at position {index} is not finite: {value}")]
    NonFinite { index: usize, value: f64 },

    /// A named-coefficient list that lacks one of `m11`..`m44`.
    #[error("missing matrix coefficient {0:?}")]
    MissingCoefficient(String),

    /// A named-coefficient list with a name that is not one of `m11`..`m44`.
    #[error("unknown matrix coefficient {0:?}")]
    UnknownCoefficient(String),

    /// A named coefficient that is an infinity or NaN.
    #[error("matrix coefficient {name} is not finite: {value}")]
    NonFiniteCoefficient { name: String, value: f64 },

    /// A transform-function list that could not be parsed.
    #[error("invalid transform string {input:?}: {message}")]
    Parse { input: String, message: String },
}

impl MatrixError {
    pub(crate) fn from_parse_error(input: &str, e: ParseError<'_>) -> MatrixError {
        let message = match e.kind {
            cssparser::ParseErrorKind::Basic(b) => {
                ValueErrorKind::from(BasicParseError {
                    kind: b,
                    location: e.location,
                })
                .to_string()
            }
            cssparser::ParseErrorKind::Custom(v) => v.to_string(),
        };

        MatrixError::Parse {
            input: input.to_string(),
            message: format!("{message} at column {}", e.location.column),
        }
    }
}

/// Errors returned by the public entry points of this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// The path string could not be parsed.
    #[error("{0}")]
    Grammar(#[from] GrammarError),

    /// The path string was empty or consisted only of whitespace.
    #[error("path data is empty")]
    EmptyPath,

    /// A command sequence that is not well-formed was passed where a path was expected.
    #[error("malformed path array: {0}")]
    InvalidPathArray(String),
}
