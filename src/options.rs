//! Options for the [`crate::PathCommander`] and for serialization.

use std::str::FromStr;

use cssparser::{BasicParseError, ParseErrorKind, Parser};

use crate::enum_default;
use crate::error::*;
use crate::measure::PathWalk;
use crate::parse_identifiers;
use crate::parsers::Parse;
use crate::path_builder::Segment;
use crate::svgpath_log;
use crate::validate::is_path_array;

/// How many decimals to keep when serializing numbers.
///
/// Parses from a non-negative integer, `off` or `auto`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Round {
    /// Round to this many decimals.
    Decimals(u32),

    /// Leave numbers as they are.
    Off,

    /// Pick the number of decimals from the size of the path; see [`auto_round_decimals`].
    Auto,
}

const DEFAULT_DECIMALS: u32 = 4;

enum_default!(Round, Round::Decimals(DEFAULT_DECIMALS));

impl Round {
    /// Number of decimals to round the parameters of `path` to, or `None` for no rounding.
    pub fn decimals_for(&self, path: &[Segment]) -> Option<u32> {
        match *self {
            Round::Decimals(n) => Some(n),
            Round::Off => None,
            Round::Auto => {
                if !is_path_array(path) {
                    return Some(DEFAULT_DECIMALS);
                }

                let size = PathWalk::new(path).bbox().max_dimension();
                let decimals = auto_round_decimals(size);

                svgpath_log!("auto rounding: path size {} gives {} decimals", size, decimals);

                Some(decimals)
            }
        }
    }
}

impl Parse for Round {
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<Round, ParseError<'i>> {
        if let Ok(n) = parser.try_parse(|p| u32::parse(p)) {
            return Ok(Round::Decimals(n));
        }

        Ok(parse_identifiers!(
            parser,
            "off" => Round::Off,
            "auto" => Round::Auto,
        )?)
    }
}

impl FromStr for Round {
    type Err = ValueErrorKind;

    fn from_str(s: &str) -> Result<Round, ValueErrorKind> {
        Round::parse_str(s).map_err(|e| match e.kind {
            ParseErrorKind::Basic(kind) => ValueErrorKind::from(BasicParseError {
                kind,
                location: e.location,
            }),
            ParseErrorKind::Custom(v) => v,
        })
    }
}

/// Number of decimals that [`Round::Auto`] uses for a path whose bounding box
/// has `max_dimension` as its larger side.
///
/// Paths get fewer decimals the larger they are: 4 minus the number of digits
/// in the integer part of the size, and never fewer than 0.
pub fn auto_round_decimals(max_dimension: f64) -> u32 {
    let integer = max_dimension.abs().floor();

    let digits = if integer.is_finite() {
        format!("{}", integer as u64).len() as u32
    } else {
        u32::MAX
    };

    DEFAULT_DECIMALS.saturating_sub(digits)
}

/// Options for a [`crate::PathCommander`].
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Options {
    /// Rounding used when the path is serialized.
    pub round: Round,

    /// Origin for transformations; the center of the bounding box of the
    /// path if unset.  A zero `z` is replaced with the depth estimate of the
    /// bounding box.
    pub origin: Option<[f64; 3]>,
}

impl Options {
    pub fn with_round(self, round: Round) -> Options {
        Options { round, ..self }
    }

    pub fn with_origin(self, origin: [f64; 3]) -> Options {
        Options {
            origin: Some(origin),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_builder::PathBuilder;

    #[test]
    fn parses_round() {
        assert_eq!(Round::parse_str("3").unwrap(), Round::Decimals(3));
        assert_eq!(Round::parse_str("0").unwrap(), Round::Decimals(0));
        assert_eq!(Round::parse_str("off").unwrap(), Round::Off);
        assert_eq!(Round::parse_str("AUTO").unwrap(), Round::Auto);

        assert!(Round::parse_str("-1").is_err());
        assert!(Round::parse_str("1.5").is_err());
        assert!(Round::parse_str("sometimes").is_err());
    }

    #[test]
    fn round_from_str() {
        assert_eq!("2".parse::<Round>(), Ok(Round::Decimals(2)));
        assert_eq!("off".parse::<Round>(), Ok(Round::Off));
        assert!("".parse::<Round>().is_err());
    }

    #[test]
    fn default_round_is_four_decimals() {
        assert_eq!(Round::default(), Round::Decimals(4));
        assert_eq!(Options::default().round, Round::Decimals(4));
        assert_eq!(Options::default().origin, None);
    }

    #[test]
    fn auto_decimals_shrink_with_size() {
        assert_eq!(auto_round_decimals(0.5), 3);
        assert_eq!(auto_round_decimals(9.99), 3);
        assert_eq!(auto_round_decimals(10.0), 2);
        assert_eq!(auto_round_decimals(250.0), 1);
        assert_eq!(auto_round_decimals(1000.0), 0);
        assert_eq!(auto_round_decimals(123456.0), 0);
    }

    #[test]
    fn decimals_for_path() {
        let mut builder = PathBuilder::default();
        builder.parse("M0 0L150 20").unwrap();
        let path = builder.into_path();

        assert_eq!(Round::Decimals(2).decimals_for(&path), Some(2));
        assert_eq!(Round::Off.decimals_for(&path), None);
        assert_eq!(Round::Auto.decimals_for(&path), Some(1));
    }

    #[test]
    fn builds_options() {
        let options = Options::default()
            .with_round(Round::Off)
            .with_origin([1.0, 2.0, 0.0]);

        assert_eq!(options.round, Round::Off);
        assert_eq!(options.origin, Some([1.0, 2.0, 0.0]));
    }
}
