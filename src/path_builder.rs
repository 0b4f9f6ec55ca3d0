//! Representation of path data as a sequence of commands.
//!
//! A [`Segment`] is one command letter with its parameters, exactly as it would be
//! written in path data: `M10,20` is `Segment { command: 'M', params: [10, 20] }`.
//! A [`PathArray`] is the ordered sequence of segments of a whole path.
//!
//! The same representation carries absolute, relative, normalized and
//! curve-only paths; the predicates in [`crate::validate`] tell them apart.

use std::fmt;
use std::ops::{Deref, DerefMut};

use itertools::Itertools;
use tinyvec::TinyVec;

use crate::error::GrammarError;
use crate::options::Round;
use crate::path_parser::PathParser;
use crate::util::{format_number, round_to};

/// Returns how many parameters the command `letter` takes, in either case.
pub fn param_count(letter: char) -> Option<usize> {
    match letter.to_ascii_lowercase() {
        'a' => Some(7),
        'c' => Some(6),
        'h' => Some(1),
        'l' => Some(2),
        'm' => Some(2),
        'q' => Some(4),
        's' => Some(4),
        't' => Some(2),
        'v' => Some(1),
        'z' => Some(0),
        _ => None,
    }
}

/// One path command and its parameters.
///
/// Fields are public so that command sequences coming from elsewhere can be
/// checked with the validators before use.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Segment {
    pub command: char,
    pub params: TinyVec<[f64; 7]>,
}

impl Segment {
    pub fn new(command: char, params: &[f64]) -> Segment {
        Segment {
            command,
            params: params.iter().copied().collect(),
        }
    }

    /// The command letter in upper case.
    pub fn letter(&self) -> char {
        self.command.to_ascii_uppercase()
    }

    pub fn is_relative(&self) -> bool {
        self.command.is_ascii_lowercase()
    }

    pub fn is_move(&self) -> bool {
        self.letter() == 'M'
    }

    /// The last coordinate pair of the segment, if it has at least two parameters.
    ///
    /// For absolute segments other than `H`, `V` and `Z` this is the end point.
    pub fn last_pair(&self) -> Option<(f64, f64)> {
        let n = self.params.len();

        if n >= 2 {
            Some((self.params[n - 2], self.params[n - 1]))
        } else {
            None
        }
    }

    /// Returns a copy with every parameter rounded to `decimals` digits.
    #[must_use]
    pub fn rounded(&self, decimals: u32) -> Segment {
        Segment {
            command: self.command,
            params: self.params.iter().map(|&p| round_to(p, decimals)).collect(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.command,
            self.params.iter().map(|&p| format_number(p)).join(",")
        )
    }
}

/// An ordered sequence of path commands.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PathArray(Vec<Segment>);

impl PathArray {
    pub fn new() -> PathArray {
        PathArray(Vec::new())
    }

    pub fn into_vec(self) -> Vec<Segment> {
        self.0
    }

    pub fn push(&mut self, segment: Segment) {
        self.0.push(segment);
    }
}

impl Deref for PathArray {
    type Target = [Segment];

    fn deref(&self) -> &[Segment] {
        &self.0
    }
}

impl DerefMut for PathArray {
    fn deref_mut(&mut self) -> &mut [Segment] {
        &mut self.0
    }
}

impl From<Vec<Segment>> for PathArray {
    fn from(v: Vec<Segment>) -> PathArray {
        PathArray(v)
    }
}

impl From<PathArray> for Vec<Segment> {
    fn from(p: PathArray) -> Vec<Segment> {
        p.0
    }
}

impl FromIterator<Segment> for PathArray {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> PathArray {
        PathArray(iter.into_iter().collect())
    }
}

impl Extend<Segment> for PathArray {
    fn extend<I: IntoIterator<Item = Segment>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for PathArray {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PathArray {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PathArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.0.iter() {
            write!(f, "{segment}")?;
        }

        Ok(())
    }
}

/// Anything that the entry points accept as a path: path data to be parsed, or
/// an existing command sequence.
#[derive(Debug, Copy, Clone)]
pub enum PathInput<'a> {
    Str(&'a str),
    Segments(&'a [Segment]),
}

impl<'a> From<&'a str> for PathInput<'a> {
    fn from(s: &'a str) -> PathInput<'a> {
        PathInput::Str(s)
    }
}

impl<'a> From<&'a String> for PathInput<'a> {
    fn from(s: &'a String) -> PathInput<'a> {
        PathInput::Str(s.as_str())
    }
}

impl<'a> From<&'a [Segment]> for PathInput<'a> {
    fn from(s: &'a [Segment]) -> PathInput<'a> {
        PathInput::Segments(s)
    }
}

impl<'a> From<&'a Vec<Segment>> for PathInput<'a> {
    fn from(s: &'a Vec<Segment>) -> PathInput<'a> {
        PathInput::Segments(s.as_slice())
    }
}

impl<'a> From<&'a PathArray> for PathInput<'a> {
    fn from(p: &'a PathArray) -> PathInput<'a> {
        PathInput::Segments(&p[..])
    }
}

/// Returns a copy of `path` with all parameters rounded as per `round`.
///
/// `Round::Auto` picks the number of decimals from the size of the path.
pub fn round_path(path: &[Segment], round: Round) -> PathArray {
    match round.decimals_for(path) {
        Some(decimals) => path.iter().map(|s| s.rounded(decimals)).collect(),
        None => PathArray::from(path.to_vec()),
    }
}

/// Serializes `path`, rounding its parameters first.
pub fn path_to_string(path: &[Segment], round: Round) -> String {
    round_path(path, round).to_string()
}

/// Accumulates commands into a [`PathArray`].
///
/// Create this with `PathBuilder::default`; you can then add commands to it or call the
/// `parse` method.  When you are finished, turn it into a `PathArray` with `into_path`.
#[derive(Default)]
pub struct PathBuilder {
    segments: TinyVec<[Segment; 32]>,
}

impl PathBuilder {
    pub fn parse(&mut self, path_str: &str) -> Result<(), GrammarError> {
        let mut parser = PathParser::new(self, path_str);
        parser.parse()
    }

    /// Consumes the `PathBuilder` and returns the accumulated commands.
    pub fn into_path(self) -> PathArray {
        self.segments.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Adds a command with arbitrary letter and parameters.
    pub fn push(&mut self, command: char, params: &[f64]) {
        self.segments.push(Segment::new(command, params));
    }

    pub fn push_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Adds an absolute MoveTo command to the path.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.push('M', &[x, y]);
    }

    /// Adds an absolute CurveTo command to the path.
    pub fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        self.push('C', &[x1, y1, x2, y2, x, y]);
    }
}
