//! Parser for SVG path data.
//!
//! The grammar is the one from the SVG 2 specification, scanned one character at
//! a time.  Numbers and arc flags have their own micro-grammars; commas and
//! whitespace between parameters are optional.  Extra parameter groups after a
//! command repeat it, and extra groups after a moveto become linetos.
//!
//! Error positions are character indices, not byte offsets.

use crate::error::{GrammarError, GrammarErrorKind, PathError};
use crate::path_builder::{param_count, PathArray, PathBuilder, PathInput};
use crate::validate::check_path_array;

use GrammarErrorKind::*;

/// Whitespace between tokens: ASCII whitespace plus the Unicode space separators
/// and the byte-order mark.
pub fn is_path_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\u{09}'..='\u{0D}'
            | '\u{20}'
            | '\u{A0}'
            | '\u{1680}'
            | '\u{180E}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn is_number_start(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '+' || ch == '-' || ch == '.'
}

pub struct PathParser<'b> {
    chars: Vec<char>,
    index: usize,
    saw_first_command: bool,

    builder: &'b mut PathBuilder,
}

// This is a recursive descent parser for path data in SVG files,
// as specified in https://www.w3.org/TR/SVG/paths.html#PathDataBNF
//
// Each command is scanned as a letter followed by as many parameter groups as
// there are, and only then handed to the builder.  An error anywhere in the
// data means that the builder is left with the commands before the failing one;
// callers discard it.
impl<'b> PathParser<'b> {
    pub fn new(builder: &'b mut PathBuilder, path_str: &'b str) -> PathParser<'b> {
        PathParser {
            chars: path_str.chars().collect(),
            index: 0,
            saw_first_command: false,
            builder,
        }
    }

    pub fn parse(&mut self) -> Result<(), GrammarError> {
        self.skip_whitespace();

        while self.index < self.chars.len() {
            self.segment()?;
        }

        Ok(())
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn error(&self, kind: GrammarErrorKind) -> GrammarError {
        GrammarError::new(self.index, kind)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current(), Some(c) if is_path_whitespace(c)) {
            self.index += 1;
        }
    }

    fn eat_optional_comma(&mut self) {
        if self.current() == Some(',') {
            self.index += 1;
            self.skip_whitespace();
        }
    }

    fn advance_over_digits(&mut self) -> bool {
        let mut found_some = false;

        while matches!(self.current(), Some(c) if c.is_ascii_digit()) {
            found_some = true;
            self.index += 1;
        }

        found_some
    }

    fn peek_number(&self) -> bool {
        matches!(self.current(), Some(c) if is_number_start(c))
    }

    fn match_number(&mut self) -> Result<f64, GrammarError> {
        let start = self.index;

        let mut ch = self.current().ok_or_else(|| self.error(MissingParameter))?;

        if ch == '+' || ch == '-' {
            self.index += 1;
            ch = self.current().ok_or_else(|| self.error(MissingParameter))?;
        }

        if !ch.is_ascii_digit() && ch != '.' {
            return Err(self.error(NotANumber(ch)));
        }

        let mut has_integer_part = false;

        if ch != '.' {
            let zero_first = ch == '0';
            self.index += 1;
            has_integer_part = true;

            if zero_first && matches!(self.current(), Some(c) if c.is_ascii_digit()) {
                return Err(GrammarError::new(start, IllegalNumber));
            }

            self.advance_over_digits();
        }

        let mut has_fraction = false;

        if self.current() == Some('.') {
            self.index += 1;
            has_fraction = self.advance_over_digits();
        }

        if matches!(self.current(), Some('e' | 'E')) {
            if !has_integer_part && !has_fraction {
                return Err(self.error(InvalidExponent));
            }

            self.index += 1;

            if matches!(self.current(), Some('+' | '-')) {
                self.index += 1;
            }

            if !self.advance_over_digits() {
                return Err(self.error(InvalidExponent));
            }
        } else if !has_integer_part && !has_fraction {
            return Err(GrammarError::new(start, NotANumber('.')));
        }

        let text: String = self.chars[start..self.index].iter().collect();

        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            Ok(_) => Err(GrammarError::new(start, IllegalNumber)),
            Err(_) => Err(GrammarError::new(start, NotANumber(self.chars[start]))),
        }
    }

    fn match_flag(&mut self) -> Result<f64, GrammarError> {
        match self.current() {
            Some('0') => {
                self.index += 1;
                Ok(0.0)
            }

            Some('1') => {
                self.index += 1;
                Ok(1.0)
            }

            Some(c) => Err(self.error(InvalidFlag(c))),

            None => Err(self.error(MissingParameter)),
        }
    }

    fn segment(&mut self) -> Result<(), GrammarError> {
        let command = self.current().ok_or_else(|| self.error(MissingParameter))?;

        let arity = match param_count(command) {
            Some(n) if command.is_ascii_alphabetic() => n,
            _ => return Err(self.error(UnexpectedCommand(command))),
        };

        let lower = command.to_ascii_lowercase();

        if !self.saw_first_command && lower != 'm' {
            return Err(self.error(MissingMoveTo));
        }
        self.saw_first_command = true;

        self.index += 1;
        self.skip_whitespace();

        if arity == 0 {
            self.builder.push(command, &[]);
            return Ok(());
        }

        let mut data = Vec::with_capacity(arity);

        loop {
            for i in 0..arity {
                let param = if lower == 'a' && (i == 3 || i == 4) {
                    self.match_flag()?
                } else {
                    self.match_number()?
                };

                data.push(param);

                self.skip_whitespace();
                self.eat_optional_comma();
            }

            if !self.peek_number() {
                break;
            }
        }

        self.emit(command, arity, &data);

        Ok(())
    }

    fn emit(&mut self, command: char, arity: usize, data: &[f64]) {
        for (i, group) in data.chunks(arity).enumerate() {
            let c = match command {
                'M' if i > 0 => 'L',
                'm' if i > 0 => 'l',
                c => c,
            };

            self.builder.push(c, group);
        }
    }
}

/// Parses path data, or checks and copies an existing command sequence.
///
/// Strings that are empty or only contain whitespace are rejected with
/// [`PathError::EmptyPath`].
pub fn parse_path_string<'a, I: Into<PathInput<'a>>>(input: I) -> Result<PathArray, PathError> {
    match input.into() {
        PathInput::Str(s) => {
            if s.chars().all(is_path_whitespace) {
                return Err(PathError::EmptyPath);
            }

            let mut builder = PathBuilder::default();
            builder.parse(s)?;

            Ok(builder.into_path())
        }

        PathInput::Segments(segments) => {
            check_path_array(segments).map_err(PathError::InvalidPathArray)?;

            Ok(PathArray::from(segments.to_vec()))
        }
    }
}
