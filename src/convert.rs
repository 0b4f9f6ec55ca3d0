//! Conversions between the representations of a path.
//!
//! All the conversions are left folds over the segments, carrying the current
//! point, the start of the current subpath, and for shorthand expansion the
//! control points of the previous curve.

use crate::arc::{CubicBezierCurve, EllipticalArc};
use crate::error::PathError;
use crate::path_builder::{PathArray, PathBuilder, PathInput, Segment};
use crate::path_parser::parse_path_string;
use crate::validate::{is_absolute_array, is_curve_array, is_normalized_array, is_relative_array};

/// Current point and subpath start while walking an absolute path.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Cursor {
    pub x: f64,
    pub y: f64,
    pub mx: f64,
    pub my: f64,
}

impl Cursor {
    pub fn point(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Moves the cursor past the absolute segment `seg`.
    pub fn advance(&mut self, seg: &Segment) {
        match seg.command {
            'Z' | 'z' => {
                self.x = self.mx;
                self.y = self.my;
            }

            'H' => self.x = seg.params[0],

            'V' => self.y = seg.params[0],

            _ => {
                if let Some((x, y)) = seg.last_pair() {
                    self.x = x;
                    self.y = y;
                }

                if seg.command == 'M' {
                    self.mx = self.x;
                    self.my = self.y;
                }
            }
        }
    }
}

/// Cursor plus the reflection state needed to expand `S` and `T`.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct NormalizeState {
    pub cursor: Cursor,
    /// Second control point of the previous cubic.
    pub x2: f64,
    pub y2: f64,
    /// Control point of the previous quadratic.
    pub qx: f64,
    pub qy: f64,
    /// Upper-case letter of the previous segment before normalization.
    pub prev: char,
}

impl NormalizeState {
    /// Records that the absolute segment `original` was normalized into `normalized`.
    pub fn advance(&mut self, original: &Segment, normalized: &Segment) {
        match normalized.command {
            'C' => {
                self.x2 = normalized.params[2];
                self.y2 = normalized.params[3];
            }

            'Q' => {
                self.qx = normalized.params[0];
                self.qy = normalized.params[1];
            }

            _ => (),
        }

        self.prev = original.letter();
        self.cursor.advance(normalized);
    }
}

/// Converts a segment to absolute coordinates, given the cursor before it.
pub fn absolute_segment(seg: &Segment, cursor: &Cursor) -> Segment {
    if !seg.is_relative() {
        return seg.clone();
    }

    let Cursor { x, y, .. } = *cursor;
    let command = seg.letter();

    let params = match command {
        'A' => {
            let mut p = seg.params.clone();
            p[5] += x;
            p[6] += y;
            p
        }

        'H' => [seg.params[0] + x].iter().copied().collect(),

        'V' => [seg.params[0] + y].iter().copied().collect(),

        _ => seg
            .params
            .iter()
            .enumerate()
            .map(|(i, p)| if i % 2 == 0 { p + x } else { p + y })
            .collect(),
    };

    Segment { command, params }
}

/// Converts an absolute segment to relative coordinates, given the cursor before it.
pub fn relative_segment(seg: &Segment, cursor: &Cursor) -> Segment {
    let Cursor { x, y, .. } = *cursor;
    let command = seg.command.to_ascii_lowercase();

    if seg.is_relative() {
        return seg.clone();
    }

    let params = match command {
        'a' => {
            let mut p = seg.params.clone();
            p[5] -= x;
            p[6] -= y;
            p
        }

        'h' => [seg.params[0] - x].iter().copied().collect(),

        'v' => [seg.params[0] - y].iter().copied().collect(),

        _ => seg
            .params
            .iter()
            .enumerate()
            .map(|(i, p)| if i % 2 == 0 { p - x } else { p - y })
            .collect(),
    };

    Segment { command, params }
}

/// Expands an absolute segment into one of `A`, `C`, `L`, `M`, `Q` and `Z`.
pub fn normalize_segment(seg: &Segment, state: &NormalizeState) -> Segment {
    let Cursor { x, y, .. } = state.cursor;
    let p = &seg.params;

    match seg.command {
        'H' => Segment::new('L', &[p[0], y]),

        'V' => Segment::new('L', &[x, p[0]]),

        'S' => {
            let (x1, y1) = if matches!(state.prev, 'C' | 'S') {
                (x * 2.0 - state.x2, y * 2.0 - state.y2)
            } else {
                (x, y)
            };

            Segment::new('C', &[x1, y1, p[0], p[1], p[2], p[3]])
        }

        'T' => {
            let (qx, qy) = if matches!(state.prev, 'Q' | 'T') {
                (x * 2.0 - state.qx, y * 2.0 - state.qy)
            } else {
                (x, y)
            };

            Segment::new('Q', &[qx, qy, p[0], p[1]])
        }

        _ => seg.clone(),
    }
}

/// Converts a normalized segment into the cubics that draw it.
///
/// Movetos yield nothing, and neither does a closepath whose subpath is
/// already back at its start.
pub fn segment_to_cubics(seg: &Segment, cursor: &Cursor) -> Vec<CubicBezierCurve> {
    let from = cursor.point();
    let p = &seg.params;

    match seg.command {
        'L' => vec![CubicBezierCurve::from_line(from, (p[0], p[1]))],

        'Q' => vec![CubicBezierCurve::from_quadratic(
            from,
            (p[0], p[1]),
            (p[2], p[3]),
        )],

        'C' => vec![CubicBezierCurve {
            pt1: (p[0], p[1]),
            pt2: (p[2], p[3]),
            to: (p[4], p[5]),
        }],

        'A' => EllipticalArc::from_params(from, p)
            .map(|arc| arc.to_cubics())
            .unwrap_or_default(),

        'Z' if from != (cursor.mx, cursor.my) => {
            vec![CubicBezierCurve::from_line(from, (cursor.mx, cursor.my))]
        }

        _ => Vec::new(),
    }
}

/// Converts a path to absolute coordinates.
pub fn path_to_absolute<'a, I: Into<PathInput<'a>>>(input: I) -> Result<PathArray, PathError> {
    let path = parse_path_string(input)?;

    if is_absolute_array(&path) {
        return Ok(path);
    }

    Ok(absolute_path(&path))
}

/// Fold over an already-validated path.
pub(crate) fn absolute_path(path: &[Segment]) -> PathArray {
    let mut cursor = Cursor::default();

    path.iter()
        .map(|seg| {
            let abs = absolute_segment(seg, &cursor);
            cursor.advance(&abs);
            abs
        })
        .collect()
}

/// Converts a path to relative coordinates.
///
/// The first moveto stays absolute; later movetos become `m`.
pub fn path_to_relative<'a, I: Into<PathInput<'a>>>(input: I) -> Result<PathArray, PathError> {
    let path = parse_path_string(input)?;

    if is_relative_array(&path) {
        return Ok(path);
    }

    Ok(relative_path(&path))
}

pub(crate) fn relative_path(path: &[Segment]) -> PathArray {
    let mut cursor = Cursor::default();

    path.iter()
        .enumerate()
        .map(|(i, seg)| {
            let abs = absolute_segment(seg, &cursor);

            let rel = if i == 0 {
                Segment::new('M', &abs.params)
            } else {
                relative_segment(&abs, &cursor)
            };

            cursor.advance(&abs);
            rel
        })
        .collect()
}

/// Converts a path to absolute coordinates and expands all shorthand commands.
///
/// The result only has `A`, `C`, `L`, `M`, `Q` and `Z` commands.
pub fn normalize_path<'a, I: Into<PathInput<'a>>>(input: I) -> Result<PathArray, PathError> {
    let path = parse_path_string(input)?;

    if is_normalized_array(&path) {
        return Ok(path);
    }

    Ok(normalized_path(&path))
}

pub(crate) fn normalized_path(path: &[Segment]) -> PathArray {
    let mut state = NormalizeState::default();

    path.iter()
        .map(|seg| {
            let abs = absolute_segment(seg, &state.cursor);
            let normalized = normalize_segment(&abs, &state);
            state.advance(&abs, &normalized);
            normalized
        })
        .collect()
}

/// Converts a path to movetos and cubic Bézier curves only.
pub fn path_to_curve<'a, I: Into<PathInput<'a>>>(input: I) -> Result<PathArray, PathError> {
    let path = parse_path_string(input)?;

    if is_curve_array(&path) {
        return Ok(path);
    }

    Ok(curve_path(&path))
}

pub(crate) fn curve_path(path: &[Segment]) -> PathArray {
    let normalized = normalized_path(path);

    let mut builder = PathBuilder::default();
    let mut cursor = Cursor::default();

    for seg in normalized.iter() {
        if seg.command == 'M' {
            builder.move_to(seg.params[0], seg.params[1]);
        } else {
            for c in segment_to_cubics(seg, &cursor) {
                let [x1, y1, x2, y2, x, y] = c.to_params();
                builder.curve_to(x1, y1, x2, y2, x, y);
            }
        }

        cursor.advance(seg);
    }

    builder.into_path()
}
