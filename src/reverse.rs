//! Reversing the direction of paths, and splitting them into subpaths.

use crate::convert::{absolute_path, curve_path, normalized_path, Cursor};
use crate::error::PathError;
use crate::path_builder::{PathArray, PathInput, Segment};
use crate::path_parser::parse_path_string;
use crate::validate::is_curve_array;

/// Splits a path into its subpaths, each starting with an absolute moveto.
pub fn split_path<'a, I: Into<PathInput<'a>>>(input: I) -> Result<Vec<PathArray>, PathError> {
    let path = parse_path_string(input)?;
    Ok(split_absolute(&absolute_path(&path)))
}

pub(crate) fn split_absolute(absolute: &[Segment]) -> Vec<PathArray> {
    let mut subpaths: Vec<PathArray> = Vec::new();

    for seg in absolute {
        match subpaths.last_mut() {
            Some(subpath) if seg.command != 'M' => subpath.push(seg.clone()),
            _ => subpaths.push(PathArray::from(vec![seg.clone()])),
        }
    }

    subpaths
}

/// Reverses the direction of a path with a single subpath.
///
/// The result is absolute.  Shorthand curves stay shorthand where the
/// reversed path can still express them that way.  An open path keeps its
/// moveto in front, moved to the old end point; a closed path starts where
/// its last drawing command used to end.
pub fn reverse_path<'a, I: Into<PathInput<'a>>>(input: I) -> Result<PathArray, PathError> {
    let path = parse_path_string(input)?;
    Ok(reversed_path(&absolute_path(&path)))
}

pub(crate) fn reversed_path(absolute: &[Segment]) -> PathArray {
    let n = absolute.len();
    if n == 0 {
        return PathArray::new();
    }

    let normalized = normalized_path(absolute);
    let closed = absolute[n - 1].command == 'Z';

    let mut cursor = Cursor::default();
    let ends: Vec<(f64, f64)> = absolute
        .iter()
        .map(|seg| {
            cursor.advance(seg);
            cursor.point()
        })
        .collect();

    let mut rebuilt: Vec<Segment> = (0..n)
        .map(|i| {
            let seg = &absolute[i];
            let p = &seg.params;
            let np = &normalized[i].params;

            // the segment now ends where the previous one used to
            let (x, y) = if i == 0 { ends[n - 1] } else { ends[i - 1] };

            // a reversed segment follows the reversal of the original next one
            let next = absolute.get(i + 1).map(|s| s.command);

            match seg.command {
                'M' if closed => Segment::new('Z', &[]),
                'M' | 'Z' => Segment::new('M', &[x, y]),

                'A' => Segment::new('A', &[p[0], p[1], p[2], p[3], 1.0 - p[4], x, y]),

                'C' if next == Some('S') => Segment::new('S', &[p[0], p[1], x, y]),
                'C' => Segment::new('C', &[p[2], p[3], p[0], p[1], x, y]),

                'S' if next == Some('S') => Segment::new('S', &[np[0], np[1], x, y]),
                'S' => Segment::new('C', &[np[2], np[3], np[0], np[1], x, y]),

                'Q' if next == Some('T') => Segment::new('T', &[x, y]),
                'Q' => Segment::new('Q', &[p[0], p[1], x, y]),

                'T' if next == Some('T') => Segment::new('T', &[x, y]),
                'T' => Segment::new('Q', &[np[0], np[1], x, y]),

                'H' => Segment::new('H', &[x]),
                'V' => Segment::new('V', &[y]),

                _ => Segment::new('L', &[x, y]),
            }
        })
        .collect();

    if closed {
        rebuilt.reverse();
    } else {
        rebuilt[1..].reverse();
    }

    PathArray::from(rebuilt)
}

/// Reverses a path made of movetos and cubic curves.
///
/// Other paths are converted to cubics first.  Each subpath is reversed, and
/// the subpaths come out in reverse order.
pub fn reverse_curve<'a, I: Into<PathInput<'a>>>(input: I) -> Result<PathArray, PathError> {
    let path = parse_path_string(input)?;

    if is_curve_array(&path) {
        Ok(reversed_curve(&path))
    } else {
        Ok(reversed_curve(&curve_path(&path)))
    }
}

fn reversed_curve(curve: &[Segment]) -> PathArray {
    let mut result = PathArray::new();

    for subpath in split_absolute(curve).iter().rev() {
        let mut from = (0.0, 0.0);

        // each curve with its start point
        let curves: Vec<((f64, f64), &Segment)> = subpath
            .iter()
            .filter_map(|seg| {
                let start = from;
                from = seg.last_pair().unwrap_or(from);
                Some((start, seg)).filter(|_| seg.command == 'C')
            })
            .collect();

        result.push(Segment::new('M', &[from.0, from.1]));

        for ((x, y), seg) in curves.into_iter().rev() {
            let p = &seg.params;
            result.push(Segment::new('C', &[p[2], p[3], p[0], p[1], x, y]));
        }
    }

    result
}
