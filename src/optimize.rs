//! Making path data shorter.
//!
//! Every segment after the first is written in whichever of its absolute or
//! relative forms serializes to fewer characters, after turning lines into
//! horizontal or vertical lines and curves into their shorthand forms where
//! that does not change the shape.

use crate::convert::{absolute_path, normalize_segment, relative_segment, NormalizeState};
use crate::error::PathError;
use crate::options::Round;
use crate::path_builder::{PathArray, PathInput, Segment};
use crate::path_parser::parse_path_string;
use crate::util::round_to;

/// Decimals used to decide whether a control point is a reflection.
const REFLECTION_DECIMALS: u32 = 4;

/// Shortens a path, rounding its numbers as per `round`.
pub fn optimize_path<'a, I: Into<PathInput<'a>>>(
    input: I,
    round: Round,
) -> Result<PathArray, PathError> {
    let path = parse_path_string(input)?;
    let absolute = absolute_path(&path);
    let decimals = round.decimals_for(&absolute);

    Ok(optimized_path(&absolute, decimals))
}

/// Optimizes an absolute path.
pub(crate) fn optimized_path(absolute: &[Segment], decimals: Option<u32>) -> PathArray {
    let rounded = |seg: Segment| match decimals {
        Some(d) => seg.rounded(d),
        None => seg,
    };

    let mut state = NormalizeState::default();
    let mut result = PathArray::new();

    for (i, seg) in absolute.iter().enumerate() {
        let normalized = normalize_segment(seg, &state);

        if i == 0 {
            result.push(seg.clone());
        } else {
            let candidate = shorten_segment(seg, &normalized, &state);

            let abs = rounded(candidate.clone());
            let rel = rounded(relative_segment(&candidate, &state.cursor));

            if rel.to_string().len() < abs.to_string().len() {
                result.push(rel);
            } else {
                result.push(abs);
            }
        }

        state.advance(seg, &normalized);
    }

    result
}

fn same_point(a: (f64, f64), b: (f64, f64)) -> bool {
    round_to(a.0, REFLECTION_DECIMALS) == round_to(b.0, REFLECTION_DECIMALS)
        && round_to(a.1, REFLECTION_DECIMALS) == round_to(b.1, REFLECTION_DECIMALS)
}

/// Replaces an absolute segment with its shorthand form when there is one.
///
/// `normalized` is the segment with its shorthand expanded, and `state` is the
/// normalization state before the segment.
fn shorten_segment(seg: &Segment, normalized: &Segment, state: &NormalizeState) -> Segment {
    let (x, y) = state.cursor.point();
    let p = &normalized.params;

    match seg.command {
        'L' if p[0] == x => Segment::new('V', &[p[1]]),

        'L' if p[1] == y => Segment::new('H', &[p[0]]),

        'C' if matches!(state.prev, 'C' | 'S') => {
            let reflection = (x * 2.0 - state.x2, y * 2.0 - state.y2);

            if same_point((p[0], p[1]), reflection) {
                Segment::new('S', &p[2..])
            } else {
                seg.clone()
            }
        }

        'Q' if matches!(state.prev, 'Q' | 'T') => {
            let reflection = (x * 2.0 - state.qx, y * 2.0 - state.qy);

            if same_point((p[0], p[1]), reflection) {
                Segment::new('T', &p[2..])
            } else {
                seg.clone()
            }
        }

        _ => seg.clone(),
    }
}
