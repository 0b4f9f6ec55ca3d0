//! Lengths, points, areas and bounding boxes of paths.
//!
//! Everything here works on the cubic form of a path.  Cubics that came from
//! straight lines are measured exactly; other cubics are flattened into a
//! fixed number of chords.

use crate::arc::CubicBezierCurve;
use crate::bbox::{cubic_point, BoundingBox, BoundsBuilder};
use crate::convert::{absolute_segment, normalize_segment, segment_to_cubics, NormalizeState};
use crate::error::PathError;
use crate::path_builder::{PathArray, PathInput, Segment};
use crate::path_parser::parse_path_string;
use crate::util::{distance_square_root, mid_point};

/// Number of chords used to flatten a curved cubic.
const CURVE_SAMPLES: usize = 300;

/// Step of the first pass of the closest-point search, in user units of length.
const CLOSEST_POINT_COARSE_STEP: f64 = 8.0;

/// Long paths get a wider first step so the first pass stays at this many samples.
const CLOSEST_POINT_MAX_SAMPLES: f64 = 4096.0;

/// The closest-point search stops refining below this step.
const CLOSEST_POINT_MIN_STEP: f64 = 0.5;

/// Points closer than this to the path count as lying on it.
const STROKE_TOLERANCE: f64 = 1e-3;

/// The segment found at a distance along a path.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentProperties {
    /// The segment as it appears in the path.
    pub segment: Segment,
    /// Position of the segment in the path.
    pub index: usize,
    /// Length of the segment.
    pub length: f64,
    /// Length of the path before the segment.
    pub length_at_segment: f64,
}

/// Result of looking for the point of a path closest to another point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointProperties {
    pub closest: (f64, f64),
    pub distance: f64,
    pub segment: SegmentProperties,
}

/// One drawn cubic with its length.
#[derive(Debug, Clone)]
struct Piece {
    from: (f64, f64),
    curve: CubicBezierCurve,
    length: f64,

    /// Flattened points with the arc length up to each of them; empty for straight pieces.
    samples: Vec<((f64, f64), f64)>,
}

impl Piece {
    fn new(from: (f64, f64), curve: CubicBezierCurve) -> Piece {
        if curve.is_line_from(from) {
            return Piece {
                from,
                curve,
                length: distance_square_root(from, curve.to),
                samples: Vec::new(),
            };
        }

        let mut samples = Vec::with_capacity(CURVE_SAMPLES + 1);
        let mut prev = from;
        let mut length = 0.0;

        samples.push((from, 0.0));

        for i in 1..=CURVE_SAMPLES {
            let t = i as f64 / CURVE_SAMPLES as f64;
            let p = cubic_point(from, &curve, t);

            length += distance_square_root(prev, p);
            samples.push((p, length));
            prev = p;
        }

        Piece {
            from,
            curve,
            length,
            samples,
        }
    }

    fn point_at(&self, distance: f64) -> (f64, f64) {
        if self.samples.is_empty() {
            if self.length == 0.0 {
                return self.from;
            }

            return mid_point(self.from, self.curve.to, distance / self.length);
        }

        let i = self.samples.partition_point(|&(_, l)| l < distance);

        if i == 0 {
            return self.from;
        }

        if i == self.samples.len() {
            return self.curve.to;
        }

        let (p0, l0) = self.samples[i - 1];
        let (p1, l1) = self.samples[i];

        let t = if l1 > l0 { (distance - l0) / (l1 - l0) } else { 0.0 };

        mid_point(p0, p1, t)
    }

    /// Signed area swept by the piece relative to the origin.
    ///
    /// Summed over a closed subpath this is the enclosed area, positive when
    /// the subpath runs clockwise on a y-down canvas.
    fn area(&self) -> f64 {
        let (x1, y1) = self.from;
        let (c1x, c1y) = self.curve.pt1;
        let (c2x, c2y) = self.curve.pt2;
        let (x2, y2) = self.curve.to;

        3.0 * ((y2 - y1) * (c1x + c2x) - (x2 - x1) * (c1y + c2y) + c1y * (x1 - c2x)
            - c1x * (y1 - c2y)
            + y2 * (c2x + x1 / 3.0)
            - x2 * (c2y + y1 / 3.0))
            / 20.0
    }
}

#[derive(Debug, Clone)]
enum Step {
    Move { to: (f64, f64) },
    Draw { index: usize, piece: Piece },
}

/// A path turned into movetos and measured cubics.
///
/// Every step remembers which segment of the original path it came from, so
/// that lengths can be reported per segment.
#[derive(Debug, Clone)]
pub(crate) struct PathWalk {
    steps: Vec<Step>,
    segment_count: usize,
    total_length: f64,
}

impl PathWalk {
    /// Walks an already-validated path.
    pub fn new(path: &[Segment]) -> PathWalk {
        let mut steps = Vec::new();
        let mut state = NormalizeState::default();
        let mut total_length = 0.0;

        for (index, seg) in path.iter().enumerate() {
            let abs = absolute_segment(seg, &state.cursor);
            let normalized = normalize_segment(&abs, &state);

            if normalized.command == 'M' {
                steps.push(Step::Move {
                    to: (normalized.params[0], normalized.params[1]),
                });
            } else {
                let mut from = state.cursor.point();

                for curve in segment_to_cubics(&normalized, &state.cursor) {
                    let piece = Piece::new(from, curve);
                    total_length += piece.length;
                    from = curve.to;
                    steps.push(Step::Draw { index, piece });
                }
            }

            state.advance(&abs, &normalized);
        }

        PathWalk {
            steps,
            segment_count: path.len(),
            total_length,
        }
    }

    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    fn start(&self) -> (f64, f64) {
        match self.steps.first() {
            Some(Step::Move { to }) => *to,
            Some(Step::Draw { piece, .. }) => piece.from,
            None => (0.0, 0.0),
        }
    }

    /// The point at `distance` along the path, clamped to both ends.
    pub fn point_at_length(&self, distance: f64) -> (f64, f64) {
        let mut point = self.start();

        // also catches NaN
        if !(distance > 0.0) {
            return point;
        }

        let mut walked = 0.0;

        for step in &self.steps {
            match step {
                Step::Move { to } => point = *to,

                Step::Draw { piece, .. } => {
                    if walked + piece.length >= distance {
                        return piece.point_at(distance - walked);
                    }

                    walked += piece.length;
                    point = piece.curve.to;
                }
            }
        }

        point
    }

    pub fn bbox(&self) -> BoundingBox {
        let mut bounds = BoundsBuilder::new();

        for step in &self.steps {
            match step {
                Step::Move { to } => bounds.add_point(*to),
                Step::Draw { piece, .. } => bounds.add_cubic(piece.from, &piece.curve),
            }
        }

        bounds.build().unwrap_or_default()
    }

    /// Signed area of all subpaths, each closed with a chord back to its start.
    pub fn area(&self) -> f64 {
        let mut area = 0.0;
        let mut start = self.start();
        let mut current = start;

        for step in &self.steps {
            match step {
                Step::Move { to } => {
                    area += chord_area(current, start);
                    start = *to;
                    current = *to;
                }

                Step::Draw { piece, .. } => {
                    area += piece.area();
                    current = piece.curve.to;
                }
            }
        }

        area + chord_area(current, start)
    }

    /// Length drawn by each segment of the original path.
    fn segment_lengths(&self) -> Vec<f64> {
        let mut lengths = vec![0.0; self.segment_count];

        for step in &self.steps {
            if let Step::Draw { index, piece } = step {
                lengths[*index] += piece.length;
            }
        }

        lengths
    }

    /// Finds the segment of `path` that is being drawn at `distance`.
    ///
    /// `path` must be the path this walk was created from.  Zero-length
    /// segments at a boundary resolve to the last of them.
    pub fn properties_at_length(&self, path: &[Segment], distance: f64) -> SegmentProperties {
        let lengths = self.segment_lengths();

        let mut length_at: Vec<f64> = Vec::with_capacity(lengths.len());
        let mut acc = 0.0;
        for l in &lengths {
            length_at.push(acc);
            acc += l;
        }

        let properties = |index: usize| SegmentProperties {
            segment: path[index].clone(),
            index,
            length: lengths[index],
            length_at_segment: length_at[index],
        };

        if !(distance > 0.0) || path.len() < 2 {
            return properties(0);
        }

        if distance >= acc {
            return properties(path.len() - 1);
        }

        // Peel segments off the end until the rest of the path is no longer
        // than the requested distance.
        (1..path.len())
            .rev()
            .find(|&i| length_at[i] <= distance)
            .map(properties)
            .unwrap_or_else(|| properties(0))
    }

    pub fn properties_at_point(&self, path: &[Segment], point: (f64, f64)) -> PointProperties {
        let distance_to = |p: (f64, f64)| {
            let dx = p.0 - point.0;
            let dy = p.1 - point.1;
            dx * dx + dy * dy
        };

        let total = self.total_length;

        let mut closest = self.start();
        let mut best_length = 0.0;
        let mut best_distance = f64::INFINITY;

        let first_step = coarse_step(total);
        let coarse_steps = (total / first_step).floor() as usize;

        for k in 0..=coarse_steps {
            let length = k as f64 * first_step;
            let p = self.point_at_length(length);
            let d = distance_to(p);

            if d < best_distance {
                closest = p;
                best_length = length;
                best_distance = d;
            }
        }

        let mut step = first_step / 2.0;

        while step >= CLOSEST_POINT_MIN_STEP {
            let before_length = best_length - step;
            let after_length = best_length + step;

            if before_length >= 0.0 {
                let p = self.point_at_length(before_length);
                let d = distance_to(p);

                if d < best_distance {
                    closest = p;
                    best_length = before_length;
                    best_distance = d;
                    continue;
                }
            }

            if after_length <= total {
                let p = self.point_at_length(after_length);
                let d = distance_to(p);

                if d < best_distance {
                    closest = p;
                    best_length = after_length;
                    best_distance = d;
                    continue;
                }
            }

            step /= 2.0;
        }

        PointProperties {
            closest,
            distance: best_distance.sqrt(),
            segment: self.properties_at_length(path, best_length),
        }
    }
}

fn coarse_step(total_length: f64) -> f64 {
    CLOSEST_POINT_COARSE_STEP.max(total_length / CLOSEST_POINT_MAX_SAMPLES)
}

/// Area swept by the straight edge from `a` to `b`, in the same sense as `Piece::area`.
fn chord_area(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 * b.1 - b.0 * a.1) / 2.0
}

/// Parses the input and measures it.
fn walk_input<'a, I: Into<PathInput<'a>>>(
    input: I,
) -> Result<(PathArray, PathWalk), PathError> {
    let path = parse_path_string(input)?;
    let walk = PathWalk::new(&path);

    Ok((path, walk))
}

/// Computes the bounding box of a path.
pub fn get_path_bbox<'a, I: Into<PathInput<'a>>>(input: I) -> Result<BoundingBox, PathError> {
    let (_, walk) = walk_input(input)?;
    Ok(walk.bbox())
}

/// Computes the length of a path.
pub fn get_total_length<'a, I: Into<PathInput<'a>>>(input: I) -> Result<f64, PathError> {
    let (_, walk) = walk_input(input)?;
    Ok(walk.total_length())
}

/// Returns the point at `distance` along a path.
///
/// Negative distances give the start of the path, and distances past its
/// length give the end.
pub fn get_point_at_length<'a, I: Into<PathInput<'a>>>(
    input: I,
    distance: f64,
) -> Result<(f64, f64), PathError> {
    let (_, walk) = walk_input(input)?;
    Ok(walk.point_at_length(distance))
}

/// Returns the segment being drawn at `distance` along a path, with its lengths.
pub fn get_properties_at_length<'a, I: Into<PathInput<'a>>>(
    input: I,
    distance: f64,
) -> Result<SegmentProperties, PathError> {
    let (path, walk) = walk_input(input)?;
    Ok(walk.properties_at_length(&path, distance))
}

/// Returns the segment being drawn at `distance` along a path.
pub fn get_segment_at_length<'a, I: Into<PathInput<'a>>>(
    input: I,
    distance: f64,
) -> Result<Segment, PathError> {
    get_properties_at_length(input, distance).map(|p| p.segment)
}

/// Finds the point of a path closest to `point`, the distance to it, and the
/// segment it is on.
pub fn get_properties_at_point<'a, I: Into<PathInput<'a>>>(
    input: I,
    point: (f64, f64),
) -> Result<PointProperties, PathError> {
    let (path, walk) = walk_input(input)?;
    Ok(walk.properties_at_point(&path, point))
}

/// Finds the point of a path closest to `point`.
pub fn get_closest_point<'a, I: Into<PathInput<'a>>>(
    input: I,
    point: (f64, f64),
) -> Result<(f64, f64), PathError> {
    get_properties_at_point(input, point).map(|p| p.closest)
}

/// Finds the segment of a path closest to `point`.
pub fn get_segment_of_point<'a, I: Into<PathInput<'a>>>(
    input: I,
    point: (f64, f64),
) -> Result<SegmentProperties, PathError> {
    get_properties_at_point(input, point).map(|p| p.segment)
}

/// Whether `point` lies on a path.
pub fn is_point_in_stroke<'a, I: Into<PathInput<'a>>>(
    input: I,
    point: (f64, f64),
) -> Result<bool, PathError> {
    get_properties_at_point(input, point).map(|p| p.distance < STROKE_TOLERANCE)
}

/// Computes the signed area enclosed by a path.
///
/// Subpaths are closed implicitly.  The area is positive for subpaths that
/// run clockwise on a canvas whose y axis points down.
pub fn get_path_area<'a, I: Into<PathInput<'a>>>(input: I) -> Result<f64, PathError> {
    let (_, walk) = walk_input(input)?;
    Ok(walk.area())
}

/// Whether a path runs clockwise, going by the sign of its area.
pub fn get_draw_direction<'a, I: Into<PathInput<'a>>>(input: I) -> Result<bool, PathError> {
    get_path_area(input).map(|area| area >= 0.0)
}

/// Signed area of a polygon, with the same sign convention as [`get_path_area`].
pub fn polygon_area(points: &[(f64, f64)]) -> f64 {
    let Some(&last) = points.last() else {
        return 0.0;
    };

    let mut area = 0.0;
    let mut a = last;

    for &b in points {
        area += a.0 * b.1 - b.0 * a.1;
        a = b;
    }

    area / 2.0
}

/// Perimeter of a polygon, including the edge back to the first point.
pub fn polygon_length(points: &[(f64, f64)]) -> f64 {
    let Some(&last) = points.last() else {
        return 0.0;
    };

    let mut length = 0.0;
    let mut a = last;

    for &b in points {
        length += distance_square_root(a, b);
        a = b;
    }

    length
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    const POLYLINE: &str = "M0 0L10 0L10 10";
    const SQUARE: &str = "M0 0L10 0L10 10L0 10Z";

    #[test]
    fn line_lengths_are_exact() {
        assert_eq!(get_total_length(POLYLINE).unwrap(), 20.0);
        assert_eq!(get_total_length("M0 0l3 4h-3z").unwrap(), 12.0);
        assert_eq!(get_total_length("M5 5").unwrap(), 0.0);
    }

    #[test]
    fn curve_lengths_are_close() {
        let straight = get_total_length("M0 0C0 0 10 0 10 0").unwrap();
        assert!(approx_eq!(f64, straight, 10.0, epsilon = 1e-9));

        let half_circle = get_total_length("M0 0A50 50 0 0 1 100 0").unwrap();
        assert!(approx_eq!(
            f64,
            half_circle,
            std::f64::consts::PI * 50.0,
            epsilon = 0.05
        ));
    }

    #[test]
    fn point_at_length_is_clamped() {
        assert_eq!(get_point_at_length(POLYLINE, 5.0).unwrap(), (5.0, 0.0));
        assert_eq!(get_point_at_length(POLYLINE, 15.0).unwrap(), (10.0, 5.0));
        assert_eq!(get_point_at_length(POLYLINE, -1.0).unwrap(), (0.0, 0.0));
        assert_eq!(get_point_at_length(POLYLINE, 100.0).unwrap(), (10.0, 10.0));
    }

    #[test]
    fn point_at_length_skips_moves() {
        let path = "M0 0L10 0M20 0L30 0";

        assert_eq!(get_point_at_length(path, 10.0).unwrap(), (10.0, 0.0));
        assert_eq!(get_point_at_length(path, 15.0).unwrap(), (25.0, 0.0));
    }

    #[test]
    fn bbox_of_lines() {
        let bbox = get_path_bbox("M10 10l20 0l0 40").unwrap();

        assert_eq!(bbox, BoundingBox::from_extents(10.0, 10.0, 30.0, 50.0));
        assert_eq!(bbox.cz, 50.0);
    }

    #[test]
    fn bbox_of_arc() {
        let bbox = get_path_bbox("M0 0A50 50 0 0 1 100 0").unwrap();

        assert!(approx_eq!(f64, bbox.x, 0.0, epsilon = 1e-2));
        assert!(approx_eq!(f64, bbox.x2, 100.0, epsilon = 1e-2));
        assert!(approx_eq!(f64, bbox.y, -50.0, epsilon = 1e-2));
        assert!(approx_eq!(f64, bbox.y2, 0.0, epsilon = 1e-2));
    }

    #[test]
    fn bbox_of_single_point() {
        let bbox = get_path_bbox("M3 4").unwrap();
        assert_eq!((bbox.x, bbox.y, bbox.width, bbox.height), (3.0, 4.0, 0.0, 0.0));
    }

    #[test]
    fn properties_at_length_finds_segment() {
        let p = get_properties_at_length(POLYLINE, 5.0).unwrap();
        assert_eq!(p.index, 1);
        assert_eq!(p.length, 10.0);
        assert_eq!(p.length_at_segment, 0.0);

        let p = get_properties_at_length(POLYLINE, 15.0).unwrap();
        assert_eq!(p.index, 2);
        assert_eq!(p.segment, Segment::new('L', &[10.0, 10.0]));
        assert_eq!(p.length_at_segment, 10.0);

        let p = get_properties_at_length(POLYLINE, 0.0).unwrap();
        assert_eq!(p.index, 0);
        assert_eq!(p.segment, Segment::new('M', &[0.0, 0.0]));

        let p = get_properties_at_length(POLYLINE, 50.0).unwrap();
        assert_eq!(p.index, 2);
        assert_eq!(p.length, 10.0);
        assert_eq!(p.length_at_segment, 10.0);
    }

    #[test]
    fn segment_at_length_keeps_relative_commands() {
        let s = get_segment_at_length("M0 0l10 0l0 10", 12.0).unwrap();
        assert_eq!(s, Segment::new('l', &[0.0, 10.0]));
    }

    #[test]
    fn closest_point_on_line() {
        let p = get_properties_at_point("M0 0L10 0", (5.0, 3.0)).unwrap();

        assert_eq!(p.closest, (5.0, 0.0));
        assert_eq!(p.distance, 3.0);
        assert_eq!(p.segment.index, 1);

        assert_eq!(get_closest_point("M0 0L10 0", (20.0, 0.0)).unwrap(), (10.0, 0.0));
        assert_eq!(get_segment_of_point(SQUARE, (11.0, 5.0)).unwrap().index, 2);
    }

    #[test]
    fn closest_point_on_very_long_line() {
        assert_eq!(coarse_step(100.0), CLOSEST_POINT_COARSE_STEP);
        assert_eq!(coarse_step(4096.0e6), 1.0e6);

        let p = get_properties_at_point("M0 0L1e12 0", (5.0e11, 3.0)).unwrap();
        assert!((p.closest.0 - 5.0e11).abs() < 1.0);
        assert_eq!(p.closest.1, 0.0);
        assert_eq!(p.segment.index, 1);
    }

    #[test]
    fn point_in_stroke() {
        assert!(is_point_in_stroke("M0 0L10 0", (5.0, 0.0)).unwrap());
        assert!(is_point_in_stroke(SQUARE, (10.0, 10.0)).unwrap());
        assert!(!is_point_in_stroke("M0 0L10 0", (5.0, 1.0)).unwrap());
    }

    #[test]
    fn area_and_direction() {
        assert!(approx_eq!(f64, get_path_area(SQUARE).unwrap(), 100.0, epsilon = 1e-9));
        assert!(get_draw_direction(SQUARE).unwrap());

        let area = get_path_area("M0 0L0 10L10 10L10 0Z").unwrap();
        assert!(approx_eq!(f64, area, -100.0, epsilon = 1e-9));
        assert!(!get_draw_direction("M0 0L0 10L10 10L10 0Z").unwrap());
    }

    #[test]
    fn open_subpaths_are_closed_for_area() {
        let open = get_path_area("M10 0L20 0L20 10").unwrap();
        let closed = get_path_area("M10 0L20 0L20 10Z").unwrap();

        assert!(approx_eq!(f64, closed, 50.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, open, closed, epsilon = 1e-9));

        // each subpath gets its own closing edge
        let two = get_path_area("M10 0L20 0L20 10M0 0L0 10L10 10").unwrap();
        assert!(approx_eq!(f64, two, 0.0, epsilon = 1e-9));

        assert!(get_draw_direction("M10 0L20 0L20 10").unwrap());
        assert!(!get_draw_direction("M20 10L20 0L10 0").unwrap());
    }

    #[test]
    fn circle_area() {
        let area = get_path_area("M0 50A50 50 0 1 1 100 50A50 50 0 1 1 0 50Z").unwrap();
        let expected = std::f64::consts::PI * 2500.0;

        assert!((area.abs() - expected).abs() / expected < 1e-3);
    }

    #[test]
    fn polygons() {
        let square = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];

        assert_eq!(polygon_area(&square), 100.0);
        assert_eq!(polygon_length(&square), 40.0);

        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(polygon_length(&[]), 0.0);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(get_total_length(""), Err(PathError::EmptyPath)));
        assert!(matches!(get_path_bbox("L0 0"), Err(PathError::Grammar(_))));
    }
}
