//! Applying 2D and 3D transforms to whole paths.
//!
//! A [`TransformSpec`] describes the transform the way it is usually written
//! down: a translation, a rotation, a skew and a scale around an origin.
//! [`get_svg_matrix`] turns it into a [`Matrix`], and [`transform_path`]
//! projects every point of a path through that matrix back onto the plane.

use crate::arc::EllipticalArc;
use crate::bbox::BoundingBox;
use crate::convert::{absolute_path, Cursor};
use crate::error::PathError;
use crate::measure::PathWalk;
use crate::path_builder::{PathArray, PathInput, Segment};
use crate::path_parser::parse_path_string;
use crate::svgpath_log;
use crate::transform::Matrix;

/// One component of a [`TransformSpec`]: a single number, or values per axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TransformValue {
    Scalar(f64),
    Xy(f64, f64),
    Xyz(f64, f64, f64),
}

impl TransformValue {
    /// The per-axis values, filling in `z` when it is missing.
    ///
    /// A scalar only sets the first axis; callers that give scalars a
    /// different meaning match on it themselves.
    fn xyz(self, z_default: f64) -> (f64, f64, f64) {
        match self {
            TransformValue::Scalar(v) => (v, 0.0, z_default),
            TransformValue::Xy(x, y) => (x, y, z_default),
            TransformValue::Xyz(x, y, z) => (x, y, z),
        }
    }
}

impl From<f64> for TransformValue {
    fn from(v: f64) -> TransformValue {
        TransformValue::Scalar(v)
    }
}

impl From<[f64; 2]> for TransformValue {
    fn from([x, y]: [f64; 2]) -> TransformValue {
        TransformValue::Xy(x, y)
    }
}

impl From<[f64; 3]> for TransformValue {
    fn from([x, y, z]: [f64; 3]) -> TransformValue {
        TransformValue::Xyz(x, y, z)
    }
}

/// A transform to apply to a path.
///
/// Angles are in degrees.  The scalar forms mean:
///
/// * `translate: t` is `(t, 0, 0)`;
/// * `rotate: r` is a rotation of `r` around the Z axis;
/// * `skew: s` is a skew of `s` along X;
/// * `scale: s` is `(s, s, 1)`.
///
/// Rotation, skew and scale happen around `origin`, which is also the point
/// of view for perspective.  [`transform_path`] uses the center of the
/// bounding box of the path when it is unset, and its depth estimate
/// [`BoundingBox::cz`] when `z` is zero; [`get_svg_matrix`] uses `(0, 0)`.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct TransformSpec {
    pub translate: Option<TransformValue>,
    pub rotate: Option<TransformValue>,
    pub skew: Option<TransformValue>,
    pub scale: Option<TransformValue>,
    pub origin: Option<[f64; 3]>,
}

impl TransformSpec {
    pub fn new() -> TransformSpec {
        Default::default()
    }

    pub fn with_translate<T: Into<TransformValue>>(self, translate: T) -> TransformSpec {
        TransformSpec {
            translate: Some(translate.into()),
            ..self
        }
    }

    pub fn with_rotate<T: Into<TransformValue>>(self, rotate: T) -> TransformSpec {
        TransformSpec {
            rotate: Some(rotate.into()),
            ..self
        }
    }

    pub fn with_skew<T: Into<TransformValue>>(self, skew: T) -> TransformSpec {
        TransformSpec {
            skew: Some(skew.into()),
            ..self
        }
    }

    pub fn with_scale<T: Into<TransformValue>>(self, scale: T) -> TransformSpec {
        TransformSpec {
            scale: Some(scale.into()),
            ..self
        }
    }

    pub fn with_origin(self, origin: [f64; 3]) -> TransformSpec {
        TransformSpec {
            origin: Some(origin),
            ..self
        }
    }
}

/// Builds the matrix for `spec`.
///
/// The result is `translate · T(origin) · rotate · skew · scale · T(-origin)`;
/// the translations to and from the origin are only added when there is a
/// rotation, skew or scale.
pub fn get_svg_matrix(spec: &TransformSpec) -> Matrix {
    let [ox, oy, _] = spec.origin.unwrap_or_default();

    let mut matrix = Matrix::identity();

    if let Some(translate) = spec.translate {
        let (x, y, z) = translate.xyz(0.0);
        matrix = matrix.translate(x, y, z);
    }

    let around_origin = spec.rotate.is_some() || spec.skew.is_some() || spec.scale.is_some();

    if around_origin {
        matrix = matrix.translate(ox, oy, 0.0);
    }

    if let Some(rotate) = spec.rotate {
        matrix = match rotate {
            TransformValue::Scalar(angle) => matrix.rotate_z(angle),
            v => {
                let (rx, ry, rz) = v.xyz(0.0);
                matrix.rotate(rx, ry, rz)
            }
        };
    }

    if let Some(skew) = spec.skew {
        matrix = match skew {
            TransformValue::Scalar(angle) => matrix.skew_x(angle),
            TransformValue::Xy(ax, ay) | TransformValue::Xyz(ax, ay, _) => {
                matrix.skew_x(ax).skew_y(ay)
            }
        };
    }

    if let Some(scale) = spec.scale {
        matrix = match scale {
            TransformValue::Scalar(s) => matrix.scale(s, s, 1.0),
            v => {
                let (sx, sy, sz) = v.xyz(1.0);
                matrix.scale(sx, sy, sz)
            }
        };
    }

    if around_origin {
        matrix = matrix.translate(-ox, -oy, 0.0);
    }

    matrix
}

/// Projects a point of the plane through `matrix` and back onto the plane.
///
/// The point is transformed as `(x, y, 0, 1)`, divided by `w`, and then its
/// offset from the origin is scaled by `|oz| / |z - oz|`, as if seen from
/// `origin`.  When that factor is zero or not finite the offset is left alone.
pub fn projection_2d(matrix: &Matrix, point: (f64, f64), origin: [f64; 3]) -> (f64, f64) {
    let [mut x, mut y, mut z, w] = matrix.transform_point(point.0, point.1, 0.0, 1.0);

    if w != 0.0 && w != 1.0 {
        x /= w;
        y /= w;
        z /= w;
    }

    let [ox, oy, oz] = origin;

    let factor = oz.abs() / (z - oz).abs();

    if !factor.is_finite() || factor == 0.0 || factor == 1.0 {
        return (x, y);
    }

    (ox + (x - ox) * factor, oy + (y - oy) * factor)
}

/// Applies `spec` to a path.
///
/// The result is absolute.  Arcs become cubic curves, since they cannot be
/// projected exactly; horizontal and vertical lines stay that way only if the
/// transform keeps them axis-aligned.
pub fn transform_path<'a, I: Into<PathInput<'a>>>(
    input: I,
    spec: &TransformSpec,
) -> Result<PathArray, PathError> {
    let path = parse_path_string(input)?;
    Ok(transformed_path(&path, spec))
}

/// Transforms an already-validated path.
pub(crate) fn transformed_path(path: &[Segment], spec: &TransformSpec) -> PathArray {
    let absolute = absolute_path(path);

    let origin = resolve_origin(spec.origin, &PathWalk::new(&absolute).bbox());
    let spec = TransformSpec {
        origin: Some(origin),
        ..*spec
    };

    let matrix = get_svg_matrix(&spec);

    if matrix.is_identity() {
        svgpath_log!("transform is the identity, leaving path alone");
        return absolute;
    }

    project_path(&absolute, &matrix, origin)
}

/// Fills in the transform origin from the bounding box of the path.
///
/// A missing origin is the center of `bbox` at depth `bbox.cz`; a zero depth
/// is replaced by `bbox.cz`.
pub(crate) fn resolve_origin(origin: Option<[f64; 3]>, bbox: &BoundingBox) -> [f64; 3] {
    match origin {
        None => [bbox.cx, bbox.cy, bbox.cz],
        Some([x, y, z]) if z == 0.0 => [x, y, bbox.cz],
        Some(origin) => origin,
    }
}

/// Projects an absolute path.
fn project_path(path: &[Segment], matrix: &Matrix, origin: [f64; 3]) -> PathArray {
    let project = |x: f64, y: f64| projection_2d(matrix, (x, y), origin);

    let mut result = PathArray::new();
    let mut cursor = Cursor::default();

    // projected current point and subpath start
    let mut last = (0.0, 0.0);
    let mut start = (0.0, 0.0);

    for seg in path {
        let p = &seg.params;

        match seg.command {
            'A' => {
                let curves = EllipticalArc::from_params(cursor.point(), p)
                    .map(|arc| arc.to_cubics())
                    .unwrap_or_default();

                for curve in curves {
                    let c1 = project(curve.pt1.0, curve.pt1.1);
                    let c2 = project(curve.pt2.0, curve.pt2.1);
                    let to = project(curve.to.0, curve.to.1);

                    result.push(Segment::new('C', &[c1.0, c1.1, c2.0, c2.1, to.0, to.1]));
                    last = to;
                }
            }

            'H' => {
                let to = project(p[0], cursor.y);

                if to.1 == last.1 {
                    result.push(Segment::new('H', &[to.0]));
                } else {
                    result.push(Segment::new('L', &[to.0, to.1]));
                }

                last = to;
            }

            'V' => {
                let to = project(cursor.x, p[0]);

                if to.0 == last.0 {
                    result.push(Segment::new('V', &[to.1]));
                } else {
                    result.push(Segment::new('L', &[to.0, to.1]));
                }

                last = to;
            }

            'Z' => {
                result.push(seg.clone());
                last = start;
            }

            command => {
                let projected: Vec<f64> = p
                    .chunks(2)
                    .flat_map(|pair| {
                        let (x, y) = project(pair[0], pair[1]);
                        [x, y]
                    })
                    .collect();

                let to = (projected[projected.len() - 2], projected[projected.len() - 1]);

                if command == 'M' {
                    start = to;
                }

                result.push(Segment::new(command, &projected));
                last = to;
            }
        }

        cursor.advance(seg);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Round;
    use crate::path_builder::path_to_string;
    use float_cmp::approx_eq;

    fn transformed(path: &str, spec: &TransformSpec) -> String {
        path_to_string(&transform_path(path, spec).unwrap(), Round::Decimals(4))
    }

    #[test]
    fn matrix_of_empty_spec_is_identity() {
        assert!(get_svg_matrix(&TransformSpec::new()).is_identity());
    }

    #[test]
    fn matrix_of_scalar_forms() {
        let spec = TransformSpec::new().with_translate(10.0);
        assert_eq!(get_svg_matrix(&spec).to_2d(), [1.0, 0.0, 0.0, 1.0, 10.0, 0.0]);

        let spec = TransformSpec::new().with_scale(2.0);
        let m = get_svg_matrix(&spec);
        assert_eq!(m.to_2d(), [2.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
        assert!(m.is_2d());

        let spec = TransformSpec::new().with_skew(45.0);
        let [a, b, c, d, e, f] = get_svg_matrix(&spec).to_2d();
        assert_eq!((a, b, d, e, f), (1.0, 0.0, 1.0, 0.0, 0.0));
        assert!(approx_eq!(f64, c, 1.0, epsilon = 1e-12));
    }

    #[test]
    fn matrix_pivots_around_origin() {
        let spec = TransformSpec::new()
            .with_scale(2.0)
            .with_origin([5.0, 5.0, 0.0]);

        assert_eq!(get_svg_matrix(&spec).to_2d(), [2.0, 0.0, 0.0, 2.0, -5.0, -5.0]);

        // translations alone ignore the origin
        let spec = TransformSpec::new()
            .with_translate([1.0, 2.0])
            .with_origin([5.0, 5.0, 0.0]);

        assert_eq!(get_svg_matrix(&spec).to_2d(), [1.0, 0.0, 0.0, 1.0, 1.0, 2.0]);
    }

    #[test]
    fn vector_rotation_is_3d() {
        let spec = TransformSpec::new().with_rotate([0.0, 45.0]);
        assert!(!get_svg_matrix(&spec).is_2d());
    }

    #[test]
    fn projects_with_depth() {
        let m = Matrix::new_translate(0.0, 0.0, 50.0);
        assert_eq!(projection_2d(&m, (10.0, 10.0), [0.0, 0.0, 100.0]), (20.0, 20.0));

        // no origin depth means no perspective
        assert_eq!(projection_2d(&m, (10.0, 10.0), [0.0, 0.0, 0.0]), (10.0, 10.0));
    }

    #[test]
    fn scales_line() {
        let spec = TransformSpec::new()
            .with_scale(2.0)
            .with_origin([0.0, 0.0, 0.0]);

        assert_eq!(transformed("M0 0L10 0", &spec), "M0,0L20,0");
    }

    #[test]
    fn identity_gives_absolute_copy() {
        assert_eq!(transformed("M0 0l10 0", &TransformSpec::new()), "M0,0L10,0");
    }

    #[test]
    fn keeps_axis_aligned_lines() {
        let spec = TransformSpec::new().with_translate([5.0, 5.0]);
        assert_eq!(transformed("M0 0H10V10", &spec), "M5,5H15V15");

        let spec = TransformSpec::new()
            .with_rotate(90.0)
            .with_origin([0.0, 0.0, 0.0]);
        assert_eq!(transformed("M0 0H10V10", &spec), "M0,0L0,10L-10,10");
    }

    #[test]
    fn pivots_around_bbox_center_by_default() {
        let spec = TransformSpec::new().with_rotate(90.0);
        assert_eq!(transformed("M0 0H10V10", &spec), "M10,0L10,10L0,10");
    }

    #[test]
    fn resolves_origin() {
        let bbox = BoundingBox::from_extents(0.0, 0.0, 10.0, 20.0);

        assert_eq!(resolve_origin(None, &bbox), [5.0, 10.0, 25.0]);
        assert_eq!(resolve_origin(Some([1.0, 2.0, 0.0]), &bbox), [1.0, 2.0, 25.0]);
        assert_eq!(resolve_origin(Some([1.0, 2.0, 3.0]), &bbox), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn keeps_shorthand_curves() {
        let spec = TransformSpec::new().with_translate(1.0);
        assert_eq!(
            transformed("M0 0Q5 5 10 0T20 0S25 5 30 0Z", &spec),
            "M1,0Q6,5,11,0T21,0S26,5,31,0Z"
        );
    }

    #[test]
    fn arcs_become_curves() {
        let spec = TransformSpec::new().with_translate(5.0);
        let path = transform_path("M0 0A10 10 0 0 1 20 0", &spec).unwrap();

        assert_eq!(path[0], Segment::new('M', &[5.0, 0.0]));
        assert!(path.iter().skip(1).all(|s| s.command == 'C'));

        let last = path.last().unwrap();
        assert!(approx_eq!(f64, last.params[4], 25.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, last.params[5], 0.0, epsilon = 1e-9));
    }
}
