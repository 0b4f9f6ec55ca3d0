//! Handling of 4×4 homogeneous transform matrices.
//!
//! This module contains the following:
//!
//! * [`Matrix`], a 3D transform stored as a `nalgebra::Matrix4<f64>`, with the
//!   operations of the CSS Transforms Level 2 `DOMMatrix` interface.
//!
//! * Parsing of [transform function lists][funcs] like
//!   `translate(10px, 20px) rotate3d(0, 0, 1, 45deg)` into a `Matrix`.
//!
//! Coefficients are named like in CSS: `mIJ` is row `I` of the row-vector
//! convention, so `matrix3d()` lists them column by column for our column
//! vectors, and the 2D view is `a = m11`, `b = m12`, `c = m21`, `d = m22`,
//! `e = m41`, `f = m42`.
//!
//! [funcs]: https://www.w3.org/TR/css-transforms-2/#transform-functions

use std::fmt;

use cssparser::{Parser, Token};
use itertools::Itertools;
use nalgebra::{Matrix4, Vector4};

use crate::angle::Angle;
use crate::error::*;
use crate::parsers::{optional_comma, Parse};
use crate::util::format_number;

/// A 3D transformation matrix.
///
/// `multiply(a, b)` yields the transform that applies `b` first and then `a`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix(Matrix4<f64>);

/// Names of the sixteen coefficients in `matrix3d()` order.
const COEFFICIENT_NAMES: [&str; 16] = [
    "m11", "m12", "m13", "m14", "m21", "m22", "m23", "m24", "m31", "m32", "m33", "m34", "m41",
    "m42", "m43", "m44",
];

/// The ways in which a caller can describe a matrix.
#[derive(Debug, Copy, Clone)]
pub enum MatrixSource<'a> {
    /// A transform function list like `"translate(10px) scale(2)"`.
    Transform(&'a str),
    /// Six 2D coefficients `a..f` or sixteen 3D coefficients in `matrix3d()` order.
    Coefficients(&'a [f64]),
    /// Named coefficients `m11` through `m44`.
    Named(&'a [(&'a str, f64)]),
}

impl<'a> From<&'a str> for MatrixSource<'a> {
    fn from(s: &'a str) -> MatrixSource<'a> {
        MatrixSource::Transform(s)
    }
}

impl<'a> From<&'a [f64]> for MatrixSource<'a> {
    fn from(s: &'a [f64]) -> MatrixSource<'a> {
        MatrixSource::Coefficients(s)
    }
}

impl<'a> From<&'a [(&'a str, f64)]> for MatrixSource<'a> {
    fn from(s: &'a [(&'a str, f64)]) -> MatrixSource<'a> {
        MatrixSource::Named(s)
    }
}

impl Matrix {
    #[inline]
    pub fn identity() -> Self {
        Matrix(Matrix4::identity())
    }

    /// Creates a 2D matrix out of its `a, b, c, d, e, f` coefficients.
    pub fn new_2d(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 0)] = a;
        m[(1, 0)] = b;
        m[(0, 1)] = c;
        m[(1, 1)] = d;
        m[(0, 3)] = e;
        m[(1, 3)] = f;
        Matrix(m)
    }

    /// Creates a matrix out of sixteen coefficients in `matrix3d()` order.
    pub fn new_3d(m: &[f64; 16]) -> Self {
        Matrix(Matrix4::from_column_slice(m))
    }

    pub fn from_source(source: MatrixSource<'_>) -> Result<Matrix, MatrixError> {
        match source {
            MatrixSource::Transform(s) => Matrix::parse_transform_list(s),
            MatrixSource::Coefficients(c) => Matrix::from_coefficients(c),
            MatrixSource::Named(n) => Matrix::from_named(n),
        }
    }

    /// Parses a transform function list, composing the functions from left to right.
    ///
    /// An empty string or `none` yield the identity.
    pub fn parse_transform_list(s: &str) -> Result<Matrix, MatrixError> {
        <Matrix as Parse>::parse_str(s).map_err(|e| MatrixError::from_parse_error(s, e))
    }

    /// Creates a matrix from 6 or 16 finite coefficients.
    pub fn from_coefficients(coefficients: &[f64]) -> Result<Matrix, MatrixError> {
        if let Some((index, &value)) = coefficients.iter().find_position(|v| !v.is_finite()) {
            return Err(MatrixError::NonFinite { index, value });
        }

        match *coefficients {
            [a, b, c, d, e, f] => Ok(Matrix::new_2d(a, b, c, d, e, f)),
            _ if coefficients.len() == 16 => Ok(Matrix(Matrix4::from_column_slice(coefficients))),
            _ => Err(MatrixError::InvalidLength(coefficients.len())),
        }
    }

    /// Creates a matrix from the sixteen named coefficients `m11` through `m44`.
    pub fn from_named(named: &[(&str, f64)]) -> Result<Matrix, MatrixError> {
        if let Some((name, _)) = named
            .iter()
            .find(|(name, _)| !COEFFICIENT_NAMES.contains(name))
        {
            return Err(MatrixError::UnknownCoefficient(name.to_string()));
        }

        let mut values = [0.0; 16];

        for (slot, name) in values.iter_mut().zip(COEFFICIENT_NAMES.iter()) {
            let value = named
                .iter()
                .rev()
                .find(|(n, _)| n == name)
                .map(|&(_, v)| v)
                .ok_or_else(|| MatrixError::MissingCoefficient(name.to_string()))?;

            if !value.is_finite() {
                return Err(MatrixError::NonFiniteCoefficient {
                    name: name.to_string(),
                    value,
                });
            }

            *slot = value;
        }

        Ok(Matrix::new_3d(&values))
    }

    #[inline]
    pub fn new_translate(tx: f64, ty: f64, tz: f64) -> Self {
        Matrix(Matrix4::new_translation(&nalgebra::Vector3::new(tx, ty, tz)))
    }

    #[inline]
    pub fn new_scale(sx: f64, sy: f64, sz: f64) -> Self {
        Matrix(Matrix4::new_nonuniform_scaling(&nalgebra::Vector3::new(
            sx, sy, sz,
        )))
    }

    /// Rotation by the given angles in degrees around the X, Y and Z axes.
    ///
    /// A positive angle around Z turns the X axis towards the Y axis, which is
    /// clockwise on screen.
    pub fn new_rotate(rx: f64, ry: f64, rz: f64) -> Self {
        let (sinx, cosx) = Angle::from_degrees(rx).radians().sin_cos();
        let (siny, cosy) = Angle::from_degrees(ry).radians().sin_cos();
        let (sinz, cosz) = Angle::from_degrees(rz).radians().sin_cos();

        let (sinx, siny, sinz) = (-sinx, -siny, -sinz);

        let m11 = cosy * cosz;
        let m12 = -cosy * sinz;
        let m13 = siny;
        let m21 = sinx * siny * cosz + cosx * sinz;
        let m22 = cosx * cosz - sinx * siny * sinz;
        let m23 = -sinx * cosy;
        let m31 = sinx * sinz - cosx * siny * cosz;
        let m32 = sinx * cosz + cosx * siny * sinz;
        let m33 = cosx * cosy;

        Matrix::new_3d(&[
            m11, m12, m13, 0.0, m21, m22, m23, 0.0, m31, m32, m33, 0.0, 0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation by `angle` degrees around the vector `(x, y, z)`.
    ///
    /// A zero vector rotates around the Z axis.
    pub fn new_rotate_axis_angle(x: f64, y: f64, z: f64, angle: f64) -> Self {
        let (sin_a, cos_a) = (angle * std::f64::consts::PI / 360.0).sin_cos();
        let sin_a2 = sin_a * sin_a;

        let length = (x * x + y * y + z * z).sqrt();
        let (x, y, z) = if length == 0.0 {
            (0.0, 0.0, 1.0)
        } else {
            (x / length, y / length, z / length)
        };

        let (x2, y2, z2) = (x * x, y * y, z * z);

        let m11 = 1.0 - 2.0 * (y2 + z2) * sin_a2;
        let m12 = 2.0 * (x * y * sin_a2 + z * sin_a * cos_a);
        let m13 = 2.0 * (x * z * sin_a2 - y * sin_a * cos_a);
        let m21 = 2.0 * (y * x * sin_a2 - z * sin_a * cos_a);
        let m22 = 1.0 - 2.0 * (z2 + x2) * sin_a2;
        let m23 = 2.0 * (y * z * sin_a2 + x * sin_a * cos_a);
        let m31 = 2.0 * (z * x * sin_a2 + y * sin_a * cos_a);
        let m32 = 2.0 * (z * y * sin_a2 - x * sin_a * cos_a);
        let m33 = 1.0 - 2.0 * (x2 + y2) * sin_a2;

        Matrix::new_3d(&[
            m11, m12, m13, 0.0, m21, m22, m23, 0.0, m31, m32, m33, 0.0, 0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Skew along X by `angle` degrees.
    pub fn new_skew_x(angle: f64) -> Self {
        let t = Angle::from_degrees(angle).radians().tan();
        Matrix::new_2d(1.0, 0.0, t, 1.0, 0.0, 0.0)
    }

    /// Skew along Y by `angle` degrees.
    pub fn new_skew_y(angle: f64) -> Self {
        let t = Angle::from_degrees(angle).radians().tan();
        Matrix::new_2d(1.0, t, 0.0, 1.0, 0.0, 0.0)
    }

    /// The `skew(ax, ay)` transform function, with both angles in degrees.
    pub fn new_skew(ax: f64, ay: f64) -> Self {
        Matrix::new_2d(
            1.0,
            Angle::from_degrees(ay).radians().tan(),
            Angle::from_degrees(ax).radians().tan(),
            1.0,
            0.0,
            0.0,
        )
    }

    /// Perspective projection with the viewer at distance `d` from the z=0 plane.
    pub fn new_perspective(d: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(3, 2)] = -1.0 / d;
        Matrix(m)
    }

    #[must_use]
    pub fn multiply(m1: &Matrix, m2: &Matrix) -> Self {
        Matrix(m1.0 * m2.0)
    }

    /// Returns `self · t`, that is, `t` applied before `self`.
    #[inline]
    #[must_use]
    pub fn post_transform(&self, t: &Matrix) -> Self {
        Self::multiply(self, t)
    }

    /// Returns `t · self`, that is, `t` applied after `self`.
    #[inline]
    #[must_use]
    pub fn pre_transform(&self, t: &Matrix) -> Self {
        Self::multiply(t, self)
    }

    #[inline]
    #[must_use]
    pub fn translate(&self, tx: f64, ty: f64, tz: f64) -> Self {
        self.post_transform(&Matrix::new_translate(tx, ty, tz))
    }

    #[inline]
    #[must_use]
    pub fn scale(&self, sx: f64, sy: f64, sz: f64) -> Self {
        self.post_transform(&Matrix::new_scale(sx, sy, sz))
    }

    #[inline]
    #[must_use]
    pub fn rotate(&self, rx: f64, ry: f64, rz: f64) -> Self {
        self.post_transform(&Matrix::new_rotate(rx, ry, rz))
    }

    /// Rotation around the Z axis only, like the `rotate()` transform function.
    #[inline]
    #[must_use]
    pub fn rotate_z(&self, angle: f64) -> Self {
        self.rotate(0.0, 0.0, angle)
    }

    #[inline]
    #[must_use]
    pub fn rotate_axis_angle(&self, x: f64, y: f64, z: f64, angle: f64) -> Self {
        self.post_transform(&Matrix::new_rotate_axis_angle(x, y, z, angle))
    }

    #[inline]
    #[must_use]
    pub fn skew_x(&self, angle: f64) -> Self {
        self.post_transform(&Matrix::new_skew_x(angle))
    }

    #[inline]
    #[must_use]
    pub fn skew_y(&self, angle: f64) -> Self {
        self.post_transform(&Matrix::new_skew_y(angle))
    }

    #[inline]
    #[must_use]
    pub fn skew(&self, ax: f64, ay: f64) -> Self {
        self.post_transform(&Matrix::new_skew(ax, ay))
    }

    #[inline]
    #[must_use]
    pub fn perspective(&self, d: f64) -> Self {
        self.post_transform(&Matrix::new_perspective(d))
    }

    /// Coefficient `mIJ`, with `i` and `j` in `1..=4`.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is out of range.
    pub fn m(&self, i: usize, j: usize) -> f64 {
        self.0[(j - 1, i - 1)]
    }

    /// The 2D coefficients `[a, b, c, d, e, f]`.
    pub fn to_2d(&self) -> [f64; 6] {
        [
            self.0[(0, 0)],
            self.0[(1, 0)],
            self.0[(0, 1)],
            self.0[(1, 1)],
            self.0[(0, 3)],
            self.0[(1, 3)],
        ]
    }

    /// The sixteen coefficients in `matrix3d()` order.
    pub fn to_3d(&self) -> [f64; 16] {
        let mut out = [0.0; 16];
        out.copy_from_slice(self.0.as_slice());
        out
    }

    /// The 2D coefficients if the matrix is 2D, or all sixteen otherwise.
    pub fn to_array(&self) -> Vec<f64> {
        if self.is_2d() {
            self.to_2d().to_vec()
        } else {
            self.to_3d().to_vec()
        }
    }

    /// Whether the matrix only acts on the XY plane.
    pub fn is_2d(&self) -> bool {
        [(1, 3), (1, 4), (2, 3), (2, 4), (3, 1), (3, 2), (3, 4), (4, 3)]
            .iter()
            .all(|&(i, j)| self.m(i, j) == 0.0)
            && self.m(3, 3) == 1.0
            && self.m(4, 4) == 1.0
    }

    pub fn is_identity(&self) -> bool {
        self.0 == Matrix4::identity()
    }

    /// Applies the matrix to the homogeneous point `(x, y, z, w)`.
    pub fn transform_point(&self, x: f64, y: f64, z: f64, w: f64) -> [f64; 4] {
        let v = self.0 * Vector4::new(x, y, z, w);
        [v.x, v.y, v.z, v.w]
    }
}

impl Default for Matrix {
    #[inline]
    fn default() -> Matrix {
        Matrix::identity()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.is_2d() { "matrix" } else { "matrix3d" };

        write!(
            f,
            "{name}({})",
            self.to_array().into_iter().map(format_number).join(", ")
        )
    }
}

impl Parse for Matrix {
    fn parse<'i>(parser: &mut Parser<'i, '_>) -> Result<Matrix, ParseError<'i>> {
        if parser
            .try_parse(|p| p.expect_ident_matching("none"))
            .is_ok()
        {
            return Ok(Matrix::identity());
        }

        parse_transform_list(parser)
    }
}

fn parse_transform_list<'i>(parser: &mut Parser<'i, '_>) -> Result<Matrix, ParseError<'i>> {
    let mut m = Matrix::identity();

    loop {
        if parser.is_exhausted() {
            break;
        }

        m = m.post_transform(&parse_transform_command(parser)?);
        optional_comma(parser);
    }

    Ok(m)
}

fn parse_transform_command<'i>(parser: &mut Parser<'i, '_>) -> Result<Matrix, ParseError<'i>> {
    let loc = parser.current_source_location();

    match parser.next()?.clone() {
        Token::Function(ref name) => parse_transform_function(name, parser),

        tok => Err(loc.new_unexpected_token_error(tok.clone())),
    }
}

fn parse_transform_function<'i>(
    name: &str,
    parser: &mut Parser<'i, '_>,
) -> Result<Matrix, ParseError<'i>> {
    let loc = parser.current_source_location();

    parser.parse_nested_block(|p| match name {
        "matrix" => parse_matrix_args(p),
        "matrix3d" => parse_matrix3d_args(p),
        "translate" => parse_translate_args(p),
        "translate3d" => {
            let [x, y, z] = parse_lengths::<3>(p)?;
            Ok(Matrix::new_translate(x, y, z))
        }
        "translateX" => Ok(Matrix::new_translate(parse_length(p)?, 0.0, 0.0)),
        "translateY" => Ok(Matrix::new_translate(0.0, parse_length(p)?, 0.0)),
        "translateZ" => Ok(Matrix::new_translate(0.0, 0.0, parse_length(p)?)),
        "rotate" | "rotateZ" => Ok(Matrix::new_rotate(0.0, 0.0, Angle::parse(p)?.degrees())),
        "rotateX" => Ok(Matrix::new_rotate(Angle::parse(p)?.degrees(), 0.0, 0.0)),
        "rotateY" => Ok(Matrix::new_rotate(0.0, Angle::parse(p)?.degrees(), 0.0)),
        "rotate3d" => parse_rotate3d_args(p),
        "scale" => parse_scale_args(p),
        "scale3d" => {
            let [x, y, z] = parse_numbers::<3>(p)?;
            Ok(Matrix::new_scale(x, y, z))
        }
        "scaleX" => Ok(Matrix::new_scale(f64::parse(p)?, 1.0, 1.0)),
        "scaleY" => Ok(Matrix::new_scale(1.0, f64::parse(p)?, 1.0)),
        "scaleZ" => Ok(Matrix::new_scale(1.0, 1.0, f64::parse(p)?)),
        "skew" => parse_skew_args(p),
        "skewX" => Ok(Matrix::new_skew_x(Angle::parse(p)?.degrees())),
        "skewY" => Ok(Matrix::new_skew_y(Angle::parse(p)?.degrees())),
        "perspective" => Ok(Matrix::new_perspective(parse_length(p)?)),
        _ => Err(loc.new_custom_error(ValueErrorKind::parse_error(
            "expected matrix|matrix3d|translate|translate3d|translateX|translateY|translateZ|\
             rotate|rotate3d|rotateX|rotateY|rotateZ|scale|scale3d|scaleX|scaleY|scaleZ|\
             skew|skewX|skewY|perspective",
        ))),
    })
}

/// Coefficients this close to zero are flushed to zero.
fn flush_to_zero(v: f64) -> f64 {
    if v.abs() < 1e-6 {
        0.0
    } else {
        v
    }
}

/// A length is a plain number or a number in `px`.
fn parse_length<'i>(parser: &mut Parser<'i, '_>) -> Result<f64, ParseError<'i>> {
    let loc = parser.current_source_location();

    match *parser.next()? {
        Token::Number { value, .. } if value.is_finite() => Ok(f64::from(value)),

        Token::Dimension {
            value, ref unit, ..
        } if value.is_finite() && unit.eq_ignore_ascii_case("px") => Ok(f64::from(value)),

        ref tok => Err(loc.new_unexpected_token_error(tok.clone())),
    }
}

fn parse_lengths<'i, const N: usize>(
    parser: &mut Parser<'i, '_>,
) -> Result<[f64; N], ParseError<'i>> {
    let mut v = [0.0; N];

    for (i, slot) in v.iter_mut().enumerate() {
        if i != 0 {
            optional_comma(parser);
        }

        *slot = parse_length(parser)?;
    }

    Ok(v)
}

fn parse_numbers<'i, const N: usize>(
    parser: &mut Parser<'i, '_>,
) -> Result<[f64; N], ParseError<'i>> {
    let mut v = [0.0; N];

    for (i, slot) in v.iter_mut().enumerate() {
        if i != 0 {
            optional_comma(parser);
        }

        *slot = f64::parse(parser)?;
    }

    Ok(v)
}

fn parse_matrix_args<'i>(parser: &mut Parser<'i, '_>) -> Result<Matrix, ParseError<'i>> {
    let [a, b, c, d, e, f] = parse_numbers::<6>(parser)?.map(flush_to_zero);

    Ok(Matrix::new_2d(a, b, c, d, e, f))
}

fn parse_matrix3d_args<'i>(parser: &mut Parser<'i, '_>) -> Result<Matrix, ParseError<'i>> {
    let m = parse_numbers::<16>(parser)?;

    Ok(Matrix::new_3d(&m.map(flush_to_zero)))
}

fn parse_translate_args<'i>(parser: &mut Parser<'i, '_>) -> Result<Matrix, ParseError<'i>> {
    let tx = parse_length(parser)?;

    let ty = parser
        .try_parse(|p| {
            optional_comma(p);
            parse_length(p)
        })
        .unwrap_or(0.0);

    Ok(Matrix::new_translate(tx, ty, 0.0))
}

fn parse_scale_args<'i>(parser: &mut Parser<'i, '_>) -> Result<Matrix, ParseError<'i>> {
    let x = f64::parse(parser)?;

    let y = parser
        .try_parse(|p| {
            optional_comma(p);
            f64::parse(p)
        })
        .unwrap_or(x);

    Ok(Matrix::new_scale(x, y, 1.0))
}

fn parse_rotate3d_args<'i>(parser: &mut Parser<'i, '_>) -> Result<Matrix, ParseError<'i>> {
    let [x, y, z] = parse_numbers::<3>(parser)?;
    optional_comma(parser);
    let angle = Angle::parse(parser)?;

    Ok(Matrix::new_rotate_axis_angle(x, y, z, angle.degrees()))
}

fn parse_skew_args<'i>(parser: &mut Parser<'i, '_>) -> Result<Matrix, ParseError<'i>> {
    let ax = Angle::parse(parser)?;

    let ay = parser
        .try_parse(|p| {
            optional_comma(p);
            Angle::parse(p)
        })
        .unwrap_or_else(|_| Angle::new(0.0));

    Ok(Matrix::new_skew(ax.degrees(), ay.degrees()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::ApproxEq;

    fn assert_matrix_eq(m1: &Matrix, m2: &Matrix) {
        let epsilon = 8.0 * f64::EPSILON; // kind of arbitrary, but allow for some sloppiness

        for (a, b) in m1.to_3d().iter().zip(m2.to_3d().iter()) {
            assert!(a.approx_eq(*b, (epsilon, 1)), "{m1} != {m2}");
        }
    }

    fn parse(s: &str) -> Result<Matrix, MatrixError> {
        Matrix::parse_transform_list(s)
    }

    #[test]
    fn parses_valid_transform_lists() {
        assert_eq!(
            parse("matrix(1 2 3 4 5 6)").unwrap(),
            Matrix::new_2d(1.0, 2.0, 3.0, 4.0, 5.0, 6.0)
        );

        assert_eq!(
            parse("translate(10px, 20px)").unwrap(),
            Matrix::new_translate(10.0, 20.0, 0.0)
        );

        assert_eq!(
            parse("translate(10)").unwrap(),
            Matrix::new_translate(10.0, 0.0, 0.0)
        );

        assert_eq!(
            parse("translate3d(1, 2, 3)").unwrap(),
            Matrix::new_translate(1.0, 2.0, 3.0)
        );

        assert_eq!(parse("scale(2)").unwrap(), Matrix::new_scale(2.0, 2.0, 1.0));
        assert_eq!(parse("scaleY(3)").unwrap(), Matrix::new_scale(1.0, 3.0, 1.0));

        assert_eq!(parse("").unwrap(), Matrix::identity());
        assert_eq!(parse("none").unwrap(), Matrix::identity());
    }

    #[test]
    fn composes_left_to_right() {
        let m = parse("translate(10px) scale(2)").unwrap();

        assert_matrix_eq(
            &m,
            &Matrix::new_translate(10.0, 0.0, 0.0).scale(2.0, 2.0, 1.0),
        );

        // the scale applies first
        assert_eq!(m.transform_point(1.0, 1.0, 0.0, 1.0), [12.0, 2.0, 0.0, 1.0]);
    }

    #[test]
    fn parses_angles_in_all_units() {
        assert_matrix_eq(&parse("rotate(90deg)").unwrap(), &Matrix::new_rotate(0.0, 0.0, 90.0));
        assert_matrix_eq(&parse("rotate(0.25turn)").unwrap(), &Matrix::new_rotate(0.0, 0.0, 90.0));
        assert_matrix_eq(&parse("rotate(100grad)").unwrap(), &Matrix::new_rotate(0.0, 0.0, 90.0));
        assert_matrix_eq(&parse("skewX(45)").unwrap(), &Matrix::new_skew_x(45.0));
    }

    #[test]
    fn rotation_turns_x_towards_y() {
        let m = Matrix::identity().rotate_z(90.0);
        let [x, y, _, _] = m.transform_point(1.0, 0.0, 0.0, 1.0);

        assert!(x.abs() < 1e-12);
        assert!((y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn axis_angle_agrees_with_euler_rotation() {
        assert_matrix_eq(
            &Matrix::new_rotate_axis_angle(0.0, 0.0, 1.0, 30.0),
            &Matrix::new_rotate(0.0, 0.0, 30.0),
        );

        assert_matrix_eq(
            &Matrix::new_rotate_axis_angle(0.0, 0.0, 0.0, 30.0),
            &Matrix::new_rotate(0.0, 0.0, 30.0),
        );

        assert_matrix_eq(
            &parse("rotate3d(0, 0, 2, 30deg)").unwrap(),
            &Matrix::new_rotate(0.0, 0.0, 30.0),
        );
    }

    #[test]
    fn flips_around_y_axis() {
        let m = Matrix::new_rotate(0.0, 180.0, 0.0);
        let [x, y, z, w] = m.transform_point(3.0, 4.0, 0.0, 1.0);

        assert!((x + 3.0).abs() < 1e-12);
        assert!((y - 4.0).abs() < 1e-12);
        assert!(z.abs() < 1e-12);
        assert_eq!(w, 1.0);
    }

    #[test]
    fn perspective_changes_w() {
        let m = Matrix::new_perspective(100.0);
        assert_eq!(m.m(3, 4), -0.01);
        assert_eq!(m.transform_point(0.0, 0.0, 50.0, 1.0)[3], 0.5);
        assert!(!m.is_2d());
    }

    #[test]
    fn detects_2d_and_identity() {
        assert!(Matrix::identity().is_identity());
        assert!(Matrix::identity().is_2d());
        assert!(Matrix::new_skew(10.0, 20.0).is_2d());
        assert!(!Matrix::new_rotate(10.0, 0.0, 0.0).is_2d());
        assert!(!Matrix::new_translate(1.0, 0.0, 0.0).is_identity());
        assert!(!Matrix::new_translate(0.0, 0.0, 1.0).is_2d());
    }

    #[test]
    fn names_coefficients_like_css() {
        let m = Matrix::new_2d(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);

        assert_eq!(m.m(1, 1), 1.0);
        assert_eq!(m.m(1, 2), 2.0);
        assert_eq!(m.m(2, 1), 3.0);
        assert_eq!(m.m(2, 2), 4.0);
        assert_eq!(m.m(4, 1), 5.0);
        assert_eq!(m.m(4, 2), 6.0);
        assert_eq!(m.to_array(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.to_string(), "matrix(1, 2, 3, 4, 5, 6)");

        let m3 = Matrix::new_translate(1.0, 2.0, 3.0);
        assert_eq!(m3.to_array().len(), 16);
        assert_eq!(
            m3.to_string(),
            "matrix3d(1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 1, 2, 3, 1)"
        );
    }

    #[test]
    fn flushes_tiny_matrix_values() {
        assert_eq!(
            parse("matrix(1, 0.0000001, 0, 1, 0, 0)").unwrap(),
            Matrix::identity()
        );
    }

    #[test]
    fn builds_from_coefficients() {
        let m = Matrix::from_source(MatrixSource::Coefficients(&[1.0, 0.0, 0.0, 1.0, 5.0, 6.0]))
            .unwrap();
        assert_eq!(m, Matrix::new_translate(5.0, 6.0, 0.0));

        let c = Matrix::new_rotate(10.0, 20.0, 30.0).to_3d();
        assert_eq!(Matrix::from_coefficients(&c).unwrap(), Matrix::new_3d(&c));

        assert_eq!(
            Matrix::from_coefficients(&[1.0, 2.0]),
            Err(MatrixError::InvalidLength(2))
        );

        assert!(matches!(
            Matrix::from_coefficients(&[1.0, 0.0, 0.0, 1.0, f64::INFINITY, 0.0]),
            Err(MatrixError::NonFinite { index: 4, .. })
        ));
    }

    #[test]
    fn builds_from_named_coefficients() {
        let names = COEFFICIENT_NAMES;
        let values = Matrix::new_translate(7.0, 8.0, 9.0).to_3d();
        let named: Vec<(&str, f64)> = names.iter().copied().zip(values.iter().copied()).collect();

        assert_eq!(
            Matrix::from_source(MatrixSource::Named(&named)).unwrap(),
            Matrix::new_translate(7.0, 8.0, 9.0)
        );

        assert_eq!(
            Matrix::from_named(&named[..15]),
            Err(MatrixError::MissingCoefficient("m44".to_string()))
        );

        let mut bad = named.clone();
        bad[5].1 = f64::NAN;
        assert!(matches!(
            Matrix::from_named(&bad),
            Err(MatrixError::NonFiniteCoefficient { ref name, .. }) if name == "m22"
        ));

        let mut unknown = named.clone();
        unknown.push(("m55", 1.0));
        assert_eq!(
            Matrix::from_named(&unknown),
            Err(MatrixError::UnknownCoefficient("m55".to_string()))
        );
    }

    #[test]
    fn reports_invalid_transform_lists() {
        for s in [
            "foo(1)",
            "translate(1em)",
            "scale()",
            "matrix(1 2 3 4 5)",
            "rotate(10foo)",
            "scale(1) 5",
        ] {
            let err = parse(s).unwrap_err();
            assert!(matches!(err, MatrixError::Parse { .. }), "{s} gave {err:?}");
        }
    }
}
