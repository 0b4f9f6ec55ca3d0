//! Approximation of elliptical arcs with cubic Bézier curves.

use std::f64::consts::PI;

use crate::svgpath_log;
use crate::util::{mid_point, rotate_vector};

/// A cubic Bézier curve segment without its start point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezierCurve {
    /// The (x, y) coordinates of the first control point.
    pub pt1: (f64, f64),
    /// The (x, y) coordinates of the second control point.
    pub pt2: (f64, f64),
    /// The (x, y) coordinates of the end point of this path segment.
    pub to: (f64, f64),
}

impl CubicBezierCurve {
    /// The six parameters of the equivalent `C` command.
    pub fn to_params(self) -> [f64; 6] {
        [
            self.pt1.0, self.pt1.1, self.pt2.0, self.pt2.1, self.to.0, self.to.1,
        ]
    }

    /// A straight line from `from` to `to` expressed as a cubic.
    ///
    /// The first control point is the midpoint and the second one coincides
    /// with the end point; the measurement code recognizes this shape and
    /// measures it in closed form.
    pub fn from_line(from: (f64, f64), to: (f64, f64)) -> CubicBezierCurve {
        CubicBezierCurve {
            pt1: mid_point(from, to, 0.5),
            pt2: to,
            to,
        }
    }

    /// Degree elevation of the quadratic curve `from`, `control`, `to`.
    pub fn from_quadratic(
        from: (f64, f64),
        control: (f64, f64),
        to: (f64, f64),
    ) -> CubicBezierCurve {
        CubicBezierCurve {
            pt1: mid_point(from, control, 2.0 / 3.0),
            pt2: mid_point(to, control, 2.0 / 3.0),
            to,
        }
    }

    /// Whether this is the shape produced by [`CubicBezierCurve::from_line`] for `from`.
    pub fn is_line_from(&self, from: (f64, f64)) -> bool {
        self.pt1 == mid_point(from, self.to, 0.5) && self.pt2 == self.to
    }
}

/// Largest sweep covered by a single cubic, in radians.
const MAX_SWEEP_PER_CURVE: f64 = 120.0 * PI / 180.0;

/// An `A` command together with the point it starts from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EllipticalArc {
    /// Radii as written; they are made positive and scaled up as needed.
    pub r: (f64, f64),
    /// Rotation of the ellipse's x axis, in degrees.
    pub x_axis_rotation: f64,
    pub large_arc: bool,
    /// Whether the arc runs towards increasing angles.
    pub sweep: bool,
    pub from: (f64, f64),
    pub to: (f64, f64),
}

/// What an arc turns out to be once its radii are checked against its end points.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum ArcShape {
    Elliptical(ArcCenter),
    /// A radius is zero, so the arc is drawn as a straight line.
    Straight,
    /// Both end points coincide and nothing is drawn.
    Empty,
}

/// Center form of an elliptical arc.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct ArcCenter {
    pub center: (f64, f64),
    /// Radii after scaling, always positive.
    pub radii: (f64, f64),
    /// Rotation of the ellipse's x axis, in radians.
    pub rotation: f64,
    /// Angle of the start point on the unrotated ellipse.
    pub start_angle: f64,
    /// Signed angle from the start point to the end point, within ±2π.
    pub sweep_angle: f64,
}

impl EllipticalArc {
    /// Builds an arc from the start point and the seven `A` parameters.
    pub fn from_params(from: (f64, f64), params: &[f64]) -> Option<EllipticalArc> {
        match *params {
            [rx, ry, x_axis_rotation, large_arc, sweep, x, y] => Some(EllipticalArc {
                r: (rx, ry),
                x_axis_rotation,
                large_arc: large_arc != 0.0,
                sweep: sweep != 0.0,
                from,
                to: (x, y),
            }),
            _ => None,
        }
    }

    /// Converts the endpoint form into the center form, following the SVG
    /// implementation notes on arc conversion.
    pub(crate) fn shape(&self) -> ArcShape {
        let (rx, ry) = (self.r.0.abs(), self.r.1.abs());

        if rx * rx < f64::EPSILON || ry * ry < f64::EPSILON {
            return ArcShape::Straight;
        }

        let rotation = self.x_axis_rotation.to_radians();

        // half the chord, in the frame of the ellipse axes
        let (hx, hy) = rotate_vector(
            (self.from.0 - self.to.0) / 2.0,
            (self.from.1 - self.to.1) / 2.0,
            -rotation,
        );

        if hx == 0.0 && hy == 0.0 {
            return ArcShape::Empty;
        }

        let reach = (hx / rx).powi(2) + (hy / ry).powi(2);
        let (rx, ry) = if reach > 1.0 {
            (rx * reach.sqrt(), ry * reach.sqrt())
        } else {
            (rx, ry)
        };

        let denominator = (rx * hy).powi(2) + (ry * hx).powi(2);
        let mut factor = ((rx * ry).powi(2) / denominator - 1.0).max(0.0).sqrt();
        if self.large_arc == self.sweep {
            factor = -factor;
        }

        let (ox, oy) = (factor * rx * hy / ry, -factor * ry * hx / rx);
        let (dx, dy) = rotate_vector(ox, oy, rotation);
        let center = (
            dx + (self.from.0 + self.to.0) / 2.0,
            dy + (self.from.1 + self.to.1) / 2.0,
        );

        let start = ((hx - ox) / rx, (hy - oy) / ry);
        let end = ((-hx - ox) / rx, (-hy - oy) / ry);

        let mut sweep_angle = signed_angle(start, end);
        if self.sweep && sweep_angle < 0.0 {
            sweep_angle += 2.0 * PI;
        } else if !self.sweep && sweep_angle > 0.0 {
            sweep_angle -= 2.0 * PI;
        }

        ArcShape::Elliptical(ArcCenter {
            center,
            radii: (rx, ry),
            rotation,
            start_angle: signed_angle((1.0, 0.0), start),
            sweep_angle,
        })
    }

    /// Approximates the arc with cubic curves, one per started 120 degrees of sweep.
    ///
    /// An arc with a zero radius becomes a straight cubic to its end point, and
    /// an arc whose end points coincide becomes a zero-length cubic.  The last
    /// curve always ends exactly at the arc's end point.
    pub fn to_cubics(&self) -> Vec<CubicBezierCurve> {
        match self.shape() {
            ArcShape::Elliptical(arc) => {
                let n = (arc.sweep_angle.abs() / MAX_SWEEP_PER_CURVE).ceil().max(1.0) as usize;
                let step = arc.sweep_angle / n as f64;

                let mut curves: Vec<CubicBezierCurve> = (0..n)
                    .map(|i| {
                        let angle = arc.start_angle + i as f64 * step;
                        arc.piece(angle, angle + step)
                    })
                    .collect();

                if let Some(last) = curves.last_mut() {
                    last.to = self.to;
                }

                curves
            }

            ArcShape::Straight => {
                svgpath_log!("arc to {:?} has a zero radius, drawing a line", self.to);
                vec![CubicBezierCurve::from_line(self.from, self.to)]
            }

            ArcShape::Empty => vec![CubicBezierCurve::from_line(self.from, self.to)],
        }
    }
}

impl ArcCenter {
    /// Point of the ellipse at `angle`.
    fn point(&self, angle: f64) -> (f64, f64) {
        let (x, y) = rotate_vector(
            self.radii.0 * angle.cos(),
            self.radii.1 * angle.sin(),
            self.rotation,
        );

        (self.center.0 + x, self.center.1 + y)
    }

    /// Derivative of [`ArcCenter::point`] with respect to the angle.
    fn tangent(&self, angle: f64) -> (f64, f64) {
        rotate_vector(
            -self.radii.0 * angle.sin(),
            self.radii.1 * angle.cos(),
            self.rotation,
        )
    }

    /// The cubic for the part of the ellipse between two angles at most 120 degrees apart.
    pub fn piece(&self, from_angle: f64, to_angle: f64) -> CubicBezierCurve {
        let k = 4.0 / 3.0 * ((to_angle - from_angle) / 4.0).tan();

        let (p0, d0) = (self.point(from_angle), self.tangent(from_angle));
        let (p1, d1) = (self.point(to_angle), self.tangent(to_angle));

        CubicBezierCurve {
            pt1: (p0.0 + k * d0.0, p0.1 + k * d0.1),
            pt2: (p1.0 - k * d1.0, p1.1 - k * d1.1),
            to: p1,
        }
    }
}

/// Angle that turns `u` onto `v`, in `(-π, π]`.
fn signed_angle(u: (f64, f64), v: (f64, f64)) -> f64 {
    (u.0 * v.1 - u.1 * v.0).atan2(u.0 * v.0 + u.1 * v.1)
}
