//! Axis-aligned bounding boxes of paths.

use crate::arc::CubicBezierCurve;

/// The extents of a path, plus a depth estimate for 3D transforms.
///
/// `cz` is `max(width, height) + min(width, height) / 2`; it is used as the
/// default `z` of the transform origin, so that perspective has something
/// sensible to work with.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub x2: f64,
    pub y2: f64,
    pub width: f64,
    pub height: f64,
    pub cx: f64,
    pub cy: f64,
    pub cz: f64,
}

impl BoundingBox {
    pub fn from_extents(x: f64, y: f64, x2: f64, y2: f64) -> BoundingBox {
        let width = x2 - x;
        let height = y2 - y;

        BoundingBox {
            x,
            y,
            x2,
            y2,
            width,
            height,
            cx: x + width / 2.0,
            cy: y + height / 2.0,
            cz: width.max(height) + width.min(height) / 2.0,
        }
    }

    /// The larger of `width` and `height`.
    pub fn max_dimension(&self) -> f64 {
        self.width.max(self.height)
    }
}

/// Accumulates points and curves into a [`BoundingBox`].
#[derive(Debug, Copy, Clone)]
pub(crate) struct BoundsBuilder {
    extents: Option<(f64, f64, f64, f64)>,
}

impl BoundsBuilder {
    pub fn new() -> BoundsBuilder {
        BoundsBuilder { extents: None }
    }

    pub fn add_point(&mut self, (x, y): (f64, f64)) {
        self.extents = Some(match self.extents {
            None => (x, y, x, y),
            Some((x1, y1, x2, y2)) => (x1.min(x), y1.min(y), x2.max(x), y2.max(y)),
        });
    }

    /// Adds the endpoints of the curve and the points where it turns around
    /// horizontally or vertically.
    pub fn add_cubic(&mut self, from: (f64, f64), curve: &CubicBezierCurve) {
        self.add_point(from);
        self.add_point(curve.to);

        let xs = cubic_extrema(from.0, curve.pt1.0, curve.pt2.0, curve.to.0);
        let ys = cubic_extrema(from.1, curve.pt1.1, curve.pt2.1, curve.to.1);

        for t in xs.into_iter().chain(ys).flatten() {
            self.add_point(cubic_point(from, curve, t));
        }
    }

    /// Returns the box, or `None` if nothing was added.
    pub fn build(&self) -> Option<BoundingBox> {
        self.extents
            .map(|(x, y, x2, y2)| BoundingBox::from_extents(x, y, x2, y2))
    }
}

/// Evaluates a cubic Bézier at parameter `t`.
pub(crate) fn cubic_point(from: (f64, f64), curve: &CubicBezierCurve, t: f64) -> (f64, f64) {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;

    (
        a * from.0 + b * curve.pt1.0 + c * curve.pt2.0 + d * curve.to.0,
        a * from.1 + b * curve.pt1.1 + c * curve.pt2.1 + d * curve.to.1,
    )
}

/// Parameters in `(0, 1)` where the derivative of a one-dimensional cubic is zero.
fn cubic_extrema(p0: f64, p1: f64, p2: f64, p3: f64) -> [Option<f64>; 2] {
    // derivative divided by 3: a t^2 + b t + c
    let a = -p0 + 3.0 * p1 - 3.0 * p2 + p3;
    let b = 2.0 * (p0 - 2.0 * p1 + p2);
    let c = p1 - p0;

    let inside = |t: f64| Some(t).filter(|t| *t > 0.0 && *t < 1.0);

    if a.abs() < 1e-12 {
        if b.abs() < 1e-12 {
            return [None, None];
        }

        return [inside(-c / b), None];
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return [None, None];
    }

    let sq = discriminant.sqrt();
    [inside((-b + sq) / (2.0 * a)), inside((-b - sq) / (2.0 * a))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn computes_derived_fields() {
        let bbox = BoundingBox::from_extents(0.0, 10.0, 40.0, 30.0);

        assert_eq!(bbox.width, 40.0);
        assert_eq!(bbox.height, 20.0);
        assert_eq!(bbox.cx, 20.0);
        assert_eq!(bbox.cy, 20.0);
        assert_eq!(bbox.cz, 50.0);
        assert_eq!(bbox.max_dimension(), 40.0);
    }

    #[test]
    fn empty_builder_has_no_box() {
        assert!(BoundsBuilder::new().build().is_none());
    }

    #[test]
    fn straight_curve_uses_endpoints() {
        let mut builder = BoundsBuilder::new();
        builder.add_cubic((0.0, 0.0), &CubicBezierCurve::from_line((0.0, 0.0), (10.0, 5.0)));

        let bbox = builder.build().unwrap();
        assert_eq!((bbox.x, bbox.y, bbox.x2, bbox.y2), (0.0, 0.0, 10.0, 5.0));
    }

    #[test]
    fn bulging_curve_includes_extremum() {
        let curve = CubicBezierCurve {
            pt1: (0.0, 10.0),
            pt2: (10.0, 10.0),
            to: (10.0, 0.0),
        };

        let mut builder = BoundsBuilder::new();
        builder.add_cubic((0.0, 0.0), &curve);

        let bbox = builder.build().unwrap();
        assert!(approx_eq!(f64, bbox.y2, 7.5, epsilon = 1e-9));
        assert_eq!((bbox.x, bbox.y, bbox.x2), (0.0, 0.0, 10.0));
    }

    #[test]
    fn evaluates_endpoints() {
        let curve = CubicBezierCurve {
            pt1: (1.0, 2.0),
            pt2: (3.0, 4.0),
            to: (5.0, 6.0),
        };

        assert_eq!(cubic_point((0.0, 0.0), &curve, 0.0), (0.0, 0.0));
        assert_eq!(cubic_point((0.0, 0.0), &curve, 1.0), (5.0, 6.0));
    }
}
