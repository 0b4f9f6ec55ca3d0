//! Miscellaneous utilities.

#[macro_export]
#[doc(hidden)]
macro_rules! enum_default {
    ($name:ident, $default:expr) => {
        impl Default for $name {
            #[inline]
            fn default() -> $name {
                $default
            }
        }
    };
}

/// Rounds half away from zero to `decimals` fractional digits.
///
/// Numbers that cannot carry that many digits in an `f64` are returned as-is.
pub fn round_to(n: f64, decimals: u32) -> f64 {
    if decimals > 15 || !n.is_finite() {
        return n;
    }

    let pow = 10f64.powi(decimals as i32);
    let r = (n * pow).round() / pow;

    if r.is_finite() {
        r
    } else {
        n
    }
}

/// Formats a number for path data: shortest round-trip digits, no exponent,
/// and no negative zero.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else {
        format!("{n}")
    }
}

/// Euclidean distance between two points.
pub fn distance_square_root(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;

    (dx * dx + dy * dy).sqrt()
}

/// Point at parameter `t` on the segment from `a` to `b`.
pub fn mid_point(a: (f64, f64), b: (f64, f64), t: f64) -> (f64, f64) {
    (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
}

/// Rotates the vector `(x, y)` by `rad` radians around the origin.
pub fn rotate_vector(x: f64, y: f64, rad: f64) -> (f64, f64) {
    let (sin, cos) = rad.sin_cos();

    (x * cos - y * sin, x * sin + y * cos)
}
