//! Public Rust API for svgpath.
//!
//! This gets re-exported from the toplevel `lib.rs`.

#![warn(missing_docs)]

use std::fmt;

use crate::bbox::BoundingBox;
use crate::convert::{absolute_path, curve_path, normalized_path, relative_path};
use crate::error::PathError;
use crate::measure::PathWalk;
use crate::optimize::optimized_path;
use crate::options::Options;
use crate::path_builder::{path_to_string, PathArray, PathInput, Segment};
use crate::path_parser::parse_path_string;
use crate::path_transform::{resolve_origin, transformed_path, TransformSpec};
use crate::reverse::{reversed_path, split_absolute};

/// A path that can be converted, transformed and measured in place.
///
/// This is the convenient way to use svgpath when several operations need to
/// be applied to the same path.  All the mutating methods return `&mut Self`
/// so that they can be chained, and the path is serialized with
/// [`ToString`], rounded as per the [`Options`] it was created with.
///
/// # Example:
///
/// ```
/// use svgpath::{Options, PathCommander, TransformSpec};
///
/// let mut path = PathCommander::new("M0 0l10 0l0 10", Options::default()).unwrap();
///
/// path.to_absolute();
/// assert_eq!(path.to_string(), "M0,0L10,0L10,10");
///
/// path.transform(&TransformSpec::new().with_translate([5.0, 5.0]))
///     .optimize();
/// assert_eq!(path.to_string(), "M5,5H15V15");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommander {
    segments: PathArray,
    options: Options,
}

impl PathCommander {
    /// Parses path data or validates a command sequence.
    ///
    /// Empty or whitespace-only strings are rejected with [`PathError::EmptyPath`].
    pub fn new<'a, I: Into<PathInput<'a>>>(
        input: I,
        options: Options,
    ) -> Result<PathCommander, PathError> {
        Ok(PathCommander {
            segments: parse_path_string(input)?,
            options,
        })
    }

    /// The current command sequence.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The options this was created with.
    pub fn options(&self) -> Options {
        self.options
    }

    /// Bounding box of the current path.
    pub fn bbox(&self) -> BoundingBox {
        PathWalk::new(&self.segments).bbox()
    }

    /// Length of the current path.
    pub fn total_length(&self) -> f64 {
        PathWalk::new(&self.segments).total_length()
    }

    /// The point at `distance` along the current path, clamped to its ends.
    pub fn point_at_length(&self, distance: f64) -> (f64, f64) {
        PathWalk::new(&self.segments).point_at_length(distance)
    }

    /// Converts the path to absolute coordinates.
    pub fn to_absolute(&mut self) -> &mut Self {
        self.segments = absolute_path(&self.segments);
        self
    }

    /// Converts the path to relative coordinates.
    pub fn to_relative(&mut self) -> &mut Self {
        self.segments = relative_path(&self.segments);
        self
    }

    /// Converts the path to movetos and cubic curves.
    pub fn to_curve(&mut self) -> &mut Self {
        self.segments = curve_path(&self.segments);
        self
    }

    /// Converts the path to absolute coordinates without shorthand commands.
    pub fn normalize(&mut self) -> &mut Self {
        self.segments = normalized_path(&self.segments);
        self
    }

    /// Rewrites the path with the shortest encoding of each segment.
    ///
    /// Numbers are rounded as per the `round` option.
    pub fn optimize(&mut self) -> &mut Self {
        let absolute = absolute_path(&self.segments);
        let decimals = self.options.round.decimals_for(&absolute);

        self.segments = optimized_path(&absolute, decimals);
        self
    }

    /// Reverses the direction of the subpaths.
    ///
    /// With `only_subpaths`, the first subpath is left alone and only the ones
    /// after it are reversed.  The subpaths stay in their order.  The result
    /// is absolute.
    pub fn reverse(&mut self, only_subpaths: bool) -> &mut Self {
        let absolute = absolute_path(&self.segments);
        let subpaths = split_absolute(&absolute);

        self.segments = if subpaths.len() > 1 {
            subpaths
                .iter()
                .enumerate()
                .flat_map(|(i, subpath)| {
                    if only_subpaths && i == 0 {
                        subpath.clone()
                    } else {
                        reversed_path(subpath)
                    }
                })
                .collect()
        } else if only_subpaths {
            absolute
        } else {
            reversed_path(&absolute)
        };

        self
    }

    /// Applies a transform to the path.
    ///
    /// Without an origin in `spec`, the `origin` option is used, and without
    /// that the center of the bounding box.  See [`crate::transform_path`].
    pub fn transform(&mut self, spec: &TransformSpec) -> &mut Self {
        let origin = resolve_origin(spec.origin.or(self.options.origin), &self.bbox());

        let spec = TransformSpec {
            origin: Some(origin),
            ..*spec
        };

        self.segments = transformed_path(&self.segments, &spec);
        self
    }

    /// Mirrors the path horizontally around the center of its bounding box.
    pub fn flip_x(&mut self) -> &mut Self {
        let BoundingBox { cx, cy, .. } = self.bbox();

        self.transform(
            &TransformSpec::new()
                .with_rotate([0.0, 180.0, 0.0])
                .with_origin([cx, cy, 0.0]),
        )
    }

    /// Mirrors the path vertically around the center of its bounding box.
    pub fn flip_y(&mut self) -> &mut Self {
        let BoundingBox { cx, cy, .. } = self.bbox();

        self.transform(
            &TransformSpec::new()
                .with_rotate([180.0, 0.0, 0.0])
                .with_origin([cx, cy, 0.0]),
        )
    }
}

impl fmt::Display for PathCommander {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&path_to_string(&self.segments, self.options.round))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Round;

    fn commander(path: &str) -> PathCommander {
        PathCommander::new(path, Options::default()).unwrap()
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(
            PathCommander::new("  ", Options::default()),
            Err(PathError::EmptyPath)
        );
    }

    #[test]
    fn chains_conversions() {
        let mut path = commander("M0 0l50 0l50 50z");

        assert_eq!(path.to_absolute().to_string(), "M0,0L50,0L100,50Z");
        assert_eq!(path.to_relative().to_string(), "M0,0l50,0l50,50z");
        assert_eq!(path.normalize().to_string(), "M0,0L50,0L100,50Z");
        assert_eq!(
            path.to_curve().to_string(),
            "M0,0C25,0,50,0,50,0C75,25,100,50,100,50C50,25,0,0,0,0"
        );
    }

    #[test]
    fn rounds_output() {
        let path = PathCommander::new("M0.123456 0L1 1", Options::default()).unwrap();
        assert_eq!(path.to_string(), "M0.1235,0L1,1");

        let options = Options::default().with_round(Round::Off);
        let path = PathCommander::new("M0.123456 0L1 1", options).unwrap();
        assert_eq!(path.to_string(), "M0.123456,0L1,1");

        let options = Options::default().with_round(Round::Auto);
        let path = PathCommander::new("M0.123456 0L100 1", options).unwrap();
        assert_eq!(path.to_string(), "M0.12,0L100,1");
    }

    #[test]
    fn measures() {
        let path = commander("M0 0L10 0L10 10");

        assert_eq!(path.total_length(), 20.0);
        assert_eq!(path.point_at_length(15.0), (10.0, 5.0));
        assert_eq!(path.bbox(), BoundingBox::from_extents(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn reverses() {
        let mut path = commander("M0 0L10 0L10 10Z");
        assert_eq!(path.reverse(false).to_string(), "M10,10L10,0L0,0Z");

        let mut path = commander("M0 0L10 0M20 0L30 0");
        assert_eq!(path.reverse(false).to_string(), "M10,0L0,0M30,0L20,0");

        let mut path = commander("M0 0L10 0M20 0L30 0");
        assert_eq!(path.reverse(true).to_string(), "M0,0L10,0M30,0L20,0");

        let mut path = commander("M0 0L10 0");
        assert_eq!(path.reverse(true).to_string(), "M0,0L10,0");
    }

    #[test]
    fn transforms_around_given_origin() {
        let mut path = commander("M0 0L10 0");
        let spec = TransformSpec::new()
            .with_scale(2.0)
            .with_origin([0.0, 0.0, 0.0]);

        assert_eq!(path.transform(&spec).to_string(), "M0,0L20,0");

        let options = Options::default().with_origin([10.0, 0.0, 0.0]);
        let mut path = PathCommander::new("M0 0L10 0", options).unwrap();

        assert_eq!(
            path.transform(&TransformSpec::new().with_scale(2.0)).to_string(),
            "M-10,0L10,0"
        );
    }

    #[test]
    fn flips() {
        let mut path = commander("M0 0L10 0L10 10");
        assert_eq!(path.flip_x().to_string(), "M10,0L0,0L0,10");

        let mut path = commander("M0 0L10 0L10 10");
        assert_eq!(path.flip_y().to_string(), "M0,10L10,10L10,0");
    }

    #[test]
    fn optimizes() {
        let mut path = commander("M0 0L10 0L10 10L0 10Z");
        assert_eq!(path.optimize().to_string(), "M0,0H10V10H0Z");
    }
}
