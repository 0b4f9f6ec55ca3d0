//! Parse, convert, transform, measure and optimize SVG path data.
//!
//! This crate works on the path data of SVG's `<path d="...">` attribute.  It
//! parses the data into a sequence of commands, and lets you convert between
//! absolute and relative coordinates, expand shorthand commands, turn a path
//! into cubic Bézier curves only, apply 2D and 3D transforms, measure lengths
//! and areas, reverse the direction of a path, and write the shortest
//! equivalent path data.
//!
//! # Basic usage
//!
//! The free functions take either a string of path data or a command sequence
//! (see [`PathInput`]), and return a new [`PathArray`]:
//!
//! ```
//! use svgpath::{path_to_absolute, path_to_string, Round};
//!
//! let path = path_to_absolute("M0 0l50 0l50 50z").unwrap();
//! assert_eq!(path_to_string(&path, Round::default()), "M0,0L50,0L100,50Z");
//! ```
//!
//! To apply several operations to the same path, use a [`PathCommander`].
//!
//! # Logging
//!
//! Set the `SVGPATH_LOG` environment variable to anything but `0` to get
//! messages about degenerate geometry and automatic rounding decisions printed
//! to stdout.

#![allow(clippy::too_many_arguments)]
#![allow(clippy::derive_partial_eq_without_eq)]
#![warn(nonstandard_style, rust_2018_idioms, unused)]
// Some lints no longer exist
#![warn(renamed_and_removed_lints)]
// Standalone lints
#![warn(trivial_casts, trivial_numeric_casts)]

// The public API is exported here
pub use crate::api::*;

pub use crate::{
    angle::Angle,
    arc::{CubicBezierCurve, EllipticalArc},
    bbox::BoundingBox,
    convert::{normalize_path, path_to_absolute, path_to_curve, path_to_relative},
    error::{GrammarError, GrammarErrorKind, MatrixError, PathError, ValueErrorKind},
    measure::{
        get_closest_point, get_draw_direction, get_path_area, get_path_bbox, get_point_at_length,
        get_properties_at_length, get_properties_at_point, get_segment_at_length,
        get_segment_of_point, get_total_length, is_point_in_stroke, polygon_area, polygon_length,
        PointProperties, SegmentProperties,
    },
    optimize::optimize_path,
    options::{auto_round_decimals, Options, Round},
    parsers::Parse,
    path_builder::{path_to_string, round_path, PathArray, PathInput, Segment},
    path_parser::parse_path_string,
    path_transform::{get_svg_matrix, projection_2d, transform_path, TransformSpec, TransformValue},
    reverse::{reverse_curve, reverse_path, split_path},
    transform::{Matrix, MatrixSource},
    util::{distance_square_root, mid_point, rotate_vector},
    validate::{
        is_absolute_array, is_curve_array, is_normalized_array, is_path_array, is_relative_array,
        is_valid_path,
    },
};

mod angle;
mod api;
mod arc;
mod bbox;
mod convert;
mod error;
mod log;
mod measure;
mod optimize;
mod options;
mod parsers;
mod path_builder;
mod path_parser;
mod path_transform;
mod reverse;
mod transform;
mod util;
mod validate;

#[doc(hidden)]
pub mod float_eq;

#[doc(hidden)]
pub mod bench_only {
    pub use crate::path_builder::PathBuilder;
    pub use crate::path_parser::PathParser;
}
