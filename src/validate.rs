//! Cheap structural checks on command sequences.
//!
//! These let the converters skip work when their input is already in the
//! shape they would produce.

use crate::path_builder::{param_count, PathBuilder, Segment};

/// Checks that `path` is a well-formed command sequence, returning a description
/// of the first problem otherwise.
///
/// Well-formed means: not empty, starts with a moveto, and every segment has a
/// known command letter, the right number of parameters, and finite parameters.
pub fn check_path_array(path: &[Segment]) -> Result<(), String> {
    let first = path.first().ok_or_else(|| "path has no segments".to_string())?;

    if !first.is_move() {
        return Err(format!(
            "path must start with a moveto, not {:?}",
            first.command
        ));
    }

    for (i, segment) in path.iter().enumerate() {
        let expected = param_count(segment.command)
            .filter(|_| segment.command.is_ascii_alphabetic())
            .ok_or_else(|| format!("segment {i} has unknown command {:?}", segment.command))?;

        if segment.params.len() != expected {
            return Err(format!(
                "segment {i} ({}) has {} parameters, expected {expected}",
                segment.command,
                segment.params.len()
            ));
        }

        if let Some(p) = segment.params.iter().find(|p| !p.is_finite()) {
            return Err(format!("segment {i} ({}) has non-finite parameter {p}", segment.command));
        }
    }

    Ok(())
}

/// Whether `path` is a well-formed command sequence.
pub fn is_path_array(path: &[Segment]) -> bool {
    check_path_array(path).is_ok()
}

/// Whether `path` is well-formed and all of its commands are absolute.
pub fn is_absolute_array(path: &[Segment]) -> bool {
    is_path_array(path) && path.iter().all(|s| !s.is_relative())
}

/// Whether `path` is well-formed and all of its commands but the first are relative.
pub fn is_relative_array(path: &[Segment]) -> bool {
    is_path_array(path) && path.iter().skip(1).all(|s| s.is_relative())
}

/// Whether `path` is well-formed, absolute, and only has `M` and `C` commands.
pub fn is_curve_array(path: &[Segment]) -> bool {
    is_path_array(path) && path.iter().all(|s| matches!(s.command, 'M' | 'C'))
}

/// Whether `path` is well-formed, absolute, and has no shorthand commands.
pub fn is_normalized_array(path: &[Segment]) -> bool {
    is_path_array(path)
        && path
            .iter()
            .all(|s| matches!(s.command, 'A' | 'C' | 'L' | 'M' | 'Q' | 'Z'))
}

/// Whether `path_str` is non-empty path data that parses without errors.
pub fn is_valid_path(path_str: &str) -> bool {
    let mut builder = PathBuilder::default();

    builder.parse(path_str).is_ok() && !builder.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(command: char, params: &[f64]) -> Segment {
        Segment::new(command, params)
    }

    #[test]
    fn checks_well_formed_arrays() {
        assert!(is_path_array(&[seg('M', &[0.0, 0.0]), seg('L', &[1.0, 2.0]), seg('z', &[])]));

        assert!(!is_path_array(&[]));
        assert!(!is_path_array(&[seg('L', &[0.0, 0.0])]));
        assert!(!is_path_array(&[seg('M', &[0.0, 0.0]), seg('X', &[1.0, 2.0])]));
        assert!(!is_path_array(&[seg('M', &[0.0, 0.0]), seg('L', &[1.0])]));
        assert!(!is_path_array(&[seg('M', &[0.0, f64::NAN])]));
        assert!(!is_path_array(&[seg('M', &[0.0, 0.0]), seg('Z', &[1.0])]));
    }

    #[test]
    fn describes_first_problem() {
        let err = check_path_array(&[seg('M', &[0.0, 0.0]), seg('C', &[1.0, 2.0])]).unwrap_err();
        assert_eq!(err, "segment 1 (C) has 2 parameters, expected 6");
    }

    #[test]
    fn classifies_representations() {
        let absolute = [seg('M', &[0.0, 0.0]), seg('H', &[1.0]), seg('Z', &[])];
        let relative = [seg('M', &[0.0, 0.0]), seg('h', &[1.0]), seg('z', &[])];
        let curve = [seg('M', &[0.0, 0.0]), seg('C', &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0])];
        let normalized = [seg('M', &[0.0, 0.0]), seg('Q', &[1.0, 1.0, 2.0, 2.0]), seg('Z', &[])];

        assert!(is_absolute_array(&absolute));
        assert!(!is_absolute_array(&relative));

        assert!(is_relative_array(&relative));
        assert!(!is_relative_array(&absolute));

        assert!(is_curve_array(&curve));
        assert!(!is_curve_array(&normalized));

        assert!(is_normalized_array(&normalized));
        assert!(is_normalized_array(&curve));
        assert!(!is_normalized_array(&absolute));
    }

    #[test]
    fn validates_strings() {
        assert!(is_valid_path("M0 0L10 10"));
        assert!(!is_valid_path(""));
        assert!(!is_valid_path("L10 10"));
        assert!(!is_valid_path("M0 0L10"));
    }
}
