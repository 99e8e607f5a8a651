//! Utility functions for point lists and canvas geometry.
//!
//! This module provides:
//! - Parsing of `"x,y x,y ..."` polygon point strings
//! - Aspect-ratio to logical canvas size conversion

use crate::error::EaselError;

/// Longest side of the logical canvas, in units.
pub const LOGICAL_SIZE: i32 = 1000;

// ============================================================================
// Point Lists
// ============================================================================

/// Parses a whitespace-separated list of `x,y` pairs.
///
/// # Examples
/// ```
/// use easel::util::parse_points;
/// assert_eq!(parse_points("10,50 30,90").unwrap(), vec![(10, 50), (30, 90)]);
/// ```
///
/// # Errors
/// Returns [`EaselError::InvalidPoints`] if any pair is not two integers
/// separated by a comma.
pub fn parse_points(points: &str) -> Result<Vec<(i32, i32)>, EaselError> {
    points
        .split_whitespace()
        .map(|pair| {
            let invalid = || EaselError::InvalidPoints(format!("'{pair}' is not an x,y pair"));
            let (x, y) = pair.split_once(',').ok_or_else(invalid)?;
            let x = x.trim().parse().map_err(|_| invalid())?;
            let y = y.trim().parse().map_err(|_| invalid())?;
            Ok((x, y))
        })
        .collect()
}

// ============================================================================
// Canvas Geometry
// ============================================================================

/// Logical canvas size for a `width:height` aspect ratio.
///
/// The longer side is always [`LOGICAL_SIZE`] units; the shorter side is
/// scaled down proportionally (truncated, never below 1). Returns `None` when
/// either component is zero.
pub fn aspect_dimensions(width: u32, height: u32) -> Option<(i32, i32)> {
    if width == 0 || height == 0 {
        return None;
    }
    let ratio = f64::from(width) / f64::from(height);
    let size = f64::from(LOGICAL_SIZE);
    let (w, h) = if width > height {
        (size, size / ratio)
    } else {
        (size * ratio, size)
    };
    Some(((w as i32).max(1), (h as i32).max(1)))
}
