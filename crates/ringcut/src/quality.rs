//! Triangulation quality check.
//!
//! `deviation` compares the polygon area (outer ring minus holes) with the
//! summed area of the triangles. It is 0 for an exact cover and grows with
//! missing or overlapping triangles. Areas are accumulated in `f64`.

use std::fmt;

use num_traits::PrimInt;

use crate::assemble::triples;
use crate::coord::Coord;
use crate::error::RingBoundaryError;
use crate::rings::ring_ranges;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QualityError {
    Rings(RingBoundaryError),
    /// A triangle refers to a point that does not exist.
    IndexOutOfRange { index: u32, points: usize },
    /// The index buffer length is not a multiple of 3.
    RaggedIndices { len: usize },
}

impl fmt::Display for QualityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rings(e) => write!(f, "{e}"),
            Self::IndexOutOfRange { index, points } => {
                write!(f, "triangle index {index} out of range for {points} points")
            }
            Self::RaggedIndices { len } => {
                write!(f, "index buffer of length {len} is not a list of triangles")
            }
        }
    }
}

impl std::error::Error for QualityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rings(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RingBoundaryError> for QualityError {
    fn from(e: RingBoundaryError) -> Self {
        Self::Rings(e)
    }
}

/// Signed area of a closed ring; positive when counter-clockwise (y up).
pub fn signed_ring_area<T: Coord>(ring: &[[T; 2]]) -> f64 {
    let Some(last) = ring.last() else {
        return 0.0;
    };
    let mut prev: [f64; 2] = [last[0].as_(), last[1].as_()];
    let mut sum = 0.0;
    for p in ring {
        let cur: [f64; 2] = [p[0].as_(), p[1].as_()];
        sum += (prev[0] - cur[0]) * (cur[1] + prev[1]);
        prev = cur;
    }
    0.5 * sum
}

/// Relative difference between polygon area and triangle area.
pub fn deviation<T, E>(points: &[[T; 2]], ring_ends: &[E], indices: &[u32]) -> Result<f64, QualityError>
where
    T: Coord,
    E: PrimInt,
{
    if indices.len() % 3 != 0 {
        return Err(QualityError::RaggedIndices { len: indices.len() });
    }
    if let Some(&index) = indices.iter().find(|&&i| i as usize >= points.len()) {
        return Err(QualityError::IndexOutOfRange {
            index,
            points: points.len(),
        });
    }

    let rings = ring_ranges(points.len(), ring_ends)?;
    let mut polygon_area = 0.0;
    for (k, range) in rings.iter().enumerate() {
        let a = signed_ring_area(&points[range.clone()]).abs();
        if k == 0 {
            polygon_area += a;
        } else {
            polygon_area -= a;
        }
    }

    let at = |i: u32| -> (f64, f64) {
        let p = points[i as usize];
        (p[0].as_(), p[1].as_())
    };
    let triangles_area: f64 = triples(indices)
        .map(|[a, b, c]| {
            let (ax, ay) = at(a);
            let (bx, by) = at(b);
            let (cx, cy) = at(c);
            0.5 * ((ax - cx) * (by - ay) - (ax - bx) * (cy - ay)).abs()
        })
        .sum();

    if polygon_area == 0.0 && triangles_area == 0.0 {
        return Ok(0.0);
    }
    Ok(((triangles_area - polygon_area) / polygon_area).abs())
}
