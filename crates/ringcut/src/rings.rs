//! Ring loader: validates ring-end offsets and turns them into point ranges.
//!
//! Ring `k` covers `ends[k-1]..ends[k]` (the first ring starts at 0). The first
//! range is the outer boundary, the rest are holes. No geometry happens here.

use std::ops::Range;

use num_traits::PrimInt;

use crate::error::RingBoundaryError;

/// Validate `ring_ends` against `points` and return one range per ring.
///
/// Zero points with no ring ends is the empty polygon and yields no ranges.
/// Offsets must be primitive integers; fractional offsets do not type-check:
///
/// ```compile_fail
/// ringcut::rings::ring_ranges(3, &[3.5f64]).unwrap();
/// ```
///
/// ```
/// assert_eq!(ringcut::rings::ring_ranges(3, &[3u8]).unwrap(), vec![0..3]);
/// ```
pub fn ring_ranges<E>(points: usize, ring_ends: &[E]) -> Result<Vec<Range<usize>>, RingBoundaryError>
where
    E: PrimInt,
{
    if points > u32::MAX as usize {
        return Err(RingBoundaryError::TooManyPoints { points });
    }
    if ring_ends.is_empty() {
        if points > 0 {
            return Err(RingBoundaryError::Empty { points });
        }
        return Ok(Vec::new());
    }

    let mut ranges = Vec::with_capacity(ring_ends.len());
    let mut start = 0usize;
    for (ring, end) in ring_ends.iter().enumerate() {
        // Unsigned values past i128::MAX saturate; they fail the bound check anyway.
        let offset = end.to_i128().unwrap_or(i128::MAX);
        let Some(stop) = end.to_usize() else {
            if offset < 0 {
                return Err(RingBoundaryError::Negative { ring, offset });
            }
            return Err(RingBoundaryError::ExceedsPointCount {
                ring,
                offset,
                points,
            });
        };
        if stop <= start {
            return Err(RingBoundaryError::NonIncreasing {
                ring,
                offset,
                previous: start,
            });
        }
        if stop > points {
            return Err(RingBoundaryError::ExceedsPointCount {
                ring,
                offset,
                points,
            });
        }
        ranges.push(start..stop);
        start = stop;
    }

    if start != points {
        return Err(RingBoundaryError::Incomplete {
            last: start,
            points,
        });
    }
    Ok(ranges)
}
