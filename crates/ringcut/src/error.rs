use std::fmt;

/// Malformed ring-boundary input, detected before any geometric work.
///
/// This is the only error the triangulation entry points return; geometric
/// degeneracy (self-intersections, collinear runs, slivers) is absorbed by the
/// engine and never surfaces here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RingBoundaryError {
    /// No ring ends were given although the point buffer is non-empty.
    Empty { points: usize },
    /// A ring end is below zero.
    Negative { ring: usize, offset: i128 },
    /// A ring end does not exceed the end of the previous ring.
    NonIncreasing {
        ring: usize,
        offset: i128,
        previous: usize,
    },
    /// A ring end lies beyond the point buffer.
    ExceedsPointCount {
        ring: usize,
        offset: i128,
        points: usize,
    },
    /// The last ring end stops short of the point count.
    Incomplete { last: usize, points: usize },
    /// Interleaved coordinate buffer of odd length.
    UnpairedCoordinate { len: usize },
    /// Output indices are `u32`; the point count must fit.
    TooManyPoints { points: usize },
}

impl fmt::Display for RingBoundaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { points } => write!(
                f,
                "invalid ring boundaries: ring ends are empty but {points} points were given"
            ),
            Self::Negative { ring, offset } => write!(
                f,
                "invalid ring boundaries: ring {ring} ends at negative offset {offset}"
            ),
            Self::NonIncreasing {
                ring,
                offset,
                previous,
            } => write!(
                f,
                "invalid ring boundaries: ring {ring} ends at {offset}, must be greater than {previous}"
            ),
            Self::ExceedsPointCount {
                ring,
                offset,
                points,
            } => write!(
                f,
                "invalid ring boundaries: ring {ring} ends at {offset}, beyond the {points} points given"
            ),
            Self::Incomplete { last, points } => write!(
                f,
                "invalid ring boundaries: last ring ends at {last}, expected the point count {points}"
            ),
            Self::UnpairedCoordinate { len } => write!(
                f,
                "invalid ring boundaries: coordinate buffer of length {len} is not a list of (x, y) pairs"
            ),
            Self::TooManyPoints { points } => write!(
                f,
                "invalid ring boundaries: {points} points cannot be addressed by u32 indices"
            ),
        }
    }
}

impl std::error::Error for RingBoundaryError {}
