//! Row-major linearization of coordinate tuples
//!
//! For extents `(d0, ..., dk-1)` the flat offset of `(p0, ..., pk-1)` is
//! `Σ pi * Π(d_{i+1}..dk-1)`: the last coordinate varies fastest. Offsets are
//! accumulated Horner-style (`acc * di + pi`), so zero extents never reach a
//! division.

use crate::error::{NdError, NdResult};
use crate::shape::{Extents, Shape};

/// Flat offset of `coords` within `extents`, validating every coordinate.
///
/// Coordinates are checked left to right and the first one that is not
/// smaller than its extent is reported; later coordinates are not examined.
///
/// # Arguments
///
/// * `extents` - Extent of every dimension, leading dimension first
/// * `coords` - One coordinate per dimension
///
/// # Returns
///
/// The row-major offset, or `OutOfRange` for the first offending coordinate
///
/// # Panics
///
/// Panics if `coords` and `extents` differ in length.
///
/// # Examples
///
/// ```
/// use ndfix_core::index::checked_offset;
/// use ndfix_core::NdError;
///
/// assert_eq!(checked_offset(&[2, 3, 4], &[1, 2, 3]), Ok(23));
/// assert_eq!(
///     checked_offset(&[2, 3], &[2, 0]),
///     Err(NdError::OutOfRange { axis: 0, index: 2, extent: 2 })
/// );
/// ```
pub fn checked_offset(extents: &[usize], coords: &[usize]) -> NdResult<usize> {
    assert_eq!(
        extents.len(),
        coords.len(),
        "coordinate tuple length must match the rank"
    );

    let mut offset = 0;
    for (axis, (&index, &extent)) in coords.iter().zip(extents).enumerate() {
        if index >= extent {
            log::debug!(
                "rejected coordinate {} on axis {} of shape {:?}",
                index,
                axis,
                extents
            );
            return Err(NdError::out_of_range(axis, index, extent));
        }
        offset = offset * extent + index;
    }
    Ok(offset)
}

/// Offset contribution of the leading coordinate alone.
///
/// This is the single-step peel computation and performs no validation.
#[inline]
pub fn leading_offset<S: Shape>(pos: usize) -> usize {
    pos * S::STRIDE
}

/// Element strides of a contiguous row-major layout.
///
/// ```
/// use ndfix_core::index::row_major_strides;
///
/// assert_eq!(row_major_strides(&[2, 3, 4]).as_slice(), &[12, 4, 1]);
/// ```
pub fn row_major_strides(extents: &[usize]) -> Extents {
    let mut strides: Extents = extents.iter().map(|_| 1).collect();
    let mut acc = 1;
    for (stride, &extent) in strides.iter_mut().zip(extents).rev() {
        *stride = acc;
        acc *= extent;
    }
    strides
}

/// Step `coords` to the next position in row-major order.
///
/// Returns `false` once every position has been visited, leaving `coords`
/// back at all zeros.
pub fn advance(coords: &mut [usize], extents: &[usize]) -> bool {
    for (coord, &extent) in coords.iter_mut().zip(extents).rev() {
        *coord += 1;
        if *coord < extent {
            return true;
        }
        *coord = 0;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dims;

    #[test]
    fn test_offset_matches_weighted_sum() {
        let extents = [2, 3, 4];
        for p0 in 0..2 {
            for p1 in 0..3 {
                for p2 in 0..4 {
                    assert_eq!(
                        checked_offset(&extents, &[p0, p1, p2]).unwrap(),
                        p0 * 12 + p1 * 4 + p2
                    );
                }
            }
        }
    }

    #[test]
    fn test_first_failing_coordinate_wins() {
        let err = checked_offset(&[2, 3], &[5, 9]).unwrap_err();
        assert_eq!(err, NdError::out_of_range(0, 5, 2));

        let err = checked_offset(&[2, 3], &[0, 3]).unwrap_err();
        assert_eq!(err, NdError::out_of_range(1, 3, 3));
    }

    #[test]
    #[should_panic(expected = "must match the rank")]
    fn test_short_coordinate_tuple_panics() {
        let _ = checked_offset(&[2, 3], &[1]);
    }

    #[test]
    #[should_panic(expected = "must match the rank")]
    fn test_long_coordinate_tuple_panics() {
        let _ = checked_offset(&[2, 3], &[1, 2, 9]);
    }

    #[test]
    fn test_zero_extent_rejects_every_coordinate() {
        let err = checked_offset(&[3, 0], &[1, 0]).unwrap_err();
        assert_eq!(err, NdError::out_of_range(1, 0, 0));
    }

    #[test]
    fn test_leading_offset() {
        assert_eq!(leading_offset::<dims![2, 3, 4]>(1), 12);
        assert_eq!(leading_offset::<dims![5]>(3), 3);
    }

    #[test]
    fn test_strides() {
        assert_eq!(row_major_strides(&[5]).as_slice(), &[1]);
        assert_eq!(row_major_strides(&[2, 0, 3]).as_slice(), &[0, 3, 1]);
    }

    #[test]
    fn test_advance_visits_in_offset_order() {
        let extents = [2, 3];
        let mut coords = [0, 0];
        let mut visited = vec![coords];
        while advance(&mut coords, &extents) {
            visited.push(coords);
        }
        assert_eq!(visited.len(), 6);
        for (offset, c) in visited.iter().enumerate() {
            assert_eq!(checked_offset(&extents, c).unwrap(), offset);
        }
        assert_eq!(coords, [0, 0]);
    }
}
