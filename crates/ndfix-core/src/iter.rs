//! Coordinate-carrying iteration

use crate::index;
use crate::shape::Shape;
use std::iter::FusedIterator;
use std::slice;

/// Iterator over `(coordinates, &element)` pairs in row-major order
///
/// Created by `indexed_iter` on arrays and views.
pub struct IndexedIter<'a, T, S: Shape> {
    iter: slice::Iter<'a, T>,
    coords: S::Index,
    extents: S::Index,
}

impl<'a, T, S: Shape> IndexedIter<'a, T, S> {
    pub(crate) fn new(data: &'a [T]) -> Self {
        Self {
            iter: data.iter(),
            coords: S::Index::default(),
            extents: S::extent_array(),
        }
    }
}

impl<'a, T, S: Shape> Iterator for IndexedIter<'a, T, S> {
    type Item = (S::Index, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next()?;
        let coords = self.coords;
        index::advance(self.coords.as_mut(), self.extents.as_ref());
        Some((coords, item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T, S: Shape> ExactSizeIterator for IndexedIter<'_, T, S> {}

impl<T, S: Shape> FusedIterator for IndexedIter<'_, T, S> {}

#[cfg(test)]
mod tests {
    use crate::{dims, NDArray};

    #[test]
    fn test_indexed_iter_coordinates_follow_offsets() {
        let array = NDArray::<usize, dims![2, 3, 2]>::from_fn(|offset| offset);
        let mut seen = 0;
        for (coords, &value) in array.indexed_iter() {
            assert_eq!(array.at(coords), Ok(&value));
            seen += 1;
        }
        assert_eq!(seen, 12);
    }

    #[test]
    fn test_indexed_iter_len() {
        let array = NDArray::<u8, dims![4, 5]>::default();
        let mut iter = array.indexed_iter();
        assert_eq!(iter.len(), 20);
        iter.next();
        assert_eq!(iter.len(), 19);
    }
}
