//! Owning fixed-shape array
//!
//! [`NDArray<T, S>`] stores exactly `S::LEN` elements inline, as the nested
//! built-in array `S::Storage<T>` (for `dims![2, 3]` that is `[[T; 3]; 2]`).
//! Nested arrays are contiguous and padding-free, so the same bytes are also
//! the flat row-major buffer returned by [`NDArray::as_slice`].
//!
//! Two access paths with different contracts:
//!
//! - [`NDArray::at`] takes a full coordinate tuple, validates every
//!   coordinate and reports [`NdError::OutOfRange`](crate::NdError) on failure.
//! - `array[pos]` peels the leading dimension and returns either the element
//!   (rank 1) or the sub-array of the remaining shape, by reference. A
//!   position past the leading extent panics; [`NDArray::peel_unchecked`]
//!   skips even that check.

use crate::error::NdResult;
use crate::index::{self, checked_offset};
use crate::iter::IndexedIter;
use crate::shape::{Extents, Shape};
use crate::view::{NDView, NDViewMut};
use std::mem::{ManuallyDrop, MaybeUninit};
use std::{ptr, slice};

/// Fixed-shape, row-major, owning multi-dimensional array
///
/// # Type Parameters
///
/// * `T` - The element type
/// * `S` - The shape, usually written `dims![d0, d1, ...]`
///
/// # Examples
///
/// ```
/// use ndfix_core::{dims, NDArray};
///
/// let mut array = NDArray::<i32, dims![2, 3]>::new([[1, 2, 3], [4, 5, 6]]);
/// assert_eq!(*array.at([1, 2]).unwrap(), 6);
/// assert_eq!(array[1][2], 6);
///
/// array[0][1] = 20;
/// assert_eq!(array.as_slice(), &[1, 20, 3, 4, 5, 6]);
/// ```
#[repr(transparent)]
pub struct NDArray<T, S: Shape> {
    pub(crate) data: S::Storage<T>,
}

impl<T, S: Shape> NDArray<T, S> {
    /// Number of dimensions
    pub const RANK: usize = S::RANK;

    /// Total number of elements
    pub const LEN: usize = S::LEN;

    /// Wrap a built-in nested array
    pub fn new(data: S::Storage<T>) -> Self {
        Self { data }
    }

    /// Build an array by calling `f` with every flat offset in row-major order
    ///
    /// # Examples
    ///
    /// ```
    /// use ndfix_core::{dims, NDArray};
    ///
    /// let array = NDArray::<usize, dims![2, 2]>::from_fn(|offset| offset * 10);
    /// assert_eq!(array.as_slice(), &[0, 10, 20, 30]);
    /// ```
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self {
            data: S::build(0, &mut f),
        }
    }

    /// Create an array with every element set to `value`
    pub fn from_elem(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(|_| value.clone())
    }

    /// Copy the elements aliased by `view` into a new array
    pub fn from_view(view: NDView<'_, T, S>) -> Self
    where
        T: Clone,
    {
        let src = view.as_slice();
        log::trace!("copying {} elements out of a view", src.len());
        Self::from_fn(|offset| src[offset].clone())
    }

    /// Unwrap into the built-in nested array
    pub fn into_inner(self) -> S::Storage<T> {
        self.data
    }

    /// Borrow as the built-in nested array
    pub fn as_nested(&self) -> &S::Storage<T> {
        &self.data
    }

    /// Mutably borrow as the built-in nested array
    pub fn as_nested_mut(&mut self) -> &mut S::Storage<T> {
        &mut self.data
    }

    /// Element at `index`, validating each coordinate
    ///
    /// # Errors
    ///
    /// `OutOfRange` naming the first coordinate (left to right) that is not
    /// smaller than its extent.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndfix_core::{dims, NDArray, NdError};
    ///
    /// let array = NDArray::<u8, dims![2, 3]>::from_fn(|offset| offset as u8);
    /// assert_eq!(*array.at([1, 2]).unwrap(), 5);
    /// assert_eq!(
    ///     array.at([2, 0]),
    ///     Err(NdError::OutOfRange { axis: 0, index: 2, extent: 2 })
    /// );
    /// ```
    pub fn at(&self, index: S::Index) -> NdResult<&T> {
        let offset = checked_offset(S::extent_array().as_ref(), index.as_ref())?;
        Ok(&self.as_slice()[offset])
    }

    /// Mutable element at `index`, validating each coordinate
    ///
    /// # Arguments
    ///
    /// * `index` - One coordinate per dimension
    ///
    /// # Returns
    ///
    /// A mutable reference into the storage; nothing is copied
    ///
    /// # Errors
    ///
    /// Same as [`at`](Self::at).
    ///
    /// # Examples
    ///
    /// ```
    /// use ndfix_core::{dims, NDArray};
    ///
    /// let mut array = NDArray::<f64, dims![2, 2]>::default();
    /// *array.at_mut([1, 0]).unwrap() = 2.5;
    /// assert_eq!(array.as_slice(), &[0.0, 0.0, 2.5, 0.0]);
    /// assert!(array.at_mut([0, 2]).is_err());
    /// ```
    pub fn at_mut(&mut self, index: S::Index) -> NdResult<&mut T> {
        let offset = checked_offset(S::extent_array().as_ref(), index.as_ref())?;
        Ok(&mut self.as_mut_slice()[offset])
    }

    /// Element at `index`, or `None` when any coordinate is out of range
    pub fn get(&self, index: S::Index) -> Option<&T> {
        self.at(index).ok()
    }

    /// Mutable element at `index`, or `None` when any coordinate is out of range
    pub fn get_mut(&mut self, index: S::Index) -> Option<&mut T> {
        self.at_mut(index).ok()
    }

    /// Step into the leading dimension without any bounds check
    ///
    /// This is `array[pos]` minus the position check.
    ///
    /// # Arguments
    ///
    /// * `pos` - Position along the leading dimension
    ///
    /// # Returns
    ///
    /// The element at rank 1, the sub-array of the remaining shape otherwise
    ///
    /// # Safety
    ///
    /// `pos` must be smaller than the leading extent `S::LEADING`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndfix_core::{dims, NDArray};
    ///
    /// let array = NDArray::<u8, dims![3, 2]>::new([[1, 2], [3, 4], [5, 6]]);
    /// // SAFETY: 2 < 3
    /// let row = unsafe { array.peel_unchecked(2) };
    /// assert_eq!(row.as_slice(), &[5, 6]);
    /// ```
    pub unsafe fn peel_unchecked(&self, pos: usize) -> &S::Subarray<T> {
        // SAFETY: the caller keeps `pos` in range, so the `S::STRIDE` elements
        // starting at the leading offset lie inside the storage, and
        // `S::Subarray<T>` is layout-compatible with `[T; S::STRIDE]`.
        unsafe {
            &*self
                .as_ptr()
                .add(index::leading_offset::<S>(pos))
                .cast::<S::Subarray<T>>()
        }
    }

    /// Mutable counterpart of [`peel_unchecked`](Self::peel_unchecked)
    ///
    /// # Safety
    ///
    /// `pos` must be smaller than the leading extent `S::LEADING`.
    pub unsafe fn peel_unchecked_mut(&mut self, pos: usize) -> &mut S::Subarray<T> {
        // SAFETY: see `peel_unchecked`; the exclusive borrow of `self` covers
        // the returned sub-array.
        unsafe {
            &mut *self
                .as_mut_ptr()
                .add(index::leading_offset::<S>(pos))
                .cast::<S::Subarray<T>>()
        }
    }

    /// First element of the flat buffer, `None` when empty
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Last element of the flat buffer, `None` when empty
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Mutable first element, `None` when empty
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Mutable last element, `None` when empty
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Extent of every dimension
    pub fn size(&self) -> Extents {
        S::extents()
    }

    /// Number of dimensions
    pub fn rank(&self) -> usize {
        S::RANK
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        S::LEN
    }

    /// `true` when some extent is zero
    pub fn is_empty(&self) -> bool {
        S::LEN == 0
    }

    /// Element strides of the row-major layout
    pub fn strides(&self) -> Extents {
        index::row_major_strides(&S::extents())
    }

    /// Pointer to the first element
    pub fn as_ptr(&self) -> *const T {
        ptr::addr_of!(self.data).cast::<T>()
    }

    /// Mutable pointer to the first element
    pub fn as_mut_ptr(&mut self) -> *mut T {
        ptr::addr_of_mut!(self.data).cast::<T>()
    }

    /// The flat row-major buffer
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `S::Storage<T>` is a nest of arrays holding exactly `S::LEN`
        // contiguous elements of `T` with nothing in between.
        unsafe { slice::from_raw_parts(self.as_ptr(), S::LEN) }
    }

    /// The flat row-major buffer, mutably
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: see `as_slice`.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), S::LEN) }
    }

    /// Iterate over elements in offset order
    ///
    /// The iterator is double-ended, so `iter().rev()` walks the buffer
    /// backwards.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterate mutably over elements in offset order
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Iterate over `(coordinates, element)` pairs in offset order
    ///
    /// # Examples
    ///
    /// ```
    /// use ndfix_core::{dims, NDArray};
    ///
    /// let array = NDArray::<char, dims![2, 2]>::new([['a', 'b'], ['c', 'd']]);
    /// let pairs: Vec<_> = array.indexed_iter().collect();
    /// assert_eq!(pairs[2], ([1, 0], &'c'));
    /// ```
    pub fn indexed_iter(&self) -> IndexedIter<'_, T, S> {
        IndexedIter::new(self.as_slice())
    }

    /// Overwrite every element with a clone of `value`
    ///
    /// # Arguments
    ///
    /// * `value` - The value every element is set to
    ///
    /// # Examples
    ///
    /// ```
    /// use ndfix_core::{dims, NDArray};
    ///
    /// let mut array = NDArray::<String, dims![2, 2]>::default();
    /// array.fill("x".to_string());
    /// assert!(array.iter().all(|s| s == "x"));
    /// ```
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        log::trace!("filling {} elements", S::LEN);
        self.as_mut_slice().fill(value);
    }

    /// Exchange contents with `other`, element by element
    ///
    /// # Arguments
    ///
    /// * `other` - Array of the same shape
    ///
    /// # Examples
    ///
    /// ```
    /// use ndfix_core::{dims, NDArray};
    ///
    /// let mut a = NDArray::<i32, dims![2]>::new([1, 2]);
    /// let mut b = NDArray::<i32, dims![2]>::new([3, 4]);
    /// a.swap(&mut b);
    /// assert_eq!(a.as_slice(), &[3, 4]);
    /// assert_eq!(b.as_slice(), &[1, 2]);
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        log::trace!("swapping {} elements", S::LEN);
        self.as_mut_slice().swap_with_slice(other.as_mut_slice());
    }

    /// Apply `f` to every element, keeping the shape
    pub fn map<U, F>(&self, mut f: F) -> NDArray<U, S>
    where
        F: FnMut(&T) -> U,
    {
        let src = self.as_slice();
        NDArray::from_fn(|offset| f(&src[offset]))
    }

    /// Shared view over this array's storage
    pub fn view(&self) -> NDView<'_, T, S> {
        NDView::new(self)
    }

    /// Exclusive view over this array's storage
    pub fn view_mut(&mut self) -> NDViewMut<'_, T, S> {
        NDViewMut::new(self)
    }

    /// Move the elements into a `Vec` in offset order
    pub fn into_vec(self) -> Vec<T> {
        let this = ManuallyDrop::new(self);
        let mut out = Vec::with_capacity(S::LEN);
        // SAFETY: every element is moved exactly once into the fresh
        // allocation, and `this` is never dropped.
        unsafe {
            ptr::copy_nonoverlapping(this.as_ptr(), out.as_mut_ptr(), S::LEN);
            out.set_len(S::LEN);
        }
        out
    }

    /// Take ownership of exactly `S::LEN` elements from `vec`
    ///
    /// Hands `vec` back unchanged when its length differs.
    pub fn from_vec(mut vec: Vec<T>) -> Result<Self, Vec<T>> {
        if vec.len() != S::LEN {
            return Err(vec);
        }
        let mut data = MaybeUninit::<S::Storage<T>>::uninit();
        // SAFETY: the storage has room for exactly `S::LEN` elements, all of
        // which are initialized from `vec`, whose length is then cleared so
        // the moved elements are not dropped twice.
        unsafe {
            ptr::copy_nonoverlapping(vec.as_ptr(), data.as_mut_ptr().cast::<T>(), S::LEN);
            vec.set_len(0);
            Ok(Self {
                data: data.assume_init(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dims;
    use crate::error::NdError;

    type A234 = NDArray<usize, dims![2, 3, 4]>;

    #[test]
    fn test_at_addresses_row_major_offset() {
        let array = A234::from_fn(|offset| offset);
        for p0 in 0..2 {
            for p1 in 0..3 {
                for p2 in 0..4 {
                    assert_eq!(*array.at([p0, p1, p2]).unwrap(), p0 * 12 + p1 * 4 + p2);
                }
            }
        }
    }

    #[test]
    fn test_at_beyond_inline_extents_rank() {
        type S = dims![2, 1, 3, 1, 2, 1, 2];
        let mut array = NDArray::<u32, S>::from_fn(|offset| offset as u32);
        assert_eq!(array.at([1, 0, 2, 0, 1, 0, 1]), Ok(&23));
        assert_eq!(array.at([0, 0, 1, 0, 0, 0, 0]), Ok(&4));
        assert_eq!(
            array.at([0, 1, 0, 0, 0, 0, 0]),
            Err(NdError::out_of_range(1, 1, 1))
        );
        *array.at_mut([0, 0, 0, 0, 1, 0, 1]).unwrap() = 99;
        assert_eq!(array.as_slice()[3], 99);
    }

    #[test]
    fn test_at_reports_offending_coordinate() {
        let array = NDArray::<i32, dims![2, 3]>::default();
        assert_eq!(array.at([2, 0]), Err(NdError::out_of_range(0, 2, 2)));
        assert_eq!(array.at([0, 3]), Err(NdError::out_of_range(1, 3, 3)));
        assert!(array.at([1, 2]).is_ok());
        assert_eq!(array.get([9, 9]), None);
    }

    #[test]
    fn test_at_mut_writes_in_place() {
        let mut array = NDArray::<i32, dims![2, 3]>::default();
        *array.at_mut([1, 1]).unwrap() = 7;
        assert_eq!(array.as_slice()[4], 7);
        assert!(array.at_mut([0, 5]).is_err());
        if let Some(value) = array.get_mut([0, 0]) {
            *value = -1;
        }
        assert_eq!(array.front(), Some(&-1));
    }

    #[test]
    fn test_peel_matches_at() {
        let array = NDArray::<i32, dims![2, 3]>::new([[1, 2, 3], [4, 5, 6]]);
        let row = &array[1];
        assert_eq!(row.size().as_slice(), &[3]);
        assert_eq!(row[2], *array.at([1, 2]).unwrap());
        assert_eq!(unsafe { *array[0].peel_unchecked(1) }, 2);
    }

    #[test]
    fn test_peel_mut_aliases_storage() {
        let mut array = A234::default();
        array[1][2][3] = 99;
        assert_eq!(array.back(), Some(&99));
        unsafe { *array.peel_unchecked_mut(0).peel_unchecked_mut(0).peel_unchecked_mut(1) = 5 };
        assert_eq!(array.as_slice()[1], 5);
    }

    #[test]
    #[should_panic]
    fn test_peel_past_leading_extent_panics() {
        let array = NDArray::<i32, dims![2, 3]>::default();
        let _ = &array[2];
    }

    #[test]
    fn test_front_back() {
        let array = NDArray::<i32, dims![3]>::new([1, 2, 3]);
        assert_eq!(array.front(), Some(&1));
        assert_eq!(array.back(), Some(&3));

        let empty = NDArray::<i32, dims![0, 3]>::default();
        assert_eq!(empty.front(), None);
        assert_eq!(empty.back(), None);
    }

    #[test]
    fn test_capacity_queries() {
        let array = A234::default();
        assert_eq!(array.size().as_slice(), &[2, 3, 4]);
        assert_eq!(array.rank(), 3);
        assert_eq!(array.len(), 24);
        assert!(!array.is_empty());
        assert_eq!(array.strides().as_slice(), &[12, 4, 1]);
        assert_eq!(A234::RANK, 3);
        assert_eq!(A234::LEN, 24);
    }

    #[test]
    fn test_empty_shape() {
        let array = NDArray::<String, dims![2, 0]>::default();
        assert!(array.is_empty());
        assert_eq!(array.len(), 0);
        assert_eq!(array.iter().count(), 0);
        assert_eq!(array.indexed_iter().count(), 0);
    }

    #[test]
    fn test_fill_non_copy_elements() {
        let mut array = NDArray::<String, dims![2, 2]>::default();
        array.fill("x".to_string());
        assert!(array.iter().all(|s| s == "x"));
    }

    #[test]
    fn test_swap_exchanges_contents() {
        let mut a = NDArray::<i32, dims![2, 2]>::new([[1, 2], [3, 4]]);
        let mut b = NDArray::<i32, dims![2, 2]>::new([[5, 6], [7, 8]]);
        a.swap(&mut b);
        assert_eq!(a.into_inner(), [[5, 6], [7, 8]]);
        assert_eq!(b.into_inner(), [[1, 2], [3, 4]]);
    }

    #[test]
    fn test_swap_with_equal_copy_is_identity() {
        let original = A234::from_fn(|offset| offset * 3);
        let mut a = original.clone();
        let mut b = original.clone();
        a.swap(&mut b);
        assert_eq!(a, original);
        assert_eq!(b, original);
    }

    #[test]
    fn test_reverse_iteration() {
        let array = NDArray::<i32, dims![2, 2]>::new([[1, 2], [3, 4]]);
        let reversed: Vec<_> = array.iter().rev().copied().collect();
        assert_eq!(reversed, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_map_keeps_shape() {
        let array = NDArray::<i32, dims![2, 3]>::from_fn(|offset| offset as i32);
        let strings = array.map(|v| v.to_string());
        assert_eq!(strings.at([1, 0]).unwrap(), "3");
    }

    #[test]
    fn test_vec_round_trip() {
        let array = NDArray::<String, dims![2, 2]>::from_fn(|offset| offset.to_string());
        let vec = array.clone().into_vec();
        assert_eq!(vec, vec!["0", "1", "2", "3"]);
        let back = NDArray::<String, dims![2, 2]>::from_vec(vec).unwrap();
        assert_eq!(back, array);

        let short = vec!["a".to_string()];
        let rejected = NDArray::<String, dims![2, 2]>::from_vec(short).unwrap_err();
        assert_eq!(rejected.len(), 1);
    }

    #[test]
    fn test_nested_round_trip() {
        let nested = [[[1u8, 2], [3, 4]], [[5, 6], [7, 8]]];
        let array = NDArray::<u8, dims![2, 2, 2]>::new(nested);
        assert_eq!(*array.at([1, 0, 1]).unwrap(), 6);
        assert_eq!(array.as_nested()[1][1][0], 7);
        assert_eq!(array.into_inner(), nested);
    }
}
