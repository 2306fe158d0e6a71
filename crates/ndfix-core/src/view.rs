//! Non-owning views over contiguous buffers
//!
//! [`NDView`] and [`NDViewMut`] carry a single pointer plus the shape type.
//! They share the indexing semantics of [`NDArray`] but never allocate, copy
//! or free anything:
//!
//! - built from an array (or a nested built-in array) they borrow it, and
//!   the borrow checker keeps the storage alive;
//! - built from a slice they check that it holds at least `S::LEN` elements;
//! - built from a raw pointer (`unsafe`) nothing is checked;
//! - `Default` yields an unbound view with a null pointer. Element access
//!   through an unbound view panics; [`NDView::is_bound`] reports the state.
//!
//! Peeling a view yields the element (rank 1) or a view of the remaining
//! shape. Windows on the leading dimension (`first`, `last`, `subspan`) have
//! compile-time counts; a window that does not fit inside the leading
//! extent fails to compile.

use crate::array::NDArray;
use crate::error::NdResult;
use crate::index::{self, checked_offset};
use crate::iter::IndexedIter;
use crate::shape::{Dim, Extents, Shape};
use std::marker::PhantomData;
use std::{ptr, slice};

const UNBOUND: &str = "element access through an unbound view";

/// Shared, non-owning view with a fixed row-major shape
///
/// # Examples
///
/// ```
/// use ndfix_core::{dims, NDArray, NDView};
///
/// let array = NDArray::<i32, dims![2, 3]>::new([[1, 2, 3], [4, 5, 6]]);
/// let view = NDView::new(&array);
///
/// let row = view.peel(1);
/// assert_eq!(*row.peel(2), 6);
/// assert_eq!(view.first::<1>().as_slice(), &[1, 2, 3]);
/// ```
pub struct NDView<'a, T, S: Shape> {
    ptr: *const T,
    _marker: PhantomData<(&'a T, fn() -> S)>,
}

// SAFETY: an `NDView` behaves like `&'a [T]`.
unsafe impl<T: Sync, S: Shape> Send for NDView<'_, T, S> {}
// SAFETY: an `NDView` behaves like `&'a [T]`.
unsafe impl<T: Sync, S: Shape> Sync for NDView<'_, T, S> {}

impl<T, S: Shape> Clone for NDView<'_, T, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, S: Shape> Copy for NDView<'_, T, S> {}

impl<T, S: Shape> Default for NDView<'_, T, S> {
    fn default() -> Self {
        Self {
            ptr: ptr::null(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T, S: Shape> NDView<'a, T, S> {
    /// View the storage of `array`
    pub fn new(array: &'a NDArray<T, S>) -> Self {
        // SAFETY: the array holds `S::LEN` elements borrowed for `'a`.
        unsafe { Self::from_ptr(array.as_ptr()) }
    }

    /// View a built-in nested array
    pub fn from_nested(data: &'a S::Storage<T>) -> Self {
        // SAFETY: the nested array holds `S::LEN` contiguous elements.
        unsafe { Self::from_ptr(ptr::from_ref(data).cast::<T>()) }
    }

    /// View the first `S::LEN` elements of `data`
    ///
    /// # Arguments
    ///
    /// * `data` - Row-major buffer holding at least `S::LEN` elements
    ///
    /// # Returns
    ///
    /// The view, or `None` when `data` is too short
    ///
    /// # Examples
    ///
    /// ```
    /// use ndfix_core::{dims, NDView};
    ///
    /// let buffer = [1, 2, 3, 4, 5, 6, 7];
    /// let view = NDView::<i32, dims![2, 3]>::from_slice(&buffer).unwrap();
    /// assert_eq!(*view.peel(1).peel(0), 4);
    /// assert!(NDView::<i32, dims![2, 4]>::from_slice(&buffer).is_none());
    /// ```
    pub fn from_slice(data: &'a [T]) -> Option<Self> {
        if data.len() < S::LEN {
            return None;
        }
        // SAFETY: length checked above.
        Some(unsafe { Self::from_ptr(data.as_ptr()) })
    }

    /// View the buffer starting at `ptr`
    ///
    /// # Safety
    ///
    /// `ptr` must be null, or valid for reads of `S::LEN` elements that are
    /// not mutated for `'a`.
    pub unsafe fn from_ptr(ptr: *const T) -> Self {
        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    /// `false` for a default-constructed view
    pub fn is_bound(&self) -> bool {
        !self.ptr.is_null()
    }

    /// Pointer to the first element (null when unbound)
    pub fn as_ptr(&self) -> *const T {
        self.ptr
    }

    pub(crate) fn try_slice(&self) -> Option<&'a [T]> {
        // SAFETY: a bound view points at `S::LEN` readable elements for `'a`.
        self.is_bound()
            .then(|| unsafe { slice::from_raw_parts(self.ptr, S::LEN) })
    }

    /// The aliased flat buffer
    ///
    /// # Panics
    ///
    /// Panics if the view is unbound.
    pub fn as_slice(&self) -> &'a [T] {
        self.try_slice().expect(UNBOUND)
    }

    /// Element at `index`, validating each coordinate
    ///
    /// # Errors
    ///
    /// `OutOfRange` naming the first offending coordinate.
    pub fn at(&self, index: S::Index) -> NdResult<&'a T> {
        let offset = checked_offset(S::extent_array().as_ref(), index.as_ref())?;
        Ok(&self.as_slice()[offset])
    }

    /// Element at `index`, or `None` when any coordinate is out of range
    pub fn get(&self, index: S::Index) -> Option<&'a T> {
        self.at(index).ok()
    }

    /// Step into the leading dimension
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not smaller than the leading extent or the view is
    /// unbound.
    pub fn peel(self, pos: usize) -> S::Subview<'a, T> {
        assert!(
            pos < S::LEADING,
            "peel position {} out of range for leading extent {}",
            pos,
            S::LEADING
        );
        assert!(self.is_bound(), "{}", UNBOUND);
        // SAFETY: both preconditions checked above.
        unsafe { self.peel_unchecked(pos) }
    }

    /// Step into the leading dimension without any check
    ///
    /// # Safety
    ///
    /// The view must be bound and `pos` smaller than `S::LEADING`.
    pub unsafe fn peel_unchecked(self, pos: usize) -> S::Subview<'a, T> {
        // SAFETY: upheld by the caller.
        unsafe { S::subview(self.ptr.add(index::leading_offset::<S>(pos))) }
    }

    /// First element of the flat buffer, `None` when empty
    pub fn front(&self) -> Option<&'a T> {
        self.as_slice().first()
    }

    /// Last element of the flat buffer, `None` when empty
    pub fn back(&self) -> Option<&'a T> {
        self.as_slice().last()
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

    /// Iterate over elements in offset order
    pub fn iter(&self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
    }

    /// Iterate over `(coordinates, element)` pairs in offset order
    pub fn indexed_iter(&self) -> IndexedIter<'a, T, S> {
        IndexedIter::new(self.as_slice())
    }

    /// The first `C` positions of the leading dimension
    ///
    /// # Returns
    ///
    /// A view of shape `dims![C, d1, ...]` sharing this view's storage. An
    /// unbound view yields an unbound window. `C` larger than the leading
    /// extent fails to compile.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndfix_core::{dims, NDArray};
    ///
    /// let array = NDArray::<u8, dims![3, 2]>::new([[1, 2], [3, 4], [5, 6]]);
    /// let head = array.view().first::<2>();
    /// assert_eq!(head.size().as_slice(), &[2, 2]);
    /// assert_eq!(head.as_slice(), &[1, 2, 3, 4]);
    /// ```
    pub fn first<const C: usize>(self) -> NDView<'a, T, Dim<C, S::Tail>>
    where
        Dim<C, S::Tail>: Shape,
    {
        const { assert!(C <= S::LEADING, "window longer than the leading extent") };
        self.window(0)
    }

    /// The last `C` positions of the leading dimension
    ///
    /// # Returns
    ///
    /// A view of shape `dims![C, d1, ...]` starting at position `d0 - C`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndfix_core::{dims, NDArray};
    ///
    /// let array = NDArray::<u8, dims![3, 2]>::new([[1, 2], [3, 4], [5, 6]]);
    /// assert_eq!(array.view().last::<1>().as_slice(), &[5, 6]);
    /// ```
    pub fn last<const C: usize>(self) -> NDView<'a, T, Dim<C, S::Tail>>
    where
        Dim<C, S::Tail>: Shape,
    {
        const { assert!(C <= S::LEADING, "window longer than the leading extent") };
        self.window(S::LEADING - C)
    }

    /// `C` positions of the leading dimension starting at `O`
    ///
    /// ```
    /// use ndfix_core::{dims, NDArray};
    ///
    /// let array = NDArray::<u8, dims![4, 2]>::from_fn(|offset| offset as u8);
    /// let middle = array.view().subspan::<1, 2>();
    /// assert_eq!(middle.size().as_slice(), &[2, 2]);
    /// assert_eq!(middle.as_slice(), &[2, 3, 4, 5]);
    /// ```
    pub fn subspan<const O: usize, const C: usize>(self) -> NDView<'a, T, Dim<C, S::Tail>>
    where
        Dim<C, S::Tail>: Shape,
    {
        const { assert!(O + C <= S::LEADING, "window exceeds the leading extent") };
        self.window(O)
    }

    fn window<W: Shape>(self, start: usize) -> NDView<'a, T, W> {
        if !self.is_bound() {
            return NDView::default();
        }
        // SAFETY: callers assert that the window lies inside the leading
        // extent, so the offset pointer and its `W::LEN` elements are in bounds.
        unsafe { NDView::from_ptr(self.ptr.add(index::leading_offset::<S>(start))) }
    }

    /// Copy the aliased elements into a new array
    pub fn to_ndarray(&self) -> NDArray<T, S>
    where
        T: Clone,
    {
        NDArray::from_view(*self)
    }
}

/// Exclusive, non-owning view with a fixed row-major shape
///
/// # Examples
///
/// ```
/// use ndfix_core::{dims, NDArray};
///
/// let mut array = NDArray::<i32, dims![2, 2]>::default();
/// {
///     let mut view = array.view_mut();
///     *view.peel_mut(1).peel_mut(0) = 9;
///     view.last::<1>().fill(4);
/// }
/// assert_eq!(array.as_slice(), &[0, 0, 4, 4]);
/// ```
pub struct NDViewMut<'a, T, S: Shape> {
    ptr: *mut T,
    _marker: PhantomData<(&'a mut T, fn() -> S)>,
}

// SAFETY: an `NDViewMut` behaves like `&'a mut [T]`.
unsafe impl<T: Send, S: Shape> Send for NDViewMut<'_, T, S> {}
// SAFETY: an `NDViewMut` behaves like `&'a mut [T]`.
unsafe impl<T: Sync, S: Shape> Sync for NDViewMut<'_, T, S> {}

impl<T, S: Shape> Default for NDViewMut<'_, T, S> {
    fn default() -> Self {
        Self {
            ptr: ptr::null_mut(),
            _marker: PhantomData,
        }
    }
}

impl<'a, T, S: Shape> NDViewMut<'a, T, S> {
    /// Exclusively view the storage of `array`
    pub fn new(array: &'a mut NDArray<T, S>) -> Self {
        // SAFETY: the array holds `S::LEN` elements borrowed exclusively for `'a`.
        unsafe { Self::from_ptr(array.as_mut_ptr()) }
    }

    /// Exclusively view a built-in nested array
    pub fn from_nested(data: &'a mut S::Storage<T>) -> Self {
        // SAFETY: the nested array holds `S::LEN` contiguous elements.
        unsafe { Self::from_ptr(ptr::from_mut(data).cast::<T>()) }
    }

    /// Exclusively view the first `S::LEN` elements of `data`
    ///
    /// # Arguments
    ///
    /// * `data` - Row-major buffer holding at least `S::LEN` elements
    ///
    /// # Returns
    ///
    /// The view, or `None` when `data` is too short
    ///
    /// # Examples
    ///
    /// ```
    /// use ndfix_core::{dims, NDViewMut};
    ///
    /// let mut buffer = vec![0u8; 5];
    /// let mut view = NDViewMut::<u8, dims![2, 2]>::from_slice(&mut buffer).unwrap();
    /// view.peel_mut(1).fill(7);
    /// assert_eq!(buffer, [0, 0, 7, 7, 0]);
    /// ```
    pub fn from_slice(data: &'a mut [T]) -> Option<Self> {
        if data.len() < S::LEN {
            return None;
        }
        // SAFETY: length checked above.
        Some(unsafe { Self::from_ptr(data.as_mut_ptr()) })
    }

    /// Exclusively view the buffer starting at `ptr`
    ///
    /// # Safety
    ///
    /// `ptr` must be null, or valid for reads and writes of `S::LEN` elements
    /// that nothing else accesses for `'a`.
    pub unsafe fn from_ptr(ptr: *mut T) -> Self {
        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    /// `false` for a default-constructed view
    pub fn is_bound(&self) -> bool {
        !self.ptr.is_null()
    }

    /// Pointer to the first element (null when unbound)
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr
    }

    /// A shorter-lived exclusive view of the same buffer
    pub fn reborrow(&mut self) -> NDViewMut<'_, T, S> {
        // SAFETY: `self` is exclusively borrowed for the new lifetime.
        unsafe { NDViewMut::from_ptr(self.ptr) }
    }

    /// A shared view of the same buffer
    pub fn as_view(&self) -> NDView<'_, T, S> {
        // SAFETY: `self` is borrowed for the new lifetime, preventing writes.
        unsafe { NDView::from_ptr(self.ptr) }
    }

    /// The aliased flat buffer
    ///
    /// # Panics
    ///
    /// Panics if the view is unbound.
    pub fn as_slice(&self) -> &[T] {
        self.as_view().as_slice()
    }

    /// The aliased flat buffer, mutably
    ///
    /// # Panics
    ///
    /// Panics if the view is unbound.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.reborrow().into_slice()
    }

    /// Convert into the aliased flat buffer for the full lifetime
    ///
    /// # Panics
    ///
    /// Panics if the view is unbound.
    pub fn into_slice(self) -> &'a mut [T] {
        assert!(self.is_bound(), "{}", UNBOUND);
        // SAFETY: a bound view points at `S::LEN` elements exclusively
        // borrowed for `'a`.
        unsafe { slice::from_raw_parts_mut(self.ptr, S::LEN) }
    }

    /// Element at `index`, validating each coordinate
    ///
    /// # Errors
    ///
    /// `OutOfRange` naming the first offending coordinate.
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
    /// # Errors
    ///
    /// `OutOfRange` naming the first offending coordinate.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndfix_core::{dims, NDArray, NdError};
    ///
    /// let mut array = NDArray::<i32, dims![2, 3]>::default();
    /// let mut view = array.view_mut();
    /// *view.at_mut([1, 1])? = 8;
    /// assert_eq!(view.at_mut([2, 0]).unwrap_err(), NdError::out_of_range(0, 2, 2));
    /// assert_eq!(array.as_slice(), &[0, 0, 0, 0, 8, 0]);
    /// # Ok::<(), NdError>(())
    /// ```
    pub fn at_mut(&mut self, index: S::Index) -> NdResult<&mut T> {
        let offset = checked_offset(S::extent_array().as_ref(), index.as_ref())?;
        Ok(&mut self.as_mut_slice()[offset])
    }

    /// Step into the leading dimension, sharing
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not smaller than the leading extent or the view is
    /// unbound.
    pub fn peel(&self, pos: usize) -> S::Subview<'_, T> {
        self.as_view().peel(pos)
    }

    /// Step into the leading dimension, exclusively
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not smaller than the leading extent or the view is
    /// unbound.
    pub fn peel_mut(&mut self, pos: usize) -> S::SubviewMut<'_, T> {
        self.reborrow().into_peel(pos)
    }

    /// Step into the leading dimension, consuming the view
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not smaller than the leading extent or the view is
    /// unbound.
    pub fn into_peel(self, pos: usize) -> S::SubviewMut<'a, T> {
        assert!(
            pos < S::LEADING,
            "peel position {} out of range for leading extent {}",
            pos,
            S::LEADING
        );
        assert!(self.is_bound(), "{}", UNBOUND);
        // SAFETY: both preconditions checked above.
        unsafe { self.peel_unchecked(pos) }
    }

    /// Step into the leading dimension without any check, consuming the view
    ///
    /// # Arguments
    ///
    /// * `pos` - Position along the leading dimension
    ///
    /// # Safety
    ///
    /// The view must be bound and `pos` smaller than `S::LEADING`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndfix_core::{dims, NDArray};
    ///
    /// let mut array = NDArray::<u8, dims![2, 2]>::default();
    /// // SAFETY: the view is bound and 1 < 2
    /// let mut row = unsafe { array.view_mut().peel_unchecked(1) };
    /// row.fill(3);
    /// assert_eq!(array.as_slice(), &[0, 0, 3, 3]);
    /// ```
    pub unsafe fn peel_unchecked(self, pos: usize) -> S::SubviewMut<'a, T> {
        // SAFETY: upheld by the caller.
        unsafe { S::subview_mut(self.ptr.add(index::leading_offset::<S>(pos))) }
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

    /// Iterate over elements in offset order
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterate mutably over elements in offset order
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Iterate over `(coordinates, element)` pairs in offset order
    pub fn indexed_iter(&self) -> IndexedIter<'_, T, S> {
        IndexedIter::new(self.as_slice())
    }

    /// Overwrite every aliased element with a clone of `value`
    ///
    /// # Panics
    ///
    /// Panics if the view is unbound.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndfix_core::{dims, NDArray};
    ///
    /// let mut array = NDArray::<char, dims![2, 3]>::default();
    /// array.view_mut().peel_mut(0).fill('a');
    /// assert_eq!(array.as_slice(), &['a', 'a', 'a', '\0', '\0', '\0']);
    /// ```
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        log::trace!("filling {} viewed elements", S::LEN);
        self.as_mut_slice().fill(value);
    }

    /// Exchange the aliased contents of two views, element by element
    ///
    /// # Arguments
    ///
    /// * `other` - View of the same shape, possibly over another array
    ///
    /// # Panics
    ///
    /// Panics if either view is unbound.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndfix_core::{dims, NDArray};
    ///
    /// let mut array = NDArray::<i32, dims![2, 2]>::new([[1, 2], [3, 4]]);
    /// let (top, bottom) = array.as_mut_slice().split_at_mut(2);
    /// let mut top = ndfix_core::NDViewMut::<i32, dims![2]>::from_slice(top).unwrap();
    /// let mut bottom = ndfix_core::NDViewMut::<i32, dims![2]>::from_slice(bottom).unwrap();
    /// top.swap(&mut bottom);
    /// assert_eq!(array.as_slice(), &[3, 4, 1, 2]);
    /// ```
    pub fn swap(&mut self, other: &mut NDViewMut<'_, T, S>) {
        log::trace!("swapping {} viewed elements", S::LEN);
        self.as_mut_slice().swap_with_slice(other.as_mut_slice());
    }

    /// The first `C` positions of the leading dimension
    pub fn first<const C: usize>(self) -> NDViewMut<'a, T, Dim<C, S::Tail>>
    where
        Dim<C, S::Tail>: Shape,
    {
        const { assert!(C <= S::LEADING, "window longer than the leading extent") };
        self.window(0)
    }

    /// The last `C` positions of the leading dimension
    pub fn last<const C: usize>(self) -> NDViewMut<'a, T, Dim<C, S::Tail>>
    where
        Dim<C, S::Tail>: Shape,
    {
        const { assert!(C <= S::LEADING, "window longer than the leading extent") };
        self.window(S::LEADING - C)
    }

    /// `C` positions of the leading dimension starting at `O`
    pub fn subspan<const O: usize, const C: usize>(self) -> NDViewMut<'a, T, Dim<C, S::Tail>>
    where
        Dim<C, S::Tail>: Shape,
    {
        const { assert!(O + C <= S::LEADING, "window exceeds the leading extent") };
        self.window(O)
    }

    fn window<W: Shape>(self, start: usize) -> NDViewMut<'a, T, W> {
        if !self.is_bound() {
            return NDViewMut::default();
        }
        // SAFETY: callers assert that the window lies inside the leading
        // extent; the exclusive borrow moves into the returned view.
        unsafe { NDViewMut::from_ptr(self.ptr.add(index::leading_offset::<S>(start))) }
    }

    /// Copy the aliased elements into a new array
    pub fn to_ndarray(&self) -> NDArray<T, S>
    where
        T: Clone,
    {
        NDArray::from_view(self.as_view())
    }
}
