//! Standard trait implementations for arrays and views
//!
//! ## Implemented Traits
//!
//! - `Index<usize>` / `IndexMut<usize>` (leading-dimension peel)
//! - `Clone`, `Copy`, `Default`, `Hash`, `Debug`
//! - `PartialEq` / `Eq` between arrays and views of one shape
//! - `IntoIterator` for owned and borrowed containers
//! - `From` / `TryFrom` conversions between arrays, views and `Vec`

use crate::array::NDArray;
use crate::shape::Shape;
use crate::view::{NDView, NDViewMut};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut};
use std::{slice, vec};

impl<T, S: Shape> Index<usize> for NDArray<T, S> {
    type Output = S::Subarray<T>;

    fn index(&self, pos: usize) -> &Self::Output {
        assert!(
            pos < S::LEADING,
            "peel position {} out of range for leading extent {}",
            pos,
            S::LEADING
        );
        // SAFETY: position checked above.
        unsafe { self.peel_unchecked(pos) }
    }
}

impl<T, S: Shape> IndexMut<usize> for NDArray<T, S> {
    fn index_mut(&mut self, pos: usize) -> &mut Self::Output {
        assert!(
            pos < S::LEADING,
            "peel position {} out of range for leading extent {}",
            pos,
            S::LEADING
        );
        // SAFETY: position checked above.
        unsafe { self.peel_unchecked_mut(pos) }
    }
}

impl<T: Clone, S: Shape> Clone for NDArray<T, S> {
    fn clone(&self) -> Self {
        let src = self.as_slice();
        Self::from_fn(|offset| src[offset].clone())
    }
}

impl<T: Copy, S: Shape> Copy for NDArray<T, S> where S::Storage<T>: Copy {}

impl<T: Default, S: Shape> Default for NDArray<T, S> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T: Hash, S: Shape> Hash for NDArray<T, S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: fmt::Debug, S: Shape> fmt::Debug for NDArray<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NDArray")
            .field("shape", &S::extents().as_slice())
            .field("data", &self.as_slice())
            .finish()
    }
}

impl<T: fmt::Debug, S: Shape> fmt::Debug for NDView<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NDView")
            .field("shape", &S::extents().as_slice())
            .field("data", &self.try_slice())
            .finish()
    }
}

impl<T: fmt::Debug, S: Shape> fmt::Debug for NDViewMut<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NDViewMut")
            .field("shape", &S::extents().as_slice())
            .field("data", &self.as_view().try_slice())
            .finish()
    }
}

impl<T: PartialEq, S: Shape> PartialEq for NDArray<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, S: Shape> Eq for NDArray<T, S> {}

/// Two unbound views compare equal; an unbound view never equals a bound one.
impl<'b, T: PartialEq, S: Shape> PartialEq<NDView<'b, T, S>> for NDView<'_, T, S> {
    fn eq(&self, other: &NDView<'b, T, S>) -> bool {
        self.try_slice() == other.try_slice()
    }
}

impl<T: Eq, S: Shape> Eq for NDView<'_, T, S> {}

impl<T: PartialEq, S: Shape> PartialEq<NDView<'_, T, S>> for NDArray<T, S> {
    fn eq(&self, other: &NDView<'_, T, S>) -> bool {
        other.try_slice() == Some(self.as_slice())
    }
}

impl<T: PartialEq, S: Shape> PartialEq<NDArray<T, S>> for NDView<'_, T, S> {
    fn eq(&self, other: &NDArray<T, S>) -> bool {
        other == self
    }
}

impl<T, S: Shape> IntoIterator for NDArray<T, S> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<'a, T, S: Shape> IntoIterator for &'a NDArray<T, S> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, S: Shape> IntoIterator for &'a mut NDArray<T, S> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<'a, T, S: Shape> IntoIterator for NDView<'a, T, S> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, S: Shape> IntoIterator for NDViewMut<'a, T, S> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_slice().iter_mut()
    }
}

impl<T, S: Shape> AsRef<[T]> for NDArray<T, S> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, S: Shape> AsMut<[T]> for NDArray<T, S> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T, S: Shape> From<&'a NDArray<T, S>> for NDView<'a, T, S> {
    fn from(array: &'a NDArray<T, S>) -> Self {
        NDView::new(array)
    }
}

impl<'a, T, S: Shape> From<&'a mut NDArray<T, S>> for NDViewMut<'a, T, S> {
    fn from(array: &'a mut NDArray<T, S>) -> Self {
        NDViewMut::new(array)
    }
}

impl<'a, T, S: Shape> From<NDViewMut<'a, T, S>> for NDView<'a, T, S> {
    fn from(mut view: NDViewMut<'a, T, S>) -> Self {
        let ptr = view.as_mut_ptr().cast_const();
        // SAFETY: the exclusive borrow is downgraded to a shared one for `'a`;
        // an unbound view stays unbound.
        unsafe { NDView::from_ptr(ptr) }
    }
}

impl<T: Clone, S: Shape> From<NDView<'_, T, S>> for NDArray<T, S> {
    fn from(view: NDView<'_, T, S>) -> Self {
        NDArray::from_view(view)
    }
}

impl<T, S: Shape> From<NDArray<T, S>> for Vec<T> {
    fn from(array: NDArray<T, S>) -> Self {
        array.into_vec()
    }
}

impl<T, S: Shape> TryFrom<Vec<T>> for NDArray<T, S> {
    type Error = Vec<T>;

    fn try_from(vec: Vec<T>) -> Result<Self, Self::Error> {
        NDArray::from_vec(vec)
    }
}
