//! Byte reinterpretation of views
//!
//! A view over plain-data elements can be reinterpreted as a view over its
//! raw bytes. The leading dimensions are unchanged and the last extent is
//! rescaled by `size_of::<T>()`; the caller spells the rescaled extent `B`
//! and a mismatch fails to compile. The plain-data requirement is carried by
//! the `bytemuck` bounds: `NoUninit` for reading, `Pod` for writing.
//!
//! # Examples
//!
//! ```
//! use ndfix_core::{dims, NDArray};
//!
//! let array = NDArray::<u16, dims![2, 2]>::new([[1, 2], [3, 4]]);
//! let bytes = array.view().as_bytes::<4>();
//! assert_eq!(bytes.size().as_slice(), &[2, 4]);
//! assert_eq!(bytes.peel(1).as_slice(), &[3u16.to_ne_bytes(), 4u16.to_ne_bytes()].concat()[..]);
//! ```

use crate::shape::Shape;
use crate::view::{NDView, NDViewMut};
use bytemuck::{NoUninit, Pod};
use std::mem::size_of;

impl<'a, T: NoUninit, S: Shape> NDView<'a, T, S> {
    /// Reinterpret the aliased elements as bytes
    ///
    /// `B` must equal the last extent times `size_of::<T>()`.
    ///
    /// # Panics
    ///
    /// Panics if the view is unbound.
    pub fn as_bytes<const B: usize>(self) -> NDView<'a, u8, S::Bytes<B>>
    where
        S::Bytes<B>: Shape,
    {
        const {
            assert!(
                B == S::LAST * size_of::<T>(),
                "byte extent must be the last extent times the element size"
            )
        };
        let bytes: &'a [u8] = bytemuck::cast_slice(self.as_slice());
        debug_assert_eq!(bytes.len(), <S::Bytes<B> as Shape>::LEN);
        // SAFETY: `bytes` covers exactly the `S::LEN * size_of::<T>()` bytes
        // of the viewed elements, which is the element count of `S::Bytes<B>`.
        unsafe { NDView::from_ptr(bytes.as_ptr()) }
    }
}

impl<'a, T: Pod, S: Shape> NDViewMut<'a, T, S> {
    /// Reinterpret the aliased elements as mutable bytes
    ///
    /// `B` must equal the last extent times `size_of::<T>()`.
    ///
    /// # Panics
    ///
    /// Panics if the view is unbound.
    pub fn as_bytes_mut<const B: usize>(self) -> NDViewMut<'a, u8, S::Bytes<B>>
    where
        S::Bytes<B>: Shape,
    {
        const {
            assert!(
                B == S::LAST * size_of::<T>(),
                "byte extent must be the last extent times the element size"
            )
        };
        let bytes: &'a mut [u8] = bytemuck::cast_slice_mut(self.into_slice());
        debug_assert_eq!(bytes.len(), <S::Bytes<B> as Shape>::LEN);
        // SAFETY: see `NDView::as_bytes`; the exclusive borrow moves into the
        // returned view.
        unsafe { NDViewMut::from_ptr(bytes.as_mut_ptr()) }
    }
}
