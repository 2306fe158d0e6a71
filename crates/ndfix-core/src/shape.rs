//! Type-level shapes and the dimension-peeling derivation.
//!
//! A shape is a cons list of const extents: `Dim<2, Dim<3, Dim<4>>>`, usually
//! spelled with the [`dims!`](crate::dims) macro. The [`Shape`] trait derives
//! everything the containers need from that type alone:
//!
//! - the element count and per-dimension extents,
//! - the nested built-in array used as owned storage,
//! - the result type of stepping into the leading dimension, which is the
//!   element itself at rank 1 and a container of the remaining shape
//!   otherwise.
//!
//! Nothing here exists at runtime; every associated item is resolved during
//! monomorphization.
//!
//! # Examples
//!
//! ```
//! use ndfix_core::{dims, Extent, Shape};
//!
//! type S = dims![2, 3, 4];
//! assert_eq!(S::RANK, 3);
//! assert_eq!(S::LEN, 24);
//! assert_eq!(S::STRIDE, 12);
//! assert_eq!(<S as Extent<2>>::EXTENT, 4);
//! assert_eq!(S::extents().as_slice(), &[2, 3, 4]);
//! ```

use crate::array::NDArray;
use crate::view::{NDView, NDViewMut};
use smallvec::SmallVec;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// Per-dimension extents of a shape.
///
/// Inline for shapes up to rank 6, heap-allocated beyond that.
pub type Extents = SmallVec<[usize; 6]>;

/// One dimension of extent `N` followed by the dimensions in `R`.
///
/// Never instantiated; it only names a shape at the type level.
pub struct Dim<const N: usize, R = End>(PhantomData<fn() -> R>);

/// Terminator of a [`Dim`] list.
pub enum End {}

mod sealed {
    pub trait Sealed {}
}

impl<const N: usize, R> sealed::Sealed for Dim<N, R> {}

/// Build a shape type from a list of extents.
///
/// ```
/// use ndfix_core::{dims, Dim, Shape};
/// use std::marker::PhantomData;
///
/// let _: PhantomData<Dim<2, Dim<3>>> = PhantomData::<dims![2, 3]>;
/// assert_eq!(<dims![5]>::LEN, 5);
/// ```
#[macro_export]
macro_rules! dims {
    ($d:expr) => {
        $crate::Dim<{ $d }>
    };
    ($d:expr, $($rest:expr),+) => {
        $crate::Dim<{ $d }, $crate::dims!($($rest),+)>
    };
}

/// A full coordinate tuple, `[usize; RANK]`.
pub trait Coords:
    Copy
    + Default
    + Eq
    + Hash
    + fmt::Debug
    + AsRef<[usize]>
    + AsMut<[usize]>
    + Send
    + Sync
    + 'static
{
}

/// The coordinate array one rank higher.
pub trait Prepend: Coords {
    /// `[usize; RANK + 1]`
    type Output: Coords;
}

macro_rules! impl_coords {
    ($($n:literal),*) => {
        $(impl Coords for [usize; $n] {})*
    };
}

macro_rules! impl_prepend {
    ($($n:literal => $m:literal),*) => {
        $(impl Prepend for [usize; $n] {
            type Output = [usize; $m];
        })*
    };
}

impl_coords!(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12);
impl_prepend!(
    1 => 2, 2 => 3, 3 => 4, 4 => 5, 5 => 6, 6 => 7,
    7 => 8, 8 => 9, 9 => 10, 10 => 11, 11 => 12
);

/// Compile-time description of a fixed row-major shape.
///
/// Implemented for `Dim<N, End>` (rank 1) and `Dim<N, Dim<M, R>>` (rank > 1).
/// The trait is sealed: the container types rely on the layout guarantees
/// documented on each associated type.
pub trait Shape: sealed::Sealed {
    /// Shape left after peeling the leading dimension (`End` at rank 1).
    type Tail;

    /// Coordinate tuple accepted by validated access.
    type Index: Coords;

    /// Nested built-in array holding `LEN` contiguous elements in row-major order.
    type Storage<T>;

    /// Owned result of peeling: `T` at rank 1, `NDArray<T, Tail>` otherwise.
    ///
    /// Layout-compatible with `[T; STRIDE]`.
    type Subarray<T>;

    /// Shared peel result: `&'a T` at rank 1, `NDView<'a, T, Tail>` otherwise.
    type Subview<'a, T: 'a>;

    /// Exclusive peel result: `&'a mut T` at rank 1, `NDViewMut<'a, T, Tail>` otherwise.
    type SubviewMut<'a, T: 'a>;

    /// This shape with the last extent replaced by `B`.
    type Bytes<const B: usize>;

    /// Number of dimensions.
    const RANK: usize;

    /// Extent of the leading dimension.
    const LEADING: usize;

    /// Elements spanned by one step of the leading dimension.
    const STRIDE: usize;

    /// Extent of the last dimension.
    const LAST: usize;

    /// Total element count.
    const LEN: usize;

    /// Extent of dimension `axis`, or `None` past the rank.
    fn extent(axis: usize) -> Option<usize>;

    /// Append every extent to `out`, leading dimension first.
    fn push_extents(out: &mut Extents);

    /// All extents, leading dimension first.
    fn extents() -> Extents {
        let mut out = Extents::new();
        Self::push_extents(&mut out);
        out
    }

    /// Write every extent into `out[..RANK]`, leading dimension first.
    #[doc(hidden)]
    fn write_extents(out: &mut [usize]);

    /// All extents as a coordinate tuple.
    ///
    /// Unlike [`extents`](Self::extents) this never touches the heap, at any
    /// rank.
    ///
    /// ```
    /// use ndfix_core::{dims, Shape};
    ///
    /// assert_eq!(<dims![2, 3, 4]>::extent_array(), [2, 3, 4]);
    /// ```
    fn extent_array() -> Self::Index {
        let mut out = Self::Index::default();
        Self::write_extents(out.as_mut());
        out
    }

    /// Build storage by calling `f` with each flat offset, starting at `base`.
    #[doc(hidden)]
    fn build<T, F: FnMut(usize) -> T>(base: usize, f: &mut F) -> Self::Storage<T>;

    /// # Safety
    ///
    /// `ptr` must be valid for reads of `STRIDE` elements for `'a`.
    #[doc(hidden)]
    unsafe fn subview<'a, T: 'a>(ptr: *const T) -> Self::Subview<'a, T>;

    /// # Safety
    ///
    /// `ptr` must be valid for exclusive access to `STRIDE` elements for `'a`.
    #[doc(hidden)]
    unsafe fn subview_mut<'a, T: 'a>(ptr: *mut T) -> Self::SubviewMut<'a, T>;
}

impl<const N: usize> Shape for Dim<N, End> {
    type Tail = End;
    type Index = [usize; 1];
    type Storage<T> = [T; N];
    type Subarray<T> = T;
    type Subview<'a, T: 'a> = &'a T;
    type SubviewMut<'a, T: 'a> = &'a mut T;
    type Bytes<const B: usize> = Dim<B, End>;

    const RANK: usize = 1;
    const LEADING: usize = N;
    const STRIDE: usize = 1;
    const LAST: usize = N;
    const LEN: usize = N;

    fn extent(axis: usize) -> Option<usize> {
        (axis == 0).then_some(N)
    }

    fn push_extents(out: &mut Extents) {
        out.push(N);
    }

    fn write_extents(out: &mut [usize]) {
        out[0] = N;
    }

    fn build<T, F: FnMut(usize) -> T>(base: usize, f: &mut F) -> Self::Storage<T> {
        std::array::from_fn(|i| f(base + i))
    }

    unsafe fn subview<'a, T: 'a>(ptr: *const T) -> Self::Subview<'a, T> {
        unsafe { &*ptr }
    }

    unsafe fn subview_mut<'a, T: 'a>(ptr: *mut T) -> Self::SubviewMut<'a, T> {
        unsafe { &mut *ptr }
    }
}

impl<const N: usize, const M: usize, R> Shape for Dim<N, Dim<M, R>>
where
    Dim<M, R>: Shape,
    <Dim<M, R> as Shape>::Index: Prepend,
{
    type Tail = Dim<M, R>;
    type Index = <<Dim<M, R> as Shape>::Index as Prepend>::Output;
    type Storage<T> = [<Dim<M, R> as Shape>::Storage<T>; N];
    type Subarray<T> = NDArray<T, Dim<M, R>>;
    type Subview<'a, T: 'a> = NDView<'a, T, Dim<M, R>>;
    type SubviewMut<'a, T: 'a> = NDViewMut<'a, T, Dim<M, R>>;
    type Bytes<const B: usize> = Dim<N, <Dim<M, R> as Shape>::Bytes<B>>;

    const RANK: usize = 1 + <Dim<M, R> as Shape>::RANK;
    const LEADING: usize = N;
    const STRIDE: usize = <Dim<M, R> as Shape>::LEN;
    const LAST: usize = <Dim<M, R> as Shape>::LAST;
    const LEN: usize = N * <Dim<M, R> as Shape>::LEN;

    fn extent(axis: usize) -> Option<usize> {
        match axis {
            0 => Some(N),
            _ => <Dim<M, R> as Shape>::extent(axis - 1),
        }
    }

    fn push_extents(out: &mut Extents) {
        out.push(N);
        <Dim<M, R> as Shape>::push_extents(out);
    }

    fn write_extents(out: &mut [usize]) {
        out[0] = N;
        <Dim<M, R> as Shape>::write_extents(&mut out[1..]);
    }

    fn build<T, F: FnMut(usize) -> T>(base: usize, f: &mut F) -> Self::Storage<T> {
        std::array::from_fn(|i| <Dim<M, R> as Shape>::build(base + i * Self::STRIDE, &mut *f))
    }

    unsafe fn subview<'a, T: 'a>(ptr: *const T) -> Self::Subview<'a, T> {
        unsafe { NDView::from_ptr(ptr) }
    }

    unsafe fn subview_mut<'a, T: 'a>(ptr: *mut T) -> Self::SubviewMut<'a, T> {
        unsafe { NDViewMut::from_ptr(ptr) }
    }
}

/// Extent of dimension `AXIS`, resolved at compile time.
///
/// Only implemented for axes below the rank, so asking for a missing
/// dimension fails to compile.
pub trait Extent<const AXIS: usize>: Shape {
    /// Extent of dimension `AXIS`.
    const EXTENT: usize;
}

impl<const N: usize, R> Extent<0> for Dim<N, R>
where
    Dim<N, R>: Shape,
{
    const EXTENT: usize = N;
}

macro_rules! impl_extent {
    ($($axis:literal => $prev:literal),*) => {
        $(impl<const N: usize, R> Extent<$axis> for Dim<N, R>
        where
            Dim<N, R>: Shape,
            R: Extent<$prev>,
        {
            const EXTENT: usize = <R as Extent<$prev>>::EXTENT;
        })*
    };
}

impl_extent!(
    1 => 0, 2 => 1, 3 => 2, 4 => 3, 5 => 4, 6 => 5,
    7 => 6, 8 => 7, 9 => 8, 10 => 9, 11 => 10
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dims;

    #[test]
    fn test_rank_one_derivation() {
        type S = dims![7];
        assert_eq!(S::RANK, 1);
        assert_eq!(S::LEADING, 7);
        assert_eq!(S::STRIDE, 1);
        assert_eq!(S::LAST, 7);
        assert_eq!(S::LEN, 7);
        assert_eq!(S::extent(0), Some(7));
        assert_eq!(S::extent(1), None);
    }

    #[test]
    fn test_recursive_derivation() {
        type S = dims![2, 3, 4];
        assert_eq!(S::RANK, 3);
        assert_eq!(S::LEADING, 2);
        assert_eq!(S::STRIDE, 12);
        assert_eq!(S::LAST, 4);
        assert_eq!(S::LEN, 24);
        assert_eq!(<<S as Shape>::Tail as Shape>::LEN, 12);
        assert_eq!(S::extents().as_slice(), &[2, 3, 4]);
        assert_eq!(S::extent(2), Some(4));
        assert_eq!(S::extent(3), None);
    }

    #[test]
    fn test_compile_time_extents() {
        type S = dims![5, 1, 9, 2];
        assert_eq!(<S as Extent<0>>::EXTENT, 5);
        assert_eq!(<S as Extent<1>>::EXTENT, 1);
        assert_eq!(<S as Extent<2>>::EXTENT, 9);
        assert_eq!(<S as Extent<3>>::EXTENT, 2);
    }

    #[test]
    fn test_zero_extent_has_no_elements() {
        type S = dims![3, 0, 2];
        assert_eq!(S::LEN, 0);
        assert_eq!(S::STRIDE, 0);
        assert_eq!(S::extents().as_slice(), &[3, 0, 2]);
    }

    #[test]
    fn test_storage_is_nested_builtin_array() {
        let storage: <dims![2, 3] as Shape>::Storage<u8> = [[0; 3]; 2];
        assert_eq!(std::mem::size_of_val(&storage), 6);

        let mut next = |offset: usize| offset as u8;
        let built = <dims![2, 3] as Shape>::build(0, &mut next);
        assert_eq!(built, [[0, 1, 2], [3, 4, 5]]);
    }

    #[test]
    fn test_bytes_shape_rescales_last_extent() {
        type B = <dims![2, 3] as Shape>::Bytes<12>;
        assert_eq!(<B as Shape>::extents().as_slice(), &[2, 12]);
    }

    #[test]
    fn test_high_rank_extents_spill_to_heap() {
        type S = dims![1, 2, 1, 2, 1, 2, 1, 2];
        assert_eq!(S::RANK, 8);
        assert_eq!(S::LEN, 16);
        let extents = S::extents();
        assert!(extents.spilled());
        assert_eq!(extents.as_slice(), &[1, 2, 1, 2, 1, 2, 1, 2]);
        assert_eq!(S::extent_array(), [1, 2, 1, 2, 1, 2, 1, 2]);
    }

    #[test]
    fn test_extent_array_matches_extents() {
        type S = dims![3, 0, 2];
        assert_eq!(S::extent_array(), [3, 0, 2]);
        assert_eq!(<dims![9]>::extent_array(), [9]);
    }
}
