//! # ndfix-core
//!
//! Fixed-shape multidimensional arrays with compile-time extents.
//!
//! This crate provides the building blocks for statically shaped tensors:
//!
//! - **Owned arrays** ([`NDArray`]) stored as contiguous nested built-in arrays
//! - **Non-owning views** ([`NDView`], [`NDViewMut`]) over storage owned elsewhere
//! - **Type-level shapes** ([`Dim`], [`Shape`], [`dims!`]) that derive rank,
//!   element count, storage and sub-dimension types at compile time
//! - **Checked coordinate access** returning [`NdError::OutOfRange`]
//! - **Byte views** that reinterpret plain-data elements as raw bytes
//!
//! ## Core Principles
//!
//! ### Memory Layout
//!
//! Elements are laid out contiguously in row-major order with no padding or
//! header: the element at coordinates `(i0, .., i(r-1))` lives at offset
//! `i0 * (e1 * .. * e(r-1)) + .. + i(r-1)`. An `NDArray<T, dims![2, 3]>`
//! has the same size and alignment as `[[T; 3]; 2]`.
//!
//! ### Two Access Paths
//!
//! [`NDArray::at`] checks every coordinate against its extent and reports the
//! first violation. Peeling with `array[i]` steps into the leading dimension
//! and yields either the element (rank 1) or a sub-array of the remaining
//! shape; it only checks `i` against the leading extent.
//!
//! ## Quick Start
//!
//! ```
//! use ndfix_core::{dims, NDArray, NdError};
//!
//! let mut grid = NDArray::<i32, dims![2, 3, 4]>::from_fn(|offset| offset as i32);
//! assert_eq!(grid.size().as_slice(), &[2, 3, 4]);
//! assert_eq!(grid.len(), 24);
//!
//! // Checked access
//! assert_eq!(grid.at([1, 2, 3]), Ok(&23));
//! assert_eq!(
//!     grid.at([0, 3, 0]),
//!     Err(NdError::OutOfRange { axis: 1, index: 3, extent: 3 })
//! );
//!
//! // Peeling
//! assert_eq!(grid[1][0][2], 14);
//! grid[0][1][1] = -1;
//! assert_eq!(grid.at([0, 1, 1]), Ok(&-1));
//! ```
//!
//! ## Views
//!
//! ```
//! use ndfix_core::{dims, NDArray};
//!
//! let mut array = NDArray::<u8, dims![4, 2]>::default();
//! {
//!     let mut view = array.view_mut();
//!     view.peel_mut(3).fill(9);
//! }
//! let view = array.view();
//! let tail = view.last::<2>();
//! assert_eq!(tail.as_slice(), &[0, 0, 9, 9]);
//! ```

pub mod array;
mod bytes;
pub mod error;
pub mod index;
pub mod iter;
#[cfg(feature = "serde")]
mod serde_impl;
pub mod shape;
mod traits;
pub mod view;


pub use array::NDArray;
pub use error::{NdError, NdResult};
pub use iter::IndexedIter;
pub use shape::{Coords, Dim, End, Extent, Extents, Prepend, Shape};
pub use view::{NDView, NDViewMut};

/// Commonly used items
pub mod prelude {
    pub use crate::dims;
    pub use crate::{Dim, Extent, NDArray, NDView, NDViewMut, NdError, NdResult, Shape};
}
