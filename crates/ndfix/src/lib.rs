//! # ndfix - Fixed-Shape Multidimensional Arrays
//!
//! Owned arrays and non-owning views whose extents are part of the type.
//! The rank, every extent and the element count are known at compile time,
//! so arrays live inline (no heap allocation) and have exactly the layout of
//! the equivalent nested built-in array.
//!
//! This is the **meta crate** that re-exports the ndfix components for
//! convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use ndfix::prelude::*;
//!
//! let mut image = NDArray::<u8, dims![4, 6]>::default();
//! image[2].fill(255);
//! assert_eq!(*image.at([2, 5])?, 255);
//! assert!(image.at([4, 0]).is_err());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Core Containers ([`core`])
//!
//! [`NDArray`], [`NDView`], [`NDViewMut`] and the type-level [`Shape`]
//! machinery.
//!
//! ```
//! use ndfix::core::{dims, NDArray, NDView};
//!
//! let nested = [[1, 2], [3, 4], [5, 6]];
//! let view = NDView::<i32, dims![3, 2]>::from_nested(&nested);
//! let owned: NDArray<i32, dims![3, 2]> = view.into();
//! assert_eq!(owned.into_inner(), nested);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize` / `Deserialize` for [`NDArray`] as a flat
//!   row-major sequence

pub use ndfix_core as core;

pub use ndfix_core::dims;
pub use ndfix_core::{
    Coords, Dim, End, Extent, Extents, IndexedIter, NDArray, NDView, NDViewMut, NdError,
    NdResult, Prepend, Shape,
};

/// Prelude module for convenient imports
///
/// ```
/// use ndfix::prelude::*;
///
/// type S = dims![2, 2];
/// let array = NDArray::<f64, S>::from_elem(1.0);
/// assert_eq!(<S as Extent<1>>::EXTENT, 2);
/// assert_eq!(array.iter().sum::<f64>(), 4.0);
/// ```
pub mod prelude {
    pub use ndfix_core::prelude::*;
}
