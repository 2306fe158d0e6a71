//! Error type for validated element access
//!
//! Only the all-coordinates access path (`at` / `at_mut`) reports errors.
//! Every other entry point is contract-bearing: safe methods panic on a
//! violated precondition and `unsafe` methods document theirs.
//!
//! # Examples
//!
//! ```
//! use ndfix_core::{dims, NDArray, NdError};
//!
//! let array = NDArray::<i32, dims![2, 3]>::default();
//! let err = array.at([0, 3]).unwrap_err();
//! assert_eq!(err, NdError::OutOfRange { axis: 1, index: 3, extent: 3 });
//! ```

use thiserror::Error;

/// Errors raised by validated element access
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NdError {
    /// A coordinate is not smaller than the extent of its dimension
    #[error("index out of range: pos[{axis}] (which is {index}) >= size[{axis}] (which is {extent})")]
    OutOfRange {
        /// Position of the offending coordinate in the index tuple
        axis: usize,
        /// The supplied coordinate
        index: usize,
        /// Extent of dimension `axis`
        extent: usize,
    },
}

impl NdError {
    /// Create an out-of-range error
    pub fn out_of_range(axis: usize, index: usize, extent: usize) -> Self {
        NdError::OutOfRange {
            axis,
            index,
            extent,
        }
    }

    /// The dimension whose bound was violated
    pub fn axis(&self) -> usize {
        match self {
            NdError::OutOfRange { axis, .. } => *axis,
        }
    }
}

/// Result type alias for validated access
pub type NdResult<T> = Result<T, NdError>;
