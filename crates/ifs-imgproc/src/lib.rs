#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// six-coefficient affine parameters.
pub mod affine;

/// in-memory drawing surface and the polar transform helper.
pub mod canvas;

/// module containing parallelization utilities.
pub mod parallel;

/// image geometric transformations module.
pub mod warp;
