#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the io module.
pub mod error;

/// PNG image encoding and decoding.
pub mod png;

pub use crate::error::IoError;
pub use crate::png::{decode_image_png_rgba8, read_image_png_rgba8, write_image_png_rgba8};
