#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use ifs_image as image;

#[doc(inline)]
pub use ifs_imgproc as imgproc;

#[doc(inline)]
pub use ifs_io as io;
