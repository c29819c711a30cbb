#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use facewarp_image as image;

#[doc(inline)]
pub use facewarp_geometry as geometry;

#[doc(inline)]
pub use facewarp_imgproc as imgproc;

#[doc(inline)]
pub use facewarp_io as io;

#[doc(inline)]
pub use facewarp_face as face;
