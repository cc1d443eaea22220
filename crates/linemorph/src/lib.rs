#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use linemorph_image as image;

#[doc(inline)]
pub use linemorph_imgproc as imgproc;

#[doc(inline)]
pub use linemorph_annotate as annotate;
