/*!
 * Base primitives shared by the mathdisplay crates.
 */
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(missing_copy_implementations)]

pub mod color;
pub mod geom;

pub use color::ColorU8;
