//! Module for reading vendor APT point cloud files
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod cloud;
mod error;
mod reader;

// Inline anything important for a nice public API
#[doc(inline)]
pub use cloud::{PointCloud, RawAtom};

#[doc(inline)]
pub use reader::read_pos_file;

#[doc(inline)]
pub use error::{Error, Result};
