//! Parser and labeling logic for `.rrng` ion range files
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod label;
mod range;
mod reader;

pub mod parsers;

// Inline anything important for a nice public API
#[doc(inline)]
pub use range::{Ion, RangeEntry, RangeTable};

#[doc(inline)]
pub use label::{LabeledAtom, LabeledCloud};

#[doc(inline)]
pub use reader::read_rrng_file;

#[doc(inline)]
pub use error::{Error, Result};
