//! Configuration and stage orchestration for the compspace pipeline
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod config;
mod error;
mod run;

// Inline anything important for a nice public API
#[doc(inline)]
pub use config::Config;

#[doc(inline)]
pub use run::{process_file, run, Artifacts, RunSummary};

#[doc(inline)]
pub use error::{Error, Result};
