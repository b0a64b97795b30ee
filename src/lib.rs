//! `compspace` is a toolkit for voxelised composition analysis of atom
//! probe tomography data
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use compspace_utils as utils;

#[cfg(feature = "cloud")]
#[cfg_attr(docsrs, doc(cfg(feature = "cloud")))]
#[doc(inline)]
pub use compspace_cloud as cloud;

#[cfg(feature = "rangefile")]
#[cfg_attr(docsrs, doc(cfg(feature = "rangefile")))]
#[doc(inline)]
pub use compspace_rangefile as rangefile;

#[cfg(feature = "voxel")]
#[cfg_attr(docsrs, doc(cfg(feature = "voxel")))]
#[doc(inline)]
pub use compspace_voxel as voxel;

#[cfg(feature = "pipeline")]
#[cfg_attr(docsrs, doc(cfg(feature = "pipeline")))]
#[doc(inline)]
pub use compspace_pipeline as pipeline;
