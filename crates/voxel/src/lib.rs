//! Module for slab chunking, voxelisation and composition aggregation
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod chunk;
mod compose;
mod container;
mod error;
mod reader;
mod voxelize;
mod writer;

// Inline anything important for a nice public API
#[doc(inline)]
pub use container::{
    AtomRecord, CompositionContainer, CompositionRecord, SlabContainer, VoxelContainer, VoxelTable,
};

#[doc(inline)]
pub use chunk::chunk_cloud;

#[doc(inline)]
pub use voxelize::{voxelize, VoxelizeOptions, DEFAULT_BUCKET_SIZE, DEFAULT_OCCUPANCY};

#[doc(inline)]
pub use compose::aggregate;

#[doc(inline)]
pub use reader::{read_composition_file, read_slab_file, read_voxel_file};

#[doc(inline)]
pub use writer::{
    write_composition_file, write_composition_json, write_slab_file, write_voxel_file,
};

#[doc(inline)]
pub use error::{Error, Result};
