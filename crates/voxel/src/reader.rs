//! Read operations for stage containers

// standard library
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// crate modules
use crate::container::{CompositionContainer, SlabContainer, VoxelContainer};
use crate::error::Result;

/// Read a [SlabContainer] from a binary container file
///
/// ```rust, no_run
/// # use compspace_voxel::read_slab_file;
/// let slabs = read_slab_file("./output/R5096_chunks.slab").unwrap();
/// println!("{slabs}");
/// ```
pub fn read_slab_file<P: AsRef<Path>>(path: P) -> Result<SlabContainer> {
    let reader = init_reader(path)?;
    Ok(bincode::deserialize_from(reader)?)
}

/// Read a [VoxelContainer] from a binary container file
pub fn read_voxel_file<P: AsRef<Path>>(path: P) -> Result<VoxelContainer> {
    let reader = init_reader(path)?;
    Ok(bincode::deserialize_from(reader)?)
}

/// Read a [CompositionContainer] from a binary container file
pub fn read_composition_file<P: AsRef<Path>>(path: P) -> Result<CompositionContainer> {
    let reader = init_reader(path)?;
    Ok(bincode::deserialize_from(reader)?)
}

/// Initialise a reader from anything that can be turned into a path
fn init_reader(path: impl AsRef<Path>) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}
