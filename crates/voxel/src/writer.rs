//! Write operations for stage containers
//!
//! Containers are bincode on disk. Writes go to a `.part` sibling
//! first and are moved into place with an atomic rename, so a crashed
//! run leaves either the previous complete container or nothing. A
//! partially written container is never observable under the final
//! path.

// standard library
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

// crate modules
use crate::container::{CompositionContainer, SlabContainer, VoxelContainer};
use crate::error::Result;

// external crates
use log::info;
use serde::Serialize;

/// Write a [SlabContainer] to a binary container file
///
/// ```rust, no_run
/// # use compspace_voxel::{read_slab_file, write_slab_file};
/// let slabs = read_slab_file("./output/R5096_chunks.slab").unwrap();
/// write_slab_file(&slabs, "./output/copy.slab").unwrap();
/// ```
pub fn write_slab_file<P: AsRef<Path>>(slabs: &SlabContainer, path: P) -> Result<()> {
    atomic_write(slabs, path.as_ref())?;
    info!("Wrote {slabs} to {}", path.as_ref().display());
    Ok(())
}

/// Write a [VoxelContainer] to a binary container file
pub fn write_voxel_file<P: AsRef<Path>>(container: &VoxelContainer, path: P) -> Result<()> {
    atomic_write(container, path.as_ref())?;
    info!("Wrote {container} to {}", path.as_ref().display());
    Ok(())
}

/// Write a [CompositionContainer] to a binary container file
pub fn write_composition_file<P: AsRef<Path>>(
    compositions: &CompositionContainer,
    path: P,
) -> Result<()> {
    atomic_write(compositions, path.as_ref())?;
    info!(
        "Wrote {} composition records to {}",
        compositions.n_records(),
        path.as_ref().display()
    );
    Ok(())
}

/// Write composition records to a JSON file for inspection
///
/// A direct serialisation of the container for debugging and for
/// handoff to tools that do not read the binary containers.
pub fn write_composition_json<P: AsRef<Path>>(
    compositions: &CompositionContainer,
    path: P,
) -> Result<()> {
    let writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(writer, compositions)?;
    Ok(())
}

/// Serialise to a `.part` sibling, then rename over the target
fn atomic_write<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let mut partial = path.as_os_str().to_os_string();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    let writer = BufWriter::new(File::create(&partial)?);
    bincode::serialize_into(writer, value)?;
    std::fs::rename(&partial, path)?;

    Ok(())
}
