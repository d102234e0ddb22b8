//! Binary persistence: volume, light and render-config blobs plus the
//! container file that bundles them.
#![forbid(unsafe_code)]

mod bytes;
pub mod container;
pub mod error;
pub mod light;
pub mod render_config;
pub mod volume_blob;

use std::fs;
use std::path::Path;

use voxedit_volume::SparseVolume;

pub use container::{BlockReport, LoadReport, SaveBundle, read_container, write_container};
pub use error::{BlobError, BlockIssue, LoadError, SaveError};
pub use light::LightState;
pub use render_config::RenderConfig;
pub use volume_blob::{decode_volume, encode_volume};

/// Writes a document to `path`.
pub fn save_to_path(
    path: impl AsRef<Path>,
    volume: &SparseVolume,
    light: &LightState,
    render: &RenderConfig,
) -> Result<(), SaveError> {
    let path = path.as_ref();
    let bytes = write_container(volume, light, render)?;
    fs::write(path, &bytes)?;
    log::info!("saved {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Reads a document (container or bare volume blob) from `path`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<(SaveBundle, LoadReport), LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let out = read_container(&bytes)?;
    log::info!("loaded {} ({} bytes)", path.display(), bytes.len());
    Ok(out)
}
