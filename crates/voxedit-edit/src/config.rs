use std::path::{Path, PathBuf};

use serde::Deserialize;
use voxedit_mesh_cpu::{DEFAULT_VOXEL_SIZE, DEFAULT_WELD_FRACTION, MeshParams};

fn default_voxel_size() -> f32 {
    DEFAULT_VOXEL_SIZE
}
fn default_weld_fraction() -> f32 {
    DEFAULT_WELD_FRACTION
}
fn default_blank_extent() -> usize {
    7
}
fn default_seed_type() -> u8 {
    1
}

/// Editor settings read from `editor.toml`. Missing keys take defaults.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct EditorConfig {
    #[serde(default = "default_voxel_size")]
    pub voxel_size: f32,
    /// Weld radius as a fraction of `voxel_size`.
    #[serde(default = "default_weld_fraction")]
    pub weld_epsilon_fraction: f32,
    /// Edge length of the blank template volume.
    #[serde(default = "default_blank_extent")]
    pub blank_extent: usize,
    /// Voxel placed at the origin of a blank document; 0 leaves it empty.
    #[serde(default = "default_seed_type")]
    pub seed_type: u8,
    #[serde(default)]
    pub startup_file: Option<PathBuf>,
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            voxel_size: default_voxel_size(),
            weld_epsilon_fraction: default_weld_fraction(),
            blank_extent: default_blank_extent(),
            seed_type: default_seed_type(),
            startup_file: None,
            catalog_path: None,
        }
    }
}

impl EditorConfig {
    /// Reads `path`; a missing file or a parse error falls back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("{} not found, using default editor config", path.display());
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(s) => match toml::from_str::<EditorConfig>(&s) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("{} parse error: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("{} read error: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn mesh_params(&self) -> MeshParams {
        let voxel_size = if self.voxel_size.is_finite() && self.voxel_size > 0.0 {
            self.voxel_size
        } else {
            log::warn!(
                "voxel_size {} is not usable, using {}",
                self.voxel_size,
                DEFAULT_VOXEL_SIZE
            );
            DEFAULT_VOXEL_SIZE
        };
        let mut weld_epsilon = voxel_size * self.weld_epsilon_fraction;
        // Zero keeps exact-duplicate welding.
        if weld_epsilon != 0.0 && !(weld_epsilon.is_normal() && weld_epsilon > 0.0) {
            log::warn!(
                "weld_epsilon_fraction {} is not usable, using {}",
                self.weld_epsilon_fraction,
                DEFAULT_WELD_FRACTION
            );
            weld_epsilon = voxel_size * DEFAULT_WELD_FRACTION;
        }
        MeshParams {
            voxel_size,
            weld_epsilon,
        }
    }
}
