//! Editing session: owns the document, tracks edits and rebuilds the mesh.
#![forbid(unsafe_code)]

mod brush;
pub mod config;

use std::error::Error;
use std::path::{Path, PathBuf};

use voxedit_blocks::{Orientation, Voxel, VoxelCatalog};
use voxedit_io::{LightState, LoadError, LoadReport, RenderConfig, SaveError};
use voxedit_mesh_cpu::{MeshParams, VolumeMesh, build_volume_mesh};
use voxedit_volume::SparseVolume;

pub use brush::{Brush, EditOp};
pub use config::EditorConfig;

/// The document being edited plus its mesh and file bookkeeping.
pub struct EditSession {
    catalog: VoxelCatalog,
    config: EditorConfig,
    params: MeshParams,
    volume: SparseVolume,
    light: LightState,
    render: RenderConfig,
    current_file: Option<PathBuf>,
    unsaved: bool,
    mesh: VolumeMesh,
    // Change-tracking
    rev: u64,
    built: u64,
    counter: u64,
}

impl EditSession {
    /// Session on the blank template.
    pub fn new(catalog: VoxelCatalog, config: EditorConfig) -> Self {
        let params = config.mesh_params();
        let mut s = Self {
            catalog,
            config,
            params,
            volume: SparseVolume::new(),
            light: LightState::default(),
            render: RenderConfig::default(),
            current_file: None,
            unsaved: false,
            mesh: VolumeMesh::default(),
            rev: 0,
            built: 0,
            counter: 0,
        };
        s.reset_to_blank();
        s
    }

    /// Loads the catalog named by `config`, or the built-in one if none is set.
    pub fn open_catalog(config: &EditorConfig) -> Result<VoxelCatalog, Box<dyn Error>> {
        match &config.catalog_path {
            Some(p) => VoxelCatalog::load_from_path(p).map_err(|e| -> Box<dyn Error> {
                format!("catalog {}: {}", p.display(), e).into()
            }),
            None => Ok(VoxelCatalog::builtin()),
        }
    }

    fn bump(&mut self) {
        self.counter = self.counter.wrapping_add(1).max(1);
        self.rev = self.counter;
    }

    fn blank_volume(&self) -> SparseVolume {
        let mut vol = SparseVolume::with_extent(self.config.blank_extent);
        let seed = self.config.seed_type;
        if seed != 0 {
            if self.catalog.is_known(seed) {
                vol.set(0, 0, 0, Voxel::new(seed, Orientation::IDENTITY));
            } else {
                log::warn!("seed voxel type {} is not in the catalog; blank left empty", seed);
            }
        }
        vol
    }

    /// Replaces the document with the blank template and default settings.
    pub fn reset_to_blank(&mut self) {
        self.volume = self.blank_volume();
        self.light = LightState::default();
        self.render = RenderConfig::default();
        self.current_file = None;
        self.unsaved = false;
        self.bump();
    }

    /// Places or erases one cell. Erasing outside the volume leaves it unchanged.
    pub fn apply_edit(&mut self, cell: [i32; 3], op: EditOp) {
        let [x, y, z] = cell;
        match op {
            EditOp::Place(v) => {
                if !v.is_empty() && !self.catalog.is_known(v.type_id) {
                    log::warn!("placing unknown voxel type {} at {:?}", v.type_id, cell);
                }
                self.volume.set(x, y, z, v);
            }
            EditOp::Erase => {
                if self.volume.contains(x, y, z) {
                    self.volume.set(x, y, z, Voxel::EMPTY);
                }
            }
        }
        self.unsaved = true;
        self.bump();
    }

    #[inline]
    pub fn needs_rebuild(&self) -> bool {
        self.rev > self.built
    }

    /// Regenerates render and collision meshes from the whole volume.
    pub fn rebuild(&mut self) -> &VolumeMesh {
        self.mesh = build_volume_mesh(&self.volume, &self.catalog, &self.params);
        self.built = self.rev;
        &self.mesh
    }

    /// Last built mesh; may be stale, see [`EditSession::needs_rebuild`].
    #[inline]
    pub fn mesh(&self) -> &VolumeMesh {
        &self.mesh
    }

    /// Container bytes for the current state.
    pub fn snapshot_bytes(&self) -> Result<Vec<u8>, SaveError> {
        voxedit_io::write_container(&self.volume, &self.light, &self.render)
    }

    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), SaveError> {
        let path = path.as_ref();
        voxedit_io::save_to_path(path, &self.volume, &self.light, &self.render)?;
        self.current_file = Some(path.to_path_buf());
        self.unsaved = false;
        Ok(())
    }

    /// Reads `path` and replaces the document. Nothing changes on error.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadReport, LoadError> {
        let path = path.as_ref();
        let (bundle, mut report) = voxedit_io::load_from_path(path)?;

        report.unknown_types = self.catalog.unknown_ids(bundle.volume.cells());
        for (id, count) in &report.unknown_types {
            log::warn!(
                "{}: {} cell(s) use voxel type {} missing from the catalog",
                path.display(),
                count,
                id
            );
        }
        self.volume = if report.volume.loaded {
            bundle.volume
        } else {
            log::warn!("{}: no usable volume, starting from blank", path.display());
            self.blank_volume()
        };
        self.light = bundle.light;
        self.render = bundle.render;
        self.current_file = Some(path.to_path_buf());
        self.unsaved = false;
        self.bump();
        Ok(report)
    }

    #[inline]
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    #[inline]
    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    #[inline]
    pub fn volume(&self) -> &SparseVolume {
        &self.volume
    }

    #[inline]
    pub fn light(&self) -> &LightState {
        &self.light
    }

    /// Light edits count as unsaved changes.
    pub fn light_mut(&mut self) -> &mut LightState {
        self.unsaved = true;
        &mut self.light
    }

    #[inline]
    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    pub fn render_config_mut(&mut self) -> &mut RenderConfig {
        self.unsaved = true;
        &mut self.render
    }

    #[inline]
    pub fn catalog(&self) -> &VoxelCatalog {
        &self.catalog
    }

    #[inline]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[inline]
    pub fn params(&self) -> &MeshParams {
        &self.params
    }
}
