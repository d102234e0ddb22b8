use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use voxedit_blocks::{Orientation, Voxel, VoxelCatalog};
use voxedit_edit::{Brush, EditOp, EditSession, EditorConfig};
use voxedit_io::{BlockIssue, LoadError, encode_volume};
use voxedit_volume::SparseVolume;

fn temp_path(name: &str) -> PathBuf {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    let id = NEXT.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("voxedit_{}_{id}_{name}", std::process::id()))
}

fn session() -> EditSession {
    EditSession::new(VoxelCatalog::builtin(), EditorConfig::default())
}

#[test]
fn save_then_load_restores_document() {
    let path = temp_path("roundtrip.vxd");
    let mut s = session();
    let mut brush = Brush::new(4);
    brush.rotate_ccw();
    s.apply_edit([2, -5, 1], brush.op());
    s.light_mut().snap_yaw(1);
    s.render_config_mut().pixels_up();
    s.save(&path).unwrap();
    assert!(!s.has_unsaved_changes());
    assert_eq!(s.current_file(), Some(path.as_path()));

    let mut other = session();
    let report = other.load(&path).unwrap();
    assert!(report.is_clean(), "{report:?}");
    assert_eq!(other.volume(), s.volume());
    assert_eq!(other.light(), s.light());
    assert_eq!(other.render_config(), s.render_config());
    assert_eq!(
        other.volume().get(2, -5, 1),
        Voxel::new(4, Orientation::new(1, false))
    );
    assert!(!other.has_unsaved_changes());
    assert!(other.needs_rebuild());
    std::fs::remove_file(&path).ok();
}

#[test]
fn failed_load_leaves_state_unchanged() {
    let path = temp_path("garbage.vxd");
    std::fs::write(&path, b"not a voxel file").unwrap();
    let mut s = session();
    s.apply_edit([1, 1, 1], EditOp::Place(Voxel::new(2, Orientation::IDENTITY)));
    let before = s.volume().clone();

    let err = s.load(&path).unwrap_err();
    assert!(matches!(err, LoadError::UnrecognizedFormat(_)), "{err:?}");
    assert_eq!(s.volume(), &before);
    assert!(s.has_unsaved_changes());
    assert!(s.current_file().is_none());

    let missing = temp_path("missing.vxd");
    assert!(matches!(s.load(&missing), Err(LoadError::Io(_))));
    assert_eq!(s.volume(), &before);
    std::fs::remove_file(&path).ok();
}

#[test]
fn legacy_volume_file_loads() {
    let path = temp_path("legacy.vox");
    let mut vol = SparseVolume::new();
    vol.set(-1, 0, 3, Voxel::new(5, Orientation::new(2, true)));
    std::fs::write(&path, encode_volume(&vol).unwrap()).unwrap();

    let mut s = session();
    let report = s.load(&path).unwrap();
    assert!(report.legacy);
    assert_eq!(s.volume(), &vol);
    assert_eq!(*s.light(), Default::default());
    std::fs::remove_file(&path).ok();
}

#[test]
fn unknown_types_are_reported_and_skipped() {
    let path = temp_path("unknown.vox");
    let mut vol = SparseVolume::new();
    vol.set(0, 0, 0, Voxel::new(1, Orientation::IDENTITY));
    vol.set(1, 0, 0, Voxel::new(77, Orientation::IDENTITY));
    vol.set(2, 0, 0, Voxel::new(77, Orientation::IDENTITY));
    std::fs::write(&path, encode_volume(&vol).unwrap()).unwrap();

    let mut s = session();
    let report = s.load(&path).unwrap();
    assert_eq!(report.unknown_types, vec![(77, 2)]);
    assert!(!report.is_clean());
    let mesh = s.rebuild();
    assert_eq!(mesh.stats.unknown_cells, 2);
    // The unknown neighbour hides nothing, so the stone keeps all six faces.
    assert_eq!(mesh.render.triangle_count(), 12);
    assert_eq!(mesh.collision.triangle_count(), 12);
    std::fs::remove_file(&path).ok();
}

#[test]
fn unusable_volume_block_falls_back_to_blank() {
    let path = temp_path("badvol.vxd");
    let mut s = session();
    s.apply_edit([3, 3, 3], EditOp::Place(Voxel::new(2, Orientation::IDENTITY)));
    let mut bytes = s.snapshot_bytes().unwrap();
    // The volume block starts right after the 80-byte header.
    bytes[80..84].copy_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
    std::fs::write(&path, &bytes).unwrap();

    let mut other = session();
    other.apply_edit([-2, 0, 0], EditOp::Place(Voxel::new(1, Orientation::IDENTITY)));
    let report = other.load(&path).unwrap();
    assert!(!report.volume.loaded);
    assert!(matches!(
        report.volume.issues.as_slice(),
        [BlockIssue::BadSignature { .. }]
    ));
    assert!(report.light.loaded);
    assert_eq!(other.volume(), session().volume());
    std::fs::remove_file(&path).ok();
}

#[test]
fn assets_config_and_catalog_open() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..");
    let mut cfg = EditorConfig::load_or_default(root.join("assets/editor.toml"));
    assert_eq!(cfg.blank_extent, 7);
    let catalog_path = cfg.catalog_path.take().map(|p| root.join(p));
    cfg.catalog_path = catalog_path;
    let cat = EditSession::open_catalog(&cfg).unwrap();
    assert_eq!(cat.id_by_name("post"), Some(6));
    let mut s = EditSession::new(cat, cfg);
    s.apply_edit([1, 0, 0], EditOp::Place(Voxel::new(1, Orientation::IDENTITY)));
    let mesh = s.rebuild();
    assert_eq!(mesh.render.triangle_count(), 20);
    assert_eq!(mesh.collision.vertex_count(), 72);
}
