//! Shared constants for voxedit-mesh-cpu.

/// World units per cell edge.
pub const DEFAULT_VOXEL_SIZE: f32 = 0.8;
/// Weld radius as a fraction of the voxel size.
pub const DEFAULT_WELD_FRACTION: f32 = 0.02;

// Collision boxes
pub(crate) const BOX_TRIANGLES: usize = 12;

// Weld probe covers the 3x3x3 block of hash cells around a vertex
pub(crate) const PROBE_RADIUS: i64 = 1;
