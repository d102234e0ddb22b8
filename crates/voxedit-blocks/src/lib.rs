//! Voxel values, orientations, and the voxel type catalog.
#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod face;
pub mod meshlet;
pub mod orient;
pub mod shapes;
pub mod types;

pub use catalog::{VoxelCatalog, VoxelTypeDescriptor};
pub use face::{ALL_FACES_MASK, Face};
pub use meshlet::{Meshlet, Triangle};
pub use orient::{Orientation, rotate_face, rotate_face_mask, rotate_vector};
pub use shapes::{ShapeGeometry, ShapeKind};
pub use types::{TypeId, Voxel};
