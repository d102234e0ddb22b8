use serde::Deserialize;

// Top-level catalog file
#[derive(Deserialize, Debug, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub voxels: Vec<VoxelDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct VoxelDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<u8>,
    #[serde(default)]
    pub shape: Option<ShapeConfig>,
    // Overrides the mask derived from the shape kind
    #[serde(default)]
    pub solid_faces: Option<Vec<String>>,
}

// Shape config supports either a simple string ("cube") or a detailed table
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum ShapeConfig {
    Simple(String),
    Detailed(ShapeDetailed),
}

#[derive(Deserialize, Debug, Clone)]
pub struct ShapeDetailed {
    pub kind: String,
    #[serde(default)]
    pub triangles: Vec<TriangleDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TriangleDef {
    // "pos_x" .. "neg_z" or "interior"
    pub face: String,
    pub positions: [[f32; 3]; 3],
    #[serde(default)]
    pub normal: Option<[f32; 3]>,
}
