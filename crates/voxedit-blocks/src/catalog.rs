use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::fs;
use std::path::Path;

use voxedit_geom::Vec3;

use super::config::{CatalogConfig, ShapeConfig, TriangleDef, VoxelDef};
use super::face::Face;
use super::meshlet::Triangle;
use super::shapes::{ShapeGeometry, ShapeKind};
use super::types::{TypeId, Voxel};

#[derive(Clone, Debug)]
pub struct VoxelTypeDescriptor {
    pub id: TypeId,
    pub name: String,
    pub kind: ShapeKind,
    pub geometry: ShapeGeometry,
    /// Faces fully covered in canonical orientation (bit = `Face::index`).
    pub solid_face_flags: u8,
}

impl VoxelTypeDescriptor {
    fn empty() -> Self {
        Self {
            id: 0,
            name: "empty".to_string(),
            kind: ShapeKind::None,
            geometry: ShapeGeometry::default(),
            solid_face_flags: 0,
        }
    }

    fn simple(id: TypeId, name: &str, kind: ShapeKind) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind,
            geometry: ShapeGeometry::builtin(kind),
            solid_face_flags: kind.default_solid(),
        }
    }

    #[inline]
    pub fn has_geometry(&self) -> bool {
        !self.geometry.is_empty()
    }
}

/// Voxel types indexed by `type_id`. Gaps are unknown ids.
#[derive(Clone, Debug)]
pub struct VoxelCatalog {
    types: Vec<Option<VoxelTypeDescriptor>>,
    by_name: HashMap<String, TypeId>,
}

impl Default for VoxelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl VoxelCatalog {
    fn with_empty() -> Self {
        let mut by_name = HashMap::new();
        by_name.insert("empty".to_string(), 0);
        Self {
            types: vec![Some(VoxelTypeDescriptor::empty())],
            by_name,
        }
    }

    /// Compiled-in catalog used when no file is configured.
    pub fn builtin() -> Self {
        let mut cat = Self::with_empty();
        for (id, name, kind) in [
            (1, "stone", ShapeKind::Cube),
            (2, "brick", ShapeKind::Cube),
            (3, "slab", ShapeKind::Slab),
            (4, "stairs", ShapeKind::Stairs),
            (5, "wedge", ShapeKind::Wedge),
        ] {
            cat.insert(VoxelTypeDescriptor::simple(id, name, kind));
        }
        cat
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: CatalogConfig = toml::from_str(text)?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: CatalogConfig) -> Result<Self, Box<dyn Error>> {
        let mut cat = Self::with_empty();
        let mut next_id: usize = 1;
        for def in cfg.voxels.into_iter() {
            let id = match def.id {
                Some(id) => id,
                None => {
                    while cat.types.get(next_id).is_some_and(Option::is_some) {
                        next_id += 1;
                    }
                    TypeId::try_from(next_id)
                        .map_err(|_| format!("too many voxel types (at '{}')", def.name))?
                }
            };
            let ty = compile_def(id, def)?;
            if id == 0 {
                if ty.has_geometry() || ty.solid_face_flags != 0 {
                    return Err(format!("voxel '{}' uses reserved id 0", ty.name).into());
                }
                // Renaming the empty type is harmless.
                cat.by_name.remove("empty");
                cat.by_name.insert(ty.name.clone(), 0);
                cat.types[0] = Some(ty);
                continue;
            }
            if cat.is_known(id) {
                return Err(format!("duplicate voxel id {id} ('{}')", ty.name).into());
            }
            if cat.by_name.contains_key(&ty.name) {
                return Err(format!("duplicate voxel name '{}'", ty.name).into());
            }
            cat.insert(ty);
        }
        Ok(cat)
    }

    fn insert(&mut self, ty: VoxelTypeDescriptor) {
        let idx = ty.id as usize;
        if self.types.len() <= idx {
            self.types.resize(idx + 1, None);
        }
        self.by_name.insert(ty.name.clone(), ty.id);
        self.types[idx] = Some(ty);
    }

    #[inline]
    pub fn get(&self, id: TypeId) -> Option<&VoxelTypeDescriptor> {
        self.types.get(id as usize).and_then(Option::as_ref)
    }

    #[inline]
    pub fn is_known(&self, id: TypeId) -> bool {
        self.get(id).is_some()
    }

    /// Canonical solid-face mask; 0 for empty and unknown ids.
    #[inline]
    pub fn solid_face_flags(&self, id: TypeId) -> u8 {
        self.get(id).map_or(0, |t| t.solid_face_flags)
    }

    pub fn id_by_name(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    /// Number of defined types, including the empty type.
    pub fn len(&self) -> usize {
        self.types.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &VoxelTypeDescriptor> {
        self.types.iter().flatten()
    }

    /// Ids referenced by `cells` that the catalog does not define, with counts.
    pub fn unknown_ids<'a>(
        &self,
        cells: impl IntoIterator<Item = &'a Voxel>,
    ) -> Vec<(TypeId, usize)> {
        let mut missing: BTreeMap<TypeId, usize> = BTreeMap::new();
        for v in cells {
            if !v.is_empty() && !self.is_known(v.type_id) {
                *missing.entry(v.type_id).or_insert(0) += 1;
            }
        }
        missing.into_iter().collect()
    }
}

fn compile_def(id: TypeId, def: VoxelDef) -> Result<VoxelTypeDescriptor, Box<dyn Error>> {
    let (kind, geometry) = match def.shape {
        None => (ShapeKind::Cube, ShapeGeometry::builtin(ShapeKind::Cube)),
        Some(ShapeConfig::Simple(name)) => {
            let kind = simple_kind(&def.name, &name);
            (kind, ShapeGeometry::builtin(kind))
        }
        Some(ShapeConfig::Detailed(d)) => {
            if d.kind == "mesh" {
                let tris = d
                    .triangles
                    .iter()
                    .map(compile_triangle)
                    .collect::<Result<Vec<_>, _>>()?;
                (ShapeKind::Mesh, ShapeGeometry::from_tagged(tris))
            } else {
                let kind = simple_kind(&def.name, &d.kind);
                (kind, ShapeGeometry::builtin(kind))
            }
        }
    };
    let solid_face_flags = match def.solid_faces {
        Some(names) => {
            let mut mask = 0u8;
            for n in &names {
                let f = Face::from_name(n)
                    .ok_or_else(|| format!("voxel '{}': unknown solid face '{n}'", def.name))?;
                mask |= f.bit();
            }
            mask
        }
        None => kind.default_solid(),
    };
    Ok(VoxelTypeDescriptor {
        id,
        name: def.name,
        kind,
        geometry,
        solid_face_flags,
    })
}

fn simple_kind(voxel: &str, shape: &str) -> ShapeKind {
    match ShapeKind::from_name(shape) {
        Some(ShapeKind::Mesh) | None => {
            log::warn!("voxel '{}': unsupported shape '{}', using none", voxel, shape);
            ShapeKind::None
        }
        Some(k) => k,
    }
}

fn compile_triangle(t: &TriangleDef) -> Result<(Option<Face>, Triangle), Box<dyn Error>> {
    let tag = if t.face == "interior" {
        None
    } else {
        Some(Face::from_name(&t.face).ok_or_else(|| format!("unknown face tag '{}'", t.face))?)
    };
    let [a, b, c] = t.positions.map(|[x, y, z]| Vec3::new(x, y, z));
    let n = match t.normal {
        Some([x, y, z]) => Vec3::new(x, y, z).normalized(),
        None => match tag {
            Some(f) => f.normal(),
            None => (b - a).cross(c - a).normalized(),
        },
    };
    Ok((tag, Triangle::flat(a, b, c, n)))
}
