use crate::geom::{BBox3, Vec3};
use serde::{Deserialize, Serialize};

/// A named subset of mesh geometry with a group-local vertex list.
///
/// Faces index into `vertices`; the loader remaps the OBJ file's global
/// vertex table so every group is self-contained. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshGroup {
    pub name: String,
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Vec<u32>>,
}

impl MeshGroup {
    pub fn bbox(&self) -> BBox3 {
        BBox3::from_points(&self.vertices)
    }

    pub fn centroid(&self) -> Vec3 {
        if self.vertices.is_empty() {
            return Vec3::new(0.0, 0.0, 0.0);
        }
        let mut sum = Vec3::new(0.0, 0.0, 0.0);
        for v in &self.vertices {
            sum.x += v.x;
            sum.y += v.y;
            sum.z += v.z;
        }
        let n = self.vertices.len() as f64;
        Vec3::new(sum.x / n, sum.y / n, sum.z / n)
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Parsed OBJ document: groups in declaration order.
///
/// Declaration order matters for conflict resolution (last-declared group
/// wins a contested role), so this is a list rather than a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjDocument {
    pub groups: Vec<MeshGroup>,
}

impl ObjDocument {
    pub fn group(&self, name: &str) -> Option<&MeshGroup> {
        self.groups.iter().find(|g| g.name == name)
    }
}
