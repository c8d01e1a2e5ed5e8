/// Mesh - validated, immutable input arrays for the simplifier.
///
/// Positions, vertex normals, triangles and unit face normals, plus the
/// axis-aligned bounds of the positions. File loading is left to the
/// caller; this type only accepts arrays and checks them.

use glam::Vec3;
use crate::error::Result;
use crate::engine_bail;
use crate::math::BoundingBox;

/// Index type of triangle corners and of the reduced index buffer
pub type VertexIndex = u32;

/// Triangle mesh.
#[derive(Debug, Clone)]
pub struct Mesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    triangles: Vec<[VertexIndex; 3]>,
    face_normals: Vec<Vec3>,
    bounds: BoundingBox,
}

impl Mesh {
    /// Validate the arrays and derive face normals and bounds.
    ///
    /// When `normals` is `None`, vertex normals are the normalized sum of
    /// the unnormalized (area weighted) normals of the incident faces.
    ///
    /// # Errors
    ///
    /// `Error::InvalidMesh` if there are no vertices, a position is not
    /// finite, the normal count differs from the vertex count, or a
    /// triangle repeats a corner or points past the vertex array.
    pub fn new(
        positions: Vec<Vec3>,
        normals: Option<Vec<Vec3>>,
        triangles: Vec<[VertexIndex; 3]>,
    ) -> Result<Self> {
        if positions.is_empty() {
            engine_bail!("hds::Mesh", InvalidMesh, "mesh has no vertices");
        }
        if positions.len() > VertexIndex::MAX as usize {
            engine_bail!("hds::Mesh", InvalidMesh,
                "{} vertices exceed the index range", positions.len());
        }
        if let Some(v) = positions.iter().position(|p| !p.is_finite()) {
            engine_bail!("hds::Mesh", InvalidMesh,
                "vertex {} has a non-finite position {}", v, positions[v]);
        }
        if let Some(normals) = &normals {
            if normals.len() != positions.len() {
                engine_bail!("hds::Mesh", InvalidMesh,
                    "{} normals for {} vertices", normals.len(), positions.len());
            }
        }

        let vertex_count = positions.len();
        for (t, tri) in triangles.iter().enumerate() {
            if tri[0] == tri[1] || tri[0] == tri[2] || tri[1] == tri[2] {
                engine_bail!("hds::Mesh", InvalidMesh,
                    "triangle {} is degenerate: {} {} {}", t, tri[0], tri[1], tri[2]);
            }
            for (corner, &index) in tri.iter().enumerate() {
                if index as usize >= vertex_count {
                    engine_bail!("hds::Mesh", InvalidMesh,
                        "triangle {} corner {} ({}) out of range", t, corner, index);
                }
            }
        }

        let weighted = Self::weighted_face_normals(&positions, &triangles);
        let normals = match normals {
            Some(normals) => normals,
            None => Self::vertex_normals(vertex_count, &triangles, &weighted),
        };
        let face_normals = weighted.into_iter().map(Vec3::normalize_or_zero).collect();

        let bounds = BoundingBox::from_points(positions.iter().copied())
            .unwrap_or_default();

        Ok(Self { positions, normals, triangles, face_normals, bounds })
    }

    /// cross(v1 - v0, v2 - v0) per triangle, length twice the area.
    fn weighted_face_normals(positions: &[Vec3], triangles: &[[VertexIndex; 3]]) -> Vec<Vec3> {
        triangles
            .iter()
            .map(|tri| {
                let v0 = positions[tri[0] as usize];
                let v1 = positions[tri[1] as usize];
                let v2 = positions[tri[2] as usize];
                (v1 - v0).cross(v2 - v0)
            })
            .collect()
    }

    fn vertex_normals(
        vertex_count: usize,
        triangles: &[[VertexIndex; 3]],
        face_normals: &[Vec3],
    ) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; vertex_count];
        for (tri, n) in triangles.iter().zip(face_normals) {
            for &v in tri {
                normals[v as usize] += *n;
            }
        }
        for n in &mut normals {
            *n = n.normalize_or_zero();
        }
        normals
    }

    // ===== ACCESSORS =====

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn triangles(&self) -> &[[VertexIndex; 3]] {
        &self.triangles
    }

    /// Unit face normal per triangle (zero for zero-area triangles).
    pub fn face_normals(&self) -> &[Vec3] {
        &self.face_normals
    }

    /// Tight bounds of all positions.
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    // ===== EDITS =====

    /// Reverse the orientation: swap the winding of every triangle and
    /// negate face and vertex normals.
    pub fn flip(&mut self) {
        for tri in &mut self.triangles {
            tri.swap(1, 2);
        }
        for n in self.face_normals.iter_mut().chain(self.normals.iter_mut()) {
            *n = -*n;
        }
    }

    /// Center the mesh on the origin and scale it uniformly so that its
    /// largest side spans 2 units, i.e. it fits in [-1, 1]^3.
    ///
    /// A single point (or a set of identical points) is only centered.
    pub fn normalize_to_unit_cube(&mut self) {
        let mid = self.bounds.midpoint;
        let largest = self.bounds.max_side();
        let scale = if largest > 0.0 { 2.0 / largest } else { 1.0 };

        for p in &mut self.positions {
            *p = (*p - mid) * scale;
        }
        self.bounds = BoundingBox {
            midpoint: Vec3::ZERO,
            extent: self.bounds.extent * scale,
        };
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
