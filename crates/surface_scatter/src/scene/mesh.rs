//! Face-indexed mesh geometry with named per-vertex weight fields.
//!
//! Faces are ordered polygons (triangulated as fans for ray tests). Weight
//! fields are scalar maps over the vertices, used to mark forbidden or
//! allowed zones on a surface.
use std::collections::HashMap;

use glam::Vec3;

use crate::error::{Error, Result};

pub type VertexId = usize;
pub type FaceId = usize;

/// A polygon face given as an ordered list of vertex indices (at least 3).
#[derive(Debug, Clone)]
pub struct Face {
    pub vertices: Vec<VertexId>,
}

impl Face {
    pub fn new(vertices: Vec<VertexId>) -> Self {
        Self { vertices }
    }
}

/// Mesh with face-indexed geometry and optional named weight fields.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    fields: HashMap<String, Vec<f32>>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>) -> Self {
        Self {
            vertices,
            faces,
            fields: HashMap::new(),
        }
    }

    /// Single quad in the XY plane at z = 0, spanning `[-half_extent, half_extent]²`.
    pub fn plane(half_extent: f32) -> Self {
        Self::grid(half_extent, 1)
    }

    /// Quad grid in the XY plane at z = 0 with `subdivisions²` faces.
    pub fn grid(half_extent: f32, subdivisions: usize) -> Self {
        let n = subdivisions.max(1);
        let step = half_extent * 2.0 / n as f32;

        let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
        for row in 0..=n {
            for col in 0..=n {
                vertices.push(Vec3::new(
                    -half_extent + col as f32 * step,
                    -half_extent + row as f32 * step,
                    0.0,
                ));
            }
        }

        let mut faces = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                let v = |r: usize, c: usize| r * (n + 1) + c;
                faces.push(Face::new(vec![
                    v(row, col),
                    v(row, col + 1),
                    v(row + 1, col + 1),
                    v(row + 1, col),
                ]));
            }
        }

        Self::new(vertices, faces)
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// True when the mesh has at least one face and all face indices are in range.
    pub fn is_valid(&self) -> bool {
        !self.faces.is_empty()
            && self.faces.iter().all(|face| {
                face.vertices.len() >= 3 && face.vertices.iter().all(|&v| v < self.vertices.len())
            })
    }

    /// Attaches a named per-vertex weight field; length must match the vertex count.
    pub fn set_field(&mut self, name: impl Into<String>, weights: Vec<f32>) -> Result<()> {
        if weights.len() != self.vertices.len() {
            return Err(Error::InvalidConfig(format!(
                "weight field has {} values for {} vertices",
                weights.len(),
                self.vertices.len()
            )));
        }
        self.fields.insert(name.into(), weights);
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<&[f32]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Nearest intersection of a local-space ray with the mesh.
    ///
    /// Returns the ray parameter `t` (hit at `origin + t * direction`) and the
    /// hit face. Faces are triangulated as fans around their first vertex.
    pub fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<(f32, FaceId)> {
        let mut nearest: Option<(f32, FaceId)> = None;
        for (face_id, face) in self.faces.iter().enumerate() {
            if face.vertices.len() < 3 {
                continue;
            }
            let a = self.vertices[face.vertices[0]];
            for pair in face.vertices[1..].windows(2) {
                let b = self.vertices[pair[0]];
                let c = self.vertices[pair[1]];
                if let Some(t) = ray_triangle(origin, direction, a, b, c) {
                    if nearest.is_none_or(|(best, _)| t < best) {
                        nearest = Some((t, face_id));
                    }
                }
            }
        }
        nearest
    }
}

/// Möller–Trumbore ray/triangle intersection; returns `t` for hits in front
/// of the origin.
fn ray_triangle(origin: Vec3, direction: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let ab = b - a;
    let ac = c - a;
    let p = direction.cross(ac);
    let det = ab.dot(p);
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(ab);
    let v = direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = ac.dot(q) * inv_det;
    (t > EPSILON).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_builds_expected_counts() {
        let mesh = Mesh::grid(4.0, 3);
        assert_eq!(mesh.vertices().len(), 16);
        assert_eq!(mesh.faces().len(), 9);
        assert!(mesh.is_valid());
    }

    #[test]
    fn plane_is_single_quad() {
        let mesh = Mesh::plane(2.0);
        assert_eq!(mesh.faces().len(), 1);
        assert_eq!(mesh.faces()[0].vertices.len(), 4);
    }

    #[test]
    fn downward_ray_hits_plane() {
        let mesh = Mesh::plane(5.0);
        let (t, face) = mesh
            .raycast(Vec3::new(1.0, -2.0, 10.0), Vec3::NEG_Z)
            .expect("hit");
        assert!((t - 10.0).abs() < 1e-4);
        assert_eq!(face, 0);
    }

    #[test]
    fn ray_outside_plane_misses() {
        let mesh = Mesh::plane(5.0);
        assert!(mesh.raycast(Vec3::new(6.0, 0.0, 10.0), Vec3::NEG_Z).is_none());
        // Pointing away from the plane also misses.
        assert!(mesh.raycast(Vec3::new(0.0, 0.0, 10.0), Vec3::Z).is_none());
    }

    #[test]
    fn nearest_face_wins_on_grid() {
        let mesh = Mesh::grid(2.0, 2);
        let (_, face) = mesh
            .raycast(Vec3::new(-1.0, -1.0, 5.0), Vec3::NEG_Z)
            .expect("hit");
        // Lower-left quadrant is face 0 in row-major face order.
        assert_eq!(face, 0);
        let (_, face) = mesh
            .raycast(Vec3::new(1.0, 1.0, 5.0), Vec3::NEG_Z)
            .expect("hit");
        assert_eq!(face, 3);
    }

    #[test]
    fn field_length_is_validated() {
        let mut mesh = Mesh::plane(1.0);
        assert!(mesh.set_field("NoTrees", vec![0.0; 3]).is_err());
        assert!(mesh.set_field("NoTrees", vec![0.0; 4]).is_ok());
        assert_eq!(mesh.field("NoTrees").map(<[f32]>::len), Some(4));
        assert!(mesh.field("missing").is_none());
    }

    #[test]
    fn empty_mesh_is_invalid() {
        assert!(!Mesh::default().is_valid());
        let bad = Mesh::new(vec![Vec3::ZERO], vec![Face::new(vec![0, 1, 2])]);
        assert!(!bad.is_valid());
    }
}
