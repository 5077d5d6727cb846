/// Geometry primitives for wireframe rendering
use log::debug;
use nalgebra::Point3;

use crate::error::IntegrityError;

/// Initial vertex list allocation; growth after that is amortized by `Vec`
const VERTEX_CHUNK: usize = 1024;
const FACE_CHUNK: usize = 256;

/// A 3D vertex position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
        }
    }
}

/// Append-only list of vertices, indexed from 0
#[derive(Debug, Clone)]
pub struct VertexList {
    vertices: Vec<Vertex>,
}

impl VertexList {
    pub fn new() -> Self {
        Self {
            vertices: Vec::with_capacity(VERTEX_CHUNK),
        }
    }

    pub fn push(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.vertices.capacity()
    }

    pub fn get(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vertex> {
        self.vertices.iter()
    }
}

impl Default for VertexList {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Vertex> for VertexList {
    fn from_iter<I: IntoIterator<Item = Vertex>>(iter: I) -> Self {
        let mut list = Self::new();
        list.vertices.extend(iter);
        list
    }
}

/// A polygon given by 0-based references into a [`VertexList`].
///
/// References are signed: a 1-based reference of `0` in the source file
/// decrements to `-1` and is rejected when the face is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    indices: Vec<i64>,
}

impl Face {
    /// Create a face, `None` if it has fewer than three references
    pub fn new(indices: Vec<i64>) -> Option<Self> {
        (indices.len() >= 3).then_some(Self { indices })
    }

    pub fn indices(&self) -> &[i64] {
        &self.indices
    }

    /// Number of triangles the fan decomposition produces
    pub fn triangle_count(&self) -> usize {
        self.indices.len() - 2
    }

    /// Fan decomposition anchored at the first reference:
    /// `(v0, v1, v2), (v0, v2, v3), ..., (v0, v[n-2], v[n-1])`.
    ///
    /// Winding order is preserved. The result is only correct for convex
    /// polygons; concave ones can produce triangles outside the outline.
    pub fn fan(&self) -> impl Iterator<Item = [i64; 3]> + '_ {
        let anchor = self.indices[0];
        self.indices[1..]
            .windows(2)
            .map(move |pair| [anchor, pair[0], pair[1]])
    }
}

/// Append-only list of faces
#[derive(Debug, Clone)]
pub struct FaceList {
    faces: Vec<Face>,
}

impl FaceList {
    pub fn new() -> Self {
        Self {
            faces: Vec::with_capacity(FACE_CHUNK),
        }
    }

    pub fn push(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.faces.capacity()
    }

    pub fn get(&self, index: usize) -> Option<&Face> {
        self.faces.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Face> {
        self.faces.iter()
    }
}

impl Default for FaceList {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Face> for FaceList {
    fn from_iter<I: IntoIterator<Item = Face>>(iter: I) -> Self {
        let mut list = Self::new();
        list.faces.extend(iter);
        list
    }
}

/// A triangle defined by three copied vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }
}

/// A mesh of fully resolved triangles
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Triangulate every face and copy the referenced vertices out of
    /// `vertices`.
    ///
    /// Any reference outside `[0, vertices.len())` fails the whole mesh;
    /// nothing is clamped or dropped.
    pub fn resolve(vertices: &VertexList, faces: &FaceList) -> Result<Self, IntegrityError> {
        let count = faces.iter().map(Face::triangle_count).sum();
        let mut mesh = Self::with_capacity(count);

        for (face_idx, face) in faces.iter().enumerate() {
            let lookup = |index: i64| {
                usize::try_from(index)
                    .ok()
                    .and_then(|i| vertices.get(i))
                    .copied()
                    .ok_or_else(|| IntegrityError {
                        face: face_idx,
                        index,
                        vertex_count: vertices.len(),
                    })
            };

            for [a, b, c] in face.fan() {
                mesh.add_triangle(Triangle::new(lookup(a)?, lookup(b)?, lookup(c)?));
            }
        }

        debug!(
            "resolved {} faces into {} triangles",
            faces.len(),
            mesh.triangles.len()
        );
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_vertices(n: usize) -> VertexList {
        (0..n).map(|i| Vertex::new(i as f32, 0.0, 0.0)).collect()
    }

    #[test]
    fn test_face_needs_three_references() {
        assert!(Face::new(vec![0, 1]).is_none());
        assert!(Face::new(vec![0, 1, 2]).is_some());
    }

    #[test]
    fn test_pentagon_fan() {
        let face = Face::new(vec![0, 1, 2, 3, 4]).unwrap();
        let tris: Vec<_> = face.fan().collect();
        assert_eq!(tris, vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
        assert_eq!(face.triangle_count(), 3);
    }

    #[test]
    fn test_resolve_copies_vertices() {
        let vertices = square_vertices(4);
        let faces: FaceList = [Face::new(vec![0, 1, 2, 3]).unwrap()].into_iter().collect();
        let mesh = Mesh::resolve(&vertices, &faces).unwrap();

        assert_eq!(mesh.triangles.len(), 2);
        assert_eq!(mesh.triangles[1].vertices[0], Vertex::new(0.0, 0.0, 0.0));
        assert_eq!(mesh.triangles[1].vertices[1], Vertex::new(2.0, 0.0, 0.0));
        assert_eq!(mesh.triangles[1].vertices[2], Vertex::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_resolve_rejects_out_of_range() {
        let vertices = square_vertices(10);
        let faces: FaceList = [
            Face::new(vec![0, 1, 2]).unwrap(),
            Face::new(vec![0, 1, 998]).unwrap(),
        ]
        .into_iter()
        .collect();

        let err = Mesh::resolve(&vertices, &faces).unwrap_err();
        assert_eq!(
            err,
            IntegrityError {
                face: 1,
                index: 998,
                vertex_count: 10
            }
        );
    }

    #[test]
    fn test_resolve_rejects_negative_reference() {
        let vertices = square_vertices(3);
        let faces: FaceList = [Face::new(vec![-1, 0, 1]).unwrap()].into_iter().collect();
        let err = Mesh::resolve(&vertices, &faces).unwrap_err();
        assert_eq!(err.index, -1);
    }

    #[test]
    fn test_lists_start_with_chunked_capacity() {
        let vertices = VertexList::new();
        let faces = FaceList::new();
        assert!(vertices.capacity() >= VERTEX_CHUNK);
        assert!(faces.capacity() >= FACE_CHUNK);
        assert!(vertices.is_empty() && faces.is_empty());
    }

    #[test]
    fn test_capacity_never_below_len() {
        let mut vertices = VertexList::new();
        for i in 0..5000 {
            vertices.push(Vertex::new(i as f32, 0.0, 0.0));
            assert!(vertices.capacity() >= vertices.len());
        }
        assert_eq!(vertices.get(4999), Some(&Vertex::new(4999.0, 0.0, 0.0)));
    }
}
