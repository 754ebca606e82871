/// Mesh data as read from a geometry file
use crate::vector::Vec3;

/// Ordered vertex indices of one face.
///
/// Three or more indices form a closed polygon; two indices form a single
/// open edge.
pub type Face = Vec<usize>;

/// Raw vertex and face lists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<Face>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, vertex: Vec3) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    /// First face index that points past the vertex list, if any.
    pub fn find_invalid_index(&self) -> Option<(usize, usize)> {
        self.faces.iter().enumerate().find_map(|(face, indices)| {
            indices
                .iter()
                .find(|&&i| i >= self.vertices.len())
                .map(|&i| (face, i))
        })
    }

    /// A cube centered on the origin: the two z faces as quads, joined by
    /// four open edges.
    pub fn cube(size: f64) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::new();

        // Back face
        mesh.add_vertex(Vec3::new(-half, -half, half));
        mesh.add_vertex(Vec3::new(-half, half, half));
        mesh.add_vertex(Vec3::new(half, half, half));
        mesh.add_vertex(Vec3::new(half, -half, half));

        // Front face
        mesh.add_vertex(Vec3::new(-half, -half, -half));
        mesh.add_vertex(Vec3::new(-half, half, -half));
        mesh.add_vertex(Vec3::new(half, half, -half));
        mesh.add_vertex(Vec3::new(half, -half, -half));

        mesh.add_face(vec![0, 1, 2, 3]);
        mesh.add_face(vec![4, 5, 6, 7]);
        mesh.add_face(vec![4, 0]);
        mesh.add_face(vec![3, 7]);
        mesh.add_face(vec![2, 6]);
        mesh.add_face(vec![1, 5]);

        mesh
    }
}

/// Vertex index pairs forming the outline of a face.
///
/// Polygons wrap from the last index back to the first; a two-index face
/// is a single segment; shorter faces have no segments.
pub fn face_edges(face: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let segments = match face.len() {
        0 | 1 => 0,
        2 => 1,
        n => n,
    };
    (0..segments).map(move |i| (face[i], face[(i + 1) % face.len()]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_topology() {
        let cube = MeshData::cube(0.5);
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.faces.len(), 6);
        assert_eq!(cube.vertices[2], Vec3::new(0.25, 0.25, 0.25));
        assert!(cube.find_invalid_index().is_none());
    }

    #[test]
    fn test_find_invalid_index() {
        let mut mesh = MeshData::new();
        mesh.add_vertex(Vec3::ZERO);
        mesh.add_vertex(Vec3::ONE);
        mesh.add_face(vec![0, 1]);
        mesh.add_face(vec![1, 2]);
        assert_eq!(mesh.find_invalid_index(), Some((1, 2)));
    }

    #[test]
    fn test_polygon_edges_wrap() {
        let edges: Vec<_> = face_edges(&[4, 5, 6]).collect();
        assert_eq!(edges, vec![(4, 5), (5, 6), (6, 4)]);
    }

    #[test]
    fn test_two_index_face_is_open_edge() {
        let edges: Vec<_> = face_edges(&[3, 7]).collect();
        assert_eq!(edges, vec![(3, 7)]);
    }

    #[test]
    fn test_short_faces_have_no_edges() {
        assert_eq!(face_edges(&[1]).count(), 0);
        assert_eq!(face_edges(&[]).count(), 0);
    }
}
