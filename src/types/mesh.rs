use std::ops::Range;

/// A contiguous run of index entries drawn with one face material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceGroup {
    /// First index entry of the run.
    pub start: usize,
    /// Number of index entries (3 per triangle).
    pub count: usize,
    /// Face identifier, also the material slot bound to this run.
    pub face: usize,
}

impl FaceGroup {
    /// Half-open range of index entries covered by this group.
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.count
    }

    pub fn triangle_count(&self) -> usize {
        self.count / 3
    }
}

/// The fundamental geometry container.
///
/// All buffers are contiguous `Vec<f32>` / `Vec<u32>` so they can be handed
/// to the glTF writer without conversion. An empty `indices` buffer means the
/// geometry is non-indexed: triangle `t` is vertices `3t, 3t + 1, 3t + 2`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    /// Interleaved positions: [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Interleaved normals: [nx, ny, nz, ...] or empty
    pub normals: Vec<f32>,
    /// Interleaved UVs: [u, v, u, v, ...] or empty
    pub uvs: Vec<f32>,
    /// Triangle indices into the vertex buffers, or empty when non-indexed
    pub indices: Vec<u32>,
    /// Per-face draw groups, in index order
    pub groups: Vec<FaceGroup>,
    /// Index into an associated material list
    pub material_index: Option<usize>,
}

impl IndexedMesh {
    /// Number of vertices (positions / 3).
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of index entries, explicit or implicit.
    pub fn index_count(&self) -> usize {
        if self.is_indexed() {
            self.indices.len()
        } else {
            self.vertex_count()
        }
    }

    /// Number of triangles (index entries / 3).
    pub fn triangle_count(&self) -> usize {
        self.index_count() / 3
    }

    /// Whether an explicit index buffer is present.
    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Whether normals are present.
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// Whether UV coordinates are present.
    pub fn has_uvs(&self) -> bool {
        !self.uvs.is_empty()
    }

    /// Whether the mesh contains no geometry.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Vertex index referenced by index entry `i`.
    pub fn vertex_at(&self, i: usize) -> u32 {
        if self.is_indexed() {
            self.indices[i]
        } else {
            i as u32
        }
    }

    /// Explicit index list, synthesizing the sequential one when non-indexed.
    pub fn resolved_indices(&self) -> Vec<u32> {
        if self.is_indexed() {
            self.indices.clone()
        } else {
            (0..self.vertex_count() as u32).collect()
        }
    }

    /// Append a draw group.
    pub fn add_group(&mut self, start: usize, count: usize, face: usize) {
        self.groups.push(FaceGroup { start, count, face });
    }

    /// The group carrying face identifier `face`.
    pub fn group_for_face(&self, face: usize) -> Option<&FaceGroup> {
        self.groups.iter().find(|g| g.face == face)
    }

    /// Face identifier of triangle `triangle`, if some group covers it.
    pub fn face_of_triangle(&self, triangle: usize) -> Option<usize> {
        let entry = triangle * 3;
        self.groups
            .iter()
            .find(|g| g.range().contains(&entry))
            .map(|g| g.face)
    }

    /// Check that the groups tile `[0, index_count)` exactly, in order.
    pub fn groups_partition_indices(&self) -> bool {
        let mut cursor = 0;
        for group in &self.groups {
            if group.start != cursor || group.count == 0 || group.count % 3 != 0 {
                return false;
            }
            cursor += group.count;
        }
        cursor == self.index_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mesh() {
        let mesh = IndexedMesh::default();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(!mesh.has_normals());
        assert!(!mesh.has_uvs());
        assert!(mesh.groups.is_empty());
        assert_eq!(mesh.material_index, None);
    }

    #[test]
    fn single_triangle() {
        let mesh = IndexedMesh {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            uvs: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            indices: vec![0, 1, 2],
            groups: vec![],
            material_index: Some(0),
        };

        assert!(!mesh.is_empty());
        assert!(mesh.is_indexed());
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.has_normals());
        assert!(mesh.has_uvs());
        assert_eq!(mesh.material_index, Some(0));
    }

    #[test]
    fn non_indexed_counts_vertices() {
        let mesh = IndexedMesh {
            positions: vec![0.0; 18],
            ..Default::default()
        };

        assert!(!mesh.is_indexed());
        assert_eq!(mesh.index_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertex_at(4), 4);
        assert_eq!(mesh.resolved_indices(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn quad_two_triangles() {
        let mesh = IndexedMesh {
            positions: vec![
                0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
            ..Default::default()
        };

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertex_at(5), 3);
    }

    #[test]
    fn groups_lookup() {
        let mut mesh = IndexedMesh {
            positions: vec![0.0; 36],
            ..Default::default()
        };
        mesh.add_group(0, 6, 0);
        mesh.add_group(6, 6, 1);

        assert!(mesh.groups_partition_indices());
        assert_eq!(mesh.group_for_face(1).map(|g| g.range()), Some(6..12));
        assert_eq!(mesh.group_for_face(2), None);
        assert_eq!(mesh.face_of_triangle(0), Some(0));
        assert_eq!(mesh.face_of_triangle(1), Some(0));
        assert_eq!(mesh.face_of_triangle(2), Some(1));
        assert_eq!(mesh.face_of_triangle(4), None);
    }

    #[test]
    fn groups_with_gap_are_rejected() {
        let mut mesh = IndexedMesh {
            positions: vec![0.0; 36],
            ..Default::default()
        };
        mesh.add_group(0, 3, 0);
        mesh.add_group(6, 6, 1);
        assert!(!mesh.groups_partition_indices());

        mesh.groups.clear();
        mesh.add_group(0, 9, 0);
        assert!(!mesh.groups_partition_indices(), "short of index count");
    }
}
