use bytemuck::{Pod, Zeroable};
use voxi_geom::Vec3;
use voxi_pool::Reclaim;

use crate::constants::{AO_BRIGHTNESS, BACK_FACE_INDICES, FRONT_FACE_INDICES};

/// GPU vertex layout: xyz plus AO brightness in `position.w`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ChunkVertex {
    pub position: [f32; 4],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl ChunkVertex {
    /// Byte stride of one vertex in the vertex buffer.
    pub const STRIDE: usize = std::mem::size_of::<ChunkVertex>();

    #[inline]
    pub fn new(pos: Vec3, ao: f32, normal: Vec3, color: [f32; 3]) -> Self {
        Self {
            position: [pos.x, pos.y, pos.z, ao],
            normal: normal.to_array(),
            color,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.position[0], self.position[1], self.position[2])
    }

    #[inline]
    pub fn ao(&self) -> f32 {
        self.position[3]
    }
}

/// One chunk mesh buffer. Rebuilt in place: `clear` keeps capacity so steady
/// state rebuilds do not reallocate.
#[derive(Clone, Debug, Default)]
pub struct ChunkMesh {
    vertices: Vec<ChunkVertex>,
    indices: Vec<u32>,
    active: bool,
}

impl ChunkMesh {
    pub fn with_quad_capacity(n_quads: usize) -> Self {
        let mut mesh = Self::default();
        mesh.reserve_quads(n_quads);
        mesh
    }

    /// Pre-reserve capacity for approximately `n_quads` quads worth of data.
    #[inline]
    pub fn reserve_quads(&mut self, n_quads: usize) {
        self.vertices.reserve(n_quads * 4);
        self.indices.reserve(n_quads * 6);
    }

    /// Clears geometry but retains capacity for reuse across rebuilds.
    #[inline]
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Marks the buffer as resident and drawable.
    #[inline]
    pub fn activate(&mut self) {
        self.active = true;
    }

    #[inline]
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True when the last rebuild produced no geometry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    pub fn vertices(&self) -> &[ChunkVertex] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.indices.len() / 6
    }

    /// Raw vertex buffer contents for upload.
    #[inline]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    #[inline]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Appends one quad from corners `[top_left, bottom_left, bottom_right, top_right]`
    /// with matching AO levels.
    ///
    /// The vertex order puts the brighter diagonal first so that the shared
    /// triangle edge runs along it; `back_face` flips the winding.
    pub fn add_quad(
        &mut self,
        corners: [Vec3; 4],
        ao: [u8; 4],
        normal: Vec3,
        color: [f32; 3],
        back_face: bool,
    ) {
        let base = self.vertices.len() as u32;
        let light = ao.map(|a| AO_BRIGHTNESS[a as usize]);
        let order: [usize; 4] = if light[3] + light[1] > light[0] + light[2] {
            [1, 2, 3, 0]
        } else {
            [0, 1, 2, 3]
        };
        for k in order {
            self.vertices
                .push(ChunkVertex::new(corners[k], light[k], normal, color));
        }
        let rel = if back_face {
            BACK_FACE_INDICES
        } else {
            FRONT_FACE_INDICES
        };
        self.indices.extend(rel.iter().map(|r| base + r));
    }
}

impl Reclaim for ChunkMesh {
    fn reclaim(&mut self) {
        self.clear();
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> [Vec3; 4] {
        [
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn vertex_is_forty_bytes() {
        assert_eq!(ChunkVertex::STRIDE, 40);
    }

    #[test]
    fn brighter_diagonal_starts_the_quad() {
        let mut m = ChunkMesh::default();
        // bottom_left + top_right brighter than top_left + bottom_right
        m.add_quad(unit_square(), [0, 3, 0, 3], Vec3::new(0.0, 0.0, 1.0), [1.0; 3], false);
        assert_eq!(m.vertices()[0].pos(), Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(m.vertices()[2].pos(), Vec3::new(1.0, 1.0, 0.0));

        m.clear();
        m.add_quad(unit_square(), [3, 0, 3, 0], Vec3::new(0.0, 0.0, 1.0), [1.0; 3], false);
        assert_eq!(m.vertices()[0].pos(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(m.vertices()[2].pos(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut m = ChunkMesh::with_quad_capacity(8);
        let cap = m.vertices.capacity();
        m.add_quad(unit_square(), [3; 4], Vec3::new(0.0, 0.0, 1.0), [1.0; 3], true);
        m.clear();
        assert!(m.is_empty());
        assert_eq!(m.vertices.capacity(), cap);
    }
}
