use std::sync::Arc;

use parking_lot::RwLock;
use voxi_chunk::CHUNK_SIZE;
use voxi_geom::Aabb;
use voxi_mesh_cpu::{ChunkMesh, ChunkVertex};

/// Bytes per triangle in the index buffer: three `u32`s.
pub const INDEX_STRIDE: usize = 3 * std::mem::size_of::<u32>();

/// A shape owned by a chunk's collision record and read by the physics world.
pub type SharedShape = Arc<RwLock<TriangleMeshShape>>;

/// Triangle soup collision shape in chunk-local space.
///
/// Built by striding over the raw render buffers, so positions are read
/// straight out of [`ChunkVertex`] records. Storage is reused across
/// rebuilds.
#[derive(Clone, Debug)]
pub struct TriangleMeshShape {
    positions: Vec<[f32; 3]>,
    triangles: Vec<[u32; 3]>,
    vertex_stride: usize,
    bounds: Aabb,
}

impl Default for TriangleMeshShape {
    fn default() -> Self {
        Self {
            positions: Vec::new(),
            triangles: Vec::new(),
            vertex_stride: ChunkVertex::STRIDE,
            // Covers the whole chunk so bounds never need recomputing.
            bounds: Aabb::cube(CHUNK_SIZE as f32),
        }
    }
}

impl TriangleMeshShape {
    /// Replaces the shape's geometry with the contents of `mesh`.
    pub fn rebuild_from(&mut self, mesh: &ChunkMesh) {
        self.clear();
        let stride = self.vertex_stride;
        self.positions.extend(
            mesh.vertex_bytes()
                .chunks_exact(stride)
                .map(|v| bytemuck::pod_read_unaligned::<[f32; 3]>(&v[..12])),
        );
        self.triangles.extend(
            mesh.index_bytes()
                .chunks_exact(INDEX_STRIDE)
                .map(bytemuck::pod_read_unaligned::<[u32; 3]>),
        );
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.triangles.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn vertex_stride(&self) -> usize {
        self.vertex_stride
    }

    #[inline]
    pub fn index_stride(&self) -> usize {
        INDEX_STRIDE
    }

    /// Local bounds, fixed to the chunk cube.
    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }
}
