use voxi_chunk::BlockStore;
use voxi_mesh_cpu::ChunkMesh;
use voxi_physics::CollisionRecord;
use voxi_pool::{Pool, PoolStats};

use crate::config::PoolConfig;

/// The three process-wide pools every chunk draws from. Clones share slots.
#[derive(Clone)]
pub struct ChunkPools {
    blocks: Pool<BlockStore>,
    meshes: Pool<ChunkMesh>,
    collision: Pool<CollisionRecord>,
}

impl ChunkPools {
    pub fn new(cfg: &PoolConfig) -> Self {
        let reserve = cfg.mesh_reserve_quads;
        Self {
            blocks: Pool::new("blocks", cfg.max_chunks, BlockStore::new),
            meshes: Pool::new("meshes", cfg.max_chunks * 2, || {
                ChunkMesh::with_quad_capacity(reserve)
            }),
            collision: Pool::new("collision", cfg.max_chunks, CollisionRecord::new),
        }
    }

    pub fn with_capacity(max_chunks: usize) -> Self {
        Self::new(&PoolConfig {
            max_chunks,
            ..PoolConfig::default()
        })
    }

    #[inline]
    pub fn blocks(&self) -> &Pool<BlockStore> {
        &self.blocks
    }

    #[inline]
    pub fn meshes(&self) -> &Pool<ChunkMesh> {
        &self.meshes
    }

    #[inline]
    pub fn collision(&self) -> &Pool<CollisionRecord> {
        &self.collision
    }

    pub fn stats(&self) -> [PoolStats; 3] {
        [self.blocks.stats(), self.meshes.stats(), self.collision.stats()]
    }
}
