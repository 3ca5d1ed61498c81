use std::sync::Arc;

use parking_lot::Mutex;
use voxi_blocks::{Block, BlockPalette};
use voxi_chunk::{BlockStore, CodecError, LocalPos, rle};
use voxi_geom::Vec3;
use voxi_mesh_cpu::{MeshStats, greedy_mesh};
use voxi_physics::{CollisionRecord, CollisionTransition, PhysicsWorld};
use voxi_pool::{PoolError, Pooled};

use crate::double_buffer::DoubleBufferedMesh;
use crate::pools::ChunkPools;
use crate::render::{MeshRenderer, RenderMode};

#[derive(Debug, thiserror::Error)]
pub enum ChunkError {
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("corrupt chunk data: {0}")]
    Codec(#[from] CodecError),
    #[error("chunk is already loaded")]
    AlreadyLoaded,
    #[error("chunk is not loaded")]
    NotLoaded,
}

/// One chunk: its blocks, two mesh slots and its collider.
///
/// All four resources come from [`ChunkPools`] and go back when the chunk is
/// dropped.
pub struct Chunk {
    blocks: Pooled<BlockStore>,
    meshes: DoubleBufferedMesh,
    collision: Mutex<Pooled<CollisionRecord>>,
    palette: Arc<BlockPalette>,
    position: Vec3,
    loaded: bool,
}

impl Chunk {
    pub fn new(pools: &ChunkPools, palette: Arc<BlockPalette>) -> Result<Self, ChunkError> {
        let first = pools.meshes().allocate()?;
        let second = pools.meshes().allocate()?;
        let blocks = pools.blocks().allocate()?;
        let collision = pools.collision().allocate()?;
        Ok(Self {
            blocks,
            meshes: DoubleBufferedMesh::new(first, second),
            collision: Mutex::new(collision),
            palette,
            position: Vec3::ZERO,
            loaded: false,
        })
    }

    /// Fills the blocks from a persisted stream and places the chunk at
    /// `position`. A corrupt stream leaves the chunk unloaded and its blocks
    /// untouched.
    pub fn load(&mut self, bytes: &[u8], position: Vec3) -> Result<(), ChunkError> {
        if self.loaded {
            return Err(ChunkError::AlreadyLoaded);
        }
        rle::decode_into(bytes, &mut self.blocks)?;
        self.position = position;
        self.collision.get_mut().set_origin(position);
        self.loaded = true;
        log::debug!(
            "chunk loaded at ({}, {}, {}) from {} bytes",
            position.x,
            position.y,
            position.z,
            bytes.len()
        );
        Ok(())
    }

    /// Appends the persisted form of the blocks to `out` and marks the
    /// chunk unloaded.
    pub fn unload(&mut self, out: &mut Vec<u8>) -> Result<(), ChunkError> {
        if !self.loaded {
            return Err(ChunkError::NotLoaded);
        }
        self.loaded = false;
        let start = out.len();
        rle::encode(&self.blocks, out);
        log::debug!("chunk unloaded to {} bytes", out.len() - start);
        Ok(())
    }

    /// Removes the collider if the active mesh has one and deactivates both
    /// mesh slots.
    pub fn shut_down(&self, physics: &mut dyn PhysicsWorld) {
        let mut collision = self.collision.lock();
        if !self.meshes.render(|m| m.is_empty()) {
            collision.deregister(physics);
        }
        self.meshes.shut_down();
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Draws the active mesh if it is resident.
    pub fn render(&self, renderer: &mut dyn MeshRenderer, mode: RenderMode) {
        debug_assert!(self.loaded, "render on an unloaded chunk");
        self.meshes.render(|mesh| {
            if mesh.is_active() {
                renderer.draw(mesh, mode);
            }
        });
    }

    /// Meshes the current blocks into the inactive slot. The active slot
    /// stays renderable throughout.
    pub fn rebuild_mesh(&self) -> MeshStats {
        debug_assert!(self.loaded, "rebuild on an unloaded chunk");
        let stats = self
            .meshes
            .rebuild_with(|mesh| greedy_mesh(&self.blocks, &self.palette, mesh));
        log::debug!(
            "chunk rebuilt: {} quads, {} vertices, {} indices",
            stats.quads,
            stats.vertices,
            stats.indices
        );
        stats
    }

    /// Publishes the last rebuild and brings the collider in line with it.
    pub fn swap_mesh_buffer(&self, physics: &mut dyn PhysicsWorld) -> CollisionTransition {
        let mut collision = self.collision.lock();
        self.meshes
            .swap(|prev_empty, mesh| collision.synchronize(prev_empty, mesh, physics))
    }

    pub fn set_block(&mut self, pos: LocalPos, block: Block) {
        debug_assert!(self.loaded, "set_block on an unloaded chunk");
        self.blocks.set(pos, block);
    }

    #[inline]
    pub fn get_block(&self, pos: LocalPos) -> Block {
        self.blocks.get(pos)
    }

    pub fn destroy_block(&mut self, pos: LocalPos) {
        self.set_block(pos, Block::None);
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn blocks(&self) -> &BlockStore {
        &self.blocks
    }

    #[inline]
    pub fn meshes(&self) -> &DoubleBufferedMesh {
        &self.meshes
    }

    pub fn collider_registered(&self) -> bool {
        self.collision.lock().is_registered()
    }
}

/// The operations the world layer needs from a chunk, and nothing more.
pub trait ChunkAccess {
    fn load(&mut self, bytes: &[u8], position: Vec3) -> Result<(), ChunkError>;
    fn unload(&mut self, out: &mut Vec<u8>) -> Result<(), ChunkError>;
    fn shut_down(&self, physics: &mut dyn PhysicsWorld);
    fn is_loaded(&self) -> bool;
    fn render(&self, renderer: &mut dyn MeshRenderer, mode: RenderMode);
    fn rebuild_mesh(&self) -> MeshStats;
    fn swap_mesh_buffer(&self, physics: &mut dyn PhysicsWorld) -> CollisionTransition;
    fn set_block(&mut self, pos: LocalPos, block: Block);
    fn get_block(&self, pos: LocalPos) -> Block;
    fn destroy_block(&mut self, pos: LocalPos);
}

impl ChunkAccess for Chunk {
    fn load(&mut self, bytes: &[u8], position: Vec3) -> Result<(), ChunkError> {
        Chunk::load(self, bytes, position)
    }

    fn unload(&mut self, out: &mut Vec<u8>) -> Result<(), ChunkError> {
        Chunk::unload(self, out)
    }

    fn shut_down(&self, physics: &mut dyn PhysicsWorld) {
        Chunk::shut_down(self, physics)
    }

    fn is_loaded(&self) -> bool {
        Chunk::is_loaded(self)
    }

    fn render(&self, renderer: &mut dyn MeshRenderer, mode: RenderMode) {
        Chunk::render(self, renderer, mode)
    }

    fn rebuild_mesh(&self) -> MeshStats {
        Chunk::rebuild_mesh(self)
    }

    fn swap_mesh_buffer(&self, physics: &mut dyn PhysicsWorld) -> CollisionTransition {
        Chunk::swap_mesh_buffer(self, physics)
    }

    fn set_block(&mut self, pos: LocalPos, block: Block) {
        Chunk::set_block(self, pos, block)
    }

    fn get_block(&self, pos: LocalPos) -> Block {
        Chunk::get_block(self, pos)
    }

    fn destroy_block(&mut self, pos: LocalPos) {
        Chunk::destroy_block(self, pos)
    }
}
