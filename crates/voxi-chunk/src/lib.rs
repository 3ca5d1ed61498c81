//! Chunk block storage and its run-length persisted form.
#![forbid(unsafe_code)]

pub mod rle;

use voxi_blocks::Block;
use voxi_pool::Reclaim;

pub use rle::CodecError;

/// Edge length of a chunk in blocks.
pub const CHUNK_SIZE: usize = 16;
pub const CHUNK_AREA: usize = CHUNK_SIZE * CHUNK_SIZE;
pub const CHUNK_VOLUME: usize = CHUNK_AREA * CHUNK_SIZE;

/// Block coordinate local to one chunk, each axis in `[0, CHUNK_SIZE)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LocalPos {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl LocalPos {
    #[inline]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn in_bounds(self) -> bool {
        self.x < CHUNK_SIZE && self.y < CHUNK_SIZE && self.z < CHUNK_SIZE
    }
}

/// Flat `CHUNK_SIZE^3` block array for one chunk.
#[derive(Clone, PartialEq, Eq)]
pub struct BlockStore {
    blocks: [Block; CHUNK_VOLUME],
}

impl Default for BlockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BlockStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let solid = self.blocks.iter().filter(|b| b.is_solid()).count();
        f.debug_struct("BlockStore")
            .field("solid", &solid)
            .field("volume", &CHUNK_VOLUME)
            .finish()
    }
}

impl BlockStore {
    pub const fn new() -> Self {
        Self {
            blocks: [Block::None; CHUNK_VOLUME],
        }
    }

    /// `x * CHUNK_SIZE^2 + y * CHUNK_SIZE + z`. Coordinates must be in range.
    #[inline]
    pub fn index(x: usize, y: usize, z: usize) -> usize {
        debug_assert!(
            x < CHUNK_SIZE && y < CHUNK_SIZE && z < CHUNK_SIZE,
            "block ({x}, {y}, {z}) outside chunk"
        );
        x * CHUNK_AREA + y * CHUNK_SIZE + z
    }

    #[inline]
    pub fn get(&self, pos: LocalPos) -> Block {
        self.blocks[Self::index(pos.x, pos.y, pos.z)]
    }

    #[inline]
    pub fn set(&mut self, pos: LocalPos, block: Block) {
        self.blocks[Self::index(pos.x, pos.y, pos.z)] = block;
    }

    /// Signed lookup for neighbor sampling: anything outside the chunk reads as `None`.
    #[inline]
    pub fn get_or_none(&self, x: i32, y: i32, z: i32) -> Block {
        const EDGE: i32 = CHUNK_SIZE as i32;
        if (0..EDGE).contains(&x) && (0..EDGE).contains(&y) && (0..EDGE).contains(&z) {
            self.blocks[Self::index(x as usize, y as usize, z as usize)]
        } else {
            Block::None
        }
    }

    pub fn fill(&mut self, block: Block) {
        self.blocks.fill(block);
    }

    #[inline]
    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }

    /// One `z` row at fixed `(x, y)`.
    #[inline]
    pub fn row(&self, x: usize, y: usize) -> &[Block] {
        let start = Self::index(x, y, 0);
        &self.blocks[start..start + CHUNK_SIZE]
    }

    #[inline]
    pub fn row_mut(&mut self, x: usize, y: usize) -> &mut [Block] {
        let start = Self::index(x, y, 0);
        &mut self.blocks[start..start + CHUNK_SIZE]
    }

    #[inline]
    pub fn has_solid(&self) -> bool {
        self.blocks.iter().any(|b| b.is_solid())
    }

    /// Iterates `(pos, block)` in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (LocalPos, Block)> + '_ {
        self.blocks.iter().enumerate().map(|(i, &b)| {
            let x = i / CHUNK_AREA;
            let y = (i / CHUNK_SIZE) % CHUNK_SIZE;
            let z = i % CHUNK_SIZE;
            (LocalPos::new(x, y, z), b)
        })
    }
}

impl Reclaim for BlockStore {
    fn reclaim(&mut self) {
        self.fill(Block::None);
    }
}
