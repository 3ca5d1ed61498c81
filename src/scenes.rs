use fastnoise_lite::{FastNoiseLite, NoiseType};
use voxi_blocks::Block;
use voxi_chunk::{BlockStore, CHUNK_SIZE, LocalPos};

use crate::cli::Scene;

const WATER_LEVEL: usize = 5;
const SNOW_LINE: usize = 12;

pub fn build(scene: Scene, seed: i32) -> BlockStore {
    match scene {
        Scene::Cavity => cavity(),
        Scene::Slab => slab(),
        Scene::Terrain => terrain(seed),
    }
}

fn cavity() -> BlockStore {
    let mut blocks = BlockStore::new();
    blocks.fill(Block::Stone);
    let c = CHUNK_SIZE / 2;
    blocks.set(LocalPos::new(c, c, c), Block::None);
    blocks
}

fn slab() -> BlockStore {
    let mut blocks = BlockStore::new();
    for (p, _) in BlockStore::new().iter() {
        let b = match p.y {
            0 => Block::Stone,
            1 | 2 => Block::Dirt,
            3 => Block::Grass,
            _ => continue,
        };
        blocks.set(p, b);
    }
    // A tree and a brick post on top.
    for y in 4..9 {
        blocks.set(LocalPos::new(4, y, 4), Block::Wood);
    }
    for x in 2..7 {
        for z in 2..7 {
            for y in 8..11 {
                if blocks.get(LocalPos::new(x, y, z)) == Block::None {
                    blocks.set(LocalPos::new(x, y, z), Block::Leaves);
                }
            }
        }
    }
    for y in 4..7 {
        blocks.set(LocalPos::new(11, y, 11), Block::Brick);
    }
    blocks
}

fn terrain(seed: i32) -> BlockStore {
    let mut noise = FastNoiseLite::with_seed(seed);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(0.06));

    let mut blocks = BlockStore::new();
    for x in 0..CHUNK_SIZE {
        for z in 0..CHUNK_SIZE {
            let n = (noise.get_noise_2d(x as f32, z as f32) + 1.0) * 0.5;
            let height = 3 + (n * (CHUNK_SIZE - 4) as f32) as usize;
            for y in 0..CHUNK_SIZE {
                blocks.set(LocalPos::new(x, y, z), column_block(y, height));
            }
        }
    }
    blocks
}

/// Block at `y` in a column whose surface is at `height`.
fn column_block(y: usize, height: usize) -> Block {
    if y > height {
        return if y <= WATER_LEVEL { Block::Water } else { Block::None };
    }
    if y + 3 <= height {
        return Block::Stone;
    }
    if y < height {
        return Block::Dirt;
    }
    if height >= SNOW_LINE {
        Block::Snow
    } else if height <= WATER_LEVEL + 1 {
        Block::Sand
    } else {
        Block::Grass
    }
}
