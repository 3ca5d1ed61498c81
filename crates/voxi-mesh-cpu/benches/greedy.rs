use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::time::Duration;

use voxi_blocks::{Block, BlockPalette};
use voxi_chunk::{BlockStore, CHUNK_SIZE, LocalPos};
use voxi_mesh_cpu::{ChunkMesh, greedy_mesh};

fn hills() -> BlockStore {
    let mut blocks = BlockStore::new();
    for x in 0..CHUNK_SIZE {
        for z in 0..CHUNK_SIZE {
            let h = 4 + (x * 3 + z * 5) % 9;
            for y in 0..h {
                let b = if y + 1 == h { Block::Grass } else { Block::Dirt };
                blocks.set(LocalPos::new(x, y, z), b);
            }
        }
    }
    blocks
}

// Worst case for merging: no two neighbors share a type.
fn checkerboard() -> BlockStore {
    let mut blocks = BlockStore::new();
    for (p, _) in BlockStore::new().iter() {
        if (p.x + p.y + p.z) % 2 == 0 {
            blocks.set(p, Block::Stone);
        }
    }
    blocks
}

fn bench_greedy_solid_with_cavity(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_solid");
    let palette = BlockPalette::default();
    let mut blocks = BlockStore::new();
    blocks.fill(Block::Stone);
    blocks.set(LocalPos::new(8, 8, 8), Block::None);
    let mut out = ChunkMesh::with_quad_capacity(64);
    group.bench_function("solid_16_cavity", |b| {
        b.iter(|| {
            let stats = greedy_mesh(black_box(&blocks), &palette, &mut out);
            black_box(stats);
        })
    });
    group.finish();
}

fn bench_greedy_terrain(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_terrain");
    let palette = BlockPalette::default();
    let blocks = hills();
    let mut out = ChunkMesh::with_quad_capacity(1024);
    group.bench_function("hills_16", |b| {
        b.iter(|| {
            let stats = greedy_mesh(black_box(&blocks), &palette, &mut out);
            black_box(stats);
        })
    });
    group.finish();
}

fn bench_greedy_checkerboard(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_checkerboard");
    group.measurement_time(Duration::from_secs(8));
    let palette = BlockPalette::default();
    let blocks = checkerboard();
    let mut out = ChunkMesh::with_quad_capacity(CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE * 3);
    group.bench_function("checkerboard_16", |b| {
        b.iter(|| {
            let stats = greedy_mesh(black_box(&blocks), &palette, &mut out);
            black_box(stats);
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_greedy_solid_with_cavity,
    bench_greedy_terrain,
    bench_greedy_checkerboard
);
criterion_main!(benches);
