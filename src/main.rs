#![forbid(unsafe_code)]

mod cli;
mod logging;
mod report;
mod scenes;

use std::error::Error;
use std::fs;
use std::sync::Arc;

use clap::Parser;
use voxi_blocks::BlockPalette;
use voxi_chunk::rle;
use voxi_geom::Vec3;
use voxi_physics::ColliderSet;
use voxi_runtime::{Chunk, ChunkAccess, ChunkPools, RenderMode, RuntimeConfig};

use crate::cli::{Cli, Command};
use crate::report::StatsRenderer;

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let cfg = match &cli.config {
        Some(path) => RuntimeConfig::from_path(path)?,
        None => RuntimeConfig::default(),
    };
    let palette = Arc::new(cfg.palette()?);
    let pools = ChunkPools::new(&cfg.pools);
    let mut physics = ColliderSet::new();

    match cli.command {
        Command::Demo { scene, seed, save } => {
            let blocks = scenes::build(scene, seed);
            let mut bytes = Vec::new();
            rle::encode(&blocks, &mut bytes);
            log::info!("{scene:?} scene encodes to {} bytes", bytes.len());
            if let Some(path) = save {
                fs::write(&path, &bytes)?;
                log::info!("saved chunk to {}", path.display());
            }
            let mut chunk = Chunk::new(&pools, Arc::clone(&palette))?;
            mesh_chunk(&mut chunk, &bytes, Vec3::ZERO, &mut physics)?;
        }
        Command::Mesh { file, origin } => {
            let bytes = fs::read(&file)?;
            let mut chunk = Chunk::new(&pools, Arc::clone(&palette))?;
            mesh_chunk(&mut chunk, &bytes, origin, &mut physics)?;
        }
        Command::Roundtrip { file } => {
            let bytes = fs::read(&file)?;
            roundtrip(&pools, &palette, &bytes)?;
        }
    }

    report::print_world(&pools, &physics);
    Ok(())
}

/// Runs one chunk through its whole lifecycle and prints what it produced.
fn mesh_chunk(
    chunk: &mut impl ChunkAccess,
    bytes: &[u8],
    origin: Vec3,
    physics: &mut ColliderSet,
) -> Result<(), Box<dyn Error>> {
    chunk.load(bytes, origin)?;
    let stats = chunk.rebuild_mesh();
    let transition = chunk.swap_mesh_buffer(physics);
    let mut renderer = StatsRenderer::default();
    chunk.render(&mut renderer, RenderMode::Triangles);
    report::print_mesh(&stats, transition, &renderer);
    chunk.shut_down(physics);
    let mut out = Vec::with_capacity(bytes.len());
    chunk.unload(&mut out)?;
    Ok(())
}

fn roundtrip(pools: &ChunkPools, palette: &Arc<BlockPalette>, bytes: &[u8]) -> Result<(), Box<dyn Error>> {
    let mut chunk = Chunk::new(pools, Arc::clone(palette))?;
    chunk.load(bytes, Vec3::ZERO)?;
    let mut out = Vec::with_capacity(bytes.len());
    chunk.unload(&mut out)?;
    if out == bytes {
        println!("Roundtrip: identical ({} bytes)", bytes.len());
    } else {
        // Valid but not canonical, e.g. adjacent runs of the same block.
        println!(
            "Roundtrip: re-encoded {} bytes as {} canonical bytes",
            bytes.len(),
            out.len()
        );
    }
    Ok(())
}
