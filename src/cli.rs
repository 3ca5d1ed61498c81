use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use voxi_geom::Vec3;

#[derive(Parser, Debug)]
#[command(name = "voxigine", version, about = "Chunk meshing and persistence tools")]
pub struct Cli {
    /// Runtime config (TOML) with pool sizes and palette overrides
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Also write debug logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a sample chunk, mesh it and report the result
    Demo {
        #[arg(long, value_enum, default_value_t = Scene::Cavity)]
        scene: Scene,

        /// Noise seed for the terrain scene
        #[arg(long, default_value_t = 1337)]
        seed: i32,

        /// Write the persisted chunk here
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Load a persisted chunk and report its mesh
    Mesh {
        file: PathBuf,

        /// World position of the chunk, as X,Y,Z
        #[arg(long, value_parser = parse_origin, default_value = "0,0,0")]
        origin: Vec3,
    },
    /// Check that a persisted chunk re-encodes to the same bytes
    Roundtrip { file: PathBuf },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Scene {
    /// Solid stone with one block removed from the middle
    Cavity,
    /// Layered ground with a few props
    Slab,
    /// Noise heightmap with water and snow
    Terrain,
}

fn parse_origin(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected X,Y,Z, got '{s}'"));
    }
    let mut v = [0.0f32; 3];
    for (out, p) in v.iter_mut().zip(&parts) {
        *out = p.parse().map_err(|e| format!("bad coordinate '{p}': {e}"))?;
    }
    Ok(Vec3::from(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_parses() {
        assert_eq!(parse_origin("16, 0,-32").unwrap(), Vec3::new(16.0, 0.0, -32.0));
        assert!(parse_origin("1,2").is_err());
        assert!(parse_origin("1,x,2").is_err());
    }

    #[test]
    fn cli_shape_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
