use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use voxi_blocks::BlockPalette;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PoolConfig {
    /// Chunks alive at once. Sizes the block-store and collision pools; the
    /// mesh pool holds twice as many.
    pub max_chunks: usize,
    /// Quads each mesh slot reserves up front.
    pub mesh_reserve_quads: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_chunks: 256,
            mesh_reserve_quads: 128,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    pub pools: PoolConfig,
    /// Block name to `[r, g, b]`.
    pub palette: HashMap<String, [f32; 3]>,
}

impl RuntimeConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: RuntimeConfig = toml::from_str(toml_str)?;
        if cfg.pools.max_chunks == 0 {
            return Err("pools.max_chunks must be at least 1".into());
        }
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Default colors with this config's overrides applied.
    pub fn palette(&self) -> Result<BlockPalette, Box<dyn Error>> {
        BlockPalette::from_overrides(&self.palette)
    }
}
