use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::types::Block;

/// Per-type vertex colors used by the mesher.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockPalette {
    colors: [[f32; 3]; Block::COUNT],
}

impl Default for BlockPalette {
    fn default() -> Self {
        Self {
            colors: Block::COLORS,
        }
    }
}

impl BlockPalette {
    #[inline]
    pub fn color(&self, block: Block) -> [f32; 3] {
        self.colors[block.id() as usize]
    }

    pub fn set_color(&mut self, block: Block, rgb: [f32; 3]) {
        self.colors[block.id() as usize] = rgb;
    }

    /// Builds a palette from `name -> [r, g, b]` overrides on top of the defaults.
    pub fn from_overrides(overrides: &HashMap<String, [f32; 3]>) -> Result<Self, Box<dyn Error>> {
        let mut palette = BlockPalette::default();
        // Sort so the first reported error is stable.
        let mut entries: Vec<(&String, &[f32; 3])> = overrides.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (name, rgb) in entries {
            let block = Block::from_name(name)
                .ok_or_else(|| format!("unknown block '{name}' in palette"))?;
            if block == Block::None {
                return Err("the empty block has no color".into());
            }
            if rgb.iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(format!("color for '{name}' must be within [0, 1]").into());
            }
            palette.set_color(block, *rgb);
        }
        Ok(palette)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: PaletteConfig = toml::from_str(toml_str)?;
        Self::from_overrides(&cfg.palette)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

// --- Config ---

#[derive(Deserialize, Default)]
pub struct PaletteConfig {
    #[serde(default)]
    pub palette: HashMap<String, [f32; 3]>,
}
