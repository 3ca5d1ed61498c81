//! Block types and color palette.
#![forbid(unsafe_code)]

pub mod palette;
pub mod types;

pub use palette::BlockPalette;
pub use types::Block;
