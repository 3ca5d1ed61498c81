//! Chunk lifecycle: pooled resources, double-buffered meshes and the
//! collider handoff on swap.
#![forbid(unsafe_code)]

mod chunk;
mod config;
mod double_buffer;
mod pools;
mod render;

pub use chunk::{Chunk, ChunkAccess, ChunkError};
pub use config::{PoolConfig, RuntimeConfig};
pub use double_buffer::DoubleBufferedMesh;
pub use pools::ChunkPools;
pub use render::{MeshRenderer, RenderMode};
