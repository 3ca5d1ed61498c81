//! CPU greedy mesher with per-vertex ambient occlusion.
#![forbid(unsafe_code)]

pub mod ao;
pub mod constants;
pub mod face;
pub mod greedy;
pub mod mesh;

pub use ao::{face_ao, vertex_ao};
pub use face::Face;
pub use greedy::{MaskEntry, MeshStats, greedy_mesh};
pub use mesh::{ChunkMesh, ChunkVertex};
