//! Chunk collision shapes and the narrow physics-world contract they feed.
#![forbid(unsafe_code)]

pub mod record;
pub mod shape;
pub mod world;

pub use record::{CollisionRecord, CollisionTransition};
pub use shape::{INDEX_STRIDE, SharedShape, TriangleMeshShape};
pub use world::{ColliderBody, ColliderEntry, ColliderHandle, ColliderSet, PhysicsWorld};
