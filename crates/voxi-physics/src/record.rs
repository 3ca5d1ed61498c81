use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use voxi_geom::Vec3;
use voxi_mesh_cpu::ChunkMesh;
use voxi_pool::Reclaim;

use crate::shape::{SharedShape, TriangleMeshShape};
use crate::world::{ColliderBody, ColliderHandle, PhysicsWorld};

/// Effect of one mesh swap on the physics world.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CollisionTransition {
    /// Empty to empty.
    Unchanged,
    /// Empty to non-empty: collider added.
    Registered,
    /// Non-empty to non-empty: shape rebuilt in place, world untouched.
    Rebuilt,
    /// Non-empty to empty: collider removed.
    Deregistered,
}

/// Collision shape and collider identity for one chunk.
///
/// The shape is shared with the physics world on registration, so rebuilding
/// it in place is visible to the world without another call.
#[derive(Debug)]
pub struct CollisionRecord {
    shape: SharedShape,
    handle: ColliderHandle,
    origin: Vec3,
    registered: bool,
}

impl Default for CollisionRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl CollisionRecord {
    pub fn new() -> Self {
        Self {
            shape: Arc::new(RwLock::new(TriangleMeshShape::default())),
            handle: ColliderHandle::next(),
            origin: Vec3::ZERO,
            registered: false,
        }
    }

    /// World-space position of the chunk's local origin.
    pub fn set_origin(&mut self, origin: Vec3) {
        self.origin = origin;
    }

    #[inline]
    pub fn handle(&self) -> ColliderHandle {
        self.handle
    }

    pub fn shape(&self) -> RwLockReadGuard<'_, TriangleMeshShape> {
        self.shape.read()
    }

    #[inline]
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Brings the collider in line with the newly active `mesh`.
    /// `prev_empty` describes the mesh that was active before the swap.
    pub fn synchronize(
        &mut self,
        prev_empty: bool,
        mesh: &ChunkMesh,
        world: &mut dyn PhysicsWorld,
    ) -> CollisionTransition {
        debug_assert_eq!(self.registered, !prev_empty, "collider state out of step with mesh");
        if !mesh.is_empty() {
            self.shape.write().rebuild_from(mesh);
            if !prev_empty {
                return CollisionTransition::Rebuilt;
            }
            world.add_collider(
                self.handle,
                ColliderBody {
                    shape: Arc::clone(&self.shape),
                    origin: self.origin,
                },
            );
            self.registered = true;
            log::debug!("collider {} registered", self.handle.id());
            CollisionTransition::Registered
        } else if !prev_empty {
            self.deregister(world);
            log::debug!("collider {} deregistered", self.handle.id());
            CollisionTransition::Deregistered
        } else {
            CollisionTransition::Unchanged
        }
    }

    /// Removes the collider from `world` if it is registered.
    pub fn deregister(&mut self, world: &mut dyn PhysicsWorld) {
        if self.registered {
            world.remove_collider(self.handle);
            self.registered = false;
        }
        self.shape.write().clear();
    }
}

impl Reclaim for CollisionRecord {
    fn reclaim(&mut self) {
        if self.registered {
            // The world still holds this handle and shape; the next owner of
            // the slot gets fresh ones so its collider is not mistaken for
            // the stale entry.
            log::warn!(
                "collision record {} recycled while still registered",
                self.handle.id()
            );
            self.handle = ColliderHandle::next();
            self.shape = Arc::new(RwLock::new(TriangleMeshShape::default()));
            self.registered = false;
        }
        self.shape.write().clear();
        self.origin = Vec3::ZERO;
    }
}
