use std::sync::atomic::{AtomicU64, Ordering};

use hashbrown::HashMap;
use voxi_geom::{Aabb, Vec3};

use crate::shape::SharedShape;

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Identity of one chunk collider within a physics world.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderHandle(u64);

impl ColliderHandle {
    /// Process-unique handle.
    pub fn next() -> Self {
        Self(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// What a physics world receives for a chunk collider. The shape is live:
/// later in-place rebuilds are seen through it.
#[derive(Clone, Debug)]
pub struct ColliderBody {
    pub shape: SharedShape,
    pub origin: Vec3,
}

/// The two calls a chunk makes into its physics world. Each must be made
/// exactly once per transition; the world keeps its own active set.
pub trait PhysicsWorld {
    fn add_collider(&mut self, handle: ColliderHandle, body: ColliderBody);
    fn remove_collider(&mut self, handle: ColliderHandle);
}

#[derive(Clone, Debug)]
pub struct ColliderEntry {
    pub origin: Vec3,
    shape: SharedShape,
}

impl ColliderEntry {
    /// World-space bounds.
    pub fn bounds(&self) -> Aabb {
        self.shape.read().bounds().translated(self.origin)
    }

    /// Triangles in the collider's current geometry.
    pub fn triangles(&self) -> usize {
        self.shape.read().triangle_count()
    }
}

/// Active-collider set for an in-process physics world.
///
/// Adding a handle twice or removing one that is not present leaves the set
/// unchanged; both are logged and counted as redundant.
#[derive(Debug, Default)]
pub struct ColliderSet {
    active: HashMap<ColliderHandle, ColliderEntry>,
    adds: u64,
    removes: u64,
    redundant: u64,
}

impl ColliderSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    #[inline]
    pub fn contains(&self, handle: ColliderHandle) -> bool {
        self.active.contains_key(&handle)
    }

    pub fn get(&self, handle: ColliderHandle) -> Option<&ColliderEntry> {
        self.active.get(&handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ColliderHandle, &ColliderEntry)> {
        self.active.iter()
    }

    /// Successful add calls.
    #[inline]
    pub fn adds(&self) -> u64 {
        self.adds
    }

    #[inline]
    pub fn removes(&self) -> u64 {
        self.removes
    }

    #[inline]
    pub fn redundant_calls(&self) -> u64 {
        self.redundant
    }
}

impl PhysicsWorld for ColliderSet {
    fn add_collider(&mut self, handle: ColliderHandle, body: ColliderBody) {
        if self.active.contains_key(&handle) {
            log::warn!("collider {} added twice", handle.id());
            self.redundant += 1;
            return;
        }
        let entry = ColliderEntry {
            origin: body.origin,
            shape: body.shape,
        };
        self.active.insert(handle, entry);
        self.adds += 1;
    }

    fn remove_collider(&mut self, handle: ColliderHandle) {
        if self.active.remove(&handle).is_none() {
            log::warn!("collider {} removed while not present", handle.id());
            self.redundant += 1;
            return;
        }
        self.removes += 1;
    }
}
