//! Two mesh slots per chunk with an atomic active index.
//!
//! The renderer reads only the active slot and a rebuild writes only the
//! inactive one, so under the single-rebuilder, no-render-during-swap rules
//! neither slot lock is ever contended. The swap publishes the rebuilt slot
//! with a release store that pairs with the acquire load in `render`.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{RwLock, RwLockWriteGuard};
use voxi_mesh_cpu::ChunkMesh;
use voxi_pool::Pooled;

pub struct DoubleBufferedMesh {
    slots: [RwLock<Pooled<ChunkMesh>>; 2],
    active: AtomicBool,
}

impl DoubleBufferedMesh {
    /// Slot 0 starts active.
    pub fn new(first: Pooled<ChunkMesh>, second: Pooled<ChunkMesh>) -> Self {
        Self {
            slots: [RwLock::new(first), RwLock::new(second)],
            active: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn active_index(&self) -> usize {
        self.active.load(Ordering::Acquire) as usize
    }

    /// Runs `f` against the inactive slot.
    pub fn rebuild_with<R>(&self, f: impl FnOnce(&mut ChunkMesh) -> R) -> R {
        let idx = 1 - self.active_index();
        let mut slot = self.slots[idx].write();
        f(&mut slot)
    }

    /// Runs `f` against the active slot.
    pub fn render<R>(&self, f: impl FnOnce(&ChunkMesh) -> R) -> R {
        let slot = self.slots[self.active_index()].read();
        f(&slot)
    }

    /// Retires the active slot and publishes the other one.
    ///
    /// `on_swap` receives whether the retired slot was empty, and the newly
    /// active slot.
    pub fn swap<R>(&self, on_swap: impl FnOnce(bool, &ChunkMesh) -> R) -> R {
        let old = self.active_index();
        let new = 1 - old;
        let prev_empty = {
            let mut retired = self.slots[old].write();
            let empty = retired.is_empty();
            retired.clear();
            retired.deactivate();
            empty
        };
        let mut next = self.slots[new].write();
        next.activate();
        self.active.store(new == 1, Ordering::Release);
        let next = RwLockWriteGuard::downgrade(next);
        on_swap(prev_empty, &next)
    }

    /// Clears and deactivates both slots and resets the active index.
    pub fn shut_down(&self) {
        for slot in &self.slots {
            let mut mesh = slot.write();
            mesh.clear();
            mesh.deactivate();
        }
        self.active.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxi_geom::Vec3;
    use voxi_pool::Pool;

    fn buffers(pool: &Pool<ChunkMesh>) -> DoubleBufferedMesh {
        DoubleBufferedMesh::new(pool.allocate().unwrap(), pool.allocate().unwrap())
    }

    fn one_quad(mesh: &mut ChunkMesh) {
        let c = [Vec3::ZERO, Vec3::ZERO, Vec3::ZERO, Vec3::ZERO];
        mesh.add_quad(c, [3; 4], Vec3::new(0.0, 1.0, 0.0), [1.0; 3], false);
    }

    #[test]
    fn rebuild_targets_the_inactive_slot() {
        let pool = Pool::new("meshes", 2, ChunkMesh::default);
        let db = buffers(&pool);
        db.rebuild_with(one_quad);
        assert!(db.render(|m| m.is_empty()));
        let (prev_empty, quads) = db.swap(|prev, m| (prev, m.quad_count()));
        assert!(prev_empty);
        assert_eq!(quads, 1);
        assert_eq!(db.active_index(), 1);
        assert!(db.render(|m| m.is_active()));
    }

    #[test]
    fn swap_retires_the_old_slot() {
        let pool = Pool::new("meshes", 2, ChunkMesh::default);
        let db = buffers(&pool);
        db.rebuild_with(one_quad);
        db.swap(|_, _| ());
        db.rebuild_with(|m| assert!(m.is_empty() && !m.is_active()));
        let prev_empty = db.swap(|prev, m| {
            assert!(m.is_empty());
            prev
        });
        assert!(!prev_empty);
        assert_eq!(db.active_index(), 0);
    }

    #[test]
    fn shut_down_resets_both_slots() {
        let pool = Pool::new("meshes", 2, ChunkMesh::default);
        let db = buffers(&pool);
        db.rebuild_with(one_quad);
        db.swap(|_, _| ());
        db.shut_down();
        assert_eq!(db.active_index(), 0);
        assert!(db.render(|m| m.is_empty() && !m.is_active()));
        db.rebuild_with(|m| assert!(m.is_empty() && !m.is_active()));
    }
}
