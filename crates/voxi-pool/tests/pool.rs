use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use proptest::prelude::*;
use voxi_pool::{Pool, PoolError, Reclaim};

#[derive(Default)]
struct Slab {
    bytes: Vec<u8>,
}

impl Reclaim for Slab {
    fn reclaim(&mut self) {
        self.bytes.clear();
    }
}

fn slab_pool(capacity: usize) -> Pool<Slab> {
    Pool::new("slab", capacity, || Slab {
        bytes: Vec::with_capacity(64),
    })
}

#[test]
fn exhaustion_reports_label_and_capacity() {
    let pool = slab_pool(2);
    let _a = pool.allocate().unwrap();
    let _b = pool.allocate().unwrap();
    match pool.allocate() {
        Err(PoolError::OutOfCapacity { pool, capacity }) => {
            assert_eq!(pool, "slab");
            assert_eq!(capacity, 2);
        }
        Ok(_) => panic!("allocation beyond capacity succeeded"),
    }
}

#[test]
fn free_makes_slot_available_again() {
    let pool = slab_pool(1);
    let a = pool.allocate().unwrap();
    assert_eq!(pool.available(), 0);
    pool.free(a);
    assert_eq!(pool.available(), 1);
    assert!(pool.allocate().is_ok());
}

#[test]
fn slots_keep_capacity_across_reuse() {
    let pool = slab_pool(1);
    {
        let mut a = pool.allocate().unwrap();
        a.bytes.extend_from_slice(&[1, 2, 3]);
    }
    let b = pool.allocate().unwrap();
    assert!(b.bytes.is_empty());
    assert!(b.bytes.capacity() >= 64);
}

#[test]
fn reclaim_runs_once_per_release() {
    static RECLAIMS: AtomicUsize = AtomicUsize::new(0);
    struct Counted;
    impl Reclaim for Counted {
        fn reclaim(&mut self) {
            RECLAIMS.fetch_add(1, Ordering::SeqCst);
        }
    }
    let pool = Pool::new("counted", 2, || Counted);
    let a = pool.allocate().unwrap();
    let b = pool.allocate().unwrap();
    drop(a);
    pool.free(b);
    assert_eq!(RECLAIMS.load(Ordering::SeqCst), 2);
}

#[test]
fn concurrent_allocate_free_never_exceeds_capacity() {
    let pool = slab_pool(8);
    let peak = Arc::new(AtomicUsize::new(0));
    thread::scope(|s| {
        for _ in 0..4 {
            let pool = pool.clone();
            let peak = Arc::clone(&peak);
            s.spawn(move || {
                for _ in 0..500 {
                    let a = pool.allocate();
                    let b = pool.allocate();
                    peak.fetch_max(pool.in_use(), Ordering::SeqCst);
                    drop(a);
                    drop(b);
                }
            });
        }
    });
    assert!(peak.load(Ordering::SeqCst) <= 8);
    assert_eq!(pool.in_use(), 0);
    assert_eq!(pool.available(), 8);
}

proptest! {
    // in_use tracks live handles for any interleaving of allocations and frees
    #[test]
    fn in_use_tracks_live_handles(cap in 1usize..16, ops in prop::collection::vec(any::<bool>(), 0..64)) {
        let pool = slab_pool(cap);
        let mut live = Vec::new();
        for alloc in ops {
            if alloc {
                match pool.allocate() {
                    Ok(h) => live.push(h),
                    Err(_) => prop_assert_eq!(live.len(), cap),
                }
            } else if let Some(h) = live.pop() {
                pool.free(h);
            }
            prop_assert_eq!(pool.in_use(), live.len());
        }
    }
}
