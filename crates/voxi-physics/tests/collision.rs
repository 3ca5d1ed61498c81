use std::sync::Arc;

use parking_lot::RwLock;
use voxi_blocks::{Block, BlockPalette};
use voxi_chunk::{BlockStore, LocalPos};
use voxi_geom::Vec3;
use voxi_mesh_cpu::{ChunkMesh, greedy_mesh};
use voxi_physics::{
    ColliderBody, ColliderHandle, ColliderSet, CollisionRecord, CollisionTransition, PhysicsWorld,
    TriangleMeshShape,
};

fn mesh_of(cells: &[(usize, usize, usize)]) -> ChunkMesh {
    let mut blocks = BlockStore::new();
    for &(x, y, z) in cells {
        blocks.set(LocalPos::new(x, y, z), Block::Stone);
    }
    let mut out = ChunkMesh::default();
    greedy_mesh(&blocks, &BlockPalette::default(), &mut out);
    out
}

#[test]
fn four_state_transitions() {
    let mut world = ColliderSet::new();
    let mut rec = CollisionRecord::new();
    let empty = ChunkMesh::default();
    let one = mesh_of(&[(1, 1, 1)]);
    let two = mesh_of(&[(1, 1, 1), (5, 5, 5)]);

    assert_eq!(rec.synchronize(true, &empty, &mut world), CollisionTransition::Unchanged);
    assert!(world.is_empty());

    assert_eq!(rec.synchronize(true, &one, &mut world), CollisionTransition::Registered);
    assert!(world.contains(rec.handle()));
    assert_eq!(rec.shape().triangle_count(), 12);

    assert_eq!(rec.synchronize(false, &two, &mut world), CollisionTransition::Rebuilt);
    assert_eq!(rec.shape().triangle_count(), 24);

    assert_eq!(rec.synchronize(false, &empty, &mut world), CollisionTransition::Deregistered);
    assert!(world.is_empty());
    assert!(rec.shape().is_empty());

    assert_eq!(world.adds(), 1);
    assert_eq!(world.removes(), 1);
    assert_eq!(world.redundant_calls(), 0);
}

#[test]
fn world_sees_geometry_rebuilt_in_place() {
    let mut world = ColliderSet::new();
    let mut rec = CollisionRecord::new();
    rec.synchronize(true, &mesh_of(&[(1, 1, 1)]), &mut world);
    assert_eq!(world.get(rec.handle()).unwrap().triangles(), 12);

    let two = mesh_of(&[(1, 1, 1), (5, 5, 5)]);
    assert_eq!(rec.synchronize(false, &two, &mut world), CollisionTransition::Rebuilt);
    assert_eq!(world.get(rec.handle()).unwrap().triangles(), 24);
    assert_eq!(world.adds(), 1);
    assert_eq!(world.redundant_calls(), 0);
}

#[test]
fn many_rebuilds_register_once() {
    let mut world = ColliderSet::new();
    let mut rec = CollisionRecord::new();
    let mut prev_empty = true;
    for i in 0..10 {
        let m = mesh_of(&[(i, 0, 0)]);
        rec.synchronize(prev_empty, &m, &mut world);
        prev_empty = m.is_empty();
    }
    rec.synchronize(prev_empty, &ChunkMesh::default(), &mut world);
    assert_eq!((world.adds(), world.removes(), world.redundant_calls()), (1, 1, 0));
}

#[test]
fn collider_sits_at_chunk_origin() {
    let mut world = ColliderSet::new();
    let mut rec = CollisionRecord::new();
    rec.set_origin(Vec3::new(32.0, 0.0, -16.0));
    rec.synchronize(true, &mesh_of(&[(0, 0, 0)]), &mut world);
    let entry = world.get(rec.handle()).unwrap();
    assert_eq!(entry.origin, Vec3::new(32.0, 0.0, -16.0));
    assert_eq!(entry.bounds().min, Vec3::new(32.0, 0.0, -16.0));
    assert_eq!(entry.bounds().max, Vec3::new(48.0, 16.0, 0.0));
    assert_eq!(entry.triangles(), 12);
}

#[test]
fn deregister_is_idempotent_on_the_record() {
    let mut world = ColliderSet::new();
    let mut rec = CollisionRecord::new();
    rec.synchronize(true, &mesh_of(&[(2, 2, 2)]), &mut world);
    rec.deregister(&mut world);
    rec.deregister(&mut world);
    assert!(!rec.is_registered());
    assert_eq!(world.removes(), 1);
    assert_eq!(world.redundant_calls(), 0);
}

#[test]
fn collider_set_counts_redundant_calls() {
    let mut world = ColliderSet::new();
    let h = ColliderHandle::next();
    let body = ColliderBody {
        shape: Arc::new(RwLock::new(TriangleMeshShape::default())),
        origin: Vec3::ZERO,
    };
    world.add_collider(h, body.clone());
    world.add_collider(h, body);
    world.remove_collider(h);
    world.remove_collider(h);
    assert_eq!(world.adds(), 1);
    assert_eq!(world.removes(), 1);
    assert_eq!(world.redundant_calls(), 2);
}

#[test]
fn handles_are_unique() {
    let a = CollisionRecord::new();
    let b = CollisionRecord::new();
    assert_ne!(a.handle(), b.handle());
}
