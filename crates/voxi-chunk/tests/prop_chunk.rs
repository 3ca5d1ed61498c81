use proptest::prelude::*;
use voxi_blocks::Block;
use voxi_chunk::{BlockStore, CHUNK_SIZE, CHUNK_VOLUME, LocalPos};

fn coord() -> impl Strategy<Value = usize> {
    0usize..CHUNK_SIZE
}

fn block() -> impl Strategy<Value = Block> {
    prop::sample::select(Block::ALL.to_vec())
}

#[test]
fn index_is_a_bijection() {
    let mut seen = vec![false; CHUNK_VOLUME];
    for x in 0..CHUNK_SIZE {
        for y in 0..CHUNK_SIZE {
            for z in 0..CHUNK_SIZE {
                let i = BlockStore::index(x, y, z);
                assert!(i < CHUNK_VOLUME);
                assert!(!seen[i]);
                seen[i] = true;
            }
        }
    }
    assert!(seen.into_iter().all(|b| b));
}

#[test]
fn index_layout_is_x_major_z_minor() {
    assert_eq!(BlockStore::index(0, 0, 1), 1);
    assert_eq!(BlockStore::index(0, 1, 0), CHUNK_SIZE);
    assert_eq!(BlockStore::index(1, 0, 0), CHUNK_SIZE * CHUNK_SIZE);
}

#[test]
fn get_or_none_outside_is_none() {
    let mut store = BlockStore::new();
    store.fill(Block::Stone);
    let edge = CHUNK_SIZE as i32;
    for (x, y, z) in [(-1, 0, 0), (0, -1, 0), (0, 0, -1), (edge, 0, 0), (0, edge, 0), (0, 0, edge)] {
        assert_eq!(store.get_or_none(x, y, z), Block::None);
    }
    assert_eq!(store.get_or_none(0, 0, 0), Block::Stone);
    assert_eq!(store.get_or_none(edge - 1, edge - 1, edge - 1), Block::Stone);
}

#[test]
fn iter_positions_match_index() {
    let store = BlockStore::new();
    for (i, (pos, _)) in store.iter().enumerate() {
        assert_eq!(BlockStore::index(pos.x, pos.y, pos.z), i);
    }
}

#[test]
fn local_pos_bounds() {
    assert!(LocalPos::new(15, 15, 15).in_bounds());
    assert!(!LocalPos::new(16, 0, 0).in_bounds());
}

proptest! {
    // set then get returns the same block and touches nothing else
    #[test]
    fn set_get_is_local(x in coord(), y in coord(), z in coord(), b in block()) {
        let mut store = BlockStore::new();
        store.set(LocalPos::new(x, y, z), b);
        prop_assert_eq!(store.get(LocalPos::new(x, y, z)), b);
        let others = store.iter().filter(|(p, _)| *p != LocalPos::new(x, y, z)).all(|(_, v)| v == Block::None);
        prop_assert!(others);
    }

    // row(x, y) is the z run at that (x, y)
    #[test]
    fn row_matches_get(x in coord(), y in coord(), z in coord(), b in block()) {
        let mut store = BlockStore::new();
        store.set(LocalPos::new(x, y, z), b);
        prop_assert_eq!(store.row(x, y)[z], b);
    }
}
