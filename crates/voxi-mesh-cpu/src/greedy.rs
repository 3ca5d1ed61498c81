//! Greedy quad merging over per-slice visibility masks.
//!
//! Each of the six face directions sweeps a plane through every boundary
//! along its axis, builds a `CHUNK_SIZE x CHUNK_SIZE` mask of visible faces,
//! then covers the mask with maximal rectangles of identical entries. Output
//! order depends only on block contents.

use voxi_blocks::{Block, BlockPalette};
use voxi_chunk::{BlockStore, CHUNK_AREA, CHUNK_SIZE};
use voxi_geom::Vec3;

use crate::ao::face_ao;
use crate::constants::AO_LIT;
use crate::face::Face;
use crate::mesh::ChunkMesh;

const EDGE: i32 = CHUNK_SIZE as i32;

/// Visible face record for one texel of the current slice.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MaskEntry {
    pub block: Block,
    /// `[top_left, bottom_left, bottom_right, top_right]`, each in `[0, 3]`.
    pub ao: [u8; 4],
}

impl MaskEntry {
    pub const EMPTY: MaskEntry = MaskEntry {
        block: Block::None,
        ao: [AO_LIT; 4],
    };

    #[inline]
    pub fn is_empty(&self) -> bool {
        !self.block.is_solid()
    }

    /// Merged quads interpolate AO across their whole extent, so only
    /// uniformly lit faces may grow past one texel.
    #[inline]
    pub fn has_uniform_ao(&self) -> bool {
        self.ao.iter().all(|&a| a == self.ao[0])
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    pub quads: usize,
    pub vertices: usize,
    pub indices: usize,
}

/// Rebuilds `out` from `blocks`. Faces on the chunk boundary treat the
/// outside as empty.
pub fn greedy_mesh(blocks: &BlockStore, palette: &BlockPalette, out: &mut ChunkMesh) -> MeshStats {
    out.clear();
    let mut mask = [MaskEntry::EMPTY; CHUNK_AREA];
    let mut quads = 0;
    for back_face in [true, false] {
        for d in 0..3 {
            let face = Face::from_sweep(d, back_face);
            quads += sweep(blocks, palette, face, &mut mask, out);
        }
    }
    MeshStats {
        quads,
        vertices: out.vertex_count(),
        indices: out.index_count(),
    }
}

fn sweep(
    blocks: &BlockStore,
    palette: &BlockPalette,
    face: Face,
    mask: &mut [MaskEntry; CHUNK_AREA],
    out: &mut ChunkMesh,
) -> usize {
    let d = face.axis();
    let (u, v) = face.plane_axes();
    let back_face = face.is_back();
    let mut q = [0i32; 3];
    q[d] = 1;

    let mut quads = 0;
    let mut x = [0i32; 3];
    x[d] = -1;
    while x[d] < EDGE {
        let mut n = 0;
        for xv in 0..EDGE {
            x[v] = xv;
            for xu in 0..EDGE {
                x[u] = xu;
                mask[n] = mask_entry(blocks, x, q, u, v, back_face);
                n += 1;
            }
        }
        x[d] += 1;
        quads += merge_slice(mask, x, face, palette, out);
    }
    quads
}

/// Face between the cell at `x` and the cell at `x + q`, seen from the side
/// `back_face` selects.
#[inline]
fn mask_entry(
    blocks: &BlockStore,
    x: [i32; 3],
    q: [i32; 3],
    u: usize,
    v: usize,
    back_face: bool,
) -> MaskEntry {
    let here = blocks.get_or_none(x[0], x[1], x[2]);
    let next = blocks.get_or_none(x[0] + q[0], x[1] + q[1], x[2] + q[2]);
    let (visible, across, layer) = if back_face {
        (next, here, x)
    } else {
        (here, next, [x[0] + q[0], x[1] + q[1], x[2] + q[2]])
    };
    if !visible.is_solid() || across.is_solid() {
        return MaskEntry::EMPTY;
    }
    MaskEntry {
        block: visible,
        ao: face_ao(blocks, layer, u, v),
    }
}

/// Covers the slice at plane position `x[d]` with maximal rectangles and
/// consumes them from the mask.
fn merge_slice(
    mask: &mut [MaskEntry; CHUNK_AREA],
    mut x: [i32; 3],
    face: Face,
    palette: &BlockPalette,
    out: &mut ChunkMesh,
) -> usize {
    let (u, v) = face.plane_axes();
    let mut quads = 0;
    let mut n = 0;
    for j in 0..CHUNK_SIZE {
        let mut i = 0;
        while i < CHUNK_SIZE {
            let seed = mask[n];
            if seed.is_empty() {
                i += 1;
                n += 1;
                continue;
            }

            let mut width = 1;
            let mut height = 1;
            if seed.has_uniform_ao() {
                while i + width < CHUNK_SIZE && mask[n + width] == seed {
                    width += 1;
                }
                'grow: while j + height < CHUNK_SIZE {
                    for k in 0..width {
                        if mask[n + k + height * CHUNK_SIZE] != seed {
                            break 'grow;
                        }
                    }
                    height += 1;
                }
            }

            x[u] = i as i32;
            x[v] = j as i32;
            let origin = Vec3::new(x[0] as f32, x[1] as f32, x[2] as f32);
            let mut du = Vec3::ZERO;
            du[u] = width as f32;
            let mut dv = Vec3::ZERO;
            dv[v] = height as f32;
            let corners = [origin + dv, origin, origin + du, origin + du + dv];
            out.add_quad(
                corners,
                seed.ao,
                face.normal(),
                palette.color(seed.block),
                face.is_back(),
            );
            quads += 1;

            for l in 0..height {
                let row = n + l * CHUNK_SIZE;
                mask[row..row + width].fill(MaskEntry::EMPTY);
            }
            i += width;
            n += width;
        }
    }
    quads
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_chunk_has_no_geometry() {
        let mut mesh = ChunkMesh::default();
        let stats = greedy_mesh(&BlockStore::new(), &BlockPalette::default(), &mut mesh);
        assert_eq!(stats, MeshStats::default());
        assert!(mesh.is_empty());
    }

    #[test]
    fn mask_entry_requires_empty_across() {
        let mut blocks = BlockStore::new();
        blocks.set(voxi_chunk::LocalPos::new(0, 0, 0), Block::Stone);
        blocks.set(voxi_chunk::LocalPos::new(1, 0, 0), Block::Dirt);
        // Stone at x=0 facing +x into dirt: hidden.
        let e = mask_entry(&blocks, [0, 0, 0], [1, 0, 0], 1, 2, false);
        assert!(e.is_empty());
        // Dirt at x=1 facing +x into air: visible.
        let e = mask_entry(&blocks, [1, 0, 0], [1, 0, 0], 1, 2, false);
        assert_eq!(e.block, Block::Dirt);
    }
}
