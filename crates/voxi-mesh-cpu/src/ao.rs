//! Per-vertex ambient occlusion for one block face.
//!
//! The eight blocks around a face are sampled in the layer the face looks
//! into, laid out in plane coordinates as
//!
//! ```text
//!   0 1 2      v
//!   3 C 4      ^
//!   5 6 7      +--> u
//! ```

use voxi_chunk::BlockStore;

use crate::constants::AO_LIT;

/// AO level of one corner from its two edge neighbors and the diagonal.
/// Two occupied edges fully occlude the corner whatever the diagonal holds.
#[inline]
pub fn vertex_ao(side1: bool, side2: bool, corner: bool) -> u8 {
    if side1 && side2 {
        return 0;
    }
    AO_LIT - (side1 as u8 + side2 as u8 + corner as u8)
}

/// AO levels `[top_left, bottom_left, bottom_right, top_right]` for the face
/// whose outward layer cell is `layer`. Out-of-chunk neighbors count as empty.
pub fn face_ao(blocks: &BlockStore, layer: [i32; 3], u: usize, v: usize) -> [u8; 4] {
    let occupied = |du: i32, dv: i32| {
        let mut p = layer;
        p[u] += du;
        p[v] += dv;
        blocks.get_or_none(p[0], p[1], p[2]).is_solid()
    };
    let s = [
        occupied(-1, 1),
        occupied(0, 1),
        occupied(1, 1),
        occupied(-1, 0),
        occupied(1, 0),
        occupied(-1, -1),
        occupied(0, -1),
        occupied(1, -1),
    ];
    [
        vertex_ao(s[3], s[1], s[0]),
        vertex_ao(s[3], s[6], s[5]),
        vertex_ao(s[4], s[6], s[7]),
        vertex_ao(s[1], s[4], s[2]),
    ]
}
