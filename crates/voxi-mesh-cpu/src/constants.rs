//! Shared constants for voxi-mesh-cpu.

/// Brightness per AO level; index 0 is fully occluded, 3 fully lit.
pub const AO_BRIGHTNESS: [f32; 4] = [0.4, 0.65, 0.85, 1.0];

/// AO level of a corner with no occluding neighbors.
pub const AO_LIT: u8 = 3;

/// Indices per quad, relative to its first vertex.
pub(crate) const FRONT_FACE_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];
pub(crate) const BACK_FACE_INDICES: [u32; 6] = [0, 3, 2, 0, 2, 1];
