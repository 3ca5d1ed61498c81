use voxi_mesh_cpu::ChunkMesh;

/// Primitive assembly for a draw call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderMode {
    #[default]
    Triangles,
    Lines,
    Points,
}

/// Draw-call sink for active chunk meshes.
pub trait MeshRenderer {
    fn draw(&mut self, mesh: &ChunkMesh, mode: RenderMode);
}
