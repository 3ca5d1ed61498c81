use voxi_mesh_cpu::{ChunkMesh, MeshStats};
use voxi_physics::{ColliderSet, CollisionTransition};
use voxi_runtime::{ChunkPools, MeshRenderer, RenderMode};

/// Renderer that tallies what it would have submitted.
#[derive(Debug, Default)]
pub struct StatsRenderer {
    pub draw_calls: usize,
    pub triangles: usize,
    pub vertex_bytes: usize,
    pub index_bytes: usize,
    pub last_mode: Option<RenderMode>,
}

impl MeshRenderer for StatsRenderer {
    fn draw(&mut self, mesh: &ChunkMesh, mode: RenderMode) {
        self.draw_calls += 1;
        self.triangles += mesh.index_count() / 3;
        self.vertex_bytes += mesh.vertex_bytes().len();
        self.index_bytes += mesh.index_bytes().len();
        self.last_mode = Some(mode);
    }
}

pub fn print_mesh(stats: &MeshStats, transition: CollisionTransition, renderer: &StatsRenderer) {
    println!(
        "Mesh: {} quads, {} vertices, {} indices",
        stats.quads, stats.vertices, stats.indices
    );
    println!(
        "Draw: {} call(s), {} triangles, {} vertex bytes, {} index bytes",
        renderer.draw_calls, renderer.triangles, renderer.vertex_bytes, renderer.index_bytes
    );
    println!("Collider: {transition:?}");
}

pub fn print_world(pools: &ChunkPools, physics: &ColliderSet) {
    for s in pools.stats() {
        println!("Pool {s}");
    }
    println!(
        "Colliders: {} active, {} added, {} removed, {} redundant",
        physics.len(),
        physics.adds(),
        physics.removes(),
        physics.redundant_calls()
    );
}
