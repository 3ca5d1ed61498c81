/// A single voxel. Compared by type only; carries no per-instance data.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Block {
    #[default]
    None = 0,
    Grass = 1,
    Dirt = 2,
    Stone = 3,
    Sand = 4,
    Water = 5,
    Wood = 6,
    Leaves = 7,
    Snow = 8,
    Brick = 9,
}

impl Block {
    pub const COUNT: usize = 10;

    pub const ALL: [Block; Block::COUNT] = [
        Block::None,
        Block::Grass,
        Block::Dirt,
        Block::Stone,
        Block::Sand,
        Block::Water,
        Block::Wood,
        Block::Leaves,
        Block::Snow,
        Block::Brick,
    ];

    /// Default linear RGB per block, indexed by wire id.
    pub const COLORS: [[f32; 3]; Block::COUNT] = [
        [0.0, 0.0, 0.0],
        [0.36, 0.62, 0.25],
        [0.47, 0.33, 0.21],
        [0.50, 0.50, 0.52],
        [0.86, 0.80, 0.55],
        [0.20, 0.40, 0.80],
        [0.42, 0.30, 0.16],
        [0.20, 0.45, 0.15],
        [0.95, 0.96, 0.98],
        [0.66, 0.27, 0.22],
    ];

    /// Persisted id of this block.
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Decodes a persisted id; `None` (the Rust option) for unknown bytes.
    #[inline]
    pub const fn from_id(id: u8) -> Option<Block> {
        if (id as usize) < Block::COUNT {
            Some(Block::ALL[id as usize])
        } else {
            None
        }
    }

    /// True for every type except the empty sentinel.
    #[inline]
    pub const fn is_solid(self) -> bool {
        !matches!(self, Block::None)
    }

    #[inline]
    pub const fn color(self) -> [f32; 3] {
        Block::COLORS[self as usize]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Block::None => "none",
            Block::Grass => "grass",
            Block::Dirt => "dirt",
            Block::Stone => "stone",
            Block::Sand => "sand",
            Block::Water => "water",
            Block::Wood => "wood",
            Block::Leaves => "leaves",
            Block::Snow => "snow",
            Block::Brick => "brick",
        }
    }

    pub fn from_name(name: &str) -> Option<Block> {
        Block::ALL.iter().copied().find(|b| b.name() == name)
    }
}
