use voxi_geom::Vec3;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosX,
        Face::NegX,
        Face::PosY,
        Face::NegY,
        Face::PosZ,
        Face::NegZ,
    ];

    /// Face emitted while sweeping axis `d`; back faces point toward `-d`.
    #[inline]
    pub fn from_sweep(d: usize, back_face: bool) -> Face {
        match (d, back_face) {
            (0, false) => Face::PosX,
            (0, true) => Face::NegX,
            (1, false) => Face::PosY,
            (1, true) => Face::NegY,
            (2, false) => Face::PosZ,
            _ => Face::NegZ,
        }
    }

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Sweep axis (0 = x, 1 = y, 2 = z).
    #[inline]
    pub fn axis(self) -> usize {
        self.index() / 2
    }

    #[inline]
    pub fn is_back(self) -> bool {
        self.index() % 2 == 1
    }

    /// The two plane axes `(u, v)` with `u x v` pointing along `+axis`.
    #[inline]
    pub fn plane_axes(self) -> (usize, usize) {
        let d = self.axis();
        ((d + 1) % 3, (d + 2) % 3)
    }

    /// Returns the unit-normal vector for this face.
    #[inline]
    pub fn normal(self) -> Vec3 {
        Vec3::axis(self.axis(), self.is_back())
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> [i32; 3] {
        let mut q = [0; 3];
        q[self.axis()] = if self.is_back() { -1 } else { 1 };
        q
    }
}
