//! Spatial primitives: continuous vectors, integer cell coordinates, faces.

use serde::{Deserialize, Serialize};

/// A continuous position or velocity in world space, in cell units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X coordinate
    pub x: f64,
    /// Y coordinate (vertical)
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Vec3 {
    /// Origin vector.
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a new vector.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared distance to another point (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, other: &Vec3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: &Vec3) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Distance to another point ignoring the vertical axis.
    #[inline]
    pub fn horizontal_distance(&self, other: &Vec3) -> f64 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Integer lattice coordinate identifying one world cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    /// X cell index
    pub x: i32,
    /// Y cell index (vertical)
    pub y: i32,
    /// Z cell index
    pub z: i32,
}

impl BlockPos {
    /// Create a new cell coordinate.
    #[inline]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Cell containing a continuous point.
    #[inline]
    pub fn containing(point: Vec3) -> Self {
        Self {
            x: point.x.floor() as i32,
            y: point.y.floor() as i32,
            z: point.z.floor() as i32,
        }
    }

    /// Center of the cell.
    #[inline]
    pub fn center(&self) -> Vec3 {
        Vec3::new(
            self.x as f64 + 0.5,
            self.y as f64 + 0.5,
            self.z as f64 + 0.5,
        )
    }

    /// Cell directly above.
    #[inline]
    pub fn up(&self) -> Self {
        Self::new(self.x, self.y + 1, self.z)
    }

    /// Cell directly below.
    #[inline]
    pub fn down(&self) -> Self {
        Self::new(self.x, self.y - 1, self.z)
    }

    /// Neighboring cell through the given face.
    #[inline]
    pub fn offset(&self, face: Face) -> Self {
        let (dx, dy, dz) = face.offset();
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

/// One of the six axis-aligned cell faces.
///
/// Horizontal naming follows the host convention: north is -Z, east is +X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    /// -Y
    Down,
    /// +Y
    Up,
    /// -Z
    North,
    /// +Z
    South,
    /// -X
    West,
    /// +X
    East,
}

impl Face {
    /// All six faces, vertical first.
    pub const ALL: [Face; 6] = [
        Face::Down,
        Face::Up,
        Face::North,
        Face::South,
        Face::West,
        Face::East,
    ];

    /// Unit cell offset through this face.
    #[inline]
    pub fn offset(&self) -> (i32, i32, i32) {
        match self {
            Face::Down => (0, -1, 0),
            Face::Up => (0, 1, 0),
            Face::North => (0, 0, -1),
            Face::South => (0, 0, 1),
            Face::West => (-1, 0, 0),
            Face::East => (1, 0, 0),
        }
    }

    /// The opposing face.
    #[inline]
    pub fn opposite(&self) -> Face {
        match self {
            Face::Down => Face::Up,
            Face::Up => Face::Down,
            Face::North => Face::South,
            Face::South => Face::North,
            Face::West => Face::East,
            Face::East => Face::West,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containing_floors_negatives() {
        let pos = BlockPos::containing(Vec3::new(-0.3, 64.9, 2.1));
        assert_eq!(pos, BlockPos::new(-1, 64, 2));
    }

    #[test]
    fn test_center() {
        let c = BlockPos::new(1, 2, -3).center();
        assert_eq!(c, Vec3::new(1.5, 2.5, -2.5));
    }

    #[test]
    fn test_face_offsets_are_inverses() {
        for face in Face::ALL {
            let pos = BlockPos::new(10, 20, 30);
            assert_eq!(pos.offset(face).offset(face.opposite()), pos);
        }
    }
}
