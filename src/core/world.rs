//! World-side contract: cell contents and the read-only world query trait.

use serde::{Deserialize, Serialize};

use super::pos::BlockPos;

/// Material identity of a cell or placeable item.
///
/// A newtype over a host-assigned id. Well-known ids are provided so the
/// default scaffold allow-list and tests can name common materials; hosts
/// are free to register anything beyond them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Material(pub u16);

impl Material {
    /// Plain stone.
    pub const STONE: Material = Material(1);
    /// Cobbled stone, the canonical scaffold filler.
    pub const COBBLESTONE: Material = Material(2);
    /// Dirt.
    pub const DIRT: Material = Material(3);
    /// Gravel.
    pub const GRAVEL: Material = Material(4);
    /// Sand.
    pub const SAND: Material = Material(5);
    /// Wooden planks.
    pub const PLANKS: Material = Material(6);
    /// Netherrack.
    pub const NETHERRACK: Material = Material(7);
    /// Sandstone.
    pub const SANDSTONE: Material = Material(8);
    /// Generic ore.
    pub const ORE: Material = Material(9);
    /// Unbreakable floor material.
    pub const BEDROCK: Material = Material(10);
}

/// Contents of one solid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Material identity.
    pub material: Material,
    /// Break resistance. Negative means unbreakable.
    pub resistance: f32,
}

impl Cell {
    /// Create a new cell.
    #[inline]
    pub fn new(material: Material, resistance: f32) -> Self {
        Self {
            material,
            resistance,
        }
    }

    /// Whether the cell can be broken at all.
    #[inline]
    pub fn is_breakable(&self) -> bool {
        self.resistance >= 0.0
    }
}

/// Read-only view of the host's voxel grid.
///
/// The controller issues no writes through this trait; all mutation flows
/// back to the host as [`Command`](crate::core::Command) batches and is
/// re-read fresh on the next tick.
pub trait VoxelWorld {
    /// Cell at `pos`, or `None` if the cell is empty.
    fn cell(&self, pos: BlockPos) -> Option<Cell>;

    /// Whether the cell is solid.
    #[inline]
    fn is_solid(&self, pos: BlockPos) -> bool {
        self.cell(pos).is_some()
    }

    /// Whether the cell is solid and breakable.
    #[inline]
    fn is_breakable(&self, pos: BlockPos) -> bool {
        self.cell(pos).is_some_and(|c| c.is_breakable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_resistance_is_unbreakable() {
        assert!(!Cell::new(Material::BEDROCK, -1.0).is_breakable());
        assert!(Cell::new(Material::STONE, 1.5).is_breakable());
        assert!(Cell::new(Material::DIRT, 0.0).is_breakable());
    }
}
