//! Agent-side contract: the per-tick snapshot the host supplies and the
//! command batch the controller hands back.

use std::collections::HashMap;

use super::pos::{BlockPos, Face, Vec3};
use super::world::Material;

/// What one inventory slot holds.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// A mining tool with per-material speed multipliers. Materials absent
    /// from the table mine at the bare-hand baseline of 1.0.
    Tool {
        /// Speed multiplier per material.
        speeds: HashMap<Material, f32>,
    },
    /// A weapon. Used only by the combat collaborator; never selected here.
    Weapon,
    /// A placeable block.
    Block {
        /// Material placed.
        material: Material,
        /// Whether the placed cell is solid (supports standing).
        solid: bool,
        /// Whether the block carries an interaction container.
        container: bool,
    },
}

/// A stack of items in one inventory slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    /// Item category and data.
    pub kind: ItemKind,
    /// Stack size.
    pub count: u32,
}

impl ItemStack {
    /// Speed multiplier this item gives against `material`.
    pub fn mining_speed(&self, material: Material) -> f32 {
        match &self.kind {
            ItemKind::Tool { speeds } => speeds.get(&material).copied().unwrap_or(1.0),
            _ => 1.0,
        }
    }

    /// Whether this stack can serve as scaffold: a solid, non-container
    /// block with at least one item left.
    pub fn is_scaffold_block(&self) -> bool {
        self.count > 0
            && matches!(
                self.kind,
                ItemKind::Block {
                    solid: true,
                    container: false,
                    ..
                }
            )
    }

    /// Material of a placeable block, if this is one.
    pub fn block_material(&self) -> Option<Material> {
        match self.kind {
            ItemKind::Block { material, .. } => Some(material),
            _ => None,
        }
    }
}

/// Agent inventory: a flat slot array of which the first `hotbar_size`
/// slots are directly selectable. Deeper slots need a cross-slot swap.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    /// Slot contents.
    pub slots: Vec<Option<ItemStack>>,
    /// Number of directly selectable slots at the front of `slots`.
    pub hotbar_size: usize,
    /// Index of the active slot.
    pub selected: usize,
}

impl Inventory {
    /// Create a new inventory.
    pub fn new(slots: Vec<Option<ItemStack>>, hotbar_size: usize) -> Self {
        Self {
            slots,
            hotbar_size,
            selected: 0,
        }
    }

    /// Stack in slot `index`, if any.
    pub fn slot(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    /// Stack in the active slot, if any.
    pub fn held(&self) -> Option<&ItemStack> {
        self.slot(self.selected)
    }
}

/// Host-owned agent state, sampled once per tick.
#[derive(Debug, Clone, Default)]
pub struct AgentSnapshot {
    /// Feet position.
    pub position: Vec3,
    /// Eye offset above the feet.
    pub eye_height: f64,
    /// Horizontal look angle in degrees. 0 faces +Z, clockwise positive.
    pub yaw: f32,
    /// Vertical look angle in degrees. Positive looks down.
    pub pitch: f32,
    /// Current velocity.
    pub velocity: Vec3,
    /// Whether the agent is standing on solid ground.
    pub on_ground: bool,
    /// Inventory contents.
    pub inventory: Inventory,
}

impl AgentSnapshot {
    /// Eye position.
    #[inline]
    pub fn eye_position(&self) -> Vec3 {
        Vec3::new(
            self.position.x,
            self.position.y + self.eye_height,
            self.position.z,
        )
    }

    /// Cell containing the feet.
    #[inline]
    pub fn block_pos(&self) -> BlockPos {
        BlockPos::containing(self.position)
    }
}

/// One command issued back to the host. The host applies the batch after
/// the controller tick; effects become visible on the next snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Set the horizontal look angle (degrees).
    SetYaw(f32),
    /// Set the vertical look angle (degrees).
    SetPitch(f32),
    /// Set the agent velocity.
    SetVelocity(Vec3),
    /// Enable or disable sprinting.
    SetSprinting(bool),
    /// Enable or disable the edge-safe sneaking stance.
    SetSneaking(bool),
    /// Jump if grounded.
    Jump,
    /// Make a hotbar slot the active slot.
    SelectSlot(usize),
    /// Swap a deep inventory slot with a hotbar slot.
    SwapSlots {
        /// Deep slot index.
        slot: usize,
        /// Hotbar slot index swapped against.
        hotbar: usize,
    },
    /// Apply one tick of break progress to a cell face.
    BreakProgress {
        /// Cell being broken.
        pos: BlockPos,
        /// Face being struck.
        face: Face,
    },
    /// Place the held block against a cell face.
    Place {
        /// Cell placed against.
        pos: BlockPos,
        /// Face of that cell being clicked.
        face: Face,
    },
    /// Fire-and-forget arm swing for visual feedback.
    Swing,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pickaxe() -> ItemStack {
        let mut speeds = HashMap::new();
        speeds.insert(Material::STONE, 6.0);
        ItemStack {
            kind: ItemKind::Tool { speeds },
            count: 1,
        }
    }

    #[test]
    fn test_mining_speed_defaults_to_hand() {
        let tool = pickaxe();
        assert_eq!(tool.mining_speed(Material::STONE), 6.0);
        assert_eq!(tool.mining_speed(Material::DIRT), 1.0);
    }

    #[test]
    fn test_scaffold_block_excludes_containers() {
        let chest = ItemStack {
            kind: ItemKind::Block {
                material: Material::PLANKS,
                solid: true,
                container: true,
            },
            count: 4,
        };
        let cobble = ItemStack {
            kind: ItemKind::Block {
                material: Material::COBBLESTONE,
                solid: true,
                container: false,
            },
            count: 4,
        };
        assert!(!chest.is_scaffold_block());
        assert!(cobble.is_scaffold_block());
    }

    #[test]
    fn test_eye_position() {
        let agent = AgentSnapshot {
            position: Vec3::new(0.5, 64.0, 0.5),
            eye_height: 1.62,
            ..Default::default()
        };
        assert_eq!(agent.eye_position(), Vec3::new(0.5, 65.62, 0.5));
    }
}
