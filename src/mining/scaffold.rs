//! Scaffold bookkeeping: placed-cell set, pillar budget, placement and
//! swap cooldowns, and scaffold material selection.

use std::collections::HashSet;

use crate::core::{BlockPos, Face, Inventory, Material, Vec3, VoxelWorld};

/// Where a usable scaffold stack was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldSlot {
    /// Directly selectable slot.
    Hotbar(usize),
    /// Deep slot that must be swapped into the hotbar first.
    Stored(usize),
}

/// Find a scaffold stack: allow-listed materials in the hotbar first, then
/// any solid non-container hotbar block, then the same two passes over the
/// deep slots.
pub fn find_scaffold_slot(inventory: &Inventory, allow: &[Material]) -> Option<ScaffoldSlot> {
    let hotbar = inventory.hotbar_size.min(inventory.slots.len());

    let preferred = |index: usize| {
        inventory
            .slot(index)
            .filter(|s| s.is_scaffold_block())
            .and_then(|s| s.block_material())
            .is_some_and(|m| allow.contains(&m))
    };
    let any_solid = |index: usize| inventory.slot(index).is_some_and(|s| s.is_scaffold_block());

    if let Some(index) = (0..hotbar).find(|&i| preferred(i)) {
        return Some(ScaffoldSlot::Hotbar(index));
    }
    if let Some(index) = (0..hotbar).find(|&i| any_solid(i)) {
        return Some(ScaffoldSlot::Hotbar(index));
    }
    if let Some(index) = (hotbar..inventory.slots.len()).find(|&i| preferred(i)) {
        return Some(ScaffoldSlot::Stored(index));
    }
    if let Some(index) = (hotbar..inventory.slots.len()).find(|&i| any_solid(i)) {
        return Some(ScaffoldSlot::Stored(index));
    }
    None
}

/// Solid neighbor to place against when filling `pos`, preferring the cell
/// below. Returns the neighbor and the neighbor's face to click.
pub fn place_against<W: VoxelWorld>(world: &W, pos: BlockPos) -> Option<(BlockPos, Face)> {
    let below = pos.down();
    if world.is_solid(below) {
        return Some((below, Face::Up));
    }
    for face in Face::ALL {
        let neighbor = pos.offset(face);
        if world.is_solid(neighbor) {
            return Some((neighbor, face.opposite()));
        }
    }
    None
}

/// Tracks controller-placed scaffold cells and the pillar/placement state.
#[derive(Debug, Default)]
pub struct ScaffoldTracker {
    placed: HashSet<BlockPos>,
    pillar_height: u32,
    max_pillar_height: u32,
    placement_cooldown: u32,
    swap_cooldown: u32,
}

impl ScaffoldTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every placed cell and reset all counters.
    pub fn clear(&mut self) {
        self.placed.clear();
        self.pillar_height = 0;
        self.max_pillar_height = 0;
        self.placement_cooldown = 0;
        self.swap_cooldown = 0;
    }

    /// Tick both cooldowns down by one.
    pub fn tick_cooldowns(&mut self) {
        self.placement_cooldown = self.placement_cooldown.saturating_sub(1);
        self.swap_cooldown = self.swap_cooldown.saturating_sub(1);
    }

    /// Remaining placement cooldown.
    pub fn placement_cooldown(&self) -> u32 {
        self.placement_cooldown
    }

    /// Remaining post-swap cooldown.
    pub fn swap_cooldown(&self) -> u32 {
        self.swap_cooldown
    }

    /// Start a swap/select cooldown.
    pub fn set_swap_cooldown(&mut self, ticks: u32) {
        self.swap_cooldown = ticks;
    }

    /// Whether `pos` is a tracked scaffold cell.
    pub fn contains(&self, pos: BlockPos) -> bool {
        self.placed.contains(&pos)
    }

    /// Whether any scaffold cells remain tracked.
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Number of tracked scaffold cells.
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    /// Stop tracking `pos`; returns whether it was tracked.
    pub fn forget(&mut self, pos: BlockPos) -> bool {
        self.placed.remove(&pos)
    }

    /// Blocks placed in the current pillar.
    pub fn pillar_height(&self) -> u32 {
        self.pillar_height
    }

    /// Height budget of the current pillar.
    pub fn max_pillar_height(&self) -> u32 {
        self.max_pillar_height
    }

    /// Open a pillar budget of `ceil(vertical_gap) + 2` capped at `cap`.
    pub fn begin_pillar(&mut self, vertical_gap: f64, cap: u32) {
        self.max_pillar_height = (vertical_gap.ceil() as u32 + 2).min(cap);
        self.pillar_height = 0;
    }

    /// Close the current pillar budget.
    pub fn clear_pillar(&mut self) {
        self.pillar_height = 0;
        self.max_pillar_height = 0;
    }

    /// Whether the pillar budget is used up.
    pub fn pillar_exhausted(&self) -> bool {
        self.pillar_height >= self.max_pillar_height
    }

    /// Record a pillar placement at `pos` and start the placement cooldown.
    pub fn note_pillar_placement(&mut self, pos: BlockPos, cooldown: u32) {
        self.placed.insert(pos);
        self.pillar_height += 1;
        self.placement_cooldown = cooldown;
    }

    /// Record a bridge placement at `pos` and start the placement cooldown.
    pub fn note_bridge_placement(&mut self, pos: BlockPos, cooldown: u32) {
        self.placed.insert(pos);
        self.placement_cooldown = cooldown;
    }

    /// Whether scaffold already stands near `target` (within 2 vertically
    /// and 3 on each horizontal axis), making another pillar pointless.
    pub fn has_nearby_scaffold(&self, target: BlockPos) -> bool {
        self.placed.iter().any(|p| {
            (p.y - target.y).abs() <= 2
                && (p.x - target.x).abs() <= 3
                && (p.z - target.z).abs() <= 3
        })
    }

    /// Drop entries whose cell no longer exists; returns how many.
    pub fn prune_missing<W: VoxelWorld>(&mut self, world: &W) -> usize {
        let before = self.placed.len();
        self.placed.retain(|&pos| world.is_solid(pos));
        before - self.placed.len()
    }

    /// Closest tracked cell within reach of the eye, if any.
    pub fn closest_in_reach<W: VoxelWorld>(
        &self,
        world: &W,
        eye: Vec3,
        reach: f64,
    ) -> Option<BlockPos> {
        self.placed
            .iter()
            .filter(|&&pos| world.is_solid(pos))
            .map(|&pos| (pos, eye.distance(&pos.center())))
            .filter(|&(_, dist)| dist <= reach)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(pos, _)| pos)
    }
}
