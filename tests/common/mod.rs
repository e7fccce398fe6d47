//! Shared test harness: a hash-grid world plus a small kinematic agent
//! that applies controller command batches the way a host would.

use std::collections::HashMap;

use khanak::core::{
    AgentSnapshot, BlockPos, Cell, Command, Inventory, ItemKind, ItemStack, Material, Vec3,
    VoxelWorld,
};

const GRAVITY: f64 = 0.08;
const JUMP_IMPULSE: f64 = 0.42;
const FRICTION: f64 = 0.55;

/// Sparse voxel grid with per-cell break progress.
#[derive(Default)]
pub struct SimWorld {
    cells: HashMap<BlockPos, Cell>,
    progress: HashMap<BlockPos, u32>,
}

impl SimWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill one cell. Resistance doubles as the number of break-progress
    /// hits the cell absorbs before it empties.
    pub fn fill(&mut self, pos: BlockPos, material: Material, resistance: f32) {
        self.cells.insert(pos, Cell::new(material, resistance));
    }

    /// Fill a square unbreakable floor slab at height `y`.
    pub fn bedrock_floor(&mut self, y: i32, half_extent: i32) {
        for x in -half_extent..=half_extent {
            for z in -half_extent..=half_extent {
                self.cells
                    .insert(BlockPos::new(x, y, z), Cell::new(Material::BEDROCK, -1.0));
            }
        }
    }

    pub fn count_in_box(&self, min: BlockPos, max: BlockPos) -> usize {
        self.cells
            .keys()
            .filter(|p| {
                p.x >= min.x
                    && p.x <= max.x
                    && p.y >= min.y
                    && p.y <= max.y
                    && p.z >= min.z
                    && p.z <= max.z
            })
            .count()
    }

    fn hits_to_break(cell: &Cell) -> u32 {
        (cell.resistance.ceil() as u32).max(1)
    }
}

impl VoxelWorld for SimWorld {
    fn cell(&self, pos: BlockPos) -> Option<Cell> {
        self.cells.get(&pos).copied()
    }
}

/// World plus agent, stepped together once per controller tick.
pub struct Sim {
    pub world: SimWorld,
    pub agent: AgentSnapshot,
}

impl Sim {
    /// Agent standing at the given feet position with a stack of
    /// cobblestone in the first hotbar slot.
    pub fn new(world: SimWorld, x: f64, y: f64, z: f64) -> Self {
        let cobble = ItemStack {
            kind: ItemKind::Block {
                material: Material::COBBLESTONE,
                solid: true,
                container: false,
            },
            count: 64,
        };
        let agent = AgentSnapshot {
            position: Vec3::new(x, y, z),
            eye_height: 1.62,
            on_ground: true,
            inventory: Inventory::new(vec![Some(cobble), None, None], 3),
            ..Default::default()
        };
        Self { world, agent }
    }

    /// Apply one command batch, then integrate one physics step.
    pub fn apply(&mut self, commands: &[Command]) {
        for command in commands {
            match command {
                Command::SetYaw(yaw) => self.agent.yaw = *yaw,
                Command::SetPitch(pitch) => self.agent.pitch = *pitch,
                Command::SetVelocity(v) => self.agent.velocity = *v,
                Command::SetSprinting(_) | Command::SetSneaking(_) | Command::Swing => {}
                Command::Jump => {
                    if self.agent.on_ground {
                        self.agent.velocity.y = JUMP_IMPULSE;
                        self.agent.on_ground = false;
                    }
                }
                Command::SelectSlot(slot) => self.agent.inventory.selected = *slot,
                Command::SwapSlots { slot, hotbar } => {
                    self.agent.inventory.slots.swap(*slot, *hotbar);
                    self.agent.inventory.selected = *hotbar;
                }
                Command::BreakProgress { pos, .. } => {
                    if let Some(cell) = self.world.cells.get(pos).copied() {
                        if cell.is_breakable() {
                            let hits = self.world.progress.entry(*pos).or_insert(0);
                            *hits += 1;
                            if *hits >= SimWorld::hits_to_break(&cell) {
                                self.world.cells.remove(pos);
                                self.world.progress.remove(pos);
                            }
                        }
                    }
                }
                Command::Place { pos, face } => {
                    let at = pos.offset(*face);
                    let material = self.agent.inventory.held().and_then(|s| s.block_material());
                    if let Some(material) = material {
                        if !self.world.cells.contains_key(&at) {
                            self.world.fill(at, material, 2.0);
                            let selected = self.agent.inventory.selected;
                            if let Some(Some(stack)) =
                                self.agent.inventory.slots.get_mut(selected)
                            {
                                stack.count = stack.count.saturating_sub(1);
                            }
                        }
                    }
                }
            }
        }
        self.step_physics();
    }

    fn step_physics(&mut self) {
        let next_x = self.agent.position.x + self.agent.velocity.x;
        let next_z = self.agent.position.z + self.agent.velocity.z;
        let feet = BlockPos::containing(Vec3::new(next_x, self.agent.position.y + 0.1, next_z));
        let blocked = self.world.is_solid(feet) || self.world.is_solid(feet.up());
        let a = &mut self.agent;
        if !blocked {
            a.position.x = next_x;
            a.position.z = next_z;
        }
        a.position.y += a.velocity.y;

        a.on_ground = false;
        if a.velocity.y <= 0.0 {
            let inside = BlockPos::containing(a.position);
            if self.world.is_solid(inside) {
                // Sank into a cell; pop onto its top.
                a.position.y = f64::from(inside.y) + 1.0;
                a.velocity.y = 0.0;
                a.on_ground = true;
            } else if self.world.is_solid(inside.down())
                && a.position.y - f64::from(inside.y) < 0.01
            {
                a.position.y = f64::from(inside.y);
                a.velocity.y = 0.0;
                a.on_ground = true;
            }
        }
        if !a.on_ground {
            a.velocity.y -= GRAVITY;
        }
        a.velocity.x *= FRICTION;
        a.velocity.z *= FRICTION;
    }
}
