//! Top-level excavation state machine.
//!
//! The controller owns no host resources. Each tick it reads fresh world
//! and agent snapshots, advances one state, and returns a command batch
//! plus any status events. The host applies the batch after the tick, so
//! effects become visible on the next snapshot.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::MinerConfig;
use crate::core::{AgentSnapshot, BlockPos, Command, Face, Vec3, VoxelWorld};

use super::breaking::{nearest_face, select_best_tool};
use super::event::MiningEvent;
use super::navigation::{find_closest_reachable, forward_point, gap_ahead, should_jump, StuckTracker};
use super::plan::{generate_plan, Perimeter};
use super::rotation::{snap_aim, RotationController};
use super::scaffold::{find_scaffold_slot, place_against, ScaffoldSlot, ScaffoldTracker};

/// Controller state, one per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiningState {
    /// No target; picks the next plan entry.
    Idle,
    /// Walking toward the current target.
    Moving,
    /// Stepping the aim onto the locked target.
    Rotating,
    /// Applying break progress to the locked target.
    Breaking,
    /// Short randomized pause after a break.
    Waiting,
    /// Placing blocks underfoot to gain height.
    Pillaring,
    /// Sneak-placing blocks across a gap.
    Bridging,
    /// Mining back controller-placed scaffold.
    CleanupScaffold,
}

impl MiningState {
    /// Short lowercase name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            MiningState::Idle => "idle",
            MiningState::Moving => "moving",
            MiningState::Rotating => "rotating",
            MiningState::Breaking => "breaking",
            MiningState::Waiting => "waiting",
            MiningState::Pillaring => "pillaring",
            MiningState::Bridging => "bridging",
            MiningState::CleanupScaffold => "cleanup",
        }
    }
}

/// Result of one controller tick.
#[derive(Debug, Clone, Default)]
pub struct TickOutput {
    /// State after the tick, or `None` when no session is active.
    pub state: Option<MiningState>,
    /// Commands for the host to apply, in order.
    pub commands: Vec<Command>,
    /// Status events raised this tick.
    pub events: Vec<MiningEvent>,
}

impl TickOutput {
    fn new() -> Self {
        Self::default()
    }
}

/// Tick-driven excavation controller for a box spanned by two corners.
pub struct MiningController {
    config: MinerConfig,
    state: MiningState,
    active: bool,
    plan: Vec<BlockPos>,
    deferred: Vec<BlockPos>,
    mining_deferred: bool,
    cursor: usize,
    queue_target: Option<BlockPos>,
    current_target: Option<BlockPos>,
    target_locked: bool,
    perimeter: Option<Perimeter>,
    extended_reach: bool,
    rotation: RotationController,
    stuck: StuckTracker,
    scaffold: ScaffoldTracker,
    wait_ticks: u32,
    rng: SmallRng,
    started_pending: bool,
    cleanup_announced: bool,
    no_material_announced: bool,
}

impl MiningController {
    /// Create a controller with an entropy-seeded RNG.
    pub fn new(config: MinerConfig) -> Self {
        Self::with_seed(config, 0)
    }

    /// Create a controller with a fixed RNG seed. Seed 0 draws from
    /// entropy instead, so a zeroed config stays non-deterministic.
    pub fn with_seed(config: MinerConfig, seed: u64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(seed)
        };
        Self {
            config,
            state: MiningState::Idle,
            active: false,
            plan: Vec::new(),
            deferred: Vec::new(),
            mining_deferred: false,
            cursor: 0,
            queue_target: None,
            current_target: None,
            target_locked: false,
            perimeter: None,
            extended_reach: false,
            rotation: RotationController::new(),
            stuck: StuckTracker::new(),
            scaffold: ScaffoldTracker::new(),
            wait_ticks: 0,
            rng,
            started_pending: false,
            cleanup_announced: false,
            no_material_announced: false,
        }
    }

    /// Start a session over the box spanned by two corners. Any session in
    /// progress is discarded. Returns the plan length.
    pub fn start(&mut self, pos1: BlockPos, pos2: BlockPos) -> usize {
        self.reset();
        self.plan = generate_plan(pos1, pos2);
        self.perimeter = Some(Perimeter::new(pos1, pos2));
        self.active = true;
        self.started_pending = true;
        info!(blocks = self.plan.len(), "mining session started");
        self.plan.len()
    }

    /// Abort the session and drop all per-session state, including the
    /// placed-scaffold set.
    pub fn stop(&mut self) {
        if self.active {
            info!(
                remaining = self.remaining_blocks(),
                "mining session stopped"
            );
        }
        self.reset();
    }

    /// Whether a session is in progress.
    pub fn is_mining(&self) -> bool {
        self.active
    }

    /// Plan entries not yet visited, backlog included.
    pub fn remaining_blocks(&self) -> usize {
        self.plan.len().saturating_sub(self.cursor) + self.deferred.len()
    }

    /// Current state.
    pub fn state(&self) -> MiningState {
        self.state
    }

    /// Enable or disable the extended interaction range.
    pub fn set_extended_reach(&mut self, enabled: bool) {
        self.extended_reach = enabled;
    }

    /// Interaction range in effect. Single authority for every range
    /// check the controller makes.
    pub fn reach_distance(&self) -> f64 {
        if self.extended_reach {
            self.config.extended_reach_distance
        } else {
            self.config.reach_distance
        }
    }

    /// Number of scaffold cells currently tracked as controller-placed.
    pub fn placed_scaffold(&self) -> usize {
        self.scaffold.len()
    }

    /// Advance the controller one tick.
    pub fn tick<W: VoxelWorld>(&mut self, world: &W, agent: &AgentSnapshot) -> TickOutput {
        let mut out = TickOutput::new();
        if !self.active {
            return out;
        }

        if self.started_pending {
            self.started_pending = false;
            out.events.push(MiningEvent::Started {
                blocks: self.plan.len(),
            });
        }

        self.scaffold.tick_cooldowns();
        debug!(
            state = self.state.as_str(),
            cursor = self.cursor,
            locked = self.target_locked,
            "tick"
        );

        match self.state {
            MiningState::Idle => self.find_next_target(world, &mut out),
            MiningState::Moving => self.handle_moving(world, agent, &mut out),
            MiningState::Rotating => self.handle_rotating(world, agent, &mut out),
            MiningState::Breaking => self.handle_breaking(world, agent, &mut out),
            MiningState::Waiting => self.handle_waiting(world, agent, &mut out),
            MiningState::Pillaring => self.handle_pillaring(world, agent, &mut out),
            MiningState::Bridging => self.handle_bridging(world, agent, &mut out),
            MiningState::CleanupScaffold => self.handle_cleanup(world, agent, &mut out),
        }

        out.state = Some(self.state);
        out
    }

    fn reset(&mut self) {
        self.state = MiningState::Idle;
        self.active = false;
        self.plan.clear();
        self.deferred.clear();
        self.mining_deferred = false;
        self.cursor = 0;
        self.queue_target = None;
        self.current_target = None;
        self.target_locked = false;
        self.perimeter = None;
        self.rotation.begin();
        self.stuck.reset();
        self.scaffold.clear();
        self.wait_ticks = 0;
        self.started_pending = false;
        self.cleanup_announced = false;
        self.no_material_announced = false;
    }

    /// Walk the plan cursor to the next cell worth mining. Cells occupied
    /// by our own scaffold are deferred to a backlog until the main plan
    /// is done; once promoted, the backlog is mined like any other plan.
    fn find_next_target<W: VoxelWorld>(&mut self, world: &W, out: &mut TickOutput) {
        loop {
            while self.cursor < self.plan.len() {
                let pos = self.plan[self.cursor];
                if !self.mining_deferred && self.scaffold.contains(pos) {
                    debug!(?pos, "deferring scaffold cell");
                    self.deferred.push(pos);
                    self.cursor += 1;
                    continue;
                }
                if !world.is_breakable(pos) {
                    self.cursor += 1;
                    continue;
                }
                self.queue_target = Some(pos);
                self.begin_approach(pos);
                return;
            }
            if self.deferred.is_empty() {
                break;
            }
            self.plan = std::mem::take(&mut self.deferred);
            self.cursor = 0;
            self.mining_deferred = true;
            info!(blocks = self.plan.len(), "mining deferred scaffold cells");
        }

        if !self.scaffold.is_empty() {
            self.enter_cleanup(out);
        } else {
            self.complete(out);
        }
    }

    fn begin_approach(&mut self, pos: BlockPos) {
        debug!(?pos, "approaching target");
        self.current_target = Some(pos);
        self.target_locked = false;
        self.no_material_announced = false;
        self.stuck.reset();
        self.state = MiningState::Moving;
    }

    /// Missing scaffold material is reported once per target approach;
    /// the walking fallback would otherwise repeat it every tick.
    fn note_no_material(&mut self, out: &mut TickOutput) {
        if !self.no_material_announced {
            self.no_material_announced = true;
            warn!("no scaffold material available");
            out.events.push(MiningEvent::NoScaffoldMaterial);
        }
    }

    fn handle_moving<W: VoxelWorld>(
        &mut self,
        world: &W,
        agent: &AgentSnapshot,
        out: &mut TickOutput,
    ) {
        let Some(target) = self.current_target else {
            self.state = MiningState::Idle;
            return;
        };
        if !world.is_breakable(target) {
            // Broken or collapsed out from under us while walking.
            self.finish_target(target);
            self.state = MiningState::Idle;
            return;
        }

        let reach = self.reach_distance();
        let perimeter = self.perimeter.unwrap_or_else(|| Perimeter::new(target, target));
        if let Some(closest) =
            find_closest_reachable(world, agent, self.queue_target, &perimeter, reach)
        {
            self.current_target = Some(closest);
            self.target_locked = true;
            self.rotation.begin();
            self.state = MiningState::Rotating;
            out.commands.push(Command::SetSprinting(false));
            return;
        }

        let center = target.center();
        let vertical = center.y - agent.eye_position().y;
        let horizontal = agent.position.horizontal_distance(&center);

        // Well above us and nearly underneath: walking will never close
        // the gap, go straight up.
        if vertical > 2.0 && horizontal < 2.0 && self.start_pillaring(vertical, agent, out) {
            return;
        }

        let yaw = crate::util::bearing(center.x - agent.position.x, center.z - agent.position.z);
        out.commands.push(Command::SetYaw(yaw));
        if agent.pitch.abs() > 30.0 {
            // Relax an extreme pitch left over from breaking so the
            // forward scan looks roughly where we walk.
            out.commands.push(Command::SetPitch(agent.pitch * 0.9));
        }
        out.commands.push(Command::SetSprinting(true));

        let jump =
            agent.on_ground && should_jump(world, agent, yaw, Some(target), self.stuck.ticks() > 2);
        out.commands
            .push(Command::SetVelocity(self.walk_velocity(agent, yaw, self.config.sprint_speed, jump)));

        let stuck_ticks = self.stuck.update(agent.position, self.config.stuck_epsilon);
        if stuck_ticks >= self.config.stuck_threshold * 4 {
            warn!(?target, "target unreachable, skipping");
            out.events.push(MiningEvent::TargetSkipped { pos: target });
            self.skip_current_target();
        } else if stuck_ticks >= self.config.stuck_threshold {
            self.try_escalate(world, agent, target, vertical, horizontal, out);
        }
    }

    /// Stuck for a full threshold: pillar when the target is high and
    /// nearly underneath, otherwise bridge over a gap in the path. A
    /// far-horizontal target never pillars; stacking in place would only
    /// leave debris where walking (or the skip) belongs.
    fn try_escalate<W: VoxelWorld>(
        &mut self,
        world: &W,
        agent: &AgentSnapshot,
        target: BlockPos,
        vertical: f64,
        horizontal: f64,
        out: &mut TickOutput,
    ) {
        if vertical > 2.0 && horizontal < 2.0 && !self.scaffold.has_nearby_scaffold(target) {
            self.start_pillaring(vertical, agent, out);
        } else if gap_ahead(world, agent, agent.yaw) && horizontal > 1.5 {
            self.start_bridging(agent, out);
        }
    }

    fn start_pillaring(
        &mut self,
        vertical_gap: f64,
        agent: &AgentSnapshot,
        out: &mut TickOutput,
    ) -> bool {
        if find_scaffold_slot(&agent.inventory, &self.config.scaffold_materials).is_none() {
            self.note_no_material(out);
            return false;
        }
        self.scaffold
            .begin_pillar(vertical_gap, self.config.max_pillar_height);
        self.stuck.reset();
        self.state = MiningState::Pillaring;
        info!(
            max = self.scaffold.max_pillar_height(),
            "pillaring toward target"
        );
        out.events.push(MiningEvent::PillaringStarted);
        true
    }

    fn start_bridging(&mut self, agent: &AgentSnapshot, out: &mut TickOutput) -> bool {
        if find_scaffold_slot(&agent.inventory, &self.config.scaffold_materials).is_none() {
            self.note_no_material(out);
            return false;
        }
        self.stuck.reset();
        self.state = MiningState::Bridging;
        info!("bridging toward target");
        out.events.push(MiningEvent::BridgingStarted);
        true
    }

    fn handle_rotating<W: VoxelWorld>(
        &mut self,
        world: &W,
        agent: &AgentSnapshot,
        out: &mut TickOutput,
    ) {
        let Some(target) = self.current_target else {
            self.state = MiningState::Idle;
            return;
        };
        if !world.is_breakable(target) {
            self.finish_target(target);
            self.state = MiningState::Idle;
            return;
        }

        let step = self.rotation.step(
            &self.config,
            agent.eye_position(),
            target,
            agent.yaw,
            agent.pitch,
        );
        out.commands.push(Command::SetYaw(step.yaw));
        out.commands.push(Command::SetPitch(step.pitch));
        if step.settled {
            self.state = MiningState::Breaking;
        }
    }

    fn handle_breaking<W: VoxelWorld>(
        &mut self,
        world: &W,
        agent: &AgentSnapshot,
        out: &mut TickOutput,
    ) {
        let Some(target) = self.current_target else {
            self.state = MiningState::Idle;
            return;
        };
        let eye = agent.eye_position();

        let Some(cell) = world.cell(target) else {
            // Cell emptied: the break landed (or someone else got it).
            self.scaffold.forget(target);
            self.finish_target(target);
            self.wait_ticks = self.draw_wait_ticks();
            self.state = MiningState::Waiting;
            return;
        };
        if !cell.is_breakable() {
            self.finish_target(target);
            self.state = MiningState::Idle;
            return;
        }
        if eye.distance(&target.center()) > self.reach_distance() {
            // Drifted out of range mid-break.
            self.target_locked = false;
            self.stuck.reset();
            self.state = MiningState::Moving;
            return;
        }

        if let Some(cmd) = select_best_tool(&agent.inventory, cell.material) {
            out.commands.push(cmd);
        }
        out.commands.push(Command::BreakProgress {
            pos: target,
            face: nearest_face(eye, target),
        });
        out.commands.push(Command::Swing);
    }

    fn handle_waiting<W: VoxelWorld>(
        &mut self,
        world: &W,
        agent: &AgentSnapshot,
        out: &mut TickOutput,
    ) {
        if self.wait_ticks > 0 {
            self.wait_ticks -= 1;
            return;
        }
        // Once the cursor has run the plan out, clean reachable scaffold
        // right away instead of letting debris accumulate.
        if self.cursor >= self.plan.len()
            && !self.scaffold.is_empty()
            && self
                .scaffold
                .closest_in_reach(world, agent.eye_position(), self.reach_distance())
                .is_some()
        {
            self.enter_cleanup(out);
        } else {
            self.state = MiningState::Idle;
        }
    }

    fn handle_pillaring<W: VoxelWorld>(
        &mut self,
        world: &W,
        agent: &AgentSnapshot,
        out: &mut TickOutput,
    ) {
        let Some(target) = self.current_target else {
            self.scaffold.clear_pillar();
            self.state = MiningState::Idle;
            return;
        };
        if !world.is_breakable(target) {
            self.scaffold.clear_pillar();
            self.finish_target(target);
            self.state = MiningState::Idle;
            return;
        }

        let eye = agent.eye_position();
        // Grounded check only: at the jump apex the eye briefly comes into
        // range before the block underneath exists.
        if agent.on_ground && eye.distance(&target.center()) <= self.reach_distance() {
            // High enough: hand the target to the aim controller.
            self.scaffold.clear_pillar();
            self.rotation.begin();
            self.target_locked = true;
            self.state = MiningState::Rotating;
            return;
        }
        if self.scaffold.pillar_exhausted() {
            warn!(?target, "pillar budget exhausted, skipping target");
            out.events.push(MiningEvent::TargetSkipped { pos: target });
            self.skip_current_target();
            return;
        }

        if self.scaffold.swap_cooldown() > 0 {
            // Keep the jump rhythm while the slot change lands.
            if agent.on_ground {
                out.commands.push(Command::Jump);
            }
            return;
        }

        if !agent
            .inventory
            .held()
            .is_some_and(|s| s.is_scaffold_block())
        {
            match find_scaffold_slot(&agent.inventory, &self.config.scaffold_materials) {
                Some(ScaffoldSlot::Hotbar(slot)) => {
                    out.commands.push(Command::SelectSlot(slot));
                    self.scaffold
                        .set_swap_cooldown(self.config.slot_select_cooldown_ticks);
                }
                Some(ScaffoldSlot::Stored(slot)) => {
                    out.commands.push(Command::SwapSlots {
                        slot,
                        hotbar: agent.inventory.selected,
                    });
                    self.scaffold
                        .set_swap_cooldown(self.config.swap_cooldown_ticks);
                }
                None => {
                    // Out of material: the target keeps its turn, walking
                    // (and eventually the stuck skip) takes over.
                    self.note_no_material(out);
                    self.scaffold.clear_pillar();
                    self.stuck.reset();
                    self.state = MiningState::Moving;
                }
            }
            return;
        }

        out.commands.push(Command::SetPitch(90.0));
        if agent.on_ground {
            out.commands.push(Command::Jump);
        }

        // Place under our feet near the jump apex, against the top of the
        // column below.
        let below = agent.block_pos().down();
        if !agent.on_ground
            && agent.velocity.y > -0.8
            && self.scaffold.placement_cooldown() == 0
            && !world.is_solid(below)
            && world.is_solid(below.down())
        {
            out.commands.push(Command::Place {
                pos: below.down(),
                face: Face::Up,
            });
            out.commands.push(Command::Swing);
            self.scaffold
                .note_pillar_placement(below, self.config.placement_cooldown_ticks);
            out.events.push(MiningEvent::PillarProgress {
                height: self.scaffold.pillar_height(),
                max: self.scaffold.max_pillar_height(),
            });
        }
    }

    fn handle_bridging<W: VoxelWorld>(
        &mut self,
        world: &W,
        agent: &AgentSnapshot,
        out: &mut TickOutput,
    ) {
        let Some(target) = self.current_target else {
            out.commands.push(Command::SetSneaking(false));
            self.state = MiningState::Idle;
            return;
        };
        let eye = agent.eye_position();
        let center = target.center();

        // Slightly generous range on the way out: the walking approach
        // can line the block up before it is strictly breakable-at-reach.
        if eye.distance(&center) <= self.reach_distance() + 0.5
            || !world.is_breakable(target)
        {
            out.commands.push(Command::SetSneaking(false));
            self.stuck.reset();
            self.state = MiningState::Moving;
            return;
        }
        // Fell off the bridge line; walking recovery handles the rest.
        if agent.position.y < (target.y as f64) - 5.0 {
            warn!("fell below bridge line, abandoning bridge");
            out.commands.push(Command::SetSneaking(false));
            self.stuck.reset();
            self.state = MiningState::Moving;
            return;
        }

        if self.scaffold.swap_cooldown() > 0 {
            out.commands.push(Command::SetSneaking(true));
            return;
        }
        if !agent
            .inventory
            .held()
            .is_some_and(|s| s.is_scaffold_block())
        {
            match find_scaffold_slot(&agent.inventory, &self.config.scaffold_materials) {
                Some(ScaffoldSlot::Hotbar(slot)) => {
                    out.commands.push(Command::SelectSlot(slot));
                    self.scaffold
                        .set_swap_cooldown(self.config.slot_select_cooldown_ticks);
                }
                Some(ScaffoldSlot::Stored(slot)) => {
                    out.commands.push(Command::SwapSlots {
                        slot,
                        hotbar: agent.inventory.selected,
                    });
                    self.scaffold
                        .set_swap_cooldown(self.config.swap_cooldown_ticks);
                }
                None => {
                    self.note_no_material(out);
                    out.commands.push(Command::SetSneaking(false));
                    self.stuck.reset();
                    self.state = MiningState::Moving;
                }
            }
            return;
        }

        let yaw =
            crate::util::bearing(center.x - agent.position.x, center.z - agent.position.z);
        out.commands.push(Command::SetYaw(yaw));
        out.commands.push(Command::SetPitch(75.0));
        out.commands.push(Command::SetSneaking(true));
        out.commands.push(Command::SetVelocity(self.walk_velocity(
            agent,
            yaw,
            self.config.bridge_speed,
            false,
        )));

        let place_pos = BlockPos::containing(forward_point(agent.position, yaw, 1.0)).down();
        if self.scaffold.placement_cooldown() == 0 && !world.is_solid(place_pos) {
            if let Some((against, face)) = place_against(world, place_pos) {
                out.commands.push(Command::Place { pos: against, face });
                out.commands.push(Command::Swing);
                self.scaffold
                    .note_bridge_placement(place_pos, self.config.bridge_placement_cooldown_ticks);
            }
        }
    }

    fn handle_cleanup<W: VoxelWorld>(
        &mut self,
        world: &W,
        agent: &AgentSnapshot,
        out: &mut TickOutput,
    ) {
        let removed = self.scaffold.prune_missing(world);
        if removed > 0 {
            out.events.push(MiningEvent::ScaffoldRemoved {
                remaining: self.scaffold.len(),
            });
        }
        if self.scaffold.is_empty() {
            self.complete(out);
            return;
        }

        let eye = agent.eye_position();
        let Some(pos) = self.scaffold.closest_in_reach(world, eye, self.reach_distance()) else {
            // Nothing reachable right now. Idle re-enters cleanup next
            // tick, so the session stays active until reach improves or
            // the operator stops it.
            self.state = MiningState::Idle;
            return;
        };

        if let Some(cell) = world.cell(pos) {
            if let Some(cmd) = select_best_tool(&agent.inventory, cell.material) {
                out.commands.push(cmd);
            }
        }
        let (yaw, pitch) = snap_aim(eye, pos, agent.yaw);
        out.commands.push(Command::SetYaw(yaw));
        out.commands.push(Command::SetPitch(pitch));
        out.commands.push(Command::BreakProgress {
            pos,
            face: nearest_face(eye, pos),
        });
        out.commands.push(Command::Swing);
    }

    fn enter_cleanup(&mut self, out: &mut TickOutput) {
        self.state = MiningState::CleanupScaffold;
        if !self.cleanup_announced {
            self.cleanup_announced = true;
            info!(cells = self.scaffold.len(), "cleaning up scaffold");
            out.events.push(MiningEvent::CleanupStarted);
        }
    }

    /// Mark `pos` done. The cursor only advances when the finished cell is
    /// the plan entry itself; an opportunistic obstruction leaves the
    /// queue target pending.
    fn finish_target(&mut self, pos: BlockPos) {
        if self.queue_target == Some(pos) {
            self.queue_target = None;
            self.cursor += 1;
        }
        self.current_target = None;
        self.target_locked = false;
    }

    fn skip_current_target(&mut self) {
        self.cursor += 1;
        self.queue_target = None;
        self.current_target = None;
        self.target_locked = false;
        self.scaffold.clear_pillar();
        self.stuck.reset();
        self.state = MiningState::Idle;
    }

    fn complete(&mut self, out: &mut TickOutput) {
        info!("mining session complete");
        out.events.push(MiningEvent::Completed);
        self.reset();
    }

    fn draw_wait_ticks(&mut self) -> u32 {
        let min = self.config.wait_ticks_min.min(self.config.wait_ticks_max);
        self.rng.gen_range(min..=self.config.wait_ticks_max)
    }

    fn walk_velocity(&self, agent: &AgentSnapshot, yaw: f32, speed: f64, jump: bool) -> Vec3 {
        let yaw_rad = (yaw as f64).to_radians();
        let y = if jump {
            self.config.jump_impulse
        } else {
            agent.velocity.y
        };
        Vec3::new(-yaw_rad.sin() * speed, y, yaw_rad.cos() * speed)
    }
}
