//! Reach scanning, obstruction heuristics, and stuck tracking for the
//! walking approach.

use crate::core::{AgentSnapshot, BlockPos, Vec3, VoxelWorld};

use super::plan::Perimeter;

/// Counts ticks without meaningful displacement.
#[derive(Debug, Default)]
pub struct StuckTracker {
    ticks: u32,
    last_position: Option<Vec3>,
}

impl StuckTracker {
    /// Create a fresh tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget accumulated ticks and the reference position.
    pub fn reset(&mut self) {
        self.ticks = 0;
        self.last_position = None;
    }

    /// Ticks the agent has been stationary.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Record this tick's position. Horizontal displacement below
    /// `epsilon` counts as stationary; jumping in place is not progress,
    /// so the vertical axis is ignored.
    pub fn update(&mut self, position: Vec3, epsilon: f64) -> u32 {
        if let Some(last) = self.last_position {
            if position.horizontal_distance(&last) < epsilon {
                self.ticks += 1;
            } else {
                self.ticks = 0;
            }
        }
        self.last_position = Some(position);
        self.ticks
    }
}

/// Point `dist` ahead of `position` along the yaw bearing.
#[inline]
pub fn forward_point(position: Vec3, yaw: f32, dist: f64) -> Vec3 {
    let yaw_rad = (yaw as f64).to_radians();
    Vec3::new(
        position.x - yaw_rad.sin() * dist,
        position.y,
        position.z + yaw_rad.cos() * dist,
    )
}

/// Nearest in-reach breakable cell among the queue target and a short
/// forward cone at foot, eye, and head height, clipped to the perimeter.
///
/// The cone catches cells blocking the walking path that are not yet the
/// formal target; reach is measured from the eyes to the cell center.
pub fn find_closest_reachable<W: VoxelWorld>(
    world: &W,
    agent: &AgentSnapshot,
    queue_target: Option<BlockPos>,
    perimeter: &Perimeter,
    reach: f64,
) -> Option<BlockPos> {
    let eyes = agent.eye_position();
    let mut closest: Option<BlockPos> = None;
    let mut closest_dist = f64::MAX;

    if let Some(target) = queue_target {
        if world.is_breakable(target) {
            let dist = eyes.distance(&target.center());
            if dist <= reach {
                closest = Some(target);
                closest_dist = dist;
            }
        }
    }

    for step in 1..=5 {
        let check_dist = step as f64 * 0.5;
        let front = forward_point(agent.position, agent.yaw, check_dist);
        for y_offset in 0..=2 {
            let pos = BlockPos::new(
                front.x.floor() as i32,
                agent.position.y.floor() as i32 + y_offset,
                front.z.floor() as i32,
            );
            if !perimeter.contains(pos) || !world.is_breakable(pos) {
                continue;
            }
            let dist = eyes.distance(&pos.center());
            if dist <= reach && dist < closest_dist {
                closest = Some(pos);
                closest_dist = dist;
            }
        }
    }

    closest
}

/// Whether the walking approach should jump this tick: an obstruction one
/// step ahead with clearance above it, a target overhead while stuck, or
/// a grounded stuck state.
pub fn should_jump<W: VoxelWorld>(
    world: &W,
    agent: &AgentSnapshot,
    yaw: f32,
    target: Option<BlockPos>,
    stuck: bool,
) -> bool {
    let front = forward_point(agent.position, yaw, 0.8);
    let feet = BlockPos::containing(front);
    let head = feet.up();

    let block_at_feet = world.is_solid(feet);
    let space_above = !world.is_solid(head);
    let space_above_head = !world.is_solid(head.up());

    let target_above = target.is_some_and(|t| t.y as f64 > agent.position.y + 0.5);

    (block_at_feet && space_above && space_above_head)
        || (target_above && stuck)
        || (stuck && agent.on_ground)
}

/// Whether a two-cell-deep gap lies one and a half steps ahead: empty at
/// foot level and empty below it.
pub fn gap_ahead<W: VoxelWorld>(world: &W, agent: &AgentSnapshot, yaw: f32) -> bool {
    let front = forward_point(agent.position, yaw, 1.5);
    let in_front = BlockPos::containing(front);
    !world.is_solid(in_front) && !world.is_solid(in_front.down())
}
