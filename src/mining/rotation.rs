//! Incremental aim control with a steep-angle yaw freeze.
//!
//! Bearing calculations are ill-conditioned when looking nearly straight
//! up or down; a small eye movement flips the computed yaw by up to 180°.
//! Once an approach is classified steep the yaw is frozen at its value at
//! classification time and only pitch keeps stepping.

use crate::config::MinerConfig;
use crate::core::{BlockPos, Vec3};
use crate::util::{bearing, normalize_yaw};

/// One tick of aim output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationStep {
    /// Yaw to apply this tick (degrees).
    pub yaw: f32,
    /// Pitch to apply this tick (degrees).
    pub pitch: f32,
    /// Whether the aim has settled on the target.
    pub settled: bool,
}

/// Steers yaw/pitch toward a cell center one bounded step per tick.
#[derive(Debug, Default)]
pub struct RotationController {
    settled_ticks: u32,
    frozen_yaw: Option<f32>,
}

impl RotationController {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for a new approach.
    pub fn begin(&mut self) {
        self.settled_ticks = 0;
        self.frozen_yaw = None;
    }

    /// Whether the current approach has been classified steep.
    pub fn is_steep(&self) -> bool {
        self.frozen_yaw.is_some()
    }

    /// Advance the aim one tick toward the target center.
    pub fn step(
        &mut self,
        config: &MinerConfig,
        eye: Vec3,
        target: BlockPos,
        current_yaw: f32,
        current_pitch: f32,
    ) -> RotationStep {
        let center = target.center();
        let dx = center.x - eye.x;
        let dy = center.y - eye.y;
        let dz = center.z - eye.z;
        let horizontal = (dx * dx + dz * dz).sqrt();

        let required_pitch = if horizontal < 0.5 {
            // Nearly straight above/below: the bearing is meaningless, so
            // snap pitch to the configured extreme.
            if dy > 0.0 {
                -config.pitch_snap
            } else {
                config.pitch_snap
            }
        } else {
            let raw = (-dy.atan2(horizontal)).to_degrees() as f32;
            raw.clamp(-config.pitch_snap, config.pitch_snap)
        };

        if required_pitch.abs() > config.steep_pitch_threshold && self.frozen_yaw.is_none() {
            self.frozen_yaw = Some(current_yaw);
        }

        let new_pitch = step_angle(current_pitch, required_pitch, config.max_rotation_step);

        let (new_yaw, yaw_ok) = match self.frozen_yaw {
            Some(frozen) => (frozen, true),
            None => {
                let required_yaw = bearing(dx, dz);
                let diff = normalize_yaw(required_yaw - current_yaw);
                let new_yaw = current_yaw + diff.clamp(-config.max_rotation_step, config.max_rotation_step);
                (
                    new_yaw,
                    normalize_yaw(required_yaw - new_yaw).abs() <= config.yaw_tolerance,
                )
            }
        };

        let pitch_ok = (required_pitch - new_pitch).abs() <= config.pitch_tolerance;
        if pitch_ok && yaw_ok {
            self.settled_ticks += 1;
        } else {
            self.settled_ticks = 0;
        }

        RotationStep {
            yaw: new_yaw,
            pitch: new_pitch,
            settled: self.settled_ticks >= config.rotation_settle_ticks,
        }
    }
}

/// Step `current` toward `target` by at most `max_step` degrees.
#[inline]
fn step_angle(current: f32, target: f32, max_step: f32) -> f32 {
    let diff = target - current;
    current + diff.clamp(-max_step, max_step)
}

/// Direct aim at a cell, for the cleanup fast path.
///
/// Skips incremental stepping but keeps the steep guard: beyond a pitch of
/// 60° the yaw holds `current_yaw` when the horizontal offset is too small
/// for a stable bearing.
pub fn snap_aim(eye: Vec3, target: BlockPos, current_yaw: f32) -> (f32, f32) {
    let center = target.center();
    let dx = center.x - eye.x;
    let dy = center.y - eye.y;
    let dz = center.z - eye.z;
    let horizontal = (dx * dx + dz * dz).sqrt();

    let pitch = if horizontal < 0.001 {
        if dy > 0.0 {
            -89.0
        } else {
            89.0
        }
    } else {
        ((-dy.atan2(horizontal)).to_degrees() as f32).clamp(-89.0, 89.0)
    };

    let yaw = if pitch.abs() > 60.0 && horizontal <= 0.1 {
        current_yaw
    } else {
        bearing(dx, dz)
    };

    (yaw, pitch)
}
