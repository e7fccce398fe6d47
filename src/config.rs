//! Configuration loading for Khanak

use crate::core::Material;
use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

/// Excavation controller configuration.
///
/// Every field has a serde default so a partial TOML file (or none at all)
/// yields a working controller.
#[derive(Clone, Debug, Deserialize)]
pub struct MinerConfig {
    /// Interaction range in cell units (default: 4.5)
    #[serde(default = "default_reach_distance")]
    pub reach_distance: f64,

    /// Interaction range when extended reach is enabled (default: 15.0)
    #[serde(default = "default_extended_reach_distance")]
    pub extended_reach_distance: f64,

    /// Maximum angular change per tick on either look axis, degrees (default: 25.0)
    #[serde(default = "default_max_rotation_step")]
    pub max_rotation_step: f32,

    /// Pitch magnitude beyond which an approach is steep and yaw freezes (default: 45.0)
    #[serde(default = "default_steep_pitch_threshold")]
    pub steep_pitch_threshold: f32,

    /// Pitch snapped to when the target is nearly straight above/below (default: 85.0)
    #[serde(default = "default_pitch_snap")]
    pub pitch_snap: f32,

    /// Consecutive settled ticks required before breaking starts (default: 1)
    #[serde(default = "default_rotation_settle_ticks")]
    pub rotation_settle_ticks: u32,

    /// Pitch error tolerance for settlement, degrees (default: 3.0)
    #[serde(default = "default_pitch_tolerance")]
    pub pitch_tolerance: f32,

    /// Yaw error tolerance for settlement, degrees (default: 3.0)
    #[serde(default = "default_yaw_tolerance")]
    pub yaw_tolerance: f32,

    /// Stuck ticks before escalating to scaffolding; 4x this abandons the target (default: 10)
    #[serde(default = "default_stuck_threshold")]
    pub stuck_threshold: u32,

    /// Per-tick displacement below which the agent counts as not moving (default: 0.01)
    #[serde(default = "default_stuck_epsilon")]
    pub stuck_epsilon: f64,

    /// Minimum post-break wait, ticks (default: 0)
    #[serde(default = "default_wait_ticks_min")]
    pub wait_ticks_min: u32,

    /// Maximum post-break wait, ticks (default: 1)
    #[serde(default = "default_wait_ticks_max")]
    pub wait_ticks_max: u32,

    /// Hard cap on pillar height, blocks (default: 20)
    #[serde(default = "default_max_pillar_height")]
    pub max_pillar_height: u32,

    /// Ticks between pillar placements (default: 3)
    #[serde(default = "default_placement_cooldown_ticks")]
    pub placement_cooldown_ticks: u32,

    /// Ticks between bridge placements (default: 4)
    #[serde(default = "default_bridge_placement_cooldown_ticks")]
    pub bridge_placement_cooldown_ticks: u32,

    /// Ticks to wait after a cross-slot swap (default: 3)
    #[serde(default = "default_swap_cooldown_ticks")]
    pub swap_cooldown_ticks: u32,

    /// Ticks to wait after changing the active hotbar slot (default: 2)
    #[serde(default = "default_slot_select_cooldown_ticks")]
    pub slot_select_cooldown_ticks: u32,

    /// Forward speed while sprinting (default: 0.2)
    #[serde(default = "default_sprint_speed")]
    pub sprint_speed: f64,

    /// Forward speed while walking (default: 0.13)
    #[serde(default = "default_walk_speed")]
    pub walk_speed: f64,

    /// Forward speed while bridging (default: 0.08)
    #[serde(default = "default_bridge_speed")]
    pub bridge_speed: f64,

    /// Upward velocity applied on a jump (default: 0.42)
    #[serde(default = "default_jump_impulse")]
    pub jump_impulse: f64,

    /// Materials preferred for scaffolding, in no particular order
    #[serde(default = "default_scaffold_materials")]
    pub scaffold_materials: Vec<Material>,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            reach_distance: default_reach_distance(),
            extended_reach_distance: default_extended_reach_distance(),
            max_rotation_step: default_max_rotation_step(),
            steep_pitch_threshold: default_steep_pitch_threshold(),
            pitch_snap: default_pitch_snap(),
            rotation_settle_ticks: default_rotation_settle_ticks(),
            pitch_tolerance: default_pitch_tolerance(),
            yaw_tolerance: default_yaw_tolerance(),
            stuck_threshold: default_stuck_threshold(),
            stuck_epsilon: default_stuck_epsilon(),
            wait_ticks_min: default_wait_ticks_min(),
            wait_ticks_max: default_wait_ticks_max(),
            max_pillar_height: default_max_pillar_height(),
            placement_cooldown_ticks: default_placement_cooldown_ticks(),
            bridge_placement_cooldown_ticks: default_bridge_placement_cooldown_ticks(),
            swap_cooldown_ticks: default_swap_cooldown_ticks(),
            slot_select_cooldown_ticks: default_slot_select_cooldown_ticks(),
            sprint_speed: default_sprint_speed(),
            walk_speed: default_walk_speed(),
            bridge_speed: default_bridge_speed(),
            jump_impulse: default_jump_impulse(),
            scaffold_materials: default_scaffold_materials(),
        }
    }
}

// Default value functions
fn default_reach_distance() -> f64 {
    4.5
}
fn default_extended_reach_distance() -> f64 {
    15.0
}
fn default_max_rotation_step() -> f32 {
    25.0
}
fn default_steep_pitch_threshold() -> f32 {
    45.0
}
fn default_pitch_snap() -> f32 {
    85.0
}
fn default_rotation_settle_ticks() -> u32 {
    1
}
fn default_pitch_tolerance() -> f32 {
    3.0
}
fn default_yaw_tolerance() -> f32 {
    3.0
}
fn default_stuck_threshold() -> u32 {
    10
}
fn default_stuck_epsilon() -> f64 {
    0.01
}
fn default_wait_ticks_min() -> u32 {
    0
}
fn default_wait_ticks_max() -> u32 {
    1
}
fn default_max_pillar_height() -> u32 {
    20
}
fn default_placement_cooldown_ticks() -> u32 {
    3
}
fn default_bridge_placement_cooldown_ticks() -> u32 {
    4
}
fn default_swap_cooldown_ticks() -> u32 {
    3
}
fn default_slot_select_cooldown_ticks() -> u32 {
    2
}
fn default_sprint_speed() -> f64 {
    0.2
}
fn default_walk_speed() -> f64 {
    0.13
}
fn default_bridge_speed() -> f64 {
    0.08
}
fn default_jump_impulse() -> f64 {
    0.42
}
fn default_scaffold_materials() -> Vec<Material> {
    vec![
        Material::COBBLESTONE,
        Material::STONE,
        Material::DIRT,
        Material::NETHERRACK,
        Material::SANDSTONE,
        Material::PLANKS,
    ]
}

impl MinerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: MinerConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
