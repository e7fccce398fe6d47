//! Core types shared by the controller and its host contract.
//!
//! ## Type Categories
//!
//! ### Coordinates
//! - [`BlockPos`]: Integer cell coordinates
//! - [`Vec3`]: Continuous positions and velocities
//! - [`Face`]: Axis-aligned cell faces for break/place commands
//!
//! ### World contract
//! - [`Material`]: Host-assigned material identity
//! - [`Cell`]: Solid-cell contents with break resistance
//! - [`VoxelWorld`]: Read-only grid query trait
//!
//! ### Agent contract
//! - [`AgentSnapshot`]: Per-tick host-owned agent state
//! - [`Inventory`], [`ItemStack`], [`ItemKind`]: Slot contents
//! - [`Command`]: Controller-to-host command batch entries

mod agent;
mod pos;
mod world;

pub use agent::{AgentSnapshot, Command, Inventory, ItemKind, ItemStack};
pub use pos::{BlockPos, Face, Vec3};
pub use world::{Cell, Material, VoxelWorld};
