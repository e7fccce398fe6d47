//! # Khanak
//!
//! Autonomous excavation controller for tick-driven voxel worlds.
//!
//! Khanak turns a pair of corner coordinates into a boustrophedon mining
//! plan and drives an agent through it one tick at a time: walking into
//! range, stepping the aim onto each cell, applying break progress, and
//! building temporary scaffold (pillars and bridges) when walking cannot
//! reach a target. Scaffold the controller places is tracked and mined
//! back at the end of the session.
//!
//! The crate owns no host resources. The host supplies a read-only
//! [`VoxelWorld`](core::VoxelWorld) view and a fresh
//! [`AgentSnapshot`](core::AgentSnapshot) each tick;
//! [`MiningController::tick`](mining::MiningController::tick) returns a
//! [`Command`](core::Command) batch for the host to apply and any status
//! events raised on state transitions.
//!
//! ## Example
//!
//! ```no_run
//! use khanak::config::MinerConfig;
//! use khanak::core::{AgentSnapshot, BlockPos, Cell};
//! use khanak::mining::MiningController;
//!
//! struct FlatWorld;
//! impl khanak::core::VoxelWorld for FlatWorld {
//!     fn cell(&self, _pos: BlockPos) -> Option<Cell> {
//!         None
//!     }
//! }
//!
//! let mut miner = MiningController::new(MinerConfig::default());
//! miner.start(BlockPos::new(0, 70, 0), BlockPos::new(15, 60, 15));
//!
//! let world = FlatWorld;
//! let agent = AgentSnapshot::default();
//! while miner.is_mining() {
//!     let out = miner.tick(&world, &agent);
//!     for command in &out.commands {
//!         // apply to the host here
//!         let _ = command;
//!     }
//! }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod core;
pub mod error;
pub mod mining;
pub mod util;

pub use config::MinerConfig;
pub use error::{KhanakError, Result};
pub use mining::{MiningController, MiningEvent, MiningState, TickOutput};
