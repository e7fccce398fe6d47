//! Status events emitted on state transitions.
//!
//! The status-feedback collaborator is a pure sink for short strings, so
//! each event carries a `Display` form.

use std::fmt;

use crate::core::BlockPos;

/// One status event from a controller tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MiningEvent {
    /// A session began with this many planned cells.
    Started {
        /// Plan length.
        blocks: usize,
    },
    /// Plan, backlog, and scaffold are all exhausted.
    Completed,
    /// An unreachable position was abandoned; the cursor advanced past it.
    TargetSkipped {
        /// The abandoned position.
        pos: BlockPos,
    },
    /// The pillar-up behavior began.
    PillaringStarted,
    /// A pillar block was placed.
    PillarProgress {
        /// Blocks placed so far.
        height: u32,
        /// Height budget.
        max: u32,
    },
    /// The bridge-across behavior began.
    BridgingStarted,
    /// Scaffold cleanup began.
    CleanupStarted,
    /// Scaffold cells were removed or observed gone.
    ScaffoldRemoved {
        /// Placed cells still tracked.
        remaining: usize,
    },
    /// Scaffolding was needed but no placeable material was found.
    NoScaffoldMaterial,
}

impl fmt::Display for MiningEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MiningEvent::Started { blocks } => write!(f, "Mining started: {} blocks", blocks),
            MiningEvent::Completed => write!(f, "Mining complete"),
            MiningEvent::TargetSkipped { .. } => write!(f, "Can't reach block, skipping"),
            MiningEvent::PillaringStarted => write!(f, "Pillaring up"),
            MiningEvent::PillarProgress { height, max } => {
                write!(f, "Pillaring: {}/{}", height, max)
            }
            MiningEvent::BridgingStarted => write!(f, "Bridging across"),
            MiningEvent::CleanupStarted => write!(f, "Cleaning scaffold"),
            MiningEvent::ScaffoldRemoved { remaining } => {
                write!(f, "Scaffold cleaned: {} remaining", remaining)
            }
            MiningEvent::NoScaffoldMaterial => write!(f, "No blocks to build with"),
        }
    }
}
