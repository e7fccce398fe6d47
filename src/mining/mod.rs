//! Excavation pipeline: plan generation, target selection, navigation,
//! aim control, breaking, and the scaffold subsystem, driven by the
//! [`MiningController`] state machine.

mod breaking;
mod controller;
mod event;
mod navigation;
mod plan;
mod rotation;
mod scaffold;

pub use breaking::{nearest_face, select_best_tool};
pub use controller::{MiningController, MiningState, TickOutput};
pub use event::MiningEvent;
pub use navigation::{find_closest_reachable, forward_point, gap_ahead, should_jump, StuckTracker};
pub use plan::{generate_plan, Perimeter};
pub use rotation::{snap_aim, RotationController, RotationStep};
pub use scaffold::{find_scaffold_slot, place_against, ScaffoldSlot, ScaffoldTracker};
