//! fp-sim: the assembled powerplant.
//!
//! - `controls`: cab controls and the read-only train snapshot
//! - `state`: the one mutable state aggregate
//! - `powerplant`: the per-tick orchestrator
//! - `events`: component notifications folded into one enum
//! - `snapshot`: flat save/restore
//! - `error`: simulation error types

pub mod controls;
pub mod error;
pub mod events;
pub mod powerplant;
pub mod snapshot;
pub mod state;

pub use controls::{CabControls, TrainSnapshot};
pub use error::{SimError, SimResult};
pub use events::SimEvent;
pub use powerplant::{MAX_DT_S, Powerplant, TickOutput};
pub use snapshot::PowerplantSnapshot;
pub use state::LocomotiveSimState;
