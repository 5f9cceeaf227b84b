//! fp-boiler: tender, firebox, and pressure vessel.
//!
//! The steam-raising half of the powerplant:
//! - `tender`: coal and water inventories with exhaustion latches
//! - `firebox`: combustion, fire-bed dynamics, grate limit
//! - `fireman`: automatic-firing supervisor state machine
//! - `boiler`: the pressure vessel's mass/heat balance, safety valves,
//!   blowdown, fusible plug, and priming
//! - `events`: edge-triggered notifications from all of the above

pub mod boiler;
pub mod error;
pub mod events;
pub mod firebox;
pub mod fireman;
pub mod tender;

pub use boiler::{Boiler, BoilerInputs, BoilerOutcome, BoilerState, PRIMING_DERATE};
pub use error::{BoilerError, BoilerResult};
pub use events::BoilerEvent;
pub use firebox::{Firebox, FireboxInputs, FireboxOutcome, FireboxState};
pub use fireman::{FiremanCommand, FiremanMode, FiremanState};
pub use tender::{Tender, TenderState};
