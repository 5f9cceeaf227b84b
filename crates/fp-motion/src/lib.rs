//! fp-motion: from indicator diagram to drawbar.
//!
//! - `tractive`: the classic tractive-effort formula and the indicated
//!   horsepower cap
//! - `adhesion`: crank-resolved rail force balance and the wheel-slip
//!   state machine
//! - `motion`: the per-tick pass combining both

pub mod adhesion;
pub mod error;
pub mod motion;
pub mod tractive;

pub use adhesion::{AdhesionInputs, AdhesionModel, AdhesionState, AdhesionTick};
pub use error::{MotionError, MotionResult};
pub use motion::{Motion, MotionEvent, MotionInputs, MotionState};
pub use tractive::TractiveModel;
