//! fp-cylinder: indicator-diagram model of the cylinders.
//!
//! - `diagram`: the six-point cycle of one double-acting cylinder and its
//!   work integral (MEP)
//! - `compound`: linked HP/LP cycles with a receiver, in compound and
//!   bypass ("simple") working
//! - `group`: the per-tick cylinder-group evaluation of MEP per stage,
//!   cylinder steam consumption, superheat/condensation corrections, and
//!   cylinder-cock venting

pub mod compound;
pub mod diagram;
pub mod error;
pub mod group;

pub use compound::{CompoundDiagram, CompoundGeometry};
pub use diagram::{CyclePoints, Diagram, DiagramGeometry};
pub use error::{CylinderError, CylinderResult};
pub use group::{CylinderGroup, CylinderInputs, CylinderState, CylinderTick};
