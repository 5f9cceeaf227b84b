//! The one mutable aggregate.
//!
//! Every stateful field of the powerplant lives here and is passed by
//! mutable reference through the component functions; there are no
//! module-level globals. Each component receives only the sub-state it
//! owns plus read-only inputs.

use fp_aux::AuxState;
use fp_boiler::{BoilerState, FireboxState, FiremanState};
use fp_boiler::tender::TenderState;
use fp_core::Real;
use fp_cylinder::CylinderState;
use fp_motion::MotionState;

/// All powerplant state, one tick to the next.
#[derive(Clone, Debug)]
pub struct LocomotiveSimState {
    pub boiler: BoilerState,
    pub fire: FireboxState,
    pub tender: TenderState,
    pub cylinders: CylinderState,
    pub motion: MotionState,
    pub aux: AuxState,
    pub fireman: FiremanState,
    /// Heat leaving the boiler last tick, BTU/s; the automatic fireman's
    /// demand signal for this tick.
    pub heat_out_btu_per_s: Real,
    /// Monotonic simulation clock, s.
    pub elapsed_s: Real,
}
