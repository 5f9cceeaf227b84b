//! Linked high- and low-pressure cycles of a compound engine.
//!
//! In compound working the high-pressure cylinder exhausts into a receiver
//! and the low-pressure cylinder admits from it; the receiver pressure is
//! set by matching HP exhaust volume to LP admission volume. With the bypass
//! valve open ("simple" working, used for starting) both cylinders admit
//! boiler steam in parallel and exhaust to the blast pipe. Either way each
//! cylinder produces its own MEP and the work is additive.

use crate::diagram::{self, Diagram, DiagramGeometry};
use fp_core::Real;

/// Receiver throttling: fraction of the matched pressure actually seen at
/// the LP valve.
const RECEIVER_RETENTION: Real = 0.95;

/// Volumes the receiver match needs, as absolute volumes (any consistent
/// unit; only ratios matter).
#[derive(Clone, Copy, Debug)]
pub struct CompoundGeometry {
    pub hp: DiagramGeometry,
    pub lp: DiagramGeometry,
    /// HP swept volume.
    pub hp_volume: Real,
    /// LP swept volume.
    pub lp_volume: Real,
}

/// The two linked diagrams.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompoundDiagram {
    pub hp: Diagram,
    pub lp: Diagram,
    pub receiver_psia: Real,
}

/// Compound working: HP exhaust feeds the LP cylinder through the receiver.
pub fn compute_compound(
    geom: &CompoundGeometry,
    admission_psia: Real,
    cutoff_psia: Real,
    exhaust_back_psia: Real,
    cutoff: Real,
) -> CompoundDiagram {
    // Steam leaving the HP cylinder at release re-expands to fill the LP
    // admission volume; that sets the receiver pressure.
    let hp_release_est = cutoff_psia * (cutoff + geom.hp.clearance_fraction)
        / (1.0 + geom.hp.clearance_fraction);
    let hp_exhaust_volume = (1.0 + geom.hp.clearance_fraction) * geom.hp_volume;
    let lp_admission_volume =
        (cutoff + geom.lp.clearance_fraction) * geom.lp_volume;
    let matched = hp_release_est * hp_exhaust_volume / lp_admission_volume.max(1e-9);
    let receiver_psia = (RECEIVER_RETENTION * matched)
        .clamp(exhaust_back_psia, admission_psia.max(exhaust_back_psia));

    let hp = diagram::compute(&geom.hp, admission_psia, cutoff_psia, receiver_psia, cutoff);
    let lp = diagram::compute(
        &geom.lp,
        receiver_psia,
        receiver_psia,
        exhaust_back_psia,
        cutoff,
    );

    CompoundDiagram {
        hp,
        lp,
        receiver_psia,
    }
}

/// Simple (bypass) working: both cylinders take boiler steam in parallel.
pub fn compute_bypass(
    geom: &CompoundGeometry,
    admission_psia: Real,
    cutoff_psia: Real,
    exhaust_back_psia: Real,
    cutoff: Real,
) -> CompoundDiagram {
    let hp = diagram::compute(&geom.hp, admission_psia, cutoff_psia, exhaust_back_psia, cutoff);
    let lp = diagram::compute(&geom.lp, admission_psia, cutoff_psia, exhaust_back_psia, cutoff);
    CompoundDiagram {
        hp,
        lp,
        receiver_psia: exhaust_back_psia,
    }
}
