//! Single-cylinder indicator diagram.
//!
//! One full cycle of a double-acting cylinder, reduced to pressures at six
//! named points and the work integral between them. All pressures are
//! absolute (PSIA) and all volumes are expressed as fractions of swept
//! volume, with the clearance volume added on.
//!
//! ```text
//!  p │ admission──cutoff
//!    │    │          \ expansion
//!    │ pre-admission   \
//!    │    │   compression──release
//!    │    └──────back-pressure─┘
//!    └────────────────────────── v
//! ```
//!
//! Expansion and compression segments use the logarithmic work of an
//! isothermal process, `W = p₁v₁·ln(v₂/v₁)`, with the volume ratio guarded
//! above unity before the log.

use fp_core::{Real, expansion_ln};

/// Piston travel (fraction of stroke, from the back dead centre) at which
/// the exhaust valve closes and compression begins.
const COMPRESSION_FRACTION: Real = 0.25;
/// Piston travel before the dead centre at which admission re-opens.
const PREADMISSION_FRACTION: Real = 0.05;

/// Pressures at the six cycle points, PSIA.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CyclePoints {
    pub admission_psia: Real,
    pub cutoff_psia: Real,
    pub release_psia: Real,
    pub back_psia: Real,
    pub compression_psia: Real,
    pub preadmission_psia: Real,
}

/// Fixed geometry of one cylinder for diagram purposes.
#[derive(Clone, Copy, Debug)]
pub struct DiagramGeometry {
    /// Clearance volume as a fraction of swept volume.
    pub clearance_fraction: Real,
}

/// One computed cycle: the named pressures plus the mean effective pressure
/// obtained by integrating work around the loop.
#[derive(Clone, Copy, Debug, Default)]
pub struct Diagram {
    pub points: CyclePoints,
    /// Mean effective pressure, PSI, clamped non-negative.
    pub mep_psi: Real,
}

/// Compute the diagram for one cylinder.
///
/// `admission_psia` is the pressure behind the valve at the moment it opens,
/// `cutoff_psia` the (wire-drawn) pressure at valve closure, `back_psia` the
/// exhaust pressure the piston works against, and `cutoff` the admission
/// fraction of the stroke.
pub fn compute(
    geom: &DiagramGeometry,
    admission_psia: Real,
    cutoff_psia: Real,
    back_psia: Real,
    cutoff: Real,
) -> Diagram {
    let c = geom.clearance_fraction.max(0.01);
    let cutoff = cutoff.clamp(PREADMISSION_FRACTION, 0.95);
    let admission_psia = admission_psia.max(0.0);
    let cutoff_psia = cutoff_psia.clamp(0.0, admission_psia);
    let back_psia = back_psia.max(0.0);

    // Volumes (fractions of swept volume, clearance included).
    let v_cutoff = cutoff + c;
    let v_end = 1.0 + c;
    let v_compression = COMPRESSION_FRACTION + c;
    let v_preadmission = PREADMISSION_FRACTION + c;

    let release_psia = cutoff_psia * v_cutoff / v_end;
    let compression_psia =
        (back_psia * v_compression / v_preadmission).min(admission_psia.max(back_psia));

    // Positive loop: admission, then expansion to the end of the stroke.
    let admission_work = 0.5 * (admission_psia + cutoff_psia) * cutoff;
    let expansion_work = cutoff_psia * v_cutoff * expansion_ln(v_end / v_cutoff);

    // Negative loop: exhaust at back pressure until the valve closes,
    // compression of the trapped steam, and the pre-admission corner.
    let exhaust_work = back_psia * (1.0 - COMPRESSION_FRACTION);
    let compression_work = back_psia * v_compression * expansion_ln(v_compression / v_preadmission);
    let preadmission_work =
        0.5 * (compression_psia + admission_psia) * PREADMISSION_FRACTION;

    let mep_psi = (admission_work + expansion_work
        - exhaust_work
        - compression_work
        - preadmission_work)
        .max(0.0);

    Diagram {
        points: CyclePoints {
            admission_psia,
            cutoff_psia,
            release_psia,
            back_psia,
            compression_psia,
            preadmission_psia: compression_psia,
        },
        mep_psi,
    }
}

/// Volume fraction admitted per stroke (cutoff plus clearance), used by the
/// steam-consumption calculation.
pub fn admitted_volume_fraction(geom: &DiagramGeometry, cutoff: Real) -> Real {
    cutoff.clamp(PREADMISSION_FRACTION, 0.95) + geom.clearance_fraction.max(0.01)
}

/// Volume fraction still trapped at pre-admission.
pub fn trapped_volume_fraction(geom: &DiagramGeometry) -> Real {
    PREADMISSION_FRACTION + geom.clearance_fraction.max(0.01)
}
