//! The locomotive's cylinder group, evaluated once per tick.
//!
//! Takes the cab inputs and the settled boiler pressure, runs the indicator
//! diagram(s) for the engine arrangement, and produces the MEP figures the
//! motion model turns into tractive effort, together with the cylinder
//! steam consumption the boiler is debited.
//!
//! Steam consumption is deliberately not derived from the work integral: it
//! comes from the admitted swept volume and the steam densities at cutoff
//! and compression, then gets corrected for superheat or condensation and
//! blended with the previous tick to damp the cutoff-change transient.

use crate::compound::{self, CompoundGeometry};
use crate::diagram::{self, DiagramGeometry};
use crate::error::{CylinderError, CylinderResult};
use fp_core::constants::ATMOSPHERE_PSI;
use fp_core::{Real, m3_to_ft3, safe_div};
use fp_config::{BoilerKind, EngineKind, LocomotiveConfig};
use fp_steam::SteamTables;

/// Superheat above which the cylinder walls stay dry.
const CONDENSATION_THRESHOLD_K: Real = 55.0;

/// Weight of the current tick in the consumption moving average.
const USAGE_BLEND: Real = 0.25;

/// Consumption floor as a fraction of peak boiler output; keeps a trickle
/// of demand on the fire with the regulator shut.
const MIN_USAGE_FRACTION: Real = 0.001;

/// Cylinder-cock discharge per cylinder, lb/s per PSIA.
const COCK_FLOW_PER_PSIA: Real = 1.1e-4;

/// Fixed cylinder-group parameters derived from the configuration.
#[derive(Clone, Debug)]
pub struct CylinderGroup {
    pub engine_kind: EngineKind,
    pub boiler_kind: BoilerKind,
    pub cylinder_count: u32,
    pub max_cutoff: Real,
    pub port_opening_factor: Real,
    pub gear_ratio: Real,
    pub max_piston_speed_m_per_s: Real,
    pub stroke_m: Real,
    pub swept_volume_ft3: Real,
    pub lp_swept_volume_ft3: Real,
    pub max_steam_lb_per_s: Real,
    geom: DiagramGeometry,
    lp_geom: DiagramGeometry,
}

/// Cross-tick cylinder state: only the damped output values persist.
#[derive(Clone, Debug, Default)]
pub struct CylinderState {
    /// Blended cylinder steam consumption, lb/s.
    pub usage_smooth_lb_per_s: Real,
    /// Current superheat above saturation, K.
    pub superheat_k: Real,
}

/// Per-tick inputs.
#[derive(Clone, Copy, Debug)]
pub struct CylinderInputs {
    pub throttle: Real,
    /// Signed reverser setting, -max_cutoff..max_cutoff.
    pub cutoff: Real,
    pub wheel_revs_per_s: Real,
    /// Gauge boiler pressure, PSI.
    pub boiler_pressure_psi: Real,
    /// Compound working (ignored for simple/geared engines); `false` means
    /// the bypass valve is open and both cylinders get boiler steam.
    pub compound_mode: bool,
    pub cocks_open: bool,
}

/// Everything the rest of the powerplant needs from the cylinders.
#[derive(Clone, Copy, Debug, Default)]
pub struct CylinderTick {
    /// MEP of the main (or high-pressure) cylinders, PSI.
    pub mep_psi: Real,
    /// MEP of the low-pressure cylinders (compound only), PSI.
    pub lp_mep_psi: Real,
    /// Total MEP, additive across stages.
    pub total_mep_psi: Real,
    /// Boiler steam drawn by the cylinders, lb/s (blended).
    pub steam_usage_lb_per_s: Real,
    /// Steam lost through open cylinder cocks, lb/s.
    pub cock_steam_lb_per_s: Real,
    pub superheat_k: Real,
    /// MEP retention from cock venting, 0..1.
    pub cock_retention: Real,
    /// Admission pressure after throttle and port drop, PSIA.
    pub admission_psia: Real,
    pub back_pressure_psia: Real,
}

impl CylinderGroup {
    pub fn new(config: &LocomotiveConfig) -> CylinderResult<Self> {
        if config.swept_volume_m3 <= 0.0 {
            return Err(CylinderError::InvalidArg {
                what: "swept volume must be positive",
            });
        }
        if config.engine_kind == EngineKind::Compound && config.lp_swept_volume_m3 <= 0.0 {
            return Err(CylinderError::InvalidArg {
                what: "compound engine needs a low-pressure swept volume",
            });
        }
        Ok(Self {
            engine_kind: config.engine_kind,
            boiler_kind: config.boiler_kind,
            cylinder_count: config.cylinder_count,
            max_cutoff: config.max_cutoff,
            port_opening_factor: config.port_opening_factor,
            gear_ratio: config.gear_ratio,
            max_piston_speed_m_per_s: config.max_piston_speed_m_per_s,
            stroke_m: config.stroke_m,
            swept_volume_ft3: m3_to_ft3(config.swept_volume_m3),
            lp_swept_volume_ft3: m3_to_ft3(config.lp_swept_volume_m3),
            max_steam_lb_per_s: config.max_evaporation_lb_per_h / 3_600.0,
            geom: DiagramGeometry {
                clearance_fraction: config.clearance_fraction,
            },
            lp_geom: DiagramGeometry {
                clearance_fraction: if config.lp_clearance_fraction > 0.0 {
                    config.lp_clearance_fraction
                } else {
                    config.clearance_fraction
                },
            },
        })
    }

    pub fn init_state(&self) -> CylinderState {
        CylinderState::default()
    }

    /// Wire-drawing at the admission valve: fraction of chest pressure left
    /// at the moment of cutoff. Superheated engines keep drier, hotter steam
    /// moving through the ports and lose less; both forms are calibration
    /// fits, monotone rising in cutoff.
    fn cutoff_drop_factor(&self, cutoff: Real) -> Real {
        match self.boiler_kind {
            BoilerKind::Saturated => cutoff / (cutoff + self.port_opening_factor),
            BoilerKind::Superheated => 1.0 - self.port_opening_factor * (1.0 - cutoff),
        }
    }

    /// Crank revolutions per second (gear ratio folded in).
    fn crank_revs_per_s(&self, wheel_revs_per_s: Real) -> Real {
        wheel_revs_per_s.abs() * self.gear_ratio
    }

    /// Advance the cylinder model one tick.
    pub fn update(
        &self,
        state: &mut CylinderState,
        input: &CylinderInputs,
        tables: &SteamTables,
    ) -> CylinderTick {
        let throttle = input.throttle.clamp(0.0, 1.0);
        let cutoff = input.cutoff.abs().min(self.max_cutoff);
        let boiler_psia = input.boiler_pressure_psi.max(0.0) + ATMOSPHERE_PSI;
        let crank_revs = self.crank_revs_per_s(input.wheel_revs_per_s);

        // Steam-chest pressure, then the speed/cutoff port drop.
        let chest_psia = throttle * boiler_psia;
        let mut admission_psia =
            chest_psia * tables.initial_pressure_drop_ratio(crank_revs, cutoff);

        // A geared engine runs out of valve events at its piston-speed limit.
        if self.engine_kind == EngineKind::Geared {
            let piston_speed = 2.0 * self.stroke_m * crank_revs;
            if piston_speed > self.max_piston_speed_m_per_s {
                admission_psia *= self.max_piston_speed_m_per_s / piston_speed;
            }
        }

        let cutoff_psia = admission_psia * self.cutoff_drop_factor(cutoff);

        // Back pressure from developed-power fraction (last tick's usage is
        // the available flow proxy).
        let flow_fraction =
            safe_div(state.usage_smooth_lb_per_s, self.max_steam_lb_per_s, 0.0).clamp(0.0, 1.0);
        let back_psia = tables.back_pressure_psi(flow_fraction) + ATMOSPHERE_PSI;

        // Superheat follows the steam flow through the elements.
        let superheat_k = match self.boiler_kind {
            BoilerKind::Saturated => 0.0,
            BoilerKind::Superheated => tables.superheat_rise_k(flow_fraction),
        };
        state.superheat_k = superheat_k;

        // The diagram(s) for this arrangement.
        let (mep, lp_mep, usage_points) = match self.engine_kind {
            EngineKind::Simple | EngineKind::Geared => {
                let d = diagram::compute(&self.geom, admission_psia, cutoff_psia, back_psia, cutoff);
                let admitted = diagram::admitted_volume_fraction(&self.geom, cutoff)
                    * self.swept_volume_ft3;
                let trapped =
                    diagram::trapped_volume_fraction(&self.geom) * self.swept_volume_ft3;
                (
                    d.mep_psi,
                    0.0,
                    vec![(admitted, d.points.cutoff_psia, trapped, d.points.compression_psia)],
                )
            }
            EngineKind::Compound => {
                let geom = CompoundGeometry {
                    hp: self.geom,
                    lp: self.lp_geom,
                    hp_volume: self.swept_volume_ft3,
                    lp_volume: self.lp_swept_volume_ft3,
                };
                let d = if input.compound_mode {
                    compound::compute_compound(&geom, admission_psia, cutoff_psia, back_psia, cutoff)
                } else {
                    compound::compute_bypass(&geom, admission_psia, cutoff_psia, back_psia, cutoff)
                };
                let hp_admitted = diagram::admitted_volume_fraction(&self.geom, cutoff)
                    * self.swept_volume_ft3;
                let hp_trapped =
                    diagram::trapped_volume_fraction(&self.geom) * self.swept_volume_ft3;
                let mut points =
                    vec![(hp_admitted, d.hp.points.cutoff_psia, hp_trapped, d.hp.points.compression_psia)];
                if !input.compound_mode {
                    // Bypass working admits fresh boiler steam to the LP side.
                    let lp_admitted = diagram::admitted_volume_fraction(&self.lp_geom, cutoff)
                        * self.lp_swept_volume_ft3;
                    let lp_trapped =
                        diagram::trapped_volume_fraction(&self.lp_geom) * self.lp_swept_volume_ft3;
                    points.push((
                        lp_admitted,
                        d.lp.points.cutoff_psia,
                        lp_trapped,
                        d.lp.points.compression_psia,
                    ));
                }
                (d.hp.mep_psi, d.lp.mep_psi, points)
            }
        };

        // Raw consumption from the density differential across each stroke.
        let strokes_per_s = 2.0 * self.cylinder_count as Real * crank_revs;
        let mut usage: Real = usage_points
            .iter()
            .map(|&(admitted_ft3, p_cut, trapped_ft3, p_comp)| {
                let taken = admitted_ft3 * tables.steam_density_lb_per_ft3(p_cut);
                let kept = trapped_ft3 * tables.steam_density_lb_per_ft3(p_comp);
                (taken - kept).max(0.0)
            })
            .sum::<Real>()
            * strokes_per_s
            * throttle.min(1.0);

        // Superheat shrinks the charge; wet walls condense part of it.
        let sat_temp_k = tables.saturation_temp_k(boiler_psia);
        if superheat_k > CONDENSATION_THRESHOLD_K {
            usage *= (sat_temp_k + CONDENSATION_THRESHOLD_K) / (sat_temp_k + superheat_k);
        } else {
            let wetness = 1.0 - superheat_k / CONDENSATION_THRESHOLD_K;
            usage *= 1.0 + tables.condensation_fraction(cutoff) * wetness;
        }

        // Open cocks bleed the cylinders; effort falls with the share of
        // steam doing no work.
        let cock_steam = if input.cocks_open {
            COCK_FLOW_PER_PSIA * admission_psia * self.cylinder_count as Real
        } else {
            0.0
        };
        let cock_retention = if input.cocks_open {
            safe_div(usage, usage + cock_steam, 1.0).clamp(0.0, 1.0)
        } else {
            1.0
        };

        usage = usage.max(MIN_USAGE_FRACTION * self.max_steam_lb_per_s);

        // Damp the consumption figure across ticks.
        state.usage_smooth_lb_per_s = if state.usage_smooth_lb_per_s > 0.0 {
            state.usage_smooth_lb_per_s + USAGE_BLEND * (usage - state.usage_smooth_lb_per_s)
        } else {
            usage
        };

        let mep = mep * cock_retention;
        let lp_mep = lp_mep * cock_retention;

        CylinderTick {
            mep_psi: mep,
            lp_mep_psi: lp_mep,
            total_mep_psi: mep + lp_mep,
            steam_usage_lb_per_s: state.usage_smooth_lb_per_s,
            cock_steam_lb_per_s: cock_steam,
            superheat_k,
            cock_retention,
            admission_psia,
            back_pressure_psia: back_psia,
        }
    }
}
