//! Cab controls and the train-side snapshot.
//!
//! Both arrive from outside the core every tick. Controls are clamped on
//! ingestion so no component downstream ever sees an out-of-range setting;
//! the train snapshot is read-only.

use fp_core::{Real, clamp_unit};

/// Every control the crew can touch, one struct per tick.
#[derive(Clone, Copy, Debug)]
pub struct CabControls {
    /// Regulator opening, 0..1.
    pub throttle: Real,
    /// Reverser, -max_cutoff..max_cutoff. Negative runs the engine in
    /// reverse.
    pub cutoff: Real,
    pub blower: Real,
    pub damper: Real,
    /// Hand firing (or stoker-assisted) instead of the automatic fireman.
    pub manual_firing: bool,
    /// Firing-rate control, 0..1, hand firing only.
    pub firing_rate: Real,
    pub injector_on: [bool; 2],
    pub injector_fraction: [Real; 2],
    pub cylinder_cocks_open: bool,
    pub blowdown_open: bool,
    /// Compound engines: bypass valve open means simple working.
    pub bypass_open: bool,
    /// Geared engines: gear-lever position, 0 (neutral) to 1 (full
    /// engagement). Ignored on direct-drive engines.
    pub gear_lever: Real,
    /// Air-brake engines: pump running.
    pub compressor_on: bool,
    /// Vacuum-brake engines: large ejector in steam.
    pub large_ejector_on: bool,
    pub steam_heat_on: bool,
    /// Auxiliary tender coupled.
    pub aux_tender_coupled: bool,
}

impl Default for CabControls {
    fn default() -> Self {
        Self {
            throttle: 0.0,
            cutoff: 0.0,
            blower: 0.0,
            damper: 0.0,
            manual_firing: false,
            firing_rate: 0.0,
            injector_on: [false; 2],
            injector_fraction: [0.0; 2],
            cylinder_cocks_open: false,
            blowdown_open: false,
            bypass_open: false,
            gear_lever: 1.0,
            compressor_on: false,
            large_ejector_on: false,
            steam_heat_on: false,
            aux_tender_coupled: false,
        }
    }
}

impl CabControls {
    /// Clamp every continuous setting into range.
    pub fn clamped(&self, max_cutoff: Real) -> Self {
        Self {
            throttle: clamp_unit(self.throttle),
            cutoff: self.cutoff.clamp(-max_cutoff, max_cutoff),
            blower: clamp_unit(self.blower),
            damper: clamp_unit(self.damper),
            firing_rate: clamp_unit(self.firing_rate),
            gear_lever: clamp_unit(self.gear_lever),
            injector_fraction: [
                clamp_unit(self.injector_fraction[0]),
                clamp_unit(self.injector_fraction[1]),
            ],
            ..*self
        }
    }
}

/// Train-level aggregates the powerplant reads but never writes.
#[derive(Clone, Copy, Debug)]
pub struct TrainSnapshot {
    /// Absolute road speed, m/s.
    pub speed_m_per_s: Real,
    /// Combined friction/gravity/curve/wind force on locomotive and tender,
    /// lbf.
    pub train_resistance_lbf: Real,
    /// Weight currently on the coupled drivers, lbf (0 = use configuration).
    pub adhesive_weight_lbf: Real,
    /// Rail condition, 0..1 scale on the dry friction coefficient.
    pub rail_friction_factor: Real,
}

impl Default for TrainSnapshot {
    fn default() -> Self {
        Self {
            speed_m_per_s: 0.0,
            train_resistance_lbf: 0.0,
            adhesive_weight_lbf: 0.0,
            rail_friction_factor: 1.0,
        }
    }
}
