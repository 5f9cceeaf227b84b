//! Flat save/restore snapshot.
//!
//! Every stateful field of [`LocomotiveSimState`], flattened into one serde
//! struct so the enclosing save system can persist it in any format. Save
//! and restore use the same field set; restoring onto a powerplant built
//! from the same configuration resumes bit-for-bit.

use fp_core::Real;
use serde::{Deserialize, Serialize};

use crate::error::SimResult;
use crate::powerplant::Powerplant;
use fp_boiler::FiremanMode;

/// One powerplant, flat on disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerplantSnapshot {
    // Boiler vessel
    pub pressure_psi: Real,
    pub water_temp_k: Real,
    pub mass_lb: Real,
    pub heat_btu: Real,
    pub water_fraction: Real,
    pub flue_temp_k: Real,
    pub evaporation_lb_per_s: Real,
    pub heat_smooth_btu: Real,
    pub heat_prev_btu: Real,
    pub valves_open: u32,
    pub plug_blown: bool,
    pub priming: bool,

    // Firebox
    pub fire_mass_kg: Real,
    pub burn_rate_kg_per_s: Real,
    pub feed_rate_kg_per_s: Real,
    pub fire_out: bool,
    pub grate_limited: bool,

    // Tender
    pub coal_kg: Real,
    pub water_lb: Real,
    pub aux_water_lb: Real,
    pub aux_coupled: bool,
    pub coal_exhausted: bool,
    pub water_exhausted: bool,

    // Cylinders
    pub usage_smooth_lb_per_s: Real,
    pub superheat_k: Real,

    // Motion
    pub wheel_angle_rad: Real,
    pub wheel_slip_mps: Real,
    pub is_slipping: bool,

    // Injectors
    pub injector_on: [bool; 2],
    pub injector_fraction: [Real; 2],

    // Fireman
    pub fireman_mode: u8,
    pub fireman_clock_s: Real,
    pub fireman_hold_until_s: Real,

    // Bookkeeping
    pub heat_out_btu_per_s: Real,
    pub elapsed_s: Real,
}

fn mode_tag(mode: FiremanMode) -> u8 {
    match mode {
        FiremanMode::Idle => 0,
        FiremanMode::ForceOn => 1,
        FiremanMode::ForceOff => 2,
        FiremanMode::Resetting => 3,
    }
}

fn tag_mode(tag: u8) -> FiremanMode {
    match tag {
        1 => FiremanMode::ForceOn,
        2 => FiremanMode::ForceOff,
        3 => FiremanMode::Resetting,
        _ => FiremanMode::Idle,
    }
}

impl PowerplantSnapshot {
    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Powerplant {
    /// Capture every stateful field.
    pub fn snapshot(&self) -> PowerplantSnapshot {
        let st = self.state();
        PowerplantSnapshot {
            pressure_psi: st.boiler.pressure_psi,
            water_temp_k: st.boiler.water_temp_k,
            mass_lb: st.boiler.mass_lb,
            heat_btu: st.boiler.heat_btu,
            water_fraction: st.boiler.water_fraction,
            flue_temp_k: st.boiler.flue_temp_k,
            evaporation_lb_per_s: st.boiler.evaporation_lb_per_s,
            heat_smooth_btu: st.boiler.heat_smooth.value(),
            heat_prev_btu: st.boiler.heat_prev_btu,
            valves_open: st.boiler.valves_open,
            plug_blown: st.boiler.plug_blown,
            priming: st.boiler.priming,
            fire_mass_kg: st.fire.fire_mass_kg,
            burn_rate_kg_per_s: st.fire.burn_rate_kg_per_s,
            feed_rate_kg_per_s: st.fire.feed_rate_kg_per_s,
            fire_out: st.fire.fire_out,
            grate_limited: st.fire.grate_limited,
            coal_kg: st.tender.coal_kg,
            water_lb: st.tender.water_lb,
            aux_water_lb: st.tender.aux_water_lb,
            aux_coupled: st.tender.aux_coupled,
            coal_exhausted: st.tender.coal_exhausted,
            water_exhausted: st.tender.water_exhausted,
            usage_smooth_lb_per_s: st.cylinders.usage_smooth_lb_per_s,
            superheat_k: st.cylinders.superheat_k,
            wheel_angle_rad: st.motion.adhesion.wheel_angle_rad,
            wheel_slip_mps: st.motion.adhesion.slip_speed_mps,
            is_slipping: st.motion.adhesion.is_slipping,
            injector_on: [st.aux.injectors[0].is_on, st.aux.injectors[1].is_on],
            injector_fraction: [
                st.aux.injectors[0].fraction_open,
                st.aux.injectors[1].fraction_open,
            ],
            fireman_mode: mode_tag(st.fireman.mode),
            fireman_clock_s: st.fireman.clock_s,
            fireman_hold_until_s: st.fireman.hold_until_s,
            heat_out_btu_per_s: st.heat_out_btu_per_s,
            elapsed_s: st.elapsed_s,
        }
    }

    /// Load a snapshot into this powerplant. The configuration must match
    /// the one the snapshot was taken under.
    pub fn restore(&mut self, snap: &PowerplantSnapshot) {
        let st = self.state_mut();
        st.boiler.pressure_psi = snap.pressure_psi;
        st.boiler.water_temp_k = snap.water_temp_k;
        st.boiler.mass_lb = snap.mass_lb;
        st.boiler.heat_btu = snap.heat_btu;
        st.boiler.water_fraction = snap.water_fraction;
        st.boiler.flue_temp_k = snap.flue_temp_k;
        st.boiler.evaporation_lb_per_s = snap.evaporation_lb_per_s;
        st.boiler.heat_smooth.reset(snap.heat_smooth_btu);
        st.boiler.heat_prev_btu = snap.heat_prev_btu;
        st.boiler.valves_open = snap.valves_open;
        st.boiler.plug_blown = snap.plug_blown;
        st.boiler.priming = snap.priming;
        st.fire.fire_mass_kg = snap.fire_mass_kg;
        st.fire.burn_rate_kg_per_s = snap.burn_rate_kg_per_s;
        st.fire.feed_rate_kg_per_s = snap.feed_rate_kg_per_s;
        st.fire.fire_out = snap.fire_out;
        st.fire.grate_limited = snap.grate_limited;
        st.tender.coal_kg = snap.coal_kg;
        st.tender.water_lb = snap.water_lb;
        st.tender.aux_water_lb = snap.aux_water_lb;
        st.tender.aux_coupled = snap.aux_coupled;
        st.tender.coal_exhausted = snap.coal_exhausted;
        st.tender.water_exhausted = snap.water_exhausted;
        st.cylinders.usage_smooth_lb_per_s = snap.usage_smooth_lb_per_s;
        st.cylinders.superheat_k = snap.superheat_k;
        st.motion.adhesion.wheel_angle_rad = snap.wheel_angle_rad;
        st.motion.adhesion.slip_speed_mps = snap.wheel_slip_mps;
        st.motion.adhesion.is_slipping = snap.is_slipping;
        for i in 0..2 {
            st.aux.injectors[i].is_on = snap.injector_on[i];
            st.aux.injectors[i].fraction_open = snap.injector_fraction[i];
        }
        st.fireman.mode = tag_mode(snap.fireman_mode);
        st.fireman.clock_s = snap.fireman_clock_s;
        st.fireman.hold_until_s = snap.fireman_hold_until_s;
        st.heat_out_btu_per_s = snap.heat_out_btu_per_s;
        st.elapsed_s = snap.elapsed_s;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::{CabControls, TrainSnapshot};
    use fp_config::{LocomotiveSpec, normalize};

    fn powerplant() -> Powerplant {
        let (config, _) = normalize(&LocomotiveSpec {
            name: "test".into(),
            ..Default::default()
        })
        .unwrap();
        Powerplant::new(config, true).unwrap()
    }

    fn working_controls() -> CabControls {
        CabControls {
            throttle: 0.8,
            cutoff: 0.5,
            blower: 0.2,
            ..CabControls::default()
        }
    }

    #[test]
    fn snapshot_roundtrips_through_json() {
        let mut plant = powerplant();
        let train = TrainSnapshot {
            speed_m_per_s: 8.0,
            ..TrainSnapshot::default()
        };
        for _ in 0..30 {
            plant.update(0.25, &working_controls(), &train).unwrap();
        }
        let snap = plant.snapshot();
        let json = snap.to_json().unwrap();
        let back = PowerplantSnapshot::from_json(&json).unwrap();
        assert_eq!(snap, back);
    }

    #[test]
    fn restore_resumes_bit_for_bit() {
        let train = TrainSnapshot {
            speed_m_per_s: 8.0,
            ..TrainSnapshot::default()
        };
        let controls = working_controls();

        let mut original = powerplant();
        for _ in 0..50 {
            original.update(0.25, &controls, &train).unwrap();
        }
        let snap = original.snapshot();

        let mut resumed = powerplant();
        resumed.restore(&snap);
        assert_eq!(resumed.snapshot(), snap);

        // Both continue identically.
        for _ in 0..20 {
            let a = original.update(0.25, &controls, &train).unwrap();
            let b = resumed.update(0.25, &controls, &train).unwrap();
            assert_eq!(a.pressure_psi, b.pressure_psi);
            assert_eq!(a.tractive_effort_lbf, b.tractive_effort_lbf);
            assert_eq!(a.cylinder_steam_lb_per_s, b.cylinder_steam_lb_per_s);
        }
        assert_eq!(original.snapshot(), resumed.snapshot());
    }
}
