//! Combustion: burn rate, fire mass, and heat release.
//!
//! Two mutually exclusive firing modes. Hand firing composes the burn rate
//! from a standing baseline plus blower and damper draught, all scaled by
//! boiler pressure, with the cab firing-rate control feeding coal. Automatic
//! firing follows boiler heat demand through a set of dimensionless feedback
//! ratios and lets the supervisor in [`crate::fireman`] force the rate to
//! either extreme.
//!
//! The feedback constants are calibration values tuned against reference
//! locomotive performance; they are not derived from first principles.

use crate::events::BoilerEvent;
use crate::fireman::FiremanCommand;
use crate::tender::{Tender, TenderState};
use fp_core::{J_PER_BTU, Real, kg_to_lb, m2_to_ft2};
use fp_config::LocomotiveConfig;
use fp_steam::SteamTables;

// Grate limit: combustion per unit grate area above which extra coal adds no
// heat (≈70 lb/ft²/h).
const GRATE_LIMIT_KG_PER_S_M2: Real = 0.0264;

// Hand-firing burn composition, per m² of grate at full boiler pressure.
const BASE_BURN_KG_PER_S_M2: Real = 0.008;
const BLOWER_BURN_KG_PER_S_M2: Real = 0.020;
const DAMPER_BURN_KG_PER_S_M2: Real = 0.032;

// Fastest a fireman can shovel; a mechanical stoker beats him.
const HAND_FEED_KG_PER_S_M2: Real = 0.040;
const STOKER_FEED_GAIN: Real = 1.6;

// Burn-rate floor keeping the fire alive at rest, as a fraction of the
// standing baseline.
const MIN_BURN_FRACTION: Real = 0.25;

// Fire-bed health thresholds, as fractions of ideal fire mass.
const FIRE_CRITICAL_FRACTION: Real = 0.10;
const FIRE_OUT_FRACTION: Real = 0.01;
const FIRE_RELIGHT_FRACTION: Real = 0.05;

// Quadratic combustion-efficiency penalty for a thin or smothered bed.
const BED_PENALTY_GAIN: Real = 0.8;

// Automatic-mode feedback ratios.
const HEAT_RATIO_GAIN: Real = 5.0;
const HEAT_RATIO_MAX: Real = 1.4;
const PRESSURE_RATIO_GAIN: Real = 4.0;
const PRESSURE_RATIO_MAX: Real = 1.5;
const CEILING_FULL_GAIN: Real = 8.0;
const CEILING_SAFETY_GAIN: Real = 20.0;

// Automatic coal feed trims the bed back to ideal over this time.
const FIRE_TRIM_TIME_S: Real = 600.0;

// Forced firing-up aims just under the grate limit.
const FORCE_MAX_FRACTION: Real = 0.95;

const BTU_PER_KJ: Real = 1_000.0 / J_PER_BTU;

/// Fixed firebox parameters derived from the locomotive configuration.
#[derive(Clone, Debug)]
pub struct Firebox {
    pub grate_area_m2: Real,
    pub ideal_fire_mass_kg: Real,
    pub max_fire_mass_kg: Real,
    pub fuel_energy_btu_per_kg: Real,
    pub max_pressure_psi: Real,
    /// Grate-limited burn rate for the whole grate, kg/s.
    pub max_burn_kg_per_s: Real,
    /// Burn-rate floor, kg/s.
    pub min_burn_kg_per_s: Real,
    /// Fastest possible hand feed, kg/s.
    pub max_feed_kg_per_s: Real,
}

/// Mutable firebox state.
#[derive(Clone, Debug)]
pub struct FireboxState {
    pub fire_mass_kg: Real,
    pub burn_rate_kg_per_s: Real,
    pub feed_rate_kg_per_s: Real,
    /// Fire has gone out; latched until the bed is built back up.
    pub fire_out: bool,
    /// Currently above the grate limit (drives the one-shot notice).
    pub grate_limited: bool,
}

/// Per-tick inputs assembled by the caller.
#[derive(Clone, Copy, Debug)]
pub struct FireboxInputs {
    pub dt_s: Real,
    pub manual_firing: bool,
    /// Cab firing-rate control, 0..1 (hand firing only).
    pub firing_rate: Real,
    pub blower_fraction: Real,
    pub damper_fraction: Real,
    pub pressure_psi: Real,
    /// Smoothed stored boiler heat, BTU.
    pub heat_smooth_btu: Real,
    /// Stored heat the boiler would hold at working pressure, BTU.
    pub heat_full_btu: Real,
    /// Stored heat at safety-valve lift pressure, BTU.
    pub heat_safety_btu: Real,
    /// Heat currently leaving the boiler, BTU/s.
    pub heat_out_btu_per_s: Real,
    pub command: FiremanCommand,
    pub plug_blown: bool,
    pub stoker_fitted: bool,
}

/// What combustion produced this tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct FireboxOutcome {
    /// Heat delivered to the boiler after all derates, BTU/s.
    pub combustion_heat_btu_per_s: Real,
    pub burn_rate_kg_per_s: Real,
    pub feed_rate_kg_per_s: Real,
    pub coal_consumed_kg: Real,
    /// Combustion-efficiency retention from bed health, 0..1.
    pub bed_retention: Real,
    /// Grate firing rate used for the efficiency lookup, lb/ft²/h.
    pub grate_rate_lb_per_ft2_h: Real,
}

impl Firebox {
    pub fn new(config: &LocomotiveConfig) -> Self {
        let grate = config.grate_area_m2;
        Self {
            grate_area_m2: grate,
            ideal_fire_mass_kg: config.ideal_fire_mass_kg,
            max_fire_mass_kg: config.max_fire_mass_kg,
            fuel_energy_btu_per_kg: config.fuel_energy_kj_per_kg * BTU_PER_KJ,
            max_pressure_psi: config.max_pressure_psi,
            max_burn_kg_per_s: GRATE_LIMIT_KG_PER_S_M2 * grate,
            min_burn_kg_per_s: MIN_BURN_FRACTION * BASE_BURN_KG_PER_S_M2 * grate,
            max_feed_kg_per_s: HAND_FEED_KG_PER_S_M2 * grate,
        }
    }

    /// A freshly lit, ideal fire.
    pub fn init_state(&self) -> FireboxState {
        FireboxState {
            fire_mass_kg: self.ideal_fire_mass_kg,
            burn_rate_kg_per_s: 0.0,
            feed_rate_kg_per_s: 0.0,
            fire_out: false,
            grate_limited: false,
        }
    }

    /// Hand-firing burn rate: standing baseline plus draught, all scaled by
    /// pressure so a dying boiler draws less air.
    fn manual_burn_rate(&self, input: &FireboxInputs) -> Real {
        let pressure_scale = (input.pressure_psi / self.max_pressure_psi).clamp(0.0, 1.1);
        let base = BASE_BURN_KG_PER_S_M2 * (0.5 + 0.5 * pressure_scale);
        let blower = BLOWER_BURN_KG_PER_S_M2 * input.blower_fraction.clamp(0.0, 1.0);
        let damper = DAMPER_BURN_KG_PER_S_M2 * input.damper_fraction.clamp(0.0, 1.0);
        (base + (blower + damper) * pressure_scale) * self.grate_area_m2
    }

    /// Demand-following burn rate: replace the heat leaving the boiler,
    /// shaped by the heat and pressure feedback ratios and clamped back down
    /// by the two stored-heat ceilings.
    fn automatic_burn_rate(&self, input: &FireboxInputs) -> Real {
        let demand = (input.heat_out_btu_per_s / self.fuel_energy_btu_per_kg).max(0.0);

        let heat_deficit =
            (input.heat_full_btu - input.heat_smooth_btu) / input.heat_full_btu.max(1.0);
        let heat_ratio = (1.0 + HEAT_RATIO_GAIN * heat_deficit).clamp(1.0, HEAT_RATIO_MAX);

        let pressure_deficit =
            (self.max_pressure_psi - input.pressure_psi) / self.max_pressure_psi;
        let pressure_ratio =
            (1.0 + PRESSURE_RATIO_GAIN * pressure_deficit).clamp(1.0, PRESSURE_RATIO_MAX);

        let full_excess =
            (input.heat_smooth_btu - input.heat_full_btu) / input.heat_full_btu.max(1.0);
        let ceiling_full = (1.0 - CEILING_FULL_GAIN * full_excess.max(0.0)).clamp(0.05, 1.0);

        let safety_excess =
            (input.heat_smooth_btu - input.heat_safety_btu) / input.heat_safety_btu.max(1.0);
        let ceiling_safety =
            (1.0 - CEILING_SAFETY_GAIN * safety_excess.max(0.0)).clamp(0.0, 1.0);

        demand * heat_ratio * pressure_ratio * ceiling_full * ceiling_safety
    }

    /// Advance combustion one tick. Feeds coal from the tender, burns the
    /// bed, and returns the heat delivered to the boiler.
    pub fn update(
        &self,
        state: &mut FireboxState,
        input: &FireboxInputs,
        tables: &SteamTables,
        tender: &Tender,
        tender_state: &mut TenderState,
        events: &mut Vec<BoilerEvent>,
    ) -> FireboxOutcome {
        let dt = input.dt_s;
        if dt <= 0.0 {
            return FireboxOutcome {
                bed_retention: 1.0,
                ..Default::default()
            };
        }

        // Burn rate by mode, then supervisor override.
        let mut burn = if input.manual_firing {
            self.manual_burn_rate(input)
        } else {
            match input.command {
                FiremanCommand::ForceMax => FORCE_MAX_FRACTION * self.max_burn_kg_per_s,
                FiremanCommand::ForceMin => self.min_burn_kg_per_s,
                FiremanCommand::Normal => self.automatic_burn_rate(input),
            }
        };

        // Floor keeps the fire ticking over unless it is already failing.
        let fire_critical = state.fire_mass_kg < FIRE_CRITICAL_FRACTION * self.ideal_fire_mass_kg;
        if !fire_critical && !input.plug_blown && !state.fire_out {
            burn = burn.max(self.min_burn_kg_per_s);
        }
        if state.fire_out || input.plug_blown {
            burn = 0.0;
        }
        // Cannot burn coal that is not in the bed.
        burn = burn.min(state.fire_mass_kg / dt).max(0.0);

        // Coal feed: cab control when hand firing, bed-trimming otherwise.
        let wanted_feed = if input.manual_firing {
            let gain = if input.stoker_fitted {
                STOKER_FEED_GAIN
            } else {
                1.0
            };
            input.firing_rate.clamp(0.0, 1.0) * self.max_feed_kg_per_s * gain
        } else {
            let trim = (self.ideal_fire_mass_kg - state.fire_mass_kg) / FIRE_TRIM_TIME_S;
            (burn + trim).clamp(0.0, self.max_feed_kg_per_s * STOKER_FEED_GAIN)
        };
        let coal_granted_kg = tender.consume_coal(tender_state, wanted_feed * dt, events);
        let feed = coal_granted_kg / dt;

        // Bed dynamics.
        state.fire_mass_kg =
            (state.fire_mass_kg + dt * (feed - burn)).clamp(0.0, self.max_fire_mass_kg);
        state.burn_rate_kg_per_s = burn;
        state.feed_rate_kg_per_s = feed;

        if !state.fire_out && state.fire_mass_kg <= FIRE_OUT_FRACTION * self.ideal_fire_mass_kg {
            state.fire_out = true;
            events.push(BoilerEvent::FireOut);
        } else if state.fire_out
            && state.fire_mass_kg > FIRE_RELIGHT_FRACTION * self.ideal_fire_mass_kg
        {
            state.fire_out = false;
        }

        // Bed-health efficiency: thin beds pull excess air, deep beds smother.
        let deviation = state.fire_mass_kg / self.ideal_fire_mass_kg - 1.0;
        let bed_retention = (1.0 - BED_PENALTY_GAIN * deviation * deviation).clamp(0.0, 1.0);

        // Heat release is grate-capped: coal above the limit burns dirty and
        // adds nothing.
        let effective_burn = burn.min(self.max_burn_kg_per_s);
        if burn > self.max_burn_kg_per_s && !state.grate_limited {
            state.grate_limited = true;
            events.push(BoilerEvent::GrateLimitExceeded);
        } else if burn <= self.max_burn_kg_per_s {
            state.grate_limited = false;
        }

        let grate_rate_lb_per_ft2_h =
            kg_to_lb(effective_burn) * 3_600.0 / m2_to_ft2(self.grate_area_m2);
        let efficiency = tables.boiler_efficiency(grate_rate_lb_per_ft2_h).clamp(0.0, 1.0);
        let combustion_heat =
            self.fuel_energy_btu_per_kg * effective_burn * bed_retention * efficiency;

        FireboxOutcome {
            combustion_heat_btu_per_s: combustion_heat,
            burn_rate_kg_per_s: burn,
            feed_rate_kg_per_s: feed,
            coal_consumed_kg: coal_granted_kg,
            bed_retention,
            grate_rate_lb_per_ft2_h,
        }
    }
}
