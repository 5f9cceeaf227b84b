//! The pressure vessel: mass and heat balance.
//!
//! The boiler is a lumped volume of saturated water and steam. Stored heat
//! and total mass are the primary state; water temperature integrates from
//! the net heat flow, and gauge pressure follows the saturation curve at
//! that temperature. Steam consumers elsewhere in the powerplant debit mass
//! and heat through [`BoilerState`] methods between vessel updates, and the
//! next update folds those debits into the temperature integration.
//!
//! Update order within a tick follows the plumbing: safety valves first,
//! then blowdown and blower discharge, flue-gas temperature, evaporation,
//! combustion heat input, shell radiation, and finally the water-level,
//! temperature, and pressure derivations.

use crate::events::BoilerEvent;
use fp_core::constants::ATMOSPHERE_PSI;
use fp_core::{Real, Smoother, m2_to_ft2, m3_to_ft3};
use fp_config::LocomotiveConfig;
use fp_steam::SteamTables;

/// Pressure above working pressure at which the first valve lifts.
const FIRST_VALVE_LIFT_PSI: Real = 1.0;
/// Additional lift pressure per further valve in the bank.
const VALVE_STAGGER_PSI: Real = 1.5;
/// A lifted valve reseats once pressure falls this far below working.
const SAFETY_VALVE_DROP_PSI: Real = 4.0;
/// Hard ceiling above working pressure; nothing may exceed it.
const PRESSURE_MARGIN_PSI: Real = 7.0;

/// Heat-transfer coefficient, flue gas to water, BTU/(s·ft²·K).
const FLUE_TRANSFER_COEFF: Real = 0.012;
/// Flue-gas thermal response time, s.
const FLUE_TAU_S: Real = 120.0;
/// Flue temperature above water at a cold start, K.
const FLUE_START_RISE_K: Real = 150.0;

/// Shell radiation, BTU/(s·ft²·K), bare and lagged plate.
const RADIATION_UNINSULATED: Real = 6.0e-4;
const RADIATION_INSULATED: Real = 6.0e-5;
/// Convective multiplier per m/s of road speed.
const RADIATION_SPEED_GAIN: Real = 0.02;
/// Ambient air, K.
const AMBIENT_K: Real = 300.0;

/// Water fraction below which the fusible plug lets go.
const WATER_MIN_FRACTION: Real = 0.70;
/// Water fraction band for priming (carry-over into the steam pipe).
const PRIMING_START_FRACTION: Real = 0.93;
const PRIMING_CLEAR_FRACTION: Real = 0.91;
/// Motive-force retention while priming.
pub const PRIMING_DERATE: Real = 0.60;

/// Gauge pressure ceiling once the plug has blown.
const PLUG_BLOWN_PSI: Real = 2.0;
/// Evaporation trickle with the fire doused, lb/s.
const PLUG_BLOWN_EVAP_LB_PER_S: Real = 0.05;

/// Visible water-gauge glass, as water fractions.
const GAUGE_BOTTOM_FRACTION: Real = 0.75;
const GAUGE_TOP_FRACTION: Real = 0.93;

/// Smoothing time for the stored-heat figure the firing logic watches.
const HEAT_SMOOTH_TAU_S: Real = 45.0;

/// Specific heat of the boiler water, BTU/(lb·°F).
const WATER_CP_BTU_PER_LB_F: Real = 1.0;

/// Fixed vessel parameters derived from the locomotive configuration.
#[derive(Clone, Debug)]
pub struct Boiler {
    pub volume_ft3: Real,
    pub max_pressure_psi: Real,
    pub evaporation_area_ft2: Real,
    pub insulated_fraction: Real,
    pub safety_valve_count: u32,
    pub safety_valve_capacity_lb_per_s: Real,
    pub blowdown_rate_lb_per_s: Real,
    pub max_evaporation_lb_per_s: Real,
    pub initial_pressure_psi: Real,
    pub initial_water_fraction: Real,
}

/// Mutable vessel state. Mass and heat are also mutated by downstream steam
/// consumers via the debit/credit methods.
#[derive(Clone, Debug)]
pub struct BoilerState {
    /// Gauge pressure, PSI.
    pub pressure_psi: Real,
    pub water_temp_k: Real,
    /// Total water + steam mass in the vessel, lb.
    pub mass_lb: Real,
    /// Stored heat above the 32 °F liquid reference, BTU.
    pub heat_btu: Real,
    /// Volume fraction occupied by liquid water.
    pub water_fraction: Real,
    pub flue_temp_k: Real,
    /// Heat-transfer-limited evaporation, lb/s.
    pub evaporation_lb_per_s: Real,
    pub heat_smooth: Smoother,
    /// Lifted valves, low-lift first.
    pub valves_open: u32,
    pub plug_blown: bool,
    pub priming: bool,
    /// Stored heat at the end of the previous vessel update; the difference
    /// is the net heat flow the temperature integration consumes.
    pub heat_prev_btu: Real,
}

/// Per-tick inputs for the vessel update.
#[derive(Clone, Copy, Debug)]
pub struct BoilerInputs {
    pub dt_s: Real,
    pub blowdown_open: bool,
    /// Blower steam draw, lb/s, already scaled by the cab control.
    pub blower_steam_lb_per_s: Real,
    /// Combustion heat delivered to the water, BTU/s.
    pub combustion_heat_btu_per_s: Real,
    /// Road speed, for the convective shell loss.
    pub speed_m_per_s: Real,
}

/// What the vessel did this tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoilerOutcome {
    pub safety_valve_steam_lb_per_s: Real,
    pub blowdown_water_lb_per_s: Real,
    pub blower_steam_lb_per_s: Real,
    pub radiation_loss_btu_per_s: Real,
    pub heat_transfer_btu_per_s: Real,
}

impl Boiler {
    pub fn new(config: &LocomotiveConfig) -> Self {
        Self {
            volume_ft3: m3_to_ft3(config.boiler_volume_m3),
            max_pressure_psi: config.max_pressure_psi,
            evaporation_area_ft2: m2_to_ft2(config.evaporation_area_m2),
            insulated_fraction: config.insulated_fraction,
            safety_valve_count: config.safety_valve_count,
            safety_valve_capacity_lb_per_s: config.safety_valve_capacity_lb_per_s,
            blowdown_rate_lb_per_s: config.blowdown_rate_lb_per_s,
            max_evaporation_lb_per_s: config.max_evaporation_lb_per_h / 3_600.0,
            initial_pressure_psi: config.initial_pressure_psi,
            initial_water_fraction: config.initial_water_fraction,
        }
    }

    /// Steady state at the configured starting pressure and water level.
    pub fn init_state(&self, tables: &SteamTables) -> BoilerState {
        let psia = self.initial_pressure_psi + ATMOSPHERE_PSI;
        let water_temp_k = tables.saturation_temp_k(psia);
        let water_fraction = self.initial_water_fraction;
        let rho_water = tables.water_density_lb_per_ft3(psia);
        let rho_steam = tables.steam_density_lb_per_ft3(psia);
        let mass_lb = self.volume_ft3
            * (water_fraction * rho_water + (1.0 - water_fraction) * rho_steam);
        let heat_btu = mass_lb * tables.water_heat_btu_per_lb(psia);
        let mut heat_smooth = Smoother::new(HEAT_SMOOTH_TAU_S);
        heat_smooth.reset(heat_btu);
        BoilerState {
            pressure_psi: self.initial_pressure_psi,
            water_temp_k,
            mass_lb,
            heat_btu,
            water_fraction,
            flue_temp_k: water_temp_k + FLUE_START_RISE_K,
            evaporation_lb_per_s: 0.0,
            heat_smooth,
            valves_open: 0,
            plug_blown: false,
            priming: false,
            heat_prev_btu: heat_btu,
        }
    }

    /// Stored heat if the boiler sat exactly at working pressure.
    pub fn heat_at_full_pressure_btu(&self, state: &BoilerState, tables: &SteamTables) -> Real {
        state.mass_lb * tables.water_heat_btu_per_lb(self.max_pressure_psi + ATMOSPHERE_PSI)
    }

    /// Stored heat at the first safety-valve lift pressure.
    pub fn heat_at_safety_pressure_btu(&self, state: &BoilerState, tables: &SteamTables) -> Real {
        let lift_psia = self.max_pressure_psi + FIRST_VALVE_LIFT_PSI + ATMOSPHERE_PSI;
        state.mass_lb * tables.water_heat_btu_per_lb(lift_psia)
    }

    /// Lift pressure of valve `i` in the bank, gauge PSI.
    fn valve_lift_psi(&self, i: u32) -> Real {
        self.max_pressure_psi + FIRST_VALVE_LIFT_PSI + VALVE_STAGGER_PSI * i as Real
    }

    /// Hysteretic valve bank: each valve lifts at its own staggered pressure
    /// and the whole bank reseats once pressure is safely under working.
    fn update_safety_valves(
        &self,
        state: &mut BoilerState,
        events: &mut Vec<BoilerEvent>,
    ) -> Real {
        let was_open = state.valves_open > 0;
        let mut open = 0;
        for i in 0..self.safety_valve_count {
            let already_open = i < state.valves_open;
            let lifts = state.pressure_psi > self.valve_lift_psi(i);
            let reseats = state.pressure_psi <= self.max_pressure_psi - SAFETY_VALVE_DROP_PSI;
            if lifts || (already_open && !reseats) {
                open += 1;
            }
        }
        state.valves_open = open;
        let now_open = open > 0;
        if now_open && !was_open {
            events.push(BoilerEvent::SafetyValveOpened);
        } else if !now_open && was_open {
            events.push(BoilerEvent::SafetyValveClosed);
        }
        open as Real * self.safety_valve_capacity_lb_per_s
    }

    /// Advance the vessel one tick. Steps (safety valves through pressure
    /// derivation) run in plumbing order; see the module docs.
    pub fn update(
        &self,
        state: &mut BoilerState,
        input: &BoilerInputs,
        tables: &SteamTables,
        events: &mut Vec<BoilerEvent>,
    ) -> BoilerOutcome {
        let dt = input.dt_s.max(0.0);
        let psia = state.pressure_psi + ATMOSPHERE_PSI;

        // Safety valves vent dry steam at the bank's rated capacity.
        let valve_rate = self.update_safety_valves(state, events);
        if valve_rate > 0.0 && dt > 0.0 {
            let vented = (valve_rate * dt).min(state.mass_lb * 0.01);
            state.mass_lb -= vented;
            state.heat_btu -= vented * tables.steam_heat_btu_per_lb(psia);
        }

        // Blowdown discharges water from the bottom of the barrel.
        let blowdown_rate = if input.blowdown_open {
            self.blowdown_rate_lb_per_s
        } else {
            0.0
        };
        if blowdown_rate > 0.0 && dt > 0.0 {
            let drained = (blowdown_rate * dt).min(state.mass_lb * 0.01);
            state.mass_lb -= drained;
            state.heat_btu -= drained * tables.water_heat_btu_per_lb(psia);
        }

        // Blower steam up the chimney.
        let blower_rate = input.blower_steam_lb_per_s.max(0.0);
        if blower_rate > 0.0 && dt > 0.0 {
            let used = (blower_rate * dt).min(state.mass_lb * 0.01);
            state.mass_lb -= used;
            state.heat_btu -= used * tables.steam_heat_btu_per_lb(psia);
        }

        // Flue gas relaxes toward the temperature at which tube transfer
        // balances combustion.
        let ua = FLUE_TRANSFER_COEFF * self.evaporation_area_ft2;
        let flue_target_k =
            state.water_temp_k + input.combustion_heat_btu_per_s / ua.max(1e-9);
        state.flue_temp_k += (flue_target_k - state.flue_temp_k) * dt / (FLUE_TAU_S + dt);

        // Evaporation is limited by tube heat transfer.
        let heat_transfer = (ua * (state.flue_temp_k - state.water_temp_k)).max(0.0);
        let latent = tables.evaporation_heat_btu_per_lb(psia);
        let mut evaporation = (heat_transfer / latent).clamp(0.0, self.max_evaporation_lb_per_s);
        if state.plug_blown {
            evaporation = evaporation.min(PLUG_BLOWN_EVAP_LB_PER_S);
        }
        state.evaporation_lb_per_s = evaporation;

        // Combustion heat in, shell radiation out.
        state.heat_btu += input.combustion_heat_btu_per_s * dt;
        let shell_coeff = self.insulated_fraction * RADIATION_INSULATED
            + (1.0 - self.insulated_fraction) * RADIATION_UNINSULATED;
        let convective = 1.0 + RADIATION_SPEED_GAIN * input.speed_m_per_s.abs();
        let radiation_loss = shell_coeff
            * self.evaporation_area_ft2
            * (state.water_temp_k - AMBIENT_K).max(0.0)
            * convective;
        state.heat_btu = (state.heat_btu - radiation_loss * dt).max(0.0);

        // Water level from mass, volume, and the phase densities.
        let rho_water = tables.water_density_lb_per_ft3(psia);
        let rho_steam = tables.steam_density_lb_per_ft3(psia);
        let mean_density = state.mass_lb / self.volume_ft3;
        state.water_fraction = ((mean_density - rho_steam) / (rho_water - rho_steam).max(1e-6))
            .clamp(0.0, 1.01);

        if !state.plug_blown && state.water_fraction <= WATER_MIN_FRACTION {
            state.plug_blown = true;
            events.push(BoilerEvent::FusiblePlugBlown);
        }
        if !state.priming && state.water_fraction > PRIMING_START_FRACTION {
            state.priming = true;
            events.push(BoilerEvent::PrimingStarted);
        } else if state.priming && state.water_fraction < PRIMING_CLEAR_FRACTION {
            state.priming = false;
            events.push(BoilerEvent::PrimingStopped);
        }

        // Temperature integrates the net heat flow since the previous vessel
        // update, which folds in every downstream debit made in between.
        let net_heat_btu = state.heat_btu - state.heat_prev_btu;
        if state.mass_lb > 1.0 {
            let dtemp_f = net_heat_btu / (state.mass_lb * WATER_CP_BTU_PER_LB_F);
            state.water_temp_k += dtemp_f * 5.0 / 9.0;
        }
        state.water_temp_k = state.water_temp_k.clamp(AMBIENT_K, 600.0);
        state.heat_prev_btu = state.heat_btu;

        // Pressure follows the saturation curve at the water temperature.
        let mut pressure =
            (tables.saturation_pressure_psia(state.water_temp_k) - ATMOSPHERE_PSI)
                .clamp(0.0, self.max_pressure_psi + PRESSURE_MARGIN_PSI);
        if state.plug_blown {
            pressure = pressure.min(PLUG_BLOWN_PSI);
        }
        state.pressure_psi = pressure;

        state.heat_smooth.update(state.heat_btu, dt);

        BoilerOutcome {
            safety_valve_steam_lb_per_s: valve_rate,
            blowdown_water_lb_per_s: blowdown_rate,
            blower_steam_lb_per_s: blower_rate,
            radiation_loss_btu_per_s: radiation_loss,
            heat_transfer_btu_per_s: heat_transfer,
        }
    }

    /// Water-gauge glass reading, 0 (bottom nut) to 1 (top nut).
    pub fn gauge_reading(&self, state: &BoilerState) -> Real {
        ((state.water_fraction - GAUGE_BOTTOM_FRACTION)
            / (GAUGE_TOP_FRACTION - GAUGE_BOTTOM_FRACTION))
            .clamp(0.0, 1.0)
    }
}

impl BoilerState {
    /// Absolute pressure, PSIA.
    pub fn psia(&self) -> Real {
        self.pressure_psi + ATMOSPHERE_PSI
    }

    /// Remove dry steam for a consumer. Returns the mass actually granted.
    pub fn debit_steam(&mut self, lb: Real, tables: &SteamTables) -> Real {
        let granted = lb.max(0.0).min(self.mass_lb * 0.05);
        self.mass_lb -= granted;
        self.heat_btu = (self.heat_btu - granted * tables.steam_heat_btu_per_lb(self.psia())).max(0.0);
        granted
    }

    /// Add injector feedwater at the given delivery temperature.
    pub fn credit_feedwater(&mut self, lb: Real, delivery_temp_f: Real) {
        let lb = lb.max(0.0);
        self.mass_lb += lb;
        self.heat_btu += lb * (delivery_temp_f - 32.0).max(0.0) * WATER_CP_BTU_PER_LB_F;
    }
}
