//! The powerplant orchestrator.
//!
//! One `update` call advances every component in plumbing order:
//! tender, firebox, boiler vessel, cylinders, motion, auxiliaries, then the
//! bookkeeping the next tick's firing logic needs, and finally the
//! automatic-fireman transition. Ordering matters: stages downstream of the
//! vessel debit steam the same tick, and the vessel folds those debits into
//! its next temperature integration.

use fp_aux::{AuxInputs, AuxOutcome, Auxiliaries, InjectorState, blower_steam_lb_per_s};
use fp_boiler::tender::Tender;
use fp_boiler::{
    Boiler, BoilerEvent, BoilerInputs, Firebox, FireboxInputs, FiremanState, PRIMING_DERATE,
};
use fp_config::{EngineKind, LocomotiveConfig};
use fp_core::Real;
use fp_cylinder::{CylinderGroup, CylinderInputs};
use fp_motion::{Motion, MotionEvent, MotionInputs};
use tracing::{debug, warn};

use crate::controls::{CabControls, TrainSnapshot};
use crate::error::{SimError, SimResult};
use crate::events::SimEvent;
use crate::state::LocomotiveSimState;

/// Longest step the integrators accept; anything larger is clamped.
pub const MAX_DT_S: Real = 1.0;

/// Telemetry for one tick.
#[derive(Clone, Debug, Default)]
pub struct TickOutput {
    // Motion
    pub tractive_effort_lbf: Real,
    pub indicated_hp: Real,
    pub drawbar_pull_lbf: Real,
    pub drawbar_hp: Real,
    pub is_slipping: bool,
    pub wheel_slip_mps: Real,

    // Boiler
    pub pressure_psi: Real,
    /// Water level in the gauge glass, 0..1.
    pub water_gauge: Real,
    pub water_fraction: Real,
    pub heat_btu: Real,
    pub fire_mass_kg: Real,
    pub burn_rate_kg_per_s: Real,

    // Cylinders
    pub mep_psi: Real,
    pub lp_mep_psi: Real,
    pub superheat_k: Real,

    // Steam accounting, lb/s
    pub cylinder_steam_lb_per_s: Real,
    pub safety_valve_steam_lb_per_s: Real,
    pub blower_steam_lb_per_s: Real,
    pub blowdown_water_lb_per_s: Real,
    pub aux: AuxOutcome,
    /// All dry steam drawn this tick.
    pub total_steam_lb_per_s: Real,

    pub events: Vec<SimEvent>,
}

/// A steam locomotive powerplant: configuration-fixed components plus the
/// mutable state aggregate.
#[derive(Clone, Debug)]
pub struct Powerplant {
    config: LocomotiveConfig,
    firebox: Firebox,
    boiler: Boiler,
    tender: Tender,
    cylinders: CylinderGroup,
    motion: Motion,
    aux: Auxiliaries,
    state: LocomotiveSimState,
}

impl Powerplant {
    /// Build a powerplant from a normalized configuration, cold tanks full
    /// and fire lit.
    pub fn new(config: LocomotiveConfig, advanced_adhesion: bool) -> SimResult<Self> {
        let firebox = Firebox::new(&config);
        let boiler = Boiler::new(&config);
        let tender = Tender::new(&config);
        let cylinders = CylinderGroup::new(&config)?;
        let motion = Motion::new(&config, advanced_adhesion)?;
        let aux = Auxiliaries::new(&config);
        let state = LocomotiveSimState {
            boiler: boiler.init_state(&config.tables),
            fire: firebox.init_state(),
            tender: tender.init_state(),
            cylinders: cylinders.init_state(),
            motion: motion.init_state(),
            aux: aux.init_state(),
            fireman: FiremanState::default(),
            heat_out_btu_per_s: 0.0,
            elapsed_s: 0.0,
        };
        Ok(Self {
            config,
            firebox,
            boiler,
            tender,
            cylinders,
            motion,
            aux,
            state,
        })
    }

    pub fn config(&self) -> &LocomotiveConfig {
        &self.config
    }

    pub fn state(&self) -> &LocomotiveSimState {
        &self.state
    }

    /// Direct state access for scenario setup and restore paths.
    pub fn state_mut(&mut self) -> &mut LocomotiveSimState {
        &mut self.state
    }

    /// Advance the whole powerplant by one tick.
    pub fn update(
        &mut self,
        dt_s: Real,
        controls: &CabControls,
        train: &TrainSnapshot,
    ) -> SimResult<TickOutput> {
        if !dt_s.is_finite() || dt_s <= 0.0 {
            return Err(SimError::InvalidArg {
                what: "dt must be positive and finite",
            });
        }
        let dt = dt_s.min(MAX_DT_S);
        let c = controls.clamped(self.config.max_cutoff);
        let st = &mut self.state;
        let tables = &self.config.tables;

        let mut boiler_events: Vec<BoilerEvent> = Vec::new();
        let mut motion_events: Vec<MotionEvent> = Vec::new();
        let mut aux_events = Vec::new();

        // (1) Tender coupling, before anything draws water.
        self.tender.set_aux_coupled(&mut st.tender, c.aux_tender_coupled);

        // (2) Combustion.
        let fire = self.firebox.update(
            &mut st.fire,
            &FireboxInputs {
                dt_s: dt,
                manual_firing: c.manual_firing,
                firing_rate: c.firing_rate,
                blower_fraction: c.blower,
                damper_fraction: c.damper,
                pressure_psi: st.boiler.pressure_psi,
                heat_smooth_btu: st.boiler.heat_smooth.value(),
                heat_full_btu: self.boiler.heat_at_full_pressure_btu(&st.boiler, tables),
                heat_safety_btu: self.boiler.heat_at_safety_pressure_btu(&st.boiler, tables),
                heat_out_btu_per_s: st.heat_out_btu_per_s,
                command: st.fireman.command(),
                plug_blown: st.boiler.plug_blown,
                stoker_fitted: self.config.mechanical_stoker,
            },
            tables,
            &self.tender,
            &mut st.tender,
            &mut boiler_events,
        );

        // (3) The vessel. The blower draw is priced here so the boiler can
        // charge it in the same tick it drives the fire.
        let blower_lb_per_s = blower_steam_lb_per_s(c.blower, st.boiler.psia());
        let vessel = self.boiler.update(
            &mut st.boiler,
            &BoilerInputs {
                dt_s: dt,
                blowdown_open: c.blowdown_open,
                blower_steam_lb_per_s: blower_lb_per_s,
                combustion_heat_btu_per_s: fire.combustion_heat_btu_per_s,
                speed_m_per_s: train.speed_m_per_s,
            },
            tables,
            &mut boiler_events,
        );

        // (4) Cylinders. Slipping wheels pump steam, so the cylinder model
        // sees wheel speed including slip. A geared engine in neutral is
        // uncoupled from the wheels entirely.
        let gear = match self.config.engine_kind {
            EngineKind::Geared => c.gear_lever,
            _ => 1.0,
        };
        let base_revs = train.speed_m_per_s.abs() / self.config.wheel_circumference_m;
        let pumping_revs = gear
            * (base_revs + st.motion.adhesion.slip_speed_mps / self.config.wheel_circumference_m);
        let cyl = self.cylinders.update(
            &mut st.cylinders,
            &CylinderInputs {
                throttle: c.throttle,
                cutoff: c.cutoff,
                wheel_revs_per_s: pumping_revs,
                boiler_pressure_psi: st.boiler.pressure_psi,
                compound_mode: !c.bypass_open,
                cocks_open: c.cylinder_cocks_open,
            },
            tables,
        );
        let cylinder_steam_lb_per_s =
            st.boiler.debit_steam(cyl.steam_usage_lb_per_s * dt, tables) / dt;

        // (5) Motion. Priming carries water into the steam pipe and knocks
        // the effort down until it clears.
        let motive_derate = gear * if st.boiler.priming { PRIMING_DERATE } else { 1.0 };
        self.motion.update(
            &mut st.motion,
            &MotionInputs {
                dt_s: dt,
                mep_psi: cyl.mep_psi,
                lp_mep_psi: cyl.lp_mep_psi,
                cutoff: c.cutoff,
                speed_m_per_s: train.speed_m_per_s,
                wheel_revs_per_s: base_revs,
                train_resistance_lbf: train.train_resistance_lbf,
                rail_friction_factor: train.rail_friction_factor,
                adhesive_weight_lbf: train.adhesive_weight_lbf,
                motive_derate,
            },
            &mut motion_events,
        );

        // (6) Auxiliaries, including the injector/water bookkeeping.
        let aux = self.aux.update(
            &mut st.aux,
            &AuxInputs {
                dt_s: dt,
                injectors: [
                    InjectorState {
                        is_on: c.injector_on[0],
                        fraction_open: c.injector_fraction[0],
                    },
                    InjectorState {
                        is_on: c.injector_on[1],
                        fraction_open: c.injector_fraction[1],
                    },
                ],
                compressor_running: c.compressor_on,
                large_ejector: c.large_ejector_on,
                heating_on: c.steam_heat_on,
                stoker_feed_kg_per_s: fire.feed_rate_kg_per_s,
                cock_steam_lb_per_s: cyl.cock_steam_lb_per_s,
            },
            &mut st.boiler,
            tables,
            &self.tender,
            &mut st.tender,
            &mut boiler_events,
            &mut aux_events,
        );

        // (7) Bookkeeping: the heat leaving the boiler this tick is next
        // tick's demand signal for the automatic fireman.
        let total_steam_lb_per_s = cylinder_steam_lb_per_s
            + aux.total_steam_lb_per_s
            + vessel.safety_valve_steam_lb_per_s
            + vessel.blower_steam_lb_per_s;
        let psia = st.boiler.psia();
        let evaporation_heat = tables.evaporation_heat_btu_per_lb(psia);
        st.heat_out_btu_per_s =
            total_steam_lb_per_s * evaporation_heat + vessel.radiation_loss_btu_per_s;
        st.elapsed_s += dt;

        // (8) Fireman state transition, on the pressure the tick settled on.
        st.fireman
            .update(dt, st.boiler.pressure_psi, self.config.max_pressure_psi);

        let mut events: Vec<SimEvent> =
            boiler_events.drain(..).map(SimEvent::from).collect();
        events.extend(motion_events.drain(..).map(SimEvent::from));
        events.extend(aux_events.drain(..).map(SimEvent::from));
        for event in &events {
            match event {
                SimEvent::FusiblePlugBlown
                | SimEvent::FireDropped
                | SimEvent::CoalExhausted
                | SimEvent::WaterExhausted => {
                    warn!(?event, elapsed_s = st.elapsed_s, "powerplant failure edge");
                }
                _ => debug!(?event, elapsed_s = st.elapsed_s, "powerplant event"),
            }
        }

        Ok(TickOutput {
            tractive_effort_lbf: st.motion.tractive_effort_lbf,
            indicated_hp: st.motion.indicated_hp,
            drawbar_pull_lbf: st.motion.drawbar_pull_lbf,
            drawbar_hp: st.motion.drawbar_hp,
            is_slipping: st.motion.adhesion.is_slipping,
            wheel_slip_mps: st.motion.adhesion.slip_speed_mps,
            pressure_psi: st.boiler.pressure_psi,
            water_gauge: self.boiler.gauge_reading(&st.boiler),
            water_fraction: st.boiler.water_fraction,
            heat_btu: st.boiler.heat_btu,
            fire_mass_kg: st.fire.fire_mass_kg,
            burn_rate_kg_per_s: st.fire.burn_rate_kg_per_s,
            mep_psi: cyl.mep_psi,
            lp_mep_psi: cyl.lp_mep_psi,
            superheat_k: cyl.superheat_k,
            cylinder_steam_lb_per_s,
            safety_valve_steam_lb_per_s: vessel.safety_valve_steam_lb_per_s,
            blower_steam_lb_per_s: vessel.blower_steam_lb_per_s,
            blowdown_water_lb_per_s: vessel.blowdown_water_lb_per_s,
            aux,
            total_steam_lb_per_s,
            events,
        })
    }
}
