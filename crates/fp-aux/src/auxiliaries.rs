//! Per-tick auxiliary pass.
//!
//! Runs after the cylinders and motion: both injectors, the brake feed
//! (air pump or vacuum ejectors by fitting), turbo-generator, mechanical
//! stoker, train heating, and the cylinder-cock venting the cylinder model
//! already priced. Every consumer debits boiler mass and heat through the
//! vessel's steam-debit path and accumulates into the tick total the
//! safety-valve logic and telemetry read. The blower is the one exception:
//! its rate is computed before the vessel update (see
//! [`crate::consumers::blower_steam_lb_per_s`]) so the boiler can charge it
//! in the same tick it drives the fire.

use fp_boiler::tender::{Tender, TenderState};
use fp_boiler::{BoilerEvent, BoilerState};
use fp_config::{BrakeFeed, LocomotiveConfig};
use fp_core::Real;
use fp_steam::SteamTables;

use crate::consumers;
use crate::injector::{Injector, InjectorState, InjectorTick};

/// Edge-triggered auxiliary notifications.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AuxEvent {
    InjectorStarted { index: usize },
    InjectorStopped { index: usize },
}

/// Persistent auxiliary state: the two injector settings.
#[derive(Clone, Copy, Debug, Default)]
pub struct AuxState {
    pub injectors: [InjectorState; 2],
}

/// Cab and upstream inputs for the auxiliary pass.
#[derive(Clone, Copy, Debug)]
pub struct AuxInputs {
    pub dt_s: Real,
    /// Requested injector settings, already clamped by the cab layer.
    pub injectors: [InjectorState; 2],
    /// Brake system charging (air-brake engines).
    pub compressor_running: bool,
    /// Large ejector in steam (vacuum-brake engines).
    pub large_ejector: bool,
    pub heating_on: bool,
    /// Coal actually fed by the stoker this tick, kg/s.
    pub stoker_feed_kg_per_s: Real,
    /// Cock venting priced by the cylinder model, lb/s.
    pub cock_steam_lb_per_s: Real,
}

/// Per-consumer rates for the tick, lb/s.
#[derive(Clone, Copy, Debug, Default)]
pub struct AuxOutcome {
    pub injectors: [InjectorTick; 2],
    pub compressor_lb_per_s: Real,
    pub ejector_lb_per_s: Real,
    pub generator_lb_per_s: Real,
    pub stoker_lb_per_s: Real,
    pub heating_lb_per_s: Real,
    pub cock_lb_per_s: Real,
    /// Dry steam drawn by everything above.
    pub total_steam_lb_per_s: Real,
    /// Feedwater put in by the injectors.
    pub feedwater_lb_per_s: Real,
}

#[derive(Clone, Debug)]
pub struct Auxiliaries {
    injector: Injector,
    brake_feed: BrakeFeed,
    turbo_generator: bool,
    steam_heat_fitted: bool,
    mechanical_stoker: bool,
}

impl Auxiliaries {
    pub fn new(config: &LocomotiveConfig) -> Self {
        Self {
            injector: Injector::new(config.injector_size_mm),
            brake_feed: config.brake_feed,
            turbo_generator: config.turbo_generator,
            steam_heat_fitted: config.steam_heat_fitted,
            mechanical_stoker: config.mechanical_stoker,
        }
    }

    pub fn init_state(&self) -> AuxState {
        AuxState::default()
    }

    pub fn update(
        &self,
        state: &mut AuxState,
        inputs: &AuxInputs,
        boiler: &mut BoilerState,
        tables: &SteamTables,
        tender: &Tender,
        tender_state: &mut TenderState,
        boiler_events: &mut Vec<BoilerEvent>,
        events: &mut Vec<AuxEvent>,
    ) -> AuxOutcome {
        let dt = inputs.dt_s.max(0.0);
        let mut out = AuxOutcome::default();
        if dt <= 0.0 {
            return out;
        }
        let psia = boiler.psia();

        for (i, requested) in inputs.injectors.iter().enumerate() {
            if requested.is_on != state.injectors[i].is_on {
                events.push(if requested.is_on {
                    AuxEvent::InjectorStarted { index: i }
                } else {
                    AuxEvent::InjectorStopped { index: i }
                });
            }
            state.injectors[i] = *requested;
            out.injectors[i] = self.injector.update(
                &state.injectors[i],
                dt,
                boiler,
                tables,
                tender,
                tender_state,
                boiler_events,
            );
            out.total_steam_lb_per_s += out.injectors[i].steam_lb_per_s;
            out.feedwater_lb_per_s += out.injectors[i].water_lb_per_s;
        }

        let mut draw = |demand_lb_per_s: Real, boiler: &mut BoilerState| -> Real {
            if demand_lb_per_s <= 0.0 {
                return 0.0;
            }
            boiler.debit_steam(demand_lb_per_s * dt, tables) / dt
        };

        match self.brake_feed {
            BrakeFeed::AirCompressor => {
                out.compressor_lb_per_s = draw(
                    consumers::compressor_steam_lb_per_s(inputs.compressor_running),
                    boiler,
                );
            }
            BrakeFeed::VacuumEjector => {
                out.ejector_lb_per_s = draw(
                    consumers::ejector_steam_lb_per_s(inputs.large_ejector, psia),
                    boiler,
                );
            }
        }
        out.generator_lb_per_s =
            draw(consumers::generator_steam_lb_per_s(self.turbo_generator), boiler);
        if self.mechanical_stoker {
            out.stoker_lb_per_s = draw(
                consumers::stoker_steam_lb_per_s(inputs.stoker_feed_kg_per_s),
                boiler,
            );
        }
        if self.steam_heat_fitted {
            out.heating_lb_per_s =
                draw(consumers::heating_steam_lb_per_s(inputs.heating_on), boiler);
        }
        out.cock_lb_per_s = draw(inputs.cock_steam_lb_per_s, boiler);

        out.total_steam_lb_per_s += out.compressor_lb_per_s
            + out.ejector_lb_per_s
            + out.generator_lb_per_s
            + out.stoker_lb_per_s
            + out.heating_lb_per_s
            + out.cock_lb_per_s;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_boiler::{Boiler, Tender};
    use fp_config::{BrakeFeedDef, LocomotiveSpec, normalize};

    fn config(mutate: impl FnOnce(&mut LocomotiveSpec)) -> LocomotiveConfig {
        let mut spec = LocomotiveSpec {
            name: "test".into(),
            ..Default::default()
        };
        mutate(&mut spec);
        normalize(&spec).unwrap().0
    }

    fn inputs() -> AuxInputs {
        AuxInputs {
            dt_s: 1.0,
            injectors: [InjectorState::default(); 2],
            compressor_running: false,
            large_ejector: false,
            heating_on: false,
            stoker_feed_kg_per_s: 0.0,
            cock_steam_lb_per_s: 0.0,
        }
    }

    fn run(cfg: &LocomotiveConfig, aux_inputs: &AuxInputs) -> (AuxOutcome, Real) {
        let aux = Auxiliaries::new(cfg);
        let tender = Tender::new(cfg);
        let mut boiler = Boiler::new(cfg).init_state(&cfg.tables);
        let mut tender_state = tender.init_state();
        let mut state = aux.init_state();
        let before = boiler.mass_lb;
        let out = aux.update(
            &mut state,
            aux_inputs,
            &mut boiler,
            &cfg.tables,
            &tender,
            &mut tender_state,
            &mut Vec::new(),
            &mut Vec::new(),
        );
        (out, before - boiler.mass_lb)
    }

    #[test]
    fn everything_idle_draws_only_the_standing_loads() {
        let cfg = config(|s| {
            s.auxiliaries.brakes = BrakeFeedDef::AirCompressor;
            s.auxiliaries.turbo_generator = false;
            s.auxiliaries.steam_heat = false;
        });
        let (out, mass_drop) = run(&cfg, &inputs());
        assert_eq!(out.total_steam_lb_per_s, 0.0);
        assert_eq!(mass_drop, 0.0);
    }

    #[test]
    fn vacuum_engine_always_feeds_the_small_ejector() {
        let cfg = config(|s| {
            s.auxiliaries.brakes = BrakeFeedDef::VacuumEjector;
            s.auxiliaries.turbo_generator = false;
            s.auxiliaries.steam_heat = false;
        });
        let (quiet, _) = run(&cfg, &inputs());
        assert!(quiet.ejector_lb_per_s > 0.0);
        assert_eq!(quiet.compressor_lb_per_s, 0.0);

        let (release, _) = run(
            &cfg,
            &AuxInputs {
                large_ejector: true,
                ..inputs()
            },
        );
        assert!(release.ejector_lb_per_s > quiet.ejector_lb_per_s);
    }

    #[test]
    fn air_engine_runs_the_pump_only_while_charging() {
        let cfg = config(|s| {
            s.auxiliaries.brakes = BrakeFeedDef::AirCompressor;
        });
        let (idle, _) = run(&cfg, &inputs());
        assert_eq!(idle.compressor_lb_per_s, 0.0);
        let (charging, _) = run(
            &cfg,
            &AuxInputs {
                compressor_running: true,
                ..inputs()
            },
        );
        assert!(charging.compressor_lb_per_s > 0.0);
        assert_eq!(charging.ejector_lb_per_s, 0.0);
    }

    #[test]
    fn debits_balance_the_boiler_mass() {
        let cfg = config(|s| {
            s.auxiliaries.brakes = BrakeFeedDef::VacuumEjector;
            s.auxiliaries.turbo_generator = true;
            s.auxiliaries.steam_heat = true;
        });
        let (out, mass_drop) = run(
            &cfg,
            &AuxInputs {
                large_ejector: true,
                heating_on: true,
                cock_steam_lb_per_s: 0.3,
                ..inputs()
            },
        );
        // No injectors running, so the mass drop is exactly the dry steam
        // drawn.
        assert!(out.total_steam_lb_per_s > 0.3);
        assert!((mass_drop - out.total_steam_lb_per_s).abs() < 1e-9);
    }

    #[test]
    fn injector_toggle_raises_one_edge_each_way() {
        let cfg = config(|_| {});
        let aux = Auxiliaries::new(&cfg);
        let tender = Tender::new(&cfg);
        let mut boiler = Boiler::new(&cfg).init_state(&cfg.tables);
        let mut tender_state = tender.init_state();
        let mut state = aux.init_state();
        let mut events = Vec::new();

        let on = AuxInputs {
            injectors: [
                InjectorState {
                    is_on: true,
                    fraction_open: 1.0,
                },
                InjectorState::default(),
            ],
            ..inputs()
        };
        aux.update(
            &mut state,
            &on,
            &mut boiler,
            &cfg.tables,
            &tender,
            &mut tender_state,
            &mut Vec::new(),
            &mut events,
        );
        assert_eq!(events, vec![AuxEvent::InjectorStarted { index: 0 }]);

        // Held on: no repeat.
        events.clear();
        aux.update(
            &mut state,
            &on,
            &mut boiler,
            &cfg.tables,
            &tender,
            &mut tender_state,
            &mut Vec::new(),
            &mut events,
        );
        assert!(events.is_empty());

        events.clear();
        aux.update(
            &mut state,
            &inputs(),
            &mut boiler,
            &cfg.tables,
            &tender,
            &mut tender_state,
            &mut Vec::new(),
            &mut events,
        );
        assert_eq!(events, vec![AuxEvent::InjectorStopped { index: 0 }]);
    }

    #[test]
    fn stoker_steam_follows_the_coal_feed() {
        let cfg = config(|s| {
            s.tender.mechanical_stoker = true;
        });
        let (idle, _) = run(&cfg, &inputs());
        assert_eq!(idle.stoker_lb_per_s, 0.0);
        let (feeding, _) = run(
            &cfg,
            &AuxInputs {
                stoker_feed_kg_per_s: 0.8,
                ..inputs()
            },
        );
        assert!(feeding.stoker_lb_per_s > 0.0);
    }
}
