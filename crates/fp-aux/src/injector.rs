//! Live-steam injectors.
//!
//! Each injector drives tender water into the boiler with a cone of boiler
//! steam. Delivery scales with the cone size chosen at configuration time
//! and the square root of boiler pressure; the motive steam condenses into
//! the feed, so the water arrives hot (delivery temperature from the
//! tables) and costs a fixed fraction of the delivered mass in dry steam.

use fp_boiler::tender::{Tender, TenderState};
use fp_boiler::{BoilerEvent, BoilerState};
use fp_config::injector_max_flow_lb_per_h;
use fp_core::{Real, clamp_unit};
use fp_steam::SteamTables;

/// Motive steam drawn per lb of water delivered.
const MOTIVE_STEAM_FRACTION: Real = 0.08;

/// Cab-side state of one injector.
#[derive(Clone, Copy, Debug, Default)]
pub struct InjectorState {
    pub is_on: bool,
    pub fraction_open: Real,
}

/// One injector's consumption for the tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct InjectorTick {
    pub water_lb_per_s: Real,
    pub steam_lb_per_s: Real,
    pub delivery_temp_f: Real,
}

#[derive(Clone, Copy, Debug)]
pub struct Injector {
    size_mm: Real,
}

impl Injector {
    pub fn new(size_mm: Real) -> Self {
        Self { size_mm }
    }

    /// Run one injector for one tick: draw tender water, spend boiler
    /// steam, and put the combined feed back into the boiler.
    pub fn update(
        &self,
        state: &InjectorState,
        dt_s: Real,
        boiler: &mut BoilerState,
        tables: &SteamTables,
        tender: &Tender,
        tender_state: &mut TenderState,
        events: &mut Vec<BoilerEvent>,
    ) -> InjectorTick {
        if !state.is_on || state.fraction_open <= 0.0 || dt_s <= 0.0 {
            return InjectorTick::default();
        }
        let psia = boiler.psia();
        let demand_lb = clamp_unit(state.fraction_open)
            * injector_max_flow_lb_per_h(self.size_mm, psia)
            / 3_600.0
            * dt_s;
        let water_lb = tender.consume_water(tender_state, demand_lb, events);
        if water_lb <= 0.0 {
            // Tank dry: the injector knocks off and consumes nothing.
            return InjectorTick::default();
        }
        let steam_lb = boiler.debit_steam(MOTIVE_STEAM_FRACTION * water_lb, tables);
        let delivery_temp_f = tables.injector_delivery_temp_f(psia);
        boiler.credit_feedwater(water_lb + steam_lb, delivery_temp_f);

        InjectorTick {
            water_lb_per_s: water_lb / dt_s,
            steam_lb_per_s: steam_lb / dt_s,
            delivery_temp_f,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_boiler::{Boiler, Tender};
    use fp_config::{LocomotiveSpec, normalize};

    fn rig() -> (fp_config::LocomotiveConfig, BoilerState, TenderState) {
        let spec = LocomotiveSpec {
            name: "test".into(),
            ..Default::default()
        };
        let cfg = normalize(&spec).unwrap().0;
        let boiler_state = Boiler::new(&cfg).init_state(&cfg.tables);
        let tender_state = Tender::new(&cfg).init_state();
        (cfg, boiler_state, tender_state)
    }

    #[test]
    fn idle_injector_moves_nothing() {
        let (cfg, mut boiler, mut tender_state) = rig();
        let tender = Tender::new(&cfg);
        let injector = Injector::new(cfg.injector_size_mm);
        let before = boiler.mass_lb;
        let tick = injector.update(
            &InjectorState::default(),
            1.0,
            &mut boiler,
            &cfg.tables,
            &tender,
            &mut tender_state,
            &mut Vec::new(),
        );
        assert_eq!(tick.water_lb_per_s, 0.0);
        assert_eq!(boiler.mass_lb, before);
    }

    #[test]
    fn open_injector_feeds_the_boiler_and_drains_the_tender() {
        let (cfg, mut boiler, mut tender_state) = rig();
        let tender = Tender::new(&cfg);
        let injector = Injector::new(cfg.injector_size_mm);
        let boiler_before = boiler.mass_lb;
        let tank_before = tender_state.water_lb;
        let tick = injector.update(
            &InjectorState {
                is_on: true,
                fraction_open: 1.0,
            },
            1.0,
            &mut boiler,
            &cfg.tables,
            &tender,
            &mut tender_state,
            &mut Vec::new(),
        );
        assert!(tick.water_lb_per_s > 0.0);
        assert!(tick.steam_lb_per_s > 0.0);
        // Steam spent condenses back into the feed: boiler mass rises by
        // exactly the tender water drawn.
        let drawn = tank_before - tender_state.water_lb;
        assert!((boiler.mass_lb - boiler_before - drawn).abs() < 1e-9);
        // The feed arrives well above tank temperature.
        assert!(tick.delivery_temp_f > 150.0);
    }

    #[test]
    fn half_open_delivers_half_the_flow() {
        let (cfg, mut boiler, mut tender_state) = rig();
        let tender = Tender::new(&cfg);
        let injector = Injector::new(cfg.injector_size_mm);
        let psia = boiler.psia();
        let tick = injector.update(
            &InjectorState {
                is_on: true,
                fraction_open: 0.5,
            },
            1.0,
            &mut boiler,
            &cfg.tables,
            &tender,
            &mut tender_state,
            &mut Vec::new(),
        );
        let expected = 0.5 * injector_max_flow_lb_per_h(cfg.injector_size_mm, psia) / 3_600.0;
        assert!((tick.water_lb_per_s - expected).abs() < 1e-9);
    }

    #[test]
    fn dry_tank_knocks_the_injector_off() {
        let (cfg, mut boiler, mut tender_state) = rig();
        let tender = Tender::new(&cfg);
        tender_state.water_lb = 0.0;
        tender_state.aux_water_lb = 0.0;
        let injector = Injector::new(cfg.injector_size_mm);
        let before = boiler.mass_lb;
        let tick = injector.update(
            &InjectorState {
                is_on: true,
                fraction_open: 1.0,
            },
            1.0,
            &mut boiler,
            &cfg.tables,
            &tender,
            &mut tender_state,
            &mut Vec::new(),
        );
        assert_eq!(tick.water_lb_per_s, 0.0);
        assert_eq!(tick.steam_lb_per_s, 0.0);
        assert_eq!(boiler.mass_lb, before);
    }
}
