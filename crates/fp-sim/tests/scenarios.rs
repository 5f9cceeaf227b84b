//! End-to-end powerplant scenarios.

use fp_config::{EngineKindDef, LocomotiveSpec, normalize};
use fp_sim::{CabControls, Powerplant, SimEvent, TrainSnapshot};
use proptest::prelude::*;

fn powerplant_with(mutate: impl FnOnce(&mut LocomotiveSpec)) -> Powerplant {
    let mut spec = LocomotiveSpec {
        name: "test".into(),
        ..Default::default()
    };
    mutate(&mut spec);
    let (config, _) = normalize(&spec).unwrap();
    Powerplant::new(config, true).unwrap()
}

fn powerplant() -> Powerplant {
    powerplant_with(|_| {})
}

fn at_rest() -> TrainSnapshot {
    TrainSnapshot::default()
}

fn rolling(speed_m_per_s: f64) -> TrainSnapshot {
    TrainSnapshot {
        speed_m_per_s,
        train_resistance_lbf: 1_500.0,
        ..TrainSnapshot::default()
    }
}

#[test]
fn shut_regulator_at_rest_gives_no_effort_and_floor_usage() {
    let mut plant = powerplant();
    let controls = CabControls::default();
    let floor = 0.001 * plant.config().max_evaporation_lb_per_h / 3_600.0;

    for _ in 0..10 {
        let out = plant.update(0.5, &controls, &at_rest()).unwrap();
        assert_eq!(out.tractive_effort_lbf, 0.0);
        assert_eq!(out.mep_psi, 0.0);
        // A trickle of demand stays on the fire, never zero.
        assert!(out.cylinder_steam_lb_per_s > 0.0);
        assert!((out.cylinder_steam_lb_per_s - floor).abs() < 0.05 * floor);
    }
}

#[test]
fn safety_valves_lift_then_reseat_with_no_discharge_that_tick() {
    let mut plant = powerplant();
    let max = plant.config().max_pressure_psi;

    // Fire hard with nothing drawing steam until the first valve lifts.
    let firing = CabControls {
        manual_firing: true,
        firing_rate: 1.0,
        blower: 1.0,
        damper: 1.0,
        ..CabControls::default()
    };
    let mut lifted = false;
    for _ in 0..20_000 {
        let out = plant.update(0.5, &firing, &at_rest()).unwrap();
        if out.events.contains(&SimEvent::SafetyValveOpened) {
            assert!(out.safety_valve_steam_lb_per_s > 0.0);
            lifted = true;
            break;
        }
    }
    assert!(lifted, "valves never lifted");

    // Drop the fire and open the blowdown; the bank must reseat, and on
    // the tick it closes the discharge is already zero.
    let cooling = CabControls {
        manual_firing: true,
        firing_rate: 0.0,
        blowdown_open: true,
        ..CabControls::default()
    };
    let mut reseated = false;
    for _ in 0..50_000 {
        let out = plant.update(0.5, &cooling, &at_rest()).unwrap();
        if out.events.contains(&SimEvent::SafetyValveClosed)
            && !out.events.contains(&SimEvent::SafetyValveOpened)
            && out.pressure_psi <= max - 4.0 + 1e-6
        {
            assert_eq!(out.safety_valve_steam_lb_per_s, 0.0);
            reseated = true;
            break;
        }
    }
    assert!(reseated, "valves never reseated");
}

#[test]
fn low_water_blows_the_plug_and_the_failure_is_sticky() {
    let mut plant = powerplant();

    // Blow the water down with no feed until the plug lets go.
    let draining = CabControls {
        manual_firing: true,
        firing_rate: 0.2,
        blowdown_open: true,
        ..CabControls::default()
    };
    let mut blown = false;
    for _ in 0..100_000 {
        let out = plant.update(1.0, &draining, &at_rest()).unwrap();
        if out.events.contains(&SimEvent::FusiblePlugBlown) {
            blown = true;
            break;
        }
    }
    assert!(blown, "plug never blew");
    assert!(plant.state().boiler.plug_blown);

    // Refill with both injectors; the level recovers but the failure
    // stays latched.
    let refilling = CabControls {
        injector_on: [true, true],
        injector_fraction: [1.0, 1.0],
        ..CabControls::default()
    };
    let start_fraction = plant.state().boiler.water_fraction;
    for _ in 0..50_000 {
        plant.update(1.0, &refilling, &at_rest()).unwrap();
        if plant.state().boiler.water_fraction > start_fraction + 0.03 {
            break;
        }
    }
    assert!(plant.state().boiler.water_fraction > start_fraction);
    assert!(plant.state().boiler.plug_blown, "plug failure must latch");
}

#[test]
fn compound_working_drives_both_stages_additively() {
    let mut plant = powerplant_with(|s| s.engine.kind = EngineKindDef::Compound);
    let controls = CabControls {
        throttle: 1.0,
        cutoff: 0.5,
        bypass_open: false,
        ..CabControls::default()
    };
    let mut out = None;
    for _ in 0..20 {
        out = Some(plant.update(0.5, &controls, &rolling(6.0)).unwrap());
    }
    let out = out.unwrap();
    assert!(out.mep_psi > 0.0, "hp stage idle");
    assert!(out.lp_mep_psi > 0.0, "lp stage idle");
    // Tractive effort reflects the sum of both stages.
    assert!(out.tractive_effort_lbf > 0.0);
}

#[test]
fn geared_engine_in_neutral_delivers_nothing() {
    let mut plant = powerplant_with(|s| s.engine.kind = EngineKindDef::Geared);
    let open = CabControls {
        throttle: 1.0,
        cutoff: 0.6,
        gear_lever: 0.0,
        ..CabControls::default()
    };
    for _ in 0..10 {
        let out = plant.update(0.5, &open, &rolling(5.0)).unwrap();
        assert_eq!(out.tractive_effort_lbf, 0.0);
        assert_eq!(out.indicated_hp, 0.0);
    }

    // Dropping the lever in couples the engine back up.
    let engaged = CabControls {
        gear_lever: 1.0,
        ..open
    };
    let out = plant.update(0.5, &engaged, &rolling(5.0)).unwrap();
    assert!(out.tractive_effort_lbf > 0.0);
}

#[test]
fn boiler_mass_balances_every_tick() {
    let mut plant = powerplant();
    let dt = 0.5;
    let phases = [
        CabControls {
            throttle: 0.9,
            cutoff: 0.6,
            blower: 0.3,
            ..CabControls::default()
        },
        CabControls {
            throttle: 0.4,
            cutoff: 0.3,
            injector_on: [true, false],
            injector_fraction: [0.8, 0.0],
            cylinder_cocks_open: true,
            ..CabControls::default()
        },
        CabControls {
            blowdown_open: true,
            steam_heat_on: true,
            ..CabControls::default()
        },
    ];

    for controls in &phases {
        for _ in 0..40 {
            let before = plant.state().boiler.mass_lb;
            let out = plant.update(dt, controls, &rolling(10.0)).unwrap();
            let after = plant.state().boiler.mass_lb;

            let injector_steam: f64 =
                out.aux.injectors.iter().map(|i| i.steam_lb_per_s).sum();
            let drawn = out.cylinder_steam_lb_per_s
                + out.aux.total_steam_lb_per_s
                + out.safety_valve_steam_lb_per_s
                + out.blower_steam_lb_per_s
                + out.blowdown_water_lb_per_s;
            let returned = out.aux.feedwater_lb_per_s + injector_steam;
            let expected = before + dt * (returned - drawn);
            assert!(
                (after - expected).abs() < 1e-6 * before.max(1.0),
                "mass imbalance: after={after} expected={expected}"
            );
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn state_stays_bounded_under_arbitrary_driving(
        steps in proptest::collection::vec(
            (0.0f64..1.0, -0.75f64..0.75, 0.0f64..30.0, 0.05f64..1.0),
            60,
        )
    ) {
        let mut plant = powerplant();
        let max_pressure = plant.config().max_pressure_psi;
        let max_fire = plant.config().max_fire_mass_kg;

        for (throttle, cutoff, speed, dt) in steps {
            let controls = CabControls {
                throttle,
                cutoff,
                blower: throttle,
                ..CabControls::default()
            };
            let out = plant.update(dt, &controls, &rolling(speed)).unwrap();
            prop_assert!(out.water_fraction >= 0.0 && out.water_fraction <= 1.01);
            prop_assert!(out.pressure_psi >= 0.0);
            prop_assert!(out.pressure_psi <= max_pressure + 7.0 + 1e-9);
            prop_assert!(out.fire_mass_kg >= 0.0 && out.fire_mass_kg <= max_fire);
            prop_assert!(out.mep_psi >= 0.0);
            prop_assert!(out.lp_mep_psi >= 0.0);
            prop_assert!(out.heat_btu >= 0.0);
        }
    }
}
