//! Built-table behavior across the public surface.

use fp_steam::{
    Curve2Id, CurveId, SteamTables, TableGeometry, TableOverrides, TableSubstitution,
};

fn superheated_geom() -> TableGeometry {
    TableGeometry {
        max_boiler_pressure_psi: 225.0,
        evaporation_area_m2: 200.0,
        superheat_area_m2: 70.0,
        grate_area_m2: 4.2,
    }
}

#[test]
fn saturation_matches_published_figures() {
    let tables = SteamTables::standard(&superheated_geom()).unwrap();

    // Atmospheric boiling point.
    let atm_k = tables.saturation_temp_k(14.696);
    assert!((atm_k - 373.15).abs() < 0.5, "got {atm_k}");

    // 100 psia saturates near 327.8 °F.
    let t100_k = tables.saturation_temp_k(100.0);
    let t100_f = (t100_k - 273.15) * 1.8 + 32.0;
    assert!((t100_f - 327.8).abs() < 2.0, "got {t100_f}");

    // hfg at atmosphere is about 970 BTU/lb and falls with pressure.
    let hfg_atm = tables.evaporation_heat_btu_per_lb(14.696);
    assert!((hfg_atm - 970.3).abs() < 5.0, "got {hfg_atm}");
    assert!(tables.evaporation_heat_btu_per_lb(250.0) < hfg_atm);
}

#[test]
fn saturation_temp_and_pressure_are_mutual_inverses() {
    let tables = SteamTables::standard(&superheated_geom()).unwrap();
    for psia in [15.0, 30.0, 60.0, 100.0, 150.0, 200.0, 250.0] {
        let temp_k = tables.saturation_temp_k(psia);
        let back = tables.saturation_pressure_psia(temp_k);
        assert!(
            (back - psia).abs() < 0.02 * psia,
            "psia {psia} -> {temp_k} K -> {back}"
        );
    }
}

#[test]
fn lookups_clamp_at_the_table_edges() {
    let tables = SteamTables::standard(&superheated_geom()).unwrap();
    for id in [
        CurveId::SaturationTempK,
        CurveId::WaterHeatBtuPerLb,
        CurveId::SteamHeatBtuPerLb,
        CurveId::SteamDensityLbPerFt3,
        CurveId::WaterDensityLbPerFt3,
    ] {
        assert_eq!(tables.lookup(id, -10.0), tables.lookup(id, 0.0));
        assert_eq!(tables.lookup(id, 5_000.0), tables.lookup(id, 400.0));
    }
    // The admission-drop surface clamps on both axes.
    let corner = tables.lookup2(Curve2Id::InitialPressureDropRatio, 50.0, 2.0);
    let edge = tables.lookup2(Curve2Id::InitialPressureDropRatio, 12.0, 0.9);
    assert_eq!(corner, edge);
}

#[test]
fn repeated_lookups_are_idempotent() {
    let tables = SteamTables::standard(&superheated_geom()).unwrap();
    for psia in [0.5, 14.696, 87.3, 199.9, 300.0] {
        let first = tables.steam_heat_btu_per_lb(psia);
        for _ in 0..10 {
            assert_eq!(tables.steam_heat_btu_per_lb(psia), first);
        }
    }
}

#[test]
fn densities_trend_correctly_with_pressure() {
    let tables = SteamTables::standard(&superheated_geom()).unwrap();
    let mut prev_steam = 0.0;
    for psia in [15.0, 50.0, 100.0, 200.0, 300.0] {
        let steam = tables.steam_density_lb_per_ft3(psia);
        let water = tables.water_density_lb_per_ft3(psia);
        assert!(steam > prev_steam, "steam density must rise with pressure");
        assert!(water > 50.0 && water < 61.0);
        prev_steam = steam;
    }
}

#[test]
fn omitted_curves_are_reported_once_each() {
    let (_, substituted) =
        SteamTables::build(&superheated_geom(), &TableOverrides::default()).unwrap();
    assert!(
        substituted.contains(&TableSubstitution::Curve(CurveId::BoilerEfficiency))
    );
    assert!(
        substituted.contains(&TableSubstitution::Curve(CurveId::BackPressurePsi))
    );
    let mut seen = substituted.clone();
    seen.sort_by_key(|s| format!("{s}"));
    seen.dedup();
    assert_eq!(seen.len(), substituted.len());
}

#[test]
fn an_override_drops_out_of_the_substitution_list() {
    let overrides = TableOverrides {
        boiler_efficiency: Some(vec![(10.0, 0.85), (100.0, 0.65), (180.0, 0.45)]),
        ..TableOverrides::default()
    };
    let (tables, substituted) = SteamTables::build(&superheated_geom(), &overrides).unwrap();
    assert!(
        !substituted.contains(&TableSubstitution::Curve(CurveId::BoilerEfficiency))
    );
    assert!((tables.boiler_efficiency(10.0) - 0.85).abs() < 1e-12);
}

#[test]
fn superheater_area_drives_the_synthesized_rise() {
    let hot = SteamTables::standard(&superheated_geom()).unwrap();
    let saturated = SteamTables::standard(&TableGeometry {
        superheat_area_m2: 0.0,
        ..superheated_geom()
    })
    .unwrap();
    assert!(hot.superheat_rise_k(0.5) > 50.0);
    assert_eq!(saturated.superheat_rise_k(0.5), 0.0);
}
