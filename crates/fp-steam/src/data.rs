//! Baked reference data for saturated steam.
//!
//! Values are standard published saturation-table figures (imperial), one row
//! per pressure breakpoint. Enthalpies are referenced to liquid water at
//! 32 °F, the usual convention for these tables.

/// One saturation-table row at a given absolute pressure.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SatRow {
    /// Absolute pressure, PSIA
    pub psia: f64,
    /// Saturation temperature, °F
    pub temp_f: f64,
    /// Enthalpy of saturated liquid (hf), BTU/lb
    pub water_heat_btu_per_lb: f64,
    /// Latent heat of vaporization (hfg), BTU/lb
    pub evap_heat_btu_per_lb: f64,
    /// Specific volume of saturated vapor (vg), ft³/lb
    pub steam_volume_ft3_per_lb: f64,
    /// Density of saturated liquid, lb/ft³
    pub water_density_lb_per_ft3: f64,
}

pub(crate) const SATURATION_ROWS: &[SatRow] = &[
    SatRow { psia: 0.5, temp_f: 79.58, water_heat_btu_per_lb: 47.62, evap_heat_btu_per_lb: 1048.6, steam_volume_ft3_per_lb: 641.4, water_density_lb_per_ft3: 62.22 },
    SatRow { psia: 1.0, temp_f: 101.74, water_heat_btu_per_lb: 69.70, evap_heat_btu_per_lb: 1036.3, steam_volume_ft3_per_lb: 333.6, water_density_lb_per_ft3: 61.97 },
    SatRow { psia: 2.0, temp_f: 126.08, water_heat_btu_per_lb: 93.99, evap_heat_btu_per_lb: 1022.2, steam_volume_ft3_per_lb: 173.73, water_density_lb_per_ft3: 61.61 },
    SatRow { psia: 5.0, temp_f: 162.24, water_heat_btu_per_lb: 130.13, evap_heat_btu_per_lb: 1001.0, steam_volume_ft3_per_lb: 73.52, water_density_lb_per_ft3: 60.95 },
    SatRow { psia: 10.0, temp_f: 193.21, water_heat_btu_per_lb: 161.17, evap_heat_btu_per_lb: 982.1, steam_volume_ft3_per_lb: 38.42, water_density_lb_per_ft3: 60.28 },
    SatRow { psia: 14.696, temp_f: 212.00, water_heat_btu_per_lb: 180.07, evap_heat_btu_per_lb: 970.3, steam_volume_ft3_per_lb: 26.80, water_density_lb_per_ft3: 59.81 },
    SatRow { psia: 20.0, temp_f: 227.96, water_heat_btu_per_lb: 196.16, evap_heat_btu_per_lb: 960.1, steam_volume_ft3_per_lb: 20.089, water_density_lb_per_ft3: 59.42 },
    SatRow { psia: 30.0, temp_f: 250.33, water_heat_btu_per_lb: 218.82, evap_heat_btu_per_lb: 945.3, steam_volume_ft3_per_lb: 13.746, water_density_lb_per_ft3: 58.79 },
    SatRow { psia: 40.0, temp_f: 267.25, water_heat_btu_per_lb: 236.03, evap_heat_btu_per_lb: 933.7, steam_volume_ft3_per_lb: 10.498, water_density_lb_per_ft3: 58.30 },
    SatRow { psia: 50.0, temp_f: 281.01, water_heat_btu_per_lb: 250.09, evap_heat_btu_per_lb: 924.0, steam_volume_ft3_per_lb: 8.515, water_density_lb_per_ft3: 57.89 },
    SatRow { psia: 60.0, temp_f: 292.71, water_heat_btu_per_lb: 262.09, evap_heat_btu_per_lb: 915.5, steam_volume_ft3_per_lb: 7.175, water_density_lb_per_ft3: 57.53 },
    SatRow { psia: 70.0, temp_f: 302.92, water_heat_btu_per_lb: 272.61, evap_heat_btu_per_lb: 907.9, steam_volume_ft3_per_lb: 6.206, water_density_lb_per_ft3: 57.20 },
    SatRow { psia: 80.0, temp_f: 312.03, water_heat_btu_per_lb: 282.02, evap_heat_btu_per_lb: 901.1, steam_volume_ft3_per_lb: 5.472, water_density_lb_per_ft3: 56.91 },
    SatRow { psia: 90.0, temp_f: 320.27, water_heat_btu_per_lb: 290.56, evap_heat_btu_per_lb: 894.7, steam_volume_ft3_per_lb: 4.896, water_density_lb_per_ft3: 56.63 },
    SatRow { psia: 100.0, temp_f: 327.81, water_heat_btu_per_lb: 298.40, evap_heat_btu_per_lb: 888.8, steam_volume_ft3_per_lb: 4.432, water_density_lb_per_ft3: 56.37 },
    SatRow { psia: 120.0, temp_f: 341.25, water_heat_btu_per_lb: 312.44, evap_heat_btu_per_lb: 877.9, steam_volume_ft3_per_lb: 3.728, water_density_lb_per_ft3: 55.89 },
    SatRow { psia: 140.0, temp_f: 353.02, water_heat_btu_per_lb: 324.82, evap_heat_btu_per_lb: 868.2, steam_volume_ft3_per_lb: 3.220, water_density_lb_per_ft3: 55.46 },
    SatRow { psia: 160.0, temp_f: 363.53, water_heat_btu_per_lb: 335.93, evap_heat_btu_per_lb: 859.2, steam_volume_ft3_per_lb: 2.834, water_density_lb_per_ft3: 55.06 },
    SatRow { psia: 180.0, temp_f: 373.06, water_heat_btu_per_lb: 346.03, evap_heat_btu_per_lb: 850.8, steam_volume_ft3_per_lb: 2.532, water_density_lb_per_ft3: 54.70 },
    SatRow { psia: 200.0, temp_f: 381.79, water_heat_btu_per_lb: 355.36, evap_heat_btu_per_lb: 843.0, steam_volume_ft3_per_lb: 2.288, water_density_lb_per_ft3: 54.35 },
    SatRow { psia: 250.0, temp_f: 400.95, water_heat_btu_per_lb: 376.00, evap_heat_btu_per_lb: 825.1, steam_volume_ft3_per_lb: 1.8438, water_density_lb_per_ft3: 53.58 },
    SatRow { psia: 300.0, temp_f: 417.33, water_heat_btu_per_lb: 393.84, evap_heat_btu_per_lb: 809.0, steam_volume_ft3_per_lb: 1.5433, water_density_lb_per_ft3: 52.92 },
];

/// Boiler efficiency against firing rate (lb dry coal per ft² of grate per
/// hour). The fall-off past ~120 lb/ft²/h is the grate-limit region.
pub(crate) const BOILER_EFFICIENCY_DEFAULT: &[(f64, f64)] = &[
    (0.0, 0.86),
    (20.0, 0.78),
    (40.0, 0.72),
    (60.0, 0.67),
    (80.0, 0.62),
    (100.0, 0.56),
    (120.0, 0.51),
    (140.0, 0.45),
    (160.0, 0.40),
    (180.0, 0.35),
    (200.0, 0.30),
    (240.0, 0.22),
    (300.0, 0.15),
];

/// Fraction of admitted steam condensed on saturated cylinder walls, by
/// cutoff. Short cutoffs expose proportionally more wall area per lb of
/// steam admitted.
pub(crate) const CYLINDER_CONDENSATION_DEFAULT: &[(f64, f64)] = &[
    (0.10, 0.32),
    (0.20, 0.28),
    (0.30, 0.24),
    (0.40, 0.21),
    (0.50, 0.18),
    (0.60, 0.16),
    (0.70, 0.15),
    (0.85, 0.14),
];

/// Injector delivery-water temperature (°F) by boiler pressure (PSIA).
/// Live-steam injectors heat the feed progressively with pressure.
pub(crate) const INJECTOR_DELIVERY_TEMP_DEFAULT: &[(f64, f64)] = &[
    (0.0, 120.0),
    (30.0, 150.0),
    (60.0, 160.0),
    (90.0, 170.0),
    (120.0, 180.0),
    (150.0, 190.0),
    (180.0, 200.0),
    (210.0, 205.0),
    (250.0, 210.0),
    (300.0, 215.0),
];

/// Exhaust back pressure (PSI gauge) against developed power fraction.
pub(crate) const BACK_PRESSURE_DEFAULT: &[(f64, f64)] = &[
    (0.0, 1.0),
    (0.2, 2.0),
    (0.4, 4.0),
    (0.6, 7.5),
    (0.8, 13.0),
    (1.0, 22.0),
];
