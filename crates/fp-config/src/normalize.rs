//! Normalization of raw locomotive definitions.
//!
//! `normalize` turns a [`LocomotiveSpec`] straight off disk into a
//! [`LocomotiveConfig`] the powerplant can run: gaps filled with documented
//! defaults, dubious values clamped, derived geometry computed once, and the
//! steam table set built. Nothing here is fatal short of an I/O-level
//! problem; every substitution is returned as a [`ConfigWarning`] so the
//! caller can report it exactly once.

use crate::ConfigResult;
use crate::schema::{
    BoilerKindDef, BrakeFeedDef, CurveSetDef, EngineKindDef, GridDef, LocomotiveSpec,
};
use fp_core::{Real, kg_to_lb, m2_to_ft2};
use fp_steam::{
    Curve, Curve2, Grid2, SteamTables, TableGeometry, TableOverrides, TableSubstitution,
};

/// Working engine arrangement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineKind {
    Simple,
    Compound,
    Geared,
}

impl From<EngineKindDef> for EngineKind {
    fn from(def: EngineKindDef) -> Self {
        match def {
            EngineKindDef::Simple => EngineKind::Simple,
            EngineKindDef::Compound => EngineKind::Compound,
            EngineKindDef::Geared => EngineKind::Geared,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoilerKind {
    Saturated,
    Superheated,
}

impl From<BoilerKindDef> for BoilerKind {
    fn from(def: BoilerKindDef) -> Self {
        match def {
            BoilerKindDef::Saturated => BoilerKind::Saturated,
            BoilerKindDef::Superheated => BoilerKind::Superheated,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrakeFeed {
    AirCompressor,
    VacuumEjector,
}

impl From<BrakeFeedDef> for BrakeFeed {
    fn from(def: BrakeFeedDef) -> Self {
        match def {
            BrakeFeedDef::AirCompressor => BrakeFeed::AirCompressor,
            BrakeFeedDef::VacuumEjector => BrakeFeed::VacuumEjector,
        }
    }
}

/// Something `normalize` changed or filled in. Never fatal.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    #[error("locomotive has no name; calling it \"{0}\"")]
    Unnamed(String),

    #[error("{field} missing or zero; using {value}")]
    CriticalDefaulted { field: &'static str, value: f64 },

    #[error("{field} = {given} outside [{min}, {max}]; clamped")]
    OutOfRange {
        field: &'static str,
        given: f64,
        min: f64,
        max: f64,
    },

    #[error("superheat area given on a saturated boiler; ignored")]
    SuperheatAreaIgnored,

    #[error("no {0} curve supplied; synthesized from boiler geometry")]
    TableSynthesized(TableSubstitution),

    #[error("{which} curve override rejected ({reason}); synthesized instead")]
    TableOverrideRejected { which: &'static str, reason: String },

    #[error("largest injectors ({size_mm} mm) deliver less than peak evaporation")]
    InjectorsUndersized { size_mm: f64 },
}

// Defaults applied silently (non-critical fields).
const DEFAULT_CLEARANCE_FRACTION: Real = 0.08;
const DEFAULT_MAX_CUTOFF: Real = 0.75;
const DEFAULT_PORT_OPENING_FACTOR: Real = 0.10;
const DEFAULT_RECEIVER_VOLUME_RATIO: Real = 1.5;
const DEFAULT_GEAR_RATIO: Real = 2.5;
const DEFAULT_MAX_PISTON_SPEED_M_PER_S: Real = 3.6;
const DEFAULT_LOCOMOTIVE_MASS_KG: Real = 80_000.0;
const DEFAULT_ADHESIVE_FRACTION: Real = 0.65;
const DEFAULT_RECIPROCATING_MASS_KG: Real = 290.0;
const DEFAULT_EXCESS_BALANCE_FRACTION: Real = 0.4;
const DEFAULT_FRICTION_COEFFICIENT: Real = 0.33;
const DEFAULT_FUEL_ENERGY_KJ_PER_KG: Real = 33_400.0;
const DEFAULT_INITIAL_WATER_FRACTION: Real = 0.83;
const DEFAULT_INSULATED_FRACTION: Real = 0.86;
const DEFAULT_COAL_CAPACITY_KG: Real = 8_000.0;
const DEFAULT_WATER_CAPACITY_KG: Real = 22_700.0;

// Defaults applied with a warning (critical fields).
const DEFAULT_CYLINDER_COUNT: u32 = 2;
const DEFAULT_BORE_M: Real = 0.508;
const DEFAULT_STROKE_M: Real = 0.660;
const DEFAULT_LP_BORE_RATIO: Real = 1.5;
const DEFAULT_WHEEL_DIAMETER_M: Real = 1.52;
const DEFAULT_MAX_PRESSURE_PSI: Real = 200.0;
const DEFAULT_BOILER_VOLUME_M3: Real = 14.0;
const DEFAULT_EVAPORATION_AREA_M2: Real = 190.0;
const DEFAULT_SUPERHEAT_AREA_RATIO: Real = 0.3;
const DEFAULT_GRATE_AREA_M2: Real = 3.7;

// Peak evaporation per square foot of evaporation area.
const EVAP_RATE_SATURATED_LB_PER_FT2_H: Real = 12.5;
const EVAP_RATE_SUPERHEATED_LB_PER_FT2_H: Real = 15.0;

// Steam per indicated horsepower-hour, used to cap developed power.
const STEAM_PER_IHP_H_SATURATED_LB: Real = 26.0;
const STEAM_PER_IHP_H_SUPERHEATED_LB: Real = 19.0;

// Fire bed sizing: a level bed of this surface density burns cleanly.
const IDEAL_FIRE_BED_KG_PER_M2: Real = 120.0;
const MAX_FIRE_BED_RATIO: Real = 2.0;

// Safety valve bank relieves this multiple of peak evaporation.
const SAFETY_VALVE_BANK_FACTOR: Real = 1.75;

// Blowdown valve flow as a fraction of peak evaporation.
const BLOWDOWN_RATE_FRACTION: Real = 0.2;

/// Injector cone sizes manufactured for the ladder, mm.
pub const INJECTOR_SIZES_MM: [Real; 6] = [9.0, 10.0, 11.0, 13.0, 14.0, 15.0];

// Injector delivery scales with cone area and the square root of the
// absolute steam pressure driving it.
const INJECTOR_FLOW_COEFF: Real = 9.0;

/// Peak delivery of one injector of the given cone size at the given
/// absolute steam pressure, lb/h.
pub fn injector_max_flow_lb_per_h(size_mm: Real, psia: Real) -> Real {
    INJECTOR_FLOW_COEFF * size_mm * size_mm * psia.max(0.0).sqrt()
}

/// A locomotive definition after normalization: no zero critical fields, all
/// derived geometry computed, steam tables built. Immutable at runtime.
#[derive(Clone, Debug)]
pub struct LocomotiveConfig {
    pub name: String,

    // Engine
    pub engine_kind: EngineKind,
    pub cylinder_count: u32,
    pub bore_m: Real,
    pub stroke_m: Real,
    pub clearance_fraction: Real,
    pub max_cutoff: Real,
    pub port_opening_factor: Real,
    pub piston_area_m2: Real,
    pub swept_volume_m3: Real,
    pub lp_bore_m: Real,
    pub lp_clearance_fraction: Real,
    pub lp_piston_area_m2: Real,
    pub lp_swept_volume_m3: Real,
    pub receiver_volume_m3: Real,
    pub gear_ratio: Real,
    pub max_piston_speed_m_per_s: Real,

    // Running gear
    pub drive_wheel_diameter_m: Real,
    pub wheel_circumference_m: Real,
    pub locomotive_mass_kg: Real,
    pub adhesive_mass_kg: Real,
    pub reciprocating_mass_kg: Real,
    pub excess_balance_kg: Real,
    pub friction_coefficient: Real,

    // Boiler
    pub boiler_kind: BoilerKind,
    pub max_pressure_psi: Real,
    pub boiler_volume_m3: Real,
    pub evaporation_area_m2: Real,
    pub superheat_area_m2: Real,
    pub grate_area_m2: Real,
    pub fuel_energy_kj_per_kg: Real,
    pub max_evaporation_lb_per_h: Real,
    pub ideal_fire_mass_kg: Real,
    pub max_fire_mass_kg: Real,
    pub safety_valve_count: u32,
    /// Discharge capacity of one valve, lb/s.
    pub safety_valve_capacity_lb_per_s: Real,
    pub blowdown_rate_lb_per_s: Real,
    pub max_indicated_hp: Real,
    pub initial_pressure_psi: Real,
    pub initial_water_fraction: Real,
    pub insulated_fraction: Real,

    // Tender
    pub coal_capacity_kg: Real,
    pub water_capacity_lb: Real,
    pub aux_water_capacity_lb: Real,
    pub mechanical_stoker: bool,

    // Auxiliaries
    pub brake_feed: BrakeFeed,
    pub turbo_generator: bool,
    pub steam_heat_fitted: bool,
    pub injector_size_mm: Real,

    pub tables: SteamTables,
}

fn usable(value: Real) -> bool {
    value.is_finite() && value > 0.0
}

fn pick(given: Real, default: Real) -> Real {
    if usable(given) { given } else { default }
}

fn pick_warn(
    warnings: &mut Vec<ConfigWarning>,
    field: &'static str,
    given: Real,
    default: Real,
) -> Real {
    if usable(given) {
        given
    } else {
        warnings.push(ConfigWarning::CriticalDefaulted {
            field,
            value: default,
        });
        default
    }
}

fn clamp_warn(
    warnings: &mut Vec<ConfigWarning>,
    field: &'static str,
    given: Real,
    min: Real,
    max: Real,
) -> Real {
    if given < min || given > max {
        warnings.push(ConfigWarning::OutOfRange {
            field,
            given,
            min,
            max,
        });
        given.clamp(min, max)
    } else {
        given
    }
}

fn circle_area_m2(diameter_m: Real) -> Real {
    std::f64::consts::PI / 4.0 * diameter_m * diameter_m
}

fn curve_points(
    warnings: &mut Vec<ConfigWarning>,
    which: &'static str,
    raw: &Option<Vec<[f64; 2]>>,
) -> Option<Vec<(Real, Real)>> {
    let raw = raw.as_ref()?;
    let points: Vec<(Real, Real)> = raw.iter().map(|p| (p[0], p[1])).collect();
    match Curve::new(&points) {
        Ok(_) => Some(points),
        Err(err) => {
            warnings.push(ConfigWarning::TableOverrideRejected {
                which,
                reason: err.to_string(),
            });
            None
        }
    }
}

fn grid_points(warnings: &mut Vec<ConfigWarning>, raw: &Option<GridDef>) -> Option<Grid2> {
    let raw = raw.as_ref()?;
    let grid = Grid2 {
        xs: raw.revs_per_s.clone(),
        ys: raw.cutoff.clone(),
        zs: raw.values.clone(),
    };
    match Curve2::new(grid.xs.clone(), grid.ys.clone(), grid.zs.clone()) {
        Ok(_) => Some(grid),
        Err(err) => {
            warnings.push(ConfigWarning::TableOverrideRejected {
                which: "initial_pressure_drop",
                reason: err.to_string(),
            });
            None
        }
    }
}

fn table_overrides(warnings: &mut Vec<ConfigWarning>, curves: &CurveSetDef) -> TableOverrides {
    TableOverrides {
        boiler_efficiency: curve_points(warnings, "boiler_efficiency", &curves.boiler_efficiency),
        cylinder_condensation: curve_points(
            warnings,
            "cylinder_condensation",
            &curves.cylinder_condensation,
        ),
        superheat_temp_rise: curve_points(
            warnings,
            "superheat_temp_rise",
            &curves.superheat_temp_rise,
        ),
        back_pressure: curve_points(warnings, "back_pressure", &curves.back_pressure),
        injector_delivery_temp: curve_points(
            warnings,
            "injector_delivery_temp",
            &curves.injector_delivery_temp,
        ),
        initial_pressure_drop: grid_points(warnings, &curves.initial_pressure_drop),
    }
}

/// Valves fitted by evaporation area: small boilers carry two, large four.
fn safety_valve_count_for(evaporation_area_ft2: Real) -> u32 {
    if evaporation_area_ft2 < 1_500.0 {
        2
    } else if evaporation_area_ft2 < 2_600.0 {
        3
    } else {
        4
    }
}

fn choose_injector_size(
    warnings: &mut Vec<ConfigWarning>,
    requested_mm: Real,
    max_output_lb_per_h: Real,
    max_pressure_psia: Real,
) -> Real {
    if usable(requested_mm) {
        // Snap an explicit request to the nearest manufactured size.
        return INJECTOR_SIZES_MM
            .iter()
            .copied()
            .min_by(|a, b| {
                (a - requested_mm)
                    .abs()
                    .total_cmp(&(b - requested_mm).abs())
            })
            .unwrap_or(INJECTOR_SIZES_MM[0]);
    }
    // Smallest size whose pair just exceeds peak evaporation.
    for size in INJECTOR_SIZES_MM {
        if 2.0 * injector_max_flow_lb_per_h(size, max_pressure_psia) >= max_output_lb_per_h {
            return size;
        }
    }
    let largest = INJECTOR_SIZES_MM[INJECTOR_SIZES_MM.len() - 1];
    warnings.push(ConfigWarning::InjectorsUndersized { size_mm: largest });
    largest
}

/// Normalize a raw definition. Returns the runnable configuration and every
/// substitution made along the way, in the order they were applied.
pub fn normalize(spec: &LocomotiveSpec) -> ConfigResult<(LocomotiveConfig, Vec<ConfigWarning>)> {
    let mut warnings = Vec::new();

    let name = if spec.name.trim().is_empty() {
        let fallback = "locomotive".to_string();
        warnings.push(ConfigWarning::Unnamed(fallback.clone()));
        fallback
    } else {
        spec.name.trim().to_string()
    };

    // Engine geometry.
    let e = &spec.engine;
    let engine_kind = EngineKind::from(e.kind);
    let cylinder_count = match e.cylinder_count {
        0 => {
            warnings.push(ConfigWarning::CriticalDefaulted {
                field: "engine.cylinder_count",
                value: DEFAULT_CYLINDER_COUNT as f64,
            });
            DEFAULT_CYLINDER_COUNT
        }
        n @ (2 | 3) => n,
        n => {
            warnings.push(ConfigWarning::OutOfRange {
                field: "engine.cylinder_count",
                given: n as f64,
                min: 2.0,
                max: 3.0,
            });
            n.clamp(2, 3)
        }
    };
    let bore_m = pick_warn(&mut warnings, "engine.bore_m", e.bore_m, DEFAULT_BORE_M);
    let stroke_m = pick_warn(
        &mut warnings,
        "engine.stroke_m",
        e.stroke_m,
        DEFAULT_STROKE_M,
    );
    let clearance_fraction = clamp_warn(
        &mut warnings,
        "engine.clearance_fraction",
        pick(e.clearance_fraction, DEFAULT_CLEARANCE_FRACTION),
        0.02,
        0.25,
    );
    let max_cutoff = clamp_warn(
        &mut warnings,
        "engine.max_cutoff",
        pick(e.max_cutoff, DEFAULT_MAX_CUTOFF),
        0.5,
        0.9,
    );
    let port_opening_factor = clamp_warn(
        &mut warnings,
        "engine.port_opening_factor",
        pick(e.port_opening_factor, DEFAULT_PORT_OPENING_FACTOR),
        0.0,
        0.5,
    );

    let (lp_bore_m, lp_clearance_fraction) = if engine_kind == EngineKind::Compound {
        (
            pick_warn(
                &mut warnings,
                "engine.lp_bore_m",
                e.lp_bore_m,
                DEFAULT_LP_BORE_RATIO * bore_m,
            ),
            pick(e.lp_clearance_fraction, DEFAULT_CLEARANCE_FRACTION),
        )
    } else {
        (0.0, 0.0)
    };
    let receiver_volume_ratio = pick(e.receiver_volume_ratio, DEFAULT_RECEIVER_VOLUME_RATIO);
    let gear_ratio = if engine_kind == EngineKind::Geared {
        pick(e.gear_ratio, DEFAULT_GEAR_RATIO)
    } else {
        1.0
    };
    let max_piston_speed_m_per_s = pick(
        e.max_piston_speed_m_per_s,
        DEFAULT_MAX_PISTON_SPEED_M_PER_S,
    );

    let piston_area_m2 = circle_area_m2(bore_m);
    let swept_volume_m3 = piston_area_m2 * stroke_m;
    let lp_piston_area_m2 = circle_area_m2(lp_bore_m);
    let lp_swept_volume_m3 = lp_piston_area_m2 * stroke_m;
    let receiver_volume_m3 = receiver_volume_ratio * swept_volume_m3;

    // Running gear.
    let g = &spec.running_gear;
    let drive_wheel_diameter_m = pick_warn(
        &mut warnings,
        "running_gear.drive_wheel_diameter_m",
        g.drive_wheel_diameter_m,
        DEFAULT_WHEEL_DIAMETER_M,
    );
    let wheel_circumference_m = std::f64::consts::PI * drive_wheel_diameter_m;
    let locomotive_mass_kg = pick(g.locomotive_mass_kg, DEFAULT_LOCOMOTIVE_MASS_KG);
    let adhesive_mass_kg = clamp_warn(
        &mut warnings,
        "running_gear.adhesive_mass_kg",
        pick(
            g.adhesive_mass_kg,
            DEFAULT_ADHESIVE_FRACTION * locomotive_mass_kg,
        ),
        0.1 * locomotive_mass_kg,
        locomotive_mass_kg,
    );
    let reciprocating_mass_kg = pick(g.reciprocating_mass_kg, DEFAULT_RECIPROCATING_MASS_KG);
    let excess_balance_kg = pick(
        g.excess_balance_kg,
        DEFAULT_EXCESS_BALANCE_FRACTION * reciprocating_mass_kg,
    );
    let friction_coefficient = clamp_warn(
        &mut warnings,
        "running_gear.friction_coefficient",
        pick(g.friction_coefficient, DEFAULT_FRICTION_COEFFICIENT),
        0.05,
        0.6,
    );

    // Boiler.
    let b = &spec.boiler;
    let boiler_kind = BoilerKind::from(b.kind);
    let max_pressure_psi = pick_warn(
        &mut warnings,
        "boiler.max_pressure_psi",
        b.max_pressure_psi,
        DEFAULT_MAX_PRESSURE_PSI,
    );
    let max_pressure_psi = clamp_warn(
        &mut warnings,
        "boiler.max_pressure_psi",
        max_pressure_psi,
        50.0,
        285.0,
    );
    let boiler_volume_m3 = pick_warn(
        &mut warnings,
        "boiler.volume_m3",
        b.volume_m3,
        DEFAULT_BOILER_VOLUME_M3,
    );
    let evaporation_area_m2 = pick_warn(
        &mut warnings,
        "boiler.evaporation_area_m2",
        b.evaporation_area_m2,
        DEFAULT_EVAPORATION_AREA_M2,
    );
    let superheat_area_m2 = match boiler_kind {
        BoilerKind::Saturated => {
            if usable(b.superheat_area_m2) {
                warnings.push(ConfigWarning::SuperheatAreaIgnored);
            }
            0.0
        }
        BoilerKind::Superheated => pick_warn(
            &mut warnings,
            "boiler.superheat_area_m2",
            b.superheat_area_m2,
            DEFAULT_SUPERHEAT_AREA_RATIO * evaporation_area_m2,
        ),
    };
    let grate_area_m2 = pick_warn(
        &mut warnings,
        "boiler.grate_area_m2",
        b.grate_area_m2,
        DEFAULT_GRATE_AREA_M2,
    );
    let fuel_energy_kj_per_kg = pick(b.fuel_energy_kj_per_kg, DEFAULT_FUEL_ENERGY_KJ_PER_KG);

    let default_evap_rate = match boiler_kind {
        BoilerKind::Saturated => EVAP_RATE_SATURATED_LB_PER_FT2_H,
        BoilerKind::Superheated => EVAP_RATE_SUPERHEATED_LB_PER_FT2_H,
    };
    let evap_rate_lb_per_ft2_h = pick(b.max_evaporation_lb_per_ft2_h, default_evap_rate);
    let evaporation_area_ft2 = m2_to_ft2(evaporation_area_m2);
    let max_evaporation_lb_per_h = evap_rate_lb_per_ft2_h * evaporation_area_ft2;

    let ideal_fire_mass_kg = IDEAL_FIRE_BED_KG_PER_M2 * grate_area_m2;
    let max_fire_mass_kg = MAX_FIRE_BED_RATIO * ideal_fire_mass_kg;

    let safety_valve_count = safety_valve_count_for(evaporation_area_ft2);
    let safety_valve_capacity_lb_per_s = SAFETY_VALVE_BANK_FACTOR * max_evaporation_lb_per_h
        / 3_600.0
        / safety_valve_count as Real;
    let blowdown_rate_lb_per_s = BLOWDOWN_RATE_FRACTION * max_evaporation_lb_per_h / 3_600.0;

    let steam_per_ihp_h = match boiler_kind {
        BoilerKind::Saturated => STEAM_PER_IHP_H_SATURATED_LB,
        BoilerKind::Superheated => STEAM_PER_IHP_H_SUPERHEATED_LB,
    };
    let max_indicated_hp = max_evaporation_lb_per_h / steam_per_ihp_h;

    let initial_pressure_psi = clamp_warn(
        &mut warnings,
        "boiler.initial_pressure_psi",
        pick(b.initial_pressure_psi, max_pressure_psi),
        0.0,
        max_pressure_psi,
    );
    let initial_water_fraction = clamp_warn(
        &mut warnings,
        "boiler.initial_water_fraction",
        pick(b.initial_water_fraction, DEFAULT_INITIAL_WATER_FRACTION),
        0.7,
        0.91,
    );
    let insulated_fraction = clamp_warn(
        &mut warnings,
        "boiler.insulated_fraction",
        pick(b.insulated_fraction, DEFAULT_INSULATED_FRACTION),
        0.0,
        1.0,
    );

    // Tender.
    let t = &spec.tender;
    let coal_capacity_kg = pick(t.coal_capacity_kg, DEFAULT_COAL_CAPACITY_KG);
    let water_capacity_lb = kg_to_lb(pick(t.water_capacity_kg, DEFAULT_WATER_CAPACITY_KG));
    let aux_water_capacity_lb = if usable(t.aux_water_capacity_kg) {
        kg_to_lb(t.aux_water_capacity_kg)
    } else {
        0.0
    };

    // Auxiliaries.
    let a = &spec.auxiliaries;
    let injector_size_mm = choose_injector_size(
        &mut warnings,
        a.injector_size_mm,
        max_evaporation_lb_per_h,
        max_pressure_psi + fp_core::constants::ATMOSPHERE_PSI,
    );

    // Steam tables.
    let geom = TableGeometry {
        max_boiler_pressure_psi: max_pressure_psi,
        evaporation_area_m2,
        superheat_area_m2,
        grate_area_m2,
    };
    let overrides = table_overrides(&mut warnings, &spec.curves);
    let (tables, substituted) = SteamTables::build(&geom, &overrides)?;
    for sub in substituted {
        warnings.push(ConfigWarning::TableSynthesized(sub));
    }

    let config = LocomotiveConfig {
        name,
        engine_kind,
        cylinder_count,
        bore_m,
        stroke_m,
        clearance_fraction,
        max_cutoff,
        port_opening_factor,
        piston_area_m2,
        swept_volume_m3,
        lp_bore_m,
        lp_clearance_fraction,
        lp_piston_area_m2,
        lp_swept_volume_m3,
        receiver_volume_m3,
        gear_ratio,
        max_piston_speed_m_per_s,
        drive_wheel_diameter_m,
        wheel_circumference_m,
        locomotive_mass_kg,
        adhesive_mass_kg,
        reciprocating_mass_kg,
        excess_balance_kg,
        friction_coefficient,
        boiler_kind,
        max_pressure_psi,
        boiler_volume_m3,
        evaporation_area_m2,
        superheat_area_m2,
        grate_area_m2,
        fuel_energy_kj_per_kg,
        max_evaporation_lb_per_h,
        ideal_fire_mass_kg,
        max_fire_mass_kg,
        safety_valve_count,
        safety_valve_capacity_lb_per_s,
        blowdown_rate_lb_per_s,
        max_indicated_hp,
        initial_pressure_psi,
        initial_water_fraction,
        insulated_fraction,
        coal_capacity_kg,
        water_capacity_lb,
        aux_water_capacity_lb,
        mechanical_stoker: t.mechanical_stoker,
        brake_feed: BrakeFeed::from(a.brakes),
        turbo_generator: a.turbo_generator,
        steam_heat_fitted: a.steam_heat,
        injector_size_mm,
        tables,
    };

    Ok((config, warnings))
}
