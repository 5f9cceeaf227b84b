//! Locomotive definition schema.
//!
//! The on-disk YAML format. Every section and nearly every field is
//! defaulted so partial definitions load cleanly; a value of zero on a
//! critical quantity means "not given" and is replaced during
//! normalization with a documented default plus a warning.
//!
//! Dimensions are SI (metres, kilograms, kilojoules) except boiler
//! pressures, which follow locomotive practice and are gauge PSI.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct LocomotiveSpec {
    pub name: String,
    pub engine: EngineDef,
    pub running_gear: RunningGearDef,
    pub boiler: BoilerDef,
    pub tender: TenderDef,
    pub auxiliaries: AuxiliaryDef,
    pub curves: CurveSetDef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EngineKindDef {
    #[default]
    Simple,
    Compound,
    Geared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoilerKindDef {
    #[default]
    Saturated,
    Superheated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BrakeFeedDef {
    #[default]
    AirCompressor,
    VacuumEjector,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct EngineDef {
    pub kind: EngineKindDef,
    /// Cylinders per crank set: 2 or 3. For a compound this is the number
    /// of high-pressure cylinders; each is paired with one low-pressure
    /// cylinder.
    pub cylinder_count: u32,
    pub bore_m: f64,
    pub stroke_m: f64,
    /// Clearance (port and piston-end) volume as a fraction of swept volume.
    pub clearance_fraction: f64,
    /// Longest admission the valve gear allows, as a fraction of stroke.
    pub max_cutoff: f64,
    /// Wire-drawing strength at short admissions; dimensionless, around 0.1.
    pub port_opening_factor: f64,
    /// Low-pressure cylinder bore (compound only).
    pub lp_bore_m: f64,
    pub lp_clearance_fraction: f64,
    /// Receiver volume between the stages as a multiple of high-pressure
    /// swept volume (compound only).
    pub receiver_volume_ratio: f64,
    /// Crank revolutions per wheel revolution (geared only).
    pub gear_ratio: f64,
    /// Piston speed above which a geared engine can no longer admit
    /// steam effectively (geared only), m/s.
    pub max_piston_speed_m_per_s: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct RunningGearDef {
    pub drive_wheel_diameter_m: f64,
    pub locomotive_mass_kg: f64,
    /// Mass carried on the driven axles.
    pub adhesive_mass_kg: f64,
    /// Reciprocating mass (piston, rod, crosshead) per cylinder line.
    pub reciprocating_mass_kg: f64,
    /// Portion of the reciprocating mass balanced in the wheels; drives the
    /// vertical hammer-blow component at speed.
    pub excess_balance_kg: f64,
    /// Static rail-to-wheel friction coefficient.
    pub friction_coefficient: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct BoilerDef {
    pub kind: BoilerKindDef,
    /// Working pressure, gauge PSI.
    pub max_pressure_psi: f64,
    pub volume_m3: f64,
    pub evaporation_area_m2: f64,
    /// Superheater element area (superheated boilers only).
    pub superheat_area_m2: f64,
    pub grate_area_m2: f64,
    /// Calorific value of the fuel as fired.
    pub fuel_energy_kj_per_kg: f64,
    /// Peak evaporation per unit of evaporation area. Zero selects a
    /// default by boiler kind.
    pub max_evaporation_lb_per_ft2_h: f64,
    /// Starting gauge pressure; zero starts at working pressure.
    pub initial_pressure_psi: f64,
    /// Starting water level as a fraction of boiler volume.
    pub initial_water_fraction: f64,
    /// Fraction of the shell that is lagged.
    pub insulated_fraction: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct TenderDef {
    pub coal_capacity_kg: f64,
    pub water_capacity_kg: f64,
    /// Water carried in an auxiliary tender, if any. Zero means none.
    pub aux_water_capacity_kg: f64,
    pub mechanical_stoker: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AuxiliaryDef {
    pub brakes: BrakeFeedDef,
    pub turbo_generator: bool,
    pub steam_heat: bool,
    /// Injector cone diameter in mm. Zero picks the smallest ladder size
    /// whose paired delivery exceeds the boiler's maximum output.
    pub injector_size_mm: f64,
}

/// Optional calibration curve overrides. Points are `[x, y]` pairs with
/// strictly increasing `x`; an omitted curve is synthesized from the
/// locomotive geometry and reported once at load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CurveSetDef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boiler_efficiency: Option<Vec<[f64; 2]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cylinder_condensation: Option<Vec<[f64; 2]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superheat_temp_rise: Option<Vec<[f64; 2]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_pressure: Option<Vec<[f64; 2]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub injector_delivery_temp: Option<Vec<[f64; 2]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_pressure_drop: Option<GridDef>,
}

/// Rectangular grid override for the admission pressure-drop surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GridDef {
    /// Wheel revolutions per second breakpoints.
    pub revs_per_s: Vec<f64>,
    /// Cutoff breakpoints.
    pub cutoff: Vec<f64>,
    /// Retained pressure fraction, one row per `revs_per_s` entry.
    pub values: Vec<Vec<f64>>,
}
