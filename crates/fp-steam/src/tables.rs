//! The steam property table set.
//!
//! All thermodynamic and calibration relations used by the powerplant are
//! collected here behind dense curve identifiers (no string keys). Tables
//! are built once from baked saturation data plus locomotive-specific curves,
//! and are immutable afterwards; every lookup is a pure function.
//!
//! Pressure convention: table abscissae are absolute (PSIA). Callers holding
//! gauge pressure add one atmosphere at the call site.

use crate::curve::{Curve, Curve2};
use crate::data;
use crate::error::SteamResult;
use crate::synth;
use fp_core::{deg_f_to_k, Real};

/// Identifier for a one-dimensional table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CurveId {
    /// PSIA → saturation temperature, K
    SaturationTempK,
    /// Water temperature K → saturation pressure, PSIA
    SaturationPressurePsia,
    /// PSIA → enthalpy of saturated liquid, BTU/lb
    WaterHeatBtuPerLb,
    /// PSIA → enthalpy of saturated vapor, BTU/lb
    SteamHeatBtuPerLb,
    /// PSIA → saturated vapor density, lb/ft³
    SteamDensityLbPerFt3,
    /// PSIA → saturated liquid density, lb/ft³
    WaterDensityLbPerFt3,
    /// PSIA → injector delivery-water temperature, °F
    InjectorDeliveryTempF,
    /// lb coal / ft² grate / h → boiler efficiency fraction
    BoilerEfficiency,
    /// cutoff → fraction of admitted steam condensed (saturated cylinders)
    CylinderCondensationFraction,
    /// cylinder flow fraction of max → superheat rise above saturation, K
    SuperheatTempRiseK,
    /// developed power fraction of max → exhaust back pressure, PSI gauge
    BackPressurePsi,
}

/// Identifier for a two-dimensional table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Curve2Id {
    /// (wheel rev/s, cutoff) → retained fraction of steam-chest pressure
    InitialPressureDropRatio,
}

/// Record of a curve the configuration omitted and geometry synthesized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableSubstitution {
    Curve(CurveId),
    Surface(Curve2Id),
}

impl std::fmt::Display for TableSubstitution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableSubstitution::Curve(id) => write!(f, "{id:?}"),
            TableSubstitution::Surface(id) => write!(f, "{id:?}"),
        }
    }
}

/// Geometry inputs for synthesized default curves.
#[derive(Clone, Copy, Debug)]
pub struct TableGeometry {
    pub max_boiler_pressure_psi: Real,
    pub evaporation_area_m2: Real,
    pub superheat_area_m2: Real,
    pub grate_area_m2: Real,
}

/// Raw breakpoints for a rectangular grid override.
#[derive(Clone, Debug, Default)]
pub struct Grid2 {
    pub xs: Vec<Real>,
    pub ys: Vec<Real>,
    pub zs: Vec<Vec<Real>>,
}

/// Locomotive-specific curve overrides; `None` selects the synthesized
/// default and records a substitution.
#[derive(Clone, Debug, Default)]
pub struct TableOverrides {
    pub boiler_efficiency: Option<Vec<(Real, Real)>>,
    pub cylinder_condensation: Option<Vec<(Real, Real)>>,
    pub superheat_temp_rise: Option<Vec<(Real, Real)>>,
    pub back_pressure: Option<Vec<(Real, Real)>>,
    pub injector_delivery_temp: Option<Vec<(Real, Real)>>,
    pub initial_pressure_drop: Option<Grid2>,
}

/// Immutable table set. Thread-safe by construction (no interior mutation).
#[derive(Clone, Debug)]
pub struct SteamTables {
    saturation_temp_k: Curve,
    saturation_pressure_psia: Curve,
    water_heat: Curve,
    steam_heat: Curve,
    steam_density: Curve,
    water_density: Curve,
    injector_delivery_temp: Curve,
    boiler_efficiency: Curve,
    cylinder_condensation: Curve,
    superheat_temp_rise: Curve,
    back_pressure: Curve,
    initial_pressure_drop: Curve2,
}

impl SteamTables {
    /// Build the table set. Omitted overrides fall back to curves synthesized
    /// from `geom`; each fallback is reported so the configuration loader can
    /// warn once.
    pub fn build(
        geom: &TableGeometry,
        overrides: &TableOverrides,
    ) -> SteamResult<(Self, Vec<TableSubstitution>)> {
        let mut substituted = Vec::new();

        let saturation_temp_k = Curve::new(
            &data::SATURATION_ROWS
                .iter()
                .map(|r| (r.psia, deg_f_to_k(r.temp_f)))
                .collect::<Vec<_>>(),
        )?;
        let saturation_pressure_psia = saturation_temp_k.inverted()?;
        let water_heat = Curve::new(
            &data::SATURATION_ROWS
                .iter()
                .map(|r| (r.psia, r.water_heat_btu_per_lb))
                .collect::<Vec<_>>(),
        )?;
        let steam_heat = Curve::new(
            &data::SATURATION_ROWS
                .iter()
                .map(|r| (r.psia, r.water_heat_btu_per_lb + r.evap_heat_btu_per_lb))
                .collect::<Vec<_>>(),
        )?;
        let steam_density = Curve::new(
            &data::SATURATION_ROWS
                .iter()
                .map(|r| (r.psia, 1.0 / r.steam_volume_ft3_per_lb))
                .collect::<Vec<_>>(),
        )?;
        let water_density = Curve::new(
            &data::SATURATION_ROWS
                .iter()
                .map(|r| (r.psia, r.water_density_lb_per_ft3))
                .collect::<Vec<_>>(),
        )?;

        let boiler_efficiency = match &overrides.boiler_efficiency {
            Some(points) => Curve::new(points)?,
            None => {
                substituted.push(TableSubstitution::Curve(CurveId::BoilerEfficiency));
                Curve::new(data::BOILER_EFFICIENCY_DEFAULT)?
            }
        };
        let cylinder_condensation = match &overrides.cylinder_condensation {
            Some(points) => Curve::new(points)?,
            None => {
                substituted.push(TableSubstitution::Curve(
                    CurveId::CylinderCondensationFraction,
                ));
                Curve::new(data::CYLINDER_CONDENSATION_DEFAULT)?
            }
        };
        let superheat_temp_rise = match &overrides.superheat_temp_rise {
            Some(points) => Curve::new(points)?,
            None => {
                substituted.push(TableSubstitution::Curve(CurveId::SuperheatTempRiseK));
                Curve::new(&synth::superheat_temp_rise(geom))?
            }
        };
        let back_pressure = match &overrides.back_pressure {
            Some(points) => Curve::new(points)?,
            None => {
                substituted.push(TableSubstitution::Curve(CurveId::BackPressurePsi));
                Curve::new(data::BACK_PRESSURE_DEFAULT)?
            }
        };
        let injector_delivery_temp = match &overrides.injector_delivery_temp {
            Some(points) => Curve::new(points)?,
            None => {
                substituted.push(TableSubstitution::Curve(CurveId::InjectorDeliveryTempF));
                Curve::new(data::INJECTOR_DELIVERY_TEMP_DEFAULT)?
            }
        };
        let initial_pressure_drop = match &overrides.initial_pressure_drop {
            Some(grid) => Curve2::new(grid.xs.clone(), grid.ys.clone(), grid.zs.clone())?,
            None => {
                substituted.push(TableSubstitution::Surface(Curve2Id::InitialPressureDropRatio));
                let (xs, ys, zs) = synth::initial_pressure_drop_grid();
                Curve2::new(xs, ys, zs)?
            }
        };

        Ok((
            Self {
                saturation_temp_k,
                saturation_pressure_psia,
                water_heat,
                steam_heat,
                steam_density,
                water_density,
                injector_delivery_temp,
                boiler_efficiency,
                cylinder_condensation,
                superheat_temp_rise,
                back_pressure,
                initial_pressure_drop,
            },
            substituted,
        ))
    }

    /// Build with all defaults (tests and tools).
    pub fn standard(geom: &TableGeometry) -> SteamResult<Self> {
        Ok(Self::build(geom, &TableOverrides::default())?.0)
    }

    /// Generic 1D lookup, clamped at the table domain.
    pub fn lookup(&self, id: CurveId, x: Real) -> Real {
        self.curve(id).eval(x)
    }

    /// Generic 2D lookup, clamped at the grid edges.
    pub fn lookup2(&self, id: Curve2Id, x: Real, y: Real) -> Real {
        match id {
            Curve2Id::InitialPressureDropRatio => self.initial_pressure_drop.eval(x, y),
        }
    }

    fn curve(&self, id: CurveId) -> &Curve {
        match id {
            CurveId::SaturationTempK => &self.saturation_temp_k,
            CurveId::SaturationPressurePsia => &self.saturation_pressure_psia,
            CurveId::WaterHeatBtuPerLb => &self.water_heat,
            CurveId::SteamHeatBtuPerLb => &self.steam_heat,
            CurveId::SteamDensityLbPerFt3 => &self.steam_density,
            CurveId::WaterDensityLbPerFt3 => &self.water_density,
            CurveId::InjectorDeliveryTempF => &self.injector_delivery_temp,
            CurveId::BoilerEfficiency => &self.boiler_efficiency,
            CurveId::CylinderCondensationFraction => &self.cylinder_condensation,
            CurveId::SuperheatTempRiseK => &self.superheat_temp_rise,
            CurveId::BackPressurePsi => &self.back_pressure,
        }
    }

    // Named accessors for the hot paths; identical to lookup() but keep the
    // physics call sites readable.

    pub fn saturation_temp_k(&self, psia: Real) -> Real {
        self.saturation_temp_k.eval(psia)
    }

    pub fn saturation_pressure_psia(&self, water_temp_k: Real) -> Real {
        self.saturation_pressure_psia.eval(water_temp_k)
    }

    pub fn water_heat_btu_per_lb(&self, psia: Real) -> Real {
        self.water_heat.eval(psia)
    }

    pub fn steam_heat_btu_per_lb(&self, psia: Real) -> Real {
        self.steam_heat.eval(psia)
    }

    /// Latent heat hfg = hg − hf at the given pressure.
    pub fn evaporation_heat_btu_per_lb(&self, psia: Real) -> Real {
        (self.steam_heat.eval(psia) - self.water_heat.eval(psia)).max(1.0)
    }

    pub fn steam_density_lb_per_ft3(&self, psia: Real) -> Real {
        self.steam_density.eval(psia)
    }

    pub fn water_density_lb_per_ft3(&self, psia: Real) -> Real {
        self.water_density.eval(psia)
    }

    pub fn injector_delivery_temp_f(&self, psia: Real) -> Real {
        self.injector_delivery_temp.eval(psia)
    }

    pub fn boiler_efficiency(&self, grate_rate_lb_per_ft2_h: Real) -> Real {
        self.boiler_efficiency.eval(grate_rate_lb_per_ft2_h)
    }

    pub fn condensation_fraction(&self, cutoff: Real) -> Real {
        self.cylinder_condensation.eval(cutoff.abs())
    }

    pub fn superheat_rise_k(&self, flow_fraction: Real) -> Real {
        self.superheat_temp_rise.eval(flow_fraction)
    }

    pub fn back_pressure_psi(&self, power_fraction: Real) -> Real {
        self.back_pressure.eval(power_fraction)
    }

    pub fn initial_pressure_drop_ratio(&self, revs_per_s: Real, cutoff: Real) -> Real {
        self.initial_pressure_drop.eval(revs_per_s, cutoff.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geom() -> TableGeometry {
        TableGeometry {
            max_boiler_pressure_psi: 200.0,
            evaporation_area_m2: 250.0,
            superheat_area_m2: 100.0,
            grate_area_m2: 4.0,
        }
    }

    #[test]
    fn atmospheric_boiling_point() {
        let t = SteamTables::standard(&geom()).unwrap();
        let boil_k = t.saturation_temp_k(14.696);
        assert!((boil_k - 373.15).abs() < 0.1);
    }

    #[test]
    fn saturation_curve_inverts() {
        let t = SteamTables::standard(&geom()).unwrap();
        for psia in [20.0, 50.0, 100.0, 180.0, 250.0] {
            let temp = t.saturation_temp_k(psia);
            let back = t.saturation_pressure_psia(temp);
            assert!(
                (back - psia).abs() < 0.5,
                "roundtrip at {psia} psia gave {back}"
            );
        }
    }

    #[test]
    fn latent_heat_shrinks_with_pressure() {
        let t = SteamTables::standard(&geom()).unwrap();
        assert!(t.evaporation_heat_btu_per_lb(50.0) > t.evaporation_heat_btu_per_lb(250.0));
        // around 843 BTU/lb at 200 psia
        assert!((t.evaporation_heat_btu_per_lb(200.0) - 843.0).abs() < 2.0);
    }

    #[test]
    fn steam_density_rises_with_pressure() {
        let t = SteamTables::standard(&geom()).unwrap();
        let mut last = 0.0;
        for psia in [10.0, 50.0, 100.0, 200.0, 300.0] {
            let rho = t.steam_density_lb_per_ft3(psia);
            assert!(rho > last);
            last = rho;
        }
    }

    #[test]
    fn defaults_report_substitutions() {
        let (_, subs) = SteamTables::build(&geom(), &TableOverrides::default()).unwrap();
        assert_eq!(subs.len(), 6);
        assert!(subs.contains(&TableSubstitution::Curve(CurveId::BoilerEfficiency)));
        assert!(subs.contains(&TableSubstitution::Surface(
            Curve2Id::InitialPressureDropRatio
        )));
    }

    #[test]
    fn override_suppresses_substitution() {
        let overrides = TableOverrides {
            boiler_efficiency: Some(vec![(0.0, 0.9), (100.0, 0.5), (200.0, 0.3)]),
            ..Default::default()
        };
        let (tables, subs) = SteamTables::build(&geom(), &overrides).unwrap();
        assert!(!subs.contains(&TableSubstitution::Curve(CurveId::BoilerEfficiency)));
        assert!((tables.boiler_efficiency(0.0) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn lookup_matches_named_accessor() {
        let t = SteamTables::standard(&geom()).unwrap();
        assert_eq!(
            t.lookup(CurveId::SteamHeatBtuPerLb, 150.0),
            t.steam_heat_btu_per_lb(150.0)
        );
        assert_eq!(
            t.lookup2(Curve2Id::InitialPressureDropRatio, 3.0, 0.4),
            t.initial_pressure_drop_ratio(3.0, 0.4)
        );
    }

    #[test]
    fn repeated_lookup_is_stable() {
        let t = SteamTables::standard(&geom()).unwrap();
        let a = t.lookup(CurveId::SaturationTempK, 137.0);
        for _ in 0..100 {
            assert_eq!(t.lookup(CurveId::SaturationTempK, 137.0), a);
        }
    }
}
