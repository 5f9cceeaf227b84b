//! Tractive effort and power from the indicator diagram.
//!
//! The classic locomotive tractive-effort formula,
//! `TE = 0.85 · MEP · d² · s / (2D)` per pair of cylinders (bore d, stroke
//! s, driver diameter D, all in inches), with the gear ratio folded into the
//! effective driver diameter for geared engines. Indicated horsepower is
//! `TE · mph / 375`, capped at the configured boiler/piston-speed limit;
//! when the cap binds, tractive effort is recomputed backward from it.

use fp_config::{EngineKind, LocomotiveConfig};
use fp_core::units::m_to_in;
use fp_core::{Real, safe_div};

use crate::error::{MotionError, MotionResult};

/// Fraction of boiler pressure assumed effective at the piston in the
/// classic formula; MEP already reflects the cycle, the factor stays as the
/// calibrated coefficient of the reference data.
const TE_FACTOR: Real = 0.85;

/// `HP = TE_lbf · mph / 375`.
pub const HP_PER_LBF_MPH: Real = 1.0 / 375.0;

/// Speed below which the HP cap is meaningless and skipped.
const CAP_MIN_MPH: Real = 0.1;

/// Fixed cylinder geometry, resolved to the inch/PSI units of the formula.
#[derive(Clone, Debug)]
pub struct TractiveModel {
    engine_kind: EngineKind,
    cylinder_count: u32,
    bore_in: Real,
    lp_bore_in: Real,
    stroke_in: Real,
    /// Driver diameter divided by the gear ratio.
    effective_wheel_diameter_in: Real,
    max_indicated_hp: Real,
}

impl TractiveModel {
    pub fn new(config: &LocomotiveConfig) -> MotionResult<Self> {
        if config.drive_wheel_diameter_m <= 0.0 {
            return Err(MotionError::InvalidArg {
                what: "drive wheel diameter must be positive",
            });
        }
        if config.gear_ratio <= 0.0 {
            return Err(MotionError::InvalidArg {
                what: "gear ratio must be positive",
            });
        }
        Ok(Self {
            engine_kind: config.engine_kind,
            cylinder_count: config.cylinder_count,
            bore_in: m_to_in(config.bore_m),
            lp_bore_in: m_to_in(config.lp_bore_m),
            stroke_in: m_to_in(config.stroke_m),
            effective_wheel_diameter_in: m_to_in(config.drive_wheel_diameter_m)
                / config.gear_ratio,
            max_indicated_hp: config.max_indicated_hp,
        })
    }

    /// Unsigned tractive effort for the tick's MEP figures.
    ///
    /// `lp_mep_psi` is ignored except for compound engines, where each
    /// stage contributes through its own bore and the stages split the
    /// cylinder count evenly.
    pub fn tractive_effort_lbf(&self, mep_psi: Real, lp_mep_psi: Real) -> Real {
        let per_pair =
            TE_FACTOR * self.stroke_in / (2.0 * self.effective_wheel_diameter_in);
        let pairs = self.cylinder_count as Real / 2.0;
        let te = match self.engine_kind {
            EngineKind::Compound => {
                // One HP and one LP cylinder per pair.
                per_pair
                    * pairs
                    * 0.5
                    * (mep_psi.max(0.0) * self.bore_in * self.bore_in
                        + lp_mep_psi.max(0.0) * self.lp_bore_in * self.lp_bore_in)
            }
            EngineKind::Simple | EngineKind::Geared => {
                per_pair * pairs * mep_psi.max(0.0) * self.bore_in * self.bore_in
            }
        };
        te.max(0.0)
    }

    /// Apply the indicated-horsepower cap, recomputing tractive effort
    /// backward from the cap when it binds. Returns `(te_lbf, ihp)`.
    pub fn cap_power(&self, te_lbf: Real, speed_mph: Real) -> (Real, Real) {
        let mph = speed_mph.abs();
        let ihp = te_lbf * mph * HP_PER_LBF_MPH;
        if mph > CAP_MIN_MPH && ihp > self.max_indicated_hp {
            let te = safe_div(self.max_indicated_hp, mph * HP_PER_LBF_MPH, te_lbf);
            (te, self.max_indicated_hp)
        } else {
            (te_lbf, ihp)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_core::units::in_to_m;

    fn model(kind: EngineKind, count: u32, gear_ratio: Real) -> TractiveModel {
        TractiveModel {
            engine_kind: kind,
            cylinder_count: count,
            bore_in: 20.0,
            lp_bore_in: 30.0,
            stroke_in: 28.0,
            effective_wheel_diameter_in: 72.0 / gear_ratio,
            max_indicated_hp: 2200.0,
        }
    }

    #[test]
    fn matches_the_handbook_figure() {
        // 20x28 cylinders, 72 in drivers, MEP 170 psi:
        // 0.85 * 170 * 400 * 28 / (2*72) = 11238.9 lbf
        let m = model(EngineKind::Simple, 2, 1.0);
        let te = m.tractive_effort_lbf(170.0, 0.0);
        assert!((te - 11_238.9).abs() < 1.0, "te = {te}");
    }

    #[test]
    fn three_cylinders_scale_by_half_again() {
        let two = model(EngineKind::Simple, 2, 1.0);
        let three = model(EngineKind::Simple, 3, 1.0);
        let a = two.tractive_effort_lbf(150.0, 0.0);
        let b = three.tractive_effort_lbf(150.0, 0.0);
        assert!((b - 1.5 * a).abs() < 1e-9);
    }

    #[test]
    fn gearing_multiplies_effort() {
        let direct = model(EngineKind::Geared, 2, 1.0);
        let geared = model(EngineKind::Geared, 2, 2.5);
        let a = direct.tractive_effort_lbf(160.0, 0.0);
        let b = geared.tractive_effort_lbf(160.0, 0.0);
        assert!((b - 2.5 * a).abs() < 1e-6);
    }

    #[test]
    fn compound_sums_both_stages() {
        let m = model(EngineKind::Compound, 4, 1.0);
        let hp_only = m.tractive_effort_lbf(120.0, 0.0);
        let both = m.tractive_effort_lbf(120.0, 60.0);
        assert!(both > hp_only);
        // The LP stage has a bigger bore; at half the MEP it still adds
        // more than the HP term alone would suggest.
        let lp_only = m.tractive_effort_lbf(0.0, 60.0);
        assert!((both - hp_only - lp_only).abs() < 1e-9);
    }

    #[test]
    fn hp_cap_recomputes_effort_backward() {
        let m = model(EngineKind::Simple, 2, 1.0);
        let te = m.tractive_effort_lbf(170.0, 0.0);
        let (capped_te, ihp) = m.cap_power(te, 80.0);
        assert!((ihp - 2200.0).abs() < 1e-9);
        assert!(capped_te < te);
        // Backward relation holds.
        assert!((capped_te * 80.0 / 375.0 - 2200.0).abs() < 1e-6);
    }

    #[test]
    fn cap_idle_at_low_speed() {
        let m = model(EngineKind::Simple, 2, 1.0);
        let te = m.tractive_effort_lbf(170.0, 0.0);
        let (uncapped, ihp) = m.cap_power(te, 0.05);
        assert_eq!(uncapped, te);
        assert!(ihp < 10.0);
    }

    #[test]
    fn negative_mep_yields_no_effort() {
        let m = model(EngineKind::Simple, 2, 1.0);
        assert_eq!(m.tractive_effort_lbf(-5.0, 0.0), 0.0);
    }

    #[test]
    fn constructor_rejects_degenerate_geometry() {
        let spec = fp_config::LocomotiveSpec {
            name: "test".into(),
            ..Default::default()
        };
        let mut cfg = fp_config::normalize(&spec).unwrap().0;
        cfg.drive_wheel_diameter_m = 0.0;
        assert!(TractiveModel::new(&cfg).is_err());
        cfg.drive_wheel_diameter_m = in_to_m(72.0);
        cfg.gear_ratio = 0.0;
        assert!(TractiveModel::new(&cfg).is_err());
    }
}
