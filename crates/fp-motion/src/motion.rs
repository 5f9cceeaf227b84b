//! Per-tick motion evaluation: tractive effort, power figures, and the
//! optional adhesion sub-model, combined into one pass.

use std::f64::consts::PI;

use fp_config::{EngineKind, LocomotiveConfig};
use fp_core::units::{m_to_in, mps_to_mph};
use fp_core::{Real, clamp_unit};

use crate::adhesion::{AdhesionInputs, AdhesionModel, AdhesionState};
use crate::error::MotionResult;
use crate::tractive::{HP_PER_LBF_MPH, TractiveModel};

/// Edge-triggered adhesion notifications.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionEvent {
    SlipStarted,
    SlipEnded,
}

/// Recomputed every tick; only the adhesion sub-state persists.
#[derive(Clone, Copy, Debug, Default)]
pub struct MotionState {
    pub tractive_effort_lbf: Real,
    pub indicated_hp: Real,
    pub drawbar_pull_lbf: Real,
    pub drawbar_hp: Real,
    pub adhesion: AdhesionState,
}

#[derive(Clone, Copy, Debug)]
pub struct MotionInputs {
    pub dt_s: Real,
    pub mep_psi: Real,
    pub lp_mep_psi: Real,
    /// Signed reverser setting; only the sign is used here, to direct the
    /// effort.
    pub cutoff: Real,
    pub speed_m_per_s: Real,
    pub wheel_revs_per_s: Real,
    /// Aggregate friction/gravity/curve/wind force opposing the train, lbf.
    pub train_resistance_lbf: Real,
    /// Rail-condition scale on the dry friction coefficient, 0..1.
    pub rail_friction_factor: Real,
    /// Weight on the drivers from the train model, lbf (0 = configured).
    pub adhesive_weight_lbf: Real,
    /// Effort scale for degraded steam (priming carry-over), 0..1.
    pub motive_derate: Real,
}

/// The whole motion model: cylinder effort to drawbar figures.
#[derive(Clone, Debug)]
pub struct Motion {
    tractive: TractiveModel,
    /// Present only for non-geared engines running advanced physics.
    adhesion: Option<AdhesionModel>,
    engine_kind: EngineKind,
    piston_area_in2: Real,
    lp_piston_area_in2: Real,
}

impl Motion {
    pub fn new(config: &LocomotiveConfig, advanced_adhesion: bool) -> MotionResult<Self> {
        let tractive = TractiveModel::new(config)?;
        let adhesion = if advanced_adhesion && config.engine_kind != EngineKind::Geared {
            Some(AdhesionModel::new(config)?)
        } else {
            None
        };
        let bore_in = m_to_in(config.bore_m);
        let lp_bore_in = m_to_in(config.lp_bore_m);
        Ok(Self {
            tractive,
            adhesion,
            engine_kind: config.engine_kind,
            piston_area_in2: PI / 4.0 * bore_in * bore_in,
            lp_piston_area_in2: PI / 4.0 * lp_bore_in * lp_bore_in,
        })
    }

    pub fn init_state(&self) -> MotionState {
        MotionState::default()
    }

    /// Mean force on one piston for the adhesion force balance, lbf.
    fn piston_force_lbf(&self, mep_psi: Real, lp_mep_psi: Real) -> Real {
        match self.engine_kind {
            EngineKind::Compound => {
                0.5 * (mep_psi.max(0.0) * self.piston_area_in2
                    + lp_mep_psi.max(0.0) * self.lp_piston_area_in2)
            }
            EngineKind::Simple | EngineKind::Geared => {
                mep_psi.max(0.0) * self.piston_area_in2
            }
        }
    }

    /// Advance one tick.
    pub fn update(
        &self,
        state: &mut MotionState,
        inputs: &MotionInputs,
        events: &mut Vec<MotionEvent>,
    ) {
        let sign = if inputs.cutoff < 0.0 { -1.0 } else { 1.0 };
        let derate = clamp_unit(inputs.motive_derate);
        let mph = mps_to_mph(inputs.speed_m_per_s.abs());

        let raw_te =
            self.tractive.tractive_effort_lbf(inputs.mep_psi, inputs.lp_mep_psi) * derate;
        let (mut te, ihp) = self.tractive.cap_power(raw_te, mph);

        if let Some(adhesion) = &self.adhesion {
            let was_slipping = state.adhesion.is_slipping;
            let tick = adhesion.update(
                &mut state.adhesion,
                &AdhesionInputs {
                    dt_s: inputs.dt_s,
                    piston_force_lbf: self
                        .piston_force_lbf(inputs.mep_psi, inputs.lp_mep_psi)
                        * derate,
                    wheel_revs_per_s: inputs.wheel_revs_per_s,
                    rail_friction_factor: inputs.rail_friction_factor,
                    adhesive_weight_lbf: inputs.adhesive_weight_lbf,
                },
            );
            if state.adhesion.is_slipping {
                te = te.min(tick.delivered_te_lbf);
            }
            if state.adhesion.is_slipping && !was_slipping {
                events.push(MotionEvent::SlipStarted);
            } else if !state.adhesion.is_slipping && was_slipping {
                events.push(MotionEvent::SlipEnded);
            }
        }

        state.tractive_effort_lbf = sign * te;
        state.indicated_hp = ihp;
        state.drawbar_pull_lbf = state.tractive_effort_lbf - inputs.train_resistance_lbf;
        state.drawbar_hp = state.drawbar_pull_lbf * mph * HP_PER_LBF_MPH;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_config::{EngineKindDef, LocomotiveSpec, normalize};

    fn config(kind: EngineKindDef) -> LocomotiveConfig {
        let mut spec = LocomotiveSpec {
            name: "test".into(),
            ..Default::default()
        };
        spec.engine.kind = kind;
        normalize(&spec).unwrap().0
    }

    fn inputs() -> MotionInputs {
        MotionInputs {
            dt_s: 0.1,
            mep_psi: 120.0,
            lp_mep_psi: 0.0,
            cutoff: 0.5,
            speed_m_per_s: 5.0,
            wheel_revs_per_s: 1.0,
            train_resistance_lbf: 2_000.0,
            rail_friction_factor: 1.0,
            adhesive_weight_lbf: 0.0,
            motive_derate: 1.0,
        }
    }

    #[test]
    fn shut_regulator_produces_no_effort() {
        let cfg = config(EngineKindDef::Simple);
        let motion = Motion::new(&cfg, false).unwrap();
        let mut state = motion.init_state();
        let mut events = Vec::new();
        motion.update(
            &mut state,
            &MotionInputs {
                mep_psi: 0.0,
                cutoff: 0.0,
                speed_m_per_s: 0.0,
                wheel_revs_per_s: 0.0,
                ..inputs()
            },
            &mut events,
        );
        assert_eq!(state.tractive_effort_lbf, 0.0);
        assert_eq!(state.indicated_hp, 0.0);
        assert!(events.is_empty());
    }

    #[test]
    fn reverse_cutoff_flips_the_sign() {
        let cfg = config(EngineKindDef::Simple);
        let motion = Motion::new(&cfg, false).unwrap();
        let mut state = motion.init_state();
        let mut events = Vec::new();
        motion.update(&mut state, &inputs(), &mut events);
        let forward = state.tractive_effort_lbf;
        assert!(forward > 0.0);

        motion.update(
            &mut state,
            &MotionInputs {
                cutoff: -0.5,
                ..inputs()
            },
            &mut events,
        );
        assert!((state.tractive_effort_lbf + forward).abs() < 1e-9);
    }

    #[test]
    fn drawbar_figures_subtract_train_resistance() {
        let cfg = config(EngineKindDef::Simple);
        let motion = Motion::new(&cfg, false).unwrap();
        let mut state = motion.init_state();
        motion.update(&mut state, &inputs(), &mut Vec::new());
        assert!(
            (state.drawbar_pull_lbf - (state.tractive_effort_lbf - 2_000.0)).abs() < 1e-9
        );
        let mph = mps_to_mph(5.0);
        assert!((state.drawbar_hp - state.drawbar_pull_lbf * mph / 375.0).abs() < 1e-9);
    }

    #[test]
    fn priming_derate_scales_effort() {
        let cfg = config(EngineKindDef::Simple);
        let motion = Motion::new(&cfg, false).unwrap();
        let mut full = motion.init_state();
        let mut derated = motion.init_state();
        motion.update(&mut full, &inputs(), &mut Vec::new());
        motion.update(
            &mut derated,
            &MotionInputs {
                motive_derate: 0.6,
                ..inputs()
            },
            &mut Vec::new(),
        );
        assert!(
            (derated.tractive_effort_lbf - 0.6 * full.tractive_effort_lbf).abs() < 1e-6
        );
    }

    #[test]
    fn geared_engine_never_runs_the_adhesion_model() {
        let cfg = config(EngineKindDef::Geared);
        let motion = Motion::new(&cfg, true).unwrap();
        assert!(motion.adhesion.is_none());
    }

    #[test]
    fn slip_derates_effort_and_raises_events() {
        let cfg = config(EngineKindDef::Simple);
        let motion = Motion::new(&cfg, true).unwrap();
        let mut state = motion.init_state();
        let mut events = Vec::new();

        // Absurd MEP at a crawl: tangential force far beyond adhesion.
        let slipping = MotionInputs {
            mep_psi: 5_000.0,
            speed_m_per_s: 0.2,
            wheel_revs_per_s: 0.05,
            ..inputs()
        };
        motion.update(&mut state, &slipping, &mut events);
        assert!(state.adhesion.is_slipping);
        assert_eq!(events, vec![MotionEvent::SlipStarted]);
        let uncapped = motion.tractive.tractive_effort_lbf(5_000.0, 0.0);
        assert!(state.tractive_effort_lbf < uncapped);

        // Ease off: slip closes and the end event fires once.
        events.clear();
        motion.update(
            &mut state,
            &MotionInputs {
                mep_psi: 0.0,
                ..slipping
            },
            &mut events,
        );
        assert!(!state.adhesion.is_slipping);
        assert_eq!(state.adhesion.slip_speed_mps, 0.0);
        assert_eq!(events, vec![MotionEvent::SlipEnded]);
    }
}
