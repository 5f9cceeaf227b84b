//! Crank-resolved adhesion and wheel slip.
//!
//! The drivers hold the rail only while the tangential force at the rim
//! stays under the static friction the adhesive weight can supply. The
//! tangential force is resolved per cylinder from the crank angle: two
//! cylinders sit 90° apart, three sit 120° apart, and each contributes
//! `pistonForce · (sin θ + (r/2l) sin 2θ)` through its connecting rod. At
//! speed two corrections appear, both growing with ω²: the reciprocating
//! masses subtract an inertia term from the piston force, and the excess
//! balance weight in the wheel alternately loads and unloads the rail
//! (hammer blow), modulating the available friction.
//!
//! While slipping, the wheel set spins up under the unbalanced torque; the
//! slip speed integrates from net torque over the wheel-set moment of
//! inertia and resets to zero the tick adhesion is regained.

use std::f64::consts::PI;

use fp_config::LocomotiveConfig;
use fp_core::Real;
use fp_core::units::{N_PER_LBF, kg_to_lb};

use crate::error::{MotionError, MotionResult};

/// Main-rod length over crank radius; fixed for the whole fleet.
const ROD_LENGTH_RATIO: Real = 5.0;
/// Moment of inertia of a reference coupled wheel set, kg·m².
const REF_WHEEL_INERTIA_KG_M2: Real = 2_800.0;
/// Radius of the reference wheel, m.
const REF_WHEEL_RADIUS_M: Real = 0.93;
/// Runaway clamp on the slip-speed integrator, m/s.
const MAX_SLIP_SPEED_MPS: Real = 15.0;
/// Hammer blow may not unload the rail below this fraction of the static
/// adhesive weight.
const MIN_WEIGHT_FRACTION: Real = 0.1;
/// Sliding friction relative to static; sets the effort still delivered
/// while the wheels spin.
const SLIP_DELIVERY_FRACTION: Real = 0.6;

/// Persistent slip state. The wheel angle is tracked here because the
/// crank-resolved forces need it continuously, slip or no slip.
#[derive(Clone, Copy, Debug, Default)]
pub struct AdhesionState {
    pub wheel_angle_rad: Real,
    /// Rim speed of the spinning wheel set in excess of train speed.
    pub slip_speed_mps: Real,
    pub is_slipping: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct AdhesionInputs {
    pub dt_s: Real,
    /// Mean piston force per cylinder over the stroke, lbf.
    pub piston_force_lbf: Real,
    /// Driven wheel speed from train motion (slip excluded).
    pub wheel_revs_per_s: Real,
    /// Rail-condition scale on the dry friction coefficient, 0..1.
    pub rail_friction_factor: Real,
    /// Weight on the coupled drivers from the train model, lbf. Zero or
    /// negative falls back to the configured adhesive mass.
    pub adhesive_weight_lbf: Real,
}

/// Per-tick force balance at the rail.
#[derive(Clone, Copy, Debug)]
pub struct AdhesionTick {
    pub tangential_force_lbf: Real,
    pub static_friction_lbf: Real,
    /// Cap on tractive effort the rail will transmit this tick.
    pub delivered_te_lbf: Real,
}

/// Fixed running-gear parameters resolved from configuration.
#[derive(Clone, Debug)]
pub struct AdhesionModel {
    cylinder_count: u32,
    crank_separation_rad: Real,
    crank_radius_m: Real,
    rod_length_m: Real,
    /// Reciprocating mass charged to one cylinder, kg.
    recip_mass_per_cyl_kg: Real,
    excess_balance_kg: Real,
    wheel_radius_m: Real,
    wheel_inertia_kg_m2: Real,
    adhesive_weight_lbf: Real,
    friction_coefficient: Real,
}

impl AdhesionModel {
    pub fn new(config: &LocomotiveConfig) -> MotionResult<Self> {
        if config.stroke_m <= 0.0 || config.drive_wheel_diameter_m <= 0.0 {
            return Err(MotionError::InvalidArg {
                what: "stroke and wheel diameter must be positive",
            });
        }
        let count = config.cylinder_count.clamp(2, 3);
        let crank_radius_m = config.stroke_m / 2.0;
        let wheel_radius_m = config.drive_wheel_diameter_m / 2.0;
        let radius_ratio = wheel_radius_m / REF_WHEEL_RADIUS_M;
        Ok(Self {
            cylinder_count: count,
            crank_separation_rad: if count == 3 {
                2.0 * PI / 3.0
            } else {
                PI / 2.0
            },
            crank_radius_m,
            rod_length_m: ROD_LENGTH_RATIO * crank_radius_m,
            recip_mass_per_cyl_kg: config.reciprocating_mass_kg / count as Real,
            excess_balance_kg: config.excess_balance_kg,
            wheel_radius_m,
            wheel_inertia_kg_m2: REF_WHEEL_INERTIA_KG_M2 * radius_ratio * radius_ratio,
            adhesive_weight_lbf: kg_to_lb(config.adhesive_mass_kg),
            friction_coefficient: config.friction_coefficient,
        })
    }

    /// Tangential leverage of one crank at angle `theta`.
    fn tangential_factor(&self, theta: Real) -> Real {
        theta.sin()
            + self.crank_radius_m / (2.0 * self.rod_length_m) * (2.0 * theta).sin()
    }

    /// Advance one tick: rotate the wheel, balance forces at the rail, and
    /// run the slip integrator.
    pub fn update(&self, state: &mut AdhesionState, inputs: &AdhesionInputs) -> AdhesionTick {
        let r = self.crank_radius_m;
        let slip_revs = state.slip_speed_mps / (2.0 * PI * self.wheel_radius_m);
        let omega = 2.0 * PI * (inputs.wheel_revs_per_s.abs() + slip_revs);
        state.wheel_angle_rad =
            (state.wheel_angle_rad + omega * inputs.dt_s).rem_euclid(2.0 * PI);

        let mut tangential = 0.0;
        for i in 0..self.cylinder_count {
            let theta = state.wheel_angle_rad + i as Real * self.crank_separation_rad;
            // Reciprocating inertia relieves the piston force as speed rises.
            let inertia_n = self.recip_mass_per_cyl_kg
                * omega
                * omega
                * r
                * (theta.cos() + r / self.rod_length_m * (2.0 * theta).cos());
            let effective_lbf = inputs.piston_force_lbf - inertia_n / N_PER_LBF;
            tangential += (effective_lbf * self.tangential_factor(theta)).abs();
        }

        // Hammer blow: the out-of-balance wheel weight oscillates the rail
        // load once per revolution.
        let static_weight_lbf = if inputs.adhesive_weight_lbf > 0.0 {
            inputs.adhesive_weight_lbf
        } else {
            self.adhesive_weight_lbf
        };
        let hammer_n =
            self.excess_balance_kg * omega * omega * r * state.wheel_angle_rad.sin();
        let rail_weight_lbf = (static_weight_lbf - hammer_n / N_PER_LBF)
            .max(MIN_WEIGHT_FRACTION * static_weight_lbf);
        let static_friction = rail_weight_lbf
            * self.friction_coefficient
            * inputs.rail_friction_factor.clamp(0.0, 1.0);

        if tangential > static_friction {
            state.is_slipping = true;
            let net_torque_nm =
                (tangential - static_friction) * N_PER_LBF * self.wheel_radius_m;
            let rim_accel = net_torque_nm / self.wheel_inertia_kg_m2 * self.wheel_radius_m;
            state.slip_speed_mps = (state.slip_speed_mps + rim_accel * inputs.dt_s)
                .clamp(0.0, MAX_SLIP_SPEED_MPS);
        } else {
            state.is_slipping = false;
            state.slip_speed_mps = 0.0;
        }

        AdhesionTick {
            tangential_force_lbf: tangential,
            static_friction_lbf: static_friction,
            delivered_te_lbf: if state.is_slipping {
                SLIP_DELIVERY_FRACTION * static_friction
            } else {
                tangential
            },
        }
    }
}
