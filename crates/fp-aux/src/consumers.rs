//! The small steam consumers: blower, brake feed, turbo-generator,
//! mechanical stoker, train heating, cylinder-cock venting.
//!
//! Each computes a demand rate from its control position and boiler
//! pressure, then takes what the boiler will actually grant. Rates are
//! calibration figures for the fleet, not first-principles flows.

use fp_core::{Real, clamp_unit};

/// Blower jet flow per PSIA at full opening, lb/s.
const BLOWER_FLOW_PER_PSIA: Real = 0.002;
/// Cross-compound air pump, charging duty, lb/s.
const COMPRESSOR_LB_PER_S: Real = 0.05;
/// Small vacuum ejector, always in steam on vacuum-fitted engines, per PSIA.
const EJECTOR_SMALL_PER_PSIA: Real = 2.0e-4;
/// Large ejector, brake release, per PSIA.
const EJECTOR_LARGE_PER_PSIA: Real = 6.0e-4;
/// Turbo-generator, constant once fitted, lb/s.
const GENERATOR_LB_PER_S: Real = 0.012;
/// Stoker screw and distributing jets, per kg of coal fed.
const STOKER_STEAM_LB_PER_KG: Real = 0.12;
/// Carriage-heating supply, lb/s.
const HEATING_LB_PER_S: Real = 0.08;

/// Blower demand. Computed ahead of the vessel update so the boiler can
/// debit it in the same tick it drives the fire.
pub fn blower_steam_lb_per_s(fraction: Real, psia: Real) -> Real {
    clamp_unit(fraction) * BLOWER_FLOW_PER_PSIA * psia.max(0.0)
}

/// Air-pump demand while the brake system is charging.
pub fn compressor_steam_lb_per_s(running: bool) -> Real {
    if running { COMPRESSOR_LB_PER_S } else { 0.0 }
}

/// Vacuum-ejector demand: the small ejector holds the vacuum continuously,
/// the large one joins for a release.
pub fn ejector_steam_lb_per_s(large_on: bool, psia: Real) -> Real {
    let per_psia = if large_on {
        EJECTOR_SMALL_PER_PSIA + EJECTOR_LARGE_PER_PSIA
    } else {
        EJECTOR_SMALL_PER_PSIA
    };
    per_psia * psia.max(0.0)
}

pub fn generator_steam_lb_per_s(fitted: bool) -> Real {
    if fitted { GENERATOR_LB_PER_S } else { 0.0 }
}

/// Stoker demand follows the coal actually moving through the screw.
pub fn stoker_steam_lb_per_s(feed_rate_kg_per_s: Real) -> Real {
    STOKER_STEAM_LB_PER_KG * feed_rate_kg_per_s.max(0.0)
}

pub fn heating_steam_lb_per_s(on: bool) -> Real {
    if on { HEATING_LB_PER_S } else { 0.0 }
}
