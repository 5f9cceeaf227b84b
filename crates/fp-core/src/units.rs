// fp-core/src/units.rs
//
// The locomotive formulas are calibrated in the mixed imperial/SI units of
// the reference data: boiler pressure PSI, steam mass lb, heat BTU, fuel
// mass kg, temperature K, speed m/s. Conversions live here; state fields
// elsewhere carry a unit suffix (`mass_lb`, `heat_btu`, `fire_mass_kg`).

pub const KG_PER_LB: f64 = 0.453_592_37;
pub const LB_PER_KG: f64 = 1.0 / KG_PER_LB;

pub const J_PER_BTU: f64 = 1_055.055_85;
pub const PA_PER_PSI: f64 = 6_894.757;
pub const N_PER_LBF: f64 = 4.448_221_6;

pub const M_PER_FT: f64 = 0.3048;
pub const M_PER_IN: f64 = 0.0254;
pub const M3_PER_FT3: f64 = 0.028_316_846_6;
pub const M2_PER_FT2: f64 = 0.092_903_04;

pub const MPS_PER_MPH: f64 = 0.447_04;
pub const W_PER_HP: f64 = 745.699_87;

/// UK gallons, the customary tender water unit.
pub const LB_PER_UK_GALLON: f64 = 10.0;

#[inline]
pub fn lb_to_kg(lb: f64) -> f64 {
    lb * KG_PER_LB
}

#[inline]
pub fn kg_to_lb(kg: f64) -> f64 {
    kg * LB_PER_KG
}

#[inline]
pub fn mps_to_mph(mps: f64) -> f64 {
    mps / MPS_PER_MPH
}

#[inline]
pub fn mph_to_mps(mph: f64) -> f64 {
    mph * MPS_PER_MPH
}

#[inline]
pub fn deg_f_to_k(f: f64) -> f64 {
    (f + 459.67) * 5.0 / 9.0
}

#[inline]
pub fn k_to_deg_f(k: f64) -> f64 {
    k * 9.0 / 5.0 - 459.67
}

#[inline]
pub fn ft_to_m(ft: f64) -> f64 {
    ft * M_PER_FT
}

#[inline]
pub fn in_to_m(inches: f64) -> f64 {
    inches * M_PER_IN
}

#[inline]
pub fn m_to_in(m: f64) -> f64 {
    m / M_PER_IN
}

#[inline]
pub fn m2_to_ft2(m2: f64) -> f64 {
    m2 / M2_PER_FT2
}

#[inline]
pub fn m3_to_ft3(m3: f64) -> f64 {
    m3 / M3_PER_FT3
}

#[inline]
pub fn btu_per_s_to_hp(btu_s: f64) -> f64 {
    btu_s * J_PER_BTU / W_PER_HP
}

pub mod constants {
    /// Standard gravity, m/s²
    pub const G0_MPS2: f64 = 9.806_65;

    /// Atmospheric pressure, PSI absolute
    pub const ATMOSPHERE_PSI: f64 = 14.696;

    /// Specific heat of liquid water, BTU/(lb·°F)
    pub const WATER_SPECIFIC_HEAT_BTU_PER_LB_F: f64 = 1.0;
}
