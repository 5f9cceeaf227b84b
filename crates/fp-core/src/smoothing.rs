//! First-order smoothing for damped feedback and display quantities.
//!
//! Several boiler quantities feed controllers or telemetry through a smoothed
//! value rather than the raw per-tick figure (stored boiler heat, cylinder
//! steam usage, gauge readings). The filter is a first-order lag:
//!
//! ```text
//! y += (x - y) * dt / (tau + dt)
//! ```
//!
//! which stays stable for any non-negative `dt`, unlike a fixed-alpha
//! exponential average under a variable timestep.

use crate::numeric::Real;

/// First-order lag smoother.
#[derive(Clone, Copy, Debug)]
pub struct Smoother {
    tau_s: Real,
    value: Real,
    primed: bool,
}

impl Smoother {
    /// Create a smoother with time constant `tau_s` (seconds, >= 0).
    /// A zero time constant passes samples through unchanged.
    pub fn new(tau_s: Real) -> Self {
        Self {
            tau_s: tau_s.max(0.0),
            value: 0.0,
            primed: false,
        }
    }

    /// Feed one sample; returns the smoothed value.
    ///
    /// The first sample primes the filter so startup does not ramp from zero.
    pub fn update(&mut self, sample: Real, dt_s: Real) -> Real {
        if !self.primed {
            self.value = sample;
            self.primed = true;
            return self.value;
        }
        let dt = dt_s.max(0.0);
        let alpha = dt / (self.tau_s + dt).max(1e-12);
        self.value += alpha * (sample - self.value);
        self.value
    }

    /// Current smoothed value.
    pub fn value(&self) -> Real {
        self.value
    }

    /// Force the filter to a known value (snapshot restore).
    pub fn reset(&mut self, value: Real) {
        self.value = value;
        self.primed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_primes() {
        let mut s = Smoother::new(10.0);
        assert_eq!(s.update(100.0, 0.1), 100.0);
    }

    #[test]
    fn converges_to_constant_input() {
        let mut s = Smoother::new(1.0);
        s.update(0.0, 0.1);
        for _ in 0..200 {
            s.update(50.0, 0.1);
        }
        assert!((s.value() - 50.0).abs() < 0.5);
    }

    #[test]
    fn zero_tau_passes_through() {
        let mut s = Smoother::new(0.0);
        s.update(1.0, 0.1);
        assert_eq!(s.update(7.0, 0.1), 7.0);
    }

    #[test]
    fn large_dt_stays_bounded() {
        let mut s = Smoother::new(0.5);
        s.update(0.0, 0.1);
        // A 1 s step must not overshoot the sample
        let out = s.update(10.0, 1.0);
        assert!(out > 0.0 && out <= 10.0);
    }

    #[test]
    fn reset_overrides_state() {
        let mut s = Smoother::new(5.0);
        s.update(1.0, 0.1);
        s.reset(99.0);
        assert_eq!(s.value(), 99.0);
    }
}
