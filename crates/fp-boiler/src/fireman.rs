//! Automatic-firing supervisor.
//!
//! When the locomotive is not hand-fired, a supervisor watches boiler
//! pressure and can override the demand-following burn rate: force the fire
//! up hard when pressure sags, or choke it when the safety valves are about
//! to lift. After either override releases, a hold period keeps the
//! supervisor idle so it cannot chatter between modes. All timing runs on
//! elapsed simulation seconds, never frame counts, so behavior is identical
//! at any frame rate.

use fp_core::Real;

/// Pressure sag below working pressure that triggers a forced firing-up.
const FORCE_ON_BAND_PSI: Real = 10.0;
/// Recovery margin at which a forced firing-up releases.
const FORCE_ON_RELEASE_BAND_PSI: Real = 2.0;
/// Overshoot above working pressure that triggers a forced choke.
const FORCE_OFF_OVER_PSI: Real = 1.0;
/// Margin below working pressure at which a forced choke releases.
const FORCE_OFF_RELEASE_BAND_PSI: Real = 4.0;
/// Hold time after an override releases before a new one may start.
const RESET_HOLD_S: Real = 30.0;

/// Supervisor mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FiremanMode {
    /// Watching; demand-following burn rate applies.
    #[default]
    Idle,
    /// Pressure sagged; burn rate forced near maximum.
    ForceOn,
    /// Pressure near the valves; burn rate forced to the floor.
    ForceOff,
    /// Override released; holding before re-arming.
    Resetting,
}

/// What the firebox should do with the burn rate this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FiremanCommand {
    Normal,
    ForceMax,
    ForceMin,
}

/// Supervisor state. The clock is monotonic elapsed simulation time.
#[derive(Clone, Debug)]
pub struct FiremanState {
    pub mode: FiremanMode,
    pub clock_s: Real,
    pub hold_until_s: Real,
}

impl Default for FiremanState {
    fn default() -> Self {
        Self {
            mode: FiremanMode::Idle,
            clock_s: 0.0,
            hold_until_s: 0.0,
        }
    }
}

impl FiremanState {
    /// The override currently in force.
    pub fn command(&self) -> FiremanCommand {
        match self.mode {
            FiremanMode::ForceOn => FiremanCommand::ForceMax,
            FiremanMode::ForceOff => FiremanCommand::ForceMin,
            FiremanMode::Idle | FiremanMode::Resetting => FiremanCommand::Normal,
        }
    }

    /// Advance the supervisor. Called once per tick, after all steam
    /// accounting, with the pressure the tick settled on.
    pub fn update(&mut self, dt_s: Real, pressure_psi: Real, max_pressure_psi: Real) {
        self.clock_s += dt_s.max(0.0);
        match self.mode {
            FiremanMode::Idle => {
                if pressure_psi < max_pressure_psi - FORCE_ON_BAND_PSI {
                    self.mode = FiremanMode::ForceOn;
                } else if pressure_psi > max_pressure_psi + FORCE_OFF_OVER_PSI {
                    self.mode = FiremanMode::ForceOff;
                }
            }
            FiremanMode::ForceOn => {
                if pressure_psi >= max_pressure_psi - FORCE_ON_RELEASE_BAND_PSI {
                    self.mode = FiremanMode::Resetting;
                    self.hold_until_s = self.clock_s + RESET_HOLD_S;
                }
            }
            FiremanMode::ForceOff => {
                if pressure_psi <= max_pressure_psi - FORCE_OFF_RELEASE_BAND_PSI {
                    self.mode = FiremanMode::Resetting;
                    self.hold_until_s = self.clock_s + RESET_HOLD_S;
                }
            }
            FiremanMode::Resetting => {
                if self.clock_s >= self.hold_until_s {
                    self.mode = FiremanMode::Idle;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: Real = 200.0;

    fn run(state: &mut FiremanState, ticks: usize, dt: Real, pressure: Real) {
        for _ in 0..ticks {
            state.update(dt, pressure, MAX);
        }
    }

    #[test]
    fn sagging_pressure_forces_firing_up() {
        let mut s = FiremanState::default();
        s.update(1.0, 189.0, MAX);
        assert_eq!(s.mode, FiremanMode::ForceOn);
        assert_eq!(s.command(), FiremanCommand::ForceMax);
    }

    #[test]
    fn boundary_pressure_does_not_trigger() {
        let mut s = FiremanState::default();
        s.update(1.0, MAX - FORCE_ON_BAND_PSI, MAX);
        assert_eq!(s.mode, FiremanMode::Idle);
    }

    #[test]
    fn recovery_enters_hold_then_idle() {
        let mut s = FiremanState::default();
        s.update(1.0, 185.0, MAX);
        assert_eq!(s.mode, FiremanMode::ForceOn);

        s.update(1.0, 198.5, MAX);
        assert_eq!(s.mode, FiremanMode::Resetting);
        assert_eq!(s.command(), FiremanCommand::Normal);

        // Still holding short of the full reset period, even at low pressure.
        run(&mut s, 29, 1.0, 185.0);
        assert_eq!(s.mode, FiremanMode::Resetting);

        // Hold expires; the next low-pressure tick re-arms.
        s.update(1.0, 185.0, MAX);
        assert_eq!(s.mode, FiremanMode::Idle);
        s.update(1.0, 185.0, MAX);
        assert_eq!(s.mode, FiremanMode::ForceOn);
    }

    #[test]
    fn overshoot_forces_choke_until_pressure_falls() {
        let mut s = FiremanState::default();
        s.update(1.0, 201.5, MAX);
        assert_eq!(s.mode, FiremanMode::ForceOff);
        assert_eq!(s.command(), FiremanCommand::ForceMin);

        // Not enough of a fall yet.
        s.update(1.0, 198.0, MAX);
        assert_eq!(s.mode, FiremanMode::ForceOff);

        s.update(1.0, 195.0, MAX);
        assert_eq!(s.mode, FiremanMode::Resetting);
    }

    #[test]
    fn hold_time_scales_with_dt_not_tick_count() {
        // Same elapsed time in different tick sizes leaves the same mode.
        let mut coarse = FiremanState::default();
        coarse.update(1.0, 185.0, MAX);
        coarse.update(1.0, 199.0, MAX);
        run(&mut coarse, 31, 1.0, 185.0);

        let mut fine = FiremanState::default();
        fine.update(1.0, 185.0, MAX);
        fine.update(1.0, 199.0, MAX);
        run(&mut fine, 310, 0.1, 185.0);

        assert_eq!(coarse.mode, fine.mode);
        assert_ne!(coarse.mode, FiremanMode::Resetting);
    }
}
