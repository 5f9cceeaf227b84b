//! Coal and water inventories.
//!
//! Levels clamp to `[0, capacity]`. Hitting empty raises an edge-triggered
//! event and a sticky exhaustion flag that only `refill` clears. Water may
//! be pooled with an auxiliary tender: while coupled, draws come out of both
//! tanks in proportion to their current contents, so both run dry together;
//! while uncoupled the auxiliary water is out of reach and the split stays
//! where it was.

use crate::events::BoilerEvent;
use fp_core::Real;
use fp_config::LocomotiveConfig;

/// Fixed tank capacities.
#[derive(Clone, Debug)]
pub struct Tender {
    pub coal_capacity_kg: Real,
    pub water_capacity_lb: Real,
    pub aux_water_capacity_lb: Real,
}

/// Current inventories and exhaustion latches.
#[derive(Clone, Debug)]
pub struct TenderState {
    pub coal_kg: Real,
    pub water_lb: Real,
    pub aux_water_lb: Real,
    pub aux_coupled: bool,
    pub coal_exhausted: bool,
    pub water_exhausted: bool,
}

impl Tender {
    pub fn new(config: &LocomotiveConfig) -> Self {
        Self {
            coal_capacity_kg: config.coal_capacity_kg,
            water_capacity_lb: config.water_capacity_lb,
            aux_water_capacity_lb: config.aux_water_capacity_lb,
        }
    }

    /// Full tanks; an auxiliary tender starts coupled when it has capacity.
    pub fn init_state(&self) -> TenderState {
        TenderState {
            coal_kg: self.coal_capacity_kg,
            water_lb: self.water_capacity_lb,
            aux_water_lb: self.aux_water_capacity_lb,
            aux_coupled: self.aux_water_capacity_lb > 0.0,
            coal_exhausted: false,
            water_exhausted: false,
        }
    }

    /// Water reachable from the injectors right now.
    pub fn available_water_lb(&self, state: &TenderState) -> Real {
        if state.aux_coupled {
            state.water_lb + state.aux_water_lb
        } else {
            state.water_lb
        }
    }

    /// Draw coal for the fire. Returns the mass actually granted.
    pub fn consume_coal(
        &self,
        state: &mut TenderState,
        kg: Real,
        events: &mut Vec<BoilerEvent>,
    ) -> Real {
        let granted = kg.max(0.0).min(state.coal_kg);
        state.coal_kg = (state.coal_kg - granted).max(0.0);
        if state.coal_kg <= 0.0 && !state.coal_exhausted {
            state.coal_exhausted = true;
            events.push(BoilerEvent::CoalExhausted);
        }
        granted
    }

    /// Draw feedwater. Returns the mass actually granted.
    pub fn consume_water(
        &self,
        state: &mut TenderState,
        lb: Real,
        events: &mut Vec<BoilerEvent>,
    ) -> Real {
        let pool = self.available_water_lb(state);
        let granted = lb.max(0.0).min(pool);
        if state.aux_coupled && pool > 0.0 {
            // Pro-rata by current contents, so both tanks empty together.
            let from_main = granted * state.water_lb / pool;
            state.water_lb = (state.water_lb - from_main).max(0.0);
            state.aux_water_lb = (state.aux_water_lb - (granted - from_main)).max(0.0);
        } else {
            state.water_lb = (state.water_lb - granted).max(0.0);
        }
        if self.available_water_lb(state) <= 0.0 && !state.water_exhausted {
            state.water_exhausted = true;
            events.push(BoilerEvent::WaterExhausted);
        }
        granted
    }

    /// Couple or uncouple the auxiliary tender. Levels stay where they are;
    /// only reachability changes.
    pub fn set_aux_coupled(&self, state: &mut TenderState, coupled: bool) {
        state.aux_coupled = coupled && self.aux_water_capacity_lb > 0.0;
    }

    /// Water-crane and coal-stage stop: both tanks full, latches cleared.
    pub fn refill(&self, state: &mut TenderState) {
        state.coal_kg = self.coal_capacity_kg;
        state.water_lb = self.water_capacity_lb;
        state.aux_water_lb = self.aux_water_capacity_lb;
        state.coal_exhausted = false;
        state.water_exhausted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tender(aux_lb: Real) -> Tender {
        Tender {
            coal_capacity_kg: 1_000.0,
            water_capacity_lb: 10_000.0,
            aux_water_capacity_lb: aux_lb,
        }
    }

    #[test]
    fn coal_clamps_and_latches_once() {
        let t = tender(0.0);
        let mut s = t.init_state();
        let mut events = Vec::new();

        let granted = t.consume_coal(&mut s, 600.0, &mut events);
        assert_eq!(granted, 600.0);
        assert!(events.is_empty());

        // Asking for more than remains grants the remainder and latches.
        let granted = t.consume_coal(&mut s, 600.0, &mut events);
        assert_eq!(granted, 400.0);
        assert_eq!(s.coal_kg, 0.0);
        assert_eq!(events, vec![BoilerEvent::CoalExhausted]);

        // Repeated draws at empty stay silent.
        events.clear();
        assert_eq!(t.consume_coal(&mut s, 1.0, &mut events), 0.0);
        assert!(events.is_empty());
        assert!(s.coal_exhausted);
    }

    #[test]
    fn coupled_draw_is_proportional_to_contents() {
        let t = tender(5_000.0);
        let mut s = t.init_state();
        let mut events = Vec::new();
        s.water_lb = 8_000.0;
        s.aux_water_lb = 2_000.0;

        t.consume_water(&mut s, 1_000.0, &mut events);
        assert!((s.water_lb - 7_200.0).abs() < 1e-9);
        assert!((s.aux_water_lb - 1_800.0).abs() < 1e-9);
        // Ratio of contents is preserved.
        assert!((s.water_lb / s.aux_water_lb - 4.0).abs() < 1e-9);
    }

    #[test]
    fn uncoupling_freezes_the_auxiliary_share() {
        let t = tender(5_000.0);
        let mut s = t.init_state();
        let mut events = Vec::new();
        t.set_aux_coupled(&mut s, false);

        assert_eq!(t.available_water_lb(&s), 10_000.0);
        t.consume_water(&mut s, 10_000.0, &mut events);
        assert_eq!(s.water_lb, 0.0);
        assert_eq!(s.aux_water_lb, 5_000.0);
        // Dry as far as the injectors can see.
        assert!(s.water_exhausted);
        assert_eq!(events, vec![BoilerEvent::WaterExhausted]);

        // Re-coupling makes the auxiliary water reachable again.
        t.set_aux_coupled(&mut s, true);
        assert_eq!(t.available_water_lb(&s), 5_000.0);
    }

    #[test]
    fn refill_restores_capacity_and_clears_latches() {
        let t = tender(5_000.0);
        let mut s = t.init_state();
        let mut events = Vec::new();
        t.consume_water(&mut s, 15_000.0, &mut events);
        t.consume_coal(&mut s, 1_000.0, &mut events);
        assert!(s.water_exhausted && s.coal_exhausted);

        t.refill(&mut s);
        assert_eq!(s.water_lb, 10_000.0);
        assert_eq!(s.aux_water_lb, 5_000.0);
        assert_eq!(s.coal_kg, 1_000.0);
        assert!(!s.water_exhausted && !s.coal_exhausted);
    }

    #[test]
    fn aux_coupling_requires_capacity() {
        let t = tender(0.0);
        let mut s = t.init_state();
        assert!(!s.aux_coupled);
        t.set_aux_coupled(&mut s, true);
        assert!(!s.aux_coupled);
    }
}
