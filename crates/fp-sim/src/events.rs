//! Discrete notifications surfaced to the enclosing simulation.
//!
//! Fire-and-forget: audio/visual/log collaborators consume them, nothing
//! queries back. Each underlying component raises its own edge-triggered
//! events; this module folds them into one enum per tick.

use fp_aux::AuxEvent;
use fp_boiler::BoilerEvent;
use fp_motion::MotionEvent;

/// One powerplant notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimEvent {
    SafetyValveOpened,
    SafetyValveClosed,
    InjectorStarted { index: usize },
    InjectorStopped { index: usize },
    CoalExhausted,
    WaterExhausted,
    FireDropped,
    GrateLimitExceeded,
    FusiblePlugBlown,
    PrimingStarted,
    PrimingCleared,
    SlipStarted,
    SlipEnded,
}

impl From<BoilerEvent> for SimEvent {
    fn from(e: BoilerEvent) -> Self {
        match e {
            BoilerEvent::CoalExhausted => SimEvent::CoalExhausted,
            BoilerEvent::WaterExhausted => SimEvent::WaterExhausted,
            BoilerEvent::FireOut => SimEvent::FireDropped,
            BoilerEvent::GrateLimitExceeded => SimEvent::GrateLimitExceeded,
            BoilerEvent::SafetyValveOpened => SimEvent::SafetyValveOpened,
            BoilerEvent::SafetyValveClosed => SimEvent::SafetyValveClosed,
            BoilerEvent::FusiblePlugBlown => SimEvent::FusiblePlugBlown,
            BoilerEvent::PrimingStarted => SimEvent::PrimingStarted,
            BoilerEvent::PrimingStopped => SimEvent::PrimingCleared,
        }
    }
}

impl From<MotionEvent> for SimEvent {
    fn from(e: MotionEvent) -> Self {
        match e {
            MotionEvent::SlipStarted => SimEvent::SlipStarted,
            MotionEvent::SlipEnded => SimEvent::SlipEnded,
        }
    }
}

impl From<AuxEvent> for SimEvent {
    fn from(e: AuxEvent) -> Self {
        match e {
            AuxEvent::InjectorStarted { index } => SimEvent::InjectorStarted { index },
            AuxEvent::InjectorStopped { index } => SimEvent::InjectorStopped { index },
        }
    }
}
