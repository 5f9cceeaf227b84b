//! Discrete boiler-side notifications.
//!
//! Every variant is edge-triggered: the producing component pushes it only
//! on the tick where the underlying condition changes, never repeatedly.

/// Fire-and-forget notification from the tender, firebox, or pressure
/// vessel. Consumed by audio/log collaborators; carries no reply channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoilerEvent {
    CoalExhausted,
    WaterExhausted,
    FireOut,
    GrateLimitExceeded,
    SafetyValveOpened,
    SafetyValveClosed,
    FusiblePlugBlown,
    PrimingStarted,
    PrimingStopped,
}
