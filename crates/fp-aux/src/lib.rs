//! fp-aux: the steam the engine spends on itself.
//!
//! - `injector`: live-steam injectors feeding the boiler from the tender
//! - `consumers`: blower, brake feed, turbo-generator, stoker, heating
//! - `auxiliaries`: the per-tick pass debiting them all against the boiler

pub mod auxiliaries;
pub mod consumers;
pub mod injector;

pub use auxiliaries::{AuxEvent, AuxInputs, AuxOutcome, AuxState, Auxiliaries};
pub use consumers::blower_steam_lb_per_s;
pub use injector::{Injector, InjectorState, InjectorTick};
