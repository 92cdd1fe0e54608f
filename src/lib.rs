//! Drive a four-wire stepper motor coupled to a lead screw, moving by
//! *distance* instead of by steps.
//!
//! A [`LeadScrew`] owns the motor's four output lines (anything implementing
//! [`Device`]), converts distances and travel rates into step counts and step
//! delays, and walks the motor through the four full-step commutation
//! patterns, one step per elapsed delay.
//!
//! ```rust
//! use lead_screw::{func_device, LeadScrew, SystemClock};
//! use core::cell::Cell;
//!
//! /// A pretend clock which moves forward 1ms every time you look at it.
//! #[derive(Default)]
//! struct Ticker(Cell<u32>);
//!
//! impl SystemClock for Ticker {
//!     fn micros(&self) -> u32 {
//!         let now = self.0.get();
//!         self.0.set(now + 1_000);
//!         now
//!     }
//! }
//!
//! let mut steps = 0;
//! let clock = Ticker::default();
//!
//! {
//!     // an M8 thread has a 1.25mm pitch, on a 200 step/rev motor
//!     let dev = func_device(|_pattern| steps += 1);
//!     let mut screw = LeadScrew::with_distance_per_step(dev, 1.25 / 200.0)?;
//!     screw.set_speed(60.0)?; // mm per minute
//!
//!     screw.move_distance(2.5, &clock).unwrap();
//!     screw.disable().unwrap();
//! }
//!
//! // 400 steps, plus the write which turned the coils off
//! assert_eq!(steps, 401);
//! # Ok::<(), lead_screw::Error>(())
//! ```
//!
//! # Cargo Features
//!
//! - `std` - adds [`OperatingSystemClock`] and implements
//!   `std::error::Error` for [`Error`]
//! - `hal` - adds [`FourWire`], a [`Device`] built from four
//!   [`embedded-hal`](https://crates.io/crates/embedded-hal) output pins

#![no_std]

#[cfg(any(test, feature = "std"))]
#[macro_use]
extern crate std;

mod clock;
mod conversion;
mod device;
mod error;
#[cfg(feature = "hal")]
mod hal_devices;
mod lead_screw;
mod phase;

pub use crate::{
    clock::{elapsed_since, SystemClock},
    conversion::DistancePerStep,
    device::{fallible_func_device, func_device, Device},
    error::Error,
    lead_screw::LeadScrew,
    phase::{Direction, Pattern, Phase, PhaseSequencer},
};

#[cfg(feature = "std")]
pub use crate::clock::OperatingSystemClock;
#[cfg(feature = "hal")]
pub use crate::hal_devices::FourWire;
