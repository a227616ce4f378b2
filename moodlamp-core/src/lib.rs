//! Hardware-free moodlamp logic.
//!
//! Everything in this crate is pure state and byte-level protocol code:
//! the actuator state record and its invariants, the touch-input state
//! machine, servo sweep planning, HTTP route parsing and the captive-portal
//! DNS/DHCP codecs. The firmware crate owns all peripherals and I/O and
//! drives these types from its tasks.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod dhcp;
pub mod dns;
pub mod routes;
pub mod servo;
pub mod state;
pub mod touch;

pub use state::{ActuatorState, SweepDirection};
