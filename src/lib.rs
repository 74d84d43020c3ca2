//! BrightDial firmware library.
//!
//! Exposes the pure-logic modules (bargraph animation engine, connectivity
//! bring-up, control loop) for integration testing and external inspection.
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod bargraph;
pub mod bringup;
pub mod config;
pub mod control;
pub mod error;
pub mod ports;
pub mod rotary;

pub mod pins;

// Adapters compile everywhere; the ESP-IDF implementations are guarded
// by cfg attributes inside, with host simulations alongside.
pub mod adapters;
