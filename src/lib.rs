//! HomeSentry firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod alarm;
pub mod app;
pub mod config;
pub mod cursor;
pub mod error;
pub mod telegram;

pub mod pins;

// The ESP-IDF implementations inside are cfg-guarded; on host targets the
// same modules expose simulation stubs for tests.
pub mod adapters;
pub mod sensors;
