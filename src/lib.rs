//! Joystick / OLED demo firmware for the STM32F103 "Blue Pill".
//!
//! The library holds everything that does not touch a concrete peripheral so
//! it can be tested on the host:
//!
//! ```bash
//! cargo test --lib --target x86_64-unknown-linux-gnu
//! ```
//!
//! The firmware itself lives in `src/bin/joystick.rs`.

#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod config;
pub mod hardware;
pub mod input;
pub mod joystick;
pub mod leds;
pub mod render;

#[cfg(test)]
mod test_support;
