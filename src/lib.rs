#![cfg_attr(not(test), no_std)]

//! # irrigation-monitor-rs
//! ## A soil moisture and pH monitor for the BitDogLab RP2040 board
//!
//! Features:
//! - Three plant profiles (vegetables, cactus, orchid), cycled with button A
//! - Moisture health colour on the RGB LED
//! - Timed buzzer/LED alarm on pH out of band or irrigation start
//! - Irrigation tracking, acknowledged with button B
//! - Status text on the SSD1306 display and a profile glyph on the 5x5 matrix

pub mod config;
pub mod controller;
pub mod events;
pub mod matrix;
pub mod outputs;
pub mod profiles;
pub mod rendering;
pub mod sensors;
pub mod timer;
