//! Core module
//!
//! The verification core: algorithm catalogue, digest engine, checksum
//! files, comparison policy and the state controller.

pub mod algorithm;
pub mod checksum;
pub mod compare;
pub mod controller;
pub mod engine;
