//! Household electrical-load monitor: reading validation, socket-group
//! aggregation and periodic safety and cost evaluation.

pub mod config;
pub mod devices;
pub mod io;
/// Tick engine, history log, load shedding and session statistics.
pub mod monitor;
pub mod readings;
