//! # Petromon
//!
//! A simulated petrochemical plant monitoring backend. Fabricates sensor
//! readings for reactors, pipelines, tanks, pumps, and blast-zone safety
//! sensors, exposes one-shot snapshots over REST, and pushes fresh snapshots
//! to all connected WebSocket clients on a fixed schedule.
//!
//! There is no real sensor integration and no persistence; this is a
//! data-mocking and fan-out broadcast service.

pub mod broadcaster;
pub mod config;
pub mod downstream;
pub mod generator;
pub mod logger;
pub mod model;
pub mod registry;
