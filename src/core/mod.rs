// Rampart - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library, serde, chrono, rand.
// Must NOT depend on: ui, platform, app, or any I/O crate directly.

pub mod export;
pub mod filter;
pub mod fixtures;
pub mod ingest;
pub mod model;
pub mod stats;
