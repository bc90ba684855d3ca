// Rampart - app/mod.rs
//
// Application layer: orchestration, state management, catalogue loading.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod catalogue;
pub mod session;
pub mod state;
