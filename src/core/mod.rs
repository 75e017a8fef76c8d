//! World data and simulation.
//!
//! - `math`: angle normalization
//! - `map`: tiles, faces, spawn points
//! - `maze`: text map loading
//! - `ray`: per-column cast result
//! - `sprite`: animated billboards
//! - `player`: the viewpoint
//! - `process_events`: input commands and movement

pub mod map;
pub mod math;
pub mod maze;
pub mod player;
pub mod process_events;
pub mod ray;
pub mod sprite;
