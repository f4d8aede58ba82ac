//! Billiards - a 2D disc collision simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (placement, integration, collisions)
//! - `renderer`: Render sink interface and GPU-ready disc batches
//! - `platform`: Pointer input and the per-frame session driver
//! - `persistence`: JSON snapshots of the simulation state
//! - `settings`: Data-driven simulation configuration

pub mod error;
pub mod palette;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{
    ArenaError, CommandError, ConstructionError, PlacementError, SettingsError, SetupError,
    StepError,
};
pub use palette::{HexColor, Palette, PaletteEntry};
pub use settings::Settings;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Target frame rate of the driver (one full pass per tick)
    pub const FRAME_RATE: u32 = 60;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Ball defaults
    pub const BALL_COUNT: usize = 5;
    pub const MIN_BALL_RADIUS: f32 = 15.0;
    pub const MAX_BALL_RADIUS: f32 = 30.0;

    /// Per-frame multiplicative velocity decay
    pub const FRICTION: f32 = 0.99;
    /// Drag distance to velocity scaling on pointer release
    pub const IMPULSE_SCALE: f32 = 0.1;

    /// Candidate draws before placement gives up
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;
}

/// Rotate a vector by `angle` radians (counter-clockwise in a y-up frame)
#[inline]
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}
