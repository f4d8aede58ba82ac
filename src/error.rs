//! Error types for setup, commands and frame stepping

use thiserror::Error;

/// Rejected ball construction
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConstructionError {
    #[error("ball radius must be positive and finite (got {0})")]
    InvalidRadius(f32),
    #[error("ball position must be finite (got {x}, {y})")]
    NonFinitePosition { x: f32, y: f32 },
    #[error("ball velocity must be finite (got {x}, {y})")]
    NonFiniteVelocity { x: f32, y: f32 },
}

/// Arena bounds that cannot host a simulation
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ArenaError {
    #[error("arena must have positive finite area (got {width}x{height})")]
    Degenerate { width: f32, height: f32 },
}

/// Failure to produce the initial ball set
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlacementError {
    #[error("unsatisfiable density: placed {placed} of {requested} balls in {attempts} attempts")]
    Unsatisfiable {
        placed: usize,
        requested: usize,
        attempts: u32,
    },
    #[error("invalid radius range [{min}, {max})")]
    InvalidRadiusRange { min: f32, max: f32 },
    #[error("ball of radius {max_radius} cannot fit in a {width}x{height} arena")]
    ArenaTooSmall {
        max_radius: f32,
        width: f32,
        height: f32,
    },
    #[error("palette has no colors")]
    EmptyPalette,
    #[error(transparent)]
    Arena(#[from] ArenaError),
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

/// Rejected between-frame command
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CommandError {
    #[error("no ball at index {index} ({len} balls)")]
    UnknownBall { index: usize, len: usize },
    #[error("injected velocity must be finite (got {x}, {y})")]
    NonFiniteVelocity { x: f32, y: f32 },
    #[error("pointer position must be finite (got {x}, {y})")]
    NonFinitePoint { x: f32, y: f32 },
}

/// Fatal failure during a frame pass
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StepError {
    #[error("ball {index} left finite space at frame {frame}")]
    NonFinite { index: usize, frame: u64 },
}

/// Configuration loading and validation failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("friction must be within (0, 1] (got {0})")]
    InvalidFriction(f32),
    #[error("impulse scale must be finite (got {0})")]
    InvalidImpulseScale(f32),
    #[error("max placement attempts must be at least 1")]
    NoPlacementAttempts,
    #[error(transparent)]
    Arena(#[from] ArenaError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// Anything that can abort session setup
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
}
