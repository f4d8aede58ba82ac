//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - One pass per frame tick, velocities in units per frame
//! - Seeded RNG only (placement)
//! - Stable iteration order (ball index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod placement;
pub mod state;
pub mod tick;

pub use collision::{elastic_response, is_approaching, pair_mut, resolve, resolve_against_all};
pub use placement::generate;
pub use state::{Arena, Ball, CollisionOrder, RngState, Simulation};
pub use tick::{Command, FrameStats, WallHits, integrate, resolve_simultaneous, step, tick};
