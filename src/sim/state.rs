//! Simulation state and core types
//!
//! All state that must be persisted for snapshots/determinism lives here.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::placement::generate;
use super::tick::Command;
use crate::error::{ArenaError, CommandError, ConstructionError, SetupError};
use crate::palette::HexColor;
use crate::settings::Settings;

/// Fixed rectangular bounds, origin top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    width: f32,
    height: f32,
}

impl Arena {
    /// Rejects zero-area or non-finite bounds
    pub fn new(width: f32, height: f32) -> Result<Self, ArenaError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ArenaError::Degenerate { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

/// A disc. Identity is its index in the owning [`Simulation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    radius: f32,
    color: HexColor,
}

impl Ball {
    pub fn new(
        pos: Vec2,
        radius: f32,
        vel: Vec2,
        color: HexColor,
    ) -> Result<Self, ConstructionError> {
        let ball = Self {
            pos,
            vel,
            radius,
            color,
        };
        ball.validate()?;
        Ok(ball)
    }

    /// Check construction invariants (also used after deserializing)
    pub fn validate(&self) -> Result<(), ConstructionError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConstructionError::InvalidRadius(self.radius));
        }
        if !self.pos.is_finite() {
            return Err(ConstructionError::NonFinitePosition {
                x: self.pos.x,
                y: self.pos.y,
            });
        }
        if !self.vel.is_finite() {
            return Err(ConstructionError::NonFiniteVelocity {
                x: self.vel.x,
                y: self.vel.y,
            });
        }
        Ok(())
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn color(&self) -> &HexColor {
        &self.color
    }

    /// Cosmetic only, no physical effect
    pub fn set_color(&mut self, color: HexColor) {
        self.color = color;
    }

    /// Point strictly inside the disc
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.radius
    }

    /// Discs intersect (touching does not count)
    pub fn overlaps(&self, other: &Ball) -> bool {
        self.pos.distance(other.pos) < self.radius + other.radius
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// How pair resolutions within one frame see each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionOrder {
    /// Each ball is integrated then resolved against the others in list
    /// order; later resolutions read velocities already changed this frame.
    #[default]
    Sequential,
    /// All balls are integrated first, then every overlapping pair is
    /// resolved against the same post-integration velocity snapshot.
    Simultaneous,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    pub(crate) arena: Arena,
    /// Ordered by creation; the order is part of the physics
    pub(crate) balls: Vec<Ball>,
    /// Per-frame velocity multiplier
    pub friction: f32,
    pub order: CollisionOrder,
    /// Completed frame passes
    pub frame: u64,
    pub rng_state: RngState,
    /// Commands waiting for the next frame
    #[serde(skip)]
    pub(crate) pending: VecDeque<Command>,
}

impl Simulation {
    pub fn new(arena: Arena, balls: Vec<Ball>, friction: f32) -> Self {
        Self {
            arena,
            balls,
            friction,
            order: CollisionOrder::default(),
            frame: 0,
            rng_state: RngState::new(0),
            pending: VecDeque::new(),
        }
    }

    /// Validate settings and place the initial balls
    pub fn from_settings(settings: &Settings) -> Result<Self, SetupError> {
        settings.validate()?;
        let arena = Arena::new(settings.arena_width, settings.arena_height)
            .map_err(crate::error::SettingsError::from)?;
        let rng_state = RngState::new(settings.seed);
        let mut rng = rng_state.to_rng();
        let balls = generate(
            &arena,
            settings.ball_count,
            settings.min_radius,
            settings.max_radius,
            &settings.palette,
            settings.max_placement_attempts,
            &mut rng,
        )?;

        log::info!(
            "Placed {} balls in {}x{} arena (seed {})",
            balls.len(),
            arena.width(),
            arena.height(),
            settings.seed
        );

        let mut sim = Self::new(arena, balls, settings.friction);
        sim.order = settings.collision_order;
        sim.rng_state = rng_state;
        Ok(sim)
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Read-only view for renderers and UI
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Queue a command for the start of the next frame
    pub fn push_command(&mut self, command: Command) -> Result<(), CommandError> {
        let index = command.index();
        if index >= self.balls.len() {
            return Err(CommandError::UnknownBall {
                index,
                len: self.balls.len(),
            });
        }
        if let Command::SetVelocity { velocity, .. } = command {
            if !velocity.is_finite() {
                return Err(CommandError::NonFiniteVelocity {
                    x: velocity.x,
                    y: velocity.y,
                });
            }
        }
        self.pending.push_back(command);
        Ok(())
    }

    pub fn pending_commands(&self) -> usize {
        self.pending.len()
    }

    /// Sum of velocities (unit masses)
    pub fn total_momentum(&self) -> Vec2 {
        self.balls.iter().map(|b| b.vel).sum()
    }

    /// Sum of ½|v|² (unit masses)
    pub fn kinetic_energy(&self) -> f32 {
        self.balls.iter().map(|b| 0.5 * b.vel.length_squared()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> HexColor {
        HexColor::parse("#FFFFFF").unwrap()
    }

    #[test]
    fn test_arena_rejects_zero_area() {
        assert!(Arena::new(0.0, 600.0).is_err());
        assert!(Arena::new(800.0, -1.0).is_err());
        assert!(Arena::new(f32::INFINITY, 600.0).is_err());
        assert!(Arena::new(f32::NAN, 600.0).is_err());
        assert!(Arena::new(800.0, 600.0).is_ok());
    }

    #[test]
    fn test_ball_rejects_bad_radius() {
        let err = Ball::new(Vec2::ZERO, 0.0, Vec2::ZERO, white()).unwrap_err();
        assert_eq!(err, ConstructionError::InvalidRadius(0.0));
        assert!(Ball::new(Vec2::ZERO, -3.0, Vec2::ZERO, white()).is_err());
        assert!(Ball::new(Vec2::ZERO, f32::NAN, Vec2::ZERO, white()).is_err());
    }

    #[test]
    fn test_ball_rejects_non_finite_state() {
        let pos = Vec2::new(f32::NAN, 1.0);
        assert!(matches!(
            Ball::new(pos, 5.0, Vec2::ZERO, white()),
            Err(ConstructionError::NonFinitePosition { .. })
        ));
        let vel = Vec2::new(0.0, f32::INFINITY);
        assert!(matches!(
            Ball::new(Vec2::ZERO, 5.0, vel, white()),
            Err(ConstructionError::NonFiniteVelocity { .. })
        ));
    }

    #[test]
    fn test_overlap_excludes_touching() {
        let a = Ball::new(Vec2::new(100.0, 300.0), 20.0, Vec2::ZERO, white()).unwrap();
        let b = Ball::new(Vec2::new(140.0, 300.0), 20.0, Vec2::ZERO, white()).unwrap();
        assert!(!a.overlaps(&b));
        let c = Ball::new(Vec2::new(139.0, 300.0), 20.0, Vec2::ZERO, white()).unwrap();
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_push_command_validates_index() {
        let arena = Arena::new(800.0, 600.0).unwrap();
        let ball = Ball::new(Vec2::new(100.0, 100.0), 10.0, Vec2::ZERO, white()).unwrap();
        let mut sim = Simulation::new(arena, vec![ball], 0.99);

        let err = sim
            .push_command(Command::SetVelocity {
                index: 3,
                velocity: Vec2::ONE,
            })
            .unwrap_err();
        assert_eq!(err, CommandError::UnknownBall { index: 3, len: 1 });

        let err = sim
            .push_command(Command::SetVelocity {
                index: 0,
                velocity: Vec2::new(f32::NAN, 0.0),
            })
            .unwrap_err();
        assert!(matches!(err, CommandError::NonFiniteVelocity { .. }));

        sim.push_command(Command::SetColor {
            index: 0,
            color: white(),
        })
        .unwrap();
        assert_eq!(sim.pending_commands(), 1);
    }

    #[test]
    fn test_from_settings_is_deterministic() {
        let settings = Settings::default();
        let a = Simulation::from_settings(&settings).unwrap();
        let b = Simulation::from_settings(&settings).unwrap();
        assert_eq!(a.balls(), b.balls());
        assert_eq!(a.balls().len(), settings.ball_count);
    }

    #[test]
    fn test_from_settings_rejects_degenerate_arena() {
        let settings = Settings {
            arena_width: 0.0,
            ..Settings::default()
        };
        assert!(Simulation::from_settings(&settings).is_err());
    }
}
