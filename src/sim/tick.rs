//! Per-frame simulation pass
//!
//! Advances every ball once per tick. Velocities are in arena units per
//! frame and friction is applied per frame, so the simulation speed is tied
//! to the driver's frame rate rather than wall-clock time.

use glam::Vec2;

use super::collision::{elastic_response, is_approaching, resolve_against_all};
use super::state::{Arena, Ball, CollisionOrder, Simulation};
use crate::error::StepError;
use crate::palette::HexColor;

/// Point writes applied between frames
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Overwrite a ball's velocity (drag-release throw)
    SetVelocity { index: usize, velocity: Vec2 },
    /// Recolor a ball (color picker)
    SetColor { index: usize, color: HexColor },
}

impl Command {
    /// Target ball
    pub fn index(&self) -> usize {
        match self {
            Command::SetVelocity { index, .. } | Command::SetColor { index, .. } => *index,
        }
    }
}

/// Axes on which a ball touched or crossed a wall this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHits {
    pub x: bool,
    pub y: bool,
}

impl WallHits {
    pub fn any(&self) -> bool {
        self.x || self.y
    }
}

/// What happened during one frame pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub commands: usize,
    pub wall_bounces: usize,
    pub collisions: usize,
    /// Pointer throws refused before reaching the queue
    pub rejected_inputs: usize,
}

/// Friction, motion and wall reflection for a single ball
///
/// Each axis is tested independently. The position is not clamped, so a
/// ball may sit past a wall for one frame before the flipped velocity
/// brings it back.
pub fn integrate(ball: &mut Ball, arena: &Arena, friction: f32) -> WallHits {
    ball.vel *= friction;
    ball.pos += ball.vel;

    let r = ball.radius();
    let hits = WallHits {
        x: ball.pos.x - r <= 0.0 || ball.pos.x + r >= arena.width(),
        y: ball.pos.y - r <= 0.0 || ball.pos.y + r >= arena.height(),
    };
    if hits.x {
        ball.vel.x = -ball.vel.x;
    }
    if hits.y {
        ball.vel.y = -ball.vel.y;
    }
    hits
}

/// Advance ball `index` by one frame and resolve it against the others
///
/// Returns the wall hits and the number of collisions resolved.
pub fn step(
    balls: &mut [Ball],
    index: usize,
    arena: &Arena,
    friction: f32,
) -> (WallHits, usize) {
    let hits = integrate(&mut balls[index], arena, friction);
    let collisions = resolve_against_all(balls, index);
    (hits, collisions)
}

/// Resolve every overlapping pair against one velocity snapshot
///
/// A ball in several contacts receives the sum of the per-pair changes.
pub fn resolve_simultaneous(balls: &mut [Ball]) -> usize {
    let snapshot = balls.to_vec();
    let mut deltas = vec![Vec2::ZERO; balls.len()];
    let mut collisions = 0;

    for (i, a) in snapshot.iter().enumerate() {
        for (j, b) in snapshot.iter().enumerate().skip(i + 1) {
            if !(a.overlaps(b) && is_approaching(a, b)) {
                continue;
            }
            let (v1, v2) = elastic_response(a, b);
            deltas[i] += v1 - a.vel;
            deltas[j] += v2 - b.vel;
            collisions += 1;
        }
    }

    for (ball, delta) in balls.iter_mut().zip(deltas) {
        ball.vel += delta;
    }
    collisions
}

fn apply_command(balls: &mut [Ball], command: Command) {
    // Indices were checked when the command was queued and balls are never removed
    let index = command.index();
    debug_assert!(index < balls.len(), "command for missing ball {index}");
    let Some(ball) = balls.get_mut(index) else {
        log::error!("Dropped {command:?}: no ball at index {index}");
        return;
    };
    match command {
        Command::SetVelocity { velocity, .. } => ball.vel = velocity,
        Command::SetColor { color, .. } => ball.set_color(color),
    }
}

/// Advance the simulation by one frame
///
/// Queued commands are applied first, then every ball is stepped. A ball
/// that ends the frame with a non-finite position or velocity aborts the
/// session with [`StepError::NonFinite`].
pub fn tick(sim: &mut Simulation) -> Result<FrameStats, StepError> {
    let mut stats = FrameStats::default();

    while let Some(command) = sim.pending.pop_front() {
        apply_command(&mut sim.balls, command);
        stats.commands += 1;
    }

    let arena = sim.arena;
    let friction = sim.friction;

    match sim.order {
        CollisionOrder::Sequential => {
            for index in 0..sim.balls.len() {
                let (hits, collisions) = step(&mut sim.balls, index, &arena, friction);
                stats.wall_bounces += usize::from(hits.any());
                stats.collisions += collisions;
            }
        }
        CollisionOrder::Simultaneous => {
            for ball in sim.balls.iter_mut() {
                let hits = integrate(ball, &arena, friction);
                stats.wall_bounces += usize::from(hits.any());
            }
            stats.collisions = resolve_simultaneous(&mut sim.balls);
        }
    }

    if let Some(index) = sim
        .balls
        .iter()
        .position(|b| !(b.pos.is_finite() && b.vel.is_finite()))
    {
        log::error!("Ball {} became non-finite at frame {}", index, sim.frame);
        return Err(StepError::NonFinite {
            index,
            frame: sim.frame,
        });
    }

    sim.frame += 1;
    Ok(stats)
}
