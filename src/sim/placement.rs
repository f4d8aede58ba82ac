//! Initial ball placement by rejection sampling

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{Arena, Ball};
use crate::error::PlacementError;
use crate::palette::Palette;

/// Place `count` non-overlapping balls fully inside the arena.
///
/// Each candidate draws a radius in `[min_radius, max_radius)` and a center
/// that keeps the disc inside the bounds, and is rejected if it overlaps
/// any ball accepted so far. Gives up after `max_attempts` candidates.
pub fn generate<R: Rng + ?Sized>(
    arena: &Arena,
    count: usize,
    min_radius: f32,
    max_radius: f32,
    palette: &Palette,
    max_attempts: u32,
    rng: &mut R,
) -> Result<Vec<Ball>, PlacementError> {
    if !(min_radius.is_finite()
        && max_radius.is_finite()
        && min_radius > 0.0
        && min_radius <= max_radius)
    {
        return Err(PlacementError::InvalidRadiusRange {
            min: min_radius,
            max: max_radius,
        });
    }
    // Center interval [r, size - r) must be non-empty for every radius
    if 2.0 * max_radius >= arena.width().min(arena.height()) {
        return Err(PlacementError::ArenaTooSmall {
            max_radius,
            width: arena.width(),
            height: arena.height(),
        });
    }
    if palette.is_empty() && count > 0 {
        return Err(PlacementError::EmptyPalette);
    }

    let mut balls: Vec<Ball> = Vec::with_capacity(count);
    let mut attempts = 0u32;

    while balls.len() < count {
        if attempts >= max_attempts {
            log::warn!(
                "Placement gave up after {} attempts ({}/{} placed)",
                attempts,
                balls.len(),
                count
            );
            return Err(PlacementError::Unsatisfiable {
                placed: balls.len(),
                requested: count,
                attempts,
            });
        }
        attempts += 1;

        let radius = if min_radius < max_radius {
            rng.random_range(min_radius..max_radius)
        } else {
            min_radius
        };
        let pos = Vec2::new(
            rng.random_range(radius..arena.width() - radius),
            rng.random_range(radius..arena.height() - radius),
        );

        if balls
            .iter()
            .any(|b| pos.distance(b.pos) < radius + b.radius())
        {
            continue;
        }

        let Some(entry) = palette.entries().choose(rng) else {
            return Err(PlacementError::EmptyPalette);
        };
        balls.push(Ball::new(pos, radius, Vec2::ZERO, entry.code.clone())?);
    }

    log::debug!("Placed {} balls in {} attempts", balls.len(), attempts);
    Ok(balls)
}
