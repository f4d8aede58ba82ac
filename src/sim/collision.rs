//! Ball-ball collision detection and response
//!
//! Equal-mass elastic collisions, solved in a frame rotated so the line of
//! centers lies on the x-axis. That reduces the 2D problem to a 1D exchange
//! of the normal components while the tangential components pass through.
//! No positional separation is done: overlapping balls stay overlapped
//! until their velocities carry them apart.

use glam::Vec2;

use super::state::Ball;
use crate::rotate;

/// Unit masses. Kept general so the 1D law reads as the textbook form.
const MASS: f32 = 1.0;

/// True when `ball` moves toward `other` along the line of centers
///
/// Uses `dot(v1 - v2, c2 - c1) >= 0`; zero relative motion counts as
/// approaching.
#[inline]
pub fn is_approaching(ball: &Ball, other: &Ball) -> bool {
    let rel_v = ball.vel - other.vel;
    let rel_c = other.pos - ball.pos;
    rel_v.dot(rel_c) >= 0.0
}

/// Post-collision velocities for two approaching balls
///
/// Pure helper behind [`resolve`]; does not check overlap or approach.
pub fn elastic_response(ball: &Ball, other: &Ball) -> (Vec2, Vec2) {
    let (m1, m2) = (MASS, MASS);

    let delta = other.pos - ball.pos;
    let angle = -delta.y.atan2(delta.x);

    let u1 = rotate(ball.vel, angle);
    let u2 = rotate(other.vel, angle);

    let v1x = u1.x * (m1 - m2) / (m1 + m2) + u2.x * 2.0 * m2 / (m1 + m2);
    let v2x = u2.x * (m1 - m2) / (m1 + m2) + u1.x * 2.0 * m1 / (m1 + m2);

    (
        rotate(Vec2::new(v1x, u1.y), -angle),
        rotate(Vec2::new(v2x, u2.y), -angle),
    )
}

/// Resolve a collision between two balls, mutating both velocities
///
/// The caller has already established overlap. Separating pairs are left
/// untouched. Returns whether velocities changed.
pub fn resolve(ball: &mut Ball, other: &mut Ball) -> bool {
    if !is_approaching(ball, other) {
        return false;
    }
    let (v1, v2) = elastic_response(ball, other);
    ball.vel = v1;
    other.vel = v2;
    true
}

/// Borrow two distinct balls mutably
///
/// Panics if `a == b`; a ball never collides with itself.
pub fn pair_mut(balls: &mut [Ball], a: usize, b: usize) -> (&mut Ball, &mut Ball) {
    assert_ne!(a, b, "a ball cannot collide with itself");
    if a < b {
        let (head, tail) = balls.split_at_mut(b);
        (&mut head[a], &mut tail[0])
    } else {
        let (head, tail) = balls.split_at_mut(a);
        (&mut tail[0], &mut head[b])
    }
}

/// Resolve ball `index` against every other overlapping ball, in list order
///
/// Returns the number of resolutions applied.
pub fn resolve_against_all(balls: &mut [Ball], index: usize) -> usize {
    let mut hits = 0;
    for other in 0..balls.len() {
        if other == index {
            continue;
        }
        let (ball, other) = pair_mut(balls, index, other);
        if ball.overlaps(other) && resolve(ball, other) {
            hits += 1;
        }
    }
    hits
}
