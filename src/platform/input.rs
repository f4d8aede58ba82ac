//! Pointer input to simulation commands
//!
//! Drag-to-throw: pressing on a ball selects it, releasing sets its
//! velocity to the drag vector scaled by the impulse constant. Clicking a
//! ball asks the color picker to open for it.

use glam::Vec2;

use crate::sim::{Ball, Command};

/// Raw pointer events in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Up(Vec2),
    Click(Vec2),
}

impl PointerEvent {
    /// Arena-space position of the event
    pub fn point(&self) -> Vec2 {
        match *self {
            Self::Down(p) | Self::Up(p) | Self::Click(p) => p,
        }
    }
}

/// What an event asks the session to do
#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    /// Queue a command for the next frame
    Command(Command),
    /// Surface a ball to the color picker
    PickColor(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    index: usize,
    origin: Vec2,
}

/// Index of the topmost ball under `point`
///
/// Balls are drawn in list order, so the last hit is the one on top.
pub fn hit_test(balls: &[Ball], point: Vec2) -> Option<usize> {
    balls.iter().rposition(|b| b.contains(point))
}

/// Tracks drag state between pointer-down and pointer-up
#[derive(Debug, Clone)]
pub struct PointerTracker {
    impulse_scale: f32,
    drag: Option<Drag>,
}

impl PointerTracker {
    pub fn new(impulse_scale: f32) -> Self {
        Self {
            impulse_scale,
            drag: None,
        }
    }

    /// Ball currently held, if any
    pub fn dragging(&self) -> Option<usize> {
        self.drag.map(|d| d.index)
    }

    /// Forget any drag in progress
    pub fn cancel(&mut self) {
        self.drag = None;
    }

    pub fn handle(&mut self, event: PointerEvent, balls: &[Ball]) -> Option<InputAction> {
        match event {
            PointerEvent::Down(point) => {
                self.drag = hit_test(balls, point).map(|index| Drag {
                    index,
                    origin: point,
                });
                None
            }
            PointerEvent::Up(point) => {
                let drag = self.drag.take()?;
                let velocity = (point - drag.origin) * self.impulse_scale;
                Some(InputAction::Command(Command::SetVelocity {
                    index: drag.index,
                    velocity,
                }))
            }
            PointerEvent::Click(point) => hit_test(balls, point).map(InputAction::PickColor),
        }
    }
}
