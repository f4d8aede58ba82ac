//! Platform glue around the simulation
//!
//! A [`Session`] owns the simulation and everything the host feeds it:
//! - Pointer events are queued as they arrive and drained once per frame
//! - Throws and recolors become commands applied before the physics pass
//! - Rendering happens after the pass, from a read-only view

pub mod input;

use std::collections::VecDeque;

use glam::Vec2;

pub use input::{InputAction, PointerEvent, PointerTracker, hit_test};

use crate::error::{CommandError, SetupError, StepError};
use crate::palette::{HexColor, Palette};
use crate::renderer::{RenderSink, render};
use crate::settings::Settings;
use crate::sim::{Ball, Command, FrameStats, Simulation, tick};

/// One running simulation plus its input state
#[derive(Debug)]
pub struct Session {
    sim: Simulation,
    palette: Palette,
    tracker: PointerTracker,
    events: VecDeque<PointerEvent>,
    /// Ball waiting for the color picker's answer
    picking: Option<usize>,
    running: bool,
}

impl Session {
    /// Place the balls and get ready for the first frame
    pub fn new(settings: &Settings) -> Result<Self, SetupError> {
        let sim = Simulation::from_settings(settings)?;
        Ok(Self::with_simulation(
            sim,
            settings.palette.clone(),
            settings.impulse_scale,
        ))
    }

    /// Wrap an existing simulation (e.g. a loaded snapshot)
    pub fn with_simulation(sim: Simulation, palette: Palette, impulse_scale: f32) -> Self {
        Self {
            sim,
            palette,
            tracker: PointerTracker::new(impulse_scale),
            events: VecDeque::new(),
            picking: None,
            running: true,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn balls(&self) -> &[Ball] {
        self.sim.balls()
    }

    /// Colors offered by the picker
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ball the color picker should be showing, if any
    pub fn pending_color_pick(&self) -> Option<usize> {
        self.picking
    }

    /// Queue a pointer event; it takes effect on the next frame
    ///
    /// Non-finite positions are refused immediately.
    pub fn queue_event(&mut self, event: PointerEvent) -> Result<(), CommandError> {
        let point = event.point();
        if !point.is_finite() {
            return Err(CommandError::NonFinitePoint {
                x: point.x,
                y: point.y,
            });
        }
        if self.running {
            self.events.push_back(event);
        }
        Ok(())
    }

    /// Throw a ball directly, bypassing pointer input
    pub fn set_velocity(&mut self, index: usize, velocity: Vec2) -> Result<(), CommandError> {
        self.sim
            .push_command(Command::SetVelocity { index, velocity })
    }

    /// Recolor a ball on the next frame
    pub fn set_color(&mut self, index: usize, color: HexColor) -> Result<(), CommandError> {
        self.sim.push_command(Command::SetColor { index, color })
    }

    /// Answer the color picker for the ball it was opened on
    ///
    /// Returns `Ok(false)` when no pick was pending.
    pub fn choose_color(&mut self, color: HexColor) -> Result<bool, CommandError> {
        let Some(index) = self.picking.take() else {
            return Ok(false);
        };
        self.set_color(index, color)?;
        Ok(true)
    }

    /// Dismiss the color picker without a choice
    pub fn cancel_color_pick(&mut self) {
        self.picking = None;
    }

    /// Run one frame: drain input, step physics, render
    ///
    /// A stopped session does nothing. A step error stops the session.
    /// Throws the simulation refuses (e.g. an impulse that overflows) are
    /// counted in [`FrameStats::rejected_inputs`].
    pub fn frame<S>(&mut self, sink: &mut S) -> Result<FrameStats, StepError>
    where
        S: RenderSink + ?Sized,
    {
        if !self.running {
            return Ok(FrameStats::default());
        }

        let mut rejected = 0;
        while let Some(event) = self.events.pop_front() {
            match self.tracker.handle(event, self.sim.balls()) {
                Some(InputAction::Command(command)) => {
                    if let Err(err) = self.sim.push_command(command) {
                        log::warn!("Rejected pointer command: {err}");
                        rejected += 1;
                    }
                }
                Some(InputAction::PickColor(index)) => {
                    log::debug!("Color picker requested for ball {index}");
                    self.picking = Some(index);
                }
                None => {}
            }
        }

        let mut stats = match tick(&mut self.sim) {
            Ok(stats) => stats,
            Err(err) => {
                self.stop();
                return Err(err);
            }
        };

        stats.rejected_inputs = rejected;
        render(self.sim.balls(), sink);
        Ok(stats)
    }

    /// Stop requesting frames and detach input; state is left as-is
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Session stopped at frame {}", self.sim.frame);
        }
        self.running = false;
        self.events.clear();
        self.tracker.cancel();
        self.picking = None;
    }
}
