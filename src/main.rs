//! Billiards headless entry point
//!
//! Usage: `billiards [settings.json] [frames]`
//!
//! Places the balls, throws the first one with a synthetic drag, runs the
//! requested number of frames and prints the final state as JSON.

use std::process::ExitCode;

use glam::Vec2;

use billiards::consts::FRAME_RATE;
use billiards::persistence;
use billiards::platform::{PointerEvent, Session};
use billiards::renderer::InstanceBatch;
use billiards::{SetupError, Settings};

/// Default run length: ten seconds at the target frame rate
const DEFAULT_FRAMES: u64 = 10 * FRAME_RATE as u64;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Billiards (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };
    let frames = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(frames)) => frames,
        Some(Err(err)) => {
            log::error!("Invalid frame count: {err}");
            return ExitCode::FAILURE;
        }
        None => DEFAULT_FRAMES,
    };

    match run(&settings, frames) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error("setup failed: {0}")]
    Setup(#[from] SetupError),
    #[error("input rejected: {0}")]
    Input(#[from] billiards::CommandError),
    #[error("frame failed: {0}")]
    Step(#[from] billiards::StepError),
    #[error("snapshot failed: {0}")]
    Snapshot(#[from] persistence::SnapshotError),
}

fn run(settings: &Settings, frames: u64) -> Result<String, RunError> {
    let mut session = Session::new(settings)?;
    let mut batch = InstanceBatch::default();

    // Drag the first ball toward the arena center
    if let Some(first) = session.balls().first() {
        let center = Vec2::new(settings.arena_width, settings.arena_height) / 2.0;
        let origin = first.pos;
        session.queue_event(PointerEvent::Down(origin))?;
        session.queue_event(PointerEvent::Up(origin + (center - origin) * 0.5))?;
    }

    let mut collisions = 0;
    for _ in 0..frames {
        batch.clear();
        let stats = session.frame(&mut batch)?;
        collisions += stats.collisions;

        let sim = session.simulation();
        if sim.frame % FRAME_RATE as u64 == 0 {
            log::info!(
                "frame {}: energy={:.3} momentum={} collisions={}",
                sim.frame,
                sim.kinetic_energy(),
                sim.total_momentum(),
                collisions
            );
        }
        log::trace!("frame {}: {} discs drawn", sim.frame, batch.instances.len());
    }

    session.stop();
    Ok(persistence::to_json(session.simulation())?)
}
