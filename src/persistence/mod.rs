//! Simulation snapshots
//!
//! JSON dump of the full [`Simulation`]: arena, balls in order, frame
//! counter and seed. Queued commands are not saved. Loading re-checks the
//! same invariants construction enforces.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::error::{ArenaError, ConstructionError};
use crate::sim::{Arena, Simulation};

/// Snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot format: {0}")]
    Format(#[from] serde_json::Error),
    #[error("unsupported snapshot version {0}")]
    Version(u32),
    #[error("invalid arena in snapshot: {0}")]
    Arena(#[from] ArenaError),
    #[error("invalid ball {index} in snapshot: {source}")]
    Ball {
        index: usize,
        source: ConstructionError,
    },
    #[error("friction {0} out of range")]
    Friction(f32),
}

#[derive(serde::Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    simulation: &'a Simulation,
}

#[derive(serde::Deserialize)]
struct Envelope {
    version: u32,
    simulation: Simulation,
}

/// Serialize a simulation to a JSON string
pub fn to_json(sim: &Simulation) -> Result<String, SnapshotError> {
    let envelope = EnvelopeRef {
        version: SNAPSHOT_VERSION,
        simulation: sim,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Parse and validate a simulation from a JSON string
pub fn from_json(json: &str) -> Result<Simulation, SnapshotError> {
    let envelope: Envelope = serde_json::from_str(json)?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::Version(envelope.version));
    }
    let sim = envelope.simulation;

    Arena::new(sim.arena().width(), sim.arena().height())?;
    if !(sim.friction.is_finite() && sim.friction > 0.0 && sim.friction <= 1.0) {
        return Err(SnapshotError::Friction(sim.friction));
    }
    for (index, ball) in sim.balls().iter().enumerate() {
        ball.validate()
            .map_err(|source| SnapshotError::Ball { index, source })?;
    }
    Ok(sim)
}

pub fn save_snapshot(sim: &Simulation, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    fs::write(path, to_json(sim)?)?;
    log::info!("Saved snapshot at frame {} to {}", sim.frame, path.display());
    Ok(())
}

pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Simulation, SnapshotError> {
    let path = path.as_ref();
    let sim = from_json(&fs::read_to_string(path)?)?;
    log::info!("Loaded snapshot at frame {} from {}", sim.frame, path.display());
    Ok(sim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::tick;

    #[test]
    fn test_snapshot_resumes_identically() {
        let mut sim = Simulation::from_settings(&Settings::default()).unwrap();
        sim.push_command(crate::sim::Command::SetVelocity {
            index: 0,
            velocity: glam::Vec2::new(6.0, -3.0),
        })
        .unwrap();
        for _ in 0..30 {
            tick(&mut sim).unwrap();
        }

        let mut restored = from_json(&to_json(&sim).unwrap()).unwrap();
        assert_eq!(restored.frame, 30);
        assert_eq!(restored.balls(), sim.balls());

        for _ in 0..30 {
            tick(&mut sim).unwrap();
            tick(&mut restored).unwrap();
        }
        assert_eq!(restored.balls(), sim.balls());
    }

    #[test]
    fn test_snapshot_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");

        let mut sim = Simulation::from_settings(&Settings::default()).unwrap();
        for _ in 0..5 {
            tick(&mut sim).unwrap();
        }
        save_snapshot(&sim, &path).unwrap();

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.frame, 5);
        assert_eq!(loaded.friction, sim.friction);
        assert_eq!(loaded.order, sim.order);
        assert_eq!(loaded.rng_state, sim.rng_state);
        assert_eq!(loaded.balls(), sim.balls());
    }

    #[test]
    fn test_load_missing_snapshot_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_snapshot(dir.path().join("absent.json")),
            Err(SnapshotError::Io(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_ball() {
        let sim = Simulation::from_settings(&Settings::default()).unwrap();
        let json = to_json(&sim).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["simulation"]["balls"][1]["radius"] = serde_json::json!(-4.0);

        let err = from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, SnapshotError::Ball { index: 1, .. }));
    }

    #[test]
    fn test_rejects_unknown_version() {
        let sim = Simulation::from_settings(&Settings::default()).unwrap();
        let json = to_json(&sim).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["version"] = serde_json::json!(99);

        assert!(matches!(
            from_json(&value.to_string()),
            Err(SnapshotError::Version(99))
        ));
    }
}
