//! Simulation settings
//!
//! Loaded from an optional JSON file; every field falls back to the
//! reference setup (800x600 arena, five balls of radius 15-30).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{PlacementError, SettingsError};
use crate::palette::Palette;
use crate::sim::{Arena, CollisionOrder};

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Placement ===
    pub ball_count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Candidate draws before placement reports unsatisfiable density
    pub max_placement_attempts: u32,
    /// Run seed for reproducible placement
    pub seed: u64,
    pub palette: Palette,

    // === Physics ===
    /// Per-frame velocity multiplier, in (0, 1]
    pub friction: f32,
    /// Drag distance to velocity on pointer release
    pub impulse_scale: f32,
    pub collision_order: CollisionOrder,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            ball_count: BALL_COUNT,
            min_radius: MIN_BALL_RADIUS,
            max_radius: MAX_BALL_RADIUS,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            seed: 0x5EED,
            palette: Palette::default(),

            friction: FRICTION,
            impulse_scale: IMPULSE_SCALE,
            collision_order: CollisionOrder::Sequential,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file and validate them
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would make setup or stepping ill-defined
    pub fn validate(&self) -> Result<(), SettingsError> {
        Arena::new(self.arena_width, self.arena_height)?;

        if !(self.friction.is_finite() && self.friction > 0.0 && self.friction <= 1.0) {
            return Err(SettingsError::InvalidFriction(self.friction));
        }
        if !self.impulse_scale.is_finite() {
            return Err(SettingsError::InvalidImpulseScale(self.impulse_scale));
        }
        if self.max_placement_attempts == 0 && self.ball_count > 0 {
            return Err(SettingsError::NoPlacementAttempts);
        }
        if !(self.min_radius.is_finite()
            && self.max_radius.is_finite()
            && self.min_radius > 0.0
            && self.min_radius <= self.max_radius)
        {
            return Err(PlacementError::InvalidRadiusRange {
                min: self.min_radius,
                max: self.max_radius,
            }
            .into());
        }
        if self.ball_count > 0 && self.palette.is_empty() {
            return Err(PlacementError::EmptyPalette.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArenaError;

    #[test]
    fn test_defaults_match_reference_setup() {
        let settings = Settings::default();
        assert_eq!(settings.arena_width, 800.0);
        assert_eq!(settings.arena_height, 600.0);
        assert_eq!(settings.ball_count, 5);
        assert_eq!(settings.friction, 0.99);
        assert_eq!(settings.impulse_scale, 0.1);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{"ball_count": 8, "collision_order": "simultaneous"}"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.ball_count, 8);
        assert_eq!(settings.collision_order, CollisionOrder::Simultaneous);
        assert_eq!(settings.arena_width, ARENA_WIDTH);
        assert_eq!(settings.palette, Palette::default());
    }

    #[test]
    fn test_rejects_zero_area_arena() {
        let err = Settings::from_json(r#"{"arena_height": 0.0}"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Arena(ArenaError::Degenerate { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_friction() {
        for friction in [0.0, -0.5, 1.5, f32::NAN] {
            let settings = Settings {
                friction,
                ..Settings::default()
            };
            assert!(matches!(
                settings.validate(),
                Err(SettingsError::InvalidFriction(_))
            ));
        }
    }

    #[test]
    fn test_rejects_bad_radius_range() {
        let settings = Settings {
            min_radius: 40.0,
            max_radius: 20.0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Placement(PlacementError::InvalidRadiusRange { .. }))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Settings::load("/definitely/not/here/billiards.json"),
            Err(SettingsError::Io(_))
        ));
    }
}
