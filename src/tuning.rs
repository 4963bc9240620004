//! Data-driven game balance
//!
//! Every number that shapes difficulty lives here. Layout geometry is not
//! tunable and stays in `sim::layout`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::secs_to_ticks;

/// Lowest spawn interval floor accepted, in seconds
pub const MIN_SPAWN_FLOOR_SECS: f32 = 4.0;

/// Shortest meal, in ticks. The serve tick already counts one down, so a
/// single-tick meal would end on the tick the cat was served.
pub const MIN_EATING_TICKS: u32 = 2;

/// How the spawn interval shrinks as more cats are served
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpawnCurve {
    /// floor + (initial - floor) * decay^served
    Exponential { decay: f32 },
    /// Straight line from initial down to floor over `services_to_floor` services
    Linear { services_to_floor: u32 },
}

impl Default for SpawnCurve {
    fn default() -> Self {
        SpawnCurve::Exponential { decay: 0.9 }
    }
}

/// Tuning failures
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Avatar movement per tick
    pub avatar_speed: f32,
    /// Customer walking speed per tick (entering and leaving)
    pub walk_speed: f32,
    /// Time a served customer spends eating, in seconds
    pub eating_secs: f32,
    /// Patience of a customer spawned with nothing served yet
    pub patience_base_secs: f32,
    /// Patience never drops below this
    pub patience_floor_secs: f32,
    /// Patience drops by one second every this many services
    pub patience_drop_every: u32,
    /// Remaining-patience fraction at which a seated cat meows
    pub impatient_fraction: f32,
    /// Spawn interval with nothing served yet
    pub spawn_initial_secs: f32,
    /// Spawn interval never drops below this
    pub spawn_floor_secs: f32,
    pub spawn_curve: SpawnCurve,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            avatar_speed: 3.0,
            walk_speed: 2.0,
            eating_secs: 2.0,
            patience_base_secs: 12.0,
            patience_floor_secs: 5.0,
            patience_drop_every: 3,
            impatient_fraction: 0.25,
            spawn_initial_secs: 8.0,
            spawn_floor_secs: 4.5,
            spawn_curve: SpawnCurve::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that every value keeps the game playable
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
            TuningError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !(self.avatar_speed > 0.0) {
            return Err(invalid("avatar_speed", "must be positive"));
        }
        if !(self.walk_speed > 0.0) {
            return Err(invalid("walk_speed", "must be positive"));
        }
        if !(self.eating_secs > 0.0) || secs_to_ticks(self.eating_secs) < MIN_EATING_TICKS {
            return Err(invalid(
                "eating_secs",
                format!("must last at least {MIN_EATING_TICKS} ticks"),
            ));
        }
        if !(self.patience_floor_secs > 0.0) || secs_to_ticks(self.patience_floor_secs) == 0 {
            return Err(invalid("patience_floor_secs", "must last at least one tick"));
        }
        if self.patience_base_secs < self.patience_floor_secs {
            return Err(invalid(
                "patience_base_secs",
                format!("must be at least the floor ({})", self.patience_floor_secs),
            ));
        }
        if self.patience_drop_every == 0 {
            return Err(invalid("patience_drop_every", "must be at least 1"));
        }
        if !(self.impatient_fraction > 0.0 && self.impatient_fraction < 1.0) {
            return Err(invalid("impatient_fraction", "must be between 0 and 1"));
        }
        if !(self.spawn_floor_secs >= MIN_SPAWN_FLOOR_SECS) {
            return Err(invalid(
                "spawn_floor_secs",
                format!("must be at least {MIN_SPAWN_FLOOR_SECS}"),
            ));
        }
        if self.spawn_initial_secs < self.spawn_floor_secs {
            return Err(invalid(
                "spawn_initial_secs",
                format!("must be at least the floor ({})", self.spawn_floor_secs),
            ));
        }
        match self.spawn_curve {
            SpawnCurve::Exponential { decay } if !(decay > 0.0 && decay <= 1.0) => {
                Err(invalid("spawn_curve.decay", "must be in (0, 1]"))
            }
            SpawnCurve::Linear { services_to_floor: 0 } => {
                Err(invalid("spawn_curve.services_to_floor", "must be at least 1"))
            }
            _ => Ok(()),
        }
    }

    /// LocalStorage key for an override (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "catstaurant_tuning";

    /// Load a tuning override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring tuning override: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Load tuning from an optional JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read tuning {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "eating_secs": 3.5 }"#).unwrap();
        assert_eq!(tuning.eating_secs, 3.5);
        assert_eq!(tuning.patience_base_secs, 12.0);
        assert_eq!(tuning.spawn_curve, SpawnCurve::Exponential { decay: 0.9 });
    }

    #[test]
    fn test_linear_curve_json() {
        let tuning = Tuning::from_json(
            r#"{ "spawn_curve": { "kind": "linear", "services_to_floor": 20 } }"#,
        )
        .unwrap();
        assert_eq!(
            tuning.spawn_curve,
            SpawnCurve::Linear {
                services_to_floor: 20
            }
        );
    }

    #[test]
    fn test_rejects_low_spawn_floor() {
        let err = Tuning::from_json(r#"{ "spawn_floor_secs": 1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "spawn_floor_secs",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_bad_decay() {
        let tuning = Tuning {
            spawn_curve: SpawnCurve::Exponential { decay: 1.5 },
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_sub_tick_timers() {
        for eating_secs in [0.005, 0.01] {
            let tuning = Tuning {
                eating_secs,
                ..Default::default()
            };
            assert!(matches!(
                tuning.validate(),
                Err(TuningError::Invalid {
                    field: "eating_secs",
                    ..
                })
            ));
        }

        let tuning = Tuning {
            patience_floor_secs: 0.005,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid {
                field: "patience_floor_secs",
                ..
            })
        ));

        let shortest_meal = Tuning {
            eating_secs: 2.0 / 60.0,
            ..Default::default()
        };
        assert!(shortest_meal.validate().is_ok());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
