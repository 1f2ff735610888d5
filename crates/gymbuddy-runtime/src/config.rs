//! Runtime configuration
//!
//! Loaded from JSON. Durations are human-readable strings ("300ms",
//! "1s"). Thresholds come in two layers: a map shared by every exercise
//! and an optional map per exercise that wins over it.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use gymbuddy_core::{CoachError, CoachResult, ExerciseKind};
use gymbuddy_form::{scoped_key, ThresholdProfile};

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuntimeConfig {
    /// Time between evaluation cycles
    #[serde(with = "humantime_str")]
    pub cycle_period: Duration,

    /// Emit logs as JSON lines
    pub json_logs: bool,

    /// `tracing` filter directives used when `RUST_LOG` is unset
    pub log_filter: String,

    /// Thresholds shared by every exercise
    pub thresholds: HashMap<String, f64>,

    /// Thresholds for a single exercise
    pub exercises: HashMap<ExerciseKind, HashMap<String, f64>>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            cycle_period: Duration::from_millis(300),
            json_logs: false,
            log_filter: "info".to_string(),
            thresholds: HashMap::new(),
            exercises: HashMap::new(),
        }
    }
}

impl RuntimeConfig {
    pub fn from_json_str(json: &str) -> CoachResult<Self> {
        let config: RuntimeConfig =
            serde_json::from_str(json).map_err(|e| CoachError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> CoachResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CoachError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Shorter cycle configuration for reference clips
    pub fn reference_clip() -> Self {
        Self {
            cycle_period: Duration::from_millis(250),
            thresholds: HashMap::from([("leniency".to_string(), 2.0)]),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> CoachResult<()> {
        if self.cycle_period.is_zero() {
            return Err(CoachError::InvalidConfig(
                "cycle period must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Merged threshold map for one exercise. A key from the exercise's own
    /// map also displaces the shared map's scoped form of that key.
    pub fn threshold_map(&self, exercise: ExerciseKind) -> HashMap<String, f64> {
        let mut map = self.thresholds.clone();
        if let Some(specific) = self.exercises.get(&exercise) {
            for (key, value) in specific {
                map.remove(&scoped_key(exercise, key));
                map.insert(key.clone(), *value);
            }
        }
        map
    }

    /// Threshold profile for one exercise
    pub fn profile(&self, exercise: ExerciseKind) -> ThresholdProfile {
        ThresholdProfile::from_map(exercise, &self.threshold_map(exercise))
    }
}

mod humantime_str {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&humantime::format_duration(*duration))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let text = String::deserialize(deserializer)?;
        humantime::parse_duration(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.cycle_period, Duration::from_millis(300));
        assert_eq!(config.log_filter, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "cyclePeriod": "450ms",
            "jsonLogs": true,
            "thresholds": { "lineDevMax": 12, "minRepMs": 600 },
            "exercises": { "plank": { "lineDevMax": 18 } }
        }"#;
        let config = RuntimeConfig::from_json_str(json).unwrap();

        assert_eq!(config.cycle_period, Duration::from_millis(450));
        assert!(config.json_logs);
        assert_eq!(config.log_filter, "info");

        assert_eq!(config.profile(ExerciseKind::Plank).line_dev_max, 18.0);
        assert_eq!(config.profile(ExerciseKind::PushUp).line_dev_max, 12.0);
        assert_eq!(
            config.profile(ExerciseKind::Squat).min_rep,
            Duration::from_millis(600)
        );
    }

    #[test]
    fn test_rejects_bad_period() {
        let err = RuntimeConfig::from_json_str(r#"{"cyclePeriod": "0s"}"#).unwrap_err();
        assert!(matches!(err, CoachError::InvalidConfig(_)));

        let err = RuntimeConfig::from_json_str(r#"{"cyclePeriod": "soon"}"#).unwrap_err();
        assert!(matches!(err, CoachError::InvalidConfig(_)));
    }

    #[test]
    fn test_round_trip() {
        let config = RuntimeConfig::reference_clip();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"250ms\""));
        assert_eq!(RuntimeConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_reference_clip_is_lenient() {
        let profile = RuntimeConfig::reference_clip().profile(ExerciseKind::PushUp);
        assert_eq!(profile.leniency, gymbuddy_form::Leniency::Reference);
    }

    #[test]
    fn test_exercise_map_beats_shared_scoped_key() {
        let json = r#"{
            "thresholds": { "plankLineDevMax": 20, "neckMax": 30 },
            "exercises": { "plank": { "lineDevMax": 16 } }
        }"#;
        let config = RuntimeConfig::from_json_str(json).unwrap();
        let plank = config.profile(ExerciseKind::Plank);

        assert_eq!(plank.line_dev_max, 16.0);
        assert_eq!(plank.neck_max, 30.0);
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("gymbuddy-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "cyclePeriod": "400ms", "logFilter": "debug" }"#).unwrap();

        let config = RuntimeConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.cycle_period, Duration::from_millis(400));
        assert_eq!(config.log_filter, "debug");

        let err = RuntimeConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CoachError::InvalidConfig(_)));
    }
}
