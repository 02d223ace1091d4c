//! Race tunables. Every field has a default matching the shipped game, so a
//! JSON override only needs the values it changes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Seconds for the track to scroll by one full cycle of all segments.
    pub scroll_time: f32,
    /// Height of one track segment in world units.
    pub segment_height: f32,
    /// Binding names of the track segments, bottom to top.
    pub segment_names: Vec<String>,
    /// Multiplier from heading angle to sideways drift.
    pub lateral_factor: f32,
    pub steering: SteeringConfig,
    pub spawn: SpawnConfig,
    pub crash: CrashConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Player rotation for a heading, radians.
    pub player_angle: f32,
    /// Camera counter-rotation for a heading, radians.
    pub camera_angle: f32,
    pub duration: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub enabled: bool,
    /// Seconds before the first car.
    pub initial_delay: f32,
    /// Half-open range of spawn x positions.
    pub x_range: [i32; 2],
    /// Spawn y, local to the car layer (top of the screen).
    pub height: f32,
    /// Distance a car travels down before it is removed.
    pub travel_distance: f32,
    /// Travel time as a multiple of `scroll_time`.
    pub travel_factor: f32,
    /// Half-open range of delays between cars, milliseconds.
    pub delay_ms: [i32; 2],
    pub car_size: [f32; 2],
    pub colours: Vec<String>,
    /// Car models per colour, numbered from 1.
    pub models: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrashConfig {
    pub camera_duration: f32,
    pub center_duration: f32,
    pub derotate_duration: f32,
    /// Peak hero scale.
    pub scale_up: f32,
    pub scale_up_duration: f32,
    pub scale_down_duration: f32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            scroll_time: 10.0,
            segment_height: 2048.0,
            segment_names: (1..=4).map(|i| format!("trackSection{}", i)).collect(),
            lateral_factor: 4.7,
            steering: SteeringConfig::default(),
            spawn: SpawnConfig::default(),
            crash: CrashConfig::default(),
        }
    }
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            player_angle: 0.5,
            camera_angle: 0.25,
            duration: 0.4,
        }
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            initial_delay: 2.0,
            x_range: [-300, 300],
            height: 2048.0,
            travel_distance: 4096.0,
            travel_factor: 1.3,
            delay_ms: [500, 1500],
            car_size: [90.0, 180.0],
            colours: ["black", "blue", "green", "red", "yellow"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            models: 5,
        }
    }
}

impl Default for CrashConfig {
    fn default() -> Self {
        Self {
            camera_duration: 0.3,
            center_duration: 0.1,
            derotate_duration: 0.1,
            scale_up: 20.0,
            scale_up_duration: 0.3,
            scale_down_duration: 0.6,
        }
    }
}

impl RaceConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Track speed in world units per second.
    pub fn scroll_speed(&self) -> f32 {
        self.segment_height / self.scroll_time
    }

    /// Seconds an opponent car stays on the track.
    pub fn travel_duration(&self) -> f32 {
        self.scroll_time * self.spawn.travel_factor
    }
}

impl CrashConfig {
    /// Length of the invincible window.
    pub fn recovery_duration(&self) -> f32 {
        self.scale_up_duration + self.scale_down_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_track() {
        let cfg = RaceConfig::default();
        assert_eq!(cfg.segment_names.len(), 4);
        assert_eq!(cfg.segment_names[3], "trackSection4");
        assert!((cfg.scroll_speed() - 204.8).abs() < 1e-3);
        assert!((cfg.travel_duration() - 13.0).abs() < 1e-4);
        assert!((cfg.crash.recovery_duration() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = RaceConfig::from_json(r#"{ "scroll_time": 5.0, "spawn": { "enabled": false } }"#).unwrap();
        assert_eq!(cfg.scroll_time, 5.0);
        assert!(!cfg.spawn.enabled);
        assert_eq!(cfg.spawn.delay_ms, [500, 1500]);
        assert_eq!(cfg.steering, SteeringConfig::default());
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(RaceConfig::from_json(r#"{ "scroll_time": "fast" }"#).is_err());
    }
}
