// src/config.rs

//! Configuration structures for the renderer.
//!
//! Every field has a default carrying the reference values (60 fps, the
//! bouncing-circle palette and geometry), so an empty or partial
//! configuration file always yields a working setup. Files are JSON,
//! deserialized with serde.

use anyhow::Context;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Process-wide default configuration.
///
/// The demo binary and anything that does not load an explicit file read
/// from this.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::default);

/// Complete renderer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Render loop and pacing settings.
    pub render: RenderConfig,
    /// Bouncing-circle scene settings.
    pub scene: SceneConfig,
}

impl Config {
    /// Loads configuration from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}

/// Which frame pacing policy the render loop uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PacingPolicy {
    /// Sleep for `max(0, interval - draw_time)` each frame. Holds the
    /// target rate as long as drawing stays under budget.
    #[default]
    Adaptive,
    /// Sleep the full interval regardless of draw cost. Simpler, but total
    /// cycle time is draw time plus sleep time, so the real rate drifts
    /// under load. Kept as a fallback.
    FixedSleep,
}

/// Render loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Target frame rate in frames per second.
    pub target_fps: u32,
    /// Frame pacing policy.
    pub pacing: PacingPolicy,
    /// Animation clock advance per frame.
    pub clock_step: f32,
    /// Animation clock wraps to zero past this bound.
    pub clock_wrap: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            target_fps: 60,
            pacing: PacingPolicy::Adaptive,
            clock_step: 0.05,
            clock_wrap: 100.0,
        }
    }
}

/// Bouncing-circle scene settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Background fill color, `[r, g, b]`.
    pub background: [u8; 3],
    /// Circle color, `[r, g, b]`.
    pub foreground: [u8; 3],
    /// Circle radius in pixels.
    pub radius: f32,
    /// Horizontal travel margin in pixels; the circle center bounces
    /// between `margin` and `width - margin`.
    pub margin: f32,
    /// Bounce period in clock units (one full left-right-left trip).
    pub period: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        SceneConfig {
            background: [20, 20, 30],
            foreground: [100, 150, 255],
            radius: 80.0,
            margin: 100.0,
            period: 4.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_reference_values() {
        let config = Config::default();
        assert_eq!(config.render.target_fps, 60);
        assert_eq!(config.render.pacing, PacingPolicy::Adaptive);
        assert_eq!(config.scene.background, [20, 20, 30]);
        assert_eq!(config.scene.foreground, [100, 150, 255]);
        assert!((config.scene.period - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"render": {"target_fps": 30, "pacing": "fixed_sleep"}}"#)
                .unwrap();
        assert_eq!(config.render.target_fps, 30);
        assert_eq!(config.render.pacing, PacingPolicy::FixedSleep);
        // Untouched sections keep their defaults.
        assert!((config.render.clock_step - 0.05).abs() < f32::EPSILON);
        assert!((config.scene.radius - 80.0).abs() < f32::EPSILON);
    }

    #[test]
    fn empty_json_is_a_full_default_config() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.render.target_fps, Config::default().render.target_fps);
    }
}
