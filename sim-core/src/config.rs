//! Configuration for the point field, its idle motion and the palette.
//!
//! Every struct deserializes with `#[serde(default)]`, so a YAML file only
//! needs to name the values it overrides:
//!
//! ```yaml
//! seed: 42
//! prefer_native: true
//! field:
//!   grid_divisions: 20
//! motion:
//!   duration_min: 1.0
//!   easing: circ_in_out
//! ```

use glam::Vec2;
use serde::Deserialize;

use crate::tween::Easing;

/// Placement of the point field over the viewport.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of grid cells along each axis; the cell step is `size / grid_divisions`.
    pub grid_divisions: u32,
    /// Smallest marker radius.
    pub radius_min: f32,
    /// Marker radius is `radius_min + random() * radius_spread`.
    pub radius_spread: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            grid_divisions: 20,
            radius_min: 2.0,
            radius_spread: 2.0,
        }
    }
}

/// Perpetual idle drift of each point around its origin.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    /// Offset from the origin to the corner of the destination box.
    pub offset: Vec2,
    /// Side length of the destination box.
    pub spread: f32,
    pub duration_min: f32,
    pub duration_spread: f32,
    pub easing: Easing,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            offset: Vec2::new(-80.0, -20.0),
            spread: 99.0,
            duration_min: 1.0,
            duration_spread: 1.0,
            easing: Easing::CircInOut,
        }
    }
}

/// Colours used by the renderer; alpha always comes from point activity.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub link: [u8; 3],
    pub marker: [u8; 3],
    pub background: [u8; 3],
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            link: [9, 210, 78],
            marker: [19, 99, 5],
            background: [12, 16, 14],
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub field: FieldConfig,
    pub motion: MotionConfig,
    pub palette: PaletteConfig,
    /// Placement seed. `None` draws one from the thread RNG at startup.
    pub seed: Option<u64>,
    /// Start on the native backend when it is available.
    pub prefer_native: bool,
    /// When `false` the native backend reports itself unavailable.
    pub native_enabled: bool,
    /// Length of the FPS sampling window, in seconds.
    pub stats_interval: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            motion: MotionConfig::default(),
            palette: PaletteConfig::default(),
            seed: None,
            prefer_native: true,
            native_enabled: true,
            stats_interval: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg: Config = serde_yaml::from_str(
            "seed: 7\nnative_enabled: false\nmotion:\n  spread: 50.0\n  easing: linear\n",
        )
        .unwrap();

        assert_eq!(cfg.seed, Some(7));
        assert!(!cfg.native_enabled);
        assert!(cfg.prefer_native);
        assert_eq!(cfg.motion.spread, 50.0);
        assert_eq!(cfg.motion.easing, Easing::Linear);
        assert_eq!(cfg.motion.offset, Vec2::new(-80.0, -20.0));
        assert_eq!(cfg.field, FieldConfig::default());
    }

    #[test]
    fn empty_yaml_is_default() {
        let cfg: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg, Config::default());
    }
}
