//! Maps squared distance to the target onto a small set of activity levels.
//!
//! The threshold and level values are tuned by eye; keep them as they are.

use glam::Vec2;

/// Squared-distance upper bounds of the three visible tiers, nearest first.
pub const NEAR_D2: f32 = 4000.0;
pub const MID_D2: f32 = 20000.0;
pub const FAR_D2: f32 = 40000.0;

/// Link alpha for each visible tier, nearest first.
pub const NEAR_LEVEL: f32 = 0.3;
pub const MID_LEVEL: f32 = 0.1;
pub const FAR_LEVEL: f32 = 0.02;

/// Marker alpha multipliers for each visible tier, nearest first.
pub const NEAR_MARKER: f32 = 0.6;
pub const MID_MARKER: f32 = 0.3;
pub const FAR_MARKER: f32 = 0.1;

/// Activity level of one point for the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Activity {
    /// Link alpha; `0.0` means the point is not drawn at all.
    pub link: f32,
    /// Marker fill alpha.
    pub marker: f32,
}

impl Activity {
    pub const IDLE: Activity = Activity { link: 0.0, marker: 0.0 };

    /// Step function of `d2`. Non-finite input maps to [`Activity::IDLE`].
    #[inline]
    pub fn from_distance_sq(d2: f32) -> Self {
        if d2 < NEAR_D2 {
            Activity { link: NEAR_LEVEL, marker: NEAR_MARKER }
        } else if d2 < MID_D2 {
            Activity { link: MID_LEVEL, marker: MID_MARKER }
        } else if d2 < FAR_D2 {
            Activity { link: FAR_LEVEL, marker: FAR_MARKER }
        } else {
            Activity::IDLE
        }
    }

    #[inline]
    pub fn between(point: Vec2, target: Vec2) -> Self {
        Self::from_distance_sq((point - target).length_squared())
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.link > 0.0
    }
}
