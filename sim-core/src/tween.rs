//! Time-based interpolation of 2-D positions.
//!
//! A [`TweenScheduler`] holds at most one running [`Tween`] per slot and
//! advances all of them together on a single thread. Each advance reports the
//! interpolated value of every running tween through `on_step`, and reports
//! each tween that reached its end exactly once through `on_complete`.

use glam::Vec2;
use serde::Deserialize;

/// Shaping curve applied to normalized progress `t` in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    /// Circular ease-in-out: slow at both ends, steep through the middle.
    #[default]
    CircInOut,
    SineInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CircInOut => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (2.0 - 2.0 * t).powi(2)).sqrt() + 1.0) / 2.0
                }
            }
            Easing::SineInOut => -((std::f32::consts::PI * t).cos() - 1.0) / 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: Vec2,
    pub to: Vec2,
    /// Seconds.
    pub duration: f32,
    pub elapsed: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: Vec2, to: Vec2, duration: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            easing,
        }
    }

    /// Linear progress in `[0, 1]`. A non-positive duration is complete at once.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    pub fn value(&self) -> Vec2 {
        self.from.lerp(self.to, self.easing.apply(self.progress()))
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// Slot-indexed collection of running tweens.
#[derive(Debug, Default)]
pub struct TweenScheduler {
    slots: Vec<Option<Tween>>,
}

impl TweenScheduler {
    pub fn with_len(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Drops every tween and resizes to `len` empty slots.
    pub fn reset(&mut self, len: usize) {
        self.slots.clear();
        self.slots.resize(len, None);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn running(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn get(&self, slot: usize) -> Option<&Tween> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Starts (or replaces) the tween in `slot`.
    ///
    /// ### Panics
    /// Panics if `slot` is out of bounds.
    pub fn start(&mut self, slot: usize, tween: Tween) {
        self.slots[slot] = Some(tween);
    }

    /// Advances every running tween by `dt` seconds.
    ///
    /// `on_step(slot, value)` is called for every running tween, including
    /// on the advance that finishes it. Finished tweens are then removed and
    /// reported through `on_complete(slot)`, in slot order.
    pub fn advance(
        &mut self,
        dt: f32,
        mut on_step: impl FnMut(usize, Vec2),
        mut on_complete: impl FnMut(usize),
    ) {
        let dt = dt.max(0.0);
        for (slot, entry) in self.slots.iter_mut().enumerate() {
            let Some(tween) = entry else {
                continue;
            };
            tween.elapsed += dt;
            on_step(slot, tween.value());
            if tween.is_finished() {
                *entry = None;
                on_complete(slot);
            }
        }
    }
}
