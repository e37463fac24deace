//! Core of the animated particle-network header.
//!
//! Main components:
//! - [`placement`] — jittered-grid placement of the point field.
//! - [`geometry`] — one-time nearest-neighbour index.
//! - [`proximity`] — activity levels derived from distance to the target.
//! - [`backend`] — the shared backend contract and its two implementations.
//! - [`selector`] — chooses the active backend and handles fallback.
//! - [`tween`] — easing curves and the tween scheduler.
//! - [`motion`] — perpetual per-point idle drift.
//! - [`render`] — drawing links and markers onto a [`render::Canvas`].
//! - [`session`] — top-level owner driving one frame at a time.
//! - [`stats`] — FPS sampling and backend benchmark.
//! - [`config`] — configuration for all of the above.
//! - [`types`] — shared ids, viewport and backend kinds.

pub mod backend;
pub mod config;
pub mod geometry;
pub mod motion;
pub mod placement;
pub mod proximity;
pub mod render;
pub mod selector;
pub mod session;
pub mod stats;
pub mod tween;
pub mod types;
