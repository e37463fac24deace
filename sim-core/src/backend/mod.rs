//! The operation set shared by both simulation backends.
//!
//! A backend owns a point field (positions, origins, marker radii), its
//! neighbour index and the per-point activity derived from the target. The
//! render loop and the motion driver only ever talk to a backend through
//! [`PointBackend`], so the two implementations are interchangeable.

mod native;
mod script;

pub use native::NativeBackend;
pub use script::ScriptBackend;

use glam::Vec2;
use thiserror::Error;

use crate::types::{BackendKind, PointId, Viewport};

/// Read-only snapshot of one point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointView {
    pub pos: Vec2,
    pub origin: Vec2,
    /// Link alpha from the last [`PointBackend::update`].
    pub active: f32,
    /// Marker alpha from the last [`PointBackend::update`].
    pub marker: f32,
    pub radius: f32,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BackendError {
    /// The backend could not be constructed; it stays unusable for the session.
    #[error("{backend} backend unavailable: {reason}")]
    Unavailable { backend: BackendKind, reason: String },

    /// The backend failed while updating or being drawn.
    #[error("{backend} backend fault: {reason}")]
    Fault { backend: BackendKind, reason: String },
}

impl BackendError {
    pub fn backend(&self) -> BackendKind {
        match self {
            BackendError::Unavailable { backend, .. } | BackendError::Fault { backend, .. } => {
                *backend
            }
        }
    }
}

pub trait PointBackend {
    fn kind(&self) -> BackendKind;

    fn viewport(&self) -> Viewport;

    /// Counter bumped every time the point field is rebuilt.
    fn generation(&self) -> u64;

    /// Rebuilds the field for a new viewport. Same dimensions are a no-op.
    fn resize(&mut self, viewport: Viewport);

    fn set_target(&mut self, target: Vec2);

    /// Recomputes every point's activity from the current target.
    fn update(&mut self) -> Result<(), BackendError>;

    fn points_count(&self) -> usize;

    fn point(&self, index: PointId) -> Option<PointView>;

    fn closest_count(&self, index: PointId) -> usize;

    /// The `neighbor`-th entry of `index`'s neighbour list.
    fn point_closest(&self, index: PointId, neighbor: usize) -> Option<PointView>;

    /// Moves a point; out-of-range indices are ignored.
    fn update_point_position(&mut self, index: PointId, pos: Vec2);
}
