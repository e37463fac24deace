use std::fmt;

/// Identifier for a point in a point field.
///
/// This is an index into the owning backend's point storage, and is only
/// meaningful for the generation of the field it was read from.
pub type PointId = usize;

/// Size of the drawing surface, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// `true` when both dimensions are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

/// The two interchangeable simulation backends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Packed, fixed-capacity implementation.
    Native,
    /// Plain per-point object implementation, always available.
    Script,
}

impl BackendKind {
    pub fn other(self) -> Self {
        match self {
            BackendKind::Native => BackendKind::Script,
            BackendKind::Script => BackendKind::Native,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BackendKind::Native => "Native (optimized)",
            BackendKind::Script => "Script (fallback)",
        }
    }

    pub(crate) fn slot(self) -> usize {
        match self {
            BackendKind::Native => 0,
            BackendKind::Script => 1,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Native => f.write_str("native"),
            BackendKind::Script => f.write_str("script"),
        }
    }
}
