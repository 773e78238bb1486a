/// Perspective divide and viewport mapping
use nalgebra::Vector4;

/// Homogeneous `w` magnitudes below this cannot be divided by.
const MIN_W: f64 = 1e-9;

/// A vertex in draw-surface coordinates with its retained depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    /// Transformed `z` before the perspective divide
    pub depth: f64,
}

/// Maps projected unit-sphere coordinates onto a draw surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Pixels per model unit
    pub scale: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, scale: f64) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Divide by `w` and map to surface coordinates.
    ///
    /// Returns `None` for points on the perspective plane (`w` near zero);
    /// callers drop the owning triangle for that frame.
    pub fn project(&self, point: &Vector4<f64>) -> Option<ProjectedPoint> {
        if !point.w.is_finite() || point.w.abs() < MIN_W {
            return None;
        }

        let (cx, cy) = self.center();
        Some(ProjectedPoint {
            x: cx + self.scale * point.x / point.w,
            y: cy + self.scale * point.y / point.w,
            depth: point.z,
        })
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(600.0, 600.0, 250.0)
    }
}
