/// Startup configuration for a sphere scene
use crate::projection::Viewport;
use crate::surface::{Rgba, Style};

/// Fixed paint settings for the painter's pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub fill: Rgba,
    pub stroke: Rgba,
    /// Triangle outline width in surface pixels
    pub line_width: f64,
    /// Radius of the calibration circle in surface pixels
    pub reference_radius: f64,
}

impl RenderStyle {
    pub fn fill_style(&self) -> Style {
        Style::fill(self.fill)
    }

    pub fn stroke_style(&self) -> Style {
        Style::stroke(self.stroke, self.line_width)
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            fill: Rgba::new(200, 200, 220, 0.75),
            stroke: Rgba::opaque(128, 128, 128),
            line_width: 0.625,
            reference_radius: 250.0,
        }
    }
}

/// Values supplied once at startup; none of them change per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    pub subdivision_depth: u32,
    /// Weight of model `z` in the homogeneous `w`
    pub perspective: f64,
    pub viewport: Viewport,
    pub style: RenderStyle,
}

impl SceneConfig {
    /// Scene sized for a surface, keeping the default proportions: the
    /// sphere spans 5/6 of the smaller side.
    pub fn for_surface(width: f64, height: f64) -> Self {
        let scale = width.min(height) * 250.0 / 600.0;
        let mut style = RenderStyle::default();
        style.reference_radius = scale;
        style.line_width = scale / 400.0;
        Self {
            viewport: Viewport::new(width, height, scale),
            style,
            ..Self::default()
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            subdivision_depth: 3,
            perspective: 0.1,
            viewport: Viewport::default(),
            style: RenderStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let config = SceneConfig::default();
        assert_eq!(config.subdivision_depth, 3);
        assert_relative_eq!(config.perspective, 0.1);
        assert_eq!(config.viewport, Viewport::new(600.0, 600.0, 250.0));
        assert_relative_eq!(config.style.reference_radius, config.viewport.scale);
    }

    #[test]
    fn test_for_surface_matches_default_at_reference_size() {
        assert_eq!(SceneConfig::for_surface(600.0, 600.0), SceneConfig::default());
    }

    #[test]
    fn test_for_surface_uses_smaller_side() {
        let config = SceneConfig::for_surface(1200.0, 300.0);
        assert_relative_eq!(config.viewport.scale, 125.0);
        assert_relative_eq!(config.style.reference_radius, 125.0);
    }
}
