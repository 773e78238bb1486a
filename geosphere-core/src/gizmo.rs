/// Orientation overlay: three thin bars along the model axes
use nalgebra::{Matrix4, Point3};

use crate::projection::{ProjectedPoint, Viewport};
use crate::surface::{DrawSurface, Rgba, Style};
use crate::transform::{RotationState, Transform};

const HALF_WIDTH: f64 = 0.025;
const LENGTH: f64 = 1.5;

/// Bar outlines in model space, one quad per axis
#[rustfmt::skip]
const BARS: [[[f64; 3]; 4]; 3] = [
    // along +x
    [[0.0, -HALF_WIDTH, 0.0], [LENGTH, -HALF_WIDTH, 0.0], [LENGTH, HALF_WIDTH, 0.0], [0.0, HALF_WIDTH, 0.0]],
    // along +z
    [[0.0, -HALF_WIDTH, 0.0], [0.0, -HALF_WIDTH, LENGTH], [0.0, HALF_WIDTH, LENGTH], [0.0, HALF_WIDTH, 0.0]],
    // along -y
    [[-HALF_WIDTH, 0.0, 0.0], [-HALF_WIDTH, -LENGTH, 0.0], [HALF_WIDTH, -LENGTH, 0.0], [HALF_WIDTH, 0.0, 0.0]],
];

/// Axis bars drawn under their own, stronger perspective
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisGizmo {
    /// Viewer distance in model units; `w = 1 - z / distance`
    pub distance: f64,
    /// Model-space shift up and to the left, undone on screen so the
    /// origin stays at the viewport centre
    pub offset: f64,
    pub color: Rgba,
}

impl AxisGizmo {
    pub fn matrix(&self, rotation: &RotationState) -> Matrix4<f64> {
        let mut perspective = Matrix4::identity();
        perspective[(3, 2)] = -1.0 / self.distance;
        perspective
            * Transform::translation_matrix(-self.offset, self.offset, 0.0)
            * Transform::rotation_matrix(rotation)
    }

    /// Screen outline of each bar; bars crossing the viewer plane are `None`.
    pub fn project(&self, rotation: &RotationState, viewport: &Viewport) -> Vec<Option<[ProjectedPoint; 4]>> {
        let matrix = self.matrix(rotation);
        let shift = viewport.scale * self.offset;

        BARS.iter()
            .map(|bar| {
                let mut out = [ProjectedPoint { x: 0.0, y: 0.0, depth: 0.0 }; 4];
                for (slot, &[x, y, z]) in out.iter_mut().zip(bar) {
                    let p = viewport.project(&Transform::apply(&matrix, &Point3::new(x, y, z)))?;
                    *slot = ProjectedPoint {
                        x: p.x + shift,
                        y: p.y - shift,
                        depth: p.depth,
                    };
                }
                Some(out)
            })
            .collect()
    }

    pub fn render<S: DrawSurface + ?Sized>(
        &self,
        rotation: &RotationState,
        viewport: &Viewport,
        surface: &mut S,
    ) {
        let style = Style::fill(self.color);
        for quad in self.project(rotation, viewport).into_iter().flatten() {
            surface.begin_path();
            surface.move_to(quad[0].x, quad[0].y);
            for p in &quad[1..] {
                surface.line_to(p.x, p.y);
            }
            surface.close_path();
            surface.fill(&style);
        }
    }
}

impl Default for AxisGizmo {
    fn default() -> Self {
        Self {
            distance: 3.0,
            offset: 0.2,
            color: Rgba::new(20, 40, 40, 0.5),
        }
    }
}
