/// Painter's-algorithm renderer
///
/// Triangles are ordered by the pre-divide depth of their first vertex and
/// painted back to front, with no depth buffer. One representative vertex
/// per face is enough here because the mesh is a convex sphere seen from
/// outside. For non-convex or interpenetrating geometry this key produces
/// visible sorting artifacts.
use std::f64::consts::TAU;

use nalgebra::Matrix4;

use crate::config::SceneConfig;
use crate::geometry::{Mesh, Triangle};
use crate::projection::{ProjectedPoint, Viewport};
use crate::surface::DrawSurface;
use crate::transform::{RotationState, Transform};

/// A face projected onto the draw surface for a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformedTriangle {
    pub points: [ProjectedPoint; 3],
}

impl TransformedTriangle {
    /// Sort key: depth of the first vertex
    pub fn depth(&self) -> f64 {
        self.points[0].depth
    }

    /// Transform and project a face, or `None` if any vertex is unprojectable.
    pub fn project(
        triangle: &Triangle,
        matrix: &Matrix4<f64>,
        viewport: &Viewport,
    ) -> Option<Self> {
        let [a, b, c] = triangle.vertices;
        Some(Self {
            points: [
                viewport.project(&Transform::apply(matrix, &a))?,
                viewport.project(&Transform::apply(matrix, &b))?,
                viewport.project(&Transform::apply(matrix, &c))?,
            ],
        })
    }
}

/// Project every face of the mesh, dropping faces that touch the
/// perspective plane.
pub fn transform_mesh(
    mesh: &Mesh,
    matrix: &Matrix4<f64>,
    viewport: &Viewport,
) -> Vec<TransformedTriangle> {
    let mut out = Vec::with_capacity(mesh.len());
    for (index, triangle) in mesh.triangles().iter().enumerate() {
        match TransformedTriangle::project(triangle, matrix, viewport) {
            Some(projected) => out.push(projected),
            None => log::trace!("skipping face {} with vertex on the perspective plane", index),
        }
    }
    out
}

/// Stable sort, farthest (largest depth) first.
pub fn sort_back_to_front(triangles: &mut [TransformedTriangle]) {
    triangles.sort_by(|a, b| b.depth().total_cmp(&a.depth()));
}

/// Counts for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub drawn: usize,
    pub skipped: usize,
}

/// Draws a sphere mesh at a given orientation onto any [`DrawSurface`]
#[derive(Debug, Clone, Default)]
pub struct PainterRenderer {
    config: SceneConfig,
}

impl PainterRenderer {
    pub fn new(config: SceneConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Full frame: clear, transform, sort, paint, then the reference circle.
    pub fn render<S: DrawSurface + ?Sized>(
        &self,
        mesh: &Mesh,
        rotation: &RotationState,
        surface: &mut S,
    ) -> FrameStats {
        let viewport = &self.config.viewport;
        surface.clear(viewport.width, viewport.height);

        let matrix = Transform::build(rotation, self.config.perspective);
        let mut triangles = transform_mesh(mesh, &matrix, viewport);
        sort_back_to_front(&mut triangles);
        self.draw(&triangles, surface);

        let stats = FrameStats {
            drawn: triangles.len(),
            skipped: mesh.len() - triangles.len(),
        };
        log::debug!(
            "frame at ({}, {}, {}): drawn={} skipped={}",
            rotation.x,
            rotation.y,
            rotation.z,
            stats.drawn,
            stats.skipped
        );
        stats
    }

    /// Paint already sorted triangles in order, then the reference circle.
    pub fn draw<S: DrawSurface + ?Sized>(&self, triangles: &[TransformedTriangle], surface: &mut S) {
        let fill = self.config.style.fill_style();
        let stroke = self.config.style.stroke_style();

        for triangle in triangles {
            let [a, b, c] = triangle.points;
            surface.begin_path();
            surface.move_to(a.x, a.y);
            surface.line_to(b.x, b.y);
            surface.line_to(c.x, c.y);
            surface.close_path();
            surface.fill(&fill);
            surface.stroke(&stroke);
        }

        let (cx, cy) = self.config.viewport.center();
        surface.begin_path();
        surface.arc(cx, cy, self.config.style.reference_radius, 0.0, TAU);
        surface.stroke(&stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{CommandList, DrawCommand};
    use nalgebra::Point3;

    fn flat(depth: f64, tag: f64) -> TransformedTriangle {
        let p = ProjectedPoint { x: tag, y: 0.0, depth };
        TransformedTriangle { points: [p, p, p] }
    }

    #[test]
    fn test_sort_descending() {
        let mut tris = vec![flat(3.0, 0.0), flat(1.0, 1.0), flat(2.0, 2.0)];
        sort_back_to_front(&mut tris);
        let depths: Vec<f64> = tris.iter().map(TransformedTriangle::depth).collect();
        assert_eq!(depths, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut tris = vec![flat(1.0, 0.0), flat(5.0, 1.0), flat(1.0, 2.0), flat(1.0, 3.0)];
        sort_back_to_front(&mut tris);
        let tags: Vec<f64> = tris.iter().map(|t| t.points[0].x).collect();
        assert_eq!(tags, vec![1.0, 0.0, 2.0, 3.0]);
    }

    #[test]
    fn test_depth_uses_first_vertex() {
        let near = ProjectedPoint { x: 0.0, y: 0.0, depth: -1.0 };
        let far = ProjectedPoint { x: 0.0, y: 0.0, depth: 1.0 };
        let tri = TransformedTriangle { points: [near, far, far] };
        assert_eq!(tri.depth(), -1.0);
    }

    #[test]
    fn test_empty_mesh_draws_only_reference_circle() {
        let renderer = PainterRenderer::default();
        let mut list = CommandList::new();
        let stats = renderer.render(&Mesh::default(), &RotationState::zero(), &mut list);

        assert_eq!(stats, FrameStats::default());
        let style = renderer.config().style;
        assert_eq!(
            list.commands(),
            &[
                DrawCommand::Clear { width: 600.0, height: 600.0 },
                DrawCommand::BeginPath,
                DrawCommand::Arc {
                    cx: 300.0,
                    cy: 300.0,
                    radius: style.reference_radius,
                    start: 0.0,
                    end: TAU,
                },
                DrawCommand::Stroke(style.stroke_style()),
            ]
        );
    }

    #[test]
    fn test_triangle_command_sequence() {
        let renderer = PainterRenderer::default();
        let mesh = Mesh::from_triangles(vec![Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )]);
        let mut list = CommandList::new();
        renderer.render(&mesh, &RotationState::zero(), &mut list);

        let style = renderer.config().style;
        assert_eq!(
            &list.commands()[..8],
            &[
                DrawCommand::Clear { width: 600.0, height: 600.0 },
                DrawCommand::BeginPath,
                DrawCommand::MoveTo { x: 300.0, y: 300.0 },
                DrawCommand::LineTo { x: 550.0, y: 300.0 },
                DrawCommand::LineTo { x: 300.0, y: 550.0 },
                DrawCommand::ClosePath,
                DrawCommand::Fill(style.fill_style()),
                DrawCommand::Stroke(style.stroke_style()),
            ]
        );
        assert_eq!(list.len(), 11);
    }

    #[test]
    fn test_face_on_perspective_plane_is_skipped() {
        // w = 1 + p*z is zero at z = -1/p
        let config = SceneConfig {
            perspective: 0.5,
            ..SceneConfig::default()
        };
        let renderer = PainterRenderer::new(config);
        let visible = Triangle::new(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        );
        let degenerate = Triangle::new(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, -2.0),
            Point3::new(0.0, 1.0, 1.0),
        );
        let mesh = Mesh::from_triangles(vec![visible, degenerate, visible]);

        let mut list = CommandList::new();
        let stats = renderer.render(&mesh, &RotationState::zero(), &mut list);
        assert_eq!(stats, FrameStats { drawn: 2, skipped: 1 });
        assert_eq!(list.fill_count(), 2);
    }

    #[test]
    fn test_far_faces_painted_first() {
        let renderer = PainterRenderer::default();
        let near = Triangle::new(
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(0.1, 0.0, -1.0),
            Point3::new(0.0, 0.1, -1.0),
        );
        let far = Triangle::new(
            Point3::new(0.5, 0.0, 1.0),
            Point3::new(0.6, 0.0, 1.0),
            Point3::new(0.5, 0.1, 1.0),
        );
        let mesh = Mesh::from_triangles(vec![near, far]);
        let mut list = CommandList::new();
        renderer.render(&mesh, &RotationState::zero(), &mut list);

        let moves: Vec<&DrawCommand> = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::MoveTo { .. }))
            .collect();
        // far face at x = 0.5 / 1.1 * 250 + 300 comes first
        match moves[0] {
            DrawCommand::MoveTo { x, .. } => assert!(*x > 400.0),
            other => panic!("unexpected {:?}", other),
        }
    }
}
