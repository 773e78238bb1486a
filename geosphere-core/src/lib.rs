/// Geosphere Core Library - Geodesic sphere mesh and painter's renderer
///
/// This library builds an icosphere once, orients it with a three-axis
/// rotation plus a perspective term, and paints it back to front onto any
/// surface implementing the small [`DrawSurface`] path contract.

pub mod config;
pub mod error;
pub mod geometry;
pub mod gizmo;
pub mod icosahedron;
pub mod painter;
pub mod projection;
pub mod subdivision;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use config::{RenderStyle, SceneConfig};
pub use error::GeometryError;
pub use geometry::{normalize, Mesh, Triangle};
pub use gizmo::AxisGizmo;
pub use painter::{sort_back_to_front, transform_mesh, FrameStats, PainterRenderer, TransformedTriangle};
pub use projection::{ProjectedPoint, Viewport};
pub use subdivision::subdivide;
pub use surface::{CommandList, DrawCommand, DrawSurface, Rgba, Style};
pub use transform::{RotationState, Transform};
