/// Errors raised while building sphere geometry
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A vector was too short to be scaled onto the unit sphere.
    ///
    /// Unreachable from the icosahedron seed; only malformed input
    /// (coincident or antipodal vertices) produces it.
    #[error("cannot normalize degenerate vector (norm {norm:e})")]
    DegenerateVector { norm: f64 },
}
