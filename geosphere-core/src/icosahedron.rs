/// Regular icosahedron seed for the geodesic sphere
use nalgebra::Point3;

use crate::error::GeometryError;
use crate::geometry::{normalize, Triangle};

/// Face table: indices into the vertex array from [`vertices`], wound
/// consistently so every face normal points away from the origin.
#[rustfmt::skip]
pub const FACES: [[usize; 3]; 20] = [
    // Five faces around vertex 0
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    // Adjacent band
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    // Five faces around vertex 3
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    // Adjacent band
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

/// The 12 unit vertices, from the three golden-ratio rectangles
/// `(±1, ±φ, 0)`, `(0, ±1, ±φ)` and `(±φ, 0, ±1)`.
pub fn vertices() -> Result<[Point3<f64>; 12], GeometryError> {
    let t = (1.0 + 5f64.sqrt()) / 2.0;
    let raw = [
        Point3::new(-1.0, t, 0.0),
        Point3::new(1.0, t, 0.0),
        Point3::new(-1.0, -t, 0.0),
        Point3::new(1.0, -t, 0.0),
        Point3::new(0.0, -1.0, t),
        Point3::new(0.0, 1.0, t),
        Point3::new(0.0, -1.0, -t),
        Point3::new(0.0, 1.0, -t),
        Point3::new(t, 0.0, -1.0),
        Point3::new(t, 0.0, 1.0),
        Point3::new(-t, 0.0, -1.0),
        Point3::new(-t, 0.0, 1.0),
    ];

    let mut out = [Point3::origin(); 12];
    for (slot, point) in out.iter_mut().zip(raw) {
        *slot = normalize(point)?;
    }
    Ok(out)
}

/// The 20 faces of a unit icosahedron.
pub fn icosahedron() -> Result<Vec<Triangle>, GeometryError> {
    let vertices = vertices()?;
    Ok(FACES
        .iter()
        .map(|&[a, b, c]| Triangle::new(vertices[a], vertices[b], vertices[c]))
        .collect())
}
