/// Geometry primitives for the geodesic sphere
use nalgebra::Point3;

use crate::error::GeometryError;

/// Norms below this are treated as a zero vector.
const MIN_NORM: f64 = 1e-12;

/// Scale a point so it lies on the unit sphere.
pub fn normalize(point: Point3<f64>) -> Result<Point3<f64>, GeometryError> {
    let norm = point.coords.norm();
    if !norm.is_finite() || norm < MIN_NORM {
        return Err(GeometryError::DegenerateVector { norm });
    }
    Ok(Point3::from(point.coords / norm))
}

/// A triangle face as an ordered triple of points (the order fixes the winding)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3<f64>; 3],
}

impl Triangle {
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    pub fn centroid(&self) -> Point3<f64> {
        let [a, b, c] = self.vertices;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Planar area of the flat triangle spanned by the three points
    pub fn area(&self) -> f64 {
        let [a, b, c] = self.vertices;
        (b - a).cross(&(c - a)).norm() / 2.0
    }
}

/// An immutable triangle soup approximating a sphere.
///
/// Built once by the composition root and then shared by reference with
/// every render pass.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Icosahedron refined `depth` times by geodesic subdivision.
    pub fn icosphere(depth: u32) -> Result<Self, GeometryError> {
        let mut triangles = crate::icosahedron::icosahedron()?;
        for _ in 0..depth {
            triangles = crate::subdivision::subdivide(&triangles)?;
        }
        let mesh = Self::from_triangles(triangles);
        log::debug!(
            "built icosphere: depth={} triangles={} vertices={}",
            depth,
            mesh.len(),
            mesh.unique_vertices()
        );
        Ok(mesh)
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triangle> {
        self.triangles.iter()
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Number of distinct vertex values shared between faces
    pub fn unique_vertices(&self) -> usize {
        let mut keys: Vec<[u64; 3]> = self
            .triangles
            .iter()
            .flat_map(|t| t.vertices.iter())
            .map(|p| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys.len()
    }

    /// Largest gap between a face centroid and the unit sphere
    pub fn max_sphere_deviation(&self) -> f64 {
        self.triangles
            .iter()
            .map(|t| 1.0 - t.centroid().coords.norm())
            .fold(0.0, f64::max)
    }
}

impl<'a> IntoIterator for &'a Mesh {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}
