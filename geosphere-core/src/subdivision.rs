/// Geodesic subdivision by edge-midpoint insertion
///
/// ```text
///             a
///            / \
///          ab---ca
///          / \ / \
///         b---bc--c
/// ```
///
/// Each face becomes the three corner triangles plus the centre one. New
/// vertices are the Cartesian midpoints of the edges pushed back onto the
/// unit sphere, not slerped along the arc.
use nalgebra::Point3;

use crate::error::GeometryError;
use crate::geometry::{normalize, Triangle};

/// Split every triangle into four, projecting the new vertices onto the
/// unit sphere. Output is grouped by source triangle, in input order.
pub fn subdivide(triangles: &[Triangle]) -> Result<Vec<Triangle>, GeometryError> {
    split_with(triangles, normalize)
}

fn midpoint(a: &Point3<f64>, b: &Point3<f64>) -> Point3<f64> {
    Point3::from((a.coords + b.coords) / 2.0)
}

fn split_with<F>(triangles: &[Triangle], project: F) -> Result<Vec<Triangle>, GeometryError>
where
    F: Fn(Point3<f64>) -> Result<Point3<f64>, GeometryError>,
{
    let mut out = Vec::with_capacity(triangles.len() * 4);
    for triangle in triangles {
        let [a, b, c] = triangle.vertices;
        let ab = project(midpoint(&a, &b))?;
        let bc = project(midpoint(&b, &c))?;
        let ca = project(midpoint(&c, &a))?;

        out.push(Triangle::new(a, ab, ca));
        out.push(Triangle::new(ab, b, bc));
        out.push(Triangle::new(ca, bc, c));
        out.push(Triangle::new(ab, bc, ca));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Mesh;
    use crate::icosahedron::icosahedron;
    use approx::assert_relative_eq;

    fn cap() -> Triangle {
        let a = normalize(Point3::new(1.0, 0.0, 1.0)).unwrap();
        let b = normalize(Point3::new(-0.5, 0.866, 1.0)).unwrap();
        let c = normalize(Point3::new(-0.5, -0.866, 1.0)).unwrap();
        Triangle::new(a, b, c)
    }

    #[test]
    fn test_face_count_per_level() {
        for depth in 0..5 {
            let mesh = Mesh::icosphere(depth).unwrap();
            assert_eq!(mesh.len(), 20 * 4usize.pow(depth));
        }
    }

    #[test]
    fn test_vertices_stay_on_sphere() {
        for depth in 0..4 {
            let mesh = Mesh::icosphere(depth).unwrap();
            for triangle in &mesh {
                for v in triangle.vertices {
                    assert!((v.coords.norm() - 1.0).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_unique_vertex_count() {
        // V = 10 * 4^k + 2 for a subdivided icosahedron
        assert_eq!(Mesh::icosphere(0).unwrap().unique_vertices(), 12);
        assert_eq!(Mesh::icosphere(1).unwrap().unique_vertices(), 42);
        assert_eq!(Mesh::icosphere(3).unwrap().unique_vertices(), 642);
    }

    #[test]
    fn test_single_cap_split() {
        let parent = cap();
        let children = subdivide(&[parent]).unwrap();
        assert_eq!(children.len(), 4);

        let mut seen: Vec<Point3<f64>> = Vec::new();
        for child in &children {
            for v in child.vertices {
                if !seen.contains(&v) {
                    seen.push(v);
                }
            }
        }
        assert_eq!(seen.len(), 6);
        for original in parent.vertices {
            assert!(seen.contains(&original));
        }

        let [a, b, _] = parent.vertices;
        let ab = normalize(midpoint(&a, &b)).unwrap();
        assert_eq!(children[0].vertices[1], ab);
        assert_eq!(children[3].vertices[0], ab);
        for v in seen {
            assert_relative_eq!(v.coords.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_child_order_grouped_by_source() {
        let faces = icosahedron().unwrap();
        let children = subdivide(&faces).unwrap();
        for (i, face) in faces.iter().enumerate() {
            let group = &children[i * 4..i * 4 + 4];
            assert_eq!(group[0].vertices[0], face.vertices[0]);
            assert_eq!(group[1].vertices[1], face.vertices[1]);
            assert_eq!(group[2].vertices[2], face.vertices[2]);
        }
    }

    #[test]
    fn test_flat_split_conserves_area() {
        let faces = icosahedron().unwrap();
        let parent_area: f64 = faces.iter().map(Triangle::area).sum();
        let flat = split_with(&faces, Ok).unwrap();
        let child_area: f64 = flat.iter().map(Triangle::area).sum();
        assert_relative_eq!(child_area, parent_area, epsilon = 1e-9);
    }

    #[test]
    fn test_sphere_deviation_shrinks() {
        let deviations: Vec<f64> = (0..5)
            .map(|depth| Mesh::icosphere(depth).unwrap().max_sphere_deviation())
            .collect();
        for pair in deviations.windows(2) {
            assert!(pair[1] < pair[0], "{:?}", deviations);
        }
    }

    #[test]
    fn test_degenerate_input_fails_fast() {
        let p = Point3::new(1.0, 0.0, 0.0);
        let q = Point3::new(-1.0, 0.0, 0.0);
        let err = subdivide(&[Triangle::new(p, q, p)]).unwrap_err();
        assert!(matches!(err, GeometryError::DegenerateVector { .. }));
    }

    #[test]
    fn test_stable_for_same_input() {
        let faces = icosahedron().unwrap();
        assert_eq!(subdivide(&faces).unwrap(), subdivide(&faces).unwrap());
    }
}
