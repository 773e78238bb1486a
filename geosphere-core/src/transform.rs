/// Orientation state and homogeneous transforms
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

/// Rotation state around three axes (in degrees, each kept in `[0, 360)`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: wrap_degrees(x),
            y: wrap_degrees(y),
            z: wrap_degrees(z),
        }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Integer slider positions in `[0, 360]`; 360 is the same as 0.
    pub fn from_slider(x: u16, y: u16, z: u16) -> Self {
        Self::new(f64::from(x), f64::from(y), f64::from(z))
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        *self = Self::new(self.x + dx, self.y + dy, self.z + dz);
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

fn wrap_degrees(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from a rotation state.
    ///
    /// Points are rotated about Y first, then Z, then X. The axes do not
    /// commute, so this order is part of the contract.
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f64> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x.to_radians(), 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y.to_radians(), 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z.to_radians()));

        rx * rz * ry
    }

    /// Rotation with the perspective coefficient written into the `w` row.
    ///
    /// The entry is set on the composed matrix, so `w = 1 + perspective * z`
    /// reads the model-space `z` of the incoming point.
    pub fn build(rotation: &RotationState, perspective: f64) -> Matrix4<f64> {
        let mut matrix = Self::rotation_matrix(rotation);
        matrix[(3, 2)] = perspective;
        matrix
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f64, y: f64, z: f64) -> Matrix4<f64> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Homogeneous multiply of a point (`w = 1`); no divide.
    pub fn apply(matrix: &Matrix4<f64>, point: &Point3<f64>) -> Vector4<f64> {
        matrix * point.to_homogeneous()
    }
}
