/// Object transforms and Euler rotation state
use nalgebra::{Matrix3, Matrix4, Point3, Rotation3, Vector3};
use std::f64::consts::TAU;

/// Euler angles in radians, applied in XYZ order.
///
/// Angles accumulate without wrapping, so they are kept in `f64`; an `f32`
/// angle stops resolving small per-frame steps after a few hours of spinning.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Euler {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Euler {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Rotation matrix `Rx * Ry * Rz`
    pub fn matrix(&self) -> Matrix3<f32> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), wrapped(self.x));
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), wrapped(self.y));
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), wrapped(self.z));
        (rx * ry * rz).into_inner()
    }
}

impl From<[f64; 3]> for Euler {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Reduce to one turn before narrowing so large angles keep their precision
fn wrapped(angle: f64) -> f32 {
    angle.rem_euclid(TAU) as f32
}

/// Position, rotation and scale of a scene object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Point3<f32>,
    pub rotation: Euler,
    pub scale: Vector3<f32>,
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: Point3::origin(),
            rotation: Euler::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_rotation(mut self, rotation: Euler) -> Self {
        self.rotation = rotation;
        self
    }

    /// Model matrix `T * R * S`
    pub fn model_matrix(&self) -> Matrix4<f32> {
        let translation = Matrix4::new_translation(&self.position.coords);
        let rotation = self.rotation.matrix().to_homogeneous();
        let scale = Matrix4::new_nonuniform_scaling(&self.scale);
        translation * rotation * scale
    }

    /// Inverse-transpose of the model's upper 3x3, for transforming normals
    pub fn normal_matrix(&self) -> Matrix3<f32> {
        let linear = self.rotation.matrix() * Matrix3::from_diagonal(&self.scale);
        linear
            .try_inverse()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix3::identity)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
