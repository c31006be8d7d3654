//! Look-at camera with a perspective projection.

use cgmath::{Deg, EuclideanSpace, Matrix4, Point3, Rad, Vector3};

use crate::data_structures::{
    material::names,
    uniform::{Uniforms, ignore_missing},
};
use crate::error::GpuError;

/// Maps OpenGL clip space (z in -1..1) to wgpu clip space (z in 0..1).
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view.
    pub fov_y: Deg<f32>,
    pub near: f32,
    pub far: f32,
    width: u32,
    height: u32,
}

impl Camera {
    pub fn new(
        position: impl Into<Point3<f32>>,
        target: impl Into<Point3<f32>>,
        fov_y_degrees: f32,
        near: f32,
        far: f32,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            position: position.into(),
            target: target.into(),
            up: Vector3::unit_y(),
            fov_y: Deg(fov_y_degrees),
            near,
            far,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Zero sizes (minimised window) keep the previous aspect ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.width = width;
            self.height = height;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fov_y, self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }

    /// Writes `camera.position_world`, `mvp.view` and `mvp.projection` where declared.
    pub fn apply(&self, uniforms: &mut Uniforms) -> Result<(), GpuError> {
        ignore_missing(uniforms.set_vec3(names::CAMERA_POSITION, self.position.to_vec()))?;
        ignore_missing(uniforms.set_mat4(names::VIEW_MATRIX, self.view_matrix()))?;
        ignore_missing(uniforms.set_mat4(names::PROJECTION_MATRIX, self.projection_matrix()))
    }
}

/// A point on a sphere around `offset`, used to orbit a camera.
///
/// `theta` is the polar angle from +Y and `phi` the azimuth from +X towards +Z, both in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphericalCoordinates {
    pub offset: Vector3<f32>,
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl SphericalCoordinates {
    pub fn new(offset: Vector3<f32>, radius: f32, theta: f32, phi: f32) -> Self {
        Self {
            offset,
            radius,
            theta,
            phi,
        }
    }

    pub fn position(&self) -> Point3<f32> {
        let theta: Rad<f32> = Deg(self.theta).into();
        let phi: Rad<f32> = Deg(self.phi).into();
        let (sin_theta, cos_theta) = theta.0.sin_cos();
        let (sin_phi, cos_phi) = phi.0.sin_cos();
        Point3::from_vec(
            Vector3::new(
                self.radius * sin_theta * cos_phi,
                self.radius * cos_theta,
                self.radius * sin_theta * sin_phi,
            ) + self.offset,
        )
    }
}
