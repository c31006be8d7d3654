//! Light sources and their uniform upload.

use cgmath::{Deg, InnerSpace, Vector3};

use crate::data_structures::{
    material::names,
    uniform::{Uniforms, ignore_missing},
};
use crate::error::GpuError;

/// Written into `light.light_type`. The shader switches on these values.
#[repr(i32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LightType {
    #[default]
    Unknown = 0,
    Directional = 1,
    Point = 2,
    Spot = 3,
}

impl LightType {
    /// The types a user can pick in the GUI.
    pub const SELECTABLE: [LightType; 3] = [LightType::Directional, LightType::Point, LightType::Spot];

    pub fn label(self) -> &'static str {
        match self {
            LightType::Unknown => "Unknown",
            LightType::Directional => "Directional",
            LightType::Point => "Point",
            LightType::Spot => "Spot",
        }
    }
}

/// Attenuation for a range of roughly 50 units.
pub const DEFAULT_ATTENUATION: (f32, f32, f32) = (1.0, 0.09, 0.032);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub kind: LightType,
    pub position: Vector3<f32>,
    pub color: Vector3<f32>,
    pub direction: Vector3<f32>,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    /// Cosine of the inner cone angle.
    pub cut_off: f32,
    /// Cosine of the outer cone angle.
    pub outer_cut_off: f32,
}

impl Light {
    pub fn new(position: Vector3<f32>, color: Vector3<f32>) -> Self {
        let (constant, linear, quadratic) = DEFAULT_ATTENUATION;
        Self {
            kind: LightType::Unknown,
            position,
            color,
            direction: Vector3::new(0.0, -1.0, 0.0),
            constant,
            linear,
            quadratic,
            cut_off: cone(12.5),
            outer_cut_off: cone(14.5),
        }
    }

    pub fn directional(direction: Vector3<f32>, color: Vector3<f32>) -> Self {
        Self {
            kind: LightType::Directional,
            direction: direction.normalize(),
            ..Self::new(Vector3::new(0.0, 0.0, 0.0), color)
        }
    }

    pub fn point(position: Vector3<f32>, color: Vector3<f32>) -> Self {
        Self {
            kind: LightType::Point,
            ..Self::new(position, color)
        }
    }

    pub fn spot(position: Vector3<f32>, direction: Vector3<f32>, color: Vector3<f32>) -> Self {
        Self {
            kind: LightType::Spot,
            direction: direction.normalize(),
            ..Self::new(position, color)
        }
    }

    pub fn with_attenuation(mut self, constant: f32, linear: f32, quadratic: f32) -> Self {
        self.constant = constant;
        self.linear = linear;
        self.quadratic = quadratic;
        self
    }

    /// Points the light along `direction`, normalized. A near-zero vector has no direction and
    /// leaves the current one in place. Returns whether the direction changed.
    pub fn set_direction(&mut self, direction: Vector3<f32>) -> bool {
        if direction.magnitude2() < 1e-8 {
            return false;
        }
        self.direction = direction.normalize();
        true
    }

    /// Inner and outer cone half angles in degrees.
    pub fn with_cone(mut self, inner: f32, outer: f32) -> Self {
        self.cut_off = cone(inner);
        self.outer_cut_off = cone(outer);
        self
    }

    /// Writes the single-light block (`light.*`). Only the fields the light type uses are
    /// written besides position and color.
    pub fn apply(&self, uniforms: &mut Uniforms) -> Result<(), GpuError> {
        ignore_missing(uniforms.set_vec3(names::LIGHT_POSITION, self.position))?;
        ignore_missing(uniforms.set_vec3(names::LIGHT_COLOR, self.color))?;
        ignore_missing(uniforms.set_int(names::LIGHT_TYPE, self.kind as i32))?;
        match self.kind {
            LightType::Directional => {
                ignore_missing(uniforms.set_vec3(names::LIGHT_DIRECTION, self.direction))?;
            }
            LightType::Point => self.apply_attenuation(uniforms)?,
            LightType::Spot => {
                ignore_missing(uniforms.set_vec3(names::LIGHT_DIRECTION, self.direction))?;
                ignore_missing(uniforms.set_float(names::LIGHT_CUT_OFF, self.cut_off))?;
                ignore_missing(uniforms.set_float(names::LIGHT_OUTER_CUT_OFF, self.outer_cut_off))?;
                self.apply_attenuation(uniforms)?;
            }
            LightType::Unknown => {}
        }
        Ok(())
    }

    fn apply_attenuation(&self, uniforms: &mut Uniforms) -> Result<(), GpuError> {
        ignore_missing(uniforms.set_float(names::LIGHT_CONSTANT, self.constant))?;
        ignore_missing(uniforms.set_float(names::LIGHT_LINEAR, self.linear))?;
        ignore_missing(uniforms.set_float(names::LIGHT_QUADRATIC, self.quadratic))
    }

    /// Writes this light as the `directional_light` of a multi-light program.
    pub fn apply_directional(&self, uniforms: &mut Uniforms) -> Result<(), GpuError> {
        ignore_missing(uniforms.set_vec3(names::DIRECTIONAL_LIGHT_COLOR, self.color))?;
        ignore_missing(uniforms.set_vec3(names::DIRECTIONAL_LIGHT_DIRECTION, self.direction))
    }

    /// Writes this light as `point_lights[index]` of a multi-light program.
    pub fn apply_point(&self, index: usize, uniforms: &mut Uniforms) -> Result<(), GpuError> {
        let name = |field: &str| names::point_light(index, field);
        uniforms.set_vec3(&name("position_world"), self.position)?;
        uniforms.set_vec3(&name("color"), self.color)?;
        uniforms.set_float(&name("attenuation_constant"), self.constant)?;
        uniforms.set_float(&name("attenuation_linear"), self.linear)?;
        uniforms.set_float(&name("attenuation_quadratic"), self.quadratic)
    }
}

fn cone(degrees: f32) -> f32 {
    cgmath::Rad::from(Deg(degrees)).0.cos()
}
