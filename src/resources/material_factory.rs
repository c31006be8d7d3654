//! Phong materials built from importer-neutral parameters.

use crate::{
    context::InitContext,
    data_structures::{
        material::{Material, names},
        uniform::{Uniforms, ignore_missing},
    },
    error::GpuError,
    pipelines::basic::PipelineOptions,
    resources::load_texture,
};

/// Textured Phong shading with one light of any [`crate::light::LightType`].
pub const LIT_SHADER: &str = include_str!("../shaders/lit.wgsl");

/// A Phong material as described by a model file.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialParams {
    pub name: String,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub shininess: f32,
    /// Asset-root relative path of the diffuse map.
    pub diffuse_texture: Option<String>,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            name: "DefaultLitPhong".to_string(),
            ambient: [0.2, 0.2, 0.2],
            diffuse: [0.8, 0.8, 0.8],
            specular: [0.5, 0.5, 0.5],
            shininess: 32.0,
            diffuse_texture: None,
        }
    }
}

impl MaterialParams {
    /// Writes the colors and shininess into whichever of them `uniforms` declares.
    pub fn apply(&self, uniforms: &mut Uniforms) -> Result<(), GpuError> {
        ignore_missing(uniforms.set_vec3(names::AMBIENT_COLOR, self.ambient))?;
        ignore_missing(uniforms.set_vec3(names::DIFFUSE_COLOR, self.diffuse))?;
        ignore_missing(uniforms.set_vec3(names::SPECULAR_COLOR, self.specular))?;
        ignore_missing(uniforms.set_float(names::SPECULAR_SHININESS, self.shininess))
    }
}

/// An untextured lit material with the given parameters.
pub fn lit(ctx: &InitContext, params: &MaterialParams) -> Result<Material, GpuError> {
    let mut material = Material::from_source(
        &ctx.device,
        &ctx.queue,
        &params.name,
        LIT_SHADER,
        PipelineOptions::default(),
    )?;
    params.apply(material.uniforms_mut())?;
    Ok(material)
}

/// A lit material with its diffuse map loaded. A map that cannot be loaded is reported and
/// left white.
pub async fn phong(ctx: &InitContext, params: &MaterialParams) -> anyhow::Result<Material> {
    let mut material = lit(ctx, params)?;
    if let Some(file) = &params.diffuse_texture {
        match load_texture(ctx, file, true).await {
            Ok(texture) => material.set_texture(names::DIFFUSE_MAP, &texture)?,
            Err(err) => log::warn!("Material `{}`: {err:#}; using white", params.name),
        }
    }
    Ok(material)
}
