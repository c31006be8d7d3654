//! Materials: a program plus the values fed to it.
//!
//! A [`Material`] owns its [`Program`], a CPU copy of every uniform the program declares (see
//! [`Uniforms`]), one uniform buffer per uniform block and the textures bound by name. Values
//! are staged by the setters and uploaded when the material is bound for drawing.

use std::collections::HashMap;

use crate::{
    context::RenderTargets,
    data_structures::{
        buffer::{Buffer, BufferTarget},
        mesh::Mesh,
        program::Program,
        texture::{Texture, create_default_sampler},
        uniform::{ResourceKind, Uniforms},
        vertex_array::VertexArray,
    },
    error::GpuError,
    pipelines::basic::PipelineOptions,
};

/// Uniform and texture names shared by the built-in shaders.
pub mod names {
    pub const AMBIENT_COLOR: &str = "material.ambient_color";
    pub const DIFFUSE_COLOR: &str = "material.diffuse_color";
    pub const SPECULAR_COLOR: &str = "material.specular_color";
    pub const SPECULAR_SHININESS: &str = "material.specular_shininess";
    pub const OBJECT_COLOR: &str = "material.object_color";
    pub const AMBIENT_STRENGTH: &str = "material.ambient_strength";
    pub const SPECULAR_STRENGTH: &str = "material.specular_strength";

    pub const CAMERA_POSITION: &str = "camera.position_world";

    pub const MODEL_MATRIX: &str = "mvp.model";
    pub const VIEW_MATRIX: &str = "mvp.view";
    pub const PROJECTION_MATRIX: &str = "mvp.projection";

    pub const LIGHT_POSITION: &str = "light.position_world";
    pub const LIGHT_COLOR: &str = "light.color";
    pub const LIGHT_TYPE: &str = "light.light_type";
    pub const LIGHT_DIRECTION: &str = "light.direction_world";
    pub const LIGHT_CONSTANT: &str = "light.attenuation_constant";
    pub const LIGHT_LINEAR: &str = "light.attenuation_linear";
    pub const LIGHT_QUADRATIC: &str = "light.attenuation_quadratic";
    pub const LIGHT_CUT_OFF: &str = "light.cut_off";
    pub const LIGHT_OUTER_CUT_OFF: &str = "light.outer_cut_off";

    pub const DIRECTIONAL_LIGHT_COLOR: &str = "directional_light.color";
    pub const DIRECTIONAL_LIGHT_DIRECTION: &str = "directional_light.direction_world";

    pub const DIFFUSE_MAP: &str = "diffuse_map";
    pub const SPECULAR_MAP: &str = "specular_map";

    pub const ELAPSED_TIME: &str = "elapsed_time";
    pub const COLOR: &str = "color";

    /// `point_lights[index].field`
    pub fn point_light(index: usize, field: &str) -> String {
        format!("point_lights[{index}].{field}")
    }
}

#[derive(Debug)]
pub struct Material {
    name: String,
    program: Program,
    uniforms: Uniforms,
    uniform_buffers: Vec<Buffer>,
    textures: HashMap<String, Texture>,
    fallback_texture: Texture,
    fallback_sampler: wgpu::Sampler,
    bind_group: Option<wgpu::BindGroup>,
}

impl Material {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        name: &str,
        program: Program,
    ) -> Result<Self, GpuError> {
        let uniforms = Uniforms::new(program.layout().clone());
        let uniform_buffers = program
            .layout()
            .blocks()
            .iter()
            .enumerate()
            .map(|(index, block)| {
                let bytes = uniforms.block_bytes(index).unwrap_or_default();
                Buffer::new(
                    device,
                    BufferTarget::Uniform,
                    &format!("{name} uniform `{}`", block.name),
                    bytes,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.to_string(),
            program,
            uniforms,
            uniform_buffers,
            textures: HashMap::new(),
            fallback_texture: Texture::single_pixel(
                device,
                queue,
                [255, 255, 255, 255],
                "fallback white",
            ),
            fallback_sampler: create_default_sampler(device),
            bind_group: None,
        })
    }

    /// Compiles a single-module WGSL program and wraps it.
    pub fn from_source(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        name: &str,
        source: &str,
        options: PipelineOptions,
    ) -> Result<Self, GpuError> {
        let program = Program::compile(device, name, source, options)?;
        Self::new(device, queue, name, program)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    pub fn uniforms_mut(&mut self) -> &mut Uniforms {
        &mut self.uniforms
    }

    pub fn has_uniform(&self, name: &str) -> bool {
        self.uniforms.contains(name)
    }

    pub fn set_int(&mut self, name: &str, value: i32) -> Result<(), GpuError> {
        self.uniforms.set_int(name, value)
    }

    pub fn set_float(&mut self, name: &str, value: f32) -> Result<(), GpuError> {
        self.uniforms.set_float(name, value)
    }

    pub fn set_vec2(&mut self, name: &str, value: impl Into<[f32; 2]>) -> Result<(), GpuError> {
        self.uniforms.set_vec2(name, value)
    }

    pub fn set_vec3(&mut self, name: &str, value: impl Into<[f32; 3]>) -> Result<(), GpuError> {
        self.uniforms.set_vec3(name, value)
    }

    pub fn set_vec4(&mut self, name: &str, value: impl Into<[f32; 4]>) -> Result<(), GpuError> {
        self.uniforms.set_vec4(name, value)
    }

    pub fn set_mat3(&mut self, name: &str, value: impl Into<[[f32; 3]; 3]>) -> Result<(), GpuError> {
        self.uniforms.set_mat3(name, value)
    }

    pub fn set_mat4(&mut self, name: &str, value: impl Into<[[f32; 4]; 4]>) -> Result<(), GpuError> {
        self.uniforms.set_mat4(name, value)
    }

    /// Binds `texture` to the `texture_2d` named `name`. A sampler named `{name}_sampler` uses
    /// the texture's own sampler.
    pub fn set_texture(&mut self, name: &str, texture: &Texture) -> Result<(), GpuError> {
        if self
            .program
            .layout()
            .resource(name, ResourceKind::Texture)
            .is_none()
        {
            return Err(GpuError::TextureNotFound(name.to_string()));
        }
        self.textures.insert(name.to_string(), texture.clone());
        self.bind_group = None;
        Ok(())
    }

    pub fn has_texture(&self, name: &str) -> bool {
        self.program
            .layout()
            .resource(name, ResourceKind::Texture)
            .is_some()
    }

    fn build_bind_group(&self, device: &wgpu::Device) -> wgpu::BindGroup {
        let layout = self.program.layout();
        let mut entries = Vec::new();
        for (index, block) in layout.blocks().iter().enumerate() {
            entries.push(wgpu::BindGroupEntry {
                binding: block.binding,
                resource: self.uniform_buffers[index].as_entire_binding(),
            });
        }
        for resource in layout.resources() {
            let resource_binding = match resource.kind {
                ResourceKind::Texture => {
                    let texture = self
                        .textures
                        .get(&resource.name)
                        .unwrap_or(&self.fallback_texture);
                    wgpu::BindingResource::TextureView(&texture.view)
                }
                ResourceKind::Sampler => {
                    let sampler = resource
                        .name
                        .strip_suffix("_sampler")
                        .and_then(|texture| self.textures.get(texture))
                        .and_then(|texture| texture.sampler.as_ref())
                        .unwrap_or(&self.fallback_sampler);
                    wgpu::BindingResource::Sampler(sampler)
                }
            };
            entries.push(wgpu::BindGroupEntry {
                binding: resource.binding,
                resource: resource_binding,
            });
        }
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} bind group", self.name)),
            layout: self.program.bind_group_layout(),
            entries: &entries,
        })
    }

    /// Uploads staged uniforms and writes the pipeline and bind group into `pass`.
    pub fn bind(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        targets: &RenderTargets,
        pass: &mut wgpu::RenderPass<'_>,
        vertex_array: &VertexArray,
    ) -> Result<(), GpuError> {
        let buffers = &self.uniform_buffers;
        self.uniforms.flush_with(|index, bytes| {
            queue.write_buffer(buffers[index].raw(), 0, bytes);
        });
        if self.bind_group.is_none() {
            self.bind_group = Some(self.build_bind_group(device));
        }
        let pipeline = self.program.pipeline(device, targets, vertex_array)?;
        pass.set_pipeline(pipeline);
        if let Some(bind_group) = &self.bind_group {
            pass.set_bind_group(0, bind_group, &[]);
        }
        Ok(())
    }

    /// Binds the material, then draws `mesh` with it.
    pub fn draw(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        targets: &RenderTargets,
        pass: &mut wgpu::RenderPass<'_>,
        mesh: &Mesh,
    ) -> Result<(), GpuError> {
        self.bind(device, queue, targets, pass, mesh.vertex_array())?;
        mesh.draw(pass)
    }
}
