//! Linked shader programs.
//!
//! A [`Program`] pairs a vertex and a fragment shader, merges their reflected bindings into one
//! bind group layout and owns the pipelines built from it. Pipelines depend on the vertex layout
//! of what is drawn, so they are created on first use and cached per [`VertexLayoutKey`].

use std::{collections::HashMap, sync::Arc};

use crate::{
    context::RenderTargets,
    data_structures::{
        shader::{Shader, ShaderStage},
        uniform::UniformLayout,
        vertex_array::{VertexArray, VertexLayoutKey},
    },
    error::{GpuError, checked},
    pipelines::basic::{PipelineOptions, Stage, mk_render_pipeline},
};

#[derive(Debug)]
pub struct Program {
    label: String,
    vertex: Shader,
    vertex_entry: String,
    fragment: Option<Shader>,
    fragment_entry: String,
    layout: Arc<UniformLayout>,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    options: PipelineOptions,
    pipelines: HashMap<VertexLayoutKey, wgpu::RenderPipeline>,
}

impl Program {
    /// Link two separately compiled shaders.
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        vertex: Shader,
        fragment: Shader,
        options: PipelineOptions,
    ) -> Result<Self, GpuError> {
        let fragment_entry = required_entry(&fragment, ShaderStage::Fragment)?;
        let mut layout = vertex.layout().clone();
        layout.merge(label, fragment.layout())?;
        Self::link(device, label, vertex, Some(fragment), fragment_entry, layout, options)
    }

    /// Link a single WGSL module that declares both a vertex and a fragment entry point.
    pub fn from_shader(
        device: &wgpu::Device,
        label: &str,
        shader: Shader,
        options: PipelineOptions,
    ) -> Result<Self, GpuError> {
        let fragment_entry = required_entry(&shader, ShaderStage::Fragment)?;
        let layout = shader.layout().clone();
        Self::link(device, label, shader, None, fragment_entry, layout, options)
    }

    /// Compile `source` and link it as a single-module program.
    pub fn compile(
        device: &wgpu::Device,
        label: &str,
        source: &str,
        options: PipelineOptions,
    ) -> Result<Self, GpuError> {
        let shader = Shader::compile(device, label, source)?;
        Self::from_shader(device, label, shader, options)
    }

    fn link(
        device: &wgpu::Device,
        label: &str,
        vertex: Shader,
        fragment: Option<Shader>,
        fragment_entry: String,
        layout: UniformLayout,
        options: PipelineOptions,
    ) -> Result<Self, GpuError> {
        let vertex_entry = required_entry(&vertex, ShaderStage::Vertex)?;
        let (bind_group_layout, pipeline_layout) = checked(device, label, || {
            let bind_group_layout =
                device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some(&format!("{label} bind group layout")),
                    entries: &layout.bind_group_layout_entries(),
                });
            let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(&format!("{label} pipeline layout")),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });
            (bind_group_layout, pipeline_layout)
        })?;

        Ok(Self {
            label: label.to_string(),
            vertex,
            vertex_entry,
            fragment,
            fragment_entry,
            layout: Arc::new(layout),
            bind_group_layout,
            pipeline_layout,
            options,
            pipelines: HashMap::new(),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn layout(&self) -> &Arc<UniformLayout> {
        &self.layout
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Number of pipelines built so far.
    pub fn pipeline_count(&self) -> usize {
        self.pipelines.len()
    }

    /// The pipeline drawing `vertex_array` into `targets`, built on first request.
    pub fn pipeline(
        &mut self,
        device: &wgpu::Device,
        targets: &RenderTargets,
        vertex_array: &VertexArray,
    ) -> Result<&wgpu::RenderPipeline, GpuError> {
        let key = vertex_array.key();
        if !self.pipelines.contains_key(&key) {
            let fragment = self.fragment.as_ref().unwrap_or(&self.vertex);
            let pipeline = checked(device, &self.label, || {
                mk_render_pipeline(
                    device,
                    &self.label,
                    &self.pipeline_layout,
                    Stage {
                        module: self.vertex.module(),
                        entry_point: &self.vertex_entry,
                    },
                    Stage {
                        module: fragment.module(),
                        entry_point: &self.fragment_entry,
                    },
                    &vertex_array.layouts(),
                    targets,
                    &self.options,
                )
            })?;
            log::debug!(
                "Built pipeline {} for program `{}`",
                self.pipelines.len(),
                self.label
            );
            self.pipelines.insert(key.clone(), pipeline);
        }
        self.pipelines
            .get(&key)
            .ok_or_else(|| GpuError::InvalidVertexLayout(format!("no pipeline for `{}`", self.label)))
    }
}

fn required_entry(shader: &Shader, stage: ShaderStage) -> Result<String, GpuError> {
    shader
        .entry_point(stage)
        .map(str::to_string)
        .ok_or_else(|| GpuError::MissingEntryPoint {
            label: shader.label().to_string(),
            stage: stage.as_str(),
        })
}
