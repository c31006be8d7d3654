//! WGSL shaders.
//!
//! Compilation runs in two halves. [`ShaderSource::parse`] parses and validates with naga and
//! needs no GPU. Its diagnostics are the shader's info log. [`Shader::compile`] then hands the
//! source to the device.

use std::borrow::Cow;

use crate::{
    data_structures::uniform::UniformLayout,
    error::{GpuError, checked},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn as_str(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }

    fn matches(self, stage: naga::ShaderStage) -> bool {
        matches!(
            (self, stage),
            (ShaderStage::Vertex, naga::ShaderStage::Vertex)
                | (ShaderStage::Fragment, naga::ShaderStage::Fragment)
        )
    }
}

/// Parsed and validated WGSL.
#[derive(Debug)]
pub struct ShaderSource {
    label: String,
    source: String,
    module: naga::Module,
}

impl ShaderSource {
    pub fn parse(label: &str, source: &str) -> Result<Self, GpuError> {
        let module = naga::front::wgsl::parse_str(source).map_err(|err| {
            GpuError::ShaderCompilation {
                label: label.to_string(),
                log: err.emit_to_string(source),
            }
        })?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|err| GpuError::ShaderCompilation {
                label: label.to_string(),
                log: error_chain(err.as_inner()),
            })?;

        Ok(Self {
            label: label.to_string(),
            source: source.to_string(),
            module,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn module(&self) -> &naga::Module {
        &self.module
    }

    /// Name of the first entry point for `stage`.
    pub fn entry_point(&self, stage: ShaderStage) -> Option<&str> {
        self.module
            .entry_points
            .iter()
            .find(|ep| stage.matches(ep.stage))
            .map(|ep| ep.name.as_str())
    }

    pub fn reflect(&self) -> Result<UniformLayout, GpuError> {
        UniformLayout::reflect(&self.label, &self.module)
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut log = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        log.push_str(": ");
        log.push_str(&cause.to_string());
        source = cause.source();
    }
    log
}

/// A shader module on the device plus the reflection data of its source.
#[derive(Debug)]
pub struct Shader {
    source: ShaderSource,
    layout: UniformLayout,
    module: wgpu::ShaderModule,
}

impl Shader {
    pub fn compile(device: &wgpu::Device, label: &str, source: &str) -> Result<Self, GpuError> {
        Self::from_source(device, ShaderSource::parse(label, source)?)
    }

    pub fn from_source(device: &wgpu::Device, source: ShaderSource) -> Result<Self, GpuError> {
        let layout = source.reflect()?;
        let module = checked(device, source.label(), || {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(source.label()),
                source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(source.source())),
            })
        })?;
        log::debug!(
            "Compiled shader `{}` ({} uniforms, {} resources)",
            source.label(),
            layout.len(),
            layout.resources().len()
        );
        Ok(Self {
            source,
            layout,
            module,
        })
    }

    pub fn label(&self) -> &str {
        self.source.label()
    }

    pub fn entry_point(&self, stage: ShaderStage) -> Option<&str> {
        self.source.entry_point(stage)
    }

    pub fn layout(&self) -> &UniformLayout {
        &self.layout
    }

    pub fn module(&self) -> &wgpu::ShaderModule {
        &self.module
    }
}
