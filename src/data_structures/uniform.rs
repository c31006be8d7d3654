//! Uniforms addressed by name.
//!
//! [`UniformLayout`] is reflected from a naga module. Every `var<uniform>` in bind group 0
//! becomes a block. Struct members are flattened to dotted names and arrays to indexed names:
//!
//! ```text
//! var<uniform> light: Light;              -> "light.color", "light.position_world", ...
//! var<uniform> point_lights: array<P, 3>; -> "point_lights[0].color", ...
//! var<uniform> elapsed_time: f32;         -> "elapsed_time"
//! ```
//!
//! Textures and samplers in group 0 are recorded as resources by variable name.
//! [`Uniforms`] stages values for a layout on the CPU and tracks which blocks changed since the
//! last upload.

use std::{collections::HashMap, sync::Arc};

use crate::error::GpuError;

/// The host-visible shape of a uniform value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UniformKind {
    Int,
    UInt,
    Float,
    IVec2,
    IVec3,
    IVec4,
    Vec2,
    Vec3,
    Vec4,
    Mat3,
    Mat4,
}

impl UniformKind {
    pub fn name(self) -> &'static str {
        match self {
            UniformKind::Int => "i32",
            UniformKind::UInt => "u32",
            UniformKind::Float => "f32",
            UniformKind::IVec2 => "vec2<i32>",
            UniformKind::IVec3 => "vec3<i32>",
            UniformKind::IVec4 => "vec4<i32>",
            UniformKind::Vec2 => "vec2<f32>",
            UniformKind::Vec3 => "vec3<f32>",
            UniformKind::Vec4 => "vec4<f32>",
            UniformKind::Mat3 => "mat3x3<f32>",
            UniformKind::Mat4 => "mat4x4<f32>",
        }
    }

    /// Bytes the value occupies inside a uniform block. `mat3x3` columns are padded to 16.
    pub fn size(self) -> usize {
        match self {
            UniformKind::Int | UniformKind::UInt | UniformKind::Float => 4,
            UniformKind::IVec2 | UniformKind::Vec2 => 8,
            UniformKind::IVec3 | UniformKind::Vec3 => 12,
            UniformKind::IVec4 | UniformKind::Vec4 => 16,
            UniformKind::Mat3 => 48,
            UniformKind::Mat4 => 64,
        }
    }

    fn from_naga(inner: &naga::TypeInner) -> Option<Self> {
        use naga::{ScalarKind, TypeInner, VectorSize};
        match *inner {
            TypeInner::Scalar(scalar) if scalar.width == 4 => match scalar.kind {
                ScalarKind::Sint => Some(UniformKind::Int),
                ScalarKind::Uint => Some(UniformKind::UInt),
                ScalarKind::Float => Some(UniformKind::Float),
                _ => None,
            },
            TypeInner::Vector { size, scalar } if scalar.width == 4 => match (scalar.kind, size) {
                (ScalarKind::Float, VectorSize::Bi) => Some(UniformKind::Vec2),
                (ScalarKind::Float, VectorSize::Tri) => Some(UniformKind::Vec3),
                (ScalarKind::Float, VectorSize::Quad) => Some(UniformKind::Vec4),
                (ScalarKind::Sint, VectorSize::Bi) => Some(UniformKind::IVec2),
                (ScalarKind::Sint, VectorSize::Tri) => Some(UniformKind::IVec3),
                (ScalarKind::Sint, VectorSize::Quad) => Some(UniformKind::IVec4),
                _ => None,
            },
            TypeInner::Matrix {
                columns,
                rows,
                scalar,
            } if scalar.width == 4 && scalar.kind == ScalarKind::Float => match (columns, rows) {
                (VectorSize::Tri, VectorSize::Tri) => Some(UniformKind::Mat3),
                (VectorSize::Quad, VectorSize::Quad) => Some(UniformKind::Mat4),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformEntry {
    /// Index into [`UniformLayout::blocks`].
    pub block: usize,
    pub offset: u32,
    pub kind: UniformKind,
}

/// One `var<uniform>` binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniformBlock {
    pub name: String,
    pub binding: u32,
    pub size: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Texture,
    Sampler,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceEntry {
    pub name: String,
    pub binding: u32,
    pub kind: ResourceKind,
}

#[derive(Clone, Debug, Default)]
pub struct UniformLayout {
    blocks: Vec<UniformBlock>,
    entries: HashMap<String, UniformEntry>,
    resources: Vec<ResourceEntry>,
}

impl UniformLayout {
    /// Reflects the group 0 bindings of `module`. Other groups and storage buffers are rejected.
    pub fn reflect(label: &str, module: &naga::Module) -> Result<Self, GpuError> {
        let mut layout = Self::default();
        for (_, global) in module.global_variables.iter() {
            let Some(binding) = &global.binding else {
                continue;
            };
            let name = global.name.clone().unwrap_or_default();
            let unsupported = |reason: String| GpuError::UnsupportedBinding {
                label: label.to_string(),
                name: name.clone(),
                reason,
            };
            if binding.group != 0 {
                return Err(unsupported(format!(
                    "bind group {} is not supported, use group 0",
                    binding.group
                )));
            }

            let inner = &module.types[global.ty].inner;
            match global.space {
                naga::AddressSpace::Uniform => {
                    let block = layout.blocks.len();
                    let size = inner.size(module.to_ctx());
                    layout.blocks.push(UniformBlock {
                        name: name.clone(),
                        binding: binding.binding,
                        size: size.div_ceil(16) * 16,
                    });
                    layout.flatten(module, &name, global.ty, 0, block);
                }
                naga::AddressSpace::Handle => {
                    let kind = match *inner {
                        naga::TypeInner::Image {
                            dim: naga::ImageDimension::D2,
                            arrayed: false,
                            class:
                                naga::ImageClass::Sampled {
                                    kind: naga::ScalarKind::Float,
                                    multi: false,
                                },
                        } => ResourceKind::Texture,
                        naga::TypeInner::Sampler { comparison: false } => ResourceKind::Sampler,
                        _ => {
                            return Err(unsupported(
                                "only texture_2d<f32> and sampler handles are supported".into(),
                            ));
                        }
                    };
                    layout.resources.push(ResourceEntry {
                        name,
                        binding: binding.binding,
                        kind,
                    });
                }
                other => {
                    return Err(unsupported(format!("address space {other:?}")));
                }
            }
        }
        Ok(layout)
    }

    fn flatten(
        &mut self,
        module: &naga::Module,
        name: &str,
        ty: naga::Handle<naga::Type>,
        offset: u32,
        block: usize,
    ) {
        let inner = &module.types[ty].inner;
        if let Some(kind) = UniformKind::from_naga(inner) {
            self.entries.insert(
                name.to_string(),
                UniformEntry {
                    block,
                    offset,
                    kind,
                },
            );
            return;
        }
        match inner {
            naga::TypeInner::Struct { members, .. } => {
                for member in members {
                    let Some(member_name) = &member.name else {
                        continue;
                    };
                    self.flatten(
                        module,
                        &format!("{name}.{member_name}"),
                        member.ty,
                        offset + member.offset,
                        block,
                    );
                }
            }
            naga::TypeInner::Array {
                base,
                size: naga::ArraySize::Constant(count),
                stride,
            } => {
                for i in 0..count.get() {
                    self.flatten(module, &format!("{name}[{i}]"), *base, offset + i * stride, block);
                }
            }
            _ => log::debug!("Uniform `{name}` has a type that cannot be set from the host"),
        }
    }

    /// Adds the bindings of `other`. A binding declared by both must agree.
    pub fn merge(&mut self, label: &str, other: &UniformLayout) -> Result<(), GpuError> {
        let conflict = |name: &str, reason: &str| GpuError::UnsupportedBinding {
            label: label.to_string(),
            name: name.to_string(),
            reason: reason.to_string(),
        };
        for (other_index, block) in other.blocks.iter().enumerate() {
            if let Some(existing) = self.blocks.iter().find(|b| b.binding == block.binding) {
                if existing != block {
                    return Err(conflict(&block.name, "declared differently across stages"));
                }
                continue;
            }
            if self.binding_in_use(block.binding) {
                return Err(conflict(&block.name, "binding is used by a resource"));
            }
            let index = self.blocks.len();
            self.blocks.push(block.clone());
            for (name, entry) in other.entries.iter().filter(|(_, e)| e.block == other_index) {
                self.entries.insert(
                    name.clone(),
                    UniformEntry {
                        block: index,
                        ..*entry
                    },
                );
            }
        }
        for resource in &other.resources {
            if let Some(existing) = self.resources.iter().find(|r| r.binding == resource.binding) {
                if existing != resource {
                    return Err(conflict(&resource.name, "declared differently across stages"));
                }
                continue;
            }
            if self.binding_in_use(resource.binding) {
                return Err(conflict(&resource.name, "binding is used by a uniform block"));
            }
            self.resources.push(resource.clone());
        }
        Ok(())
    }

    fn binding_in_use(&self, binding: u32) -> bool {
        self.blocks.iter().any(|b| b.binding == binding)
            || self.resources.iter().any(|r| r.binding == binding)
    }

    pub fn entry(&self, name: &str) -> Option<&UniformEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Flattened uniform names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn blocks(&self) -> &[UniformBlock] {
        &self.blocks
    }

    pub fn resources(&self) -> &[ResourceEntry] {
        &self.resources
    }

    pub fn resource(&self, name: &str, kind: ResourceKind) -> Option<&ResourceEntry> {
        self.resources
            .iter()
            .find(|r| r.kind == kind && r.name == name)
    }

    pub fn bind_group_layout_entries(&self) -> Vec<wgpu::BindGroupLayoutEntry> {
        let visibility = wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT;
        let blocks = self.blocks.iter().map(|block| wgpu::BindGroupLayoutEntry {
            binding: block.binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        });
        let resources = self.resources.iter().map(|resource| wgpu::BindGroupLayoutEntry {
            binding: resource.binding,
            visibility,
            ty: match resource.kind {
                ResourceKind::Texture => wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                ResourceKind::Sampler => {
                    wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering)
                }
            },
            count: None,
        });
        blocks.chain(resources).collect()
    }
}

#[derive(Clone, Debug)]
struct StagedBlock {
    bytes: Vec<u8>,
    dirty: bool,
}

/// CPU-side uniform values for one [`UniformLayout`].
#[derive(Clone, Debug)]
pub struct Uniforms {
    layout: Arc<UniformLayout>,
    blocks: Vec<StagedBlock>,
}

impl Uniforms {
    pub fn new(layout: Arc<UniformLayout>) -> Self {
        let blocks = layout
            .blocks
            .iter()
            .map(|block| StagedBlock {
                bytes: vec![0; block.size as usize],
                dirty: true,
            })
            .collect();
        Self { layout, blocks }
    }

    pub fn layout(&self) -> &UniformLayout {
        &self.layout
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layout.contains(name)
    }

    fn write(&mut self, name: &str, given: UniformKind, bytes: &[u8]) -> Result<(), GpuError> {
        let entry = self.entry(name, given)?;
        let block = &mut self.blocks[entry.block];
        let start = entry.offset as usize;
        block.bytes[start..start + bytes.len()].copy_from_slice(bytes);
        block.dirty = true;
        Ok(())
    }

    fn entry(&self, name: &str, given: UniformKind) -> Result<UniformEntry, GpuError> {
        let entry = *self
            .layout
            .entry(name)
            .ok_or_else(|| GpuError::UniformNotFound(name.to_string()))?;
        if entry.kind != given {
            return Err(GpuError::UniformTypeMismatch {
                name: name.to_string(),
                declared: entry.kind.name(),
                given: given.name(),
            });
        }
        Ok(entry)
    }

    pub fn set_int(&mut self, name: &str, value: i32) -> Result<(), GpuError> {
        self.write(name, UniformKind::Int, bytemuck::bytes_of(&value))
    }

    pub fn set_uint(&mut self, name: &str, value: u32) -> Result<(), GpuError> {
        self.write(name, UniformKind::UInt, bytemuck::bytes_of(&value))
    }

    pub fn set_float(&mut self, name: &str, value: f32) -> Result<(), GpuError> {
        self.write(name, UniformKind::Float, bytemuck::bytes_of(&value))
    }

    pub fn set_vec2(&mut self, name: &str, value: impl Into<[f32; 2]>) -> Result<(), GpuError> {
        self.write(name, UniformKind::Vec2, bytemuck::bytes_of(&value.into()))
    }

    pub fn set_vec3(&mut self, name: &str, value: impl Into<[f32; 3]>) -> Result<(), GpuError> {
        self.write(name, UniformKind::Vec3, bytemuck::bytes_of(&value.into()))
    }

    pub fn set_vec4(&mut self, name: &str, value: impl Into<[f32; 4]>) -> Result<(), GpuError> {
        self.write(name, UniformKind::Vec4, bytemuck::bytes_of(&value.into()))
    }

    pub fn set_ivec3(&mut self, name: &str, value: [i32; 3]) -> Result<(), GpuError> {
        self.write(name, UniformKind::IVec3, bytemuck::bytes_of(&value))
    }

    pub fn set_mat3(&mut self, name: &str, value: impl Into<[[f32; 3]; 3]>) -> Result<(), GpuError> {
        let columns = value.into();
        let mut padded = [[0.0f32; 4]; 3];
        for (dst, src) in padded.iter_mut().zip(columns) {
            dst[..3].copy_from_slice(&src);
        }
        self.write(name, UniformKind::Mat3, bytemuck::bytes_of(&padded))
    }

    pub fn set_mat4(&mut self, name: &str, value: impl Into<[[f32; 4]; 4]>) -> Result<(), GpuError> {
        self.write(name, UniformKind::Mat4, bytemuck::bytes_of(&value.into()))
    }

    fn read<T: bytemuck::Pod>(&self, name: &str, kind: UniformKind) -> Result<T, GpuError> {
        let entry = self.entry(name, kind)?;
        let start = entry.offset as usize;
        let bytes = &self.blocks[entry.block].bytes[start..start + std::mem::size_of::<T>()];
        Ok(bytemuck::pod_read_unaligned(bytes))
    }

    pub fn int(&self, name: &str) -> Result<i32, GpuError> {
        self.read(name, UniformKind::Int)
    }

    pub fn float(&self, name: &str) -> Result<f32, GpuError> {
        self.read(name, UniformKind::Float)
    }

    pub fn vec3(&self, name: &str) -> Result<[f32; 3], GpuError> {
        self.read(name, UniformKind::Vec3)
    }

    pub fn vec4(&self, name: &str) -> Result<[f32; 4], GpuError> {
        self.read(name, UniformKind::Vec4)
    }

    pub fn mat4(&self, name: &str) -> Result<[[f32; 4]; 4], GpuError> {
        self.read(name, UniformKind::Mat4)
    }

    /// Raw staged bytes of block `index`.
    pub fn block_bytes(&self, index: usize) -> Option<&[u8]> {
        self.blocks.get(index).map(|b| b.bytes.as_slice())
    }

    pub fn is_dirty(&self) -> bool {
        self.blocks.iter().any(|b| b.dirty)
    }

    /// Hands every changed block to `write` and marks it clean.
    pub fn flush_with(&mut self, mut write: impl FnMut(usize, &[u8])) {
        for (index, block) in self.blocks.iter_mut().enumerate() {
            if block.dirty {
                write(index, &block.bytes);
                block.dirty = false;
            }
        }
    }
}

/// Treats a write to an undeclared uniform as a no-op. Type mismatches still fail.
///
/// Shared helpers such as camera and light uploads use this, so they work with programs that
/// only declare some of the names.
pub fn ignore_missing(result: Result<(), GpuError>) -> Result<(), GpuError> {
    match result {
        Err(GpuError::UniformNotFound(_)) => Ok(()),
        other => other,
    }
}
