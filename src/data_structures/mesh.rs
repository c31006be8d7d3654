//! Indexed meshes with one vertex buffer per attribute.

use crate::{
    data_structures::{
        buffer::{Buffer, BufferSet, BufferTarget},
        vertex_array::VertexArray,
    },
    error::GpuError,
};

pub const MAX_TEX_COORD_CHANNELS: usize = 4;

/// CPU-side geometry. Per-vertex streams are parallel to `positions`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshDescriptor {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Option<Vec<[f32; 4]>>,
    pub indices: Vec<u32>,
    /// Up to [`MAX_TEX_COORD_CHANNELS`] UV channels.
    pub tex_coords: Vec<Vec<[f32; 2]>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexAttributeKind {
    Position,
    Normal,
    Color,
    TexCoord(u8),
}

impl VertexAttributeKind {
    pub fn element_count(self) -> u32 {
        match self {
            VertexAttributeKind::Position | VertexAttributeKind::Normal => 3,
            VertexAttributeKind::Color => 4,
            VertexAttributeKind::TexCoord(_) => 2,
        }
    }

    pub fn format(self) -> wgpu::VertexFormat {
        match self.element_count() {
            2 => wgpu::VertexFormat::Float32x2,
            3 => wgpu::VertexFormat::Float32x3,
            _ => wgpu::VertexFormat::Float32x4,
        }
    }

    /// Bytes per vertex.
    pub fn size(self) -> u64 {
        self.format().size()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshAttribute {
    pub location: u32,
    pub kind: VertexAttributeKind,
}

impl MeshDescriptor {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn validate(&self) -> Result<(), GpuError> {
        let invalid = |reason: String| GpuError::InvalidMesh {
            name: self.name.clone(),
            reason,
        };
        if self.positions.is_empty() {
            return Err(invalid("no positions".into()));
        }
        if self.normals.is_empty() {
            return Err(invalid("no normals".into()));
        }
        if self.indices.is_empty() {
            return Err(invalid("no indices".into()));
        }
        let count = self.vertex_count();
        if self.normals.len() != count {
            return Err(invalid(format!(
                "{} normals for {count} positions",
                self.normals.len()
            )));
        }
        if let Some(colors) = &self.colors {
            if colors.len() != count {
                return Err(invalid(format!("{} colors for {count} positions", colors.len())));
            }
        }
        if self.tex_coords.len() > MAX_TEX_COORD_CHANNELS {
            return Err(invalid(format!(
                "{} UV channels, at most {MAX_TEX_COORD_CHANNELS} are supported",
                self.tex_coords.len()
            )));
        }
        for (channel, uvs) in self.tex_coords.iter().enumerate() {
            if uvs.len() != count {
                return Err(invalid(format!(
                    "UV channel {channel} has {} entries for {count} positions",
                    uvs.len()
                )));
            }
        }
        if let Some(index) = self.indices.iter().find(|&&i| i as usize >= count) {
            return Err(invalid(format!("index {index} out of range for {count} vertices")));
        }
        Ok(())
    }

    /// Position is location 0, normal 1. Color (when present) and then each UV channel take
    /// the following locations in order.
    pub fn attributes(&self) -> Vec<MeshAttribute> {
        let mut kinds = vec![VertexAttributeKind::Position, VertexAttributeKind::Normal];
        if self.colors.is_some() {
            kinds.push(VertexAttributeKind::Color);
        }
        kinds.extend((0..self.tex_coords.len()).map(|c| VertexAttributeKind::TexCoord(c as u8)));
        kinds
            .into_iter()
            .enumerate()
            .map(|(location, kind)| MeshAttribute {
                location: location as u32,
                kind,
            })
            .collect()
    }

    fn attribute_bytes(&self, kind: VertexAttributeKind) -> &[u8] {
        match kind {
            VertexAttributeKind::Position => bytemuck::cast_slice(&self.positions),
            VertexAttributeKind::Normal => bytemuck::cast_slice(&self.normals),
            VertexAttributeKind::Color => self
                .colors
                .as_deref()
                .map(|colors| bytemuck::cast_slice(colors))
                .unwrap_or_default(),
            VertexAttributeKind::TexCoord(channel) => self
                .tex_coords
                .get(channel as usize)
                .map(|uvs| bytemuck::cast_slice(uvs))
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug)]
pub struct Mesh {
    name: String,
    attributes: Vec<MeshAttribute>,
    buffers: BufferSet,
    index_buffer: Buffer,
    vertex_array: VertexArray,
}

impl Mesh {
    pub fn new(device: &wgpu::Device, descriptor: &MeshDescriptor) -> Result<Self, GpuError> {
        descriptor.validate()?;
        let attributes = descriptor.attributes();
        let mut buffers = BufferSet::new();
        let mut vertex_array = VertexArray::new();
        for attribute in &attributes {
            let label = format!("{} {:?}", descriptor.name, attribute.kind);
            let slot = buffers.push(Buffer::new(
                device,
                BufferTarget::Vertex,
                &label,
                descriptor.attribute_bytes(attribute.kind),
            )?);
            vertex_array.enable_attribute(
                slot,
                attribute.location,
                attribute.kind.format(),
                attribute.kind.size(),
                0,
            )?;
        }
        let index_buffer = Buffer::new(
            device,
            BufferTarget::Index,
            &format!("{} indices", descriptor.name),
            &descriptor.indices,
        )?;
        Ok(Self {
            name: descriptor.name.clone(),
            attributes,
            buffers,
            index_buffer,
            vertex_array,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[MeshAttribute] {
        &self.attributes
    }

    pub fn vertex_array(&self) -> &VertexArray {
        &self.vertex_array
    }

    pub fn index_count(&self) -> u32 {
        self.index_buffer.len() as u32
    }

    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) -> Result<(), GpuError> {
        self.vertex_array.bind(pass, &self.buffers)?;
        pass.set_index_buffer(self.index_buffer.slice(), wgpu::IndexFormat::Uint32);
        Ok(())
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) -> Result<(), GpuError> {
        self.bind(pass)?;
        pass.draw_indexed(0..self.index_count(), 0, 0..1);
        Ok(())
    }
}
