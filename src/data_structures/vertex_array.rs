//! Vertex input layouts.
//!
//! A [`VertexArray`] records which shader location reads which bytes of which vertex buffer slot.
//! Programs build their pipelines from it, and meshes bind their buffers through it.

use crate::{data_structures::buffer::BufferSet, error::GpuError};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct VertexSlot {
    stride: u64,
    step_mode: wgpu::VertexStepMode,
    attributes: Vec<wgpu::VertexAttribute>,
}

/// Hashable identity of a vertex layout, used to cache pipelines.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VertexLayoutKey(Vec<VertexSlot>);

#[derive(Clone, Debug, Default)]
pub struct VertexArray {
    slots: Vec<VertexSlot>,
}

impl VertexArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares that shader `location` reads a `format` value at `offset` within each `stride`
    /// bytes of the buffer bound to `slot`.
    ///
    /// Slots are dense: a new slot must be the next unused index.
    pub fn enable_attribute(
        &mut self,
        slot: usize,
        location: u32,
        format: wgpu::VertexFormat,
        stride: u64,
        offset: u64,
    ) -> Result<(), GpuError> {
        if stride == 0 {
            return Err(GpuError::InvalidVertexLayout(format!(
                "slot {slot} has a zero stride"
            )));
        }
        if offset + format.size() > stride {
            return Err(GpuError::InvalidVertexLayout(format!(
                "location {location} ({format:?} at offset {offset}) overflows stride {stride}"
            )));
        }
        if self.location_in_use(location) {
            return Err(GpuError::InvalidVertexLayout(format!(
                "location {location} is already enabled"
            )));
        }

        let attribute = wgpu::VertexAttribute {
            format,
            offset,
            shader_location: location,
        };
        match slot.cmp(&self.slots.len()) {
            std::cmp::Ordering::Less => {
                let existing = &mut self.slots[slot];
                if existing.stride != stride {
                    return Err(GpuError::InvalidVertexLayout(format!(
                        "slot {slot} already uses stride {}, got {stride}",
                        existing.stride
                    )));
                }
                existing.attributes.push(attribute);
            }
            std::cmp::Ordering::Equal => self.slots.push(VertexSlot {
                stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: vec![attribute],
            }),
            std::cmp::Ordering::Greater => {
                return Err(GpuError::InvalidVertexLayout(format!(
                    "slot {slot} skips slot {}",
                    self.slots.len()
                )));
            }
        }
        Ok(())
    }

    fn location_in_use(&self, location: u32) -> bool {
        self.slots
            .iter()
            .flat_map(|slot| slot.attributes.iter())
            .any(|attribute| attribute.shader_location == location)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Shader locations in slot order.
    pub fn locations(&self) -> Vec<u32> {
        self.slots
            .iter()
            .flat_map(|slot| slot.attributes.iter().map(|a| a.shader_location))
            .collect()
    }

    pub fn stride(&self, slot: usize) -> Option<u64> {
        self.slots.get(slot).map(|s| s.stride)
    }

    pub fn layouts(&self) -> Vec<wgpu::VertexBufferLayout<'_>> {
        self.slots
            .iter()
            .map(|slot| wgpu::VertexBufferLayout {
                array_stride: slot.stride,
                step_mode: slot.step_mode,
                attributes: &slot.attributes,
            })
            .collect()
    }

    pub fn key(&self) -> VertexLayoutKey {
        VertexLayoutKey(self.slots.clone())
    }

    /// Binds `buffers[i]` to slot `i` for every declared slot.
    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>, buffers: &BufferSet) -> Result<(), GpuError> {
        for slot in 0..self.slots.len() {
            pass.set_vertex_buffer(slot as u32, buffers.get(slot)?.slice());
        }
        Ok(())
    }
}
