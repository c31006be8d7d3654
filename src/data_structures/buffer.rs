//! GPU buffers.
//!
//! [`Buffer`] owns one `wgpu::Buffer` together with the number of elements last written to it.
//! [`BufferSet`] is the multi-buffer variant used by meshes (one buffer per vertex attribute).

use bytemuck::Pod;
use wgpu::util::DeviceExt;

use crate::error::GpuError;

/// What a buffer is bound as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    Vertex,
    Index,
    Uniform,
}

impl BufferTarget {
    pub fn usage(self) -> wgpu::BufferUsages {
        let usage = match self {
            BufferTarget::Vertex => wgpu::BufferUsages::VERTEX,
            BufferTarget::Index => wgpu::BufferUsages::INDEX,
            BufferTarget::Uniform => wgpu::BufferUsages::UNIFORM,
        };
        usage | wgpu::BufferUsages::COPY_DST
    }
}

#[derive(Debug)]
pub struct Buffer {
    target: BufferTarget,
    label: String,
    buffer: wgpu::Buffer,
    len: usize,
}

impl Buffer {
    /// Creates a buffer initialised with `data`. Empty data is rejected.
    pub fn new<T: Pod>(
        device: &wgpu::Device,
        target: BufferTarget,
        label: &str,
        data: &[T],
    ) -> Result<Self, GpuError> {
        if data.is_empty() {
            return Err(GpuError::EmptyData {
                label: label.to_string(),
            });
        }
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(data),
            usage: target.usage(),
        });
        Ok(Self {
            target,
            label: label.to_string(),
            buffer,
            len: data.len(),
        })
    }

    /// Creates an uninitialised buffer of at least `size` bytes.
    pub fn empty(device: &wgpu::Device, target: BufferTarget, label: &str, size: u64) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: align_to_copy(size.max(wgpu::COPY_BUFFER_ALIGNMENT)),
            usage: target.usage(),
            mapped_at_creation: false,
        });
        Self {
            target,
            label: label.to_string(),
            buffer,
            len: 0,
        }
    }

    /// Replaces the contents. The buffer is reallocated when `data` does not fit.
    pub fn set_data<T: Pod>(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[T]) {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let padded = align_to_copy(bytes.len() as u64);
        if padded > self.buffer.size() {
            log::debug!(
                "Growing buffer `{}` from {} to {} bytes",
                self.label,
                self.buffer.size(),
                padded
            );
            self.buffer.destroy();
            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: padded.next_power_of_two(),
                usage: self.target.usage(),
                mapped_at_creation: false,
            });
        }
        if bytes.len() as u64 == padded {
            queue.write_buffer(&self.buffer, 0, bytes);
        } else {
            let mut staged = bytes.to_vec();
            staged.resize(padded as usize, 0);
            queue.write_buffer(&self.buffer, 0, &staged);
        }
        self.len = data.len();
    }

    pub fn target(&self) -> BufferTarget {
        self.target
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of elements written by the last `new`/`set_data`.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated size in bytes.
    pub fn size(&self) -> u64 {
        self.buffer.size()
    }

    pub fn raw(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }

    pub fn as_entire_binding(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        self.buffer.destroy();
    }
}

/// A fixed group of buffers addressed by index.
#[derive(Debug, Default)]
pub struct BufferSet {
    buffers: Vec<Buffer>,
}

impl BufferSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a buffer and returns its index.
    pub fn push(&mut self, buffer: Buffer) -> usize {
        self.buffers.push(buffer);
        self.buffers.len() - 1
    }

    pub fn get(&self, index: usize) -> Result<&Buffer, GpuError> {
        self.buffers.get(index).ok_or(GpuError::InvalidIndex {
            what: "buffer set",
            index,
            len: self.buffers.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Buffer> {
        self.buffers.iter()
    }
}

pub(crate) fn align_to_copy(size: u64) -> u64 {
    let align = wgpu::COPY_BUFFER_ALIGNMENT;
    size.div_ceil(align) * align
}
