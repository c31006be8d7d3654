//! A quad from four vertices and six indices.

use crate::{
    context::InitContext,
    data_structures::{
        buffer::{Buffer, BufferSet, BufferTarget},
        material::Material,
        vertex_array::VertexArray,
    },
    pipelines::basic::PipelineOptions,
    scene::{self, Frame, Scene, SceneFuture},
};

#[rustfmt::skip]
const POSITIONS: [[f32; 3]; 4] = [
    [ 0.5,  0.5, 0.0],
    [ 0.5, -0.5, 0.0],
    [-0.5, -0.5, 0.0],
    [-0.5,  0.5, 0.0],
];

const COLORS: [[f32; 3]; 4] = [
    [0.1, 0.1, 0.1],
    [0.9, 0.1, 0.1],
    [0.1, 0.9, 0.1],
    [0.1, 0.1, 0.9],
];

const INDICES: [u32; 6] = [0, 3, 1, 1, 3, 2];

pub struct IndexBufferScene {
    buffers: BufferSet,
    index_buffer: Buffer,
    vertex_array: VertexArray,
    material: Material,
}

pub fn construct(ctx: InitContext) -> SceneFuture {
    scene::boxed(async move {
        let mut buffers = BufferSet::new();
        let mut vertex_array = VertexArray::new();
        let positions = buffers.push(Buffer::new(
            &ctx.device,
            BufferTarget::Vertex,
            "quad positions",
            &POSITIONS,
        )?);
        vertex_array.enable_attribute(positions, 0, wgpu::VertexFormat::Float32x3, 12, 0)?;
        let colors = buffers.push(Buffer::new(
            &ctx.device,
            BufferTarget::Vertex,
            "quad colors",
            &COLORS,
        )?);
        vertex_array.enable_attribute(colors, 1, wgpu::VertexFormat::Float32x3, 12, 0)?;
        let index_buffer = Buffer::new(&ctx.device, BufferTarget::Index, "quad indices", &INDICES)?;
        let material = Material::from_source(
            &ctx.device,
            &ctx.queue,
            "colored",
            include_str!("../shaders/colored.wgsl"),
            PipelineOptions::flat(),
        )?;
        Ok(IndexBufferScene {
            buffers,
            index_buffer,
            vertex_array,
            material,
        })
    })
}

impl Scene for IndexBufferScene {
    fn name(&self) -> String {
        "IndexBufferObject".into()
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> anyhow::Result<()> {
        let ctx = frame.ctx;
        let mut pass = frame.begin_pass(ctx.clear_colour);
        self.material.bind(
            &ctx.device,
            &ctx.queue,
            &ctx.targets(),
            &mut pass,
            &self.vertex_array,
        )?;
        self.vertex_array.bind(&mut pass, &self.buffers)?;
        pass.set_index_buffer(self.index_buffer.slice(), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_buffer.len() as u32, 0, 0..1);
        Ok(())
    }
}
