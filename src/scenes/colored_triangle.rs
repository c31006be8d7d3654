//! One interleaved vertex buffer read through a [`VertexArray`].

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

/// Position then color, six floats per vertex.
#[rustfmt::skip]
const VERTICES: [f32; 18] = [
    -0.5, -0.5, 0.0,   1.0, 0.0, 0.0,
     0.5, -0.5, 0.0,   0.0, 1.0, 0.0,
     0.0,  0.5, 0.0,   0.0, 0.0, 1.0,
];

const STRIDE: u64 = 6 * std::mem::size_of::<f32>() as u64;

pub struct ColoredTriangleScene {
    buffers: BufferSet,
    vertex_array: VertexArray,
    material: Material,
}

pub fn construct(ctx: InitContext) -> SceneFuture {
    scene::boxed(async move {
        let mut buffers = BufferSet::new();
        let slot = buffers.push(Buffer::new(
            &ctx.device,
            BufferTarget::Vertex,
            "colored triangle",
            &VERTICES,
        )?);
        let mut vertex_array = VertexArray::new();
        vertex_array.enable_attribute(slot, 0, wgpu::VertexFormat::Float32x3, STRIDE, 0)?;
        vertex_array.enable_attribute(slot, 1, wgpu::VertexFormat::Float32x3, STRIDE, 12)?;
        let material = Material::from_source(
            &ctx.device,
            &ctx.queue,
            "colored",
            include_str!("../shaders/colored.wgsl"),
            PipelineOptions::flat(),
        )?;
        Ok(ColoredTriangleScene {
            buffers,
            vertex_array,
            material,
        })
    })
}

impl Scene for ColoredTriangleScene {
    fn name(&self) -> String {
        "ColoredTriangle".into()
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
        pass.draw(0..3, 0..1);
        Ok(())
    }
}
