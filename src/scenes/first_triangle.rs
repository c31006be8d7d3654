//! A white triangle drawn with nothing but raw `wgpu` objects.

use wgpu::util::DeviceExt;

use crate::{
    context::InitContext,
    pipelines::basic::{PipelineOptions, Stage, mk_render_pipeline},
    scene::{self, Frame, Scene, SceneFuture},
};

#[rustfmt::skip]
const VERTICES: [[f32; 3]; 3] = [
    [-0.5, -0.5, 0.0],
    [ 0.5, -0.5, 0.0],
    [ 0.0,  0.5, 0.0],
];

const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

pub struct FirstTriangleScene {
    vertex_buffer: wgpu::Buffer,
    pipeline: wgpu::RenderPipeline,
}

pub fn construct(ctx: InitContext) -> SceneFuture {
    scene::boxed(async move {
        let vertex_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("first triangle vertices"),
                contents: bytemuck::cast_slice(&VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let module = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("first triangle shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/first_triangle.wgsl").into()),
            });
        let layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("first triangle layout"),
                bind_group_layouts: &[],
                push_constant_ranges: &[],
            });
        let pipeline = mk_render_pipeline(
            &ctx.device,
            "first triangle",
            &layout,
            Stage {
                module: &module,
                entry_point: "vs_main",
            },
            Stage {
                module: &module,
                entry_point: "fs_main",
            },
            &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &ATTRIBUTES,
            }],
            &ctx.targets,
            &PipelineOptions::flat(),
        );
        Ok(FirstTriangleScene {
            vertex_buffer,
            pipeline,
        })
    })
}

impl Scene for FirstTriangleScene {
    fn name(&self) -> String {
        "FirstTriangle".into()
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> anyhow::Result<()> {
        let clear = frame.ctx.clear_colour;
        let mut pass = frame.begin_pass(clear);
        pass.set_pipeline(&self.pipeline);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..VERTICES.len() as u32, 0..1);
        Ok(())
    }
}
