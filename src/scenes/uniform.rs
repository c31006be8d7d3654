//! A fragment color driven by two uniforms: the elapsed time and a GUI-picked color.

use instant::Duration;

use crate::{
    context::InitContext,
    data_structures::{
        buffer::{Buffer, BufferSet, BufferTarget},
        material::{Material, names},
        vertex_array::VertexArray,
    },
    pipelines::basic::PipelineOptions,
    scene::{self, Frame, Scene, SceneFuture},
};

#[rustfmt::skip]
const POSITIONS: [[f32; 3]; 3] = [
    [-0.5, -0.5, 0.0],
    [ 0.5, -0.5, 0.0],
    [ 0.0,  0.5, 0.0],
];

pub struct UniformScene {
    buffers: BufferSet,
    vertex_array: VertexArray,
    material: Material,
    elapsed: f32,
    color: [f32; 4],
}

pub fn construct(ctx: InitContext) -> SceneFuture {
    scene::boxed(async move {
        let mut buffers = BufferSet::new();
        let slot = buffers.push(Buffer::new(
            &ctx.device,
            BufferTarget::Vertex,
            "uniform triangle",
            &POSITIONS,
        )?);
        let mut vertex_array = VertexArray::new();
        vertex_array.enable_attribute(slot, 0, wgpu::VertexFormat::Float32x3, 12, 0)?;
        let material = Material::from_source(
            &ctx.device,
            &ctx.queue,
            "uniform",
            include_str!("../shaders/uniform.wgsl"),
            PipelineOptions::flat(),
        )?;
        Ok(UniformScene {
            buffers,
            vertex_array,
            material,
            elapsed: 0.0,
            color: [0.0, 1.0, 0.0, 1.0],
        })
    })
}

impl Scene for UniformScene {
    fn name(&self) -> String {
        "Uniform".into()
    }

    fn update(&mut self, dt: Duration) {
        self.elapsed += dt.as_secs_f32();
    }

    fn update_gui(&mut self, ui: &egui::Context) {
        egui::Window::new("Uniform").show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label("Color");
                ui.color_edit_button_rgba_unmultiplied(&mut self.color);
            });
        });
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> anyhow::Result<()> {
        let ctx = frame.ctx;
        self.material.set_float(names::ELAPSED_TIME, self.elapsed)?;
        self.material.set_vec4(names::COLOR, self.color)?;

        let mut pass = frame.begin_pass(ctx.clear_colour);
        self.material.bind(
            &ctx.device,
            &ctx.queue,
            &ctx.targets(),
            &mut pass,
            &self.vertex_array,
        )?;
        self.vertex_array.bind(&mut pass, &self.buffers)?;
        pass.draw(0..POSITIONS.len() as u32, 0..1);
        Ok(())
    }
}
