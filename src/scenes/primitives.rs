use cgmath::Vector3;

use crate::{
    camera::Camera,
    context::InitContext,
    data_structures::{material::Material, mesh::Mesh, model::Model, transform::Transform},
    pipelines::basic::PipelineOptions,
    resources::primitives,
    scene::{self, Frame, Scene, SceneFuture},
    scenes::drag_vec3,
};

/// Two cubes colored by their normals.
pub struct PrimitivesScene {
    cubes: Vec<Model>,
    rotation: Vector3<f32>,
    camera: Camera,
}

pub fn construct(ctx: InitContext) -> SceneFuture {
    scene::boxed(async move {
        let mut cubes = Vec::new();
        for x in [-1.0, 1.0] {
            // Uniforms are uploaded at submit, so each cube needs its own material.
            let material = Material::from_source(
                &ctx.device,
                &ctx.queue,
                "normal color",
                include_str!("../shaders/normal_color.wgsl"),
                PipelineOptions::default(),
            )?;
            let mut cube = Model::single(Mesh::new(&ctx.device, &primitives::cube(1.0))?, material);
            cube.transform = Transform::at(Vector3::new(x, 0.0, 0.0)).with_scale(0.8);
            cubes.push(cube);
        }
        Ok(PrimitivesScene {
            cubes,
            rotation: Vector3::new(30.0, 45.0, 0.0),
            camera: Camera::new(
                [0.0, 5.0, 5.0],
                [0.0, 0.0, 0.0],
                45.0,
                0.1,
                100.0,
                ctx.width,
                ctx.height,
            ),
        })
    })
}

impl Scene for PrimitivesScene {
    fn name(&self) -> String {
        "Primitives".into()
    }

    fn update_gui(&mut self, ui: &egui::Context) {
        egui::Window::new("Primitives").show(ui, |ui| {
            drag_vec3(ui, "Rotation", &mut self.rotation, 1.0);
        });
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> anyhow::Result<()> {
        let ctx = frame.ctx;
        let targets = ctx.targets();
        let mut pass = frame.begin_pass(ctx.clear_colour);
        for cube in &mut self.cubes {
            cube.transform.rotation = self.rotation;
            cube.update_camera(&self.camera)?;
            cube.render(&ctx.device, &ctx.queue, &targets, &mut pass)?;
        }
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }
}
