use crate::{
    camera::Camera,
    context::InitContext,
    data_structures::{
        material::{Material, names},
        mesh::Mesh,
        model::Model,
    },
    pipelines::basic::PipelineOptions,
    resources::{load_texture_or_checkerboard, primitives},
    scene::{self, Frame, Scene, SceneFuture},
    scenes::drag_vec3,
};

/// A textured cube whose transform and camera projection are edited live.
pub struct TransformScene {
    cube: Model,
    camera: Camera,
}

pub fn construct(ctx: InitContext) -> SceneFuture {
    scene::boxed(async move {
        let mesh = Mesh::new(&ctx.device, &primitives::cube(1.0))?;
        let mut material = Material::from_source(
            &ctx.device,
            &ctx.queue,
            "transform",
            include_str!("../shaders/transform.wgsl"),
            PipelineOptions::default(),
        )?;
        let texture = load_texture_or_checkerboard(&ctx, "textures/checker_01.png", true).await;
        material.set_texture(names::DIFFUSE_MAP, &texture)?;
        Ok(TransformScene {
            cube: Model::single(mesh, material),
            camera: Camera::new(
                [0.0, 2.0, 5.0],
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

impl Scene for TransformScene {
    fn name(&self) -> String {
        "TransformTest".into()
    }

    fn update_gui(&mut self, ui: &egui::Context) {
        egui::Window::new("Transform").show(ui, |ui| {
            let transform = &mut self.cube.transform;
            drag_vec3(ui, "Position", &mut transform.position, 0.05);
            drag_vec3(ui, "Rotation", &mut transform.rotation, 1.0);
            drag_vec3(ui, "Scale", &mut transform.scale, 0.05);
            ui.separator();
            ui.add(egui::Slider::new(&mut self.camera.near, 0.01..=1.0).text("Near"));
            ui.add(egui::Slider::new(&mut self.camera.far, 10.0..=100.0).text("Far"));
            ui.add(egui::Slider::new(&mut self.camera.fov_y.0, 20.0..=80.0).text("FOV"));
        });
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> anyhow::Result<()> {
        let ctx = frame.ctx;
        self.cube.update_camera(&self.camera)?;
        let mut pass = frame.begin_pass(ctx.clear_colour);
        self.cube
            .render(&ctx.device, &ctx.queue, &ctx.targets(), &mut pass)?;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }
}
