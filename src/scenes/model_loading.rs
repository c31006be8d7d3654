use cgmath::Vector3;

use crate::{
    camera::{Camera, SphericalCoordinates},
    context::InitContext,
    data_structures::model::Model,
    light::Light,
    resources::loader::ModelLoader,
    scene::{self, Frame, Scene, SceneFuture},
};

const MODEL: &str = "models/figure.obj";

/// An imported OBJ model under an orbiting camera.
pub struct ModelLoadingScene {
    model: Model,
    light: Light,
    orbit: SphericalCoordinates,
    camera: Camera,
}

pub fn construct(ctx: InitContext) -> SceneFuture {
    scene::boxed(async move {
        let model = ModelLoader::load(&ctx, MODEL).await?;
        let target = Vector3::new(0.0, 1.6, 0.0);
        let orbit = SphericalCoordinates::new(target, 5.0, 60.0, 90.0);
        Ok(ModelLoadingScene {
            model,
            light: Light::point(Vector3::new(0.0, 5.0, 5.0), Vector3::new(1.0, 1.0, 1.0)),
            camera: Camera::new(
                orbit.position(),
                [target.x, target.y, target.z],
                60.0,
                0.1,
                1000.0,
                ctx.width,
                ctx.height,
            ),
            orbit,
        })
    })
}

impl Scene for ModelLoadingScene {
    fn name(&self) -> String {
        "ModelLoading".into()
    }

    fn update_gui(&mut self, ui: &egui::Context) {
        egui::Window::new("Camera").show(ui, |ui| {
            ui.add(egui::Slider::new(&mut self.orbit.radius, 0.1..=150.0).text("Distance"));
            ui.add(egui::Slider::new(&mut self.orbit.theta, 1.0..=179.0).text("Theta"));
            ui.add(egui::Slider::new(&mut self.orbit.phi, 0.0..=360.0).text("Phi"));
        });
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> anyhow::Result<()> {
        let ctx = frame.ctx;
        self.camera.position = self.orbit.position();
        self.model.update_camera(&self.camera)?;
        self.model.update_light(&self.light)?;

        let mut pass = frame.begin_pass(ctx.clear_colour);
        self.model
            .render(&ctx.device, &ctx.queue, &ctx.targets(), &mut pass)?;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }
}
