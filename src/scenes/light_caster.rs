//! One light over a textured floor, switchable between directional, point and spot.

use cgmath::Vector3;

use crate::{
    camera::Camera,
    context::InitContext,
    data_structures::{mesh::Mesh, model::Model},
    light::{Light, LightType},
    resources::{
        material_factory::{self, MaterialParams},
        primitives,
    },
    scene::{self, Frame, Scene, SceneFuture},
    scenes::edit_color,
};

const POSITION_RANGE: f32 = 10.0;

pub struct LightCasterScene {
    plane: Model,
    light: Light,
    camera: Camera,
}

pub fn construct(ctx: InitContext) -> SceneFuture {
    scene::boxed(async move {
        let params = MaterialParams {
            name: "plane".into(),
            ambient: [0.2; 3],
            diffuse: [0.5; 3],
            specular: [0.1; 3],
            shininess: 32.0,
            diffuse_texture: Some("textures/plane_diffuse.png".into()),
        };
        let material = material_factory::phong(&ctx, &params).await?;
        let plane = Model::single(Mesh::new(&ctx.device, &primitives::plane(10.0))?, material);
        let light = Light {
            kind: LightType::Point,
            ..Light::spot(
                Vector3::new(0.0, 0.2, -2.0),
                Vector3::new(0.0, -1.0, 0.0),
                Vector3::new(1.0, 1.0, 1.0),
            )
        }
        .with_cone(12.5, 14.5);
        Ok(LightCasterScene {
            plane,
            light,
            camera: Camera::new(
                [0.0, 3.0, 3.0],
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

impl Scene for LightCasterScene {
    fn name(&self) -> String {
        "LightCaster".into()
    }

    fn update_gui(&mut self, ui: &egui::Context) {
        egui::Window::new("Properties").show(ui, |ui| {
            egui::ComboBox::from_label("Light type")
                .selected_text(self.light.kind.label())
                .show_ui(ui, |ui| {
                    for kind in LightType::SELECTABLE {
                        ui.selectable_value(&mut self.light.kind, kind, kind.label());
                    }
                });
            let range = -POSITION_RANGE..=POSITION_RANGE;
            let position = &mut self.light.position;
            ui.add(egui::Slider::new(&mut position.x, range.clone()).text("X"));
            ui.add(egui::Slider::new(&mut position.y, range.clone()).text("Y"));
            ui.add(egui::Slider::new(&mut position.z, range).text("Z"));
            edit_color(ui, "Color", &mut self.light.color);
        });
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> anyhow::Result<()> {
        let ctx = frame.ctx;
        self.plane.update_camera(&self.camera)?;
        self.plane.update_light(&self.light)?;

        let mut pass = frame.begin_pass(ctx.clear_colour);
        self.plane
            .render(&ctx.device, &ctx.queue, &ctx.targets(), &mut pass)?;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }
}
