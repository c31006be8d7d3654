//! A floor and a crate lit by one directional light and three point lights.

use cgmath::{InnerSpace, Vector3};

use crate::{
    camera::Camera,
    context::InitContext,
    data_structures::{
        material::{Material, names},
        mesh::Mesh,
        model::Model,
        transform::Transform,
    },
    light::Light,
    pipelines::basic::PipelineOptions,
    resources::{
        load_texture_or_checkerboard,
        material_factory::MaterialParams,
        primitives,
    },
    scene::{self, Frame, Scene, SceneFuture},
    scenes::{drag_vec3, edit_color},
};

const SHADER: &str = include_str!("../shaders/multi_light.wgsl");

/// Must match `POINT_LIGHT_COUNT` in the shader.
pub const POINT_LIGHT_COUNT: usize = 3;

pub struct MultipleLightScene {
    plane: Model,
    crate_box: Model,
    directional: Light,
    points: [Light; POINT_LIGHT_COUNT],
    camera: Camera,
}

fn material(ctx: &InitContext, params: &MaterialParams) -> anyhow::Result<Material> {
    let mut material = Material::from_source(
        &ctx.device,
        &ctx.queue,
        &params.name,
        SHADER,
        PipelineOptions::default(),
    )?;
    params.apply(material.uniforms_mut())?;
    Ok(material)
}

pub fn construct(ctx: InitContext) -> SceneFuture {
    scene::boxed(async move {
        let (plane_diffuse, crate_diffuse, crate_specular) = futures::join!(
            load_texture_or_checkerboard(&ctx, "textures/plane_diffuse.png", true),
            load_texture_or_checkerboard(&ctx, "textures/crate_diffuse.png", true),
            load_texture_or_checkerboard(&ctx, "textures/crate_specular.png", false),
        );

        let mut plane_material = material(
            &ctx,
            &MaterialParams {
                name: "plane".into(),
                ambient: [0.2; 3],
                diffuse: [0.5; 3],
                specular: [0.1; 3],
                ..Default::default()
            },
        )?;
        plane_material.set_texture(names::DIFFUSE_MAP, &plane_diffuse)?;
        let plane = Model::single(Mesh::new(&ctx.device, &primitives::plane(10.0))?, plane_material);

        let mut box_material = material(
            &ctx,
            &MaterialParams {
                name: "crate".into(),
                ambient: [0.2; 3],
                diffuse: [0.5; 3],
                specular: [1.0; 3],
                ..Default::default()
            },
        )?;
        box_material.set_texture(names::DIFFUSE_MAP, &crate_diffuse)?;
        box_material.set_texture(names::SPECULAR_MAP, &crate_specular)?;
        let mut crate_box = Model::single(Mesh::new(&ctx.device, &primitives::cube(0.5))?, box_material);
        crate_box.transform = Transform::at(Vector3::new(0.0, 0.25, 0.0));

        Ok(MultipleLightScene {
            plane,
            crate_box,
            directional: Light::directional(
                Vector3::new(-1.0, -1.0, -1.0).normalize(),
                Vector3::new(0.5, 0.5, 0.5),
            ),
            points: [
                Light::point(Vector3::new(0.0, 0.2, -2.0), Vector3::new(1.0, 0.0, 0.0)),
                Light::point(Vector3::new(2.0, 0.2, 2.0), Vector3::new(0.0, 1.0, 0.0)),
                Light::point(Vector3::new(-2.0, 0.2, 2.0), Vector3::new(0.0, 0.0, 1.0)),
            ],
            camera: Camera::new(
                [0.0, 3.0, 4.0],
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

impl MultipleLightScene {
    fn apply_lights(&mut self) -> anyhow::Result<()> {
        for model in [&mut self.plane, &mut self.crate_box] {
            model.update_camera(&self.camera)?;
            for material in model.materials_mut() {
                self.directional.apply_directional(material.uniforms_mut())?;
                for (index, light) in self.points.iter().enumerate() {
                    light.apply_point(index, material.uniforms_mut())?;
                }
            }
        }
        Ok(())
    }
}

impl Scene for MultipleLightScene {
    fn name(&self) -> String {
        "MultipleLight".into()
    }

    fn update_gui(&mut self, ui: &egui::Context) {
        egui::Window::new("MultipleLightScene").show(ui, |ui| {
            ui.collapsing("Directional light", |ui| {
                let mut direction = self.directional.direction;
                drag_vec3(ui, "Direction", &mut direction, 0.01);
                self.directional.set_direction(direction);
                edit_color(ui, "Color", &mut self.directional.color);
            });
            for (index, light) in self.points.iter_mut().enumerate() {
                ui.collapsing(format!("Point light {index}"), |ui| {
                    drag_vec3(ui, "Position", &mut light.position, 0.05);
                    edit_color(ui, "Color", &mut light.color);
                });
            }
        });
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> anyhow::Result<()> {
        let ctx = frame.ctx;
        let targets = ctx.targets();
        self.apply_lights()?;

        let mut pass = frame.begin_pass(ctx.clear_colour);
        self.plane.render(&ctx.device, &ctx.queue, &targets, &mut pass)?;
        self.crate_box
            .render(&ctx.device, &ctx.queue, &targets, &mut pass)?;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }
}
