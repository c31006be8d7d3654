//! Phong lighting of a single cube by one point light, drawn as a small unlit cube.

use cgmath::Vector3;

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
    resources::primitives,
    scene::{self, Frame, Scene, SceneFuture},
    scenes::{drag_vec3, edit_color},
};

const LIGHT_MARKER_SCALE: f32 = 0.1;

pub struct BasicLightScene {
    cube: Model,
    light_marker: Model,
    light: Light,
    object_color: Vector3<f32>,
    ambient_strength: f32,
    specular_strength: f32,
    shininess: f32,
    camera: Camera,
}

pub fn construct(ctx: InitContext) -> SceneFuture {
    scene::boxed(async move {
        let phong = Material::from_source(
            &ctx.device,
            &ctx.queue,
            "phong",
            include_str!("../shaders/phong.wgsl"),
            PipelineOptions::default(),
        )?;
        let unlit = Material::from_source(
            &ctx.device,
            &ctx.queue,
            "light marker",
            include_str!("../shaders/unlit.wgsl"),
            PipelineOptions::default(),
        )?;
        let light = Light::point(Vector3::new(1.5, 1.5, 1.5), Vector3::new(1.0, 1.0, 1.0));
        let mut light_marker = Model::single(Mesh::new(&ctx.device, &primitives::cube(1.0))?, unlit);
        light_marker.transform = Transform::at(light.position).with_scale(LIGHT_MARKER_SCALE);
        Ok(BasicLightScene {
            cube: Model::single(Mesh::new(&ctx.device, &primitives::cube(1.0))?, phong),
            light_marker,
            light,
            object_color: Vector3::new(1.0, 0.5, 0.31),
            ambient_strength: 0.1,
            specular_strength: 0.5,
            shininess: 32.0,
            camera: Camera::new(
                [0.0, 1.5, 5.0],
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

impl Scene for BasicLightScene {
    fn name(&self) -> String {
        "BasicLight".into()
    }

    fn update_gui(&mut self, ui: &egui::Context) {
        egui::Window::new("Properties").show(ui, |ui| {
            drag_vec3(ui, "Light position", &mut self.light.position, 0.05);
            edit_color(ui, "Light color", &mut self.light.color);
            edit_color(ui, "Object color", &mut self.object_color);
            ui.add(egui::Slider::new(&mut self.ambient_strength, 0.0..=1.0).text("Ambient strength"));
            ui.add(egui::Slider::new(&mut self.specular_strength, 0.0..=1.0).text("Specular strength"));
            ui.add(egui::Slider::new(&mut self.shininess, 1.0..=256.0).text("Shininess"));
        });
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> anyhow::Result<()> {
        let ctx = frame.ctx;
        let targets = ctx.targets();

        if let Some(material) = self.cube.materials_mut().first_mut() {
            material.set_vec3(names::OBJECT_COLOR, self.object_color)?;
            material.set_vec3(names::AMBIENT_COLOR, self.light.color)?;
            material.set_float(names::AMBIENT_STRENGTH, self.ambient_strength)?;
            material.set_float(names::SPECULAR_STRENGTH, self.specular_strength)?;
            material.set_float(names::SPECULAR_SHININESS, self.shininess)?;
        }
        self.cube.update_camera(&self.camera)?;
        self.cube.update_light(&self.light)?;

        self.light_marker.transform.position = self.light.position;
        if let Some(material) = self.light_marker.materials_mut().first_mut() {
            let [r, g, b]: [f32; 3] = self.light.color.into();
            material.set_vec4(names::COLOR, [r, g, b, 1.0])?;
        }
        self.light_marker.update_camera(&self.camera)?;

        let mut pass = frame.begin_pass(ctx.clear_colour);
        self.cube.render(&ctx.device, &ctx.queue, &targets, &mut pass)?;
        self.light_marker
            .render(&ctx.device, &ctx.queue, &targets, &mut pass)?;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }
}
