//! The scene contract and the catalogue of selectable scenes.
//!
//! A scene owns every GPU resource it creates; dropping it releases them. Scenes are built by
//! an async constructor so they can read assets, and the host blocks on that future.

use std::{future::Future, pin::Pin};

use instant::Duration;

use crate::{
    context::{Context, InitContext},
    scenes,
};

pub mod selector;

/// One self-contained demo.
pub trait Scene {
    /// Shown in the window title after the application title.
    fn name(&self) -> String;

    fn update(&mut self, _dt: Duration) {}

    /// Builds this frame's widgets.
    fn update_gui(&mut self, _ui: &egui::Context) {}

    fn render(&mut self, frame: &mut Frame<'_>) -> anyhow::Result<()>;

    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// What a scene renders into for one frame.
pub struct Frame<'a> {
    pub ctx: &'a Context,
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub view: &'a wgpu::TextureView,
    pub dt: Duration,
}

impl Frame<'_> {
    /// Starts a pass that clears color to `clear` and depth to 1.
    pub fn begin_pass(&mut self, clear: wgpu::Color) -> wgpu::RenderPass<'_> {
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: self.ctx.depth_view(),
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        })
    }
}

pub type SceneFuture = Pin<Box<dyn Future<Output = anyhow::Result<Box<dyn Scene>>>>>;

pub type SceneConstructor = fn(InitContext) -> SceneFuture;

/// Boxes a scene constructor future into a [`SceneFuture`].
pub fn boxed<S, F>(future: F) -> SceneFuture
where
    S: Scene + 'static,
    F: Future<Output = anyhow::Result<S>> + 'static,
{
    Box::pin(async move { Ok(Box::new(future.await?) as Box<dyn Scene>) })
}

/// A catalogue entry.
#[derive(Clone, Copy)]
pub struct SceneDescription {
    pub name: &'static str,
    pub construct: SceneConstructor,
}

impl std::fmt::Debug for SceneDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneDescription")
            .field("name", &self.name)
            .finish()
    }
}

/// Every selectable scene, in tutorial order. The first one is the default.
pub fn catalogue() -> Vec<SceneDescription> {
    vec![
        SceneDescription {
            name: "Clear",
            construct: scenes::clear::construct,
        },
        SceneDescription {
            name: "FirstTriangle",
            construct: scenes::first_triangle::construct,
        },
        SceneDescription {
            name: "ColoredTriangle",
            construct: scenes::colored_triangle::construct,
        },
        SceneDescription {
            name: "IndexBufferObject",
            construct: scenes::index_buffer::construct,
        },
        SceneDescription {
            name: "TextureTest",
            construct: scenes::texture_test::construct,
        },
        SceneDescription {
            name: "Uniform",
            construct: scenes::uniform::construct,
        },
        SceneDescription {
            name: "TransformTest",
            construct: scenes::transform::construct,
        },
        SceneDescription {
            name: "Primitives",
            construct: scenes::primitives::construct,
        },
        SceneDescription {
            name: "BasicLight",
            construct: scenes::basic_light::construct,
        },
        SceneDescription {
            name: "ModelLoading",
            construct: scenes::model_loading::construct,
        },
        SceneDescription {
            name: "LightCaster",
            construct: scenes::light_caster::construct,
        },
        SceneDescription {
            name: "MultipleLight",
            construct: scenes::multiple_light::construct,
        },
    ]
}

/// Index of the scene called `name`, ignoring ASCII case.
pub fn find(scenes: &[SceneDescription], name: &str) -> Option<usize> {
    scenes
        .iter()
        .position(|scene| scene.name.eq_ignore_ascii_case(name))
}
