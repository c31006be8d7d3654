//! Drives the current scene, the GUI and the scene selector frame by frame.

use std::iter;

use instant::Duration;
use tokio::runtime::Runtime;
use winit::event::WindowEvent;

use crate::{
    context::{Context, InitContext},
    gui::GuiController,
    scene::{self, Frame, Scene, SceneDescription, selector::SceneSelector},
    settings::Settings,
};

/// Owns the active scene and swaps it.
///
/// A replacement is constructed before the previous scene is dropped, so the two never share
/// GPU resources and a failed construction leaves the running scene untouched.
pub struct SceneHost {
    title: String,
    current: Option<Box<dyn Scene>>,
    active: Option<usize>,
}

impl SceneHost {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            current: None,
            active: None,
        }
    }

    /// Constructs a scene with `construct`, then drops the current one and installs the new
    /// one as `index`.
    pub fn replace_with<F>(&mut self, index: usize, construct: F) -> anyhow::Result<()>
    where
        F: FnOnce() -> anyhow::Result<Box<dyn Scene>>,
    {
        let scene = construct()?;
        if let Some(previous) = self.current.take() {
            log::debug!("Dropping scene `{}`", previous.name());
            drop(previous);
        }
        log::info!("Scene `{}` is active", scene.name());
        self.current = Some(scene);
        self.active = Some(index);
        Ok(())
    }

    pub fn current(&self) -> Option<&dyn Scene> {
        self.current.as_deref()
    }

    pub fn current_mut(&mut self) -> Option<&mut (dyn Scene + 'static)> {
        self.current.as_deref_mut()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// `"{title} - {scene name}"`, or just the title without a scene.
    pub fn window_title(&self) -> String {
        match &self.current {
            Some(scene) => format!("{} - {}", self.title, scene.name()),
            None => self.title.clone(),
        }
    }
}

pub struct GameManager {
    scenes: Vec<SceneDescription>,
    host: SceneHost,
    gui: GuiController,
    selector: SceneSelector,
    gui_output: Option<egui::FullOutput>,
    applied_title: String,
}

impl GameManager {
    pub fn new(ctx: &Context, settings: &Settings, runtime: &Runtime) -> Self {
        let scenes = scene::catalogue();
        let initial = match &settings.initial_scene {
            Some(name) => scene::find(&scenes, name).unwrap_or_else(|| {
                log::warn!("Unknown scene `{name}`, starting with `{}`", scenes[0].name);
                0
            }),
            None => 0,
        };
        let mut manager = Self {
            scenes,
            host: SceneHost::new(settings.title.clone()),
            gui: GuiController::new(ctx),
            selector: SceneSelector::new(),
            gui_output: None,
            applied_title: String::new(),
        };
        if manager.replace_scene(ctx, runtime, initial).is_err() && initial != 0 {
            let _ = manager.replace_scene(ctx, runtime, 0);
        }
        manager
    }

    /// Constructs scene `index` and installs it. On failure the previous scene keeps running
    /// and the error is shown in the selector.
    pub fn replace_scene(
        &mut self,
        ctx: &Context,
        runtime: &Runtime,
        index: usize,
    ) -> anyhow::Result<()> {
        let Some(description) = self.scenes.get(index).copied() else {
            anyhow::bail!("no scene with index {index}");
        };
        log::info!("Loading scene `{}`", description.name);
        let result = self.host.replace_with(index, || {
            runtime.block_on((description.construct)(InitContext::from(ctx)))
        });
        match &result {
            Ok(()) => self.selector.set_error(None),
            Err(err) => {
                log::error!("Cannot load scene `{}`: {err:#}", description.name);
                self.selector
                    .set_error(Some(format!("{}: {err:#}", description.name)));
            }
        }
        result
    }

    /// Returns true when the GUI consumed the event.
    pub fn window_event(&mut self, ctx: &Context, event: &WindowEvent) -> bool {
        self.gui.on_window_event(ctx.window(), event)
    }

    /// Runs the scene step and builds this frame's GUI. A scene picked in the selector is
    /// swapped in before rendering.
    pub fn update(&mut self, ctx: &Context, runtime: &Runtime, dt: Duration) {
        self.gui.begin_frame(ctx.window());
        let ui = self.gui.context().clone();
        if let Some(scene) = self.host.current_mut() {
            scene.update(dt);
            scene.update_gui(&ui);
        }
        let selected = self.selector.show(&ui, &self.scenes, self.host.active());
        let mut output = self.gui.end_frame(ctx.window());
        // Texture uploads of a frame that never reached the surface still have to happen.
        if let Some(unpainted) = self.gui_output.take() {
            let mut textures_delta = unpainted.textures_delta;
            textures_delta.append(output.textures_delta);
            output.textures_delta = textures_delta;
        }
        self.gui_output = Some(output);

        if let Some(index) = selected {
            let _ = self.replace_scene(ctx, runtime, index);
        }

        let title = self.host.window_title();
        if title != self.applied_title {
            ctx.window().set_title(&title);
            self.applied_title = title;
        }
    }

    /// Renders the scene and the GUI to the next surface texture and presents it.
    pub fn render(&mut self, ctx: &Context, dt: Duration) -> Result<(), wgpu::SurfaceError> {
        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut frame = Frame {
                ctx,
                encoder: &mut encoder,
                view: &view,
                dt,
            };
            match self.host.current_mut() {
                Some(scene) => {
                    if let Err(err) = scene.render(&mut frame) {
                        log::error!("Scene `{}` failed to render: {err:#}", scene.name());
                    }
                }
                None => drop(frame.begin_pass(ctx.clear_colour)),
            }
        }

        let callbacks = match self.gui_output.take() {
            Some(gui_output) => self.gui.paint(ctx, &mut encoder, &view, gui_output),
            None => Vec::new(),
        };

        ctx.queue
            .submit(callbacks.into_iter().chain(iter::once(encoder.finish())));
        self.gui.after_submit();
        ctx.window().pre_present_notify();
        output.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(scene) = self.host.current_mut() {
            scene.resize(width, height);
        }
    }
}
