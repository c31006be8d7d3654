//! Immediate-mode GUI overlay: egui fed by winit events, drawn by `egui_wgpu`.

use winit::{event::WindowEvent, window::Window};

use crate::context::Context;

/// Draws tessellated egui output on top of a finished scene.
///
/// Textures egui releases in a frame may still be sampled by that frame's commands, so they are
/// only freed by [`GuiPainter::free_released`] once the encoder has been submitted.
pub struct GuiPainter {
    renderer: egui_wgpu::Renderer,
    released: Vec<egui::TextureId>,
}

impl GuiPainter {
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat) -> Self {
        Self {
            renderer: egui_wgpu::Renderer::new(device, color_format, None, 1, false),
            released: Vec::new(),
        }
    }

    /// Uploads texture changes and records the draw into `encoder`. Returns command buffers from
    /// paint callbacks, which go into the same submission ahead of `encoder`.
    #[allow(clippy::too_many_arguments)]
    pub fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        screen: &egui_wgpu::ScreenDescriptor,
        primitives: &[egui::epaint::ClippedPrimitive],
        textures_delta: egui::TexturesDelta,
    ) -> Vec<wgpu::CommandBuffer> {
        for (id, delta) in &textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }
        let callbacks = self
            .renderer
            .update_buffers(device, queue, encoder, primitives, screen);

        let mut pass = encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("GUI Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            })
            .forget_lifetime();
        self.renderer.render(&mut pass, primitives, screen);
        drop(pass);

        self.released.extend(textures_delta.free);
        callbacks
    }

    /// Textures released by painted frames that are not freed yet.
    pub fn pending_frees(&self) -> &[egui::TextureId] {
        &self.released
    }

    /// Frees the textures released so far. Call after the painted frame was submitted.
    pub fn free_released(&mut self) {
        for id in self.released.drain(..) {
            self.renderer.free_texture(&id);
        }
    }
}

pub struct GuiController {
    state: egui_winit::State,
    painter: GuiPainter,
}

impl GuiController {
    pub fn new(ctx: &Context) -> Self {
        let egui_ctx = egui::Context::default();
        let window = ctx.window();
        let state = egui_winit::State::new(
            egui_ctx,
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        Self {
            state,
            painter: GuiPainter::new(&ctx.device, ctx.config.format),
        }
    }

    pub fn context(&self) -> &egui::Context {
        self.state.egui_ctx()
    }

    /// Feeds `event` to egui. Returns true when egui consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    pub fn begin_frame(&mut self, window: &Window) {
        let input = self.state.take_egui_input(window);
        self.state.egui_ctx().begin_pass(input);
    }

    pub fn end_frame(&mut self, window: &Window) -> egui::FullOutput {
        let mut output = self.state.egui_ctx().end_pass();
        let platform_output = std::mem::take(&mut output.platform_output);
        self.state.handle_platform_output(window, platform_output);
        output
    }

    /// Draws the frame's shapes on top of `view` at the current surface size.
    pub fn paint(
        &mut self,
        ctx: &Context,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        output: egui::FullOutput,
    ) -> Vec<wgpu::CommandBuffer> {
        let primitives = self
            .state
            .egui_ctx()
            .tessellate(output.shapes, output.pixels_per_point);
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [ctx.config.width, ctx.config.height],
            pixels_per_point: output.pixels_per_point,
        };
        self.painter.paint(
            &ctx.device,
            &ctx.queue,
            encoder,
            view,
            &screen,
            &primitives,
            output.textures_delta,
        )
    }

    /// Frees what the last painted frame released. The frame must have been submitted.
    pub fn after_submit(&mut self) {
        self.painter.free_released();
    }
}
