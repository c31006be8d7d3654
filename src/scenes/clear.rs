use crate::{
    context::InitContext,
    scene::{self, Frame, Scene, SceneFuture},
    scenes::clear_color,
};

/// Only clears the screen. The color is editable.
pub struct ClearScene {
    color: [f32; 3],
}

pub fn construct(_ctx: InitContext) -> SceneFuture {
    scene::boxed(async { Ok(ClearScene { color: [0.2, 0.3, 0.3] }) })
}

impl Scene for ClearScene {
    fn name(&self) -> String {
        "Clear".into()
    }

    fn update_gui(&mut self, ui: &egui::Context) {
        egui::Window::new("Clear").show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label("Color");
                ui.color_edit_button_rgb(&mut self.color);
            });
        });
    }

    fn render(&mut self, frame: &mut Frame<'_>) -> anyhow::Result<()> {
        drop(frame.begin_pass(clear_color(self.color)));
        Ok(())
    }
}
