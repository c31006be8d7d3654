use crate::scene::SceneDescription;

/// The "Scene Selector" window: one button per scene.
#[derive(Debug, Default)]
pub struct SceneSelector {
    last_error: Option<String>,
}

impl SceneSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.last_error = error;
    }

    /// Draws the window and returns the index of a newly clicked scene.
    pub fn show(
        &mut self,
        ui: &egui::Context,
        scenes: &[SceneDescription],
        active: Option<usize>,
    ) -> Option<usize> {
        let mut selected = None;
        egui::Window::new("Scene Selector")
            .default_pos([10.0, 10.0])
            .resizable(false)
            .show(ui, |ui| {
                for (index, scene) in scenes.iter().enumerate() {
                    let is_active = active == Some(index);
                    if ui.selectable_label(is_active, scene.name).clicked() && !is_active {
                        selected = Some(index);
                    }
                }
                if let Some(error) = &self.last_error {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, error);
                }
            });
        selected
    }
}
