//! The tutorial scenes, one module each, in the order they appear in the selector.

pub mod basic_light;
pub mod clear;
pub mod colored_triangle;
pub mod first_triangle;
pub mod index_buffer;
pub mod light_caster;
pub mod model_loading;
pub mod multiple_light;
pub mod primitives;
pub mod transform;
pub mod uniform;

/// Converts a linear GUI color into a clear color.
pub(crate) fn clear_color(rgb: [f32; 3]) -> wgpu::Color {
    wgpu::Color {
        r: rgb[0] as f64,
        g: rgb[1] as f64,
        b: rgb[2] as f64,
        a: 1.0,
    }
}

/// One labelled row of three drag values.
pub(crate) fn drag_vec3(ui: &mut egui::Ui, label: &str, value: &mut cgmath::Vector3<f32>, speed: f64) {
    ui.horizontal(|ui| {
        ui.label(label);
        ui.add(egui::DragValue::new(&mut value.x).speed(speed));
        ui.add(egui::DragValue::new(&mut value.y).speed(speed));
        ui.add(egui::DragValue::new(&mut value.z).speed(speed));
    });
}

/// A color picker for a vector holding linear RGB.
pub(crate) fn edit_color(ui: &mut egui::Ui, label: &str, value: &mut cgmath::Vector3<f32>) {
    let mut rgb: [f32; 3] = (*value).into();
    ui.horizontal(|ui| {
        ui.label(label);
        if ui.color_edit_button_rgb(&mut rgb).changed() {
            *value = rgb.into();
        }
    });
}
