use std::{path::PathBuf, sync::Arc};

use render_tutorial::data_structures::{
    shader::ShaderSource,
    uniform::{UniformLayout, Uniforms},
};

/// A program touching every kind of binding the reflection understands.
pub const REFLECTION_SHADER: &str = r#"
struct Light {
    position_world: vec3<f32>,
    color: vec3<f32>,
}

struct Point {
    position: vec3<f32>,
    intensity: f32,
}

@group(0) @binding(0)
var<uniform> elapsed_time: f32;
@group(0) @binding(1)
var<uniform> light: Light;
@group(0) @binding(2)
var<uniform> points: array<Point, 2>;
@group(0) @binding(3)
var tex: texture_2d<f32>;
@group(0) @binding(4)
var tex_sampler: sampler;

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position * elapsed_time + light.color + points[1].position, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return textureSample(tex, tex_sampler, vec2<f32>(0.5, 0.5)) * points[0].intensity;
}
"#;

pub fn layout_of(source: &str) -> Arc<UniformLayout> {
    let parsed = ShaderSource::parse("test", source).expect("test shader should parse");
    Arc::new(parsed.reflect().expect("test shader should reflect"))
}

pub fn uniforms_of(source: &str) -> Uniforms {
    Uniforms::new(layout_of(source))
}

pub fn asset_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

/// Staged bytes read back as native-endian floats.
pub fn floats(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}
