mod common;

use common::test_utils::{REFLECTION_SHADER, floats, layout_of, uniforms_of};
use render_tutorial::{
    GpuError,
    data_structures::{
        shader::ShaderSource,
        uniform::{ResourceKind, UniformKind, ignore_missing},
    },
};

#[test]
fn should_flatten_struct_and_array_members() {
    let layout = layout_of(REFLECTION_SHADER);

    assert_eq!(layout.blocks().len(), 3);
    assert!(layout.contains("elapsed_time"));
    assert!(layout.contains("light.position_world"));
    assert!(layout.contains("light.color"));
    assert!(layout.contains("points[0].position"));
    assert!(layout.contains("points[1].intensity"));
    assert!(!layout.contains("light"));
    assert!(!layout.contains("points"));

    let color = layout.entry("light.color").unwrap();
    assert_eq!(color.kind, UniformKind::Vec3);
    assert_eq!(color.offset, 16);
    let intensity = layout.entry("points[1].intensity").unwrap();
    assert_eq!(intensity.kind, UniformKind::Float);
    assert_eq!(intensity.offset, 28);
}

#[test]
fn should_round_block_sizes_to_16_bytes() {
    let layout = layout_of(REFLECTION_SHADER);
    let sizes: Vec<(&str, u32, u32)> = layout
        .blocks()
        .iter()
        .map(|b| (b.name.as_str(), b.binding, b.size))
        .collect();
    assert_eq!(
        sizes,
        vec![("elapsed_time", 0, 16), ("light", 1, 32), ("points", 2, 32)]
    );
}

#[test]
fn should_record_textures_and_samplers() {
    let layout = layout_of(REFLECTION_SHADER);
    assert_eq!(layout.resources().len(), 2);
    assert_eq!(layout.resource("tex", ResourceKind::Texture).unwrap().binding, 3);
    assert_eq!(
        layout.resource("tex_sampler", ResourceKind::Sampler).unwrap().binding,
        4
    );
    assert!(layout.resource("tex", ResourceKind::Sampler).is_none());
    assert_eq!(layout.bind_group_layout_entries().len(), 5);
}

#[test]
fn should_stage_values_at_reflected_offsets() {
    let mut uniforms = uniforms_of(REFLECTION_SHADER);
    uniforms.set_vec3("light.color", [1.0, 2.0, 3.0]).unwrap();
    uniforms.set_float("points[1].intensity", 0.5).unwrap();

    assert_eq!(uniforms.vec3("light.color").unwrap(), [1.0, 2.0, 3.0]);
    assert_eq!(uniforms.float("points[1].intensity").unwrap(), 0.5);

    let light = uniforms.block_bytes(1).unwrap();
    assert_eq!(floats(&light[16..28]), vec![1.0, 2.0, 3.0]);
    let points = uniforms.block_bytes(2).unwrap();
    assert_eq!(&points[28..32], &0.5f32.to_ne_bytes());
}

#[test]
fn should_reject_unknown_names() {
    let mut uniforms = uniforms_of(REFLECTION_SHADER);
    let err = uniforms.set_float("nope", 1.0).unwrap_err();
    assert!(matches!(err, GpuError::UniformNotFound(ref name) if name == "nope"));
    assert_eq!(err.to_string(), "Uniform(name = nope) is not found in the program");
}

#[test]
fn should_reject_type_mismatches() {
    let mut uniforms = uniforms_of(REFLECTION_SHADER);
    let err = uniforms.set_float("light.color", 1.0).unwrap_err();
    assert!(matches!(
        err,
        GpuError::UniformTypeMismatch {
            declared: "vec3<f32>",
            given: "f32",
            ..
        }
    ));
}

#[test]
fn ignore_missing_only_swallows_unknown_names() {
    let mut uniforms = uniforms_of(REFLECTION_SHADER);
    assert!(ignore_missing(uniforms.set_float("nope", 1.0)).is_ok());
    assert!(ignore_missing(uniforms.set_float("light.color", 1.0)).is_err());
}

#[test]
fn should_flush_only_changed_blocks() {
    let mut uniforms = uniforms_of(REFLECTION_SHADER);
    assert!(uniforms.is_dirty());

    let mut written = Vec::new();
    uniforms.flush_with(|index, bytes| written.push((index, bytes.len())));
    assert_eq!(written, vec![(0, 16), (1, 32), (2, 32)]);
    assert!(!uniforms.is_dirty());

    uniforms.set_float("elapsed_time", 2.0).unwrap();
    let mut written = Vec::new();
    uniforms.flush_with(|index, _| written.push(index));
    assert_eq!(written, vec![0]);
}

#[test]
fn should_pad_mat3_columns() {
    let mut uniforms = uniforms_of(
        r#"
@group(0) @binding(0)
var<uniform> normal_matrix: mat3x3<f32>;

@vertex
fn vs_main(@location(0) p: vec3<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(normal_matrix * p, 1.0);
}
"#,
    );
    uniforms
        .set_mat3("normal_matrix", [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]])
        .unwrap();
    let bytes = uniforms.block_bytes(0).unwrap();
    assert_eq!(
        floats(&bytes[..48]),
        vec![1.0, 2.0, 3.0, 0.0, 4.0, 5.0, 6.0, 0.0, 7.0, 8.0, 9.0, 0.0]
    );
}

#[test]
fn should_stage_integer_uniforms() {
    let mut uniforms = uniforms_of(
        r#"
struct Grid {
    frame: u32,
    mode: i32,
    cell: vec3<i32>,
}

@group(0) @binding(0)
var<uniform> grid: Grid;

@vertex
fn vs_main(@location(0) p: vec3<f32>) -> @builtin(position) vec4<f32> {
    let c = vec3<f32>(grid.cell) * f32(grid.frame) * f32(grid.mode);
    return vec4<f32>(p + c, 1.0);
}
"#,
    );
    uniforms.set_uint("grid.frame", 7).unwrap();
    uniforms.set_int("grid.mode", -2).unwrap();
    uniforms.set_ivec3("grid.cell", [1, -1, 3]).unwrap();
    assert!(matches!(
        uniforms.set_int("grid.frame", 7),
        Err(GpuError::UniformTypeMismatch { .. })
    ));

    assert_eq!(uniforms.int("grid.mode").unwrap(), -2);
    let bytes = uniforms.block_bytes(0).unwrap();
    let words: Vec<i32> = bytes
        .chunks_exact(4)
        .map(|c| i32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    assert_eq!(&words[..2], &[7, -2]);
    assert_eq!(&words[4..7], &[1, -1, 3]);
}

#[test]
fn should_reject_bindings_outside_group_0() {
    let source = ShaderSource::parse(
        "group1",
        r#"
@group(1) @binding(0)
var<uniform> tint: vec4<f32>;

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return tint;
}
"#,
    )
    .unwrap();
    assert!(matches!(
        source.reflect(),
        Err(GpuError::UnsupportedBinding { ref name, .. }) if name == "tint"
    ));
}

#[test]
fn merge_should_accept_shared_bindings_and_reject_conflicts() {
    let mut merged = (*layout_of(REFLECTION_SHADER)).clone();
    merged.merge("same", &layout_of(REFLECTION_SHADER)).unwrap();
    assert_eq!(merged.blocks().len(), 3);

    let other = layout_of(
        r#"
@group(0) @binding(1)
var<uniform> tint: vec4<f32>;

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return tint;
}
"#,
    );
    assert!(matches!(
        merged.merge("conflict", &other),
        Err(GpuError::UnsupportedBinding { .. })
    ));
}
