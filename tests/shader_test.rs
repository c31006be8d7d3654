mod common;

use common::test_utils::layout_of;
use render_tutorial::{
    GpuError,
    data_structures::{
        material::names,
        shader::{ShaderSource, ShaderStage},
        uniform::{ResourceKind, UniformKind},
    },
};

const BUILT_IN: [(&str, &str); 10] = [
    ("first_triangle", include_str!("../src/shaders/first_triangle.wgsl")),
    ("colored", include_str!("../src/shaders/colored.wgsl")),
    ("textured", include_str!("../src/shaders/textured.wgsl")),
    ("uniform", include_str!("../src/shaders/uniform.wgsl")),
    ("transform", include_str!("../src/shaders/transform.wgsl")),
    ("normal_color", include_str!("../src/shaders/normal_color.wgsl")),
    ("unlit", include_str!("../src/shaders/unlit.wgsl")),
    ("phong", include_str!("../src/shaders/phong.wgsl")),
    ("lit", include_str!("../src/shaders/lit.wgsl")),
    ("multi_light", include_str!("../src/shaders/multi_light.wgsl")),
];

#[test]
fn built_in_shaders_should_parse_and_reflect() {
    for (label, source) in BUILT_IN {
        let parsed = ShaderSource::parse(label, source)
            .unwrap_or_else(|err| panic!("{label} does not parse: {err}"));
        assert_eq!(parsed.entry_point(ShaderStage::Vertex), Some("vs_main"), "{label}");
        assert_eq!(parsed.entry_point(ShaderStage::Fragment), Some("fs_main"), "{label}");
        parsed
            .reflect()
            .unwrap_or_else(|err| panic!("{label} does not reflect: {err}"));
    }
}

#[test]
fn should_report_syntax_errors_as_shader_errors() {
    let err = ShaderSource::parse("broken", "fn vs_main( {").unwrap_err();
    assert!(matches!(err, GpuError::ShaderCompilation { ref label, .. } if label == "broken"));
    assert!(err.to_string().starts_with("Shader Error (broken): "));
}

#[test]
fn should_report_validation_errors_as_shader_errors() {
    let source = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return 1.0;
}
"#;
    let err = ShaderSource::parse("mistyped", source).unwrap_err();
    assert!(matches!(err, GpuError::ShaderCompilation { .. }));
}

#[test]
fn lit_shader_should_declare_every_light_and_material_name() {
    let layout = layout_of(include_str!("../src/shaders/lit.wgsl"));
    for name in [
        names::MODEL_MATRIX,
        names::VIEW_MATRIX,
        names::PROJECTION_MATRIX,
        names::CAMERA_POSITION,
        names::AMBIENT_COLOR,
        names::DIFFUSE_COLOR,
        names::SPECULAR_COLOR,
        names::SPECULAR_SHININESS,
        names::LIGHT_POSITION,
        names::LIGHT_COLOR,
        names::LIGHT_DIRECTION,
        names::LIGHT_CONSTANT,
        names::LIGHT_LINEAR,
        names::LIGHT_QUADRATIC,
        names::LIGHT_CUT_OFF,
        names::LIGHT_OUTER_CUT_OFF,
    ] {
        assert!(layout.contains(name), "lit.wgsl lacks {name}");
    }
    assert_eq!(layout.entry(names::LIGHT_TYPE).unwrap().kind, UniformKind::Int);
    assert!(layout.resource(names::DIFFUSE_MAP, ResourceKind::Texture).is_some());
    assert!(
        layout
            .resource("diffuse_map_sampler", ResourceKind::Sampler)
            .is_some()
    );
}

#[test]
fn multi_light_shader_should_declare_three_point_lights() {
    let layout = layout_of(include_str!("../src/shaders/multi_light.wgsl"));
    for index in 0..3 {
        for field in [
            "position_world",
            "color",
            "attenuation_constant",
            "attenuation_linear",
            "attenuation_quadratic",
        ] {
            let name = names::point_light(index, field);
            assert!(layout.contains(&name), "multi_light.wgsl lacks {name}");
        }
    }
    assert!(!layout.contains(&names::point_light(3, "color")));
    assert!(layout.contains(names::DIRECTIONAL_LIGHT_COLOR));
    assert!(layout.contains(names::DIRECTIONAL_LIGHT_DIRECTION));
    assert!(layout.resource(names::SPECULAR_MAP, ResourceKind::Texture).is_some());
}

#[test]
fn phong_shader_should_declare_strengths() {
    let layout = layout_of(include_str!("../src/shaders/phong.wgsl"));
    for name in [
        names::OBJECT_COLOR,
        names::AMBIENT_COLOR,
        names::AMBIENT_STRENGTH,
        names::SPECULAR_STRENGTH,
        names::SPECULAR_SHININESS,
    ] {
        assert!(layout.contains(name), "phong.wgsl lacks {name}");
    }
    assert!(!layout.contains(names::LIGHT_TYPE));
}

#[test]
fn uniform_shader_should_declare_scalar_blocks() {
    let layout = layout_of(include_str!("../src/shaders/uniform.wgsl"));
    assert_eq!(layout.entry(names::ELAPSED_TIME).unwrap().kind, UniformKind::Float);
    assert_eq!(layout.entry(names::COLOR).unwrap().kind, UniformKind::Vec4);
    assert_eq!(layout.blocks().len(), 2);
}
