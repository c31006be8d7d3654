mod common;

use cgmath::{InnerSpace, Matrix4, Point3, SquareMatrix, Transform as _, Vector3, Vector4};
use common::test_utils::uniforms_of;
use float_eq::assert_float_eq;
use render_tutorial::{
    camera::{Camera, SphericalCoordinates},
    data_structures::{material::names, transform::Transform},
    light::{Light, LightType},
};

const LIT: &str = include_str!("../src/shaders/lit.wgsl");
const MULTI_LIGHT: &str = include_str!("../src/shaders/multi_light.wgsl");

#[test]
fn projection_should_map_near_and_far_to_wgpu_depth() {
    let camera = Camera::new([0.0, 0.0, 5.0], [0.0, 0.0, 0.0], 45.0, 0.1, 100.0, 800, 600);
    let vp = camera.view_projection();

    let depth = |z: f32| {
        let clip = vp * Vector4::new(0.0, 0.0, z, 1.0);
        clip.z / clip.w
    };
    assert_float_eq!(depth(5.0 - 0.1), 0.0, abs <= 1e-4);
    assert_float_eq!(depth(5.0 - 100.0), 1.0, abs <= 1e-4);
    assert_float_eq!(camera.aspect(), 800.0 / 600.0, ulps <= 1);
}

#[test]
fn resize_should_ignore_zero_sizes() {
    let mut camera = Camera::new([0.0, 0.0, 5.0], [0.0, 0.0, 0.0], 45.0, 0.1, 100.0, 800, 600);
    camera.resize(0, 600);
    assert_float_eq!(camera.aspect(), 800.0 / 600.0, ulps <= 1);
    camera.resize(1000, 500);
    assert_float_eq!(camera.aspect(), 2.0, ulps <= 1);
}

#[test]
fn view_should_place_the_target_in_front_of_the_camera() {
    let camera = Camera::new([0.0, 2.0, 5.0], [0.0, 0.0, 0.0], 45.0, 0.1, 100.0, 1, 1);
    let target = camera.view_matrix().transform_point(Point3::new(0.0, 0.0, 0.0));
    assert_float_eq!(target.x, 0.0, abs <= 1e-5);
    assert_float_eq!(target.y, 0.0, abs <= 1e-5);
    assert_float_eq!(target.z, -(4.0f32 + 25.0).sqrt(), abs <= 1e-5);
}

#[test]
fn spherical_coordinates_should_orbit_the_offset() {
    let offset = Vector3::new(0.0, 1.6, 0.0);

    let above = SphericalCoordinates::new(offset, 5.0, 0.0, 0.0).position();
    assert_float_eq!(above.y, 6.6, abs <= 1e-5);

    let side = SphericalCoordinates::new(offset, 5.0, 90.0, 90.0).position();
    assert_float_eq!(side.x, 0.0, abs <= 1e-5);
    assert_float_eq!(side.y, 1.6, abs <= 1e-5);
    assert_float_eq!(side.z, 5.0, abs <= 1e-5);

    let orbit = SphericalCoordinates::new(offset, 5.0, 60.0, 90.0).position();
    let distance = (Vector3::new(orbit.x, orbit.y, orbit.z) - offset).magnitude();
    assert_float_eq!(distance, 5.0, abs <= 1e-5);
}

#[test]
fn transform_should_scale_then_rotate_then_translate() {
    let mut transform = Transform::at(Vector3::new(1.0, 0.0, 0.0)).with_scale(2.0);
    transform.rotation = Vector3::new(0.0, 90.0, 0.0);
    let p = transform.matrix().transform_point(Point3::new(1.0, 0.0, 0.0));
    assert_float_eq!(p.x, 1.0, abs <= 1e-5);
    assert_float_eq!(p.y, 0.0, abs <= 1e-5);
    assert_float_eq!(p.z, -2.0, abs <= 1e-5);

    assert_eq!(Transform::default().matrix(), Matrix4::identity());
}

#[test]
fn camera_should_write_view_projection_and_position() {
    let camera = Camera::new([1.0, 2.0, 3.0], [0.0, 0.0, 0.0], 45.0, 0.1, 100.0, 4, 3);
    let mut uniforms = uniforms_of(LIT);
    camera.apply(&mut uniforms).unwrap();

    assert_eq!(uniforms.vec3(names::CAMERA_POSITION).unwrap(), [1.0, 2.0, 3.0]);
    let view: [[f32; 4]; 4] = camera.view_matrix().into();
    assert_eq!(uniforms.mat4(names::VIEW_MATRIX).unwrap(), view);
}

#[test]
fn point_light_should_write_attenuation_but_not_the_cone() {
    let mut uniforms = uniforms_of(LIT);
    let light = Light::point(Vector3::new(0.0, 5.0, 5.0), Vector3::new(1.0, 1.0, 1.0))
        .with_attenuation(1.0, 0.5, 0.25);
    light.apply(&mut uniforms).unwrap();

    assert_eq!(uniforms.int(names::LIGHT_TYPE).unwrap(), LightType::Point as i32);
    assert_eq!(uniforms.vec3(names::LIGHT_POSITION).unwrap(), [0.0, 5.0, 5.0]);
    assert_eq!(uniforms.float(names::LIGHT_LINEAR).unwrap(), 0.5);
    assert_eq!(uniforms.float(names::LIGHT_QUADRATIC).unwrap(), 0.25);
    assert_eq!(uniforms.float(names::LIGHT_CUT_OFF).unwrap(), 0.0);
}

#[test]
fn spot_light_should_write_cone_cosines() {
    let mut uniforms = uniforms_of(LIT);
    let light = Light::spot(
        Vector3::new(0.0, 0.2, -2.0),
        Vector3::new(0.0, -2.0, 0.0),
        Vector3::new(1.0, 1.0, 1.0),
    )
    .with_cone(12.5, 14.5);
    light.apply(&mut uniforms).unwrap();

    assert_eq!(uniforms.int(names::LIGHT_TYPE).unwrap(), 3);
    assert_eq!(uniforms.vec3(names::LIGHT_DIRECTION).unwrap(), [0.0, -1.0, 0.0]);
    assert_float_eq!(
        uniforms.float(names::LIGHT_CUT_OFF).unwrap(),
        12.5f32.to_radians().cos(),
        abs <= 1e-6
    );
    assert_float_eq!(
        uniforms.float(names::LIGHT_OUTER_CUT_OFF).unwrap(),
        14.5f32.to_radians().cos(),
        abs <= 1e-6
    );
}

#[test]
fn light_should_skip_names_the_program_lacks() {
    let mut uniforms = uniforms_of(include_str!("../src/shaders/phong.wgsl"));
    let light = Light::spot(
        Vector3::new(1.5, 1.5, 1.5),
        Vector3::new(0.0, -1.0, 0.0),
        Vector3::new(1.0, 0.5, 0.25),
    );
    light.apply(&mut uniforms).unwrap();
    assert_eq!(uniforms.vec3(names::LIGHT_COLOR).unwrap(), [1.0, 0.5, 0.25]);
}

#[test]
fn multi_light_should_index_point_lights() {
    let mut uniforms = uniforms_of(MULTI_LIGHT);
    let lights = [
        Light::point(Vector3::new(0.0, 0.2, -2.0), Vector3::new(1.0, 0.0, 0.0)),
        Light::point(Vector3::new(2.0, 0.2, 2.0), Vector3::new(0.0, 1.0, 0.0)),
        Light::point(Vector3::new(-2.0, 0.2, 2.0), Vector3::new(0.0, 0.0, 1.0)),
    ];
    for (index, light) in lights.iter().enumerate() {
        light.apply_point(index, &mut uniforms).unwrap();
    }
    Light::directional(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(0.5, 0.5, 0.5))
        .apply_directional(&mut uniforms)
        .unwrap();

    assert_eq!(
        uniforms.vec3(&names::point_light(2, "position_world")).unwrap(),
        [-2.0, 0.2, 2.0]
    );
    assert_eq!(
        uniforms.vec3(&names::point_light(1, "color")).unwrap(),
        [0.0, 1.0, 0.0]
    );
    let direction = uniforms.vec3(names::DIRECTIONAL_LIGHT_DIRECTION).unwrap();
    assert_float_eq!(Vector3::from(direction).magnitude(), 1.0, abs <= 1e-6);

    assert!(lights[0].apply_point(3, &mut uniforms).is_err());
}

#[test]
fn light_direction_should_stay_normalized_and_never_vanish() {
    let mut light = Light::directional(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(0.5, 0.5, 0.5));
    let before = light.direction;

    assert!(!light.set_direction(Vector3::new(0.0, 0.0, 0.0)));
    assert_eq!(light.direction, before);

    assert!(light.set_direction(Vector3::new(0.0, -4.0, 0.0)));
    let direction: [f32; 3] = light.direction.into();
    assert_float_eq!(direction, [0.0, -1.0, 0.0], abs_all <= 1e-6);
    assert_float_eq!(light.direction.magnitude(), 1.0, abs <= 1e-6);
}
