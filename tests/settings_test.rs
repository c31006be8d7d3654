use std::path::PathBuf;

use float_eq::assert_float_eq;
use render_tutorial::settings::{
    ENV_ASSET_ROOT, ENV_FRAME_RATE, ENV_HEIGHT, ENV_SCENE, ENV_VSYNC, ENV_WIDTH, Settings,
};

#[test]
fn defaults_should_apply_without_variables() {
    let settings = Settings::from_vars(Vec::<(String, String)>::new());
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.asset_root, PathBuf::from("assets"));
    assert_eq!(settings.initial_scene, None);
    assert_eq!(settings.frame_rate, 60);
}

#[test]
fn variables_should_override_defaults() {
    let settings = Settings::from_vars([
        (ENV_ASSET_ROOT, "/srv/assets"),
        (ENV_SCENE, "LightCaster"),
        (ENV_FRAME_RATE, "30"),
        (ENV_WIDTH, "640"),
        (ENV_HEIGHT, " 480 "),
        (ENV_VSYNC, "off"),
        ("UNRELATED", "1"),
    ]);
    assert_eq!(settings.asset_root, PathBuf::from("/srv/assets"));
    assert_eq!(settings.initial_scene.as_deref(), Some("LightCaster"));
    assert_eq!(settings.frame_rate, 30);
    assert_eq!((settings.width, settings.height), (640, 480));
    assert!(!settings.vsync);
}

#[test]
fn invalid_values_should_be_ignored() {
    let settings = Settings::from_vars([
        (ENV_FRAME_RATE, "0"),
        (ENV_WIDTH, "wide"),
        (ENV_VSYNC, "maybe"),
        (ENV_SCENE, ""),
    ]);
    assert_eq!(settings, Settings::default());
}

#[test]
fn frame_interval_should_follow_the_frame_rate() {
    let settings = Settings {
        frame_rate: 50,
        ..Default::default()
    };
    assert_float_eq!(settings.frame_interval().as_secs_f64(), 0.02, abs <= 1e-9);
}
