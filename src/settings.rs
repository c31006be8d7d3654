//! Runtime configuration.
//!
//! Every knob has a default. [`Settings::from_env`] overrides them from `TUTORIAL_*` environment
//! variables; values that do not parse are logged and ignored.

use std::path::PathBuf;

pub const ENV_ASSET_ROOT: &str = "TUTORIAL_ASSET_ROOT";
pub const ENV_SCENE: &str = "TUTORIAL_SCENE";
pub const ENV_FRAME_RATE: &str = "TUTORIAL_FRAME_RATE";
pub const ENV_WIDTH: &str = "TUTORIAL_WIDTH";
pub const ENV_HEIGHT: &str = "TUTORIAL_HEIGHT";
pub const ENV_VSYNC: &str = "TUTORIAL_VSYNC";

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Window title prefix. The active scene name is appended.
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Update/render cadence in frames per second.
    pub frame_rate: u32,
    /// Directory that textures and models are loaded from.
    pub asset_root: PathBuf,
    /// Name of the scene shown on start-up, `None` for the clear scene.
    pub initial_scene: Option<String>,
    pub clear_color: wgpu::Color,
    pub vsync: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Render Tutorial".to_string(),
            width: 1280,
            height: 720,
            frame_rate: 60,
            asset_root: PathBuf::from("assets"),
            initial_scene: None,
            clear_color: wgpu::Color {
                r: 0.1,
                g: 0.1,
                b: 0.1,
                a: 1.0,
            },
            vsync: true,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Builds settings from `(key, value)` pairs, starting from the defaults.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut settings = Self::default();
        for (key, value) in vars {
            let value = value.as_ref().trim();
            match key.as_ref() {
                ENV_ASSET_ROOT if !value.is_empty() => settings.asset_root = PathBuf::from(value),
                ENV_SCENE if !value.is_empty() => settings.initial_scene = Some(value.to_string()),
                ENV_FRAME_RATE => {
                    if let Some(rate) = parse_positive(ENV_FRAME_RATE, value) {
                        settings.frame_rate = rate;
                    }
                }
                ENV_WIDTH => {
                    if let Some(width) = parse_positive(ENV_WIDTH, value) {
                        settings.width = width;
                    }
                }
                ENV_HEIGHT => {
                    if let Some(height) = parse_positive(ENV_HEIGHT, value) {
                        settings.height = height;
                    }
                }
                ENV_VSYNC => match value.to_ascii_lowercase().as_str() {
                    "1" | "true" | "on" => settings.vsync = true,
                    "0" | "false" | "off" => settings.vsync = false,
                    _ => log::warn!("Ignoring {ENV_VSYNC}={value}: expected a boolean"),
                },
                _ => {}
            }
        }
        settings
    }

    pub fn frame_interval(&self) -> instant::Duration {
        instant::Duration::from_secs_f64(1.0 / f64::from(self.frame_rate.max(1)))
    }
}

fn parse_positive(key: &str, value: &str) -> Option<u32> {
    match value.parse::<u32>() {
        Ok(0) | Err(_) => {
            log::warn!("Ignoring {key}={value}: expected a positive integer");
            None
        }
        Ok(parsed) => Some(parsed),
    }
}
