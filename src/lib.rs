//! render-tutorial
//!
//! A progressive GPU rendering tutorial. Each step is a self-contained scene, selectable at
//! runtime from one window: a first triangle, indexed meshes, textures, uniforms, transforms,
//! Phong lighting, light casters, multiple lights and model loading. An egui overlay exposes the
//! parameters of the active scene.
//!
//! High-level modules
//! - `window`: the winit host loop and [`run`]
//! - `manager`: frame driver owning the current scene, the GUI and the scene selector
//! - `scene`: the [`scene::Scene`] contract and the catalogue; `scenes` holds the demos
//! - `context`: GPU device, queue and surface
//! - `data_structures`: GPU resource wrappers (buffer, vertex array, shader, program, texture,
//!   uniform) and their compositions (mesh, material, model)
//! - `resources`: asset loading, model import and procedural primitives
//! - `pipelines`: render pipeline construction
//! - `gui`: the egui overlay, drawn with egui-wgpu
//! - `camera`, `light`: view/projection and light parameters
//! - `settings`, `error`: configuration and the error taxonomy

pub mod camera;
pub mod context;
pub mod data_structures;
pub mod error;
pub mod gui;
pub mod light;
pub mod manager;
pub mod pipelines;
pub mod resources;
pub mod scene;
pub mod scenes;
pub mod settings;
pub mod window;

pub use error::GpuError;
pub use settings::Settings;
pub use window::run;
