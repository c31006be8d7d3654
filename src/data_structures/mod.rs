//! GPU resource wrappers and their compositions.
//!
//! The wrappers own one GPU object each:
//!
//! - `buffer` holds vertex, index and uniform buffers
//! - `vertex_array` describes how vertex buffers feed shader locations
//! - `shader` parses, validates and compiles WGSL
//! - `program` links a vertex and a fragment shader and caches their pipelines
//! - `texture` wraps a texture, its view and its sampler
//! - `uniform` reflects uniform names and stages their values
//!
//! The compositions build drawable objects out of them: `mesh`, `material`, `model` and
//! `transform`.

pub mod buffer;
pub mod material;
pub mod mesh;
pub mod model;
pub mod program;
pub mod shader;
pub mod texture;
pub mod transform;
pub mod uniform;
pub mod vertex_array;
