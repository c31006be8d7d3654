//! Model import from Wavefront OBJ and glTF files.
//!
//! Files are first read into a [`ModelData`], which holds plain geometry and material
//! parameters and can be checked without a GPU. [`ModelLoader::load`] then uploads it as a
//! [`Model`] whose materials all use the lit Phong shader.

use std::{
    io::{BufReader, Cursor},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use cgmath::{InnerSpace, Vector3};

use crate::{
    context::InitContext,
    data_structures::{
        mesh::{Mesh, MeshDescriptor},
        model::{Model, ModelDescriptor, validate_material_indices},
    },
    error::GpuError,
    resources::{
        asset_path, load_string,
        material_factory::{self, MaterialParams},
    },
};

fn obj_load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    }
}

/// Joins `file` onto the directory holding `model_file`, keeping the result asset-root relative.
fn sibling_path(model_file: &str, file: &str) -> String {
    let dir = Path::new(model_file).parent().unwrap_or(Path::new(""));
    dir.join(file).to_string_lossy().replace('\\', "/")
}

fn chunk3(values: &[f32]) -> Vec<[f32; 3]> {
    values.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect()
}

fn chunk2(values: &[f32]) -> Vec<[f32; 2]> {
    values.chunks_exact(2).map(|c| [c[0], c[1]]).collect()
}

/// Per-vertex normals as the sum of the unnormalized face normals around each vertex, so larger
/// triangles weigh more. Vertices on no triangle, or only on degenerate ones, point up.
fn smooth_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut sums = vec![Vector3::new(0.0f32, 0.0, 0.0); positions.len()];
    for triangle in indices.chunks_exact(3) {
        let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);
        let (Some(pa), Some(pb), Some(pc)) = (positions.get(a), positions.get(b), positions.get(c))
        else {
            continue;
        };
        let [pa, pb, pc] = [pa, pb, pc].map(|p| Vector3::from(*p));
        let face = (pb - pa).cross(pc - pa);
        for i in [a, b, c] {
            sums[i] += face;
        }
    }
    sums.into_iter()
        .map(|n| {
            if n.magnitude2() > f32::EPSILON * f32::EPSILON {
                n.normalize().into()
            } else {
                [0.0, 1.0, 0.0]
            }
        })
        .collect()
}

/// Imported geometry and materials, not yet on the GPU.
///
/// Vertex colors are not imported, so the first UV channel always sits at location 2 where the
/// lit shader reads it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelData {
    pub meshes: Vec<MeshDescriptor>,
    pub materials: Vec<MaterialParams>,
    /// Material of each mesh, parallel to `meshes`.
    pub material_indices: Vec<usize>,
}

impl ModelData {
    /// Parses OBJ text. `mtl` is the content of the material library it references, if any.
    /// Texture paths are taken relative to `model_file`.
    pub fn from_obj_str(model_file: &str, obj: &str, mtl: Option<&str>) -> anyhow::Result<Self> {
        let (models, materials) = tobj::load_obj_buf(
            &mut BufReader::new(Cursor::new(obj)),
            &obj_load_options(),
            |_| match mtl {
                Some(text) => tobj::load_mtl_buf(&mut BufReader::new(Cursor::new(text))),
                None => Err(tobj::LoadError::OpenFileFailed),
            },
        )
        .with_context(|| format!("cannot parse {model_file}"))?;
        Self::from_tobj(model_file, models, materials)
    }

    fn from_tobj(
        model_file: &str,
        models: Vec<tobj::Model>,
        materials: Result<Vec<tobj::Material>, tobj::LoadError>,
    ) -> anyhow::Result<Self> {
        let materials = materials.unwrap_or_else(|err| {
            log::warn!("{model_file}: no materials ({err}); using the default material");
            Vec::new()
        });

        let mut data = ModelData {
            materials: materials
                .iter()
                .map(|m| {
                    let defaults = MaterialParams::default();
                    MaterialParams {
                        name: m.name.clone(),
                        ambient: m.ambient.unwrap_or(defaults.ambient),
                        diffuse: m.diffuse.unwrap_or(defaults.diffuse),
                        specular: m.specular.unwrap_or(defaults.specular),
                        shininess: m.shininess.unwrap_or(defaults.shininess),
                        diffuse_texture: m
                            .diffuse_texture
                            .as_deref()
                            .map(|file| sibling_path(model_file, file)),
                    }
                })
                .collect(),
            ..Default::default()
        };

        let mut unassigned = Vec::new();
        for model in models {
            let mesh = model.mesh;
            if mesh.positions.is_empty() || mesh.indices.is_empty() {
                log::debug!("{model_file}: skipping empty object `{}`", model.name);
                continue;
            }
            let tex_coords = if mesh.texcoords.is_empty() {
                Vec::new()
            } else {
                vec![chunk2(&mesh.texcoords)]
            };
            match mesh.material_id.filter(|&id| id < data.materials.len()) {
                Some(id) => data.material_indices.push(id),
                None => {
                    unassigned.push(data.meshes.len());
                    data.material_indices.push(0);
                }
            }
            data.meshes.push(MeshDescriptor {
                name: model.name,
                positions: chunk3(&mesh.positions),
                normals: chunk3(&mesh.normals),
                colors: None,
                indices: mesh.indices,
                tex_coords,
            });
        }

        if !unassigned.is_empty() {
            let default = data.materials.len();
            data.materials.push(MaterialParams::default());
            for mesh in unassigned {
                data.material_indices[mesh] = default;
            }
        }

        data.finish(model_file)?;
        Ok(data)
    }

    /// Converts an imported glTF document. Only the first UV channel and URI textures are used.
    pub fn from_gltf(
        model_file: &str,
        document: &gltf::Document,
        buffers: &[gltf::buffer::Data],
    ) -> anyhow::Result<Self> {
        let defaults = MaterialParams::default();
        let mut data = ModelData {
            materials: document
                .materials()
                .map(|m| {
                    let pbr = m.pbr_metallic_roughness();
                    let [r, g, b, _] = pbr.base_color_factor();
                    let diffuse_texture = pbr.base_color_texture().and_then(|info| {
                        match info.texture().source().source() {
                            gltf::image::Source::Uri { uri, .. } => {
                                Some(sibling_path(model_file, uri))
                            }
                            gltf::image::Source::View { .. } => {
                                log::debug!("{model_file}: embedded images are not loaded");
                                None
                            }
                        }
                    });
                    MaterialParams {
                        name: m.name().unwrap_or(defaults.name.as_str()).to_string(),
                        ambient: [r * 0.2, g * 0.2, b * 0.2],
                        diffuse: [r, g, b],
                        diffuse_texture,
                        ..defaults.clone()
                    }
                })
                .collect(),
            ..Default::default()
        };

        let mut needs_default = false;
        for mesh in document.meshes() {
            for (i, primitive) in mesh.primitives().enumerate() {
                let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));
                let name = format!("{}#{i}", mesh.name().unwrap_or("mesh"));
                let positions: Vec<[f32; 3]> = reader
                    .read_positions()
                    .map(|p| p.collect())
                    .unwrap_or_default();
                let indices: Vec<u32> = match reader.read_indices() {
                    Some(indices) => indices.into_u32().collect(),
                    None => (0..positions.len() as u32).collect(),
                };
                if positions.is_empty() || indices.is_empty() {
                    log::debug!("{model_file}: skipping empty primitive `{name}`");
                    continue;
                }
                let tex_coords = reader
                    .read_tex_coords(0)
                    .map(|uvs| vec![uvs.into_f32().collect()])
                    .unwrap_or_default();
                match primitive.material().index() {
                    Some(index) => data.material_indices.push(index),
                    None => {
                        needs_default = true;
                        data.material_indices.push(usize::MAX);
                    }
                }
                data.meshes.push(MeshDescriptor {
                    name,
                    normals: reader.read_normals().map(|n| n.collect()).unwrap_or_default(),
                    positions,
                    colors: None,
                    indices,
                    tex_coords,
                });
            }
        }

        if needs_default {
            let default = data.materials.len();
            data.materials.push(defaults);
            for index in data.material_indices.iter_mut().filter(|i| **i == usize::MAX) {
                *index = default;
            }
        }

        data.finish(model_file)?;
        Ok(data)
    }

    /// Requires at least one mesh, adds a default material when there is none, and fills in
    /// missing normals and a missing first UV channel so every mesh fits the lit shader.
    fn finish(&mut self, model_file: &str) -> Result<(), GpuError> {
        if self.meshes.is_empty() {
            return Err(GpuError::InvalidModel(format!("{model_file} has no meshes")));
        }
        if self.materials.is_empty() {
            self.materials.push(MaterialParams::default());
        }
        for mesh in &mut self.meshes {
            if mesh.normals.is_empty() {
                log::debug!("{model_file}: generating normals for `{}`", mesh.name);
                mesh.normals = smooth_normals(&mesh.positions, &mesh.indices);
            }
            if mesh.tex_coords.is_empty() {
                mesh.tex_coords.push(vec![[0.0, 0.0]; mesh.vertex_count()]);
            }
            mesh.validate()?;
        }
        validate_material_indices(self.meshes.len(), self.materials.len(), &self.material_indices)
    }
}

pub struct ModelLoader;

impl ModelLoader {
    /// Reads `file_name` from the asset root. The format is chosen by extension: `.obj`, or
    /// `.gltf`/`.glb`.
    pub async fn read(root: &Path, file_name: &str) -> anyhow::Result<ModelData> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("obj") => Self::read_obj(root, file_name).await,
            Some("gltf" | "glb") => Self::read_gltf(asset_path(root, file_name), file_name).await,
            _ => anyhow::bail!("unsupported model format: {file_name}"),
        }
    }

    async fn read_obj(root: &Path, file_name: &str) -> anyhow::Result<ModelData> {
        let obj_text = load_string(root, file_name).await?;
        let (models, materials) = tobj::load_obj_buf_async(
            &mut BufReader::new(Cursor::new(obj_text)),
            &obj_load_options(),
            |p| {
                let root = root.to_path_buf();
                let mtl_file = sibling_path(file_name, &p);
                async move {
                    match load_string(&root, &mtl_file).await {
                        Ok(text) => tobj::load_mtl_buf(&mut BufReader::new(Cursor::new(text))),
                        Err(err) => {
                            log::warn!("{err:#}");
                            Err(tobj::LoadError::OpenFileFailed)
                        }
                    }
                }
            },
        )
        .await
        .with_context(|| format!("cannot parse {file_name}"))?;
        ModelData::from_tobj(file_name, models, materials)
    }

    async fn read_gltf(path: PathBuf, file_name: &str) -> anyhow::Result<ModelData> {
        let (document, buffers, _images) = tokio::task::spawn_blocking(move || gltf::import(path))
            .await?
            .with_context(|| format!("cannot import {file_name}"))?;
        ModelData::from_gltf(file_name, &document, &buffers)
    }

    /// Uploads imported data. Each material becomes a lit Phong material.
    pub async fn upload(ctx: &InitContext, data: &ModelData) -> anyhow::Result<Model> {
        let mut meshes = Vec::with_capacity(data.meshes.len());
        for descriptor in &data.meshes {
            meshes.push(Mesh::new(&ctx.device, descriptor)?);
        }
        let mut materials = Vec::with_capacity(data.materials.len());
        for params in &data.materials {
            materials.push(material_factory::phong(ctx, params).await?);
        }
        Ok(Model::new(ModelDescriptor {
            meshes,
            materials,
            material_indices: data.material_indices.clone(),
        })?)
    }

    pub async fn load(ctx: &InitContext, file_name: &str) -> anyhow::Result<Model> {
        let data = Self::read(&ctx.asset_root, file_name).await?;
        log::info!(
            "Loaded {file_name}: {} meshes, {} materials",
            data.meshes.len(),
            data.materials.len()
        );
        Self::upload(ctx, &data).await
    }
}
