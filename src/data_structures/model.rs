//! Models: meshes paired with materials under one transform.

use crate::{
    camera::Camera,
    context::RenderTargets,
    data_structures::{
        material::{Material, names},
        mesh::Mesh,
        transform::Transform,
        uniform::ignore_missing,
    },
    error::GpuError,
    light::Light,
};

pub struct ModelDescriptor {
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
    /// Material used by each mesh, parallel to `meshes`.
    pub material_indices: Vec<usize>,
}

/// Checks that every mesh has a material index and that each index is in range.
pub fn validate_material_indices(
    mesh_count: usize,
    material_count: usize,
    material_indices: &[usize],
) -> Result<(), GpuError> {
    if mesh_count == 0 {
        return Err(GpuError::InvalidModel("a model needs at least one mesh".into()));
    }
    if material_indices.len() != mesh_count {
        return Err(GpuError::InvalidModel(format!(
            "{} material indices for {mesh_count} meshes",
            material_indices.len()
        )));
    }
    if let Some(&index) = material_indices.iter().find(|&&i| i >= material_count) {
        return Err(GpuError::InvalidIndex {
            what: "material",
            index,
            len: material_count,
        });
    }
    Ok(())
}

/// Draws one mesh of a model with one of its materials.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshRenderer {
    pub mesh: usize,
    pub material: usize,
}

impl MeshRenderer {
    pub fn render(
        &self,
        meshes: &[Mesh],
        materials: &mut [Material],
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        targets: &RenderTargets,
        pass: &mut wgpu::RenderPass<'_>,
    ) -> Result<(), GpuError> {
        let mesh = meshes.get(self.mesh).ok_or(GpuError::InvalidIndex {
            what: "mesh",
            index: self.mesh,
            len: meshes.len(),
        })?;
        let len = materials.len();
        let material = materials
            .get_mut(self.material)
            .ok_or(GpuError::InvalidIndex {
                what: "material",
                index: self.material,
                len,
            })?;
        material.draw(device, queue, targets, pass, mesh)
    }
}

pub struct Model {
    pub transform: Transform,
    meshes: Vec<Mesh>,
    materials: Vec<Material>,
    renderers: Vec<MeshRenderer>,
}

impl Model {
    pub fn new(descriptor: ModelDescriptor) -> Result<Self, GpuError> {
        validate_material_indices(
            descriptor.meshes.len(),
            descriptor.materials.len(),
            &descriptor.material_indices,
        )?;
        let renderers = descriptor
            .material_indices
            .iter()
            .enumerate()
            .map(|(mesh, &material)| MeshRenderer { mesh, material })
            .collect();
        Ok(Self {
            transform: Transform::default(),
            meshes: descriptor.meshes,
            materials: descriptor.materials,
            renderers,
        })
    }

    /// One mesh drawn with one material.
    pub fn single(mesh: Mesh, material: Material) -> Self {
        Self {
            transform: Transform::default(),
            meshes: vec![mesh],
            materials: vec![material],
            renderers: vec![MeshRenderer {
                mesh: 0,
                material: 0,
            }],
        }
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn materials_mut(&mut self) -> &mut [Material] {
        &mut self.materials
    }

    pub fn renderers(&self) -> &[MeshRenderer] {
        &self.renderers
    }

    pub fn update_camera(&mut self, camera: &Camera) -> Result<(), GpuError> {
        for material in &mut self.materials {
            camera.apply(material.uniforms_mut())?;
        }
        Ok(())
    }

    pub fn update_light(&mut self, light: &Light) -> Result<(), GpuError> {
        for material in &mut self.materials {
            light.apply(material.uniforms_mut())?;
        }
        Ok(())
    }

    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        targets: &RenderTargets,
        pass: &mut wgpu::RenderPass<'_>,
    ) -> Result<(), GpuError> {
        let model_matrix = self.transform.matrix();
        for material in &mut self.materials {
            ignore_missing(material.set_mat4(names::MODEL_MATRIX, model_matrix))?;
        }
        for renderer in &self.renderers {
            renderer.render(&self.meshes, &mut self.materials, device, queue, targets, pass)?;
        }
        Ok(())
    }
}
