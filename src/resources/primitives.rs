//! Procedural meshes: a cube, a ground plane and a screen quad.

use crate::data_structures::mesh::MeshDescriptor;

const FACE_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Corners of each face, counter-clockwise seen from outside.
#[rustfmt::skip]
const CUBE_FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
    // front
    ([0.0, 0.0, 1.0], [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]]),
    // top
    ([0.0, 1.0, 0.0], [[-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5]]),
    // back
    ([0.0, 0.0, -1.0], [[0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5]]),
    // bottom
    ([0.0, -1.0, 0.0], [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5]]),
    // left
    ([-1.0, 0.0, 0.0], [[-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5]]),
    // right
    ([1.0, 0.0, 0.0], [[0.5, -0.5, 0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5]]),
];

fn quad_indices(base: u32) -> [u32; 6] {
    [base, base + 1, base + 2, base + 2, base + 3, base]
}

/// A cube of edge length `scale` centred on the origin: 24 vertices, 36 indices.
///
/// Every face has its own vertices so normals and UVs stay per face.
pub fn cube(scale: f32) -> MeshDescriptor {
    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut uvs = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (face, (normal, corners)) in CUBE_FACES.iter().enumerate() {
        positions.extend(corners.iter().map(|c| c.map(|v| v * scale)));
        normals.extend([*normal; 4]);
        uvs.extend(FACE_UVS);
        indices.extend(quad_indices(face as u32 * 4));
    }
    MeshDescriptor {
        name: "cube".into(),
        positions,
        normals,
        colors: None,
        indices,
        tex_coords: vec![uvs],
    }
}

/// A square in the XZ plane facing +Y, with edge length `scale`.
///
/// UVs grow with `scale` so a repeating texture tiles once per unit.
pub fn plane(scale: f32) -> MeshDescriptor {
    let corners = [[-0.5, 0.0, 0.5], [0.5, 0.0, 0.5], [0.5, 0.0, -0.5], [-0.5, 0.0, -0.5]];
    MeshDescriptor {
        name: "plane".into(),
        positions: corners.iter().map(|c: &[f32; 3]| c.map(|v| v * scale)).collect(),
        normals: vec![[0.0, 1.0, 0.0]; 4],
        colors: None,
        indices: quad_indices(0).to_vec(),
        tex_coords: vec![FACE_UVS.iter().map(|uv| uv.map(|v| v * scale)).collect()],
    }
}

/// A square in the XY plane facing +Z, with edge length `scale`. Drawn without a camera it
/// covers `scale / 2` of clip space in each direction.
pub fn quad(scale: f32) -> MeshDescriptor {
    let corners = CUBE_FACES[0].1.map(|c| [c[0] * scale, c[1] * scale, 0.0]);
    MeshDescriptor {
        name: "quad".into(),
        positions: corners.to_vec(),
        normals: vec![[0.0, 0.0, 1.0]; 4],
        colors: None,
        indices: quad_indices(0).to_vec(),
        tex_coords: vec![FACE_UVS.to_vec()],
    }
}
