use render_tutorial::{
    GpuError,
    data_structures::{
        mesh::{MeshAttribute, MeshDescriptor, VertexAttributeKind},
        vertex_array::VertexArray,
    },
    resources::primitives,
};

fn triangle() -> MeshDescriptor {
    MeshDescriptor {
        name: "triangle".into(),
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        normals: vec![[0.0, 0.0, 1.0]; 3],
        colors: None,
        indices: vec![0, 1, 2],
        tex_coords: Vec::new(),
    }
}

#[test]
fn interleaved_attributes_should_share_a_slot() {
    let mut vertex_array = VertexArray::new();
    vertex_array
        .enable_attribute(0, 0, wgpu::VertexFormat::Float32x3, 24, 0)
        .unwrap();
    vertex_array
        .enable_attribute(0, 1, wgpu::VertexFormat::Float32x3, 24, 12)
        .unwrap();

    assert_eq!(vertex_array.slot_count(), 1);
    assert_eq!(vertex_array.stride(0), Some(24));
    assert_eq!(vertex_array.locations(), vec![0, 1]);
    assert_eq!(vertex_array.layouts()[0].attributes.len(), 2);
}

#[test]
fn vertex_array_should_reject_invalid_layouts() {
    let mut vertex_array = VertexArray::new();
    let float3 = wgpu::VertexFormat::Float32x3;

    assert!(matches!(
        vertex_array.enable_attribute(0, 0, float3, 0, 0),
        Err(GpuError::InvalidVertexLayout(_))
    ));
    assert!(matches!(
        vertex_array.enable_attribute(0, 0, float3, 12, 4),
        Err(GpuError::InvalidVertexLayout(_))
    ));
    assert!(matches!(
        vertex_array.enable_attribute(1, 0, float3, 12, 0),
        Err(GpuError::InvalidVertexLayout(_))
    ));

    vertex_array.enable_attribute(0, 0, float3, 12, 0).unwrap();
    assert!(matches!(
        vertex_array.enable_attribute(1, 0, float3, 12, 0),
        Err(GpuError::InvalidVertexLayout(_))
    ));
    assert!(matches!(
        vertex_array.enable_attribute(0, 1, float3, 24, 0),
        Err(GpuError::InvalidVertexLayout(_))
    ));
}

#[test]
fn equal_layouts_should_share_a_key() {
    let build = |stride| {
        let mut vertex_array = VertexArray::new();
        vertex_array
            .enable_attribute(0, 0, wgpu::VertexFormat::Float32x3, stride, 0)
            .unwrap();
        vertex_array.key()
    };
    assert_eq!(build(12), build(12));
    assert_ne!(build(12), build(16));
}

#[test]
fn attributes_should_follow_position_normal_color_uv_order() {
    let mut mesh = triangle();
    assert_eq!(
        mesh.attributes(),
        vec![
            MeshAttribute {
                location: 0,
                kind: VertexAttributeKind::Position
            },
            MeshAttribute {
                location: 1,
                kind: VertexAttributeKind::Normal
            },
        ]
    );

    mesh.tex_coords.push(vec![[0.0, 0.0]; 3]);
    assert_eq!(mesh.attributes()[2].kind, VertexAttributeKind::TexCoord(0));
    assert_eq!(mesh.attributes()[2].location, 2);

    mesh.colors = Some(vec![[1.0; 4]; 3]);
    let kinds: Vec<_> = mesh.attributes().iter().map(|a| (a.location, a.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            (0, VertexAttributeKind::Position),
            (1, VertexAttributeKind::Normal),
            (2, VertexAttributeKind::Color),
            (3, VertexAttributeKind::TexCoord(0)),
        ]
    );
}

#[test]
fn validate_should_catch_inconsistent_streams() {
    assert!(triangle().validate().is_ok());

    let mut no_normals = triangle();
    no_normals.normals.clear();
    assert!(matches!(no_normals.validate(), Err(GpuError::InvalidMesh { .. })));

    let mut short_uvs = triangle();
    short_uvs.tex_coords.push(vec![[0.0, 0.0]; 2]);
    assert!(short_uvs.validate().is_err());

    let mut bad_index = triangle();
    bad_index.indices.push(3);
    let err = bad_index.validate().unwrap_err();
    assert!(err.to_string().contains("index 3 out of range"));

    let mut too_many_channels = triangle();
    too_many_channels.tex_coords = vec![vec![[0.0, 0.0]; 3]; 5];
    assert!(too_many_channels.validate().is_err());
}

#[test]
fn cube_should_have_a_flat_face_per_side() {
    let cube = primitives::cube(2.0);
    assert!(cube.validate().is_ok());
    assert_eq!(cube.vertex_count(), 24);
    assert_eq!(cube.indices.len(), 36);
    assert_eq!(cube.tex_coords.len(), 1);
    assert!(
        cube.positions
            .iter()
            .all(|p| p.iter().all(|v| v.abs() == 1.0))
    );
    for face in 0..6 {
        let normals = &cube.normals[face * 4..face * 4 + 4];
        assert!(normals.iter().all(|n| n == &normals[0]));
    }
}

#[test]
fn plane_should_face_up_and_tile_its_uvs() {
    let plane = primitives::plane(10.0);
    assert!(plane.validate().is_ok());
    assert_eq!(plane.vertex_count(), 4);
    assert!(plane.positions.iter().all(|p| p[1] == 0.0));
    assert!(plane.normals.iter().all(|n| *n == [0.0, 1.0, 0.0]));
    assert!(plane.tex_coords[0].contains(&[10.0, 10.0]));
}

#[test]
fn quad_should_face_the_viewer() {
    let quad = primitives::quad(1.0);
    assert!(quad.validate().is_ok());
    assert!(quad.positions.iter().all(|p| p[2] == 0.0));
    assert!(quad.normals.iter().all(|n| *n == [0.0, 0.0, 1.0]));
}
