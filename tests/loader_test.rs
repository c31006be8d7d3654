mod common;

use common::test_utils::asset_root;
use float_eq::assert_float_eq;
use render_tutorial::{
    GpuError,
    resources::{
        load_string,
        loader::{ModelData, ModelLoader},
        material_factory::MaterialParams,
    },
};

const QUAD_OBJ: &str = "\
mtllib quad.mtl
o quad
v -1 0 -1
v 1 0 -1
v 1 0 1
v -1 0 1
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 1 0
usemtl tiles
f 1/1/1 2/2/1 3/3/1 4/4/1
";

const QUAD_MTL: &str = "\
newmtl tiles
Ka 0.1 0.1 0.1
Kd 0.6 0.5 0.4
Ks 0.9 0.8 0.7
Ns 64
map_Kd tiles.png
";

#[test]
fn obj_should_import_geometry_and_materials() {
    let data = ModelData::from_obj_str("models/quad.obj", QUAD_OBJ, Some(QUAD_MTL)).unwrap();

    assert_eq!(data.meshes.len(), 1);
    let mesh = &data.meshes[0];
    assert_eq!(mesh.name, "quad");
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.indices.len(), 6, "the quad face should be triangulated");
    assert_eq!(mesh.tex_coords.len(), 1);
    assert!(mesh.normals.iter().all(|n| *n == [0.0, 1.0, 0.0]));

    assert_eq!(
        data.materials,
        vec![MaterialParams {
            name: "tiles".into(),
            ambient: [0.1, 0.1, 0.1],
            diffuse: [0.6, 0.5, 0.4],
            specular: [0.9, 0.8, 0.7],
            shininess: 64.0,
            diffuse_texture: Some("models/tiles.png".into()),
        }]
    );
    assert_eq!(data.material_indices, vec![0]);
}

#[test]
fn obj_without_material_library_should_use_the_default_material() {
    let data = ModelData::from_obj_str("quad.obj", QUAD_OBJ, None).unwrap();
    assert_eq!(data.materials, vec![MaterialParams::default()]);
    assert_eq!(data.material_indices, vec![0]);
}

#[test]
fn missing_uvs_should_become_a_zero_channel() {
    let obj = "\
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1
";
    let data = ModelData::from_obj_str("triangle.obj", obj, None).unwrap();
    assert_eq!(data.meshes[0].tex_coords, vec![vec![[0.0, 0.0]; 3]]);
}

#[test]
fn missing_normals_should_be_generated_from_faces() {
    let obj = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";
    let data = ModelData::from_obj_str("flat.obj", obj, None).unwrap();
    for normal in &data.meshes[0].normals {
        assert_float_eq!(*normal, [0.0, 0.0, 1.0], abs_all <= 1e-6);
    }
}

#[test]
fn generated_normals_should_weigh_faces_by_area() {
    // A large triangle facing +Z and a small one facing +X share the origin.
    let obj = "\
v 0 0 0
v 2 0 0
v 0 2 0
v 0 1 0
v 0 0 1
f 1 2 3
f 1 4 5
";
    let data = ModelData::from_obj_str("fold.obj", obj, None).unwrap();
    let mesh = &data.meshes[0];
    let origin = mesh
        .positions
        .iter()
        .position(|p| *p == [0.0, 0.0, 0.0])
        .unwrap();
    let length = 17.0f32.sqrt();
    assert_float_eq!(
        mesh.normals[origin],
        [1.0 / length, 0.0, 4.0 / length],
        abs_all <= 1e-6
    );
    let corner = mesh.positions.iter().position(|p| *p == [0.0, 0.0, 1.0]).unwrap();
    assert_float_eq!(mesh.normals[corner], [1.0, 0.0, 0.0], abs_all <= 1e-6);
}

#[test]
fn empty_obj_should_be_rejected() {
    let err = ModelData::from_obj_str("empty.obj", "# nothing\n", None).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GpuError>(),
        Some(GpuError::InvalidModel(_))
    ));
}

#[test]
fn empty_objects_should_be_skipped() {
    let obj = "\
o triangle
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1
o nothing
";
    let data = ModelData::from_obj_str("mixed.obj", obj, None).unwrap();
    assert_eq!(data.meshes.len(), 1);
    assert_eq!(data.meshes[0].name, "triangle");
    assert_eq!(data.material_indices, vec![0]);
}

#[test]
fn material_params_should_skip_undeclared_names() {
    let mut uniforms = common::test_utils::uniforms_of(include_str!("../src/shaders/phong.wgsl"));
    MaterialParams::default().apply(&mut uniforms).unwrap();
    assert_eq!(
        uniforms
            .vec3(render_tutorial::data_structures::material::names::AMBIENT_COLOR)
            .unwrap(),
        [0.2, 0.2, 0.2]
    );
}

#[tokio::test]
async fn should_read_the_bundled_figure() {
    let root = asset_root();
    let text = load_string(&root, "models/figure.obj").await.unwrap();
    assert!(text.contains("mtllib figure.mtl"));

    let data = ModelLoader::read(&root, "models/figure.obj").await.unwrap();
    let names: Vec<&str> = data.meshes.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["legs", "torso", "head"]);
    assert_eq!(data.materials.len(), 2);
    let skin = data.materials.iter().position(|m| m.name == "skin").unwrap();
    assert_eq!(data.material_indices[2], skin);
    assert_eq!(
        data.materials[skin].diffuse_texture.as_deref(),
        Some("models/../textures/checker_01.png")
    );

    let top = data
        .meshes
        .iter()
        .flat_map(|m| m.positions.iter())
        .map(|p| p[1])
        .fold(f32::MIN, f32::max);
    assert!((1.6..1.7).contains(&top));
}

#[tokio::test]
async fn unknown_extensions_should_be_rejected() {
    assert!(ModelLoader::read(&asset_root(), "models/figure.fbx").await.is_err());
}

#[tokio::test]
async fn missing_files_should_name_the_path() {
    let err = load_string(&asset_root(), "models/missing.obj").await.unwrap_err();
    assert!(format!("{err:#}").contains("missing.obj"));
}
