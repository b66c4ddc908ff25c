use alt_face_loops::algs::alternating::select_alternate_loops;
use alt_face_loops::io::PolyMeshReader;
use alt_face_loops::io::gmsh::{GmshReadOptions, GmshReader};
use alt_face_loops::mesh_error::MeshLoopError;
use alt_face_loops::topology::cell_type::FaceKind;
use alt_face_loops::topology::mesh_topology::MeshTopology;
use alt_face_loops::topology::point::{FaceId, VertexId};
use alt_face_loops::topology::validation::{NonManifoldHandling, ValidationOptions};

/// Two quads and a triangle, plus a boundary line and a point element.
const MIXED_MESH: &str = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
7
10 0 0 0
11 1 0 0
12 2 0 0
13 3 0 0
14 0 1 0
15 1 1 0
16 2 1 0
$EndNodes
$Elements
5
1 15 2 0 1 10
2 1 2 0 1 10 11
7 3 2 0 1 10 11 15 14
8 3 2 0 1 11 12 16 15
9 2 2 0 1 12 13 16
$EndElements
"#;

#[test]
fn reads_surface_elements_as_faces() {
    let data = GmshReader.read(MIXED_MESH.as_bytes()).unwrap();
    assert_eq!(data.mesh.vertex_count(), 7);
    assert_eq!(data.mesh.face_count(), 3);
    assert_eq!(data.element_ids, vec![7, 8, 9]);
    assert_eq!(data.node_ids[0], 10);
    assert_eq!(data.position(VertexId::new(5)), Some([1.0, 1.0, 0.0]));
    assert_eq!(data.face_for_element(8), Some(FaceId::new(1)));
    assert_eq!(data.face_for_element(2), None);
    assert_eq!(data.element_for_face(FaceId::new(2)), Some(9));
    assert_eq!(data.mesh.face_kind(FaceId::new(2)), FaceKind::Triangle);
}

#[test]
fn selection_maps_back_to_elements() {
    let data = GmshReader.read(MIXED_MESH.as_bytes()).unwrap();
    let seed = data.face_for_element(7).unwrap();
    let result = select_alternate_loops(&data.mesh, [seed], 0, 3, false).unwrap();
    let elements: Vec<u64> = result
        .selected
        .iter()
        .filter_map(|&f| data.element_for_face(f))
        .collect();
    assert_eq!(elements, vec![7, 8]);
}

#[test]
fn rejects_unsupported_input() {
    let tet = MIXED_MESH.replace("9 2 2 0 1 12 13 16", "9 4 2 0 1 12 13 16 10");
    let err = GmshReader.read(tet.as_bytes()).unwrap_err();
    assert_eq!(
        err,
        MeshLoopError::MeshIoParse("unsupported element type: 4".into())
    );

    let v4 = MIXED_MESH.replace("2.2 0 8", "4.1 0 8");
    assert!(matches!(
        GmshReader.read(v4.as_bytes()),
        Err(MeshLoopError::MeshIoParse(m)) if m.contains("unsupported gmsh version")
    ));

    let binary = MIXED_MESH.replace("2.2 0 8", "2.2 1 8");
    assert!(matches!(
        GmshReader.read(binary.as_bytes()),
        Err(MeshLoopError::MeshIoParse(_))
    ));

    let dangling = MIXED_MESH.replace("12 13 16", "12 13 99");
    let err = GmshReader.read(dangling.as_bytes()).unwrap_err();
    assert!(matches!(err, MeshLoopError::MeshIoParse(ref m) if m.contains("unknown node 99")));

    let truncated = MIXED_MESH.replace("$EndNodes\n", "");
    assert!(GmshReader.read(truncated.as_bytes()).is_err());
}

#[test]
fn validation_options_are_applied() {
    // three quads hinged on the edge between nodes 1 and 2
    let fin = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
8
1 0 0 0
2 1 0 0
3 1 1 0
4 0 1 0
5 0 -1 0
6 1 -1 0
7 0 0 1
8 1 0 1
$EndNodes
$Elements
3
1 3 0 1 2 3 4
2 3 0 2 1 5 6
3 3 0 1 2 8 7
$EndElements
"#;
    assert!(GmshReader.read(fin.as_bytes()).is_ok());
    let strict = GmshReadOptions {
        validation: ValidationOptions {
            non_manifold: NonManifoldHandling::Error,
            ..ValidationOptions::default()
        },
    };
    assert!(matches!(
        GmshReader.read_with_options(fin.as_bytes(), strict),
        Err(MeshLoopError::NonManifoldEdge { incident_faces: 3, .. })
    ));
}
