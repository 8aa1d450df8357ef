use csbloader::prelude::*;
use csbloader::utils::BoyerMoore;
use pretty_assertions::assert_eq;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// A minimal single-group file as the game's tooling lays it out.
fn minimal_csb() -> Vec<u8> {
    let mut data = vec![0u8; 0x4E];
    data.extend_from_slice(b"Collision\0Floor\0\0\0");
    data.extend_from_slice(&(1u32 << 16).to_le_bytes());
    data.extend_from_slice(&[0, 0, 0, 0]);

    let mut header = vec![0u8; 0x7C];
    header[0..4].copy_from_slice(&3i32.to_le_bytes());
    header[0x18..0x20].copy_from_slice(b"DEADBEEF");
    data.extend_from_slice(&header);
    data.extend_from_slice(&[0u8; 36]);
    for v in [0.0f32, 4.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0] {
        data.extend_from_slice(&v.to_le_bytes());
    }
    data.extend_from_slice(&[0u8; 36]);
    data
}

fn corners(vertices: &[Vector3], indices: [i32; 3]) -> Tri {
    let [a, b, c] = indices.map(|i| vertices[i as usize]);
    Tri::from_corners(indices, [a, b, c])
}

fn level() -> CollisionBinary {
    let floor = vec![
        Vector3::new(-8.0, 0.0, -8.0),
        Vector3::new(8.0, 0.0, -8.0),
        Vector3::new(8.0, 0.0, 8.0),
        Vector3::new(-8.0, 0.0, 8.0),
    ];
    let wall = vec![
        Vector3::new(-8.0, 0.0, -8.0),
        Vector3::new(-8.0, 3.25, -8.0),
        Vector3::new(8.0, 0.0, -8.0),
    ];
    let all: Vec<Vector3> = floor.iter().chain(&wall).copied().collect();

    CollisionBinary {
        vertex_groups: vec![
            VertexGroup {
                header: VertexGroupHeader::new(0, "DEADBEEF", [0; 6], 0, 0),
                bounding_box: BoundingBox::from_vertices(&all).unwrap(),
                vertices: Vec::new(),
                tris: Vec::new(),
                other_vector: Some(Vector3::new(0.0, -1.0, 0.0)),
                violation: None,
            },
            VertexGroup {
                header: VertexGroupHeader::new(1, "Floor", [0x3FC, 0, 5, 1, 0, 0], 4, 2),
                bounding_box: BoundingBox::from_vertices(&floor).unwrap(),
                tris: vec![corners(&floor, [0, 2, 1]), corners(&floor, [0, 3, 2])],
                vertices: floor,
                other_vector: None,
                violation: None,
            },
            VertexGroup {
                header: VertexGroupHeader::new(2, "Wall", [0xA, 0, 5, 0, 2, 0], 3, 1),
                bounding_box: BoundingBox::from_vertices(&wall).unwrap(),
                tris: vec![corners(&wall, [0, 1, 2])],
                vertices: wall,
                other_vector: None,
                violation: None,
            },
        ],
        other_vectors: Vec::new(),
        is_serializable: true,
    }
}

#[test]
fn test_minimal_single_group_file() {
    init_tracing();
    let binary = parse_csb_bytes(&minimal_csb()).unwrap();

    assert_eq!(binary.vertex_groups.len(), 1);
    let group = &binary.vertex_groups[0];
    assert!(group.vertices.is_empty());
    assert_eq!(group.other_vector, Some(Vector3::new(0.0, 4.0, 0.0)));
    assert_eq!(binary.other_vectors.len(), 3);
    assert!(binary.is_serializable);
}

#[test]
fn test_csb_round_trip() {
    init_tracing();
    let binary = level();
    let bytes = serialize_csb(&binary).unwrap();
    let decoded = parse_csb_bytes(&bytes).unwrap();

    assert_eq!(decoded, binary);
    assert_eq!(serialize_csb(&decoded).unwrap(), bytes);
}

#[test]
fn test_mesh_round_trip() {
    init_tracing();
    let binary = level();
    let obj = to_obj_string(&binary).unwrap();
    let imported = parse_obj_str(&obj).unwrap();

    assert_eq!(imported, binary);
}

#[test]
fn test_wall_label_scenario() {
    let obj = "v 0 0 0\nv 0 1 0\nv 1 0 0\no 01_Wall [A:0:5::2:]\nf 1 2 3\n";
    let binary = parse_obj_str(obj).unwrap();

    let header = &binary.vertex_groups[0].header;
    assert_eq!(header.group_index, 1);
    assert_eq!(header.group_name, "Wall");
    assert_eq!(header.metadata(), [0xA, 0, 5, 0, 2, 0]);

    let exported = to_obj_string(&binary).unwrap();
    assert!(exported.contains("\no 01_Wall [A::5::2:]\n"));
}

#[test]
fn test_zero_face_reference() {
    let obj = "v 0 0 0\nv 0 1 0\nv 1 0 0\no 01_Wall\nf 0 1 2\n";
    let err = parse_obj_str(obj).unwrap_err();

    assert!(matches!(err, Error::VertexOutOfRange { line: 5, .. }));
    assert_eq!(
        err.to_string(),
        "line 5: vertex reference \"0\" is out of range (valid 1-indexed range is 1..=3)"
    );
}

#[test]
fn test_converter_pipeline() {
    init_tracing();
    let bytes = serialize_csb(&level()).unwrap();

    let obj = converter::csb_to_obj(&bytes).unwrap();
    assert_eq!(converter::obj_to_csb(&obj).unwrap(), bytes);

    let report = verify_round_trip(&bytes).unwrap();
    assert!(report.is_faithful());
    assert!(report.is_serializable);
}

#[test]
fn test_rebuilt_file_is_not_serializable() {
    init_tracing();
    // Same content, string table pushed off its canonical offset
    let mut bytes = vec![0u8; 8];
    bytes.extend_from_slice(&serialize_csb(&level()).unwrap());

    let binary = parse_csb_bytes(&bytes).unwrap();
    assert!(!binary.is_serializable);
    assert_eq!(binary.vertex_groups.len(), 3);

    let obj = to_obj_string(&binary).unwrap();
    assert!(obj.contains("\no 00_DEADBEEF\n"));
    assert!(!parse_obj_str(&obj).unwrap().is_serializable);

    let report = verify_round_trip(&bytes).unwrap();
    assert_eq!(report.first_difference, None);
}

#[test]
fn test_big_endian_revision() {
    let mut data = minimal_csb();
    data[0x60..0x64].copy_from_slice(&(1u32 << 16).to_be_bytes());

    let binary = parse_csb_bytes_with_options(&data, &CsbReadOptions::big_endian_header()).unwrap();
    assert_eq!(binary.vertex_groups.len(), 1);
    assert_eq!(binary.vertex_groups[0].other_vector, Some(Vector3::new(0.0, 4.0, 0.0)));
}

#[test]
fn test_marker_search() {
    let finder = BoyerMoore::new(b"Collision");
    for size in [9usize, 10, 64, 300] {
        for at in [0, size - 9] {
            let mut haystack = vec![b'C'; size];
            haystack[at..at + 9].copy_from_slice(b"Collision");
            assert_eq!(finder.find(&haystack), Some(at), "size {size}, planted at {at}");
        }
    }
    assert_eq!(finder.find(b"CollisionCollision"), Some(0));
    assert_eq!(finder.find(b"Collisio"), None);
}
