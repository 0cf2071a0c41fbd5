//! End-to-end integration tests.
//!
//! These run the full pipeline into a temporary directory and inspect the
//! written GLB and scene manifest.

use std::fs;

use portal_dodeca::config::PipelineConfig;
use portal_dodeca::export::write_portal_glb;
use portal_dodeca::scene::load_room;
use portal_dodeca::types::IndexedMesh;
use portal_dodeca::Pipeline;

#[test]
fn full_pipeline_writes_glb_and_manifest() {
    let tmp = tempfile::tempdir().unwrap();
    let output_dir = tmp.path().join("output");

    let config = PipelineConfig {
        output: Some(output_dir.clone()),
        frames: 30,
        ..Default::default()
    };

    let result = Pipeline::run(&config).expect("pipeline should succeed");
    assert_eq!(result.face_count, 12);
    assert_eq!(result.triangle_count, 36);
    assert_eq!(result.written.len(), 2);

    // portal.glb: one primitive and one material per face
    let glb_path = output_dir.join("portal.glb");
    assert!(glb_path.exists(), "portal.glb should exist");
    let (doc, buffers, _images) = gltf::import(&glb_path).unwrap();
    let mesh = doc.meshes().next().expect("portal GLB should have a mesh");
    assert_eq!(mesh.primitives().count(), 12);
    assert_eq!(doc.materials().count(), 12);

    let mut covered = Vec::new();
    for prim in mesh.primitives() {
        let reader = prim.reader(|buf| Some(&buffers[buf.index()]));
        covered.extend(reader.read_indices().unwrap().into_u32());
    }
    assert_eq!(covered, (0..108).collect::<Vec<u32>>());

    // scene.json
    let json_str = fs::read_to_string(output_dir.join("scene.json")).unwrap();
    let scene: serde_json::Value = serde_json::from_str(&json_str).unwrap();
    assert_eq!(scene["geometry"]["triangles"], 36);
    assert_eq!(scene["settings"]["portal_scale"], 1.5);
    let faces = scene["faces"].as_array().unwrap();
    assert_eq!(faces.len(), 12);
    for (i, face) in faces.iter().enumerate() {
        assert_eq!(face["face"], i);
        assert_eq!(face["group_start"], i * 9);
        assert_eq!(face["group_count"], 9);
    }
    assert_eq!(faces[10]["shape"]["kind"], "empty");
    assert!(faces[0]["spin"][1].as_f64().unwrap() > 0.49);
}

#[test]
fn pipeline_loads_room_model() {
    let tmp = tempfile::tempdir().unwrap();

    // A small two-triangle room written with our own exporter.
    let room_mesh = IndexedMesh {
        positions: vec![
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
        ],
        normals: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
        indices: vec![0, 1, 2, 0, 2, 3],
        ..Default::default()
    };
    let room_path = tmp.path().join("dodeca.glb");
    fs::write(&room_path, write_portal_glb(&room_mesh, &[], 1.0).unwrap()).unwrap();

    let room = load_room(&room_path).unwrap();
    assert_eq!(room.parts.len(), 1);
    assert_eq!(room.triangle_count(), 2);
    assert!(room.parts[0].mesh.has_normals());
    assert!(!room.parts[0].has_occlusion);

    let output_dir = tmp.path().join("out");
    let config = PipelineConfig {
        room: Some(room_path),
        output: Some(output_dir.clone()),
        ..Default::default()
    };
    Pipeline::run(&config).unwrap();

    let json_str = fs::read_to_string(output_dir.join("scene.json")).unwrap();
    let scene: serde_json::Value = serde_json::from_str(&json_str).unwrap();
    assert_eq!(scene["room"]["parts"], 1);
    assert_eq!(scene["room"]["triangles"], 2);
    assert_eq!(scene["room"]["ao_intensity"][0], 0.0);
    assert_eq!(scene["room"]["center"][0], 0.5);
}

#[test]
fn portal_glb_reloads_as_grouped_parts() {
    let tmp = tempfile::tempdir().unwrap();
    let output_dir = tmp.path().join("output");
    let config = PipelineConfig {
        output: Some(output_dir.clone()),
        ..Default::default()
    };
    Pipeline::run(&config).unwrap();

    // The portal GLB read back through the room loader: one part per face.
    let reloaded = load_room(&output_dir.join("portal.glb")).unwrap();
    assert_eq!(reloaded.parts.len(), 12);
    for (face, part) in reloaded.parts.iter().enumerate() {
        assert_eq!(part.mesh.triangle_count(), 3);
        assert_eq!(part.mesh.material_index, Some(face));
        assert_eq!(part.name.as_deref(), Some("portal"));
    }
}

#[test]
fn pipeline_rejects_subdivided_portal() {
    let mut config = PipelineConfig::default();
    config.geometry.detail = 2;

    let err = Pipeline::run(&config).unwrap_err();
    assert!(err.to_string().contains("Invalid detail: 2"));
}
