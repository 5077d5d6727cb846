//! End-to-end runs of the render pipeline through real files.

use std::fs;
use std::path::Path;

use wire3d_core::{palette, parse_obj_str, tga, ImageBuffer, PipelineError, PixelColor, RenderConfig, Renderer};

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn renders_triangle_to_tga() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = write(dir.path(), "triangle.obj", "v -1 -1\nv 1 -1\nv 0 1\nf 1 2 3\n");
    let out = dir.path().join("triangle.tga");

    let renderer = Renderer::new(RenderConfig::new(100, 100).with_color(palette::GREEN));
    let summary = renderer.render_file(&mesh, &out).unwrap();

    assert_eq!(summary.vertices, 3);
    assert_eq!(summary.faces, 1);
    assert_eq!(summary.triangles, 1);
    assert!(summary.warnings.is_empty());

    let bytes = fs::read(&out).unwrap();
    assert_eq!(bytes.len(), 18 + 100 * 100 * 3);
    assert_eq!(&bytes[12..18], &[100, 0, 100, 0, 24, 0x20]);

    let image = tga::load(&out).unwrap();
    assert!((0..100).any(|x| image.get_pixel(x, 0) == Some(palette::GREEN)));
    assert!((0..100).any(|x| image.get_pixel(x, 99) == Some(palette::GREEN)));
}

#[test]
fn pentagon_yields_three_triangles() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = write(
        dir.path(),
        "pentagon.obj",
        "v 0 1\nv 0.95 0.31\nv 0.59 -0.81\nv -0.59 -0.81\nv -0.95 0.31\nf 1 2 3 4 5\n",
    );
    let out = dir.path().join("pentagon.tga");

    let summary = Renderer::default().render_file(&mesh, &out).unwrap();
    assert_eq!(summary.faces, 1);
    assert_eq!(summary.triangles, 3);
}

#[test]
fn malformed_lines_still_produce_image() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = write(
        dir.path(),
        "noisy.obj",
        "# square with junk\nv -0.5 -0.5\nv 0.5 -0.5\nv garbage\nv 0.5 0.5\nv -0.5 0.5\nf 1 2 3 4\nf 1 ? 3\n",
    );
    let out = dir.path().join("noisy.tga");

    let summary = Renderer::default().render_file(&mesh, &out).unwrap();
    assert_eq!(summary.vertices, 4);
    assert_eq!(summary.triangles, 2);
    assert_eq!(summary.warnings.len(), 2);
    assert_eq!(summary.warnings[0].line, 4);
    assert_eq!(summary.warnings[1].line, 8);
    assert!(out.exists());
}

#[test]
fn out_of_range_face_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let mut contents = String::new();
    for i in 0..10 {
        contents.push_str(&format!("v 0.{i} 0.{i}\n"));
    }
    contents.push_str("f 1 2 999\n");
    let mesh = write(dir.path(), "broken.obj", &contents);
    let out = dir.path().join("broken.tga");

    let err = Renderer::default().render_file(&mesh, &out).unwrap_err();
    assert!(matches!(err, PipelineError::Resolve(_)));
    assert!(err.to_string().starts_with("mesh resolution failed"));
    assert!(!out.exists());
}

#[test]
fn missing_mesh_is_ingestion_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Renderer::default()
        .render_file(dir.path().join("absent.obj"), dir.path().join("out.tga"))
        .unwrap_err();
    assert!(matches!(err, PipelineError::Ingest(_)));
}

#[test]
fn unwritable_output_is_encode_error() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = write(dir.path(), "triangle.obj", "v -1 -1\nv 1 -1\nv 0 1\nf 1 2 3\n");
    let err = Renderer::default()
        .render_file(&mesh, dir.path().join("no/such/dir/out.tga"))
        .unwrap_err();
    assert!(matches!(err, PipelineError::Encode(_)));
}

#[test]
fn save_overwrites_and_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("pattern.tga");
    fs::write(&out, vec![0xAA; 4096]).unwrap();

    let mut image = ImageBuffer::new(7, 5);
    for y in 0..5 {
        for x in 0..7 {
            image.set_pixel(x, y, PixelColor::new((x * 30) as u8, (y * 50) as u8, (x + y) as u8));
        }
    }
    image.save(&out).unwrap();

    assert_eq!(fs::metadata(&out).unwrap().len(), 18 + 7 * 5 * 3);
    let decoded = tga::load(&out).unwrap();
    for y in 0..5 {
        for x in 0..7 {
            assert_eq!(decoded.get_pixel(x, y), image.get_pixel(x, y));
        }
    }
}

#[test]
fn huge_coordinates_render_without_walking_off_canvas() {
    let parsed = parse_obj_str("v 0 0\nv 1e30 0\nv 0 0.5\nf 1 2 3\n");
    let renderer = Renderer::new(RenderConfig::new(100, 100).with_color(palette::WHITE));
    let image = renderer.render_model(&parsed.model).unwrap();

    // the edge toward the far vertex runs along row 49 to the right border
    assert!((49..100).all(|x| image.get_pixel(x, 49) == Some(palette::WHITE)));
}
