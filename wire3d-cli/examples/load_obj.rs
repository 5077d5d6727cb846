/// Example: Load an OBJ file and render it stage by stage
///
/// Usage: cargo run --example load_obj -- path/to/file.obj [out.tga]

use std::env;
use std::error::Error;
use std::process::ExitCode;
use wire3d_core::{obj, RenderConfig, Renderer};

/// Join an error and its sources into one line
fn chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <obj-file> [out.tga]", args[0]);
        return ExitCode::FAILURE;
    }

    let obj_path = &args[1];
    let out_path = args.get(2).map(String::as_str).unwrap_or("sample.tga");

    println!("Loading OBJ file: {}", obj_path);

    let parsed = match obj::load_obj(obj_path) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Failed to read OBJ: {}", chain(&e));
            return ExitCode::FAILURE;
        }
    };

    for warning in &parsed.warnings {
        eprintln!("skipped {}", warning);
    }
    for (i, vertex) in parsed.model.vertices.iter().enumerate() {
        println!("v{}: x:{:.9}, y:{:.9}", i, vertex.position.x, vertex.position.y);
    }
    for (i, face) in parsed.model.faces.iter().enumerate() {
        println!("f{}: {:?}", i, face.indices());
    }

    let renderer = Renderer::new(RenderConfig::default());
    let image = match renderer.render_model(&parsed.model) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Bad mesh: {}", chain(&e));
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = image.save(out_path) {
        eprintln!("Failed to save image: {}", chain(&e));
        return ExitCode::FAILURE;
    }

    println!("Saved {}", out_path);
    ExitCode::SUCCESS
}
