/// wire3d - Offline wireframe renderer
///
/// Renders Wavefront OBJ meshes to uncompressed TGA images.
/// Commands:
///   - render <MESH>: draw a mesh as a wireframe
///   - lines: draw the line rasterizer test pattern
use std::io::{stderr, stdout};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use wire3d_core::{palette, PixelColor, RenderConfig, Renderer};
use wire3d_cli::{line_pattern, write_error, write_saved, write_summary};

#[derive(Parser, Debug)]
#[command(name = "wire3d", version, about = "Offline wireframe renderer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an OBJ mesh as a wireframe image
    Render {
        /// Mesh file with coordinates in [-1, 1]
        mesh: PathBuf,

        /// Output image
        #[arg(short, long, default_value = "out.tga")]
        output: PathBuf,

        #[arg(long, default_value_t = 800)]
        width: u16,

        #[arg(long, default_value_t = 800)]
        height: u16,

        /// Line color (black, white, red, green, blue)
        #[arg(long, default_value = "red", value_parser = parse_color)]
        color: PixelColor,
    },

    /// Draw the line rasterizer test pattern
    Lines {
        /// Output image
        #[arg(short, long, default_value = "lines.tga")]
        output: PathBuf,

        /// Canvas width and height
        #[arg(long, default_value_t = 600)]
        size: u16,
    },
}

fn parse_color(s: &str) -> Result<PixelColor, String> {
    s.parse().map_err(|e| {
        let names: Vec<_> = palette::names().collect();
        format!("{e}, expected one of: {}", names.join(", "))
    })
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Render {
            mesh,
            output,
            width,
            height,
            color,
        } => {
            let renderer = Renderer::new(RenderConfig::new(width, height).with_color(color));
            let summary = renderer
                .render_file(&mesh, &output)
                .with_context(|| format!("failed to render {}", mesh.display()))?;
            write_summary(&mut stdout(), &summary, &output)?;
        }
        Command::Lines { output, size } => {
            line_pattern(size)
                .save(&output)
                .with_context(|| format!("failed to write {}", output.display()))?;
            write_saved(&mut stdout(), "line pattern", &output)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Printed directly: the logger may be filtered off
            let _ = write_error(&mut stderr(), &err);
            ExitCode::FAILURE
        }
    }
}
