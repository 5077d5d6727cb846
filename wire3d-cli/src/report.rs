/// Colored run summaries for the terminal
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use std::path::Path;
use wire3d_core::RenderSummary;

/// Write a short summary of a mesh render
pub fn write_summary<W: Write>(
    writer: &mut W,
    summary: &RenderSummary,
    output: &Path,
) -> std::io::Result<()> {
    writer.queue(SetForegroundColor(Color::Green))?;
    writer.queue(Print(format!("Rendered {}\n", output.display())))?;
    writer.queue(ResetColor)?;
    writer.queue(Print(format!(
        "  {} vertices, {} faces, {} triangles\n",
        summary.vertices, summary.faces, summary.triangles
    )))?;

    if !summary.warnings.is_empty() {
        writer.queue(SetForegroundColor(Color::Yellow))?;
        writer.queue(Print(format!(
            "  {} malformed lines skipped\n",
            summary.warnings.len()
        )))?;
        for warning in &summary.warnings {
            writer.queue(Print(format!("    {}\n", warning)))?;
        }
        writer.queue(ResetColor)?;
    }

    writer.flush()
}

/// Write a one-line note about an image written by a non-mesh command
pub fn write_saved<W: Write>(writer: &mut W, what: &str, output: &Path) -> std::io::Result<()> {
    writer.queue(SetForegroundColor(Color::Green))?;
    writer.queue(Print(format!("Wrote {} to {}\n", what, output.display())))?;
    writer.queue(ResetColor)?;
    writer.flush()
}

/// Write a fatal error with its full cause chain
pub fn write_error<W: Write>(writer: &mut W, err: &anyhow::Error) -> std::io::Result<()> {
    writer.queue(SetForegroundColor(Color::Red))?;
    writer.queue(Print("error: "))?;
    writer.queue(ResetColor)?;
    writer.queue(Print(format!("{err:#}\n")))?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use wire3d_core::{parse_obj_str, PipelineError, Renderer};

    #[test]
    fn test_error_names_failing_stage() {
        let parsed = parse_obj_str("v 0 0\nv 1 0\nv 0 1\nf 1 2 999\n");
        let result: anyhow::Result<_> = Renderer::default()
            .render_model(&parsed.model)
            .map_err(PipelineError::from)
            .context("failed to render mesh.obj");

        let mut out = Vec::new();
        write_error(&mut out, &result.unwrap_err()).unwrap();
        let text = String::from_utf8_lossy(&out);

        assert!(text.contains("error: "));
        assert!(text.contains(
            "failed to render mesh.obj: mesh resolution failed: face 0 references vertex 998"
        ));
    }

    #[test]
    fn test_summary_lists_warnings() {
        let parsed = parse_obj_str("v 0 0\nv bad\n");
        let summary = RenderSummary {
            vertices: 1,
            faces: 0,
            triangles: 0,
            warnings: parsed.warnings,
        };

        let mut out = Vec::new();
        write_summary(&mut out, &summary, Path::new("out.tga")).unwrap();
        let text = String::from_utf8_lossy(&out);

        assert!(text.contains("Rendered out.tga"));
        assert!(text.contains("1 vertices, 0 faces, 0 triangles"));
        assert!(text.contains("1 malformed lines skipped"));
        assert!(text.contains("line 2: malformed vertex record `v bad`"));
    }
}
