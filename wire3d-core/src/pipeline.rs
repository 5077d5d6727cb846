/// Wireframe render pipeline: mesh file in, TGA image out
use std::path::Path;

use log::info;

use crate::error::{IntegrityError, PipelineError};
use crate::geometry::Mesh;
use crate::image::{ImageBuffer, PixelColor};
use crate::obj::{self, ObjModel, ParseWarning};
use crate::palette;
use crate::projection::Viewport;
use crate::raster;

/// Output size and line color for a render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub width: u16,
    pub height: u16,
    pub color: PixelColor,
}

impl RenderConfig {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_color(mut self, color: PixelColor) -> Self {
        self.color = color;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            color: palette::RED,
        }
    }
}

/// What a full pipeline run produced
#[derive(Debug, Clone, Default)]
pub struct RenderSummary {
    pub vertices: usize,
    pub faces: usize,
    pub triangles: usize,
    pub warnings: Vec<ParseWarning>,
}

/// Draws meshes as wireframes with an orthographic projection
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Draw every triangle of `mesh` into a fresh black image
    pub fn render_mesh(&self, mesh: &Mesh) -> ImageBuffer {
        let mut image = ImageBuffer::new(self.config.width, self.config.height);
        let viewport = Viewport::for_image(&image);

        for triangle in &mesh.triangles {
            let [v0, v1, v2] = &triangle.vertices;
            let points = [
                viewport.project(&v0.position),
                viewport.project(&v1.position),
                viewport.project(&v2.position),
            ];
            raster::draw_triangle(&mut image, points, self.config.color);
        }

        image
    }

    /// Triangulate a parsed model and draw it
    pub fn render_model(&self, model: &ObjModel) -> Result<ImageBuffer, IntegrityError> {
        let mesh = model.to_mesh()?;
        Ok(self.render_mesh(&mesh))
    }

    /// Run the whole pipeline: parse `mesh_path`, resolve, draw, and write
    /// the image to `image_path`.
    ///
    /// Malformed lines in the mesh do not stop the render; they are returned
    /// in the summary.
    pub fn render_file<P, Q>(&self, mesh_path: P, image_path: Q) -> Result<RenderSummary, PipelineError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let parsed = obj::load_obj(mesh_path.as_ref())?;
        info!(
            "parsed {}: {} vertices, {} faces, {} skipped lines",
            mesh_path.as_ref().display(),
            parsed.model.vertices.len(),
            parsed.model.faces.len(),
            parsed.warnings.len()
        );

        let mesh = parsed.model.to_mesh()?;
        let image = self.render_mesh(&mesh);
        image.save(image_path)?;

        Ok(RenderSummary {
            vertices: parsed.model.vertices.len(),
            faces: parsed.model.faces.len(),
            triangles: mesh.triangles.len(),
            warnings: parsed.warnings,
        })
    }
}
