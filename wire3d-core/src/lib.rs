/// wire3d Core Library - Offline wireframe rendering
///
/// This library reads Wavefront OBJ meshes, fan-triangulates their faces,
/// projects them orthographically onto a pixel grid, draws triangle outlines
/// with Bresenham lines, and writes the result as an uncompressed TGA image.

pub mod error;
pub mod geometry;
pub mod image;
pub mod obj;
pub mod palette;
pub mod pipeline;
pub mod projection;
pub mod raster;
pub mod tga;

// Re-export commonly used types
pub use error::{IntegrityError, ObjError, PipelineError, TgaError};
pub use geometry::{Face, FaceList, Mesh, Triangle, Vertex, VertexList};
pub use image::{ImageBuffer, PixelColor};
pub use obj::{load_obj, parse_obj, parse_obj_str, ObjModel, ObjParser, ParseWarning, ParsedObj};
pub use pipeline::{RenderConfig, RenderSummary, Renderer};
pub use projection::Viewport;
