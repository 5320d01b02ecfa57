//! Asset loading for the glassfall demo.
//!
//! Two external inputs exist: a glTF model supplying the diamond geometry and
//! a raster image for the background. Both have procedural stand-ins so the
//! demo runs without files on disk. Load failures are typed but treated as
//! fatal by the applications; there are no retries.

mod gltf;
mod procedural;

pub use gltf::load_gltf_mesh;
pub use procedural::{gem_mesh, gradient_texture};

use std::path::Path;

/// CPU-side triangle mesh, ready for vertex buffer upload.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Decoded RGBA8 image, ready for texture upload.
#[derive(Debug, Clone)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("glTF error: {0}")]
    Gltf(String),
}

/// Decode an image file to RGBA8.
pub fn load_texture(path: impl AsRef<Path>) -> Result<TextureData, AssetError> {
    let path = path.as_ref();
    let decoded = image::open(path)?.to_rgba8();
    let (width, height) = decoded.dimensions();
    tracing::info!(path = %path.display(), width, height, "background texture loaded");
    Ok(TextureData {
        width,
        height,
        rgba: decoded.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_texture_roundtrip() {
        let tmp = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        let img = image::RgbaImage::from_pixel(8, 4, image::Rgba([10, 20, 30, 255]));
        img.save(tmp.path()).unwrap();

        let tex = load_texture(tmp.path()).unwrap();
        assert_eq!((tex.width, tex.height), (8, 4));
        assert_eq!(tex.rgba.len(), 8 * 4 * 4);
        assert_eq!(&tex.rgba[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn load_texture_missing_file_is_an_error() {
        let err = load_texture("/nonexistent/233.jpg");
        assert!(err.is_err());
    }
}
