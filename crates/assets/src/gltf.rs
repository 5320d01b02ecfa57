//! Minimal glTF 2.0 mesh import.
//!
//! Reads the first primitive of the first mesh: POSITION, NORMAL, and the
//! index accessor. Supports the GLB binary container and `.gltf` JSON with
//! external `.bin` buffers. Everything else a full importer would handle
//! (scenes, skins, materials, sparse accessors) is out of scope here.

use crate::{AssetError, MeshData};
use serde_json::Value;
use std::path::Path;

const GLB_MAGIC: [u8; 4] = *b"glTF";
const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;

const COMPONENT_U8: u64 = 5121;
const COMPONENT_U16: u64 = 5123;
const COMPONENT_U32: u64 = 5125;
const COMPONENT_F32: u64 = 5126;

/// Load the diamond geometry from a `.glb` or `.gltf` file.
pub fn load_gltf_mesh(path: impl AsRef<Path>) -> Result<MeshData, AssetError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;

    let (json, glb_bin) = if bytes.len() >= 4 && bytes[..4] == GLB_MAGIC {
        parse_glb(&bytes)?
    } else {
        (serde_json::from_slice::<Value>(&bytes)?, None)
    };

    let buffers = resolve_buffers(&json, glb_bin, path.parent())?;
    let mesh = extract_first_primitive(&json, &buffers)?;
    tracing::info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "glTF mesh loaded"
    );
    Ok(mesh)
}

/// Split a GLB container into its JSON chunk and optional BIN chunk.
fn parse_glb(bytes: &[u8]) -> Result<(Value, Option<Vec<u8>>), AssetError> {
    if bytes.len() < 12 {
        return Err(AssetError::Gltf("GLB header truncated".into()));
    }
    let version = read_u32(bytes, 4)?;
    if version != 2 {
        return Err(AssetError::Gltf(format!("unsupported GLB version {version}")));
    }

    let mut json = None;
    let mut bin = None;
    let mut offset = 12usize;
    while offset + 8 <= bytes.len() {
        let chunk_len = read_u32(bytes, offset)? as usize;
        let chunk_type = read_u32(bytes, offset + 4)?;
        let start = offset + 8;
        let end = start + chunk_len;
        let data = bytes
            .get(start..end)
            .ok_or_else(|| AssetError::Gltf("GLB chunk overruns file".into()))?;
        match chunk_type {
            CHUNK_JSON => json = Some(serde_json::from_slice::<Value>(data)?),
            CHUNK_BIN => bin = Some(data.to_vec()),
            _ => {} // unknown chunks are skipped
        }
        offset = end + (end % 4 != 0) as usize * (4 - end % 4);
    }

    let json = json.ok_or_else(|| AssetError::Gltf("GLB file has no JSON chunk".into()))?;
    Ok((json, bin))
}

/// Materialize every buffer: the GLB BIN chunk for uri-less buffers, sibling
/// files for relative uris. Embedded data uris are not supported.
fn resolve_buffers(
    json: &Value,
    glb_bin: Option<Vec<u8>>,
    base_dir: Option<&Path>,
) -> Result<Vec<Vec<u8>>, AssetError> {
    let Some(entries) = json.get("buffers").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    let mut glb_bin = glb_bin;
    let mut buffers = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry.get("uri").and_then(Value::as_str) {
            None => {
                let bin = glb_bin
                    .take()
                    .ok_or_else(|| AssetError::Gltf("buffer has no uri and no BIN chunk".into()))?;
                buffers.push(bin);
            }
            Some(uri) if uri.starts_with("data:") => {
                return Err(AssetError::Gltf("embedded data uris are not supported".into()));
            }
            Some(uri) => {
                let full = match base_dir {
                    Some(dir) => dir.join(uri),
                    None => Path::new(uri).to_path_buf(),
                };
                buffers.push(std::fs::read(full)?);
            }
        }
    }
    Ok(buffers)
}

fn extract_first_primitive(json: &Value, buffers: &[Vec<u8>]) -> Result<MeshData, AssetError> {
    let primitive = json
        .get("meshes")
        .and_then(Value::as_array)
        .and_then(|m| m.first())
        .and_then(|m| m.get("primitives"))
        .and_then(Value::as_array)
        .and_then(|p| p.first())
        .ok_or_else(|| AssetError::Gltf("file contains no mesh primitive".into()))?;

    let attributes = primitive
        .get("attributes")
        .ok_or_else(|| AssetError::Gltf("primitive has no attributes".into()))?;

    let position_accessor = attributes
        .get("POSITION")
        .and_then(Value::as_u64)
        .ok_or_else(|| AssetError::Gltf("primitive has no POSITION attribute".into()))?;
    let normal_accessor = attributes
        .get("NORMAL")
        .and_then(Value::as_u64)
        .ok_or_else(|| AssetError::Gltf("primitive has no NORMAL attribute".into()))?;

    let positions = read_vec3_accessor(json, buffers, position_accessor)?;
    let normals = read_vec3_accessor(json, buffers, normal_accessor)?;
    if normals.len() != positions.len() {
        return Err(AssetError::Gltf(format!(
            "POSITION/NORMAL count mismatch: {} vs {}",
            positions.len(),
            normals.len()
        )));
    }

    let indices = match primitive.get("indices").and_then(Value::as_u64) {
        Some(accessor) => read_index_accessor(json, buffers, accessor)?,
        // Non-indexed primitive: sequential triangles
        None => (0..positions.len() as u32).collect(),
    };
    if let Some(&max) = indices.iter().max() {
        if max as usize >= positions.len() {
            return Err(AssetError::Gltf(format!(
                "index {max} out of range for {} vertices",
                positions.len()
            )));
        }
    }

    Ok(MeshData {
        positions,
        normals,
        indices,
    })
}

/// Accessor metadata plus the raw bytes of its buffer view.
struct AccessorView<'a> {
    data: &'a [u8],
    offset: usize,
    stride: usize,
    count: usize,
    component_type: u64,
}

fn accessor_view<'a>(
    json: &Value,
    buffers: &'a [Vec<u8>],
    accessor_index: u64,
    expected_type: &str,
    element_size: usize,
) -> Result<AccessorView<'a>, AssetError> {
    let accessor = json
        .get("accessors")
        .and_then(Value::as_array)
        .and_then(|a| a.get(accessor_index as usize))
        .ok_or_else(|| AssetError::Gltf(format!("accessor {accessor_index} missing")))?;

    let ty = accessor.get("type").and_then(Value::as_str).unwrap_or("");
    if ty != expected_type {
        return Err(AssetError::Gltf(format!(
            "accessor {accessor_index}: expected {expected_type}, found {ty}"
        )));
    }

    let view_index = accessor
        .get("bufferView")
        .and_then(Value::as_u64)
        .ok_or_else(|| AssetError::Gltf(format!("accessor {accessor_index} has no bufferView")))?;
    let view = json
        .get("bufferViews")
        .and_then(Value::as_array)
        .and_then(|v| v.get(view_index as usize))
        .ok_or_else(|| AssetError::Gltf(format!("bufferView {view_index} missing")))?;

    let buffer_index = view.get("buffer").and_then(Value::as_u64).unwrap_or(0) as usize;
    let data = buffers
        .get(buffer_index)
        .ok_or_else(|| AssetError::Gltf(format!("buffer {buffer_index} missing")))?;

    let view_offset = view.get("byteOffset").and_then(Value::as_u64).unwrap_or(0) as usize;
    let accessor_offset = accessor.get("byteOffset").and_then(Value::as_u64).unwrap_or(0) as usize;
    let stride = view
        .get("byteStride")
        .and_then(Value::as_u64)
        .map(|s| s as usize)
        .unwrap_or(element_size);
    let count = accessor.get("count").and_then(Value::as_u64).unwrap_or(0) as usize;
    let component_type = accessor
        .get("componentType")
        .and_then(Value::as_u64)
        .unwrap_or(0);

    Ok(AccessorView {
        data,
        offset: view_offset + accessor_offset,
        stride,
        count,
        component_type,
    })
}

fn read_vec3_accessor(
    json: &Value,
    buffers: &[Vec<u8>],
    accessor_index: u64,
) -> Result<Vec<[f32; 3]>, AssetError> {
    let view = accessor_view(json, buffers, accessor_index, "VEC3", 12)?;
    if view.component_type != COMPONENT_F32 {
        return Err(AssetError::Gltf(format!(
            "accessor {accessor_index}: VEC3 component type {} is not f32",
            view.component_type
        )));
    }

    let mut out = Vec::with_capacity(view.count);
    for i in 0..view.count {
        let base = view.offset + i * view.stride;
        out.push([
            read_f32(view.data, base)?,
            read_f32(view.data, base + 4)?,
            read_f32(view.data, base + 8)?,
        ]);
    }
    Ok(out)
}

fn read_index_accessor(
    json: &Value,
    buffers: &[Vec<u8>],
    accessor_index: u64,
) -> Result<Vec<u32>, AssetError> {
    let element_size = |component| match component {
        COMPONENT_U8 => 1,
        COMPONENT_U16 => 2,
        _ => 4,
    };

    // Two-step: fetch once to learn the component type, then honor stride.
    let probe = accessor_view(json, buffers, accessor_index, "SCALAR", 4)?;
    let size = element_size(probe.component_type);
    let view = accessor_view(json, buffers, accessor_index, "SCALAR", size)?;

    let mut out = Vec::with_capacity(view.count);
    for i in 0..view.count {
        let base = view.offset + i * view.stride;
        let value = match view.component_type {
            COMPONENT_U8 => *view
                .data
                .get(base)
                .ok_or_else(|| AssetError::Gltf("index buffer out of range".into()))?
                as u32,
            COMPONENT_U16 => read_u16(view.data, base)? as u32,
            COMPONENT_U32 => read_u32(view.data, base)?,
            other => {
                return Err(AssetError::Gltf(format!(
                    "unsupported index component type {other}"
                )));
            }
        };
        out.push(value);
    }
    Ok(out)
}

fn read_f32(data: &[u8], offset: usize) -> Result<f32, AssetError> {
    let bytes: [u8; 4] = data
        .get(offset..offset + 4)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| AssetError::Gltf("buffer out of range".into()))?;
    Ok(f32::from_le_bytes(bytes))
}

fn read_u32(data: &[u8], offset: usize) -> Result<u32, AssetError> {
    let bytes: [u8; 4] = data
        .get(offset..offset + 4)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| AssetError::Gltf("buffer out of range".into()))?;
    Ok(u32::from_le_bytes(bytes))
}

fn read_u16(data: &[u8], offset: usize) -> Result<u16, AssetError> {
    let bytes: [u8; 2] = data
        .get(offset..offset + 2)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| AssetError::Gltf("buffer out of range".into()))?;
    Ok(u16::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    /// One right triangle with +Z normals, indexed with u16.
    fn triangle_bin() -> Vec<u8> {
        let positions: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let normals: [f32; 9] = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        let indices: [u16; 3] = [0, 1, 2];

        let mut bin = Vec::new();
        for v in positions.iter().chain(normals.iter()) {
            bin.extend_from_slice(&v.to_le_bytes());
        }
        for i in indices {
            bin.extend_from_slice(&i.to_le_bytes());
        }
        bin
    }

    fn triangle_json(buffer_uri: Option<&str>) -> Value {
        let mut buffer = json!({ "byteLength": 78 });
        if let Some(uri) = buffer_uri {
            buffer["uri"] = json!(uri);
        }
        json!({
            "asset": { "version": "2.0" },
            "buffers": [buffer],
            "bufferViews": [
                { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
                { "buffer": 0, "byteOffset": 36, "byteLength": 36 },
                { "buffer": 0, "byteOffset": 72, "byteLength": 6 }
            ],
            "accessors": [
                { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3" },
                { "bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC3" },
                { "bufferView": 2, "componentType": 5123, "count": 3, "type": "SCALAR" }
            ],
            "meshes": [
                { "primitives": [{ "attributes": { "POSITION": 0, "NORMAL": 1 }, "indices": 2 }] }
            ]
        })
    }

    fn build_glb(json: &Value, bin: &[u8]) -> Vec<u8> {
        let mut json_bytes = serde_json::to_vec(json).unwrap();
        while json_bytes.len() % 4 != 0 {
            json_bytes.push(b' ');
        }
        let mut bin_bytes = bin.to_vec();
        while bin_bytes.len() % 4 != 0 {
            bin_bytes.push(0);
        }

        let total = 12 + 8 + json_bytes.len() + 8 + bin_bytes.len();
        let mut glb = Vec::with_capacity(total);
        glb.extend_from_slice(b"glTF");
        glb.extend_from_slice(&2u32.to_le_bytes());
        glb.extend_from_slice(&(total as u32).to_le_bytes());
        glb.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
        glb.extend_from_slice(&CHUNK_JSON.to_le_bytes());
        glb.extend_from_slice(&json_bytes);
        glb.extend_from_slice(&(bin_bytes.len() as u32).to_le_bytes());
        glb.extend_from_slice(&CHUNK_BIN.to_le_bytes());
        glb.extend_from_slice(&bin_bytes);
        glb
    }

    #[test]
    fn loads_glb_triangle() {
        let glb = build_glb(&triangle_json(None), &triangle_bin());
        let mut tmp = tempfile::Builder::new().suffix(".glb").tempfile().unwrap();
        tmp.write_all(&glb).unwrap();

        let mesh = load_gltf_mesh(tmp.path()).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.positions[1], [1.0, 0.0, 0.0]);
        assert_eq!(mesh.normals[2], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn loads_gltf_with_external_bin() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tri.bin"), triangle_bin()).unwrap();
        let gltf_path = dir.path().join("tri.gltf");
        std::fs::write(
            &gltf_path,
            serde_json::to_vec(&triangle_json(Some("tri.bin"))).unwrap(),
        )
        .unwrap();

        let mesh = load_gltf_mesh(&gltf_path).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.indices.len(), 3);
    }

    #[test]
    fn rejects_glb_with_bad_version() {
        let mut glb = build_glb(&triangle_json(None), &triangle_bin());
        glb[4] = 9;
        let mut tmp = tempfile::Builder::new().suffix(".glb").tempfile().unwrap();
        tmp.write_all(&glb).unwrap();
        assert!(matches!(load_gltf_mesh(tmp.path()), Err(AssetError::Gltf(_))));
    }

    #[test]
    fn rejects_out_of_range_indices() {
        // Point the first index past the vertex data
        let mut bin = triangle_bin();
        bin[72..74].copy_from_slice(&7u16.to_le_bytes());
        let glb = build_glb(&triangle_json(None), &bin);
        let mut tmp = tempfile::Builder::new().suffix(".glb").tempfile().unwrap();
        tmp.write_all(&glb).unwrap();
        assert!(matches!(load_gltf_mesh(tmp.path()), Err(AssetError::Gltf(_))));
    }

    #[test]
    fn rejects_file_without_meshes() {
        let glb = build_glb(&json!({ "asset": { "version": "2.0" } }), &[]);
        let mut tmp = tempfile::Builder::new().suffix(".glb").tempfile().unwrap();
        tmp.write_all(&glb).unwrap();
        assert!(matches!(load_gltf_mesh(tmp.path()), Err(AssetError::Gltf(_))));
    }
}
