//! Procedural stand-ins for the two external assets, used when no file is
//! supplied on the command line.

use crate::{MeshData, TextureData};

const GEM_SIDES: usize = 8;
const TABLE_RADIUS: f32 = 0.5;
const TABLE_Y: f32 = 0.6;
const GIRDLE_RADIUS: f32 = 1.0;
const GIRDLE_Y: f32 = 0.0;
const CULET_Y: f32 = -1.2;

/// Flat-shaded faceted gem: octagonal table, crown ring, pavilion to a point.
///
/// Every face gets its own vertices so facet edges stay sharp, which is what
/// the refraction shader needs to read distinct backface normals per facet.
pub fn gem_mesh() -> MeshData {
    let mut mesh = MeshData {
        positions: Vec::new(),
        normals: Vec::new(),
        indices: Vec::new(),
    };

    let ring = |radius: f32, y: f32, i: usize| -> [f32; 3] {
        let theta = std::f32::consts::TAU * i as f32 / GEM_SIDES as f32;
        [radius * theta.cos(), y, radius * theta.sin()]
    };

    for i in 0..GEM_SIDES {
        let j = (i + 1) % GEM_SIDES;
        let table_a = ring(TABLE_RADIUS, TABLE_Y, i);
        let table_b = ring(TABLE_RADIUS, TABLE_Y, j);
        let girdle_a = ring(GIRDLE_RADIUS, GIRDLE_Y, i);
        let girdle_b = ring(GIRDLE_RADIUS, GIRDLE_Y, j);

        // Table fan
        push_face(&mut mesh, [0.0, TABLE_Y, 0.0], table_a, table_b);
        // Crown facet (quad split into two triangles)
        push_face(&mut mesh, table_a, girdle_a, girdle_b);
        push_face(&mut mesh, table_a, girdle_b, table_b);
        // Pavilion facet down to the culet point
        push_face(&mut mesh, girdle_a, [0.0, CULET_Y, 0.0], girdle_b);
    }

    mesh
}

/// Append one flat-shaded triangle, winding it so the face normal points away
/// from the gem's interior (the origin lies inside the body).
fn push_face(mesh: &mut MeshData, a: [f32; 3], b: [f32; 3], c: [f32; 3]) {
    let (mut b, mut c) = (b, c);
    let mut normal = face_normal(a, b, c);
    let centroid = [
        (a[0] + b[0] + c[0]) / 3.0,
        (a[1] + b[1] + c[1]) / 3.0,
        (a[2] + b[2] + c[2]) / 3.0,
    ];
    if dot(normal, centroid) < 0.0 {
        std::mem::swap(&mut b, &mut c);
        normal = [-normal[0], -normal[1], -normal[2]];
    }

    let base = mesh.positions.len() as u32;
    mesh.positions.extend_from_slice(&[a, b, c]);
    mesh.normals.extend_from_slice(&[normal, normal, normal]);
    mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
}

fn face_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> [f32; 3] {
    let u = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let v = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
    [n[0] / len, n[1] / len, n[2] / len]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Vertical dusk gradient used when no background image is supplied.
pub fn gradient_texture(width: u32, height: u32) -> TextureData {
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        let t = y as f32 / (height.max(2) - 1) as f32;
        let r = (30.0 + t * 150.0) as u8;
        let g = (40.0 + t * 90.0) as u8;
        let b = (80.0 + t * 100.0) as u8;
        for _ in 0..width {
            rgba.extend_from_slice(&[r, g, b, 255]);
        }
    }
    TextureData {
        width,
        height,
        rgba,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gem_mesh_is_well_formed() {
        let mesh = gem_mesh();
        // table fan + two crown triangles + pavilion, per side
        assert_eq!(mesh.triangle_count(), GEM_SIDES * 4);
        assert_eq!(mesh.vertex_count(), mesh.indices.len());
        let max = *mesh.indices.iter().max().unwrap() as usize;
        assert!(max < mesh.vertex_count());
    }

    #[test]
    fn gem_normals_are_unit_and_outward() {
        let mesh = gem_mesh();
        for tri in mesh.indices.chunks(3) {
            let n = mesh.normals[tri[0] as usize];
            let len = dot(n, n).sqrt();
            assert!((len - 1.0).abs() < 1e-4);

            let centroid = (0..3).fold([0.0f32; 3], |acc, k| {
                let p = mesh.positions[tri[k] as usize];
                [acc[0] + p[0] / 3.0, acc[1] + p[1] / 3.0, acc[2] + p[2] / 3.0]
            });
            assert!(dot(n, centroid) > 0.0, "inward-facing facet normal");
        }
    }

    #[test]
    fn gem_winding_matches_normals() {
        // Counter-clockwise winding as seen from outside: the geometric
        // normal of the index order must agree with the stored normal.
        let mesh = gem_mesh();
        for tri in mesh.indices.chunks(3) {
            let a = mesh.positions[tri[0] as usize];
            let b = mesh.positions[tri[1] as usize];
            let c = mesh.positions[tri[2] as usize];
            let geometric = face_normal(a, b, c);
            assert!(dot(geometric, mesh.normals[tri[0] as usize]) > 0.99);
        }
    }

    #[test]
    fn gradient_texture_dimensions() {
        let tex = gradient_texture(16, 9);
        assert_eq!(tex.rgba.len(), 16 * 9 * 4);
        // top and bottom rows differ
        assert_ne!(&tex.rgba[..4], &tex.rgba[tex.rgba.len() - 4..]);
    }
}
