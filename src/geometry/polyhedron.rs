//! Convex polyhedron generator.
//!
//! Takes a seed solid (unit vertex table + triangle index table), subdivides
//! every seed triangle, projects the result onto a sphere and emits a
//! non-indexed mesh with positions, normals and spherical UVs.

use std::f64::consts::PI;

use glam::DVec3;
use tracing::debug;

use crate::types::IndexedMesh;

/// Generate a non-indexed polyhedron mesh.
///
/// `vertices` is a flat `[x, y, z, ...]` seed table and `indices` lists seed
/// triangles. Each seed triangle becomes `(detail + 1)^2` output triangles, so
/// the output always holds `indices.len() / 3 * (detail + 1)^2 * 3` vertices.
///
/// Normals are flat per triangle when `detail == 0`, and the normalized
/// sphere direction otherwise.
pub fn generate(vertices: &[f64], indices: &[u32], radius: f64, detail: u32) -> IndexedMesh {
    let mut points: Vec<DVec3> = Vec::new();

    for tri in indices.chunks_exact(3) {
        let a = seed_vertex(vertices, tri[0]);
        let b = seed_vertex(vertices, tri[1]);
        let c = seed_vertex(vertices, tri[2]);
        subdivide_face(a, b, c, detail, &mut points);
    }

    for p in points.iter_mut() {
        *p = p.normalize() * radius;
    }

    let uvs = generate_uvs(&points);

    let positions: Vec<f32> = points
        .iter()
        .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
        .collect();

    let normals = if detail == 0 {
        flat_normals(&positions)
    } else {
        points
            .iter()
            .flat_map(|p| {
                let n = p.normalize_or_zero();
                [n.x as f32, n.y as f32, n.z as f32]
            })
            .collect()
    };

    debug!(
        seed_triangles = indices.len() / 3,
        detail,
        vertices = points.len(),
        "Generated polyhedron"
    );

    IndexedMesh {
        positions,
        normals,
        uvs,
        ..Default::default()
    }
}

fn seed_vertex(vertices: &[f64], index: u32) -> DVec3 {
    let i = index as usize * 3;
    DVec3::new(vertices[i], vertices[i + 1], vertices[i + 2])
}

/// Split triangle `abc` into a `(detail + 1)`-row lerp grid and push the
/// resulting triangles, three vertices each.
fn subdivide_face(a: DVec3, b: DVec3, c: DVec3, detail: u32, out: &mut Vec<DVec3>) {
    let cols = detail as usize + 1;

    // v[i][j]: row i walks from edge ab toward c, column j walks from ac toward bc
    let mut v: Vec<Vec<DVec3>> = Vec::with_capacity(cols + 1);
    for i in 0..=cols {
        let t = i as f64 / cols as f64;
        let aj = a.lerp(c, t);
        let bj = b.lerp(c, t);
        let rows = cols - i;

        let row = (0..=rows)
            .map(|j| {
                if j == 0 && i == cols {
                    aj
                } else {
                    aj.lerp(bj, j as f64 / rows as f64)
                }
            })
            .collect();
        v.push(row);
    }

    for i in 0..cols {
        for j in 0..2 * (cols - i) - 1 {
            let k = j / 2;
            if j % 2 == 0 {
                out.extend_from_slice(&[v[i][k + 1], v[i + 1][k], v[i][k]]);
            } else {
                out.extend_from_slice(&[v[i][k + 1], v[i + 1][k + 1], v[i + 1][k]]);
            }
        }
    }
}

/// Angle around the Y axis, counter-clockwise when looking from above.
fn azimuth(v: DVec3) -> f64 {
    v.z.atan2(-v.x)
}

/// Angle above the XZ plane.
fn inclination(v: DVec3) -> f64 {
    (-v.y).atan2((v.x * v.x + v.z * v.z).sqrt())
}

/// Spherical UVs followed by per-triangle pole and seam fixes.
fn generate_uvs(points: &[DVec3]) -> Vec<f32> {
    let mut uvs: Vec<f64> = Vec::with_capacity(points.len() * 2);
    for &p in points {
        let u = azimuth(p) / 2.0 / PI + 0.5;
        let v = inclination(p) / PI + 0.5;
        uvs.extend_from_slice(&[u, 1.0 - v]);
    }

    correct_uvs(points, &mut uvs);
    correct_seam(&mut uvs);

    uvs.into_iter().map(|v| v as f32).collect()
}

fn correct_uvs(points: &[DVec3], uvs: &mut [f64]) {
    for (tri, tri_uvs) in points.chunks_exact(3).zip(uvs.chunks_exact_mut(6)) {
        let centroid = (tri[0] + tri[1] + tri[2]) / 3.0;
        let azi = azimuth(centroid);

        for (corner, p) in tri.iter().enumerate() {
            let u = &mut tri_uvs[corner * 2];
            if azi < 0.0 && *u == 1.0 {
                *u -= 1.0;
            }
            // Poles have no azimuth of their own; borrow the triangle's.
            if p.x == 0.0 && p.z == 0.0 {
                *u = azi / 2.0 / PI + 0.5;
            }
        }
    }
}

fn correct_seam(uvs: &mut [f64]) {
    for tri_uvs in uvs.chunks_exact_mut(6) {
        let us = [tri_uvs[0], tri_uvs[2], tri_uvs[4]];
        let max = us.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = us.iter().copied().fold(f64::INFINITY, f64::min);

        if max > 0.9 && min < 0.1 {
            for corner in 0..3 {
                if tri_uvs[corner * 2] < 0.2 {
                    tri_uvs[corner * 2] += 1.0;
                }
            }
        }
    }
}

/// One normal per triangle, copied to its three vertices.
fn flat_normals(positions: &[f32]) -> Vec<f32> {
    let mut normals = Vec::with_capacity(positions.len());
    for tri in positions.chunks_exact(9) {
        let pa = DVec3::new(tri[0] as f64, tri[1] as f64, tri[2] as f64);
        let pb = DVec3::new(tri[3] as f64, tri[4] as f64, tri[5] as f64);
        let pc = DVec3::new(tri[6] as f64, tri[7] as f64, tri[8] as f64);

        let n = (pc - pb).cross(pa - pb).normalize_or_zero();
        for _ in 0..3 {
            normals.extend_from_slice(&[n.x as f32, n.y as f32, n.z as f32]);
        }
    }
    normals
}
