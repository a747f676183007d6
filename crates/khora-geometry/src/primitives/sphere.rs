// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Icosahedral sphere: start from a 12-vertex, 20-face icosahedron and
//! subdivide, splitting every triangle into four at its edge midpoints,
//! deduplicating midpoints by position and renormalizing onto the unit
//! sphere each pass (§4.7).

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use khora_core::math::{Vec2, Vec3};

use crate::mesh::{Mesh, Vertex};

/// The 12 vertices of a regular icosahedron, built from the golden ratio.
fn icosahedron_vertices() -> Vec<Vec3> {
    let phi = (1.0 + 5.0_f32.sqrt()) * 0.5;
    let a = 1.0_f32;
    let b = 1.0 / phi;

    let raw = [
        (0.0, b, -a),
        (b, a, 0.0),
        (-b, a, 0.0),
        (0.0, b, a),
        (0.0, -b, a),
        (-a, 0.0, b),
        (0.0, -b, -a),
        (a, 0.0, -b),
        (a, 0.0, b),
        (-a, 0.0, -b),
        (b, -a, 0.0),
        (-b, -a, 0.0),
    ];
    raw.into_iter()
        .map(|(x, y, z)| Vec3::new(x, y, z).normalize())
        .collect()
}

/// The 20 faces of the icosahedron above, as index triples.
fn icosahedron_indices() -> Vec<u32> {
    vec![
        0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7,
        1, 8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, 4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9,
        8, 1,
    ]
}

/// Keys a position by its exact bit pattern so the midpoint cache matches
/// the same point produced from either triangle sharing an edge.
fn position_key(p: Vec3) -> (u32, u32, u32) {
    (p.x.to_bits(), p.y.to_bits(), p.z.to_bits())
}

fn subdivide(vertices: &mut Vec<Vec3>, indices: Vec<u32>) -> Vec<u32> {
    let mut midpoints: HashMap<(u32, u32, u32), u32> = HashMap::new();
    let mut midpoint = |vertices: &mut Vec<Vec3>, a: u32, b: u32| -> u32 {
        let mid = ((vertices[a as usize] + vertices[b as usize]) * 0.5).normalize();
        let key = position_key(mid);
        *midpoints.entry(key).or_insert_with(|| {
            vertices.push(mid);
            vertices.len() as u32 - 1
        })
    };

    let mut new_indices = Vec::with_capacity(indices.len() * 4);
    for tri in indices.chunks(3) {
        let (v1, v2, v3) = (tri[0], tri[1], tri[2]);
        let m1 = midpoint(vertices, v1, v2);
        let m2 = midpoint(vertices, v2, v3);
        let m3 = midpoint(vertices, v1, v3);

        new_indices.extend([v1, m1, m3]);
        new_indices.extend([m1, v2, m2]);
        new_indices.extend([m3, m2, v3]);
        new_indices.extend([m1, m2, m3]);
    }
    new_indices
}

fn equirectangular_uv(p: Vec3) -> Vec2 {
    let u = (p.z.atan2(p.x) + std::f32::consts::PI) / std::f32::consts::TAU;
    let v = p.y.clamp(-1.0, 1.0).acos() / std::f32::consts::PI;
    Vec2::new(u, v)
}

fn build(subdivisions: u32) -> Mesh {
    let mut positions = icosahedron_vertices();
    let mut indices = icosahedron_indices();
    for _ in 0..subdivisions {
        indices = subdivide(&mut positions, indices);
    }

    let vertices = positions
        .iter()
        .map(|&p| Vertex::new(p, equirectangular_uv(p), p))
        .collect();
    Mesh::new(vertices, indices)
}

static CACHE: OnceLock<Mutex<HashMap<u32, Arc<Mesh>>>> = OnceLock::new();

/// Returns the shared sphere mesh for `subdivisions`, generating it on the
/// first call for that subdivision level.
pub fn sphere(subdivisions: u32) -> Arc<Mesh> {
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut cache = cache.lock().expect("sphere mesh cache poisoned");
    cache
        .entry(subdivisions)
        .or_insert_with(|| Arc::new(build(subdivisions)))
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_icosahedron_has_12_vertices_and_20_faces() {
        let mesh = sphere(0);
        assert_eq!(mesh.vertices().len(), 12);
        assert_eq!(mesh.indices().len(), 60);
    }

    #[test]
    fn subdivision_quadruples_face_count_and_dedups_midpoints() {
        let mesh = sphere(1);
        // 20 faces -> 80 faces, and exactly 30 new (deduplicated) edge midpoints.
        assert_eq!(mesh.indices().len(), 240);
        assert_eq!(mesh.vertices().len(), 12 + 30);
    }

    #[test]
    fn every_vertex_lies_on_the_unit_sphere() {
        let mesh = sphere(2);
        for v in mesh.vertices() {
            assert!((v.position.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn every_triangle_normal_points_outward() {
        let mesh = sphere(1);
        for tri in mesh.indices().chunks(3) {
            let a = mesh.vertices()[tri[0] as usize].position;
            let b = mesh.vertices()[tri[1] as usize].position;
            let c = mesh.vertices()[tri[2] as usize].position;
            let centroid = (a + b + c) * (1.0 / 3.0);
            let normal = (b - a).cross(c - a).normalize();
            assert!(normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn repeated_calls_at_the_same_level_share_the_cached_mesh() {
        assert!(Arc::ptr_eq(&sphere(1), &sphere(1)));
    }
}
