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

//! Unit cube: 8 corners expanded to 36 non-indexed vertices so every face
//! keeps its own flat normal (§4.7).

use std::sync::{Arc, OnceLock};

use khora_core::math::{Vec2, Vec3};

use super::flat_triangle;
use crate::mesh::Mesh;

static CUBE: OnceLock<Arc<Mesh>> = OnceLock::new();

/// Returns the shared unit cube mesh, generating it on first call.
pub fn cube() -> Arc<Mesh> {
    CUBE.get_or_init(|| Arc::new(build())).clone()
}

fn build() -> Mesh {
    const H: f32 = 0.5;

    let a0 = Vec3::new(H, H, H);
    let a1 = Vec3::new(-H, H, H);
    let a2 = Vec3::new(-H, -H, H);
    let a3 = Vec3::new(H, -H, H);
    let a4 = Vec3::new(H, H, -H);
    let a5 = Vec3::new(-H, H, -H);
    let a6 = Vec3::new(-H, -H, -H);
    let a7 = Vec3::new(H, -H, -H);

    // Two triangles per face, in face order: front, bottom, back, top, right, left.
    let faces = [
        [a1, a2, a3, a3, a0, a1],
        [a2, a6, a7, a7, a3, a2],
        [a6, a5, a4, a4, a7, a6],
        [a5, a1, a0, a0, a4, a5],
        [a0, a3, a7, a7, a4, a0],
        [a5, a6, a2, a2, a1, a5],
    ];

    let face_uvs = [
        Vec2::new(0.0, 1.0),
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];

    let mut vertices = Vec::with_capacity(36);
    for face in faces {
        vertices.extend(flat_triangle(
            [face[0], face[1], face[2]],
            [face_uvs[0], face_uvs[1], face_uvs[2]],
        ));
        vertices.extend(flat_triangle(
            [face[3], face[4], face[5]],
            [face_uvs[3], face_uvs[4], face_uvs[5]],
        ));
    }

    let indices = (0..vertices.len() as u32).collect();
    Mesh::new(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_36_non_indexed_vertices() {
        let mesh = cube();
        assert_eq!(mesh.vertices().len(), 36);
        assert_eq!(mesh.indices().len(), 36);
    }

    #[test]
    fn every_triangle_normal_points_outward() {
        let mesh = cube();
        for tri in mesh.vertices().chunks(3) {
            let centroid = (tri[0].position + tri[1].position + tri[2].position) * (1.0 / 3.0);
            assert!(tri[0].normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn repeated_calls_share_the_cached_mesh() {
        assert!(Arc::ptr_eq(&cube(), &cube()));
    }
}
