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

//! Square pyramid: 5 corners expanded to 18 non-indexed vertices (a base
//! quad split in two, plus four triangular sides), each face keeping its
//! own flat normal (§4.7).

use std::sync::{Arc, OnceLock};

use khora_core::math::Vec2;

use super::flat_triangle;
use crate::mesh::Mesh;

static PYRAMID: OnceLock<Arc<Mesh>> = OnceLock::new();

/// Returns the shared unit pyramid mesh, generating it on first call.
pub fn pyramid() -> Arc<Mesh> {
    PYRAMID.get_or_init(|| Arc::new(build())).clone()
}

fn build() -> Mesh {
    use khora_core::math::Vec3;

    let apex = Vec3::new(0.0, 1.0, 0.0);
    let back_left = Vec3::new(-1.0, -1.0, -1.0);
    let back_right = Vec3::new(1.0, -1.0, -1.0);
    let front_right = Vec3::new(1.0, -1.0, 1.0);
    let front_left = Vec3::new(-1.0, -1.0, 1.0);

    let faces = [
        // Base, split into two triangles.
        [back_left, back_right, front_right],
        [back_left, front_right, front_left],
        // Sides.
        [apex, back_right, back_left],
        [apex, front_right, back_right],
        [apex, front_left, front_right],
        [apex, back_left, front_left],
    ];

    let base_uvs = [
        [Vec2::new(0.5, 0.0), Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0)],
        [Vec2::new(0.5, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)],
    ];
    let side_uvs = [Vec2::new(0.5, 1.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];

    let mut vertices = Vec::with_capacity(18);
    vertices.extend(flat_triangle(faces[0], base_uvs[0]));
    vertices.extend(flat_triangle(faces[1], base_uvs[1]));
    for face in &faces[2..] {
        vertices.extend(flat_triangle(*face, side_uvs));
    }

    let indices = (0..vertices.len() as u32).collect();
    Mesh::new(vertices, indices)
}
