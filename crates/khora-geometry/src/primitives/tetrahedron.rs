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

//! Regular tetrahedron: 4 corners expanded to 12 non-indexed vertices, one
//! flat normal per face (§4.7).

use std::sync::{Arc, OnceLock};

use khora_core::math::{Vec2, Vec3};

use super::flat_triangle;
use crate::mesh::Mesh;

static TETRAHEDRON: OnceLock<Arc<Mesh>> = OnceLock::new();

/// Returns the shared unit tetrahedron mesh, generating it on first call.
pub fn tetrahedron() -> Arc<Mesh> {
    TETRAHEDRON.get_or_init(|| Arc::new(build())).clone()
}

fn build() -> Mesh {
    let v0 = Vec3::new(-1.0, -1.0, -1.0);
    let v1 = Vec3::new(1.0, -1.0, 1.0);
    let v2 = Vec3::new(-1.0, 1.0, 1.0);
    let v3 = Vec3::new(1.0, 1.0, -1.0);

    let faces = [[v0, v1, v2], [v0, v2, v3], [v0, v3, v1], [v1, v3, v2]];
    let face_uvs = [
        [Vec2::new(0.5, 1.0), Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)],
        [Vec2::new(1.0, 0.5), Vec2::new(1.0, 1.0), Vec2::new(0.0, 0.0)],
        [Vec2::new(0.0, 0.5), Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)],
        [Vec2::new(0.0, 1.0), Vec2::new(1.0, 1.0), Vec2::new(0.5, 0.0)],
    ];

    let mut vertices = Vec::with_capacity(12);
    for (face, uvs) in faces.into_iter().zip(face_uvs) {
        vertices.extend(flat_triangle(face, uvs));
    }

    let indices = (0..vertices.len() as u32).collect();
    Mesh::new(vertices, indices)
}
