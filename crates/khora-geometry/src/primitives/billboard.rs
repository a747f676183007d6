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

//! A single 2-triangle quad facing `+Z`, corners wound origin-top-left
//! (§4.7). Orienting it toward a camera each frame is the billboard render
//! system's job, not this generator's.

use std::sync::{Arc, OnceLock};

use khora_core::math::{Vec2, Vec3};

use super::flat_triangle;
use crate::mesh::Mesh;

static BILLBOARD: OnceLock<Arc<Mesh>> = OnceLock::new();

/// Returns the shared billboard quad mesh, generating it on first call.
pub fn billboard() -> Arc<Mesh> {
    BILLBOARD.get_or_init(|| Arc::new(build())).clone()
}

fn build() -> Mesh {
    let bottom_left = Vec3::new(-0.5, -0.5, 0.0);
    let bottom_right = Vec3::new(0.5, -0.5, 0.0);
    let top_right = Vec3::new(0.5, 0.5, 0.0);
    let top_left = Vec3::new(-0.5, 0.5, 0.0);

    let uv_bottom_left = Vec2::new(0.0, 1.0);
    let uv_bottom_right = Vec2::new(1.0, 1.0);
    let uv_top_right = Vec2::new(1.0, 0.0);
    let uv_top_left = Vec2::new(0.0, 0.0);

    let mut vertices = Vec::with_capacity(6);
    vertices.extend(flat_triangle(
        [bottom_left, bottom_right, top_right],
        [uv_bottom_left, uv_bottom_right, uv_top_right],
    ));
    vertices.extend(flat_triangle(
        [top_right, top_left, bottom_left],
        [uv_top_right, uv_top_left, uv_bottom_left],
    ));

    let indices = (0..vertices.len() as u32).collect();
    Mesh::new(vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billboard_is_two_triangles() {
        let mesh = billboard();
        assert_eq!(mesh.vertices().len(), 6);
        assert_eq!(mesh.indices().len(), 6);
    }

    #[test]
    fn faces_positive_z() {
        let mesh = billboard();
        for vertex in mesh.vertices() {
            assert_eq!(vertex.normal, Vec3::Z);
        }
    }

    #[test]
    fn corner_uvs_are_origin_top_left() {
        let mesh = billboard();
        assert_eq!(mesh.vertices()[0].uv, Vec2::new(0.0, 1.0));
        assert_eq!(mesh.vertices()[1].uv, Vec2::new(1.0, 1.0));
        assert_eq!(mesh.vertices()[2].uv, Vec2::new(1.0, 0.0));
        assert_eq!(mesh.vertices()[4].uv, Vec2::new(0.0, 0.0));
    }
}
