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

mod billboard;
mod cube;
mod cylinder;
mod pyramid;
mod sphere;
mod tetrahedron;

pub use billboard::billboard;
pub use cube::cube;
pub use cylinder::cylinder;
pub use pyramid::pyramid;
pub use sphere::sphere;
pub use tetrahedron::tetrahedron;

use crate::mesh::Vertex;
use khora_core::math::{Vec2, Vec3};

/// Computes a flat per-triangle normal from its three corners, normalizing
/// the cross product of the two outgoing edges (§4.7).
fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize()
}

/// Builds the 3 vertices of one triangle sharing a single flat normal.
fn flat_triangle(positions: [Vec3; 3], uvs: [Vec2; 3]) -> [Vertex; 3] {
    let normal = face_normal(positions[0], positions[1], positions[2]);
    [
        Vertex::new(positions[0], uvs[0], normal),
        Vertex::new(positions[1], uvs[1], normal),
        Vertex::new(positions[2], uvs[2], normal),
    ]
}
