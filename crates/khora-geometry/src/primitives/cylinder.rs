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

//! Cylinder with a fixed segment count: a smooth-shaded side wall between
//! two rings, plus fan-triangulated top and bottom caps sharing one apex
//! vertex each (§4.7).

use std::sync::{Arc, OnceLock};

use khora_core::math::{Vec2, Vec3};

use crate::mesh::{Mesh, Vertex};

/// Number of vertical segments around the side wall.
const SEGMENTS: usize = 8;
const HALF_HEIGHT: f32 = 1.0;
const RADIUS: f32 = 1.0;

static CYLINDER: OnceLock<Arc<Mesh>> = OnceLock::new();

/// Returns the shared cylinder mesh, generating it on first call.
pub fn cylinder() -> Arc<Mesh> {
    CYLINDER.get_or_init(|| Arc::new(build())).clone()
}

fn ring_point(segment: usize, y: f32) -> Vec3 {
    let angle = segment as f32 / SEGMENTS as f32 * std::f32::consts::TAU;
    Vec3::new(angle.cos() * RADIUS, y, angle.sin() * RADIUS)
}

fn side_uv(segment: usize, y: f32) -> Vec2 {
    let angle = segment as f32 / SEGMENTS as f32 * std::f32::consts::TAU;
    Vec2::new(angle / std::f32::consts::TAU, y)
}

fn build() -> Mesh {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Side wall: one ring of vertices per segment boundary plus a repeated
    // seam vertex, so the UV wraps cleanly across the last segment.
    let top_start = vertices.len() as u32;
    for i in 0..=SEGMENTS {
        let pos = ring_point(i, HALF_HEIGHT);
        let normal = Vec3::new(pos.x, 0.0, pos.z).normalize();
        vertices.push(Vertex::new(pos, side_uv(i, HALF_HEIGHT), normal));
    }
    let bottom_start = vertices.len() as u32;
    for i in 0..=SEGMENTS {
        let pos = ring_point(i, -HALF_HEIGHT);
        let normal = Vec3::new(pos.x, 0.0, pos.z).normalize();
        vertices.push(Vertex::new(pos, side_uv(i, -HALF_HEIGHT), normal));
    }
    for i in 0..SEGMENTS as u32 {
        let top_a = top_start + i;
        let top_b = top_start + i + 1;
        let bot_a = bottom_start + i;
        let bot_b = bottom_start + i + 1;
        indices.extend([top_a, bot_a, bot_b, bot_b, top_b, top_a]);
    }

    build_cap(&mut vertices, &mut indices, HALF_HEIGHT, Vec3::Y);
    build_cap(&mut vertices, &mut indices, -HALF_HEIGHT, -Vec3::Y);

    Mesh::new(vertices, indices)
}

/// Fan-triangulates one cap from a center apex to its perimeter ring, so
/// every triangle shares that one apex vertex.
fn build_cap(vertices: &mut Vec<Vertex>, indices: &mut Vec<u32>, y: f32, normal: Vec3) {
    let apex_index = vertices.len() as u32;
    let apex_uv = Vec2::new(0.5, 0.5);
    vertices.push(Vertex::new(Vec3::new(0.0, y, 0.0), apex_uv, normal));

    let ring_start = vertices.len() as u32;
    for i in 0..SEGMENTS {
        let pos = ring_point(i, y);
        let uv = Vec2::new(
            0.5 + pos.x / (2.0 * RADIUS),
            0.5 + pos.z / (2.0 * RADIUS),
        );
        vertices.push(Vertex::new(pos, uv, normal));
    }

    let winding_up = normal.y > 0.0;
    for i in 0..SEGMENTS as u32 {
        let a = ring_start + i;
        let b = ring_start + (i + 1) % SEGMENTS as u32;
        if winding_up {
            indices.extend([apex_index, a, b]);
        } else {
            indices.extend([apex_index, b, a]);
        }
    }
}
