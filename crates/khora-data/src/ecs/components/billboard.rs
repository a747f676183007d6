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

//! `Billboard` (§3, §4.6): a quad that orients itself toward the active
//! camera each frame. The geometry flag controls how much of that rotation
//! is free; the vertex array is filled in lazily by the billboard render
//! system from the primitive mesh library the first time the entity is
//! drawn.

use khora_core::ecs::Component;
use khora_core::math::Vec3;
use khora_core::renderer::api::VertexArrayHandle;
use serde::{Deserialize, Serialize};

use crate::ecs::Memento;

/// How a billboard is allowed to rotate to face the camera (§3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BillboardOrientation {
    /// Full free rotation toward the camera.
    AlwaysFaceCamera,
    /// Rotation constrained to spin around the world Y axis only.
    AxisLocked,
    /// Rotation constrained to spin around a caller-supplied axis.
    CustomAxis(Vec3),
}

/// A camera-facing quad (§3). `width`/`height` scale the unit quad before
/// the face-camera rotation is applied (§4.6: `model = T · R_face · S`).
#[derive(Debug, Clone)]
pub struct Billboard {
    /// How the quad is allowed to rotate to face the camera.
    pub orientation: BillboardOrientation,
    /// World-space width of the quad.
    pub width: f32,
    /// World-space height of the quad.
    pub height: f32,
    /// The draw-ready quad geometry, built on first render.
    pub vertex_array: Option<VertexArrayHandle>,
}

impl Component for Billboard {}

impl Billboard {
    /// Creates a billboard with the given size, always facing the camera.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            orientation: BillboardOrientation::AlwaysFaceCamera,
            width,
            height,
            vertex_array: None,
        }
    }
}

/// The persisted shape of a billboard: orientation and size. The vertex
/// array is rebuilt by the render system, never saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillboardData {
    /// See [`Billboard::orientation`].
    pub orientation: BillboardOrientation,
    /// See [`Billboard::width`].
    pub width: f32,
    /// See [`Billboard::height`].
    pub height: f32,
}

impl Memento for Billboard {
    type Data = BillboardData;

    fn save(&self) -> BillboardData {
        BillboardData {
            orientation: self.orientation,
            width: self.width,
            height: self.height,
        }
    }

    fn restore(data: BillboardData) -> Self {
        Self {
            orientation: data.orientation,
            width: data.width,
            height: data.height,
            vertex_array: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_billboard_has_no_vertex_array_yet() {
        let b = Billboard::new(2.0, 1.0);
        assert!(b.vertex_array.is_none());
        assert_eq!(b.orientation, BillboardOrientation::AlwaysFaceCamera);
    }

    #[test]
    fn memento_drops_vertex_array() {
        let b = Billboard::new(2.0, 1.0);
        let restored = Billboard::restore(b.save());
        assert!(restored.vertex_array.is_none());
        assert_eq!(restored.width, 2.0);
    }
}
