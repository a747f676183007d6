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

use khora_core::math::{Vec2, Vec3};
use khora_core::renderer::api::{AttributeSemantic, DataType, RequiredAttributes, VertexBufferLayout};

/// One vertex of a generated primitive (§4.7): position, uv, normal, tangent,
/// bitangent and a per-instance entity id slot.
///
/// `tangent`/`bitangent` are zeroed by every generator here, matching the
/// convention that tangent-space vectors are filled in downstream once a
/// material actually needs them. `entity_id` is likewise left at `0`; the
/// mesh render system stamps the real id into a per-draw copy before upload,
/// since a cached primitive is shared across every entity that uses it.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub uv: Vec2,
    pub normal: Vec3,
    pub tangent: Vec3,
    pub bitangent: Vec3,
    pub entity_id: i32,
}

impl Vertex {
    pub fn new(position: Vec3, uv: Vec2, normal: Vec3) -> Self {
        Self {
            position,
            uv,
            normal,
            tangent: Vec3::ZERO,
            bitangent: Vec3::ZERO,
            entity_id: 0,
        }
    }
}

/// A generated primitive: a flat, non-indexed or indexed triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    pub(crate) fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The vertex buffer layout every generator here produces, in attribute
    /// order matching [`Vertex`]'s field order.
    pub fn layout() -> VertexBufferLayout {
        VertexBufferLayout::packed(&[
            (AttributeSemantic::Position, DataType::Vec3),
            (AttributeSemantic::Uv0, DataType::Vec2),
            (AttributeSemantic::Normal, DataType::Vec3),
            (AttributeSemantic::Tangent, DataType::Vec3),
            (AttributeSemantic::Bitangent, DataType::Vec3),
            (AttributeSemantic::EntityId, DataType::Int),
        ])
        .expect("primitive vertex layout is never empty")
    }

    /// The attribute set every generator here supplies.
    pub fn provided_attributes() -> RequiredAttributes {
        let mut attrs = RequiredAttributes::NONE;
        attrs.insert(AttributeSemantic::Position);
        attrs.insert(AttributeSemantic::Uv0);
        attrs.insert(AttributeSemantic::Normal);
        attrs.insert(AttributeSemantic::Tangent);
        attrs.insert(AttributeSemantic::Bitangent);
        attrs.insert(AttributeSemantic::EntityId);
        attrs
    }
}
