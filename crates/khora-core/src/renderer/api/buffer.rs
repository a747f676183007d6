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

//! Vertex and index buffers, and the attribute layout that binds a vertex
//! buffer's bytes to a shader program's attributes (§3).

use super::arena::Handle;
use super::common::{AttributeSemantic, DataType, IndexFormat};
use crate::khora_bitflags;

khora_bitflags! {
    /// A set of flags describing the allowed usages of a buffer.
    pub struct BufferUsage: u32 {
        /// The buffer can be bound as a vertex buffer.
        const VERTEX = 1 << 0;
        /// The buffer can be bound as an index buffer.
        const INDEX = 1 << 1;
        /// The buffer can be bound as a shader storage buffer.
        const STORAGE = 1 << 2;
        /// The buffer's contents may be rewritten after creation.
        const DYNAMIC = 1 << 3;
    }
}

/// A single named, typed attribute within a [`VertexBufferLayout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexAttribute {
    /// The semantic this attribute binds to in a shader program.
    pub semantic: AttributeSemantic,
    /// The scalar type of the attribute.
    pub data_type: DataType,
    /// Byte offset from the start of the vertex to this attribute.
    pub offset: u32,
}

/// The ordered list of attributes packed into each vertex of a buffer,
/// plus the computed stride between vertices.
#[derive(Debug, Clone, Default)]
pub struct VertexBufferLayout {
    /// Byte size of one vertex.
    pub stride: u32,
    /// Attributes in the order they appear within a vertex.
    pub attributes: Vec<VertexAttribute>,
}

impl VertexBufferLayout {
    /// Builds a layout from semantics in order, computing tightly packed
    /// offsets and the total stride. Fails (returns `None`) if `semantics`
    /// is empty — a layout with no attributes corresponds to spec's
    /// `buffer-layout-empty`.
    pub fn packed(semantics: &[(AttributeSemantic, DataType)]) -> Option<Self> {
        if semantics.is_empty() {
            return None;
        }
        let mut attributes = Vec::with_capacity(semantics.len());
        let mut offset = 0u32;
        for &(semantic, data_type) in semantics {
            attributes.push(VertexAttribute {
                semantic,
                data_type,
                offset,
            });
            offset += data_type.size_bytes();
        }
        Some(Self {
            stride: offset,
            attributes,
        })
    }
}

/// Marker type for [`Handle<VertexBuffer>`].
#[derive(Debug)]
pub struct VertexBuffer;
/// A reference-counted handle to a GPU vertex buffer.
pub type VertexBufferHandle = Handle<VertexBuffer>;

/// Marker type for [`Handle<IndexBuffer>`].
#[derive(Debug)]
pub struct IndexBuffer;
/// A reference-counted handle to a GPU index buffer.
pub type IndexBufferHandle = Handle<IndexBuffer>;

/// Describes the element count and index width of an index buffer (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBufferDescriptor {
    /// Number of indices the buffer holds.
    pub count: u32,
    /// Width of each index.
    pub format: IndexFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_layout_computes_offsets_and_stride() {
        let layout = VertexBufferLayout::packed(&[
            (AttributeSemantic::Position, DataType::Vec3),
            (AttributeSemantic::Uv0, DataType::Vec2),
            (AttributeSemantic::Normal, DataType::Vec3),
        ])
        .unwrap();

        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[2].offset, 20);
        assert_eq!(layout.stride, 32);
    }

    #[test]
    fn empty_layout_is_rejected() {
        assert!(VertexBufferLayout::packed(&[]).is_none());
    }
}
