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

//! Vertex arrays: the draw-ready binding of vertex buffers plus an index
//! buffer to their attribute layouts (§3).

use super::arena::Handle;
use super::buffer::{IndexBufferHandle, VertexBufferHandle, VertexBufferLayout};
use super::common::RequiredAttributes;

/// Marker type for [`Handle<VertexArray>`].
#[derive(Debug)]
pub struct VertexArray;
/// A reference-counted handle to a GPU vertex array object.
pub type VertexArrayHandle = Handle<VertexArray>;

/// Describes how to build a vertex array: the vertex buffers it binds (each
/// with the layout captured at bind time — §3's invariant), the index
/// buffer, and the provided-attribute bitset primitives use to test
/// compatibility with a shader program (§4.3).
#[derive(Debug)]
pub struct VertexArrayDescriptor {
    /// Vertex buffers bound to this array, paired with their layout.
    pub vertex_buffers: Vec<(VertexBufferHandle, VertexBufferLayout)>,
    /// The index buffer driving draw calls against this array.
    pub index_buffer: IndexBufferHandle,
    /// The union of attribute semantics supplied across all bound layouts.
    pub provided_attributes: RequiredAttributes,
}
