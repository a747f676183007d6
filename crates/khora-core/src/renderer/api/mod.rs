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

//! Backend-agnostic GPU resource API: buffers, vertex arrays, textures,
//! framebuffers and shader programs (§3, §4.3, §4.4).
//!
//! Every resource is an arena-indexed, reference-counted [`arena::Handle`];
//! the factory methods that create them live on the [`crate::renderer::GraphicsDevice`]
//! trait, whose concrete implementation is a backend crate (e.g. the
//! OpenGL backend in `khora-infra`).

pub mod arena;
pub mod buffer;
pub mod common;
pub mod framebuffer;
pub mod shader;
pub mod texture;
pub mod vertex_array;

pub use arena::{Handle, ResourceArena};
pub use buffer::{
    BufferUsage, IndexBuffer, IndexBufferDescriptor, IndexBufferHandle, VertexAttribute,
    VertexBuffer, VertexBufferHandle, VertexBufferLayout,
};
pub use common::{
    AttributeSemantic, DataType, GraphicsBackendType, IndexFormat, PassFilter, RequiredAttributes,
};
pub use framebuffer::{
    ColorAttachmentFormat, DepthStencilFormat, Framebuffer, FramebufferDescriptor,
    FramebufferHandle, PixelValue,
};
pub use shader::{
    AttributeInfo, SetOutcome, ShaderProgram, ShaderProgramHandle, ShaderReflection,
    ShaderSources, UniformCache, UniformInfo, UniformValue,
};
pub use texture::{
    Texture2D, Texture2DDescriptor, Texture2DHandle, TextureFormat, TextureSource,
};
pub use vertex_array::{VertexArray, VertexArrayDescriptor, VertexArrayHandle};
