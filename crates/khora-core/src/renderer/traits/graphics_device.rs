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

//! The backend contract every graphics API implementation must satisfy
//! (§6). A concrete `GraphicsDevice` (the OpenGL reference backend lives in
//! `khora-infra`) owns the resource arenas and all state the §4.3/§4.4
//! contracts describe; this trait is the factory and operation surface the
//! rest of the engine programs against.

use crate::error::EngineResult;
use crate::math::{Extent3D, Origin3D};
use crate::renderer::api::{
    BufferUsage, FramebufferDescriptor, FramebufferHandle, IndexBufferHandle, PixelValue,
    SetOutcome, ShaderProgramHandle, ShaderReflection, ShaderSources, Texture2DDescriptor,
    Texture2DHandle, TextureSource, UniformValue, VertexArrayDescriptor, VertexArrayHandle,
    VertexBufferHandle,
};
use std::fmt::Debug;

/// The central point of interaction with the underlying graphics API.
///
/// All methods execute on the single main thread (§5); implementations are
/// not required to be internally synchronized beyond what `Send + Sync`
/// demands for storage in shared engine state.
pub trait GraphicsDevice: Send + Sync + Debug {
    /// Creates a vertex buffer holding `data`, tagged with `usage`.
    fn create_vertex_buffer(&self, data: &[u8], usage: BufferUsage) -> EngineResult<VertexBufferHandle>;

    /// Creates an index buffer holding `data` as packed `u32` indices.
    fn create_index_buffer(&self, data: &[u32], usage: BufferUsage) -> EngineResult<IndexBufferHandle>;

    /// Binds a set of vertex buffers (with their layouts) and an index
    /// buffer into a draw-ready vertex array (§3).
    fn create_vertex_array(&self, descriptor: VertexArrayDescriptor) -> EngineResult<VertexArrayHandle>;

    /// Rewrites `layout`'s backing buffer in place, e.g. for dynamically
    /// generated geometry.
    fn write_vertex_buffer(&self, buffer: &VertexBufferHandle, offset: u64, data: &[u8]) -> EngineResult<()>;

    /// Compiles and links a shader program from `sources`, then reflects its
    /// uniforms and attributes (§4.3). Fails with `shader-creation-failed`
    /// carrying the offending line number when known.
    fn create_shader_program(&self, sources: &ShaderSources) -> EngineResult<(ShaderProgramHandle, ShaderReflection)>;

    /// Writes `value` to uniform `name` on `program`, consulting the
    /// program's own uniform cache so equal values cause no upload (§4.3).
    /// Array values always upload, bypassing the cache. A `name` absent
    /// from the program's reflection is a no-op that returns
    /// [`SetOutcome::UnknownUniform`].
    fn set_uniform(&self, program: &ShaderProgramHandle, name: &str, value: UniformValue) -> SetOutcome;

    /// Binds shader storage buffer `index` of `program` to buffer `buffer`.
    /// Fails with `out-of-range` if `index` exceeds the program's declared
    /// storage buffer list (§4.3).
    fn bind_storage_buffer(&self, program: &ShaderProgramHandle, index: u32, buffer: &VertexBufferHandle) -> EngineResult<()>;

    /// Constructs a 2D texture from `source` (§6).
    fn create_texture2d(&self, source: TextureSource) -> EngineResult<(Texture2DHandle, Texture2DDescriptor)>;

    /// Constructs a framebuffer per `descriptor` (§4.4).
    fn create_framebuffer(&self, descriptor: FramebufferDescriptor) -> EngineResult<FramebufferHandle>;

    /// Makes `framebuffer` the current render target.
    fn bind_framebuffer(&self, framebuffer: &FramebufferHandle);

    /// Restores the default render target.
    fn unbind_framebuffer(&self);

    /// Reallocates every attachment of `framebuffer` to `(width, height)`,
    /// discarding existing contents. Fails with `framebuffer-resize-failed`
    /// if either dimension is zero or exceeds [`GraphicsDevice::max_viewport_dims`].
    fn resize_framebuffer(&self, framebuffer: &FramebufferHandle, width: u32, height: u32) -> EngineResult<()>;

    /// Reads one pixel of `framebuffer`'s attachment `attachment_index`.
    fn get_pixel(&self, framebuffer: &FramebufferHandle, attachment_index: usize, x: u32, y: u32) -> EngineResult<PixelValue>;

    /// Clears `framebuffer`'s attachment `attachment_index` to `value`.
    fn clear_attachment(&self, framebuffer: &FramebufferHandle, attachment_index: usize, value: PixelValue) -> EngineResult<()>;

    /// Issues an indexed draw call against `vertex_array` using `program`,
    /// assuming the relevant framebuffer is already bound.
    fn draw_indexed(&self, vertex_array: &VertexArrayHandle, program: &ShaderProgramHandle, index_count: u32);

    /// Writes a region of `texture`'s pixels.
    fn write_texture(&self, texture: &Texture2DHandle, data: &[u8], offset: Origin3D, size: Extent3D) -> EngineResult<()>;

    /// The maximum supported viewport dimensions, read once at init time
    /// from `GL_MAX_VIEWPORT_DIMS` on the OpenGL reference backend (§6).
    fn max_viewport_dims(&self) -> (u32, u32);
}
