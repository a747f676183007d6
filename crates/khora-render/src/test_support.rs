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

//! A `GraphicsDevice` that does nothing, for exercising pipeline/system
//! logic in tests without a real backend.

use khora_core::error::EngineResult;
use khora_core::math::{Extent3D, Origin3D};
use khora_core::renderer::api::{
    BufferUsage, FramebufferDescriptor, FramebufferHandle, Handle, IndexBufferHandle, PixelValue,
    SetOutcome, ShaderProgramHandle, ShaderReflection, ShaderSources, Texture2DDescriptor,
    Texture2DHandle, TextureSource, UniformValue, VertexArrayDescriptor, VertexArrayHandle,
    VertexBufferHandle,
};
use khora_core::renderer::traits::GraphicsDevice;

#[derive(Debug, Default)]
pub struct NullDevice;

impl GraphicsDevice for NullDevice {
    fn create_vertex_buffer(&self, _data: &[u8], _usage: BufferUsage) -> EngineResult<VertexBufferHandle> {
        Ok(Handle::new(0, |_| {}))
    }

    fn create_index_buffer(&self, _data: &[u32], _usage: BufferUsage) -> EngineResult<IndexBufferHandle> {
        Ok(Handle::new(0, |_| {}))
    }

    fn create_vertex_array(&self, _descriptor: VertexArrayDescriptor) -> EngineResult<VertexArrayHandle> {
        Ok(Handle::new(0, |_| {}))
    }

    fn write_vertex_buffer(&self, _buffer: &VertexBufferHandle, _offset: u64, _data: &[u8]) -> EngineResult<()> {
        Ok(())
    }

    fn create_shader_program(&self, _sources: &ShaderSources) -> EngineResult<(ShaderProgramHandle, ShaderReflection)> {
        Ok((Handle::new(0, |_| {}), ShaderReflection::default()))
    }

    fn set_uniform(&self, _program: &ShaderProgramHandle, _name: &str, _value: UniformValue) -> SetOutcome {
        SetOutcome::Uploaded
    }

    fn bind_storage_buffer(&self, _program: &ShaderProgramHandle, _index: u32, _buffer: &VertexBufferHandle) -> EngineResult<()> {
        Ok(())
    }

    fn create_texture2d(&self, _source: TextureSource) -> EngineResult<(Texture2DHandle, Texture2DDescriptor)> {
        unimplemented!("NullDevice does not model textures")
    }

    fn create_framebuffer(&self, _descriptor: FramebufferDescriptor) -> EngineResult<FramebufferHandle> {
        Ok(Handle::new(0, |_| {}))
    }

    fn bind_framebuffer(&self, _framebuffer: &FramebufferHandle) {}

    fn unbind_framebuffer(&self) {}

    fn resize_framebuffer(&self, _framebuffer: &FramebufferHandle, _width: u32, _height: u32) -> EngineResult<()> {
        Ok(())
    }

    fn get_pixel(&self, _framebuffer: &FramebufferHandle, _attachment_index: usize, _x: u32, _y: u32) -> EngineResult<PixelValue> {
        Ok(PixelValue::Float([0.0, 0.0, 0.0, 0.0]))
    }

    fn clear_attachment(&self, _framebuffer: &FramebufferHandle, _attachment_index: usize, _value: PixelValue) -> EngineResult<()> {
        Ok(())
    }

    fn draw_indexed(&self, _vertex_array: &VertexArrayHandle, _program: &ShaderProgramHandle, _index_count: u32) {}

    fn write_texture(&self, _texture: &Texture2DHandle, _data: &[u8], _offset: Origin3D, _size: Extent3D) -> EngineResult<()> {
        Ok(())
    }

    fn max_viewport_dims(&self) -> (u32, u32) {
        (16384, 16384)
    }
}
