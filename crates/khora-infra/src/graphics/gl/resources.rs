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

//! The backend-side resource records the arenas in [`super::device::GlDevice`]
//! hold, and the small type-mapping helpers between `khora-core`'s
//! backend-agnostic enums and `glow`'s GL constants.

use std::collections::HashMap;
use std::sync::Mutex;

use glow::HasContext;
use khora_core::math::{Vec2, Vec3, Vec4};
use khora_core::renderer::api::{
    AttributeSemantic, ColorAttachmentFormat, DataType, FramebufferDescriptor, TextureFormat, UniformCache,
};

pub struct GlBuffer {
    pub raw: glow::Buffer,
}

pub struct GlVertexArray {
    pub raw: glow::VertexArray,
    /// Keeps the bound vertex/index buffers alive for as long as the array
    /// references them; the arena handles are never read again after bind.
    pub vertex_buffers: Vec<khora_core::renderer::api::VertexBufferHandle>,
    pub index_buffer: khora_core::renderer::api::IndexBufferHandle,
}

pub struct GlShaderProgram {
    pub raw: glow::Program,
    pub uniform_locations: HashMap<String, glow::UniformLocation>,
    pub cache: Mutex<UniformCache>,
    /// Crude storage-block count, since `glow` doesn't expose GL 4.3's
    /// program-interface query for `GL_SHADER_STORAGE_BLOCK` resources.
    /// Counted textually from the source at link time (see
    /// [`count_storage_blocks`]) rather than reflected from the driver.
    pub storage_block_count: u32,
}

pub struct GlTexture {
    pub raw: glow::Texture,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

pub struct GlFramebuffer {
    pub raw: glow::Framebuffer,
    pub color_textures: Vec<(glow::Texture, ColorAttachmentFormat)>,
    pub depth_renderbuffer: Option<glow::Renderbuffer>,
    pub descriptor: FramebufferDescriptor,
}

/// Counts `buffer` storage-block declarations in GLSL source, e.g.
/// `layout(std430, binding = 0) buffer ParticleData { ... };`. A
/// line-oriented scan, not a parser: good enough to bound
/// `bind_storage_buffer`'s index against, not to validate GLSL.
pub fn count_storage_blocks(source: &str) -> u32 {
    source
        .lines()
        .filter(|line| {
            let trimmed = line.trim_start();
            !trimmed.starts_with("//") && trimmed.contains("buffer ") && trimmed.contains("layout")
        })
        .count() as u32
}

/// Maps an engine [`DataType`] to the `(component_count, gl_scalar_type)`
/// pair `vertex_attrib_pointer` and `uniform*` calls expect.
pub fn gl_scalar(data_type: DataType) -> (i32, u32) {
    match data_type {
        DataType::Float => (1, glow::FLOAT),
        DataType::Vec2 => (2, glow::FLOAT),
        DataType::Vec3 => (3, glow::FLOAT),
        DataType::Vec4 => (4, glow::FLOAT),
        DataType::Int => (1, glow::INT),
        DataType::Bool => (1, glow::INT),
        DataType::Mat4 => (16, glow::FLOAT),
    }
}

/// The attribute location a program is expected to bind a semantic to,
/// fixed at link time via `bind_attrib_location` so every program agrees
/// on layout regardless of GLSL source order (§4.3's cross-program
/// attribute-location stability).
pub fn attribute_location(semantic: AttributeSemantic) -> u32 {
    match semantic {
        AttributeSemantic::Position => 0,
        AttributeSemantic::Normal => 1,
        AttributeSemantic::Tangent => 2,
        AttributeSemantic::Bitangent => 3,
        AttributeSemantic::Uv0 => 4,
        AttributeSemantic::LightmapUv => 5,
        AttributeSemantic::EntityId => 6,
    }
}

pub fn gl_internal_format(format: ColorAttachmentFormat) -> (i32, u32, u32) {
    match format {
        ColorAttachmentFormat::Rgba8 => (glow::RGBA8 as i32, glow::RGBA, glow::UNSIGNED_BYTE),
        ColorAttachmentFormat::RedInteger32 => (glow::R32I as i32, glow::RED_INTEGER, glow::INT),
    }
}

pub fn gl_texture_format(format: TextureFormat) -> (i32, u32) {
    match format {
        TextureFormat::R8 => (glow::R8 as i32, glow::RED),
        TextureFormat::Rg8 => (glow::RG8 as i32, glow::RG),
        // Matches the original decoder's use of GL_RG16 as both the
        // internal and pixel-transfer format for 2-channel sources.
        TextureFormat::Rg16 => (glow::RG16 as i32, glow::RG16),
        TextureFormat::Rgb8 => (glow::RGB8 as i32, glow::RGB),
        TextureFormat::Rgba8 => (glow::RGBA8 as i32, glow::RGBA),
    }
}

/// Flattens a `Mat4` into 16 floats in column-major order, matching GLSL's
/// native layout, so it can be handed to `uniform_matrix_4_f32_slice`
/// without a transpose.
pub fn mat4_to_array(m: &khora_core::math::Mat4) -> [f32; 16] {
    let mut out = [0.0f32; 16];
    for (col_index, col) in m.cols.iter().enumerate() {
        out[col_index * 4] = col.x;
        out[col_index * 4 + 1] = col.y;
        out[col_index * 4 + 2] = col.z;
        out[col_index * 4 + 3] = col.w;
    }
    out
}

pub fn vec2_to_array(v: Vec2) -> [f32; 2] {
    [v.x, v.y]
}

pub fn vec3_to_array(v: Vec3) -> [f32; 3] {
    [v.x, v.y, v.z]
}

pub fn vec4_to_array(v: Vec4) -> [f32; 4] {
    [v.x, v.y, v.z, v.w]
}

/// Deletes every GL object a framebuffer owns, color attachments and depth
/// renderbuffer alike. Called from the arena's release closure and from
/// `resize_framebuffer`, which tears down and rebuilds attachments in place.
pub unsafe fn delete_framebuffer_attachments(gl: &glow::Context, fbo: &GlFramebuffer) {
    for (texture, _) in &fbo.color_textures {
        gl.delete_texture(*texture);
    }
    if let Some(renderbuffer) = fbo.depth_renderbuffer {
        gl.delete_renderbuffer(renderbuffer);
    }
}
