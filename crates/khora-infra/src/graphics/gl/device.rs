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

//! [`GlDevice`], the OpenGL 4.5 core profile reference [`GraphicsDevice`].
//!
//! Every resource-creating method inserts into an arena behind a `Mutex` and
//! hands the caller a [`Handle`] wired to a release closure that owns a
//! clone of `Inner`'s `Arc` and deletes the underlying GL object on last
//! drop (§3's "destroyed when the last reference drops" rule).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use glow::HasContext;
use khora_core::error::{EngineError, EngineResult};
use khora_core::math::{Extent3D, Origin3D};
use khora_core::platform::window::KhoraWindowHandle;
use khora_core::renderer::api::{
    AttributeInfo, AttributeSemantic, BufferUsage, ColorAttachmentFormat, DataType, DepthStencilFormat, Framebuffer,
    FramebufferDescriptor, FramebufferHandle, Handle, IndexBuffer, IndexBufferHandle, PixelValue, ResourceArena,
    SetOutcome, ShaderProgram, ShaderProgramHandle, ShaderReflection, ShaderSources, Texture2D, Texture2DDescriptor,
    Texture2DHandle, TextureFormat, TextureSource, UniformInfo, UniformValue, VertexArray, VertexArrayDescriptor,
    VertexArrayHandle, VertexBuffer, VertexBufferHandle,
};
use khora_core::renderer::api::framebuffer::{validate_attachment_access, validate_resize};

use super::context::{self, GlContextBundle};
use super::resources::{self as res, GlBuffer, GlFramebuffer, GlShaderProgram, GlTexture, GlVertexArray};

struct GlState {
    gl: glow::Context,
    context: glutin::context::PossiblyCurrentContext,
    surface: glutin::surface::Surface<glutin::surface::WindowSurface>,
}

struct Inner {
    state: Mutex<GlState>,
    vertex_buffers: Mutex<ResourceArena<GlBuffer>>,
    index_buffers: Mutex<ResourceArena<GlBuffer>>,
    vertex_arrays: Mutex<ResourceArena<GlVertexArray>>,
    shader_programs: Mutex<ResourceArena<GlShaderProgram>>,
    textures: Mutex<ResourceArena<GlTexture>>,
    framebuffers: Mutex<ResourceArena<GlFramebuffer>>,
    max_viewport_dims: (u32, u32),
}

/// The OpenGL reference [`GraphicsDevice`](khora_core::renderer::GraphicsDevice).
///
/// Cheap to `Clone`: every clone shares the same context and arenas through
/// an `Arc`.
pub struct GlDevice {
    inner: Arc<Inner>,
}

impl Clone for GlDevice {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for GlDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlDevice")
            .field("max_viewport_dims", &self.inner.max_viewport_dims)
            .finish()
    }
}

impl GlDevice {
    /// Creates the context and surface for `window` and loads the GL
    /// function table. Must run after the window exists, before the first
    /// frame.
    pub fn new(window: &KhoraWindowHandle, width: u32, height: u32) -> EngineResult<Self> {
        let GlContextBundle { context, surface, gl } = context::create(window, width, height)?;

        let max_viewport_dims = unsafe {
            let mut dims = [0i32; 2];
            gl.get_parameter_i32_slice(glow::MAX_VIEWPORT_DIMS, &mut dims);
            (dims[0].max(1) as u32, dims[1].max(1) as u32)
        };
        log::info!("GL device initialized, max viewport dims {max_viewport_dims:?}");

        Ok(Self {
            inner: Arc::new(Inner {
                state: Mutex::new(GlState { gl, context, surface }),
                vertex_buffers: Mutex::new(ResourceArena::new()),
                index_buffers: Mutex::new(ResourceArena::new()),
                vertex_arrays: Mutex::new(ResourceArena::new()),
                shader_programs: Mutex::new(ResourceArena::new()),
                textures: Mutex::new(ResourceArena::new()),
                framebuffers: Mutex::new(ResourceArena::new()),
                max_viewport_dims,
            }),
        })
    }

    /// Swaps the window's front/back buffers. Not part of the portable
    /// `GraphicsDevice` contract (a headless backend has nothing to swap);
    /// the host application calls this once per frame after the pipeline
    /// has executed.
    pub fn present(&self) -> EngineResult<()> {
        let state = self.inner.state.lock().unwrap();
        state
            .surface
            .swap_buffers(&state.context)
            .map_err(|err| EngineError::InvalidValue(format!("buffer swap failed: {err}")))
    }

    /// Resizes the window surface to match a resized window. Distinct from
    /// [`khora_core::renderer::traits::GraphicsDevice::resize_framebuffer`],
    /// which only resizes an off-screen target.
    pub fn resize_surface(&self, width: u32, height: u32) {
        use std::num::NonZeroU32;
        let Some(width) = NonZeroU32::new(width.max(1)) else { return };
        let Some(height) = NonZeroU32::new(height.max(1)) else { return };
        let state = self.inner.state.lock().unwrap();
        state.surface.resize(&state.context, width, height);
    }
}

unsafe fn compile_stage(gl: &glow::Context, stage: u32, source: &str, label: &str) -> EngineResult<glow::Shader> {
    let shader = gl
        .create_shader(stage)
        .map_err(|err| EngineError::ShaderCreationFailed { source: label.to_string(), reason: err, line: None })?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);
    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        let line = parse_error_line(&log);
        return Err(EngineError::ShaderCreationFailed { source: label.to_string(), reason: log, line });
    }
    Ok(shader)
}

/// Drivers commonly format GLSL compile errors as `0:<line>: ...`; extract
/// the line number when present, falling back to `None` for unusual logs.
fn parse_error_line(log: &str) -> Option<u32> {
    let first_line = log.lines().next()?;
    let rest = first_line.strip_prefix("0:")?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

fn attribute_source_name(semantic: AttributeSemantic) -> &'static str {
    match semantic {
        AttributeSemantic::Position => "a_position",
        AttributeSemantic::Normal => "a_normal",
        AttributeSemantic::Tangent => "a_tangent",
        AttributeSemantic::Bitangent => "a_bitangent",
        AttributeSemantic::Uv0 => "a_uv0",
        AttributeSemantic::LightmapUv => "a_lightmap_uv",
        AttributeSemantic::EntityId => "a_entity_id",
    }
}

fn semantic_from_attribute_name(name: &str) -> Option<AttributeSemantic> {
    match name {
        "a_position" => Some(AttributeSemantic::Position),
        "a_normal" => Some(AttributeSemantic::Normal),
        "a_tangent" => Some(AttributeSemantic::Tangent),
        "a_bitangent" => Some(AttributeSemantic::Bitangent),
        "a_uv0" => Some(AttributeSemantic::Uv0),
        "a_lightmap_uv" => Some(AttributeSemantic::LightmapUv),
        "a_entity_id" => Some(AttributeSemantic::EntityId),
        _ => None,
    }
}

fn data_type_from_gl(gl_type: u32) -> Option<DataType> {
    match gl_type {
        glow::FLOAT => Some(DataType::Float),
        glow::FLOAT_VEC2 => Some(DataType::Vec2),
        glow::FLOAT_VEC3 => Some(DataType::Vec3),
        glow::FLOAT_VEC4 => Some(DataType::Vec4),
        glow::INT | glow::SAMPLER_2D => Some(DataType::Int),
        glow::BOOL => Some(DataType::Bool),
        glow::FLOAT_MAT4 => Some(DataType::Mat4),
        _ => None,
    }
}

struct Reflection {
    reflection: ShaderReflection,
    uniform_locations: HashMap<String, glow::UniformLocation>,
}

unsafe fn reflect_program(gl: &glow::Context, program: glow::Program) -> Reflection {
    let mut reflection = ShaderReflection::default();
    let mut uniform_locations = HashMap::new();

    let uniform_count = gl.get_active_uniforms(program);
    for index in 0..uniform_count {
        let Some(active) = gl.get_active_uniform(program, index) else { continue };
        let Some(data_type) = data_type_from_gl(active.utype) else { continue };
        let Some(location) = gl.get_uniform_location(program, &active.name) else { continue };
        reflection.uniforms.insert(
            active.name.clone(),
            UniformInfo { name: active.name.clone(), data_type, array_size: active.size.max(1) as u32, location: index as i32 },
        );
        uniform_locations.insert(active.name, location);
    }

    let attribute_count = gl.get_active_attributes(program);
    for index in 0..attribute_count {
        let Some(active) = gl.get_active_attribute(program, index) else { continue };
        let Some(data_type) = data_type_from_gl(active.atype) else { continue };
        let location = gl.get_attrib_location(program, &active.name).unwrap_or(0);
        if let Some(semantic) = semantic_from_attribute_name(&active.name) {
            reflection.required_attributes.insert(semantic);
        }
        reflection.attributes.push(AttributeInfo {
            name: active.name,
            data_type,
            location: location as i32,
        });
    }

    Reflection { reflection, uniform_locations }
}

impl khora_core::renderer::GraphicsDevice for GlDevice {
    fn create_vertex_buffer(&self, data: &[u8], usage: BufferUsage) -> EngineResult<VertexBufferHandle> {
        let raw = {
            let state = self.inner.state.lock().unwrap();
            unsafe {
                let buffer = state
                    .gl
                    .create_buffer()
                    .map_err(|err| EngineError::InvalidValue(format!("create_buffer failed: {err}")))?;
                state.gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
                let draw_hint = if usage.contains(BufferUsage::DYNAMIC) { glow::DYNAMIC_DRAW } else { glow::STATIC_DRAW };
                state.gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, data, draw_hint);
                state.gl.bind_buffer(glow::ARRAY_BUFFER, None);
                buffer
            }
        };
        let id = self.inner.vertex_buffers.lock().unwrap().insert(GlBuffer { raw });
        let inner = Arc::clone(&self.inner);
        Ok(Handle::<VertexBuffer>::new(id, move |id| {
            if let Some(buffer) = inner.vertex_buffers.lock().unwrap().remove(id) {
                let state = inner.state.lock().unwrap();
                unsafe { state.gl.delete_buffer(buffer.raw) };
            }
        }))
    }

    fn create_index_buffer(&self, data: &[u32], usage: BufferUsage) -> EngineResult<IndexBufferHandle> {
        let raw = {
            let state = self.inner.state.lock().unwrap();
            unsafe {
                let buffer = state
                    .gl
                    .create_buffer()
                    .map_err(|err| EngineError::InvalidValue(format!("create_buffer failed: {err}")))?;
                state.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(buffer));
                let draw_hint = if usage.contains(BufferUsage::DYNAMIC) { glow::DYNAMIC_DRAW } else { glow::STATIC_DRAW };
                state.gl.buffer_data_u8_slice(glow::ELEMENT_ARRAY_BUFFER, bytemuck::cast_slice(data), draw_hint);
                state.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);
                buffer
            }
        };
        let id = self.inner.index_buffers.lock().unwrap().insert(GlBuffer { raw });
        let inner = Arc::clone(&self.inner);
        Ok(Handle::<IndexBuffer>::new(id, move |id| {
            if let Some(buffer) = inner.index_buffers.lock().unwrap().remove(id) {
                let state = inner.state.lock().unwrap();
                unsafe { state.gl.delete_buffer(buffer.raw) };
            }
        }))
    }

    fn create_vertex_array(&self, descriptor: VertexArrayDescriptor) -> EngineResult<VertexArrayHandle> {
        let raw = {
            let state = self.inner.state.lock().unwrap();
            let vertex_buffers = self.inner.vertex_buffers.lock().unwrap();
            let index_buffers = self.inner.index_buffers.lock().unwrap();
            unsafe {
                let vao = state
                    .gl
                    .create_vertex_array()
                    .map_err(|err| EngineError::InvalidValue(format!("create_vertex_array failed: {err}")))?;
                state.gl.bind_vertex_array(Some(vao));

                for (buffer_handle, layout) in &descriptor.vertex_buffers {
                    let gl_buffer = vertex_buffers
                        .get(buffer_handle.id())
                        .ok_or_else(|| EngineError::InvalidValue("stale vertex buffer handle".to_string()))?;
                    state.gl.bind_buffer(glow::ARRAY_BUFFER, Some(gl_buffer.raw));
                    for attribute in &layout.attributes {
                        let location = res::attribute_location(attribute.semantic);
                        let (count, gl_type) = res::gl_scalar(attribute.data_type);
                        state.gl.enable_vertex_attrib_array(location);
                        if gl_type == glow::INT {
                            state
                                .gl
                                .vertex_attrib_pointer_i32(location, count, gl_type, layout.stride as i32, attribute.offset as i32);
                        } else {
                            state.gl.vertex_attrib_pointer_f32(
                                location,
                                count,
                                gl_type,
                                false,
                                layout.stride as i32,
                                attribute.offset as i32,
                            );
                        }
                    }
                }

                let gl_index_buffer = index_buffers
                    .get(descriptor.index_buffer.id())
                    .ok_or_else(|| EngineError::InvalidValue("stale index buffer handle".to_string()))?;
                state.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(gl_index_buffer.raw));

                state.gl.bind_vertex_array(None);
                vao
            }
        };

        let vertex_buffers = descriptor.vertex_buffers.iter().map(|(handle, _)| handle.clone()).collect();
        let index_buffer = descriptor.index_buffer.clone();
        let id = self
            .inner
            .vertex_arrays
            .lock()
            .unwrap()
            .insert(GlVertexArray { raw, vertex_buffers, index_buffer });
        let inner = Arc::clone(&self.inner);
        Ok(Handle::<VertexArray>::new(id, move |id| {
            if let Some(vao) = inner.vertex_arrays.lock().unwrap().remove(id) {
                let state = inner.state.lock().unwrap();
                unsafe { state.gl.delete_vertex_array(vao.raw) };
            }
        }))
    }

    fn write_vertex_buffer(&self, buffer: &VertexBufferHandle, offset: u64, data: &[u8]) -> EngineResult<()> {
        let buffers = self.inner.vertex_buffers.lock().unwrap();
        let gl_buffer = buffers
            .get(buffer.id())
            .ok_or_else(|| EngineError::InvalidValue("stale vertex buffer handle".to_string()))?;
        let state = self.inner.state.lock().unwrap();
        unsafe {
            state.gl.bind_buffer(glow::ARRAY_BUFFER, Some(gl_buffer.raw));
            state.gl.buffer_sub_data_u8_slice(glow::ARRAY_BUFFER, offset as i32, data);
            state.gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
        Ok(())
    }

    fn create_shader_program(&self, sources: &ShaderSources) -> EngineResult<(ShaderProgramHandle, ShaderReflection)> {
        let (program, uniform_locations, reflection, storage_block_count) = {
            let state = self.inner.state.lock().unwrap();
            unsafe {
                let vertex = compile_stage(&state.gl, glow::VERTEX_SHADER, &sources.vertex, "vertex")?;
                let fragment = compile_stage(&state.gl, glow::FRAGMENT_SHADER, &sources.fragment, "fragment")?;

                let program = state.gl.create_program().map_err(|err| EngineError::ShaderCreationFailed {
                    source: "program".to_string(),
                    reason: err,
                    line: None,
                })?;
                state.gl.attach_shader(program, vertex);
                state.gl.attach_shader(program, fragment);
                for semantic in [
                    AttributeSemantic::Position,
                    AttributeSemantic::Normal,
                    AttributeSemantic::Tangent,
                    AttributeSemantic::Bitangent,
                    AttributeSemantic::Uv0,
                    AttributeSemantic::LightmapUv,
                    AttributeSemantic::EntityId,
                ] {
                    state
                        .gl
                        .bind_attrib_location(program, res::attribute_location(semantic), attribute_source_name(semantic));
                }
                state.gl.link_program(program);
                state.gl.detach_shader(program, vertex);
                state.gl.detach_shader(program, fragment);
                state.gl.delete_shader(vertex);
                state.gl.delete_shader(fragment);

                if !state.gl.get_program_link_status(program) {
                    let log = state.gl.get_program_info_log(program);
                    state.gl.delete_program(program);
                    return Err(EngineError::ShaderCreationFailed { source: "program".to_string(), reason: log, line: None });
                }

                let Reflection { reflection, uniform_locations } = reflect_program(&state.gl, program);
                let storage_block_count = res::count_storage_blocks(&sources.vertex) + res::count_storage_blocks(&sources.fragment);
                (program, uniform_locations, reflection, storage_block_count)
            }
        };

        let id = self.inner.shader_programs.lock().unwrap().insert(GlShaderProgram {
            raw: program,
            uniform_locations,
            cache: Mutex::new(Default::default()),
            storage_block_count,
        });
        let inner = Arc::clone(&self.inner);
        let handle = Handle::<ShaderProgram>::new(id, move |id| {
            if let Some(program) = inner.shader_programs.lock().unwrap().remove(id) {
                let state = inner.state.lock().unwrap();
                unsafe { state.gl.delete_program(program.raw) };
            }
        });
        Ok((handle, reflection))
    }

    fn set_uniform(&self, program: &ShaderProgramHandle, name: &str, value: UniformValue) -> SetOutcome {
        let programs = self.inner.shader_programs.lock().unwrap();
        let Some(gl_program) = programs.get(program.id()) else { return SetOutcome::UnknownUniform };
        let Some(location) = gl_program.uniform_locations.get(name) else {
            return SetOutcome::UnknownUniform;
        };

        // Array uniforms bypass the cache (§4.3): they always upload.
        if !value.is_array() {
            if gl_program.cache.lock().unwrap().set(name, value.clone()) == SetOutcome::CachedNoUpload {
                return SetOutcome::CachedNoUpload;
            }
        }

        let state = self.inner.state.lock().unwrap();
        unsafe {
            state.gl.use_program(Some(gl_program.raw));
            match value {
                UniformValue::Float(v) => state.gl.uniform_1_f32(Some(location), v),
                UniformValue::Vec2(v) => {
                    let [x, y] = res::vec2_to_array(v);
                    state.gl.uniform_2_f32(Some(location), x, y);
                }
                UniformValue::Vec3(v) => {
                    let [x, y, z] = res::vec3_to_array(v);
                    state.gl.uniform_3_f32(Some(location), x, y, z);
                }
                UniformValue::Vec4(v) => {
                    let [x, y, z, w] = res::vec4_to_array(v);
                    state.gl.uniform_4_f32(Some(location), x, y, z, w);
                }
                UniformValue::Int(v) => state.gl.uniform_1_i32(Some(location), v),
                UniformValue::Bool(v) => state.gl.uniform_1_i32(Some(location), v as i32),
                UniformValue::Mat4(m) => {
                    let cols: [f32; 16] = res::mat4_to_array(&m);
                    state.gl.uniform_matrix_4_f32_slice(Some(location), false, &cols);
                }
                UniformValue::FloatArray(values) => {
                    state.gl.uniform_1_f32_slice(Some(location), &values);
                }
                UniformValue::Vec3Array(values) => {
                    let flat: Vec<f32> = values.iter().flat_map(|v| res::vec3_to_array(*v)).collect();
                    state.gl.uniform_3_f32_slice(Some(location), &flat);
                }
                UniformValue::Vec4Array(values) => {
                    let flat: Vec<f32> = values.iter().flat_map(|v| res::vec4_to_array(*v)).collect();
                    state.gl.uniform_4_f32_slice(Some(location), &flat);
                }
                UniformValue::Mat4Array(values) => {
                    let flat: Vec<f32> = values.iter().flat_map(|m| res::mat4_to_array(m)).collect();
                    state.gl.uniform_matrix_4_f32_slice(Some(location), false, &flat);
                }
            }
        }
        SetOutcome::Uploaded
    }

    fn bind_storage_buffer(&self, program: &ShaderProgramHandle, index: u32, buffer: &VertexBufferHandle) -> EngineResult<()> {
        let programs = self.inner.shader_programs.lock().unwrap();
        let gl_program = programs
            .get(program.id())
            .ok_or_else(|| EngineError::InvalidValue("stale shader program handle".to_string()))?;
        if index >= gl_program.storage_block_count {
            return Err(EngineError::OutOfRange);
        }
        let buffers = self.inner.vertex_buffers.lock().unwrap();
        let gl_buffer = buffers
            .get(buffer.id())
            .ok_or_else(|| EngineError::InvalidValue("stale storage buffer handle".to_string()))?;
        let state = self.inner.state.lock().unwrap();
        unsafe {
            state.gl.bind_buffer_base(glow::SHADER_STORAGE_BUFFER, index, Some(gl_buffer.raw));
        }
        Ok(())
    }

    fn create_texture2d(&self, source: TextureSource) -> EngineResult<(Texture2DHandle, Texture2DDescriptor)> {
        let (width, height, format, pixels, source_path) = decode_texture_source(source)?;
        if width == 0 || height == 0 {
            return Err(EngineError::TextureInvalidSize);
        }

        let raw = {
            let state = self.inner.state.lock().unwrap();
            unsafe {
                let texture = state
                    .gl
                    .create_texture()
                    .map_err(|err| EngineError::InvalidValue(format!("create_texture failed: {err}")))?;
                state.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
                let (internal_format, gl_format) = res::gl_texture_format(format);
                state.gl.tex_image_2d(
                    glow::TEXTURE_2D,
                    0,
                    internal_format,
                    width as i32,
                    height as i32,
                    0,
                    gl_format,
                    glow::UNSIGNED_BYTE,
                    glow::PixelUnpackData::Slice(Some(&pixels)),
                );
                state.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
                state.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
                state.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
                state.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
                state.gl.bind_texture(glow::TEXTURE_2D, None);
                texture
            }
        };

        let id = self.inner.textures.lock().unwrap().insert(GlTexture { raw, width, height, format });
        let inner = Arc::clone(&self.inner);
        let handle = Handle::<Texture2D>::new(id, move |id| {
            if let Some(texture) = inner.textures.lock().unwrap().remove(id) {
                let state = inner.state.lock().unwrap();
                unsafe { state.gl.delete_texture(texture.raw) };
            }
        });
        Ok((handle, Texture2DDescriptor { width, height, format, source_path }))
    }

    fn create_framebuffer(&self, descriptor: FramebufferDescriptor) -> EngineResult<FramebufferHandle> {
        if descriptor.sample_count > 1 {
            log::warn!("MSAA framebuffers are not implemented; creating a single-sample target instead");
        }

        let (raw, color_textures, depth_renderbuffer) = {
            let state = self.inner.state.lock().unwrap();
            unsafe { build_framebuffer(&state.gl, &descriptor)? }
        };

        let id = self.inner.framebuffers.lock().unwrap().insert(GlFramebuffer {
            raw,
            color_textures,
            depth_renderbuffer,
            descriptor,
        });
        let inner = Arc::clone(&self.inner);
        Ok(Handle::<Framebuffer>::new(id, move |id| {
            if let Some(fbo) = inner.framebuffers.lock().unwrap().remove(id) {
                let state = inner.state.lock().unwrap();
                unsafe {
                    res::delete_framebuffer_attachments(&state.gl, &fbo);
                    state.gl.delete_framebuffer(fbo.raw);
                }
            }
        }))
    }

    fn bind_framebuffer(&self, framebuffer: &FramebufferHandle) {
        let framebuffers = self.inner.framebuffers.lock().unwrap();
        let Some(fbo) = framebuffers.get(framebuffer.id()) else { return };
        let state = self.inner.state.lock().unwrap();
        unsafe {
            state.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo.raw));
            state.gl.viewport(0, 0, fbo.descriptor.width as i32, fbo.descriptor.height as i32);
        }
    }

    fn unbind_framebuffer(&self) {
        let state = self.inner.state.lock().unwrap();
        unsafe { state.gl.bind_framebuffer(glow::FRAMEBUFFER, None) };
    }

    fn resize_framebuffer(&self, framebuffer: &FramebufferHandle, width: u32, height: u32) -> EngineResult<()> {
        validate_resize(width, height, self.inner.max_viewport_dims)?;

        let mut framebuffers = self.inner.framebuffers.lock().unwrap();
        let fbo = framebuffers
            .get_mut(framebuffer.id())
            .ok_or(EngineError::FramebufferInvalidIndex)?;

        let state = self.inner.state.lock().unwrap();
        unsafe {
            res::delete_framebuffer_attachments(&state.gl, fbo);
            state.gl.delete_framebuffer(fbo.raw);

            let mut descriptor = fbo.descriptor.clone();
            descriptor.width = width;
            descriptor.height = height;
            let (raw, color_textures, depth_renderbuffer) = build_framebuffer(&state.gl, &descriptor)?;
            fbo.raw = raw;
            fbo.color_textures = color_textures;
            fbo.depth_renderbuffer = depth_renderbuffer;
            fbo.descriptor = descriptor;
        }
        Ok(())
    }

    fn get_pixel(&self, framebuffer: &FramebufferHandle, attachment_index: usize, x: u32, y: u32) -> EngineResult<PixelValue> {
        let framebuffers = self.inner.framebuffers.lock().unwrap();
        let fbo = framebuffers.get(framebuffer.id()).ok_or(EngineError::FramebufferInvalidIndex)?;
        let format = fbo
            .descriptor
            .color_attachments
            .get(attachment_index)
            .copied()
            .ok_or(EngineError::FramebufferInvalidIndex)?;

        let state = self.inner.state.lock().unwrap();
        unsafe {
            state.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo.raw));
            state.gl.read_buffer(glow::COLOR_ATTACHMENT0 + attachment_index as u32);
            let value = if format.is_integer() {
                let mut pixel = [0i32; 1];
                state.gl.read_pixels(
                    x as i32,
                    y as i32,
                    1,
                    1,
                    glow::RED_INTEGER,
                    glow::INT,
                    glow::PixelPackData::Slice(Some(bytemuck::cast_slice_mut(&mut pixel))),
                );
                PixelValue::Int(pixel[0])
            } else {
                let mut pixel = [0f32; 4];
                state.gl.read_pixels(
                    x as i32,
                    y as i32,
                    1,
                    1,
                    glow::RGBA,
                    glow::FLOAT,
                    glow::PixelPackData::Slice(Some(bytemuck::cast_slice_mut(&mut pixel))),
                );
                PixelValue::Float(pixel)
            };
            state.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            Ok(value)
        }
    }

    fn clear_attachment(&self, framebuffer: &FramebufferHandle, attachment_index: usize, value: PixelValue) -> EngineResult<()> {
        let framebuffers = self.inner.framebuffers.lock().unwrap();
        let fbo = framebuffers.get(framebuffer.id()).ok_or(EngineError::FramebufferInvalidIndex)?;
        validate_attachment_access(&fbo.descriptor, attachment_index, value)?;

        let state = self.inner.state.lock().unwrap();
        unsafe {
            state.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo.raw));
            match value {
                PixelValue::Float(color) => {
                    state.gl.clear_buffer_f32_slice(glow::COLOR, attachment_index as u32, &color);
                }
                PixelValue::Int(v) => {
                    state.gl.clear_buffer_i32_slice(glow::COLOR, attachment_index as u32, &[v, 0, 0, 0]);
                }
            }
            state.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        }
        Ok(())
    }

    fn draw_indexed(&self, vertex_array: &VertexArrayHandle, program: &ShaderProgramHandle, index_count: u32) {
        let vertex_arrays = self.inner.vertex_arrays.lock().unwrap();
        let Some(vao) = vertex_arrays.get(vertex_array.id()) else { return };
        let programs = self.inner.shader_programs.lock().unwrap();
        let Some(gl_program) = programs.get(program.id()) else { return };

        let state = self.inner.state.lock().unwrap();
        unsafe {
            state.gl.use_program(Some(gl_program.raw));
            state.gl.bind_vertex_array(Some(vao.raw));
            state.gl.draw_elements(glow::TRIANGLES, index_count as i32, glow::UNSIGNED_INT, 0);
            state.gl.bind_vertex_array(None);
        }
    }

    fn write_texture(&self, texture: &Texture2DHandle, data: &[u8], offset: Origin3D, size: Extent3D) -> EngineResult<()> {
        let textures = self.inner.textures.lock().unwrap();
        let gl_texture = textures
            .get(texture.id())
            .ok_or_else(|| EngineError::InvalidValue("stale texture handle".to_string()))?;

        let expected = size.width as usize * size.height as usize * gl_texture.format.channels() as usize;
        if data.len() != expected {
            return Err(EngineError::TextureSizeMismatch);
        }

        let (_, gl_format) = res::gl_texture_format(gl_texture.format);
        let state = self.inner.state.lock().unwrap();
        unsafe {
            state.gl.bind_texture(glow::TEXTURE_2D, Some(gl_texture.raw));
            state.gl.tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                offset.x as i32,
                offset.y as i32,
                size.width as i32,
                size.height as i32,
                gl_format,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(data)),
            );
            state.gl.bind_texture(glow::TEXTURE_2D, None);
        }
        Ok(())
    }

    fn max_viewport_dims(&self) -> (u32, u32) {
        self.inner.max_viewport_dims
    }
}

type DecodedTexture = (u32, u32, TextureFormat, Vec<u8>, Option<String>);

fn decode_texture_source(source: TextureSource) -> EngineResult<DecodedTexture> {
    match source {
        TextureSource::Empty { width, height } => Ok((width, height, TextureFormat::Rgba8, vec![0u8; width as usize * height as usize * 4], None)),
        TextureSource::Raw { width, height, format, pixels } => {
            let expected = width as usize * height as usize * format.channels() as usize;
            if pixels.len() != expected {
                return Err(EngineError::TextureSizeMismatch);
            }
            Ok((width, height, format, pixels, None))
        }
        TextureSource::EncodedBytes(bytes) => {
            let image = image::load_from_memory(&bytes).map_err(|err| EngineError::ImageLoadFailed(err.to_string()))?;
            decode_dynamic_image(image, None)
        }
        TextureSource::Path(path) => {
            let image = image::open(&path).map_err(|err| EngineError::ImageLoadFailed(err.to_string()))?;
            decode_dynamic_image(image, Some(path))
        }
    }
}

/// Mirrors the original decoder's channel-count dispatch: 1/3/4 channels
/// map straight to R8/RGB8/RGBA8, 2 channels (grey+alpha) map to RG16, and
/// anything else is rejected rather than silently coerced to RGBA.
fn decode_dynamic_image(image: image::DynamicImage, source_path: Option<String>) -> EngineResult<DecodedTexture> {
    let width = image.width();
    let height = image.height();
    let channels = image.color().channel_count() as u32;
    let Some(format) = TextureFormat::from_channel_count(channels) else {
        return Err(EngineError::TextureUnsupportedFormat(format!(
            "{channels}-channel image{}",
            source_path.map(|p| format!(" ({p})")).unwrap_or_default()
        )));
    };
    let pixels = match format {
        TextureFormat::R8 => image.to_luma8().into_raw(),
        TextureFormat::Rg16 => image.to_luma_alpha8().into_raw(),
        TextureFormat::Rgb8 => image.to_rgb8().into_raw(),
        TextureFormat::Rgba8 => image.to_rgba8().into_raw(),
        TextureFormat::Rg8 => unreachable!("from_channel_count never returns Rg8"),
    };
    Ok((width, height, format, pixels, source_path))
}

type BuiltFramebuffer = (glow::Framebuffer, Vec<(glow::Texture, ColorAttachmentFormat)>, Option<glow::Renderbuffer>);

unsafe fn build_framebuffer(gl: &glow::Context, descriptor: &FramebufferDescriptor) -> EngineResult<BuiltFramebuffer> {
    let fbo = gl
        .create_framebuffer()
        .map_err(|err| EngineError::FramebufferCreationFailed(err))?;
    gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));

    let mut color_textures = Vec::with_capacity(descriptor.color_attachments.len());
    for (index, format) in descriptor.color_attachments.iter().enumerate() {
        let texture = gl
            .create_texture()
            .map_err(|err| EngineError::FramebufferCreationFailed(err))?;
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        let (internal_format, gl_format, gl_type) = res::gl_internal_format(*format);
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            internal_format,
            descriptor.width as i32,
            descriptor.height as i32,
            0,
            gl_format,
            gl_type,
            glow::PixelUnpackData::Slice(None),
        );
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::NEAREST as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::NEAREST as i32);
        gl.framebuffer_texture_2d(glow::FRAMEBUFFER, glow::COLOR_ATTACHMENT0 + index as u32, glow::TEXTURE_2D, Some(texture), 0);
        color_textures.push((texture, *format));
    }

    let draw_buffers: Vec<u32> = (0..color_textures.len() as u32).map(|i| glow::COLOR_ATTACHMENT0 + i).collect();
    if draw_buffers.is_empty() {
        gl.draw_buffer(glow::NONE);
    } else {
        gl.draw_buffers(&draw_buffers);
    }

    let depth_renderbuffer = match descriptor.depth_stencil {
        Some(DepthStencilFormat::Depth24Stencil8) => {
            let renderbuffer = gl
                .create_renderbuffer()
                .map_err(|err| EngineError::FramebufferCreationFailed(err))?;
            gl.bind_renderbuffer(glow::RENDERBUFFER, Some(renderbuffer));
            gl.renderbuffer_storage(glow::RENDERBUFFER, glow::DEPTH24_STENCIL8, descriptor.width as i32, descriptor.height as i32);
            gl.framebuffer_renderbuffer(glow::FRAMEBUFFER, glow::DEPTH_STENCIL_ATTACHMENT, glow::RENDERBUFFER, Some(renderbuffer));
            Some(renderbuffer)
        }
        None => None,
    };

    let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
    gl.bind_framebuffer(glow::FRAMEBUFFER, None);
    if status != glow::FRAMEBUFFER_COMPLETE {
        return Err(EngineError::FramebufferCreationFailed(format!("incomplete framebuffer, status 0x{status:x}")));
    }

    Ok((fbo, color_textures, depth_renderbuffer))
}
