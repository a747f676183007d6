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

//! Sandbox: wires one scene directly through the engine crates (no
//! application-framework layer exists to do it for us) and drives it
//! through a window every frame, the way a real host application would.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use khora_core::asset::AssetUUID;
use khora_core::config::EngineConfig;
use khora_core::error::EngineResult;
use khora_core::math::{LinearRgba, Quaternion, Vec3};
use khora_core::platform::window::Window;
use khora_core::renderer::api::{
    BufferUsage, ColorAttachmentFormat, DepthStencilFormat, FramebufferDescriptor, PassFilter, PixelValue,
    ShaderProgramHandle, VertexArrayDescriptor,
};
use khora_core::renderer::traits::GraphicsDevice;
use khora_data::ecs::components::{Billboard, Camera, MaterialRef, MeshRef, SceneTag, Transform};
use khora_data::ecs::{Coordinator, EntityDestroyed, RenderContext};
use khora_geometry::Mesh;
use khora_infra::graphics::gl::shader_source;
use khora_infra::platform::window::WinitWindow;
use khora_infra::GlDevice;
use khora_render::systems::{
    billboard_render_system, camera_context_system, light_context_system, mesh_render_system,
    selection_outline_system, transform_hierarchy_system, transform_matrix_system,
};
use khora_render::{AssetResolver, Pass, PassContext, PassId, Pipeline, PipelineRegistry, ResolvedMaterial, ResolvedMesh};
use khora_telemetry::FrameTimer;

const FORWARD_SHADER: &str = r#"#type vertex
#version 450 core
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 4) in vec2 a_uv0;
layout(location = 6) in int a_entity_id;

uniform mat4 u_model;
uniform mat4 u_view_projection;

out vec3 v_normal;
flat out int v_entity_id;

void main() {
    v_normal = mat3(u_model) * a_normal;
    v_entity_id = a_entity_id;
    gl_Position = u_view_projection * u_model * vec4(a_position, 1.0);
}

#type fragment
#version 450 core
in vec3 v_normal;
flat in int v_entity_id;

uniform vec4 u_base_color;
uniform int u_entity_id;

layout(location = 0) out vec4 out_color;
layout(location = 1) out int out_entity_id;

void main() {
    float light = clamp(dot(normalize(v_normal), normalize(vec3(0.4, 0.8, 0.3))), 0.1, 1.0);
    out_color = vec4(u_base_color.rgb * light, u_base_color.a);
    out_entity_id = u_entity_id;
}
"#;

fn main() -> Result<()> {
    env_logger::init();

    let config = EngineConfig::default();
    let mut window = WinitWindow::new("Khora Sandbox", config.window_width, config.window_height);
    window.init().context("failed to initialize the sandbox window")?;

    let device = GlDevice::new(&window.clone_handle_arc(), window.width(), window.height())
        .context("failed to create the OpenGL device")?;

    let mut coordinator = Coordinator::new(config.max_entities);
    coordinator.register_singleton::<RenderContext>();

    let forward_sources = shader_source(FORWARD_SHADER).context("failed to parse the forward shader source")?;
    let (program, _reflection) = device
        .create_shader_program(&forward_sources)
        .context("failed to compile the forward shader program")?;

    let mut assets = DemoAssets::default();
    let cube_material = assets.insert_material(program.clone(), LinearRgba::new(0.8, 0.3, 0.2, 1.0));
    let cube_mesh = assets.insert_mesh(&device, khora_geometry::cube())?;

    let scene_id = 0;
    let target = device
        .create_framebuffer(FramebufferDescriptor {
            width: window.width(),
            height: window.height(),
            sample_count: 1,
            color_attachments: vec![ColorAttachmentFormat::Rgba8, ColorAttachmentFormat::RedInteger32],
            depth_stencil: Some(DepthStencilFormat::Depth24Stencil8),
        })
        .context("failed to create the scene framebuffer")?;

    let mut pipeline = Pipeline::new();
    pipeline.set_target(target);
    pipeline.add_pass(Box::new(ForwardPass::new(PassId(0))));

    let mut registry = PipelineRegistry::new();
    let pipeline_id = registry.insert(pipeline);

    let camera_entity = coordinator.create_entity()?;
    coordinator.add(camera_entity, SceneTag::new(scene_id))?;
    coordinator.add(
        camera_entity,
        Transform::from_translation(Vec3::new(0.0, 1.5, 4.0)),
    )?;
    let mut camera = Camera::perspective(window.width(), window.height(), 60f32.to_radians());
    camera.pipeline = Some(pipeline_id);
    coordinator.add(camera_entity, camera)?;

    let cube_entity = coordinator.create_entity()?;
    coordinator.add(cube_entity, SceneTag::new(scene_id))?;
    coordinator.add(cube_entity, Transform::identity())?;
    coordinator.add(cube_entity, MeshRef(cube_mesh))?;
    coordinator.add(cube_entity, MaterialRef(cube_material))?;

    let label_material = assets.insert_material(program.clone(), LinearRgba::new(0.9, 0.9, 0.2, 1.0));
    let label_entity = coordinator.create_entity()?;
    coordinator.add(label_entity, SceneTag::new(scene_id))?;
    coordinator.add(label_entity, Transform::from_translation(Vec3::new(0.0, 1.8, 0.0)))?;
    coordinator.add(label_entity, MaterialRef(label_material))?;
    coordinator.add(label_entity, Billboard::new(0.6, 0.6))?;

    let mut frame_timer = FrameTimer::default();
    let mut spin_radians = 0.0f32;

    while window.is_open() {
        let delta = frame_timer.tick();
        spin_radians += delta.as_secs_f32() * 0.5;

        if let Some(transform) = coordinator.get_mut::<Transform>(cube_entity) {
            transform.rotation = Quaternion::from_axis_angle(Vec3::Y, spin_radians);
        }

        coordinator.dispatch_events::<EntityDestroyed>(|EntityDestroyed(entity)| {
            log::debug!("entity {entity:?} destroyed");
        });

        coordinator.singleton_mut::<RenderContext>().begin_frame(scene_id);

        transform_matrix_system(&mut coordinator);
        transform_hierarchy_system(&mut coordinator);
        light_context_system(&mut coordinator, &config);
        camera_context_system(&mut coordinator);
        mesh_render_system(&mut coordinator, &mut registry, &assets);
        billboard_render_system(&mut coordinator, &mut registry, &assets, &device);
        selection_outline_system(&mut coordinator, &mut registry, &assets, &program);

        if let Some(pipeline) = registry.get_mut(pipeline_id) {
            if let Err(err) = pipeline.execute(&device) {
                log::error!("pipeline execution failed: {err}");
            }
        }

        if let Err(err) = device.present() {
            log::warn!("buffer swap failed: {err}");
        }
        window.on_update();
    }

    Ok(())
}

/// A minimal in-memory [`AssetResolver`]: the sandbox has no asset pipeline
/// of its own, so meshes and materials it creates are just kept in maps
/// keyed by the id handed out when they were registered.
#[derive(Default)]
struct DemoAssets {
    meshes: HashMap<AssetUUID, ResolvedMesh>,
    materials: HashMap<AssetUUID, ResolvedMaterial>,
}

impl DemoAssets {
    fn insert_mesh(&mut self, device: &GlDevice, mesh: Arc<Mesh>) -> Result<AssetUUID> {
        let vertex_buffer = device
            .create_vertex_buffer(bytemuck::cast_slice(mesh.vertices()), BufferUsage::VERTEX)
            .context("failed to upload mesh vertex buffer")?;
        let index_buffer = device
            .create_index_buffer(mesh.indices(), BufferUsage::INDEX)
            .context("failed to upload mesh index buffer")?;
        let vertex_array = device
            .create_vertex_array(VertexArrayDescriptor {
                vertex_buffers: vec![(vertex_buffer, Mesh::layout())],
                index_buffer,
                provided_attributes: Mesh::provided_attributes(),
            })
            .context("failed to create mesh vertex array")?;

        let id = AssetUUID::new();
        self.meshes.insert(
            id,
            ResolvedMesh {
                vertex_array,
                index_count: mesh.indices().len() as u32,
                provided_attributes: Mesh::provided_attributes(),
            },
        );
        Ok(id)
    }

    fn insert_material(&mut self, program: ShaderProgramHandle, base_color: LinearRgba) -> AssetUUID {
        let id = AssetUUID::new();
        self.materials.insert(id, ResolvedMaterial { program, base_color });
        id
    }
}

impl AssetResolver for DemoAssets {
    fn resolve_mesh(&self, id: AssetUUID) -> Option<ResolvedMesh> {
        self.meshes.get(&id).cloned()
    }

    fn resolve_material(&self, id: AssetUUID) -> Option<ResolvedMaterial> {
        self.materials.get(&id).cloned()
    }
}

/// The sandbox's single render pass: clears the scene framebuffer, then
/// issues every `FORWARD`-filtered draw command against it. There is no
/// off-screen-to-window blit in `GraphicsDevice`, so the picking attachment
/// this pass also clears/writes never reaches the screen; a real host
/// application would read it back with `get_pixel` instead.
#[derive(Debug)]
struct ForwardPass {
    id: PassId,
    prerequisites: Vec<PassId>,
    effects: Vec<PassId>,
    is_final: bool,
}

impl ForwardPass {
    fn new(id: PassId) -> Self {
        Self {
            id,
            prerequisites: Vec::new(),
            effects: Vec::new(),
            is_final: true,
        }
    }
}

impl Pass for ForwardPass {
    fn id(&self) -> PassId {
        self.id
    }

    fn prerequisites(&self) -> &[PassId] {
        &self.prerequisites
    }

    fn prerequisites_mut(&mut self) -> &mut Vec<PassId> {
        &mut self.prerequisites
    }

    fn effects(&self) -> &[PassId] {
        &self.effects
    }

    fn effects_mut(&mut self) -> &mut Vec<PassId> {
        &mut self.effects
    }

    fn is_final(&self) -> bool {
        self.is_final
    }

    fn set_final(&mut self, is_final: bool) {
        self.is_final = is_final;
    }

    fn execute(&mut self, ctx: &PassContext) -> EngineResult<()> {
        let Some(target) = ctx.target else {
            return Ok(());
        };

        ctx.device
            .clear_attachment(target, 0, PixelValue::Float([0.05, 0.05, 0.08, 1.0]))?;
        ctx.device.clear_attachment(target, 1, PixelValue::Int(-1))?;
        ctx.device.bind_framebuffer(target);

        for command in ctx.draw_commands {
            if !command.filter.intersects(PassFilter::FORWARD) {
                continue;
            }
            for (name, value) in &command.uniforms {
                ctx.device.set_uniform(&command.program, name, value.clone());
            }
            ctx.device
                .draw_indexed(&command.vertex_array, &command.program, command.index_count);
        }

        ctx.device.unbind_framebuffer();
        Ok(())
    }

    fn resize(&mut self, device: &dyn GraphicsDevice, width: u32, height: u32) -> EngineResult<()> {
        let _ = (device, width, height);
        Ok(())
    }
}
