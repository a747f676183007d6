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

//! Mesh render system (§4.6): for every renderable mesh entity in the
//! rendered scene, for every camera in the frame's context, appends a
//! `DrawCommand` to that camera's pipeline.

use khora_core::renderer::api::{PassFilter, UniformValue};
use khora_data::ecs::components::{MaterialRef, MeshRef, SceneTag, Transform};
use khora_data::ecs::{Coordinator, Entity, RenderContext};

use crate::draw_command::DrawCommand;
use crate::registry::PipelineRegistry;
use crate::resolver::AssetResolver;

pub fn mesh_render_system(
    coordinator: &mut Coordinator,
    registry: &mut PipelineRegistry,
    resolver: &dyn AssetResolver,
) {
    let scene_id = coordinator.singleton::<RenderContext>().scene_id;
    let entities: Vec<Entity> = coordinator.query::<MeshRef>().0.to_vec();

    for entity in entities {
        let in_scene = coordinator
            .get::<SceneTag>(entity)
            .map(|tag| tag.scene_id == scene_id && tag.rendered)
            .unwrap_or(false);
        if !in_scene {
            continue;
        }

        let Some(&MeshRef(mesh_id)) = coordinator.get::<MeshRef>(entity) else {
            continue;
        };
        let Some(&MaterialRef(material_id)) = coordinator.get::<MaterialRef>(entity) else {
            continue;
        };
        let Some(transform) = coordinator.get::<Transform>(entity) else {
            continue;
        };

        let Some(mesh) = resolver.resolve_mesh(mesh_id) else {
            continue;
        };
        let Some(material) = resolver.resolve_material(material_id) else {
            continue;
        };

        let model = transform.world_matrix;
        let base_command = DrawCommand::new(mesh.vertex_array, mesh.index_count, material.program, PassFilter::FORWARD)
            .with_uniform("u_model", UniformValue::Mat4(model))
            .with_uniform("u_entity_id", UniformValue::Int(entity.index() as i32))
            .with_uniform("u_base_color", UniformValue::Vec4(material.base_color.to_vec4()));

        for camera in coordinator.singleton::<RenderContext>().cameras.clone() {
            let Some(pipeline_id) = camera.pipeline else {
                continue;
            };
            let Some(pipeline) = registry.get_mut(pipeline_id) else {
                continue;
            };
            let command = base_command.clone().with_uniform(
                "u_view_projection",
                UniformValue::Mat4(camera.view_projection),
            );
            pipeline.add_draw_command(command);
        }
    }
}
