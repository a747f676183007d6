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

//! Selection outline system (§4.6): entities tagged `Selected` get one extra
//! draw command per camera, using the shared outline shader and the
//! outline filter bit, so the outline pass can pick it out of the same
//! draw-command buffer the forward pass reads.

use khora_core::renderer::api::{PassFilter, ShaderProgramHandle, UniformValue};
use khora_data::ecs::components::{MeshRef, SceneTag, Selected, Transform};
use khora_data::ecs::{Coordinator, Entity, RenderContext};

use crate::draw_command::DrawCommand;
use crate::registry::PipelineRegistry;
use crate::resolver::AssetResolver;

pub fn selection_outline_system(
    coordinator: &mut Coordinator,
    registry: &mut PipelineRegistry,
    resolver: &dyn AssetResolver,
    outline_program: &ShaderProgramHandle,
) {
    let scene_id = coordinator.singleton::<RenderContext>().scene_id;
    let entities: Vec<Entity> = coordinator.query::<Selected>().0.to_vec();

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
        let Some(mesh) = resolver.resolve_mesh(mesh_id) else {
            continue;
        };
        let Some(transform) = coordinator.get::<Transform>(entity) else {
            continue;
        };
        let model = transform.world_matrix;

        let base_command = DrawCommand::new(mesh.vertex_array, mesh.index_count, outline_program.clone(), PassFilter::OUTLINE)
            .with_uniform("u_model", UniformValue::Mat4(model))
            .with_uniform("u_entity_id", UniformValue::Int(entity.index() as i32));

        for camera in coordinator.singleton::<RenderContext>().cameras.clone() {
            let Some(pipeline_id) = camera.pipeline else {
                continue;
            };
            let Some(pipeline) = registry.get_mut(pipeline_id) else {
                continue;
            };
            let command = base_command
                .clone()
                .with_uniform("u_view_projection", UniformValue::Mat4(camera.view_projection));
            pipeline.add_draw_command(command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use khora_core::asset::AssetUUID;
    use khora_core::math::LinearRgba;
    use khora_core::renderer::api::{Handle, RequiredAttributes};
    use khora_data::ecs::CameraContext;

    use crate::resolver::{ResolvedMaterial, ResolvedMesh};

    struct StubResolver;
    impl AssetResolver for StubResolver {
        fn resolve_mesh(&self, _id: AssetUUID) -> Option<ResolvedMesh> {
            Some(ResolvedMesh {
                vertex_array: Handle::new(0, |_| {}),
                index_count: 36,
                provided_attributes: RequiredAttributes::NONE,
            })
        }
        fn resolve_material(&self, _id: AssetUUID) -> Option<ResolvedMaterial> {
            Some(ResolvedMaterial {
                program: Handle::new(0, |_| {}),
                base_color: LinearRgba::WHITE,
            })
        }
    }

    #[test]
    fn selected_mesh_gets_an_outline_draw_command() {
        let mut coordinator = Coordinator::new(8);
        coordinator.register_component::<Selected>();
        coordinator.register_component::<MeshRef>();
        coordinator.register_component::<SceneTag>();
        coordinator.register_component::<Transform>();
        coordinator.register_singleton::<RenderContext>();
        coordinator.singleton_mut::<RenderContext>().begin_frame(0);

        let entity = coordinator.create_entity().unwrap();
        coordinator.add(entity, SceneTag::new(0)).unwrap();
        coordinator.add(entity, Transform::identity()).unwrap();
        coordinator.add(entity, MeshRef(AssetUUID::new())).unwrap();
        coordinator.add(entity, Selected).unwrap();

        let mut registry = PipelineRegistry::new();
        let pipeline_id = registry.insert(crate::pipeline::Pipeline::new());
        coordinator.singleton_mut::<RenderContext>().cameras.push(CameraContext {
            view_projection: khora_core::math::Mat4::IDENTITY,
            position: khora_core::math::Vec3::ZERO,
            clear_color: LinearRgba::BLACK,
            render_target: None,
            pipeline: Some(pipeline_id),
        });

        let outline_program: ShaderProgramHandle = Handle::new(0, |_| {});
        selection_outline_system(&mut coordinator, &mut registry, &StubResolver, &outline_program);

        let command = &registry.get(pipeline_id).unwrap().draw_commands()[0];
        assert_eq!(command.filter, PassFilter::OUTLINE);
    }
}
