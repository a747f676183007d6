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

//! Camera context system (§4.6): pushes one `CameraContext` per
//! active+render camera in the rendered scene.

use khora_data::ecs::components::{Camera, SceneTag, Transform};
use khora_data::ecs::{CameraContext, Coordinator, Entity, RenderContext};

/// Appends a `CameraContext` to `RenderContext.cameras` for every camera in
/// the rendered scene that is both active and set to render.
pub fn camera_context_system(coordinator: &mut Coordinator) {
    let scene_id = coordinator.singleton::<RenderContext>().scene_id;
    let entities: Vec<Entity> = coordinator.query::<Camera>().0.to_vec();

    for entity in entities {
        let in_scene = coordinator
            .get::<SceneTag>(entity)
            .map(|tag| tag.scene_id == scene_id && tag.rendered)
            .unwrap_or(false);
        if !in_scene {
            continue;
        }

        let Some(camera) = coordinator.get::<Camera>(entity) else {
            continue;
        };
        if !camera.active || !camera.render {
            continue;
        }
        let Some(transform) = coordinator.get::<Transform>(entity) else {
            continue;
        };

        let Some(view) = transform.world_matrix.affine_inverse() else {
            continue;
        };
        let view_projection = camera.projection_matrix() * view;
        let position = transform.world_matrix.cols[3];

        let context = CameraContext {
            view_projection,
            position: khora_core::math::Vec3::new(position.x, position.y, position.z),
            clear_color: camera.clear_color,
            render_target: camera.target_framebuffer.clone(),
            pipeline: camera.pipeline,
        };
        coordinator.singleton_mut::<RenderContext>().cameras.push(context);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use khora_core::math::Vec3;

    #[test]
    fn active_rendering_camera_in_scene_is_pushed() {
        let mut coordinator = Coordinator::new(8);
        coordinator.register_component::<Camera>();
        coordinator.register_component::<SceneTag>();
        coordinator.register_component::<Transform>();
        coordinator.register_singleton::<RenderContext>();
        coordinator.singleton_mut::<RenderContext>().begin_frame(0);

        let entity = coordinator.create_entity().unwrap();
        coordinator.add(entity, SceneTag::new(0)).unwrap();
        coordinator
            .add(entity, Transform::from_translation(Vec3::new(0.0, 0.0, 5.0)))
            .unwrap();
        coordinator.add(entity, Camera::default()).unwrap();

        crate::systems::transform_matrix_system(&mut coordinator);
        camera_context_system(&mut coordinator);

        assert_eq!(coordinator.singleton::<RenderContext>().cameras.len(), 1);
    }

    #[test]
    fn inactive_camera_is_skipped() {
        let mut coordinator = Coordinator::new(8);
        coordinator.register_component::<Camera>();
        coordinator.register_component::<SceneTag>();
        coordinator.register_component::<Transform>();
        coordinator.register_singleton::<RenderContext>();
        coordinator.singleton_mut::<RenderContext>().begin_frame(0);

        let entity = coordinator.create_entity().unwrap();
        coordinator.add(entity, SceneTag::new(0)).unwrap();
        coordinator.add(entity, Transform::identity()).unwrap();
        let mut camera = Camera::default();
        camera.render = false;
        coordinator.add(entity, camera).unwrap();

        crate::systems::transform_matrix_system(&mut coordinator);
        camera_context_system(&mut coordinator);

        assert!(coordinator.singleton::<RenderContext>().cameras.is_empty());
    }
}
