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

//! Transform matrix and transform hierarchy systems (§4.6). The matrix
//! system must run before the hierarchy system every frame.

use khora_core::math::Mat4;
use khora_data::ecs::components::{Parent, Transform};
use khora_data::ecs::{Coordinator, Entity};

/// Recomputes `local` from translation/rotation/scale for every transform,
/// then sets `world = local`. The hierarchy system overwrites `world` for
/// every non-root entity afterward.
pub fn transform_matrix_system(coordinator: &mut Coordinator) {
    let entities: Vec<Entity> = coordinator.query::<Transform>().0.to_vec();
    for entity in entities {
        if let Some(transform) = coordinator.get_mut::<Transform>(entity) {
            transform.recompute_local();
            transform.world_matrix = transform.local_matrix;
        }
    }
}

/// Walks every root entity's `children` list, setting each child's `world`
/// to its parent's `world` composed with its own `local`. An entity listed
/// as a child but missing its own `Transform` is skipped without aborting
/// the rest of the traversal.
pub fn transform_hierarchy_system(coordinator: &mut Coordinator) {
    let roots: Vec<Entity> = coordinator
        .query::<Transform>()
        .0
        .iter()
        .filter(|&&entity| !coordinator.has::<Parent>(entity))
        .copied()
        .collect();

    for root in roots {
        visit(coordinator, root, Mat4::IDENTITY);
    }
}

fn visit(coordinator: &mut Coordinator, entity: Entity, parent_world: Mat4) {
    let (world, children) = match coordinator.get_mut::<Transform>(entity) {
        Some(transform) => {
            transform.world_matrix = parent_world * transform.local_matrix;
            (transform.world_matrix, transform.children.clone())
        }
        None => return,
    };
    for child in children {
        visit(coordinator, child, world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use khora_core::math::Vec3;

    fn new_coordinator() -> Coordinator {
        let mut coordinator = Coordinator::new(16);
        coordinator.register_component::<Transform>();
        coordinator.register_component::<Parent>();
        coordinator
    }

    #[test]
    fn matrix_system_composes_translation_rotation_scale() {
        let mut coordinator = new_coordinator();
        let entity = coordinator.create_entity().unwrap();
        coordinator
            .add(entity, Transform::from_translation(Vec3::new(1.0, 2.0, 3.0)))
            .unwrap();

        transform_matrix_system(&mut coordinator);

        let transform = coordinator.get::<Transform>(entity).unwrap();
        assert_eq!(transform.local_matrix, Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(transform.world_matrix, transform.local_matrix);
    }

    #[test]
    fn hierarchy_composes_parent_world_into_child() {
        let mut coordinator = new_coordinator();
        let parent = coordinator.create_entity().unwrap();
        let child = coordinator.create_entity().unwrap();

        coordinator
            .add(parent, Transform::from_translation(Vec3::new(10.0, 0.0, 0.0)))
            .unwrap();
        let mut child_transform = Transform::from_translation(Vec3::new(5.0, 0.0, 0.0));
        coordinator.add(child, child_transform.clone()).unwrap();
        coordinator.add(child, Parent(parent)).unwrap();
        child_transform.children.push(child);
        *coordinator.get_mut::<Transform>(parent).unwrap() = Transform {
            children: vec![child],
            ..Transform::from_translation(Vec3::new(10.0, 0.0, 0.0))
        };

        transform_matrix_system(&mut coordinator);
        transform_hierarchy_system(&mut coordinator);

        let world = coordinator.get::<Transform>(child).unwrap().world_matrix;
        assert_eq!(world.cols[3].x, 15.0);
    }

    #[test]
    fn missing_transform_on_a_listed_child_is_tolerated() {
        let mut coordinator = new_coordinator();
        let parent = coordinator.create_entity().unwrap();
        let ghost = Entity(999);
        coordinator
            .add(
                parent,
                Transform {
                    children: vec![ghost],
                    ..Transform::from_translation(Vec3::ZERO)
                },
            )
            .unwrap();

        transform_matrix_system(&mut coordinator);
        transform_hierarchy_system(&mut coordinator);
    }
}
