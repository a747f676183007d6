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

//! Billboard render system (§4.6): faces every billboard quad toward each
//! camera drawing it. Builds the quad's vertex array lazily, the first time
//! an entity is drawn, from the cached billboard mesh in `khora_geometry`.

use khora_core::math::{Mat4, Vec3, Vec4};
use khora_core::renderer::api::{BufferUsage, PassFilter, UniformValue, VertexArrayDescriptor};
use khora_core::renderer::traits::GraphicsDevice;
use khora_data::ecs::components::{Billboard, BillboardOrientation, MaterialRef, SceneTag, Transform};
use khora_data::ecs::{Coordinator, Entity, RenderContext};

use crate::draw_command::DrawCommand;
use crate::registry::PipelineRegistry;
use crate::resolver::AssetResolver;

pub fn billboard_render_system(
    coordinator: &mut Coordinator,
    registry: &mut PipelineRegistry,
    resolver: &dyn AssetResolver,
    device: &dyn GraphicsDevice,
) {
    let scene_id = coordinator.singleton::<RenderContext>().scene_id;
    let entities: Vec<Entity> = coordinator.query::<Billboard>().0.to_vec();

    for entity in entities {
        let in_scene = coordinator
            .get::<SceneTag>(entity)
            .map(|tag| tag.scene_id == scene_id && tag.rendered)
            .unwrap_or(false);
        if !in_scene {
            continue;
        }

        let Some(&MaterialRef(material_id)) = coordinator.get::<MaterialRef>(entity) else {
            continue;
        };
        let Some(material) = resolver.resolve_material(material_id) else {
            continue;
        };
        let Some(position) = coordinator.get::<Transform>(entity).map(world_position) else {
            continue;
        };

        let vertex_array = match ensure_vertex_array(coordinator, entity, device) {
            Some(handle) => handle,
            None => continue,
        };

        let (width, height, orientation) = {
            let billboard = coordinator.get::<Billboard>(entity).expect("billboard entity");
            (billboard.width, billboard.height, billboard.orientation)
        };

        for camera in coordinator.singleton::<RenderContext>().cameras.clone() {
            let Some(pipeline_id) = camera.pipeline else {
                continue;
            };
            let model = face_camera_model(position, camera.position, width, height, orientation);

            let command = DrawCommand::new(vertex_array.clone(), 6, material.program, PassFilter::FORWARD)
                .with_uniform("u_model", UniformValue::Mat4(model))
                .with_uniform("u_entity_id", UniformValue::Int(entity.index() as i32))
                .with_uniform("u_base_color", UniformValue::Vec4(material.base_color.to_vec4()))
                .with_uniform("u_view_projection", UniformValue::Mat4(camera.view_projection));

            if let Some(pipeline) = registry.get_mut(pipeline_id) {
                pipeline.add_draw_command(command);
            }
        }
    }
}

fn world_position(transform: &Transform) -> Vec3 {
    let col = transform.world_matrix.cols[3];
    Vec3::new(col.x, col.y, col.z)
}

/// `T · R_face · S` (§4.6): a look vector from billboard to camera, then
/// orthonormalized right/up, negated look preserving winding.
fn face_camera_model(
    position: Vec3,
    camera_position: Vec3,
    width: f32,
    height: f32,
    orientation: BillboardOrientation,
) -> Mat4 {
    let world_up = Vec3::Y;
    let mut look = (camera_position - position).normalize();

    let up_axis = match orientation {
        BillboardOrientation::AxisLocked => {
            look.y = 0.0;
            look = look.normalize();
            world_up
        }
        BillboardOrientation::CustomAxis(axis) => axis,
        BillboardOrientation::AlwaysFaceCamera => world_up,
    };

    let right = up_axis.cross(look).normalize();
    let up = look.cross(right);

    let rotation = Mat4::from_cols(
        Vec4::new(right.x, right.y, right.z, 0.0),
        Vec4::new(up.x, up.y, up.z, 0.0),
        Vec4::new(-look.x, -look.y, -look.z, 0.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    );

    Mat4::from_translation(position) * rotation * Mat4::from_scale(Vec3::new(width, height, 1.0))
}

fn ensure_vertex_array(
    coordinator: &mut Coordinator,
    entity: Entity,
    device: &dyn GraphicsDevice,
) -> Option<khora_core::renderer::api::VertexArrayHandle> {
    if let Some(existing) = coordinator
        .get::<Billboard>(entity)
        .and_then(|b| b.vertex_array.clone())
    {
        return Some(existing);
    }

    let mesh = khora_geometry::billboard();
    let vertex_buffer = device
        .create_vertex_buffer(bytemuck::cast_slice(mesh.vertices()), BufferUsage::VERTEX)
        .map_err(|err| log::warn!("failed to upload billboard vertex buffer: {err}"))
        .ok()?;
    let index_buffer = device
        .create_index_buffer(mesh.indices(), BufferUsage::INDEX)
        .map_err(|err| log::warn!("failed to upload billboard index buffer: {err}"))
        .ok()?;
    let vertex_array = device
        .create_vertex_array(VertexArrayDescriptor {
            vertex_buffers: vec![(vertex_buffer, khora_geometry::Mesh::layout())],
            index_buffer,
            provided_attributes: khora_geometry::Mesh::provided_attributes(),
        })
        .map_err(|err| log::warn!("failed to create billboard vertex array: {err}"))
        .ok()?;

    if let Some(billboard) = coordinator.get_mut::<Billboard>(entity) {
        billboard.vertex_array = Some(vertex_array.clone());
    }
    Some(vertex_array)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_face_camera_points_negative_look_toward_camera() {
        let model = face_camera_model(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 5.0),
            1.0,
            1.0,
            BillboardOrientation::AlwaysFaceCamera,
        );
        let forward = Vec3::new(model.cols[2].x, model.cols[2].y, model.cols[2].z);
        assert!(forward.dot(Vec3::new(0.0, 0.0, 1.0)) < 0.0);
    }

    #[test]
    fn axis_locked_orientation_has_no_vertical_tilt() {
        let model = face_camera_model(
            Vec3::ZERO,
            Vec3::new(3.0, 4.0, 0.0),
            1.0,
            1.0,
            BillboardOrientation::AxisLocked,
        );
        let up = Vec3::new(model.cols[1].x, model.cols[1].y, model.cols[1].z);
        assert!((up.dot(Vec3::Y) - 1.0).abs() < 1e-5);
    }
}
