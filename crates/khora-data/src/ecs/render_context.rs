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

//! `RenderContext` (§3): the singleton the render systems (§4.6) write into
//! and the pipeline/draw-command construction reads from. Reset by the
//! render driver at the start of each frame, for each scene.

use khora_core::ecs::{Entity, Singleton};
use khora_core::math::{LinearRgba, Mat4, Vec3};
use khora_core::renderer::api::FramebufferHandle;

use crate::ecs::components::{Attenuation, PipelineId};

/// No scene is currently being rendered.
pub const NO_SCENE: i32 = -1;

/// The camera data a single camera contributes to the frame (§4.6: "pushes a
/// `CameraContext`").
#[derive(Debug, Clone)]
pub struct CameraContext {
    pub view_projection: Mat4,
    pub position: Vec3,
    pub clear_color: LinearRgba,
    pub render_target: Option<FramebufferHandle>,
    pub pipeline: Option<PipelineId>,
}

/// A point or spot light reduced to what the draw-command construction
/// needs: which entity to re-read for its full light data, plus the
/// attenuation already resolved so hot per-draw-command code does not have
/// to match on `Light` again.
#[derive(Debug, Clone, Copy)]
pub struct LightRef {
    pub entity: Entity,
    pub color: LinearRgba,
    pub attenuation: Attenuation,
}

/// The lights visible to the rendered scene this frame (§4.6): an ambient
/// sum, a single directional slot, and capped point/spot arrays in scene
/// order — excess lights beyond the configured maxima are dropped, not
/// reordered.
#[derive(Debug, Clone, Default)]
pub struct SceneLights {
    pub ambient: LinearRgba,
    pub directional: Option<(Vec3, LinearRgba)>,
    pub points: Vec<LightRef>,
    pub spots: Vec<LightRef>,
}

impl SceneLights {
    /// Clears every field, ready for the light context system to repopulate.
    pub fn reset(&mut self) {
        self.ambient = LinearRgba::BLACK;
        self.directional = None;
        self.points.clear();
        self.spots.clear();
    }
}

/// The render-frame singleton (§3): which scene is rendering, the cameras
/// queued to draw it, and the scene's collected lights.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// The scene currently being rendered, or [`NO_SCENE`].
    pub scene_id: i32,
    /// Cameras queued to draw this frame, built by the camera context system.
    pub cameras: Vec<CameraContext>,
    /// Lights visible to the rendered scene, built by the light context system.
    pub scene_lights: SceneLights,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            scene_id: NO_SCENE,
            cameras: Vec::new(),
            scene_lights: SceneLights::default(),
        }
    }
}

impl Singleton for RenderContext {}

impl RenderContext {
    /// Resets the context for a new scene/frame (§3: "Reset by the render
    /// driver at the start of each frame for each scene").
    pub fn begin_frame(&mut self, scene_id: i32) {
        self.scene_id = scene_id;
        self.cameras.clear();
        self.scene_lights.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_context_has_no_scene() {
        let ctx = RenderContext::default();
        assert_eq!(ctx.scene_id, NO_SCENE);
    }

    #[test]
    fn begin_frame_clears_previous_contents() {
        let mut ctx = RenderContext::default();
        ctx.cameras.push(CameraContext {
            view_projection: Mat4::IDENTITY,
            position: Vec3::ZERO,
            clear_color: LinearRgba::BLACK,
            render_target: None,
            pipeline: None,
        });
        ctx.scene_lights.points.push(LightRef {
            entity: Entity(0),
            color: LinearRgba::WHITE,
            attenuation: Attenuation::DEFAULT,
        });

        ctx.begin_frame(2);

        assert_eq!(ctx.scene_id, 2);
        assert!(ctx.cameras.is_empty());
        assert!(ctx.scene_lights.points.is_empty());
    }
}
