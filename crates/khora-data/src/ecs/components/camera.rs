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

//! `Camera` (§3, §4.5): viewport, projection, and the render pipeline it
//! owns. The pipeline itself lives in the rendering crate, not here — a
//! camera only carries the opaque [`PipelineId`] that looks it up in that
//! crate's pipeline registry (the arena-of-handles redesign breaks what
//! would otherwise be a cycle between this crate and the one that defines
//! `Pipeline`).

use khora_core::ecs::Component;
use khora_core::math::{LinearRgba, Mat4, Vec4};
use khora_core::renderer::api::FramebufferHandle;
use serde::{Deserialize, Serialize};

use crate::ecs::Memento;

/// An opaque key into a render pipeline registry owned by the rendering
/// crate. Never dereferenced here; `khora-data` only carries it around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PipelineId(pub u32);

/// How a camera projects world space onto its viewport (§3).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProjectionKind {
    Perspective { fov_y_radians: f32 },
    Orthographic { width: f32, height: f32 },
}

/// A camera (§3): viewport, projection, clear color, visibility flags, and
/// the pipeline/framebuffer it renders into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub projection: ProjectionKind,
    pub z_near: f32,
    pub z_far: f32,
    pub clear_color: LinearRgba,
    /// Whether this camera participates in simulation at all.
    pub active: bool,
    /// Whether this camera is drawn this frame.
    pub render: bool,
    /// Whether this is the scene's primary camera (e.g. for picking).
    pub main: bool,
    /// The pipeline this camera's render systems append draw commands to.
    pub pipeline: Option<PipelineId>,
    /// The framebuffer the pipeline ultimately renders into.
    pub target_framebuffer: Option<FramebufferHandle>,
}

impl Component for Camera {}

impl Camera {
    /// A perspective camera at the given viewport size, active/render/main.
    pub fn perspective(viewport_width: u32, viewport_height: u32, fov_y_radians: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            projection: ProjectionKind::Perspective { fov_y_radians },
            z_near: 0.1,
            z_far: 1000.0,
            clear_color: LinearRgba::BLACK,
            active: true,
            render: true,
            main: true,
            pipeline: None,
            target_framebuffer: None,
        }
    }

    /// Aspect ratio derived from the viewport dimensions (1.0 if height is 0).
    pub fn aspect_ratio(&self) -> f32 {
        if self.viewport_height == 0 {
            1.0
        } else {
            self.viewport_width as f32 / self.viewport_height as f32
        }
    }

    /// The projection matrix for this camera's current viewport/projection.
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            ProjectionKind::Perspective { fov_y_radians } => {
                Mat4::perspective_rh_zo(fov_y_radians, self.aspect_ratio(), self.z_near, self.z_far)
            }
            ProjectionKind::Orthographic { width, height } => {
                let hw = width / 2.0;
                let hh = height / 2.0;
                Mat4::orthographic_rh_zo(-hw, hw, -hh, hh, self.z_near, self.z_far)
            }
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(1920, 1080, 60.0_f32.to_radians())
    }
}

/// The persisted shape of a `Camera`: pipeline and framebuffer are runtime
/// GPU resources, rebuilt by the rendering layer on load, never saved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraData {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub projection: ProjectionKind,
    pub z_near: f32,
    pub z_far: f32,
    pub clear_color: Vec4,
    pub active: bool,
    pub render: bool,
    pub main: bool,
}

impl Memento for Camera {
    type Data = CameraData;

    fn save(&self) -> CameraData {
        CameraData {
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            projection: self.projection,
            z_near: self.z_near,
            z_far: self.z_far,
            clear_color: self.clear_color.to_vec4(),
            active: self.active,
            render: self.render,
            main: self.main,
        }
    }

    fn restore(data: CameraData) -> Self {
        Self {
            viewport_width: data.viewport_width,
            viewport_height: data.viewport_height,
            projection: data.projection,
            z_near: data.z_near,
            z_far: data.z_far,
            clear_color: LinearRgba::from_vec4(data.clear_color),
            active: data.active,
            render: data.render,
            main: data.main,
            pipeline: None,
            target_framebuffer: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_16_9_perspective() {
        let camera = Camera::default();
        assert!((camera.aspect_ratio() - 16.0 / 9.0).abs() < 0.01);
        assert!(camera.active && camera.render && camera.main);
    }

    #[test]
    fn zero_height_falls_back_to_unit_aspect() {
        let mut camera = Camera::default();
        camera.viewport_height = 0;
        assert_eq!(camera.aspect_ratio(), 1.0);
    }

    #[test]
    fn memento_drops_gpu_handles() {
        let mut camera = Camera::default();
        camera.pipeline = Some(PipelineId(3));
        let restored = Camera::restore(camera.save());
        assert!(restored.pipeline.is_none());
        assert!(restored.target_framebuffer.is_none());
        assert_eq!(restored.viewport_width, camera.viewport_width);
    }
}
