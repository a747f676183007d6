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

//! Engine-wide configuration, applied before the engine is constructed.

use crate::math::LinearRgba;

/// Configuration consumed by the ECS coordinator and the application loop.
///
/// Constructed via [`EngineConfig::default`] and overridden by the host
/// application before handing it to `Coordinator::new`/`Engine::new`.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Initial window width, in logical pixels.
    pub window_width: u32,
    /// Initial window height, in logical pixels.
    pub window_height: u32,
    /// Whether the window backend should request vsync.
    pub vsync: bool,
    /// Default framebuffer clear color.
    pub clear_color: LinearRgba,
    /// Maximum number of simultaneously live entities (§3: "max ~5000 live").
    pub max_entities: u32,
    /// Maximum number of point lights collected per `RenderContext` update.
    pub max_point_lights: usize,
    /// Maximum number of spot lights collected per `RenderContext` update.
    pub max_spot_lights: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            vsync: true,
            clear_color: LinearRgba::new(0.1, 0.1, 0.12, 1.0),
            max_entities: 5000,
            max_point_lights: 32,
            max_spot_lights: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec_entity_cap() {
        assert_eq!(EngineConfig::default().max_entities, 5000);
    }
}
