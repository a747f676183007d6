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

//! `SceneTag` (§3): defines which scene an entity belongs to. Render and
//! simulation systems filter entities against `RenderContext.scene_id`
//! rather than walking a separate scene graph.

use khora_core::ecs::Component;
use serde::{Deserialize, Serialize};

use crate::ecs::Memento;

/// Scene membership plus per-scene visibility flags (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneTag {
    /// The scene this entity belongs to.
    pub scene_id: i32,
    /// Whether the entity participates in simulation.
    pub active: bool,
    /// Whether the entity is drawn when its scene is rendered.
    pub rendered: bool,
}

impl Component for SceneTag {}

impl SceneTag {
    /// Creates a tag for `scene_id`, active and rendered.
    pub fn new(scene_id: i32) -> Self {
        Self {
            scene_id,
            active: true,
            rendered: true,
        }
    }
}

impl Memento for SceneTag {
    type Data = SceneTag;

    fn save(&self) -> SceneTag {
        *self
    }

    fn restore(data: SceneTag) -> Self {
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tag_is_active_and_rendered() {
        let tag = SceneTag::new(3);
        assert_eq!(tag.scene_id, 3);
        assert!(tag.active);
        assert!(tag.rendered);
    }

    #[test]
    fn memento_is_identity() {
        let tag = SceneTag::new(1);
        assert_eq!(SceneTag::restore(tag.save()), tag);
    }
}
