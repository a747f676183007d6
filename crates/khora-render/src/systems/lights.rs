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

//! Light context system (§4.6): folds every `Light` in the rendered scene
//! into `RenderContext.scene_lights`, clamped to the configured maxima.

use khora_core::config::EngineConfig;
use khora_data::ecs::components::{Light, SceneTag};
use khora_data::ecs::{Coordinator, LightRef, RenderContext};

/// Resets and repopulates `RenderContext.scene_lights` from every `Light` in
/// the rendered scene. Ambient contributions sum; only one directional light
/// is kept (the last seen wins); point and spot lists are capped at
/// `config.max_point_lights`/`max_spot_lights`, excess lights dropped in
/// scene order rather than reordered.
pub fn light_context_system(coordinator: &mut Coordinator, config: &EngineConfig) {
    let scene_id = coordinator.singleton::<RenderContext>().scene_id;

    let lights: Vec<_> = {
        let (entities, lights) = coordinator.query::<Light>();
        entities.iter().copied().zip(lights.iter().copied()).collect()
    };

    coordinator.singleton_mut::<RenderContext>().scene_lights.reset();

    for (entity, light) in lights {
        let in_scene = coordinator
            .get::<SceneTag>(entity)
            .map(|tag| tag.scene_id == scene_id && tag.rendered)
            .unwrap_or(false);
        if !in_scene {
            continue;
        }

        let scene_lights = &mut coordinator.singleton_mut::<RenderContext>().scene_lights;
        match light {
            Light::Ambient { color } => scene_lights.ambient = scene_lights.ambient + color,
            Light::Directional { direction, color } => {
                scene_lights.directional = Some((direction, color));
            }
            Light::Point { color, attenuation } => {
                if scene_lights.points.len() < config.max_point_lights {
                    scene_lights.points.push(LightRef {
                        entity,
                        color,
                        attenuation,
                    });
                }
            }
            Light::Spot {
                color, attenuation, ..
            } => {
                if scene_lights.spots.len() < config.max_spot_lights {
                    scene_lights.spots.push(LightRef {
                        entity,
                        color,
                        attenuation,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use khora_core::math::LinearRgba;

    fn new_coordinator() -> Coordinator {
        let mut coordinator = Coordinator::new(16);
        coordinator.register_component::<Light>();
        coordinator.register_component::<SceneTag>();
        coordinator.register_singleton::<RenderContext>();
        coordinator
    }

    #[test]
    fn ambient_lights_sum_and_directional_keeps_last() {
        let mut coordinator = new_coordinator();
        coordinator.singleton_mut::<RenderContext>().begin_frame(0);

        let a = coordinator.create_entity().unwrap();
        coordinator.add(a, SceneTag::new(0)).unwrap();
        coordinator
            .add(a, Light::ambient(LinearRgba::rgb(0.1, 0.1, 0.1)))
            .unwrap();

        let b = coordinator.create_entity().unwrap();
        coordinator.add(b, SceneTag::new(0)).unwrap();
        coordinator
            .add(b, Light::ambient(LinearRgba::rgb(0.2, 0.0, 0.0)))
            .unwrap();

        light_context_system(&mut coordinator, &EngineConfig::default());

        let ambient = coordinator.singleton::<RenderContext>().scene_lights.ambient;
        assert!((ambient.r - 0.3).abs() < 1e-5);
    }

    #[test]
    fn point_lights_are_capped_at_the_configured_maximum() {
        let mut coordinator = new_coordinator();
        coordinator.singleton_mut::<RenderContext>().begin_frame(0);

        for _ in 0..5 {
            let e = coordinator.create_entity().unwrap();
            coordinator.add(e, SceneTag::new(0)).unwrap();
            coordinator.add(e, Light::point(LinearRgba::WHITE)).unwrap();
        }

        let config = EngineConfig {
            max_point_lights: 2,
            ..EngineConfig::default()
        };
        light_context_system(&mut coordinator, &config);

        assert_eq!(coordinator.singleton::<RenderContext>().scene_lights.points.len(), 2);
    }

    #[test]
    fn lights_outside_the_rendered_scene_are_ignored() {
        let mut coordinator = new_coordinator();
        coordinator.singleton_mut::<RenderContext>().begin_frame(0);

        let e = coordinator.create_entity().unwrap();
        coordinator.add(e, SceneTag::new(1)).unwrap();
        coordinator
            .add(e, Light::ambient(LinearRgba::rgb(0.5, 0.5, 0.5)))
            .unwrap();

        light_context_system(&mut coordinator, &EngineConfig::default());

        assert_eq!(
            coordinator.singleton::<RenderContext>().scene_lights.ambient,
            LinearRgba::BLACK
        );
    }
}
