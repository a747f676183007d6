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

//! `Light` (§3): ambient, directional, point, and spot light sources. The
//! light context system (§4.6) reads these each frame and folds them into
//! the `RenderContext` singleton's `SceneLights`; the component itself
//! carries no rendering state.

use khora_core::ecs::Component;
use khora_core::math::{LinearRgba, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::ecs::Memento;

/// Inverse-square-ish falloff constants for point and spot lights, applied
/// as `1 / (constant + linear * d + quadratic * d^2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    /// A commonly used falloff reaching near-zero around a range of ~50 units.
    pub const DEFAULT: Self = Self {
        constant: 1.0,
        linear: 0.09,
        quadratic: 0.032,
    };
}

impl Default for Attenuation {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A light source, one of the four kinds named in §3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// A uniform, directionless contribution applied to every surface.
    Ambient { color: LinearRgba },
    /// A directional (sun-like) light with no position, only a direction.
    Directional { direction: Vec3, color: LinearRgba },
    /// A positional light falling off with distance.
    Point {
        color: LinearRgba,
        attenuation: Attenuation,
    },
    /// A positional, directional light constrained to a cone.
    Spot {
        color: LinearRgba,
        direction: Vec3,
        inner_cone_radians: f32,
        outer_cone_radians: f32,
        attenuation: Attenuation,
    },
}

impl Component for Light {}

impl Light {
    /// A white ambient contribution at the given intensity.
    pub fn ambient(color: LinearRgba) -> Self {
        Self::Ambient { color }
    }

    /// A directional light pointing along `direction` (normalized by caller).
    pub fn directional(direction: Vec3, color: LinearRgba) -> Self {
        Self::Directional { direction, color }
    }

    /// A point light with the default falloff.
    pub fn point(color: LinearRgba) -> Self {
        Self::Point {
            color,
            attenuation: Attenuation::DEFAULT,
        }
    }

    /// A spot light with the given cone half-angles, in radians.
    pub fn spot(
        direction: Vec3,
        color: LinearRgba,
        inner_cone_radians: f32,
        outer_cone_radians: f32,
    ) -> Self {
        Self::Spot {
            color,
            direction,
            inner_cone_radians,
            outer_cone_radians,
            attenuation: Attenuation::DEFAULT,
        }
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::ambient(LinearRgba::WHITE)
    }
}

/// The persisted shape of a `Light`, with colors stored as plain `Vec4`
/// components since `LinearRgba` itself carries no serde impl.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LightData {
    Ambient { color: Vec4 },
    Directional { direction: Vec3, color: Vec4 },
    Point { color: Vec4, attenuation: Attenuation },
    Spot {
        color: Vec4,
        direction: Vec3,
        inner_cone_radians: f32,
        outer_cone_radians: f32,
        attenuation: Attenuation,
    },
}

impl Memento for Light {
    type Data = LightData;

    fn save(&self) -> LightData {
        match *self {
            Light::Ambient { color } => LightData::Ambient {
                color: color.to_vec4(),
            },
            Light::Directional { direction, color } => LightData::Directional {
                direction,
                color: color.to_vec4(),
            },
            Light::Point { color, attenuation } => LightData::Point {
                color: color.to_vec4(),
                attenuation,
            },
            Light::Spot {
                color,
                direction,
                inner_cone_radians,
                outer_cone_radians,
                attenuation,
            } => LightData::Spot {
                color: color.to_vec4(),
                direction,
                inner_cone_radians,
                outer_cone_radians,
                attenuation,
            },
        }
    }

    fn restore(data: LightData) -> Self {
        match data {
            LightData::Ambient { color } => Light::Ambient {
                color: LinearRgba::from_vec4(color),
            },
            LightData::Directional { direction, color } => Light::Directional {
                direction,
                color: LinearRgba::from_vec4(color),
            },
            LightData::Point { color, attenuation } => Light::Point {
                color: LinearRgba::from_vec4(color),
                attenuation,
            },
            LightData::Spot {
                color,
                direction,
                inner_cone_radians,
                outer_cone_radians,
                attenuation,
            } => Light::Spot {
                color: LinearRgba::from_vec4(color),
                direction,
                inner_cone_radians,
                outer_cone_radians,
                attenuation,
            },
        }
    }
}
