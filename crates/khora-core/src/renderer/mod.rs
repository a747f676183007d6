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

//! The backend-agnostic GPU resource layer (§3, §4.3, §4.4, §6).
//!
//! This module defines the "what" of rendering: buffers, vertex arrays,
//! textures, framebuffers, shader programs, and the [`GraphicsDevice`]
//! trait a concrete backend (the OpenGL implementation in `khora-infra`)
//! must satisfy. Pipelines, render systems, and primitive mesh generation
//! consume this layer from `khora-render` and `khora-geometry`; neither
//! lives here, since they depend on ECS state this crate does not own.

pub mod api;
pub mod traits;

pub use api::*;
pub use traits::GraphicsDevice;
