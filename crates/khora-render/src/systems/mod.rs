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

//! The fixed-order per-frame render systems (§4.6): transform matrix →
//! transform hierarchy → light context → camera context → mesh/billboard
//! render → selection outline.

mod billboard;
mod camera;
mod lights;
mod mesh;
mod selection;
mod transform;

pub use billboard::billboard_render_system;
pub use camera::camera_context_system;
pub use lights::light_context_system;
pub use mesh::mesh_render_system;
pub use selection::selection_outline_system;
pub use transform::{transform_hierarchy_system, transform_matrix_system};
