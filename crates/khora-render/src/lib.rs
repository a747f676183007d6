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

//! # Khora Render
//!
//! The pass-graph render pipeline (§4.5) and the per-frame render systems
//! (§4.6) that feed it: transform propagation, light/camera context
//! collection, and draw-command construction for meshes, billboards and
//! selection outlines.

mod draw_command;
mod pipeline;
mod registry;
mod resolver;
pub mod systems;

#[cfg(test)]
mod test_support;

pub use draw_command::DrawCommand;
pub use pipeline::{Pass, PassContext, PassId, Pipeline};
pub use registry::PipelineRegistry;
pub use resolver::{AssetResolver, ResolvedMaterial, ResolvedMesh};
